/// Path the sampling device posts records to on the ingestion endpoint.
pub const INGEST_PATH: &str = "/sensordata";

pub const N_XYZ_COORDINATES: usize = 3;
