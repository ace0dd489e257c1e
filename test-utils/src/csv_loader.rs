use std::error::Error;

use common::{Coordinate, SensorSample};
use csv::Reader;

/// Recorded walk: ten rows at 100 ms, the first two before a location fix was acquired.
pub const TRACE_PATH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/test_data/trace.csv");

#[repr(usize)]
#[derive(Debug, Clone, Copy)]
pub enum CsvFileColum {
    OffsetMs,
    XAccel,
    YAccel,
    ZAccel,
    XGyro,
    YGyro,
    ZGyro,
    Latitude,
    Longitude,
    Accuracy,
}

impl From<CsvFileColum> for usize {
    fn from(value: CsvFileColum) -> Self {
        value as usize
    }
}

#[derive(Clone, Debug, Default)]
pub struct CsvColumnMapper {
    columns: Vec<usize>,
}

impl CsvColumnMapper {
    pub fn new() -> Self {
        Self { columns: vec![] }
    }

    pub fn columns(&self) -> Vec<usize> {
        self.columns.clone()
    }

    pub fn add_offset(&mut self) -> &mut Self {
        self.columns.push(CsvFileColum::OffsetMs.into());
        self
    }

    pub fn add_accel(&mut self) -> &mut Self {
        self.columns.push(CsvFileColum::XAccel.into());
        self.columns.push(CsvFileColum::YAccel.into());
        self.columns.push(CsvFileColum::ZAccel.into());
        self
    }

    pub fn add_gyro(&mut self) -> &mut Self {
        self.columns.push(CsvFileColum::XGyro.into());
        self.columns.push(CsvFileColum::YGyro.into());
        self.columns.push(CsvFileColum::ZGyro.into());
        self
    }

    pub fn add_location(&mut self) -> &mut Self {
        self.columns.push(CsvFileColum::Latitude.into());
        self.columns.push(CsvFileColum::Longitude.into());
        self.columns.push(CsvFileColum::Accuracy.into());
        self
    }
}

/// One row of a recorded trace.
#[derive(Clone, Debug, PartialEq)]
pub struct TraceRow {
    pub offset_ms: u64,
    pub accelerometer: SensorSample,
    pub gyroscope: SensorSample,
    pub location: Option<Coordinate>,
}

impl TryFrom<Vec<f64>> for TraceRow {
    type Error = String;

    fn try_from(values: Vec<f64>) -> Result<Self, Self::Error> {
        if values.len() != 10 {
            return Err(format!("Expected 10 columns, got {}", values.len()));
        }
        if values[..7].iter().any(|v| v.is_nan()) {
            return Err("Missing sensor value".to_string());
        }
        let location = if values[7..].iter().any(|v| v.is_nan()) {
            None
        } else {
            Some(Coordinate::new(values[7], values[8], values[9]))
        };
        Ok(Self {
            offset_ms: values[0] as u64,
            accelerometer: SensorSample::new([values[1], values[2], values[3]]),
            gyroscope: SensorSample::new([values[4], values[5], values[6]]),
            location,
        })
    }
}

/// Loads every row as floats. Empty cells load as NaN so column positions are kept.
pub fn load_csv(file_path: &str) -> Result<Vec<Vec<f64>>, Box<dyn Error>> {
    let mut rdr = Reader::from_path(file_path)?;
    let mut data = Vec::new();

    for result in rdr.records() {
        let record = result?;
        let row = record
            .iter()
            .map(|s| {
                let s = s.trim();
                if s.is_empty() {
                    Ok(f64::NAN)
                } else {
                    s.parse::<f64>()
                }
            })
            .collect::<Result<Vec<f64>, _>>()?;
        data.push(row);
    }

    Ok(data)
}

pub fn load_csv_columns<T: TryFrom<Vec<f64>>>(
    file_path: &str,
    columns: &[usize],
) -> Result<Vec<T>, Box<dyn Error>> {
    if columns.is_empty() {
        return Err("No columns provided".into());
    }

    let data = load_csv(file_path)?;

    let result = data
        .into_iter()
        .map(|rows| {
            columns
                .iter()
                .map(|&i| {
                    rows.get(i)
                        .ok_or_else(|| format!("Column index {} out of bounds", i).into())
                        .copied()
                })
                .collect::<Result<Vec<f64>, Box<dyn Error>>>()
        })
        .collect::<Result<Vec<Vec<f64>>, Box<dyn Error>>>()?
        .into_iter()
        .map(|f64_values| {
            T::try_from(f64_values).map_err(|_| "Failed to convert to T".to_string().into())
        })
        .collect::<Result<Vec<T>, Box<dyn Error>>>()?;

    Ok(result)
}

pub fn load_trace(file_path: &str) -> Result<Vec<TraceRow>, Box<dyn Error>> {
    let mut mapper = CsvColumnMapper::new();
    mapper.add_offset().add_accel().add_gyro().add_location();
    load_csv_columns(file_path, &mapper.columns())
}
