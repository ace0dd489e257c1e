pub mod config;
pub mod errors;
pub(crate) mod http_client;
pub mod report;
pub(crate) mod shutdown;
