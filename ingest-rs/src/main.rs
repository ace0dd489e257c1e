use env_logger::Env;
use ingest_rs::{run_server, IngestConfig};
use std::process::ExitCode;

/// Path of an optional JSON config file overriding the defaults.
const CONFIG_ENV: &str = "INGEST_CONFIG";

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let config = match std::env::var(CONFIG_ENV) {
        Ok(path) => match IngestConfig::from_file(&path) {
            Ok(config) => config,
            Err(e) => {
                log::error!("Failed to load config from {}: {}", path, e);
                return ExitCode::FAILURE;
            }
        },
        Err(_) => IngestConfig::default(),
    };

    if let Err(e) = run_server(config).await {
        log::error!("Server error: {}", e);
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
