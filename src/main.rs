use pollen_hdf::{cli, errors::AppError, ui};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let result = tokio::runtime::Runtime::new()
        .map_err(|e| AppError::IoError(e.to_string()))
        .and_then(|rt| rt.block_on(cli::cli()));

    if let Err(err) = result {
        eprintln!("{}", ui::app_error_message(&err));
        std::process::exit(1);
    }
}
