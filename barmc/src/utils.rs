use std::{ffi::OsString, path::PathBuf};

use tracing::warn;
use tracing_subscriber::EnvFilter;

use crate::{ClientConfig, Error};

/// Names the setting file when `--config-path` is not given.
pub const CONFIG_PATH_ENV: &str = "BARMC_CONFIG_PATH";

/// An explicit path wins over the environment; an empty variable is ignored.
fn choose_config_path(explicit: Option<PathBuf>, from_env: Option<OsString>) -> Option<PathBuf> {
    explicit.or_else(|| {
        let path = PathBuf::from(from_env.filter(|s| !s.is_empty())?);
        warn!("using {} from {CONFIG_PATH_ENV}", path.display());
        Some(path)
    })
}

/// Loads the setting file named on the command line or by
/// `BARMC_CONFIG_PATH`, the defaults if neither is set.
pub fn resolve_config(config_path: Option<PathBuf>) -> Result<ClientConfig, Error> {
    match choose_config_path(config_path, std::env::var_os(CONFIG_PATH_ENV)) {
        Some(path) => ClientConfig::try_new(path),
        None => Ok(ClientConfig::default()),
    }
}

/// Logs to stderr, filtered by `RUST_LOG` (default `info`).
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
}
