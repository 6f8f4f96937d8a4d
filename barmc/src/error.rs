use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error("barmc: barm-protocol: {:?}", .0)]
    Protocol(#[from] barm_protocol::Error),
    #[error("barmc: barm-trajectory: {:?}", .0)]
    Trajectory(#[from] barm_trajectory::Error),
    #[error("barmc: No File {:?} is found ({}).", .0, .1)]
    NoFile(PathBuf, #[source] std::io::Error),
    #[error("barmc: Failed to parse {:?} as toml ({}).", .0, .1)]
    TomlParseFailure(PathBuf, #[source] toml::de::Error),
    #[error("barmc: Timeout must be positive and finite, got {}.", .0)]
    InvalidTimeout(f64),
}
