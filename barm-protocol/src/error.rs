use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error("barm-protocol: Malformed response: expected 4 bytes, got {}.", len)]
    MalformedResponse { len: usize },
    #[error(
        "barm-protocol: Connection closed after {} of {} bytes.",
        received,
        expected
    )]
    ConnectionClosed { expected: usize, received: usize },
    #[error("barm-protocol: Failed to connect to {:?} ({}).", .path, .source)]
    Connect {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("barm-protocol: IO: {}", .0)]
    Io(#[from] std::io::Error),
}
