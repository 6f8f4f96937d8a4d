use tracing::trace;

use crate::{
    codec::{self, RESPONSE_LEN},
    Error, Outcome, TargetPoint, Transport,
};

/// Sends target points to the daemon, one round trip at a time.
///
/// The client owns its transport; dropping the client closes the
/// connection.
#[derive(Debug)]
pub struct ProtocolClient<T> {
    transport: T,
}

impl<T: Transport> ProtocolClient<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    /// Sends `point` and blocks until its response has been read.
    ///
    /// A rejected request is a successful round trip and is returned as
    /// [`Outcome::Rejected`]. Transport failures are returned as they are,
    /// without retry.
    pub fn send_target(&mut self, point: &TargetPoint) -> Result<Outcome, Error> {
        let request = codec::encode_request(point);
        trace!(%point, ?request, "write request");
        self.transport.write_all(&request)?;

        let mut response = [0u8; RESPONSE_LEN];
        self.transport.read_exact(&mut response)?;
        trace!(?response, "read response");
        codec::decode_response(&response)
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn into_inner(self) -> T {
        self.transport
    }
}
