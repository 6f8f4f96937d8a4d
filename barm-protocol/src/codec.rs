//! Fixed-size binary layouts of the `barmd` socket protocol.
//!
//! ```text
//! request  (24 bytes): f64 x | f64 y | f64 z              little-endian
//! response  (4 bytes): u8 shoulder | u8 elbow | u16 rotation   little-endian
//! ```
//!
//! There is no header and no discriminant byte. A response equal to
//! [`REQUEST_INVALID_RESPONSE`] signals that the daemon rejected the request,
//! every other response is a pose.

use crate::{Error, Outcome, TargetPoint};

pub const REQUEST_LEN: usize = 24;
pub const RESPONSE_LEN: usize = 4;

/// Error code carried by the reserved "request invalid" response.
pub const REQUEST_INVALID: u16 = 0x0001;

/// Raw `(shoulder, elbow, rotation)` triple reserved for "request invalid".
pub const REQUEST_INVALID_RESPONSE: (u8, u8, u16) = (0x00, 0x00, REQUEST_INVALID);

pub fn encode_request(point: &TargetPoint) -> [u8; REQUEST_LEN] {
    let mut buf = [0u8; REQUEST_LEN];
    buf[0..8].copy_from_slice(&point.x.to_le_bytes());
    buf[8..16].copy_from_slice(&point.y.to_le_bytes());
    buf[16..24].copy_from_slice(&point.z.to_le_bytes());
    buf
}

pub fn decode_request(buf: &[u8; REQUEST_LEN]) -> TargetPoint {
    let f = |i: usize| {
        let mut b = [0u8; 8];
        b.copy_from_slice(&buf[i..i + 8]);
        f64::from_le_bytes(b)
    };
    TargetPoint::new(f(0), f(8), f(16))
}

/// Decodes a response. Total over every 4-byte buffer.
pub fn decode_response(buf: &[u8]) -> Result<Outcome, Error> {
    let buf: &[u8; RESPONSE_LEN] = buf
        .try_into()
        .map_err(|_| Error::MalformedResponse { len: buf.len() })?;
    let shoulder = buf[0];
    let elbow = buf[1];
    let field = u16::from_le_bytes([buf[2], buf[3]]);

    if (shoulder, elbow, field) == REQUEST_INVALID_RESPONSE {
        Ok(Outcome::Rejected { code: field })
    } else {
        Ok(Outcome::Pose {
            shoulder,
            elbow,
            rotation: field,
        })
    }
}

/// Daemon side of [`decode_response`].
///
/// `Rejected { code }` is written as `(0, 0, code)`; only `REQUEST_INVALID`
/// decodes back to `Rejected`.
pub fn encode_response(outcome: &Outcome) -> [u8; RESPONSE_LEN] {
    let (shoulder, elbow, field) = match *outcome {
        Outcome::Pose {
            shoulder,
            elbow,
            rotation,
        } => (shoulder, elbow, rotation),
        Outcome::Rejected { code } => (0, 0, code),
    };
    let mut buf = [0u8; RESPONSE_LEN];
    buf[0] = shoulder;
    buf[1] = elbow;
    buf[2..4].copy_from_slice(&field.to_le_bytes());
    buf
}
