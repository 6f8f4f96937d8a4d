#![allow(dead_code)]

use std::{
    io::{Read, Write},
    os::unix::net::UnixStream,
    path::Path,
    sync::mpsc,
    thread::{self, JoinHandle},
};

use barm_protocol::{
    codec::{decode_request, encode_response, REQUEST_LEN},
    Outcome, TargetPoint,
};

/// Stand-in for the arm's IK: rejects targets out of reach, otherwise
/// answers with the absolute coordinates as angles.
pub fn fake_ik(p: &TargetPoint) -> Outcome {
    if p.norm() > 12.0 {
        Outcome::Rejected { code: 1 }
    } else {
        Outcome::Pose {
            shoulder: p.x.abs() as u8,
            elbow: p.y.abs() as u8,
            rotation: p.z.abs() as u16,
        }
    }
}

/// Serves one connection until the peer hangs up, forwarding every decoded
/// request on `requests`. Responses are written one byte at a time.
pub fn serve(mut stream: UnixStream, requests: mpsc::Sender<TargetPoint>) {
    let mut buf = [0u8; REQUEST_LEN];
    while stream.read_exact(&mut buf).is_ok() {
        let p = decode_request(&buf);
        let _ = requests.send(p);
        for byte in encode_response(&fake_ik(&p)) {
            if stream.write_all(&[byte]).is_err() {
                return;
            }
        }
    }
}

/// Serves at most `max_requests` requests, then hangs up.
pub fn serve_then_close(mut stream: UnixStream, max_requests: usize) {
    let mut buf = [0u8; REQUEST_LEN];
    for _ in 0..max_requests {
        if stream.read_exact(&mut buf).is_err() {
            return;
        }
        let response = encode_response(&fake_ik(&decode_request(&buf)));
        if stream.write_all(&response).is_err() {
            return;
        }
    }
}

/// Binds `path` and serves a single connection on a background thread.
pub fn spawn_daemon(path: &Path) -> (JoinHandle<()>, mpsc::Receiver<TargetPoint>) {
    let listener = std::os::unix::net::UnixListener::bind(path).unwrap();
    let (tx, rx) = mpsc::channel();
    let handle = thread::spawn(move || {
        let (stream, _) = listener.accept().unwrap();
        serve(stream, tx);
    });
    (handle, rx)
}
