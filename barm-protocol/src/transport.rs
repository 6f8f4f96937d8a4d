use std::io::{ErrorKind, Read, Write};
#[cfg(unix)]
use std::{os::unix::net::UnixStream, path::Path, time::Duration};

use auto_impl::auto_impl;
use tracing::debug;

use crate::Error;

/// Blocking, ordered, reliable duplex byte stream.
#[auto_impl(&mut, Box)]
pub trait Transport {
    /// Writes the whole buffer.
    fn write_all(&mut self, buf: &[u8]) -> Result<(), Error>;

    /// Blocks until `buf` is completely filled.
    ///
    /// Fails with [`Error::ConnectionClosed`] if the peer closes the stream
    /// first.
    fn read_exact(&mut self, buf: &mut [u8]) -> Result<(), Error>;
}

/// [`Transport`] over anything implementing [`Read`] and [`Write`].
#[derive(Debug)]
pub struct StreamTransport<S> {
    stream: S,
}

impl<S> StreamTransport<S> {
    pub fn new(stream: S) -> Self {
        Self { stream }
    }

    pub fn get_ref(&self) -> &S {
        &self.stream
    }

    pub fn into_inner(self) -> S {
        self.stream
    }
}

impl<S: Read + Write> Transport for StreamTransport<S> {
    fn write_all(&mut self, buf: &[u8]) -> Result<(), Error> {
        self.stream.write_all(buf)?;
        self.stream.flush()?;
        Ok(())
    }

    fn read_exact(&mut self, buf: &mut [u8]) -> Result<(), Error> {
        // A single read may return fewer bytes than requested.
        let mut received = 0;
        while received < buf.len() {
            match self.stream.read(&mut buf[received..]) {
                Ok(0) => {
                    return Err(Error::ConnectionClosed {
                        expected: buf.len(),
                        received,
                    })
                }
                Ok(n) => received += n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
        Ok(())
    }
}

#[cfg(unix)]
pub type UnixTransport = StreamTransport<UnixStream>;

#[cfg(unix)]
impl StreamTransport<UnixStream> {
    /// Connects to the daemon socket at `path`. Reads block indefinitely.
    pub fn connect<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        Self::connect_with_timeout(path, None)
    }

    /// Connects to the daemon socket at `path`.
    ///
    /// `timeout` bounds every single read and write on the socket. `None`
    /// blocks forever.
    pub fn connect_with_timeout<P: AsRef<Path>>(
        path: P,
        timeout: Option<Duration>,
    ) -> Result<Self, Error> {
        let path = path.as_ref();
        let connect_error = |source| Error::Connect {
            path: path.to_owned(),
            source,
        };
        let stream = UnixStream::connect(path).map_err(connect_error)?;
        stream.set_read_timeout(timeout).map_err(connect_error)?;
        stream.set_write_timeout(timeout).map_err(connect_error)?;
        debug!(?path, ?timeout, "connected");
        Ok(Self::new(stream))
    }
}
