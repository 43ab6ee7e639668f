//! Transport adapter (§A / §6): the byte-level `send`/`recv` callbacks the
//! core consumes. Everything below this abstraction — sockets, serial
//! lines, shared memory — is the caller's concern.

use crate::error::Result;

/// A byte-level transport: one frame out, one frame in, strictly
/// synchronous.
///
/// Implementations make no guarantee about blocking behavior; timeouts and
/// retries are the transport's responsibility, not the command engine's.
pub trait Transport {
    /// Transmit exactly `frame`. A transport-level failure should be
    /// surfaced as `Err`; the command engine turns that into
    /// [`crate::error::Error::Comm`].
    fn send(&mut self, frame: &[u8]) -> Result<()>;

    /// Receive one complete frame into `buf`, returning the number of bytes
    /// written. `buf` is always `MAX_MESSAGE` bytes long.
    fn recv(&mut self, buf: &mut [u8]) -> Result<usize>;
}

/// Adapts a pair of `send`/`recv` closures to [`Transport`], matching the
/// `new(send_fn, recv_fn)` construction shape of §6.
pub struct CallbackTransport<S, R> {
    send_fn: S,
    recv_fn: R,
}

impl<S, R> CallbackTransport<S, R>
where
    S: FnMut(&[u8]) -> Result<()>,
    R: FnMut(&mut [u8]) -> Result<usize>,
{
    pub fn new(send_fn: S, recv_fn: R) -> Self {
        Self { send_fn, recv_fn }
    }
}

impl<S, R> Transport for CallbackTransport<S, R>
where
    S: FnMut(&[u8]) -> Result<()>,
    R: FnMut(&mut [u8]) -> Result<usize>,
{
    fn send(&mut self, frame: &[u8]) -> Result<()> {
        (self.send_fn)(frame)
    }

    fn recv(&mut self, buf: &mut [u8]) -> Result<usize> {
        (self.recv_fn)(buf)
    }
}
