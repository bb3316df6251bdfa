use bytes::Bytes;
use tracing::warn;
use xsprims_transport::{RawRead, RawWrite};

use crate::error::{ChannelError, Result};
use crate::reader::read_exact;
use crate::writer::write_all;

/// A handle wrapped with exact-transfer send/receive.
///
/// The wrapper holds no buffered data between calls. After the first failed
/// transfer it is poisoned and returns [`ChannelError::Poisoned`] without
/// touching the handle again.
#[derive(Debug)]
pub struct Channel<T> {
    inner: T,
    poisoned: bool,
    bytes_sent: u64,
    bytes_received: u64,
}

impl<T> Channel<T> {
    /// Wrap an already-open handle.
    pub fn new(inner: T) -> Self {
        Self {
            inner,
            poisoned: false,
            bytes_sent: 0,
            bytes_received: 0,
        }
    }

    /// Whether an earlier transfer failed.
    pub fn is_poisoned(&self) -> bool {
        self.poisoned
    }

    /// Total bytes sent through this wrapper.
    pub fn bytes_sent(&self) -> u64 {
        self.bytes_sent
    }

    /// Total bytes received through this wrapper.
    pub fn bytes_received(&self) -> u64 {
        self.bytes_received
    }

    /// Borrow the underlying handle.
    pub fn get_ref(&self) -> &T {
        &self.inner
    }

    /// Mutably borrow the underlying handle.
    ///
    /// I/O done directly on the handle bypasses the poisoning check.
    pub fn get_mut(&mut self) -> &mut T {
        &mut self.inner
    }

    /// Consume the wrapper and return the handle.
    pub fn into_inner(self) -> T {
        self.inner
    }

    fn check(&self) -> Result<()> {
        if self.poisoned {
            return Err(ChannelError::Poisoned);
        }
        Ok(())
    }

    fn poison(&mut self, err: &ChannelError) {
        warn!(%err, "channel transfer failed; channel is no longer usable");
        self.poisoned = true;
    }
}

impl<T: RawWrite> Channel<T> {
    /// Send every byte of `data`.
    pub fn send(&mut self, data: &[u8]) -> Result<()> {
        self.check()?;
        match write_all(&mut self.inner, data) {
            Ok(()) => {
                self.bytes_sent += data.len() as u64;
                Ok(())
            }
            Err(err) => {
                self.poison(&err);
                Err(err)
            }
        }
    }
}

impl<T: RawRead> Channel<T> {
    /// Receive exactly `length` bytes.
    pub fn recv(&mut self, length: usize) -> Result<Bytes> {
        self.check()?;
        match read_exact(&mut self.inner, length) {
            Ok(bytes) => {
                self.bytes_received += bytes.len() as u64;
                Ok(bytes)
            }
            Err(err) => {
                self.poison(&err);
                Err(err)
            }
        }
    }
}
