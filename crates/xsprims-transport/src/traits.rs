use std::io::{ErrorKind, Read, Write};

/// Single-shot write capability.
///
/// A call may accept fewer bytes than offered. Errors are returned, never
/// encoded in the count.
pub trait RawWrite {
    /// Write some prefix of `data`, returning how many bytes were accepted.
    fn write_raw(&mut self, data: &[u8]) -> std::io::Result<usize>;
}

/// Single-shot read capability.
///
/// A call may fill fewer bytes than requested; `Ok(0)` means the peer has
/// nothing more to give.
pub trait RawRead {
    /// Read up to `buf.len()` bytes into `buf`, returning how many were read.
    fn read_raw(&mut self, buf: &mut [u8]) -> std::io::Result<usize>;
}

// EINTR is retried here, at the system-call boundary, so it never reaches
// callers as a transfer failure.
impl<T: Write + ?Sized> RawWrite for T {
    fn write_raw(&mut self, data: &[u8]) -> std::io::Result<usize> {
        loop {
            match self.write(data) {
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                other => return other,
            }
        }
    }
}

impl<T: Read + ?Sized> RawRead for T {
    fn read_raw(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        loop {
            match self.read(buf) {
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                other => return other,
            }
        }
    }
}
