use bytes::{Bytes, BytesMut};
use tracing::{debug, trace};
use xsprims_transport::RawRead;

use crate::error::{ChannelError, Result};

/// Upper bound on a single raw read request and on the up-front buffer
/// reservation, so a large `length` never allocates before data arrives.
pub(crate) const READ_CHUNK: usize = 64 * 1024;

/// Read exactly `length` bytes from `channel`.
///
/// Each raw read requests the remaining byte count, capped at 64 KiB; chunks
/// are kept in the order they arrive and the buffer grows with them. On error
/// the bytes already consumed are lost.
pub fn read_exact<R: RawRead + ?Sized>(channel: &mut R, length: usize) -> Result<Bytes> {
    let mut buf = BytesMut::with_capacity(length.min(READ_CHUNK));

    while buf.len() < length {
        let filled = buf.len();
        let want = (length - filled).min(READ_CHUNK);
        buf.resize(filled + want, 0);
        let n = channel.read_raw(&mut buf[filled..])?;
        if n == 0 {
            debug!(read = filled, expected = length, "raw read made no progress");
            return Err(ChannelError::ReadStalled {
                read: filled,
                expected: length,
            });
        }
        if n > want {
            return Err(ChannelError::Overrun {
                reported: n,
                requested: want,
            });
        }
        buf.truncate(filled + n);
        if buf.len() < length {
            trace!(read = buf.len(), expected = length, "short read");
        }
    }

    Ok(buf.freeze())
}
