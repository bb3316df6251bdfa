use bytes::{Bytes, BytesMut};
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, trace};

use crate::error::{ChannelError, Result};
use crate::reader::READ_CHUNK;

/// Async counterpart of [`crate::write_all`].
pub async fn write_all_async<W>(channel: &mut W, data: &[u8]) -> Result<()>
where
    W: AsyncWrite + Unpin + ?Sized,
{
    let total = data.len();
    let mut written = 0usize;

    while written < total {
        let remaining = total - written;
        let n = match channel.write(&data[written..]).await {
            Ok(n) => n,
            Err(err) if err.kind() == std::io::ErrorKind::Interrupted => continue,
            Err(err) => return Err(err.into()),
        };
        if n == 0 {
            debug!(written, total, "raw write made no progress");
            return Err(ChannelError::WriteStalled { written, total });
        }
        if n > remaining {
            return Err(ChannelError::Overrun {
                reported: n,
                requested: remaining,
            });
        }
        written += n;
        trace!(written, total, "async write progress");
    }

    Ok(())
}

/// Async counterpart of [`crate::read_exact`].
pub async fn read_exact_async<R>(channel: &mut R, length: usize) -> Result<Bytes>
where
    R: AsyncRead + Unpin + ?Sized,
{
    let mut buf = BytesMut::with_capacity(length.min(READ_CHUNK));

    while buf.len() < length {
        let filled = buf.len();
        let want = (length - filled).min(READ_CHUNK);
        buf.resize(filled + want, 0);
        let n = match channel.read(&mut buf[filled..]).await {
            Ok(n) => n,
            Err(err) if err.kind() == std::io::ErrorKind::Interrupted => {
                buf.truncate(filled);
                continue;
            }
            Err(err) => return Err(err.into()),
        };
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
        trace!(read = buf.len(), expected = length, "async read progress");
    }

    Ok(buf.freeze())
}
