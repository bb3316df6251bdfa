use tracing::{debug, trace};
use xsprims_transport::RawWrite;

use crate::error::{ChannelError, Result};

/// Write all of `data` to `channel`.
///
/// Repeatedly offers the unwritten suffix to the raw primitive. On error the
/// number of bytes already sent is unknown to the caller.
pub fn write_all<W: RawWrite + ?Sized>(channel: &mut W, data: &[u8]) -> Result<()> {
    let total = data.len();
    let mut written = 0usize;

    while written < total {
        let remaining = total - written;
        let n = channel.write_raw(&data[written..])?;
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
        if written < total {
            trace!(written, total, "short write");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io::{ErrorKind, Write};

    use super::*;

    /// Accepts at most `limit` bytes per call and records every call.
    struct ChunkedSink {
        limit: usize,
        calls: Vec<Vec<u8>>,
    }

    impl ChunkedSink {
        fn new(limit: usize) -> Self {
            Self {
                limit,
                calls: Vec::new(),
            }
        }
    }

    impl Write for ChunkedSink {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            let n = buf.len().min(self.limit);
            self.calls.push(buf[..n].to_vec());
            Ok(n)
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn chunked_writes_deliver_everything_in_order() {
        let data: Vec<u8> = (0..=255u8).cycle().take(1000).collect();

        for limit in [1, 3, 7, 64, 999, 1000, 4096] {
            let mut sink = ChunkedSink::new(limit);
            write_all(&mut sink, &data).unwrap();

            assert_eq!(sink.calls.concat(), data, "limit {limit}");
            assert_eq!(sink.calls.len(), data.len().div_ceil(limit));
        }
    }

    #[test]
    fn each_call_offers_the_unwritten_suffix() {
        let mut sink = OfferRecorder::default();
        write_all(&mut sink, b"abcdefg").unwrap();

        assert_eq!(
            sink.offered,
            vec![b"abcdefg".to_vec(), b"defg".to_vec(), b"g".to_vec()]
        );
    }

    #[test]
    fn empty_data_makes_no_calls() {
        let mut sink = ChunkedSink::new(4);
        write_all(&mut sink, b"").unwrap();
        assert!(sink.calls.is_empty());
    }

    #[test]
    fn zero_progress_is_fatal_on_first_occurrence() {
        let mut sink = StallAfter {
            accept: 2,
            calls: 0,
        };
        let err = write_all(&mut sink, b"abcdef").unwrap_err();

        assert!(matches!(
            err,
            ChannelError::WriteStalled {
                written: 2,
                total: 6
            }
        ));
        assert_eq!(sink.calls, 2);
    }

    #[test]
    fn raw_errors_propagate_unchanged() {
        let mut sink = FailingSink;
        let err = write_all(&mut sink, b"x").unwrap_err();
        assert!(matches!(err, ChannelError::Io(e) if e.kind() == ErrorKind::BrokenPipe));
    }

    #[test]
    fn overreporting_primitive_is_rejected() {
        let mut sink = Liar;
        let err = write_all(&mut sink, b"abc").unwrap_err();
        assert!(matches!(
            err,
            ChannelError::Overrun {
                reported: 10,
                requested: 3
            }
        ));
    }

    #[test]
    fn vec_sink_receives_everything() {
        let mut sink = Vec::new();
        write_all(&mut sink, b"/local/domain/0\0").unwrap();
        assert_eq!(sink, b"/local/domain/0\0");
    }

    /// Accepts three bytes per call and records what it was offered.
    #[derive(Default)]
    struct OfferRecorder {
        offered: Vec<Vec<u8>>,
    }

    impl Write for OfferRecorder {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.offered.push(buf.to_vec());
            Ok(buf.len().min(3))
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    struct StallAfter {
        accept: usize,
        calls: usize,
    }

    impl Write for StallAfter {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.calls += 1;
            let n = buf.len().min(self.accept);
            self.accept -= n;
            Ok(n)
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    struct FailingSink;

    impl Write for FailingSink {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::from(ErrorKind::BrokenPipe))
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    struct Liar;

    impl Write for Liar {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Ok(10)
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }
}
