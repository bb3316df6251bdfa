/// Errors that can occur while transferring bytes over a channel.
///
/// Every variant leaves the channel at an unknown position in the byte
/// stream; the connection should be discarded.
#[derive(Debug, thiserror::Error)]
pub enum ChannelError {
    /// The raw read or write primitive failed.
    #[error("channel I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A raw write accepted zero bytes while data remained.
    #[error("channel write stalled after {written} of {total} bytes")]
    WriteStalled { written: usize, total: usize },

    /// A raw read returned zero bytes while data remained (end of stream).
    #[error("channel closed after {read} of {expected} bytes")]
    ReadStalled { read: usize, expected: usize },

    /// The primitive reported more bytes than it was offered.
    #[error("raw transfer reported {reported} bytes for a {requested}-byte request")]
    Overrun { reported: usize, requested: usize },

    /// An earlier transfer on this channel failed.
    #[error("channel unusable after an earlier failure; reconnect")]
    Poisoned,
}

pub type Result<T> = std::result::Result<T, ChannelError>;
