//! Short-read/short-write-safe channel I/O.
//!
//! A XenStore channel gives no guarantee that one `read` or `write` call
//! moves the whole request. [`write_all`] and [`read_exact`] loop over the
//! raw primitives until every byte is transferred, and fail instead of
//! spinning when the channel stops making progress.
//!
//! [`Channel`] wraps a handle and refuses further I/O once any transfer has
//! failed, since the stream position relative to message framing is then
//! unknown.

pub mod channel;
pub mod error;
pub mod reader;
pub mod writer;

#[cfg(feature = "async")]
pub mod async_io;

pub use channel::Channel;
pub use error::{ChannelError, Result};
pub use reader::read_exact;
pub use writer::write_all;
pub use xsprims_transport::{RawRead, RawWrite};

#[cfg(feature = "async")]
pub use async_io::{read_exact_async, write_all_async};
