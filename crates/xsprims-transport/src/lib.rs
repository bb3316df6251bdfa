//! XenStore channel handles.
//!
//! Provides a unified handle over the transports a XenStore client can use:
//! - the xenstored Unix socket
//! - the xenbus character device (Linux/BSD guests)
//! - the PV bus device (Windows guests)
//!
//! Everything above this crate talks to a channel only through the
//! [`RawRead`] and [`RawWrite`] capability traits, which are implemented for
//! any `std::io::Read` / `std::io::Write` type as well as [`XsHandle`].

#[cfg(not(any(unix, windows)))]
compile_error!("xsprims-transport supports Unix and Windows targets only");

pub mod config;
pub mod endpoint;
pub mod error;
pub mod handle;
pub mod traits;

#[cfg(unix)]
mod unix;

#[cfg(windows)]
mod windows;

pub use config::HandleConfig;
pub use endpoint::{
    builtin_endpoints, default_endpoints, PATH_ENV, XENBUS_DEVICE, XENBUS_PROC, XENSTORED_SOCKET,
};
pub use error::{Result, TransportError};
pub use handle::{HandleKind, PeerCredentials, XsHandle};
pub use traits::{RawRead, RawWrite};
