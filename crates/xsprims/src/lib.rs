//! Reliable channel I/O and request validation for XenStore clients.
//!
//! xsprims is the support layer under a XenStore client: it moves bytes over
//! the xenbus device or xenstored socket without losing any to short reads
//! or writes, and rejects malformed paths and permissions before they reach
//! the wire.
//!
//! # Crate Structure
//!
//! - [`transport`]: Channel handles and the raw I/O capability traits
//! - [`io`]: Exact-length `write_all` / `read_exact` and the [`io::Channel`] wrapper
//! - [`validate`]: Path, watch-path and permission validation
//! - [`errno`]: Errno code/name translation for store error replies
//! - [`merge`]: Last-writer-wins merge of key/value mappings

pub mod merge;

pub use merge::merge;

/// Re-export transport types.
pub mod transport {
    pub use xsprims_transport::*;
}

/// Re-export channel I/O types.
pub mod io {
    pub use xsprims_io::*;
}

/// Re-export validation types.
pub mod validate {
    pub use xsprims_validate::*;
}

/// Re-export errno translation.
pub mod errno {
    pub use xsprims_errno::*;
}
