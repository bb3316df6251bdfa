//! Syntactic validation of XenStore paths, watch paths and permissions.
//!
//! Validation happens before a request is built, so a malformed argument
//! never reaches the wire. Checks are purely syntactic; nothing here
//! consults the store.

pub mod config;
pub mod error;
pub mod path;
pub mod perms;
pub mod watch;

pub use config::ValidationConfig;
pub use error::{Result, ValidationError};
pub use path::{validate_path, StorePath, MAX_ABSOLUTE_PATH_LEN, MAX_RELATIVE_PATH_LEN};
pub use perms::{validate_perms, validate_perms_with, Access, Permission};
pub use watch::{validate_watch_path, WatchPath, INTRODUCE_DOMAIN, RELEASE_DOMAIN};
