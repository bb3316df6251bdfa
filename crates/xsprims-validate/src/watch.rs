use std::fmt;

use crate::error::{Result, ValidationError};
use crate::path::{strip_nul, validate_path, StorePath};

/// Fires when a domain is introduced to the store.
pub const INTRODUCE_DOMAIN: &str = "@introduceDomain";
/// Fires when a domain is released from the store.
pub const RELEASE_DOMAIN: &str = "@releaseDomain";

/// Check that `wpath` is a valid watch path and return it unchanged.
///
/// Values starting with `@` must be one of the special tokens (optionally
/// NUL-terminated); anything else must be a valid store path.
pub fn validate_watch_path(wpath: &str) -> Result<&str> {
    if wpath.starts_with('@') {
        return match special_token(wpath) {
            Some(_) => Ok(wpath),
            None => Err(ValidationError::InvalidPath(wpath.to_string())),
        };
    }
    validate_path(wpath)
}

fn special_token(wpath: &str) -> Option<WatchPath> {
    match strip_nul(wpath) {
        INTRODUCE_DOMAIN => Some(WatchPath::IntroduceDomain),
        RELEASE_DOMAIN => Some(WatchPath::ReleaseDomain),
        _ => None,
    }
}

/// A validated watch path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum WatchPath {
    /// `@introduceDomain`
    IntroduceDomain,
    /// `@releaseDomain`
    ReleaseDomain,
    /// An ordinary store path.
    Path(StorePath),
}

impl WatchPath {
    /// Validate and classify a watch path.
    pub fn new(wpath: &str) -> Result<Self> {
        validate_watch_path(wpath)?;
        match special_token(wpath) {
            Some(special) => Ok(special),
            None => Ok(WatchPath::Path(StorePath::new(wpath)?)),
        }
    }

    /// Whether this is one of the domain-lifecycle tokens.
    pub fn is_special(&self) -> bool {
        !matches!(self, WatchPath::Path(_))
    }

    /// Wire form, NUL-terminated.
    pub fn to_wire(&self) -> Vec<u8> {
        match self {
            WatchPath::IntroduceDomain => [INTRODUCE_DOMAIN.as_bytes(), b"\0"].concat(),
            WatchPath::ReleaseDomain => [RELEASE_DOMAIN.as_bytes(), b"\0"].concat(),
            WatchPath::Path(path) => path.to_wire(),
        }
    }
}

impl fmt::Display for WatchPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WatchPath::IntroduceDomain => f.write_str(INTRODUCE_DOMAIN),
            WatchPath::ReleaseDomain => f.write_str(RELEASE_DOMAIN),
            WatchPath::Path(path) => fmt::Display::fmt(path, f),
        }
    }
}
