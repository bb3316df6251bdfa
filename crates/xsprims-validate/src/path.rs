use std::fmt;
use std::str::FromStr;

use crate::error::{Result, ValidationError};

/// Longest accepted absolute path, in bytes (including any NUL terminator).
pub const MAX_ABSOLUTE_PATH_LEN: usize = 3072;
/// Longest accepted relative path, in bytes (including any NUL terminator).
pub const MAX_RELATIVE_PATH_LEN: usize = 2048;

/// Check that `path` is a well-formed store path and return it unchanged.
///
/// A path is one or more of `[a-zA-Z0-9-/_@]`, optionally followed by a
/// single NUL. Absolute paths may be up to 3072 bytes, relative paths up to
/// 2048. Apart from the root `/`, a path may not end with `/`, and it may
/// never contain `//`.
pub fn validate_path(path: &str) -> Result<&str> {
    if is_valid_path(path) {
        Ok(path)
    } else {
        Err(ValidationError::InvalidPath(path.to_string()))
    }
}

fn is_valid_path(path: &str) -> bool {
    let max_len = if path.starts_with('/') {
        MAX_ABSOLUTE_PATH_LEN
    } else {
        MAX_RELATIVE_PATH_LEN
    };
    if path.len() > max_len {
        return false;
    }

    let body = strip_nul(path);
    if body.is_empty() || !body.bytes().all(is_path_byte) {
        return false;
    }
    if body.len() > 1 && body.ends_with('/') {
        return false;
    }
    !body.contains("//")
}

fn is_path_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || matches!(b, b'-' | b'/' | b'_' | b'@')
}

pub(crate) fn strip_nul(s: &str) -> &str {
    s.strip_suffix('\0').unwrap_or(s)
}

/// A store path that has passed [`validate_path`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StorePath(String);

impl StorePath {
    /// Validate and wrap a path.
    pub fn new(path: impl Into<String>) -> Result<Self> {
        let path = path.into();
        validate_path(&path)?;
        Ok(Self(path))
    }

    /// The path as given, including any NUL terminator.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the path starts at the store root.
    pub fn is_absolute(&self) -> bool {
        self.0.starts_with('/')
    }

    /// Whether this is the root path `/`.
    pub fn is_root(&self) -> bool {
        strip_nul(&self.0) == "/"
    }

    /// Path segments in order. The root has none.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        strip_nul(&self.0).split('/').filter(|s| !s.is_empty())
    }

    /// Wire form: the path bytes followed by exactly one NUL.
    pub fn to_wire(&self) -> Vec<u8> {
        let body = strip_nul(&self.0);
        let mut out = Vec::with_capacity(body.len() + 1);
        out.extend_from_slice(body.as_bytes());
        out.push(0);
        out
    }

    /// Unwrap into the underlying string.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for StorePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(strip_nul(&self.0))
    }
}

impl AsRef<str> for StorePath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for StorePath {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

impl TryFrom<String> for StorePath {
    type Error = ValidationError;

    fn try_from(s: String) -> Result<Self> {
        Self::new(s)
    }
}

impl TryFrom<&str> for StorePath {
    type Error = ValidationError;

    fn try_from(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rejected(path: &str) -> bool {
        matches!(validate_path(path), Err(ValidationError::InvalidPath(p)) if p == path)
    }

    #[test]
    fn accepts_well_formed_paths() {
        for path in [
            "/",
            "/a/b",
            "/local/domain/0/name",
            "device/vif/0/state",
            "/local/domain/7/data/some_key-2",
            "@introduceDomain",
            "/local/domain/0\0",
            "/\0",
        ] {
            assert_eq!(validate_path(path), Ok(path), "{path:?}");
        }
    }

    #[test]
    fn rejects_trailing_slash() {
        assert!(rejected("/a/b/"));
        assert!(rejected("a/"));
        assert!(rejected("/a/\0"));
    }

    #[test]
    fn rejects_double_slash() {
        assert!(rejected("/a//b"));
        assert!(rejected("//"));
        assert!(rejected("//a"));
    }

    #[test]
    fn rejects_empty_and_bare_nul() {
        assert!(rejected(""));
        assert!(rejected("\0"));
    }

    #[test]
    fn rejects_characters_outside_the_grammar() {
        for path in [
            "/a b", "/a.b", "/a\n", "/a\0\0", "/a\0b", "/ä", "/a:b", "/a\\b", "/a*",
        ] {
            assert!(rejected(path), "{path:?}");
        }
    }

    #[test]
    fn relative_and_absolute_length_bounds() {
        let relative = "a".repeat(MAX_RELATIVE_PATH_LEN + 1);
        assert!(rejected(&relative));

        let absolute = format!("/{}", "a".repeat(MAX_RELATIVE_PATH_LEN));
        assert_eq!(absolute.len(), MAX_RELATIVE_PATH_LEN + 1);
        assert!(validate_path(&absolute).is_ok());

        let at_limit = "a".repeat(MAX_RELATIVE_PATH_LEN);
        assert!(validate_path(&at_limit).is_ok());

        let absolute_max = format!("/{}", "a".repeat(MAX_ABSOLUTE_PATH_LEN - 1));
        assert!(validate_path(&absolute_max).is_ok());
        let absolute_over = format!("/{}", "a".repeat(MAX_ABSOLUTE_PATH_LEN));
        assert!(rejected(&absolute_over));
    }

    #[test]
    fn nul_counts_toward_length() {
        let path = format!("{}\0", "a".repeat(MAX_RELATIVE_PATH_LEN));
        assert!(rejected(&path));
    }

    #[test]
    fn store_path_accessors() {
        let path = StorePath::new("/local/domain/3\0").unwrap();
        assert!(path.is_absolute());
        assert!(!path.is_root());
        assert_eq!(path.segments().collect::<Vec<_>>(), ["local", "domain", "3"]);
        assert_eq!(path.to_wire(), b"/local/domain/3\0");
        assert_eq!(path.to_string(), "/local/domain/3");

        let root: StorePath = "/".parse().unwrap();
        assert!(root.is_root());
        assert_eq!(root.segments().count(), 0);
        assert_eq!(root.to_wire(), b"/\0");

        let relative = StorePath::try_from("device/vbd").unwrap();
        assert!(!relative.is_absolute());
        assert_eq!(relative.into_string(), "device/vbd");
    }

    #[test]
    fn store_path_rejects_invalid() {
        let err = StorePath::new(String::from("/bad/")).unwrap_err();
        assert_eq!(err, ValidationError::InvalidPath("/bad/".to_string()));
        assert_eq!(err.input(), "/bad/");
    }
}
