//! Errno translation for XenStore error replies.
//!
//! The store reports failures as symbolic errno names (`"EINVAL"`,
//! `"ENOENT"`, ...). This crate turns either a name or a numeric code into a
//! [`StoreError`] carrying the code and the platform's message for it.
//!
//! ```
//! use xsprims_errno::error;
//!
//! assert_eq!(error("EINVAL"), error(libc::EINVAL));
//! ```

pub mod error;
pub mod message;
pub mod table;

pub use error::StoreError;
pub use message::strerror;
pub use table::{code_for_name, name_for_code};

/// Identifies an errno value either by number or by symbolic name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrnoId<'a> {
    /// A numeric errno code.
    Code(i32),
    /// A symbolic name such as `"EINVAL"`.
    Name(&'a str),
}

impl ErrnoId<'_> {
    /// Resolve to a numeric code. Unknown names resolve to `0`.
    pub fn code(self) -> i32 {
        match self {
            ErrnoId::Code(code) => code,
            ErrnoId::Name(name) => code_for_name(name).unwrap_or(0),
        }
    }
}

impl From<i32> for ErrnoId<'_> {
    fn from(code: i32) -> Self {
        ErrnoId::Code(code)
    }
}

impl<'a> From<&'a str> for ErrnoId<'a> {
    fn from(name: &'a str) -> Self {
        ErrnoId::Name(name)
    }
}

impl<'a> From<&'a String> for ErrnoId<'a> {
    fn from(name: &'a String) -> Self {
        ErrnoId::Name(name.as_str())
    }
}

/// Error names arrive NUL-terminated in store replies; one trailing NUL is
/// dropped. Bytes that are not UTF-8 resolve as an unknown name.
impl<'a> From<&'a [u8]> for ErrnoId<'a> {
    fn from(raw: &'a [u8]) -> Self {
        let raw = raw.strip_suffix(b"\0").unwrap_or(raw);
        ErrnoId::Name(std::str::from_utf8(raw).unwrap_or(""))
    }
}

impl<'a, const N: usize> From<&'a [u8; N]> for ErrnoId<'a> {
    fn from(raw: &'a [u8; N]) -> Self {
        ErrnoId::from(raw.as_slice())
    }
}

/// Build a [`StoreError`] for an errno code or symbolic name.
///
/// Never fails: a name missing from the table is treated as code `0`.
pub fn error<'a>(id: impl Into<ErrnoId<'a>>) -> StoreError {
    let id: ErrnoId<'a> = id.into();
    let code = id.code();
    StoreError::new(code, strerror(code))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_and_code_agree() {
        let by_name = error("EINVAL");
        let by_code = error(libc::EINVAL);

        assert_eq!(by_name, by_code);
        assert_eq!(by_name.code(), libc::EINVAL);
        assert_eq!(by_name.message(), by_code.message());
    }

    #[test]
    fn unknown_name_falls_back_to_zero() {
        let err = error("ENOTAREALERRNO");
        assert_eq!(err.code(), 0);
        assert_eq!(err.message(), strerror(0));
    }

    #[test]
    fn reply_bytes_with_terminator() {
        assert_eq!(error(b"ENOENT\0"), error("ENOENT"));
        assert_eq!(error(b"EACCES"), error(libc::EACCES));
    }

    #[test]
    fn non_utf8_reply_is_unknown() {
        let raw: &[u8] = &[0xff, 0xfe, 0x00];
        assert_eq!(error(raw).code(), 0);
    }

    #[test]
    fn owned_name_accepted() {
        let name = String::from("EEXIST");
        assert_eq!(error(&name).code(), libc::EEXIST);
    }

    #[test]
    #[cfg(target_os = "linux")]
    fn linux_messages() {
        assert_eq!(error(libc::EINVAL).message(), "Invalid argument");
        assert_eq!(error("ENOENT").message(), "No such file or directory");
    }

    #[test]
    #[cfg(target_os = "linux")]
    fn linux_specific_names_are_not_unknown() {
        for (name, code) in [
            ("ENODATA", libc::ENODATA),
            ("ETIME", libc::ETIME),
            ("EOWNERDEAD", libc::EOWNERDEAD),
        ] {
            assert_eq!(error(name).code(), code, "{name}");
        }
    }
}
