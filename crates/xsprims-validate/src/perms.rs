use std::fmt;
use std::str::FromStr;

use tracing::debug;

use crate::config::ValidationConfig;
use crate::error::{Result, ValidationError};

/// Check every permission token with the default (prefix) grammar.
///
/// Each token must start with `[wrbn]` followed by at least one ASCII digit.
/// Characters after that prefix are tolerated; use
/// [`validate_perms_with`] and [`ValidationConfig::strict_perms`] to reject
/// them.
pub fn validate_perms<S: AsRef<str>>(perms: &[S]) -> Result<&[S]> {
    validate_perms_with(perms, &ValidationConfig::default())
}

/// Check every permission token under an explicit configuration.
pub fn validate_perms_with<'a, S: AsRef<str>>(
    perms: &'a [S],
    config: &ValidationConfig,
) -> Result<&'a [S]> {
    for perm in perms {
        let token = perm.as_ref();
        if !matches_token(token, config.strict_perms) {
            debug!(token, strict = config.strict_perms, "rejected permission token");
            return Err(ValidationError::InvalidPermission(token.to_string()));
        }
    }
    Ok(perms)
}

fn matches_token(token: &str, full: bool) -> bool {
    let Some((&mode, rest)) = token.as_bytes().split_first() else {
        return false;
    };
    if Access::from_byte(mode).is_none() {
        return false;
    }
    let digits = rest.iter().take_while(|b| b.is_ascii_digit()).count();
    digits > 0 && (!full || digits == rest.len())
}

/// Access granted by a permission entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Access {
    /// `w`: write only.
    Write,
    /// `r`: read only.
    Read,
    /// `b`: read and write.
    Both,
    /// `n`: no access.
    None,
}

impl Access {
    fn from_byte(b: u8) -> Option<Self> {
        match b {
            b'w' => Some(Access::Write),
            b'r' => Some(Access::Read),
            b'b' => Some(Access::Both),
            b'n' => Some(Access::None),
            _ => None,
        }
    }

    /// The mode character used on the wire.
    pub fn as_char(self) -> char {
        match self {
            Access::Write => 'w',
            Access::Read => 'r',
            Access::Both => 'b',
            Access::None => 'n',
        }
    }
}

/// One parsed permission entry: an access mode for a domain id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Permission {
    pub access: Access,
    pub domid: u32,
}

impl Permission {
    /// Create an entry.
    pub fn new(access: Access, domid: u32) -> Self {
        Self { access, domid }
    }

    /// Parse a token, requiring an exact `<mode><digits>` match.
    ///
    /// A domain id that does not fit in `u32` is rejected.
    pub fn parse(token: &str) -> Result<Self> {
        let invalid = || ValidationError::InvalidPermission(token.to_string());
        if !matches_token(token, true) {
            return Err(invalid());
        }
        let access = Access::from_byte(token.as_bytes()[0]).ok_or_else(invalid)?;
        let domid = token[1..].parse().map_err(|_| invalid())?;
        Ok(Self { access, domid })
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.access.as_char(), self.domid)
    }
}

impl FromStr for Permission {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_every_mode() {
        let perms = ["w0", "r1", "b2", "n3"];
        assert_eq!(validate_perms(&perms), Ok(&perms[..]));
    }

    #[test]
    fn accepts_owned_strings() {
        let perms = vec!["n0".to_string(), "r12345".to_string()];
        assert!(validate_perms(&perms).is_ok());
    }

    #[test]
    fn empty_list_is_valid() {
        let perms: [&str; 0] = [];
        assert!(validate_perms(&perms).is_ok());
    }

    #[test]
    fn rejects_bad_mode_with_token() {
        assert_eq!(
            validate_perms(&["x0"]),
            Err(ValidationError::InvalidPermission("x0".to_string()))
        );
    }

    #[test]
    fn reports_first_bad_token() {
        let err = validate_perms(&["r0", "w", "q1"]).unwrap_err();
        assert_eq!(err, ValidationError::InvalidPermission("w".to_string()));
    }

    #[test]
    fn rejects_missing_digits_and_empty() {
        for token in ["", "r", "W0", " r0", "rx1", "r-1"] {
            assert!(validate_perms(&[token]).is_err(), "{token:?}");
        }
    }

    #[test]
    fn prefix_match_tolerates_trailing_characters() {
        assert!(validate_perms(&["w0garbage", "r12 "]).is_ok());
    }

    #[test]
    fn strict_mode_requires_full_match() {
        let strict = ValidationConfig { strict_perms: true };
        assert!(validate_perms_with(&["w0", "b65535"], &strict).is_ok());
        assert_eq!(
            validate_perms_with(&["w0garbage"], &strict),
            Err(ValidationError::InvalidPermission("w0garbage".to_string()))
        );
    }

    #[test]
    fn digits_are_ascii_only() {
        assert!(validate_perms(&["r\u{0663}"]).is_err());
    }

    #[test]
    fn parse_and_display() {
        let perm = Permission::parse("b7").unwrap();
        assert_eq!(perm, Permission::new(Access::Both, 7));
        assert_eq!(perm.to_string(), "b7");

        let perm: Permission = "n0".parse().unwrap();
        assert_eq!(perm.access, Access::None);
        assert_eq!(perm.domid, 0);
    }

    #[test]
    fn parse_is_strict() {
        assert!(Permission::parse("w0garbage").is_err());
        assert!(Permission::parse("r99999999999").is_err());
        assert!(Permission::parse("x1").is_err());
    }
}
