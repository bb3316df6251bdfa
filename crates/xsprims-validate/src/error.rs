/// Errors raised by path and permission validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// A path or watch path failed the grammar, length or slash rules.
    #[error("invalid path: {0:?}")]
    InvalidPath(String),

    /// A permission token failed the `<mode><domid>` grammar.
    #[error("invalid permission: {0:?}")]
    InvalidPermission(String),
}

impl ValidationError {
    /// The rejected input.
    pub fn input(&self) -> &str {
        match self {
            ValidationError::InvalidPath(s) | ValidationError::InvalidPermission(s) => s,
        }
    }
}

pub type Result<T> = std::result::Result<T, ValidationError>;
