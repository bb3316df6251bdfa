/// A failure reported by the store, identified by its errno code.
///
/// Values are immutable once built; see [`crate::error`] for the usual
/// constructor.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message} (errno {code})")]
pub struct StoreError {
    code: i32,
    message: String,
}

impl StoreError {
    /// Create an error from an explicit code and message.
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// The numeric errno code.
    pub fn code(&self) -> i32 {
        self.code
    }

    /// The human-readable message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The canonical symbolic name, if the code is in the table.
    pub fn name(&self) -> Option<&'static str> {
        crate::table::name_for_code(self.code)
    }
}
