use std::time::Duration;

/// Options applied when a handle is opened.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HandleConfig {
    /// Read timeout for socket handles. Device handles have no timeout
    /// support and ignore it.
    pub read_timeout: Option<Duration>,
    /// Write timeout for socket handles. Ignored for device handles.
    pub write_timeout: Option<Duration>,
}

impl HandleConfig {
    /// Whether any timeout is requested.
    pub fn has_timeouts(&self) -> bool {
        self.read_timeout.is_some() || self.write_timeout.is_some()
    }
}
