use std::path::PathBuf;

/// Errors that can occur while acquiring or driving a channel handle.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// Failed to open the device or inspect the endpoint path.
    #[error("failed to open {path}: {source}")]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Failed to connect to the xenstored socket.
    #[error("failed to connect to {path}: {source}")]
    Connect {
        path: PathBuf,
        source: std::io::Error,
    },

    /// An I/O error occurred on an open handle.
    #[error("transport I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// None of the candidate endpoints could be opened.
    #[error("no usable xenstore endpoint (tried {})", display_paths(.tried))]
    NoEndpoint { tried: Vec<PathBuf> },
}

fn display_paths(paths: &[PathBuf]) -> String {
    if paths.is_empty() {
        return "nothing".to_string();
    }
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

pub type Result<T> = std::result::Result<T, TransportError>;
