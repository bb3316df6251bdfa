use std::fs::OpenOptions;
use std::os::unix::fs::FileTypeExt;
use std::os::unix::net::UnixStream;
use std::path::Path;

use tracing::debug;

use crate::config::HandleConfig;
use crate::error::{Result, TransportError};
use crate::handle::XsHandle;

pub(crate) fn open(path: &Path, config: &HandleConfig) -> Result<XsHandle> {
    let metadata = std::fs::metadata(path).map_err(|e| TransportError::Open {
        path: path.to_path_buf(),
        source: e,
    })?;

    if metadata.file_type().is_socket() {
        let stream = UnixStream::connect(path).map_err(|e| TransportError::Connect {
            path: path.to_path_buf(),
            source: e,
        })?;
        stream.set_read_timeout(config.read_timeout)?;
        stream.set_write_timeout(config.write_timeout)?;
        return Ok(XsHandle::from_socket(stream));
    }

    let file = OpenOptions::new()
        .read(true)
        .write(true)
        .open(path)
        .map_err(|e| TransportError::Open {
            path: path.to_path_buf(),
            source: e,
        })?;
    if config.has_timeouts() {
        debug!(?path, "device handles do not support timeouts; ignoring");
    }
    Ok(XsHandle::from_device(file))
}
