use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::HandleConfig;
use crate::endpoint::default_endpoints;
use crate::error::{Result, TransportError};

/// An open duplex connection to the store daemon.
///
/// Implements `Read + Write`, and through them the raw I/O capability
/// traits. The handle performs no buffering of its own.
pub struct XsHandle {
    inner: HandleInner,
}

enum HandleInner {
    #[cfg(unix)]
    Socket(std::os::unix::net::UnixStream),
    #[cfg(unix)]
    Device(std::fs::File),
    #[cfg(windows)]
    Device(crate::windows::DeviceHandle),
}

/// What kind of endpoint a handle is connected to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandleKind {
    /// The xenstored Unix socket.
    Socket,
    /// A xenbus-style character device.
    Device,
}

impl HandleKind {
    /// Short name for diagnostics.
    pub fn as_str(self) -> &'static str {
        match self {
            HandleKind::Socket => "socket",
            HandleKind::Device => "device",
        }
    }
}

/// Credentials of the process on the other end of a socket handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeerCredentials {
    pub uid: u32,
    pub gid: u32,
    pub pid: u32,
}

impl Read for XsHandle {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        match &mut self.inner {
            #[cfg(unix)]
            HandleInner::Socket(stream) => stream.read(buf),
            #[cfg(unix)]
            HandleInner::Device(file) => file.read(buf),
            #[cfg(windows)]
            HandleInner::Device(device) => device.read(buf),
        }
    }
}

impl Write for XsHandle {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        match &mut self.inner {
            #[cfg(unix)]
            HandleInner::Socket(stream) => stream.write(buf),
            #[cfg(unix)]
            HandleInner::Device(file) => file.write(buf),
            #[cfg(windows)]
            HandleInner::Device(device) => device.write(buf),
        }
    }

    fn flush(&mut self) -> std::io::Result<()> {
        match &mut self.inner {
            #[cfg(unix)]
            HandleInner::Socket(stream) => stream.flush(),
            #[cfg(unix)]
            HandleInner::Device(file) => file.flush(),
            #[cfg(windows)]
            HandleInner::Device(device) => device.flush(),
        }
    }
}

impl XsHandle {
    #[cfg(unix)]
    pub(crate) fn from_socket(stream: std::os::unix::net::UnixStream) -> Self {
        Self {
            inner: HandleInner::Socket(stream),
        }
    }

    #[cfg(unix)]
    pub(crate) fn from_device(file: std::fs::File) -> Self {
        Self {
            inner: HandleInner::Device(file),
        }
    }

    #[cfg(windows)]
    pub(crate) fn from_device(device: crate::windows::DeviceHandle) -> Self {
        Self {
            inner: HandleInner::Device(device),
        }
    }

    /// Open the endpoint at `path` with default options.
    ///
    /// On Unix a socket path is connected as a stream socket and anything
    /// else is opened read/write as a device.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::open_with_config(path, &HandleConfig::default())
    }

    /// Open the endpoint at `path` with explicit options.
    pub fn open_with_config(path: impl AsRef<Path>, config: &HandleConfig) -> Result<Self> {
        let path = path.as_ref();

        #[cfg(unix)]
        let handle = crate::unix::open(path, config)?;
        #[cfg(windows)]
        let handle = crate::windows::open(path, config)?;

        debug!(?path, kind = handle.kind().as_str(), "opened xenstore handle");
        Ok(handle)
    }

    /// Open the first usable endpoint from [`default_endpoints`].
    pub fn open_default() -> Result<Self> {
        Self::open_first(&default_endpoints(), &HandleConfig::default())
    }

    /// Open the first candidate that succeeds, in order.
    pub fn open_first(candidates: &[PathBuf], config: &HandleConfig) -> Result<Self> {
        for path in candidates {
            match Self::open_with_config(path, config) {
                Ok(handle) => return Ok(handle),
                Err(err) => debug!(?path, %err, "endpoint unavailable"),
            }
        }
        Err(TransportError::NoEndpoint {
            tried: candidates.to_vec(),
        })
    }

    /// The kind of endpoint this handle is connected to.
    pub fn kind(&self) -> HandleKind {
        match &self.inner {
            #[cfg(unix)]
            HandleInner::Socket(_) => HandleKind::Socket,
            #[cfg(unix)]
            HandleInner::Device(_) => HandleKind::Device,
            #[cfg(windows)]
            HandleInner::Device(_) => HandleKind::Device,
        }
    }

    /// Close the handle, reporting errors that dropping would discard.
    pub fn close(self) -> Result<()> {
        match self.inner {
            #[cfg(unix)]
            HandleInner::Socket(stream) => {
                match stream.shutdown(std::net::Shutdown::Both) {
                    Ok(()) => {}
                    Err(err) if err.kind() == std::io::ErrorKind::NotConnected => {}
                    Err(err) => return Err(err.into()),
                }
                debug!("closed xenstore socket");
            }
            #[cfg(unix)]
            HandleInner::Device(file) => {
                drop(file);
                debug!("closed xenstore device");
            }
            #[cfg(windows)]
            HandleInner::Device(device) => {
                device.close()?;
                debug!("closed xenstore device");
            }
        }
        Ok(())
    }

    /// Credentials of the daemon behind a socket handle (Linux only).
    ///
    /// Returns `None` for device handles or when `SO_PEERCRED` is unavailable.
    #[cfg(target_os = "linux")]
    pub fn peer_credentials(&self) -> Option<PeerCredentials> {
        use std::os::fd::AsRawFd;

        let fd = match &self.inner {
            HandleInner::Socket(stream) => stream.as_raw_fd(),
            HandleInner::Device(_) => return None,
        };

        let mut cred = libc::ucred {
            pid: 0,
            uid: 0,
            gid: 0,
        };
        let mut len = std::mem::size_of::<libc::ucred>() as libc::socklen_t;

        // SAFETY: `cred` and `len` are valid writable pointers for the given
        // sizes, and `fd` is an open socket owned by this handle.
        let rc = unsafe {
            libc::getsockopt(
                fd,
                libc::SOL_SOCKET,
                libc::SO_PEERCRED,
                (&mut cred as *mut libc::ucred).cast::<libc::c_void>(),
                &mut len,
            )
        };

        (rc == 0 && len as usize == std::mem::size_of::<libc::ucred>()).then_some(
            PeerCredentials {
                uid: cred.uid,
                gid: cred.gid,
                pid: cred.pid as u32,
            },
        )
    }

    /// Credentials of the daemon behind a socket handle.
    ///
    /// Always `None` on this platform.
    #[cfg(not(target_os = "linux"))]
    pub fn peer_credentials(&self) -> Option<PeerCredentials> {
        None
    }
}

impl std::fmt::Debug for XsHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("XsHandle")
            .field("kind", &self.kind().as_str())
            .finish()
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::os::unix::net::UnixListener;

    fn temp_dir(tag: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("xsprims-{tag}-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn socket_path_opens_as_socket() {
        let dir = temp_dir("handle-socket");
        let sock_path = dir.join("xenstored.sock");
        let listener = UnixListener::bind(&sock_path).unwrap();

        let server = std::thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut buf = [0u8; 4];
            stream.read_exact(&mut buf).unwrap();
            stream.write_all(&buf).unwrap();
        });

        let mut handle = XsHandle::open(&sock_path).unwrap();
        assert_eq!(handle.kind(), HandleKind::Socket);
        handle.write_all(b"ping").unwrap();
        let mut buf = [0u8; 4];
        handle.read_exact(&mut buf).unwrap();
        assert_eq!(&buf, b"ping");

        server.join().unwrap();
        handle.close().unwrap();
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    #[cfg(target_os = "linux")]
    fn socket_peer_is_this_process() {
        let dir = temp_dir("handle-peercred");
        let sock_path = dir.join("xenstored.sock");
        let listener = UnixListener::bind(&sock_path).unwrap();

        let handle = XsHandle::open(&sock_path).unwrap();
        let _accepted = listener.accept().unwrap();

        let creds = handle.peer_credentials().expect("socket should report peer");
        assert_eq!(creds.pid, std::process::id());
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn regular_file_opens_as_device() {
        let dir = temp_dir("handle-device");
        let dev_path = dir.join("xenbus");
        std::fs::write(&dev_path, b"").unwrap();

        let mut handle = XsHandle::open(&dev_path).unwrap();
        assert_eq!(handle.kind(), HandleKind::Device);
        assert!(handle.peer_credentials().is_none());
        handle.write_all(b"request").unwrap();
        handle.close().unwrap();

        assert_eq!(std::fs::read(&dev_path).unwrap(), b"request");
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn device_ignores_timeouts() {
        let dir = temp_dir("handle-device-timeout");
        let dev_path = dir.join("xenbus");
        std::fs::write(&dev_path, b"").unwrap();

        let config = HandleConfig {
            read_timeout: Some(std::time::Duration::from_millis(50)),
            write_timeout: None,
        };
        let handle = XsHandle::open_with_config(&dev_path, &config).unwrap();
        assert_eq!(handle.kind(), HandleKind::Device);
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn missing_path_is_open_error() {
        let err = XsHandle::open("/nonexistent/xsprims/xenbus").unwrap_err();
        assert!(matches!(err, TransportError::Open { .. }));
    }

    #[test]
    fn open_first_skips_unusable_candidates() {
        let dir = temp_dir("handle-first");
        let dev_path = dir.join("xenbus");
        std::fs::write(&dev_path, b"").unwrap();

        let candidates = vec![dir.join("missing.sock"), dev_path.clone()];
        let handle = XsHandle::open_first(&candidates, &HandleConfig::default()).unwrap();
        assert_eq!(handle.kind(), HandleKind::Device);
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn open_first_reports_every_candidate() {
        let candidates = vec![
            PathBuf::from("/nonexistent/xsprims/a"),
            PathBuf::from("/nonexistent/xsprims/b"),
        ];
        let err = XsHandle::open_first(&candidates, &HandleConfig::default()).unwrap_err();
        match err {
            TransportError::NoEndpoint { tried } => assert_eq!(tried, candidates),
            other => panic!("unexpected error: {other}"),
        }
    }
}
