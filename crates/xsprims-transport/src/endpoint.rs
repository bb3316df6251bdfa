use std::path::PathBuf;

/// xenstored control socket (dom0 tools).
pub const XENSTORED_SOCKET: &str = "/var/run/xenstored/socket";
/// xenbus character device exposed by the kernel.
pub const XENBUS_DEVICE: &str = "/dev/xen/xenbus";
/// Older kernels expose xenbus under procfs.
pub const XENBUS_PROC: &str = "/proc/xen/xenbus";

/// Environment variable naming the one endpoint to use instead of the
/// built-in search list.
pub const PATH_ENV: &str = "XENSTORED_PATH";

/// Candidate endpoints, in the order [`crate::XsHandle::open_default`] tries
/// them. When `XENSTORED_PATH` is set it is the only candidate.
pub fn default_endpoints() -> Vec<PathBuf> {
    if let Some(path) = std::env::var_os(PATH_ENV).filter(|p| !p.is_empty()) {
        return vec![PathBuf::from(path)];
    }
    builtin_endpoints()
}

/// Well-known endpoints, ignoring the environment.
#[cfg(unix)]
pub fn builtin_endpoints() -> Vec<PathBuf> {
    [XENSTORED_SOCKET, XENBUS_DEVICE, XENBUS_PROC]
        .into_iter()
        .map(PathBuf::from)
        .collect()
}

// Windows PV drivers do not publish a fixed device path; callers pass it.
#[cfg(not(unix))]
pub fn builtin_endpoints() -> Vec<PathBuf> {
    Vec::new()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[cfg(unix)]
    fn builtin_order_prefers_socket() {
        let endpoints = builtin_endpoints();
        assert_eq!(endpoints[0], PathBuf::from(XENSTORED_SOCKET));
        assert_eq!(endpoints[1], PathBuf::from(XENBUS_DEVICE));
        assert_eq!(endpoints[2], PathBuf::from(XENBUS_PROC));
    }
}
