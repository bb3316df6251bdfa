use std::io::{Read, Write};
use std::os::windows::ffi::OsStrExt;
use std::path::Path;

use tracing::debug;
use windows_sys::Win32::Foundation::{CloseHandle, HANDLE, INVALID_HANDLE_VALUE};
use windows_sys::Win32::Storage::FileSystem::{
    CreateFileW, ReadFile, WriteFile, FILE_ATTRIBUTE_NORMAL, FILE_GENERIC_READ,
    FILE_GENERIC_WRITE, OPEN_EXISTING,
};

use crate::config::HandleConfig;
use crate::error::{Result, TransportError};
use crate::handle::XsHandle;

/// Owned Win32 handle to the PV bus device.
pub(crate) struct DeviceHandle {
    raw: HANDLE,
}

// SAFETY: the handle is exclusively owned and Win32 file handles may be used
// from any thread.
unsafe impl Send for DeviceHandle {}

impl DeviceHandle {
    fn open(path: &Path) -> std::io::Result<Self> {
        let wide: Vec<u16> = path
            .as_os_str()
            .encode_wide()
            .chain(std::iter::once(0))
            .collect();

        // SAFETY: `wide` is a NUL-terminated UTF-16 path that outlives the call;
        // null security attributes and template handle are permitted.
        let raw = unsafe {
            CreateFileW(
                wide.as_ptr(),
                FILE_GENERIC_READ | FILE_GENERIC_WRITE,
                0,
                std::ptr::null(),
                OPEN_EXISTING,
                FILE_ATTRIBUTE_NORMAL,
                std::ptr::null_mut(),
            )
        };
        if raw == INVALID_HANDLE_VALUE {
            return Err(std::io::Error::last_os_error());
        }
        Ok(Self { raw })
    }

    pub(crate) fn close(mut self) -> std::io::Result<()> {
        let raw = std::mem::replace(&mut self.raw, INVALID_HANDLE_VALUE);
        // SAFETY: `raw` is an open handle owned by `self`; it is swapped out so
        // `Drop` does not close it a second time.
        if unsafe { CloseHandle(raw) } == 0 {
            return Err(std::io::Error::last_os_error());
        }
        Ok(())
    }
}

impl Read for DeviceHandle {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        let len = u32::try_from(buf.len()).unwrap_or(u32::MAX);
        let mut read = 0u32;
        // SAFETY: `buf` is writable for `len` bytes; synchronous I/O, so no
        // OVERLAPPED structure is passed.
        let ok = unsafe {
            ReadFile(
                self.raw,
                buf.as_mut_ptr(),
                len,
                &mut read,
                std::ptr::null_mut(),
            )
        };
        if ok == 0 {
            return Err(std::io::Error::last_os_error());
        }
        Ok(read as usize)
    }
}

impl Write for DeviceHandle {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        let len = u32::try_from(buf.len()).unwrap_or(u32::MAX);
        let mut written = 0u32;
        // SAFETY: `buf` is readable for `len` bytes; synchronous I/O.
        let ok = unsafe {
            WriteFile(
                self.raw,
                buf.as_ptr(),
                len,
                &mut written,
                std::ptr::null_mut(),
            )
        };
        if ok == 0 {
            return Err(std::io::Error::last_os_error());
        }
        Ok(written as usize)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl Drop for DeviceHandle {
    fn drop(&mut self) {
        if self.raw != INVALID_HANDLE_VALUE {
            // SAFETY: the handle is open and owned by `self`.
            unsafe {
                CloseHandle(self.raw);
            }
        }
    }
}

pub(crate) fn open(path: &Path, config: &HandleConfig) -> Result<XsHandle> {
    let device = DeviceHandle::open(path).map_err(|e| TransportError::Open {
        path: path.to_path_buf(),
        source: e,
    })?;
    if config.has_timeouts() {
        debug!(?path, "device handles do not support timeouts; ignoring");
    }
    Ok(XsHandle::from_device(device))
}
