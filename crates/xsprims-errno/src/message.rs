/// Platform message for an errno code, as `strerror` would print it.
#[cfg(unix)]
pub fn strerror(code: i32) -> String {
    let mut buf = [0 as libc::c_char; 256];

    // SAFETY: `buf` is a writable buffer of the given length; the XSI
    // `strerror_r` always NUL-terminates on success.
    let rc = unsafe { libc::strerror_r(code, buf.as_mut_ptr(), buf.len()) };
    if rc != 0 {
        return format!("Unknown error {code}");
    }

    // SAFETY: `strerror_r` returned 0, so `buf` holds a NUL-terminated string.
    let msg = unsafe { std::ffi::CStr::from_ptr(buf.as_ptr()) };
    msg.to_string_lossy().into_owned()
}

/// Platform message for an errno code, as `strerror` would print it.
#[cfg(not(unix))]
pub fn strerror(code: i32) -> String {
    // SAFETY: the CRT `strerror` returns a pointer to a NUL-terminated string
    // that stays valid until the next call on this thread; it is copied
    // before returning.
    let ptr = unsafe { libc::strerror(code) };
    if ptr.is_null() {
        return format!("Unknown error {code}");
    }
    // SAFETY: checked non-null above.
    let msg = unsafe { std::ffi::CStr::from_ptr(ptr) };
    msg.to_string_lossy().into_owned()
}
