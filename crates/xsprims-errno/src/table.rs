use once_cell::sync::Lazy;
use std::collections::HashMap;

macro_rules! errno_table {
    ($($name:ident),* $(,)?) => {
        &[$((stringify!($name), libc::$name)),*]
    };
}

/// Codes shared by every supported platform, including the Windows CRT.
///
/// Order matters: when two names share a code, the first one listed is the
/// canonical name returned by [`name_for_code`].
static COMMON: &[(&str, i32)] = errno_table![
    EPERM, ENOENT, ESRCH, EINTR, EIO, ENXIO, E2BIG, ENOEXEC, EBADF, ECHILD,
    EAGAIN, ENOMEM, EACCES, EFAULT, EBUSY, EEXIST, EXDEV, ENODEV, ENOTDIR,
    EISDIR, EINVAL, ENFILE, EMFILE, ENOTTY, EFBIG, ENOSPC, ESPIPE, EROFS,
    EMLINK, EPIPE, EDOM, ERANGE, EDEADLK, ENAMETOOLONG, ENOLCK, ENOSYS,
    ENOTEMPTY, EILSEQ,
];

/// Codes every unix target defines.
#[cfg(unix)]
static UNIX: &[(&str, i32)] = errno_table![
    ENOTBLK, ETXTBSY, EWOULDBLOCK, EINPROGRESS, EALREADY, ENOTSOCK,
    EDESTADDRREQ, EMSGSIZE, EPROTOTYPE, ENOPROTOOPT, EPROTONOSUPPORT,
    EOPNOTSUPP, EAFNOSUPPORT, EADDRINUSE, EADDRNOTAVAIL, ENETDOWN,
    ENETUNREACH, ENETRESET, ECONNABORTED, ECONNRESET, ENOBUFS, EISCONN,
    ENOTCONN, ETIMEDOUT, ECONNREFUSED, ELOOP, EHOSTUNREACH, EOVERFLOW,
    ECANCELED, ENOMSG, EIDRM, EPROTO, EBADMSG, ESTALE, EDQUOT,
];

#[cfg(not(unix))]
static UNIX: &[(&str, i32)] = &[];

#[cfg(target_os = "linux")]
static OS: &[(&str, i32)] = errno_table![
    ECHRNG, EL2NSYNC, EL3HLT, EL3RST, ELNRNG, EUNATCH, ENOCSI, EL2HLT, EBADE,
    EBADR, EXFULL, ENOANO, EBADRQC, EBADSLT, EDEADLOCK, EBFONT, ENOSTR,
    ENODATA, ETIME, ENOSR, ENONET, ENOPKG, EREMOTE, ENOLINK, EADV, ESRMNT,
    ECOMM, EMULTIHOP, EDOTDOT, ENOTUNIQ, EBADFD, EREMCHG, ELIBACC, ELIBBAD,
    ELIBSCN, ELIBMAX, ELIBEXEC, ERESTART, ESTRPIPE, EUSERS, ESOCKTNOSUPPORT,
    ENOTSUP, EPFNOSUPPORT, ESHUTDOWN, ETOOMANYREFS, EHOSTDOWN, EUCLEAN,
    ENOTNAM, ENAVAIL, EISNAM, EREMOTEIO, ENOMEDIUM, EMEDIUMTYPE, ENOKEY,
    EKEYEXPIRED, EKEYREVOKED, EKEYREJECTED, EOWNERDEAD, ENOTRECOVERABLE,
    ERFKILL, EHWPOISON,
];

#[cfg(target_vendor = "apple")]
static OS: &[(&str, i32)] = errno_table![
    ENOTSUP, EPFNOSUPPORT, ESOCKTNOSUPPORT, ESHUTDOWN, ETOOMANYREFS,
    EHOSTDOWN, EUSERS, EREMOTE, EPROCLIM, EBADRPC, ERPCMISMATCH,
    EPROGUNAVAIL, EPROGMISMATCH, EPROCUNAVAIL, EFTYPE, EAUTH, ENEEDAUTH,
    EPWROFF, EDEVERR, EBADEXEC, EBADARCH, ESHLIBVERS, EBADMACHO, ENOATTR,
    ENODATA, ENOLINK, ENOSR, ENOSTR, ETIME, EMULTIHOP, EOWNERDEAD,
    ENOTRECOVERABLE,
];

#[cfg(not(any(target_os = "linux", target_vendor = "apple")))]
static OS: &[(&str, i32)] = &[];

static BY_NAME: Lazy<HashMap<&'static str, i32>> = Lazy::new(|| {
    entries().copied().collect()
});

fn entries() -> impl Iterator<Item = &'static (&'static str, i32)> {
    COMMON.iter().chain(UNIX.iter()).chain(OS.iter())
}

/// Look up the numeric code for a symbolic errno name.
pub fn code_for_name(name: &str) -> Option<i32> {
    BY_NAME.get(name).copied()
}

/// Canonical symbolic name for a numeric code.
pub fn name_for_code(code: i32) -> Option<&'static str> {
    entries()
        .find(|&&(_, c)| c == code)
        .map(|&(name, _)| name)
}
