//! Stop request raised by SIGINT/SIGTERM.

use std::io;
use std::sync::atomic::AtomicBool;
#[cfg(all(unix, feature = "signals"))]
use std::sync::atomic::Ordering;

static STOP: AtomicBool = AtomicBool::new(false);

pub fn flag() -> &'static AtomicBool {
    &STOP
}

#[cfg(all(unix, feature = "signals"))]
extern "C" fn on_signal(_sig: libc::c_int) {
    STOP.store(true, Ordering::Relaxed);
}

/// Routes SIGINT and SIGTERM to [`flag`] instead of killing the process.
#[cfg(all(unix, feature = "signals"))]
pub fn install() -> io::Result<()> {
    let handler = on_signal as extern "C" fn(libc::c_int) as libc::sighandler_t;
    for sig in [libc::SIGINT, libc::SIGTERM] {
        if unsafe { libc::signal(sig, handler) } == libc::SIG_ERR {
            return Err(io::Error::last_os_error());
        }
    }
    Ok(())
}

#[cfg(not(all(unix, feature = "signals")))]
pub fn install() -> io::Result<()> {
    Ok(())
}
