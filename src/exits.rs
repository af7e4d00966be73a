//! Exit handling: signal handlers and terminal cleanup.

/// Undo any ANSI state a colored line left behind, plus re-show the
/// cursor.
const RESET_SEQ: &[u8] = b"\x1b[0m\x1b[?25h";

const CANCELLED_MSG: &[u8] = b"\x1b[1m\x1b[91mError: Operation cancelled by user\x1b[0m\n";

/// Cleanup registered with atexit - runs on any exit.
/// Only writes escape codes when stdout is a TTY (not when piping).
extern "C" fn cleanup_on_exit() {
    unsafe {
        if libc::isatty(1) == 1 {
            libc::write(
                1,
                RESET_SEQ.as_ptr() as *const libc::c_void,
                RESET_SEQ.len(),
            );
        }
    }
}

/// SIGINT - report the cancellation on stderr, then exit 130.
/// Restricted to async-signal-safe calls.
extern "C" fn interrupt_handler(_: libc::c_int) {
    unsafe {
        libc::write(
            2,
            CANCELLED_MSG.as_ptr() as *const libc::c_void,
            CANCELLED_MSG.len(),
        );
        libc::exit(130);
    }
}

/// SIGTERM/SIGHUP - exit cleanly, atexit handles cleanup
extern "C" fn signal_handler(_: libc::c_int) {
    unsafe { libc::exit(130) }
}

/// Install signal handlers and register atexit cleanup.
/// Call this early in main().
pub fn install_handlers() {
    unsafe {
        libc::atexit(cleanup_on_exit);
        libc::signal(
            libc::SIGINT,
            interrupt_handler as *const () as libc::sighandler_t,
        );
        libc::signal(
            libc::SIGTERM,
            signal_handler as *const () as libc::sighandler_t,
        );
        libc::signal(
            libc::SIGHUP,
            signal_handler as *const () as libc::sighandler_t,
        );
    }
}
