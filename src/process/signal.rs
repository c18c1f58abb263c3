use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use log::debug;
use signal_hook::consts::SIGINT;

use crate::process::ProcessError;

/// Keeps Ctrl-C from terminating the shell process.
///
/// A caught handler (rather than `SIG_IGN`) is installed so that exec resets
/// it in children, which stay interruptible. The returned flag is raised on
/// every SIGINT the shell receives.
pub fn install_interrupt_guard() -> Result<Arc<AtomicBool>, ProcessError> {
    let interrupted = Arc::new(AtomicBool::new(false));
    signal_hook::flag::register(SIGINT, Arc::clone(&interrupted))
        .map_err(|e| ProcessError::SignalError(e.to_string()))?;
    debug!("SIGINT handler installed");
    Ok(interrupted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::sync::atomic::Ordering;

    #[test]
    #[serial]
    fn test_sigint_is_caught() {
        let interrupted = install_interrupt_guard().unwrap();
        nix::sys::signal::raise(nix::sys::signal::Signal::SIGINT).unwrap();
        // Still alive, and the flag recorded the signal.
        assert!(interrupted.swap(false, Ordering::SeqCst));
    }
}
