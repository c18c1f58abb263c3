use std::fmt;
use std::io::{self, Write};

use nix::unistd::{fork, ForkResult};

pub mod executor;
pub mod pipeline;
pub mod signal;

pub use executor::{ExitOutcome, ProcessExecutor, Redirect, EXIT_EXEC_FAILED, EXIT_NOT_FOUND};
pub use pipeline::{CommandLine, PipelineDescriptor, PipelineError, Side};

#[derive(Debug)]
pub enum ProcessError {
    Pipe(nix::Error),
    Fork(nix::Error),
    Redirect(nix::Error),
    Wait(nix::Error),
    InvalidArgument(String),
    SignalError(String),
}

impl fmt::Display for ProcessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProcessError::Pipe(e) => write!(f, "cannot create pipe: {}", e),
            ProcessError::Fork(e) => write!(f, "cannot fork: {}", e),
            ProcessError::Redirect(e) => write!(f, "cannot redirect stdio: {}", e),
            ProcessError::Wait(e) => write!(f, "cannot wait for child: {}", e),
            ProcessError::InvalidArgument(arg) => {
                write!(f, "argument contains a NUL byte: {:?}", arg)
            }
            ProcessError::SignalError(msg) => write!(f, "Signal error: {}", msg),
        }
    }
}

impl std::error::Error for ProcessError {}

/// Forks the current process.
///
/// Stdout is flushed first so buffered output is not written twice. Callers
/// must end the child branch with `_exit` or an exec.
pub(crate) fn fork_child() -> Result<ForkResult, ProcessError> {
    let _ = io::stdout().flush();
    // SAFETY: the child only redirects descriptors, execs, or runs the
    // single-threaded dispatcher before calling `_exit`.
    unsafe { fork() }.map_err(ProcessError::Fork)
}

/// Ends a forked child without unwinding back into the shell loop.
pub(crate) fn exit_child(code: i32) -> ! {
    // SAFETY: `_exit` skips atexit handlers and stdio flushing, which belong
    // to the parent; callers flush their own writers first.
    unsafe { libc::_exit(code) }
}
