use std::ffi::CString;
use std::fmt;
use std::os::fd::{AsRawFd, OwnedFd};

use log::debug;
use nix::errno::Errno;
use nix::sys::signal::{self, SigHandler, Signal};
use nix::sys::wait::{waitpid, WaitStatus};
use nix::unistd::{dup2, execvp, ForkResult, Pid};

use super::{exit_child, fork_child, ProcessError};
use crate::flags::Flags;

/// Exit status of a child whose program could not be found.
pub const EXIT_NOT_FOUND: i32 = 127;
/// Exit status of a child whose program was found but could not be executed.
pub const EXIT_EXEC_FAILED: i32 = 126;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitOutcome {
    Exited(i32),
    Signaled(Signal),
}

impl ExitOutcome {
    pub fn success(&self) -> bool {
        matches!(self, ExitOutcome::Exited(0))
    }
}

impl fmt::Display for ExitOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitOutcome::Exited(code) => write!(f, "exit status: {}", code),
            ExitOutcome::Signaled(sig) => write!(f, "signal: {}", sig),
        }
    }
}

/// Where a child's standard stream comes from before it execs.
#[derive(Debug)]
pub enum Redirect {
    Inherit,
    Stdin(OwnedFd),
    Stdout(OwnedFd),
}

impl Redirect {
    /// Duplicates the endpoint onto its standard stream and closes the original.
    pub fn apply(self) -> Result<(), ProcessError> {
        let (fd, target) = match self {
            Redirect::Inherit => return Ok(()),
            Redirect::Stdin(fd) => (fd, libc::STDIN_FILENO),
            Redirect::Stdout(fd) => (fd, libc::STDOUT_FILENO),
        };
        if fd.as_raw_fd() == target {
            // Already in place; dropping it would close the stream.
            std::mem::forget(fd);
            return Ok(());
        }
        dup2(fd.as_raw_fd(), target).map_err(ProcessError::Redirect)?;
        Ok(())
    }
}

#[derive(Clone, Default)]
pub struct ProcessExecutor {
    quiet_mode: bool,
}

impl ProcessExecutor {
    pub fn new(flags: &Flags) -> Self {
        ProcessExecutor {
            quiet_mode: flags.is_set("quiet"),
        }
    }

    pub fn is_quiet(&self) -> bool {
        self.quiet_mode
    }

    /// Forks and execs `argv[0]` with `argv` as its arguments.
    ///
    /// The redirect endpoint is moved into the child and closed in the
    /// parent before this returns.
    pub fn spawn(&self, argv: &[String], redirect: Redirect) -> Result<Pid, ProcessError> {
        let (program, args) = to_exec_args(argv)?;

        match fork_child()? {
            ForkResult::Child => exec_child(&program, &args, redirect),
            ForkResult::Parent { child } => {
                debug!("spawned {} as pid {} ({:?})", argv[0], child, redirect);
                drop(redirect);
                Ok(child)
            }
        }
    }

    /// Blocks until `pid` terminates. Retries when interrupted by a signal.
    pub fn wait(&self, pid: Pid) -> Result<ExitOutcome, ProcessError> {
        loop {
            match waitpid(pid, None) {
                Ok(WaitStatus::Exited(_, code)) => {
                    debug!("pid {} exited with {}", pid, code);
                    return Ok(ExitOutcome::Exited(code));
                }
                Ok(WaitStatus::Signaled(_, sig, _)) => {
                    debug!("pid {} killed by {}", pid, sig);
                    return Ok(ExitOutcome::Signaled(sig));
                }
                Ok(_) | Err(Errno::EINTR) => continue,
                Err(e) => return Err(ProcessError::Wait(e)),
            }
        }
    }

    pub fn run(&self, argv: &[String], redirect: Redirect) -> Result<ExitOutcome, ProcessError> {
        let pid = self.spawn(argv, redirect)?;
        self.wait(pid)
    }
}

fn to_exec_args(argv: &[String]) -> Result<(CString, Vec<CString>), ProcessError> {
    let args = argv
        .iter()
        .map(|arg| {
            CString::new(arg.as_bytes())
                .map_err(|_| ProcessError::InvalidArgument(arg.clone()))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let program = args
        .first()
        .cloned()
        .ok_or_else(|| ProcessError::InvalidArgument(String::new()))?;
    Ok((program, args))
}

fn exec_child(program: &CString, args: &[CString], redirect: Redirect) -> ! {
    if let Err(e) = redirect.apply() {
        eprintln!("pipette: {}", e);
        exit_child(1);
    }

    // The Rust runtime ignores SIGPIPE, and ignored signals survive exec.
    // SAFETY: restoring the default disposition installs no handler.
    let _ = unsafe { signal::signal(Signal::SIGPIPE, SigHandler::SigDfl) };

    let err = match execvp(program, args) {
        Ok(never) => match never {},
        Err(e) => e,
    };

    let name = program.to_string_lossy();
    if err == Errno::ENOENT {
        eprintln!("pipette: command not found: {}", name);
        exit_child(EXIT_NOT_FOUND);
    }
    eprintln!("pipette: {}: {}", name, err.desc());
    exit_child(EXIT_EXEC_FAILED)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn argv(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    #[serial]
    fn test_run_success() {
        let executor = ProcessExecutor::default();
        let outcome = executor.run(&argv(&["true"]), Redirect::Inherit).unwrap();
        assert_eq!(outcome, ExitOutcome::Exited(0));
        assert!(outcome.success());
    }

    #[test]
    #[serial]
    fn test_run_failure_status() {
        let executor = ProcessExecutor::default();
        let outcome = executor
            .run(&argv(&["sh", "-c", "exit 3"]), Redirect::Inherit)
            .unwrap();
        assert_eq!(outcome, ExitOutcome::Exited(3));
    }

    #[test]
    #[serial]
    fn test_not_found_exits_127() {
        let executor = ProcessExecutor::default();
        let outcome = executor
            .run(&argv(&["pipette-no-such-program"]), Redirect::Inherit)
            .unwrap();
        assert_eq!(outcome, ExitOutcome::Exited(EXIT_NOT_FOUND));
    }

    #[test]
    fn test_nul_byte_is_rejected_before_fork() {
        let executor = ProcessExecutor::default();
        let result = executor.spawn(&argv(&["echo", "a\0b"]), Redirect::Inherit);
        assert!(matches!(result, Err(ProcessError::InvalidArgument(_))));
    }

    #[test]
    fn test_empty_argv_is_rejected() {
        let executor = ProcessExecutor::default();
        assert!(executor.spawn(&[], Redirect::Inherit).is_err());
    }

    #[test]
    #[serial]
    fn test_stdout_redirect() {
        use std::io::Read;

        let executor = ProcessExecutor::default();
        let (read_end, write_end) = nix::unistd::pipe().unwrap();
        let outcome = executor
            .run(&argv(&["echo", "redirected"]), Redirect::Stdout(write_end))
            .unwrap();
        assert!(outcome.success());

        let mut output = String::new();
        std::fs::File::from(read_end)
            .read_to_string(&mut output)
            .unwrap();
        assert_eq!(output, "redirected\n");
    }

    #[test]
    fn test_outcome_display() {
        assert_eq!(ExitOutcome::Exited(2).to_string(), "exit status: 2");
        assert!(ExitOutcome::Signaled(Signal::SIGINT)
            .to_string()
            .contains("SIGINT"));
    }
}
