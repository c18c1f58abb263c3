use std::fs::File;
use std::io::{self, Write};
use std::os::fd::OwnedFd;
use std::time::{Duration, Instant};

use log::{debug, warn};
use nix::unistd::ForkResult;

use super::commands::{parse_replay, BuiltinRegistry, CommandContext, CommandError};
use super::config::AliasManager;
use super::dirstack::DirStack;
use super::history::HistoryLog;
use crate::process::{
    exit_child, fork_child, CommandLine, ExitOutcome, PipelineDescriptor, PipelineError,
    ProcessExecutor, Redirect, Side, EXIT_NOT_FOUND,
};

/// Guards against `^n` entries that replay themselves.
const MAX_REPLAY_DEPTH: usize = 16;

/// Interprets one token sequence per call: logs it, then runs it as a
/// built-in, an external program, or a two-stage pipeline.
pub struct Dispatcher {
    history: HistoryLog,
    dirs: DirStack,
    builtins: BuiltinRegistry,
    aliases: AliasManager,
    executor: ProcessExecutor,
    last_elapsed: Duration,
    last_status: Option<ExitOutcome>,
    replay_depth: usize,
    out: Box<dyn Write>,
}

impl Dispatcher {
    pub fn new(executor: ProcessExecutor, aliases: AliasManager) -> Self {
        Self {
            history: HistoryLog::new(),
            dirs: DirStack::new(),
            builtins: BuiltinRegistry::new(),
            aliases,
            executor,
            last_elapsed: Duration::ZERO,
            last_status: None,
            replay_depth: 0,
            out: Box::new(io::stdout()),
        }
    }

    /// Sends built-in output somewhere other than stdout.
    pub fn with_output(mut self, out: Box<dyn Write>) -> Self {
        self.out = out;
        self
    }

    pub fn history(&self) -> &HistoryLog {
        &self.history
    }

    pub fn dirs(&self) -> &DirStack {
        &self.dirs
    }

    pub fn builtins(&self) -> &BuiltinRegistry {
        &self.builtins
    }

    pub fn last_elapsed(&self) -> Duration {
        self.last_elapsed
    }

    pub fn last_status(&self) -> Option<ExitOutcome> {
        self.last_status
    }

    pub fn dispatch(&mut self, tokens: &[String]) -> Result<(), CommandError> {
        if tokens.is_empty() {
            return Ok(());
        }
        self.history.add(tokens);

        match CommandLine::parse(tokens)? {
            CommandLine::Single(argv) => self.dispatch_single(argv),
            CommandLine::Piped { left, right } => self.dispatch_pipeline(left, right),
        }
    }

    fn dispatch_single(&mut self, argv: Vec<String>) -> Result<(), CommandError> {
        let argv = self.aliases.expand(argv);
        if argv.is_empty() {
            return Ok(());
        }

        if let Some(index) = parse_replay(&argv) {
            return self.replay(index?);
        }
        if self.builtins.get(&argv[0]).is_some() {
            return self.execute_builtin(&argv, None);
        }
        self.run_external(&argv)
    }

    fn replay(&mut self, index: usize) -> Result<(), CommandError> {
        if self.replay_depth >= MAX_REPLAY_DEPTH {
            return Err(CommandError::InvalidArguments(format!(
                "^: replay nested deeper than {} levels",
                MAX_REPLAY_DEPTH
            )));
        }
        let entry = self.history.get(index)?.to_vec();
        debug!("replaying history entry {}: {:?}", index, entry);

        self.replay_depth += 1;
        let result = self.dispatch(&entry);
        self.replay_depth -= 1;
        result
    }

    /// Runs a built-in against `sink`, or against the dispatcher's own output
    /// when no sink is given.
    fn execute_builtin(
        &mut self,
        argv: &[String],
        sink: Option<&mut dyn Write>,
    ) -> Result<(), CommandError> {
        let Some(command) = self.builtins.get(&argv[0]) else {
            return Err(CommandError::InvalidArguments(format!(
                "{}: not a built-in",
                argv[0]
            )));
        };
        let out: &mut dyn Write = match sink {
            Some(sink) => sink,
            None => &mut *self.out,
        };

        let mut ctx = CommandContext {
            history: &self.history,
            dirs: &mut self.dirs,
            last_elapsed: self.last_elapsed,
            out,
        };
        let result = command.execute(&mut ctx, &argv[1..]);
        ctx.out.flush()?;
        result
    }

    fn run_external(&mut self, argv: &[String]) -> Result<(), CommandError> {
        self.out.flush()?;
        let started = Instant::now();
        let outcome = self.executor.run(argv, Redirect::Inherit)?;
        self.last_elapsed = started.elapsed();
        self.record_outcome(&argv[0], outcome);
        Ok(())
    }

    fn record_outcome(&mut self, program: &str, outcome: ExitOutcome) {
        self.last_status = Some(outcome);
        match outcome {
            ok if ok.success() => {}
            // The child already reported it.
            ExitOutcome::Exited(EXIT_NOT_FOUND) => debug!("{} not found", program),
            other => {
                if !self.executor.is_quiet() {
                    eprintln!("Process exited with status: {}", other);
                }
            }
        }
    }

    fn dispatch_pipeline(
        &mut self,
        left: Vec<String>,
        right: Vec<String>,
    ) -> Result<(), CommandError> {
        let (left, right) = (self.aliases.expand(left), self.aliases.expand(right));
        // An alias may expand to nothing.
        if left.is_empty() {
            return Err(PipelineError::MissingCommand(Side::Left).into());
        }
        if right.is_empty() {
            return Err(PipelineError::MissingCommand(Side::Right).into());
        }
        if parse_replay(&left).is_some() || parse_replay(&right).is_some() {
            return Err(CommandError::InvalidArguments(
                "^: history replay cannot be part of a pipeline".to_string(),
            ));
        }

        self.out.flush()?;
        let started = Instant::now();
        let descriptor = PipelineDescriptor::open(left, right)?;
        let (left, right, read_end, write_end) = descriptor.into_parts();

        let consumer = match fork_child() {
            Ok(ForkResult::Child) => {
                drop(write_end);
                let status = self.run_consumer(right, read_end);
                exit_child(status)
            }
            Ok(ForkResult::Parent { child }) => child,
            Err(e) => return Err(e.into()),
        };
        debug!("consumer {:?} running as pid {}", right, consumer);
        drop(read_end);

        let produced = self.run_producer(&left, write_end);
        let consumed = self.executor.wait(consumer);
        self.last_elapsed = started.elapsed();

        if let Ok(outcome) = &consumed {
            self.last_status = Some(*outcome);
        }
        produced?;
        consumed?;
        Ok(())
    }

    /// Consumer side, inside the forked child. Returns the child's exit code.
    fn run_consumer(&mut self, right: Vec<String>, read_end: OwnedFd) -> i32 {
        self.last_status = None;
        let result = Redirect::Stdin(read_end)
            .apply()
            .map_err(CommandError::from)
            .and_then(|()| {
                if self.builtins.get(&right[0]).is_some() {
                    self.execute_builtin(&right, None)
                } else {
                    self.run_external(&right)
                }
            });
        let _ = self.out.flush();

        match (result, self.last_status) {
            (Err(e), _) => {
                eprintln!("pipette: {}", e);
                1
            }
            (Ok(()), Some(ExitOutcome::Exited(code))) => code,
            (Ok(()), _) => 0,
        }
    }

    /// Producer side, in the shell process. `write_end` is closed before
    /// this returns so the consumer sees end-of-file.
    fn run_producer(&mut self, left: &[String], write_end: OwnedFd) -> Result<(), CommandError> {
        if self.builtins.get(&left[0]).is_some() {
            let mut sink = File::from(write_end);
            return match self.execute_builtin(left, Some(&mut sink)) {
                Err(CommandError::IoError(e)) if e.kind() == io::ErrorKind::BrokenPipe => {
                    warn!("{}: consumer closed the pipe early", left[0]);
                    Ok(())
                }
                other => other,
            };
        }

        let producer = self.executor.spawn(left, Redirect::Stdout(write_end))?;
        let outcome = self.executor.wait(producer)?;
        self.record_outcome(&left[0], outcome);
        Ok(())
    }
}
