use std::collections::BTreeMap;
use std::io::Write;
use std::time::Duration;

mod cd;
mod dirs;
mod history;
mod replay;

pub use cd::{CdCommand, PwdCommand};
pub use dirs::{DirsCommand, PopdCommand, PushdCommand};
pub use history::{HistoryCommand, PtimeCommand};
pub use replay::{parse_replay, REPLAY};

use crate::core::dirstack::DirStack;
use crate::core::history::{HistoryError, HistoryLog};
use crate::process::{PipelineError, ProcessError};

#[derive(Debug)]
pub enum CommandError {
    InvalidArguments(String),
    History(HistoryError),
    Pipeline(PipelineError),
    Process(ProcessError),
    HomeDirNotFound,
    IoError(std::io::Error),
}

impl std::fmt::Display for CommandError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CommandError::InvalidArguments(msg) => write!(f, "invalid arguments: {}", msg),
            CommandError::History(err) => write!(f, "history: {}", err),
            CommandError::Pipeline(err) => write!(f, "pipeline: {}", err),
            CommandError::Process(err) => write!(f, "{}", err),
            CommandError::HomeDirNotFound => write!(f, "home directory not found"),
            CommandError::IoError(err) => write!(f, "IO error: {}", err),
        }
    }
}

impl std::error::Error for CommandError {}

impl From<std::io::Error> for CommandError {
    fn from(err: std::io::Error) -> Self {
        CommandError::IoError(err)
    }
}

impl From<HistoryError> for CommandError {
    fn from(err: HistoryError) -> Self {
        CommandError::History(err)
    }
}

impl From<PipelineError> for CommandError {
    fn from(err: PipelineError) -> Self {
        CommandError::Pipeline(err)
    }
}

impl From<ProcessError> for CommandError {
    fn from(err: ProcessError) -> Self {
        CommandError::Process(err)
    }
}

/// Shell state a built-in may read or change, plus the stream it prints to.
pub struct CommandContext<'a> {
    pub history: &'a HistoryLog,
    pub dirs: &'a mut DirStack,
    pub last_elapsed: Duration,
    pub out: &'a mut dyn Write,
}

pub trait Command {
    fn execute(&self, ctx: &mut CommandContext<'_>, args: &[String]) -> Result<(), CommandError>;
}

#[derive(Clone)]
enum CommandType {
    Cd(CdCommand),
    Pwd(PwdCommand),
    History(HistoryCommand),
    Ptime(PtimeCommand),
    Dirs(DirsCommand),
    Pushd(PushdCommand),
    Popd(PopdCommand),
}

impl Command for CommandType {
    fn execute(&self, ctx: &mut CommandContext<'_>, args: &[String]) -> Result<(), CommandError> {
        match self {
            CommandType::Cd(cmd) => cmd.execute(ctx, args),
            CommandType::Pwd(cmd) => cmd.execute(ctx, args),
            CommandType::History(cmd) => cmd.execute(ctx, args),
            CommandType::Ptime(cmd) => cmd.execute(ctx, args),
            CommandType::Dirs(cmd) => cmd.execute(ctx, args),
            CommandType::Pushd(cmd) => cmd.execute(ctx, args),
            CommandType::Popd(cmd) => cmd.execute(ctx, args),
        }
    }
}

/// Built-ins that run inside the shell process. History replay (`^`) is
/// handled by the dispatcher because it re-enters dispatch.
#[derive(Clone)]
pub struct BuiltinRegistry {
    commands: BTreeMap<&'static str, CommandType>,
}

impl Default for BuiltinRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl BuiltinRegistry {
    pub fn new() -> Self {
        let mut commands = BTreeMap::new();
        commands.insert("cd", CommandType::Cd(CdCommand::new()));
        commands.insert("pwd", CommandType::Pwd(PwdCommand));
        commands.insert("history", CommandType::History(HistoryCommand));
        commands.insert("ptime", CommandType::Ptime(PtimeCommand));
        commands.insert("dirs", CommandType::Dirs(DirsCommand));
        commands.insert("pushd", CommandType::Pushd(PushdCommand::new()));
        commands.insert("popd", CommandType::Popd(PopdCommand));
        Self { commands }
    }

    pub fn get(&self, name: &str) -> Option<&dyn Command> {
        self.commands.get(name).map(|cmd| cmd as &dyn Command)
    }

    /// Every built-in name, `^` and `exit` included.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.commands
            .keys()
            .copied()
            .chain([REPLAY, "exit"])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_lookup() {
        let registry = BuiltinRegistry::new();

        for name in ["cd", "pwd", "history", "ptime", "dirs", "pushd", "popd"] {
            assert!(registry.get(name).is_some(), "{} should be a built-in", name);
        }
        assert!(registry.get("ls").is_none());
        assert!(registry.get("").is_none());
        assert!(registry.get("cdx").is_none());
    }

    #[test]
    fn test_names_include_exit_and_replay() {
        let registry = BuiltinRegistry::new();
        let names: Vec<&str> = registry.names().collect();
        assert!(names.contains(&"exit"));
        assert!(names.contains(&"^"));
        assert!(names.contains(&"pushd"));
    }

    #[test]
    fn test_command_error_display() {
        let errors = vec![
            CommandError::InvalidArguments("bad args".to_string()),
            CommandError::History(HistoryError::IndexOutOfRange { index: 9, len: 1 }),
            CommandError::Pipeline(PipelineError::TooManyPipes(2)),
            CommandError::HomeDirNotFound,
            CommandError::IoError(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "io error",
            )),
        ];

        for error in errors {
            assert!(!error.to_string().is_empty());
        }
    }
}
