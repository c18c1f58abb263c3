use super::{Command, CommandContext, CommandError};
use crate::path::PathExpander;
use std::env;

#[derive(Clone, Default)]
pub struct CdCommand {
    path_expander: PathExpander,
}

impl CdCommand {
    pub fn new() -> Self {
        Self {
            path_expander: PathExpander::new(),
        }
    }
}

impl Command for CdCommand {
    fn execute(&self, _ctx: &mut CommandContext<'_>, args: &[String]) -> Result<(), CommandError> {
        let target = match args {
            [] => self.path_expander.home_dir()?,
            [path] => self.path_expander.expand(path)?,
            _ => {
                return Err(CommandError::InvalidArguments(
                    "cd: too many arguments".to_string(),
                ))
            }
        };

        env::set_current_dir(&target).map_err(|e| {
            CommandError::InvalidArguments(format!("cd: {}: {}", target.display(), e))
        })
    }
}

#[derive(Clone, Default)]
pub struct PwdCommand;

impl Command for PwdCommand {
    fn execute(&self, ctx: &mut CommandContext<'_>, _args: &[String]) -> Result<(), CommandError> {
        let cwd = env::current_dir()?;
        writeln!(ctx.out, "{}", cwd.display())?;
        Ok(())
    }
}
