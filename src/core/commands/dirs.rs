use super::{Command, CommandContext, CommandError};
use crate::path::PathExpander;

#[derive(Clone, Default)]
pub struct DirsCommand;

impl Command for DirsCommand {
    fn execute(&self, ctx: &mut CommandContext<'_>, _args: &[String]) -> Result<(), CommandError> {
        ctx.dirs.print(ctx.out)?;
        Ok(())
    }
}

#[derive(Clone, Default)]
pub struct PushdCommand {
    path_expander: PathExpander,
}

impl PushdCommand {
    pub fn new() -> Self {
        Self {
            path_expander: PathExpander::new(),
        }
    }
}

impl Command for PushdCommand {
    fn execute(&self, ctx: &mut CommandContext<'_>, args: &[String]) -> Result<(), CommandError> {
        let [path] = args else {
            return Err(CommandError::InvalidArguments(
                "usage: pushd <path>".to_string(),
            ));
        };
        let expanded = self.path_expander.expand(path)?;
        ctx.dirs.push(expanded.to_string_lossy());
        Ok(())
    }
}

#[derive(Clone, Default)]
pub struct PopdCommand;

impl Command for PopdCommand {
    fn execute(&self, ctx: &mut CommandContext<'_>, _args: &[String]) -> Result<(), CommandError> {
        let top = ctx.dirs.pop();
        writeln!(ctx.out, "{}", top)?;
        Ok(())
    }
}
