use super::{Command, CommandContext, CommandError};

#[derive(Clone, Default)]
pub struct HistoryCommand;

impl Command for HistoryCommand {
    fn execute(&self, ctx: &mut CommandContext<'_>, _args: &[String]) -> Result<(), CommandError> {
        ctx.history.print(ctx.out)?;
        Ok(())
    }
}

/// Reports how long the last external command (or pipeline) took.
#[derive(Clone, Default)]
pub struct PtimeCommand;

impl Command for PtimeCommand {
    fn execute(&self, ctx: &mut CommandContext<'_>, _args: &[String]) -> Result<(), CommandError> {
        writeln!(
            ctx.out,
            "Time spent executing child processes: {:.4} milliseconds",
            ctx.last_elapsed.as_secs_f64() * 1000.0
        )?;
        Ok(())
    }
}
