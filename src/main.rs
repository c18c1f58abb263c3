use env_logger::Env;
use pipette::flags::Flags;
use pipette::shell::Shell;
use std::env;

fn main() -> Result<(), pipette::error::ShellError> {
    let mut flags = Flags::new();
    let args: Vec<String> = env::args().skip(1).collect();
    flags.parse(&args)?;

    if flags.is_set("help") {
        flags.print_help();
        return Ok(());
    }

    if flags.is_set("version") {
        println!("pipette {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    let default_level = if flags.is_set("debug") { "debug" } else { "warn" };
    env_logger::Builder::from_env(Env::default().default_filter_or(default_level)).init();

    let mut shell = Shell::new(flags)?;
    shell.run()
}
