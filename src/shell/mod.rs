use std::env;
use std::io::{self, IsTerminal};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use log::{debug, info, warn};
use rustyline::{config::Configurer, error::ReadlineError, history::FileHistory, Editor};

use crate::{
    core::{
        config::{Config, ConfigPaths},
        Dispatcher,
    },
    error::ShellError,
    flags::Flags,
    highlight::SyntaxHighlighter,
    input::{tokenize, ShellHelper},
    process::{signal::install_interrupt_guard, ProcessExecutor},
};

/// Interactive read-dispatch loop.
pub struct Shell {
    editor: Editor<ShellHelper, FileHistory>,
    dispatcher: Dispatcher,
    highlighter: SyntaxHighlighter,
    history_file: PathBuf,
    interrupted: Arc<AtomicBool>,
}

/// What the loop does with one line of input.
#[derive(Debug, PartialEq, Eq)]
enum LineAction {
    Dispatch(Vec<String>),
    Skip,
    Exit,
}

fn classify(line: &str) -> LineAction {
    let tokens = tokenize(line);
    match tokens.first().map(String::as_str) {
        None => LineAction::Skip,
        Some("exit") => LineAction::Exit,
        Some(_) => LineAction::Dispatch(tokens),
    }
}

fn prompt() -> String {
    let cwd = env::current_dir()
        .map(|dir| dir.to_string_lossy().into_owned())
        .unwrap_or_else(|_| "?".to_string());
    format!("[{}]: ", cwd)
}

impl Shell {
    pub fn new(flags: Flags) -> Result<Self, ShellError> {
        let interrupted = install_interrupt_guard()?;

        let paths = ConfigPaths::new(flags.get_value("config"))?;
        let mut config = Config::new(paths);
        if let Err(e) = config.load() {
            // A bad rc line should not keep the shell from starting.
            warn!("{}", e);
            eprintln!("pipette: {}", e);
        }

        let highlighter = if io::stdout().is_terminal() {
            SyntaxHighlighter::new()
        } else {
            SyntaxHighlighter::without_color()
        };
        debug!("{} aliases loaded", config.aliases().len());
        let executor = ProcessExecutor::new(&flags);
        let dispatcher = Dispatcher::new(executor, config.aliases().clone());

        let helper = ShellHelper::new(
            dispatcher.builtins().names(),
            config.aliases().names(),
            highlighter,
        );
        let mut editor = Editor::<ShellHelper, FileHistory>::new()?;
        editor.set_helper(Some(helper));
        editor.set_auto_add_history(true);

        let history_file = config.paths().history_path.clone();
        if let Err(e) = editor.load_history(&history_file) {
            debug!("no line history loaded from {}: {}", history_file.display(), e);
        }

        info!("pipette {} ready", env!("CARGO_PKG_VERSION"));
        Ok(Shell {
            editor,
            dispatcher,
            highlighter,
            history_file,
            interrupted,
        })
    }

    pub fn run(&mut self) -> Result<(), ShellError> {
        let result = self.command_loop();

        if let Err(e) = self.editor.save_history(&self.history_file) {
            warn!("could not save line history to {}: {}", self.history_file.display(), e);
        }
        result
    }

    fn command_loop(&mut self) -> Result<(), ShellError> {
        loop {
            if self.interrupted.swap(false, Ordering::SeqCst) {
                // A child was interrupted; start the prompt on a fresh line.
                println!();
            }

            let line = match self.editor.readline(&prompt()) {
                Ok(line) => line,
                Err(ReadlineError::Interrupted) => continue,
                Err(ReadlineError::Eof) => {
                    debug!("end of input");
                    return Ok(());
                }
                Err(e) => return Err(e.into()),
            };

            match classify(&line) {
                LineAction::Skip => {}
                LineAction::Exit => return Ok(()),
                LineAction::Dispatch(tokens) => self.dispatch(&tokens),
            }
        }
    }

    fn dispatch(&mut self, tokens: &[String]) {
        if let Err(e) = self.dispatcher.dispatch(tokens) {
            debug!("dispatch of {:?} failed: {:?}", tokens, e);
            eprintln!(
                "{}",
                self.highlighter.highlight_error(&format!("pipette: {}", e))
            );
        }

        // `cd` may have changed which relative PATH entries resolve.
        if tokens.first().is_some_and(|t| t == "cd") {
            if let Some(helper) = self.editor.helper_mut() {
                helper.rescan_path();
            }
        }
    }
}
