use std::borrow::Cow;

use rustyline::{
    completion::{Completer, Pair},
    highlight::{CmdKind, Highlighter},
    hint::Hinter,
    validate::Validator,
    Context, Helper,
};

use super::{command::CommandCompleter, path::PathCompleter};
use crate::highlight::SyntaxHighlighter;
use crate::input::tokenizer::PIPE;

/// Line-editor helper: completion, highlighting, and nothing else.
#[derive(Clone)]
pub struct ShellHelper {
    commands: CommandCompleter,
    paths: PathCompleter,
    highlighter: SyntaxHighlighter,
}

impl ShellHelper {
    pub fn new<'a, 'b>(
        builtins: impl IntoIterator<Item = &'a str>,
        aliases: impl IntoIterator<Item = &'b str>,
        highlighter: SyntaxHighlighter,
    ) -> Self {
        ShellHelper {
            commands: CommandCompleter::new(builtins, aliases),
            paths: PathCompleter::new(),
            highlighter,
        }
    }

    pub fn rescan_path(&mut self) {
        self.commands.rescan_path();
    }
}

/// Start of the word under the cursor and whether it is in command position,
/// i.e. first on the line or right after `|`.
fn current_word(before_cursor: &str) -> (usize, bool) {
    let start = before_cursor.rfind(' ').map_or(0, |i| i + 1);
    let previous = before_cursor[..start].split(' ').rfind(|w| !w.is_empty());
    (start, matches!(previous, None | Some(PIPE)))
}

impl Helper for ShellHelper {}

impl Completer for ShellHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let before_cursor = &line[..pos];
        let (start, command_position) = current_word(before_cursor);
        let word = &before_cursor[start..];

        let matches = if command_position {
            self.commands.complete(word)
        } else {
            self.paths.complete(word)
        };
        Ok((start, matches))
    }
}

impl Highlighter for ShellHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        Cow::Owned(
            self.highlighter
                .highlight_line(line, |word| self.commands.is_builtin(word)),
        )
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _kind: CmdKind) -> bool {
        true
    }

    fn highlight_hint<'h>(&self, hint: &'h str) -> Cow<'h, str> {
        Cow::Owned(self.highlighter.highlight_hint(hint))
    }
}

impl Hinter for ShellHelper {
    type Hint = String;
}

impl Validator for ShellHelper {}
