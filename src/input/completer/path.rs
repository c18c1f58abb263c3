use std::fs;
use std::path::PathBuf;

use rustyline::completion::Pair;

use crate::path::PathExpander;

/// Completes file and directory names for argument positions.
#[derive(Clone, Default)]
pub struct PathCompleter {
    expander: PathExpander,
}

impl PathCompleter {
    pub fn new() -> Self {
        Self {
            expander: PathExpander::new(),
        }
    }

    /// Candidates for `word`. Each replacement is the whole word, directories
    /// end in `/` and files in a space.
    pub fn complete(&self, word: &str) -> Vec<Pair> {
        let (dir_part, file_prefix) = match word.rfind('/') {
            Some(slash) => word.split_at(slash + 1),
            None => ("", word),
        };

        let Some(search_dir) = self.search_dir(dir_part) else {
            return Vec::new();
        };
        let Ok(entries) = fs::read_dir(&search_dir) else {
            return Vec::new();
        };

        let mut matches: Vec<Pair> = entries
            .filter_map(Result::ok)
            .filter_map(|entry| {
                let name = entry.file_name().to_str()?.to_string();
                // Dotfiles only when asked for explicitly.
                if !name.starts_with(file_prefix)
                    || (name.starts_with('.') && !file_prefix.starts_with('.'))
                {
                    return None;
                }
                let suffix = if entry.path().is_dir() { "/" } else { " " };
                Some(Pair {
                    display: format!("{}{}", name, suffix.trim()),
                    replacement: format!("{}{}{}", dir_part, name, suffix),
                })
            })
            .collect();

        matches.sort_by(|a, b| a.display.cmp(&b.display));
        matches
    }

    fn search_dir(&self, dir_part: &str) -> Option<PathBuf> {
        if dir_part.is_empty() {
            return Some(PathBuf::from("."));
        }
        self.expander.expand(dir_part).ok()
    }
}
