use std::collections::BTreeSet;
use std::env;
use std::fs;

use rustyline::completion::Pair;

/// Command names offered in command position: built-ins, aliases, and
/// executables found on `PATH`.
#[derive(Clone, Default)]
pub struct CommandCompleter {
    builtins: BTreeSet<String>,
    aliases: BTreeSet<String>,
    executables: BTreeSet<String>,
}

impl CommandCompleter {
    pub fn new<'a, 'b>(
        builtins: impl IntoIterator<Item = &'a str>,
        aliases: impl IntoIterator<Item = &'b str>,
    ) -> Self {
        let mut completer = Self {
            builtins: builtins.into_iter().map(String::from).collect(),
            aliases: aliases.into_iter().map(String::from).collect(),
            executables: BTreeSet::new(),
        };
        completer.rescan_path();
        completer
    }

    /// Re-reads every `PATH` directory. Unreadable entries are skipped.
    pub fn rescan_path(&mut self) {
        self.executables.clear();
        let Some(path_var) = env::var_os("PATH") else {
            return;
        };
        for dir in env::split_paths(&path_var) {
            let Ok(entries) = fs::read_dir(dir) else {
                continue;
            };
            for entry in entries.filter_map(Result::ok) {
                let is_candidate = entry
                    .file_type()
                    .map(|t| t.is_file() || t.is_symlink())
                    .unwrap_or(false);
                if let (true, Some(name)) = (is_candidate, entry.file_name().to_str()) {
                    self.executables.insert(name.to_string());
                }
            }
        }
    }

    pub fn is_builtin(&self, name: &str) -> bool {
        self.builtins.contains(name)
    }

    pub fn complete(&self, prefix: &str) -> Vec<Pair> {
        let matching = |set: &BTreeSet<String>| -> Vec<String> {
            set.iter()
                .filter(|name| name.starts_with(prefix))
                .cloned()
                .collect()
        };

        let commands: BTreeSet<String> = matching(&self.builtins)
            .into_iter()
            .chain(matching(&self.executables))
            .collect();

        let mut matches: Vec<Pair> = commands
            .into_iter()
            .map(|name| Pair {
                display: name.clone(),
                replacement: format!("{} ", name),
            })
            .collect();
        matches.extend(matching(&self.aliases).into_iter().map(|name| Pair {
            display: format!("{} (alias)", name),
            replacement: format!("{} ", name),
        }));
        matches
    }
}
