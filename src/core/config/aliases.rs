use std::collections::HashMap;

use crate::input::tokenize;

/// Aliases map a command name to a replacement token sequence.
#[derive(Clone, Debug, Default)]
pub struct AliasManager {
    aliases: HashMap<Box<str>, Vec<String>>,
}

impl AliasManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, name: &str, command: &str) {
        self.aliases.insert(name.into(), tokenize(command));
    }

    pub fn get(&self, name: &str) -> Option<&[String]> {
        self.aliases.get(name).map(Vec::as_slice)
    }

    /// Replaces the first token when it names an alias. Expansion is not
    /// recursive.
    pub fn expand(&self, argv: Vec<String>) -> Vec<String> {
        let Some(replacement) = argv.first().and_then(|first| self.get(first)) else {
            return argv;
        };
        replacement
            .iter()
            .cloned()
            .chain(argv.into_iter().skip(1))
            .collect()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.aliases.keys().map(|name| &**name)
    }

    pub fn len(&self) -> usize {
        self.aliases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.aliases.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(line: &str) -> Vec<String> {
        tokenize(line)
    }

    #[test]
    fn test_add_and_get_alias() {
        let mut manager = AliasManager::new();
        manager.add("ll", "ls -la");
        assert_eq!(manager.get("ll").unwrap(), argv("ls -la").as_slice());
        assert!(manager.get("gs").is_none());
    }

    #[test]
    fn test_expand_keeps_arguments() {
        let mut manager = AliasManager::new();
        manager.add("ll", "ls -la");
        assert_eq!(manager.expand(argv("ll /home")), argv("ls -la /home"));
    }

    #[test]
    fn test_no_expansion_needed() {
        let manager = AliasManager::new();
        assert_eq!(manager.expand(argv("ls -l")), argv("ls -l"));
    }

    #[test]
    fn test_only_first_token_expands() {
        let mut manager = AliasManager::new();
        manager.add("ll", "ls -la");
        assert_eq!(manager.expand(argv("echo ll")), argv("echo ll"));
    }

    #[test]
    fn test_not_recursive() {
        let mut manager = AliasManager::new();
        manager.add("ls", "ls --color");
        assert_eq!(manager.expand(argv("ls")), argv("ls --color"));
    }
}
