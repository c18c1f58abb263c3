/// Splits a command line into argument tokens on single spaces.
///
/// There is no quoting or escaping. Runs of spaces would produce empty
/// tokens; those are dropped, so `"ls  -l"` yields `["ls", "-l"]`.
pub fn tokenize(line: &str) -> Vec<String> {
    line.trim_end_matches(['\n', '\r'])
        .split(' ')
        .filter(|token| !token.is_empty())
        .map(str::to_owned)
        .collect()
}

/// Positions of every standalone `|` token.
pub fn pipe_positions(tokens: &[String]) -> Vec<usize> {
    tokens
        .iter()
        .enumerate()
        .filter(|(_, token)| token.as_str() == PIPE)
        .map(|(pos, _)| pos)
        .collect()
}

pub const PIPE: &str = "|";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_split() {
        assert_eq!(tokenize("ls -l /tmp"), vec!["ls", "-l", "/tmp"]);
    }

    #[test]
    fn test_consecutive_spaces_are_filtered() {
        assert_eq!(tokenize("ls  -l"), vec!["ls", "-l"]);
        assert_eq!(tokenize("  pwd   "), vec!["pwd"]);
    }

    #[test]
    fn test_empty_line() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("    ").is_empty());
    }

    #[test]
    fn test_trailing_newline_is_stripped() {
        assert_eq!(tokenize("history\n"), vec!["history"]);
        assert_eq!(tokenize("dirs\r\n"), vec!["dirs"]);
    }

    #[test]
    fn test_tabs_are_not_separators() {
        assert_eq!(tokenize("echo\ta"), vec!["echo\ta"]);
    }

    #[test]
    fn test_pipe_positions() {
        let tokens = tokenize("echo hi | wc -l");
        assert_eq!(pipe_positions(&tokens), vec![2]);

        let tokens = tokenize("a | b | c");
        assert_eq!(pipe_positions(&tokens), vec![1, 3]);

        // A pipe glued to a word is not a separator.
        let tokens = tokenize("echo a|b");
        assert!(pipe_positions(&tokens).is_empty());
    }
}
