use super::CommandError;

pub const REPLAY: &str = "^";

/// Recognises `^ n` and `^n`. Returns `None` when `argv` is not a replay,
/// otherwise the requested 1-based history index or a usage error.
pub fn parse_replay(argv: &[String]) -> Option<Result<usize, CommandError>> {
    let first = argv.first()?;
    let index = match first.strip_prefix(REPLAY)? {
        "" => argv.get(1).map(String::as_str),
        embedded => Some(embedded),
    };

    Some(match index {
        None => Err(CommandError::InvalidArguments(
            "usage: ^ <history index>".to_string(),
        )),
        Some(raw) => raw.parse::<usize>().map_err(|_| {
            CommandError::InvalidArguments(format!("^: not a history index: {}", raw))
        }),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(line: &str) -> Vec<String> {
        line.split(' ').map(String::from).collect()
    }

    #[test]
    fn test_separate_index() {
        assert!(matches!(parse_replay(&argv("^ 2")), Some(Ok(2))));
    }

    #[test]
    fn test_embedded_index() {
        assert!(matches!(parse_replay(&argv("^12")), Some(Ok(12))));
        assert!(matches!(parse_replay(&argv("^0")), Some(Ok(0))));
    }

    #[test]
    fn test_not_a_replay() {
        assert!(parse_replay(&argv("ls ^")).is_none());
        assert!(parse_replay(&[]).is_none());
    }

    #[test]
    fn test_bad_index() {
        assert!(matches!(
            parse_replay(&argv("^")),
            Some(Err(CommandError::InvalidArguments(_)))
        ));
        assert!(matches!(
            parse_replay(&argv("^ two")),
            Some(Err(CommandError::InvalidArguments(_)))
        ));
        assert!(matches!(
            parse_replay(&argv("^-1")),
            Some(Err(CommandError::InvalidArguments(_)))
        ));
    }
}
