use std::fmt;
use std::io::{self, Write};

#[derive(Debug, PartialEq, Eq)]
pub enum HistoryError {
    IndexOutOfRange { index: usize, len: usize },
}

impl fmt::Display for HistoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HistoryError::IndexOutOfRange { index, len } if *len == 0 => {
                write!(f, "no history entry {}: history is empty", index)
            }
            HistoryError::IndexOutOfRange { index, len } => {
                write!(f, "no history entry {}: valid range is 1..={}", index, len)
            }
        }
    }
}

impl std::error::Error for HistoryError {}

/// Append-only log of dispatched token sequences, addressed from 1.
#[derive(Debug, Default, Clone)]
pub struct HistoryLog {
    entries: Vec<Vec<String>>,
}

impl HistoryLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, tokens: &[String]) {
        self.entries.push(tokens.to_vec());
    }

    pub fn get(&self, index: usize) -> Result<&[String], HistoryError> {
        index
            .checked_sub(1)
            .and_then(|i| self.entries.get(i))
            .map(Vec::as_slice)
            .ok_or(HistoryError::IndexOutOfRange {
                index,
                len: self.entries.len(),
            })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &[String])> {
        self.entries
            .iter()
            .enumerate()
            .map(|(i, tokens)| (i + 1, tokens.as_slice()))
    }

    pub fn print(&self, out: &mut dyn Write) -> io::Result<()> {
        writeln!(out, "-- Command History --")?;
        writeln!(out)?;
        for (index, tokens) in self.iter() {
            writeln!(out, "{} : {}", index, tokens.join(" "))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(line: &str) -> Vec<String> {
        line.split(' ').map(String::from).collect()
    }

    #[test]
    fn test_add_and_get() {
        let mut history = HistoryLog::new();
        history.add(&tokens("ls -l"));
        history.add(&tokens("pwd"));

        assert_eq!(history.len(), 2);
        assert_eq!(history.get(1).unwrap(), tokens("ls -l").as_slice());
        assert_eq!(history.get(2).unwrap(), tokens("pwd").as_slice());
    }

    #[test]
    fn test_index_zero_is_invalid() {
        let mut history = HistoryLog::new();
        history.add(&tokens("ls"));

        assert_eq!(
            history.get(0),
            Err(HistoryError::IndexOutOfRange { index: 0, len: 1 })
        );
    }

    #[test]
    fn test_index_past_end() {
        let mut history = HistoryLog::new();
        history.add(&tokens("ls"));
        history.add(&tokens("pwd"));

        assert_eq!(
            history.get(99),
            Err(HistoryError::IndexOutOfRange { index: 99, len: 2 })
        );
        assert!(HistoryLog::new().get(1).is_err());
    }

    #[test]
    fn test_print_numbers_entries_in_order() {
        let mut history = HistoryLog::new();
        history.add(&tokens("ls"));
        history.add(&tokens("pwd"));

        let mut out = Vec::new();
        history.print(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let entries: Vec<&str> = text.lines().skip(2).collect();

        assert_eq!(entries, vec!["1 : ls", "2 : pwd"]);
    }

    #[test]
    fn test_error_display() {
        let empty = HistoryError::IndexOutOfRange { index: 3, len: 0 };
        let full = HistoryError::IndexOutOfRange { index: 3, len: 2 };
        assert!(empty.to_string().contains("empty"));
        assert!(full.to_string().contains("1..=2"));
    }
}
