use std::fmt;
use std::os::fd::OwnedFd;

use log::debug;
use nix::unistd::pipe;

use super::ProcessError;
use crate::input::tokenizer::{pipe_positions, PIPE};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Left => write!(f, "before"),
            Side::Right => write!(f, "after"),
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum PipelineError {
    TooManyPipes(usize),
    MissingCommand(Side),
}

impl fmt::Display for PipelineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipelineError::TooManyPipes(count) => write!(
                f,
                "only one '{}' is supported per command line, found {}",
                PIPE, count
            ),
            PipelineError::MissingCommand(side) => {
                write!(f, "missing command {} '{}'", side, PIPE)
            }
        }
    }
}

impl std::error::Error for PipelineError {}

/// A command line after pipe detection.
#[derive(Debug, PartialEq, Eq)]
pub enum CommandLine {
    Single(Vec<String>),
    Piped { left: Vec<String>, right: Vec<String> },
}

impl CommandLine {
    pub fn parse(tokens: &[String]) -> Result<Self, PipelineError> {
        match pipe_positions(tokens).as_slice() {
            [] => Ok(CommandLine::Single(tokens.to_vec())),
            [pos] => {
                let (left, right) = (&tokens[..*pos], &tokens[pos + 1..]);
                if left.is_empty() {
                    return Err(PipelineError::MissingCommand(Side::Left));
                }
                if right.is_empty() {
                    return Err(PipelineError::MissingCommand(Side::Right));
                }
                Ok(CommandLine::Piped {
                    left: left.to_vec(),
                    right: right.to_vec(),
                })
            }
            many => Err(PipelineError::TooManyPipes(many.len())),
        }
    }
}

/// Producer and consumer of a two-stage pipeline together with the pipe
/// that connects them. Lives for one dispatch call.
#[derive(Debug)]
pub struct PipelineDescriptor {
    pub left: Vec<String>,
    pub right: Vec<String>,
    read_end: OwnedFd,
    write_end: OwnedFd,
}

impl PipelineDescriptor {
    pub fn open(left: Vec<String>, right: Vec<String>) -> Result<Self, ProcessError> {
        let (read_end, write_end) = pipe().map_err(ProcessError::Pipe)?;
        debug!("opened pipe {:?} -> {:?}", write_end, read_end);
        Ok(Self {
            left,
            right,
            read_end,
            write_end,
        })
    }

    /// Splits into `(left, right, read_end, write_end)`. Whoever does not use
    /// an endpoint must drop it so the reader can see end-of-file.
    pub fn into_parts(self) -> (Vec<String>, Vec<String>, OwnedFd, OwnedFd) {
        (self.left, self.right, self.read_end, self.write_end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::tokenize;
    use std::fs::File;
    use std::io::{Read, Write};

    #[test]
    fn test_parse_single() {
        let tokens = tokenize("ls -l");
        assert_eq!(
            CommandLine::parse(&tokens).unwrap(),
            CommandLine::Single(tokens.clone())
        );
    }

    #[test]
    fn test_parse_piped() {
        let tokens = tokenize("echo hi | wc -l");
        assert_eq!(
            CommandLine::parse(&tokens).unwrap(),
            CommandLine::Piped {
                left: tokenize("echo hi"),
                right: tokenize("wc -l"),
            }
        );
    }

    #[test]
    fn test_parse_rejects_multi_stage() {
        let tokens = tokenize("a | b | c");
        assert_eq!(
            CommandLine::parse(&tokens),
            Err(PipelineError::TooManyPipes(2))
        );
    }

    #[test]
    fn test_parse_rejects_missing_side() {
        assert_eq!(
            CommandLine::parse(&tokenize("| wc")),
            Err(PipelineError::MissingCommand(Side::Left))
        );
        assert_eq!(
            CommandLine::parse(&tokenize("ls |")),
            Err(PipelineError::MissingCommand(Side::Right))
        );
    }

    #[test]
    fn test_descriptor_carries_bytes() {
        let descriptor = PipelineDescriptor::open(tokenize("a"), tokenize("b")).unwrap();
        let (left, right, read_end, write_end) = descriptor.into_parts();
        assert_eq!(left, vec!["a"]);
        assert_eq!(right, vec!["b"]);

        let mut writer = File::from(write_end);
        writer.write_all(b"bytes").unwrap();
        drop(writer);

        let mut received = Vec::new();
        File::from(read_end).read_to_end(&mut received).unwrap();
        assert_eq!(received, b"bytes");
    }
}
