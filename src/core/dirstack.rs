use std::io::{self, Write};

pub const EMPTY_STACK: &str = "Directory stack empty";

/// `pushd`/`popd` bookkeeping. Entries are plain strings and are never
/// checked against the filesystem.
#[derive(Debug, Default, Clone)]
pub struct DirStack {
    entries: Vec<String>,
}

impl DirStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, path: impl Into<String>) {
        self.entries.push(path.into());
    }

    /// Pops the top entry, or returns [`EMPTY_STACK`] when there is none.
    pub fn pop(&mut self) -> String {
        self.entries
            .pop()
            .unwrap_or_else(|| EMPTY_STACK.to_string())
    }

    pub fn peek(&self) -> Option<&str> {
        self.entries.last().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    // Storage order: bottom of the stack first, top last.
    pub fn print(&self, out: &mut dyn Write) -> io::Result<()> {
        for entry in &self.entries {
            writeln!(out, "{}", entry)?;
        }
        Ok(())
    }
}
