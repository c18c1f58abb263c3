use crate::core::commands::CommandError;
use std::path::{Path, PathBuf};

/// Expands a leading `~` or `~/` to the home directory. `~user` forms are
/// left untouched.
#[derive(Clone, Default)]
pub struct PathExpander;

impl PathExpander {
    pub fn new() -> Self {
        Self
    }

    pub fn expand(&self, path: &str) -> Result<PathBuf, CommandError> {
        match path.strip_prefix('~') {
            Some("") => self.home_dir(),
            Some(rest) if rest.starts_with('/') => {
                let mut home = self.home_dir()?;
                home.extend(rest.split('/').filter(|part| !part.is_empty()));
                Ok(home)
            }
            _ => Ok(Path::new(path).to_path_buf()),
        }
    }

    pub fn home_dir(&self) -> Result<PathBuf, CommandError> {
        dirs::home_dir().ok_or(CommandError::HomeDirNotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_path_untouched() {
        let expander = PathExpander::new();
        assert_eq!(expander.expand("/tmp").unwrap(), PathBuf::from("/tmp"));
        assert_eq!(expander.expand("rel/dir").unwrap(), PathBuf::from("rel/dir"));
    }

    #[test]
    fn test_tilde_expansion() {
        let expander = PathExpander::new();
        let home = dirs::home_dir().unwrap();
        assert_eq!(expander.expand("~").unwrap(), home);
        assert_eq!(expander.expand("~/a//b").unwrap(), home.join("a").join("b"));
    }

    #[test]
    fn test_other_user_untouched() {
        let expander = PathExpander::new();
        assert_eq!(expander.expand("~root").unwrap(), PathBuf::from("~root"));
    }
}
