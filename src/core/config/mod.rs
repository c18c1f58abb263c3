use std::fmt;

mod aliases;
mod loader;
mod paths;

pub use aliases::AliasManager;
pub use paths::ConfigPaths;
use loader::ConfigLoader;

/// Settings read from the rc file at startup.
pub struct Config {
    paths: ConfigPaths,
    aliases: AliasManager,
}

impl Config {
    pub fn new(paths: ConfigPaths) -> Self {
        Config {
            paths,
            aliases: AliasManager::new(),
        }
    }

    /// Loads the rc file. Lines before a malformed one stay applied.
    pub fn load(&mut self) -> Result<(), ConfigError> {
        let rc_path = self.paths.rc_path.clone();
        ConfigLoader::new(&rc_path).load_configs(self)
    }

    pub fn paths(&self) -> &ConfigPaths {
        &self.paths
    }

    pub fn aliases(&self) -> &AliasManager {
        &self.aliases
    }
}

#[derive(Debug)]
pub enum ConfigError {
    HomeDirNotFound,
    InvalidLine { number: usize, content: String },
    IoError(std::io::Error),
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::IoError(e)
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::HomeDirNotFound => write!(f, "Home directory not found"),
            ConfigError::InvalidLine { number, content } => {
                write!(f, "line {}: expected NAME=VALUE: {}", number, content)
            }
            ConfigError::IoError(e) => write!(f, "IO error: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {}
