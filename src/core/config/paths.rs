use super::ConfigError;
use std::path::PathBuf;

const RC_FILE: &str = ".pipetterc";
const HISTORY_FILE: &str = ".pipette_history";

#[derive(Debug, Clone)]
pub struct ConfigPaths {
    pub rc_path: PathBuf,
    pub history_path: PathBuf,
}

impl ConfigPaths {
    /// Default locations under the home directory. `rc_override` replaces
    /// the rc file location (`--config`).
    pub fn new(rc_override: Option<&str>) -> Result<Self, ConfigError> {
        let home = dirs::home_dir().ok_or(ConfigError::HomeDirNotFound)?;

        Ok(ConfigPaths {
            rc_path: rc_override
                .map(PathBuf::from)
                .unwrap_or_else(|| home.join(RC_FILE)),
            history_path: home.join(HISTORY_FILE),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_paths() {
        let home = dirs::home_dir().unwrap();
        let paths = ConfigPaths::new(None).unwrap();

        assert_eq!(paths.rc_path, home.join(".pipetterc"));
        assert_eq!(paths.history_path, home.join(".pipette_history"));
    }

    #[test]
    fn test_rc_override() {
        let paths = ConfigPaths::new(Some("/etc/pipette.rc")).unwrap();
        assert_eq!(paths.rc_path, PathBuf::from("/etc/pipette.rc"));
    }
}
