use std::borrow::Cow;
use std::collections::HashSet;
use std::{env, fs, path::Path};

use log::{debug, warn};

use super::{Config, ConfigError};

pub struct ConfigLoader<'a> {
    rc_path: &'a Path,
}

impl<'a> ConfigLoader<'a> {
    pub fn new(rc_path: &'a Path) -> Self {
        Self { rc_path }
    }

    pub fn load_configs(&self, config: &mut Config) -> Result<(), ConfigError> {
        self.source_if_exists(self.rc_path, config)
    }

    fn source_if_exists(&self, path: &Path, config: &mut Config) -> Result<(), ConfigError> {
        if !path.exists() {
            debug!("no rc file at {}", path.display());
            return Ok(());
        }

        let content = fs::read_to_string(path)?;
        for (number, line) in content.lines().enumerate() {
            self.process_line(number + 1, line, config)?;
        }
        debug!("loaded {}", path.display());
        Ok(())
    }

    fn process_line(&self, number: usize, line: &str, config: &mut Config) -> Result<(), ConfigError> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(());
        }

        let (kind, definition) = if let Some(rest) = line.strip_prefix("export ") {
            ("export", rest)
        } else if line.starts_with("PATH=") {
            ("export", line)
        } else if let Some(rest) = line.strip_prefix("alias ") {
            ("alias", rest)
        } else {
            warn!("{}:{}: ignoring unsupported line", self.rc_path.display(), number);
            return Ok(());
        };

        let Some((name, value)) = definition.split_once('=') else {
            return Err(ConfigError::InvalidLine {
                number,
                content: line.to_string(),
            });
        };
        let (name, value) = (name.trim(), strip_quotes(value.trim()));
        if name.is_empty() {
            return Err(ConfigError::InvalidLine {
                number,
                content: line.to_string(),
            });
        }

        match kind {
            "alias" => config.aliases.add(name, value),
            _ => export_var(name, value),
        }
        Ok(())
    }
}

fn strip_quotes(value: &str) -> &str {
    for quote in ['"', '\''] {
        if value.len() >= 2 && value.starts_with(quote) && value.ends_with(quote) {
            return &value[1..value.len() - 1];
        }
    }
    value
}

fn export_var(name: &str, value: &str) {
    let expanded = expand_value(value);
    let value = if name == "PATH" {
        Cow::Owned(dedup_path(&expanded))
    } else {
        expanded
    };
    debug!("export {}={}", name, value);
    env::set_var(name, &*value);
}

/// Substitutes `$HOME` and `$PATH` from the current environment.
fn expand_value(value: &str) -> Cow<'_, str> {
    let mut result = Cow::Borrowed(value);
    for var in ["HOME", "PATH"] {
        let pattern = format!("${}", var);
        if result.contains(&pattern) {
            let current = env::var(var).unwrap_or_default();
            result = Cow::Owned(result.replace(&pattern, &current));
        }
    }
    result
}

fn dedup_path(path: &str) -> String {
    let mut seen = HashSet::new();
    path.split(':')
        .filter(|part| !part.is_empty() && seen.insert(*part))
        .collect::<Vec<_>>()
        .join(":")
}
