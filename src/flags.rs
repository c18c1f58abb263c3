use crate::error::ShellError;
use std::collections::BTreeMap;

/// Command-line options of the `pipette` binary.
#[derive(Debug, Clone)]
pub struct Flags {
    flags: BTreeMap<&'static str, Flag>,
}

#[derive(Debug, Clone)]
pub struct Flag {
    pub short: &'static str,
    pub long: &'static str,
    pub description: &'static str,
    pub takes_value: bool,
    pub value: Option<String>,
}

impl Flag {
    fn new(short: &'static str, long: &'static str, description: &'static str) -> Self {
        Flag {
            short,
            long,
            description,
            takes_value: false,
            value: None,
        }
    }

    fn with_value(mut self) -> Self {
        self.takes_value = true;
        self
    }
}

impl Default for Flags {
    fn default() -> Self {
        Self::new()
    }
}

impl Flags {
    pub fn new() -> Self {
        let mut flags = BTreeMap::new();
        flags.insert("help", Flag::new("-h", "--help", "Print this help message"));
        flags.insert("version", Flag::new("-v", "--version", "Show version information"));
        flags.insert(
            "config",
            Flag::new("-c", "--config", "Read startup commands from FILE instead of ~/.pipetterc")
                .with_value(),
        );
        flags.insert(
            "quiet",
            Flag::new("-q", "--quiet", "Do not report non-zero exit statuses"),
        );
        flags.insert("debug", Flag::new("-d", "--debug", "Enable debug logging"));

        Flags { flags }
    }

    pub fn parse(&mut self, args: &[String]) -> Result<(), ShellError> {
        let mut args = args.iter();
        while let Some(arg) = args.next() {
            let Some(flag) = self
                .flags
                .values_mut()
                .find(|flag| arg == flag.short || arg == flag.long)
            else {
                return Err(ShellError::FlagError(format!("unknown option: {}", arg)));
            };

            flag.value = if flag.takes_value {
                let value = args.next().ok_or_else(|| {
                    ShellError::FlagError(format!("option {} requires a value", arg))
                })?;
                Some(value.clone())
            } else {
                Some("true".to_string())
            };
        }
        Ok(())
    }

    pub fn is_set(&self, name: &str) -> bool {
        self.get_value(name).is_some()
    }

    pub fn get_value(&self, name: &str) -> Option<&str> {
        self.flags.get(name).and_then(|f| f.value.as_deref())
    }

    pub fn print_help(&self) {
        println!("Usage: pipette [OPTIONS]");
        println!("\nOptions:");
        for flag in self.flags.values() {
            let long = if flag.takes_value {
                format!("{} FILE", flag.long)
            } else {
                flag.long.to_string()
            };
            println!("  {}, {:<16} {}", flag.short, long, flag.description);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_short_and_long_flags() {
        let mut flags = Flags::new();
        flags.parse(&args(&["-q", "--debug"])).unwrap();
        assert!(flags.is_set("quiet"));
        assert!(flags.is_set("debug"));
        assert!(!flags.is_set("help"));
    }

    #[test]
    fn test_config_takes_value() {
        let mut flags = Flags::new();
        flags.parse(&args(&["--config", "/tmp/rc"])).unwrap();
        assert_eq!(flags.get_value("config"), Some("/tmp/rc"));
    }

    #[test]
    fn test_missing_value() {
        let mut flags = Flags::new();
        assert!(matches!(
            flags.parse(&args(&["-c"])),
            Err(ShellError::FlagError(_))
        ));
    }

    #[test]
    fn test_unknown_flag() {
        let mut flags = Flags::new();
        assert!(matches!(
            flags.parse(&args(&["--frobnicate"])),
            Err(ShellError::FlagError(_))
        ));
    }
}
