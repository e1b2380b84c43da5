// merge.rs - Merge configuration file with CLI arguments

use crate::cli::config::NetworkSection;
use crate::cli::{Args, Config};
use crate::error::Result;

impl Args {
    /// Merge with configuration from file.
    /// CLI arguments take precedence over config file values.
    pub fn merge_with_config(mut self, config: Config) -> Self {
        // Input/Output
        if self.family.is_none() {
            self.family = config.family;
        }
        if self.output.is_none() {
            self.output = config.output;
        }

        if self.format.is_none() {
            self.format = config.format;
        }
        if self.precision.is_none() {
            self.precision = config.precision;
        }

        // Performance
        if self.threads.is_none() {
            self.threads = config.threads;
        }
        if self.max_persons.is_none() {
            self.max_persons = config.max_persons;
        }
        if !self.progress && config.progress.unwrap_or(false) {
            self.progress = true;
        }

        // Report filtering
        if self.include_persons.is_none() {
            self.include_persons = config.include_persons;
        }
        if self.exclude_persons.is_none() {
            self.exclude_persons = config.exclude_persons;
        }

        // Flags
        if !self.dry_run && config.dry_run.unwrap_or(false) {
            self.dry_run = true;
        }

        self
    }

    /// Load configuration and merge with CLI args; returns the network section separately
    pub fn with_config_file(self, config_path: &str) -> Result<(Self, Option<NetworkSection>)> {
        let mut config = Config::from_file(config_path)?;
        let network = config.network.take();
        Ok((self.merge_with_config(config), network))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use argh::FromArgs;

    fn parse(args: &[&str]) -> Args {
        Args::from_args(&["heredity"], args).unwrap()
    }

    #[test]
    fn test_cli_takes_precedence() {
        let args = parse(&["family0.csv", "--format", "json", "--threads", "2"]);
        let config = Config {
            family: Some("other.csv".to_string()),
            format: Some("tsv".to_string()),
            threads: Some(8),
            precision: Some(6),
            progress: Some(true),
            ..Config::new()
        };
        let merged = args.merge_with_config(config);
        assert_eq!(merged.family.as_deref(), Some("family0.csv"));
        assert_eq!(merged.format.as_deref(), Some("json"));
        assert_eq!(merged.threads, Some(2));
        assert_eq!(merged.precision, Some(6));
        assert!(merged.progress);
    }

    #[test]
    fn test_config_fills_missing() {
        let args = parse(&[]);
        let config = Config {
            family: Some("family2.csv".to_string()),
            max_persons: Some(8),
            exclude_persons: Some("^X".to_string()),
            ..Config::new()
        };
        let merged = args.merge_with_config(config);
        assert_eq!(merged.family.as_deref(), Some("family2.csv"));
        assert_eq!(merged.max_persons, Some(8));
        assert_eq!(merged.exclude_persons.as_deref(), Some("^X"));
    }

    #[test]
    fn test_explicit_default_values_beat_config() {
        let args = parse(&[
            "family0.csv",
            "--format",
            "text",
            "--precision",
            "4",
            "--max-persons",
            "12",
        ]);
        let config = Config {
            format: Some("json".to_string()),
            precision: Some(6),
            max_persons: Some(5),
            ..Config::new()
        };
        let merged = args.merge_with_config(config);
        assert_eq!(merged.format.as_deref(), Some("text"));
        assert_eq!(merged.precision, Some(4));
        assert_eq!(merged.max_persons, Some(12));
    }
}
