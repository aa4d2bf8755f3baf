use std::{fs::File, io::BufReader, path::Path};

use anyhow::{Context, Result, ensure};
use serde::{Deserialize, Serialize};

pub const DEFAULT_THRESHOLD: f64 = 0.95;

/// Tuning for [`crate::parser::Parser`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct ParserConfig {
    /// Share of the sample that must agree before a decision is taken.
    pub threshold: f64,
    /// Read a lone `.` as a decimal separator rather than a grouping one.
    pub prefer_dot_as_decimal_separator: bool,
    /// Give up on a numeric layout when too many rows do not fit it.
    pub strict_numeric_errors: bool,
    /// Integers written with leading zeros are identifiers, hence text.
    pub leading_zero_as_text: bool,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            prefer_dot_as_decimal_separator: true,
            strict_numeric_errors: true,
            leading_zero_as_text: true,
        }
    }
}

impl ParserConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path).with_context(|| format!("Opening config file {path:?}"))?;
        let config: ParserConfig = serde_yaml::from_reader(BufReader::new(file))
            .with_context(|| format!("Parsing config YAML {path:?}"))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.threshold > 0.0 && self.threshold <= 1.0,
            "Threshold must be in (0, 1], got {}",
            self.threshold
        );
        Ok(())
    }

    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn with_prefer_dot_as_decimal_separator(mut self, prefer: bool) -> Self {
        self.prefer_dot_as_decimal_separator = prefer;
        self
    }

    pub fn to_yaml_string(&self) -> Result<String> {
        serde_yaml::to_string(self).context("Serializing parser config to YAML")
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = ParserConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.threshold, DEFAULT_THRESHOLD);
        assert!(config.prefer_dot_as_decimal_separator);
    }

    #[test]
    fn threshold_outside_unit_interval_is_rejected() {
        for threshold in [0.0, -0.5, 1.01, f64::NAN] {
            let config = ParserConfig::default().with_threshold(threshold);
            assert!(config.validate().is_err(), "{threshold}");
        }
        assert!(ParserConfig::default().with_threshold(1.0).validate().is_ok());
    }

    #[test]
    fn load_fills_missing_fields_with_defaults() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(file, "threshold: 0.8\nleading_zero_as_text: false").expect("write");
        let config = ParserConfig::load(file.path()).expect("load");
        assert_eq!(config.threshold, 0.8);
        assert!(!config.leading_zero_as_text);
        assert!(config.strict_numeric_errors);
    }

    #[test]
    fn load_rejects_invalid_threshold() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(file, "threshold: 2.0").expect("write");
        assert!(ParserConfig::load(file.path()).is_err());
    }

    #[test]
    fn yaml_round_trip() {
        let config = ParserConfig::default().with_prefer_dot_as_decimal_separator(false);
        let yaml = config.to_yaml_string().expect("yaml");
        let back: ParserConfig = serde_yaml::from_str(&yaml).expect("parse");
        assert_eq!(back, config);
    }
}
