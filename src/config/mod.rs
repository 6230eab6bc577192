// src/config/mod.rs
pub mod types;

pub use self::types::{
    CheckConfig, ComponentScoring, Config, DecisionConfig, ReportConfig, ScoringConfig,
    SourceConfig, ThresholdConfig,
};

use crate::error::{CleaverError, Result};
use std::fs;
use std::path::Path;

/// File name looked up in the working directory by [`Config::load`].
pub const CONFIG_FILE: &str = "cleaver.toml";

/// Directories never descended into when walking the source tree.
pub const PRUNE_DIRS: &[&str] = &[
    ".git",
    ".cleaver",
    "target",
    "node_modules",
    "dist",
    "build",
    "coverage",
    ".next",
];

impl Config {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads `cleaver.toml` from the current directory.
    ///
    /// A missing file yields defaults. A malformed file is logged and ignored.
    #[must_use]
    pub fn load() -> Self {
        Self::load_from(Path::new(CONFIG_FILE))
    }

    #[must_use]
    pub fn load_from(path: &Path) -> Self {
        let Ok(content) = fs::read_to_string(path) else {
            return Self::default();
        };
        match Self::from_toml_str(&content) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "ignoring malformed config");
                Self::default()
            }
        }
    }

    /// Parses a TOML document; absent keys fall back to defaults.
    ///
    /// # Errors
    /// Returns error if the document is not valid TOML or a value has the wrong type.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects settings that would break scoring invariants.
    ///
    /// # Errors
    /// Returns error if a size threshold is zero or the batch cap is zero.
    pub fn validate(&self) -> Result<()> {
        let t = &self.thresholds;
        let sizes = [t.component, t.page, t.hook, t.utility, t.types, t.unknown];
        if sizes.contains(&0) {
            return Err(CleaverError::Other(
                "size thresholds must be greater than zero".into(),
            ));
        }
        if self.checks.maintainability_fail > self.checks.maintainability_warn {
            return Err(CleaverError::Other(
                "checks.maintainability_fail must not exceed checks.maintainability_warn".into(),
            ));
        }
        if self.decision.max_batch == 0 {
            return Err(CleaverError::Other("decision.max_batch must be at least 1".into()));
        }
        for pattern in &self.source.exclude {
            regex::Regex::new(pattern)?;
        }
        Ok(())
    }

    /// Saves the current configuration as TOML.
    ///
    /// # Errors
    /// Returns error if serialization or the file write fails.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content =
            toml::to_string_pretty(self).map_err(|e| CleaverError::Other(e.to_string()))?;
        fs::write(path, content).map_err(|e| CleaverError::io(e, path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_is_defaults() {
        let config = Config::from_toml_str("").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn partial_section_keeps_other_defaults() {
        let config = Config::from_toml_str("[thresholds]\ncomponent = 180\n").unwrap();
        assert_eq!(config.thresholds.component, 180);
        assert_eq!(config.thresholds.page, 300);
        assert_eq!(config.decision.cooldown_hours, 24);
    }

    #[test]
    fn zero_threshold_rejected() {
        assert!(Config::from_toml_str("[thresholds]\nhook = 0\n").is_err());
    }

    #[test]
    fn bad_exclude_regex_rejected() {
        assert!(Config::from_toml_str("[source]\nexclude = [\"(\"]\n").is_err());
    }

    #[test]
    fn save_then_load_preserves_overrides() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        let mut config = Config::default();
        config.decision.cooldown_hours = 12;
        config.save(&path).unwrap();
        assert_eq!(Config::load_from(&path).decision.cooldown_hours, 12);
    }

    #[test]
    fn missing_file_is_defaults() {
        let config = Config::load_from(Path::new("/definitely/not/here/cleaver.toml"));
        assert_eq!(config, Config::default());
    }
}
