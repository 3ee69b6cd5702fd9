//! Post-processor configuration
//!
//! Provides the per-run settings consumed by the translator and the program
//! assembler, with defaults for a Deckel FP4A controller.
//! Supports JSON and TOML file formats.
//!
//! Configuration is organized into:
//! - Units (length and speed unit family)
//! - Output suppression toggles (modal, axis-modal, zero points)
//! - Spindle and tool word policies
//! - Program text (preamble, post-operation block, postamble)

pub use deckelpost_core::units::{FeedRateUnits, MeasurementSystem};
use deckelpost_core::{ConfigError, Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

const DEFAULT_PREAMBLE: &str = "&P01
D01 +000000
D02 +000000
D03 +000000



%
(&P01/0000)";

const DEFAULT_POSTAMBLE: &str = "?
0000";

const DEFAULT_POST_OPERATION: &str = "M30";

/// When the spindle word is written on motion lines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpindlePolicy {
    /// Only when the commanded speed differs from the last one written
    #[default]
    OnChange,
    /// On every motion line
    EveryLine,
}

/// How tool and offset identifiers (T, H, D) are handled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolWordPolicy {
    /// Write them inline as plain integers
    #[default]
    Emit,
    /// Drop them and report a diagnostic
    Warn,
}

/// Complete post-processor configuration
///
/// Read-only during translation; shared immutably between runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PostConfig {
    /// Unit family for lengths and feeds
    pub units: MeasurementSystem,
    /// Omit the command word when it repeats the previous line's
    pub modal: bool,
    /// Omit axis words whose value is unchanged
    pub axis_modal: bool,
    /// Emit work offset (G54) selects
    pub output_zero_points: bool,
    /// Emit tool length offset (H) words
    pub use_tool_length_offset: bool,
    /// Forced feed for rapid moves, in the configured speed unit
    pub rapid_feed_override: Option<f64>,
    /// Prefix lines with N-numbers
    pub output_line_numbers: bool,
    /// Spindle word emission policy
    pub spindle_policy: SpindlePolicy,
    /// T/H/D word policy
    pub tool_words: ToolWordPolicy,
    /// Machine name, informational
    pub machine_name: String,
    /// Text written before the first tool path
    pub preamble: String,
    /// Line-numbered block written after the last tool path
    pub post_operation: String,
    /// Text written at the very end
    pub postamble: String,
}

impl Default for PostConfig {
    fn default() -> Self {
        Self {
            units: MeasurementSystem::Metric,
            modal: false,
            axis_modal: false,
            output_zero_points: false,
            use_tool_length_offset: true,
            rapid_feed_override: None,
            output_line_numbers: true,
            spindle_policy: SpindlePolicy::OnChange,
            tool_words: ToolWordPolicy::Emit,
            machine_name: "Deckel FP4A".to_string(),
            preamble: DEFAULT_PREAMBLE.to_string(),
            post_operation: DEFAULT_POST_OPERATION.to_string(),
            postamble: DEFAULT_POSTAMBLE.to_string(),
        }
    }
}

impl PostConfig {
    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;

        let config: Self = if path.extension().is_some_and(|ext| ext == "json") {
            serde_json::from_str(&content)?
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            toml::from_str(&content)?
        } else {
            return Err(ConfigError::UnsupportedFormat(path.display().to_string()).into());
        };

        config.validate()?;
        tracing::debug!("Loaded post config from {}", path.display());
        Ok(config)
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        self.validate()?;

        let content = if path.extension().is_some_and(|ext| ext == "json") {
            serde_json::to_string_pretty(self)?
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            toml::to_string_pretty(self)?
        } else {
            return Err(ConfigError::UnsupportedFormat(path.display().to_string()).into());
        };

        std::fs::write(path, content)?;
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if let Some(feed) = self.rapid_feed_override {
            if !feed.is_finite() || feed <= 0.0 {
                return Err(Error::Config(ConfigError::InvalidSetting {
                    key: "rapid_feed_override".to_string(),
                    reason: format!("must be a positive number, got {}", feed),
                }));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_fp4a() {
        let config = PostConfig::default();
        assert_eq!(config.units, MeasurementSystem::Metric);
        assert!(config.output_line_numbers);
        assert!(config.use_tool_length_offset);
        assert!(!config.modal);
        assert!(!config.axis_modal);
        assert!(!config.output_zero_points);
        assert!(config.preamble.starts_with("&P01"));
        assert_eq!(config.post_operation, "M30");
        assert_eq!(config.postamble, "?\n0000");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rapid_override_validation() {
        let mut config = PostConfig::default();
        config.rapid_feed_override = Some(0.0);
        assert!(config.validate().is_err());

        config.rapid_feed_override = Some(-100.0);
        assert!(config.validate().is_err());

        config.rapid_feed_override = Some(f64::NAN);
        assert!(config.validate().is_err());

        config.rapid_feed_override = Some(3000.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: PostConfig = toml::from_str(
            r#"
units = "imperial"
modal = true
spindle_policy = "every_line"
"#,
        )
        .unwrap();
        assert_eq!(config.units, MeasurementSystem::Imperial);
        assert!(config.modal);
        assert_eq!(config.spindle_policy, SpindlePolicy::EveryLine);
        assert_eq!(config.tool_words, ToolWordPolicy::Emit);
        assert_eq!(config.machine_name, "Deckel FP4A");
    }
}
