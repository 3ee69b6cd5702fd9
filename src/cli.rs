//! Command-line argument parsing for DeckelPost.
//!
//! Flags override values loaded from `--config`, which in turn override the
//! built-in Deckel FP4A defaults.

use clap::Parser;
use deckelpost_core::{MeasurementSystem, Result};
use deckelpost_settings::{PostConfig, SpindlePolicy, ToolWordPolicy};
use std::path::PathBuf;

/// Re-encode generic tool-path commands for a Deckel FP4A controller.
#[derive(Parser, Debug)]
#[command(name = "deckelpost")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Input JSON document with tool paths (`-` for stdin)
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Output file (`-` for stdout)
    #[arg(short, long, value_name = "FILE", default_value = "-")]
    pub output: PathBuf,

    /// Config file path (JSON or TOML)
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Suppress N-numbers
    #[arg(long)]
    pub no_line_numbers: bool,

    /// Emit work offset (G54) selects
    #[arg(long)]
    pub include_zero_points: bool,

    /// Write lengths and feeds in inches
    #[arg(long)]
    pub inches: bool,

    /// Omit repeated command words
    #[arg(long)]
    pub modal: bool,

    /// Omit unchanged axis words
    #[arg(long)]
    pub axis_modal: bool,

    /// Drop tool length offset (H) words
    #[arg(long)]
    pub no_tlo: bool,

    /// Text written before the first tool path
    #[arg(long, value_name = "TEXT")]
    pub preamble: Option<String>,

    /// Text written at the end of the program
    #[arg(long, value_name = "TEXT")]
    pub postamble: Option<String>,

    /// Force this feed on rapid moves, in the output speed unit
    #[arg(long, value_name = "F")]
    pub rapid_feed: Option<f64>,

    /// Write the spindle word on every motion line
    #[arg(long)]
    pub spindle_every_line: bool,

    /// Drop T/H/D words and report them instead of emitting them
    #[arg(long)]
    pub warn_tool_words: bool,

    /// Log as JSON
    #[arg(long)]
    pub log_json: bool,
}

impl Cli {
    /// Parse from process arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Build the effective configuration
    pub fn to_config(&self) -> Result<PostConfig> {
        let mut config = match &self.config {
            Some(path) => PostConfig::load_from_file(path)?,
            None => PostConfig::default(),
        };
        self.apply_to(&mut config);
        config.validate()?;
        Ok(config)
    }

    /// Apply flag overrides to a configuration
    pub fn apply_to(&self, config: &mut PostConfig) {
        if self.no_line_numbers {
            config.output_line_numbers = false;
        }
        if self.include_zero_points {
            config.output_zero_points = true;
        }
        if self.inches {
            config.units = MeasurementSystem::Imperial;
        }
        if self.modal {
            config.modal = true;
        }
        if self.axis_modal {
            config.axis_modal = true;
        }
        if self.no_tlo {
            config.use_tool_length_offset = false;
        }
        if let Some(preamble) = &self.preamble {
            config.preamble = preamble.clone();
        }
        if let Some(postamble) = &self.postamble {
            config.postamble = postamble.clone();
        }
        if let Some(feed) = self.rapid_feed {
            config.rapid_feed_override = Some(feed);
        }
        if self.spindle_every_line {
            config.spindle_policy = SpindlePolicy::EveryLine;
        }
        if self.warn_tool_words {
            config.tool_words = ToolWordPolicy::Warn;
        }
    }

    /// True when the program goes to stdout
    pub fn writes_stdout(&self) -> bool {
        self.output.as_os_str() == "-"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("deckelpost").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_defaults() {
        let cli = parse(&["paths.json"]);
        assert!(cli.writes_stdout());
        assert!(cli.config.is_none());

        let mut config = PostConfig::default();
        cli.apply_to(&mut config);
        assert_eq!(config, PostConfig::default());
    }

    #[test]
    fn test_flags_override() {
        let cli = parse(&[
            "--no-line-numbers",
            "--include-zero-points",
            "--inches",
            "--modal",
            "--axis-modal",
            "--no-tlo",
            "--postamble",
            "?",
            "--rapid-feed",
            "1200",
            "--spindle-every-line",
            "--warn-tool-words",
            "-o",
            "out.nc",
            "paths.json",
        ]);
        assert!(!cli.writes_stdout());

        let mut config = PostConfig::default();
        cli.apply_to(&mut config);
        assert!(!config.output_line_numbers);
        assert!(config.output_zero_points);
        assert_eq!(config.units, MeasurementSystem::Imperial);
        assert!(config.modal);
        assert!(config.axis_modal);
        assert!(!config.use_tool_length_offset);
        assert_eq!(config.postamble, "?");
        assert_eq!(config.rapid_feed_override, Some(1200.0));
        assert_eq!(config.spindle_policy, SpindlePolicy::EveryLine);
        assert_eq!(config.tool_words, ToolWordPolicy::Warn);
    }

    #[test]
    fn test_missing_input_rejected() {
        assert!(Cli::try_parse_from(["deckelpost"]).is_err());
    }
}
