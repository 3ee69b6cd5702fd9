//! Stream driver
//!
//! Feeds a tool path's commands through a fresh translator, strictly in
//! order, and collects the lines and diagnostics.

use deckelpost_core::TranslateError;
use deckelpost_settings::PostConfig;

use crate::command::Command;
use crate::dialect::{DeckelDialect, Dialect};
use crate::output::{Diagnostic, OutputLine};
use crate::state::MachineState;
use crate::translator::CommandTranslator;

/// Result of translating one tool path
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TranslatedPath {
    /// Output lines in order; empty when there is nothing to emit
    pub lines: Vec<OutputLine>,
    /// Diagnostics raised while translating
    pub diagnostics: Vec<Diagnostic>,
    /// Last line number used, for continuing the numbering
    pub last_line_number: u32,
}

impl TranslatedPath {
    /// Nothing to emit
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Output lines as text
    pub fn to_lines(&self) -> Vec<String> {
        self.lines.iter().map(OutputLine::to_string).collect()
    }

    /// Output joined with newlines
    pub fn to_text(&self) -> String {
        self.to_lines().join("\n")
    }
}

/// Drives a command sequence through the translator
pub struct StreamDriver<'a, D: Dialect + Clone = DeckelDialect> {
    config: &'a PostConfig,
    dialect: D,
}

impl<'a> StreamDriver<'a> {
    /// Create a driver for the Deckel dialect
    pub fn new(config: &'a PostConfig) -> Self {
        Self::with_dialect(config, DeckelDialect)
    }
}

impl<'a, D: Dialect + Clone> StreamDriver<'a, D> {
    /// Create a driver for an arbitrary dialect
    pub fn with_dialect(config: &'a PostConfig, dialect: D) -> Self {
        Self { config, dialect }
    }

    /// Translate a command sequence with line numbers starting at 1
    pub fn run(&self, commands: &[Command]) -> Result<TranslatedPath, TranslateError> {
        self.run_continuing(commands, 0)
    }

    /// Translate a command sequence, numbering lines after `last_line_number`
    ///
    /// Output that moves no axis is considered trivial and discarded; the
    /// numbering then does not advance.
    pub fn run_continuing(
        &self,
        commands: &[Command],
        last_line_number: u32,
    ) -> Result<TranslatedPath, TranslateError> {
        let state = MachineState::continuing_from(last_line_number);
        let mut translator =
            CommandTranslator::with_dialect(self.config, self.dialect.clone(), state);
        let mut lines = Vec::new();

        for command in commands {
            lines.extend(translator.translate(command)?);
        }

        let diagnostics = translator.take_diagnostics();
        let state = translator.into_state();

        if !lines.iter().any(OutputLine::has_axis_word) {
            tracing::debug!(
                "Discarding trivial output of {} line(s) from {} command(s)",
                lines.len(),
                commands.len()
            );
            return Ok(TranslatedPath {
                lines: Vec::new(),
                diagnostics,
                last_line_number,
            });
        }

        Ok(TranslatedPath {
            lines,
            diagnostics,
            last_line_number: state.line_counter(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::{linear, rapid};

    #[test]
    fn test_run_concatenates_lines() {
        let config = PostConfig::default();
        let driver = StreamDriver::new(&config);
        let result = driver
            .run(&[
                Command::named("G21"),
                Command::named("M3").with_parameter('S', 1000.0),
                rapid().with_parameter('X', 0.0).with_parameter('Y', 0.0),
                linear().with_parameter('Z', -1.0).with_parameter('F', 2.0),
            ])
            .unwrap();

        assert_eq!(
            result.to_lines(),
            vec!["N0001 G00 X+0 Y+0 S+1000", "N0002 G01 Z-100 F120"]
        );
        assert_eq!(result.last_line_number, 2);
        assert!(result.diagnostics.is_empty());
    }

    #[test]
    fn test_empty_input() {
        let config = PostConfig::default();
        let result = StreamDriver::new(&config).run(&[]).unwrap();
        assert!(result.is_empty());
        assert_eq!(result.to_text(), "");
    }

    #[test]
    fn test_trivial_output_discarded() {
        let config = PostConfig {
            output_zero_points: true,
            ..PostConfig::default()
        };
        let result = StreamDriver::new(&config)
            .run_continuing(&[Command::named("G54"), Command::named("G17")], 5)
            .unwrap();

        assert!(result.is_empty());
        assert_eq!(result.last_line_number, 5);
        assert_eq!(result.diagnostics.len(), 1);
    }

    #[test]
    fn test_numbering_continues() {
        let config = PostConfig::default();
        let result = StreamDriver::new(&config)
            .run_continuing(&[linear().with_parameter('X', 1.0)], 41)
            .unwrap();
        assert_eq!(result.to_lines(), vec!["N0042 G01 X+100"]);
        assert_eq!(result.last_line_number, 42);
    }

    #[test]
    fn test_invalid_feed_propagates() {
        let config = PostConfig::default();
        let result = StreamDriver::new(&config).run(&[
            linear().with_parameter('X', 1.0),
            linear().with_parameter('X', 2.0).with_parameter('F', -3.0),
        ]);
        assert!(matches!(result, Err(TranslateError::InvalidFeed { .. })));
    }
}
