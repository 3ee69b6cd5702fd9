//! Program assembly
//!
//! Wraps the translated tool paths with the controller's preamble, the
//! line-numbered post-operation block and the postamble.

use deckelpost_core::TranslateError;
use deckelpost_settings::PostConfig;

use crate::command::ToolPath;
use crate::output::{line_number_token, Diagnostic};
use crate::stream::StreamDriver;

/// A diagnostic tagged with the tool path it came from
#[derive(Debug, Clone, PartialEq)]
pub struct PathDiagnostic {
    /// Tool path label
    pub path: String,
    /// The diagnostic
    pub diagnostic: Diagnostic,
}

/// A complete controller program
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Program {
    /// Program lines, including preamble and postamble
    pub lines: Vec<String>,
    /// Diagnostics from every tool path
    pub diagnostics: Vec<PathDiagnostic>,
    /// Number of tool paths that produced output
    pub emitted_paths: usize,
}

impl Program {
    /// Program text joined with newlines
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }
}

/// Assembles complete programs from tool paths
pub struct ProgramAssembler<'a> {
    config: &'a PostConfig,
}

impl<'a> ProgramAssembler<'a> {
    /// Create an assembler
    pub fn new(config: &'a PostConfig) -> Self {
        Self { config }
    }

    /// Translate every tool path and wrap the result
    pub fn assemble(&self, paths: &[ToolPath]) -> Result<Program, TranslateError> {
        let driver = StreamDriver::new(self.config);
        let mut program = Program::default();
        let mut last_line_number = 0;

        program
            .lines
            .extend(self.config.preamble.lines().map(str::to_string));

        for path in paths {
            let span = tracing::info_span!("tool_path", label = %path.label);
            let _guard = span.enter();

            let translated = driver.run_continuing(&path.commands, last_line_number)?;
            program
                .diagnostics
                .extend(translated.diagnostics.iter().cloned().map(|diagnostic| {
                    PathDiagnostic {
                        path: path.label.clone(),
                        diagnostic,
                    }
                }));

            if translated.is_empty() {
                tracing::debug!("No output for tool path");
                continue;
            }

            tracing::info!("Translated {} line(s)", translated.lines.len());
            last_line_number = translated.last_line_number;
            program.lines.extend(translated.to_lines());
            program.emitted_paths += 1;
        }

        for op in self.config.post_operation.lines() {
            let op = op.trim();
            if op.is_empty() {
                continue;
            }
            if self.config.output_line_numbers {
                last_line_number += 1;
                program
                    .lines
                    .push(format!("{} {}", line_number_token(last_line_number), op));
            } else {
                program.lines.push(op.to_string());
            }
        }

        program
            .lines
            .extend(self.config.postamble.lines().map(str::to_string));

        Ok(program)
    }
}
