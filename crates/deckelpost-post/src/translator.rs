//! Command translator
//!
//! Consumes one generic command at a time and produces the controller lines
//! for it. Per command, in order:
//!
//! 1. spindle on commands only update the commanded speed
//! 2. unit selects are dropped; work offset selects unless configured
//! 3. rapid moves become linear moves when a rapid feed override is set
//! 4. dialect lookup; unknown commands are dropped with a diagnostic
//! 5. parameter words in fixed letter order, with redundancy suppression
//! 6. spindle word on motion lines (on change or every line)
//! 7. Y and Z in one move are split into a Y line and a Z-only line
//! 8. motion commands without any axis word are dropped
//! 9. modal suppression of a repeated command word
//! 10. machine state commit
//! 11. line numbering
//!
//! State is only committed once the whole command has been translated, so a
//! failing or dropped command never leaves partial updates behind.

use std::borrow::Cow;

use deckelpost_core::units::velocity_to_mm_per_sec;
use deckelpost_core::TranslateError;
use deckelpost_settings::{PostConfig, SpindlePolicy, ToolWordPolicy};

use crate::command::{Command, CommandKind, PARAMETER_ORDER, TRACKED_LETTERS};
use crate::dialect::{DeckelDialect, Dialect};
use crate::format::{encode_spindle_speed, NumericFormatter};
use crate::output::{Diagnostic, OutputLine, Word};
use crate::state::MachineState;

/// Translates generic commands into controller lines
pub struct CommandTranslator<'a, D: Dialect = DeckelDialect> {
    config: &'a PostConfig,
    dialect: D,
    formatter: NumericFormatter,
    state: MachineState,
    diagnostics: Vec<Diagnostic>,
}

impl<'a> CommandTranslator<'a> {
    /// Create a translator for the Deckel dialect with a fresh state
    pub fn new(config: &'a PostConfig) -> Self {
        Self::with_state(config, MachineState::new())
    }

    /// Create a translator for the Deckel dialect resuming `state`
    pub fn with_state(config: &'a PostConfig, state: MachineState) -> Self {
        Self::with_dialect(config, DeckelDialect, state)
    }
}

impl<'a, D: Dialect> CommandTranslator<'a, D> {
    /// Create a translator for an arbitrary dialect
    pub fn with_dialect(config: &'a PostConfig, dialect: D, state: MachineState) -> Self {
        Self {
            config,
            dialect,
            formatter: NumericFormatter::new(config.units),
            state,
            diagnostics: Vec::new(),
        }
    }

    /// Current machine state
    pub fn state(&self) -> &MachineState {
        &self.state
    }

    /// Consume the translator, returning its state
    pub fn into_state(self) -> MachineState {
        self.state
    }

    /// Diagnostics collected so far
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Take the collected diagnostics
    pub fn take_diagnostics(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.diagnostics)
    }

    /// Translate one command into zero or more output lines
    pub fn translate(&mut self, command: &Command) -> Result<Vec<OutputLine>, TranslateError> {
        if let CommandKind::SpindleOn(direction) = command.kind {
            let magnitude = match command.parameter('S') {
                Some(speed) => encode_spindle_speed(speed.abs()),
                None => self.state.spindle_speed().abs(),
            };
            self.state.set_spindle_speed(direction.sign() * magnitude);
            tracing::trace!("Spindle speed now {}", self.state.spindle_speed());
            return Ok(Vec::new());
        }

        match command.kind {
            CommandKind::Units(_) => {
                tracing::debug!("Units fixed by configuration, dropping {}", command.kind);
                return Ok(Vec::new());
            }
            CommandKind::WorkOffset if !self.config.output_zero_points => {
                tracing::debug!("Zero point output disabled, dropping {}", command.kind);
                return Ok(Vec::new());
            }
            _ => {}
        }

        let command = self.effective_command(command);

        let Some(mnemonic) = self.dialect.translate(&command.kind) else {
            tracing::warn!("Unrecognized command {}, skipping", command.kind);
            self.diagnostics.push(Diagnostic::UnrecognizedCommand {
                name: command.kind.name().to_string(),
            });
            return Ok(Vec::new());
        };

        for letter in command.unsupported_letters() {
            tracing::warn!("Parameter {} on {} ignored", letter, command.kind);
            self.diagnostics.push(Diagnostic::UnsupportedParameter {
                command: command.kind.name().to_string(),
                letter,
            });
        }

        let mut words = Vec::new();
        let mut spindle_speed = self.state.spindle_speed();

        for letter in PARAMETER_ORDER {
            let Some(value) = command.parameter(letter) else {
                continue;
            };

            match letter {
                'F' => {
                    let feed = self.formatter.format_feed(value)?;
                    if command.kind.is_rapid() {
                        continue;
                    }
                    let Some(feed) = feed else {
                        continue;
                    };
                    if self.config.modal && self.state.last_value('F') == Some(feed.as_str()) {
                        continue;
                    }
                    words.push(Word::new('F', feed));
                }
                'S' => {
                    let magnitude = encode_spindle_speed(value.abs());
                    spindle_speed = if spindle_speed < 0 {
                        -magnitude
                    } else {
                        magnitude
                    };
                }
                'T' | 'H' | 'D' => {
                    if let Some(word) = self.tool_word(letter, value) {
                        words.push(word);
                    }
                }
                'X' | 'Y' | 'Z' => {
                    let encoded = self.formatter.format_length(letter, value)?;
                    if self.config.axis_modal
                        && self.state.last_value(letter) == Some(encoded.as_str())
                    {
                        continue;
                    }
                    words.push(Word::new(letter, encoded));
                }
                _ => {
                    let encoded = self.formatter.format_length(letter, value)?;
                    words.push(Word::new(letter, encoded));
                }
            }
        }

        let mut spindle_emitted = false;
        if self.dialect.is_motion_mnemonic(mnemonic) {
            let emit = match self.config.spindle_policy {
                SpindlePolicy::OnChange => spindle_speed != self.state.last_emitted_spindle_speed(),
                SpindlePolicy::EveryLine => true,
            };
            if emit {
                let speed = self.formatter.format_spindle_speed(spindle_speed as f64);
                words.push(Word::new('S', speed));
                spindle_emitted = true;
            }
        }

        let mut lines = split_interlocked(mnemonic, words);

        if command.kind.is_motion() && !lines.iter().any(OutputLine::has_axis_word) {
            tracing::debug!("Dropping {} without axis movement", command.kind);
            self.state.set_spindle_speed(spindle_speed);
            return Ok(Vec::new());
        }

        if self.config.modal && self.state.last_emitted_command() == Some(mnemonic) {
            lines[0].command = None;
        }
        lines.retain(|line| line.command.is_some() || !line.words.is_empty());

        if let Some(line) = lines.iter().find(|line| line.violates_interlock()) {
            tracing::error!("Y and Z words in one block: {}", line);
            return Err(TranslateError::InterlockViolation {
                line: line.to_string(),
            });
        }

        for word in lines.iter().flat_map(|line| &line.words) {
            if TRACKED_LETTERS.contains(&word.letter) {
                self.state.record_value(word.letter, word.value.clone());
            }
        }
        if spindle_emitted {
            self.state.record_spindle_emitted(spindle_speed);
        }
        self.state.set_spindle_speed(spindle_speed);
        self.state.record_command(mnemonic);

        if self.config.output_line_numbers {
            for line in &mut lines {
                line.number = Some(self.state.next_line_number());
            }
        }

        for line in &lines {
            tracing::trace!("{}", line);
        }

        Ok(lines)
    }

    /// The command as it will be translated
    ///
    /// With a rapid feed override, rapid moves become linear moves carrying
    /// the forced feed. The caller's command is never modified.
    fn effective_command<'c>(&self, command: &'c Command) -> Cow<'c, Command> {
        match self.config.rapid_feed_override {
            Some(feed) if feed > 0.0 && command.kind.is_rapid() => {
                let mut effective = command.clone();
                effective.kind = CommandKind::Linear;
                effective.parameters.insert(
                    'F',
                    velocity_to_mm_per_sec(feed, self.formatter.feed_units()),
                );
                Cow::Owned(effective)
            }
            _ => Cow::Borrowed(command),
        }
    }

    fn tool_word(&mut self, letter: char, value: f64) -> Option<Word> {
        match self.config.tool_words {
            ToolWordPolicy::Emit => {
                if letter == 'H' && !self.config.use_tool_length_offset {
                    tracing::debug!("Tool length offset disabled, dropping H{}", value);
                    return None;
                }
                Some(Word::new(letter, (value.trunc() as i64).to_string()))
            }
            ToolWordPolicy::Warn => {
                tracing::warn!("{} word {} not supported inline, dropped", letter, value);
                self.diagnostics
                    .push(Diagnostic::ToolWordDropped { letter, value });
                None
            }
        }
    }
}

/// Build the line(s) for one command, moving Z to its own block when Y is present
fn split_interlocked(mnemonic: &'static str, words: Vec<Word>) -> Vec<OutputLine> {
    let has_y = words.iter().any(|w| w.letter == 'Y');
    let has_z = words.iter().any(|w| w.letter == 'Z');

    if !(has_y && has_z) {
        return vec![OutputLine::new(Some(mnemonic), words)];
    }

    let (z_words, rest): (Vec<Word>, Vec<Word>) =
        words.into_iter().partition(|w| w.letter == 'Z');
    vec![
        OutputLine::new(Some(mnemonic), rest),
        OutputLine::new(Some(mnemonic), z_words),
    ]
}
