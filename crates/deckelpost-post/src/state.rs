//! Machine state carried across one translation run

use std::collections::BTreeMap;

/// Mutable state threaded through the translation of one tool path
///
/// Tracks what has actually been written, not what was commanded, so that
/// redundant words can be suppressed. A fresh state is created per run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MachineState {
    /// Last emitted formatted value for X, Y, Z and F
    current_axis_values: BTreeMap<char, String>,
    /// Commanded spindle speed, signed by direction
    spindle_speed: i64,
    /// Spindle speed last written to output
    last_emitted_spindle_speed: i64,
    /// Mnemonic of the previous output line
    last_emitted_command: Option<&'static str>,
    /// Last line number handed out
    line_counter: u32,
}

impl MachineState {
    /// Create a new state with nothing emitted
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a state whose next line number follows `last_line`
    pub fn continuing_from(last_line: u32) -> Self {
        Self {
            line_counter: last_line,
            ..Self::default()
        }
    }

    /// Last emitted value for a tracked letter
    pub fn last_value(&self, letter: char) -> Option<&str> {
        self.current_axis_values.get(&letter).map(|s| s.as_str())
    }

    /// Record an emitted value for a tracked letter
    pub fn record_value(&mut self, letter: char, value: impl Into<String>) {
        self.current_axis_values.insert(letter, value.into());
    }

    /// Commanded spindle speed
    pub fn spindle_speed(&self) -> i64 {
        self.spindle_speed
    }

    /// Set the commanded spindle speed
    pub fn set_spindle_speed(&mut self, speed: i64) {
        self.spindle_speed = speed;
    }

    /// Spindle speed last written
    pub fn last_emitted_spindle_speed(&self) -> i64 {
        self.last_emitted_spindle_speed
    }

    /// Record that a spindle word was written
    pub fn record_spindle_emitted(&mut self, speed: i64) {
        self.last_emitted_spindle_speed = speed;
    }

    /// Mnemonic of the previous output line
    pub fn last_emitted_command(&self) -> Option<&'static str> {
        self.last_emitted_command
    }

    /// Record the mnemonic of the line just written
    pub fn record_command(&mut self, mnemonic: &'static str) {
        self.last_emitted_command = Some(mnemonic);
    }

    /// Last line number handed out
    pub fn line_counter(&self) -> u32 {
        self.line_counter
    }

    /// Advance and return the next line number
    pub fn next_line_number(&mut self) -> u32 {
        self.line_counter += 1;
        self.line_counter
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_state() {
        let state = MachineState::new();
        assert_eq!(state.last_value('X'), None);
        assert_eq!(state.spindle_speed(), 0);
        assert_eq!(state.last_emitted_spindle_speed(), 0);
        assert_eq!(state.last_emitted_command(), None);
        assert_eq!(state.line_counter(), 0);
    }

    #[test]
    fn test_line_numbers_are_monotonic() {
        let mut state = MachineState::new();
        assert_eq!(state.next_line_number(), 1);
        assert_eq!(state.next_line_number(), 2);

        let mut continued = MachineState::continuing_from(7);
        assert_eq!(continued.next_line_number(), 8);
    }

    #[test]
    fn test_record_values() {
        let mut state = MachineState::new();
        state.record_value('X', "+1000");
        state.record_command("G01");
        state.set_spindle_speed(-500);
        state.record_spindle_emitted(-500);

        assert_eq!(state.last_value('X'), Some("+1000"));
        assert_eq!(state.last_emitted_command(), Some("G01"));
        assert_eq!(state.spindle_speed(), -500);
        assert_eq!(state.last_emitted_spindle_speed(), -500);
    }
}
