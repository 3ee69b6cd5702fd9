//! Generic tool-path command types
//!
//! Commands arrive from the tool-path model as a symbolic name plus a map
//! from parameter letter to value. Lengths are in millimetres and feeds in
//! millimetres per second.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;

/// Parameter letters in the order they are written on an output line
pub const PARAMETER_ORDER: [char; 14] = [
    'X', 'Y', 'Z', 'I', 'J', 'F', 'S', 'T', 'H', 'D', 'R', 'L', 'P', 'Q',
];

/// Letters tracked for redundancy suppression
pub const TRACKED_LETTERS: [char; 4] = ['X', 'Y', 'Z', 'F'];

/// Letters that move an axis
pub const AXIS_LETTERS: [char; 3] = ['X', 'Y', 'Z'];

/// Unit family selected by a units command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitsSelect {
    /// G20
    Inches,
    /// G21
    Millimetres,
}

/// Spindle rotation direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpindleDirection {
    /// M3
    Clockwise,
    /// M4
    CounterClockwise,
}

impl SpindleDirection {
    /// Sign applied to the spindle speed
    pub fn sign(self) -> i64 {
        match self {
            Self::Clockwise => 1,
            Self::CounterClockwise => -1,
        }
    }
}

/// Generic command kind
///
/// Closed vocabulary of the commands the post-processor understands.
/// Anything else is kept verbatim in `Other` so it can be reported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandKind {
    /// Rapid positioning (G0)
    Rapid,
    /// Linear interpolation (G1)
    Linear,
    /// Clockwise arc (G2)
    ArcCw,
    /// Counter-clockwise arc (G3)
    ArcCcw,
    /// Spindle on (M3/M4)
    SpindleOn(SpindleDirection),
    /// Units select (G20/G21)
    Units(UnitsSelect),
    /// Work coordinate system select (G54)
    WorkOffset,
    /// Anything not listed above
    Other(String),
}

impl CommandKind {
    /// Parse a generic command name
    pub fn parse(name: &str) -> Self {
        match name.trim().to_ascii_uppercase().as_str() {
            "G0" | "G00" => Self::Rapid,
            "G1" | "G01" => Self::Linear,
            "G2" | "G02" => Self::ArcCw,
            "G3" | "G03" => Self::ArcCcw,
            "M3" | "M03" => Self::SpindleOn(SpindleDirection::Clockwise),
            "M4" | "M04" => Self::SpindleOn(SpindleDirection::CounterClockwise),
            "G20" => Self::Units(UnitsSelect::Inches),
            "G21" => Self::Units(UnitsSelect::Millimetres),
            "G54" => Self::WorkOffset,
            _ => Self::Other(name.to_string()),
        }
    }

    /// Canonical generic name
    pub fn name(&self) -> &str {
        match self {
            Self::Rapid => "G0",
            Self::Linear => "G1",
            Self::ArcCw => "G2",
            Self::ArcCcw => "G3",
            Self::SpindleOn(SpindleDirection::Clockwise) => "M3",
            Self::SpindleOn(SpindleDirection::CounterClockwise) => "M4",
            Self::Units(UnitsSelect::Inches) => "G20",
            Self::Units(UnitsSelect::Millimetres) => "G21",
            Self::WorkOffset => "G54",
            Self::Other(name) => name.as_str(),
        }
    }

    /// Rapid, linear or arc move
    pub fn is_motion(&self) -> bool {
        matches!(self, Self::Rapid | Self::Linear | Self::ArcCw | Self::ArcCcw)
    }

    /// Rapid move (feed is meaningless)
    pub fn is_rapid(&self) -> bool {
        matches!(self, Self::Rapid)
    }
}

impl fmt::Display for CommandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for CommandKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for CommandKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Ok(Self::parse(&name))
    }
}

/// One generic instruction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Command {
    /// Command kind, serialized as its generic name
    #[serde(rename = "name")]
    pub kind: CommandKind,
    /// Parameter letter to value
    #[serde(default)]
    pub parameters: BTreeMap<char, f64>,
}

impl Command {
    /// Create a command without parameters
    pub fn new(kind: CommandKind) -> Self {
        Self {
            kind,
            parameters: BTreeMap::new(),
        }
    }

    /// Create a command from its generic name
    pub fn named(name: &str) -> Self {
        Self::new(CommandKind::parse(name))
    }

    /// Add a parameter
    pub fn with_parameter(mut self, letter: char, value: f64) -> Self {
        self.parameters.insert(letter.to_ascii_uppercase(), value);
        self
    }

    /// Parameter value for a letter
    pub fn parameter(&self, letter: char) -> Option<f64> {
        self.parameters.get(&letter).copied()
    }

    /// Letters present that the output format has no slot for
    pub fn unsupported_letters(&self) -> impl Iterator<Item = char> + '_ {
        self.parameters
            .keys()
            .copied()
            .filter(|letter| !PARAMETER_ORDER.contains(letter))
    }
}

/// Rapid move shorthand
pub fn rapid() -> Command {
    Command::new(CommandKind::Rapid)
}

/// Linear move shorthand
pub fn linear() -> Command {
    Command::new(CommandKind::Linear)
}

/// An ordered command sequence for one tool path
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ToolPath {
    /// Label used in logs
    #[serde(default)]
    pub label: String,
    /// Commands in execution order
    pub commands: Vec<Command>,
}

impl ToolPath {
    /// Create a labelled tool path
    pub fn new(label: impl Into<String>, commands: Vec<Command>) -> Self {
        Self {
            label: label.into(),
            commands,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_names() {
        assert_eq!(CommandKind::parse("G0"), CommandKind::Rapid);
        assert_eq!(CommandKind::parse("G00"), CommandKind::Rapid);
        assert_eq!(CommandKind::parse("g1"), CommandKind::Linear);
        assert_eq!(
            CommandKind::parse("M4"),
            CommandKind::SpindleOn(SpindleDirection::CounterClockwise)
        );
        assert_eq!(
            CommandKind::parse("G21"),
            CommandKind::Units(UnitsSelect::Millimetres)
        );
        assert_eq!(
            CommandKind::parse("G18"),
            CommandKind::Other("G18".to_string())
        );
    }

    #[test]
    fn test_motion_classification() {
        assert!(CommandKind::Rapid.is_motion());
        assert!(CommandKind::ArcCcw.is_motion());
        assert!(!CommandKind::WorkOffset.is_motion());
        assert!(CommandKind::Rapid.is_rapid());
        assert!(!CommandKind::Linear.is_rapid());
    }

    #[test]
    fn test_builder_uppercases_letters() {
        let cmd = linear().with_parameter('x', 1.0).with_parameter('F', 5.0);
        assert_eq!(cmd.parameter('X'), Some(1.0));
        assert_eq!(cmd.parameter('F'), Some(5.0));
        assert_eq!(cmd.parameter('Y'), None);
    }

    #[test]
    fn test_unsupported_letters() {
        let cmd = linear().with_parameter('X', 1.0).with_parameter('A', 90.0);
        assert_eq!(cmd.unsupported_letters().collect::<Vec<_>>(), vec!['A']);
    }

    #[test]
    fn test_json_shape() {
        let json = r#"{"name": "G1", "parameters": {"X": 10.0, "F": 5.0}}"#;
        let cmd: Command = serde_json::from_str(json).unwrap();
        assert_eq!(cmd.kind, CommandKind::Linear);
        assert_eq!(cmd.parameter('X'), Some(10.0));

        let unknown: Command = serde_json::from_str(r#"{"name": "M6"}"#).unwrap();
        assert_eq!(unknown.kind, CommandKind::Other("M6".to_string()));
        assert!(unknown.parameters.is_empty());
    }
}
