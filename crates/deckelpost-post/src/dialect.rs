//! Controller dialect tables
//!
//! A dialect maps generic command kinds to the mnemonics a controller
//! accepts. Supporting another controller means supplying another table,
//! the translator itself stays unchanged.

use crate::command::CommandKind;

/// Mnemonic prefix shared by the motion commands (G00..G03)
pub const MOTION_PREFIX: &str = "G0";

/// Trait for controller dialect tables
pub trait Dialect {
    /// Controller mnemonic for a generic command, `None` if unsupported
    fn translate(&self, kind: &CommandKind) -> Option<&'static str>;

    /// Whether a mnemonic is a motion command
    fn is_motion_mnemonic(&self, mnemonic: &str) -> bool {
        mnemonic.starts_with(MOTION_PREFIX)
    }
}

/// Dialect of the Deckel FP4A (Dialog 4) controller
#[derive(Debug, Clone, Copy, Default)]
pub struct DeckelDialect;

impl Dialect for DeckelDialect {
    fn translate(&self, kind: &CommandKind) -> Option<&'static str> {
        match kind {
            CommandKind::Rapid => Some("G00"),
            CommandKind::Linear => Some("G01"),
            CommandKind::ArcCw => Some("G02"),
            CommandKind::ArcCcw => Some("G03"),
            CommandKind::WorkOffset => Some("G54"),
            CommandKind::SpindleOn(_) | CommandKind::Units(_) | CommandKind::Other(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_motion_mnemonics() {
        let dialect = DeckelDialect;
        assert_eq!(dialect.translate(&CommandKind::Rapid), Some("G00"));
        assert_eq!(dialect.translate(&CommandKind::Linear), Some("G01"));
        assert_eq!(dialect.translate(&CommandKind::ArcCw), Some("G02"));
        assert_eq!(dialect.translate(&CommandKind::ArcCcw), Some("G03"));
        assert_eq!(dialect.translate(&CommandKind::WorkOffset), Some("G54"));
    }

    #[test]
    fn test_unknown_names_unmapped() {
        let dialect = DeckelDialect;
        assert_eq!(dialect.translate(&CommandKind::parse("G18")), None);
        assert_eq!(dialect.translate(&CommandKind::parse("M6")), None);
        assert_eq!(dialect.translate(&CommandKind::parse("G55")), None);
    }

    #[test]
    fn test_motion_prefix() {
        let dialect = DeckelDialect;
        assert!(dialect.is_motion_mnemonic("G00"));
        assert!(dialect.is_motion_mnemonic("G03"));
        assert!(!dialect.is_motion_mnemonic("G54"));
    }
}
