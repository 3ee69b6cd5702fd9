//! Output lines and diagnostics

use std::fmt;

use crate::command::AXIS_LETTERS;

/// One parameter word on an output line, e.g. `X+1000`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Word {
    /// Parameter letter
    pub letter: char,
    /// Encoded value
    pub value: String,
}

impl Word {
    /// Create a word
    pub fn new(letter: char, value: impl Into<String>) -> Self {
        Self {
            letter,
            value: value.into(),
        }
    }

    /// X, Y or Z word
    pub fn is_axis(&self) -> bool {
        AXIS_LETTERS.contains(&self.letter)
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.letter, self.value)
    }
}

/// Format a line number token
pub fn line_number_token(number: u32) -> String {
    format!("N{:04}", number)
}

/// One assembled output line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputLine {
    /// Line number, when numbering is enabled
    pub number: Option<u32>,
    /// Command mnemonic, omitted under modal suppression
    pub command: Option<&'static str>,
    /// Parameter words in output order
    pub words: Vec<Word>,
}

impl OutputLine {
    /// Create an unnumbered line
    pub fn new(command: Option<&'static str>, words: Vec<Word>) -> Self {
        Self {
            number: None,
            command,
            words,
        }
    }

    /// Whether the line carries a word for `letter`
    pub fn has_word(&self, letter: char) -> bool {
        self.words.iter().any(|w| w.letter == letter)
    }

    /// Whether the line moves any axis
    pub fn has_axis_word(&self) -> bool {
        self.words.iter().any(Word::is_axis)
    }

    /// Y and Z commanded in the same block
    pub fn violates_interlock(&self) -> bool {
        self.has_word('Y') && self.has_word('Z')
    }
}

impl fmt::Display for OutputLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut tokens = Vec::with_capacity(self.words.len() + 2);
        if let Some(number) = self.number {
            tokens.push(line_number_token(number));
        }
        if let Some(command) = self.command {
            tokens.push(command.to_string());
        }
        tokens.extend(self.words.iter().map(Word::to_string));
        f.write_str(&tokens.join(" "))
    }
}

/// Non-fatal condition reported during translation
#[derive(Debug, Clone, PartialEq)]
pub enum Diagnostic {
    /// The dialect has no mnemonic for this command; it was dropped
    UnrecognizedCommand {
        /// Generic command name
        name: String,
    },
    /// A T/H/D word was not written
    ToolWordDropped {
        /// Parameter letter
        letter: char,
        /// Commanded value
        value: f64,
    },
    /// A parameter letter has no place in the output format; it was ignored
    UnsupportedParameter {
        /// Generic command name
        command: String,
        /// Parameter letter
        letter: char,
    },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnrecognizedCommand { name } => {
                write!(f, "Unrecognized command {}, skipping", name)
            }
            Self::ToolWordDropped { letter, value } => {
                write!(f, "{} word {} not supported inline, dropped", letter, value)
            }
            Self::UnsupportedParameter { command, letter } => {
                write!(f, "Parameter {} on {} ignored", letter, command)
            }
        }
    }
}
