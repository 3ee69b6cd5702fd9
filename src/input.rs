//! Input document
//!
//! The front end reads tool paths as JSON:
//!
//! ```json
//! { "paths": [ { "label": "contour", "commands": [ { "name": "G1", "parameters": { "X": 10.0 } } ] } ] }
//! ```

use deckelpost_core::Result;
use deckelpost_post::ToolPath;
use serde::{Deserialize, Serialize};
use std::io::Read;
use std::path::Path;

/// Tool paths to assemble into one program
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProgramInput {
    /// Tool paths in program order
    #[serde(default)]
    pub paths: Vec<ToolPath>,
}

impl ProgramInput {
    /// Parse a document from a JSON string
    pub fn from_json(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Read a document from a file, or from stdin when the path is `-`
    pub fn load(path: &Path) -> Result<Self> {
        let content = if path == Path::new("-") {
            let mut buffer = String::new();
            std::io::stdin().read_to_string(&mut buffer)?;
            buffer
        } else {
            std::fs::read_to_string(path)?
        };

        let input = Self::from_json(&content)?;
        tracing::debug!(
            "Read {} tool path(s) from {}",
            input.paths.len(),
            path.display()
        );
        Ok(input)
    }

    /// Total number of commands across all paths
    pub fn command_count(&self) -> usize {
        self.paths.iter().map(|path| path.commands.len()).sum()
    }
}
