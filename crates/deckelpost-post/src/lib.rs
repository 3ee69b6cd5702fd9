//! # DeckelPost Post-Processor
//!
//! Re-encodes generic tool-path commands into the Deckel FP4A dialect.
//!
//! ## Components
//!
//! - **command** - generic command vocabulary and tool paths
//! - **dialect** - command name to controller mnemonic tables
//! - **format** - fixed-point length, feed and spindle speed encoding
//! - **state** - machine state carried across a run
//! - **translator** - the per-command state machine
//! - **stream** - drives a tool path through the translator
//! - **program** - wraps tool paths into a complete program
//!
//! ```ignore
//! let config = PostConfig::default();
//! let result = StreamDriver::new(&config).run(&commands)?;
//! println!("{}", result.to_text());
//! ```

pub mod command;
pub mod dialect;
pub mod format;
pub mod output;
pub mod program;
pub mod state;
pub mod stream;
pub mod translator;

pub use command::{Command, CommandKind, SpindleDirection, ToolPath, UnitsSelect};
pub use dialect::{DeckelDialect, Dialect};
pub use format::NumericFormatter;
pub use output::{Diagnostic, OutputLine, Word};
pub use program::{PathDiagnostic, Program, ProgramAssembler};
pub use state::MachineState;
pub use stream::{StreamDriver, TranslatedPath};
pub use translator::CommandTranslator;
