//! # DeckelPost
//!
//! Post-processor that re-encodes generic tool-path commands into the
//! Deckel FP4A controller dialect.
//!
//! ## Architecture
//!
//! DeckelPost is organized into crates:
//!
//! - **deckelpost-core**: error types and unit conversion
//! - **deckelpost-settings**: post-processor configuration and persistence
//! - **deckelpost-post**: translator, stream driver and program assembler
//!
//! The binary wraps these in a command-line front end.

pub mod cli;
pub mod input;

pub use deckelpost_core::{ConfigError, Error, MeasurementSystem, Result, TranslateError};
pub use deckelpost_post::{
    Command, CommandKind, CommandTranslator, DeckelDialect, Diagnostic, Dialect, MachineState,
    OutputLine, PathDiagnostic, Program, ProgramAssembler, StreamDriver, ToolPath,
    TranslatedPath,
};
pub use deckelpost_settings::{PostConfig, SpindlePolicy, ToolWordPolicy};

pub use cli::Cli;
pub use input::ProgramInput;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize logging
///
/// Sets up structured logging with:
/// - Output on stderr so program text on stdout stays clean
/// - RUST_LOG environment variable support, `info` by default
/// - Optional JSON formatting
pub fn init_logging(json: bool) -> anyhow::Result<()> {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    if json {
        let fmt_layer = fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .json();

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .try_init()?;
    } else {
        let fmt_layer = fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_level(true)
            .with_line_number(true);

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .try_init()?;
    }

    Ok(())
}
