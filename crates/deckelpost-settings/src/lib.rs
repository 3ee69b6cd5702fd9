//! DeckelPost Settings Crate
//!
//! Handles post-processor configuration and its persistence.

pub mod config;

pub use config::{FeedRateUnits, MeasurementSystem, PostConfig, SpindlePolicy, ToolWordPolicy};
