//! # DeckelPost Core
//!
//! Core types and utilities shared by the DeckelPost crates:
//! the error taxonomy and the unit families the controller can be
//! programmed in.

pub mod error;
pub mod units;

pub use error::{ConfigError, Error, Result, TranslateError};
pub use units::{FeedRateUnits, MeasurementSystem};
