//! Core error type.
//!
//! Downstream crates wrap `CoreError` as one variant of their own enum
//! (`#[from]`), so a bad mode string surfaces unchanged at the query API.

use thiserror::Error;

/// Errors produced while interpreting caller-supplied values.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CoreError {
    #[error("unknown travel mode {0:?} (expected distance, car, bus, walk or flight)")]
    UnknownMode(String),

    #[error("invalid speed {kmh} km/h for {setting} (must be a positive, finite number)")]
    InvalidSpeed { setting: &'static str, kmh: f64 },

    #[error("parse error: {0}")]
    Parse(String),
}

/// Shorthand result type for `rg-core`.
pub type CoreResult<T> = Result<T, CoreError>;
