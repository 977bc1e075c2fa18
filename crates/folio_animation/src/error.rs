//! Animation error types

use thiserror::Error;

/// Errors raised when building animation primitives
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnimationError {
    /// A spring parameter is outside its valid range
    #[error("invalid spring config: {field} = {value} ({reason})")]
    InvalidConfig {
        field: &'static str,
        value: f64,
        reason: &'static str,
    },

    /// A frame clock ceiling that can never produce a usable delta
    #[error("invalid frame clock: {field} = {value}")]
    InvalidClock { field: &'static str, value: f64 },

    /// Unknown spring preset name
    #[error("unknown spring preset: {0}")]
    UnknownPreset(String),

    /// Unparseable timing function
    #[error("invalid timing function: {0}")]
    InvalidTiming(String),

    /// Unknown motion preference value
    #[error("unknown motion preference: {0}")]
    UnknownPreference(String),
}

/// Result type for animation operations
pub type Result<T> = std::result::Result<T, AnimationError>;
