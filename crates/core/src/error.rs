//! Error types for the annotext preparation library.

use thiserror::Error;

/// Primary error type for paper preparation operations.
#[derive(Error, Debug)]
pub enum AnnotextError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid paper record: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{kind} span {start}..{end} outside text of length {len}")]
    SpanOutOfBounds {
        kind: &'static str,
        start: usize,
        end: usize,
        len: usize,
    },

    #[error("{kind} span {start}..{end} does not fall on character boundaries")]
    SpanNotOnCharBoundary {
        kind: &'static str,
        start: usize,
        end: usize,
    },

    #[error("{kind} span has start {start} after end {end}")]
    SpanInverted {
        kind: &'static str,
        start: usize,
        end: usize,
    },
}

/// Convenience Result type alias for AnnotextError.
pub type Result<T> = std::result::Result<T, AnnotextError>;
