// src/error.rs

use thiserror::Error;

/// Structural contract violation in an upstream moment record.
///
/// Per-event ambiguity (no qualifying type code, no moments, no determinable
/// direction, no confident role inference) is handled by silently dropping
/// the event or returning `None`; this error is reserved for input that would
/// otherwise produce wrong geometry, such as a turnover event whose primary
/// player never appears in the tracking data.
#[derive(Debug, Clone, Error)]
#[error("malformed moment at frame {frame}: {reason}")]
pub struct MalformedMomentError {
    pub frame: usize,
    pub reason: String,
}

impl MalformedMomentError {
    pub fn new(frame: usize, reason: impl Into<String>) -> Self {
        Self {
            frame,
            reason: reason.into(),
        }
    }
}
