//! Located diagnostic type shared by every compilation stage.

use crate::range::Range;

/// A single located error message.
///
/// Every stage of the compiler (parse, resolve, reduce) reports failures as
/// values of this type; errors are never thrown across the public boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileError {
    /// Human-readable, self-describing message.
    pub message: String,
    /// Source location, or [`Range::zero`] for environment-level errors.
    pub range: Range,
}

impl CompileError {
    pub fn new(message: impl Into<String>, range: Range) -> Self {
        Self {
            message: message.into(),
            range,
        }
    }

    /// An error with no source position (unknown script id, circular
    /// dependency, locktime mismatch).
    pub fn unlocated(message: impl Into<String>) -> Self {
        Self::new(message, Range::zero())
    }
}

impl std::fmt::Display for CompileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.range.is_zero() {
            write!(f, "{}", self.message)
        } else {
            write!(f, "{} at {}", self.message, self.range)
        }
    }
}

impl std::error::Error for CompileError {}
