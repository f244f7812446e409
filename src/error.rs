//! Error types for u-tspga.
//!
//! Only input and configuration problems surface as errors. Quirks of the
//! heuristic itself (selection exhaustion, unrepaired crossover pairs) are
//! handled where they occur and never propagate.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for u-tspga operations.
pub type TspResult<T> = Result<T, TspError>;

/// Unified error type for all u-tspga operations.
#[derive(Debug, Error)]
pub enum TspError {
    /// The coordinate source could not be opened.
    #[error("cannot open coordinate source {}: {source}", .path.display())]
    UnavailableResource {
        /// Path that failed to open.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The coordinate source is syntactically or semantically invalid.
    ///
    /// `line` is 1-based; 0 means the problem concerns the input as a whole
    /// (e.g. too few cities).
    #[error("malformed input (line {line}): {reason}")]
    MalformedInput {
        /// Line where the problem was detected.
        line: usize,
        /// Human-readable description.
        reason: String,
    },

    /// Reading an already opened source failed.
    #[error("failed to read coordinate source: {0}")]
    Read(#[from] io::Error),

    /// Rejected configuration parameter.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A sequence that is not a permutation of `0..n` was offered as a tour.
    #[error("invalid tour: {0}")]
    InvalidTour(String),
}

impl TspError {
    pub(crate) fn malformed(line: usize, reason: impl Into<String>) -> Self {
        TspError::MalformedInput {
            line,
            reason: reason.into(),
        }
    }
}
