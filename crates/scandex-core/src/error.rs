// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for Scandex.
//
// Every failure is surfaced as a typed outcome from the operation that
// failed — nothing propagates uncaught, and nothing pops a dialog.  The
// presentation layer decides how to display these (see `human_errors`).

use thiserror::Error;

/// Why a single extraction attempt failed.
///
/// The adapter performs exactly one attempt per invocation; retry policy
/// belongs to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ExtractionFailure {
    /// The recognition service could not be reached.
    #[error("extraction service unreachable")]
    Unavailable,

    /// The image did not contain a usable document.
    #[error("no usable document recognised in image")]
    Unrecognized,

    /// The attempt exceeded the configured deadline.
    #[error("extraction timed out")]
    Timeout,
}

/// Top-level error type for all Scandex operations.
#[derive(Debug, Error)]
pub enum ScandexError {
    // -- Record validation / persistence --
    #[error("validation failed: {0}")]
    Validation(String),

    #[error("record store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("record {0} not found")]
    NotFound(i64),

    // -- Capture --
    #[error("extraction failed: {0}")]
    Extraction(#[from] ExtractionFailure),

    #[error("capture already in progress")]
    CaptureBusy,

    // -- Export / share --
    #[error("export failed: {0}")]
    Export(String),

    /// Non-fatal: the exported artifact still exists on disk.
    #[error("share hand-off unavailable: {0}")]
    ShareUnavailable(String),

    // -- Ambient --
    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    // -- Platform bridge --
    #[error("platform bridge error: {0}")]
    Bridge(String),

    #[error("feature not available on this platform")]
    PlatformUnavailable,
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, ScandexError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extraction_failure_converts_to_top_level() {
        let err: ScandexError = ExtractionFailure::Timeout.into();
        assert!(matches!(
            err,
            ScandexError::Extraction(ExtractionFailure::Timeout)
        ));
    }

    #[test]
    fn not_found_names_the_record() {
        let msg = ScandexError::NotFound(42).to_string();
        assert!(msg.contains("42"), "message should name the id: {msg}");
    }
}
