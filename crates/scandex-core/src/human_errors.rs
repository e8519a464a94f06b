// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Human-readable error messages for the presentation layer.
//
// Operations return typed failures; whatever UI sits on top maps them to
// plain English here instead of raising ad-hoc pop-up dialogs.

use crate::error::{ExtractionFailure, ScandexError};

/// Severity of an error from the user's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Network blip, timeout — retrying the same action may succeed.
    Transient,
    /// User must do something (fill a field, retake the photo).
    ActionRequired,
    /// Cannot be fixed by retrying — the operation itself is invalid.
    Permanent,
    /// Informational only; the operation actually succeeded.
    Notice,
}

/// A plain-English error with an actionable suggestion.
#[derive(Debug, Clone)]
pub struct HumanError {
    /// Plain English summary (shown as a heading).
    pub message: String,
    /// What the user should try (shown as body text).
    pub suggestion: String,
    /// Whether re-invoking the same operation makes sense.
    pub retriable: bool,
    pub severity: Severity,
}

/// Convert a `ScandexError` into something a non-technical user can act on.
pub fn humanize_error(err: &ScandexError) -> HumanError {
    match err {
        ScandexError::Validation(detail) => HumanError {
            message: "Some required information is missing.".into(),
            suggestion: format!("Please fill in the highlighted field and save again. ({detail})"),
            retriable: false,
            severity: Severity::ActionRequired,
        },

        ScandexError::StoreUnavailable(_) => HumanError {
            message: "We couldn't reach the record service.".into(),
            suggestion: "Check your internet connection, then try again.".into(),
            retriable: true,
            severity: Severity::Transient,
        },

        ScandexError::NotFound(id) => HumanError {
            message: "That record no longer exists.".into(),
            suggestion: format!("Record {id} may have been deleted on another device."),
            retriable: false,
            severity: Severity::Permanent,
        },

        ScandexError::Extraction(ExtractionFailure::Unrecognized) => HumanError {
            message: "We couldn't read the document in that photo.".into(),
            suggestion: "Hold the ID flat, fill the frame, and retake the photo.".into(),
            retriable: true,
            severity: Severity::ActionRequired,
        },

        ScandexError::Extraction(_) => HumanError {
            message: "Reading the document is taking too long.".into(),
            suggestion: "Check your connection and try scanning again.".into(),
            retriable: true,
            severity: Severity::Transient,
        },

        ScandexError::CaptureBusy => HumanError {
            message: "Still working on the previous photo.".into(),
            suggestion: "Wait a moment for the current scan to finish.".into(),
            retriable: true,
            severity: Severity::Transient,
        },

        ScandexError::Export(detail) => HumanError {
            message: "The export could not be written.".into(),
            suggestion: format!("Make sure there is storage space available. ({detail})"),
            retriable: true,
            severity: Severity::Transient,
        },

        // The artifact survives a failed share hand-off, so this is a
        // notice, not a failure.
        ScandexError::ShareUnavailable(path) => HumanError {
            message: "Sharing isn't available right now.".into(),
            suggestion: format!("The file was saved at {path}; open it from your file manager."),
            retriable: false,
            severity: Severity::Notice,
        },

        ScandexError::Io(detail) => HumanError {
            message: "A file operation failed.".into(),
            suggestion: format!("Try again. ({detail})"),
            retriable: true,
            severity: Severity::Transient,
        },

        ScandexError::Serialization(detail) => HumanError {
            message: "Some data could not be read.".into(),
            suggestion: format!("Please report this. ({detail})"),
            retriable: false,
            severity: Severity::Permanent,
        },

        ScandexError::Bridge(detail) => HumanError {
            message: "A device feature failed.".into(),
            suggestion: format!("Try again. ({detail})"),
            retriable: true,
            severity: Severity::Transient,
        },

        ScandexError::PlatformUnavailable => HumanError {
            message: "That feature isn't available on this device.".into(),
            suggestion: "Use the photo library instead of the camera.".into(),
            retriable: false,
            severity: Severity::Permanent,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn share_failure_is_a_notice_not_an_error() {
        let human = humanize_error(&ScandexError::ShareUnavailable("/tmp/x.xlsx".into()));
        assert_eq!(human.severity, Severity::Notice);
        assert!(human.suggestion.contains("/tmp/x.xlsx"));
    }

    #[test]
    fn busy_capture_is_retriable() {
        let human = humanize_error(&ScandexError::CaptureBusy);
        assert!(human.retriable);
    }

    #[test]
    fn unrecognized_document_asks_for_retake() {
        let human = humanize_error(&ExtractionFailure::Unrecognized.into());
        assert_eq!(human.severity, Severity::ActionRequired);
    }
}
