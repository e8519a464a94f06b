// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for the Scandex ID scanner.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Result, ScandexError};

/// Identifier assigned to a record by the store on creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RecordId(pub i64);

impl std::fmt::Display for RecordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Which face of the physical document is being captured.
///
/// The capture flow always processes `Front` first, then `Back`; the order
/// is fixed, not user-selectable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    Front,
    Back,
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Front => f.write_str("front"),
            Self::Back => f.write_str("back"),
        }
    }
}

/// Where a captured image came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImageOrigin {
    /// A live frame from the device camera.
    Camera,
    /// An image chosen from the photo library.
    Library,
}

/// Reference to one captured image.
///
/// Both input sources yield the same shape — downstream code never
/// distinguishes a camera frame from a library pick.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapturedImage {
    /// Location of the image (file path or platform content URI).
    pub uri: String,
    pub origin: ImageOrigin,
}

impl CapturedImage {
    pub fn from_camera(uri: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            origin: ImageOrigin::Camera,
        }
    }

    pub fn from_library(uri: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            origin: ImageOrigin::Library,
        }
    }
}

/// One scanned identity document.
///
/// Created in memory as a draft (`id: None`) by the capture flow, reviewed
/// and corrected by the user, then persisted.  Records are immutable once
/// saved — correcting one means deleting and re-creating it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IdRecord {
    /// Store-assigned identifier; `None` until the record is persisted.
    pub id: Option<RecordId>,
    pub name: String,
    pub date_of_birth: String,
    pub id_number: String,
    pub address: String,
    pub issue_date: Option<String>,
    pub expiry_date: Option<String>,
    /// When the document was captured.
    pub scan_date: DateTime<Utc>,
    /// Reference to the captured image, when retained.
    pub image_uri: Option<String>,
    /// Free-form notes added during review.
    pub additional_info: Option<String>,
}

impl IdRecord {
    /// An empty draft stamped with the given capture time.
    pub fn draft(scan_date: DateTime<Utc>) -> Self {
        Self {
            id: None,
            name: String::new(),
            date_of_birth: String::new(),
            id_number: String::new(),
            address: String::new(),
            issue_date: None,
            expiry_date: None,
            scan_date,
            image_uri: None,
            additional_info: None,
        }
    }

    /// Check the persistence invariant: name and ID number must be
    /// non-empty.  All other fields may legitimately be empty.
    pub fn validate_for_create(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(ScandexError::Validation("name is required".into()));
        }
        if self.id_number.trim().is_empty() {
            return Err(ScandexError::Validation("ID number is required".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_draft() -> IdRecord {
        IdRecord {
            name: "John Doe".into(),
            id_number: "ID12345678".into(),
            ..IdRecord::draft(Utc::now())
        }
    }

    #[test]
    fn valid_draft_passes_validation() {
        assert!(valid_draft().validate_for_create().is_ok());
    }

    #[test]
    fn missing_name_fails_validation() {
        let mut draft = valid_draft();
        draft.name = "   ".into();
        let err = draft.validate_for_create().unwrap_err();
        assert!(matches!(err, ScandexError::Validation(_)));
    }

    #[test]
    fn missing_id_number_fails_validation() {
        let mut draft = valid_draft();
        draft.id_number.clear();
        assert!(draft.validate_for_create().is_err());
    }

    #[test]
    fn empty_optional_fields_are_fine() {
        let draft = valid_draft();
        assert!(draft.issue_date.is_none());
        assert!(draft.validate_for_create().is_ok());
    }

    #[test]
    fn image_sources_yield_equivalent_shape() {
        let cam = CapturedImage::from_camera("/tmp/a.jpg");
        let lib = CapturedImage::from_library("/tmp/a.jpg");
        assert_eq!(cam.uri, lib.uri);
        assert_ne!(cam.origin, lib.origin);
    }
}
