// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Extraction boundary — turns one captured image into structured field
// values.
//
// The adapter is deliberately ignorant of capture sides and sessions: it
// returns whatever it can read, and the orchestrator decides which fields
// to keep for the side being processed.  One call is one attempt; retry
// policy belongs to the caller.

use std::time::Duration;

use async_trait::async_trait;
use scandex_core::error::ExtractionFailure;
use scandex_core::types::CapturedImage;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Partial field set read from a single image.
///
/// Every field is optional — a real recognition backend returns only what
/// it could read with confidence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedFields {
    pub name: Option<String>,
    pub date_of_birth: Option<String>,
    pub id_number: Option<String>,
    pub address: Option<String>,
    pub issue_date: Option<String>,
    pub expiry_date: Option<String>,
}

impl ExtractedFields {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.date_of_birth.is_none()
            && self.id_number.is_none()
            && self.address.is_none()
            && self.issue_date.is_none()
            && self.expiry_date.is_none()
    }
}

/// Pluggable boundary to an external document-recognition capability.
///
/// Implementations must not retry internally and must not assume anything
/// about which document side the image shows.
#[async_trait]
pub trait ExtractionAdapter: Send + Sync {
    /// Read structured fields from one image.  Single attempt.
    async fn extract(
        &self,
        image: &CapturedImage,
    ) -> std::result::Result<ExtractedFields, ExtractionFailure>;
}

/// Reference adapter returning fixed values after a simulated delay.
///
/// Stands in for a real recognition backend so the capture flow can be
/// exercised end to end without one.  The values match the original
/// application's canned output.
pub struct CannedExtractor {
    delay: Duration,
}

impl CannedExtractor {
    /// Simulated processing time matching the original stand-in backend.
    pub const DEFAULT_DELAY: Duration = Duration::from_secs(2);

    pub fn new() -> Self {
        Self {
            delay: Self::DEFAULT_DELAY,
        }
    }

    /// Override the simulated delay (tests use zero).
    pub fn with_delay(delay: Duration) -> Self {
        Self { delay }
    }
}

impl Default for CannedExtractor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ExtractionAdapter for CannedExtractor {
    async fn extract(
        &self,
        image: &CapturedImage,
    ) -> std::result::Result<ExtractedFields, ExtractionFailure> {
        debug!(uri = %image.uri, "canned extraction");
        tokio::time::sleep(self.delay).await;

        Ok(ExtractedFields {
            name: Some("John Doe".into()),
            date_of_birth: Some("1990-01-01".into()),
            id_number: Some("ID12345678".into()),
            address: Some("123 Main St, Anytown, USA".into()),
            issue_date: Some("2020-01-01".into()),
            expiry_date: Some("2025-01-01".into()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn canned_extractor_returns_full_field_set() {
        let adapter = CannedExtractor::with_delay(Duration::ZERO);
        let image = CapturedImage::from_camera("file:///tmp/front.jpg");

        let fields = adapter.extract(&image).await.expect("extraction");
        assert_eq!(fields.name.as_deref(), Some("John Doe"));
        assert_eq!(fields.id_number.as_deref(), Some("ID12345678"));
        assert_eq!(fields.expiry_date.as_deref(), Some("2025-01-01"));
    }

    #[test]
    fn default_fields_are_empty() {
        assert!(ExtractedFields::default().is_empty());
    }
}
