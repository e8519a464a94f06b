// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Capture orchestration — the front-then-back state machine.
//
// A session accepts exactly one image at a time, runs extraction for it,
// and merges the result according to the side being processed.  Modeling
// this as an explicit state machine (instead of a "front side?" boolean)
// makes the illegal sequences unrepresentable: back before front, and a
// second submission while extraction is pending.
//
// State transitions:
//
//   Idle(front) --image--> Extracting --ok--> SideComplete(front)
//   SideComplete(front) --begin_back_side--> Idle(back)
//   Idle(back)  --image--> Extracting --ok--> Finished (draft record out)
//   Extracting  --err--> Failed --retry--> Idle (same side)
//   any         --cancel--> Cancelled (terminal, session discarded)

use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::{DateTime, Utc};
use scandex_core::config::DEFAULT_EXTRACTION_TIMEOUT_SECS;
use scandex_core::error::{ExtractionFailure, Result, ScandexError};
use scandex_core::types::{CapturedImage, IdRecord, Side};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::extract::{ExtractedFields, ExtractionAdapter};

/// Where a capture session currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureState {
    /// Ready to accept an image for the current side.
    Idle,
    /// An image is with the extraction adapter; no further input accepted.
    Extracting,
    /// The current side finished; waiting for the caller to acknowledge.
    SideComplete,
    /// Both sides done; the draft record has been handed out.
    Finished,
    /// Extraction failed; `retry` returns to `Idle` for the same side.
    Failed,
    /// Terminal: the user cancelled, everything accumulated is gone.
    Cancelled,
}

/// What a successful submission produced.
#[derive(Debug, Clone, PartialEq)]
pub enum CaptureProgress {
    /// Front side done — the caller should now capture the back side.
    FrontComplete,
    /// Both sides done — the merged draft is ready for user review.
    Complete(IdRecord),
}

/// Transient per-session state.  Never persisted.
struct SessionInner {
    side: Side,
    state: CaptureState,
    /// Fields accumulated from completed sides.
    fields: ExtractedFields,
    /// Capture time of the front image, stamped on the draft.
    scan_date: Option<DateTime<Utc>>,
    /// Reference to the front image, kept on the draft.
    image_uri: Option<String>,
    /// The image currently with the adapter (or the one that just failed).
    in_flight: Option<CapturedImage>,
}

impl SessionInner {
    fn new() -> Self {
        Self {
            side: Side::Front,
            state: CaptureState::Idle,
            fields: ExtractedFields::default(),
            scan_date: None,
            image_uri: None,
            in_flight: None,
        }
    }
}

/// Drives one two-sided capture of a physical document.
///
/// The orchestrator owns the session exclusively; callers interact only
/// through the methods below and observe progress via [`CaptureState`].
/// The front side is always processed first — the policy is fixed.
pub struct CaptureOrchestrator {
    adapter: Arc<dyn ExtractionAdapter>,
    extraction_timeout: Duration,
    /// Correlation id for log lines belonging to this session.
    session_id: Uuid,
    // Guards transient state only; never held across an await point.
    inner: Mutex<SessionInner>,
}

impl CaptureOrchestrator {
    /// Start a fresh session with the given adapter and the default
    /// extraction deadline.
    pub fn new(adapter: Arc<dyn ExtractionAdapter>) -> Self {
        Self::with_timeout(adapter, Duration::from_secs(DEFAULT_EXTRACTION_TIMEOUT_SECS))
    }

    /// Start a fresh session with an explicit extraction deadline.
    pub fn with_timeout(adapter: Arc<dyn ExtractionAdapter>, extraction_timeout: Duration) -> Self {
        Self {
            adapter,
            extraction_timeout,
            session_id: Uuid::new_v4(),
            inner: Mutex::new(SessionInner::new()),
        }
    }

    /// Current state, for the presentation layer.
    pub fn state(&self) -> CaptureState {
        self.lock().state
    }

    /// Side the session is currently working on.
    pub fn side(&self) -> Side {
        self.lock().side
    }

    /// Fields accumulated from completed sides (preview for the UI).
    pub fn accumulated(&self) -> ExtractedFields {
        self.lock().fields.clone()
    }

    /// The image currently being extracted, or the one whose extraction
    /// just failed (shown behind the retake prompt).
    pub fn last_image(&self) -> Option<CapturedImage> {
        self.lock().in_flight.clone()
    }

    /// Submit one acquired image (camera frame or library pick) for the
    /// current side and run extraction on it.
    ///
    /// Accepted only in `Idle`; any other state yields
    /// [`ScandexError::CaptureBusy`] without touching accumulated fields —
    /// at most one capture is in flight per session.
    ///
    /// # Errors
    ///
    /// [`ScandexError::Extraction`] when the adapter fails or exceeds the
    /// deadline; the session moves to `Failed` and keeps the fields from
    /// any side already completed.
    #[instrument(skip_all, fields(session = %self.session_id, uri = %image.uri))]
    pub async fn submit_image(&self, image: CapturedImage) -> Result<CaptureProgress> {
        let side = self.accept(&image)?;
        info!(%side, origin = ?image.origin, "extraction started");

        let outcome = match tokio::time::timeout(
            self.extraction_timeout,
            self.adapter.extract(&image),
        )
        .await
        {
            Ok(result) => result,
            Err(_elapsed) => Err(ExtractionFailure::Timeout),
        };

        match outcome {
            Ok(extracted) => self.complete_side(side, &image, extracted),
            Err(failure) => {
                self.fail_side(side, failure);
                Err(failure.into())
            }
        }
    }

    /// Acknowledge the front-side completion signal and ready the session
    /// for the back-side image.
    pub fn begin_back_side(&self) -> Result<()> {
        let mut inner = self.lock();
        if inner.state != CaptureState::SideComplete || inner.side != Side::Front {
            return Err(ScandexError::CaptureBusy);
        }
        inner.side = Side::Back;
        inner.state = CaptureState::Idle;
        inner.in_flight = None;
        info!(session = %self.session_id, "ready for back side");
        Ok(())
    }

    /// Recover from a failed extraction: discard only the failed side's
    /// image and accept a new one.  Fields from completed sides survive.
    pub fn retry(&self) -> Result<()> {
        let mut inner = self.lock();
        if inner.state != CaptureState::Failed {
            return Err(ScandexError::CaptureBusy);
        }
        inner.in_flight = None;
        inner.state = CaptureState::Idle;
        info!(session = %self.session_id, side = %inner.side, "retrying side after failure");
        Ok(())
    }

    /// Cancel the session from any state.  Terminal: everything
    /// accumulated is discarded and no partial record is produced.  The
    /// caller's camera lease is released by dropping it with the capture
    /// scope.
    pub fn cancel(&self) {
        let mut inner = self.lock();
        *inner = SessionInner::new();
        inner.state = CaptureState::Cancelled;
        info!(session = %self.session_id, "capture session cancelled");
    }

    // -- Internal phases ----------------------------------------------------

    /// Phase 1: claim the session for one extraction.  Rejects anything
    /// that is not a plain `Idle` session.
    fn accept(&self, image: &CapturedImage) -> Result<Side> {
        let mut inner = self.lock();
        if inner.state != CaptureState::Idle {
            warn!(session = %self.session_id, state = ?inner.state, "image rejected: session busy");
            return Err(ScandexError::CaptureBusy);
        }
        inner.state = CaptureState::Extracting;
        inner.in_flight = Some(image.clone());
        if inner.side == Side::Front {
            // Scan timestamp is the capture time, not the save time.
            inner.scan_date = Some(Utc::now());
        }
        Ok(inner.side)
    }

    /// Phase 2 (success): merge side-appropriate fields and advance.
    fn complete_side(
        &self,
        side: Side,
        image: &CapturedImage,
        extracted: ExtractedFields,
    ) -> Result<CaptureProgress> {
        let mut inner = self.lock();
        if inner.state != CaptureState::Extracting {
            // Cancelled while the adapter was running; the result is void.
            return Err(ScandexError::CaptureBusy);
        }

        match side {
            Side::Front => {
                inner.fields.name = extracted.name;
                inner.fields.date_of_birth = extracted.date_of_birth;
                inner.fields.id_number = extracted.id_number;
                inner.fields.address = extracted.address;
                inner.image_uri = Some(image.uri.clone());
                inner.state = CaptureState::SideComplete;
                inner.in_flight = None;
                info!(session = %self.session_id, "front side complete");
                Ok(CaptureProgress::FrontComplete)
            }
            Side::Back => {
                // Back side contributes issue/expiry only and never
                // overwrites what the front side established.
                inner.fields.issue_date = extracted.issue_date;
                inner.fields.expiry_date = extracted.expiry_date;
                inner.state = CaptureState::Finished;
                inner.in_flight = None;

                let draft = Self::build_draft(&inner);
                info!(session = %self.session_id, "capture finished, draft ready for review");
                Ok(CaptureProgress::Complete(draft))
            }
        }
    }

    /// Phase 2 (failure): park the session in `Failed`, fields intact.
    fn fail_side(&self, side: Side, failure: ExtractionFailure) {
        let mut inner = self.lock();
        if inner.state != CaptureState::Extracting {
            return;
        }
        inner.state = CaptureState::Failed;
        warn!(session = %self.session_id, %side, %failure, "extraction failed");
    }

    fn build_draft(inner: &SessionInner) -> IdRecord {
        let fields = &inner.fields;
        IdRecord {
            id: None,
            name: fields.name.clone().unwrap_or_default(),
            date_of_birth: fields.date_of_birth.clone().unwrap_or_default(),
            id_number: fields.id_number.clone().unwrap_or_default(),
            address: fields.address.clone().unwrap_or_default(),
            issue_date: fields.issue_date.clone(),
            expiry_date: fields.expiry_date.clone(),
            scan_date: inner.scan_date.unwrap_or_else(Utc::now),
            image_uri: inner.image_uri.clone(),
            additional_info: None,
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, SessionInner> {
        self.inner.lock().expect("capture session lock poisoned")
    }
}
