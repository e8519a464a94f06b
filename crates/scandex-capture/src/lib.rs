// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Scandex — Two-sided document capture.
//
// `extract` defines the boundary to the recognition backend; `session`
// drives the front-then-back capture sequence and merges the per-side
// results into one draft record.

pub mod extract;
pub mod session;

pub use extract::{CannedExtractor, ExtractedFields, ExtractionAdapter};
pub use session::{CaptureOrchestrator, CaptureProgress, CaptureState};
