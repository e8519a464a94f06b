// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Scandex — Record export.
//
// Turns an ordered set of records into one spreadsheet artifact and hands
// it to the OS share sheet.  The hand-off is best-effort: if sharing is
// unavailable the file still exists and its location is reported back.

pub mod sheet;

use std::path::{Path, PathBuf};

use chrono::{NaiveDate, Utc};
use scandex_bridge::traits::NativeShare;
use scandex_core::error::Result;
use scandex_core::types::IdRecord;
use tracing::{info, instrument, warn};

pub use sheet::{COLUMNS, SHEET_NAME, render_rows, write_workbook};

/// MIME type of the exported artifact.
pub const XLSX_MIME: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// Title and message passed to the share sheet.
const SHARE_TITLE: &str = "ID Scan Data";
const SHARE_MESSAGE: &str = "Here is the exported ID scan data";

/// Where the export ended up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportOutcome {
    /// Location of the written artifact; valid even when sharing failed.
    pub path: PathBuf,
    pub file_name: String,
    /// Whether the share hand-off succeeded.
    pub shared: bool,
}

/// File name for an export performed on `date`: `id_scans_<ISO-date>.xlsx`.
pub fn export_file_name(date: NaiveDate) -> String {
    format!("id_scans_{}.xlsx", date.format("%Y-%m-%d"))
}

/// Export `records` into `out_dir` and offer the file via the share sheet.
///
/// Rows are written in the order received.  Zero records produce a
/// header-only file — callers that consider that pointless must refuse
/// before calling.  A failed share hand-off is downgraded to a warning;
/// the artifact survives and the outcome reports `shared: false`.
///
/// # Errors
///
/// `Export` when the workbook cannot be written; never because of the
/// share sheet.
#[instrument(skip_all, fields(records = records.len(), out_dir = %out_dir.display()))]
pub fn export_records(
    records: &[IdRecord],
    out_dir: &Path,
    share: &dyn NativeShare,
) -> Result<ExportOutcome> {
    let file_name = export_file_name(Utc::now().date_naive());
    let path = out_dir.join(&file_name);

    write_workbook(records, &path)?;
    info!(path = %path.display(), rows = records.len(), "export written");

    let shared = match share.share_file(
        &path.to_string_lossy(),
        XLSX_MIME,
        SHARE_TITLE,
        SHARE_MESSAGE,
    ) {
        Ok(()) => true,
        Err(e) => {
            // Non-fatal: the artifact is intact, the user just has to
            // fetch it from the file manager.
            warn!(path = %path.display(), error = %e, "share hand-off unavailable");
            false
        }
    };

    Ok(ExportOutcome {
        path,
        file_name,
        shared,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use scandex_core::error::ScandexError;
    use std::sync::Mutex;

    struct RecordingShare {
        calls: Mutex<Vec<(String, String)>>,
        fail: bool,
    }

    impl RecordingShare {
        fn new(fail: bool) -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                fail,
            }
        }
    }

    impl NativeShare for RecordingShare {
        fn share_file(
            &self,
            path: &str,
            mime_type: &str,
            _title: &str,
            _message: &str,
        ) -> Result<()> {
            self.calls
                .lock()
                .unwrap()
                .push((path.to_string(), mime_type.to_string()));
            if self.fail {
                Err(ScandexError::PlatformUnavailable)
            } else {
                Ok(())
            }
        }
    }

    fn record(name: &str) -> IdRecord {
        IdRecord {
            name: name.into(),
            id_number: "ID-1".into(),
            ..IdRecord::draft(Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap())
        }
    }

    #[test]
    fn file_name_embeds_the_export_date() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 31).unwrap();
        assert_eq!(export_file_name(date), "id_scans_2024-01-31.xlsx");
    }

    #[test]
    fn export_writes_and_shares() {
        let dir = tempfile::tempdir().expect("tempdir");
        let share = RecordingShare::new(false);

        let outcome =
            export_records(&[record("John Doe")], dir.path(), &share).expect("export");
        assert!(outcome.shared);
        assert!(outcome.path.exists());

        let calls = share.calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].1, XLSX_MIME);
    }

    #[test]
    fn failed_share_keeps_the_artifact_and_reports_location() {
        let dir = tempfile::tempdir().expect("tempdir");
        let share = RecordingShare::new(true);

        let outcome =
            export_records(&[record("John Doe")], dir.path(), &share).expect("export");
        assert!(!outcome.shared, "share failure must not fail the export");
        assert!(outcome.path.exists(), "artifact must survive the failure");
        assert!(outcome.file_name.starts_with("id_scans_"));
    }

    #[test]
    fn empty_export_is_permitted_at_this_layer() {
        let dir = tempfile::tempdir().expect("tempdir");
        let share = RecordingShare::new(false);

        let outcome = export_records(&[], dir.path(), &share).expect("export");
        assert!(outcome.path.exists());
    }
}
