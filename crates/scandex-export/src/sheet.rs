// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Worksheet generation — one fixed-schema sheet of record rows.
//
// Column order and headers are part of the export contract and must not
// change; consumers of the shared file key on them.

use std::path::Path;

use chrono::Local;
use rust_xlsxwriter::{Color, Format, FormatAlign, Workbook};
use scandex_core::error::{Result, ScandexError};
use scandex_core::types::IdRecord;

/// Name of the single worksheet.
pub const SHEET_NAME: &str = "ID Scans";

/// Fixed columns: header text and display width, in contract order.
pub const COLUMNS: [(&str, f64); 8] = [
    ("Name", 20.0),
    ("Date of Birth", 15.0),
    ("ID Number", 15.0),
    ("Address", 30.0),
    ("Issue Date", 15.0),
    ("Expiry Date", 15.0),
    ("Scan Date", 20.0),
    ("Additional Info", 30.0),
];

/// Render one record as its row of cell strings, in column order.
///
/// Absent optional fields become empty strings — never a placeholder
/// token.  The scan timestamp is shown as a locale-formatted local
/// date-time rather than the stored RFC 3339 form.
pub fn render_row(record: &IdRecord) -> [String; 8] {
    [
        record.name.clone(),
        record.date_of_birth.clone(),
        record.id_number.clone(),
        record.address.clone(),
        record.issue_date.clone().unwrap_or_default(),
        record.expiry_date.clone().unwrap_or_default(),
        record
            .scan_date
            .with_timezone(&Local)
            .format("%c")
            .to_string(),
        record.additional_info.clone().unwrap_or_default(),
    ]
}

/// Render all records in the order received; this layer never re-sorts.
pub fn render_rows(records: &[IdRecord]) -> Vec<[String; 8]> {
    records.iter().map(render_row).collect()
}

fn sheet_err(e: rust_xlsxwriter::XlsxError) -> ScandexError {
    ScandexError::Export(e.to_string())
}

/// Write the workbook to `path`.  Zero records is legal here and yields a
/// header-only sheet; rejecting empty input is the caller's decision.
pub fn write_workbook(records: &[IdRecord], path: &Path) -> Result<()> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(SHEET_NAME).map_err(sheet_err)?;

    // Header row: bold on a light grey fill, per the original layout.
    let header_format = Format::new()
        .set_bold()
        .set_background_color(Color::RGB(0xE0E0E0));
    let cell_format = Format::new().set_align(FormatAlign::Left);

    for (col, (header, width)) in COLUMNS.iter().enumerate() {
        let col = col as u16;
        worksheet.set_column_width(col, *width).map_err(sheet_err)?;
        worksheet
            .write_string_with_format(0, col, *header, &header_format)
            .map_err(sheet_err)?;
    }

    for (i, row) in render_rows(records).iter().enumerate() {
        let row_index = (i + 1) as u32;
        for (col, value) in row.iter().enumerate() {
            worksheet
                .write_string_with_format(row_index, col as u16, value, &cell_format)
                .map_err(sheet_err)?;
        }
    }

    workbook.save(path).map_err(sheet_err)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn sample() -> IdRecord {
        IdRecord {
            id: None,
            name: "John Doe".into(),
            date_of_birth: "1990-01-01".into(),
            id_number: "ID12345678".into(),
            address: "123 Main St".into(),
            issue_date: Some("2020-01-01".into()),
            expiry_date: Some("2025-01-01".into()),
            scan_date: Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap(),
            image_uri: None,
            additional_info: None,
        }
    }

    #[test]
    fn headers_match_the_contract_in_order() {
        let headers: Vec<_> = COLUMNS.iter().map(|(h, _)| *h).collect();
        assert_eq!(
            headers,
            vec![
                "Name",
                "Date of Birth",
                "ID Number",
                "Address",
                "Issue Date",
                "Expiry Date",
                "Scan Date",
                "Additional Info",
            ]
        );
    }

    #[test]
    fn row_renders_fields_in_column_order_with_empty_optionals() {
        let row = render_row(&sample());
        assert_eq!(row[0], "John Doe");
        assert_eq!(row[1], "1990-01-01");
        assert_eq!(row[2], "ID12345678");
        assert_eq!(row[3], "123 Main St");
        assert_eq!(row[4], "2020-01-01");
        assert_eq!(row[5], "2025-01-01");
        // Absent additional info renders as an empty string, not a token.
        assert_eq!(row[7], "");
    }

    #[test]
    fn scan_date_is_locale_formatted_not_rfc3339() {
        let row = render_row(&sample());
        assert!(!row[6].contains('T'), "raw RFC 3339 leaked: {}", row[6]);
        assert!(row[6].contains("2024"), "year missing: {}", row[6]);
    }

    #[test]
    fn rows_keep_the_order_received() {
        let mut first = sample();
        first.name = "First".into();
        let mut second = sample();
        second.name = "Second".into();
        // Second has an older scan date; order must still be preserved.
        second.scan_date = Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap();

        let rows = render_rows(&[first, second]);
        assert_eq!(rows[0][0], "First");
        assert_eq!(rows[1][0], "Second");
    }

    #[test]
    fn zero_records_yield_zero_rows() {
        assert!(render_rows(&[]).is_empty());
    }

    #[test]
    fn workbook_writes_to_disk() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("out.xlsx");

        write_workbook(&[sample()], &path).expect("write");
        let meta = std::fs::metadata(&path).expect("file exists");
        assert!(meta.len() > 0);
    }

    #[test]
    fn header_only_workbook_is_legal() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("empty.xlsx");
        write_workbook(&[], &path).expect("write header-only file");
        assert!(path.exists());
    }
}
