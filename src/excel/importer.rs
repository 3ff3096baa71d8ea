//! Template-validated workbook import.
//!
//! Validation is strictly ordered and short-circuits on the first failure:
//! parameters, file suffix, non-empty first sheet, exact header match, then a
//! full emptiness scan over every data row. Only after the whole sheet has
//! passed does the transform pass run, so a failed import never returns
//! partially transformed rows. Recoverable failures are reported through
//! [`Outcome`]; only the row-mapping callback sees validated cells.

use crate::config::{XLSX_SUFFIXES, XLS_SUFFIXES};
use crate::error::{GridportError, GridportResult};
use crate::outcome::Outcome;
use calamine::{Data, Range, Reader, Xls, Xlsx};
use std::io::Cursor;
use tracing::error;

/// An uploaded workbook: the client-supplied file name plus raw bytes.
#[derive(Debug, Clone, Default)]
pub struct UploadedSheet {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl UploadedSheet {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes,
        }
    }
}

/// Workbook container format, selected by file suffix alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SheetKind {
    Xlsx,
    Xls,
}

/// Validate an uploaded workbook against the expected headers and transform
/// each data row into a record.
///
/// `to_record` is called once per validated row, in sheet order, with the
/// row's cells; it never sees a row containing empty cells.
pub fn import_rows<E, F>(headers: &[String], upload: &UploadedSheet, to_record: F) -> Outcome<E>
where
    F: Fn(&[Data]) -> E,
{
    if headers.is_empty() || upload.bytes.is_empty() {
        return Outcome::failure("missing required parameters");
    }

    let kind = if matches_suffix(&upload.file_name, &XLSX_SUFFIXES) {
        SheetKind::Xlsx
    } else if matches_suffix(&upload.file_name, &XLS_SUFFIXES) {
        SheetKind::Xls
    } else {
        return Outcome::failure("not a recognized spreadsheet file type");
    };

    let range = match read_first_sheet(kind, &upload.bytes) {
        Ok(range) => range,
        Err(e) => {
            error!(file = %upload.file_name, error = %e, "failed to read uploaded workbook");
            return Outcome::failure("failed to read the spreadsheet, please try again later");
        }
    };

    let rows: Vec<&[Data]> = range.rows().collect();
    if rows.len() < 2 {
        return Outcome::failure("the first sheet contains no data rows");
    }

    let header_row = rows[0];
    for (col, expected) in headers.iter().enumerate() {
        if !header_matches(header_row.get(col), expected) {
            return Outcome::failure("header row does not match the expected template");
        }
    }

    for row in &rows[1..] {
        for (col, header) in headers.iter().enumerate() {
            if cell_is_empty(row.get(col)) {
                return Outcome::failure(format!("column [{header}] contains empty cells"));
            }
        }
    }

    let records = rows[1..].iter().copied().map(|row| to_record(row)).collect();
    Outcome::success(records)
}

/// True when the cell's trimmed display text equals the expected header.
pub fn header_matches(cell: Option<&Data>, expected: &str) -> bool {
    cell.is_some_and(|c| c.to_string().trim() == expected)
}

/// True when the cell is missing or its trimmed display text is empty.
pub fn cell_is_empty(cell: Option<&Data>) -> bool {
    cell.is_none_or(|c| c.to_string().trim().is_empty())
}

fn matches_suffix(file_name: &str, suffixes: &[&str]) -> bool {
    suffixes.iter().any(|suffix| file_name.ends_with(suffix))
}

fn read_first_sheet(kind: SheetKind, bytes: &[u8]) -> GridportResult<Range<Data>> {
    let cursor = Cursor::new(bytes);
    match kind {
        SheetKind::Xlsx => {
            let mut workbook: Xlsx<_> = Xlsx::new(cursor)
                .map_err(|e| GridportError::Import(format!("failed to open workbook: {e}")))?;
            first_range(&mut workbook)
        }
        SheetKind::Xls => {
            let mut workbook: Xls<_> = Xls::new(cursor)
                .map_err(|e| GridportError::Import(format!("failed to open workbook: {e}")))?;
            first_range(&mut workbook)
        }
    }
}

fn first_range<RS, R>(workbook: &mut R) -> GridportResult<Range<Data>>
where
    RS: std::io::Read + std::io::Seek,
    R: Reader<RS>,
    R::Error: std::fmt::Display,
{
    let first_sheet = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| GridportError::Import("workbook has no sheets".to_string()))?;
    workbook
        .worksheet_range(&first_sheet)
        .map_err(|e| GridportError::Import(format!("failed to read first sheet: {e}")))
}
