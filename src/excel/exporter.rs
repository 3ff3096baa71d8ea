//! Paginated workbook export.
//!
//! Both export variants run the partition planner over the record count and
//! write one worksheet per planned sheet, header row first. The from-list
//! variant slices an in-memory sequence; the page-fetched variant pulls one
//! page at a time from a caller-supplied callback, so at most `PAGE_SIZE`
//! records are resident while the workbook is assembled.

use crate::config::{ExportConfig, PAGE_SIZE};
use crate::error::{GridportError, GridportResult};
use crate::partition::{plan_sheets, PageRequest};
use rust_xlsxwriter::{Format, FormatAlign, Workbook, Worksheet};
use std::path::PathBuf;
use tracing::{debug, info, warn};

/// Writes datasets into multi-sheet workbooks under a download area.
pub struct WorkbookExporter<'a> {
    headers: &'a [String],
    config: ExportConfig,
}

impl<'a> WorkbookExporter<'a> {
    pub fn new(headers: &'a [String], config: ExportConfig) -> Self {
        Self { headers, config }
    }

    /// Export an already-materialized record sequence.
    ///
    /// Returns `Ok(None)` without touching the filesystem when headers, rows,
    /// or the file name are empty.
    pub fn export_rows<E, F>(
        &self,
        rows: &[E],
        to_cells: F,
        file_name: &str,
    ) -> GridportResult<Option<PathBuf>>
    where
        F: Fn(&E) -> Vec<String>,
    {
        if self.headers.is_empty() || rows.is_empty() || file_name.is_empty() {
            warn!("export skipped: headers, rows, and file name are all required");
            return Ok(None);
        }

        let mut workbook = Workbook::new();
        let header_format = header_format();

        for sheet in plan_sheets(rows.len()) {
            let worksheet = workbook.add_worksheet();
            worksheet
                .set_name(sheet.name())
                .map_err(|e| GridportError::Export(format!("Failed to set sheet name: {e}")))?;

            write_header_row(worksheet, self.headers, &header_format)?;

            let start = sheet.offset();
            for (local_idx, record) in rows[start..start + sheet.size].iter().enumerate() {
                write_record_row(worksheet, local_idx as u32 + 1, &to_cells(record))?;
            }
        }

        self.save(workbook, file_name).map(Some)
    }

    /// Export a dataset known only by its total count, fetching records one
    /// page at a time.
    ///
    /// `fetch` receives the 1-based global page index (plus page size and
    /// total) and must return that page's records in order; errors it returns
    /// propagate unchanged. Returns `Ok(None)` when headers or the file name
    /// are empty.
    pub fn export_paged<E, Q, F>(
        &self,
        total: usize,
        mut fetch: Q,
        to_cells: F,
        file_name: &str,
    ) -> GridportResult<Option<PathBuf>>
    where
        Q: FnMut(&PageRequest) -> GridportResult<Vec<E>>,
        F: Fn(&E) -> Vec<String>,
    {
        if self.headers.is_empty() || file_name.is_empty() {
            warn!("paged export skipped: headers and file name are required");
            return Ok(None);
        }

        let mut workbook = Workbook::new();
        let header_format = header_format();

        for sheet in plan_sheets(total) {
            let worksheet = workbook.add_worksheet();
            worksheet
                .set_name(sheet.name())
                .map_err(|e| GridportError::Export(format!("Failed to set sheet name: {e}")))?;

            write_header_row(worksheet, self.headers, &header_format)?;

            for page in &sheet.pages {
                let request = sheet.page_request(page, total);
                debug!(page = request.index, sheet = sheet.number, "fetching page");
                let records = fetch(&request)?;

                for (local_idx, record) in records.iter().enumerate() {
                    let row = ((page.sub_page - 1) * PAGE_SIZE + local_idx + 1) as u32;
                    write_record_row(worksheet, row, &to_cells(record))?;
                }
            }
        }

        self.save(workbook, file_name).map(Some)
    }

    /// Serialize the workbook under the configured download area, creating
    /// parent directories on demand.
    fn save(&self, mut workbook: Workbook, file_name: &str) -> GridportResult<PathBuf> {
        let path = self.config.file_path(file_name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        workbook
            .save(&path)
            .map_err(|e| GridportError::Export(format!("Failed to save workbook: {e}")))?;

        info!(path = %path.display(), "workbook written");
        Ok(path)
    }
}

fn header_format() -> Format {
    Format::new().set_align(FormatAlign::Center)
}

fn write_header_row(
    worksheet: &mut Worksheet,
    headers: &[String],
    format: &Format,
) -> GridportResult<()> {
    for (col, header) in headers.iter().enumerate() {
        worksheet
            .write_string_with_format(0, col as u16, header, format)
            .map_err(|e| GridportError::Export(format!("Failed to write header: {e}")))?;
    }
    Ok(())
}

fn write_record_row(worksheet: &mut Worksheet, row: u32, cells: &[String]) -> GridportResult<()> {
    for (col, value) in cells.iter().enumerate() {
        worksheet
            .write_string(row, col as u16, value)
            .map_err(|e| GridportError::Export(format!("Failed to write cell: {e}")))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SHEET_SIZE;
    use tempfile::TempDir;

    fn headers() -> Vec<String> {
        vec!["id".to_string(), "name".to_string()]
    }

    fn sample_rows(n: usize) -> Vec<Vec<String>> {
        (0..n)
            .map(|i| vec![i.to_string(), format!("record-{i}")])
            .collect()
    }

    #[test]
    fn test_export_rows_writes_file() {
        let dir = TempDir::new().unwrap();
        let headers = headers();
        let exporter = WorkbookExporter::new(&headers, ExportConfig::new(dir.path()));

        let result = exporter
            .export_rows(&sample_rows(10), |r| r.clone(), "small.xlsx")
            .unwrap();

        let path = result.expect("export should produce a file");
        assert!(path.exists());
        assert!(std::fs::metadata(&path).unwrap().len() > 0);
    }

    #[test]
    fn test_export_rows_empty_inputs_are_noops() {
        let dir = TempDir::new().unwrap();
        let headers = headers();
        let exporter = WorkbookExporter::new(&headers, ExportConfig::new(dir.path()));

        let no_rows: Vec<Vec<String>> = Vec::new();
        assert!(exporter
            .export_rows(&no_rows, |r| r.clone(), "out.xlsx")
            .unwrap()
            .is_none());
        assert!(exporter
            .export_rows(&sample_rows(3), |r| r.clone(), "")
            .unwrap()
            .is_none());

        let empty_headers: Vec<String> = Vec::new();
        let exporter = WorkbookExporter::new(&empty_headers, ExportConfig::new(dir.path()));
        assert!(exporter
            .export_rows(&sample_rows(3), |r| r.clone(), "out.xlsx")
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_export_rows_creates_parent_directories() {
        let dir = TempDir::new().unwrap();
        let headers = headers();
        let exporter =
            WorkbookExporter::new(&headers, ExportConfig::new(dir.path().join("a").join("b")));

        let path = exporter
            .export_rows(&sample_rows(2), |r| r.clone(), "nested.xlsx")
            .unwrap()
            .unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_export_paged_fetches_every_planned_page() {
        let dir = TempDir::new().unwrap();
        let headers = headers();
        let exporter = WorkbookExporter::new(&headers, ExportConfig::new(dir.path()));

        let total = SHEET_SIZE + 1;
        let dataset = sample_rows(total);
        let mut seen_pages = Vec::new();

        let path = exporter
            .export_paged(
                total,
                |req| {
                    seen_pages.push(req.index);
                    let start = req.offset();
                    let end = (start + req.size).min(req.total);
                    Ok(dataset[start..end].to_vec())
                },
                |r| r.clone(),
                "paged.xlsx",
            )
            .unwrap();

        assert!(path.unwrap().exists());
        // 10_001 records: two full pages for sheet 1, one short page for sheet 2.
        assert_eq!(seen_pages, vec![1, 2, 3]);
    }

    #[test]
    fn test_export_paged_propagates_fetch_errors() {
        let dir = TempDir::new().unwrap();
        let headers = headers();
        let exporter = WorkbookExporter::new(&headers, ExportConfig::new(dir.path()));

        let result = exporter.export_paged(
            100,
            |_req| -> GridportResult<Vec<Vec<String>>> {
                Err(GridportError::PageFetch("source went away".to_string()))
            },
            |r: &Vec<String>| r.clone(),
            "broken.xlsx",
        );

        assert!(matches!(result, Err(GridportError::PageFetch(_))));
        assert!(!dir.path().join("broken.xlsx").exists());
    }

    #[test]
    fn test_export_paged_zero_total_writes_empty_workbook() {
        let dir = TempDir::new().unwrap();
        let headers = headers();
        let exporter = WorkbookExporter::new(&headers, ExportConfig::new(dir.path()));

        let path = exporter
            .export_paged(
                0,
                |_req| Ok(Vec::<Vec<String>>::new()),
                |r| r.clone(),
                "empty.xlsx",
            )
            .unwrap();

        assert!(path.unwrap().exists());
    }
}
