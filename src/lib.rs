//! Gridport - paginated spreadsheet export and template-validated import
//!
//! This library exports large datasets into multi-sheet workbooks without
//! materializing more than one query page at a time, and validates uploaded
//! workbooks against an expected header template before transforming rows
//! into typed records.
//!
//! # Features
//!
//! - Deterministic sheet/page partitioning (10,000 records per sheet,
//!   fetched 5,000 at a time)
//! - Export from an in-memory list or from a page-fetch callback
//! - Strict import validation: suffix, headers, full empty-cell scan before
//!   any row is transformed
//! - Structured {success, message, rows} outcomes for expected failures
//!
//! # Example
//!
//! ```no_run
//! use gridport::config::ExportConfig;
//! use gridport::excel::WorkbookExporter;
//!
//! let headers = vec!["ID".to_string(), "Name".to_string()];
//! let rows = vec![
//!     vec!["1".to_string(), "alice".to_string()],
//!     vec!["2".to_string(), "bob".to_string()],
//! ];
//!
//! let exporter = WorkbookExporter::new(&headers, ExportConfig::default());
//! let path = exporter.export_rows(&rows, |row| row.clone(), "people.xlsx")?;
//!
//! println!("wrote {:?}", path);
//! # Ok::<(), gridport::error::GridportError>(())
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod excel;
pub mod outcome;
pub mod partition;

// Re-export commonly used types
pub use error::{GridportError, GridportResult};
pub use excel::{import_rows, UploadedSheet, WorkbookExporter};
pub use outcome::Outcome;
pub use partition::{plan_sheets, PagePlan, PageRequest, SheetPlan};
