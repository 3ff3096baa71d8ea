//! Paginated Excel export and template-validated import.
//!
//! - Export: partition a dataset into bounded sheets/pages and write a
//!   multi-sheet workbook (from a materialized list, or page by page).
//! - Import: validate an uploaded workbook's shape against expected headers,
//!   then transform each row into a typed record.

mod exporter;
mod importer;

pub use exporter::WorkbookExporter;
pub use importer::{cell_is_empty, header_matches, import_rows, UploadedSheet};
