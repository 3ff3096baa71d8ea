//! Process-wide constants and the export configuration.
//!
//! `PAGE_SIZE` and `SHEET_SIZE` drive the two-level partitioning of every
//! export; they are fixed at compile time and `SHEET_SIZE` must be an exact
//! multiple of `PAGE_SIZE` so page boundaries never straddle a sheet.

use std::path::{Path, PathBuf};

/// Records fetched from a data source in one page query.
pub const PAGE_SIZE: usize = 5_000;

/// Records written to one worksheet before a new sheet is started.
pub const SHEET_SIZE: usize = 10_000;

const _: () = assert!(SHEET_SIZE % PAGE_SIZE == 0);

/// chrono format for human-readable timestamps in cell data.
pub const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// chrono format safe for use inside file names.
pub const PATH_DATE_FORMAT: &str = "%Y-%m-%d %H%M%S";

/// Accepted suffixes for modern workbooks. Matched case-sensitively.
pub const XLSX_SUFFIXES: [&str; 2] = [".xlsx", ".XLSX"];

/// Accepted suffixes for legacy workbooks. Matched case-sensitively.
pub const XLS_SUFFIXES: [&str; 2] = [".xls", ".XLS"];

/// Where produced workbooks land on disk.
#[derive(Debug, Clone)]
pub struct ExportConfig {
    pub download_dir: PathBuf,
}

impl Default for ExportConfig {
    fn default() -> Self {
        let base = std::env::var_os("HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."));
        Self {
            download_dir: base.join("Downloads").join("gridport"),
        }
    }
}

impl ExportConfig {
    pub fn new<P: AsRef<Path>>(download_dir: P) -> Self {
        Self {
            download_dir: download_dir.as_ref().to_path_buf(),
        }
    }

    /// Full output path for a caller-supplied file name.
    pub fn file_path(&self, file_name: &str) -> PathBuf {
        self.download_dir.join(file_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sheet_size_is_page_multiple() {
        assert_eq!(SHEET_SIZE % PAGE_SIZE, 0);
    }

    #[test]
    fn test_file_path_joins_download_dir() {
        let config = ExportConfig::new("/tmp/exports");
        assert_eq!(
            config.file_path("report.xlsx"),
            PathBuf::from("/tmp/exports/report.xlsx")
        );
    }

    #[test]
    fn test_default_config_has_download_dir() {
        let config = ExportConfig::default();
        assert!(config.download_dir.ends_with("Downloads/gridport"));
    }
}
