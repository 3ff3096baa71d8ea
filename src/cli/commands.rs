//! CLI command implementations.

use std::fs;
use std::path::PathBuf;

use chrono::Local;
use colored::Colorize;

use crate::config::{ExportConfig, PATH_DATE_FORMAT};
use crate::error::{GridportError, GridportResult};
use crate::excel::{import_rows, UploadedSheet, WorkbookExporter};

/// Parse a comma-separated `--headers` argument.
fn parse_headers(headers: &str) -> Vec<String> {
    headers
        .split(',')
        .map(|h| h.trim().to_string())
        .filter(|h| !h.is_empty())
        .collect()
}

/// Default output name stamped with the current local time.
fn timestamped_file_name() -> String {
    format!("export-{}.xlsx", Local::now().format(PATH_DATE_FORMAT))
}

/// Execute the export command: tab-separated input rows to a multi-sheet
/// workbook in the download area.
pub fn export(
    input: PathBuf,
    headers: String,
    output: Option<String>,
    download_dir: Option<PathBuf>,
    verbose: bool,
) -> GridportResult<()> {
    let headers = parse_headers(&headers);
    let file_name = output.unwrap_or_else(timestamped_file_name);

    println!("{}", "Gridport - Workbook Export".bold().green());
    println!("   Input:  {}", input.display());
    println!("   Output: {}\n", file_name);

    let text = fs::read_to_string(&input)?;
    let rows: Vec<Vec<String>> = text
        .lines()
        .filter(|line| !line.is_empty())
        .map(|line| line.split('\t').map(str::to_string).collect())
        .collect();

    for (i, row) in rows.iter().enumerate() {
        if row.len() != headers.len() {
            return Err(GridportError::Validation(format!(
                "row {} has {} cells, expected {}",
                i + 1,
                row.len(),
                headers.len()
            )));
        }
    }

    if verbose {
        println!("   {} rows, {} columns", rows.len(), headers.len());
    }

    let config = download_dir.map_or_else(ExportConfig::default, ExportConfig::new);
    let exporter = WorkbookExporter::new(&headers, config);

    match exporter.export_rows(&rows, |row| row.clone(), &file_name)? {
        Some(path) => {
            println!("{}", "Export complete".bold().green());
            println!("   Workbook: {}\n", path.display());
            Ok(())
        }
        None => Err(GridportError::Validation(
            "nothing to export: headers, rows, and output name are all required".to_string(),
        )),
    }
}

/// Execute the import command: validate a workbook against expected headers
/// and print the outcome.
pub fn import(input: PathBuf, headers: String, verbose: bool) -> GridportResult<()> {
    let headers = parse_headers(&headers);

    println!("{}", "Gridport - Workbook Import".bold().green());
    println!("   Input: {}\n", input.display());

    let file_name = input
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let bytes = fs::read(&input)?;
    let upload = UploadedSheet::new(file_name, bytes);

    let outcome = import_rows(&headers, &upload, |row| {
        row.iter()
            .map(|cell| cell.to_string().trim().to_string())
            .collect::<Vec<String>>()
    });

    if !outcome.is_success() {
        let message = outcome.message().unwrap_or("import failed").to_string();
        println!("{} {}\n", "Import rejected:".bold().red(), message);
        return Err(GridportError::Validation(message));
    }

    println!("{}", "Import complete".bold().green());
    println!("   {} rows validated\n", outcome.rows.len());

    if verbose {
        for row in &outcome.rows {
            println!("   {}", row.join(" | "));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_headers_trims_and_drops_empties() {
        assert_eq!(
            parse_headers(" Name , Age ,,Email"),
            vec!["Name", "Age", "Email"]
        );
        assert!(parse_headers("").is_empty());
    }

    #[test]
    fn test_timestamped_file_name_shape() {
        let name = timestamped_file_name();
        assert!(name.starts_with("export-"));
        assert!(name.ends_with(".xlsx"));
    }

    #[test]
    fn test_export_rejects_ragged_rows() {
        let dir = tempfile::TempDir::new().unwrap();
        let input = dir.path().join("rows.tsv");
        fs::write(&input, "a\tb\nc\n").unwrap();

        let result = export(
            input,
            "h1,h2".to_string(),
            Some("out.xlsx".to_string()),
            Some(dir.path().to_path_buf()),
            false,
        );
        assert!(matches!(result, Err(GridportError::Validation(_))));
    }

    #[test]
    fn test_export_then_import_round_trip() {
        let dir = tempfile::TempDir::new().unwrap();
        let input = dir.path().join("rows.tsv");
        fs::write(&input, "1\talice\n2\tbob\n").unwrap();

        export(
            input,
            "id,name".to_string(),
            Some("people.xlsx".to_string()),
            Some(dir.path().to_path_buf()),
            false,
        )
        .unwrap();

        import(
            dir.path().join("people.xlsx"),
            "id,name".to_string(),
            false,
        )
        .unwrap();
    }
}
