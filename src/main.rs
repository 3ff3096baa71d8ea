use clap::{Parser, Subcommand};
use gridport::cli;
use gridport::error::GridportResult;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "gridport")]
#[command(about = "Paginated spreadsheet export/import with template validation.")]
#[command(long_about = "Gridport - Paginated spreadsheet export/import

Exports large datasets into multi-sheet workbooks (10,000 records per sheet,
fetched 5,000 at a time) and validates spreadsheet uploads against an
expected header template before turning rows into records.

COMMANDS:
  export  - Tab-separated rows to a multi-sheet .xlsx workbook
  import  - Validate a workbook (.xlsx/.xls) against expected headers

EXAMPLES:
  gridport export rows.tsv --headers \"ID,Name,Email\"
  gridport export rows.tsv --headers \"ID,Name\" --output report.xlsx
  gridport import report.xlsx --headers \"ID,Name,Email\" --verbose")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Export tab-separated rows to a multi-sheet workbook
    Export {
        /// Input file: one record per line, cells separated by tabs
        input: PathBuf,

        /// Comma-separated column headers, written to row 0 of every sheet
        #[arg(long)]
        headers: String,

        /// Output file name (defaults to a timestamped name)
        #[arg(short, long)]
        output: Option<String>,

        /// Directory to write into (defaults to the download area)
        #[arg(long)]
        download_dir: Option<PathBuf>,

        /// Show row/column counts while exporting
        #[arg(short, long)]
        verbose: bool,
    },

    /// Validate a workbook against expected headers and list its rows
    Import {
        /// Workbook to import (.xlsx or .xls, suffix is checked)
        input: PathBuf,

        /// Comma-separated column headers the first sheet must match
        #[arg(long)]
        headers: String,

        /// Print every validated row
        #[arg(short, long)]
        verbose: bool,
    },
}

fn main() -> GridportResult<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Export {
            input,
            headers,
            output,
            download_dir,
            verbose,
        } => cli::export(input, headers, output, download_dir, verbose),

        Commands::Import {
            input,
            headers,
            verbose,
        } => cli::import(input, headers, verbose),
    }
}
