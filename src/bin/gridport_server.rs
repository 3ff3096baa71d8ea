//! Gridport API server binary.
//!
//! HTTP REST API around the spreadsheet export/import pipelines.

use clap::Parser;
use gridport::api::{run_api_server, ApiConfig};

#[derive(Parser, Debug)]
#[command(name = "gridport-server")]
#[command(version)]
#[command(about = "Gridport API Server - paginated spreadsheet export/import over HTTP")]
#[command(long_about = r#"
Gridport API Server

Endpoints:
  - POST /api/v1/export              - Export rows to a multi-sheet workbook
  - POST /api/v1/import              - Upload + validate a workbook (multipart)
  - GET  /api/v1/download/:file_name - Download a produced workbook

Additional endpoints:
  - GET  /health           - Health check
  - GET  /version          - Server version info
  - GET  /                 - API documentation

Example usage:
  gridport-server                           # Start on localhost:8080
  gridport-server --host 0.0.0.0 --port 3000

  curl -X POST http://localhost:8080/api/v1/export \
    -H "Content-Type: application/json" \
    -d '{"file_name":"out.xlsx","headers":["ID","Name"],"rows":[["1","alice"]]}'
"#)]
struct Args {
    /// Host address to bind to (use 0.0.0.0 for all interfaces)
    #[arg(short = 'H', long, default_value = "127.0.0.1", env = "GRIDPORT_HOST")]
    host: String,

    /// Port to listen on
    #[arg(short, long, default_value = "8080", env = "GRIDPORT_PORT")]
    port: u16,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config = ApiConfig {
        host: args.host,
        port: args.port,
    };

    run_api_server(config).await
}
