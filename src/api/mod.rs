//! HTTP surface: REST endpoints around the export/import pipelines, plus the
//! download-filename encoding required by the attachment endpoint.

pub mod download;
pub mod handlers;
pub mod server;

pub use download::{content_disposition, encode_download_filename};
pub use server::{run_api_server, ApiConfig};
