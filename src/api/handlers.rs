//! API request handlers.
//!
//! Handlers for the export, import-upload, and download endpoints. All
//! validation semantics live in the library; handlers translate between HTTP
//! and the typed pipelines.

use std::sync::Arc;

use axum::{
    extract::{Multipart, Path, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::warn;
use uuid::Uuid;

use crate::excel::{import_rows, UploadedSheet, WorkbookExporter};
use crate::outcome::Outcome;

use super::download::content_disposition;
use super::server::AppState;

/// Standard API response wrapper
#[derive(Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    pub request_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            request_id: Uuid::new_v4().to_string(),
            data: Some(data),
            error: None,
        }
    }

    pub fn err(message: impl Into<String>) -> Self
    where
        T: Default,
    {
        Self {
            success: false,
            request_id: Uuid::new_v4().to_string(),
            data: None,
            error: Some(message.into()),
        }
    }
}

/// Root endpoint response
#[derive(Serialize)]
pub struct RootResponse {
    pub name: String,
    pub version: String,
    pub description: String,
    pub endpoints: Vec<EndpointInfo>,
}

#[derive(Serialize)]
pub struct EndpointInfo {
    pub path: String,
    pub method: String,
    pub description: String,
}

/// GET / - Root info
pub async fn root(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let response = RootResponse {
        name: "Gridport API Server".to_string(),
        version: state.version.clone(),
        description: "Paginated spreadsheet export/import over HTTP".to_string(),
        endpoints: vec![
            EndpointInfo {
                path: "/health".to_string(),
                method: "GET".to_string(),
                description: "Health check endpoint".to_string(),
            },
            EndpointInfo {
                path: "/version".to_string(),
                method: "GET".to_string(),
                description: "Get server version".to_string(),
            },
            EndpointInfo {
                path: "/api/v1/export".to_string(),
                method: "POST".to_string(),
                description: "Export rows to a multi-sheet workbook".to_string(),
            },
            EndpointInfo {
                path: "/api/v1/import".to_string(),
                method: "POST".to_string(),
                description: "Upload and validate a workbook (multipart)".to_string(),
            },
            EndpointInfo {
                path: "/api/v1/download/:file_name".to_string(),
                method: "GET".to_string(),
                description: "Download a produced workbook".to_string(),
            },
        ],
    };
    Json(ApiResponse::ok(response))
}

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
}

/// GET /health - Health check
pub async fn health() -> impl IntoResponse {
    Json(ApiResponse::ok(HealthResponse {
        status: "healthy".to_string(),
    }))
}

/// Version response
#[derive(Serialize)]
pub struct VersionResponse {
    pub version: String,
    pub features: Vec<String>,
}

/// GET /version - Server version
pub async fn version(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(ApiResponse::ok(VersionResponse {
        version: state.version.clone(),
        features: vec![
            "export".to_string(),
            "import".to_string(),
            "download".to_string(),
        ],
    }))
}

/// Export request: an already-materialized dataset.
#[derive(Deserialize)]
pub struct ExportRequest {
    pub file_name: String,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Export response
#[derive(Serialize, Default)]
pub struct ExportResponse {
    pub file_name: String,
    pub rows: usize,
    pub download_path: String,
}

/// POST /api/v1/export - Export rows to a workbook in the download area
pub async fn export(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ExportRequest>,
) -> impl IntoResponse {
    let exporter = WorkbookExporter::new(&req.headers, state.export_config.clone());

    match exporter.export_rows(&req.rows, |row| row.clone(), &req.file_name) {
        Ok(Some(_path)) => Json(ApiResponse::ok(ExportResponse {
            download_path: format!("/api/v1/download/{}", req.file_name),
            rows: req.rows.len(),
            file_name: req.file_name,
        })),
        Ok(None) => Json(ApiResponse::err(
            "file_name, headers, and rows are all required",
        )),
        Err(e) => Json(ApiResponse::err(e.to_string())),
    }
}

/// POST /api/v1/import - Upload a workbook and validate it against headers.
///
/// Multipart fields: `headers` (comma-separated column names) and `file`
/// (the workbook). Responds with the import outcome; each row comes back as
/// its cells' display text.
pub async fn import_upload(mut multipart: Multipart) -> impl IntoResponse {
    let mut headers: Vec<String> = Vec::new();
    let mut upload = UploadedSheet::default();

    loop {
        match multipart.next_field().await {
            Ok(Some(field)) => {
                let name = field.name().unwrap_or_default().to_string();
                match name.as_str() {
                    "headers" => match field.text().await {
                        Ok(text) => {
                            headers = text
                                .split(',')
                                .map(|h| h.trim().to_string())
                                .filter(|h| !h.is_empty())
                                .collect();
                        }
                        Err(e) => {
                            return Json(Outcome::failure(format!("invalid headers field: {e}")))
                        }
                    },
                    "file" => {
                        let file_name = field.file_name().unwrap_or_default().to_string();
                        match field.bytes().await {
                            Ok(bytes) => upload = UploadedSheet::new(file_name, bytes.to_vec()),
                            Err(e) => {
                                return Json(Outcome::failure(format!("invalid file field: {e}")))
                            }
                        }
                    }
                    _ => {}
                }
            }
            Ok(None) => break,
            Err(e) => return Json(Outcome::failure(format!("invalid multipart body: {e}"))),
        }
    }

    let outcome = import_rows(&headers, &upload, |row| {
        row.iter()
            .map(|cell| cell.to_string().trim().to_string())
            .collect::<Vec<String>>()
    });

    Json(outcome)
}

/// GET /api/v1/download/:file_name - Serve a produced workbook.
///
/// The Content-Disposition filename is percent-encoded (with the Firefox
/// fallback) per the requesting User-Agent.
pub async fn download(
    State(state): State<Arc<AppState>>,
    Path(file_name): Path<String>,
    request_headers: HeaderMap,
) -> Response {
    if file_name.contains('/') || file_name.contains('\\') || file_name.contains("..") {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<ExportResponse>::err("invalid file name")),
        )
            .into_response();
    }

    let path = state.export_config.file_path(&file_name);
    match tokio::fs::read(&path).await {
        Ok(bytes) => {
            let user_agent = request_headers
                .get(header::USER_AGENT)
                .and_then(|v| v.to_str().ok())
                .unwrap_or_default();

            (
                [
                    (
                        header::CONTENT_TYPE,
                        "application/octet-stream".to_string(),
                    ),
                    (
                        header::CONTENT_DISPOSITION,
                        content_disposition(user_agent, &file_name),
                    ),
                ],
                bytes,
            )
                .into_response()
        }
        Err(e) => {
            warn!(file = %file_name, error = %e, "download request for missing file");
            (
                StatusCode::NOT_FOUND,
                Json(ApiResponse::<ExportResponse>::err("file not found")),
            )
                .into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_response_ok() {
        let response = ApiResponse::ok(HealthResponse {
            status: "healthy".to_string(),
        });
        assert!(response.success);
        assert!(response.data.is_some());
        assert!(response.error.is_none());
        assert!(!response.request_id.is_empty());
    }

    #[test]
    fn test_api_response_err() {
        let response: ApiResponse<ExportResponse> = ApiResponse::err("boom");
        assert!(!response.success);
        assert!(response.data.is_none());
        assert_eq!(response.error.as_deref(), Some("boom"));
    }

    #[test]
    fn test_export_request_deserializes() {
        let json = r#"{"file_name":"out.xlsx","headers":["a","b"],"rows":[["1","2"]]}"#;
        let req: ExportRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.file_name, "out.xlsx");
        assert_eq!(req.headers, vec!["a", "b"]);
        assert_eq!(req.rows, vec![vec!["1", "2"]]);
    }
}
