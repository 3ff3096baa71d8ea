use thiserror::Error;

pub type GridportResult<T> = Result<T, GridportError>;

#[derive(Error, Debug)]
pub enum GridportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Export error: {0}")]
    Export(String),

    #[error("Import error: {0}")]
    Import(String),

    #[error("Page fetch error: {0}")]
    PageFetch(String),

    #[error("Validation error: {0}")]
    Validation(String),
}
