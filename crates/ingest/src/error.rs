use thiserror::Error;

pub type Result<T> = std::result::Result<T, IngestError>;

#[derive(Error, Debug)]
pub enum IngestError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid JSON table: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid TOML table: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Unsupported table format: {0}")]
    UnsupportedFormat(String),

    #[error("Schema mismatch: {0}")]
    SchemaMismatch(String),
}
