// FormVault Error Types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum FormVaultError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Vault not found: {0}")]
    VaultNotFound(String),

    #[error("Unknown profile field: {0}")]
    UnknownField(String),

    #[error("Document not found: {0}")]
    DocumentNotFound(i64),

    #[error("Invalid path: {0}")]
    InvalidPath(String),

    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Hash error: {0}")]
    Hash(String),

    #[error("Detection error: {0}")]
    Detect(String),

    #[error("{0}")]
    Other(String),
}

impl From<anyhow::Error> for FormVaultError {
    fn from(err: anyhow::Error) -> Self {
        FormVaultError::Other(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, FormVaultError>;
