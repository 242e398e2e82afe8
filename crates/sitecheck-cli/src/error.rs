use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] sitecheck_core::Error),
    #[error(transparent)]
    Config(#[from] sitecheck_core::ConfigError),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
    #[error("Galat penyimpanan aman: {0}")]
    SecureStorage(String),
    #[error("Masukan tidak valid: {0}")]
    InvalidInput(String),
    #[error("{failed} dari {total} URL tidak dinyatakan aman")]
    NotAllSafe { failed: usize, total: usize },
}
