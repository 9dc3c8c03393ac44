//! Error types for prikazy

use thiserror::Error;

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration not found")]
    NotFound,

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("No tariff table configured. Set one with: prikazy config --set-tariffs <path>")]
    MissingTariffs,
}

/// Report store errors
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Report not found: {0}")]
    NotFound(String),

    #[error("Store data corrupted: {0}")]
    Corrupted(String),
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Tariff error: {0}")]
    Tariff(String),

    #[error("CSV error: {0}")]
    Csv(String),

    #[error("Excel export error: {0}")]
    Excel(String),

    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Invalid state transition: {from} -> {to}")]
    InvalidTransition { from: String, to: String },

    #[error("Report is incomplete: {0}")]
    IncompleteReport(String),

    #[error("Calculation unavailable: {0}")]
    Unavailable(String),
}

pub type Result<T> = std::result::Result<T, Error>;
