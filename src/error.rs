//! Error types for the Sengoku engine
//!
//! Only loading, initialization and front ends can fail. Phase transitions
//! never return errors: illegal choices degrade to a plain phase advance.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Invalid card catalog: {0}")]
    InvalidCatalog(String),

    #[error("Unknown card id: {0}")]
    UnknownCard(String),

    #[error("Invalid deck format: {0}")]
    InvalidDeckFormat(String),

    #[error("Invalid rules configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, EngineError>;
