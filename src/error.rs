//! Error types for parsing and the receipt service.

use thiserror::Error;

/// Result type for the parser core
pub type ParseResult<T> = std::result::Result<T, ParseError>;

/// Hard failures of the parser core
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// No line on the receipt looks like a price, so there is no total
    #[error("No price found on receipt ({lines} lines scanned)")]
    NoPriceFound { lines: usize },
}

/// Errors surfaced by the receipt service and HTTP layer
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Receipt could not be parsed: {0}")]
    Parse(#[from] ParseError),

    #[error("Receipt {0} not found")]
    ReceiptNotFound(i64),

    #[error("Item {index} not found on receipt {receipt_id}")]
    ItemNotFound { receipt_id: i64, index: i32 },

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("CSV export failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
}
