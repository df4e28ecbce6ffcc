pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod service;

pub use crate::config::AppConfig;
pub use db::{create_pool, ensure_schema};
pub use error::{AppError, ParseError, ParseResult};
pub use service::{parse_batch, parse_receipt, ReceiptService};
