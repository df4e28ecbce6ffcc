pub mod handlers;

pub use handlers::*;

use crate::service::ReceiptService;
use axum::{
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;

/// Stateless parse routes
pub fn parse_routes() -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/api/receipts/parse", post(parse))
        .route("/api/receipts/parse/batch", post(parse_many))
}

/// Stored receipt routes
pub fn receipt_routes(service: Arc<ReceiptService>) -> Router {
    Router::new()
        .route("/api/receipts", post(scan).get(list_receipts))
        .route("/api/receipts/:id", get(get_receipt).put(update_receipt).delete(delete_receipt))
        .route("/api/receipts/:id/items/:index", put(update_item))
        .route("/api/receipts/:id/items.csv", get(export_items))
        .route("/api/receipts/:id/breakdown", post(breakdown))
        .with_state(service)
}

/// Full application router
pub fn router(service: Arc<ReceiptService>) -> Router {
    parse_routes().merge(receipt_routes(service))
}
