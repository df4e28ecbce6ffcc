use crate::error::AppError;
use crate::models::{
    ItemAssignment, ItemUpdate, OcrDocument, ParseRequest, ParserResult, ReceiptUpdate,
};
use crate::service::{parse_batch, parse_receipt, ReceiptService};
use axum::{
    extract::{Json, Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Response envelope
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    fn ok(message: impl Into<String>, data: T) -> Response {
        let body = Self {
            success: true,
            message: message.into(),
            data: Some(data),
        };
        (StatusCode::OK, Json(body)).into_response()
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::Parse(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::ReceiptNotFound(_) | AppError::ItemNotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Database(_) | AppError::Csv(_) | AppError::Config(_) => {
                tracing::error!("Request failed: {}", self);
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        let body = ApiResponse::<()> {
            success: false,
            message: format!("Error: {}", self),
            data: None,
        };
        (status, Json(body)).into_response()
    }
}

/// Request body: OCR output of one receipt
#[derive(Debug, Deserialize)]
pub struct ScanRequest {
    pub document: OcrDocument,
}

/// Request body: who shares which item
#[derive(Debug, Deserialize)]
pub struct BreakdownRequest {
    pub assignments: Vec<ItemAssignment>,
}

/// Outcome of one document in a batch
#[derive(Debug, Serialize)]
pub struct BatchParseEntry {
    pub receipt_id: i64,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<ParserResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Health check
pub async fn health_check() -> &'static str {
    "OK"
}

/// Parses one document without storing it
pub async fn parse(Json(req): Json<ParseRequest>) -> Response {
    match parse_receipt(&req.document, req.receipt_id) {
        Ok(result) => {
            let message = format!("Parsed {} item(s)", result.items.len());
            ApiResponse::ok(message, result)
        }
        Err(e) => AppError::from(e).into_response(),
    }
}

/// Parses many documents in parallel without storing them
pub async fn parse_many(Json(requests): Json<Vec<ParseRequest>>) -> Response {
    let outcome = tokio::task::spawn_blocking(move || {
        let results = parse_batch(&requests);
        requests
            .iter()
            .zip(results)
            .map(|(req, result)| match result {
                Ok(result) => BatchParseEntry {
                    receipt_id: req.receipt_id,
                    success: true,
                    result: Some(result),
                    error: None,
                },
                Err(e) => BatchParseEntry {
                    receipt_id: req.receipt_id,
                    success: false,
                    result: None,
                    error: Some(e.to_string()),
                },
            })
            .collect::<Vec<_>>()
    })
    .await;

    match outcome {
        Ok(entries) => {
            let parsed = entries.iter().filter(|e| e.success).count();
            let message = format!("Parsed {}/{} receipts", parsed, entries.len());
            ApiResponse::ok(message, entries)
        }
        Err(e) => {
            tracing::error!("Batch parse task failed: {}", e);
            let body = ApiResponse::<()> {
                success: false,
                message: format!("Error: {}", e),
                data: None,
            };
            (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
        }
    }
}

/// Parses and stores a receipt
pub async fn scan(
    State(service): State<Arc<ReceiptService>>,
    Json(req): Json<ScanRequest>,
) -> Result<Response, AppError> {
    let scanned = service.scan(&req.document).await?;
    let message = format!("Stored receipt {}", scanned.receipt.receipt.id);
    Ok(ApiResponse::ok(message, scanned))
}

pub async fn list_receipts(State(service): State<Arc<ReceiptService>>) -> Result<Response, AppError> {
    let receipts = service.list().await?;
    Ok(ApiResponse::ok(format!("{} receipt(s)", receipts.len()), receipts))
}

pub async fn get_receipt(
    State(service): State<Arc<ReceiptService>>,
    Path(receipt_id): Path<i64>,
) -> Result<Response, AppError> {
    let receipt = service.get(receipt_id).await?;
    Ok(ApiResponse::ok("OK", receipt))
}

pub async fn update_receipt(
    State(service): State<Arc<ReceiptService>>,
    Path(receipt_id): Path<i64>,
    Json(update): Json<ReceiptUpdate>,
) -> Result<Response, AppError> {
    let receipt = service.update_receipt(receipt_id, &update).await?;
    Ok(ApiResponse::ok(format!("Updated receipt {}", receipt_id), receipt))
}

pub async fn delete_receipt(
    State(service): State<Arc<ReceiptService>>,
    Path(receipt_id): Path<i64>,
) -> Result<Response, AppError> {
    service.delete(receipt_id).await?;
    Ok(ApiResponse::ok(format!("Deleted receipt {}", receipt_id), ()))
}

pub async fn update_item(
    State(service): State<Arc<ReceiptService>>,
    Path((receipt_id, index)): Path<(i64, i32)>,
    Json(update): Json<ItemUpdate>,
) -> Result<Response, AppError> {
    let item = service.update_item(receipt_id, index, &update).await?;
    Ok(ApiResponse::ok(format!("Updated item {}", index), item))
}

/// Items as CSV
pub async fn export_items(
    State(service): State<Arc<ReceiptService>>,
    Path(receipt_id): Path<i64>,
) -> Result<Response, AppError> {
    let csv = service.export_csv(receipt_id).await?;
    Ok(([(header::CONTENT_TYPE, "text/csv; charset=utf-8")], csv).into_response())
}

pub async fn breakdown(
    State(service): State<Arc<ReceiptService>>,
    Path(receipt_id): Path<i64>,
    Json(req): Json<BreakdownRequest>,
) -> Result<Response, AppError> {
    let breakdown = service.breakdown(receipt_id, &req.assignments).await?;
    let message = format!("{} person(s)", breakdown.shares.len());
    Ok(ApiResponse::ok(message, breakdown))
}
