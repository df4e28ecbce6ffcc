//! HTTP tests for the parse routes and the stored receipt routing.

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use receipt_splitter::{api, ReceiptService};
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use serde_json::{json, Value};
use tower::ServiceExt;

fn line(text: &str, left: f64, top: f64) -> Value {
    json!({
        "text": text,
        "bounding_box": { "left": left, "top": top, "right": left + 60.0, "bottom": top + 12.0 }
    })
}

fn document() -> Value {
    json!({
        "blocks": [
            { "lines": [line("Corner Shop", 50.0, 0.0), line("15/03/2025", 50.0, 20.0)] },
            { "lines": [line("Milk", 0.0, 60.0), line("Total", 0.0, 90.0)] },
            { "lines": [line("$3.99", 200.0, 61.0), line("$3.99", 200.0, 91.0)] }
        ]
    })
}

async fn post(uri: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();

    let response = api::parse_routes().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_health() {
    let request = Request::builder().uri("/health").body(Body::empty()).unwrap();
    let response = api::parse_routes().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_parse_endpoint() {
    let (status, body) = post("/api/receipts/parse", json!({ "receipt_id": 3, "document": document() })).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], json!(true));
    let data = &body["data"];
    assert_eq!(data["name"], json!("Corner Shop"));
    assert_eq!(data["date"], json!("15/03/2025"));
    assert_eq!(data["items"][0]["name"], json!("Milk"));
    assert_eq!(data["items"][0]["receipt_id"], json!(3));
    assert_eq!(data["items"][0]["quantity"], json!(1));
    // The first price is never treated as a duplicate of the total
    assert_eq!(data["items"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_parse_without_prices_is_unprocessable() {
    let document = json!({ "blocks": [{ "lines": [line("Hello", 0.0, 0.0)] }] });
    let (status, body) = post("/api/receipts/parse", json!({ "document": document })).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["success"], json!(false));
    assert!(body["message"].as_str().unwrap().contains("No price found"));
}

#[tokio::test]
async fn test_batch_endpoint() {
    let empty = json!({ "blocks": [] });
    let (status, body) = post(
        "/api/receipts/parse/batch",
        json!([
            { "receipt_id": 1, "document": document() },
            { "receipt_id": 2, "document": empty }
        ]),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let entries = body["data"].as_array().unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0]["success"], json!(true));
    assert_eq!(entries[1]["receipt_id"], json!(2));
    assert_eq!(entries[1]["success"], json!(false));
    assert_eq!(body["message"], json!("Parsed 1/2 receipts"));
}

/// Receipt routes over a pool that never connects; only requests rejected before a query can run.
fn receipt_router() -> axum::Router {
    let pool = PgPoolOptions::new()
        .connect_lazy("postgres://localhost/receipt_splitter")
        .unwrap();
    api::receipt_routes(Arc::new(ReceiptService::new(pool)))
}

async fn send(method: &str, uri: &str, body: &str) -> StatusCode {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    receipt_router().oneshot(request).await.unwrap().status()
}

#[tokio::test]
async fn test_receipt_header_accepts_put() {
    // Routed to the update handler, which rejects the malformed body
    assert_eq!(send("PUT", "/api/receipts/1", "{ not json").await, StatusCode::BAD_REQUEST);
    assert_eq!(send("PATCH", "/api/receipts/1", "{}").await, StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn test_item_route_accepts_put() {
    assert_eq!(send("PUT", "/api/receipts/1/items/0", "{ not json").await, StatusCode::BAD_REQUEST);
}
