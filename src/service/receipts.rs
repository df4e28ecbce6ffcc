use crate::db::queries;
use crate::error::AppError;
use crate::models::{
    Diagnostic, Item, ItemAssignment, ItemUpdate, OcrDocument, Receipt, ReceiptBreakdown,
    ReceiptUpdate, ReceiptWithItems,
};
use crate::service::{breakdown, parser};
use serde::Serialize;
use sqlx::PgPool;

/// Receipt id used for items until the receipt has been stored
const UNSAVED_RECEIPT_ID: i64 = -1;

/// A freshly stored receipt and what the parser skipped on the way
#[derive(Debug, Serialize)]
pub struct ScannedReceipt {
    #[serde(flatten)]
    pub receipt: ReceiptWithItems,
    pub diagnostics: Vec<Diagnostic>,
}

/// Parses, stores and serves receipts
pub struct ReceiptService {
    pool: PgPool,
}

impl ReceiptService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Parses an OCR document and stores the result
    pub async fn scan(&self, document: &OcrDocument) -> Result<ScannedReceipt, AppError> {
        let parsed = parser::parse_receipt(document, UNSAVED_RECEIPT_ID)?;
        let receipt = queries::insert_receipt(&self.pool, &parsed).await?;
        tracing::info!("Receipt {} stored with {} item(s)", receipt.id, parsed.items.len());

        let parsed = parsed.with_receipt_id(receipt.id);
        Ok(ScannedReceipt {
            receipt: ReceiptWithItems {
                receipt,
                items: parsed.items,
            },
            diagnostics: parsed.diagnostics,
        })
    }

    pub async fn get(&self, receipt_id: i64) -> Result<ReceiptWithItems, AppError> {
        let receipt = self.receipt(receipt_id).await?;
        let items = queries::list_items(&self.pool, receipt_id).await?;
        Ok(ReceiptWithItems { receipt, items })
    }

    pub async fn list(&self) -> Result<Vec<Receipt>, AppError> {
        Ok(queries::list_receipts(&self.pool).await?)
    }

    /// Corrects the merchant name or date the parser read
    pub async fn update_receipt(
        &self,
        receipt_id: i64,
        update: &ReceiptUpdate,
    ) -> Result<Receipt, AppError> {
        queries::update_receipt(&self.pool, receipt_id, update)
            .await?
            .ok_or(AppError::ReceiptNotFound(receipt_id))
    }

    pub async fn update_item(
        &self,
        receipt_id: i64,
        index: i32,
        update: &ItemUpdate,
    ) -> Result<Item, AppError> {
        queries::update_item(&self.pool, receipt_id, index, update)
            .await?
            .ok_or(AppError::ItemNotFound { receipt_id, index })
    }

    pub async fn delete(&self, receipt_id: i64) -> Result<(), AppError> {
        if queries::delete_receipt(&self.pool, receipt_id).await? {
            tracing::info!("Receipt {} deleted", receipt_id);
            Ok(())
        } else {
            Err(AppError::ReceiptNotFound(receipt_id))
        }
    }

    /// Items of a stored receipt as CSV
    pub async fn export_csv(&self, receipt_id: i64) -> Result<String, AppError> {
        let receipt = self.get(receipt_id).await?;
        Ok(queries::export_to_csv(&receipt.items)?)
    }

    /// Per-person split of a stored receipt
    pub async fn breakdown(
        &self,
        receipt_id: i64,
        assignments: &[ItemAssignment],
    ) -> Result<ReceiptBreakdown, AppError> {
        let receipt = self.get(receipt_id).await?;
        Ok(breakdown::calculate_breakdown(receipt_id, &receipt.items, assignments))
    }

    async fn receipt(&self, receipt_id: i64) -> Result<Receipt, AppError> {
        queries::get_receipt(&self.pool, receipt_id)
            .await?
            .ok_or(AppError::ReceiptNotFound(receipt_id))
    }
}
