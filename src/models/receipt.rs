use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// One purchased item (receipt_items)
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct Item {
    #[sqlx(rename = "item_index")]
    pub index: i32,
    pub receipt_id: i64,
    pub name: String,
    pub price: BigDecimal,
    pub quantity: i32,
}

impl Item {
    pub fn new(index: i32, receipt_id: i64, name: impl Into<String>, price: BigDecimal) -> Self {
        Self {
            index,
            receipt_id,
            name: name.into(),
            price,
            quantity: 1,
        }
    }
}

/// Something the parser skipped or worked around; never fatal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    /// Only the total was found, so there are no item prices
    InsufficientPrices,
    /// A price had no line to its left
    NoEligibleDescription { price: String, line: String },
    /// Classified as a price but the amount could not be parsed
    MalformedPrice { line: String },
    /// A discount appeared before any item existed
    OrphanDiscount { price: String, line: String },
}

/// Output of a single parse
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParserResult {
    pub name: String,
    pub date: String,
    pub total_amount: BigDecimal,
    pub items: Vec<Item>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub diagnostics: Vec<Diagnostic>,
}

impl ParserResult {
    /// Re-keys every item with the id the receipt got once stored
    pub fn with_receipt_id(mut self, receipt_id: i64) -> Self {
        for item in &mut self.items {
            item.receipt_id = receipt_id;
        }
        self
    }
}

/// Stored receipt header (receipts)
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct Receipt {
    pub id: i64,
    pub name: String,
    pub date: String,
    pub total_amount: BigDecimal,
    pub created_at: DateTime<Utc>,
}

/// Stored receipt together with its items
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReceiptWithItems {
    #[serde(flatten)]
    pub receipt: Receipt,
    pub items: Vec<Item>,
}

/// Editable fields of a stored item
#[derive(Debug, Clone, Deserialize)]
pub struct ItemUpdate {
    pub name: Option<String>,
    pub price: Option<BigDecimal>,
    pub quantity: Option<i32>,
}

/// Editable header fields of a stored receipt
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReceiptUpdate {
    pub name: Option<String>,
    pub date: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn amount(s: &str) -> BigDecimal {
        BigDecimal::from_str(s).unwrap()
    }

    #[test]
    fn test_with_receipt_id_rekeys_items() {
        let parsed = ParserResult {
            name: "Store A".to_string(),
            date: "15/03/2025".to_string(),
            total_amount: amount("6.48"),
            items: vec![
                Item::new(0, -1, "Milk", amount("3.99")),
                Item::new(1, -1, "Bread", amount("2.49")),
            ],
            diagnostics: vec![Diagnostic::InsufficientPrices],
        };

        let stored = parsed.clone().with_receipt_id(42);
        assert!(stored.items.iter().all(|i| i.receipt_id == 42));
        assert_eq!(stored.name, parsed.name);
        assert_eq!(stored.diagnostics, parsed.diagnostics);
        for (before, after) in parsed.items.iter().zip(&stored.items) {
            assert_eq!(before.index, after.index);
            assert_eq!(before.name, after.name);
            assert_eq!(before.price, after.price);
            assert_eq!(before.quantity, after.quantity);
        }
    }

    #[test]
    fn test_receipt_update_fields_are_optional() {
        let update: ReceiptUpdate = serde_json::from_str(r#"{ "name": "Corner Shop" }"#).unwrap();
        assert_eq!(update.name.as_deref(), Some("Corner Shop"));
        assert!(update.date.is_none());

        let update: ReceiptUpdate = serde_json::from_str("{}").unwrap();
        assert!(update.name.is_none() && update.date.is_none());
    }

    #[test]
    fn test_item_update_accepts_decimal_price() {
        let update: ItemUpdate = serde_json::from_str(r#"{ "price": "2.50", "quantity": 3 }"#).unwrap();
        assert_eq!(update.price, Some(amount("2.50")));
        assert_eq!(update.quantity, Some(3));
        assert!(update.name.is_none());
    }
}
