use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};

/// Who shares one item
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemAssignment {
    pub item_index: i32,
    pub people: Vec<String>,
}

/// Amount one person owes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonShare {
    pub person: String,
    pub amount: BigDecimal,
}

/// Per-person split of a receipt
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReceiptBreakdown {
    pub receipt_id: i64,
    pub shares: Vec<PersonShare>,
    pub assigned_total: BigDecimal,
    pub unassigned_items: Vec<i32>,
    /// Assignment indices that point at no item
    pub unknown_items: Vec<i32>,
}
