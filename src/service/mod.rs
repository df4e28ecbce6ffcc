pub mod associator;
pub mod breakdown;
pub mod classifier;
pub mod normalizer;
pub mod parser;
pub mod receipts;
pub mod totals;

pub use breakdown::calculate_breakdown;
pub use parser::{parse_batch, parse_receipt};
pub use receipts::{ReceiptService, ScannedReceipt};
