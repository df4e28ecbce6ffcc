pub mod breakdown;
pub mod candidate;
pub mod ocr;
pub mod receipt;

pub use breakdown::{ItemAssignment, PersonShare, ReceiptBreakdown};
pub use candidate::{DateCandidate, PriceCandidate};
pub use ocr::{BoundingBox, OcrDocument, ParseRequest, RecognizedLine, TextBlock};
pub use receipt::{
    Diagnostic, Item, ItemUpdate, ParserResult, Receipt, ReceiptUpdate, ReceiptWithItems,
};
