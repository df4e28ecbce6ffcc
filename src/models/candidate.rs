use crate::models::RecognizedLine;
use bigdecimal::{BigDecimal, Zero};

/// A line that carries a monetary amount
#[derive(Debug, Clone)]
pub struct PriceCandidate<'a> {
    pub line: &'a RecognizedLine,
    /// Signed value, scale 2
    pub value: BigDecimal,
    /// Canonical text form, e.g. "-1.00"
    pub canonical: String,
    /// Text printed before the amount on the same line, if any
    pub inline_description: Option<String>,
}

impl PriceCandidate<'_> {
    pub fn is_discount(&self) -> bool {
        self.value < BigDecimal::zero()
    }

    pub fn center_y(&self) -> f64 {
        self.line.center_y()
    }
}

/// A line that carries a calendar date
#[derive(Debug, Clone)]
pub struct DateCandidate<'a> {
    pub line: &'a RecognizedLine,
    pub matched: String,
}
