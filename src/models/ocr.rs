use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box in image coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl BoundingBox {
    pub fn new(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self { left, top, right, bottom }
    }

    pub fn center_x(&self) -> f64 {
        (self.left + self.right) / 2.0
    }

    pub fn center_y(&self) -> f64 {
        (self.top + self.bottom) / 2.0
    }
}

/// One line of text recognized by the OCR engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecognizedLine {
    pub text: String,
    pub bounding_box: BoundingBox,
}

impl RecognizedLine {
    pub fn new(text: impl Into<String>, bounding_box: BoundingBox) -> Self {
        Self {
            text: text.into(),
            bounding_box,
        }
    }

    pub fn center_x(&self) -> f64 {
        self.bounding_box.center_x()
    }

    pub fn center_y(&self) -> f64 {
        self.bounding_box.center_y()
    }
}

/// OCR block; only its iteration order matters
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TextBlock {
    pub lines: Vec<RecognizedLine>,
}

/// Full OCR output for one receipt image
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OcrDocument {
    pub blocks: Vec<TextBlock>,
}

impl OcrDocument {
    pub fn new(blocks: Vec<TextBlock>) -> Self {
        Self { blocks }
    }

    /// Every line in block order, then line order
    pub fn lines(&self) -> impl Iterator<Item = &RecognizedLine> {
        self.blocks.iter().flat_map(|b| b.lines.iter())
    }

    pub fn line_count(&self) -> usize {
        self.blocks.iter().map(|b| b.lines.len()).sum()
    }
}

/// One document to parse, keyed by the caller's receipt id
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParseRequest {
    #[serde(default)]
    pub receipt_id: i64,
    pub document: OcrDocument,
}
