use crate::models::{DateCandidate, Diagnostic, OcrDocument, PriceCandidate};
use crate::service::normalizer;
use regex::{Captures, Regex};
use std::sync::LazyLock;

// Applied to the line with all whitespace removed. The amount only counts when it starts the
// line or follows a dash or currency symbol; see `locate_price`.
static PRICE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?P<lead>[-–—])?(?P<currency>\$)?(?P<int>\d{1,3})[.,](?P<frac>\d{2})(?P<trail>[-–—])?")
        .expect("valid price regex")
});

static DATE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?:\d{4}[-/]\d{1,2}[-/]\d{1,2}|\d{1,2}[-/]\d{1,2}[-/]\d{2,4})\b")
        .expect("valid date regex")
});

/// What a single line looks like
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind {
    Price,
    Date(String),
    Text,
}

/// Classified lines of one document
#[derive(Debug, Default)]
pub struct Classification<'a> {
    /// In encounter order, not yet sorted
    pub prices: Vec<PriceCandidate<'a>>,
    pub dates: Vec<DateCandidate<'a>>,
    pub diagnostics: Vec<Diagnostic>,
}

impl Classification<'_> {
    /// First date encountered, or empty
    pub fn first_date(&self) -> String {
        self.dates.first().map(|d| d.matched.clone()).unwrap_or_default()
    }
}

pub(crate) fn strip_whitespace(text: &str) -> String {
    text.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Finds the price amount in whitespace-free text.
pub(crate) fn locate_price(compact: &str) -> Option<Captures<'_>> {
    PRICE_PATTERN.captures_iter(compact).find(|caps| {
        let whole = caps.get(0).map(|m| m.start()).unwrap_or(usize::MAX);
        whole == 0 || caps.name("lead").is_some() || caps.name("currency").is_some()
    })
}

/// Price is tested first; a line is never both.
pub fn classify_line(text: &str) -> LineKind {
    if locate_price(&strip_whitespace(text)).is_some() {
        return LineKind::Price;
    }
    match DATE_PATTERN.find(text) {
        Some(m) => LineKind::Date(m.as_str().to_string()),
        None => LineKind::Text,
    }
}

/// Tags every line of the document and normalizes the prices.
pub fn classify(document: &OcrDocument) -> Classification<'_> {
    let mut classification = Classification::default();

    for line in document.lines() {
        match classify_line(&line.text) {
            LineKind::Price => match normalizer::normalize_price(&line.text) {
                Some(price) => {
                    tracing::debug!("Price line {:?} -> {}", line.text, price.canonical);
                    classification.prices.push(PriceCandidate {
                        line,
                        value: price.value,
                        canonical: price.canonical,
                        inline_description: price.inline_description,
                    });
                }
                None => {
                    tracing::warn!("Price line {:?} could not be normalized, skipping", line.text);
                    classification.diagnostics.push(Diagnostic::MalformedPrice {
                        line: line.text.clone(),
                    });
                }
            },
            LineKind::Date(matched) => {
                tracing::debug!("Date line {:?} -> {}", line.text, matched);
                classification.dates.push(DateCandidate { line, matched });
            }
            LineKind::Text => {}
        }
    }

    classification
}
