use crate::service::classifier::{locate_price, strip_whitespace};
use bigdecimal::BigDecimal;
use std::str::FromStr;

/// Price line converted to a signed amount
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedPrice {
    pub value: BigDecimal,
    pub canonical: String,
    pub inline_description: Option<String>,
}

/// Converts a price line into its signed value and canonical form.
///
/// The sign comes from a dash directly before (optionally ahead of the currency symbol) or
/// directly after the amount; the digits themselves are always unsigned. Returns `None` when
/// the text holds no parseable amount.
pub fn normalize_price(text: &str) -> Option<NormalizedPrice> {
    let compact = strip_whitespace(text);
    let caps = locate_price(&compact)?;

    let negative = caps.name("lead").is_some() || caps.name("trail").is_some();
    let canonical = format!(
        "{}{}.{}",
        if negative { "-" } else { "" },
        caps.name("int")?.as_str(),
        caps.name("frac")?.as_str(),
    );
    let value = BigDecimal::from_str(&canonical).ok()?.with_scale(2);

    let start = caps.get(0)?.start();
    let inline_description = inline_prefix(text, compact[..start].chars().count());

    Some(NormalizedPrice {
        value,
        canonical,
        inline_description,
    })
}

/// Text of the original line before its `kept`-th non-whitespace character, trimmed.
fn inline_prefix(text: &str, kept: usize) -> Option<String> {
    if kept == 0 {
        return None;
    }
    let end = text
        .char_indices()
        .filter(|(_, c)| !c.is_whitespace())
        .nth(kept)
        .map(|(i, _)| i)?;
    let prefix = text[..end].trim();
    (!prefix.is_empty()).then(|| prefix.to_string())
}
