use crate::error::{ParseError, ParseResult};
use crate::models::{Diagnostic, Item, OcrDocument, ParseRequest, ParserResult, PriceCandidate};
use crate::service::{associator, classifier, totals};
use bigdecimal::BigDecimal;
use rayon::prelude::*;

/// Applies a discount to an item price, rounded to cents.
pub fn merge_discount(price: &BigDecimal, discount: &BigDecimal) -> BigDecimal {
    (price + discount).round(2).with_scale(2)
}

/// Turns one price into a new item, or folds a discount into the previous one.
fn apply_price(
    document: &OcrDocument,
    receipt_id: i64,
    price: &PriceCandidate<'_>,
    items: &mut Vec<Item>,
    diagnostics: &mut Vec<Diagnostic>,
) {
    if price.is_discount() {
        match items.last_mut() {
            Some(last) => {
                let merged = merge_discount(&last.price, &price.value);
                tracing::debug!("Discount {} applied to {:?}: {} -> {}", price.canonical, last.name, last.price, merged);
                last.price = merged;
            }
            None => {
                tracing::warn!("Discount {} before any item, dropped", price.canonical);
                diagnostics.push(Diagnostic::OrphanDiscount {
                    price: price.canonical.clone(),
                    line: price.line.text.clone(),
                });
            }
        }
        return;
    }

    match associator::describe(document, price) {
        Some(name) => {
            let index = items.len() as i32;
            items.push(Item::new(index, receipt_id, name, price.value.clone()));
        }
        None => {
            tracing::warn!("No description left of price {}, skipping", price.canonical);
            diagnostics.push(Diagnostic::NoEligibleDescription {
                price: price.canonical.clone(),
                line: price.line.text.clone(),
            });
        }
    }
}

/// Extracts merchant, date, total and items from the OCR output of one receipt.
///
/// Fails only when the document has no price at all. Everything else that cannot be used is
/// skipped and reported in `ParserResult::diagnostics`.
pub fn parse_receipt(document: &OcrDocument, receipt_id: i64) -> ParseResult<ParserResult> {
    // 1. Classify and normalize
    let classification = classifier::classify(document);
    let date = classification.first_date();
    let mut diagnostics = classification.diagnostics;
    let mut prices = classification.prices;

    // 2. Total and duplicates
    totals::sort_top_to_bottom(&mut prices);
    let Some(split) = totals::split_total(&prices) else {
        return Err(ParseError::NoPriceFound {
            lines: document.line_count(),
        });
    };
    if split.item_prices.is_empty() {
        tracing::info!("Receipt {} has only a total of {}", receipt_id, split.total.canonical);
        diagnostics.push(Diagnostic::InsufficientPrices);
    }

    // 3. Items and discounts, top to bottom
    let mut items: Vec<Item> = Vec::with_capacity(split.item_prices.len());
    for price in split.item_prices {
        apply_price(document, receipt_id, price, &mut items, &mut diagnostics);
    }

    // 4. Assemble
    let name = document
        .blocks
        .first()
        .and_then(|block| block.lines.first())
        .map(|line| line.text.clone())
        .unwrap_or_default();

    tracing::info!(
        "Parsed receipt {}: {:?}, {} item(s), total {}, {} diagnostic(s)",
        receipt_id,
        name,
        items.len(),
        split.total.value,
        diagnostics.len()
    );

    Ok(ParserResult {
        name,
        date,
        total_amount: split.total.value.clone(),
        items,
        diagnostics,
    })
}

/// Parses independent documents in parallel, keeping input order.
pub fn parse_batch(requests: &[ParseRequest]) -> Vec<ParseResult<ParserResult>> {
    requests
        .par_iter()
        .map(|request| parse_receipt(&request.document, request.receipt_id))
        .collect()
}
