use crate::models::PriceCandidate;

/// Prices split into the receipt total and the item-level prices above it
#[derive(Debug)]
pub struct TotalSplit<'c, 'a> {
    pub total: &'c PriceCandidate<'a>,
    /// Top to bottom, duplicates of the total removed
    pub item_prices: &'c [PriceCandidate<'a>],
}

/// Stable sort top to bottom by vertical center.
pub fn sort_top_to_bottom(prices: &mut [PriceCandidate<'_>]) {
    prices.sort_by(|a, b| a.center_y().total_cmp(&b.center_y()));
}

/// Drops the run of prices at the end of `prices` equal to `total`.
///
/// The first element is never dropped, even when it also equals the total.
pub fn trim_trailing_totals<'c, 'a>(
    prices: &'c [PriceCandidate<'a>],
    total: &PriceCandidate<'_>,
) -> &'c [PriceCandidate<'a>] {
    let mut end = prices.len();
    while end > 1 && prices[end - 1].value == total.value {
        end -= 1;
    }
    &prices[..end]
}

/// Takes the bottom-most price as the total. `sorted` must already be top to bottom.
pub fn split_total<'c, 'a>(sorted: &'c [PriceCandidate<'a>]) -> Option<TotalSplit<'c, 'a>> {
    let (total, rest) = sorted.split_last()?;
    let item_prices = trim_trailing_totals(rest, total);

    let dropped = rest.len() - item_prices.len();
    if dropped > 0 {
        tracing::debug!("Dropped {} duplicate total line(s) of {}", dropped, total.canonical);
    }

    Some(TotalSplit { total, item_prices })
}
