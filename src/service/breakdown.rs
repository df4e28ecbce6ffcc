use crate::models::{Item, ItemAssignment, PersonShare, ReceiptBreakdown};
use bigdecimal::{BigDecimal, ToPrimitive, Zero};
use indexmap::IndexMap;
use std::collections::HashSet;

fn to_cents(amount: &BigDecimal) -> i64 {
    match (amount * BigDecimal::from(100)).round(0).to_i64() {
        Some(cents) => cents,
        None => {
            tracing::warn!("Amount {} out of range, counted as 0", amount);
            0
        }
    }
}

fn from_cents(cents: i64) -> BigDecimal {
    (BigDecimal::from(cents) / BigDecimal::from(100)).with_scale(2)
}

/// Splits `price` evenly over `people` in whole cents; leftover cents go to the first people.
pub fn split_evenly(price: &BigDecimal, people: usize) -> Vec<BigDecimal> {
    if people == 0 {
        return Vec::new();
    }
    let n = people as i64;
    let cents = to_cents(price);
    let base = cents.div_euclid(n);
    let extra = cents.rem_euclid(n);

    (0..n)
        .map(|i| from_cents(if i < extra { base + 1 } else { base }))
        .collect()
}

/// Computes what each person owes for a receipt.
pub fn calculate_breakdown(receipt_id: i64, items: &[Item], assignments: &[ItemAssignment]) -> ReceiptBreakdown {
    let mut shares: IndexMap<String, BigDecimal> = IndexMap::new();
    let mut assigned: HashSet<i32> = HashSet::new();
    let mut unknown_items = Vec::new();
    let mut assigned_total = BigDecimal::zero();

    for assignment in assignments {
        let Some(item) = items.iter().find(|i| i.index == assignment.item_index) else {
            tracing::warn!("Receipt {}: assignment for unknown item {}", receipt_id, assignment.item_index);
            unknown_items.push(assignment.item_index);
            continue;
        };

        // Same person listed twice still pays once
        let mut people: Vec<&String> = Vec::with_capacity(assignment.people.len());
        for person in &assignment.people {
            if !people.contains(&person) {
                people.push(person);
            }
        }
        if people.is_empty() {
            continue;
        }

        for (person, share) in people.iter().zip(split_evenly(&item.price, people.len())) {
            *shares.entry((*person).clone()).or_insert_with(BigDecimal::zero) += share;
        }
        if assigned.insert(item.index) {
            assigned_total += &item.price;
        }
    }

    let unassigned_items = items
        .iter()
        .map(|i| i.index)
        .filter(|index| !assigned.contains(index))
        .collect();

    ReceiptBreakdown {
        receipt_id,
        shares: shares
            .into_iter()
            .map(|(person, amount)| PersonShare { person, amount })
            .collect(),
        assigned_total,
        unassigned_items,
        unknown_items,
    }
}
