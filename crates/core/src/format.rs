//! Rupee display helpers.

use rust_decimal::{Decimal, RoundingStrategy};

const CRORE: Decimal = Decimal::from_parts(10_000_000, 0, 0, false, 0);
const LAKH: Decimal = Decimal::from_parts(100_000, 0, 0, false, 0);
const THOUSAND: Decimal = Decimal::from_parts(1_000, 0, 0, false, 0);

/// Short form for cards and chart labels: `₹1.25 Cr`, `₹4.50 L`, `₹12.5 K`, `₹950`.
///
/// Negative values are never abbreviated.
pub fn format_inr_compact(value: Decimal) -> String {
    if value >= CRORE {
        format!("₹{} Cr", fixed(value / CRORE, 2))
    } else if value >= LAKH {
        format!("₹{} L", fixed(value / LAKH, 2))
    } else if value >= THOUSAND {
        format!("₹{} K", fixed(value / THOUSAND, 1))
    } else {
        format!("₹{}", fixed(value, 0))
    }
}

/// Whole rupees with Indian digit grouping: `₹12,34,567`, `-₹5,000`.
pub fn format_inr_full(value: Decimal) -> String {
    let rounded = value.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    let digits = rounded.abs().trunc().to_string();
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    format!("{sign}₹{}", group_indian(&digits))
}

/// `1234567` → `12,34,567`: the last three digits, then pairs.
fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }
    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(2);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();
    format!("{},{}", groups.join(","), tail)
}

fn fixed(value: Decimal, dp: u32) -> String {
    let rounded = value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero);
    format!("{:.*}", dp as usize, rounded)
}
