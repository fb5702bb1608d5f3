//! Overflow-safe arithmetic for aggregates.
//!
//! Stored amounts are accepted as recorded, so a sum or ratio can exceed what
//! `Decimal` holds. Every aggregate goes through these helpers and saturates at
//! `Decimal::MAX` / `Decimal::MIN` instead of panicking.

use rust_decimal::Decimal;

/// Sum that saturates instead of overflowing.
pub fn saturating_sum<I>(values: I) -> Decimal
where
    I: IntoIterator<Item = Decimal>,
{
    let mut total = Decimal::ZERO;
    for value in values {
        total = add(total, value);
    }
    total
}

/// `a + b`, saturating.
pub fn add(a: Decimal, b: Decimal) -> Decimal {
    a.checked_add(b).unwrap_or_else(|| {
        tracing::warn!(%a, %b, "amount overflow, saturating");
        a.saturating_add(b)
    })
}

/// `a - b`, saturating.
pub fn sub(a: Decimal, b: Decimal) -> Decimal {
    a.checked_sub(b).unwrap_or_else(|| {
        tracing::warn!(%a, %b, "amount overflow, saturating");
        a.saturating_sub(b)
    })
}

/// `value * pct / 100`, dividing first so a 100% stake can never overflow.
pub fn percent_of(value: Decimal, pct: Decimal) -> Decimal {
    let fraction = pct / Decimal::ONE_HUNDRED;
    value.checked_mul(fraction).unwrap_or_else(|| {
        tracing::warn!(%value, %pct, "share overflow, saturating");
        value.saturating_mul(fraction)
    })
}

/// `part / whole * 100`. Zero when `whole` is not positive; saturates when
/// the ratio is too large to hold.
pub fn ratio_pct(part: Decimal, whole: Decimal) -> Decimal {
    if whole <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    part.checked_div(whole)
        .and_then(|r| r.checked_mul(Decimal::ONE_HUNDRED))
        .unwrap_or_else(|| {
            tracing::warn!(%part, %whole, "percentage overflow, saturating");
            if part.is_sign_negative() {
                Decimal::MIN
            } else {
                Decimal::MAX
            }
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sum_saturates_in_both_directions() {
        assert_eq!(saturating_sum([Decimal::MAX, Decimal::ONE]), Decimal::MAX);
        assert_eq!(saturating_sum([Decimal::MIN, Decimal::NEGATIVE_ONE]), Decimal::MIN);
        assert_eq!(saturating_sum([Decimal::ONE, Decimal::TWO]), Decimal::from(3));
    }

    #[test]
    fn full_stake_of_max_is_max() {
        assert_eq!(percent_of(Decimal::MAX, Decimal::ONE_HUNDRED), Decimal::MAX);
    }
}
