use rust_decimal::Decimal;

use crate::models::holding::Holding;
use crate::models::item::FinancialItem;
use crate::models::ownership::Perspective;
use crate::money;

/// Resolves how much of a holding is attributable to a perspective.
///
/// Pure business logic with no I/O or state. Total over its input: a missing
/// or unusable stake yields zero, never an error.
pub struct OwnershipService;

impl OwnershipService {
    pub fn new() -> Self {
        Self
    }

    /// Share of `holding` counted for `perspective`.
    ///
    /// - Family: the full value, ownership is never split.
    /// - Personal, lent cash: the full amount, it is owed to the holder.
    /// - Personal, item: `value * self% / 100`, or 0 when the holder has no
    ///   allocation or a nonpositive one.
    pub fn personal_share(&self, holding: &Holding, perspective: Perspective) -> Decimal {
        match (perspective, holding) {
            (Perspective::Family, h) => h.gross_value(),
            (Perspective::Personal, Holding::Loan(loan)) => loan.amount,
            (Perspective::Personal, Holding::Item(item)) => self.holder_share(item),
        }
    }

    /// Same as [`personal_share`](Self::personal_share) for a bare item.
    pub fn item_share(&self, item: &FinancialItem, perspective: Perspective) -> Decimal {
        match perspective {
            Perspective::Family => item.value,
            Perspective::Personal => self.holder_share(item),
        }
    }

    /// Sum of shares over a set of holdings.
    pub fn total_share<'a, I>(&self, holdings: I, perspective: Perspective) -> Decimal
    where
        I: IntoIterator<Item = &'a Holding>,
    {
        money::saturating_sum(
            holdings
                .into_iter()
                .map(|h| self.personal_share(h, perspective)),
        )
    }

    fn holder_share(&self, item: &FinancialItem) -> Decimal {
        match item.ownership.holder_allocation() {
            Some(alloc) if alloc.percentage > Decimal::ZERO => {
                money::percent_of(item.value, alloc.percentage)
            }
            _ => Decimal::ZERO,
        }
    }
}

impl Default for OwnershipService {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ownership::{Allocation, Ownership};

    #[test]
    fn holder_share_is_exact_for_thirds() {
        let item = FinancialItem::asset("Plot", Decimal::from(300), "Real Estate").with_ownership(
            Ownership::partial(vec![
                Allocation::holder(Decimal::new(3333, 2)),
                Allocation::new("m1", "Asha", Decimal::new(6667, 2)),
            ]),
        );
        let share = OwnershipService::new().item_share(&item, Perspective::Personal);
        assert_eq!(share, Decimal::new(9999, 2));
    }
}
