use rust_decimal::Decimal;

use crate::models::holding::Holding;
use crate::models::household::Household;
use crate::models::ownership::Perspective;
use crate::models::summary::{
    CategoryBreakdown, CategoryBucket, CompositionEntry, DetailBreakdown, NetWorthSummary,
    Overview,
};
use crate::money;
use crate::services::ownership_service::OwnershipService;

/// Groups holdings by category and derives net worth from a household snapshot.
///
/// Every call recomputes from scratch; nothing is cached between calls, so
/// repeated or out-of-order invocations return identical results.
pub struct CategoryService {
    ownership: OwnershipService,
}

impl CategoryService {
    pub fn new() -> Self {
        Self {
            ownership: OwnershipService::new(),
        }
    }

    /// Partition holdings into category buckets, summing each bucket's
    /// perspective-weighted share. Buckets appear in first-encounter order.
    pub fn group_by_category<I>(&self, holdings: I, perspective: Perspective) -> CategoryBreakdown
    where
        I: IntoIterator,
        I::Item: Into<Holding>,
    {
        let mut buckets: Vec<CategoryBucket> = Vec::new();

        for holding in holdings {
            let holding: Holding = holding.into();
            let share = self.ownership.personal_share(&holding, perspective);
            let category = holding.category();

            match buckets.iter_mut().find(|b| b.category == category) {
                Some(bucket) => {
                    bucket.total = money::add(bucket.total, share);
                    bucket.items.push(holding);
                }
                None => buckets.push(CategoryBucket {
                    category: category.to_string(),
                    total: share,
                    items: vec![holding],
                }),
            }
        }

        CategoryBreakdown { buckets }
    }

    /// Total assets (including lent cash), total liabilities and net worth.
    pub fn net_worth(&self, household: &Household, perspective: Perspective) -> NetWorthSummary {
        let total_assets = self
            .ownership
            .total_share(&household.asset_side(), perspective);
        let total_liabilities = self
            .ownership
            .total_share(&household.liability_side(), perspective);

        NetWorthSummary {
            perspective,
            total_assets,
            total_liabilities,
            net_worth: money::sub(total_assets, total_liabilities),
        }
    }

    /// Totals plus both category breakdowns for one perspective.
    ///
    /// The summary is summed from the breakdowns themselves so the figures on
    /// one overview always agree with each other.
    pub fn overview(&self, household: &Household, perspective: Perspective) -> Overview {
        let assets = self.group_by_category(household.asset_side(), perspective);
        let liabilities = self.group_by_category(household.liability_side(), perspective);
        let total_assets = assets.total();
        let total_liabilities = liabilities.total();

        Overview {
            summary: NetWorthSummary {
                perspective,
                total_assets,
                total_liabilities,
                net_worth: money::sub(total_assets, total_liabilities),
            },
            assets,
            liabilities,
        }
    }

    /// Items grouped at full value for the assets/liabilities management view.
    /// Lent cash is not part of this view.
    pub fn detail_breakdown(&self, household: &Household) -> DetailBreakdown {
        DetailBreakdown {
            assets: self.group_by_category(&household.assets, Perspective::Family),
            liabilities: self.group_by_category(&household.liabilities, Perspective::Family),
        }
    }

    /// One merged map of signed category contributions: asset-side amounts
    /// count positive, liability-side amounts negative. Categories appear in
    /// first-encounter order, asset side first.
    pub fn composition(
        &self,
        household: &Household,
        perspective: Perspective,
    ) -> Vec<CompositionEntry> {
        let mut entries: Vec<CompositionEntry> = Vec::new();

        let sides = [
            (household.asset_side(), true),
            (household.liability_side(), false),
        ];
        for (holdings, is_asset) in &sides {
            for holding in holdings {
                let share = self.ownership.personal_share(holding, perspective);
                let idx = match entries.iter().position(|e| e.category == holding.category()) {
                    Some(idx) => idx,
                    None => {
                        entries.push(CompositionEntry {
                            category: holding.category().to_string(),
                            assets: Decimal::ZERO,
                            liabilities: Decimal::ZERO,
                            net: Decimal::ZERO,
                        });
                        entries.len() - 1
                    }
                };
                let entry = &mut entries[idx];
                if *is_asset {
                    entry.assets = money::add(entry.assets, share);
                } else {
                    entry.liabilities = money::add(entry.liabilities, share);
                }
                entry.net = money::sub(entry.assets, entry.liabilities);
            }
        }

        tracing::trace!(
            categories = entries.len(),
            %perspective,
            "net worth composition computed"
        );
        entries
    }
}

impl Default for CategoryService {
    fn default() -> Self {
        Self::new()
    }
}
