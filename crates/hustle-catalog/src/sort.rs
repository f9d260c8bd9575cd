use serde::{Deserialize, Serialize};

use hustle_types::models::Website;

use crate::parse;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortOption {
    /// Keep the datastore order.
    #[default]
    Default,
    EarningHighToLow,
    WithdrawalLowToHigh,
    RatingHighToLow,
}

impl SortOption {
    /// Stable reorder; missing or unreadable values count as 0.
    pub fn apply(self, sites: &mut [Website]) {
        match self {
            SortOption::Default => {}
            SortOption::EarningHighToLow => sites.sort_by(|a, b| {
                parse::amount(b.earning_potential_in_1hr.as_deref())
                    .total_cmp(&parse::amount(a.earning_potential_in_1hr.as_deref()))
            }),
            SortOption::WithdrawalLowToHigh => sites.sort_by(|a, b| {
                parse::amount(a.minimum_withdrawal.as_deref())
                    .total_cmp(&parse::amount(b.minimum_withdrawal.as_deref()))
            }),
            SortOption::RatingHighToLow => sites.sort_by(|a, b| {
                parse::expert_rating(b.expert_rating.as_deref())
                    .total_cmp(&parse::expert_rating(a.expert_rating.as_deref()))
            }),
        }
    }
}
