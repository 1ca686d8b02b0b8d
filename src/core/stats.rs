use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::{Item, ItemStatus};

/// Listing counts for the moderation overview
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingStats {
    pub total: usize,
    pub lost: usize,
    pub found: usize,
    pub recovered: usize,
    pub closed: usize,
    /// Listings with at least one fake report
    pub reported: usize,
    pub hidden: usize,
    /// Boosts that have not expired yet, regardless of viewer distance
    pub boosted: usize,
}

impl ListingStats {
    pub fn from_items(items: &[Item], now: DateTime<Utc>) -> Self {
        items.iter().fold(Self::default(), |mut stats, item| {
            stats.total += 1;
            match item.status {
                ItemStatus::Lost => stats.lost += 1,
                ItemStatus::Found => stats.found += 1,
                ItemStatus::Recovered => stats.recovered += 1,
                ItemStatus::Closed => stats.closed += 1,
            }
            if item.fake_reports > 0 {
                stats.reported += 1;
            }
            if item.admin_hidden {
                stats.hidden += 1;
            }
            if item.is_boosted && item.boost_expiry.map_or(true, |expiry| now <= expiry) {
                stats.boosted += 1;
            }
            stats
        })
    }
}
