use chrono::{DateTime, TimeDelta, Utc};
use serde::Serialize;

use crate::models::Item;

/// Whether a boosted item is currently promoted for this viewer.
///
/// A boost only counts while it has not expired and the item lies within
/// `radius_km` of the viewer. Unknown distances (infinity) never qualify.
#[inline]
pub fn is_actively_boosted(item: &Item, distance_km: f64, now: DateTime<Utc>, radius_km: f64) -> bool {
    item.is_boosted
        && distance_km <= radius_km
        && item.boost_expiry.map_or(true, |expiry| now <= expiry)
}

/// Badge text for a promoted item: remaining boost time, or "Promoted"
/// for boosts without an expiry. `None` once the boost has run out.
pub fn boost_badge(expiry: Option<DateTime<Utc>>, now: DateTime<Utc>) -> Option<String> {
    let Some(expiry) = expiry else {
        return Some("Promoted".to_string());
    };

    let remaining = expiry - now;
    if remaining <= TimeDelta::zero() {
        return None;
    }

    let hours = remaining.num_hours();
    let minutes = remaining.num_minutes() % 60;
    if hours > 0 {
        Some(format!("{}h {}m left", hours, minutes))
    } else {
        Some(format!("{}m left", minutes))
    }
}

/// Purchasable boost durations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum BoostTier {
    Urgent,
    Standard,
    Extended,
    AllDay,
}

impl BoostTier {
    pub const ALL: [BoostTier; 4] = [
        BoostTier::Urgent,
        BoostTier::Standard,
        BoostTier::Extended,
        BoostTier::AllDay,
    ];

    pub fn duration_hours(self) -> i64 {
        match self {
            BoostTier::Urgent => 2,
            BoostTier::Standard => 5,
            BoostTier::Extended => 8,
            BoostTier::AllDay => 24,
        }
    }

    pub fn price_cents(self) -> u32 {
        match self {
            BoostTier::Urgent => 99,
            BoostTier::Standard => 199,
            BoostTier::Extended => 299,
            BoostTier::AllDay => 999,
        }
    }

    pub fn is_popular(self) -> bool {
        self == BoostTier::Standard
    }

    /// Expiry of a boost bought at `now`
    pub fn expiry_from(self, now: DateTime<Utc>) -> DateTime<Utc> {
        now + TimeDelta::hours(self.duration_hours())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, ItemStatus, Location};
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
    }

    fn create_boosted_item(expiry: Option<DateTime<Utc>>) -> Item {
        Item {
            id: "b1".to_string(),
            title: "黑色銀包".to_string(),
            category: Category::Wallet,
            pet_type: None,
            description: String::new(),
            reward: 500,
            reward_history: vec![],
            last_seen: Location::parse("銅鑼灣 (22.2800, 114.1830)"),
            last_seen_at: None,
            status: ItemStatus::Lost,
            owner_id: "u1".to_string(),
            owner_name: "陳大文".to_string(),
            distance: None,
            fake_reports: 0,
            is_boosted: true,
            boost_expiry: expiry,
            admin_hidden: false,
            storage_location: None,
            sightings: vec![],
        }
    }

    #[test]
    fn test_active_boost() {
        let item = create_boosted_item(Some(now() + TimeDelta::hours(1)));
        assert!(is_actively_boosted(&item, 1.5, now(), 2.0));
        assert!(is_actively_boosted(&item, 2.0, now(), 2.0));
    }

    #[test]
    fn test_boost_outside_radius() {
        let item = create_boosted_item(None);
        assert!(!is_actively_boosted(&item, 2.01, now(), 2.0));
        assert!(!is_actively_boosted(&item, f64::INFINITY, now(), 2.0));
    }

    #[test]
    fn test_expired_boost() {
        let item = create_boosted_item(Some(now() - TimeDelta::minutes(1)));
        assert!(!is_actively_boosted(&item, 0.5, now(), 2.0));

        // Expiry instant itself is still valid
        let item = create_boosted_item(Some(now()));
        assert!(is_actively_boosted(&item, 0.5, now(), 2.0));
    }

    #[test]
    fn test_unboosted_item() {
        let mut item = create_boosted_item(None);
        item.is_boosted = false;
        assert!(!is_actively_boosted(&item, 0.1, now(), 2.0));
    }

    #[test]
    fn test_boost_badge() {
        assert_eq!(boost_badge(None, now()).as_deref(), Some("Promoted"));
        assert_eq!(
            boost_badge(Some(now() + TimeDelta::minutes(185)), now()).as_deref(),
            Some("3h 5m left")
        );
        assert_eq!(
            boost_badge(Some(now() + TimeDelta::minutes(42)), now()).as_deref(),
            Some("42m left")
        );
        assert_eq!(boost_badge(Some(now()), now()), None);
    }

    #[test]
    fn test_tier_expiry() {
        assert_eq!(BoostTier::Standard.expiry_from(now()), now() + TimeDelta::hours(5));
        assert_eq!(BoostTier::AllDay.price_cents(), 999);
        assert_eq!(BoostTier::ALL.iter().filter(|t| t.is_popular()).count(), 1);
    }
}
