//! Pure helpers for listing edits.
//!
//! The backend owns persistence; these compute the updated item so every
//! client applies the same rules before writing.

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::models::{Item, ItemStatus, RewardChange, Sighting};

/// Errors for rejected listing edits
#[derive(Debug, Error, PartialEq)]
pub enum LifecycleError {
    #[error("Cannot move listing from {from} to {to}")]
    InvalidTransition { from: ItemStatus, to: ItemStatus },
}

impl ItemStatus {
    /// Whether a listing may move from this status to `next`
    pub fn can_transition_to(self, next: ItemStatus) -> bool {
        use ItemStatus::*;

        matches!(
            (self, next),
            (Lost, Found | Recovered | Closed)
                | (Found, Recovered | Closed | Lost)
                | (Recovered, Closed | Lost)
                | (Closed, Lost)
        )
    }
}

/// Change the reward, recording the previous amount in the history.
///
/// Every edit is recorded, including one that keeps the same amount.
pub fn with_reward(item: &Item, new_amount: u64, at: DateTime<Utc>) -> Item {
    let mut updated = item.clone();
    updated.reward_history.push(RewardChange {
        amount: item.reward,
        timestamp: at,
    });
    updated.reward = new_amount;
    updated
}

/// Record a new sighting.
///
/// The sighting goes to the front of the list and becomes the item's last
/// known location. The precomputed distance label described the previous
/// location, so it is dropped.
pub fn with_sighting(item: &Item, sighting: Sighting) -> Item {
    let mut updated = item.clone();
    updated.last_seen = sighting.location.clone();
    if sighting.timestamp.is_some() {
        updated.last_seen_at = sighting.timestamp;
    }
    updated.distance = None;
    updated.sightings.insert(0, sighting);
    updated
}

/// Move the listing to a new status
pub fn with_status(item: &Item, status: ItemStatus) -> Result<Item, LifecycleError> {
    if !item.status.can_transition_to(status) {
        return Err(LifecycleError::InvalidTransition {
            from: item.status,
            to: status,
        });
    }

    let mut updated = item.clone();
    updated.status = status;
    Ok(updated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, Coordinate, Location, SightingReliability};
    use chrono::TimeZone;

    fn sighting(id: &str, location: &str, timestamp: Option<DateTime<Utc>>) -> Sighting {
        Sighting {
            id: id.to_string(),
            reporter_name: "林小姐".to_string(),
            location: Location::parse(location),
            description: String::new(),
            reliability: SightingReliability::High,
            distance: None,
            timestamp,
        }
    }

    fn create_item(status: ItemStatus, reward: u64) -> Item {
        Item {
            id: "3".to_string(),
            title: "MacBook Pro 14\"".to_string(),
            category: Category::Electronics,
            pet_type: None,
            description: String::new(),
            reward,
            reward_history: vec![],
            last_seen: Location::parse("中環 IFC 商場"),
            last_seen_at: None,
            status,
            owner_id: "u4".to_string(),
            owner_name: "Lee Sir".to_string(),
            distance: None,
            fake_reports: 0,
            is_boosted: false,
            boost_expiry: None,
            admin_hidden: false,
            storage_location: None,
            sightings: vec![],
        }
    }

    #[test]
    fn test_reward_history_records_previous_amount() {
        let at = Utc.with_ymd_and_hms(2024, 3, 1, 9, 15, 0).unwrap();
        let item = create_item(ItemStatus::Lost, 2000);

        let updated = with_reward(&item, 3000, at);

        assert_eq!(updated.reward, 3000);
        assert_eq!(updated.reward_history, vec![RewardChange { amount: 2000, timestamp: at }]);
        assert_eq!(item.reward, 2000);
        assert!(item.reward_history.is_empty());
    }

    #[test]
    fn test_same_reward_still_recorded() {
        let at = Utc.with_ymd_and_hms(2024, 3, 1, 9, 15, 0).unwrap();
        let item = create_item(ItemStatus::Lost, 2000);

        let updated = with_reward(&with_reward(&item, 2000, at), 2000, at);

        assert_eq!(updated.reward, 2000);
        assert_eq!(updated.reward_history.len(), 2);
    }

    #[test]
    fn test_sighting_moves_last_seen() {
        let at = Utc.with_ymd_and_hms(2024, 3, 1, 10, 0, 0).unwrap();
        let mut item = create_item(ItemStatus::Lost, 0);
        item.distance = Some("1.2 km".to_string());
        item.sightings.push(sighting("s1", "上環", None));

        let updated = with_sighting(&item, sighting("s2", "中環 皇后大道中 (22.2820, 114.1560)", Some(at)));

        let ids: Vec<&str> = updated.sightings.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["s2", "s1"]);
        assert_eq!(updated.last_seen.display_name, "中環 皇后大道中");
        assert_eq!(updated.last_seen.coordinate, Some(Coordinate::new(22.282, 114.156)));
        assert_eq!(updated.last_seen_at, Some(at));
        assert_eq!(updated.distance, None);
        assert_eq!(item.sightings.len(), 1);
    }

    #[test]
    fn test_undated_sighting_keeps_last_seen_time() {
        let at = Utc.with_ymd_and_hms(2024, 3, 1, 8, 0, 0).unwrap();
        let mut item = create_item(ItemStatus::Lost, 0);
        item.last_seen_at = Some(at);

        let updated = with_sighting(&item, sighting("s1", "上環", None));

        assert_eq!(updated.last_seen.display_name, "上環");
        assert_eq!(updated.last_seen_at, Some(at));
    }

    #[test]
    fn test_status_transitions() {
        let item = create_item(ItemStatus::Lost, 0);
        let recovered = with_status(&item, ItemStatus::Recovered).unwrap();
        assert_eq!(recovered.status, ItemStatus::Recovered);

        let closed = with_status(&recovered, ItemStatus::Closed).unwrap();
        let reopened = with_status(&closed, ItemStatus::Lost).unwrap();
        assert_eq!(reopened.status, ItemStatus::Lost);

        assert_eq!(
            with_status(&closed, ItemStatus::Found),
            Err(LifecycleError::InvalidTransition {
                from: ItemStatus::Closed,
                to: ItemStatus::Found
            })
        );
        assert!(with_status(&item, ItemStatus::Lost).is_err());
    }
}
