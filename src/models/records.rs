use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use super::domain::{Category, Item, ItemStatus, Location, PetType, RewardChange, Sighting, SightingReliability};

/// Errors converting a backend row into an [`Item`]
#[derive(Debug, Error, PartialEq)]
pub enum RecordError {
    #[error("Unknown category '{category}' on item {id}")]
    UnknownCategory { id: String, category: String },
}

/// Primary key as returned by PostgREST: `bigint` and `uuid`/`text` columns
/// both occur
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Number(i64),
    Text(String),
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordId::Number(n) => write!(f, "{}", n),
            RecordId::Text(s) => f.write_str(s),
        }
    }
}

/// Row of the backend `sightings` table, embedded in item rows
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SightingRecord {
    pub id: RecordId,
    #[serde(default)]
    pub reporter_name: Option<String>,
    #[serde(default)]
    pub location_name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub reliability: Option<SightingReliability>,
    #[serde(default)]
    pub distance: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl From<SightingRecord> for Sighting {
    fn from(record: SightingRecord) -> Self {
        Sighting {
            id: record.id.to_string(),
            reporter_name: record.reporter_name.unwrap_or_else(|| "Anonymous".to_string()),
            location: Location::parse(record.location_name.as_deref().unwrap_or("")),
            description: record.description.unwrap_or_default(),
            reliability: record.reliability.unwrap_or_default(),
            distance: record.distance.filter(|d| !d.trim().is_empty()),
            timestamp: record.created_at.as_deref().and_then(parse_timestamp),
        }
    }
}

/// Reward history entry as stored in the `reward_history` JSON column
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RewardHistoryRecord {
    pub amount: u64,
    pub timestamp: String,
}

/// Row of the backend `items` table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemRecord {
    pub id: RecordId,
    pub title: String,
    pub category: String,
    #[serde(default)]
    pub pet_type: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub reward: Option<u64>,
    #[serde(default)]
    pub reward_history: Option<Vec<RewardHistoryRecord>>,
    #[serde(default)]
    pub last_seen_location: Option<String>,
    #[serde(default)]
    pub last_seen_timestamp: Option<String>,
    #[serde(default)]
    pub status: Option<ItemStatus>,
    #[serde(default)]
    pub owner_id: Option<String>,
    #[serde(default)]
    pub owner_name: Option<String>,
    #[serde(default)]
    pub distance: Option<String>,
    #[serde(default)]
    pub fake_reports: Option<u32>,
    #[serde(default)]
    pub is_boosted: Option<bool>,
    #[serde(default)]
    pub boost_expiry: Option<String>,
    #[serde(default)]
    pub admin_hidden: Option<bool>,
    #[serde(default)]
    pub storage_location: Option<String>,
    /// Embedded through `select=*,sightings(*)`
    #[serde(default)]
    pub sightings: Option<Vec<SightingRecord>>,
}

impl TryFrom<ItemRecord> for Item {
    type Error = RecordError;

    fn try_from(record: ItemRecord) -> Result<Self, Self::Error> {
        let category = Category::from_label(&record.category).ok_or_else(|| {
            RecordError::UnknownCategory {
                id: record.id.to_string(),
                category: record.category.clone(),
            }
        })?;

        let reward_history = record
            .reward_history
            .unwrap_or_default()
            .into_iter()
            .filter_map(|entry| {
                let timestamp = parse_timestamp(&entry.timestamp)?;
                Some(RewardChange {
                    amount: entry.amount,
                    timestamp,
                })
            })
            .collect();

        let mut sightings: Vec<Sighting> = record
            .sightings
            .unwrap_or_default()
            .into_iter()
            .map(Sighting::from)
            .collect();
        // Newest first; undated reports last
        sightings.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));

        Ok(Item {
            id: record.id.to_string(),
            title: record.title,
            category,
            pet_type: record.pet_type.as_deref().and_then(PetType::from_label),
            description: record.description.unwrap_or_default(),
            reward: record.reward.unwrap_or(0),
            reward_history,
            last_seen: Location::parse(record.last_seen_location.as_deref().unwrap_or("")),
            last_seen_at: record.last_seen_timestamp.as_deref().and_then(parse_timestamp),
            status: record.status.unwrap_or_default(),
            owner_id: record.owner_id.unwrap_or_default(),
            owner_name: record.owner_name.unwrap_or_else(|| "Anonymous".to_string()),
            distance: record.distance.filter(|d| !d.trim().is_empty()),
            fake_reports: record.fake_reports.unwrap_or(0),
            is_boosted: record.is_boosted.unwrap_or(false),
            boost_expiry: record.boost_expiry.as_deref().and_then(parse_timestamp),
            admin_hidden: record.admin_hidden.unwrap_or(false),
            storage_location: record.storage_location,
            sightings,
        })
    }
}

/// Convert backend rows, skipping rows that cannot be represented
pub fn into_items(records: Vec<ItemRecord>) -> Vec<Item> {
    records
        .into_iter()
        .filter_map(|record| match Item::try_from(record) {
            Ok(item) => Some(item),
            Err(e) => {
                tracing::warn!("Skipping item record: {}", e);
                None
            }
        })
        .collect()
}

/// Parse a stored timestamp.
///
/// Accepts RFC 3339 and the `YYYY-MM-DD HH:MM[:SS]` form written by older
/// clients, which carries no offset and is read as UTC.
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }

    ["%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M:%S%.f"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .map(|naive| naive.and_utc())
}
