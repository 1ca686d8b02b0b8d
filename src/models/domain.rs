use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use validator::Validate;

use crate::core::location::{encode, extract_coordinate, strip_coordinate_suffix};

/// Geographic coordinate in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Validate)]
pub struct Coordinate {
    #[validate(range(min = -90.0, max = 90.0))]
    pub lat: f64,
    #[validate(range(min = -180.0, max = 180.0))]
    pub lng: f64,
}

impl Coordinate {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Whether both components are finite and inside the valid degree ranges
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lng.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lng)
    }
}

/// Last-seen location of an item.
///
/// Stored records keep place name and coordinate in one string
/// (`"中環 IFC 商場 (22.2855, 114.1577)"`). The string is decoded once when
/// the record is loaded; `raw` is kept so the value can be written back as is.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub display_name: String,
    pub coordinate: Option<Coordinate>,
    raw: String,
}

impl Location {
    /// Decode a stored location string. Never fails; text without an
    /// embedded coordinate yields an unresolved location.
    pub fn parse(raw: &str) -> Self {
        Self {
            display_name: strip_coordinate_suffix(raw),
            coordinate: extract_coordinate(raw),
            raw: raw.to_string(),
        }
    }

    /// Build a location from a place name and coordinate, encoding the
    /// legacy string form.
    pub fn from_parts(name: &str, coordinate: Coordinate) -> Self {
        Self {
            display_name: name.trim().to_string(),
            coordinate: Some(coordinate),
            raw: encode(name.trim(), coordinate),
        }
    }

    pub fn is_resolved(&self) -> bool {
        self.coordinate.is_some()
    }

    /// The string form used by the backend table
    pub fn to_legacy_string(&self) -> String {
        self.raw.clone()
    }
}

/// Item category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Pet,
    Electronics,
    Wallet,
    Documents,
    People,
    Other,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Pet,
        Category::Electronics,
        Category::Wallet,
        Category::Documents,
        Category::People,
        Category::Other,
    ];

    /// Canonical English name, as stored in the backend
    pub fn name(self) -> &'static str {
        match self {
            Category::Pet => "Pet",
            Category::Electronics => "Electronics",
            Category::Wallet => "Wallet",
            Category::Documents => "Documents",
            Category::People => "People",
            Category::Other => "Other",
        }
    }

    /// Tab label shown in the app
    pub fn label(self) -> &'static str {
        match self {
            Category::Pet => "寵物",
            Category::Electronics => "電子產品",
            Category::Wallet => "銀包",
            Category::Documents => "文件",
            Category::People => "人",
            Category::Other => "其他",
        }
    }

    /// Resolve either the English name (any case) or the tab label
    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim();
        Self::ALL
            .into_iter()
            .find(|c| c.label() == label || c.name().eq_ignore_ascii_case(label))
    }

    /// Sub-filter chips offered for this category
    pub fn sub_filters(self) -> &'static [&'static str] {
        match self {
            Category::Pet => &["狗", "貓", "鳥", "倉鼠", "兔", "其他"],
            Category::People => &["兒童 (18歲以下)", "長者 (失智症)", "其他"],
            Category::Electronics => &["手機", "電腦/平板", "耳機", "相機", "手錶", "其他"],
            Category::Wallet => &["長夾/短夾", "卡片夾", "鑰匙包", "零錢包"],
            Category::Documents => &["身份證", "護照", "駕照", "學生證", "工作證", "其他"],
            Category::Other => &[],
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Pet sub-type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PetType {
    Dog,
    Cat,
    Bird,
    Other,
}

impl PetType {
    pub const ALL: [PetType; 4] = [PetType::Dog, PetType::Cat, PetType::Bird, PetType::Other];

    pub fn name(self) -> &'static str {
        match self {
            PetType::Dog => "Dog",
            PetType::Cat => "Cat",
            PetType::Bird => "Bird",
            PetType::Other => "Other",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PetType::Dog => "狗",
            PetType::Cat => "貓",
            PetType::Bird => "鳥",
            PetType::Other => "其他",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim();
        Self::ALL
            .into_iter()
            .find(|p| p.label() == label || p.name().eq_ignore_ascii_case(label))
    }
}

/// Listing lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ItemStatus {
    #[default]
    Lost,
    Found,
    Recovered,
    Closed,
}

impl fmt::Display for ItemStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ItemStatus::Lost => "Lost",
            ItemStatus::Found => "Found",
            ItemStatus::Recovered => "Recovered",
            ItemStatus::Closed => "Closed",
        };
        f.write_str(name)
    }
}

/// Requested ordering within a boost tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortMode {
    #[default]
    Distance,
    Reward,
    Time,
}

/// Previous reward amount, recorded when the owner edits the reward
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RewardChange {
    pub amount: u64,
    pub timestamp: DateTime<Utc>,
}

/// Reporter's confidence in a sighting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum SightingReliability {
    High,
    #[default]
    Medium,
    Low,
}

/// A sighting reported by another user
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Sighting {
    pub id: String,
    pub reporter_name: String,
    pub location: Location,
    pub description: String,
    pub reliability: SightingReliability,
    /// Distance label stored with the report, if any
    pub distance: Option<String>,
    pub timestamp: Option<DateTime<Utc>>,
}

/// A lost-and-found listing
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: String,
    pub title: String,
    pub category: Category,
    pub pet_type: Option<PetType>,
    pub description: String,
    pub reward: u64,
    pub reward_history: Vec<RewardChange>,
    pub last_seen: Location,
    pub last_seen_at: Option<DateTime<Utc>>,
    pub status: ItemStatus,
    pub owner_id: String,
    pub owner_name: String,
    /// Distance label precomputed by the data source, if any
    pub distance: Option<String>,
    pub fake_reports: u32,
    pub is_boosted: bool,
    pub boost_expiry: Option<DateTime<Utc>>,
    pub admin_hidden: bool,
    pub storage_location: Option<String>,
    /// Newest first
    pub sightings: Vec<Sighting>,
}

/// Ranked listing entry returned to the presentation layer
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedItem {
    pub item: Item,
    /// `None` when the distance could not be resolved
    pub distance_km: Option<f64>,
    pub distance_label: String,
    pub is_promoted: bool,
    pub boost_badge: Option<String>,
}

impl RankedItem {
    /// Distance used for ordering; unknown distances sort last
    pub fn sort_distance(&self) -> f64 {
        self.distance_km.unwrap_or(f64::INFINITY)
    }
}

/// Ranking thresholds
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RankingPolicy {
    /// Boosted items are only promoted within this radius of the viewer
    pub boost_radius_km: f64,
    /// Items with this many fake reports are never listed
    pub fake_report_limit: u32,
}

impl Default for RankingPolicy {
    fn default() -> Self {
        Self {
            boost_radius_km: 2.0,
            fake_report_limit: 10,
        }
    }
}
