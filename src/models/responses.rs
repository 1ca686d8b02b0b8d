use serde::{Deserialize, Serialize};

use crate::core::{BoostTier, ListingStats};
use crate::models::domain::{Category, Coordinate, Item, RankedItem};
use crate::services::CacheStats;

/// Response for the rank endpoint
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankResponse {
    pub items: Vec<RankedItem>,
    pub category: Category,
    pub total_results: usize,
    pub evaluated_at: chrono::DateTime<chrono::Utc>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub cache: CacheStats,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}

/// Decoded location string
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationResponse {
    pub display_name: String,
    pub coordinate: Option<Coordinate>,
}

/// Distance between two coordinates
#[derive(Debug, Clone, Serialize)]
pub struct DistanceResponse {
    pub km: f64,
    pub label: String,
}

/// Listing statistics for the moderation overview
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse {
    #[serde(flatten)]
    pub stats: ListingStats,
    pub generated_at: chrono::DateTime<chrono::Utc>,
}

/// One purchasable boost tier with the expiry it would get if bought now
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoostTierResponse {
    pub tier: BoostTier,
    pub duration_hours: i64,
    pub price_cents: u32,
    pub popular: bool,
    pub expires_at: chrono::DateTime<chrono::Utc>,
}

/// A single item with distances resolved against the viewer
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemDetailResponse {
    pub item: Item,
    pub distance_km: Option<f64>,
    pub distance_label: String,
    /// Same order as `item.sightings`
    pub sighting_distances: Vec<SightingDistance>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SightingDistance {
    pub sighting_id: String,
    pub distance_km: Option<f64>,
    pub distance_label: String,
}

/// A category tab and its sub-filter chips
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryResponse {
    pub category: Category,
    pub label: &'static str,
    pub sub_filters: &'static [&'static str],
}

impl From<Category> for CategoryResponse {
    fn from(category: Category) -> Self {
        Self {
            category,
            label: category.label(),
            sub_filters: category.sub_filters(),
        }
    }
}
