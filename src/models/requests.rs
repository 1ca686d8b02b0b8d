use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::core::RankContext;
use crate::models::domain::{Coordinate, SortMode};
use crate::models::records::ItemRecord;

/// Request to rank the listing for one viewer
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RankRequest {
    #[validate(length(min = 1, max = 64))]
    pub category: String,
    #[serde(default = "default_sub_filter")]
    #[validate(length(max = 64))]
    pub sub_filter: String,
    #[serde(default)]
    #[validate(length(max = 200))]
    pub query: String,
    #[serde(default)]
    pub sort_by: SortMode,
    #[serde(default)]
    #[validate(nested)]
    pub viewer: Option<Coordinate>,
    #[serde(default)]
    pub is_admin: bool,
    /// Evaluation time for boost expiry; defaults to the request time
    #[serde(default)]
    pub now: Option<DateTime<Utc>>,
    #[serde(default)]
    #[validate(range(min = 0.0))]
    pub max_distance_km: Option<f64>,
    /// Listing to rank; fetched from the item source when omitted
    #[serde(default)]
    pub items: Option<Vec<ItemRecord>>,
}

fn default_sub_filter() -> String {
    "all".to_string()
}

impl RankRequest {
    pub fn to_context(&self, now: DateTime<Utc>) -> RankContext {
        RankContext {
            category: self.category.clone(),
            sub_filter: self.sub_filter.clone(),
            query: self.query.clone(),
            sort_by: self.sort_by,
            viewer: self.viewer,
            is_admin: self.is_admin,
            now: self.now.unwrap_or(now),
            max_distance_km: self.max_distance_km,
        }
    }
}

/// Request to decode a stored location string
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ParseLocationRequest {
    #[validate(length(max = 500))]
    pub location: String,
}

/// Query parameters for the distance endpoint
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct DistanceQuery {
    #[validate(range(min = -90.0, max = 90.0))]
    pub from_lat: f64,
    #[validate(range(min = -180.0, max = 180.0))]
    pub from_lng: f64,
    #[validate(range(min = -90.0, max = 90.0))]
    pub to_lat: f64,
    #[validate(range(min = -180.0, max = 180.0))]
    pub to_lng: f64,
}

/// Optional viewer position for the item detail endpoint
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct ViewerQuery {
    #[validate(range(min = -90.0, max = 90.0))]
    pub lat: Option<f64>,
    #[validate(range(min = -180.0, max = 180.0))]
    pub lng: Option<f64>,
}

impl ViewerQuery {
    /// Both halves are needed to locate the viewer
    pub fn viewer(&self) -> Option<Coordinate> {
        Some(Coordinate::new(self.lat?, self.lng?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rank_request_defaults() {
        let req: RankRequest = serde_json::from_str(r#"{"category": "寵物"}"#).unwrap();

        assert_eq!(req.sub_filter, "all");
        assert_eq!(req.sort_by, SortMode::Distance);
        assert!(req.viewer.is_none());
        assert!(!req.is_admin);
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_rank_request_rejects_bad_viewer() {
        let req: RankRequest = serde_json::from_str(
            r#"{"category": "Pet", "sortBy": "reward", "viewer": {"lat": 120.0, "lng": 114.1}}"#,
        )
        .unwrap();

        assert_eq!(req.sort_by, SortMode::Reward);
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_rank_request_rejects_empty_category() {
        let req: RankRequest = serde_json::from_str(r#"{"category": ""}"#).unwrap();
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_viewer_query_needs_both_halves() {
        let query: ViewerQuery = serde_json::from_str(r#"{"lat": 22.2855}"#).unwrap();
        assert!(query.viewer().is_none());

        let query: ViewerQuery = serde_json::from_str(r#"{"lat": 22.2855, "lng": 114.1577}"#).unwrap();
        assert_eq!(query.viewer(), Some(Coordinate::new(22.2855, 114.1577)));

        let query: ViewerQuery = serde_json::from_str(r#"{"lat": 22.2855, "lng": 200.0}"#).unwrap();
        assert!(query.validate().is_err());
    }
}
