//! Lost n Found Algo - listing ranking service for the Lost n Found app
//!
//! This library provides the item ranking pipeline used by the Lost n Found
//! listing screens: location string decoding, great-circle distances, and a
//! multi-stage filter followed by boost-aware ordering.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{
    extract_coordinate, format_distance, haversine_km, strip_coordinate_suffix, RankContext, RankError, Ranker,
};
pub use models::{Category, Coordinate, Item, ItemRecord, RankRequest, RankResponse, RankedItem, SortMode};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        let coord = extract_coordinate("中環 (22.2776, 114.1590)").unwrap();
        assert_eq!(haversine_km(coord, coord), 0.0);
        assert_eq!(strip_coordinate_suffix("中環 (22.2776, 114.1590)"), "中環");
    }
}
