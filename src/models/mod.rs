// Model exports
pub mod domain;
pub mod records;
pub mod requests;
pub mod responses;

pub use domain::{Category, Coordinate, Item, ItemStatus, Location, PetType, RankedItem, RankingPolicy, RewardChange, Sighting, SightingReliability, SortMode};
pub use records::{into_items, parse_timestamp, ItemRecord, RecordError, RecordId, RewardHistoryRecord, SightingRecord};
pub use requests::{DistanceQuery, ParseLocationRequest, RankRequest, ViewerQuery};
pub use responses::{
    BoostTierResponse, CategoryResponse, DistanceResponse, ErrorResponse, HealthResponse, ItemDetailResponse, LocationResponse,
    RankResponse, SightingDistance, StatsResponse,
};
