// Core algorithm exports
pub mod boost;
pub mod distance;
pub mod filters;
pub mod lifecycle;
pub mod location;
pub mod ranker;
pub mod stats;

pub use boost::{boost_badge, is_actively_boosted, BoostTier};
pub use distance::{bounding_box, format_distance, haversine_km, is_within_bounding_box, parse_distance_label, BoundingBox, UNKNOWN_DISTANCE};
pub use filters::{is_visible_to, is_within_report_limit, matches_category, matches_search, matches_sub_filter};
pub use lifecycle::{with_reward, with_sighting, with_status, LifecycleError};
pub use location::{encode, encode_bare, extract_coordinate, strip_coordinate_suffix};
pub use ranker::{resolve_distance, resolve_location_distance, RankContext, RankError, RankResult, Ranker, ResolvedDistance};
pub use stats::ListingStats;
