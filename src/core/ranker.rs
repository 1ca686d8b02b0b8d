use chrono::{DateTime, Utc};
use std::cmp::Ordering;
use thiserror::Error;

use crate::core::{
    boost::{boost_badge, is_actively_boosted},
    distance::{
        bounding_box, format_distance, haversine_km, is_within_bounding_box, parse_distance_label, BoundingBox,
        UNKNOWN_DISTANCE,
    },
    filters::{is_visible_to, is_within_report_limit, matches_category, matches_search, matches_sub_filter},
};
use crate::models::{Category, Coordinate, Item, Location, RankedItem, RankingPolicy, SortMode};

/// Errors that can occur while ranking
#[derive(Debug, Error, PartialEq)]
pub enum RankError {
    #[error("Invalid category: {0}")]
    InvalidCategory(String),
}

/// Viewer context for one ranking call.
///
/// Everything the ranker depends on is passed in here, including the clock.
#[derive(Debug, Clone)]
pub struct RankContext {
    /// Category label or English name, e.g. `"寵物"` or `"Pet"`
    pub category: String,
    pub sub_filter: String,
    pub query: String,
    pub sort_by: SortMode,
    pub viewer: Option<Coordinate>,
    pub is_admin: bool,
    pub now: DateTime<Utc>,
    /// Drop items farther than this; unknown distances are dropped too
    pub max_distance_km: Option<f64>,
}

impl RankContext {
    pub fn new(category: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            category: category.into(),
            sub_filter: "all".to_string(),
            query: String::new(),
            sort_by: SortMode::default(),
            viewer: None,
            is_admin: false,
            now,
            max_distance_km: None,
        }
    }
}

/// Result of the ranking process
#[derive(Debug)]
pub struct RankResult {
    pub category: Category,
    pub items: Vec<RankedItem>,
    pub total_items: usize,
}

/// Resolved distance between the viewer and an item
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedDistance {
    /// Infinity when unknown
    pub km: f64,
    pub label: String,
}

/// Resolve an item's distance from the viewer.
///
/// A live haversine distance wins when both ends have coordinates; otherwise
/// the label precomputed by the data source is used; otherwise unknown.
pub fn resolve_distance(item: &Item, viewer: Option<Coordinate>) -> ResolvedDistance {
    resolve_location_distance(&item.last_seen, item.distance.as_deref(), viewer)
}

/// [`resolve_distance`] for any stored location, e.g. a sighting
pub fn resolve_location_distance(
    location: &Location,
    precomputed: Option<&str>,
    viewer: Option<Coordinate>,
) -> ResolvedDistance {
    if let (Some(viewer), Some(coord)) = (viewer, location.coordinate) {
        let km = haversine_km(viewer, coord);
        return ResolvedDistance {
            km,
            label: format_distance(km),
        };
    }

    match precomputed.filter(|label| !label.trim().is_empty()) {
        Some(label) => ResolvedDistance {
            km: parse_distance_label(label),
            label: label.to_string(),
        },
        None => ResolvedDistance {
            km: f64::INFINITY,
            label: UNKNOWN_DISTANCE.to_string(),
        },
    }
}

/// Bounding box for the radius stage, when one can stand in for the circle
fn radius_prefilter(ctx: &RankContext) -> Option<BoundingBox> {
    let viewer = ctx.viewer?;
    let max_km = ctx.max_distance_km.filter(|km| km.is_finite())?;

    Some(bounding_box(viewer, max_km)).filter(|bbox| !bbox.wraps())
}

/// Listing ranker - filters and orders items for one viewer
///
/// # Pipeline Stages
/// 1. Category
/// 2. Sub-filter
/// 3. Free-text search
/// 4. Admin visibility
/// 5. Fake report limit
/// 6. Optional radius (bounding box, then haversine)
/// 7. Boost tier, then the requested sort mode
#[derive(Debug, Clone)]
pub struct Ranker {
    policy: RankingPolicy,
}

impl Ranker {
    pub fn new(policy: RankingPolicy) -> Self {
        Self { policy }
    }

    pub fn with_default_policy() -> Self {
        Self {
            policy: RankingPolicy::default(),
        }
    }

    pub fn policy(&self) -> &RankingPolicy {
        &self.policy
    }

    /// Filter and order `items` for the given viewer context.
    ///
    /// Input items are left untouched. The only error is an unknown category.
    pub fn rank(&self, items: &[Item], ctx: &RankContext) -> Result<RankResult, RankError> {
        let category = Category::from_label(&ctx.category)
            .ok_or_else(|| RankError::InvalidCategory(ctx.category.clone()))?;

        let prefilter = radius_prefilter(ctx);

        let mut ranked: Vec<RankedItem> = items
            .iter()
            .filter(|item| matches_category(item, category))
            .filter(|item| matches_sub_filter(item, category, &ctx.sub_filter))
            .filter(|item| matches_search(item, &ctx.query))
            .filter(|item| is_visible_to(item, ctx.is_admin))
            .filter(|item| is_within_report_limit(item, self.policy.fake_report_limit))
            .filter_map(|item| {
                if let (Some(bbox), Some(coord)) = (&prefilter, item.last_seen.coordinate) {
                    if !is_within_bounding_box(coord, bbox) {
                        return None;
                    }
                }

                let distance = resolve_distance(item, ctx.viewer);

                if ctx.max_distance_km.is_some_and(|max_km| distance.km > max_km) {
                    return None;
                }

                let is_promoted = is_actively_boosted(
                    item,
                    distance.km,
                    ctx.now,
                    self.policy.boost_radius_km,
                );

                Some(RankedItem {
                    item: item.clone(),
                    distance_km: distance.km.is_finite().then_some(distance.km),
                    distance_label: distance.label,
                    is_promoted,
                    boost_badge: if is_promoted {
                        boost_badge(item.boost_expiry, ctx.now)
                    } else {
                        None
                    },
                })
            })
            .collect();

        // sort_by is stable, so ties keep their input order
        ranked.sort_by(|a, b| compare(a, b, ctx.sort_by));

        Ok(RankResult {
            category,
            items: ranked,
            total_items: items.len(),
        })
    }
}

impl Default for Ranker {
    fn default() -> Self {
        Self::with_default_policy()
    }
}

fn compare(a: &RankedItem, b: &RankedItem, sort_by: SortMode) -> Ordering {
    b.is_promoted.cmp(&a.is_promoted).then_with(|| match sort_by {
        SortMode::Reward => b.item.reward.cmp(&a.item.reward),
        SortMode::Time => compare_recency(a.item.last_seen_at, b.item.last_seen_at),
        SortMode::Distance => a.sort_distance().total_cmp(&b.sort_distance()),
    })
}

/// Most recent first; items without a timestamp last
fn compare_recency(a: Option<DateTime<Utc>>, b: Option<DateTime<Utc>>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => b.cmp(&a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
