use actix_web::{web, HttpResponse, Responder};
use chrono::Utc;
use std::sync::Arc;
use validator::Validate;

use crate::core::{resolve_distance, resolve_location_distance, ListingStats, RankError, Ranker, ResolvedDistance};
use crate::models::{
    into_items, Category, CategoryResponse, ErrorResponse, HealthResponse, Item, ItemDetailResponse, ItemRecord,
    RankRequest, RankResponse, SightingDistance, StatsResponse, ViewerQuery,
};
use crate::services::{CacheKey, CacheManager, SupabaseClient, SupabaseError};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub supabase: Arc<SupabaseClient>,
    pub cache: Arc<CacheManager>,
    pub ranker: Ranker,
    pub items_table: String,
}

/// Configure listing routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/items/rank", web::post().to(rank_items))
        .route("/items/stats", web::get().to(listing_stats))
        .route("/items/{id}", web::get().to(item_detail))
        .route("/categories", web::get().to(list_categories));
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: Utc::now(),
        cache: state.cache.stats(),
    })
}

/// Load the listing, from cache when possible
async fn load_listing(state: &AppState) -> Result<Vec<ItemRecord>, SupabaseError> {
    let key = CacheKey::listing(&state.items_table);

    match state.cache.get::<Vec<ItemRecord>>(&key).await {
        Ok(records) => return Ok(records),
        Err(e) => tracing::debug!("Listing not served from cache: {}", e),
    }

    let records = state.supabase.fetch_items().await?;

    if let Err(e) = state.cache.set(&key, &records).await {
        tracing::warn!("Failed to cache listing: {}", e);
    }

    Ok(records)
}

/// Load one item, from cache when possible
async fn load_item(state: &AppState, id: &str) -> Result<ItemRecord, SupabaseError> {
    let key = CacheKey::item(id);

    match state.cache.get::<ItemRecord>(&key).await {
        Ok(record) => return Ok(record),
        Err(e) => tracing::debug!("Item {} not served from cache: {}", id, e),
    }

    let record = state.supabase.fetch_item(id).await?;

    if let Err(e) = state.cache.set(&key, &record).await {
        tracing::warn!("Failed to cache item {}: {}", id, e);
    }

    Ok(record)
}

fn source_error(e: SupabaseError) -> HttpResponse {
    tracing::error!("Failed to load listing: {}", e);
    HttpResponse::BadGateway().json(ErrorResponse {
        error: "Failed to load listing".to_string(),
        message: e.to_string(),
        status_code: 502,
    })
}

/// Rank items endpoint
///
/// POST /api/v1/items/rank
///
/// Request body:
/// ```json
/// {
///   "category": "寵物",
///   "subFilter": "全部",
///   "query": "",
///   "sortBy": "distance|reward|time",
///   "viewer": { "lat": 22.2855, "lng": 114.1577 },
///   "isAdmin": false
/// }
/// ```
async fn rank_items(state: web::Data<AppState>, req: web::Json<RankRequest>) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for rank request: field_errors={:?}", errors);
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    let req = req.into_inner();
    let ctx = req.to_context(Utc::now());

    let records = match req.items {
        Some(records) => records,
        None => match load_listing(&state).await {
            Ok(records) => records,
            Err(e) => return source_error(e),
        },
    };
    let items = into_items(records);

    tracing::debug!(
        "Ranking {} items for category {} (sort: {:?}, viewer located: {})",
        items.len(),
        ctx.category,
        ctx.sort_by,
        ctx.viewer.is_some()
    );

    match state.ranker.rank(&items, &ctx) {
        Ok(result) => {
            tracing::info!(
                "Returning {} items for category {} (from {} items)",
                result.items.len(),
                result.category,
                result.total_items
            );

            HttpResponse::Ok().json(RankResponse {
                category: result.category,
                total_results: result.items.len(),
                items: result.items,
                evaluated_at: ctx.now,
            })
        }
        Err(e @ RankError::InvalidCategory(_)) => HttpResponse::BadRequest().json(ErrorResponse {
            error: "Invalid category".to_string(),
            message: e.to_string(),
            status_code: 400,
        }),
    }
}

/// Listing statistics endpoint
///
/// GET /api/v1/items/stats
async fn listing_stats(state: web::Data<AppState>) -> impl Responder {
    let records = match load_listing(&state).await {
        Ok(records) => records,
        Err(e) => return source_error(e),
    };

    let now = Utc::now();
    let items = into_items(records);

    HttpResponse::Ok().json(StatsResponse {
        stats: ListingStats::from_items(&items, now),
        generated_at: now,
    })
}

fn known_km(distance: &ResolvedDistance) -> Option<f64> {
    distance.km.is_finite().then_some(distance.km)
}

/// Item detail endpoint
///
/// GET /api/v1/items/{id}?lat=22.2855&lng=114.1577
///
/// Resolves the item's distance and each sighting's distance from the
/// optional viewer position.
async fn item_detail(
    state: web::Data<AppState>,
    path: web::Path<String>,
    query: web::Query<ViewerQuery>,
) -> impl Responder {
    if let Err(errors) = query.validate() {
        tracing::info!("Validation failed for item detail query: field_errors={:?}", errors);
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    let id = path.into_inner();
    let record = match load_item(&state, &id).await {
        Ok(record) => record,
        Err(e @ SupabaseError::NotFound(_)) => {
            return HttpResponse::NotFound().json(ErrorResponse {
                error: "Item not found".to_string(),
                message: e.to_string(),
                status_code: 404,
            })
        }
        Err(e) => return source_error(e),
    };

    let item = match Item::try_from(record) {
        Ok(item) => item,
        Err(e) => {
            tracing::warn!("Item {} cannot be shown: {}", id, e);
            return HttpResponse::BadGateway().json(ErrorResponse {
                error: "Invalid item record".to_string(),
                message: e.to_string(),
                status_code: 502,
            });
        }
    };

    let viewer = query.viewer();
    let distance = resolve_distance(&item, viewer);
    let sighting_distances = item
        .sightings
        .iter()
        .map(|sighting| {
            let resolved = resolve_location_distance(&sighting.location, sighting.distance.as_deref(), viewer);
            SightingDistance {
                sighting_id: sighting.id.clone(),
                distance_km: known_km(&resolved),
                distance_label: resolved.label,
            }
        })
        .collect();

    HttpResponse::Ok().json(ItemDetailResponse {
        distance_km: known_km(&distance),
        distance_label: distance.label,
        sighting_distances,
        item,
    })
}

/// Category tabs and their sub-filter chips
///
/// GET /api/v1/categories
async fn list_categories() -> impl Responder {
    let categories: Vec<CategoryResponse> = Category::ALL.into_iter().map(CategoryResponse::from).collect();
    HttpResponse::Ok().json(categories)
}
