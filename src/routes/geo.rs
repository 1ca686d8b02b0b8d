use actix_web::{web, HttpResponse, Responder};
use chrono::Utc;
use validator::Validate;

use crate::core::{format_distance, haversine_km, BoostTier};
use crate::models::{
    BoostTierResponse, Coordinate, DistanceQuery, DistanceResponse, ErrorResponse, Location, LocationResponse,
    ParseLocationRequest,
};

/// Configure location, distance and boost routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/location/parse", web::post().to(parse_location))
        .route("/distance", web::get().to(distance))
        .route("/boost/tiers", web::get().to(boost_tiers));
}

fn validation_error(errors: validator::ValidationErrors) -> HttpResponse {
    HttpResponse::BadRequest().json(ErrorResponse {
        error: "Validation failed".to_string(),
        message: errors.to_string(),
        status_code: 400,
    })
}

/// Decode a stored location string
///
/// POST /api/v1/location/parse
async fn parse_location(req: web::Json<ParseLocationRequest>) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_error(errors);
    }

    let location = Location::parse(&req.location);

    HttpResponse::Ok().json(LocationResponse {
        display_name: location.display_name,
        coordinate: location.coordinate,
    })
}

/// Great-circle distance between two points
///
/// GET /api/v1/distance?fromLat=..&fromLng=..&toLat=..&toLng=..
async fn distance(query: web::Query<DistanceQuery>) -> impl Responder {
    if let Err(errors) = query.validate() {
        return validation_error(errors);
    }

    let km = haversine_km(
        Coordinate::new(query.from_lat, query.from_lng),
        Coordinate::new(query.to_lat, query.to_lng),
    );

    HttpResponse::Ok().json(DistanceResponse {
        km,
        label: format_distance(km),
    })
}

/// Boost tiers available for purchase
///
/// GET /api/v1/boost/tiers
async fn boost_tiers() -> impl Responder {
    let now = Utc::now();

    let tiers: Vec<BoostTierResponse> = BoostTier::ALL
        .iter()
        .map(|&tier| BoostTierResponse {
            tier,
            duration_hours: tier.duration_hours(),
            price_cents: tier.price_cents(),
            popular: tier.is_popular(),
            expires_at: tier.expiry_from(now),
        })
        .collect();

    HttpResponse::Ok().json(tiers)
}
