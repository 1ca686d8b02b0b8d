use crate::models::Coordinate;

/// Earth's radius in kilometers
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Label used when a distance cannot be resolved
pub const UNKNOWN_DISTANCE: &str = "Unknown";

/// Calculate the Haversine distance between two points in kilometers
#[inline]
pub fn haversine_km(a: Coordinate, b: Coordinate) -> f64 {
    let lat1_rad = a.lat.to_radians();
    let lat2_rad = b.lat.to_radians();
    let delta_lat = (b.lat - a.lat).to_radians();
    let delta_lng = (b.lng - a.lng).to_radians();

    let h = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lng / 2.0).sin().powi(2);
    // Rounding can push h just past 1 for antipodal points
    let h = h.clamp(0.0, 1.0);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_KM * c
}

/// Format a distance for display.
///
/// Below one kilometer the value is shown in whole meters ("450 m"),
/// otherwise in kilometers with one decimal ("3.5 km").
pub fn format_distance(km: f64) -> String {
    if !km.is_finite() {
        return UNKNOWN_DISTANCE.to_string();
    }

    if km < 1.0 {
        format!("{} m", (km * 1000.0).round() as i64)
    } else {
        format!("{:.1} km", km)
    }
}

/// Parse a distance label back into kilometers for ordering.
///
/// `"Unknown"` and anything unparsable map to infinity so they sort last.
pub fn parse_distance_label(label: &str) -> f64 {
    let label = label.trim();
    if label.is_empty() || label == UNKNOWN_DISTANCE {
        return f64::INFINITY;
    }

    let (value, divisor) = if let Some(value) = label.strip_suffix("km") {
        (value, 1.0)
    } else if let Some(value) = label.strip_suffix('m') {
        (value, 1000.0)
    } else {
        return f64::INFINITY;
    };

    match value.trim().parse::<f64>() {
        Ok(v) if v.is_finite() => v / divisor,
        _ => f64::INFINITY,
    }
}

/// Geospatial bounding box
#[derive(Debug, Clone, Copy)]
pub struct BoundingBox {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lng: f64,
    pub max_lng: f64,
}

/// Calculate a bounding box around a center point
///
/// This is much faster than Haversine for pre-filtering. The box is the
/// exact extent of the spherical cap, so every point within `radius_km`
/// lies inside it. Caps reaching a pole get an unbounded longitude range.
pub fn bounding_box(center: Coordinate, radius_km: f64) -> BoundingBox {
    let angular = radius_km / EARTH_RADIUS_KM;
    let lat_delta = angular.to_degrees();

    let ratio = angular.sin() / center.lat.to_radians().cos();
    let lng_delta = if angular < std::f64::consts::FRAC_PI_2 && ratio < 1.0 {
        ratio.asin().to_degrees()
    } else {
        f64::INFINITY
    };

    BoundingBox {
        min_lat: center.lat - lat_delta,
        max_lat: center.lat + lat_delta,
        min_lng: center.lng - lng_delta,
        max_lng: center.lng + lng_delta,
    }
}

impl BoundingBox {
    /// Whether the box crosses a pole or the antimeridian, where plain
    /// degree comparisons no longer describe it
    pub fn wraps(&self) -> bool {
        self.min_lat < -90.0 || self.max_lat > 90.0 || self.min_lng < -180.0 || self.max_lng > 180.0
    }
}

/// Check if a point is within a bounding box
#[inline]
pub fn is_within_bounding_box(coord: Coordinate, bbox: &BoundingBox) -> bool {
    coord.lat >= bbox.min_lat
        && coord.lat <= bbox.max_lat
        && coord.lng >= bbox.min_lng
        && coord.lng <= bbox.max_lng
}
