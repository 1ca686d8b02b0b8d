// Unit tests for Lost n Found Algo

use lostnfound_algo::core::{
    boost::{boost_badge, BoostTier},
    distance::{bounding_box, format_distance, haversine_km, is_within_bounding_box, parse_distance_label},
    location::{encode, encode_bare, extract_coordinate, strip_coordinate_suffix},
};
use lostnfound_algo::models::{Category, Coordinate, Location, PetType};
use chrono::{TimeDelta, TimeZone, Utc};

#[test]
fn test_haversine_zero() {
    let ifc = Coordinate::new(22.2855, 114.1577);
    assert_eq!(haversine_km(ifc, ifc), 0.0);
}

#[test]
fn test_haversine_symmetric() {
    let central = Coordinate::new(22.2776, 114.1590);
    let mong_kok = Coordinate::new(22.3193, 114.1694);

    let there = haversine_km(central, mong_kok);
    let back = haversine_km(mong_kok, central);
    assert!((there - back).abs() < 1e-9);
}

#[test]
fn test_haversine_central_to_mong_kok() {
    // Roughly 4.7 km as the crow flies
    let central = Coordinate::new(22.2776, 114.1590);
    let mong_kok = Coordinate::new(22.3193, 114.1694);

    let distance = haversine_km(central, mong_kok);
    assert!(distance > 4.0 && distance < 5.5);
}

#[test]
fn test_haversine_antipodal() {
    let a = Coordinate::new(0.0, 0.0);
    let b = Coordinate::new(0.0, 180.0);

    // Half the circumference of a 6371 km sphere
    let distance = haversine_km(a, b);
    assert!((distance - std::f64::consts::PI * 6371.0).abs() < 0.01);
}

#[test]
fn test_format_distance() {
    assert_eq!(format_distance(0.45), "450 m");
    assert_eq!(format_distance(0.0), "0 m");
    assert_eq!(format_distance(3.456), "3.5 km");
    assert_eq!(format_distance(1.0), "1.0 km");
    assert_eq!(format_distance(f64::INFINITY), "Unknown");
}

#[test]
fn test_parse_distance_label() {
    assert_eq!(parse_distance_label("450 m"), 0.45);
    assert_eq!(parse_distance_label("3.5 km"), 3.5);
    assert_eq!(parse_distance_label("Unknown"), f64::INFINITY);
    assert_eq!(parse_distance_label("nearby"), f64::INFINITY);
}

#[test]
fn test_formatted_label_orders_like_distance() {
    let distances = [0.12, 0.95, 1.4, 12.0];
    let parsed: Vec<f64> = distances
        .iter()
        .map(|&km| parse_distance_label(&format_distance(km)))
        .collect();

    assert!(parsed.windows(2).all(|w| w[0] <= w[1]));
}

#[test]
fn test_encode() {
    let encoded = encode("中環 IFC 商場", Coordinate::new(22.2855, 114.1577));
    assert_eq!(encoded, "中環 IFC 商場 (22.285500, 114.157700)");
}

#[test]
fn test_encode_bare() {
    assert_eq!(
        encode_bare(Coordinate::new(22.2855, 114.1577)),
        "座標: 22.285500, 114.157700"
    );
}

#[test]
fn test_extract_from_suffix() {
    let coord = extract_coordinate("中環 IFC 商場 (22.2855, 114.1577)").unwrap();
    assert_eq!(coord, Coordinate::new(22.2855, 114.1577));
}

#[test]
fn test_extract_negative_and_integer() {
    let coord = extract_coordinate("Somewhere (-33, 151.2)").unwrap();
    assert_eq!(coord, Coordinate::new(-33.0, 151.2));
}

#[test]
fn test_extract_bare_pair() {
    assert_eq!(
        extract_coordinate("座標: 22.2855, 114.1577"),
        Some(Coordinate::new(22.2855, 114.1577))
    );
    assert_eq!(
        extract_coordinate("22.2855, 114.1577"),
        Some(Coordinate::new(22.2855, 114.1577))
    );
}

#[test]
fn test_extract_without_coordinate() {
    assert_eq!(extract_coordinate("旺角"), None);
    assert_eq!(extract_coordinate(""), None);
    // Parenthesised text that is not a pair
    assert_eq!(extract_coordinate("銅鑼灣 (近 SOGO)"), None);
    // Suffix must be at the end
    assert_eq!(extract_coordinate("(22.2855, 114.1577) 中環"), None);
}

#[test]
fn test_strip_coordinate_suffix() {
    assert_eq!(strip_coordinate_suffix("中環 IFC 商場 (22.2855, 114.1577)"), "中環 IFC 商場");
    assert_eq!(strip_coordinate_suffix("旺角"), "旺角");
    assert_eq!(strip_coordinate_suffix(""), "");
}

#[test]
fn test_encode_extract_round_trip() {
    let points = [
        Coordinate::new(22.2855, 114.1577),
        Coordinate::new(-33.8688, 151.2093),
        Coordinate::new(0.0, -0.5),
    ];

    for coord in points {
        let encoded = encode("地點", coord);
        let decoded = extract_coordinate(&encoded).unwrap();

        assert!((decoded.lat - coord.lat).abs() < 1e-6);
        assert!((decoded.lng - coord.lng).abs() < 1e-6);
        assert_eq!(strip_coordinate_suffix(&encoded), "地點");
    }
}

#[test]
fn test_location_parse() {
    let location = Location::parse("中環 IFC 商場 (22.2855, 114.1577)");
    assert_eq!(location.display_name, "中環 IFC 商場");
    assert!(location.is_resolved());
    assert_eq!(location.to_legacy_string(), "中環 IFC 商場 (22.2855, 114.1577)");

    let unresolved = Location::parse("旺角");
    assert_eq!(unresolved.display_name, "旺角");
    assert!(!unresolved.is_resolved());
}

#[test]
fn test_location_from_parts() {
    let location = Location::from_parts("中環", Coordinate::new(22.2776, 114.159));
    assert_eq!(location.to_legacy_string(), "中環 (22.277600, 114.159000)");
}

#[test]
fn test_bounding_box() {
    let center = Coordinate::new(22.2855, 114.1577);
    let bbox = bounding_box(center, 2.0);

    assert!(is_within_bounding_box(center, &bbox));
    assert!(!is_within_bounding_box(Coordinate::new(22.5, 114.1577), &bbox));

    // About 0.036 degrees of latitude (2km / 111km per degree)
    let lat_span = bbox.max_lat - bbox.min_lat;
    assert!((lat_span - 0.036).abs() < 0.005);
}

#[test]
fn test_category_labels() {
    assert_eq!(Category::from_label("寵物"), Some(Category::Pet));
    assert_eq!(Category::from_label("電子產品"), Some(Category::Electronics));
    assert_eq!(Category::from_label("銀包"), Some(Category::Wallet));
    assert_eq!(Category::from_label("文件"), Some(Category::Documents));
    assert_eq!(Category::from_label("人"), Some(Category::People));
    assert_eq!(Category::from_label("其他"), Some(Category::Other));
    assert_eq!(Category::from_label("pet"), Some(Category::Pet));
    assert_eq!(Category::from_label("Vehicles"), None);
}

#[test]
fn test_pet_type_labels() {
    assert_eq!(PetType::from_label("狗"), Some(PetType::Dog));
    assert_eq!(PetType::from_label("Cat"), Some(PetType::Cat));
    assert_eq!(PetType::from_label("倉鼠"), None);
}

#[test]
fn test_boost_badge() {
    let now = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();

    assert_eq!(
        boost_badge(Some(now + TimeDelta::minutes(150)), now).as_deref(),
        Some("2h 30m left")
    );
    assert_eq!(
        boost_badge(Some(now + TimeDelta::minutes(45)), now).as_deref(),
        Some("45m left")
    );
    assert_eq!(boost_badge(None, now).as_deref(), Some("Promoted"));
}

#[test]
fn test_boost_tiers() {
    let now = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();

    assert_eq!(BoostTier::Standard.price_cents(), 199);
    assert!(BoostTier::Standard.is_popular());
    assert_eq!(BoostTier::AllDay.expiry_from(now), now + TimeDelta::hours(24));

    let hours: Vec<i64> = BoostTier::ALL.iter().map(|t| t.duration_hours()).collect();
    assert_eq!(hours, vec![2, 5, 8, 24]);
}
