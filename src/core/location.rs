//! Location string codec.
//!
//! Stored locations combine a place name and a coordinate in one string:
//! `"中環 IFC 商場 (22.2855, 114.1577)"`, or a bare `"22.2855, 114.1577"`
//! optionally prefixed with a `"座標: "` marker. Parsing is best-effort and
//! never fails; text without a recognisable coordinate is simply unresolved.

use regex::Regex;
use std::sync::LazyLock;

use crate::models::Coordinate;

/// Decimal places used when encoding coordinates
pub const COORDINATE_PRECISION: usize = 6;

/// Prefixes written in front of bare coordinate pairs
const COORDINATE_MARKERS: [&str; 2] = ["座標:", "Coordinates:"];

/// Trailing `(lat, lng)`, including any whitespace before the parenthesis
static SUFFIX_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\s*\((-?[0-9]+(?:\.[0-9]+)?),\s*(-?[0-9]+(?:\.[0-9]+)?)\)$")
        .expect("coordinate suffix pattern is valid")
});

/// Whole-string `lat, lng`
static BARE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(-?[0-9]+(?:\.[0-9]+)?),\s*(-?[0-9]+(?:\.[0-9]+)?)$")
        .expect("bare coordinate pattern is valid")
});

/// Encode a place name and coordinate as `"<name> (<lat>, <lng>)"`
pub fn encode(name: &str, coord: Coordinate) -> String {
    format!(
        "{} ({:.prec$}, {:.prec$})",
        name,
        coord.lat,
        coord.lng,
        prec = COORDINATE_PRECISION
    )
}

/// Encode a coordinate with no place name, as `"座標: <lat>, <lng>"`
pub fn encode_bare(coord: Coordinate) -> String {
    format!(
        "座標: {:.prec$}, {:.prec$}",
        coord.lat,
        coord.lng,
        prec = COORDINATE_PRECISION
    )
}

/// Extract the coordinate embedded in a location string.
///
/// Tries a trailing `(lat, lng)` first, then the whole string as a bare
/// `lat, lng` pair (after removing a coordinate marker).
pub fn extract_coordinate(loc: &str) -> Option<Coordinate> {
    if let Some(caps) = SUFFIX_PATTERN.captures(loc.trim_end()) {
        return coordinate_from(&caps[1], &caps[2]);
    }

    let mut bare = loc.trim();
    for marker in COORDINATE_MARKERS {
        if let Some(rest) = bare.strip_prefix(marker) {
            bare = rest.trim_start();
            break;
        }
    }

    BARE_PATTERN
        .captures(bare)
        .and_then(|caps| coordinate_from(&caps[1], &caps[2]))
}

/// Remove a trailing `" (lat, lng)"` for display.
///
/// Returns the input unchanged when there is no such suffix.
pub fn strip_coordinate_suffix(loc: &str) -> String {
    let trimmed = loc.trim_end();
    match SUFFIX_PATTERN.find(trimmed) {
        Some(m) => trimmed[..m.start()].trim().to_string(),
        None => loc.to_string(),
    }
}

fn coordinate_from(lat: &str, lng: &str) -> Option<Coordinate> {
    Some(Coordinate::new(lat.parse().ok()?, lng.parse().ok()?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_named_location() {
        let coord = extract_coordinate("中環 IFC 商場 (22.2855, 114.1577)").unwrap();
        assert_eq!(coord, Coordinate::new(22.2855, 114.1577));
    }

    #[test]
    fn test_extract_bare_pair() {
        let coord = extract_coordinate("22.2855, 114.1577").unwrap();
        assert_eq!(coord, Coordinate::new(22.2855, 114.1577));

        let coord = extract_coordinate("  -33.8688,151.2093 ").unwrap();
        assert_eq!(coord, Coordinate::new(-33.8688, 151.2093));
    }

    #[test]
    fn test_extract_with_marker() {
        let coord = extract_coordinate("座標: 22.319300, 114.169400").unwrap();
        assert_eq!(coord, Coordinate::new(22.3193, 114.1694));

        let coord = extract_coordinate("Coordinates: 51.5074, -0.1278").unwrap();
        assert_eq!(coord, Coordinate::new(51.5074, -0.1278));
    }

    #[test]
    fn test_extract_integers() {
        let coord = extract_coordinate("Somewhere (22, 114)").unwrap();
        assert_eq!(coord, Coordinate::new(22.0, 114.0));
    }

    #[test]
    fn test_extract_unresolved() {
        assert_eq!(extract_coordinate("中環 IFC 商場"), None);
        assert_eq!(extract_coordinate(""), None);
        assert_eq!(extract_coordinate("(22.2855, )"), None);
        assert_eq!(extract_coordinate("Pier (22.2855, 114.1577) east exit"), None);
        assert_eq!(extract_coordinate("22.2855; 114.1577"), None);
        assert_eq!(extract_coordinate("1.2.3, 4"), None);
    }

    #[test]
    fn test_strip_suffix() {
        assert_eq!(strip_coordinate_suffix("中環 IFC 商場 (22.2855, 114.1577)"), "中環 IFC 商場");
        assert_eq!(strip_coordinate_suffix("IFC(22.2,114.1)"), "IFC");
    }

    #[test]
    fn test_strip_without_suffix_is_unchanged() {
        assert_eq!(strip_coordinate_suffix("旺角 花園街"), "旺角 花園街");
        assert_eq!(strip_coordinate_suffix("22.2855, 114.1577"), "22.2855, 114.1577");
        assert_eq!(strip_coordinate_suffix("黑白貓 (賓士貓)"), "黑白貓 (賓士貓)");
    }

    #[test]
    fn test_encode_round_trip() {
        let coord = Coordinate::new(22.285512, -114.157734);
        let encoded = encode("中環 IFC 商場", coord);

        assert_eq!(encoded, "中環 IFC 商場 (22.285512, -114.157734)");
        assert_eq!(extract_coordinate(&encoded), Some(coord));
        assert_eq!(strip_coordinate_suffix(&encoded), "中環 IFC 商場");
    }

    #[test]
    fn test_encode_bare_round_trip() {
        let coord = Coordinate::new(22.3193, 114.1694);
        let encoded = encode_bare(coord);

        assert_eq!(encoded, "座標: 22.319300, 114.169400");
        assert_eq!(extract_coordinate(&encoded), Some(coord));
    }
}
