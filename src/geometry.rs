//! Geodesic measurement functions.
//!
//! Everything here is a pure function of its inputs: great-circle distance
//! (haversine), forward bearing and a latitude-weighted ring area over a
//! spherical Earth of radius [`EARTH_RADIUS_KM`].
//!
//! The polygon area is the same discretized approximation used by common
//! web-map measurement tools. It is accurate for small and medium zones and
//! drifts as zones grow to continental extent; it is not a spherical-excess
//! computation.

use std::f64::consts::PI;

use crate::constants::{EARTH_RADIUS_KM, EARTH_RADIUS_M, M2_PER_KM2, MIN_POLYGON_POSITIONS};
use crate::model::Coordinate;

/// Great-circle distance between two coordinates in kilometres.
pub fn distance_km(a: Coordinate, b: Coordinate) -> f64 {
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lon = (b.lon - a.lon).to_radians();

    // Rounding can push antipodal pairs just past 1
    let h = ((d_lat / 2.0).sin().powi(2)
        + a.lat_rad().cos() * b.lat_rad().cos() * (d_lon / 2.0).sin().powi(2))
    .clamp(0.0, 1.0);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_KM * c
}

/// Great-circle distance between two coordinates in metres.
pub fn distance_m(a: Coordinate, b: Coordinate) -> f64 {
    distance_km(a, b) * 1000.0
}

/// Cumulative length of an open path: the sum of consecutive pairwise distances.
///
/// Returns 0 for fewer than two points.
pub fn path_length_km(points: &[Coordinate]) -> f64 {
    points.windows(2).map(|w| distance_km(w[0], w[1])).sum()
}

/// Length of a closed ring, including the closing edge back to the first point.
pub fn ring_perimeter_km(points: &[Coordinate]) -> f64 {
    match (points.first(), points.last()) {
        (Some(first), Some(last)) if points.len() > 1 => {
            path_length_km(points) + distance_km(*last, *first)
        }
        _ => 0.0,
    }
}

/// Forward azimuth from `a` to `b` in degrees, normalized to [0, 360).
pub fn bearing(a: Coordinate, b: Coordinate) -> f64 {
    let d_lon = (b.lon - a.lon).to_radians();
    let y = d_lon.sin() * b.lat_rad().cos();
    let x = a.lat_rad().cos() * b.lat_rad().sin()
        - a.lat_rad().sin() * b.lat_rad().cos() * d_lon.cos();

    let deg = y.atan2(x).to_degrees();
    let normalized = (deg + 360.0) % 360.0;
    // -0.0 and values rounding up to 360 both fold back to 0
    if normalized >= 360.0 || normalized == 0.0 {
        0.0
    } else {
        normalized
    }
}

/// Bearing of a two-point sequence.
///
/// # Panics
///
/// Bearing is only defined for exactly two points. Any other length is a
/// caller bug and panics rather than returning a made-up value.
pub fn sequence_bearing(points: &[Coordinate]) -> f64 {
    assert!(
        points.len() == 2,
        "bearing requires exactly 2 points, got {}",
        points.len()
    );
    bearing(points[0], points[1])
}

/// Surface area of a closed ring in square kilometres.
///
/// The ring wraps from the last position back to the first; callers must not
/// repeat the first position at the end.
///
/// # Panics
///
/// Panics when fewer than three positions are given.
pub fn polygon_area_km2(positions: &[Coordinate]) -> f64 {
    assert!(
        positions.len() >= MIN_POLYGON_POSITIONS,
        "area requires at least {} positions, got {}",
        MIN_POLYGON_POSITIONS,
        positions.len()
    );

    let n = positions.len();
    let mut sum = 0.0;
    for i in 0..n {
        let p1 = positions[i];
        let p2 = positions[(i + 1) % n];
        sum += (p2.lon_rad() - p1.lon_rad()) * (2.0 + p1.lat_rad().sin() + p2.lat_rad().sin());
    }

    let area_m2 = sum * EARTH_RADIUS_M * EARTH_RADIUS_M / 2.0;
    (area_m2 / M2_PER_KM2).abs()
}

/// Planar disk area for a circle of the given radius in metres, in km².
pub fn circle_area_km2(radius_m: f64) -> f64 {
    PI * radius_m * radius_m / M2_PER_KM2
}

/// Circumference of a circle of the given radius in metres, in km.
pub fn circle_perimeter_km(radius_m: f64) -> f64 {
    2.0 * PI * radius_m / 1000.0
}

/// Arithmetic mean of the positions; `None` for an empty slice.
pub fn centroid(points: &[Coordinate]) -> Option<Coordinate> {
    if points.is_empty() {
        return None;
    }
    let n = points.len() as f64;
    let (lat, lon) = points
        .iter()
        .fold((0.0, 0.0), |(lat, lon), p| (lat + p.lat, lon + p.lon));
    Some(Coordinate::new(lat / n, lon / n))
}
