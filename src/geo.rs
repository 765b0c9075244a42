//! Degree-space search boxes and great-circle distance.

use crate::coords::GeoPoint;
use serde::{Deserialize, Serialize};

/// Mean Earth radius used by [`geodesic_distance_miles`].
pub const EARTH_RADIUS_MILES: f64 = 3958.8;

pub const LAT_LIMIT: f64 = 90.0;
pub const LON_LIMIT: f64 = 180.0;

/// Query region for the state source, clamped to legal lat/lon ranges.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub lat_min: f64,
    pub lat_max: f64,
    pub lon_min: f64,
    pub lon_max: f64,
}

impl BoundingBox {
    /// True once clamping has grown the box to the whole globe.
    pub fn is_global(&self) -> bool {
        self.lat_min <= -LAT_LIMIT
            && self.lat_max >= LAT_LIMIT
            && self.lon_min <= -LON_LIMIT
            && self.lon_max >= LON_LIMIT
    }
}

/// Square box of side `2 * radius_deg` around `center`, clipped at the poles and the antimeridian.
pub fn compute_bounding_box(center: GeoPoint, radius_deg: f64) -> BoundingBox {
    // a negative radius would invert the box
    let radius_deg = radius_deg.max(0.0);
    BoundingBox {
        lat_min: (center.lat - radius_deg).clamp(-LAT_LIMIT, LAT_LIMIT),
        lat_max: (center.lat + radius_deg).clamp(-LAT_LIMIT, LAT_LIMIT),
        lon_min: (center.lon - radius_deg).clamp(-LON_LIMIT, LON_LIMIT),
        lon_max: (center.lon + radius_deg).clamp(-LON_LIMIT, LON_LIMIT),
    }
}

/// Haversine great-circle distance in statute miles.
pub fn geodesic_distance_miles(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let phi1 = lat1.to_radians();
    let phi2 = lat2.to_radians();
    let d_phi = (lat2 - lat1).to_radians();
    let d_lambda = (lon2 - lon1).to_radians();

    let h = (d_phi / 2.0).sin().powi(2) + phi1.cos() * phi2.cos() * (d_lambda / 2.0).sin().powi(2);

    // rounding can push h a hair past 1 for antipodal points
    2.0 * EARTH_RADIUS_MILES * h.clamp(0.0, 1.0).sqrt().asin()
}

pub fn distance_between(a: GeoPoint, b: GeoPoint) -> f64 {
    geodesic_distance_miles(a.lat, a.lon, b.lat, b.lon)
}
