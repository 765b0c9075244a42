//! Approximate user location for prefilling the coordinate field.
//!
//! [`locate_by_ip`] asks the IpApi geolocation service where the machine
//! appears to be. Unlike a typed query this is best effort: any failure is
//! logged and yields `None`, and the user simply types coordinates instead.

use crate::coords::GeoPoint;
use ipgeolocate::{Locator, Service};
use tracing::{error, info};

/// Resolves the approximate location of this machine's public IP.
///
/// # Returns
///
/// `Some(point)` in signed decimal degrees on success, `None` when the service
/// fails or answers with coordinates that don't parse.
pub async fn locate_by_ip() -> Option<GeoPoint> {
    // An empty address asks IpApi about the caller itself.
    match Locator::get("", Service::IpApi).await {
        Ok(loc) => {
            let lat = loc.latitude.parse::<f64>().ok()?;
            let lon = loc.longitude.parse::<f64>().ok()?;
            info!("Geolocation successful - {}, {} ({}, {})", loc.city, loc.country, lat, lon);
            Some(GeoPoint::new(lat, lon))
        }
        Err(e) => {
            error!("Error using geolocation service: {}", e);
            None
        }
    }
}

/// Text for the input field, e.g. `37.7749, -122.4194`.
pub fn prefill_text(point: GeoPoint) -> String {
    format!("{:.4}, {:.4}", point.lat, point.lon)
}
