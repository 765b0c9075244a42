use crate::coords::GeoPoint;
use crate::geo::distance_between;
use crate::models::AircraftState;
use serde::Serialize;

/// The closest aircraft to the query origin.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NearestResult {
    pub aircraft: AircraftState,
    pub distance_miles: f64,
}

/// Picks the aircraft closest to `origin`.
///
/// Candidates without both latitude and longitude are skipped. Ties keep the
/// first candidate seen. Returns `None` when no candidate had a position.
pub fn select_nearest(origin: GeoPoint, candidates: &[AircraftState]) -> Option<NearestResult> {
    let mut best: Option<(&AircraftState, f64)> = None;

    for candidate in candidates {
        let Some(position) = candidate.position() else {
            continue;
        };
        let distance = distance_between(origin, position);
        match best {
            Some((_, best_distance)) if distance >= best_distance => {}
            _ => best = Some((candidate, distance)),
        }
    }

    best.map(|(aircraft, distance_miles)| NearestResult {
        aircraft: aircraft.clone(),
        distance_miles,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(icao24: &str, lat: Option<f64>, lon: Option<f64>) -> AircraftState {
        AircraftState {
            icao24: icao24.to_string(),
            latitude: lat,
            longitude: lon,
            ..Default::default()
        }
    }

    #[test]
    fn skips_missing_positions() {
        let candidates = vec![
            at("one", Some(1.0), Some(1.0)),
            at("nopos", None, Some(5.0)),
            at("zero", Some(0.0), Some(0.0)),
        ];
        let nearest = select_nearest(GeoPoint::new(0.0, 0.0), &candidates).unwrap();
        assert_eq!(nearest.aircraft.icao24, "zero");
        assert_eq!(nearest.distance_miles, 0.0);
    }

    #[test]
    fn ties_keep_first_seen() {
        let candidates = vec![
            at("east", Some(0.0), Some(1.0)),
            at("west", Some(0.0), Some(-1.0)),
        ];
        let nearest = select_nearest(GeoPoint::new(0.0, 0.0), &candidates).unwrap();
        assert_eq!(nearest.aircraft.icao24, "east");
    }

    #[test]
    fn no_positions_means_no_result() {
        let candidates = vec![at("a", None, None), at("b", Some(3.0), None)];
        assert!(select_nearest(GeoPoint::new(0.0, 0.0), &candidates).is_none());
        assert!(select_nearest(GeoPoint::new(0.0, 0.0), &[]).is_none());
    }
}
