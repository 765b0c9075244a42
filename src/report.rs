//! Turns search results into display-ready [`Report`] records.
//!
//! The renderer only sees headlines and key/value rows. Each report carries a
//! slot number from [`ReportFormatter`], so the UI can tell a fresh panel from
//! one it already drew.

use crate::airlines::{icao_prefix, AirlineDirectory, PRIVATE_AIRCRAFT};
use crate::coords::GeoPoint;
use crate::models::AircraftState;
use crate::nearest::NearestResult;
use crate::squawk::EmergencyAlert;
use serde::Serialize;

pub const MPS_TO_MPH: f64 = 2.236936;
pub const METERS_TO_FEET: f64 = 3.28084;

const UNKNOWN: &str = "unknown";

const COMPASS_POINTS: [&str; 16] = [
    "N", "NNE", "NE", "ENE", "E", "ESE", "SE", "SSE", "S", "SSW", "SW", "WSW", "W", "WNW", "NW",
    "NNW",
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub slot: u64,
    pub headline: String,
    pub details: Vec<(String, String)>,
}

impl Report {
    pub fn detail(&self, key: &str) -> Option<&str> {
        self.details
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// Hands out slot numbers and formats reports.
#[derive(Debug, Default)]
pub struct ReportFormatter {
    next_slot: u64,
}

impl ReportFormatter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_slot(&mut self) -> u64 {
        let slot = self.next_slot;
        self.next_slot += 1;
        slot
    }

    /// Info panel for the nearest aircraft.
    pub fn format_nearest(&mut self, result: &NearestResult, airlines: &AirlineDirectory) -> Report {
        let aircraft = &result.aircraft;
        let callsign = aircraft.callsign();
        let airline = callsign
            .and_then(icao_prefix)
            .map(|tld| airlines.lookup_by_icao(tld))
            .unwrap_or(PRIVATE_AIRCRAFT);

        let headline = match callsign {
            Some(cs) => {
                let word = airlines.lookup_callsign_word(airline);
                if word.is_empty() {
                    cs.to_string()
                } else {
                    format!("{} ({} {})", cs, word, cs.get(3..).unwrap_or("").trim())
                }
            }
            None => "unknown callsign".to_string(),
        };

        let details = vec![
            row("Distance", format!("{:.2} miles", result.distance_miles)),
            row("Airline", airline.to_string()),
            row("Origin", origin(aircraft)),
            row("Speed", opt(aircraft.velocity, format_speed)),
            row("Direction", opt(aircraft.true_track, format_direction)),
            row("Altitude", opt(aircraft.geo_altitude, format_altitude)),
            row("Vertical rate", opt(aircraft.vertical_rate, format_vertical_rate)),
            row("Position", position(aircraft)),
        ];

        Report {
            slot: self.next_slot(),
            headline,
            details,
        }
    }

    pub fn format_alert(&mut self, alert: &EmergencyAlert) -> Report {
        let aircraft = &alert.aircraft;
        let who = aircraft
            .callsign()
            .map(str::to_string)
            .unwrap_or_else(|| aircraft.icao24.clone());

        let details = vec![
            row("Squawk", alert.kind.code().to_string()),
            row("Meaning", alert.kind.description().to_string()),
            row("Callsign", aircraft.callsign().unwrap_or(UNKNOWN).to_string()),
            row("Origin", origin(aircraft)),
            row("Position", position(aircraft)),
            row("Altitude", opt(aircraft.geo_altitude, format_altitude)),
        ];

        Report {
            slot: self.next_slot(),
            headline: format!("{} is squawking {}: {}", who, alert.kind.code(), alert.kind),
            details,
        }
    }
}

fn row(key: &str, value: String) -> (String, String) {
    (key.to_string(), value)
}

fn opt(value: Option<f64>, format: fn(f64) -> String) -> String {
    value.map(format).unwrap_or_else(|| UNKNOWN.to_string())
}

fn origin(aircraft: &AircraftState) -> String {
    aircraft
        .origin_country
        .clone()
        .unwrap_or_else(|| UNKNOWN.to_string())
}

fn position(aircraft: &AircraftState) -> String {
    aircraft
        .position()
        .map(|p: GeoPoint| p.to_string())
        .unwrap_or_else(|| UNKNOWN.to_string())
}

/// 16-point compass name for a track in degrees.
pub fn compass_point(degrees: f64) -> &'static str {
    let idx = (degrees.rem_euclid(360.0) / 22.5).round() as usize % COMPASS_POINTS.len();
    COMPASS_POINTS[idx]
}

pub fn format_speed(mps: f64) -> String {
    format!("{:.0} mph", mps * MPS_TO_MPH)
}

pub fn format_direction(degrees: f64) -> String {
    format!("{:.0}° {}", degrees, compass_point(degrees))
}

pub fn format_altitude(meters: f64) -> String {
    format!("{:.0} ft", meters * METERS_TO_FEET)
}

pub fn format_vertical_rate(mps: f64) -> String {
    let fps = mps * METERS_TO_FEET;
    // avoid printing "-0.0" for level flight
    let fps = if fps.abs() < 0.05 { 0.0 } else { fps };
    format!("{:+.1} ft/sec", fps)
}
