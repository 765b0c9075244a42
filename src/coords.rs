//! Coordinate entry for the overhead search.
//!
//! Users type positions either as signed decimal degrees (`38.5, -77.2`) or
//! with direction letters (`38.5°N, 77.2°W`). Everything downstream works on
//! a [`GeoPoint`] in signed decimal, so this module is the only place that
//! knows about the two notations.

use crate::errors::CoordinateError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A position in signed decimal degrees (WGS84).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    pub fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lon.is_finite()
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (lat, lon) = to_directional(self.lat, self.lon);
        write!(f, "{}, {}", lat, lon)
    }
}

/// What to do with inputs like `-40N` that carry both a sign and a letter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignPolicy {
    /// Reject the input as ambiguous.
    #[default]
    Strict,
    /// Drop the sign and use the opposite direction letter (N<->S, E<->W).
    FlipDirection,
}

fn is_direction(c: char) -> bool {
    matches!(c.to_ascii_uppercase(), 'N' | 'E' | 'S' | 'W')
}

fn strip_degrees(input: &str) -> String {
    input
        .chars()
        .filter(|c| *c != '°' && *c != 'º')
        .collect::<String>()
        .trim()
        .to_string()
}

// Unparsable numbers become NaN, `parse_query` rejects them via `GeoPoint::is_finite`.
fn parse_number(text: &str) -> f64 {
    text.trim().parse::<f64>().unwrap_or(f64::NAN)
}

fn parse_directional(text: &str, policy: SignPolicy) -> Result<f64, CoordinateError> {
    let mut body = text;
    let mut flip = false;

    if let Some(rest) = body.strip_prefix('-') {
        match policy {
            SignPolicy::Strict => return Err(CoordinateError::SignedDirectional(text.to_string())),
            SignPolicy::FlipDirection => {
                flip = true;
                body = rest;
            }
        }
    }

    let letter = body
        .chars()
        .find(|c| is_direction(*c))
        .map(|c| c.to_ascii_uppercase());
    let numeric: String = body.chars().filter(|c| !is_direction(*c)).collect();
    let magnitude = parse_number(&numeric);

    let southern_or_western = matches!(letter, Some('S') | Some('W'));
    if southern_or_western != flip {
        Ok(-magnitude)
    } else {
        Ok(magnitude)
    }
}

/// Parses a latitude/longitude pair using the default [`SignPolicy::Strict`].
pub fn parse_coordinate(lat_input: &str, lon_input: &str) -> Result<GeoPoint, CoordinateError> {
    parse_coordinate_with(lat_input, lon_input, SignPolicy::Strict)
}

/// Normalizes a latitude/longitude pair into signed decimal degrees.
///
/// Both inputs must use the same notation, otherwise
/// [`CoordinateError::MixedNotation`] is returned. No range check is made,
/// out-of-range values are clamped later when the search box is built.
pub fn parse_coordinate_with(
    lat_input: &str,
    lon_input: &str,
    policy: SignPolicy,
) -> Result<GeoPoint, CoordinateError> {
    let lat_text = strip_degrees(lat_input);
    let lon_text = strip_degrees(lon_input);

    let lat_directional = lat_text.chars().any(is_direction);
    let lon_directional = lon_text.chars().any(is_direction);

    match (lat_directional, lon_directional) {
        (false, false) => Ok(GeoPoint::new(parse_number(&lat_text), parse_number(&lon_text))),
        (true, true) => Ok(GeoPoint::new(
            parse_directional(&lat_text, policy)?,
            parse_directional(&lon_text, policy)?,
        )),
        _ => Err(CoordinateError::MixedNotation),
    }
}

/// Renders signed decimal degrees as `("<lat>°N|S", "<lon>°E|W")`.
pub fn to_directional(lat: f64, lon: f64) -> (String, String) {
    let lat_dir = if lat < 0.0 { 'S' } else { 'N' };
    let lon_dir = if lon < 0.0 { 'W' } else { 'E' };
    (
        format!("{}°{}", lat.abs(), lat_dir),
        format!("{}°{}", lon.abs(), lon_dir),
    )
}

/// Splits the free-text input field into its latitude and longitude parts.
///
/// A comma separates the two values when present, otherwise whitespace does.
/// In the whitespace form a detached direction letter (`38.5 N 77.2 W`) stays
/// with the number before it.
pub fn split_query(input: &str) -> Result<(String, String), CoordinateError> {
    let parts: Vec<String> = if input.contains(',') {
        input.splitn(2, ',').map(|p| p.trim().to_string()).collect()
    } else {
        join_direction_tokens(input)
    };

    let found = parts.iter().filter(|p| !p.is_empty()).count();
    match parts.as_slice() {
        [lat, lon] if !lat.is_empty() && !lon.is_empty() => Ok((lat.clone(), lon.clone())),
        _ => Err(CoordinateError::WrongFieldCount(found)),
    }
}

fn join_direction_tokens(input: &str) -> Vec<String> {
    let mut parts: Vec<String> = Vec::new();
    for token in input.split_whitespace() {
        let bare = strip_degrees(token);
        let detached =
            bare.is_empty() || (bare.chars().count() == 1 && bare.chars().all(is_direction));
        match parts.last_mut() {
            Some(prev) if detached => {
                prev.push(' ');
                prev.push_str(token);
            }
            _ => parts.push(token.to_string()),
        }
    }
    parts
}

/// Full entry point for the input field: split, parse, and require a usable point.
pub fn parse_query(input: &str, policy: SignPolicy) -> Result<GeoPoint, CoordinateError> {
    let (lat_text, lon_text) = split_query(input)?;
    let point = parse_coordinate_with(&lat_text, &lon_text, policy)?;

    if point.is_finite() {
        Ok(point)
    } else if !point.lat.is_finite() {
        Err(CoordinateError::NotANumber(lat_text))
    } else {
        Err(CoordinateError::NotANumber(lon_text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_decimal_pair() {
        let p = parse_coordinate("40.0", "-75.0").unwrap();
        assert_eq!(p, GeoPoint::new(40.0, -75.0));
    }

    #[test]
    fn directional_pair() {
        let p = parse_coordinate("40.0N", "75.0W").unwrap();
        assert_eq!(p, GeoPoint::new(40.0, -75.0));

        let p = parse_coordinate("33.9°s", "151.2°e").unwrap();
        assert_eq!(p, GeoPoint::new(-33.9, 151.2));
    }

    #[test]
    fn mixed_notation_is_rejected() {
        assert_eq!(
            parse_coordinate("40.0", "75.0W"),
            Err(CoordinateError::MixedNotation)
        );
        assert_eq!(
            parse_coordinate("40.0N", "75.0"),
            Err(CoordinateError::MixedNotation)
        );
    }

    #[test]
    fn directional_round_trip() {
        let (lat, lon) = to_directional(38.5, -77.2);
        assert_eq!(lat, "38.5°N");
        assert_eq!(lon, "77.2°W");
        assert_eq!(parse_coordinate(&lat, &lon).unwrap(), GeoPoint::new(38.5, -77.2));
    }

    #[test]
    fn signed_directional_policy() {
        assert!(matches!(
            parse_coordinate("-40N", "75W"),
            Err(CoordinateError::SignedDirectional(_))
        ));

        let p = parse_coordinate_with("-40N", "-75W", SignPolicy::FlipDirection).unwrap();
        assert_eq!(p, GeoPoint::new(-40.0, 75.0));
    }

    #[test]
    fn missing_magnitude_is_nan() {
        let p = parse_coordinate("N", "75W").unwrap();
        assert!(p.lat.is_nan());
        assert_eq!(p.lon, -75.0);
    }

    #[test]
    fn out_of_range_passes_through() {
        let p = parse_coordinate("95", "200").unwrap();
        assert_eq!(p, GeoPoint::new(95.0, 200.0));
    }

    #[test]
    fn split_on_comma_or_whitespace() {
        assert_eq!(
            split_query("38.5, -77.2").unwrap(),
            ("38.5".to_string(), "-77.2".to_string())
        );
        assert_eq!(
            split_query("  38.5   -77.2 ").unwrap(),
            ("38.5".to_string(), "-77.2".to_string())
        );
        assert_eq!(
            split_query("38.5 °N,77.2 °W").unwrap(),
            ("38.5 °N".to_string(), "77.2 °W".to_string())
        );
        assert_eq!(split_query("38.5"), Err(CoordinateError::WrongFieldCount(1)));
        assert_eq!(split_query("1 2 3"), Err(CoordinateError::WrongFieldCount(3)));
        assert_eq!(split_query("38.5,"), Err(CoordinateError::WrongFieldCount(1)));
    }

    #[test]
    fn query_rejects_non_numbers() {
        assert_eq!(
            parse_query("abc, 12", SignPolicy::Strict),
            Err(CoordinateError::NotANumber("abc".to_string()))
        );
        assert_eq!(
            parse_query("12, W", SignPolicy::Strict),
            Err(CoordinateError::MixedNotation)
        );
        assert_eq!(
            parse_query("12N, W", SignPolicy::Strict),
            Err(CoordinateError::NotANumber("W".to_string()))
        );
        let p = parse_query("38.5 °N, 77.2 °W", SignPolicy::Strict).unwrap();
        assert_eq!(p, GeoPoint::new(38.5, -77.2));
        assert!(p.is_finite());
    }

    #[test]
    fn detached_direction_letters_stay_with_their_number() {
        assert_eq!(
            split_query("38.5 N 77.2 W").unwrap(),
            ("38.5 N".to_string(), "77.2 W".to_string())
        );
        assert_eq!(
            split_query("38.5 °N 77.2 °W").unwrap(),
            ("38.5 °N".to_string(), "77.2 °W".to_string())
        );
        assert_eq!(split_query("38.5 N"), Err(CoordinateError::WrongFieldCount(1)));
        assert_eq!(
            split_query("N 38.5 77.2"),
            Err(CoordinateError::WrongFieldCount(3))
        );

        for input in ["38.5 N 77.2 W", "38.5 °N 77.2 °W", "38.5° N  77.2° w"] {
            assert_eq!(
                parse_query(input, SignPolicy::Strict).unwrap(),
                GeoPoint::new(38.5, -77.2),
                "{input}"
            );
        }
    }

    #[test]
    fn point_display_is_directional() {
        assert_eq!(GeoPoint::new(-33.5, 151.25).to_string(), "33.5°S, 151.25°E");
    }
}
