use crate::coords::GeoPoint;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Last known state of one aircraft, as reported by OpenSky.
///
/// Every field the API can leave null is an `Option`, `None` meaning unknown.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AircraftState {
    pub icao24: String,
    pub callsign: Option<String>,
    pub origin_country: Option<String>,
    pub longitude: Option<f64>,
    pub latitude: Option<f64>,
    pub geo_altitude: Option<f64>,   // metres
    pub velocity: Option<f64>,       // m/s over ground
    pub true_track: Option<f64>,     // degrees clockwise from north
    pub vertical_rate: Option<f64>,  // m/s, positive is climbing
    pub squawk: Option<String>,
}

impl AircraftState {
    /// Position, if both latitude and longitude were reported.
    pub fn position(&self) -> Option<GeoPoint> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lon)) => Some(GeoPoint::new(lat, lon)),
            _ => None,
        }
    }

    /// Trimmed callsign, `None` when absent or blank.
    pub fn callsign(&self) -> Option<&str> {
        self.callsign
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}

/// Body of `GET /api/states/all`. `states` is null when nothing is in the box.
#[derive(Debug, Deserialize)]
pub struct OpenSkyResponse {
    pub time: Option<i64>,
    pub states: Option<Vec<Vec<Value>>>,
}

impl OpenSkyResponse {
    /// Converts the raw state vectors, `None` if the `states` field was missing or null.
    pub fn into_states(self) -> Option<Vec<AircraftState>> {
        self.states
            .map(|states| states.into_iter().map(AircraftState::from).collect())
    }
}

// State vector positions, see https://openskynetwork.github.io/opensky-api/rest.html
const IDX_ICAO24: usize = 0;
const IDX_CALLSIGN: usize = 1;
const IDX_ORIGIN_COUNTRY: usize = 2;
const IDX_LONGITUDE: usize = 5;
const IDX_LATITUDE: usize = 6;
const IDX_VELOCITY: usize = 9;
const IDX_TRUE_TRACK: usize = 10;
const IDX_VERTICAL_RATE: usize = 11;
const IDX_GEO_ALTITUDE: usize = 13;
const IDX_SQUAWK: usize = 14;

// Unmarshal the positional JSON state vector from OpenSky into an
// AircraftState. Short vectors and nulls leave fields unknown.
impl From<Vec<Value>> for AircraftState {
    fn from(data: Vec<Value>) -> Self {
        let text = |i: usize| data.get(i).and_then(Value::as_str).map(str::to_string);
        let number = |i: usize| data.get(i).and_then(Value::as_f64);

        Self {
            icao24: text(IDX_ICAO24).unwrap_or_default().trim().to_string(),
            callsign: text(IDX_CALLSIGN),
            origin_country: text(IDX_ORIGIN_COUNTRY),
            longitude: number(IDX_LONGITUDE),
            latitude: number(IDX_LATITUDE),
            geo_altitude: number(IDX_GEO_ALTITUDE),
            velocity: number(IDX_VELOCITY),
            true_track: number(IDX_TRUE_TRACK),
            vertical_rate: number(IDX_VERTICAL_RATE),
            squawk: text(IDX_SQUAWK),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BODY: &str = r#"{"time":1700000000,"states":[
        ["a0b1c2","UAL123  ","United States",1700000000,1700000000,-77.2,38.5,10000.0,false,230.5,90.0,-2.5,null,10300.0,"7700",false,0],
        ["3c6444","DLH4AB  ","Germany",null,null,null,null,null,true,0.0,null,null,null,null,null,false,0],
        ["abcdef",null]
    ]}"#;

    #[test]
    fn decodes_state_vectors() {
        let res: OpenSkyResponse = serde_json::from_str(BODY).unwrap();
        let states = res.into_states().unwrap();
        assert_eq!(states.len(), 3);

        let ual = &states[0];
        assert_eq!(ual.icao24, "a0b1c2");
        assert_eq!(ual.callsign(), Some("UAL123"));
        assert_eq!(ual.origin_country.as_deref(), Some("United States"));
        assert_eq!(ual.position(), Some(GeoPoint::new(38.5, -77.2)));
        assert_eq!(ual.velocity, Some(230.5));
        assert_eq!(ual.true_track, Some(90.0));
        assert_eq!(ual.vertical_rate, Some(-2.5));
        assert_eq!(ual.geo_altitude, Some(10300.0));
        assert_eq!(ual.squawk.as_deref(), Some("7700"));

        let dlh = &states[1];
        assert_eq!(dlh.position(), None);
        assert_eq!(dlh.squawk, None);

        let short = &states[2];
        assert_eq!(short.icao24, "abcdef");
        assert_eq!(short.callsign(), None);
        assert_eq!(short.latitude, None);
    }

    #[test]
    fn null_or_missing_states() {
        let res: OpenSkyResponse = serde_json::from_str(r#"{"time":1,"states":null}"#).unwrap();
        assert!(res.into_states().is_none());

        let res: OpenSkyResponse = serde_json::from_str(r#"{"time":1}"#).unwrap();
        assert!(res.into_states().is_none());
    }

    #[test]
    fn partial_position_has_no_point() {
        let state = AircraftState {
            latitude: Some(1.0),
            ..Default::default()
        };
        assert_eq!(state.position(), None);
    }
}
