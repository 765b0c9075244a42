//! Error types shared across the overhead pipeline.

use thiserror::Error;

/// Rejections from the coordinate parser and the free-text query splitter.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoordinateError {
    #[error("latitude and longitude must use the same notation (both decimal or both N/S/E/W)")]
    MixedNotation,

    #[error("'{0}' combines a minus sign with a direction letter")]
    SignedDirectional(String),

    #[error("expected a latitude and a longitude, found {0} value(s)")]
    WrongFieldCount(usize),

    #[error("could not read a number from '{0}'")]
    NotANumber(String),
}

/// Hard failures talking to the aircraft state source. These abort a search.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("transport error {0}")]
    Transport(#[from] reqwest::Error),

    #[error("state source answered with HTTP {0}")]
    Status(u16),

    #[error("could not decode state response {0}")]
    Decode(#[from] serde_json::Error),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error {0}")]
    Io(#[from] std::io::Error),

    #[error("config parse error {0}")]
    Parse(#[from] toml::de::Error),

    #[error("config serialize error {0}")]
    Serialize(#[from] toml::ser::Error),
}

#[derive(Error, Debug)]
pub enum AirlineError {
    #[error("airline table error {0}")]
    Csv(#[from] csv::Error),
}
