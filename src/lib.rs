//! Find the aircraft closest to a position, using live OpenSky state vectors.
//!
//! The pipeline is `coords` (parse the typed position) -> `search` (expanding
//! bounding-box fetches through an [`search::AircraftSource`]) -> `nearest`
//! and `squawk` (pick the closest aircraft, flag emergencies) -> `report`
//! (display records). The remaining modules make up the terminal front end.

pub mod airlines;
pub mod api;
pub mod app;
pub mod config;
pub mod coords;
pub mod errors;
pub mod events;
pub mod geo;
pub mod location;
pub mod logging;
pub mod models;
pub mod nearest;
pub mod report;
pub mod search;
pub mod squawk;
pub mod terminal;
pub mod ui;
