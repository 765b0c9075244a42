//! Expanding-radius search for the nearest aircraft.
//!
//! A search starts with a small box around the origin and doubles its radius
//! every time the source comes back empty or without a state list. It stops on
//! the first non-empty batch, or reports [`SearchOutcome::Exhausted`] once
//! [`SearchPolicy`] runs out of attempts or radius. Transport failures are not
//! retried: they end the search with the [`FetchError`].

use crate::coords::GeoPoint;
use crate::errors::FetchError;
use crate::geo::{compute_bounding_box, BoundingBox};
use crate::models::AircraftState;
use crate::nearest::{select_nearest, NearestResult};
use crate::squawk::{detect_emergencies, EmergencyAlert};
use serde::{Deserialize, Serialize};
use std::future::Future;
use tracing::{debug, info, warn};

/// Anything that can answer "which aircraft are inside this box".
pub trait AircraftSource {
    /// `Ok(None)` means the response had no state list at all, `Ok(Some(vec![]))`
    /// an empty one. Both are retried with a bigger box.
    fn fetch_states(
        &self,
        bbox: &BoundingBox,
    ) -> impl Future<Output = Result<Option<Vec<AircraftState>>, FetchError>> + Send;
}

/// Bounds on the radius doubling, `[search]` in config.toml.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct SearchPolicy {
    pub initial_radius_deg: f64,
    pub max_radius_deg: f64,
    pub max_attempts: u32,
}

impl Default for SearchPolicy {
    fn default() -> Self {
        Self {
            initial_radius_deg: 1.0,
            // the clamped box covers the whole globe at 180
            max_radius_deg: 180.0,
            max_attempts: 10,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SearchState {
    Searching {
        radius_deg: f64,
        attempt: u32,
    },
    Found {
        batch: Vec<AircraftState>,
        radius_deg: f64,
        attempts: u32,
    },
    Exhausted {
        attempts: u32,
        last_radius_deg: f64,
    },
}

impl SearchPolicy {
    /// Returns `self` if the radii can actually grow to `max_radius_deg`,
    /// otherwise the default policy.
    pub fn validated(self) -> Self {
        let radius_ok = self.initial_radius_deg.is_finite()
            && self.initial_radius_deg > 0.0
            && self.max_radius_deg.is_finite()
            && self.max_radius_deg >= self.initial_radius_deg;

        if radius_ok && self.max_attempts > 0 {
            self
        } else {
            warn!(
                "Invalid [search] settings {:?}, using defaults {:?}",
                self,
                SearchPolicy::default()
            );
            SearchPolicy::default()
        }
    }

    pub fn start(&self) -> SearchState {
        SearchState::Searching {
            radius_deg: self.initial_radius_deg.min(self.max_radius_deg),
            attempt: 1,
        }
    }

    /// State after the fetch for `(radius_deg, attempt)` returned `response`.
    pub fn next_state(
        &self,
        radius_deg: f64,
        attempt: u32,
        response: Option<Vec<AircraftState>>,
    ) -> SearchState {
        match response {
            Some(batch) if !batch.is_empty() => SearchState::Found {
                batch,
                radius_deg,
                attempts: attempt,
            },
            _ if attempt >= self.max_attempts || radius_deg >= self.max_radius_deg => {
                SearchState::Exhausted {
                    attempts: attempt,
                    last_radius_deg: radius_deg,
                }
            }
            _ => SearchState::Searching {
                radius_deg: (radius_deg * 2.0).min(self.max_radius_deg),
                attempt: attempt + 1,
            },
        }
    }
}

/// How a search ended, when the source never failed outright.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    Found {
        nearest: NearestResult,
        alerts: Vec<EmergencyAlert>,
        aircraft_count: usize,
        radius_deg: f64,
        attempts: u32,
    },
    /// Aircraft came back but none of them reported a position.
    NoEligibleAircraft {
        alerts: Vec<EmergencyAlert>,
        aircraft_count: usize,
        radius_deg: f64,
        attempts: u32,
    },
    /// No aircraft at all within the policy's bounds.
    Exhausted { attempts: u32, last_radius_deg: f64 },
}

impl SearchOutcome {
    pub fn alerts(&self) -> &[EmergencyAlert] {
        match self {
            SearchOutcome::Found { alerts, .. } | SearchOutcome::NoEligibleAircraft { alerts, .. } => {
                alerts
            }
            SearchOutcome::Exhausted { .. } => &[],
        }
    }
}

/// Runs the expanding search around `origin`, fetching sequentially.
pub async fn run_search<S: AircraftSource>(
    source: &S,
    origin: GeoPoint,
    policy: &SearchPolicy,
) -> Result<SearchOutcome, FetchError> {
    let mut state = policy.start();

    loop {
        state = match state {
            SearchState::Searching { radius_deg, attempt } => {
                let bbox = compute_bounding_box(origin, radius_deg);
                debug!(
                    "Attempt {} around {} with radius {}° -> {:?}",
                    attempt, origin, radius_deg, bbox
                );
                let response = source.fetch_states(&bbox).await?;
                policy.next_state(radius_deg, attempt, response)
            }
            SearchState::Found {
                batch,
                radius_deg,
                attempts,
            } => {
                let alerts = detect_emergencies(&batch);
                let aircraft_count = batch.len();
                info!(
                    "Found {} aircraft within {}° of {} after {} attempt(s), {} alert(s)",
                    aircraft_count,
                    radius_deg,
                    origin,
                    attempts,
                    alerts.len()
                );

                return Ok(match select_nearest(origin, &batch) {
                    Some(nearest) => SearchOutcome::Found {
                        nearest,
                        alerts,
                        aircraft_count,
                        radius_deg,
                        attempts,
                    },
                    None => {
                        warn!("None of the {} aircraft reported a position", aircraft_count);
                        SearchOutcome::NoEligibleAircraft {
                            alerts,
                            aircraft_count,
                            radius_deg,
                            attempts,
                        }
                    }
                });
            }
            SearchState::Exhausted {
                attempts,
                last_radius_deg,
            } => {
                warn!(
                    "No aircraft near {} after {} attempt(s), last radius {}°",
                    origin, attempts, last_radius_deg
                );
                return Ok(SearchOutcome::Exhausted {
                    attempts,
                    last_radius_deg,
                });
            }
        };
    }
}
