//! Emergency transponder codes.
//!
//! Every aircraft in a fetched batch is checked, not just the nearest one, so
//! a single query can raise several alerts.

use crate::models::AircraftState;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EmergencyKind {
    /// 7500
    Hijacking,
    /// 7600
    RadioContactLoss,
    /// 7700
    DeclaredEmergency,
}

impl EmergencyKind {
    pub fn code(&self) -> &'static str {
        match self {
            EmergencyKind::Hijacking => "7500",
            EmergencyKind::RadioContactLoss => "7600",
            EmergencyKind::DeclaredEmergency => "7700",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            EmergencyKind::Hijacking => "hijacking",
            EmergencyKind::RadioContactLoss => "radio contact lost",
            EmergencyKind::DeclaredEmergency => "declared emergency",
        }
    }
}

impl fmt::Display for EmergencyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

/// An aircraft in the batch that is squawking one of the emergency codes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmergencyAlert {
    pub kind: EmergencyKind,
    pub aircraft: AircraftState,
}

pub fn check_emergency_squawk(code: Option<&str>) -> Option<EmergencyKind> {
    match code.map(str::trim)? {
        "7500" => Some(EmergencyKind::Hijacking),
        "7600" => Some(EmergencyKind::RadioContactLoss),
        "7700" => Some(EmergencyKind::DeclaredEmergency),
        _ => None,
    }
}

/// Alerts for every aircraft in `batch` with an emergency squawk, in batch order.
pub fn detect_emergencies(batch: &[AircraftState]) -> Vec<EmergencyAlert> {
    batch
        .iter()
        .filter_map(|aircraft| {
            check_emergency_squawk(aircraft.squawk.as_deref()).map(|kind| EmergencyAlert {
                kind,
                aircraft: aircraft.clone(),
            })
        })
        .collect()
}
