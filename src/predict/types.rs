use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::registry::Satellite;

/// Coordinate frame the positions are expressed in.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    ToSchema,
    strum_macros::Display,
    clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
#[value(rename_all = "snake_case")]
pub enum ReferenceFrame {
    /// SGP4 output frame (TEME), non-rotating.
    #[default]
    Inertial,
    /// Rotates with the Earth.
    EarthFixed,
}

impl ReferenceFrame {
    pub fn short_label(&self) -> &'static str {
        match self {
            ReferenceFrame::Inertial => "ECI",
            ReferenceFrame::EarthFixed => "ECEF",
        }
    }
}

/// Position and velocity of one satellite at one grid index.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PositionSample {
    pub norad_id: u32,
    pub index: usize,
    pub timestamp: DateTime<Utc>,
    pub position_km: [f64; 3],
    pub velocity_km_s: [f64; 3],
}

/// Every sample of one satellite across the time grid.
#[derive(Debug, Clone)]
pub struct SatelliteTrack {
    pub satellite: Satellite,
    pub samples: Vec<PositionSample>,
}
