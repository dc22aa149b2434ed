//! Batch compute for one visualization request: select satellites, build the
//! time grid, fetch element sets, propagate, and assemble the animated figure.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

use crate::fetch::{ElementSetFetcher, TleSource};
use crate::predict::{propagate, GridError, ReferenceFrame, SatelliteTrack, TimeGrid};
use crate::registry::{Satellite, SatelliteRegistry};
use crate::scene::{build_figure, build_frames, trail_length, EarthMesh, Figure};

pub const DEFAULT_DAYS: u32 = 30;
pub const MAX_DAYS: u32 = 35;
pub const DEFAULT_STEP_MINUTES: u32 = 30;
pub const MIN_STEP_MINUTES: u32 = 5;
pub const MAX_STEP_MINUTES: u32 = 120;
/// Upper bound on trail and marker points across all frames and satellites.
pub const MAX_SCENE_POINTS: usize = 2_000_000;

#[derive(Debug, Error)]
pub enum SceneError {
    #[error("days must be between 0 and {max}, got {0}", max = MAX_DAYS)]
    DaysOutOfRange(u32),
    #[error(
        "step must be between {min} and {max} minutes, got {0}",
        min = MIN_STEP_MINUTES,
        max = MAX_STEP_MINUTES
    )]
    StepOutOfRange(u32),
    #[error("scene would hold {points} points (max {max}), use a larger step or a shorter window")]
    TooManyPoints { points: usize, max: usize },
    #[error("invalid start date {0:?}, expected YYYY-MM-DD or RFC 3339")]
    InvalidStart(String),
    #[error("time grid: {0}")]
    Grid(#[from] GridError),
}

#[derive(Debug, Clone)]
pub struct SceneRequest {
    pub start: DateTime<Utc>,
    pub days: u32,
    pub step_minutes: u32,
    /// `None` renders every registered satellite.
    pub satellites: Option<Vec<String>>,
    pub frame: ReferenceFrame,
    pub initial_frame: usize,
}

impl Default for SceneRequest {
    fn default() -> Self {
        Self {
            start: today_utc(),
            days: DEFAULT_DAYS,
            step_minutes: DEFAULT_STEP_MINUTES,
            satellites: None,
            frame: ReferenceFrame::default(),
            initial_frame: 0,
        }
    }
}

/// A satellite left out of the run, and why.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct SatelliteWarning {
    pub satellite: String,
    pub norad_id: Option<u32>,
    pub message: String,
}

#[derive(Debug, Clone)]
pub struct SceneOutcome {
    pub figure: Figure,
    pub warnings: Vec<SatelliteWarning>,
    pub notice: Option<String>,
    /// Satellites actually drawn, in registry order.
    pub satellites: Vec<String>,
}

impl SceneOutcome {
    fn empty(
        request: &SceneRequest,
        warnings: Vec<SatelliteWarning>,
        notice: impl Into<String>,
    ) -> Self {
        Self {
            figure: build_figure(&EarthMesh::new(), &[], &[], request.frame, 0),
            warnings,
            notice: Some(notice.into()),
            satellites: Vec::new(),
        }
    }

    pub fn frame_count(&self) -> usize {
        self.figure.frame_count()
    }
}

pub async fn build_scene<S: TleSource>(
    registry: &SatelliteRegistry,
    fetcher: &mut ElementSetFetcher<S>,
    request: &SceneRequest,
) -> Result<SceneOutcome, SceneError> {
    if request.days > MAX_DAYS {
        return Err(SceneError::DaysOutOfRange(request.days));
    }
    if !(MIN_STEP_MINUTES..=MAX_STEP_MINUTES).contains(&request.step_minutes) {
        return Err(SceneError::StepOutOfRange(request.step_minutes));
    }

    let grid = TimeGrid::from_days(request.start, request.days, request.step_minutes)?;

    let mut warnings = Vec::new();
    let selected = match &request.satellites {
        None => registry.satellites().to_vec(),
        Some(names) => {
            let (selected, unknown) = registry.select(names);
            warnings.extend(unknown.into_iter().map(|name| SatelliteWarning {
                satellite: name,
                norad_id: None,
                message: "not in the satellite registry".to_string(),
            }));
            selected
        }
    };

    if selected.is_empty() {
        return Ok(SceneOutcome::empty(
            request,
            warnings,
            "No satellites selected. Pick at least one satellite in the sidebar.",
        ));
    }
    if grid.is_empty() {
        return Ok(SceneOutcome::empty(
            request,
            warnings,
            "The time window is empty. Choose at least one day to simulate.",
        ));
    }

    let trail_len = trail_length(grid.step());
    let points = scene_points(grid.len(), trail_len, selected.len());
    if points > MAX_SCENE_POINTS {
        return Err(SceneError::TooManyPoints {
            points,
            max: MAX_SCENE_POINTS,
        });
    }

    let mut tracks = Vec::with_capacity(selected.len());
    for (satellite, fetched) in fetcher.fetch_all(&selected).await {
        let element_set = match fetched {
            Ok(element_set) => element_set,
            Err(e) => {
                log::warn!("Skipping {} (CATNR={}): {}", satellite.name, satellite.norad_id, e);
                warnings.push(warning(&satellite, e.to_string()));
                continue;
            }
        };

        match propagate(&element_set, &grid, request.frame) {
            Ok(samples) => tracks.push(SatelliteTrack { satellite, samples }),
            Err(e) => {
                log::warn!(
                    "Failed to propagate {} (CATNR={}): {}",
                    satellite.name,
                    satellite.norad_id,
                    e
                );
                warnings.push(warning(&satellite, e.to_string()));
            }
        }
    }

    if tracks.is_empty() {
        return Ok(SceneOutcome::empty(
            request,
            warnings,
            "None of the selected satellites could be fetched or propagated.",
        ));
    }

    let satellites: Vec<Satellite> = tracks.iter().map(|t| t.satellite.clone()).collect();
    let frames = build_frames(&tracks, &grid, trail_len);
    let figure = build_figure(
        &EarthMesh::new(),
        registry.satellites(),
        &frames,
        request.frame,
        request.initial_frame,
    );
    log::info!(
        "Built scene: {} satellites, {} frames, {} warnings",
        satellites.len(),
        figure.frame_count(),
        warnings.len()
    );

    Ok(SceneOutcome {
        figure,
        warnings,
        notice: None,
        satellites: satellites.into_iter().map(|s| s.name).collect(),
    })
}

/// Worst-case point count of the figure: each frame holds a full trail plus a
/// marker for every satellite.
fn scene_points(frames: usize, trail_len: usize, satellites: usize) -> usize {
    frames
        .saturating_mul(trail_len + 2)
        .saturating_mul(satellites)
}

fn warning(satellite: &Satellite, message: String) -> SatelliteWarning {
    SatelliteWarning {
        satellite: satellite.name.clone(),
        norad_id: Some(satellite.norad_id),
        message,
    }
}

/// Midnight UTC of the current day.
pub fn today_utc() -> DateTime<Utc> {
    Utc::now().date_naive().and_time(NaiveTime::MIN).and_utc()
}

/// Accepts a calendar date (midnight UTC) or a full RFC 3339 timestamp.
pub fn parse_start(value: &str) -> Result<DateTime<Utc>, SceneError> {
    let value = value.trim();
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Ok(date.and_time(NaiveTime::MIN).and_utc());
    }
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| SceneError::InvalidStart(value.to_string()))
}
