use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::pipeline::{
    build_scene, parse_start, today_utc, SatelliteWarning, SceneError, SceneOutcome,
    SceneRequest, DEFAULT_DAYS, DEFAULT_STEP_MINUTES,
};
use crate::predict::ReferenceFrame;
use crate::scene::Figure;
use crate::web::api::error::{ApiResult, ErrorResponse};
use crate::web::state::AppState;

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct SceneQuery {
    #[serde(default)]
    pub days: Option<u32>,
    #[serde(default)]
    pub step_minutes: Option<u32>,
    #[serde(default)]
    pub start: Option<String>,
    /// Comma separated display names.
    #[serde(default)]
    pub satellites: Option<String>,
    #[serde(default)]
    pub frame: Option<ReferenceFrame>,
    #[serde(default)]
    pub initial_frame: Option<usize>,
}

impl SceneQuery {
    pub fn into_request(self) -> Result<SceneRequest, SceneError> {
        let start = match self.start.as_deref().map(str::trim) {
            Some(s) if !s.is_empty() => parse_start(s)?,
            _ => today_utc(),
        };
        let satellites = self.satellites.map(|list| {
            list.split(',')
                .map(str::trim)
                .filter(|n| !n.is_empty())
                .map(String::from)
                .collect()
        });

        Ok(SceneRequest {
            start,
            days: self.days.unwrap_or(DEFAULT_DAYS),
            step_minutes: self.step_minutes.unwrap_or(DEFAULT_STEP_MINUTES),
            satellites,
            frame: self.frame.unwrap_or_default(),
            initial_frame: self.initial_frame.unwrap_or(0),
        })
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SceneResponse {
    /// Plotly figure: `data`, `layout` and `frames`.
    #[schema(value_type = Object)]
    pub figure: Figure,
    pub frame_count: usize,
    pub satellites: Vec<String>,
    pub warnings: Vec<SatelliteWarning>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,
}

impl From<SceneOutcome> for SceneResponse {
    fn from(outcome: SceneOutcome) -> Self {
        SceneResponse {
            frame_count: outcome.frame_count(),
            figure: outcome.figure,
            satellites: outcome.satellites,
            warnings: outcome.warnings,
            notice: outcome.notice,
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/scene",
    tag = "scene",
    params(
        ("days" = Option<u32>, Query, description = "Days to simulate (0-35, default 30)"),
        ("step_minutes" = Option<u32>, Query, description = "Time step in minutes (5-120, default 30)"),
        ("start" = Option<String>, Query, description = "Start date (YYYY-MM-DD, UTC) or RFC3339 time; default today"),
        ("satellites" = Option<String>, Query, description = "Comma separated satellite names; default all"),
        ("frame" = Option<ReferenceFrame>, Query, description = "inertial or earth_fixed"),
        ("initial_frame" = Option<usize>, Query, description = "Frame shown before playback starts")
    ),
    responses(
        (status = 200, description = "Animated scene", body = SceneResponse),
        (status = 400, description = "Invalid parameters", body = ErrorResponse)
    )
)]
pub async fn get_scene(
    State(state): State<AppState>,
    query: Result<Query<SceneQuery>, QueryRejection>,
) -> ApiResult<Json<SceneResponse>> {
    let Query(query) = query?;
    let request = query.into_request()?;

    let mut fetcher = state.fetcher.lock().await;
    let outcome = build_scene(&state.registry, &mut *fetcher, &request).await?;

    Ok(Json(outcome.into()))
}
