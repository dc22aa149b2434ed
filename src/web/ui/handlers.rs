use axum::{extract::State, response::IntoResponse};

use crate::pipeline::{
    today_utc, DEFAULT_DAYS, DEFAULT_STEP_MINUTES, MAX_DAYS, MAX_STEP_MINUTES, MIN_STEP_MINUTES,
};
use crate::web::state::AppState;

use super::templates::IndexTemplate;

const SLIDER_MIN_DAYS: u32 = 7;

pub async fn index(State(state): State<AppState>) -> impl IntoResponse {
    IndexTemplate {
        satellites: state
            .registry
            .satellites()
            .iter()
            .map(|s| s.name.clone())
            .collect(),
        start_date: today_utc().format("%Y-%m-%d").to_string(),
        days: DEFAULT_DAYS,
        min_days: SLIDER_MIN_DAYS,
        max_days: MAX_DAYS,
        step_minutes: DEFAULT_STEP_MINUTES,
        min_step_minutes: MIN_STEP_MINUTES,
        max_step_minutes: MAX_STEP_MINUTES,
    }
}
