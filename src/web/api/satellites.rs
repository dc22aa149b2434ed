use axum::{extract::State, Json};

use crate::registry::Satellite;
use crate::web::state::AppState;

#[utoipa::path(
    get,
    path = "/api/satellites",
    tag = "satellites",
    responses(
        (status = 200, description = "Configured satellites in display order", body = Vec<Satellite>)
    )
)]
pub async fn list_satellites(State(state): State<AppState>) -> Json<Vec<Satellite>> {
    Json(state.registry.satellites().to_vec())
}
