use utoipa::OpenApi;

use super::api::error::ErrorResponse;
use super::api::scene::{SceneQuery, SceneResponse};

#[derive(OpenApi)]
#[openapi(
    paths(
        super::api::scene::get_scene,
        super::api::satellites::list_satellites,
    ),
    components(
        schemas(
            SceneResponse,
            SceneQuery,
            ErrorResponse,
            crate::pipeline::SatelliteWarning,
            crate::predict::ReferenceFrame,
            crate::registry::Satellite,
        )
    ),
    info(
        title = "GATI Orbit Visualization API",
        description = "Propagated satellite orbits as animated Plotly scenes",
        version = "0.1.0"
    ),
    tags(
        (name = "scene", description = "Animated orbit scenes"),
        (name = "satellites", description = "Satellite registry")
    )
)]
pub struct ApiDoc;
