use axum::Json;

use contracts::domain::a005_reference::{Atmosphere, ClayBodyType, Cone, DecorationType};

use crate::domain::a005_reference::service;
use crate::shared::data::catalogue_store::get_catalogue;
use crate::shared::error::ApiError;

/// GET /api/reference/cones
pub async fn list_cones() -> Result<Json<Vec<Cone>>, ApiError> {
    Ok(Json(service::list_cones(get_catalogue()?)))
}

/// GET /api/reference/atmospheres
pub async fn list_atmospheres() -> Result<Json<Vec<Atmosphere>>, ApiError> {
    Ok(Json(service::list_atmospheres(get_catalogue()?)))
}

/// GET /api/reference/clay_body_types
pub async fn list_clay_body_types() -> Result<Json<Vec<ClayBodyType>>, ApiError> {
    Ok(Json(service::list_clay_body_types(get_catalogue()?)))
}

/// GET /api/reference/decoration_types
pub async fn list_decoration_types() -> Result<Json<Vec<DecorationType>>, ApiError> {
    Ok(Json(service::list_decoration_types(get_catalogue()?)))
}
