use axum::extract::{Path, RawQuery};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::Value;

use contracts::shared::catalogue::{CatalogueView, FacetGroup};

use crate::domain::catalogue::service;
use crate::shared::data::catalogue_store::get_catalogue;
use crate::shared::error::ApiError;
use crate::shared::export::export_file_name;

/// GET /api/:entity/all
pub async fn list_all(Path(entity): Path<String>) -> Result<Json<Vec<Value>>, ApiError> {
    let store = get_catalogue()?;
    let entity = service::parse_entity(&entity)?;
    Ok(Json(service::list_all(store, entity)))
}

/// GET /api/:entity?q=..&f.cone=6&sort=name&page=0&pageSize=50
pub async fn list_paginated(
    Path(entity): Path<String>,
    RawQuery(raw): RawQuery,
) -> Result<Json<CatalogueView<Value>>, ApiError> {
    let store = get_catalogue()?;
    let entity = service::parse_entity(&entity)?;
    let query = service::parse_query(store, entity, raw.as_deref())?;
    Ok(Json(service::list_paginated(store, entity, &query)))
}

/// GET /api/:entity/facets
pub async fn facets(Path(entity): Path<String>) -> Result<Json<Vec<FacetGroup>>, ApiError> {
    let store = get_catalogue()?;
    let entity = service::parse_entity(&entity)?;
    Ok(Json(service::facets(store, entity)))
}

/// GET /api/:entity/export.csv
pub async fn export_csv(
    Path(entity): Path<String>,
    RawQuery(raw): RawQuery,
) -> Result<Response, ApiError> {
    let store = get_catalogue()?;
    let entity = service::parse_entity(&entity)?;
    let query = service::parse_query(store, entity, raw.as_deref())?;
    let csv = service::export_csv(store, entity, &query)?;

    let file_name = export_file_name(entity.slug(), chrono::Utc::now());
    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", file_name),
            ),
        ],
        csv,
    )
        .into_response())
}

/// GET /api/:entity/:id
pub async fn get_by_id(Path((entity, id)): Path<(String, String)>) -> Result<Json<Value>, ApiError> {
    let store = get_catalogue()?;
    let entity = service::parse_entity(&entity)?;
    Ok(Json(service::get_by_id(store, entity, &id)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    use crate::shared::data::catalogue_store::initialize_catalogue;

    fn init() {
        // повторная инициализация из параллельных тестов не ошибка
        let _ = initialize_catalogue(None, 50);
    }

    #[tokio::test]
    async fn test_list_all_and_unknown_entity() {
        init();
        let Json(tiles) = list_all(Path("test_tiles".to_string())).await.unwrap();
        assert!(!tiles.is_empty());

        let err = list_all(Path("users".to_string())).await.unwrap_err();
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_list_paginated_with_raw_query() {
        init();
        let Json(view) = list_paginated(
            Path("decorations".to_string()),
            RawQuery(Some("f.colour=Blue&pageSize=10".to_string())),
        )
        .await
        .unwrap();
        assert_eq!(view.total_count, 1);
        assert_eq!(view.items[0]["name"], "Cobalt Blue");
        assert_eq!(view.page_size, 10);

        let err = list_paginated(
            Path("decorations".to_string()),
            RawQuery(Some("sort=secret".to_string())),
        )
        .await
        .unwrap_err();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_export_csv_headers() {
        init();
        let response = export_csv(Path("clay_bodies".to_string()), RawQuery(None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok());
        assert_eq!(content_type, Some("text/csv; charset=utf-8"));
        assert!(response.headers().contains_key(header::CONTENT_DISPOSITION));
    }

    #[tokio::test]
    async fn test_get_by_id_not_found() {
        init();
        let err = get_by_id(Path((
            "test_tiles".to_string(),
            uuid::Uuid::nil().to_string(),
        )))
        .await
        .unwrap_err();
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
    }
}
