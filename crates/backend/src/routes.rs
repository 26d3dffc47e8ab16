use axum::{routing::get, Router};

use crate::handlers;

/// Конфигурация всех роутов приложения
pub fn configure_routes() -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        // ========================================
        // REFERENCE DATA
        // ========================================
        .route("/api/reference/cones", get(handlers::a005_reference::list_cones))
        .route(
            "/api/reference/atmospheres",
            get(handlers::a005_reference::list_atmospheres),
        )
        .route(
            "/api/reference/clay_body_types",
            get(handlers::a005_reference::list_clay_body_types),
        )
        .route(
            "/api/reference/decoration_types",
            get(handlers::a005_reference::list_decoration_types),
        )
        .route("/api/colour/category", get(handlers::colour::category))
        // ========================================
        // CATALOGUE (clay_bodies, decorations, test_tiles, collections)
        // ========================================
        .route("/api/:entity", get(handlers::catalogue::list_paginated))
        .route("/api/:entity/all", get(handlers::catalogue::list_all))
        .route("/api/:entity/facets", get(handlers::catalogue::facets))
        .route("/api/:entity/export.csv", get(handlers::catalogue::export_csv))
        .route("/api/:entity/:id", get(handlers::catalogue::get_by_id))
}
