use axum::extract::Query;
use axum::Json;
use serde::{Deserialize, Serialize};

use contracts::shared::catalogue::colour::{categorize, normalize_hex};
use contracts::shared::catalogue::ColorCategory;

#[derive(Debug, Deserialize)]
pub struct ColourQuery {
    #[serde(default)]
    pub hex: String,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct ColourCategoryResponse {
    /// Нормализованный hex; `None`, если строка не разобрана
    pub hex: Option<String>,
    pub category: ColorCategory,
}

/// GET /api/colour/category?hex=%23aabbcc
pub async fn category(Query(query): Query<ColourQuery>) -> Json<ColourCategoryResponse> {
    Json(ColourCategoryResponse {
        hex: normalize_hex(&query.hex),
        category: categorize(&query.hex),
    })
}
