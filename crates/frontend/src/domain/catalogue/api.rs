use contracts::shared::catalogue::{CatalogueEntity, CatalogueQuery};
use gloo_net::http::Request;
use serde_json::Value;

use crate::shared::api_utils::{api_url, with_query};

/// Весь список сущности; поиск и фильтры выполняются на клиенте
pub async fn fetch_all(entity: CatalogueEntity) -> Result<Vec<Value>, String> {
    let url = api_url(&format!("/api/{}/all", entity.slug()));

    let response = Request::get(&url)
        .send()
        .await
        .map_err(|e| format!("Request failed: {}", e))?;

    if !response.ok() {
        return Err(format!("HTTP error: {}", response.status()));
    }

    response
        .json::<Vec<Value>>()
        .await
        .map_err(|e| format!("Failed to parse response: {}", e))
}

/// Ссылка на CSV с текущими поиском, фильтрами и сортировкой
pub fn export_url(entity: CatalogueEntity, query: &CatalogueQuery) -> String {
    let export_query = CatalogueQuery {
        page: Default::default(),
        ..query.clone()
    };
    with_query(
        api_url(&format!("/api/{}/export.csv", entity.slug())),
        &export_query.to_query_string(),
    )
}
