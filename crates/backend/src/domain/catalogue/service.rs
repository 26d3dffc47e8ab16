use serde_json::Value;

use contracts::shared::catalogue::{CatalogueEntity, CatalogueQuery, CatalogueView, FacetGroup};

use crate::shared::data::catalogue_store::CatalogueStore;
use crate::shared::error::ApiError;
use crate::shared::export;

pub fn parse_entity(slug: &str) -> Result<CatalogueEntity, ApiError> {
    slug.parse::<CatalogueEntity>()
        .map_err(|_| ApiError::UnknownEntity(slug.to_string()))
}

/// Разобрать и проверить query string для сущности
pub fn parse_query(store: &CatalogueStore, entity: CatalogueEntity, raw: Option<&str>) -> Result<CatalogueQuery, ApiError> {
    let query = CatalogueQuery::from_query_string_with_page_size(raw.unwrap_or_default(), store.default_page_size);
    query.validate(&entity.schema())?;
    Ok(query)
}

/// Все записи сущности в исходном порядке
pub fn list_all(store: &CatalogueStore, entity: CatalogueEntity) -> Vec<Value> {
    store.catalogue(entity).documents().to_vec()
}

/// Поиск, фильтры, сортировка и страница
pub fn list_paginated(store: &CatalogueStore, entity: CatalogueEntity, query: &CatalogueQuery) -> CatalogueView<Value> {
    store.catalogue(entity).query_documents(&entity.schema(), query)
}

pub fn facets(store: &CatalogueStore, entity: CatalogueEntity) -> Vec<FacetGroup> {
    store.catalogue(entity).facets(&entity.schema())
}

pub fn get_by_id(store: &CatalogueStore, entity: CatalogueEntity, id: &str) -> Result<Value, ApiError> {
    uuid::Uuid::parse_str(id).map_err(|_| ApiError::InvalidId(id.to_string()))?;
    store
        .catalogue(entity)
        .documents()
        .iter()
        .find(|doc| doc.get("id").and_then(Value::as_str) == Some(id))
        .cloned()
        .ok_or_else(|| ApiError::NotFound(format!("{} {}", entity, id)))
}

/// CSV по всем подходящим записям, без разбиения на страницы
pub fn export_csv(store: &CatalogueStore, entity: CatalogueEntity, query: &CatalogueQuery) -> Result<String, ApiError> {
    let schema = entity.schema();
    let documents = store.catalogue(entity).matching_documents(&schema, query);
    tracing::info!("Exporting {} {} records to CSV", documents.len(), entity);
    Ok(export::documents_to_csv(&schema, &documents)?)
}
