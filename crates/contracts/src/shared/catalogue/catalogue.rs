use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::descriptor::CatalogueSchema;
use super::facet::{extract_facets_from, FacetGroup};
use super::filter::{passes_filters_with, ActiveFilterState};
use super::page::{PageRequest, DEFAULT_PAGE_SIZE};
use super::search::{matches_normalized, normalize_query};
use super::sort::{sorted_indices, SortSpec};
use super::CatalogueError;

/// Параметры выборки: поиск, фильтры, сортировка, страница
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogueQuery {
    #[serde(default)]
    pub search: String,
    #[serde(default)]
    pub filters: ActiveFilterState,
    #[serde(default)]
    pub sort: Option<SortSpec>,
    #[serde(default)]
    pub page: PageRequest,
}

const FILTER_PREFIX: &str = "f.";

impl CatalogueQuery {
    /// Разбор query string вида `q=..&page=..&pageSize=..&sort=..&desc=1&f.cone=6&f.cone=10`.
    ///
    /// Неизвестные ключи и некорректные числа игнорируются.
    pub fn from_query_string(raw: &str) -> Self {
        Self::from_query_string_with_page_size(raw, DEFAULT_PAGE_SIZE)
    }

    /// То же, но с собственным размером страницы, если `pageSize` не задан
    pub fn from_query_string_with_page_size(raw: &str, default_page_size: usize) -> Self {
        let mut query = CatalogueQuery::default();
        let mut page = 0usize;
        let mut page_size = 0usize;
        let mut sort_field: Option<String> = None;
        let mut descending = false;

        for pair in raw.trim_start_matches('?').split('&') {
            if pair.is_empty() {
                continue;
            }
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            let key = decode_component(key);
            let value = decode_component(value);

            match key.as_str() {
                "q" => query.search = value,
                "page" => page = value.parse().unwrap_or(0),
                "pageSize" => page_size = value.parse().unwrap_or(0),
                "sort" if !value.trim().is_empty() => sort_field = Some(value),
                "desc" => descending = matches!(value.as_str(), "1" | "true"),
                _ => {
                    if let Some(facet) = key.strip_prefix(FILTER_PREFIX) {
                        if !facet.is_empty() && !value.trim().is_empty() {
                            query.filters.select(facet, value.trim());
                        }
                    }
                }
            }
        }

        if page_size == 0 {
            page_size = default_page_size;
        }
        query.page = PageRequest::new(page, page_size);
        query.sort = sort_field.map(|field| SortSpec {
            field,
            ascending: !descending,
        });
        query
    }

    pub fn to_query_string(&self) -> String {
        let mut parts: Vec<String> = Vec::new();
        if !self.search.trim().is_empty() {
            parts.push(format!("q={}", urlencoding::encode(&self.search)));
        }
        for (facet, values) in self.filters.iter() {
            for value in values {
                parts.push(format!(
                    "{}{}={}",
                    FILTER_PREFIX,
                    urlencoding::encode(facet),
                    urlencoding::encode(value)
                ));
            }
        }
        if let Some(sort) = &self.sort {
            parts.push(format!("sort={}", urlencoding::encode(&sort.field)));
            if !sort.ascending {
                parts.push("desc=1".to_string());
            }
        }
        parts.push(format!("page={}", self.page.page));
        parts.push(format!("pageSize={}", self.page.page_size));
        parts.join("&")
    }

    /// Проверить, что сортировка и фильтры ссылаются на поля схемы
    pub fn validate(&self, schema: &CatalogueSchema) -> Result<(), CatalogueError> {
        if let Some(sort) = &self.sort {
            if schema.field(&sort.field).is_none() {
                return Err(CatalogueError::UnknownField {
                    entity: schema.entity.clone(),
                    field: sort.field.clone(),
                });
            }
        }
        for (facet, _) in self.filters.iter() {
            if schema.facet(facet).is_none() {
                return Err(CatalogueError::UnknownField {
                    entity: schema.entity.clone(),
                    field: facet.to_string(),
                });
            }
        }
        Ok(())
    }
}

fn decode_component(raw: &str) -> String {
    let spaced = raw.replace('+', " ");
    match urlencoding::decode(&spaced) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => spaced,
    }
}

/// Результат выборки для таблицы/сетки
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogueView<T> {
    pub items: Vec<T>,
    /// Фасеты по всему набору записей, а не только по отфильтрованным
    pub facets: Vec<FacetGroup>,
    pub total_count: usize,
    pub unfiltered_count: usize,
    pub page: usize,
    pub page_size: usize,
    pub total_pages: usize,
}

/// Набор записей одной сущности вместе с их JSON-представлением.
///
/// Каждая запись сериализуется один раз при создании; все поиски и
/// фильтры дальше работают по готовым документам.
#[derive(Debug, Clone)]
pub struct Catalogue<R> {
    records: Vec<R>,
    documents: Vec<Value>,
}

impl<R: Serialize> Catalogue<R> {
    pub fn new(records: Vec<R>) -> Result<Self, CatalogueError> {
        let documents = records
            .iter()
            .map(serde_json::to_value)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { records, documents })
    }
}

impl<R> Default for Catalogue<R> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            documents: Vec::new(),
        }
    }
}

impl<R> Catalogue<R> {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn documents(&self) -> &[Value] {
        &self.documents
    }

    /// Варианты фильтров по всему набору
    pub fn facets(&self, schema: &CatalogueSchema) -> Vec<FacetGroup> {
        extract_facets_from(self.documents.iter(), &schema.facets)
    }

    /// Индексы записей, прошедших поиск и фильтры, в порядке сортировки
    pub fn matching_indices(&self, schema: &CatalogueSchema, query: &CatalogueQuery) -> Vec<usize> {
        let needle = normalize_query(&query.search);
        let matched: Vec<usize> = self
            .documents
            .iter()
            .enumerate()
            .filter(|(_, doc)| {
                needle
                    .as_deref()
                    .map_or(true, |needle| matches_normalized(doc, needle, &schema.search))
            })
            .filter(|(_, doc)| passes_filters_with(doc, &query.filters, &schema.facets))
            .map(|(index, _)| index)
            .collect();

        let Some(sort) = &query.sort else {
            return matched;
        };

        let docs: Vec<&Value> = matched.iter().map(|&i| &self.documents[i]).collect();
        let mut sort_fields = schema.columns.clone();
        sort_fields.extend(schema.facets.iter().cloned());
        sorted_indices(&docs, sort, &sort_fields)
            .into_iter()
            .map(|position| matched[position])
            .collect()
    }

    /// Все подходящие записи без разбиения на страницы (для экспорта)
    pub fn matching(&self, schema: &CatalogueSchema, query: &CatalogueQuery) -> Vec<&R> {
        self.matching_indices(schema, query)
            .into_iter()
            .map(|i| &self.records[i])
            .collect()
    }

    /// Подходящие документы без разбиения на страницы
    pub fn matching_documents(&self, schema: &CatalogueSchema, query: &CatalogueQuery) -> Vec<&Value> {
        self.matching_indices(schema, query)
            .into_iter()
            .map(|i| &self.documents[i])
            .collect()
    }

    /// Как [`Catalogue::query`], но страница состоит из JSON-документов
    pub fn query_documents(&self, schema: &CatalogueSchema, query: &CatalogueQuery) -> CatalogueView<Value> {
        let page = query.page.slice(self.matching_documents(schema, query));
        CatalogueView {
            items: page.items.into_iter().cloned().collect(),
            facets: self.facets(schema),
            total_count: page.total_count,
            unfiltered_count: self.documents.len(),
            page: page.page,
            page_size: page.page_size,
            total_pages: page.total_pages,
        }
    }

    /// Поиск, фильтр, сортировка и страница за один проход
    pub fn query(&self, schema: &CatalogueSchema, query: &CatalogueQuery) -> CatalogueView<&R> {
        let page = query.page.slice(self.matching(schema, query));
        CatalogueView {
            items: page.items,
            facets: self.facets(schema),
            total_count: page.total_count,
            unfiltered_count: self.records.len(),
            page: page.page,
            page_size: page.page_size,
            total_pages: page.total_pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::catalogue::schemas;
    use serde_json::json;

    fn tiles() -> Catalogue<Value> {
        Catalogue::new(vec![
            json!({ "id": "1", "name": "Celadon on porcelain", "isPublic": true,
                    "clayBody": { "name": "Porcelain" }, "cone": { "name": "10" },
                    "atmosphere": { "name": "Reduction" },
                    "decorationLayers": [{ "order": 1, "decorations": [{ "name": "Celadon" }] }] }),
            json!({ "id": "2", "name": "Shino test", "isPublic": false,
                    "clayBody": { "name": "Stoneware" }, "cone": { "name": "6" },
                    "atmosphere": { "name": "Oxidation" },
                    "decorationLayers": [{ "order": 1, "decorations": [{ "name": "Shino" }] }] }),
            json!({ "id": "3", "name": "Majolica", "isPublic": true,
                    "clayBody": { "name": "Terracotta" }, "cone": { "name": "04" },
                    "atmosphere": { "name": "Oxidation" },
                    "decorationLayers": [] }),
        ])
        .unwrap()
    }

    fn ids(items: &[&Value]) -> Vec<String> {
        items.iter().map(|v| v["id"].as_str().unwrap_or("").to_string()).collect()
    }

    #[test]
    fn test_query_combines_search_filters_and_sort() {
        let catalogue = tiles();
        let schema = schemas::test_tiles();

        let mut query = CatalogueQuery::default();
        query.filters.select("atmosphere", "Oxidation");
        query.sort = Some(SortSpec::asc("cone"));
        let view = catalogue.query(&schema, &query);
        assert_eq!(ids(&view.items), vec!["3", "2"]);
        assert_eq!(view.total_count, 2);
        assert_eq!(view.unfiltered_count, 3);

        query.search = "SHINO".to_string();
        let view = catalogue.query(&schema, &query);
        assert_eq!(ids(&view.items), vec!["2"]);
    }

    #[test]
    fn test_facets_cover_whole_set() {
        let catalogue = tiles();
        let schema = schemas::test_tiles();
        let mut query = CatalogueQuery::default();
        query.filters.select("clayBody", "Porcelain");
        let view = catalogue.query(&schema, &query);
        let clay = view.facets.iter().find(|g| g.id == "clayBody").unwrap();
        assert_eq!(clay.options.len(), 3);
        let cones: Vec<&str> = view
            .facets
            .iter()
            .find(|g| g.id == "cone")
            .unwrap()
            .options
            .iter()
            .map(|o| o.value.as_str())
            .collect();
        assert_eq!(cones, vec!["04", "6", "10"]);
    }

    #[test]
    fn test_query_string_roundtrip() {
        let raw = "q=blue+glaze&f.cone=6&f.cone=10&f.atmosphere=Oxidation&sort=name&desc=1&page=2&pageSize=25";
        let query = CatalogueQuery::from_query_string(raw);
        assert_eq!(query.search, "blue glaze");
        assert!(query.filters.is_selected("cone", "6"));
        assert!(query.filters.is_selected("cone", "10"));
        assert_eq!(query.sort, Some(SortSpec::desc("name")));
        assert_eq!(query.page, PageRequest::new(2, 25));

        let again = CatalogueQuery::from_query_string(&query.to_query_string());
        assert_eq!(again, query);
    }

    #[test]
    fn test_query_string_is_lenient() {
        let query = CatalogueQuery::from_query_string("?page=abc&f.=x&f.cone=&unknown=1&q=%E2%9C%93");
        assert_eq!(query.search, "✓");
        assert!(query.filters.is_empty());
        assert_eq!(query.page, PageRequest::default());
        assert!(query.sort.is_none());
    }

    #[test]
    fn test_validate_rejects_unknown_fields() {
        let schema = schemas::test_tiles();
        assert!(CatalogueQuery::from_query_string("sort=cone&f.clayBody=Porcelain")
            .validate(&schema)
            .is_ok());
        assert!(CatalogueQuery::from_query_string("sort=password").validate(&schema).is_err());
        assert!(CatalogueQuery::from_query_string("f.secret=1").validate(&schema).is_err());
    }

    #[test]
    fn test_default_page_size_override() {
        let query = CatalogueQuery::from_query_string_with_page_size("q=x", 20);
        assert_eq!(query.page.page_size, 20);
        let query = CatalogueQuery::from_query_string_with_page_size("pageSize=100", 20);
        assert_eq!(query.page.page_size, 100);
    }

    #[test]
    fn test_query_documents_pages() {
        let catalogue = tiles();
        let schema = schemas::test_tiles();
        let query = CatalogueQuery::from_query_string("sort=name&pageSize=2&page=1");
        let view = catalogue.query_documents(&schema, &query);
        assert_eq!(view.total_pages, 2);
        assert_eq!(view.items.len(), 1);
        assert_eq!(view.items[0]["name"], "Shino test");
    }

    #[test]
    fn test_visibility_facet() {
        let catalogue = tiles();
        let schema = schemas::test_tiles();
        let query = CatalogueQuery::from_query_string("f.visibility=Private");
        assert_eq!(ids(&catalogue.matching(&schema, &query)), vec!["2"]);
    }
}
