use once_cell::sync::OnceCell;
use serde::Deserialize;
use serde_json::Value;
use std::path::Path;

use contracts::domain::a001_clay_body::ClayBody;
use contracts::domain::a002_decoration::Decoration;
use contracts::domain::a003_test_tile::TestTile;
use contracts::domain::a004_collection::Collection;
use contracts::domain::a005_reference::ReferenceData;
use contracts::shared::catalogue::{
    Catalogue, CatalogueEntity, CatalogueQuery, CatalogueSchema, CatalogueView, FacetGroup,
};

use crate::shared::error::ApiError;

static CATALOGUE: OnceCell<CatalogueStore> = OnceCell::new();

/// Встроенный демо-набор, если seed-файл не задан или отсутствует
const EMBEDDED_SEED: &str = include_str!("../../../data/seed.json");

/// Содержимое seed-файла
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedData {
    #[serde(default)]
    pub clay_bodies: Vec<ClayBody>,
    #[serde(default)]
    pub decorations: Vec<Decoration>,
    #[serde(default)]
    pub test_tiles: Vec<TestTile>,
    #[serde(default)]
    pub collections: Vec<Collection>,
    #[serde(flatten)]
    pub reference: ReferenceData,
}

/// Набор документов одной сущности независимо от типа записи
pub trait DocumentCatalogue: Send + Sync {
    fn documents(&self) -> &[Value];
    fn facets(&self, schema: &CatalogueSchema) -> Vec<FacetGroup>;
    fn matching_documents(&self, schema: &CatalogueSchema, query: &CatalogueQuery) -> Vec<&Value>;
    fn query_documents(&self, schema: &CatalogueSchema, query: &CatalogueQuery) -> CatalogueView<Value>;
}

impl<R: Send + Sync> DocumentCatalogue for Catalogue<R> {
    fn documents(&self) -> &[Value] {
        Catalogue::documents(self)
    }

    fn facets(&self, schema: &CatalogueSchema) -> Vec<FacetGroup> {
        Catalogue::facets(self, schema)
    }

    fn matching_documents(&self, schema: &CatalogueSchema, query: &CatalogueQuery) -> Vec<&Value> {
        Catalogue::matching_documents(self, schema, query)
    }

    fn query_documents(&self, schema: &CatalogueSchema, query: &CatalogueQuery) -> CatalogueView<Value> {
        Catalogue::query_documents(self, schema, query)
    }
}

/// Записи каталога в памяти процесса; после загрузки только чтение
#[derive(Debug, Default)]
pub struct CatalogueStore {
    pub clay_bodies: Catalogue<ClayBody>,
    pub decorations: Catalogue<Decoration>,
    pub test_tiles: Catalogue<TestTile>,
    pub collections: Catalogue<Collection>,
    pub reference: ReferenceData,
    pub default_page_size: usize,
}

/// Отбросить записи, не прошедшие валидацию
fn valid_records<T>(entity: &str, records: Vec<T>, validate: impl Fn(&T) -> Result<(), String>) -> Vec<T> {
    records
        .into_iter()
        .enumerate()
        .filter_map(|(index, record)| match validate(&record) {
            Ok(()) => Some(record),
            Err(e) => {
                tracing::warn!("Skipping {} record #{}: {}", entity, index, e);
                None
            }
        })
        .collect()
}

/// Декоры с нечитаемым цветом остаются в каталоге, но не попадают в фасет «Colour»
fn warn_unreadable_colours(decorations: &[Decoration]) {
    for decoration in decorations {
        if decoration.colour.is_some() && decoration.colour_category().is_none() {
            tracing::warn!("Decoration '{}' has an unreadable colour", decoration.name);
        }
    }
}

impl CatalogueStore {
    pub fn from_seed(seed: SeedData, default_page_size: usize) -> anyhow::Result<Self> {
        let decorations = valid_records("decoration", seed.decorations, Decoration::validate);
        warn_unreadable_colours(&decorations);

        Ok(Self {
            clay_bodies: Catalogue::new(valid_records("clay body", seed.clay_bodies, ClayBody::validate))?,
            decorations: Catalogue::new(decorations)?,
            test_tiles: Catalogue::new(valid_records("test tile", seed.test_tiles, TestTile::validate))?,
            collections: Catalogue::new(valid_records("collection", seed.collections, Collection::validate))?,
            reference: seed.reference,
            default_page_size,
        })
    }

    pub fn from_json(raw: &str, default_page_size: usize) -> anyhow::Result<Self> {
        let seed: SeedData = serde_json::from_str(raw)?;
        Self::from_seed(seed, default_page_size)
    }

    pub fn embedded(default_page_size: usize) -> anyhow::Result<Self> {
        Self::from_json(EMBEDDED_SEED, default_page_size)
    }

    /// Загрузить seed-файл; если файла нет, используется встроенный набор
    pub fn load(seed_path: Option<&Path>, default_page_size: usize) -> anyhow::Result<Self> {
        match seed_path {
            Some(path) if path.exists() => {
                tracing::info!("Loading catalogue seed from: {}", path.display());
                let raw = std::fs::read_to_string(path)?;
                Self::from_json(&raw, default_page_size)
                    .map_err(|e| anyhow::anyhow!("Invalid seed file {}: {}", path.display(), e))
            }
            Some(path) => {
                tracing::warn!("Seed file not found at: {}, using embedded demo data", path.display());
                Self::embedded(default_page_size)
            }
            None => {
                tracing::info!("Using embedded demo catalogue");
                Self::embedded(default_page_size)
            }
        }
    }

    pub fn catalogue(&self, entity: CatalogueEntity) -> &dyn DocumentCatalogue {
        match entity {
            CatalogueEntity::ClayBodies => &self.clay_bodies,
            CatalogueEntity::Decorations => &self.decorations,
            CatalogueEntity::TestTiles => &self.test_tiles,
            CatalogueEntity::Collections => &self.collections,
        }
    }

    pub fn count(&self, entity: CatalogueEntity) -> usize {
        self.catalogue(entity).documents().len()
    }
}

/// Загрузить каталог один раз при старте
pub fn initialize_catalogue(seed_path: Option<&Path>, default_page_size: usize) -> anyhow::Result<()> {
    let store = CatalogueStore::load(seed_path, default_page_size)?;
    for entity in CatalogueEntity::all() {
        tracing::info!("Catalogue {}: {} records", entity, store.count(entity));
    }
    CATALOGUE
        .set(store)
        .map_err(|_| anyhow::anyhow!("Catalogue has already been initialized"))
}

pub fn get_catalogue() -> Result<&'static CatalogueStore, ApiError> {
    CATALOGUE.get().ok_or(ApiError::NotInitialized)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_seed_loads() {
        let store = CatalogueStore::embedded(50).unwrap();
        for entity in CatalogueEntity::all() {
            assert!(store.count(entity) > 0, "{}", entity);
        }
        assert!(!store.reference.cones.is_empty());
        assert!(!store.reference.atmospheres.is_empty());
    }

    #[test]
    fn test_invalid_records_are_skipped() {
        let raw = r#"{
            "clayBodies": [
                { "id": "5f8e1b8c-9d3a-4e43-8f51-2d7c11f0aa01", "name": "Porcelain",
                  "createdAt": "2024-01-01T00:00:00Z", "updatedAt": "2024-01-01T00:00:00Z" },
                { "id": "5f8e1b8c-9d3a-4e43-8f51-2d7c11f0aa02", "name": "  ",
                  "createdAt": "2024-01-01T00:00:00Z", "updatedAt": "2024-01-01T00:00:00Z" }
            ]
        }"#;
        let store = CatalogueStore::from_json(raw, 50).unwrap();
        assert_eq!(store.count(CatalogueEntity::ClayBodies), 1);
        assert_eq!(store.count(CatalogueEntity::TestTiles), 0);
    }

    #[test]
    fn test_unreadable_colour_keeps_decoration_out_of_colour_facet() {
        let raw = r#"{
            "decorations": [
                { "id": "7a2d4c1e-0b6f-4f3a-9c1d-5e8f00c0de01", "name": "Mystery glaze",
                  "colour": "not json",
                  "createdAt": "2024-01-01T00:00:00Z", "updatedAt": "2024-01-01T00:00:00Z" }
            ]
        }"#;
        let store = CatalogueStore::from_json(raw, 50).unwrap();
        assert_eq!(store.count(CatalogueEntity::Decorations), 1);

        let schema = CatalogueEntity::Decorations.schema();
        let facets = store.catalogue(CatalogueEntity::Decorations).facets(&schema);
        assert!(facets.iter().all(|g| g.id != "colour"));
    }

    #[test]
    fn test_missing_seed_file_falls_back_to_embedded() {
        let store = CatalogueStore::load(Some(Path::new("/nonexistent/pottery/seed.json")), 25).unwrap();
        assert!(store.count(CatalogueEntity::Decorations) > 0);
        assert_eq!(store.default_page_size, 25);
    }

    #[test]
    fn test_malformed_seed_is_an_error() {
        assert!(CatalogueStore::from_json("{\"testTiles\": 5}", 50).is_err());
    }
}
