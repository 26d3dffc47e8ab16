//! Конфигурация поиска, фасетов и колонок для каждой сущности каталога

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::descriptor::{CatalogueSchema, FieldDescriptor};

/// Сущности, для которых есть списки с фильтрами
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CatalogueEntity {
    ClayBodies,
    Decorations,
    TestTiles,
    Collections,
}

impl CatalogueEntity {
    pub fn all() -> [CatalogueEntity; 4] {
        [
            CatalogueEntity::TestTiles,
            CatalogueEntity::ClayBodies,
            CatalogueEntity::Decorations,
            CatalogueEntity::Collections,
        ]
    }

    /// Сегмент URL API (`/api/<slug>`)
    pub fn slug(&self) -> &'static str {
        match self {
            CatalogueEntity::ClayBodies => "clay_bodies",
            CatalogueEntity::Decorations => "decorations",
            CatalogueEntity::TestTiles => "test_tiles",
            CatalogueEntity::Collections => "collections",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            CatalogueEntity::ClayBodies => "Clay bodies",
            CatalogueEntity::Decorations => "Decorations",
            CatalogueEntity::TestTiles => "Test tiles",
            CatalogueEntity::Collections => "Collections",
        }
    }

    pub fn schema(&self) -> CatalogueSchema {
        match self {
            CatalogueEntity::ClayBodies => clay_bodies(),
            CatalogueEntity::Decorations => decorations(),
            CatalogueEntity::TestTiles => test_tiles(),
            CatalogueEntity::Collections => collections(),
        }
    }
}

impl fmt::Display for CatalogueEntity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for CatalogueEntity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CatalogueEntity::all()
            .into_iter()
            .find(|e| e.slug() == s)
            .ok_or_else(|| format!("Unknown catalogue: {}", s))
    }
}

pub fn clay_bodies() -> CatalogueSchema {
    let name = FieldDescriptor::text("name", "Name", &["name"]);
    let kind = FieldDescriptor::text("type", "Type", &["type", "name"]);
    let manufacturer = FieldDescriptor::text("manufacturer", "Manufacturer", &["manufacturer"]);
    let cone = FieldDescriptor::cone("cone", "Cone", &["cone", "name"]);

    CatalogueSchema {
        entity: CatalogueEntity::ClayBodies.slug().to_string(),
        search: vec![
            name.clone(),
            kind.clone(),
            manufacturer.clone(),
            FieldDescriptor::text("notes", "Notes", &["notes"]),
        ],
        facets: vec![
            kind.clone(),
            manufacturer.clone(),
            cone.clone(),
            FieldDescriptor::visibility(),
        ],
        columns: vec![
            name,
            kind,
            manufacturer,
            cone,
            FieldDescriptor::text("shrinkage", "Shrinkage %", &["shrinkage"]),
            FieldDescriptor::text("absorption", "Absorption %", &["absorption"]),
        ],
    }
}

pub fn decorations() -> CatalogueSchema {
    let name = FieldDescriptor::text("name", "Name", &["name"]);
    let kind = FieldDescriptor::text("type", "Type", &["type", "name"]);
    let manufacturer = FieldDescriptor::text("manufacturer", "Manufacturer", &["manufacturer"]);
    let cone = FieldDescriptor::cone("cone", "Cone", &["cone", "name"]);
    let atmosphere = FieldDescriptor::text("atmosphere", "Atmosphere", &["atmosphere", "name"]);
    let colour = FieldDescriptor::colour("colour", "Colour", &["colour"]);

    CatalogueSchema {
        entity: CatalogueEntity::Decorations.slug().to_string(),
        search: vec![
            name.clone(),
            kind.clone(),
            manufacturer.clone(),
            FieldDescriptor::text("surface", "Surface", &["surface"]),
            FieldDescriptor::text("notes", "Notes", &["notes"]),
        ],
        facets: vec![
            kind.clone(),
            manufacturer.clone(),
            cone.clone(),
            atmosphere.clone(),
            colour.clone(),
            FieldDescriptor::visibility(),
        ],
        columns: vec![name, kind, manufacturer, cone, atmosphere, colour],
    }
}

pub fn test_tiles() -> CatalogueSchema {
    let name = FieldDescriptor::text("name", "Name", &["name"]);
    let clay_body = FieldDescriptor::text("clayBody", "Clay body", &["clayBody", "name"]);
    let decoration = FieldDescriptor::text(
        "decoration",
        "Decorations",
        &["decorationLayers", "decorations", "name"],
    );
    let cone = FieldDescriptor::cone("cone", "Cone", &["cone", "name"]);
    let atmosphere = FieldDescriptor::text("atmosphere", "Atmosphere", &["atmosphere", "name"]);

    CatalogueSchema {
        entity: CatalogueEntity::TestTiles.slug().to_string(),
        search: vec![
            name.clone(),
            clay_body.clone(),
            decoration.clone(),
            FieldDescriptor::text("notes", "Notes", &["notes"]),
        ],
        facets: vec![
            clay_body.clone(),
            decoration.clone(),
            cone.clone(),
            atmosphere.clone(),
            FieldDescriptor::visibility(),
        ],
        columns: vec![name, clay_body, decoration, cone, atmosphere],
    }
}

pub fn collections() -> CatalogueSchema {
    let name = FieldDescriptor::text("name", "Name", &["name"]);
    let description = FieldDescriptor::text("description", "Description", &["description"]);
    let tiles = FieldDescriptor::text("testTiles", "Test tiles", &["testTiles", "name"]);

    CatalogueSchema {
        entity: CatalogueEntity::Collections.slug().to_string(),
        search: vec![name.clone(), description.clone(), tiles.clone()],
        facets: vec![FieldDescriptor::visibility()],
        columns: vec![name, description, tiles],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugs_roundtrip() {
        for entity in CatalogueEntity::all() {
            assert_eq!(entity.slug().parse::<CatalogueEntity>(), Ok(entity));
            assert_eq!(entity.schema().entity, entity.slug());
        }
        assert!("users".parse::<CatalogueEntity>().is_err());
    }

    #[test]
    fn test_facet_ids_are_unique() {
        for entity in CatalogueEntity::all() {
            let schema = entity.schema();
            let mut ids: Vec<&str> = schema.facets.iter().map(|d| d.id.as_str()).collect();
            let before = ids.len();
            ids.sort();
            ids.dedup();
            assert_eq!(ids.len(), before, "{}", entity);
        }
    }
}
