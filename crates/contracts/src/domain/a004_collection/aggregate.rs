use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::{AggregateId, EntityMetadata};

// ============================================================================
// ID Type
// ============================================================================

/// Уникальный идентификатор коллекции
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CollectionId(pub Uuid);

impl CollectionId {
    pub fn new(value: Uuid) -> Self {
        Self(value)
    }

    pub fn new_v4() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn value(&self) -> Uuid {
        self.0
    }
}

impl AggregateId for CollectionId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }

    fn from_string(s: &str) -> Result<Self, String> {
        Uuid::parse_str(s)
            .map(CollectionId::new)
            .map_err(|e| format!("Invalid UUID: {}", e))
    }
}

// ============================================================================
// Aggregate Root
// ============================================================================

/// Ссылка на плитку внутри коллекции
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestTileRef {
    pub id: String,
    pub name: String,
}

/// Коллекция тестовых плиток
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Collection {
    pub id: CollectionId,
    pub name: String,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub test_tiles: Vec<TestTileRef>,

    #[serde(default)]
    pub is_public: bool,

    #[serde(default)]
    pub user_id: Option<String>,

    #[serde(flatten)]
    pub metadata: EntityMetadata,
}

impl Collection {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: CollectionId::new_v4(),
            name: name.into(),
            description: None,
            test_tiles: Vec::new(),
            is_public: false,
            user_id: None,
            metadata: EntityMetadata::new(),
        }
    }

    pub fn to_string_id(&self) -> String {
        self.id.as_string()
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("Name must not be empty".into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tile_refs_in_document() {
        let mut collection = Collection::new("Cone 10 reduction");
        collection.test_tiles.push(TestTileRef {
            id: "6f1c1f3e-2a7b-4a43-9a43-0d6c2b0f0d11".to_string(),
            name: "Celadon".to_string(),
        });
        assert!(collection.validate().is_ok());

        let doc = serde_json::to_value(&collection).unwrap();
        assert_eq!(doc["testTiles"][0]["name"], "Celadon");
        assert_eq!(doc["testTiles"].as_array().map(|a| a.len()), Some(1));

        collection.name = String::new();
        assert!(collection.validate().is_err());
    }
}
