use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::{AggregateId, EntityMetadata, NamedRef};

// ============================================================================
// ID Type
// ============================================================================

/// Уникальный идентификатор тестовой плитки
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TestTileId(pub Uuid);

impl TestTileId {
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

impl AggregateId for TestTileId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }

    fn from_string(s: &str) -> Result<Self, String> {
        Uuid::parse_str(s)
            .map(TestTileId::new)
            .map_err(|e| format!("Invalid UUID: {}", e))
    }
}

// ============================================================================
// Aggregate Root
// ============================================================================

/// Слой декора на плитке; слои наносятся по возрастанию `order`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecorationLayer {
    pub order: u32,
    #[serde(default)]
    pub decorations: Vec<NamedRef>,
}

/// Тестовая плитка: масса, обожжённая со слоями декора
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestTile {
    pub id: TestTileId,
    pub name: String,

    #[serde(default)]
    pub clay_body: Option<NamedRef>,

    #[serde(default)]
    pub decoration_layers: Vec<DecorationLayer>,

    #[serde(default)]
    pub cone: Option<NamedRef>,

    #[serde(default)]
    pub atmosphere: Option<NamedRef>,

    #[serde(default)]
    pub notes: Option<String>,

    #[serde(default)]
    pub is_public: bool,

    #[serde(default)]
    pub user_id: Option<String>,

    #[serde(flatten)]
    pub metadata: EntityMetadata,
}

impl TestTile {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: TestTileId::new_v4(),
            name: name.into(),
            clay_body: None,
            decoration_layers: Vec::new(),
            cone: None,
            atmosphere: None,
            notes: None,
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
        let mut orders: Vec<u32> = self.decoration_layers.iter().map(|l| l.order).collect();
        orders.sort_unstable();
        if orders.windows(2).any(|w| w[0] == w[1]) {
            return Err("Decoration layers must have distinct order".into());
        }
        Ok(())
    }
}
