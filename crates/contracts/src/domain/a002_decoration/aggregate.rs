use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::{AggregateId, EntityMetadata, NamedRef};
use crate::shared::catalogue::{ColorCategory, ColourSwatch};

// ============================================================================
// ID Type
// ============================================================================

/// Уникальный идентификатор декора
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DecorationId(pub Uuid);

impl DecorationId {
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

impl AggregateId for DecorationId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }

    fn from_string(s: &str) -> Result<Self, String> {
        Uuid::parse_str(s)
            .map(DecorationId::new)
            .map_err(|e| format!("Invalid UUID: {}", e))
    }
}

// ============================================================================
// Aggregate Root
// ============================================================================

/// Декор: глазурь, ангоб, подглазурная краска
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Decoration {
    pub id: DecorationId,
    pub name: String,

    #[serde(rename = "type", default)]
    pub kind: Option<NamedRef>,

    #[serde(default)]
    pub manufacturer: Option<String>,

    #[serde(default)]
    pub cone: Vec<NamedRef>,

    #[serde(default)]
    pub atmosphere: Vec<NamedRef>,

    /// Цвет в виде JSON-строки `{"hex": "...", "category": "..."}`
    #[serde(default)]
    pub colour: Option<String>,

    /// Поверхность (glossy, satin, matte)
    #[serde(default)]
    pub surface: Option<String>,

    #[serde(default)]
    pub notes: Option<String>,

    #[serde(default)]
    pub is_public: bool,

    #[serde(default)]
    pub user_id: Option<String>,

    #[serde(flatten)]
    pub metadata: EntityMetadata,
}

impl Decoration {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: DecorationId::new_v4(),
            name: name.into(),
            kind: None,
            manufacturer: None,
            cone: Vec::new(),
            atmosphere: Vec::new(),
            colour: None,
            surface: None,
            notes: None,
            is_public: false,
            user_id: None,
            metadata: EntityMetadata::new(),
        }
    }

    pub fn to_string_id(&self) -> String {
        self.id.as_string()
    }

    /// Разобранный цвет; повреждённое значение даёт `None`
    pub fn swatch(&self) -> Option<ColourSwatch> {
        self.colour.as_deref().and_then(ColourSwatch::parse)
    }

    /// Категория цвета для фасета «Colour»
    pub fn colour_category(&self) -> Option<ColorCategory> {
        self.swatch().and_then(|s| s.category())
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("Name must not be empty".into());
        }
        Ok(())
    }
}
