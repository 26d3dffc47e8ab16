use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::{AggregateId, EntityMetadata, NamedRef};

// ============================================================================
// ID Type
// ============================================================================

/// Уникальный идентификатор глиняной массы
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ClayBodyId(pub Uuid);

impl ClayBodyId {
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

impl AggregateId for ClayBodyId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }

    fn from_string(s: &str) -> Result<Self, String> {
        Uuid::parse_str(s)
            .map(ClayBodyId::new)
            .map_err(|e| format!("Invalid UUID: {}", e))
    }
}

// ============================================================================
// Aggregate Root
// ============================================================================

/// Глиняная масса (clay body)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClayBody {
    pub id: ClayBodyId,
    pub name: String,

    /// Тип массы из справочника (porcelain, stoneware, ...)
    #[serde(rename = "type", default)]
    pub kind: Option<NamedRef>,

    #[serde(default)]
    pub manufacturer: Option<String>,

    /// Диапазон обжига
    #[serde(default)]
    pub cone: Vec<NamedRef>,

    /// Усадка, %
    #[serde(default)]
    pub shrinkage: Option<f64>,

    /// Водопоглощение, %
    #[serde(default)]
    pub absorption: Option<f64>,

    #[serde(default)]
    pub notes: Option<String>,

    #[serde(default)]
    pub is_public: bool,

    #[serde(default)]
    pub user_id: Option<String>,

    #[serde(flatten)]
    pub metadata: EntityMetadata,
}

impl ClayBody {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: ClayBodyId::new_v4(),
            name: name.into(),
            kind: None,
            manufacturer: None,
            cone: Vec::new(),
            shrinkage: None,
            absorption: None,
            notes: None,
            is_public: false,
            user_id: None,
            metadata: EntityMetadata::new(),
        }
    }

    /// Получить ID как строку
    pub fn to_string_id(&self) -> String {
        self.id.as_string()
    }

    /// Валидация данных
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("Name must not be empty".into());
        }
        for (label, value) in [("shrinkage", self.shrinkage), ("absorption", self.absorption)] {
            if let Some(v) = value {
                if !(0.0..=100.0).contains(&v) {
                    return Err(format!("{} must be a percentage, got {}", label, v));
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_camel_case_document() {
        let mut body = ClayBody::new("B-Mix");
        body.kind = Some(NamedRef::new("Stoneware"));
        body.cone = vec![NamedRef::new("5"), NamedRef::new("6")];
        body.is_public = true;

        let doc = serde_json::to_value(&body).unwrap();
        assert_eq!(doc["type"]["name"], "Stoneware");
        assert_eq!(doc["cone"][1]["name"], "6");
        assert_eq!(doc["isPublic"], true);
        assert!(doc["createdAt"].is_string());
        assert_eq!(doc["id"], body.to_string_id());
    }

    #[test]
    fn test_validate() {
        let mut body = ClayBody::new("  ");
        assert!(body.validate().is_err());
        body.name = "Porcelain P300".into();
        body.shrinkage = Some(13.5);
        assert!(body.validate().is_ok());
        body.absorption = Some(-1.0);
        assert!(body.validate().is_err());
    }
}
