use serde::{Deserialize, Serialize};

/// Ссылка на связанную запись в виде `{id, name}`.
///
/// Именно по `name` работают пути фасетов (`clayBody.name`, `cone.name`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedRef {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
}

impl NamedRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
        }
    }
}

