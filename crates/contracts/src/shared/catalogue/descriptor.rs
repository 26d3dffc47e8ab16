use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::colour::category_from_stored;
use super::field_path::FieldPath;

/// Как интерпретировать значения поля
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    /// Обычная строка/число
    Text,
    /// Метка конуса: опции фильтра упорядочены по температуре
    Cone,
    /// JSON `{hex, category}`: значением служит цветовая категория
    Colour,
    /// Флаг `isPublic`: "Public" / "Private"
    Visibility,
}

pub const VISIBILITY_PUBLIC: &str = "Public";
pub const VISIBILITY_PRIVATE: &str = "Private";

/// Описание поля для поиска, фильтра или колонки таблицы
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    pub id: String,
    pub label: String,
    pub path: FieldPath,
    pub kind: FieldKind,
}

impl FieldDescriptor {
    pub fn new(id: impl Into<String>, label: impl Into<String>, path: FieldPath, kind: FieldKind) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            path,
            kind,
        }
    }

    pub(crate) fn text(id: &str, label: &str, path: &[&'static str]) -> Self {
        Self::new(id, label, FieldPath::from_static(path), FieldKind::Text)
    }

    pub(crate) fn cone(id: &str, label: &str, path: &[&'static str]) -> Self {
        Self::new(id, label, FieldPath::from_static(path), FieldKind::Cone)
    }

    pub(crate) fn colour(id: &str, label: &str, path: &[&'static str]) -> Self {
        Self::new(id, label, FieldPath::from_static(path), FieldKind::Colour)
    }

    pub(crate) fn visibility() -> Self {
        Self::new(
            "visibility",
            "Visibility",
            FieldPath::from_static(&["isPublic"]),
            FieldKind::Visibility,
        )
    }

    /// Значения поля записи в том виде, в каком они участвуют в фильтрах.
    ///
    /// Пустые строки отбрасываются; повреждённый цвет не даёт значения.
    pub fn values(&self, record: &Value) -> Vec<String> {
        let raw = self.path.resolve_strings(record);
        match self.kind {
            FieldKind::Text | FieldKind::Cone => raw
                .into_iter()
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .collect(),
            FieldKind::Colour => raw
                .iter()
                .filter_map(|v| category_from_stored(v))
                .map(|c| c.as_str().to_string())
                .collect(),
            FieldKind::Visibility => raw
                .into_iter()
                .filter_map(|v| match v.as_str() {
                    "true" => Some(VISIBILITY_PUBLIC.to_string()),
                    "false" => Some(VISIBILITY_PRIVATE.to_string()),
                    _ => None,
                })
                .collect(),
        }
    }

    /// Значение для отображения в ячейке таблицы
    pub fn display_value(&self, record: &Value) -> String {
        self.values(record).join(", ")
    }
}

/// Конфигурация каталога одной сущности
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogueSchema {
    pub entity: String,
    /// Поля полнотекстового поиска
    pub search: Vec<FieldDescriptor>,
    /// Поля-фасеты для панели фильтров
    pub facets: Vec<FieldDescriptor>,
    /// Колонки таблицы (и допустимые поля сортировки)
    pub columns: Vec<FieldDescriptor>,
}

impl CatalogueSchema {
    pub fn facet(&self, id: &str) -> Option<&FieldDescriptor> {
        self.facets.iter().find(|d| d.id == id)
    }

    pub fn column(&self, id: &str) -> Option<&FieldDescriptor> {
        self.columns.iter().find(|d| d.id == id)
    }

    /// Поле по id среди колонок, фасетов и полей поиска
    pub fn field(&self, id: &str) -> Option<&FieldDescriptor> {
        self.column(id)
            .or_else(|| self.facet(id))
            .or_else(|| self.search.iter().find(|d| d.id == id))
    }
}
