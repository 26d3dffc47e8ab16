use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

use super::CatalogueError;

/// Путь доступа к полю записи: упорядоченный список имён свойств.
///
/// Сегмент, попадающий в коллекцию, раскрывается на все её элементы,
/// поэтому `decorationLayers.decorations.name` даёт имена всех декоров
/// всех слоёв.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FieldPath {
    segments: Vec<String>,
}

impl FieldPath {
    /// Разобрать путь из строки с точками (`clayBody.name`)
    pub fn parse(path: &str) -> Result<Self, CatalogueError> {
        let segments: Vec<String> = path.split('.').map(|s| s.trim().to_string()).collect();
        if segments.iter().any(|s| s.is_empty()) {
            return Err(CatalogueError::InvalidFieldPath(path.to_string()));
        }
        Ok(Self { segments })
    }

    /// Путь из статически известных сегментов
    pub fn from_segments<I, S>(segments: I) -> Result<Self, CatalogueError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let segments: Vec<String> = segments.into_iter().map(Into::into).collect();
        if segments.is_empty() || segments.iter().any(|s| s.trim().is_empty()) {
            return Err(CatalogueError::InvalidFieldPath(segments.join(".")));
        }
        Ok(Self { segments })
    }

    /// Путь из литералов конфигурации схем (сегменты заведомо непустые)
    pub(crate) fn from_static(segments: &[&'static str]) -> Self {
        Self {
            segments: segments.iter().map(|s| s.to_string()).collect(),
        }
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Все значения, до которых доходит путь (с раскрытием коллекций).
    ///
    /// Отсутствующие поля и `null` просто не дают значений.
    pub fn resolve<'a>(&self, record: &'a Value) -> Vec<&'a Value> {
        let mut current: Vec<&'a Value> = vec![record];
        for segment in &self.segments {
            let mut next = Vec::new();
            for value in current {
                step(value, segment, &mut next);
            }
            if next.is_empty() {
                return next;
            }
            current = next;
        }

        let mut leaves = Vec::with_capacity(current.len());
        for value in current {
            flatten_into(value, &mut leaves);
        }
        leaves
    }

    /// Скалярные значения пути в виде строк (строки, числа, bool)
    pub fn resolve_strings(&self, record: &Value) -> Vec<String> {
        self.resolve(record)
            .into_iter()
            .filter_map(scalar_to_string)
            .collect()
    }
}

fn step<'a>(value: &'a Value, segment: &str, out: &mut Vec<&'a Value>) {
    match value {
        Value::Object(map) => {
            if let Some(child) = map.get(segment) {
                out.push(child);
            }
        }
        Value::Array(items) => {
            for item in items {
                step(item, segment, out);
            }
        }
        _ => {}
    }
}

fn flatten_into<'a>(value: &'a Value, out: &mut Vec<&'a Value>) {
    match value {
        Value::Array(items) => {
            for item in items {
                flatten_into(item, out);
            }
        }
        Value::Null => {}
        other => out.push(other),
    }
}

pub(crate) fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.segments.join("."))
    }
}

impl TryFrom<String> for FieldPath {
    type Error = CatalogueError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        FieldPath::parse(&value)
    }
}

impl From<FieldPath> for String {
    fn from(path: FieldPath) -> Self {
        path.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn tile() -> Value {
        json!({
            "name": "Tile A",
            "clayBody": { "name": "Porcelain" },
            "cone": { "name": "6" },
            "decorationLayers": [
                { "order": 1, "decorations": [{ "name": "Celadon" }, { "name": "Tenmoku" }] },
                { "order": 2, "decorations": [{ "name": "Shino" }] },
                { "order": 3, "decorations": [] }
            ],
            "manufacturer": null
        })
    }

    #[test]
    fn test_parse_rejects_empty_segments() {
        assert!(FieldPath::parse("clayBody.name").is_ok());
        assert!(FieldPath::parse("").is_err());
        assert!(FieldPath::parse("a..b").is_err());
        assert!(FieldPath::parse(".a").is_err());
        assert!(FieldPath::from_segments(Vec::<String>::new()).is_err());
    }

    #[test]
    fn test_resolve_nested_object() {
        let path = FieldPath::parse("clayBody.name").unwrap();
        assert_eq!(path.resolve_strings(&tile()), vec!["Porcelain"]);
    }

    #[test]
    fn test_resolve_fans_out_over_collections() {
        let path = FieldPath::parse("decorationLayers.decorations.name").unwrap();
        assert_eq!(
            path.resolve_strings(&tile()),
            vec!["Celadon", "Tenmoku", "Shino"]
        );
    }

    #[test]
    fn test_resolve_missing_and_null_fields() {
        let record = tile();
        assert!(FieldPath::parse("manufacturer").unwrap().resolve(&record).is_empty());
        assert!(FieldPath::parse("atmosphere.name").unwrap().resolve(&record).is_empty());
        assert!(FieldPath::parse("name.first").unwrap().resolve(&record).is_empty());
    }

    #[test]
    fn test_numbers_and_bools_become_strings() {
        let record = json!({ "layers": [{ "order": 1 }, { "order": 2 }], "isPublic": true });
        assert_eq!(
            FieldPath::parse("layers.order").unwrap().resolve_strings(&record),
            vec!["1", "2"]
        );
        assert_eq!(
            FieldPath::parse("isPublic").unwrap().resolve_strings(&record),
            vec!["true"]
        );
    }

    #[test]
    fn test_serde_as_dotted_string() {
        let path: FieldPath = serde_json::from_str("\"clayBody.name\"").unwrap();
        assert_eq!(path.segments(), ["clayBody", "name"]);
        assert_eq!(serde_json::to_string(&path).unwrap(), "\"clayBody.name\"");
        assert!(serde_json::from_str::<FieldPath>("\"a..b\"").is_err());
    }
}
