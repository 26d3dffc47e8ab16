use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};

use super::descriptor::FieldDescriptor;
use super::field_path::FieldPath;

/// Активные фильтры: id фасета -> выбранные значения.
///
/// Отсутствие фасета или пустой набор значений означает "без ограничения".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActiveFilterState {
    selections: BTreeMap<String, BTreeSet<String>>,
}

impl ActiveFilterState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn select(&mut self, facet: &str, value: impl Into<String>) {
        self.selections
            .entry(facet.to_string())
            .or_default()
            .insert(value.into());
    }

    pub fn deselect(&mut self, facet: &str, value: &str) {
        if let Some(values) = self.selections.get_mut(facet) {
            values.remove(value);
            if values.is_empty() {
                self.selections.remove(facet);
            }
        }
    }

    /// Переключить значение; возвращает `true`, если оно стало выбранным
    pub fn toggle(&mut self, facet: &str, value: &str) -> bool {
        if self.is_selected(facet, value) {
            self.deselect(facet, value);
            false
        } else {
            self.select(facet, value);
            true
        }
    }

    /// Заменить выбор по фасету целиком
    pub fn set<I, S>(&mut self, facet: &str, values: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let values: BTreeSet<String> = values.into_iter().map(Into::into).collect();
        if values.is_empty() {
            self.selections.remove(facet);
        } else {
            self.selections.insert(facet.to_string(), values);
        }
    }

    pub fn clear_facet(&mut self, facet: &str) {
        self.selections.remove(facet);
    }

    pub fn clear(&mut self) {
        self.selections.clear();
    }

    pub fn is_selected(&self, facet: &str, value: &str) -> bool {
        self.selections
            .get(facet)
            .map_or(false, |values| values.contains(value))
    }

    pub fn selected(&self, facet: &str) -> Option<&BTreeSet<String>> {
        self.selections.get(facet).filter(|values| !values.is_empty())
    }

    /// Количество выбранных значений (для бейджа на панели фильтров)
    pub fn active_count(&self) -> usize {
        self.selections.values().map(BTreeSet::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.active_count() == 0
    }

    /// Непустые фасеты с выбранными значениями
    pub fn iter(&self) -> impl Iterator<Item = (&str, &BTreeSet<String>)> {
        self.selections
            .iter()
            .filter(|(_, values)| !values.is_empty())
            .map(|(facet, values)| (facet.as_str(), values))
    }
}

impl<K, V, S> FromIterator<(K, V)> for ActiveFilterState
where
    K: Into<String>,
    V: IntoIterator<Item = S>,
    S: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut state = ActiveFilterState::new();
        for (facet, values) in iter {
            let facet: String = facet.into();
            state.set(&facet, values);
        }
        state
    }
}

/// Проходит ли запись все активные фильтры.
///
/// Id фасета трактуется как путь к полю с тем же именем (`clayBody`,
/// `type.name`). Для фасетов из схемы сущности см. [`passes_filters_with`].
pub fn passes_filters(record: &Value, active: &ActiveFilterState) -> bool {
    passes_filters_with(record, active, &[])
}

/// Проходит ли запись все активные фильтры: И между фасетами, ИЛИ внутри.
///
/// Фасеты, известные `descriptors`, разрешаются через описание поля
/// (с учётом цвета и видимости), остальные как путь с тем же именем.
/// Запись с повреждёнными данными фильтр не проходит.
pub fn passes_filters_with(
    record: &Value,
    active: &ActiveFilterState,
    descriptors: &[FieldDescriptor],
) -> bool {
    active.iter().all(|(facet, selected)| {
        let values = match descriptors.iter().find(|d| d.id == facet) {
            Some(descriptor) => descriptor.values(record),
            None => match FieldPath::parse(facet) {
                Ok(path) => path
                    .resolve_strings(record)
                    .into_iter()
                    .map(|v| v.trim().to_string())
                    .collect(),
                Err(_) => return false,
            },
        };
        values.iter().any(|value| selected.contains(value))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_no_active_filters_pass_everything() {
        let empty = ActiveFilterState::new();
        for record in [json!({}), json!({ "clayBody": "Porcelain" }), json!(null)] {
            assert!(passes_filters(&record, &empty));
        }
    }

    #[test]
    fn test_empty_selection_is_noop() {
        let mut active = ActiveFilterState::new();
        active.set("clayBody", Vec::<String>::new());
        assert!(active.is_empty());
        assert!(passes_filters(&json!({ "clayBody": "Stoneware" }), &active));
    }

    #[test]
    fn test_or_within_facet() {
        let active: ActiveFilterState =
            [("atmosphere", vec!["Oxidation", "Reduction"])].into_iter().collect();
        assert!(passes_filters(&json!({ "atmosphere": "Oxidation" }), &active));
        assert!(passes_filters(&json!({ "atmosphere": "Reduction" }), &active));
        assert!(!passes_filters(&json!({ "atmosphere": "Wood" }), &active));
        assert!(!passes_filters(&json!({}), &active));
    }

    #[test]
    fn test_and_across_facets() {
        let records = [
            json!({ "clayBody": "Porcelain", "cone": "6" }),
            json!({ "clayBody": "Stoneware", "cone": "6" }),
        ];
        let active: ActiveFilterState =
            [("clayBody", vec!["Porcelain"]), ("cone", vec!["6"])].into_iter().collect();
        let passed: Vec<bool> = records.iter().map(|r| passes_filters(r, &active)).collect();
        assert_eq!(passed, vec![true, false]);
    }

    #[test]
    fn test_descriptor_resolution_and_malformed_colour() {
        let descriptors = vec![
            FieldDescriptor::text("decoration", "Decoration", &["decorationLayers", "decorations", "name"]),
            FieldDescriptor::colour("colour", "Colour", &["colour"]),
        ];
        let mut active = ActiveFilterState::new();
        active.select("colour", "Blue");

        let good = json!({ "colour": r##"{"hex":"#0000ff","category":"Blue"}"## });
        let broken = json!({ "colour": "{{{" });
        assert!(passes_filters_with(&good, &active, &descriptors));
        assert!(!passes_filters_with(&broken, &active, &descriptors));

        active.clear();
        active.select("decoration", "Shino");
        let tile = json!({ "decorationLayers": [
            { "decorations": [{ "name": "Celadon" }] },
            { "decorations": [{ "name": "Shino" }] }
        ]});
        assert!(passes_filters_with(&tile, &active, &descriptors));
    }

    #[test]
    fn test_state_operations() {
        let mut active = ActiveFilterState::new();
        assert!(active.toggle("cone", "6"));
        active.select("cone", "10");
        active.select("type", "Glaze");
        assert_eq!(active.active_count(), 3);
        assert!(!active.toggle("cone", "6"));
        assert!(active.is_selected("cone", "10"));
        active.deselect("cone", "10");
        assert!(active.selected("cone").is_none());
        active.clear_facet("type");
        assert!(active.is_empty());
    }

    #[test]
    fn test_serializes_as_plain_map() {
        let active: ActiveFilterState = [("cone", vec!["6", "10"])].into_iter().collect();
        assert_eq!(
            serde_json::to_value(&active).unwrap(),
            json!({ "cone": ["10", "6"] })
        );
    }
}
