use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::cmp::Ordering;

use super::cone::compare_cones;
use super::descriptor::{FieldDescriptor, FieldKind};
use super::field_path::FieldPath;

/// Сортировка по колонке
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    pub field: String,
    pub ascending: bool,
}

impl SortSpec {
    pub fn asc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            ascending: true,
        }
    }

    pub fn desc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            ascending: false,
        }
    }

    /// Переключение по клику на заголовок: та же колонка меняет направление,
    /// другая сортируется по возрастанию
    pub fn toggled(&self, field: &str) -> Self {
        if self.field == field {
            Self {
                field: self.field.clone(),
                ascending: !self.ascending,
            }
        } else {
            Self::asc(field)
        }
    }
}

/// Ключ сортировки одной записи.
///
/// Числа идут раньше текста; NaN и бесконечности считаются текстом.
#[derive(Debug, Clone, PartialEq)]
enum SortKey {
    Number(f64),
    Text(String),
    Cone(String),
}

impl SortKey {
    fn new(raw: String, kind: FieldKind) -> Self {
        if kind == FieldKind::Cone {
            return SortKey::Cone(raw);
        }
        match raw.parse::<f64>() {
            Ok(number) if number.is_finite() => SortKey::Number(number),
            _ => SortKey::Text(raw.to_lowercase()),
        }
    }

    fn rank(&self) -> u8 {
        match self {
            SortKey::Number(_) => 0,
            SortKey::Cone(_) => 1,
            SortKey::Text(_) => 2,
        }
    }

    fn compare(&self, other: &Self) -> Ordering {
        match (self, other) {
            (SortKey::Number(a), SortKey::Number(b)) => a.total_cmp(b),
            (SortKey::Cone(a), SortKey::Cone(b)) => compare_cones(a, b),
            (SortKey::Text(a), SortKey::Text(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

/// Первое значение поля
fn first_value(record: &Value, field: &str, descriptor: Option<&FieldDescriptor>) -> Option<String> {
    match descriptor {
        Some(d) => d.values(record).into_iter().next(),
        None => FieldPath::parse(field)
            .ok()?
            .resolve_strings(record)
            .into_iter()
            .map(|v| v.trim().to_string())
            .find(|v| !v.is_empty()),
    }
}

/// Порядок индексов записей после сортировки (стабильной).
///
/// Записи без значения поля всегда идут в конце, независимо от направления.
pub fn sorted_indices(records: &[&Value], spec: &SortSpec, descriptors: &[FieldDescriptor]) -> Vec<usize> {
    let descriptor = descriptors.iter().find(|d| d.id == spec.field);
    let kind = descriptor.map_or(FieldKind::Text, |d| d.kind);

    let keys: Vec<Option<SortKey>> = records
        .iter()
        .map(|record| first_value(record, &spec.field, descriptor).map(|raw| SortKey::new(raw, kind)))
        .collect();

    let mut indices: Vec<usize> = (0..records.len()).collect();
    indices.sort_by(|&i, &j| match (&keys[i], &keys[j]) {
        (Some(a), Some(b)) => {
            let cmp = a.compare(b);
            if spec.ascending {
                cmp
            } else {
                cmp.reverse()
            }
        }
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
    indices
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sorted_names(records: &[Value], spec: &SortSpec, descriptors: &[FieldDescriptor]) -> Vec<String> {
        let refs: Vec<&Value> = records.iter().collect();
        sorted_indices(&refs, spec, descriptors)
            .into_iter()
            .map(|i| records[i]["name"].as_str().unwrap_or("").to_string())
            .collect()
    }

    #[test]
    fn test_text_sort_is_case_insensitive() {
        let records = vec![
            json!({ "name": "celadon" }),
            json!({ "name": "Ash" }),
            json!({ "name": "Blue" }),
        ];
        assert_eq!(sorted_names(&records, &SortSpec::asc("name"), &[]), vec!["Ash", "Blue", "celadon"]);
        assert_eq!(sorted_names(&records, &SortSpec::desc("name"), &[]), vec!["celadon", "Blue", "Ash"]);
    }

    #[test]
    fn test_cone_column_uses_firing_order() {
        let descriptors = vec![FieldDescriptor::cone("cone", "Cone", &["cone", "name"])];
        let records = vec![
            json!({ "name": "a", "cone": { "name": "10" } }),
            json!({ "name": "b", "cone": { "name": "06" } }),
            json!({ "name": "c", "cone": { "name": "6" } }),
        ];
        assert_eq!(sorted_names(&records, &SortSpec::asc("cone"), &descriptors), vec!["b", "c", "a"]);
    }

    #[test]
    fn test_numbers_compare_numerically_and_missing_go_last() {
        let records = vec![
            json!({ "name": "a", "shrinkage": 12.5 }),
            json!({ "name": "b" }),
            json!({ "name": "c", "shrinkage": 9 }),
        ];
        assert_eq!(sorted_names(&records, &SortSpec::desc("shrinkage"), &[]), vec!["a", "c", "b"]);
        assert_eq!(sorted_names(&records, &SortSpec::asc("shrinkage"), &[]), vec!["c", "a", "b"]);
    }

    #[test]
    fn test_mixed_numbers_and_text_sort_the_same_from_any_input_order() {
        let labels = ["9", "10", "1a", "nan", "inf", "Ash"];
        let expected = vec!["9", "10", "1a", "Ash", "inf", "nan"];

        let mut orders: Vec<Vec<&str>> = vec![labels.to_vec()];
        let mut reversed = labels.to_vec();
        reversed.reverse();
        orders.push(reversed);
        orders.push(vec!["1a", "10", "9", "Ash", "nan", "inf"]);
        orders.push(vec!["nan", "9", "inf", "1a", "Ash", "10"]);

        for order in orders {
            let records: Vec<Value> = order.iter().map(|l| json!({ "name": l })).collect();
            assert_eq!(sorted_names(&records, &SortSpec::asc("name"), &[]), expected, "{:?}", order);
        }
    }

    #[test]
    fn test_mixed_keys_do_not_panic_on_long_lists() {
        let labels = ["9", "10", "1a", "nan", "-0", "0", "b", "B", "2.5", "inf"];
        let records: Vec<Value> = (0..300)
            .map(|i| json!({ "name": labels[(i * 7 + i / 3) % labels.len()] }))
            .collect();
        let refs: Vec<&Value> = records.iter().collect();
        for spec in [SortSpec::asc("name"), SortSpec::desc("name")] {
            let order = sorted_indices(&refs, &spec, &[]);
            assert_eq!(order.len(), records.len());
        }
    }

    #[test]
    fn test_toggle() {
        let spec = SortSpec::asc("name");
        assert_eq!(spec.toggled("name"), SortSpec::desc("name"));
        assert_eq!(spec.toggled("cone"), SortSpec::asc("cone"));
    }
}
