use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use super::cone::compare_cones;
use super::descriptor::{FieldDescriptor, FieldKind};

/// Один вариант значения фасета
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacetOption {
    pub label: String,
    pub value: String,
    /// Сколько записей несут это значение
    #[serde(default)]
    pub count: usize,
}

/// Группа вариантов для одного фасета (один выпадающий фильтр)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacetGroup {
    pub id: String,
    pub label: String,
    pub options: Vec<FacetOption>,
}

/// Собрать различающиеся значения фасетов по набору записей.
///
/// Пустые значения отбрасываются, дубликаты схлопываются, фасет без
/// значений в результат не попадает.
pub fn extract_facets(records: &[Value], descriptors: &[FieldDescriptor]) -> Vec<FacetGroup> {
    extract_facets_from(records.iter(), descriptors)
}

pub fn extract_facets_from<'a, I>(records: I, descriptors: &[FieldDescriptor]) -> Vec<FacetGroup>
where
    I: IntoIterator<Item = &'a Value>,
    I::IntoIter: Clone,
{
    let records = records.into_iter();
    descriptors
        .iter()
        .filter_map(|descriptor| facet_group(records.clone(), descriptor))
        .collect()
}

fn facet_group<'a>(
    records: impl Iterator<Item = &'a Value>,
    descriptor: &FieldDescriptor,
) -> Option<FacetGroup> {
    // BTreeMap даёт и дедупликацию, и сортировку
    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    for record in records {
        let mut values = descriptor.values(record);
        values.sort();
        values.dedup();
        for value in values {
            *counts.entry(value).or_insert(0) += 1;
        }
    }

    if counts.is_empty() {
        return None;
    }

    let mut options: Vec<FacetOption> = counts
        .into_iter()
        .map(|(value, count)| FacetOption {
            label: value.clone(),
            value,
            count,
        })
        .collect();

    if descriptor.kind == FieldKind::Cone {
        options.sort_by(|a, b| compare_cones(&a.value, &b.value));
    }

    Some(FacetGroup {
        id: descriptor.id.clone(),
        label: descriptor.label.clone(),
        options,
    })
}
