//! Выгрузка отфильтрованного списка в CSV

use serde_json::Value;

use contracts::shared::catalogue::{CatalogueSchema, FieldDescriptor};

/// CSV с колонками схемы; первая колонка всегда `id`.
///
/// Множественные значения склеиваются через `, `.
pub fn documents_to_csv(schema: &CatalogueSchema, documents: &[&Value]) -> anyhow::Result<String> {
    let columns: Vec<&FieldDescriptor> = schema.columns.iter().collect();

    let mut writer = csv::Writer::from_writer(Vec::new());

    let mut header = vec!["id".to_string()];
    header.extend(columns.iter().map(|c| c.label.clone()));
    writer.write_record(&header)?;

    for doc in documents {
        let mut row = vec![doc
            .get("id")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string()];
        row.extend(columns.iter().map(|c| c.display_value(doc)));
        writer.write_record(&row)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| anyhow::anyhow!("Failed to flush CSV: {}", e))?;
    Ok(String::from_utf8(bytes)?)
}

/// Имя файла выгрузки: `test_tiles-20240501.csv`
pub fn export_file_name(entity: &str, now: chrono::DateTime<chrono::Utc>) -> String {
    format!("{}-{}.csv", entity, now.format("%Y%m%d"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use contracts::shared::catalogue::schemas;
    use serde_json::json;

    #[test]
    fn test_csv_joins_multi_values_and_quotes() {
        let schema = schemas::test_tiles();
        let tile = json!({
            "id": "t1",
            "name": "Shino, thick",
            "clayBody": { "name": "B-Mix" },
            "decorationLayers": [
                { "order": 1, "decorations": [{ "name": "Shino" }] },
                { "order": 2, "decorations": [{ "name": "Tenmoku" }] }
            ],
            "cone": { "name": "10" }
        });
        let csv = documents_to_csv(&schema, &[&tile]).unwrap();
        let mut lines = csv.lines();
        assert_eq!(lines.next(), Some("id,Name,Clay body,Decorations,Cone,Atmosphere"));
        assert_eq!(lines.next(), Some("t1,\"Shino, thick\",B-Mix,\"Shino, Tenmoku\",10,"));
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn test_export_file_name() {
        let now = chrono::Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        assert_eq!(export_file_name("decorations", now), "decorations-20240501.csv");
    }
}
