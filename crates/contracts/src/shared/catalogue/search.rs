use serde_json::Value;

use super::descriptor::FieldDescriptor;

/// Проверяет, соответствует ли запись поисковому запросу.
///
/// Пустой запрос подходит под всё. Иначе ищется подстрока без учёта
/// регистра хотя бы в одном значении одного из полей; отсутствующее поле
/// просто не совпадает. Непустой запрос не обрезается: `"blue "` ищет
/// и пробел.
pub fn matches(record: &Value, query: &str, descriptors: &[FieldDescriptor]) -> bool {
    match normalize_query(query) {
        Some(needle) => matches_normalized(record, &needle, descriptors),
        None => true,
    }
}

/// Запрос в нижнем регистре; `None` для пустого
pub(crate) fn normalize_query(query: &str) -> Option<String> {
    if query.trim().is_empty() {
        None
    } else {
        Some(query.to_lowercase())
    }
}

/// То же, что [`matches`], но запрос уже приведён к нижнему регистру
pub(crate) fn matches_normalized(record: &Value, needle: &str, descriptors: &[FieldDescriptor]) -> bool {
    descriptors.iter().any(|descriptor| {
        descriptor
            .values(record)
            .iter()
            .any(|value| value.to_lowercase().contains(needle))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn descriptors() -> Vec<FieldDescriptor> {
        vec![
            FieldDescriptor::text("name", "Name", &["name"]),
            FieldDescriptor::text("clayBody", "Clay body", &["clayBody", "name"]),
            FieldDescriptor::text(
                "decoration",
                "Decoration",
                &["decorationLayers", "decorations", "name"],
            ),
            FieldDescriptor::text("manufacturer", "Manufacturer", &["manufacturer"]),
        ]
    }

    fn tiles() -> Vec<Value> {
        vec![
            json!({
                "name": "Tile 1",
                "clayBody": { "name": "B-Mix" },
                "decorationLayers": [{ "decorations": [{ "name": "Floating Blue" }] }]
            }),
            json!({
                "name": "Tile 2",
                "clayBody": { "name": "Porcelain" },
                "decorationLayers": [],
                "manufacturer": "Laguna"
            }),
        ]
    }

    #[test]
    fn test_blank_query_matches_everything() {
        for tile in tiles() {
            assert!(matches(&tile, "", &descriptors()));
            assert!(matches(&tile, "   ", &descriptors()));
        }
    }

    #[test]
    fn test_case_insensitive_substring() {
        let tiles = tiles();
        assert!(matches(&tiles[0], "b-MIX", &descriptors()));
        assert!(matches(&tiles[1], "porce", &descriptors()));
        assert!(!matches(&tiles[1], "b-mix", &descriptors()));
    }

    #[test]
    fn test_surrounding_spaces_are_part_of_the_query() {
        let tiles = tiles();
        assert!(!matches(&tiles[0], "blue ", &descriptors()));
        assert!(matches(&tiles[0], " blue", &descriptors()));
        assert!(matches(&tiles[0], "floating blue", &descriptors()));
    }

    #[test]
    fn test_collection_paths_match_any_element() {
        let tiles = tiles();
        assert!(matches(&tiles[0], "floating", &descriptors()));
        assert!(!matches(&tiles[1], "floating", &descriptors()));
    }

    #[test]
    fn test_missing_optional_field_does_not_match() {
        let tiles = tiles();
        assert!(!matches(&tiles[0], "laguna", &descriptors()));
        assert!(matches(&tiles[1], "laguna", &descriptors()));
    }
}
