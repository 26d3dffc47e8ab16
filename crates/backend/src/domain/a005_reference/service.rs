use contracts::domain::a005_reference::{Atmosphere, ClayBodyType, Cone, DecorationType};

use crate::shared::data::catalogue_store::CatalogueStore;

/// Конусы от холодных к горячим
pub fn list_cones(store: &CatalogueStore) -> Vec<Cone> {
    store.reference.sorted_cones()
}

pub fn list_atmospheres(store: &CatalogueStore) -> Vec<Atmosphere> {
    store.reference.atmospheres.clone()
}

pub fn list_clay_body_types(store: &CatalogueStore) -> Vec<ClayBodyType> {
    store.reference.clay_body_types.clone()
}

pub fn list_decoration_types(store: &CatalogueStore) -> Vec<DecorationType> {
    store.reference.decoration_types.clone()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cones_sorted_by_firing_order() {
        let store = CatalogueStore::embedded(50).unwrap();
        let names: Vec<String> = list_cones(&store).into_iter().map(|c| c.name).collect();
        assert_eq!(names, vec!["022", "06", "04", "1", "5", "6", "10"]);
    }
}
