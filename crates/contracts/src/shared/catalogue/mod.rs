//! Фасетная фильтрация каталога.
//!
//! Поиск, фильтры, сортировка и разбиение на страницы поверх списков
//! записей (тестовые плитки, массы, декоры, коллекции). Всё работает по
//! JSON-представлению записи и описаниям полей [`FieldDescriptor`], поэтому
//! один и тот же код обслуживает все сущности; отличия задаются в [`schemas`].
//!
//! ```text
//! records -> Catalogue::new -> facets (меню фильтров)
//!                           -> search ∧ filters -> sort -> page
//! ```

pub mod catalogue;
pub mod colour;
pub mod cone;
pub mod descriptor;
pub mod facet;
pub mod field_path;
pub mod filter;
pub mod page;
pub mod prefs;
pub mod schemas;
pub mod search;
pub mod sort;

use thiserror::Error;

pub use catalogue::{Catalogue, CatalogueQuery, CatalogueView};
pub use colour::{categorize, ColorCategory, ColourSwatch};
pub use cone::{compare_cones, sort_cones};
pub use descriptor::{CatalogueSchema, FieldDescriptor, FieldKind};
pub use facet::{extract_facets, FacetGroup, FacetOption};
pub use field_path::FieldPath;
pub use filter::{passes_filters, passes_filters_with, ActiveFilterState};
pub use page::{Page, PageRequest};
pub use prefs::{KeyValueStore, MemoryStore, ViewMode, ViewPreferences};
pub use schemas::CatalogueEntity;
pub use search::matches;
pub use sort::SortSpec;

/// Ошибки каталога
#[derive(Debug, Error)]
pub enum CatalogueError {
    #[error("Invalid field path: '{0}'")]
    InvalidFieldPath(String),

    #[error("Unknown field '{field}' for {entity}")]
    UnknownField { entity: String, field: String },

    #[error("Record serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}
