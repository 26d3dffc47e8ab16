//! Пользовательские настройки вида списка (таблица/сетка, скрытые колонки).
//!
//! Хранилище передаётся снаружи через [`KeyValueStore`]: во фронтенде это
//! localStorage, в тестах и на сервере [`MemoryStore`]. Ядро фильтрации
//! от настроек не зависит.

use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::collections::{BTreeSet, HashMap};

/// Хранилище строк по именованному ключу
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

/// Хранилище в памяти процесса
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.values
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
    }

    fn remove(&self, key: &str) {
        self.values.borrow_mut().remove(key);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Table,
    Grid,
}

impl ViewMode {
    pub fn toggled(self) -> Self {
        match self {
            ViewMode::Table => ViewMode::Grid,
            ViewMode::Grid => ViewMode::Table,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewPreferences {
    #[serde(default)]
    pub view_mode: ViewMode,
    #[serde(default)]
    pub hidden_columns: BTreeSet<String>,
}

impl ViewPreferences {
    pub fn storage_key(entity: &str) -> String {
        format!("pottery.{}.view.v1", entity)
    }

    /// Загрузить настройки; отсутствующие или повреждённые дают значения по умолчанию
    pub fn load(store: &dyn KeyValueStore, entity: &str) -> Self {
        store
            .get(&Self::storage_key(entity))
            .and_then(|raw| serde_json::from_str(&raw).ok())
            .unwrap_or_default()
    }

    pub fn save(&self, store: &dyn KeyValueStore, entity: &str) {
        if let Ok(raw) = serde_json::to_string(self) {
            store.set(&Self::storage_key(entity), &raw);
        }
    }

    pub fn is_column_visible(&self, column: &str) -> bool {
        !self.hidden_columns.contains(column)
    }

    pub fn toggle_column(&mut self, column: &str) {
        if !self.hidden_columns.remove(column) {
            self.hidden_columns.insert(column.to_string());
        }
    }
}
