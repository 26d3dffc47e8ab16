//! Общие типы каталога керамики: доменные записи и ядро фасетной фильтрации.
//! Используется и backend, и frontend (WASM), поэтому без зависимостей от рантайма.

pub mod domain;
pub mod shared;
