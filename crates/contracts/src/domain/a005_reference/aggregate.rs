use serde::{Deserialize, Serialize};

use crate::shared::catalogue::cone::compare_cones;

/// Пирометрический конус
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cone {
    pub id: i32,
    pub name: String,
    /// Ориентировочная температура, °C
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature_c: Option<i32>,
}

/// Атмосфера обжига (oxidation, reduction, ...)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Atmosphere {
    pub id: i32,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClayBodyType {
    pub id: i32,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecorationType {
    pub id: i32,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Все справочники разом
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferenceData {
    #[serde(default)]
    pub cones: Vec<Cone>,
    #[serde(default)]
    pub atmospheres: Vec<Atmosphere>,
    #[serde(default)]
    pub clay_body_types: Vec<ClayBodyType>,
    #[serde(default)]
    pub decoration_types: Vec<DecorationType>,
}

impl ReferenceData {
    /// Конусы в порядке температуры обжига (по названию, не по id)
    pub fn sorted_cones(&self) -> Vec<Cone> {
        let mut cones = self.cones.clone();
        cones.sort_by(|a, b| compare_cones(&a.name, &b.name));
        cones
    }
}
