use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "material_type", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum MaterialType {
    Cire,
    Meche,
    Parfum,
    Colorant,
    Contenant,
    Emballage,
    Autre,
}

impl MaterialType {
    pub fn label(&self) -> &'static str {
        match self {
            MaterialType::Cire => "Cire",
            MaterialType::Meche => "Mèche",
            MaterialType::Parfum => "Parfum",
            MaterialType::Colorant => "Colorant",
            MaterialType::Contenant => "Contenant",
            MaterialType::Emballage => "Emballage",
            MaterialType::Autre => "Autre",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "material_unit", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    Gramme,
    Kilogramme,
    Millilitre,
    Litre,
    Piece,
}

impl Unit {
    pub fn symbol(&self) -> &'static str {
        match self {
            Unit::Gramme => "g",
            Unit::Kilogramme => "kg",
            Unit::Millilitre => "ml",
            Unit::Litre => "l",
            Unit::Piece => "pc",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Material {
    pub id: Uuid,
    pub name: String,
    pub material_type: MaterialType,
    pub unit: Unit,
    /// Cost of one `unit` of this material
    pub unit_cost: Decimal,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewMaterial {
    pub name: String,
    #[serde(rename = "type")]
    pub material_type: MaterialType,
    pub unit: Unit,
    #[serde(default)]
    pub unit_cost: Decimal,
}
