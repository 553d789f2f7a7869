use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Candle {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub sale_price: Decimal,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

/// One line of a candle recipe, quantity expressed in the material's unit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct CandleMaterial {
    pub candle_id: Uuid,
    pub material_id: Uuid,
    pub quantity: Decimal,
}

/// Recipe line joined with the material's current unit cost
#[derive(Debug, Clone, FromRow)]
pub struct RecipeCost {
    pub candle_id: Uuid,
    pub quantity: Decimal,
    pub unit_cost: Decimal,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewCandle {
    pub name: String,
    pub description: Option<String>,
    pub sale_price: Decimal,
    pub active: bool,
    pub recipe: Vec<RecipeLine>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecipeLine {
    pub material_id: Uuid,
    pub quantity: Decimal,
}
