use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ProjectionScenario {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ScenarioItem {
    pub scenario_id: Uuid,
    pub candle_id: Uuid,
    pub quantity: i32,
    pub unit_price: Decimal,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewScenario {
    pub name: String,
    pub description: Option<String>,
    pub items: Vec<NewScenarioItem>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewScenarioItem {
    pub candle_id: Uuid,
    pub quantity: i32,
    pub unit_price: Decimal,
}
