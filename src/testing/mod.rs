//! In-memory store backing the router and CLI tests.

use async_trait::async_trait;
use chrono::Utc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::auth::{password, AuthError};
use crate::database::models::{
    Candle, CandleMaterial, Material, NewCandle, NewMaterial, NewScenario, NewUser,
    ProjectionScenario, RecipeCost, ScenarioItem, User,
};
use crate::database::repository::{
    CandleRepository, HealthCheck, MaterialRepository, ScenarioRepository, UserRepository,
};
use crate::database::DatabaseError;

const SEED_HASH_COST: u32 = 4;

#[derive(Default)]
struct Tables {
    materials: Vec<Material>,
    candles: Vec<Candle>,
    recipes: Vec<CandleMaterial>,
    scenarios: Vec<ProjectionScenario>,
    items: Vec<ScenarioItem>,
    users: Vec<User>,
}

/// Repository backend holding every table in process memory
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
    unavailable: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent operation fail as if the database were unreachable
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Seed an account. Hashed at the lowest bcrypt cost so tests stay fast.
    pub async fn with_user(
        self,
        email: &str,
        name: &str,
        plain_password: &str,
    ) -> Result<Self, AuthError> {
        let password_hash = password::hash_password_with_cost(plain_password, SEED_HASH_COST)?;
        {
            let mut tables = self.tables.write().await;
            tables.users.push(User {
                id: Uuid::new_v4(),
                email: email.to_string(),
                name: name.to_string(),
                password_hash,
                created_at: Utc::now(),
            });
        }
        Ok(self)
    }

    pub async fn recipe_of(&self, candle_id: Uuid) -> Vec<CandleMaterial> {
        let tables = self.tables.read().await;
        tables
            .recipes
            .iter()
            .filter(|line| line.candle_id == candle_id)
            .cloned()
            .collect()
    }

    fn check(&self) -> Result<(), DatabaseError> {
        if self.unavailable.load(Ordering::SeqCst) {
            Err(DatabaseError::ConnectionError("simulated outage".to_string()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl MaterialRepository for MemoryStore {
    async fn find_all_ordered_by_name(&self) -> Result<Vec<Material>, DatabaseError> {
        self.check()?;
        let mut materials = self.tables.read().await.materials.clone();
        materials.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(materials)
    }

    async fn create(&self, material: NewMaterial) -> Result<Material, DatabaseError> {
        self.check()?;
        let material = Material {
            id: Uuid::new_v4(),
            name: material.name,
            material_type: material.material_type,
            unit: material.unit,
            unit_cost: material.unit_cost,
            created_at: Utc::now(),
        };
        self.tables.write().await.materials.push(material.clone());
        Ok(material)
    }

    async fn count(&self) -> Result<i64, DatabaseError> {
        self.check()?;
        Ok(self.tables.read().await.materials.len() as i64)
    }
}

#[async_trait]
impl CandleRepository for MemoryStore {
    async fn find_all_ordered_by_name(&self) -> Result<Vec<Candle>, DatabaseError> {
        self.check()?;
        let mut candles = self.tables.read().await.candles.clone();
        candles.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(candles)
    }

    async fn find_active_ordered_by_name(&self) -> Result<Vec<Candle>, DatabaseError> {
        self.check()?;
        let mut candles: Vec<Candle> = self
            .tables
            .read()
            .await
            .candles
            .iter()
            .filter(|candle| candle.active)
            .cloned()
            .collect();
        candles.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(candles)
    }

    async fn find_recipe_costs(&self, candle_ids: &[Uuid]) -> Result<Vec<RecipeCost>, DatabaseError> {
        self.check()?;
        let tables = self.tables.read().await;
        let costs = tables
            .recipes
            .iter()
            .filter(|line| candle_ids.contains(&line.candle_id))
            .filter_map(|line| {
                tables
                    .materials
                    .iter()
                    .find(|material| material.id == line.material_id)
                    .map(|material| RecipeCost {
                        candle_id: line.candle_id,
                        quantity: line.quantity,
                        unit_cost: material.unit_cost,
                    })
            })
            .collect();
        Ok(costs)
    }

    async fn create(&self, candle: NewCandle) -> Result<Candle, DatabaseError> {
        self.check()?;
        let mut tables = self.tables.write().await;

        for line in &candle.recipe {
            if !tables.materials.iter().any(|m| m.id == line.material_id) {
                return Err(DatabaseError::QueryError(format!(
                    "unknown material {}",
                    line.material_id
                )));
            }
        }

        let created = Candle {
            id: Uuid::new_v4(),
            name: candle.name,
            description: candle.description,
            sale_price: candle.sale_price,
            active: candle.active,
            created_at: Utc::now(),
        };
        tables.recipes.extend(candle.recipe.into_iter().map(|line| CandleMaterial {
            candle_id: created.id,
            material_id: line.material_id,
            quantity: line.quantity,
        }));
        tables.candles.push(created.clone());
        Ok(created)
    }

    async fn count_active(&self) -> Result<i64, DatabaseError> {
        self.check()?;
        Ok(self.tables.read().await.candles.iter().filter(|c| c.active).count() as i64)
    }
}

#[async_trait]
impl ScenarioRepository for MemoryStore {
    async fn find_all(&self) -> Result<Vec<ProjectionScenario>, DatabaseError> {
        self.check()?;
        let mut scenarios = self.tables.read().await.scenarios.clone();
        scenarios.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(scenarios)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<ProjectionScenario>, DatabaseError> {
        self.check()?;
        let tables = self.tables.read().await;
        Ok(tables.scenarios.iter().find(|s| s.id == id).cloned())
    }

    async fn find_items(&self, scenario_ids: &[Uuid]) -> Result<Vec<ScenarioItem>, DatabaseError> {
        self.check()?;
        let tables = self.tables.read().await;
        Ok(tables
            .items
            .iter()
            .filter(|item| scenario_ids.contains(&item.scenario_id))
            .cloned()
            .collect())
    }

    async fn create(&self, scenario: NewScenario) -> Result<ProjectionScenario, DatabaseError> {
        self.check()?;
        let mut tables = self.tables.write().await;

        for item in &scenario.items {
            if !tables.candles.iter().any(|c| c.id == item.candle_id) {
                return Err(DatabaseError::QueryError(format!(
                    "unknown candle {}",
                    item.candle_id
                )));
            }
        }

        let created = ProjectionScenario {
            id: Uuid::new_v4(),
            name: scenario.name,
            description: scenario.description,
            created_at: Utc::now(),
        };
        tables.items.extend(scenario.items.into_iter().map(|item| ScenarioItem {
            scenario_id: created.id,
            candle_id: item.candle_id,
            quantity: item.quantity,
            unit_price: item.unit_price,
        }));
        tables.scenarios.push(created.clone());
        Ok(created)
    }

    async fn count(&self) -> Result<i64, DatabaseError> {
        self.check()?;
        Ok(self.tables.read().await.scenarios.len() as i64)
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DatabaseError> {
        self.check()?;
        let tables = self.tables.read().await;
        Ok(tables
            .users
            .iter()
            .find(|user| user.email.eq_ignore_ascii_case(email))
            .cloned())
    }

    async fn create(&self, user: NewUser) -> Result<User, DatabaseError> {
        self.check()?;
        let mut tables = self.tables.write().await;
        if tables.users.iter().any(|u| u.email.eq_ignore_ascii_case(&user.email)) {
            return Err(DatabaseError::QueryError(format!(
                "duplicate key value violates unique constraint users_email_key ({})",
                user.email
            )));
        }

        let created = User {
            id: Uuid::new_v4(),
            email: user.email,
            name: user.name,
            password_hash: user.password_hash,
            created_at: Utc::now(),
        };
        tables.users.push(created.clone());
        Ok(created)
    }
}

#[async_trait]
impl HealthCheck for MemoryStore {
    async fn ping(&self) -> Result<(), DatabaseError> {
        self.check()
    }
}
