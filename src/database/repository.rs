use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::database::manager::DatabaseError;
use crate::database::models::{
    Candle, Material, NewCandle, NewMaterial, NewScenario, NewUser, ProjectionScenario, RecipeCost,
    ScenarioItem, User,
};

#[async_trait]
pub trait MaterialRepository: Send + Sync {
    /// Every material, sorted by name ascending
    async fn find_all_ordered_by_name(&self) -> Result<Vec<Material>, DatabaseError>;

    async fn create(&self, material: NewMaterial) -> Result<Material, DatabaseError>;

    async fn count(&self) -> Result<i64, DatabaseError>;
}

#[async_trait]
pub trait CandleRepository: Send + Sync {
    async fn find_all_ordered_by_name(&self) -> Result<Vec<Candle>, DatabaseError>;

    /// Candles with `active = true`, sorted by name ascending
    async fn find_active_ordered_by_name(&self) -> Result<Vec<Candle>, DatabaseError>;

    /// Recipe lines of the given candles joined with material unit costs
    async fn find_recipe_costs(&self, candle_ids: &[Uuid]) -> Result<Vec<RecipeCost>, DatabaseError>;

    /// Insert the candle and its recipe atomically
    async fn create(&self, candle: NewCandle) -> Result<Candle, DatabaseError>;

    async fn count_active(&self) -> Result<i64, DatabaseError>;
}

#[async_trait]
pub trait ScenarioRepository: Send + Sync {
    /// Every scenario, most recent first
    async fn find_all(&self) -> Result<Vec<ProjectionScenario>, DatabaseError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<ProjectionScenario>, DatabaseError>;

    async fn find_items(&self, scenario_ids: &[Uuid]) -> Result<Vec<ScenarioItem>, DatabaseError>;

    /// Insert the scenario and its items atomically
    async fn create(&self, scenario: NewScenario) -> Result<ProjectionScenario, DatabaseError>;

    async fn count(&self) -> Result<i64, DatabaseError>;
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DatabaseError>;

    async fn create(&self, user: NewUser) -> Result<User, DatabaseError>;
}

#[async_trait]
pub trait HealthCheck: Send + Sync {
    async fn ping(&self) -> Result<(), DatabaseError>;
}

/// Every repository the application needs, shared across requests
#[derive(Clone)]
pub struct Repositories {
    pub materials: Arc<dyn MaterialRepository>,
    pub candles: Arc<dyn CandleRepository>,
    pub scenarios: Arc<dyn ScenarioRepository>,
    pub users: Arc<dyn UserRepository>,
    pub health: Arc<dyn HealthCheck>,
}

impl Repositories {
    /// Use one store for every entity
    pub fn shared<S>(store: Arc<S>) -> Self
    where
        S: MaterialRepository
            + CandleRepository
            + ScenarioRepository
            + UserRepository
            + HealthCheck
            + 'static,
    {
        Self {
            materials: store.clone(),
            candles: store.clone(),
            scenarios: store.clone(),
            users: store.clone(),
            health: store,
        }
    }

    pub fn postgres(pool: sqlx::PgPool) -> Self {
        Self::shared(Arc::new(crate::database::postgres::PgStore::new(pool)))
    }
}
