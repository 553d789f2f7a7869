use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::database::manager::{DatabaseError, DatabaseManager};
use crate::database::models::{
    Candle, Material, NewCandle, NewMaterial, NewScenario, NewUser, ProjectionScenario, RecipeCost,
    ScenarioItem, User,
};
use crate::database::repository::{
    CandleRepository, HealthCheck, MaterialRepository, ScenarioRepository, UserRepository,
};

/// PostgreSQL-backed repositories sharing the process-wide pool
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MaterialRepository for PgStore {
    async fn find_all_ordered_by_name(&self) -> Result<Vec<Material>, DatabaseError> {
        let materials = sqlx::query_as::<_, Material>(
            "SELECT id, name, material_type, unit, unit_cost, created_at
             FROM materials
             ORDER BY name ASC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(materials)
    }

    async fn create(&self, material: NewMaterial) -> Result<Material, DatabaseError> {
        let material = sqlx::query_as::<_, Material>(
            "INSERT INTO materials (id, name, material_type, unit, unit_cost)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING id, name, material_type, unit, unit_cost, created_at",
        )
        .bind(Uuid::new_v4())
        .bind(&material.name)
        .bind(material.material_type)
        .bind(material.unit)
        .bind(material.unit_cost)
        .fetch_one(&self.pool)
        .await?;

        Ok(material)
    }

    async fn count(&self) -> Result<i64, DatabaseError> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM materials")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}

#[async_trait]
impl CandleRepository for PgStore {
    async fn find_all_ordered_by_name(&self) -> Result<Vec<Candle>, DatabaseError> {
        let candles = sqlx::query_as::<_, Candle>(
            "SELECT id, name, description, sale_price, active, created_at
             FROM candles
             ORDER BY name ASC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(candles)
    }

    async fn find_active_ordered_by_name(&self) -> Result<Vec<Candle>, DatabaseError> {
        let candles = sqlx::query_as::<_, Candle>(
            "SELECT id, name, description, sale_price, active, created_at
             FROM candles
             WHERE active = true
             ORDER BY name ASC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(candles)
    }

    async fn find_recipe_costs(&self, candle_ids: &[Uuid]) -> Result<Vec<RecipeCost>, DatabaseError> {
        if candle_ids.is_empty() {
            return Ok(vec![]);
        }

        let lines = sqlx::query_as::<_, RecipeCost>(
            "SELECT cm.candle_id, cm.quantity, m.unit_cost
             FROM candle_materials cm
             JOIN materials m ON m.id = cm.material_id
             WHERE cm.candle_id = ANY($1)",
        )
        .bind(candle_ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(lines)
    }

    async fn create(&self, candle: NewCandle) -> Result<Candle, DatabaseError> {
        let mut tx = self.pool.begin().await?;

        let created = sqlx::query_as::<_, Candle>(
            "INSERT INTO candles (id, name, description, sale_price, active)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING id, name, description, sale_price, active, created_at",
        )
        .bind(Uuid::new_v4())
        .bind(&candle.name)
        .bind(&candle.description)
        .bind(candle.sale_price)
        .bind(candle.active)
        .fetch_one(&mut *tx)
        .await?;

        for line in &candle.recipe {
            sqlx::query(
                "INSERT INTO candle_materials (candle_id, material_id, quantity)
                 VALUES ($1, $2, $3)",
            )
            .bind(created.id)
            .bind(line.material_id)
            .bind(line.quantity)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(created)
    }

    async fn count_active(&self) -> Result<i64, DatabaseError> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM candles WHERE active = true")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}

#[async_trait]
impl ScenarioRepository for PgStore {
    async fn find_all(&self) -> Result<Vec<ProjectionScenario>, DatabaseError> {
        let scenarios = sqlx::query_as::<_, ProjectionScenario>(
            "SELECT id, name, description, created_at
             FROM projection_scenarios
             ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(scenarios)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<ProjectionScenario>, DatabaseError> {
        let scenario = sqlx::query_as::<_, ProjectionScenario>(
            "SELECT id, name, description, created_at
             FROM projection_scenarios
             WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(scenario)
    }

    async fn find_items(&self, scenario_ids: &[Uuid]) -> Result<Vec<ScenarioItem>, DatabaseError> {
        if scenario_ids.is_empty() {
            return Ok(vec![]);
        }

        let items = sqlx::query_as::<_, ScenarioItem>(
            "SELECT scenario_id, candle_id, quantity, unit_price
             FROM scenario_items
             WHERE scenario_id = ANY($1)",
        )
        .bind(scenario_ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    async fn create(&self, scenario: NewScenario) -> Result<ProjectionScenario, DatabaseError> {
        let mut tx = self.pool.begin().await?;

        let created = sqlx::query_as::<_, ProjectionScenario>(
            "INSERT INTO projection_scenarios (id, name, description)
             VALUES ($1, $2, $3)
             RETURNING id, name, description, created_at",
        )
        .bind(Uuid::new_v4())
        .bind(&scenario.name)
        .bind(&scenario.description)
        .fetch_one(&mut *tx)
        .await?;

        for item in &scenario.items {
            sqlx::query(
                "INSERT INTO scenario_items (scenario_id, candle_id, quantity, unit_price)
                 VALUES ($1, $2, $3, $4)",
            )
            .bind(created.id)
            .bind(item.candle_id)
            .bind(item.quantity)
            .bind(item.unit_price)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(created)
    }

    async fn count(&self) -> Result<i64, DatabaseError> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM projection_scenarios")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}

#[async_trait]
impl UserRepository for PgStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DatabaseError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, email, name, password_hash, created_at
             FROM users
             WHERE lower(email) = lower($1)",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn create(&self, user: NewUser) -> Result<User, DatabaseError> {
        let user = sqlx::query_as::<_, User>(
            "INSERT INTO users (id, email, name, password_hash)
             VALUES ($1, $2, $3, $4)
             RETURNING id, email, name, password_hash, created_at",
        )
        .bind(Uuid::new_v4())
        .bind(&user.email)
        .bind(&user.name)
        .bind(&user.password_hash)
        .fetch_one(&self.pool)
        .await?;

        Ok(user)
    }
}

#[async_trait]
impl HealthCheck for PgStore {
    async fn ping(&self) -> Result<(), DatabaseError> {
        DatabaseManager::health_check(&self.pool).await
    }
}
