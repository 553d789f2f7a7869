use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::HashMap;
use thiserror::Error;
use uuid::Uuid;

use crate::database::models::{ProjectionScenario, RecipeCost, ScenarioItem};
use crate::database::{DatabaseError, Repositories};

#[derive(Debug, Error)]
pub enum ProjectionError {
    #[error(transparent)]
    Database(#[from] DatabaseError),

    #[error("Projection amounts overflow for scenario {0}")]
    Overflow(Uuid),
}

#[derive(Debug, Clone, Serialize)]
pub struct ProjectionLine {
    pub candle_id: Uuid,
    pub candle_name: String,
    pub quantity: i32,
    pub unit_price: Decimal,
    pub unit_cost: Decimal,
    pub revenue: Decimal,
    pub cost: Decimal,
    pub margin: Decimal,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScenarioProjection {
    pub scenario: ProjectionScenario,
    pub lines: Vec<ProjectionLine>,
    pub revenue: Decimal,
    pub cost: Decimal,
    pub margin: Decimal,
}

/// Material cost of producing one candle, per candle id.
///
/// `None` marks a candle whose recipe cost does not fit in a `Decimal`.
pub fn unit_costs(recipes: &[RecipeCost]) -> HashMap<Uuid, Option<Decimal>> {
    let mut costs: HashMap<Uuid, Option<Decimal>> = HashMap::new();
    for line in recipes {
        let entry = costs.entry(line.candle_id).or_insert(Some(Decimal::ZERO));
        *entry = entry.and_then(|total| {
            line.quantity
                .checked_mul(line.unit_cost)
                .and_then(|cost| total.checked_add(cost))
        });
    }
    costs
}

pub fn project(
    scenario: ProjectionScenario,
    items: &[ScenarioItem],
    candle_names: &HashMap<Uuid, String>,
    unit_costs: &HashMap<Uuid, Option<Decimal>>,
) -> Result<ScenarioProjection, ProjectionError> {
    let overflow = ProjectionError::Overflow(scenario.id);

    let mut lines = Vec::new();
    for item in items.iter().filter(|item| item.scenario_id == scenario.id) {
        let quantity = Decimal::from(item.quantity);
        let unit_cost = match unit_costs.get(&item.candle_id) {
            Some(Some(cost)) => *cost,
            Some(None) => return Err(overflow),
            None => Decimal::ZERO,
        };
        let (Some(revenue), Some(cost)) = (
            quantity.checked_mul(item.unit_price),
            quantity.checked_mul(unit_cost),
        ) else {
            return Err(overflow);
        };
        let Some(margin) = revenue.checked_sub(cost) else {
            return Err(overflow);
        };

        lines.push(ProjectionLine {
            candle_id: item.candle_id,
            candle_name: candle_names
                .get(&item.candle_id)
                .cloned()
                .unwrap_or_else(|| "Bougie supprimée".to_string()),
            quantity: item.quantity,
            unit_price: item.unit_price,
            unit_cost,
            revenue,
            cost,
            margin,
        });
    }
    lines.sort_by(|a, b| a.candle_name.cmp(&b.candle_name));

    let revenue = checked_total(lines.iter().map(|l| l.revenue));
    let cost = checked_total(lines.iter().map(|l| l.cost));
    let (Some(revenue), Some(cost)) = (revenue, cost) else {
        return Err(overflow);
    };
    let Some(margin) = revenue.checked_sub(cost) else {
        return Err(overflow);
    };

    Ok(ScenarioProjection {
        scenario,
        lines,
        revenue,
        cost,
        margin,
    })
}

fn checked_total(values: impl Iterator<Item = Decimal>) -> Option<Decimal> {
    values.fold(Some(Decimal::ZERO), |acc, value| acc?.checked_add(value))
}

/// Project every scenario, most recent first.
///
/// A scenario whose amounts overflow is left out of the list and logged.
pub async fn load_all(repos: &Repositories) -> Result<Vec<ScenarioProjection>, ProjectionError> {
    let scenarios = repos.scenarios.find_all().await?;
    let projections = project_many(repos, scenarios).await?;

    Ok(projections
        .into_iter()
        .filter_map(|projection| match projection {
            Ok(projection) => Some(projection),
            Err(e) => {
                tracing::warn!("Skipping scenario in listing: {}", e);
                None
            }
        })
        .collect())
}

pub async fn load_one(
    repos: &Repositories,
    id: Uuid,
) -> Result<Option<ScenarioProjection>, ProjectionError> {
    let Some(scenario) = repos.scenarios.find_by_id(id).await? else {
        return Ok(None);
    };
    project_many(repos, vec![scenario]).await?.pop().transpose()
}

async fn project_many(
    repos: &Repositories,
    scenarios: Vec<ProjectionScenario>,
) -> Result<Vec<Result<ScenarioProjection, ProjectionError>>, DatabaseError> {
    let scenario_ids: Vec<Uuid> = scenarios.iter().map(|s| s.id).collect();
    let items = repos.scenarios.find_items(&scenario_ids).await?;

    let mut candle_ids: Vec<Uuid> = items.iter().map(|i| i.candle_id).collect();
    candle_ids.sort();
    candle_ids.dedup();
    let costs = unit_costs(&repos.candles.find_recipe_costs(&candle_ids).await?);

    // Inactive candles still name the lines that reference them
    let candle_names: HashMap<Uuid, String> = repos
        .candles
        .find_all_ordered_by_name()
        .await?
        .into_iter()
        .map(|c| (c.id, c.name))
        .collect();

    Ok(scenarios
        .into_iter()
        .map(|scenario| project(scenario, &items, &candle_names, &costs))
        .collect())
}
