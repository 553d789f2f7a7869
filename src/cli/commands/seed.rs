use std::collections::HashMap;
use std::path::PathBuf;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::cli::utils::{connect, output_success};
use crate::cli::OutputFormat;
use crate::database::models::{NewCandle, NewMaterial, RecipeLine};
use crate::database::Repositories;

/// YAML fixture accepted by `bougie seed`
///
/// ```yaml
/// materials:
///   - { name: Cire de soja, type: cire, unit: gramme, unit_cost: 0.012 }
/// candles:
///   - name: Lavande
///     sale_price: 24.90
///     recipe:
///       - { material: Cire de soja, quantity: 180 }
/// ```
#[derive(Debug, Default, Deserialize)]
pub struct Fixture {
    #[serde(default)]
    pub materials: Vec<NewMaterial>,
    #[serde(default)]
    pub candles: Vec<FixtureCandle>,
}

#[derive(Debug, Deserialize)]
pub struct FixtureCandle {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub sale_price: Decimal,
    #[serde(default = "default_active")]
    pub active: bool,
    #[serde(default)]
    pub recipe: Vec<FixtureRecipeLine>,
}

#[derive(Debug, Deserialize)]
pub struct FixtureRecipeLine {
    /// Material name, resolved against existing and fixture materials
    pub material: String,
    pub quantity: Decimal,
}

fn default_active() -> bool {
    true
}

#[derive(Debug, Default, Serialize, PartialEq)]
pub struct SeedReport {
    pub materials_created: usize,
    pub materials_skipped: usize,
    pub candles_created: usize,
    pub candles_skipped: usize,
}

pub async fn handle(file: PathBuf, output_format: OutputFormat) -> anyhow::Result<()> {
    let raw = std::fs::read_to_string(&file)
        .map_err(|e| anyhow::anyhow!("Cannot read {}: {}", file.display(), e))?;
    let fixture: Fixture = serde_yaml::from_str(&raw)?;

    let (_, repos) = connect().await?;
    let report = apply(&repos, fixture).await?;

    output_success(
        &output_format,
        &format!(
            "Seeded {} materials and {} candles ({} already present)",
            report.materials_created,
            report.candles_created,
            report.materials_skipped + report.candles_skipped
        ),
        &report,
    )
}

/// Insert fixture rows whose name is not taken yet.
///
/// Every recipe is checked before the first insert so a bad fixture writes nothing.
pub async fn apply(repos: &Repositories, fixture: Fixture) -> anyhow::Result<SeedReport> {
    let mut report = SeedReport::default();

    let mut material_ids: HashMap<String, Uuid> = repos
        .materials
        .find_all_ordered_by_name()
        .await?
        .into_iter()
        .map(|m| (m.name, m.id))
        .collect();

    for candle in &fixture.candles {
        for line in &candle.recipe {
            let known = material_ids.contains_key(&line.material)
                || fixture.materials.iter().any(|m| m.name == line.material);
            if !known {
                anyhow::bail!(
                    "Candle '{}' uses unknown material '{}'",
                    candle.name,
                    line.material
                );
            }
            if line.quantity <= Decimal::ZERO {
                anyhow::bail!(
                    "Candle '{}' has a non-positive quantity of '{}'",
                    candle.name,
                    line.material
                );
            }
        }
    }

    for material in fixture.materials {
        if material_ids.contains_key(&material.name) {
            report.materials_skipped += 1;
            continue;
        }
        let created = repos.materials.create(material).await?;
        tracing::info!(material_id = %created.id, name = %created.name, "Material seeded");
        material_ids.insert(created.name, created.id);
        report.materials_created += 1;
    }

    let existing_candles: Vec<String> = repos
        .candles
        .find_all_ordered_by_name()
        .await?
        .into_iter()
        .map(|c| c.name)
        .collect();

    for candle in fixture.candles {
        if existing_candles.contains(&candle.name) {
            report.candles_skipped += 1;
            continue;
        }

        let recipe = candle
            .recipe
            .iter()
            .filter_map(|line| {
                material_ids.get(&line.material).map(|id| RecipeLine {
                    material_id: *id,
                    quantity: line.quantity,
                })
            })
            .collect();

        let created = repos
            .candles
            .create(NewCandle {
                name: candle.name,
                description: candle.description,
                sale_price: candle.sale_price,
                active: candle.active,
                recipe,
            })
            .await?;
        tracing::info!(candle_id = %created.id, name = %created.name, "Candle seeded");
        report.candles_created += 1;
    }

    Ok(report)
}
