//! Parsing and validation of back-office form submissions.
//!
//! Submissions arrive as flat `application/x-www-form-urlencoded` maps. Per-row
//! inputs carry the referenced id in the field name (`material_<uuid>`,
//! `quantity_<uuid>`, `price_<uuid>`).

use rust_decimal::Decimal;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::str::FromStr;
use uuid::Uuid;

use crate::database::models::{
    Candle, Material, NewCandle, NewScenario, NewScenarioItem, RecipeLine,
};

/// Field name → message shown next to the input
pub type FieldErrors = BTreeMap<String, String>;

pub const MATERIAL_FIELD: &str = "material_";
pub const QUANTITY_FIELD: &str = "quantity_";
pub const PRICE_FIELD: &str = "price_";

/// Largest accepted price or recipe quantity: 9 999 999.99
pub fn max_amount() -> Decimal {
    Decimal::new(999_999_999, 2)
}
/// Largest number of candles one scenario line may plan
pub const MAX_SCENARIO_QUANTITY: i32 = 1_000_000;

pub fn parse_candle(
    input: &HashMap<String, String>,
    materials: &[Material],
) -> Result<NewCandle, FieldErrors> {
    let mut errors = FieldErrors::new();

    let name = required(input, "name", &mut errors);
    let description = field(input, "description").map(str::to_string);

    let sale_price = match field(input, "sale_price") {
        None => {
            errors.insert("sale_price".into(), "Le prix de vente est requis".into());
            Decimal::ZERO
        }
        Some(raw) => match parse_amount(raw) {
            Some(price) => price,
            None => {
                errors.insert("sale_price".into(), "Prix de vente invalide".into());
                Decimal::ZERO
            }
        },
    };

    let active = checkbox(input, "active");

    let mut recipe = Vec::new();
    for material in materials {
        let key = format!("{}{}", MATERIAL_FIELD, material.id);
        let Some(raw) = field(input, &key) else {
            continue;
        };
        match parse_amount(raw) {
            Some(quantity) if quantity > Decimal::ZERO => recipe.push(RecipeLine {
                material_id: material.id,
                quantity,
            }),
            _ => {
                errors.insert(key, format!("Quantité invalide pour {}", material.name));
            }
        }
    }

    let known: HashSet<Uuid> = materials.iter().map(|m| m.id).collect();
    reject_unknown(input, MATERIAL_FIELD, &known, "Matière inconnue", &mut errors);

    if errors.is_empty() {
        Ok(NewCandle {
            name,
            description,
            sale_price,
            active,
            recipe,
        })
    } else {
        Err(errors)
    }
}

pub fn parse_scenario(
    input: &HashMap<String, String>,
    candles: &[Candle],
) -> Result<NewScenario, FieldErrors> {
    let mut errors = FieldErrors::new();

    let name = required(input, "name", &mut errors);
    let description = field(input, "description").map(str::to_string);

    let mut items = Vec::new();
    for candle in candles {
        let quantity_key = format!("{}{}", QUANTITY_FIELD, candle.id);
        let quantity = match field(input, &quantity_key).map(|raw| raw.parse::<i32>()) {
            None | Some(Ok(0)) => continue,
            Some(Ok(quantity)) if quantity > 0 && quantity <= MAX_SCENARIO_QUANTITY => quantity,
            Some(_) => {
                errors.insert(quantity_key, format!("Quantité invalide pour {}", candle.name));
                continue;
            }
        };

        let price_key = format!("{}{}", PRICE_FIELD, candle.id);
        let unit_price = match field(input, &price_key) {
            None => candle.sale_price,
            Some(raw) => match parse_amount(raw) {
                Some(price) => price,
                None => {
                    errors.insert(price_key, format!("Prix invalide pour {}", candle.name));
                    continue;
                }
            },
        };

        items.push(NewScenarioItem {
            candle_id: candle.id,
            quantity,
            unit_price,
        });
    }

    let known: HashSet<Uuid> = candles.iter().map(|c| c.id).collect();
    reject_unknown(input, QUANTITY_FIELD, &known, "Bougie inconnue ou inactive", &mut errors);
    reject_unknown(input, PRICE_FIELD, &known, "Bougie inconnue ou inactive", &mut errors);

    if items.is_empty() && errors.is_empty() {
        errors.insert("items".into(), "Ajoutez au moins une bougie au scénario".into());
    }

    if errors.is_empty() {
        Ok(NewScenario {
            name,
            description,
            items,
        })
    } else {
        Err(errors)
    }
}

/// Accepts both `12.5` and `12,5`
pub fn parse_decimal(raw: &str) -> Option<Decimal> {
    Decimal::from_str(&raw.trim().replace(',', ".")).ok()
}

/// Non-negative decimal no larger than [`max_amount`]
fn parse_amount(raw: &str) -> Option<Decimal> {
    parse_decimal(raw).filter(|value| *value >= Decimal::ZERO && *value <= max_amount())
}

/// Trimmed, non-empty value of `key`
fn field<'a>(input: &'a HashMap<String, String>, key: &str) -> Option<&'a str> {
    input
        .get(key)
        .map(|value| value.trim())
        .filter(|value| !value.is_empty())
}

fn required(input: &HashMap<String, String>, key: &str, errors: &mut FieldErrors) -> String {
    match field(input, key) {
        Some(value) => value.to_string(),
        None => {
            errors.insert(key.to_string(), "Ce champ est requis".into());
            String::new()
        }
    }
}

fn checkbox(input: &HashMap<String, String>, key: &str) -> bool {
    matches!(input.get(key).map(|v| v.trim()), Some(v) if v != "false" && v != "0")
}

fn reject_unknown(
    input: &HashMap<String, String>,
    prefix: &str,
    known: &HashSet<Uuid>,
    message: &str,
    errors: &mut FieldErrors,
) {
    for (key, value) in input {
        let Some(raw_id) = key.strip_prefix(prefix) else {
            continue;
        };
        if value.trim().is_empty() {
            continue;
        }
        let is_known = Uuid::parse_str(raw_id).map_or(false, |id| known.contains(&id));
        if !is_known {
            errors.insert(key.clone(), message.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::models::{MaterialType, Unit};
    use chrono::Utc;

    fn dec(raw: &str) -> Decimal {
        Decimal::from_str(raw).unwrap()
    }

    fn material(name: &str) -> Material {
        Material {
            id: Uuid::new_v4(),
            name: name.to_string(),
            material_type: MaterialType::Cire,
            unit: Unit::Gramme,
            unit_cost: dec("0.01"),
            created_at: Utc::now(),
        }
    }

    fn candle(name: &str, price: &str) -> Candle {
        Candle {
            id: Uuid::new_v4(),
            name: name.to_string(),
            description: None,
            sale_price: dec(price),
            active: true,
            created_at: Utc::now(),
        }
    }

    fn form(pairs: Vec<(String, &str)>) -> HashMap<String, String> {
        pairs.into_iter().map(|(k, v)| (k, v.to_string())).collect()
    }

    #[test]
    fn parses_candle_with_recipe() {
        let cire = material("Cire");
        let meche = material("Mèche");
        let input = form(vec![
            ("name".to_string(), "  Lavande "),
            ("sale_price".to_string(), "24,50"),
            ("active".to_string(), "on"),
            (format!("material_{}", cire.id), "180"),
            (format!("material_{}", meche.id), ""),
        ]);

        let candle = parse_candle(&input, &[cire.clone(), meche]).unwrap();
        assert_eq!(candle.name, "Lavande");
        assert_eq!(candle.sale_price, dec("24.50"));
        assert!(candle.active);
        assert_eq!(candle.description, None);
        assert_eq!(
            candle.recipe,
            vec![RecipeLine {
                material_id: cire.id,
                quantity: dec("180")
            }]
        );
    }

    #[test]
    fn candle_without_checkbox_is_inactive() {
        let input = form(vec![("name".to_string(), "Rose"), ("sale_price".to_string(), "10")]);
        assert!(!parse_candle(&input, &[]).unwrap().active);
    }

    #[test]
    fn reports_every_candle_field_error() {
        let cire = material("Cire");
        let stranger = Uuid::new_v4();
        let input = form(vec![
            ("name".to_string(), "   "),
            ("sale_price".to_string(), "-3"),
            (format!("material_{}", cire.id), "0"),
            (format!("material_{}", stranger), "5"),
        ]);

        let errors = parse_candle(&input, &[cire.clone()]).unwrap_err();
        assert!(errors.contains_key("name"));
        assert!(errors.contains_key("sale_price"));
        assert!(errors.contains_key(&format!("material_{}", cire.id)));
        assert_eq!(errors[&format!("material_{}", stranger)], "Matière inconnue");
    }

    #[test]
    fn missing_price_is_required() {
        let input = form(vec![("name".to_string(), "Rose")]);
        let errors = parse_candle(&input, &[]).unwrap_err();
        assert_eq!(errors["sale_price"], "Le prix de vente est requis");
    }

    #[test]
    fn parses_scenario_with_default_and_overridden_prices() {
        let lavande = candle("Lavande", "24");
        let rose = candle("Rose", "18");
        let vanille = candle("Vanille", "20");
        let input = form(vec![
            ("name".to_string(), "Noël"),
            (format!("quantity_{}", lavande.id), "100"),
            (format!("quantity_{}", rose.id), "40"),
            (format!("price_{}", rose.id), "15,5"),
            (format!("quantity_{}", vanille.id), "0"),
        ]);

        let scenario = parse_scenario(&input, &[lavande.clone(), rose.clone(), vanille]).unwrap();
        assert_eq!(scenario.name, "Noël");
        assert_eq!(
            scenario.items,
            vec![
                NewScenarioItem {
                    candle_id: lavande.id,
                    quantity: 100,
                    unit_price: dec("24")
                },
                NewScenarioItem {
                    candle_id: rose.id,
                    quantity: 40,
                    unit_price: dec("15.5")
                },
            ]
        );
    }

    #[test]
    fn amounts_above_the_ceiling_are_rejected() {
        assert_eq!(max_amount(), dec("9999999.99"));

        let cire = material("Cire");
        let input = form(vec![
            ("name".to_string(), "Géante"),
            ("sale_price".to_string(), "10000000"),
            (format!("material_{}", cire.id), "79228162514264337593543950335"),
        ]);
        let errors = parse_candle(&input, &[cire.clone()]).unwrap_err();
        assert!(errors.contains_key("sale_price"));
        assert!(errors.contains_key(&format!("material_{}", cire.id)));

        let lavande = candle("Lavande", "24");
        let input = form(vec![
            ("name".to_string(), "Salon"),
            (format!("quantity_{}", lavande.id), "1000001"),
        ]);
        let errors = parse_scenario(&input, &[lavande.clone()]).unwrap_err();
        assert!(errors.contains_key(&format!("quantity_{}", lavande.id)));

        let input = form(vec![
            ("name".to_string(), "Salon"),
            (format!("quantity_{}", lavande.id), "1000"),
            (format!("price_{}", lavande.id), "79228162514264337593543950335"),
        ]);
        let errors = parse_scenario(&input, &[lavande.clone()]).unwrap_err();
        assert!(errors.contains_key(&format!("price_{}", lavande.id)));

        let input = form(vec![
            ("name".to_string(), "Salon"),
            (format!("quantity_{}", lavande.id), "1000000"),
            (format!("price_{}", lavande.id), "9999999,99"),
        ]);
        assert!(parse_scenario(&input, &[lavande]).is_ok());
    }

    #[test]
    fn scenario_needs_at_least_one_item() {
        let lavande = candle("Lavande", "24");
        let input = form(vec![("name".to_string(), "Vide")]);
        let errors = parse_scenario(&input, &[lavande]).unwrap_err();
        assert!(errors.contains_key("items"));
    }

    #[test]
    fn scenario_rejects_inactive_or_unknown_candles() {
        let lavande = candle("Lavande", "24");
        let inactive = Uuid::new_v4();
        let input = form(vec![
            ("name".to_string(), "Été"),
            (format!("quantity_{}", lavande.id), "-2"),
            (format!("quantity_{}", inactive), "5"),
            ("quantity_not-a-uuid".to_string(), "5"),
        ]);

        let errors = parse_scenario(&input, &[lavande.clone()]).unwrap_err();
        assert!(errors.contains_key(&format!("quantity_{}", lavande.id)));
        assert!(errors.contains_key(&format!("quantity_{}", inactive)));
        assert!(errors.contains_key("quantity_not-a-uuid"));
        assert!(!errors.contains_key("items"));
    }
}
