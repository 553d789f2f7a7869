pub mod layout;
pub mod pages;

use std::collections::HashMap;

use crate::database::models::{Candle, Material};
use crate::forms::{FieldErrors, MATERIAL_FIELD, PRICE_FIELD, QUANTITY_FIELD};
use layout::{backoffice, document, escape, money};

/// Values and errors of a form being (re-)displayed
#[derive(Debug, Clone, Default)]
pub struct FormState {
    pub values: HashMap<String, String>,
    pub errors: FieldErrors,
}

impl FormState {
    pub fn submitted(values: HashMap<String, String>, errors: FieldErrors) -> Self {
        Self { values, errors }
    }

    pub fn value(&self, key: &str) -> &str {
        self.values.get(key).map(String::as_str).unwrap_or("")
    }

    pub fn error(&self, key: &str) -> Option<&str> {
        self.errors.get(key).map(String::as_str)
    }
}

/// Renders the editable forms of the back-office
pub trait FormComponents: Send + Sync {
    fn candle_form(&self, materials: &[Material], state: &FormState) -> String;

    fn scenario_form(&self, candles: &[Candle], state: &FormState) -> String;

    fn login_form(&self, error: Option<&str>) -> String;
}

/// Plain server-rendered HTML forms
pub struct HtmlForms;

impl FormComponents for HtmlForms {
    fn candle_form(&self, materials: &[Material], state: &FormState) -> String {
        let mut rows = String::new();
        for material in materials {
            let key = format!("{}{}", MATERIAL_FIELD, material.id);
            rows.push_str(&format!(
                "<tr><td>{}</td><td>{}</td><td><input name=\"{}\" value=\"{}\" inputmode=\"decimal\"> {}</td><td>{}</td></tr>\n",
                escape(&material.name),
                material.material_type.label(),
                key,
                escape(state.value(&key)),
                material.unit.symbol(),
                field_error(state, &key),
            ));
        }
        if materials.is_empty() {
            rows.push_str("<tr><td colspan=\"4\">Aucune matière enregistrée</td></tr>\n");
        }

        let checked = if state.values.is_empty() || state.values.contains_key("active") {
            " checked"
        } else {
            ""
        };

        let body = format!(
            concat!(
                "<form method=\"post\" action=\"/bo/bougies/nouveau\">\n",
                "{}",
                "<label>Nom <input name=\"name\" value=\"{}\" required></label>{}\n",
                "<label>Description <textarea name=\"description\">{}</textarea></label>\n",
                "<label>Prix de vente <input name=\"sale_price\" value=\"{}\" inputmode=\"decimal\"></label>{}\n",
                "<label><input type=\"checkbox\" name=\"active\"{}> Active</label>\n",
                "<table>\n<thead><tr><th>Matière</th><th>Type</th><th>Quantité</th><th></th></tr></thead>\n<tbody>\n{}</tbody>\n</table>\n",
                "<button type=\"submit\">Créer la bougie</button>\n",
                "</form>"
            ),
            error_summary(state),
            escape(state.value("name")),
            field_error(state, "name"),
            escape(state.value("description")),
            escape(state.value("sale_price")),
            field_error(state, "sale_price"),
            checked,
            rows,
        );

        backoffice("Nouvelle bougie", &body)
    }

    fn scenario_form(&self, candles: &[Candle], state: &FormState) -> String {
        let mut rows = String::new();
        for candle in candles {
            let quantity_key = format!("{}{}", QUANTITY_FIELD, candle.id);
            let price_key = format!("{}{}", PRICE_FIELD, candle.id);
            rows.push_str(&format!(
                "<tr><td>{}</td><td><input name=\"{}\" value=\"{}\" inputmode=\"numeric\">{}</td><td><input name=\"{}\" value=\"{}\" placeholder=\"{}\" inputmode=\"decimal\">{}</td></tr>\n",
                escape(&candle.name),
                quantity_key,
                escape(state.value(&quantity_key)),
                field_error(state, &quantity_key),
                price_key,
                escape(state.value(&price_key)),
                money(candle.sale_price),
                field_error(state, &price_key),
            ));
        }
        if candles.is_empty() {
            rows.push_str("<tr><td colspan=\"3\">Aucune bougie active</td></tr>\n");
        }

        let body = format!(
            concat!(
                "<form method=\"post\" action=\"/bo/projections/nouveau\">\n",
                "{}",
                "<label>Nom <input name=\"name\" value=\"{}\" required></label>{}\n",
                "<label>Description <textarea name=\"description\">{}</textarea></label>\n",
                "<table>\n<thead><tr><th>Bougie</th><th>Quantité</th><th>Prix unitaire</th></tr></thead>\n<tbody>\n{}</tbody>\n</table>\n",
                "{}",
                "<button type=\"submit\">Créer le scénario</button>\n",
                "</form>"
            ),
            error_summary(state),
            escape(state.value("name")),
            field_error(state, "name"),
            escape(state.value("description")),
            rows,
            field_error(state, "items"),
        );

        backoffice("Nouveau scénario", &body)
    }

    fn login_form(&self, error: Option<&str>) -> String {
        let banner = match error {
            Some(_) => "<p role=\"alert\">Identifiants invalides.</p>\n",
            None => "",
        };

        let body = format!(
            concat!(
                "<main>\n<h1>Connexion</h1>\n{}",
                "<form method=\"post\" action=\"/api/auth/callback/credentials\">\n",
                "<label>Email <input type=\"email\" name=\"email\" required></label>\n",
                "<label>Mot de passe <input type=\"password\" name=\"password\" required></label>\n",
                "<button type=\"submit\">Se connecter</button>\n",
                "</form>\n</main>"
            ),
            banner
        );

        document("Connexion", &body)
    }
}

fn field_error(state: &FormState, key: &str) -> String {
    match state.error(key) {
        Some(message) => format!("<small class=\"error\">{}</small>", escape(message)),
        None => String::new(),
    }
}

fn error_summary(state: &FormState) -> &'static str {
    if state.errors.is_empty() {
        ""
    } else {
        "<p role=\"alert\">Le formulaire contient des erreurs.</p>\n"
    }
}
