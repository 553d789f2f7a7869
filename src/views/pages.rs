use axum::http::StatusCode;

use super::layout::{backoffice, document, escape, money};
use crate::database::models::{Candle, Material};
use crate::services::ScenarioProjection;

pub struct DashboardCounts {
    pub materials: i64,
    pub active_candles: i64,
    pub scenarios: i64,
}

pub fn dashboard(user_name: &str, counts: &DashboardCounts) -> String {
    let body = format!(
        concat!(
            "<p>Bonjour {}.</p>\n",
            "<ul>\n",
            "<li><a href=\"/bo/matieres\">{} matières</a></li>\n",
            "<li><a href=\"/bo/bougies\">{} bougies actives</a></li>\n",
            "<li><a href=\"/bo/projections\">{} scénarios de projection</a></li>\n",
            "</ul>"
        ),
        escape(user_name),
        counts.materials,
        counts.active_candles,
        counts.scenarios
    );
    backoffice("Tableau de bord", &body)
}

pub fn materials_list(materials: &[Material]) -> String {
    let rows: String = materials
        .iter()
        .map(|m| {
            format!(
                "<tr><td>{}</td><td>{}</td><td>{}</td><td>{} / {}</td></tr>\n",
                escape(&m.name),
                m.material_type.label(),
                m.unit.symbol(),
                money(m.unit_cost),
                m.unit.symbol()
            )
        })
        .collect();

    let body = format!(
        "<table>\n<thead><tr><th>Nom</th><th>Type</th><th>Unité</th><th>Coût</th></tr></thead>\n<tbody>\n{}</tbody>\n</table>",
        rows
    );
    backoffice("Matières", &body)
}

pub fn candles_list(candles: &[Candle]) -> String {
    let rows: String = candles
        .iter()
        .map(|c| {
            format!(
                "<tr><td>{}</td><td>{}</td><td>{}</td></tr>\n",
                escape(&c.name),
                money(c.sale_price),
                if c.active { "Active" } else { "Inactive" }
            )
        })
        .collect();

    let body = format!(
        "<p><a href=\"/bo/bougies/nouveau\">Nouvelle bougie</a></p>\n<table>\n<thead><tr><th>Nom</th><th>Prix de vente</th><th>Statut</th></tr></thead>\n<tbody>\n{}</tbody>\n</table>",
        rows
    );
    backoffice("Bougies", &body)
}

pub fn scenarios_list(projections: &[ScenarioProjection]) -> String {
    let rows: String = projections
        .iter()
        .map(|p| {
            format!(
                "<tr><td><a href=\"/bo/projections/{}\">{}</a></td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
                p.scenario.id,
                escape(&p.scenario.name),
                money(p.revenue),
                money(p.cost),
                money(p.margin)
            )
        })
        .collect();

    let body = format!(
        "<p><a href=\"/bo/projections/nouveau\">Nouveau scénario</a></p>\n<table>\n<thead><tr><th>Scénario</th><th>Chiffre d'affaires</th><th>Coût matières</th><th>Marge</th></tr></thead>\n<tbody>\n{}</tbody>\n</table>",
        rows
    );
    backoffice("Projections", &body)
}

pub fn scenario_detail(projection: &ScenarioProjection) -> String {
    let rows: String = projection
        .lines
        .iter()
        .map(|l| {
            format!(
                "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
                escape(&l.candle_name),
                l.quantity,
                money(l.unit_price),
                money(l.revenue),
                money(l.cost),
                money(l.margin)
            )
        })
        .collect();

    let description = projection
        .scenario
        .description
        .as_deref()
        .map(|d| format!("<p>{}</p>\n", escape(d)))
        .unwrap_or_default();

    let body = format!(
        concat!(
            "{}",
            "<table>\n<thead><tr><th>Bougie</th><th>Quantité</th><th>Prix unitaire</th><th>Chiffre d'affaires</th><th>Coût matières</th><th>Marge</th></tr></thead>\n",
            "<tbody>\n{}</tbody>\n",
            "<tfoot><tr><th colspan=\"3\">Total</th><th>{}</th><th>{}</th><th>{}</th></tr></tfoot>\n",
            "</table>"
        ),
        description,
        rows,
        money(projection.revenue),
        money(projection.cost),
        money(projection.margin)
    );
    backoffice(&projection.scenario.name, &body)
}

/// Generic failure page, never carries internal details
pub fn error_page(status: StatusCode, code: &str, message: &str) -> String {
    let body = format!(
        "<main data-error-code=\"{}\">\n<h1>{}</h1>\n<p>{}</p>\n<p><a href=\"/bo\">Retour</a></p>\n</main>",
        code,
        status.as_u16(),
        escape(message)
    );
    document("Erreur", &body)
}
