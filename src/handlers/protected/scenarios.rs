// handlers/protected/scenarios.rs - /bo/projections pages
//
//   GET  /bo/projections          scenarios with projected totals
//   GET  /bo/projections/nouveau  new scenario form
//   POST /bo/projections/nouveau  create scenario + items
//   GET  /bo/projections/:id      scenario detail

use std::collections::HashMap;

use axum::{
    extract::{rejection::FormRejection, Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Form,
};
use uuid::Uuid;

use crate::database::models::Candle;
use crate::database::{DatabaseError, Repositories};
use crate::error::AppError;
use crate::forms;
use crate::middleware::found;
use crate::services::projection;
use crate::state::AppState;
use crate::views::{pages, FormState};

/// Reference data of the new scenario form: active candles only, sorted by name
pub async fn load_new_scenario(repos: &Repositories) -> Result<Vec<Candle>, DatabaseError> {
    repos.candles.find_active_ordered_by_name().await
}

pub async fn list(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let projections = projection::load_all(&state.repos).await?;
    Ok(Html(pages::scenarios_list(&projections)))
}

pub async fn new_page(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let candles = load_new_scenario(&state.repos).await?;
    Ok(Html(state.forms.scenario_form(&candles, &FormState::default())))
}

pub async fn create(
    State(state): State<AppState>,
    form: Result<Form<HashMap<String, String>>, FormRejection>,
) -> Result<Response, AppError> {
    let values = form.map(|Form(values)| values).unwrap_or_default();
    let candles = load_new_scenario(&state.repos).await?;

    match forms::parse_scenario(&values, &candles) {
        Ok(scenario) => {
            let created = state.repos.scenarios.create(scenario).await?;
            tracing::info!(scenario_id = %created.id, name = %created.name, "Scenario created");
            Ok(found(&format!("/bo/projections/{}", created.id)))
        }
        Err(errors) => {
            let submitted = FormState::submitted(values, errors);
            Ok((
                StatusCode::UNPROCESSABLE_ENTITY,
                Html(state.forms.scenario_form(&candles, &submitted)),
            )
                .into_response())
        }
    }
}

pub async fn detail(State(state): State<AppState>, Path(id): Path<String>) -> Result<Html<String>, AppError> {
    // Malformed ids cannot name a scenario; answer like an unknown one
    let Ok(id) = Uuid::parse_str(&id) else {
        return Err(AppError::not_found("Scénario introuvable"));
    };

    match projection::load_one(&state.repos, id).await? {
        Some(projection) => Ok(Html(pages::scenario_detail(&projection))),
        None => Err(AppError::not_found("Scénario introuvable")),
    }
}
