// handlers/protected/candles.rs - /bo/bougies pages
//
//   GET  /bo/bougies          every candle, by name
//   GET  /bo/bougies/nouveau  new candle form
//   POST /bo/bougies/nouveau  create candle + recipe

use std::collections::HashMap;

use axum::{
    extract::{rejection::FormRejection, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Form,
};

use crate::database::models::Material;
use crate::database::{DatabaseError, Repositories};
use crate::error::AppError;
use crate::forms;
use crate::middleware::found;
use crate::state::AppState;
use crate::views::{pages, FormState};

/// Reference data of the new candle form: every material, sorted by name.
///
/// Completes before anything is rendered; a failed fetch is returned as is.
pub async fn load_new_candle(repos: &Repositories) -> Result<Vec<Material>, DatabaseError> {
    repos.materials.find_all_ordered_by_name().await
}

pub async fn list(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let candles = state.repos.candles.find_all_ordered_by_name().await?;
    Ok(Html(pages::candles_list(&candles)))
}

pub async fn new_page(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let materials = load_new_candle(&state.repos).await?;
    Ok(Html(state.forms.candle_form(&materials, &FormState::default())))
}

pub async fn create(
    State(state): State<AppState>,
    form: Result<Form<HashMap<String, String>>, FormRejection>,
) -> Result<Response, AppError> {
    let values = form.map(|Form(values)| values).unwrap_or_default();
    let materials = load_new_candle(&state.repos).await?;

    match forms::parse_candle(&values, &materials) {
        Ok(candle) => {
            let created = state.repos.candles.create(candle).await?;
            tracing::info!(candle_id = %created.id, name = %created.name, "Candle created");
            Ok(found("/bo/bougies"))
        }
        Err(errors) => {
            tracing::debug!(fields = ?errors.keys().collect::<Vec<_>>(), "Candle form rejected");
            let submitted = FormState::submitted(values, errors);
            Ok((
                StatusCode::UNPROCESSABLE_ENTITY,
                Html(state.forms.candle_form(&materials, &submitted)),
            )
                .into_response())
        }
    }
}
