// handlers/protected/materials.rs - GET /bo/matieres

use axum::{extract::State, response::Html};

use crate::error::AppError;
use crate::state::AppState;
use crate::views::pages;

pub async fn list(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let materials = state.repos.materials.find_all_ordered_by_name().await?;
    Ok(Html(pages::materials_list(&materials)))
}
