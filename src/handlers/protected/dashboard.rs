// handlers/protected/dashboard.rs - GET /bo

use axum::{extract::State, http::HeaderMap, response::Html};

use crate::error::AppError;
use crate::state::AppState;
use crate::views::pages::{self, DashboardCounts};

pub async fn dashboard(State(state): State<AppState>, headers: HeaderMap) -> Result<Html<String>, AppError> {
    let user_name = state
        .sessions
        .resolve(&headers)
        .ok()
        .flatten()
        .map(|session| session.name)
        .unwrap_or_default();

    let counts = DashboardCounts {
        materials: state.repos.materials.count().await?,
        active_candles: state.repos.candles.count_active().await?,
        scenarios: state.repos.scenarios.count().await?,
    };

    Ok(Html(pages::dashboard(&user_name, &counts)))
}
