// handlers/public/login.rs - GET /login

use axum::{
    extract::{Query, State},
    response::Html,
};
use serde::Deserialize;

use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct LoginQuery {
    pub error: Option<String>,
}

pub async fn login_page(State(state): State<AppState>, Query(query): Query<LoginQuery>) -> Html<String> {
    Html(state.forms.login_form(query.error.as_deref()))
}
