use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use super::response::found;
use crate::routes::{is_protected, LOGIN_PATH};
use crate::state::AppState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    Redirect,
    PassThrough,
}

/// Redirect when the path is protected and the request carries no valid session
pub fn decide(path: &str, authenticated: bool) -> GateDecision {
    if is_protected(path) && !authenticated {
        GateDecision::Redirect
    } else {
        GateDecision::PassThrough
    }
}

/// Authorization gate for the back-office router.
///
/// Mounted as a route layer on the protected routes only, so requests outside
/// `/bo` never reach it. An invalid or expired token counts as no session.
pub async fn require_session(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let authenticated = state.sessions.is_authenticated(request.headers());

    match decide(request.uri().path(), authenticated) {
        GateDecision::Redirect => {
            tracing::debug!(path = %request.uri().path(), "No session on protected path, redirecting to login");
            found(LOGIN_PATH)
        }
        GateDecision::PassThrough => next.run(request).await,
    }
}
