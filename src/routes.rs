use axum::{middleware, routing::get, Router};
use tower_http::trace::TraceLayer;

use crate::handlers::{protected, public};
use crate::middleware::gate;
use crate::state::AppState;

pub const PROTECTED_PREFIX: &str = "/bo";
pub const LOGIN_PATH: &str = "/login";

/// Whether `path` belongs to the back-office router and therefore runs through the gate
pub fn is_protected(path: &str) -> bool {
    path == PROTECTED_PREFIX
        || path
            .strip_prefix(PROTECTED_PREFIX)
            .is_some_and(|rest| rest.starts_with('/'))
}

pub fn app(state: AppState) -> Router {
    let request_logging = state.config.server.enable_request_logging;

    let router = Router::new()
        .merge(public_routes())
        .merge(backoffice_routes(state.clone()))
        .fallback(public::not_found);

    let router = if request_logging {
        router.layer(TraceLayer::new_for_http())
    } else {
        router
    };

    router.with_state(state)
}

fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(public::root))
        .route("/health", get(public::health))
        .route(LOGIN_PATH, get(public::login_page))
        .route(
            "/api/auth/*action",
            get(public::auth::auth_get).post(public::auth::auth_post),
        )
}

fn backoffice_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/bo", get(protected::dashboard))
        .route("/bo/", get(protected::dashboard))
        .route("/bo/matieres", get(protected::materials::list))
        .route("/bo/bougies", get(protected::candles::list))
        .route(
            "/bo/bougies/nouveau",
            get(protected::candles::new_page).post(protected::candles::create),
        )
        .route("/bo/projections", get(protected::scenarios::list))
        .route(
            "/bo/projections/nouveau",
            get(protected::scenarios::new_page).post(protected::scenarios::create),
        )
        .route("/bo/projections/:id", get(protected::scenarios::detail))
        // Unknown back-office paths still go through the gate before the 404
        .route("/bo/*rest", get(protected::not_found).post(protected::not_found))
        .route_layer(middleware::from_fn_with_state(state, gate::require_session))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn protected_paths_match_prefix_segment() {
        assert!(is_protected("/bo"));
        assert!(is_protected("/bo/"));
        assert!(is_protected("/bo/bougies/nouveau"));
        assert!(is_protected("/bo/projections/nouveau"));
    }

    #[test]
    fn other_paths_are_public() {
        assert!(!is_protected("/"));
        assert!(!is_protected("/login"));
        assert!(!is_protected("/api/auth/session"));
        assert!(!is_protected("/health"));
        assert!(!is_protected("/bon-de-commande"));
    }
}
