// handlers/public/mod.rs - Handlers outside the back-office gate

pub mod auth;
pub mod health;
pub mod login;

pub use health::health;
pub use login::login_page;

use axum::response::Response;

use crate::error::AppError;
use crate::middleware::found;
use crate::routes::PROTECTED_PREFIX;

/// GET / - the application lives under the back-office prefix
pub async fn root() -> Response {
    found(PROTECTED_PREFIX)
}

/// Anything no router claimed
pub async fn not_found() -> AppError {
    AppError::not_found("Page introuvable")
}
