// handlers/protected/mod.rs - Back-office pages
//
// Every handler here is mounted behind `middleware::gate::require_session`,
// so a request reaching them already carries a valid session.

pub mod candles;
pub mod dashboard;
pub mod materials;
pub mod scenarios;

pub use dashboard::dashboard;

use crate::error::AppError;

/// Unknown path under the back-office prefix
pub async fn not_found() -> AppError {
    AppError::not_found("Page introuvable")
}
