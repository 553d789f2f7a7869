// HTTP-facing error type
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

use crate::auth::AuthError;
use crate::database::DatabaseError;
use crate::services::projection::ProjectionError;
use crate::views;

/// Request fault rendered as the generic failure page
#[derive(Debug)]
pub enum AppError {
    // 404 Not Found
    NotFound(String),

    // 500 Internal Server Error
    InternalServerError(String),

    // 503 Service Unavailable
    ServiceUnavailable(String),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    /// Client-safe message
    pub fn message(&self) -> &str {
        match self {
            AppError::NotFound(msg) => msg,
            AppError::InternalServerError(msg) => msg,
            AppError::ServiceUnavailable(msg) => msg,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::InternalServerError(_) => "INTERNAL_SERVER_ERROR",
            AppError::ServiceUnavailable(_) => "SERVICE_UNAVAILABLE",
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        AppError::NotFound(message.into())
    }

    pub fn internal_server_error(message: impl Into<String>) -> Self {
        AppError::InternalServerError(message.into())
    }

    pub fn service_unavailable(message: impl Into<String>) -> Self {
        AppError::ServiceUnavailable(message.into())
    }
}

impl From<DatabaseError> for AppError {
    fn from(err: DatabaseError) -> Self {
        match err {
            DatabaseError::NotFound(msg) => AppError::not_found(msg),
            DatabaseError::ConnectionError(msg) => {
                tracing::error!("Database connection error: {}", msg);
                AppError::service_unavailable("Database temporarily unavailable")
            }
            DatabaseError::QueryError(msg) => {
                // Don't expose internal SQL errors to clients
                tracing::error!("Database query error: {}", msg);
                AppError::internal_server_error("An error occurred while processing your request")
            }
            DatabaseError::InvalidDatabaseUrl => {
                tracing::error!("Database misconfigured: invalid DATABASE_URL");
                AppError::internal_server_error("An error occurred while processing your request")
            }
        }
    }
}

impl From<ProjectionError> for AppError {
    fn from(err: ProjectionError) -> Self {
        match err {
            ProjectionError::Database(err) => err.into(),
            ProjectionError::Overflow(id) => {
                tracing::error!(scenario_id = %id, "Scenario projection overflowed");
                AppError::internal_server_error("An error occurred while processing your request")
            }
        }
    }
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        tracing::error!("Authentication provider error: {}", err);
        AppError::internal_server_error("An error occurred while processing your request")
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for AppError {}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        (status, Html(views::pages::error_page(status, self.error_code(), self.message()))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_database_errors_to_statuses() {
        let not_found: AppError = DatabaseError::NotFound("scenario".into()).into();
        assert_eq!(not_found.status_code(), StatusCode::NOT_FOUND);

        let down: AppError = DatabaseError::ConnectionError("refused".into()).into();
        assert_eq!(down.status_code(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(down.error_code(), "SERVICE_UNAVAILABLE");

        let query: AppError = DatabaseError::QueryError("syntax error at or near".into()).into();
        assert_eq!(query.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!query.message().contains("syntax"));
    }

    #[test]
    fn projection_errors_keep_database_statuses() {
        let down: AppError = ProjectionError::Database(DatabaseError::ConnectionError("refused".into())).into();
        assert_eq!(down.status_code(), StatusCode::SERVICE_UNAVAILABLE);

        let overflow: AppError = ProjectionError::Overflow(uuid::Uuid::new_v4()).into();
        assert_eq!(overflow.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn auth_errors_are_internal() {
        let err: AppError = AuthError::InvalidSecret.into();
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
