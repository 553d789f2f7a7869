// handlers/public/auth.rs - GET|POST /api/auth/*action
//
// Catch-all endpoint of the credentials authentication provider.
//
//   GET  /api/auth/session               current session as JSON, or null
//   GET  /api/auth/providers             available sign-in providers
//   GET  /api/auth/signin                redirect to the login page
//   POST /api/auth/callback/credentials  email + password, sets the session cookie
//   POST /api/auth/signout               clears the session cookie

use std::collections::HashMap;

use axum::{
    extract::{rejection::FormRejection, Path, State},
    http::HeaderMap,
    response::{IntoResponse, Response},
    Form,
};
use serde_json::json;

use crate::auth::password;
use crate::error::AppError;
use crate::middleware::{found, found_with_cookie, ApiResponse};
use crate::routes::{LOGIN_PATH, PROTECTED_PREFIX};
use crate::state::AppState;

const SIGNIN_FAILED: &str = "/login?error=CredentialsSignin";

pub async fn auth_get(
    State(state): State<AppState>,
    Path(action): Path<String>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    match action.trim_start_matches('/') {
        "session" => {
            // A bad token is reported as "no session", never as a failure
            let session = state.sessions.resolve(&headers).ok().flatten();
            Ok(ApiResponse::success(session).into_response())
        }
        "providers" => Ok(ApiResponse::success(json!({
            "credentials": {
                "id": "credentials",
                "name": "Credentials",
                "type": "credentials",
                "signinUrl": LOGIN_PATH,
                "callbackUrl": "/api/auth/callback/credentials"
            }
        }))
        .into_response()),
        "signin" => Ok(found(LOGIN_PATH)),
        other => Err(AppError::not_found(format!("Unknown auth action '{}'", other))),
    }
}

pub async fn auth_post(
    State(state): State<AppState>,
    Path(action): Path<String>,
    form: Result<Form<HashMap<String, String>>, FormRejection>,
) -> Result<Response, AppError> {
    let fields = form.map(|Form(fields)| fields).unwrap_or_default();

    match action.trim_start_matches('/') {
        "callback/credentials" => sign_in(&state, &fields).await,
        "signout" => Ok(found_with_cookie(LOGIN_PATH, &state.sessions.clear_cookie())),
        other => Err(AppError::not_found(format!("Unknown auth action '{}'", other))),
    }
}

async fn sign_in(state: &AppState, fields: &HashMap<String, String>) -> Result<Response, AppError> {
    let email = fields.get("email").map(|s| s.trim()).unwrap_or("");
    let plain = fields.get("password").map(String::as_str).unwrap_or("");
    if email.is_empty() || plain.is_empty() {
        return Ok(found(SIGNIN_FAILED));
    }

    let Some(user) = state.repos.users.find_by_email(email).await? else {
        tracing::info!(email, "Sign-in rejected: unknown email");
        return Ok(found(SIGNIN_FAILED));
    };

    match password::verify_password(plain, &user.password_hash) {
        Ok(true) => {}
        Ok(false) => {
            tracing::info!(email, "Sign-in rejected: wrong password");
            return Ok(found(SIGNIN_FAILED));
        }
        Err(e) => {
            tracing::error!(user_id = %user.id, "Stored password hash unusable: {}", e);
            return Ok(found(SIGNIN_FAILED));
        }
    }

    let token = state.sessions.issue(&user)?;
    tracing::info!(user_id = %user.id, "User signed in");

    Ok(found_with_cookie(
        PROTECTED_PREFIX,
        &state.sessions.session_cookie(&token),
    ))
}
