pub mod cookie;
pub mod password;

use axum::http::HeaderMap;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::config::SecurityConfig;
use crate::database::models::User;

pub const SESSION_COOKIE: &str = "bo_session";

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Session secret not configured")]
    InvalidSecret,

    #[error("Session token generation failed: {0}")]
    TokenGeneration(String),

    #[error("Invalid session token: {0}")]
    InvalidToken(String),

    #[error("Password hashing failed: {0}")]
    PasswordHash(String),
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub email: String,
    pub name: String,
    pub exp: i64,
    pub iat: i64,
}

/// Authenticated identity attached to a request
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Session {
    pub user_id: Uuid,
    pub email: String,
    pub name: String,
    pub expires_at: i64,
}

impl From<Claims> for Session {
    fn from(claims: Claims) -> Self {
        Self {
            user_id: claims.sub,
            email: claims.email,
            name: claims.name,
            expires_at: claims.exp,
        }
    }
}

/// Issues and validates back-office sessions
pub trait SessionProvider: Send + Sync {
    /// Resolve the session carried by the request, if any.
    ///
    /// `Ok(None)` means no credential was presented at all.
    fn resolve(&self, headers: &HeaderMap) -> Result<Option<Session>, AuthError>;

    /// Sign a new session token for `user`
    fn issue(&self, user: &User) -> Result<String, AuthError>;

    /// `Set-Cookie` value carrying a freshly issued token
    fn session_cookie(&self, token: &str) -> String;

    /// `Set-Cookie` value expiring the session cookie
    fn clear_cookie(&self) -> String;

    fn is_authenticated(&self, headers: &HeaderMap) -> bool {
        matches!(self.resolve(headers), Ok(Some(_)))
    }
}

/// Signed JWT stored in the `bo_session` cookie
pub struct JwtSessionProvider {
    secret: String,
    expiry_hours: u64,
    secure_cookies: bool,
}

impl JwtSessionProvider {
    pub fn new(config: &SecurityConfig) -> Self {
        Self {
            secret: config.auth_secret.clone(),
            expiry_hours: config.session_expiry_hours,
            secure_cookies: config.secure_cookies,
        }
    }

    fn sign(&self, claims: &Claims) -> Result<String, AuthError> {
        if self.secret.is_empty() {
            return Err(AuthError::InvalidSecret);
        }

        let encoding_key = EncodingKey::from_secret(self.secret.as_bytes());
        encode(&Header::default(), claims, &encoding_key)
            .map_err(|e| AuthError::TokenGeneration(e.to_string()))
    }

    fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        if self.secret.is_empty() {
            return Err(AuthError::InvalidSecret);
        }

        let decoding_key = DecodingKey::from_secret(self.secret.as_bytes());
        let token_data = decode::<Claims>(token, &decoding_key, &Validation::default())
            .map_err(|e| AuthError::InvalidToken(e.to_string()))?;

        Ok(token_data.claims)
    }
}

impl SessionProvider for JwtSessionProvider {
    fn resolve(&self, headers: &HeaderMap) -> Result<Option<Session>, AuthError> {
        match cookie::read(headers, SESSION_COOKIE) {
            Some(token) => self.verify(token).map(|claims| Some(claims.into())),
            None => Ok(None),
        }
    }

    fn issue(&self, user: &User) -> Result<String, AuthError> {
        let now = Utc::now();
        let expires_at = i64::try_from(self.expiry_hours)
            .ok()
            .and_then(Duration::try_hours)
            .and_then(|lifetime| now.checked_add_signed(lifetime))
            .ok_or_else(|| {
                AuthError::TokenGeneration(format!(
                    "session lifetime of {}h is out of range",
                    self.expiry_hours
                ))
            })?;
        let claims = Claims {
            sub: user.id,
            email: user.email.clone(),
            name: user.name.clone(),
            exp: expires_at.timestamp(),
            iat: now.timestamp(),
        };
        self.sign(&claims)
    }

    fn session_cookie(&self, token: &str) -> String {
        cookie::build(
            SESSION_COOKIE,
            token,
            self.expiry_hours.checked_mul(3600),
            self.secure_cookies,
        )
    }

    fn clear_cookie(&self) -> String {
        cookie::build(SESSION_COOKIE, "", Some(0), self.secure_cookies)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{header, HeaderValue};

    fn provider(secret: &str) -> JwtSessionProvider {
        JwtSessionProvider {
            secret: secret.to_string(),
            expiry_hours: 1,
            secure_cookies: false,
        }
    }

    fn user() -> User {
        User {
            id: Uuid::new_v4(),
            email: "atelier@example.com".to_string(),
            name: "Atelier".to_string(),
            password_hash: String::new(),
            created_at: Utc::now(),
        }
    }

    fn headers_with(token: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        let value = format!("theme=dark; {}={}", SESSION_COOKIE, token);
        headers.insert(header::COOKIE, HeaderValue::from_str(&value).unwrap());
        headers
    }

    #[test]
    fn issued_token_resolves_to_same_user() {
        let provider = provider("secret");
        let user = user();
        let token = provider.issue(&user).unwrap();

        let session = provider.resolve(&headers_with(&token)).unwrap().unwrap();
        assert_eq!(session.user_id, user.id);
        assert_eq!(session.email, "atelier@example.com");
        assert!(provider.is_authenticated(&headers_with(&token)));
    }

    #[test]
    fn missing_cookie_is_no_session() {
        let provider = provider("secret");
        assert!(provider.resolve(&HeaderMap::new()).unwrap().is_none());
        assert!(!provider.is_authenticated(&HeaderMap::new()));
    }

    #[test]
    fn token_signed_with_other_secret_is_rejected() {
        let token = provider("other").issue(&user()).unwrap();
        let provider = provider("secret");

        assert!(matches!(
            provider.resolve(&headers_with(&token)),
            Err(AuthError::InvalidToken(_))
        ));
        assert!(!provider.is_authenticated(&headers_with(&token)));
    }

    #[test]
    fn expired_token_is_rejected() {
        let provider = provider("secret");
        let past = Utc::now() - Duration::hours(2);
        let claims = Claims {
            sub: Uuid::new_v4(),
            email: "atelier@example.com".to_string(),
            name: "Atelier".to_string(),
            exp: past.timestamp(),
            iat: (past - Duration::hours(1)).timestamp(),
        };
        let token = provider.sign(&claims).unwrap();

        assert!(!provider.is_authenticated(&headers_with(&token)));
    }

    #[test]
    fn empty_secret_refuses_to_sign() {
        assert!(matches!(provider("").issue(&user()), Err(AuthError::InvalidSecret)));
    }

    #[test]
    fn out_of_range_lifetime_fails_instead_of_panicking() {
        for expiry_hours in [u64::MAX, 6_000_000_000_000_000] {
            let provider = JwtSessionProvider {
                secret: "secret".to_string(),
                expiry_hours,
                secure_cookies: false,
            };
            assert!(matches!(provider.issue(&user()), Err(AuthError::TokenGeneration(_))));
            assert!(!provider.session_cookie("abc").contains("Max-Age"));
        }
    }

    #[test]
    fn session_cookie_carries_expiry() {
        let cookie = provider("secret").session_cookie("abc");
        assert!(cookie.starts_with("bo_session=abc;"));
        assert!(cookie.contains("Max-Age=3600"));
    }
}
