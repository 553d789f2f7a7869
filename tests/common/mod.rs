#![allow(dead_code)]

use std::str::FromStr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use anyhow::Result;
use axum::{
    body::Body,
    http::{header, HeaderMap, Request, StatusCode},
    response::Response,
    Router,
};
use rust_decimal::Decimal;
use tower::ServiceExt;

use bougie_admin::auth::{AuthError, JwtSessionProvider, Session, SessionProvider};
use bougie_admin::config::{AppConfig, Environment};
use bougie_admin::database::models::{
    Candle, Material, MaterialType, NewCandle, NewMaterial, RecipeLine, Unit, User,
};
use bougie_admin::database::{CandleRepository, MaterialRepository, Repositories, UserRepository};
use bougie_admin::testing::MemoryStore;
use bougie_admin::views::{FormComponents, FormState, HtmlForms};
use bougie_admin::{app, AppState};

pub const EMAIL: &str = "atelier@example.com";
pub const PASSWORD: &str = "cire-et-meche";

/// Session provider that counts how often the gate consulted it
pub struct CountingSessions {
    inner: JwtSessionProvider,
    gate_calls: AtomicUsize,
}

impl CountingSessions {
    pub fn calls(&self) -> usize {
        self.gate_calls.load(Ordering::SeqCst)
    }
}

impl SessionProvider for CountingSessions {
    fn resolve(&self, headers: &HeaderMap) -> Result<Option<Session>, AuthError> {
        self.inner.resolve(headers)
    }

    fn issue(&self, user: &User) -> Result<String, AuthError> {
        self.inner.issue(user)
    }

    fn session_cookie(&self, token: &str) -> String {
        self.inner.session_cookie(token)
    }

    fn clear_cookie(&self) -> String {
        self.inner.clear_cookie()
    }

    fn is_authenticated(&self, headers: &HeaderMap) -> bool {
        self.gate_calls.fetch_add(1, Ordering::SeqCst);
        self.inner.is_authenticated(headers)
    }
}

/// Form renderer that remembers what reference data each render received
#[derive(Default)]
pub struct RecordingForms {
    renders: Mutex<Vec<Vec<String>>>,
}

impl RecordingForms {
    pub fn renders(&self) -> Vec<Vec<String>> {
        self.renders.lock().unwrap().clone()
    }

    fn record(&self, names: Vec<String>) {
        self.renders.lock().unwrap().push(names);
    }
}

impl FormComponents for RecordingForms {
    fn candle_form(&self, materials: &[Material], state: &FormState) -> String {
        self.record(materials.iter().map(|m| m.name.clone()).collect());
        HtmlForms.candle_form(materials, state)
    }

    fn scenario_form(&self, candles: &[Candle], state: &FormState) -> String {
        self.record(candles.iter().map(|c| c.name.clone()).collect());
        HtmlForms.scenario_form(candles, state)
    }

    fn login_form(&self, error: Option<&str>) -> String {
        HtmlForms.login_form(error)
    }
}

pub struct TestApp {
    pub router: Router,
    pub store: Arc<MemoryStore>,
    pub sessions: Arc<CountingSessions>,
    pub forms: Arc<RecordingForms>,
    pub config: AppConfig,
}

pub fn test_config() -> AppConfig {
    let mut config = AppConfig::preset(Environment::Development);
    config.database.url = "postgres://localhost/bougies_test".to_string();
    config.security.auth_secret = "test-secret".to_string();
    config
}

impl TestApp {
    pub async fn new() -> Self {
        let config = test_config();
        let store = Arc::new(
            MemoryStore::new()
                .with_user(EMAIL, "Atelier", PASSWORD)
                .await
                .expect("seed user"),
        );
        let sessions = Arc::new(CountingSessions {
            inner: JwtSessionProvider::new(&config.security),
            gate_calls: AtomicUsize::new(0),
        });
        let forms = Arc::new(RecordingForms::default());

        let state = AppState::new(config.clone(), Repositories::shared(store.clone()))
            .with_sessions(sessions.clone())
            .with_forms(forms.clone());

        Self {
            router: app(state),
            store,
            sessions,
            forms,
            config,
        }
    }

    /// Cookie header value for the seeded user
    pub async fn session_cookie(&self) -> Result<String> {
        let user = self
            .store
            .find_by_email(EMAIL)
            .await?
            .ok_or_else(|| anyhow::anyhow!("seeded user missing"))?;
        let token = self.sessions.issue(&user)?;
        Ok(format!("bo_session={}", token))
    }

    pub async fn send(&self, request: Request<Body>) -> Result<Response> {
        Ok(self.router.clone().oneshot(request).await?)
    }

    pub async fn get(&self, path: &str, cookie: Option<&str>) -> Result<Response> {
        let mut builder = Request::builder().method("GET").uri(path);
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        self.send(builder.body(Body::empty())?).await
    }

    pub async fn post_form(&self, path: &str, body: &str, cookie: Option<&str>) -> Result<Response> {
        let mut builder = Request::builder()
            .method("POST")
            .uri(path)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        self.send(builder.body(Body::from(body.to_string()))?).await
    }

    pub async fn material(&self, name: &str, unit_cost: &str) -> Result<Material> {
        Ok(MaterialRepository::create(
            self.store.as_ref(),
            NewMaterial {
                name: name.to_string(),
                material_type: MaterialType::Cire,
                unit: Unit::Gramme,
                unit_cost: dec(unit_cost),
            },
        )
        .await?)
    }

    pub async fn candle(
        &self,
        name: &str,
        sale_price: &str,
        active: bool,
        recipe: &[(&Material, &str)],
    ) -> Result<Candle> {
        Ok(CandleRepository::create(
            self.store.as_ref(),
            NewCandle {
                name: name.to_string(),
                description: None,
                sale_price: dec(sale_price),
                active,
                recipe: recipe
                    .iter()
                    .map(|(material, quantity)| RecipeLine {
                        material_id: material.id,
                        quantity: dec(quantity),
                    })
                    .collect(),
            },
        )
        .await?)
    }
}

pub fn dec(raw: &str) -> Decimal {
    Decimal::from_str(raw).unwrap()
}

pub fn location(response: &Response) -> Option<&str> {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
}

pub fn set_cookie(response: &Response) -> Option<String> {
    response
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

pub async fn body_text(response: Response) -> Result<String> {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
    Ok(String::from_utf8(bytes.to_vec())?)
}

pub async fn body_json(response: Response) -> Result<serde_json::Value> {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
    Ok(serde_json::from_slice(&bytes)?)
}

pub fn assert_redirect(response: &Response, to: &str) {
    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(location(response), Some(to));
}
