use std::sync::Arc;

use crate::auth::{JwtSessionProvider, SessionProvider};
use crate::config::AppConfig;
use crate::database::Repositories;
use crate::views::{FormComponents, HtmlForms};

/// Shared, immutable application state handed to every request
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub repos: Repositories,
    pub sessions: Arc<dyn SessionProvider>,
    pub forms: Arc<dyn FormComponents>,
}

impl AppState {
    pub fn new(config: AppConfig, repos: Repositories) -> Self {
        let sessions = Arc::new(JwtSessionProvider::new(&config.security));

        Self {
            config: Arc::new(config),
            repos,
            sessions,
            forms: Arc::new(HtmlForms),
        }
    }

    pub fn with_sessions(mut self, sessions: Arc<dyn SessionProvider>) -> Self {
        self.sessions = sessions;
        self
    }

    pub fn with_forms(mut self, forms: Arc<dyn FormComponents>) -> Self {
        self.forms = forms;
        self
    }
}
