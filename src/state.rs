use std::sync::Arc;

use crate::{config::AppConfig, store::MockStore};

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<MockStore>,
    pub session_secret: Arc<str>,
}

impl AppState {
    pub fn new(store: MockStore, session_secret: impl Into<Arc<str>>) -> Self {
        Self {
            store: Arc::new(store),
            session_secret: session_secret.into(),
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        let store = if config.seed_catalog {
            MockStore::seeded(config.mock_latency)
        } else {
            MockStore::new(config.mock_latency)
        };
        Self::new(store, config.session_secret.as_str())
    }
}
