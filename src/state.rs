use std::sync::Arc;

use crate::auth::TokenService;
use crate::config::AppConfig;
use crate::database::{ReadingStore, Store, ThresholdStore, UserStore};

/// Shared, read-only state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub tokens: Arc<TokenService>,
    pub store: Store,
}

impl AppState {
    pub fn new(config: AppConfig, store: Store) -> Self {
        let tokens = TokenService::from_config(&config.security);
        Self {
            config: Arc::new(config),
            tokens: Arc::new(tokens),
            store,
        }
    }

    pub fn users(&self) -> &dyn UserStore {
        self.store.users.as_ref()
    }

    pub fn readings(&self) -> &dyn ReadingStore {
        self.store.readings.as_ref()
    }

    pub fn thresholds(&self) -> &dyn ThresholdStore {
        self.store.thresholds.as_ref()
    }
}
