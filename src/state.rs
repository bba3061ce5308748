use crate::config::AppConfig;
use crate::store::UserStore;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub users: Arc<UserStore>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    /// Build state with a fresh, empty user store. Each call owns its own
    /// store, so tests can construct isolated instances instead of sharing
    /// process-global state.
    pub fn new(config: AppConfig) -> Self {
        Self {
            users: Arc::new(UserStore::new()),
            config: Arc::new(config),
        }
    }

    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self::new(AppConfig::from_env()?))
    }
}
