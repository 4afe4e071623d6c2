use crate::config::AppConfig;
use crate::storage::{JsonlFileStore, LeadStore};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub store: Arc<dyn LeadStore>,
}

impl AppState {
    pub fn init() -> anyhow::Result<Self> {
        let config = Arc::new(AppConfig::from_env()?);

        let file_store = JsonlFileStore::new(config.leads_path.clone());
        tracing::info!(
            path = %file_store.path().display(),
            persistence = ?config.persistence,
            "lead store ready"
        );
        let store = Arc::new(file_store) as Arc<dyn LeadStore>;

        Ok(Self::from_parts(config, store))
    }

    pub fn from_parts(config: Arc<AppConfig>, store: Arc<dyn LeadStore>) -> Self {
        Self { config, store }
    }
}

#[cfg(test)]
impl AppState {
    pub fn fake(store: Arc<dyn LeadStore>) -> Self {
        let config = Arc::new(AppConfig {
            host: "127.0.0.1".into(),
            port: 0,
            leads_path: "/tmp/leads-test.jsonl".into(),
            persistence: crate::config::PersistencePolicy::BestEffort,
            site_url: "https://leads.test".into(),
        });
        Self::from_parts(config, store)
    }

    pub fn with_persistence(self, persistence: crate::config::PersistencePolicy) -> Self {
        let mut config = (*self.config).clone();
        config.persistence = persistence;
        Self::from_parts(Arc::new(config), self.store)
    }
}
