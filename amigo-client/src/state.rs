use amigo_api::{ApiClient, AppConfig};
use amigo_booking::{PaymentAdapter, SyntheticPaymentAdapter};
use amigo_core::{InMemorySessionStore, SessionStore};
use std::sync::Arc;

/// Shared collaborators, built once at startup and cloned into whatever needs
/// them.
#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub api: Arc<ApiClient>,
    pub sessions: Arc<dyn SessionStore>,
    pub payments: Arc<dyn PaymentAdapter>,
}

impl AppState {
    pub fn new(config: AppConfig) -> anyhow::Result<Self> {
        let api = Arc::new(ApiClient::new(&config)?);
        Ok(Self {
            config,
            api,
            sessions: Arc::new(InMemorySessionStore::new()),
            payments: Arc::new(SyntheticPaymentAdapter),
        })
    }
}
