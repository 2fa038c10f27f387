use crate::{CoreError, CoreResult};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

/// The signed-in user. Components that need the current user receive this
/// explicitly; nothing reads ambient global state.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Session {
    pub username: String,
    pub user_id: String,
}

impl Session {
    pub fn new(username: impl Into<String>, user_id: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            user_id: user_id.into(),
        }
    }
}

/// Holds the session across the app lifecycle: load on startup, save after
/// login/signup, clear on logout.
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn load(&self) -> CoreResult<Option<Session>>;
    async fn save(&self, session: &Session) -> CoreResult<()>;
    async fn clear(&self) -> CoreResult<()>;

    /// Load and fail when nobody is signed in.
    async fn require(&self) -> CoreResult<Session> {
        self.load().await?.ok_or(CoreError::NoSession)
    }
}

/// Process-local store. The original client kept this in browser storage;
/// a single in-memory slot is the equivalent for one client process.
#[derive(Default)]
pub struct InMemorySessionStore {
    inner: RwLock<Option<Session>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn load(&self) -> CoreResult<Option<Session>> {
        Ok(self.inner.read().await.clone())
    }

    async fn save(&self, session: &Session) -> CoreResult<()> {
        tracing::info!("Session started for {}", session.username);
        *self.inner.write().await = Some(session.clone());
        Ok(())
    }

    async fn clear(&self) -> CoreResult<()> {
        let mut slot = self.inner.write().await;
        if let Some(session) = slot.take() {
            tracing::info!("Session ended for {}", session.username);
        }
        Ok(())
    }
}
