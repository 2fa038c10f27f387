use crate::message::Message;
use crate::transcript::Transcript;
use amigo_api::types::SendChatRequest;
use amigo_api::{ApiClient, AppConfig};
use amigo_core::Session;
use amigo_shared::clock;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{watch, Mutex};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

/// Tuning for one polling subscription.
#[derive(Debug, Clone)]
pub struct SyncOptions {
    pub poll_interval: Duration,
}

impl SyncOptions {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            poll_interval: Duration::from_millis(config.chat.poll_interval_ms),
        }
    }
}

impl Default for SyncOptions {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_millis(1000),
        }
    }
}

struct PollState {
    transcript: Transcript,
    last_applied_fetch: u64,
}

struct SyncInner {
    api: Arc<ApiClient>,
    trip_id: String,
    session: Session,
    state: Mutex<PollState>,
    revision: watch::Sender<u64>,
    /// Lifecycle epoch. `stop` bumps it; a response fetched under an older
    /// epoch is discarded instead of applied.
    generation: AtomicU64,
    /// Monotonic fetch sequence. An older fetch resolving after a newer one
    /// must not roll the transcript back.
    fetch_seq: AtomicU64,
    paused: AtomicBool,
}

impl SyncInner {
    async fn poll_once(&self) {
        let generation = self.generation.load(Ordering::SeqCst);
        let seq = self.fetch_seq.fetch_add(1, Ordering::SeqCst) + 1;

        let batch = match self.api.chats_by_trip(&self.trip_id).await {
            Ok(batch) => batch,
            Err(err) => {
                // Swallowed. The next tick simply tries again.
                tracing::warn!("Chat poll failed for trip {}: {}", self.trip_id, err);
                return;
            }
        };

        let normalized: Vec<Message> = batch.into_iter().map(Message::from_wire).collect();

        let mut state = self.state.lock().await;
        if self.generation.load(Ordering::SeqCst) != generation {
            tracing::debug!("Discarding stale transcript fetch for trip {}", self.trip_id);
            return;
        }
        if seq < state.last_applied_fetch {
            tracing::debug!(
                "Discarding out-of-order transcript fetch for trip {}",
                self.trip_id
            );
            return;
        }
        state.last_applied_fetch = seq;
        if state.transcript.merge(normalized) {
            self.revision.send_modify(|rev| *rev += 1);
        }
    }
}

/// One polling subscription: owns the poll task for a single trip and the
/// transcript it maintains. Created when a chat opens, dropped (or `stop`ped)
/// when it closes; a trip change means a fresh `ChatSync`.
pub struct ChatSync {
    inner: Arc<SyncInner>,
    task: JoinHandle<()>,
}

impl ChatSync {
    pub fn start(
        api: Arc<ApiClient>,
        trip_id: impl Into<String>,
        session: Session,
        options: SyncOptions,
    ) -> Self {
        let (revision, _) = watch::channel(0u64);
        let inner = Arc::new(SyncInner {
            api,
            trip_id: trip_id.into(),
            session,
            state: Mutex::new(PollState {
                transcript: Transcript::new(),
                last_applied_fetch: 0,
            }),
            revision,
            generation: AtomicU64::new(0),
            fetch_seq: AtomicU64::new(0),
            paused: AtomicBool::new(false),
        });

        tracing::info!("Starting chat sync for trip {}", inner.trip_id);
        let task = tokio::spawn(Self::poll_loop(inner.clone(), options.poll_interval));
        Self { inner, task }
    }

    async fn poll_loop(inner: Arc<SyncInner>, interval: Duration) {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            if inner.paused.load(Ordering::SeqCst) {
                continue;
            }
            // One detached request per tick, like the page fired them. The
            // epoch and sequence guards make late arrivals harmless.
            let inner = inner.clone();
            tokio::spawn(async move { inner.poll_once().await });
        }
    }

    /// Optimistic send: the message is visible locally before the POST goes
    /// out, and the next poll tick claims the server echo by key. A failed
    /// POST is logged; the local entry is not rolled back.
    pub async fn send(&self, text: &str) {
        let text = text.trim();
        if text.is_empty() {
            return;
        }
        let time = clock::now_hh_mm();
        let optimistic = Message::local(self.inner.session.username.clone(), text, time.clone());

        {
            let mut state = self.inner.state.lock().await;
            if state.transcript.apply_local(optimistic) {
                self.inner.revision.send_modify(|rev| *rev += 1);
            }
        }

        let request = SendChatRequest {
            trip_id: self.inner.trip_id.clone(),
            username: self.inner.session.username.clone(),
            message: text.to_string(),
            time,
        };
        if let Err(err) = self.inner.api.send_chat(&request).await {
            tracing::error!("Failed to send message: {}", err);
        }
    }

    /// Booking flows pause the transcript while they own the screen.
    pub fn pause(&self) {
        self.inner.paused.store(true, Ordering::SeqCst);
        tracing::debug!("Chat polling paused for trip {}", self.inner.trip_id);
    }

    pub fn resume(&self) {
        self.inner.paused.store(false, Ordering::SeqCst);
        tracing::debug!("Chat polling resumed for trip {}", self.inner.trip_id);
    }

    pub fn is_paused(&self) -> bool {
        self.inner.paused.load(Ordering::SeqCst)
    }

    pub fn trip_id(&self) -> &str {
        &self.inner.trip_id
    }

    pub async fn snapshot(&self) -> Vec<Message> {
        self.inner.state.lock().await.transcript.messages()
    }

    /// Revision counter bumped on every visible transcript change. Front ends
    /// await this instead of re-reading the model on a timer of their own.
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.inner.revision.subscribe()
    }

    /// Explicit teardown; equivalent to dropping the handle.
    pub fn stop(self) {}
}

impl Drop for ChatSync {
    fn drop(&mut self) {
        self.inner.generation.fetch_add(1, Ordering::SeqCst);
        self.task.abort();
        tracing::info!("Stopped chat sync for trip {}", self.inner.trip_id);
    }
}
