//! The chat session state machine.
//!
//! ```text
//!   Idle --mount--> Ready --submit--> AwaitingResponse --reply/failure--> Ready
//! ```
//!
//! Every change to the message log is flushed to the persistent store and
//! published to observers as a [`SessionView`]. Storage failures are logged
//! and absorbed: the in-memory log stays authoritative.

use super::probe::BackendProbe;
use super::state::{SessionState, SessionView};
use chrono::Utc;
use devcon_core::backend::{AskRequest, AskResponse, ChatBackend};
use devcon_core::chat::{
    MessageLog, SessionAvailability, TurnIdGenerator, TurnTag, UserMemory, truncate_to_millis,
};
use devcon_core::config::ClientConfig;
use devcon_core::error::{DevconError, Result};
use devcon_core::notification::{Notification, NotificationSink};
use devcon_infrastructure::{ChatHistoryRepository, UserMemoryRepository};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, watch};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// Interim reply shown while a cold backend is given time to wake up.
pub const DEGRADED_MODE_MESSAGE: &str = "⏳ The DEVCON AI server is waking up. Your question has been received and will be answered in a moment...";

/// Reply appended when a question could not be answered.
pub const APOLOGY_MESSAGE: &str = "Sorry, I encountered an error. Please try again.";

/// Collaborators a session needs.
#[derive(Clone)]
pub struct SessionDeps {
    pub backend: Arc<dyn ChatBackend>,
    pub history: ChatHistoryRepository,
    pub memory: UserMemoryRepository,
    pub notifier: Arc<dyn NotificationSink>,
}

/// Mutable session data, guarded by one lock so transitions are atomic.
struct SessionInner {
    state: SessionState,
    log: MessageLog,
    availability: SessionAvailability,
    ids: TurnIdGenerator,
    memory: Option<UserMemory>,
}

impl SessionInner {
    fn view(&self) -> SessionView {
        SessionView {
            turns: self.log.snapshot(),
            state: self.state,
            availability: self.availability,
        }
    }
}

struct Shared {
    inner: Mutex<SessionInner>,
    deps: SessionDeps,
    history_window: usize,
    degraded_delay: Duration,
    cancel: CancellationToken,
    view_tx: watch::Sender<SessionView>,
}

/// Owns one conversation for the lifetime of a mounted chat view.
///
/// Cheap to clone; clones share the same session.
#[derive(Clone)]
pub struct SessionController {
    shared: Arc<Shared>,
}

impl SessionController {
    pub fn new(deps: SessionDeps, config: &ClientConfig) -> Self {
        let (view_tx, _) = watch::channel(SessionView::default());
        Self {
            shared: Arc::new(Shared {
                inner: Mutex::new(SessionInner {
                    state: SessionState::Idle,
                    log: MessageLog::fresh(),
                    availability: SessionAvailability::Unknown,
                    ids: TurnIdGenerator::new(),
                    memory: None,
                }),
                deps,
                history_window: config.history_window,
                degraded_delay: config.degraded_delay(),
                cancel: CancellationToken::new(),
                view_tx,
            }),
        }
    }

    /// Starts the session: kicks off the availability probe and loads history.
    ///
    /// The probe runs in the background and may finish before or after the
    /// history is loaded; its handle is returned for hosts that want to wait.
    pub async fn mount(&self) -> Result<JoinHandle<()>> {
        if self.shared.cancel.is_cancelled() {
            return Err(DevconError::Cancelled);
        }

        let mut inner = self.shared.inner.lock().await;
        if inner.state != SessionState::Idle {
            return Err(DevconError::InvalidState {
                expected: SessionState::Idle.as_str(),
                actual: inner.state.to_string(),
            });
        }

        let probe = self.spawn_probe();

        let turns = match self.shared.deps.history.load() {
            Ok(turns) => turns,
            Err(err) => {
                tracing::warn!(error = %err, "[SessionController] Could not read stored history");
                None
            }
        };
        let log = MessageLog::from_turns(turns.unwrap_or_default());
        for turn in log.turns() {
            inner.ids.observe(turn);
        }
        inner.log = log;

        inner.memory = match self.shared.deps.memory.load() {
            Ok(memory) => memory,
            Err(err) => {
                tracing::warn!(error = %err, "[SessionController] Could not read stored user memory");
                None
            }
        };

        inner.state = SessionState::Ready;
        tracing::info!(turns = inner.log.len(), "[SessionController] Session mounted");
        self.publish(&inner);
        Ok(probe)
    }

    fn spawn_probe(&self) -> JoinHandle<()> {
        let probe = BackendProbe::new(self.shared.deps.backend.clone());
        let controller = self.clone();
        let cancel = self.shared.cancel.clone();
        tokio::spawn(async move {
            let availability = tokio::select! {
                _ = cancel.cancelled() => return,
                availability = probe.check() => availability,
            };
            controller.record_availability(availability).await;
        })
    }

    /// Sets availability the first time only.
    async fn record_availability(&self, availability: SessionAvailability) {
        let mut inner = self.shared.inner.lock().await;
        if self.shared.cancel.is_cancelled() || inner.availability.is_known() {
            return;
        }
        inner.availability = availability;
        tracing::info!(%availability, "[SessionController] Backend availability resolved");
        self.publish(&inner);
    }

    /// Submits a question.
    ///
    /// The history sent with it excludes the question itself.
    ///
    /// The user turn (and, when the backend is known to be down, the interim
    /// notice) are in the log by the time this returns. The reply is produced
    /// by the returned task.
    pub async fn submit(&self, text: &str) -> Result<JoinHandle<()>> {
        let query = text.trim();
        if query.is_empty() {
            return Err(DevconError::EmptyInput);
        }
        if self.shared.cancel.is_cancelled() {
            return Err(DevconError::Cancelled);
        }

        let mut inner = self.shared.inner.lock().await;
        if inner.state != SessionState::Ready {
            return Err(DevconError::InvalidState {
                expected: SessionState::Ready.as_str(),
                actual: inner.state.to_string(),
            });
        }

        // Context is what preceded the question; the question itself travels as `query`.
        let request = AskRequest::new(query, inner.log.history_window(self.shared.history_window));

        let user_turn = inner.ids.mint(TurnTag::User, query);
        inner.log.append(user_turn);
        inner.state = SessionState::AwaitingResponse;
        self.remember_interaction(&mut inner, query);

        let delay = if inner.availability.is_degraded() {
            let notice = inner.ids.mint(TurnTag::Notice, DEGRADED_MODE_MESSAGE);
            inner.log.append(notice);
            Some(self.shared.degraded_delay)
        } else {
            None
        };

        tracing::debug!(
            history = request.history.len(),
            degraded = delay.is_some(),
            "[SessionController] Question submitted"
        );
        self.persist_history(&inner);
        self.publish(&inner);
        drop(inner);

        let controller = self.clone();
        Ok(tokio::spawn(async move {
            controller.deliver_reply(request, delay).await;
        }))
    }

    async fn deliver_reply(&self, request: AskRequest, delay: Option<Duration>) {
        let backend = self.shared.deps.backend.clone();
        let outcome = tokio::select! {
            _ = self.shared.cancel.cancelled() => {
                tracing::debug!("[SessionController] Session unmounted before the reply arrived");
                return;
            }
            outcome = async {
                if let Some(delay) = delay {
                    tokio::time::sleep(delay).await;
                }
                backend.ask(&request).await
            } => outcome,
        };
        self.finish_reply(outcome).await;
    }

    async fn finish_reply(&self, outcome: Result<AskResponse>) {
        let mut inner = self.shared.inner.lock().await;
        if self.shared.cancel.is_cancelled() {
            return;
        }

        let failure = match outcome {
            Ok(response) => {
                let reply = inner
                    .ids
                    .mint(TurnTag::Assistant, response.answer_or_fallback());
                inner.log.append(reply);
                None
            }
            Err(err) => {
                tracing::error!(error = %err, "[SessionController] Failed to get a reply");
                let apology = inner.ids.mint(TurnTag::Error, APOLOGY_MESSAGE);
                inner.log.append(apology);
                Some(err)
            }
        };

        inner.state = SessionState::Ready;
        self.persist_history(&inner);
        self.publish(&inner);
        drop(inner);

        if let Some(err) = failure {
            self.shared.deps.notifier.notify(Notification::error(
                "Connection error",
                format!("Failed to get a response from DEVCON AI: {err}"),
            ));
        }
    }

    /// Resets the conversation to the welcome turn and forgets the stored copy.
    ///
    /// Availability and user memory are left alone. A reply still in flight
    /// is appended to the fresh log when it arrives.
    pub async fn clear(&self) -> Result<()> {
        let mut inner = self.shared.inner.lock().await;
        if inner.state == SessionState::Idle {
            return Err(DevconError::InvalidState {
                expected: "Ready or AwaitingResponse",
                actual: inner.state.to_string(),
            });
        }

        inner.log.reset();
        if let Err(err) = self.shared.deps.history.clear() {
            tracing::warn!(error = %err, "[SessionController] Could not clear stored history");
        }
        tracing::info!("[SessionController] Conversation cleared");
        self.publish(&inner);
        drop(inner);

        self.shared.deps.notifier.notify(Notification::success(
            "Chat cleared",
            "Your conversation history has been cleared.",
        ));
        Ok(())
    }

    /// Tears the session down. Pending probes and replies stop touching it.
    pub fn unmount(&self) {
        if !self.shared.cancel.is_cancelled() {
            tracing::info!("[SessionController] Session unmounted");
            self.shared.cancel.cancel();
        }
    }

    pub fn is_mounted(&self) -> bool {
        !self.shared.cancel.is_cancelled()
    }

    pub async fn view(&self) -> SessionView {
        self.shared.inner.lock().await.view()
    }

    pub async fn user_memory(&self) -> Option<UserMemory> {
        self.shared.inner.lock().await.memory.clone()
    }

    /// Receives a fresh [`SessionView`] after every change.
    pub fn subscribe(&self) -> watch::Receiver<SessionView> {
        self.shared.view_tx.subscribe()
    }

    fn remember_interaction(&self, inner: &mut SessionInner, text: &str) {
        let now = truncate_to_millis(Utc::now());
        let memory = inner.memory.get_or_insert_with(|| UserMemory::new(now));
        if memory.observe_user_text(text, now) {
            tracing::debug!(name = ?memory.user_name, "[SessionController] Learned user name");
        }
        if let Err(err) = self.shared.deps.memory.save(memory) {
            tracing::warn!(error = %err, "[SessionController] Could not persist user memory");
        }
    }

    fn persist_history(&self, inner: &SessionInner) {
        if let Err(err) = self.shared.deps.history.save(inner.log.turns()) {
            tracing::warn!(error = %err, "[SessionController] Could not persist chat history");
        }
    }

    fn publish(&self, inner: &SessionInner) {
        self.shared.view_tx.send_replace(inner.view());
    }
}
