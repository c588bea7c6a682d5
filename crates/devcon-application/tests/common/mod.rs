#![allow(dead_code)]

use async_trait::async_trait;
use devcon_application::{SessionController, SessionDeps};
use devcon_core::backend::{AskRequest, AskResponse, ChatBackend};
use devcon_core::config::ClientConfig;
use devcon_core::error::{DevconError, Result};
use devcon_core::notification::{Notification, NotificationSink};
use devcon_core::store::KeyValueStore;
use devcon_infrastructure::{ChatHistoryRepository, MemoryKeyValueStore, UserMemoryRepository};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::time::Instant;

/// Backend whose status check and replies are scripted by the test.
pub struct ScriptedBackend {
    status: Result<bool>,
    replies: Mutex<VecDeque<Result<AskResponse>>>,
    requests: Mutex<Vec<(AskRequest, Instant)>>,
}

impl ScriptedBackend {
    pub fn new(status: Result<bool>) -> Self {
        Self {
            status,
            replies: Mutex::new(VecDeque::new()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn available() -> Self {
        Self::new(Ok(true))
    }

    pub fn unreachable() -> Self {
        Self::new(Err(DevconError::transport(None, "connection refused")))
    }

    pub fn reply(self, answer: &str) -> Self {
        self.push(Ok(AskResponse::answered(answer)))
    }

    pub fn fail(self) -> Self {
        self.push(Err(DevconError::transport(Some(502), "bad gateway")))
    }

    pub fn push(self, reply: Result<AskResponse>) -> Self {
        self.replies.lock().unwrap().push_back(reply);
        self
    }

    pub fn requests(&self) -> Vec<(AskRequest, Instant)> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChatBackend for ScriptedBackend {
    async fn check_availability(&self) -> Result<bool> {
        self.status.clone()
    }

    async fn ask(&self, request: &AskRequest) -> Result<AskResponse> {
        self.requests
            .lock()
            .unwrap()
            .push((request.clone(), Instant::now()));
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(AskResponse::default()))
    }
}

#[derive(Default)]
pub struct RecordingNotifier {
    seen: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    pub fn seen(&self) -> Vec<Notification> {
        self.seen.lock().unwrap().clone()
    }
}

impl NotificationSink for RecordingNotifier {
    fn notify(&self, notification: Notification) {
        self.seen.lock().unwrap().push(notification);
    }
}

pub struct Harness {
    pub controller: SessionController,
    pub backend: Arc<ScriptedBackend>,
    pub notifier: Arc<RecordingNotifier>,
    pub store: Arc<dyn KeyValueStore>,
}

pub fn harness(backend: ScriptedBackend) -> Harness {
    harness_with_store(backend, Arc::new(MemoryKeyValueStore::new()))
}

pub fn harness_with_store(backend: ScriptedBackend, store: Arc<dyn KeyValueStore>) -> Harness {
    let backend = Arc::new(backend);
    let notifier = Arc::new(RecordingNotifier::default());
    let deps = SessionDeps {
        backend: backend.clone(),
        history: ChatHistoryRepository::new(store.clone()),
        memory: UserMemoryRepository::new(store.clone()),
        notifier: notifier.clone(),
    };
    Harness {
        controller: SessionController::new(deps, &ClientConfig::default()),
        backend,
        notifier,
        store,
    }
}

/// `(role, content)` pairs, for compact assertions on the log.
pub fn transcript(controller_turns: &[devcon_core::chat::ChatTurn]) -> Vec<(String, String)> {
    controller_turns
        .iter()
        .map(|t| (t.role().to_string(), t.content().to_string()))
        .collect()
}
