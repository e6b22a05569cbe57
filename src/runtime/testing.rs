//! Mock implementations for testing
//!
//! These mocks enable integration testing without real I/O.

use super::traits::*;
use super::{ChatRuntime, RuntimeSettings, SessionSnapshot, TranscriptEntry};
use crate::dialogue::script::SiteDirectory;
use crate::dialogue::{ChatContext, ConversationState, Event, Feedback, Session};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

const POLL_INTERVAL: Duration = Duration::from_millis(5);

// ============================================================================
// Recording Presenter
// ============================================================================

/// Presenter that keeps every entry it is given, without pacing
#[derive(Default)]
pub struct RecordingPresenter {
    entries: Mutex<Vec<TranscriptEntry>>,
}

impl RecordingPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> Vec<TranscriptEntry> {
        self.entries.lock().unwrap().clone()
    }
}

#[async_trait]
impl Presenter for RecordingPresenter {
    async fn present(&self, entry: &TranscriptEntry) {
        self.entries.lock().unwrap().push(entry.clone());
    }
}

// ============================================================================
// In-Memory Feedback Sink
// ============================================================================

/// Feedback sink that stores submissions, optionally failing every write
#[derive(Default)]
pub struct InMemoryFeedbackSink {
    recorded: Mutex<Vec<(String, Feedback)>>,
    fail: bool,
}

impl InMemoryFeedbackSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            recorded: Mutex::default(),
            fail: true,
        }
    }

    pub fn recorded(&self) -> Vec<(String, Feedback)> {
        self.recorded.lock().unwrap().clone()
    }
}

#[async_trait]
impl FeedbackSink for InMemoryFeedbackSink {
    async fn record(&self, session_id: &str, feedback: &Feedback) -> Result<(), String> {
        if self.fail {
            return Err("feedback store unavailable".to_string());
        }
        self.recorded
            .lock()
            .unwrap()
            .push((session_id.to_string(), feedback.clone()));
        Ok(())
    }
}

// ============================================================================
// Test Runtime
// ============================================================================

/// Builder for a runtime wired to mocks
pub struct TestRuntimeBuilder {
    directory: SiteDirectory,
    idle_timeout: Duration,
    session_ttl: Duration,
    feedback: Arc<InMemoryFeedbackSink>,
}

impl TestRuntimeBuilder {
    pub fn idle_timeout(mut self, idle_timeout: Duration) -> Self {
        self.idle_timeout = idle_timeout;
        self
    }

    pub fn session_ttl(mut self, session_ttl: Duration) -> Self {
        self.session_ttl = session_ttl;
        self
    }

    pub fn directory(mut self, directory: SiteDirectory) -> Self {
        self.directory = directory;
        self
    }

    pub fn feedback(mut self, feedback: InMemoryFeedbackSink) -> Self {
        self.feedback = Arc::new(feedback);
        self
    }

    pub fn build(self) -> TestRuntime {
        let context = ChatContext::new("test-session", Arc::new(self.directory));
        let presenter = Arc::new(RecordingPresenter::new());
        let (event_tx, event_rx) = mpsc::channel(32);
        let (snapshot_tx, snapshot_rx) = watch::channel(SessionSnapshot::default());
        let shutdown = CancellationToken::new();

        let runtime = ChatRuntime::new(
            context,
            Session::new(),
            presenter.clone(),
            self.feedback.clone(),
            RuntimeSettings {
                idle_timeout: self.idle_timeout,
                session_ttl: self.session_ttl,
                pacing_scale: 0.0,
            },
            event_rx,
            event_tx.downgrade(),
            snapshot_tx,
            shutdown.clone(),
        );
        let handle = tokio::spawn(runtime.run());

        TestRuntime {
            event_tx,
            snapshot_rx,
            presenter,
            feedback: self.feedback,
            shutdown,
            handle,
        }
    }
}

/// A running session plus handles to observe it
pub struct TestRuntime {
    pub event_tx: mpsc::Sender<Event>,
    pub snapshot_rx: watch::Receiver<SessionSnapshot>,
    pub presenter: Arc<RecordingPresenter>,
    pub feedback: Arc<InMemoryFeedbackSink>,
    pub shutdown: CancellationToken,
    handle: JoinHandle<()>,
}

impl TestRuntime {
    /// Watchdog and expiry disabled unless set on the builder
    #[allow(clippy::new_ret_no_self)]
    pub fn new() -> TestRuntimeBuilder {
        TestRuntimeBuilder {
            directory: SiteDirectory::default(),
            idle_timeout: Duration::ZERO,
            session_ttl: Duration::ZERO,
            feedback: Arc::new(InMemoryFeedbackSink::new()),
        }
    }

    pub async fn send_start(&self) {
        self.event_tx.send(Event::Start).await.unwrap();
    }

    pub async fn send_input(&self, text: &str) {
        self.event_tx.send(Event::input(text)).await.unwrap();
    }

    pub fn state(&self) -> ConversationState {
        self.snapshot_rx.borrow().session.state
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        self.snapshot_rx.borrow().clone()
    }

    pub fn presented(&self) -> Vec<TranscriptEntry> {
        self.presenter.entries()
    }

    /// Wait until the session reaches `state` with an idle event queue
    pub async fn wait_for_state(&self, state: ConversationState, timeout: Duration) -> bool {
        self.wait_until(timeout, || {
            self.state() == state && self.event_tx.capacity() == self.event_tx.max_capacity()
        })
        .await
    }

    pub async fn wait_for_feedback(&self, count: usize, timeout: Duration) -> bool {
        self.wait_until(timeout, || self.feedback.recorded().len() >= count)
            .await
    }

    async fn wait_until(&self, timeout: Duration, done: impl Fn() -> bool) -> bool {
        let deadline = tokio::time::Instant::now() + timeout;
        loop {
            if done() {
                return true;
            }
            if tokio::time::Instant::now() >= deadline {
                return false;
            }
            tokio::time::sleep(POLL_INTERVAL).await;
        }
    }

    /// Wait for the runtime task to exit
    pub async fn join(self) {
        let _ = self.handle.await;
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Drop every outside handle to the session, keeping only its task
    pub fn disconnect(self) -> JoinHandle<()> {
        self.handle
    }
}
