//! Runtime for live chat sessions
//!
//! Each visitor session runs in its own task. Events arrive over an mpsc
//! channel and are processed one at a time; output is streamed to
//! subscribers over a broadcast channel and mirrored into a snapshot the
//! API can read at any moment.

mod executor;
pub mod traits;

#[cfg(test)]
pub mod testing;

pub use executor::{ChatRuntime, RuntimeSettings};
pub use traits::*;

use crate::dialogue::script::SiteDirectory;
use crate::dialogue::{ChatContext, Event, OutputAction, Session};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::{broadcast, mpsc, watch, RwLock};
use tokio_util::sync::CancellationToken;

/// Type alias for production runtime with concrete implementations
pub type ProductionRuntime = ChatRuntime<BroadcastPresenter, Arc<dyn FeedbackSink>>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("Session not found: {0}")]
    SessionNotFound(String),
    #[error("Session is closed: {0}")]
    SessionClosed(String),
}

/// Who produced a transcript entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "from", rename_all = "snake_case")]
pub enum EntryBody {
    Visitor { text: String },
    Bot { action: OutputAction },
}

/// One line of the chat panel
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TranscriptEntry {
    pub sequence: u64,
    pub at: DateTime<Utc>,
    #[serde(flatten)]
    pub body: EntryBody,
}

/// Everything needed to redraw a session's panel
#[derive(Debug, Clone, Default, Serialize)]
pub struct SessionSnapshot {
    pub session: Session,
    pub transcript: Vec<TranscriptEntry>,
}

/// Events sent to SSE clients
#[derive(Debug, Clone)]
pub enum SseEvent {
    Init { snapshot: SessionSnapshot },
    Entry { entry: TranscriptEntry },
    Typing { active: bool },
    Error { message: String },
}

/// Handle to interact with a running session
#[derive(Clone)]
pub struct SessionHandle {
    pub event_tx: mpsc::Sender<Event>,
    pub broadcast_tx: broadcast::Sender<SseEvent>,
    pub snapshot_rx: watch::Receiver<SessionSnapshot>,
    shutdown: CancellationToken,
}

/// Manager for all session runtimes
pub struct RuntimeManager {
    directory: Arc<SiteDirectory>,
    settings: RuntimeSettings,
    feedback: Arc<dyn FeedbackSink>,
    sessions: Arc<RwLock<HashMap<String, SessionHandle>>>,
}

impl RuntimeManager {
    pub fn new(
        directory: Arc<SiteDirectory>,
        settings: RuntimeSettings,
        feedback: Arc<dyn FeedbackSink>,
    ) -> Self {
        Self {
            directory,
            settings,
            feedback,
            sessions: Arc::default(),
        }
    }

    /// Start a new session runtime; it immediately asks for the visitor's name
    ///
    /// The session is forgotten once its runtime stops, whether it was
    /// closed, shut down, or expired for lack of input.
    pub async fn create_session(&self) -> Result<String, RuntimeError> {
        let session_id = uuid::Uuid::new_v4().to_string();
        let context = ChatContext::new(&session_id, self.directory.clone());

        let (event_tx, event_rx) = mpsc::channel(32);
        let (broadcast_tx, _) = broadcast::channel(128);
        let (snapshot_tx, snapshot_rx) = watch::channel(SessionSnapshot::default());
        let shutdown = CancellationToken::new();

        let presenter = BroadcastPresenter::new(broadcast_tx.clone(), self.settings.pacing_scale);
        let runtime: ProductionRuntime = ChatRuntime::new(
            context,
            Session::new(),
            presenter,
            self.feedback.clone(),
            self.settings.clone(),
            event_rx,
            event_tx.downgrade(),
            snapshot_tx,
            shutdown.clone(),
        );

        // Registered before the task starts so its removal cannot run first
        self.sessions.write().await.insert(
            session_id.clone(),
            SessionHandle {
                event_tx: event_tx.clone(),
                broadcast_tx,
                snapshot_rx,
                shutdown,
            },
        );

        let id = session_id.clone();
        let sessions = Arc::clone(&self.sessions);
        tokio::spawn(async move {
            runtime.run().await;
            sessions.write().await.remove(&id);
            tracing::info!(session_id = %id, "Session runtime finished");
        });

        event_tx
            .send(Event::Start)
            .await
            .map_err(|_| RuntimeError::SessionClosed(session_id.clone()))?;

        tracing::info!(session_id = %session_id, "Session created");
        Ok(session_id)
    }

    async fn handle(&self, session_id: &str) -> Result<SessionHandle, RuntimeError> {
        self.sessions
            .read()
            .await
            .get(session_id)
            .cloned()
            .ok_or_else(|| RuntimeError::SessionNotFound(session_id.to_string()))
    }

    /// Send an event to a session
    pub async fn send_event(&self, session_id: &str, event: Event) -> Result<(), RuntimeError> {
        let handle = self.handle(session_id).await?;
        handle
            .event_tx
            .send(event)
            .await
            .map_err(|_| RuntimeError::SessionClosed(session_id.to_string()))
    }

    /// Subscribe to session updates
    ///
    /// The receiver is created before the snapshot is read, so an entry is
    /// never missed; it may appear in both.
    pub async fn subscribe(
        &self,
        session_id: &str,
    ) -> Result<(broadcast::Receiver<SseEvent>, SessionSnapshot), RuntimeError> {
        let handle = self.handle(session_id).await?;
        let rx = handle.broadcast_tx.subscribe();
        let snapshot = handle.snapshot_rx.borrow().clone();
        Ok((rx, snapshot))
    }

    /// Current session state and transcript
    pub async fn snapshot(&self, session_id: &str) -> Result<SessionSnapshot, RuntimeError> {
        let handle = self.handle(session_id).await?;
        let snapshot = handle.snapshot_rx.borrow().clone();
        Ok(snapshot)
    }

    /// Stop a session's runtime and forget it
    pub async fn close(&self, session_id: &str) -> Result<(), RuntimeError> {
        let handle = self
            .sessions
            .write()
            .await
            .remove(session_id)
            .ok_or_else(|| RuntimeError::SessionNotFound(session_id.to_string()))?;
        handle.shutdown.cancel();
        tracing::info!(session_id = %session_id, "Session closed");
        Ok(())
    }

    #[cfg(test)]
    pub async fn session_count(&self) -> usize {
        self.sessions.read().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::testing::InMemoryFeedbackSink;
    use super::*;
    use crate::dialogue::ConversationState;
    use std::time::Duration;

    fn manager_with_ttl(session_ttl: Duration) -> RuntimeManager {
        RuntimeManager::new(
            Arc::new(SiteDirectory::default()),
            RuntimeSettings {
                idle_timeout: Duration::from_secs(60),
                session_ttl,
                pacing_scale: 0.0,
            },
            Arc::new(InMemoryFeedbackSink::new()),
        )
    }

    fn manager() -> RuntimeManager {
        manager_with_ttl(Duration::ZERO)
    }

    async fn wait_for_state(
        manager: &RuntimeManager,
        id: &str,
        expected: ConversationState,
    ) -> SessionSnapshot {
        for _ in 0..100 {
            let snapshot = manager.snapshot(id).await.unwrap();
            if snapshot.session.state == expected {
                return snapshot;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        panic!("session never reached {expected}");
    }

    #[tokio::test]
    async fn test_create_session_asks_for_name() {
        let manager = manager();
        let id = manager.create_session().await.unwrap();

        let mut transcript = vec![];
        for _ in 0..100 {
            transcript = manager.snapshot(&id).await.unwrap().transcript;
            if !transcript.is_empty() {
                break;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        assert_eq!(transcript.len(), 1);
        assert!(matches!(
            &transcript[0].body,
            EntryBody::Bot { action: OutputAction::ShowText { text, .. } } if text == "Olá! Qual é o seu nome?"
        ));
    }

    #[tokio::test]
    async fn test_input_reaches_session() {
        let manager = manager();
        let id = manager.create_session().await.unwrap();
        manager.send_event(&id, Event::input("Ana")).await.unwrap();

        let snapshot = wait_for_state(&manager, &id, ConversationState::MainMenu).await;
        assert_eq!(snapshot.session.visitor_name.as_deref(), Some("Ana"));
    }

    #[tokio::test]
    async fn test_unknown_session() {
        let manager = manager();
        assert!(matches!(
            manager.send_event("nope", Event::CheckIn).await,
            Err(RuntimeError::SessionNotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_close_forgets_session() {
        let manager = manager();
        let id = manager.create_session().await.unwrap();
        assert_eq!(manager.session_count().await, 1);

        manager.close(&id).await.unwrap();
        assert_eq!(manager.session_count().await, 0);
        assert!(manager.snapshot(&id).await.is_err());
        assert!(manager.close(&id).await.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_idle_session_is_evicted() {
        let manager = manager_with_ttl(Duration::from_secs(1800));
        let id = manager.create_session().await.unwrap();
        manager.send_event(&id, Event::input("Ana")).await.unwrap();
        wait_for_state(&manager, &id, ConversationState::MainMenu).await;

        tokio::time::sleep(Duration::from_secs(1801)).await;
        for _ in 0..100 {
            if manager.session_count().await == 0 {
                break;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        assert_eq!(manager.session_count().await, 0);
        assert!(matches!(
            manager.send_event(&id, Event::input("Contato")).await,
            Err(RuntimeError::SessionNotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_shutdown_session_is_forgotten() {
        let manager = manager();
        let id = manager.create_session().await.unwrap();
        manager.handle(&id).await.unwrap().shutdown.cancel();

        for _ in 0..100 {
            if manager.session_count().await == 0 {
                break;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        assert_eq!(manager.session_count().await, 0);
    }
}
