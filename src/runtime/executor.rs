//! Session runtime executor

use super::traits::{FeedbackSink, Presenter};
use super::{EntryBody, SessionSnapshot, TranscriptEntry};

use crate::dialogue::{transition, ChatContext, Effect, Event, Session};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

/// Timing knobs shared by every session
#[derive(Debug, Clone)]
pub struct RuntimeSettings {
    /// Idle time after which the watchdog checks in; zero disables it
    pub idle_timeout: Duration,
    /// Time without visitor input after which the session ends; zero keeps it forever
    pub session_ttl: Duration,
    /// Multiplier applied to every pacing hint; zero renders instantly
    pub pacing_scale: f64,
}

/// Generic session runtime that can work with any presenter and feedback sink
pub struct ChatRuntime<P, F>
where
    P: Presenter + 'static,
    F: FeedbackSink + 'static,
{
    context: ChatContext,
    session: Session,
    presenter: Arc<P>,
    feedback: Arc<F>,
    settings: RuntimeSettings,
    event_rx: mpsc::Receiver<Event>,
    /// Weak so the loop ends once every outside sender is gone
    event_tx: mpsc::WeakSender<Event>,
    snapshot_tx: watch::Sender<SessionSnapshot>,
    shutdown: CancellationToken,
    /// Token to cancel the pending inactivity check-in
    watchdog: Option<CancellationToken>,
    expires_at: Option<Instant>,
    next_sequence: u64,
}

impl<P, F> ChatRuntime<P, F>
where
    P: Presenter + 'static,
    F: FeedbackSink + 'static,
{
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        context: ChatContext,
        session: Session,
        presenter: P,
        feedback: F,
        settings: RuntimeSettings,
        event_rx: mpsc::Receiver<Event>,
        event_tx: mpsc::WeakSender<Event>,
        snapshot_tx: watch::Sender<SessionSnapshot>,
        shutdown: CancellationToken,
    ) -> Self {
        let next_sequence = snapshot_tx.borrow().transcript.len() as u64 + 1;
        let expires_at = expiry_from_now(settings.session_ttl);
        Self {
            context,
            session,
            presenter: Arc::new(presenter),
            feedback: Arc::new(feedback),
            settings,
            event_rx,
            event_tx,
            snapshot_tx,
            shutdown,
            watchdog: None,
            expires_at,
            next_sequence,
        }
    }

    pub async fn run(mut self) {
        tracing::info!(session_id = %self.context.session_id, "Starting session runtime");

        // Process events in a loop, one to completion before the next
        loop {
            let expires_at = self.expires_at;
            tokio::select! {
                biased;

                () = self.shutdown.cancelled() => break,

                event = self.event_rx.recv() => match event {
                    Some(event) => self.process_event(event).await,
                    None => break,
                },

                () = sleep_until(expires_at) => {
                    tracing::info!(session_id = %self.context.session_id, "Session expired");
                    break;
                }
            }
        }

        self.disarm_watchdog();
        tracing::info!(session_id = %self.context.session_id, "Session runtime stopped");
    }

    async fn process_event(&mut self, event: Event) {
        let rearm = matches!(event, Event::Start | Event::UserInput { .. });

        if let Event::UserInput { text } = &event {
            self.disarm_watchdog();
            self.expires_at = expiry_from_now(self.settings.session_ttl);
            let text = text.trim();
            if !text.is_empty() {
                self.emit(EntryBody::Visitor {
                    text: text.to_string(),
                })
                .await;
            }
        }

        // Pure state transition
        let result = transition(&self.session, &self.context, event);

        if result.session.state != self.session.state {
            tracing::info!(
                session_id = %self.context.session_id,
                from = %self.session.state,
                to = %result.session.state,
                "State transition"
            );
        }
        self.session = result.session;
        let session = self.session.clone();
        self.snapshot_tx.send_modify(|snapshot| snapshot.session = session);

        for effect in result.effects {
            self.execute_effect(effect).await;
        }

        if rearm {
            self.arm_watchdog();
        }
    }

    async fn execute_effect(&mut self, effect: Effect) {
        match effect {
            Effect::Display(action) => {
                self.emit(EntryBody::Bot { action }).await;
            }

            Effect::RecordFeedback(feedback) => {
                if let Err(e) = self
                    .feedback
                    .record(&self.context.session_id, &feedback)
                    .await
                {
                    tracing::warn!(
                        session_id = %self.context.session_id,
                        error = %e,
                        "Failed to record feedback"
                    );
                }
            }
        }
    }

    /// Append an entry to the transcript, then hand it to the presenter
    ///
    /// The snapshot is updated first so a late subscriber can only see an
    /// entry twice, never lose it.
    async fn emit(&mut self, body: EntryBody) {
        let entry = TranscriptEntry {
            sequence: self.next_sequence,
            at: chrono::Utc::now(),
            body,
        };
        self.next_sequence += 1;

        let recorded = entry.clone();
        self.snapshot_tx
            .send_modify(|snapshot| snapshot.transcript.push(recorded));
        self.presenter.present(&entry).await;
    }

    fn arm_watchdog(&mut self) {
        self.disarm_watchdog();
        if self.settings.idle_timeout.is_zero() {
            return;
        }

        let token = CancellationToken::new();
        self.watchdog = Some(token.clone());

        let event_tx = self.event_tx.clone();
        let idle_timeout = self.settings.idle_timeout;
        let session_id = self.context.session_id.clone();

        tokio::spawn(async move {
            tokio::select! {
                () = token.cancelled() => {}
                () = tokio::time::sleep(idle_timeout) => {
                    let Some(event_tx) = event_tx.upgrade() else {
                        return;
                    };
                    tracing::debug!(session_id = %session_id, "Visitor idle, checking in");
                    let _ = event_tx.send(Event::CheckIn).await;
                }
            }
        });
    }

    fn disarm_watchdog(&mut self) {
        if let Some(token) = self.watchdog.take() {
            token.cancel();
        }
    }
}

fn expiry_from_now(ttl: Duration) -> Option<Instant> {
    (!ttl.is_zero()).then(|| Instant::now() + ttl)
}

async fn sleep_until(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}
