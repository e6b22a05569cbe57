//! Trait abstractions for runtime I/O
//!
//! These traits enable testing the executor with mock implementations.

use super::{EntryBody, SseEvent, TranscriptEntry};
use crate::dialogue::Feedback;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast;

/// Renders transcript entries to whoever is watching the session
#[async_trait]
pub trait Presenter: Send + Sync {
    /// Present one entry, honoring its pacing; returns once it is shown
    async fn present(&self, entry: &TranscriptEntry);
}

/// Destination for accepted visitor feedback
#[async_trait]
pub trait FeedbackSink: Send + Sync {
    async fn record(&self, session_id: &str, feedback: &Feedback) -> Result<(), String>;
}

// ============================================================================
// Arc implementations for trait objects
// ============================================================================

#[async_trait]
impl<T: Presenter + ?Sized> Presenter for Arc<T> {
    async fn present(&self, entry: &TranscriptEntry) {
        (**self).present(entry).await;
    }
}

#[async_trait]
impl<T: FeedbackSink + ?Sized> FeedbackSink for Arc<T> {
    async fn record(&self, session_id: &str, feedback: &Feedback) -> Result<(), String> {
        (**self).record(session_id, feedback).await
    }
}

// ============================================================================
// Production Adapters
// ============================================================================

/// Presenter that streams entries to SSE subscribers
///
/// Paced bot text is preceded by a typing indicator. Having no subscribers
/// is not an error; the snapshot still carries every entry.
pub struct BroadcastPresenter {
    broadcast_tx: broadcast::Sender<SseEvent>,
    pacing_scale: f64,
}

impl BroadcastPresenter {
    pub fn new(broadcast_tx: broadcast::Sender<SseEvent>, pacing_scale: f64) -> Self {
        Self {
            broadcast_tx,
            // NaN collapses to zero
            pacing_scale: pacing_scale.max(0.0),
        }
    }

    fn scaled(&self, d: Duration) -> Duration {
        d.mul_f64(self.pacing_scale)
    }

    /// Typing indicator for `typing`, then a quiet `settle`
    async fn pause(&self, typing: Duration, settle: Duration) {
        if !typing.is_zero() {
            let _ = self.broadcast_tx.send(SseEvent::Typing { active: true });
            tokio::time::sleep(typing).await;
            let _ = self.broadcast_tx.send(SseEvent::Typing { active: false });
        }
        if !settle.is_zero() {
            tokio::time::sleep(settle).await;
        }
    }
}

#[async_trait]
impl Presenter for BroadcastPresenter {
    async fn present(&self, entry: &TranscriptEntry) {
        if let EntryBody::Bot { action } = &entry.body {
            let pacing = action.pacing();
            if !pacing.is_immediate() {
                self.pause(self.scaled(pacing.typing), self.scaled(pacing.settle))
                    .await;
            }
        }

        let _ = self.broadcast_tx.send(SseEvent::Entry {
            entry: entry.clone(),
        });
    }
}

/// Feedback sink that writes each submission to the structured log
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingFeedbackSink;

#[async_trait]
impl FeedbackSink for TracingFeedbackSink {
    async fn record(&self, session_id: &str, feedback: &Feedback) -> Result<(), String> {
        tracing::info!(
            session_id = %session_id,
            visitor_name = %feedback.visitor_name,
            feedback = %feedback.text,
            "Visitor feedback received"
        );
        Ok(())
    }
}
