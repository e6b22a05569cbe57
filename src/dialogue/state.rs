//! Conversation state types

use super::script::{FollowUp, SiteDirectory};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Which handler interprets the next visitor input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ConversationState {
    /// Entry state: the next input is read as the visitor's name
    #[default]
    AwaitingName,
    MainMenu,
    AwaitingInterest,
    FinalQuestion,
    ContactOptions,
    FaqMenu,
    Feedback,
    /// Never entered by the script itself; handled like `FinalQuestion`
    Blog,
    /// The watchdog nudged an idle visitor
    Inactive,
    /// The visitor said goodbye
    Ended,
}

impl ConversationState {
    /// Stable name used in logs and API payloads
    pub fn as_str(self) -> &'static str {
        match self {
            ConversationState::AwaitingName => "awaiting_name",
            ConversationState::MainMenu => "main_menu",
            ConversationState::AwaitingInterest => "awaiting_interest",
            ConversationState::FinalQuestion => "final_question",
            ConversationState::ContactOptions => "contact_options",
            ConversationState::FaqMenu => "faq_menu",
            ConversationState::Feedback => "feedback",
            ConversationState::Blog => "blog",
            ConversationState::Inactive => "inactive",
            ConversationState::Ended => "ended",
        }
    }

    /// Whether the next input re-enters the conversation at the main menu
    pub fn is_dormant(self) -> bool {
        matches!(self, ConversationState::Inactive | ConversationState::Ended)
    }

    /// All states, in declaration order
    #[cfg(test)]
    pub const ALL: [ConversationState; 10] = [
        ConversationState::AwaitingName,
        ConversationState::MainMenu,
        ConversationState::AwaitingInterest,
        ConversationState::FinalQuestion,
        ConversationState::ContactOptions,
        ConversationState::FaqMenu,
        ConversationState::Feedback,
        ConversationState::Blog,
        ConversationState::Inactive,
        ConversationState::Ended,
    ];
}

impl std::fmt::Display for ConversationState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One visitor's conversation
///
/// Passed into and returned from every transition; there is no other
/// mutable dialogue state.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Session {
    pub state: ConversationState,
    pub visitor_name: Option<String>,
    /// Re-shown when a final-question answer is not understood
    #[serde(default)]
    pub follow_up: FollowUp,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Name used when addressing the visitor, "visitante" until one is known
    pub fn display_name(&self) -> &str {
        self.visitor_name.as_deref().unwrap_or("visitante")
    }

    pub(crate) fn with_state(&self, state: ConversationState) -> Self {
        Self {
            state,
            ..self.clone()
        }
    }
}

/// Read-only data every transition may consult
#[derive(Debug, Clone)]
pub struct ChatContext {
    pub session_id: String,
    pub directory: Arc<SiteDirectory>,
}

impl ChatContext {
    pub fn new(session_id: impl Into<String>, directory: Arc<SiteDirectory>) -> Self {
        Self {
            session_id: session_id.into(),
            directory,
        }
    }
}
