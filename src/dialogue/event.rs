//! Events that can occur in a conversation

/// Events that trigger state transitions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// The widget opened; asks for the visitor's name
    Start,
    /// Typed text or the label of a clicked option
    UserInput { text: String },
    /// The inactivity watchdog fired
    CheckIn,
}

impl Event {
    pub fn input(text: impl Into<String>) -> Self {
        Event::UserInput { text: text.into() }
    }
}
