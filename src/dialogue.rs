//! Scripted dialogue engine
//!
//! Implements the Elm Architecture pattern with pure state transitions:
//! the runtime feeds events in and executes the effects that come out.

pub mod classify;
mod effect;
mod event;
pub mod name;
pub mod script;
mod state;
mod transition;

#[cfg(test)]
mod proptests;

pub use classify::{classify, Intent};
pub use effect::{Effect, Feedback, OutputAction, Pacing};
pub use event::Event;
pub use state::{ChatContext, ConversationState, Session};
pub use transition::{handle_input, transition, TransitionResult, MIN_FEEDBACK_CHARS};
