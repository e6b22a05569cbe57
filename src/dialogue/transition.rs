//! Pure state transition function
//!
//! Given the same session, context, and event, `transition` always returns
//! the same result and performs no I/O. Every anomaly (a bad name, an
//! unknown choice, feedback that is too short) is answered with a chat
//! message and a state that invites a retry, never with an error.

use super::classify::{classify, Intent};
use super::effect::{Effect, Feedback};
use super::name::extract_name;
use super::script::{self, FollowUp};
use super::state::{ChatContext, ConversationState, Session};
use super::Event;

/// Feedback shorter than this (in characters) is sent back for more detail
pub const MIN_FEEDBACK_CHARS: usize = 10;

/// Result of a state transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionResult {
    pub session: Session,
    pub effects: Vec<Effect>,
}

impl TransitionResult {
    pub fn new(session: Session) -> Self {
        Self {
            session,
            effects: vec![],
        }
    }

    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }

    pub fn with_effects(mut self, effects: impl IntoIterator<Item = Effect>) -> Self {
        self.effects.extend(effects);
        self
    }

    /// Display actions only, in order
    #[cfg(test)]
    pub fn actions(&self) -> impl Iterator<Item = &super::OutputAction> {
        self.effects.iter().filter_map(Effect::as_action)
    }
}

/// Pure transition function
pub fn transition(session: &Session, context: &ChatContext, event: Event) -> TransitionResult {
    match event {
        Event::Start => start(session),
        Event::CheckIn => check_in(session),
        Event::UserInput { text } => handle_input(session, context, &text),
    }
}

/// Interpret one piece of visitor text in the current state
///
/// Blank input changes nothing and says nothing.
pub fn handle_input(session: &Session, context: &ChatContext, raw_text: &str) -> TransitionResult {
    let text = raw_text.trim();
    if text.is_empty() {
        return TransitionResult::new(session.clone());
    }
    handle_text(session, context, text)
}

fn start(session: &Session) -> TransitionResult {
    let result = TransitionResult::new(session.clone());
    if session.state == ConversationState::AwaitingName {
        result.with_effects(script::ask_name())
    } else {
        result
    }
}

fn check_in(session: &Session) -> TransitionResult {
    match session.state {
        ConversationState::Inactive | ConversationState::Ended => {
            TransitionResult::new(session.clone())
        }
        // Nudge, but keep waiting for the name so nothing downstream runs nameless
        ConversationState::AwaitingName => TransitionResult::new(session.clone())
            .with_effects(script::idle_nudge(session.display_name())),
        _ => TransitionResult::new(session.with_state(ConversationState::Inactive))
            .with_effects(script::idle_nudge(session.display_name())),
    }
}

fn handle_text(session: &Session, context: &ChatContext, text: &str) -> TransitionResult {
    let directory = &*context.directory;
    let name = session.display_name();

    match session.state {
        ConversationState::AwaitingName => handle_name(session, context, text),

        ConversationState::Inactive | ConversationState::Ended => {
            go_to_main_menu(session).with_effects_first(script::welcome_back(name))
        }

        ConversationState::Feedback => {
            if text.chars().count() < MIN_FEEDBACK_CHARS {
                TransitionResult::new(session.clone()).with_effects(script::feedback_too_short())
            } else {
                go_to_main_menu(session).with_effects_first(
                    std::iter::once(Effect::RecordFeedback(Feedback {
                        visitor_name: name.to_string(),
                        text: text.to_string(),
                    }))
                    .chain(script::feedback_received()),
                )
            }
        }

        ConversationState::MainMenu => match classify(session.state, text) {
            Intent::Services => advance(session, ConversationState::AwaitingInterest)
                .with_effects(script::services_intro()),
            Intent::Contact => advance(session, ConversationState::ContactOptions)
                .with_effects(script::contact_intro(directory)),
            Intent::Faq => {
                advance(session, ConversationState::FaqMenu).with_effects(script::faq_intro())
            }
            Intent::Schedule => ask_final(session, FollowUp::YesNo)
                .with_effects(script::schedule(name, directory)),
            Intent::Blog => {
                ask_final(session, FollowUp::YesNo).with_effects(script::blog(name, directory))
            }
            Intent::Feedback => advance(session, ConversationState::Feedback)
                .with_effects(script::feedback_prompt()),
            Intent::End => {
                advance(session, ConversationState::Ended).with_effects(script::farewell(name))
            }
            _ => go_to_main_menu(session).with_effects_first(script::not_understood_menu(name)),
        },

        ConversationState::AwaitingInterest => {
            let intent = classify(session.state, text);
            if let Some(service) = intent.service() {
                ask_final(session, FollowUp::Service)
                    .with_effects(script::service_pitch(service, directory))
            } else if intent == Intent::BackToMenu {
                go_to_main_menu(session)
            } else {
                reprompt(session)
            }
        }

        ConversationState::FinalQuestion | ConversationState::Blog => {
            match classify(session.state, text) {
                Intent::ContactWhatsApp => ask_final(session, FollowUp::YesNo)
                    .with_effects(script::whatsapp_follow_up(directory)),
                Intent::Affirm => go_to_main_menu(session),
                Intent::Deny => advance(session, ConversationState::Ended)
                    .with_effects(script::farewell(name)),
                _ => reprompt(session),
            }
        }

        ConversationState::ContactOptions => {
            let intent = classify(session.state, text);
            if let Some(channel) = intent.channel() {
                ask_final(session, FollowUp::YesNo)
                    .with_effects(script::contact_channel(channel, directory))
            } else if intent == Intent::BackToMenu {
                go_to_main_menu(session)
            } else {
                reprompt(session)
            }
        }

        ConversationState::FaqMenu => {
            let intent = classify(session.state, text);
            if let Some(topic) = intent.faq_topic() {
                ask_final(session, FollowUp::Faq)
                    .with_effects(script::faq_answer(topic, directory))
            } else if intent == Intent::BackToMenu {
                go_to_main_menu(session)
            } else {
                reprompt(session)
            }
        }
    }
}

fn handle_name(session: &Session, context: &ChatContext, text: &str) -> TransitionResult {
    match extract_name(text) {
        Some(name) => {
            let named = Session {
                visitor_name: Some(name.clone()),
                ..session.clone()
            };
            go_to_main_menu(&named)
                .with_effects_first(script::greeting(&name, &context.directory))
        }
        None => TransitionResult::new(session.clone()).with_effects(script::invalid_name()),
    }
}

fn advance(session: &Session, state: ConversationState) -> TransitionResult {
    TransitionResult::new(session.with_state(state))
}

/// Enter the final question, remembering which buttons go with it
fn ask_final(session: &Session, follow_up: FollowUp) -> TransitionResult {
    TransitionResult::new(Session {
        state: ConversationState::FinalQuestion,
        follow_up,
        ..session.clone()
    })
}

fn go_to_main_menu(session: &Session) -> TransitionResult {
    advance(session, ConversationState::MainMenu)
        .with_effects(script::main_menu(session.display_name()))
}

/// Not-understood reply followed by the current state's own prompt
///
/// The interest menu re-asks its fixed question and list; the other menus
/// re-show the buttons the visitor was last offered.
fn reprompt(session: &Session) -> TransitionResult {
    let result = TransitionResult::new(session.clone())
        .with_effects(script::not_understood(session.display_name()));
    match session.state {
        ConversationState::AwaitingInterest => result.with_effects(script::interest_menu()),
        ConversationState::ContactOptions => {
            result.with_effect(Effect::options(script::CONTACT_OPTIONS))
        }
        ConversationState::FaqMenu => result.with_effect(Effect::options(script::FAQ_OPTIONS)),
        _ => result.with_effect(Effect::options(session.follow_up.options().iter().copied())),
    }
}

impl TransitionResult {
    fn with_effects_first(mut self, effects: impl IntoIterator<Item = Effect>) -> Self {
        let rest = std::mem::take(&mut self.effects);
        self.effects.extend(effects);
        self.effects.extend(rest);
        self
    }
}
