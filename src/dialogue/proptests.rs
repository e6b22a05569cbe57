//! Property-based tests for the dialogue engine
//!
//! These tests verify key invariants hold across all possible inputs.

use super::name::{extract_name, title_case};
use super::script::{SiteDirectory, MAIN_MENU};
use super::*;
use proptest::prelude::*;
use std::sync::Arc;

// ============================================================================
// Test Helpers
// ============================================================================

fn test_context() -> ChatContext {
    ChatContext::new("test-session", Arc::new(SiteDirectory::default()))
}

fn named(state: ConversationState) -> Session {
    Session {
        state,
        visitor_name: Some("Ana".to_string()),
        ..Session::default()
    }
}

// ============================================================================
// Arbitrary Generators
// ============================================================================

fn arb_state() -> impl Strategy<Value = ConversationState> {
    proptest::sample::select(ConversationState::ALL.to_vec())
}

fn arb_named_state() -> impl Strategy<Value = ConversationState> {
    arb_state().prop_filter("name already captured", |s| {
        *s != ConversationState::AwaitingName
    })
}

fn arb_menu_state() -> impl Strategy<Value = ConversationState> {
    prop_oneof![
        Just(ConversationState::MainMenu),
        Just(ConversationState::AwaitingInterest),
        Just(ConversationState::FinalQuestion),
        Just(ConversationState::ContactOptions),
        Just(ConversationState::FaqMenu),
        Just(ConversationState::Blog),
    ]
}

/// Text that contains no keyword of any menu table
fn arb_gibberish() -> impl Strategy<Value = String> {
    "[xqzkj]{1,12}( [xqzkj]{1,8}){0,3}"
}

/// Mix of menu labels, plausible names, and noise
fn arb_text() -> impl Strategy<Value = String> {
    prop_oneof![
        proptest::sample::select(
            MAIN_MENU
                .iter()
                .chain(super::script::INTEREST_OPTIONS.iter())
                .chain(super::script::CONTACT_OPTIONS.iter())
                .chain(super::script::FAQ_OPTIONS.iter())
                .chain(super::script::YES_NO.iter())
                .map(|s| (*s).to_string())
                .collect::<Vec<_>>()
        ),
        "[a-záéíóúç ]{0,20}",
        "[a-zA-Z0-9 ,.!]{0,40}",
    ]
}

fn arb_event() -> impl Strategy<Value = Event> {
    prop_oneof![
        8 => arb_text().prop_map(Event::input),
        1 => Just(Event::CheckIn),
        1 => Just(Event::Start),
    ]
}

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    // Unrecognized input re-prompts in place and never touches the name
    #[test]
    fn prop_unrecognized_input_reprompts(state in arb_menu_state(), text in arb_gibberish()) {
        let session = named(state);
        let result = handle_input(&session, &test_context(), &text);

        prop_assert_eq!(&result.session.visitor_name, &session.visitor_name);
        let shows_options = result.actions().any(|a| matches!(a, OutputAction::ShowOptions { .. }));
        prop_assert!(shows_options);
        // Only the main menu's not-understood path re-enters the menu; it is the same state
        prop_assert_eq!(result.session.state, state);
    }

    // Title-casing an extracted name changes nothing
    #[test]
    fn prop_extracted_names_are_title_case_fixed_points(text in "[a-záàâãéèêíóôõúç ]{0,30}") {
        if let Some(name) = extract_name(&text) {
            prop_assert_eq!(title_case(&name), name.clone());
            prop_assert!(name.chars().count() >= 2);
            prop_assert!(!name.chars().any(|c| c.is_ascii_digit()));
        }
    }

    // Anything containing a digit is never accepted as a name
    #[test]
    fn prop_names_with_digits_rejected(prefix in "[a-z ]{0,10}", digit in 0u8..10, suffix in "[a-z ]{0,10}") {
        let text = format!("{prefix}{digit}{suffix}");
        prop_assert!(extract_name(&text).is_none());
    }

    // "Serviços" from the main menu always opens the five-entry interest menu
    #[test]
    fn prop_services_opens_interest_menu(name in "[A-Z][a-z]{1,10}") {
        let session = Session {
            state: ConversationState::MainMenu,
            visitor_name: Some(name),
            ..Session::default()
        };
        let result = handle_input(&session, &test_context(), "Serviços");

        prop_assert_eq!(result.session.state, ConversationState::AwaitingInterest);
        let option_lists: Vec<_> = result
            .actions()
            .filter_map(|a| match a {
                OutputAction::ShowOptions { options, .. } => Some(options.len()),
                _ => None,
            })
            .collect();
        prop_assert_eq!(option_lists, vec![5]);
    }

    // Dormant sessions wake up into the main menu after one welcome line
    #[test]
    fn prop_dormant_states_reenter_main_menu(
        state in prop_oneof![Just(ConversationState::Ended), Just(ConversationState::Inactive)],
        text in "[a-zA-Z0-9]{1,20}",
    ) {
        let result = handle_input(&named(state), &test_context(), &text);
        prop_assert_eq!(result.session.state, ConversationState::MainMenu);
        let first = result.actions().next();
        let welcomed = matches!(
            first,
            Some(OutputAction::ShowText { text, .. }) if text.starts_with("Que bom te ver novamente")
        );
        prop_assert!(welcomed, "unexpected first action {:?}", first);
    }

    // Feedback is accepted exactly at ten characters
    #[test]
    fn prop_feedback_threshold(text in "[a-z]{1,20}") {
        let result = handle_input(&named(ConversationState::Feedback), &test_context(), &text);
        let recorded = result.effects.iter().any(|e| matches!(e, Effect::RecordFeedback(_)));
        if text.chars().count() < MIN_FEEDBACK_CHARS {
            prop_assert_eq!(result.session.state, ConversationState::Feedback);
            prop_assert!(!recorded);
        } else {
            prop_assert_eq!(result.session.state, ConversationState::MainMenu);
            prop_assert!(recorded);
        }
    }

    // From the final question, "Não" always ends the conversation
    #[test]
    fn prop_no_always_ends(path in proptest::collection::vec(arb_text(), 0..6)) {
        let ctx = test_context();
        let mut session = named(ConversationState::MainMenu);
        for text in path {
            session = handle_input(&session, &ctx, &text).session;
        }
        let session = session.with_state(ConversationState::FinalQuestion);

        let result = handle_input(&session, &ctx, "Não");
        prop_assert_eq!(result.session.state, ConversationState::Ended);
    }

    // Any event sequence keeps the name invariant: past AwaitingName there is a name,
    // and the name only changes while AwaitingName
    #[test]
    fn prop_name_invariant_holds(events in proptest::collection::vec(arb_event(), 0..30)) {
        let ctx = test_context();
        let mut session = Session::new();

        for event in events {
            let before = session.clone();
            let result = transition(&session, &ctx, event);
            session = result.session;

            if session.state != ConversationState::AwaitingName {
                prop_assert!(session.visitor_name.is_some(), "nameless session in {:?}", session.state);
            }
            if before.state != ConversationState::AwaitingName {
                prop_assert_eq!(&session.visitor_name, &before.visitor_name);
            }
            let addressed_as_stranger = result.effects.iter().any(|e| match e {
                Effect::Display(OutputAction::ShowText { text, .. }) => text.contains("visitante") && before.visitor_name.is_some(),
                _ => false,
            });
            prop_assert!(!addressed_as_stranger);
        }
    }

    // Check-in never runs the conversation past name capture
    #[test]
    fn prop_check_in_respects_state(state in arb_named_state()) {
        let session = named(state);
        let result = transition(&session, &test_context(), Event::CheckIn);
        if state.is_dormant() {
            prop_assert_eq!(result.session, session);
            prop_assert!(result.effects.is_empty());
        } else {
            prop_assert_eq!(result.session.state, ConversationState::Inactive);
            prop_assert_eq!(result.effects.len(), 1);
        }
    }
}

#[test]
fn test_check_in_while_awaiting_name() {
    let result = transition(&Session::new(), &test_context(), Event::CheckIn);
    assert_eq!(result.session, Session::new());
    assert_eq!(result.effects.len(), 1);
}
