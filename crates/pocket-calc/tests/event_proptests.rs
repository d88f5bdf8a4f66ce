//! Property-based tests over arbitrary input event sequences

use pocket_calc::prelude::*;
use proptest::prelude::*;

// ===== Strategy definitions =====

fn symbol_strategy() -> impl Strategy<Value = Symbol> {
    prop_oneof![
        4 => (0u8..=9u8).prop_map(Symbol::Digit),
        1 => Just(Symbol::Decimal),
        2 => prop::sample::select(Operation::ALL.to_vec()).prop_map(Symbol::Operator),
    ]
}

fn event_strategy() -> impl Strategy<Value = InputEvent> {
    prop_oneof![
        8 => symbol_strategy().prop_map(InputEvent::Append),
        1 => Just(InputEvent::Commit),
        1 => Just(InputEvent::Clear),
        1 => Just(InputEvent::Backspace),
    ]
}

fn events() -> impl Strategy<Value = Vec<InputEvent>> {
    prop::collection::vec(event_strategy(), 0..40)
}

fn run(events: &[InputEvent]) -> CalculatorSession<RecordingSink> {
    let mut session = CalculatorSession::new(RecordingSink::new());
    for event in events {
        session.dispatch(*event);
    }
    session
}

// ===== Invariants =====

proptest! {
    #[test]
    fn prop_text_is_never_empty(events in events()) {
        let session = run(&events);
        for frame in session.sink().frames() {
            prop_assert!(!frame.buffer_text.is_empty());
        }
    }

    #[test]
    fn prop_one_render_per_event(events in events()) {
        let session = run(&events);
        prop_assert_eq!(session.sink().frames().len(), events.len() + 1);
    }

    #[test]
    fn prop_preview_is_empty_or_result_or_error(events in events()) {
        let session = run(&events);
        for frame in session.sink().frames() {
            let preview = &frame.preview_text;
            prop_assert!(
                preview.is_empty() || preview.starts_with("= ") || preview == "Error",
                "unexpected preview {:?}", preview
            );
        }
    }

    #[test]
    fn prop_preview_predicts_commit(events in events()) {
        let mut session = run(&events);
        let preview = session.display_state().preview_text;
        if let Some(expected) = preview.strip_prefix("= ") {
            let expected = expected.to_string();
            session.dispatch(InputEvent::Commit);
            prop_assert_eq!(session.display_state().buffer_text, expected);
        }
    }

    #[test]
    fn prop_no_consecutive_operators_while_editing(events in events()) {
        let session = run(&events);
        let text = session.display_state().buffer_text;
        if !session.buffer().is_awaiting_reset() {
            let chars: Vec<char> = text.chars().collect();
            for pair in chars.windows(2) {
                prop_assert!(
                    !(Operation::is_operator_char(pair[0]) && Operation::is_operator_char(pair[1])),
                    "consecutive operators in {}", text
                );
            }
        }
    }

    #[test]
    fn prop_one_decimal_per_number(events in events()) {
        let session = run(&events);
        let text = session.display_state().buffer_text;
        for number in text.split(Operation::is_operator_char) {
            prop_assert!(number.matches('.').count() <= 1, "{}", text);
        }
    }

    #[test]
    fn prop_clear_always_resets(events in events()) {
        let mut session = run(&events);
        session.dispatch(InputEvent::Clear);
        let state = session.display_state();
        prop_assert_eq!(state.buffer_text, "0");
        prop_assert_eq!(state.preview_text, "");
        prop_assert_eq!(session.buffer().last_result(), None);
        prop_assert_eq!(session.sink().cues().last(), Some(&DisplayCue::Cleared));
    }

    #[test]
    fn prop_digit_after_commit_starts_fresh(events in events(), d in 0u8..=9u8) {
        let mut session = run(&events);
        let outcome = session.dispatch(InputEvent::Commit);
        if matches!(outcome, Some(CommitOutcome::Committed { .. } | CommitOutcome::Failed(_))) {
            session.dispatch(InputEvent::Append(Symbol::Digit(d)));
            prop_assert_eq!(session.display_state().buffer_text, d.to_string());
        }
    }

    #[test]
    fn prop_committed_text_matches_outcome(events in events()) {
        let mut session = run(&events);
        if let Some(CommitOutcome::Committed { text, value }) = session.dispatch(InputEvent::Commit) {
            prop_assert!(value.is_finite());
            prop_assert_eq!(session.display_state().buffer_text, text);
            prop_assert_eq!(session.display_state().preview_text, "");
            prop_assert_eq!(session.sink().cues().last(), Some(&DisplayCue::Calculated));
        }
    }

    #[test]
    fn prop_keypad_and_keys_agree(ids in prop::collection::vec(0usize..18, 0..30)) {
        let mut by_button = CalculatorSession::new(RecordingSink::new());
        let mut by_event = CalculatorSession::new(RecordingSink::new());
        let buttons = by_button.keypad().buttons().to_vec();
        for i in ids {
            let button = &buttons[i];
            by_button.handle_button(&button.id);
            by_event.dispatch(button.event);
        }
        prop_assert_eq!(by_button.display_state(), by_event.display_state());
    }
}
