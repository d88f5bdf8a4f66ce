//! Calculator session
//!
//! A session owns one [`ExpressionBuffer`] and one [`DisplaySink`] for as
//! long as the host keeps the calculator open. Each input event runs one
//! buffer operation to completion and then renders.

use tracing::debug;

use crate::config::CalculatorConfig;
use crate::core::evaluator::{ArithmeticEvaluator, Evaluate};
use crate::core::{CommitOutcome, ExpressionBuffer};
use crate::display::{DisplayCue, DisplaySink, DisplayState};
use crate::input::{InputEvent, Keypad};

/// Buffer, keypad and display sink for one user session
#[derive(Debug)]
pub struct CalculatorSession<S, E = ArithmeticEvaluator> {
    buffer: ExpressionBuffer<E>,
    keypad: Keypad,
    sink: S,
}

impl<S: DisplaySink> CalculatorSession<S> {
    /// Starts a session with default configuration
    pub fn new(sink: S) -> Self {
        Self::with_config(sink, CalculatorConfig::default())
    }

    /// Starts a session with custom configuration
    pub fn with_config(sink: S, config: CalculatorConfig) -> Self {
        Self::with_buffer(ExpressionBuffer::with_config(config), sink)
    }
}

impl<S: DisplaySink, E: Evaluate> CalculatorSession<S, E> {
    /// Starts a session around an existing buffer and renders it once
    pub fn with_buffer(buffer: ExpressionBuffer<E>, mut sink: S) -> Self {
        sink.render(&buffer.display_state());
        Self {
            buffer,
            keypad: Keypad::new(),
            sink,
        }
    }

    /// The session's buffer
    #[must_use]
    pub const fn buffer(&self) -> &ExpressionBuffer<E> {
        &self.buffer
    }

    /// The on-screen keypad
    #[must_use]
    pub const fn keypad(&self) -> &Keypad {
        &self.keypad
    }

    /// The display sink
    #[must_use]
    pub const fn sink(&self) -> &S {
        &self.sink
    }

    /// The display sink, mutably
    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Current display projection
    #[must_use]
    pub fn display_state(&self) -> DisplayState {
        self.buffer.display_state()
    }

    /// Applies one event and renders; returns the outcome for commits
    pub fn dispatch(&mut self, event: InputEvent) -> Option<CommitOutcome> {
        debug!(?event, "dispatch");

        let (outcome, cue) = match event {
            InputEvent::Append(symbol) => {
                self.buffer.append(symbol);
                (None, None)
            }
            InputEvent::Backspace => {
                self.buffer.delete_last();
                (None, None)
            }
            InputEvent::Clear => {
                self.buffer.clear_all();
                (None, Some(DisplayCue::Cleared))
            }
            InputEvent::Commit => {
                let outcome = self.buffer.commit();
                let cue = match &outcome {
                    CommitOutcome::Skipped => None,
                    CommitOutcome::Committed { .. } => Some(DisplayCue::Calculated),
                    CommitOutcome::Failed(_) => Some(DisplayCue::Failed),
                };
                (Some(outcome), cue)
            }
        };

        self.sink.render(&self.buffer.display_state());
        if let Some(cue) = cue {
            self.sink.cue(cue);
        }
        outcome
    }

    /// Handles a browser-style key name; returns false for unmapped keys
    pub fn handle_key(&mut self, key: &str) -> bool {
        match InputEvent::from_key(key) {
            Some(event) => {
                self.dispatch(event);
                true
            }
            None => false,
        }
    }

    /// Handles a keypad button click; returns false for unknown IDs
    pub fn handle_button(&mut self, id: &str) -> bool {
        match self.keypad.handle_click(id) {
            Some(event) => {
                self.dispatch(event);
                true
            }
            None => false,
        }
    }

    /// Ends the session, handing back the buffer and sink
    pub fn into_parts(self) -> (ExpressionBuffer<E>, S) {
        (self.buffer, self.sink)
    }
}
