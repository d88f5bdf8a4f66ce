//! Logical input events
//!
//! Keyboard keys and keypad buttons both reduce to an [`InputEvent`]; the
//! session turns each event into exactly one buffer operation.

mod keypad;

pub use keypad::{Keypad, KeypadButton};

use crate::core::{Operation, Symbol};

/// A discrete event delivered by an input source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputEvent {
    /// Append a digit, decimal point or operator
    Append(Symbol),
    /// Evaluate the expression (`=` / Enter)
    Commit,
    /// Clear everything (`C` / Escape)
    Clear,
    /// Delete the last character
    Backspace,
}

impl InputEvent {
    /// Maps a browser-style key name (`"7"`, `"Enter"`, `"Escape"`, ...)
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "Enter" | "=" => Some(Self::Commit),
            "Escape" | "c" | "C" => Some(Self::Clear),
            "Backspace" => Some(Self::Backspace),
            _ => {
                let mut chars = key.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Symbol::from_char(c).map(Self::Append),
                    _ => None,
                }
            }
        }
    }

    /// Keys whose browser default (quick find, form submit, navigate back)
    /// must be suppressed
    #[must_use]
    pub const fn prevents_default(&self) -> bool {
        matches!(
            self,
            Self::Append(Symbol::Operator(Operation::Divide)) | Self::Commit | Self::Backspace
        )
    }

    /// Button caption for this event
    #[must_use]
    pub fn label(&self) -> String {
        match self {
            Self::Append(Symbol::Operator(Operation::Multiply)) => "×".to_string(),
            Self::Append(Symbol::Operator(Operation::Divide)) => "÷".to_string(),
            Self::Append(symbol) => symbol.as_char().map(String::from).unwrap_or_default(),
            Self::Commit => "=".to_string(),
            Self::Clear => "C".to_string(),
            Self::Backspace => "⌫".to_string(),
        }
    }
}

#[cfg(feature = "term")]
impl InputEvent {
    /// Maps a terminal key press; releases and Ctrl chords are ignored
    #[must_use]
    pub fn from_key_event(event: crossterm::event::KeyEvent) -> Option<Self> {
        use crossterm::event::{KeyCode, KeyEventKind, KeyModifiers};

        if event.kind == KeyEventKind::Release || event.modifiers.contains(KeyModifiers::CONTROL)
        {
            return None;
        }

        match event.code {
            KeyCode::Char(c) => Self::from_key(c.encode_utf8(&mut [0; 4])),
            KeyCode::Enter => Some(Self::Commit),
            KeyCode::Esc => Some(Self::Clear),
            KeyCode::Backspace => Some(Self::Backspace),
            _ => None,
        }
    }
}
