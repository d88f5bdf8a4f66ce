//! On-screen keypad layout
//!
//! Layout:
//! ```text
//! [ C ] [ ⌫ ] [ ÷ ] [ × ]
//! [ 7 ] [ 8 ] [ 9 ] [ - ]
//! [ 4 ] [ 5 ] [ 6 ] [ + ]
//! [ 1 ] [ 2 ] [ 3 ] [ = ]
//! [ 0 ] [ . ]
//! ```

use super::InputEvent;
use crate::core::{Operation, Symbol};

/// A single keypad button
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeypadButton {
    /// The event this button emits
    pub event: InputEvent,
    /// Element ID (`btn-7`, `btn-plus`, ...)
    pub id: String,
    /// Grid row (0-indexed)
    pub row: usize,
    /// Grid column (0-indexed)
    pub col: usize,
}

impl KeypadButton {
    /// Creates a button, deriving its element ID from the event
    #[must_use]
    pub fn new(event: InputEvent, row: usize, col: usize) -> Self {
        let id = match event {
            InputEvent::Append(Symbol::Digit(d)) => format!("btn-{d}"),
            InputEvent::Append(Symbol::Decimal) => "btn-decimal".to_string(),
            InputEvent::Append(Symbol::Operator(op)) => format!("btn-{}", op_name(op)),
            InputEvent::Commit => "btn-equals".to_string(),
            InputEvent::Clear => "btn-clear".to_string(),
            InputEvent::Backspace => "btn-backspace".to_string(),
        };
        Self { event, id, row, col }
    }

    /// Button caption
    #[must_use]
    pub fn label(&self) -> String {
        self.event.label()
    }
}

const fn op_name(op: Operation) -> &'static str {
    match op {
        Operation::Add => "plus",
        Operation::Subtract => "minus",
        Operation::Multiply => "times",
        Operation::Divide => "divide",
    }
}

/// The calculator keypad
#[derive(Debug, Clone)]
pub struct Keypad {
    buttons: Vec<KeypadButton>,
    rows: usize,
    cols: usize,
}

impl Default for Keypad {
    fn default() -> Self {
        Self::new()
    }
}

impl Keypad {
    /// Creates the standard keypad
    #[must_use]
    pub fn new() -> Self {
        let digit = |d: u8| InputEvent::Append(Symbol::Digit(d));
        let op = |o: Operation| InputEvent::Append(Symbol::Operator(o));

        let layout = [
            [
                Some(InputEvent::Clear),
                Some(InputEvent::Backspace),
                Some(op(Operation::Divide)),
                Some(op(Operation::Multiply)),
            ],
            [
                Some(digit(7)),
                Some(digit(8)),
                Some(digit(9)),
                Some(op(Operation::Subtract)),
            ],
            [
                Some(digit(4)),
                Some(digit(5)),
                Some(digit(6)),
                Some(op(Operation::Add)),
            ],
            [
                Some(digit(1)),
                Some(digit(2)),
                Some(digit(3)),
                Some(InputEvent::Commit),
            ],
            [
                Some(digit(0)),
                Some(InputEvent::Append(Symbol::Decimal)),
                None,
                None,
            ],
        ];

        let buttons = layout
            .iter()
            .enumerate()
            .flat_map(|(row, cells)| {
                cells.iter().enumerate().filter_map(move |(col, cell)| {
                    cell.map(|event| KeypadButton::new(event, row, col))
                })
            })
            .collect();

        Self {
            buttons,
            rows: layout.len(),
            cols: 4,
        }
    }

    /// Returns the number of buttons
    #[must_use]
    pub fn button_count(&self) -> usize {
        self.buttons.len()
    }

    /// Returns the grid dimensions (rows, cols)
    #[must_use]
    pub const fn dimensions(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Gets all buttons in row-major order
    #[must_use]
    pub fn buttons(&self) -> &[KeypadButton] {
        &self.buttons
    }

    /// Gets the button at a grid cell, if the cell is occupied
    #[must_use]
    pub fn get_button_at(&self, row: usize, col: usize) -> Option<&KeypadButton> {
        self.buttons.iter().find(|b| b.row == row && b.col == col)
    }

    /// Finds a button by element ID
    #[must_use]
    pub fn find_button_by_id(&self, id: &str) -> Option<&KeypadButton> {
        self.buttons.iter().find(|b| b.id == id)
    }

    /// Maps a button click to its event
    #[must_use]
    pub fn handle_click(&self, id: &str) -> Option<InputEvent> {
        self.find_button_by_id(id).map(|b| b.event)
    }
}
