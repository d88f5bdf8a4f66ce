//! Browser bindings
//!
//! Writes the buffer into `#input` and the preview line into `#result`,
//! and exposes the four button handlers plus a keydown handler to JS.

use wasm_bindgen::prelude::*;
use web_sys::{console, Element};

use crate::core::Symbol;
use crate::display::{DisplaySink, DisplayState};
use crate::input::InputEvent;
use crate::session::CalculatorSession;

/// Sink that renders into two DOM elements
#[derive(Debug)]
pub struct DomSink {
    input: Element,
    result: Element,
}

impl DomSink {
    /// Looks up the display elements by ID
    pub fn from_document(input_id: &str, result_id: &str) -> Result<Self, JsValue> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| JsValue::from_str("no document available"))?;
        let lookup = |id: &str| {
            document
                .get_element_by_id(id)
                .ok_or_else(|| JsValue::from_str(&format!("missing element #{id}")))
        };

        Ok(Self {
            input: lookup(input_id)?,
            result: lookup(result_id)?,
        })
    }
}

impl DisplaySink for DomSink {
    fn render(&mut self, state: &DisplayState) {
        self.input.set_text_content(Some(&state.buffer_text));
        self.result.set_text_content(Some(&state.preview_text));
    }
}

/// Browser calculator - the main WASM entry point
#[derive(Debug)]
#[wasm_bindgen]
pub struct BrowserCalculator {
    session: CalculatorSession<DomSink>,
}

#[wasm_bindgen]
impl BrowserCalculator {
    /// Binds to `#input` and `#result`
    #[wasm_bindgen(constructor)]
    pub fn new() -> Result<BrowserCalculator, JsValue> {
        console_error_panic_hook::set_once();
        let sink = DomSink::from_document("input", "result")?;
        Ok(Self {
            session: CalculatorSession::new(sink),
        })
    }

    /// Current buffer text
    #[wasm_bindgen(getter)]
    pub fn input(&self) -> String {
        self.session.buffer().text().to_string()
    }

    /// Current preview / result line
    #[wasm_bindgen(getter)]
    pub fn result(&self) -> String {
        self.session.buffer().preview().to_string()
    }

    /// Button handler for digits, `.` and operators
    #[wasm_bindgen(js_name = appendToInput)]
    pub fn append_to_input(&mut self, value: &str) {
        for event in append_events(value) {
            self.session.dispatch(event);
        }
    }

    /// `=` button handler
    pub fn calculate(&mut self) {
        self.session.dispatch(InputEvent::Commit);
    }

    /// `C` button handler
    #[wasm_bindgen(js_name = clearAll)]
    pub fn clear_all(&mut self) {
        self.session.dispatch(InputEvent::Clear);
    }

    /// Backspace button handler
    #[wasm_bindgen(js_name = deleteLast)]
    pub fn delete_last(&mut self) {
        self.session.dispatch(InputEvent::Backspace);
    }

    /// Keydown handler; returns true when the caller should
    /// `preventDefault()`
    #[wasm_bindgen(js_name = handleKey)]
    pub fn handle_key(&mut self, key: &str) -> bool {
        match InputEvent::from_key(key) {
            Some(event) => {
                self.session.dispatch(event);
                event.prevents_default()
            }
            None => false,
        }
    }

    /// Keypad click handler by element ID
    #[wasm_bindgen(js_name = handleButton)]
    pub fn handle_button(&mut self, id: &str) -> bool {
        self.session.handle_button(id)
    }
}

/// Append events for button text; anything that is not a digit, `.` or
/// operator is dropped
fn append_events(value: &str) -> impl Iterator<Item = InputEvent> + '_ {
    value
        .chars()
        .filter_map(|c| Symbol::from_char(c).map(InputEvent::Append))
}

/// Module start hook
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    console::log_1(&"Calculator WASM initialized".into());
}
