//! Calculator Terminal Example
//!
//! Type digits, `.`, `+ - * /`; Enter or `=` evaluates, Esc or `c`
//! clears, Backspace deletes. Ctrl+Q quits.
//!
//! Run with: cargo run --example calculator_term
//! Logs go to stderr: RUST_LOG=pocket_calc=trace cargo run --example calculator_term 2>calc.log

use std::io::{self, Stdout, Write};

use crossterm::{
    cursor::{Hide, MoveTo, Show},
    event::{self, Event, KeyCode, KeyModifiers},
    execute, queue,
    style::Print,
    terminal::{
        disable_raw_mode, enable_raw_mode, Clear, ClearType, EnterAlternateScreen,
        LeaveAlternateScreen,
    },
};
use pocket_calc::display::{DisplayCue, DisplaySink, DisplayState};
use pocket_calc::input::{InputEvent, Keypad};
use pocket_calc::logging::init_logging;
use pocket_calc::session::CalculatorSession;

/// Draws the buffer and preview on the first two rows, the keypad below
struct TermSink {
    out: Stdout,
    status: &'static str,
    keypad: Vec<String>,
}

/// One text line per keypad row, blanks for empty cells
fn keypad_lines(keypad: &Keypad) -> Vec<String> {
    let (rows, cols) = keypad.dimensions();
    (0..rows)
        .map(|row| {
            (0..cols)
                .map(|col| {
                    let label = keypad
                        .get_button_at(row, col)
                        .map(|button| button.label())
                        .unwrap_or_default();
                    format!("[{label:^3}]")
                })
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect()
}

impl TermSink {
    fn draw(&mut self, state: &DisplayState) -> io::Result<()> {
        queue!(
            self.out,
            MoveTo(0, 0),
            Clear(ClearType::All),
            Print(format!("{:>24}", state.buffer_text)),
            MoveTo(0, 1),
            Print(format!("{:>24}", state.preview_text)),
            MoveTo(0, 3),
            Print(self.status),
        )?;
        for (row, line) in self.keypad.iter().enumerate() {
            queue!(self.out, MoveTo(0, 5 + row as u16), Print(line))?;
        }
        self.out.flush()
    }
}

impl DisplaySink for TermSink {
    fn render(&mut self, state: &DisplayState) {
        self.status = "";
        if let Err(err) = self.draw(state) {
            tracing::warn!(%err, "render failed");
        }
    }

    fn cue(&mut self, cue: DisplayCue) {
        self.status = match cue {
            DisplayCue::Calculated => "calculated",
            DisplayCue::Cleared => "cleared",
            DisplayCue::Failed => "error",
        };
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging("pocket_calc=info");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, Hide)?;

    let result = run(TermSink {
        out: stdout,
        status: "",
        keypad: keypad_lines(&Keypad::new()),
    });

    let mut stdout = io::stdout();
    execute!(stdout, Show, LeaveAlternateScreen)?;
    disable_raw_mode()?;

    if let Err(err) = result {
        eprintln!("Error: {err}");
    }

    Ok(())
}

fn run(sink: TermSink) -> io::Result<()> {
    let mut session = CalculatorSession::new(sink);

    loop {
        if let Event::Key(key) = event::read()? {
            if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('q') {
                break;
            }
            if let Some(event) = InputEvent::from_key_event(key) {
                session.dispatch(event);
            }
        }
    }

    Ok(())
}
