//! Display sinks
//!
//! A sink receives the [`DisplayState`] after every event and, for hosts
//! that animate, a [`DisplayCue`] after clears and commits.

pub use crate::core::buffer::DisplayState;

use serde::{Deserialize, Serialize};

/// Presentation hint emitted alongside a render
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DisplayCue {
    /// A commit produced a result
    Calculated,
    /// The buffer was cleared
    Cleared,
    /// A commit failed and the error text is shown
    Failed,
}

/// Renders buffer state for the user
pub trait DisplaySink {
    /// Shows the current state
    fn render(&mut self, state: &DisplayState);

    /// Receives a presentation cue; ignored by default
    fn cue(&mut self, _cue: DisplayCue) {}
}

impl<S: DisplaySink + ?Sized> DisplaySink for &mut S {
    fn render(&mut self, state: &DisplayState) {
        (**self).render(state);
    }

    fn cue(&mut self, cue: DisplayCue) {
        (**self).cue(cue);
    }
}

/// In-memory sink that keeps every frame and cue
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    frames: Vec<DisplayState>,
    cues: Vec<DisplayCue>,
}

impl RecordingSink {
    /// Creates an empty sink
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All rendered frames, oldest first
    #[must_use]
    pub fn frames(&self) -> &[DisplayState] {
        &self.frames
    }

    /// The most recent frame
    #[must_use]
    pub fn last_frame(&self) -> Option<&DisplayState> {
        self.frames.last()
    }

    /// All cues, oldest first
    #[must_use]
    pub fn cues(&self) -> &[DisplayCue] {
        &self.cues
    }

    /// Forgets recorded frames and cues
    pub fn clear(&mut self) {
        self.frames.clear();
        self.cues.clear();
    }

    /// Frames as JSON lines, one object per frame
    pub fn frames_json(&self) -> serde_json::Result<String> {
        let lines = self
            .frames
            .iter()
            .map(serde_json::to_string)
            .collect::<serde_json::Result<Vec<_>>>()?;
        Ok(lines.join("\n"))
    }
}

impl DisplaySink for RecordingSink {
    fn render(&mut self, state: &DisplayState) {
        self.frames.push(state.clone());
    }

    fn cue(&mut self, cue: DisplayCue) {
        self.cues.push(cue);
    }
}
