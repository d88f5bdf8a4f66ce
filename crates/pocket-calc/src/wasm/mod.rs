//! WebAssembly frontend
//!
//! Compiled with the `wasm` feature only.

mod browser;

pub use browser::{BrowserCalculator, DomSink};
