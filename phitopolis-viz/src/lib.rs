//! Browser-side behavior for the Phitopolis site
//!
//! This crate provides WASM bindings for the animated network background,
//! the chat assistant widget, page navigation and the decorative metrics
//! widget. The simulation and controller logic is plain Rust and is tested
//! natively.

use wasm_bindgen::prelude::*;

pub mod app;
pub mod assistant;
pub mod background;
pub mod chat_client;
mod dom;
pub mod field;
pub mod navigation;
pub mod signals;
pub mod surface;

pub use app::{boot, mount_assistant, mount_background, mount_navigation, start_signals};

/// Initialize WASM panic hook for better error messages
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}
