//! phitopolis - site generator and development server for the Phitopolis
//! marketing and careers site.
//!
//! The page itself is static HTML; the interactive pieces (network
//! background, chat widget, navigation) live in the `phitopolis-viz` wasm
//! crate. This crate renders the markup and serves it together with the
//! chat endpoint backed by Gemini.

pub mod content;
pub mod gemini;
pub mod server;
pub mod site_writer;
