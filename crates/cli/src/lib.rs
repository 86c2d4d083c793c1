//! `rickdex-cli` library crate.
//!
//! Terminal front end for the episode browser. The binary entrypoint
//! lives in `main.rs`; the modules are exposed here for testing.

pub mod command;
pub mod render;
pub mod shell;
