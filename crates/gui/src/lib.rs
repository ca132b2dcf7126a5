// Library crate: the remesh pipeline, state, and the headless harness used by
// integration tests and scripted sessions.
// GUI-specific modules (app, ui, viewport rendering) remain in the binary crate.

pub mod command;
pub mod error;
pub mod exchange;
pub mod fixtures;
pub mod harness;
pub mod host;
pub mod manifold;
pub mod obj;
pub mod platform;
pub mod quadriflow;
pub mod state;
pub mod validation;
