//! Event handling for keyboard and mouse input.
//!
//! Terminal events are translated into [`Action`]s, which the App applies
//! to the select fields. Mouse events go through the interaction registry
//! filled in by the last render.

mod action;
mod handler;
mod keyboard;
mod mouse;

pub use action::Action;
pub use handler::EventHandler;
