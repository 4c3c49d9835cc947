//! UI components for the TUI.
//!
//! - `select` - Select field box, chips and option list popup

mod select;

pub use select::{FIELD_HEIGHT, SelectLayout, render_select_field, render_select_popup};
