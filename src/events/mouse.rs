//! Mouse event handling.
//!
//! Mouse events are dispatched through the interaction registry, which is
//! populated by the select fields during each render. The registry decides
//! which nested region consumes a click, so a click on a chip or the clear
//! button never also toggles the field around it.

use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};

use crate::app::App;

use super::Action;

/// Handle mouse events and return the appropriate action.
pub fn handle_mouse_event(app: &App, mouse: MouseEvent) -> Action {
    let x = mouse.column;
    let y = mouse.row;

    match mouse.kind {
        // A click that lands on no region is a click outside every field
        MouseEventKind::Down(MouseButton::Left) => {
            app.interactions.handle_click(x, y).unwrap_or(Action::Blur)
        }
        MouseEventKind::Moved => app.interactions.handle_hover(x, y).unwrap_or(Action::None),
        MouseEventKind::ScrollUp => app.interactions.handle_scroll_up(x, y).unwrap_or(Action::None),
        MouseEventKind::ScrollDown => {
            app.interactions.handle_scroll_down(x, y).unwrap_or(Action::None)
        }
        _ => Action::None,
    }
}
