//! Action enum for decoupling input handling from state changes.
//!
//! Actions represent user intents that can be logged or replayed.

use crate::select::Intent;

/// Actions that can be dispatched from event handlers.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Quit the application
    Quit,

    // === Focus ===
    /// Focus the next field
    FocusNext,
    /// Focus the previous field
    FocusPrev,
    /// Focus left the focused field
    Blur,

    // === Select fields ===
    /// Route an intent to a field, focusing it first
    Field { field: usize, intent: Intent },

    // === Host ===
    /// Append a character to the focused field's filter
    Filter(char),
    /// Remove the last filter character
    FilterBackspace,
    /// Rebuild the option list from configuration
    ReloadOptions,

    /// No action
    None,
}

impl Action {
    /// Hover highlights fire on every mouse move and stay out of the log.
    pub fn is_loggable(&self) -> bool {
        !matches!(
            self,
            Action::None
                | Action::Field {
                    intent: Intent::Highlight(_),
                    ..
                }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hover_is_not_logged() {
        assert!(!Action::None.is_loggable());
        assert!(!Action::Field { field: 0, intent: Intent::Highlight(2) }.is_loggable());
        assert!(Action::Field { field: 0, intent: Intent::Clear }.is_loggable());
        assert!(Action::Blur.is_loggable());
    }
}
