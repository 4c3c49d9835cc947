//! Component-level mouse interactivity system.
//!
//! Select fields register their interactive regions during render, and
//! mouse events are routed to the region that consumes them.
//!
//! # Consumption rule
//!
//! Regions nest: a chip or the clear button sits inside the field body,
//! and an open option list may cover the fields below it. For a given
//! point, only the highest-priority region that handles the event kind
//! receives it; every region underneath is skipped. Among equal
//! priorities the region registered first wins. Nested regions therefore
//! register with a higher priority than the region that contains them
//! (see [`priority`]).
//!
//! # Example
//!
//! ```ignore
//! registry.register(
//!     InteractiveRegion::clickable("select_clear", bounds, Action::Field { field, intent: Intent::Clear })
//!         .with_priority(priority::NESTED),
//! );
//! ```

use crate::app::ClickRegion;
use crate::events::Action;

/// Region priorities, innermost highest.
pub mod priority {
    /// Field body: toggles the option list
    pub const FIELD: i32 = 0;
    /// Chips and the clear button inside the body
    pub const NESTED: i32 = 10;
    /// Option list frame, drawn over other fields
    pub const POPUP: i32 = 20;
    /// Option rows inside the list frame
    pub const POPUP_ITEM: i32 = 30;
}

/// An interactive region that can respond to mouse events.
#[derive(Debug, Clone)]
pub struct InteractiveRegion {
    /// Identifier for this region (for debugging/logging)
    pub id: &'static str,

    /// The bounds of this interactive region
    pub bounds: ClickRegion,

    /// Action to dispatch on left click (None = not clickable)
    pub on_click: Option<Action>,

    /// Action to dispatch when the pointer moves over the region
    pub on_hover: Option<Action>,

    /// Action to dispatch on scroll up (None = not scrollable)
    pub on_scroll_up: Option<Action>,

    /// Action to dispatch on scroll down (None = not scrollable)
    pub on_scroll_down: Option<Action>,

    /// Priority for overlapping regions (higher = checked first)
    pub priority: i32,
}

impl InteractiveRegion {
    /// Create a new clickable region
    pub fn clickable(id: &'static str, bounds: ClickRegion, action: Action) -> Self {
        Self {
            id,
            bounds,
            on_click: Some(action),
            on_hover: None,
            on_scroll_up: None,
            on_scroll_down: None,
            priority: priority::FIELD,
        }
    }

    /// Create a region that's both clickable and scrollable
    pub fn interactive(
        id: &'static str,
        bounds: ClickRegion,
        on_click: Action,
        scroll_up: Action,
        scroll_down: Action,
    ) -> Self {
        Self {
            id,
            bounds,
            on_click: Some(on_click),
            on_hover: None,
            on_scroll_up: Some(scroll_up),
            on_scroll_down: Some(scroll_down),
            priority: priority::FIELD,
        }
    }

    /// Set the hover action (for builder pattern)
    pub fn with_hover(mut self, action: Action) -> Self {
        self.on_hover = Some(action);
        self
    }

    /// Set the priority (for builder pattern)
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    /// Check if a point is within this region's bounds
    pub fn contains(&self, x: u16, y: u16) -> bool {
        self.bounds.contains(x, y)
    }
}

/// Registry of interactive regions, rebuilt each frame during render.
#[derive(Debug, Default)]
pub struct InteractionRegistry {
    regions: Vec<InteractiveRegion>,
}

impl InteractionRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            regions: Vec::new(),
        }
    }

    /// Clear all registered regions (call at start of each render)
    pub fn clear(&mut self) {
        self.regions.clear();
    }

    /// Register an interactive region
    pub fn register(&mut self, region: InteractiveRegion) {
        self.regions.push(region);
    }

    /// Register a simple clickable region
    pub fn register_click(&mut self, id: &'static str, bounds: ClickRegion, action: Action) {
        self.register(InteractiveRegion::clickable(id, bounds, action));
    }

    /// Regions with a given id, in registration order
    #[cfg(test)]
    pub fn regions_named(&self, id: &str) -> impl Iterator<Item = &InteractiveRegion> {
        self.regions.iter().filter(move |r| r.id == id)
    }

    /// Action for a click at (x, y), or None when no region handles it.
    pub fn handle_click(&self, x: u16, y: u16) -> Option<Action> {
        self.consume(x, y, |r| r.on_click.as_ref())
    }

    /// Action for the pointer moving to (x, y)
    pub fn handle_hover(&self, x: u16, y: u16) -> Option<Action> {
        self.consume(x, y, |r| r.on_hover.as_ref())
    }

    /// Action for a scroll up at (x, y)
    pub fn handle_scroll_up(&self, x: u16, y: u16) -> Option<Action> {
        self.consume(x, y, |r| r.on_scroll_up.as_ref())
    }

    /// Action for a scroll down at (x, y)
    pub fn handle_scroll_down(&self, x: u16, y: u16) -> Option<Action> {
        self.consume(x, y, |r| r.on_scroll_down.as_ref())
    }

    /// The highest-priority region containing the point and handling the
    /// event consumes it.
    fn consume<F>(&self, x: u16, y: u16, handler: F) -> Option<Action>
    where
        F: Fn(&InteractiveRegion) -> Option<&Action>,
    {
        let mut candidates: Vec<_> = self
            .regions
            .iter()
            .filter(|r| r.contains(x, y) && handler(*r).is_some())
            .collect();

        // Stable sort keeps registration order among equal priorities
        candidates.sort_by(|a, b| b.priority.cmp(&a.priority));

        candidates.first().and_then(|r| handler(*r).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::select::Intent;

    fn field(intent: Intent) -> Action {
        Action::Field { field: 0, intent }
    }

    #[test]
    fn test_region_contains() {
        let region =
            InteractiveRegion::clickable("test", ClickRegion::new(10, 10, 20, 10), Action::None);

        assert!(region.contains(10, 10)); // top-left corner
        assert!(region.contains(15, 15)); // center
        assert!(region.contains(29, 19)); // just inside bottom-right
        assert!(!region.contains(30, 20)); // just outside
        assert!(!region.contains(9, 10)); // just left
    }

    #[test]
    fn test_innermost_region_consumes_click() {
        let mut registry = InteractionRegistry::new();

        registry.register_click(
            "select_field",
            ClickRegion::new(0, 0, 40, 3),
            field(Intent::ToggleVisibility),
        );
        registry.register(
            InteractiveRegion::clickable(
                "select_chip",
                ClickRegion::new(2, 1, 6, 1),
                field(Intent::DeselectChip(0)),
            )
            .with_priority(priority::NESTED),
        );

        assert_eq!(registry.handle_click(3, 1), Some(field(Intent::DeselectChip(0))));
        assert_eq!(registry.handle_click(20, 1), Some(field(Intent::ToggleVisibility)));
        assert_eq!(registry.handle_click(50, 1), None);
    }

    #[test]
    fn test_popup_frame_swallows_clicks_over_other_fields() {
        let mut registry = InteractionRegistry::new();

        registry.register_click(
            "select_field",
            ClickRegion::new(0, 4, 40, 3),
            Action::Field { field: 1, intent: Intent::ToggleVisibility },
        );
        registry.register(
            InteractiveRegion::interactive(
                "select_popup",
                ClickRegion::new(0, 3, 40, 7),
                Action::None,
                field(Intent::HighlightPrev),
                field(Intent::HighlightNext),
            )
            .with_priority(priority::POPUP),
        );
        registry.register(
            InteractiveRegion::clickable(
                "select_row",
                ClickRegion::new(1, 5, 38, 1),
                field(Intent::SelectOption(1)),
            )
            .with_hover(field(Intent::Highlight(1)))
            .with_priority(priority::POPUP_ITEM),
        );

        // Frame border over field 1
        assert_eq!(registry.handle_click(0, 4), Some(Action::None));
        assert_eq!(registry.handle_click(5, 5), Some(field(Intent::SelectOption(1))));
        assert_eq!(registry.handle_hover(5, 5), Some(field(Intent::Highlight(1))));
        assert_eq!(registry.handle_hover(0, 4), None);
        assert_eq!(registry.handle_scroll_down(5, 5), Some(field(Intent::HighlightNext)));
    }

    #[test]
    fn test_equal_priority_first_registered_wins() {
        let mut registry = InteractionRegistry::new();
        registry.register_click("a", ClickRegion::new(0, 0, 5, 5), Action::Quit);
        registry.register_click("b", ClickRegion::new(0, 0, 5, 5), Action::Blur);

        assert_eq!(registry.handle_click(1, 1), Some(Action::Quit));
        assert_eq!(registry.regions_named("b").count(), 1);

        registry.clear();
        assert_eq!(registry.handle_click(1, 1), None);
    }
}
