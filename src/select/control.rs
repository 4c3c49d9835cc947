//! The select control: visibility, highlight cursor and intent handling.

use serde::Deserialize;

use super::host::SelectHost;
use super::option::{Identity, OptionRef};
use super::selection::{Mode, Selection};

/// What happens to ephemeral state when the host hands over a different
/// option list (different allocation, length or revision).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OptionsChange {
    /// Leave visibility and highlight alone
    Keep,
    /// Move the highlight back to the first row
    #[default]
    ResetHighlight,
    /// Close the list and move the highlight to the first row
    Reset,
}

/// User intents a control understands.
///
/// Row and chip indices refer to the host snapshot current at dispatch time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    /// Activate the field body
    ToggleVisibility,
    /// Focus left the field
    Close,
    /// Activate the clear button
    Clear,
    /// Activate option row `n`
    SelectOption(usize),
    /// Activate selected chip `n` (multiple mode)
    DeselectChip(usize),
    /// Pointer over option row `n`
    Highlight(usize),
    HighlightNext,
    HighlightPrev,
    SelectHighlighted,
}

/// Select control state.
///
/// Holds only what the host does not: whether the list is open and which
/// row is highlighted. The mode is fixed at construction.
#[derive(Debug, Clone)]
pub struct SelectControl {
    mode: Mode,
    identity: Identity,
    on_options_change: OptionsChange,
    visible: bool,
    highlighted: usize,
    /// Address, length and revision of the last option list seen
    seen_options: Option<(usize, usize, u64)>,
}

impl SelectControl {
    pub fn new(mode: Mode) -> Self {
        Self {
            mode,
            identity: Identity::default(),
            on_options_change: OptionsChange::default(),
            visible: false,
            highlighted: 0,
            seen_options: None,
        }
    }

    #[cfg(test)]
    pub fn single() -> Self {
        Self::new(Mode::Single)
    }

    #[cfg(test)]
    pub fn multiple() -> Self {
        Self::new(Mode::Multiple)
    }

    pub fn with_identity(mut self, identity: Identity) -> Self {
        self.identity = identity;
        self
    }

    pub fn with_options_change(mut self, policy: OptionsChange) -> Self {
        self.on_options_change = policy;
        self
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn is_open(&self) -> bool {
        self.visible
    }

    pub fn highlighted(&self) -> usize {
        self.highlighted
    }

    /// Empty value shaped for this control.
    pub fn empty_value(&self) -> Selection {
        Selection::empty(self.mode)
    }

    pub fn toggle_visibility(&mut self) {
        self.visible = !self.visible;
    }

    pub fn close(&mut self) {
        self.visible = false;
    }

    /// No bounds check; the caller passes a rendered row index.
    pub fn set_highlight(&mut self, index: usize) {
        self.highlighted = index;
    }

    /// Opens a closed list, otherwise moves down with wrap-around.
    pub fn highlight_next(&mut self, len: usize) {
        if !self.visible {
            self.visible = true;
            return;
        }
        if len > 0 {
            self.highlighted = (self.highlighted + 1) % len;
        }
    }

    /// Opens a closed list, otherwise moves up with wrap-around.
    pub fn highlight_prev(&mut self, len: usize) {
        if !self.visible {
            self.visible = true;
            return;
        }
        if len > 0 {
            self.highlighted = match self.highlighted.checked_sub(1) {
                Some(prev) if prev < len => prev,
                _ => len - 1,
            };
        }
    }

    /// Apply the options-change policy if the host's list is not the one
    /// seen last.
    ///
    /// Returns true when the list identity changed.
    pub fn sync_options(&mut self, host: &impl SelectHost) -> bool {
        let options = host.options();
        let current = (options.as_ptr() as usize, options.len(), host.options_revision());
        let changed = self.seen_options.is_some_and(|seen| seen != current);
        self.seen_options = Some(current);

        if changed {
            match self.on_options_change {
                OptionsChange::Keep => {}
                OptionsChange::ResetHighlight => self.highlighted = 0,
                OptionsChange::Reset => {
                    self.highlighted = 0;
                    self.visible = false;
                }
            }
        }
        changed
    }

    pub fn is_selected(&self, host: &impl SelectHost, option: &OptionRef) -> bool {
        self.check_shape(host.value());
        host.value().contains(option, self.identity)
    }

    /// Report the empty value for this mode. Always fires.
    pub fn clear_selection(&self, host: &mut impl SelectHost) {
        self.check_shape(host.value());
        host.on_change(self.empty_value());
    }

    /// Toggle `option` in or out of the selection.
    ///
    /// Returns whether the host was notified; re-selecting the selected
    /// option in single mode is a no-op.
    pub fn select_option(&self, host: &mut impl SelectHost, option: &OptionRef) -> bool {
        self.check_shape(host.value());
        match host.value().toggled(option, self.identity) {
            Some(next) => {
                host.on_change(next);
                true
            }
            None => false,
        }
    }

    /// Dispatch an intent against the host's current snapshot.
    ///
    /// Returns whether the host was notified of a new value. Indices that
    /// no longer resolve are ignored.
    pub fn apply(&mut self, intent: Intent, host: &mut impl SelectHost) -> bool {
        self.sync_options(host);

        match intent {
            Intent::ToggleVisibility => {
                self.toggle_visibility();
                false
            }
            Intent::Close => {
                self.close();
                false
            }
            Intent::Clear => {
                self.clear_selection(host);
                true
            }
            Intent::SelectOption(index) => match host.option_at(index).cloned() {
                Some(option) => self.select_option(host, &option),
                None => false,
            },
            Intent::DeselectChip(index) => {
                if self.mode != Mode::Multiple {
                    return false;
                }
                match host.value().items().get(index).cloned() {
                    Some(option) => self.select_option(host, &option),
                    None => false,
                }
            }
            Intent::Highlight(index) => {
                self.set_highlight(index);
                false
            }
            Intent::HighlightNext => {
                self.highlight_next(host.option_count());
                false
            }
            Intent::HighlightPrev => {
                self.highlight_prev(host.option_count());
                false
            }
            Intent::SelectHighlighted => match host.option_at(self.highlighted).cloned() {
                Some(option) => self.select_option(host, &option),
                None => false,
            },
        }
    }

    fn check_shape(&self, value: &Selection) {
        debug_assert_eq!(
            value.mode(),
            self.mode,
            "host supplied a value shaped for the wrong mode"
        );
    }
}
