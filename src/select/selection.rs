//! Selection values and the pure selection engine.

use serde::Deserialize;

use super::option::{Identity, OptionRef};

/// Selection cardinality, fixed when a control is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Single,
    Multiple,
}

/// The externally held selected value, shaped by [`Mode`].
#[derive(Debug, Clone, PartialEq)]
pub enum Selection {
    /// Zero or one option
    Single(Option<OptionRef>),
    /// Options in the order they were selected
    Multiple(Vec<OptionRef>),
}

impl Selection {
    /// The empty value for a mode.
    pub fn empty(mode: Mode) -> Self {
        match mode {
            Mode::Single => Selection::Single(None),
            Mode::Multiple => Selection::Multiple(Vec::new()),
        }
    }

    pub fn mode(&self) -> Mode {
        match self {
            Selection::Single(_) => Mode::Single,
            Selection::Multiple(_) => Mode::Multiple,
        }
    }

    /// Selected options in display order.
    pub fn items(&self) -> &[OptionRef] {
        match self {
            Selection::Single(Some(option)) => std::slice::from_ref(option),
            Selection::Single(None) => &[],
            Selection::Multiple(items) => items,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items().is_empty()
    }

    pub fn contains(&self, option: &OptionRef, identity: Identity) -> bool {
        match self {
            Selection::Single(current) => current
                .as_ref()
                .is_some_and(|current| identity.same(current, option)),
            Selection::Multiple(items) => identity.position(items, option).is_some(),
        }
    }

    /// Value to report when `option` is activated, or `None` when nothing changes.
    ///
    /// Multiple mode removes a present option (keeping the order of the rest)
    /// or appends an absent one. Single mode reports the option unless it is
    /// already the selected one; it never clears.
    pub fn toggled(&self, option: &OptionRef, identity: Identity) -> Option<Selection> {
        match self {
            Selection::Multiple(items) => {
                let next = match identity.position(items, option) {
                    Some(index) => {
                        let mut rest = items.clone();
                        rest.remove(index);
                        rest
                    }
                    None => {
                        let mut grown = items.clone();
                        grown.push(option.clone());
                        grown
                    }
                };
                Some(Selection::Multiple(next))
            }
            Selection::Single(current) => {
                let unchanged = current
                    .as_ref()
                    .is_some_and(|current| identity.same(current, option));
                (!unchanged).then(|| Selection::Single(Some(option.clone())))
            }
        }
    }

    /// Human readable summary for logs.
    pub fn describe(&self) -> String {
        match self {
            Selection::Single(None) => "(none)".to_string(),
            Selection::Single(Some(option)) => option.label.clone(),
            Selection::Multiple(items) => {
                let labels: Vec<&str> = items.iter().map(|o| o.label.as_str()).collect();
                format!("[{}]", labels.join(", "))
            }
        }
    }
}
