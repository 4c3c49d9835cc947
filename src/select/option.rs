//! Option entities and the identity used to compare them.

use std::rc::Rc;

use serde::Deserialize;
use serde_json::Value;

/// A labeled selectable entry with an opaque payload.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectOption {
    /// Stable key used by [`Identity::Key`]
    pub key: String,
    /// Display text
    pub label: String,
    /// Opaque payload, never inspected by the control
    pub value: Value,
}

/// Options are shared by reference so that pointer identity is observable.
pub type OptionRef = Rc<SelectOption>;

impl SelectOption {
    /// Create an option keyed by its label.
    pub fn new(label: impl Into<String>, value: impl Into<Value>) -> Self {
        let label = label.into();
        Self {
            key: label.clone(),
            label,
            value: value.into(),
        }
    }

    /// Override the stable key.
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    /// Wrap into a shared reference.
    pub fn shared(self) -> OptionRef {
        Rc::new(self)
    }
}

/// How two options are compared when deciding whether one is selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Identity {
    /// Same allocation. Rebuilding the option list breaks every match.
    Reference,
    /// Same host-supplied key.
    #[default]
    Key,
}

impl Identity {
    pub fn same(self, a: &OptionRef, b: &OptionRef) -> bool {
        match self {
            Identity::Reference => Rc::ptr_eq(a, b),
            Identity::Key => a.key == b.key,
        }
    }

    /// Position of `option` in `items` under this identity.
    pub fn position(self, items: &[OptionRef], option: &OptionRef) -> Option<usize> {
        items.iter().position(|item| self.same(item, option))
    }
}
