//! Select control core
//!
//! A dropdown that picks one option (single mode) or several (multiple mode)
//! from a host-owned list. The control owns only visibility and the
//! highlight cursor; the host owns options and the selected value and is
//! reached through [`SelectHost`].

mod control;
mod host;
mod option;
mod selection;

pub use control::{Intent, OptionsChange, SelectControl};
pub use host::SelectHost;
pub use option::{Identity, OptionRef, SelectOption};
pub use selection::{Mode, Selection};
