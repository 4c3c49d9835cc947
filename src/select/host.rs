//! Host contract for select controls.
//!
//! The host owns the option list and the selected value. A control reads
//! both through this trait on every interaction and proposes a new value
//! through [`SelectHost::on_change`]; it never keeps them between calls.
//!
//! # Example
//!
//! ```ignore
//! struct Form {
//!     options: Vec<OptionRef>,
//!     value: Selection,
//! }
//!
//! impl SelectHost for Form {
//!     fn options(&self) -> &[OptionRef] {
//!         &self.options
//!     }
//!
//!     fn value(&self) -> &Selection {
//!         &self.value
//!     }
//!
//!     fn on_change(&mut self, value: Selection) {
//!         self.value = value;
//!     }
//! }
//! ```

use super::option::OptionRef;
use super::selection::Selection;

pub trait SelectHost {
    /// Current option list snapshot.
    ///
    /// A control notices a new list by its address and length. A host that
    /// refills the same buffer in place must also bump
    /// [`SelectHost::options_revision`].
    fn options(&self) -> &[OptionRef];

    /// Counter bumped whenever the option list changes. Hosts that always
    /// hand over a freshly allocated list can keep the default.
    fn options_revision(&self) -> u64 {
        0
    }

    /// Current selected value, shaped like the control's mode
    fn value(&self) -> &Selection;

    /// Receive a proposed value. The host may store, transform or ignore it.
    fn on_change(&mut self, value: Selection);

    /// Number of options
    fn option_count(&self) -> usize {
        self.options().len()
    }

    /// Option at a row index
    fn option_at(&self, index: usize) -> Option<&OptionRef> {
        self.options().get(index)
    }
}
