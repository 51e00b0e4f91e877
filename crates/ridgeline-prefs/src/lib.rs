//! Ridgeline Prefs - the widget-independent core of a preferences list.
//!
//! This crate models a sectioned settings screen: typed preference values,
//! items grouped into sections, a per-row control state machine, and a list
//! controller that routes user interactions and fans outcomes out to
//! delegates and signals. It contains no rendering; a host binds native
//! controls to [`RowContent`] snapshots and forwards interactions through
//! [`PrefListController`].
//!
//! # Overview
//!
//! - [`PrefValue`]: tagged union of every value a preference can hold
//! - [`PrefItem`] / [`PrefItemSection`]: the data model the host builds
//! - [`PrefValidator`]: the validation seam run before every commit
//! - [`CellBinding`]: per-row edit state machine (validate, commit or revert)
//! - [`PrefListController`]: the list-level controller and event router
//! - [`PrefDelegate`]: host callbacks for committed values and errors
//!
//! # Example
//!
//! ```
//! use ridgeline_prefs::prelude::*;
//!
//! let sections = vec![PrefItemSection::new(
//!     "General",
//!     vec![
//!         PrefItem::new("dark", "Dark Mode", PrefKind::Toggle, PrefValue::NoValue)
//!             .with_default(PrefValue::Bool(false)),
//!     ],
//! )];
//! let mut controller = PrefListController::new(sections);
//!
//! let outcome = controller
//!     .control_changed(0, 0, ControlSignal::Toggle(true))
//!     .unwrap();
//! assert_eq!(outcome, EditOutcome::Committed(PrefValue::Bool(true)));
//! ```

pub mod control;
pub mod delegate;
pub mod error;
pub mod item;
pub mod list;
pub mod prelude;
pub mod validate;
pub mod value;

pub use control::{
    BindingState, CellBinding, ChoiceRequest, ControlDisplay, ControlSignal, EditOutcome,
};
pub use delegate::{LoggingDelegate, PrefDelegate};
pub use error::{PrefError, PrefResult};
pub use item::{PrefItem, PrefItemSection, PrefKind};
pub use list::{PrefListController, RowContent};
pub use validate::{
    ChoiceValidator, FnValidator, IntRangeValidator, PrefValidator, ValidationOutcome,
};
pub use value::{PersistValue, PrefValue};
