//! Prelude module for Ridgeline Prefs.
//!
//! Re-exports the types a host needs to build and drive a preferences list:
//!
//! ```ignore
//! use ridgeline_prefs::prelude::*;
//! ```

// ============================================================================
// Data Model
// ============================================================================

pub use crate::item::{PrefItem, PrefItemSection, PrefKind};
pub use crate::value::{PersistValue, PrefValue};

// ============================================================================
// Validation
// ============================================================================

pub use crate::validate::{
    ChoiceValidator, FnValidator, IntRangeValidator, PrefValidator, ValidationOutcome,
};

// ============================================================================
// Controls and the List Controller
// ============================================================================

pub use crate::control::{
    BindingState, CellBinding, ChoiceRequest, ControlDisplay, ControlSignal, EditOutcome,
};
pub use crate::list::{PrefListController, RowContent};

// ============================================================================
// Delegates and Errors
// ============================================================================

pub use crate::delegate::{LoggingDelegate, PrefDelegate};
pub use crate::error::{PrefError, PrefResult};

// ============================================================================
// Signals (from ridgeline-core)
// ============================================================================

pub use ridgeline_core::{ConnectionGuard, ConnectionId, Signal};
