//! The preferences list controller.
//!
//! [`PrefListController`] owns the sections and one [`CellBinding`] per
//! row. The host renders rows from [`RowContent`] snapshots and forwards
//! user interactions through the event entry points; the controller routes
//! each to the right binding, resolves the effective delegate, and mirrors
//! every outcome onto its public signals.
//!
//! Sections are replaced wholesale via [`set_sections`]; there is no
//! incremental row patching.
//!
//! [`set_sections`]: PrefListController::set_sections

use std::sync::Arc;

use ridgeline_core::Signal;
use ridgeline_core::logging::targets;

use crate::control::{BindingState, CellBinding, ControlDisplay, ControlSignal, EditOutcome};
use crate::delegate::{LoggingDelegate, PrefDelegate};
use crate::error::{PrefError, PrefResult};
use crate::item::{PrefItem, PrefItemSection, PrefKind};
use crate::value::PrefValue;

/// An owned snapshot of everything the host needs to render one row.
#[derive(Debug, Clone, PartialEq)]
pub struct RowContent {
    /// Name shown next to the control.
    pub display_name: String,
    /// Optional subtitle.
    pub description: Option<String>,
    /// Which native control to render.
    pub kind: PrefKind,
    /// Control state describing the last committed value.
    pub display: ControlDisplay,
}

/// Controller for a sectioned preferences list.
///
/// Every edit outcome is reported twice: through the effective delegate
/// (section override or controller-wide fallback) and through the public
/// signals, so observers can subscribe without implementing the delegate
/// protocol.
///
/// # Example
///
/// ```
/// use ridgeline_prefs::{
///     ControlSignal, PrefItem, PrefItemSection, PrefKind, PrefListController, PrefValue,
/// };
///
/// let sections = vec![PrefItemSection::new(
///     "General",
///     vec![PrefItem::new("dark", "Dark Mode", PrefKind::Toggle, PrefValue::Bool(false))],
/// )];
/// let mut controller = PrefListController::new(sections);
///
/// controller
///     .control_changed(0, 0, ControlSignal::Toggle(true))
///     .unwrap();
/// assert_eq!(controller.item(0, 0).unwrap().value(), &PrefValue::Bool(true));
/// ```
pub struct PrefListController {
    sections: Vec<PrefItemSection>,
    /// One binding per item, index-aligned with `sections`.
    bindings: Vec<Vec<CellBinding>>,
    delegate: Arc<dyn PrefDelegate>,
    /// Emitted after every commit with `(key, committed value)`.
    pub value_changed: Signal<(String, PrefValue)>,
    /// Emitted for every rejected edit with the validator's message.
    pub error_reported: Signal<String>,
}

impl PrefListController {
    /// Creates a controller with the default logging delegate.
    pub fn new(sections: Vec<PrefItemSection>) -> Self {
        Self::with_delegate(sections, Arc::new(LoggingDelegate))
    }

    /// Creates a controller with an explicit controller-wide delegate.
    pub fn with_delegate(sections: Vec<PrefItemSection>, delegate: Arc<dyn PrefDelegate>) -> Self {
        let bindings = bind_sections(&sections);
        tracing::debug!(
            target: targets::LIST,
            sections = sections.len(),
            rows = bindings.iter().map(Vec::len).sum::<usize>(),
            "preferences list bound"
        );
        Self {
            sections,
            bindings,
            delegate,
            value_changed: Signal::new(),
            error_reported: Signal::new(),
        }
    }

    /// Replaces all sections and rebinds every row.
    ///
    /// Open choice pickers are abandoned; signal connections survive.
    pub fn set_sections(&mut self, sections: Vec<PrefItemSection>) {
        self.bindings = bind_sections(&sections);
        self.sections = sections;
        tracing::debug!(
            target: targets::LIST,
            sections = self.sections.len(),
            "preferences list rebound"
        );
    }

    /// The number of sections.
    pub fn section_count(&self) -> usize {
        self.sections.len()
    }

    /// The number of rows in a section, or `None` if the section index is
    /// out of bounds.
    pub fn row_count(&self, section: usize) -> Option<usize> {
        self.sections.get(section).map(PrefItemSection::len)
    }

    /// A section's title.
    pub fn section_title(&self, section: usize) -> Option<&str> {
        self.sections.get(section).map(PrefItemSection::title)
    }

    /// The sections in display order.
    pub fn sections(&self) -> &[PrefItemSection] {
        &self.sections
    }

    /// The item at the given coordinates.
    pub fn item(&self, section: usize, row: usize) -> Option<&PrefItem> {
        self.sections.get(section)?.items().get(row)
    }

    /// A render snapshot for the given row.
    pub fn row_content(&self, section: usize, row: usize) -> Option<RowContent> {
        let item = self.item(section, row)?;
        let binding = self.bindings.get(section)?.get(row)?;
        Some(RowContent {
            display_name: item.display_name().to_string(),
            description: item.description().map(str::to_string),
            kind: item.kind(),
            display: binding.display().clone(),
        })
    }

    /// The binding state of the given row.
    pub fn binding_state(&self, section: usize, row: usize) -> Option<BindingState> {
        Some(self.bindings.get(section)?.get(row)?.state())
    }

    /// Handles a raw control signal for a row and reports the outcome.
    pub fn control_changed(
        &mut self,
        section: usize,
        row: usize,
        signal: ControlSignal,
    ) -> PrefResult<EditOutcome> {
        self.check_coords(section, row)?;
        let delegate = self.effective_delegate(section);
        let binding = &mut self.bindings[section][row];
        let item = &mut self.sections[section].items_mut()[row];
        let outcome = binding.handle_signal(item, signal, delegate.as_ref());
        self.publish(section, row, &outcome);
        Ok(outcome)
    }

    /// Handles row activation (taps on choice and button rows).
    pub fn activate(&mut self, section: usize, row: usize) -> PrefResult<EditOutcome> {
        self.check_coords(section, row)?;
        let delegate = self.effective_delegate(section);
        let binding = &mut self.bindings[section][row];
        let item = &self.sections[section].items()[row];
        let outcome = binding.activate(item, delegate.as_ref());
        self.publish(section, row, &outcome);
        Ok(outcome)
    }

    /// Completes the open choice picker for a row with the chosen index.
    ///
    /// Returns [`PrefError::NoPendingChoice`] if no picker is open, which
    /// can happen when a picker callback races a section swap.
    pub fn complete_choice(
        &mut self,
        section: usize,
        row: usize,
        index: usize,
    ) -> PrefResult<EditOutcome> {
        self.check_pending_choice(section, row)?;
        let delegate = self.effective_delegate(section);
        let binding = &mut self.bindings[section][row];
        let item = &mut self.sections[section].items_mut()[row];
        let outcome = binding.complete_choice(item, index, delegate.as_ref());
        self.publish(section, row, &outcome);
        Ok(outcome)
    }

    /// Dismisses the open choice picker for a row without committing.
    pub fn cancel_choice(&mut self, section: usize, row: usize) -> PrefResult<()> {
        self.check_pending_choice(section, row)?;
        let binding = &mut self.bindings[section][row];
        let item = &self.sections[section].items()[row];
        binding.cancel_choice(item);
        Ok(())
    }

    fn check_coords(&self, section: usize, row: usize) -> PrefResult<()> {
        let items = self
            .sections
            .get(section)
            .ok_or(PrefError::InvalidSection(section))?;
        if row >= items.len() {
            return Err(PrefError::InvalidRow { section, row });
        }
        Ok(())
    }

    fn check_pending_choice(&self, section: usize, row: usize) -> PrefResult<()> {
        self.check_coords(section, row)?;
        if self.bindings[section][row].state() != BindingState::AwaitingChoice {
            return Err(PrefError::NoPendingChoice {
                key: self.sections[section].items()[row].key().to_string(),
            });
        }
        Ok(())
    }

    fn effective_delegate(&self, section: usize) -> Arc<dyn PrefDelegate> {
        self.sections[section]
            .delegate()
            .cloned()
            .unwrap_or_else(|| self.delegate.clone())
    }

    fn publish(&self, section: usize, row: usize, outcome: &EditOutcome) {
        match outcome {
            EditOutcome::Committed(value) => {
                let key = self.sections[section].items()[row].key().to_string();
                self.value_changed.emit((key, value.clone()));
            }
            EditOutcome::Rejected(message) => {
                self.error_reported.emit(message.clone());
            }
            EditOutcome::Activated | EditOutcome::ChoicePending(_) | EditOutcome::Ignored => {}
        }
    }
}

fn bind_sections(sections: &[PrefItemSection]) -> Vec<Vec<CellBinding>> {
    sections
        .iter()
        .map(|section| section.items().iter().map(CellBinding::for_item).collect())
        .collect()
}
