//! The per-row control state machine.
//!
//! A [`CellBinding`] sits between one displayed row and its [`PrefItem`].
//! It initializes the control's display from the item's resolved value,
//! converts raw control signals into typed candidates, runs the
//! validate→commit-or-revert pipeline, and reports every outcome to the
//! delegate.
//!
//! Dispatch is by the closed [`PrefKind`] enum: every `match` over
//! `(kind, signal)` is exhaustive, so adding a control kind is a
//! compile-time exercise rather than a runtime "must override" contract.
//!
//! # States
//!
//! ```text
//! Unbound → Bound → AwaitingInput → Validating → {Committed | Reverted}
//!                        ↑                              │
//!                        └──────────────────────────────┘
//! ```
//!
//! `AwaitingChoice` is entered while an external choice picker is open;
//! the row is frozen until `complete_choice` or `cancel_choice`.

use ridgeline_core::logging::targets;

use crate::delegate::PrefDelegate;
use crate::item::{PrefItem, PrefKind};
use crate::validate::ValidationOutcome;
use crate::value::PrefValue;

/// A raw signal read from a native control.
///
/// The variant must match the bound item's [`PrefKind`]; a mismatch is a
/// wiring bug in the host and fails fast.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ControlSignal {
    /// Toggle flipped.
    Toggle(bool),
    /// Slider released at a value.
    Slider(f32),
    /// Stepper stepped to a value.
    Stepper(f64),
    /// Discrete option selected by index.
    Selection(usize),
    /// Range control released at raw `(lower, upper)`.
    Range(f64, f64),
    /// Activation with no payload (buttons).
    Activate,
}

/// What the host writes to the native control.
///
/// Produced at bind time and refreshed after every commit. After a
/// rejected edit the display still describes the last committed value;
/// the host re-reads it to snap the control back.
#[derive(Debug, Clone, PartialEq)]
pub enum ControlDisplay {
    /// Switch state.
    Toggle {
        /// Whether the switch is on.
        on: bool,
    },
    /// Slider position and bounds (`None` = control default).
    Slider {
        /// Current value.
        value: f32,
        /// Minimum, from the first `actual_values` entry.
        min: Option<f32>,
        /// Maximum, from the last `actual_values` entry.
        max: Option<f32>,
    },
    /// Stepper position, bounds, and value label.
    Stepper {
        /// Current value.
        value: i64,
        /// Minimum, from the first `actual_values` entry.
        min: Option<i64>,
        /// Maximum, from the last `actual_values` entry.
        max: Option<i64>,
        /// Label text beside the stepper.
        label: String,
    },
    /// Selected-choice label.
    Choice {
        /// Label of the current selection.
        label: String,
    },
    /// Range endpoint labels, rendered "lower - upper".
    Range {
        /// Label aligned with the lower endpoint.
        lower_label: String,
        /// Label aligned with the upper endpoint.
        upper_label: String,
    },
    /// Button title.
    Button {
        /// Title text.
        title: String,
    },
}

impl ControlDisplay {
    /// The combined label for range displays, as shown in the row.
    pub fn range_label(&self) -> Option<String> {
        match self {
            ControlDisplay::Range { lower_label, upper_label } => {
                Some(format!("{lower_label} - {upper_label}"))
            }
            _ => None,
        }
    }
}

/// The lifecycle state of a cell binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BindingState {
    /// Created but not yet bound to an item.
    #[default]
    Unbound,
    /// Control initialized from the item's resolved value.
    Bound,
    /// Live and waiting for the next user interaction.
    AwaitingInput,
    /// A candidate is being validated.
    Validating,
    /// The last edit was committed.
    Committed,
    /// The last edit was rejected and the display restored.
    Reverted,
    /// An external choice picker is open; the row is frozen.
    AwaitingChoice,
}

/// A request for the host's modal choice-picker collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChoiceRequest {
    /// Picker title (the item's display name).
    pub title: String,
    /// Ordered option labels.
    pub labels: Vec<String>,
    /// Index the picker should open at.
    pub initial_index: usize,
}

/// The result of one edit cycle.
#[derive(Debug, Clone, PartialEq)]
pub enum EditOutcome {
    /// The candidate passed validation and was written to the item.
    Committed(PrefValue),
    /// The candidate was rejected; the item is untouched.
    Rejected(String),
    /// A button fired; no value was involved.
    Activated,
    /// A choice picker must be presented by the host.
    ChoicePending(ChoiceRequest),
    /// The interaction has no meaning for this control kind.
    Ignored,
}

/// Per-row controller binding a native control to a [`PrefItem`].
pub struct CellBinding {
    kind: PrefKind,
    state: BindingState,
    display: Option<ControlDisplay>,
    /// Current selection index for `Choice` kinds. Updated before commit
    /// so a synchronous re-render during commit reads the new position.
    choice_index: usize,
}

impl CellBinding {
    /// Creates an unbound binding for the given kind.
    pub fn new(kind: PrefKind) -> Self {
        Self {
            kind,
            state: BindingState::Unbound,
            display: None,
            choice_index: 0,
        }
    }

    /// Creates a binding and immediately binds it to `item`.
    pub fn for_item(item: &PrefItem) -> Self {
        let mut binding = Self::new(item.kind());
        binding.bind(item);
        binding
    }

    /// Initializes the control display from the item's resolved value.
    ///
    /// # Panics
    ///
    /// Panics if the item's kind does not match the binding, or if a
    /// `Choice`/`Range` item is missing its `display_values`/
    /// `actual_values` lists.
    pub fn bind(&mut self, item: &PrefItem) {
        assert_eq!(
            self.kind,
            item.kind(),
            "cell binding kind mismatch for '{}'",
            item.key()
        );
        if self.kind.requires_choices() {
            let labels = item.display_values().unwrap_or_else(|| {
                panic!("{} item '{}' has no display_values", self.kind, item.key())
            });
            let values = item.actual_values().unwrap_or_else(|| {
                panic!("{} item '{}' has no actual_values", self.kind, item.key())
            });
            assert_eq!(
                labels.len(),
                values.len(),
                "{} item '{}': display_values and actual_values must be index-aligned",
                self.kind,
                item.key()
            );
            assert!(
                !values.is_empty(),
                "{} item '{}' has an empty choices list",
                self.kind,
                item.key()
            );
        }
        if self.kind == PrefKind::Choice {
            self.choice_index = item
                .index_of_actual_value(item.resolved())
                .unwrap_or(0);
        }
        self.display = Some(self.compute_display(item));
        self.state = BindingState::Bound;
    }

    /// The binding's control kind.
    pub fn kind(&self) -> PrefKind {
        self.kind
    }

    /// The current lifecycle state.
    pub fn state(&self) -> BindingState {
        self.state
    }

    /// The current selection index (meaningful for `Choice` kinds).
    pub fn choice_index(&self) -> usize {
        self.choice_index
    }

    /// The display describing the last committed value.
    ///
    /// # Panics
    ///
    /// Panics if the binding is unbound.
    pub fn display(&self) -> &ControlDisplay {
        self.display
            .as_ref()
            .expect("cell binding queried before bind")
    }

    /// Handles a raw control signal: convert, validate, commit or revert.
    ///
    /// # Panics
    ///
    /// Panics if the binding is unbound, frozen behind an open picker, or
    /// the signal variant does not match the control kind.
    pub fn handle_signal(
        &mut self,
        item: &mut PrefItem,
        signal: ControlSignal,
        delegate: &dyn PrefDelegate,
    ) -> EditOutcome {
        match self.state {
            BindingState::Unbound => {
                panic!("control signal for '{}' before bind", item.key())
            }
            BindingState::AwaitingChoice => {
                panic!(
                    "control signal for '{}' while its choice picker is open",
                    item.key()
                )
            }
            _ => {}
        }
        self.state = BindingState::AwaitingInput;

        let candidate = match (self.kind, signal) {
            (PrefKind::Toggle, ControlSignal::Toggle(on)) => PrefValue::Bool(on),
            (PrefKind::Slider, ControlSignal::Slider(value)) => PrefValue::Float(value as f64),
            (PrefKind::Stepper, ControlSignal::Stepper(raw)) => {
                let mut value = raw as i64;
                // Native steppers clamp to their declared bounds; mirror
                // that for controls that report before clamping.
                if let Some(values) = item.actual_values() {
                    if let (Some(first), Some(last)) = (values.first(), values.last()) {
                        value = value.clamp(first.as_int(), last.as_int());
                    }
                }
                PrefValue::Int(value)
            }
            (PrefKind::Range, ControlSignal::Range(raw_lower, raw_upper)) => {
                let values = item.actual_values().unwrap_or_else(|| {
                    panic!("range item '{}' has no actual_values", item.key())
                });
                let lower = snap_to_actual(values, raw_lower);
                let upper = snap_to_actual(values, raw_upper);
                PrefValue::int_range(lower, upper)
            }
            (PrefKind::Choice, ControlSignal::Selection(index)) => {
                return self.select_choice(item, index, delegate);
            }
            (PrefKind::Button, ControlSignal::Activate) => {
                // Buttons hold no value: no validation, no commit, only
                // the notification.
                delegate.value_changed(&PrefValue::NoValue, item);
                self.state = BindingState::AwaitingInput;
                return EditOutcome::Activated;
            }
            (kind, signal) => panic!(
                "control signal {:?} does not match {} control for '{}'",
                signal,
                kind,
                item.key()
            ),
        };

        self.run_pipeline(item, candidate, delegate)
    }

    /// Handles row activation.
    ///
    /// Only meaningful for `Choice` (returns the picker request and
    /// freezes the row) and `Button` (fires the notification). Other
    /// kinds are driven by control signals and ignore activation.
    ///
    /// # Panics
    ///
    /// Panics if the binding is unbound or a picker is already open.
    pub fn activate(&mut self, item: &PrefItem, delegate: &dyn PrefDelegate) -> EditOutcome {
        assert!(
            self.state != BindingState::Unbound,
            "activation on unbound cell for '{}'",
            item.key()
        );
        match self.kind {
            PrefKind::Choice => {
                assert!(
                    self.state != BindingState::AwaitingChoice,
                    "choice picker already open for '{}'",
                    item.key()
                );
                let labels = item.display_values().unwrap_or_else(|| {
                    panic!("choice item '{}' has no display_values", item.key())
                });
                self.state = BindingState::AwaitingChoice;
                EditOutcome::ChoicePending(ChoiceRequest {
                    title: item.display_name().to_string(),
                    labels: labels.to_vec(),
                    initial_index: self.choice_index,
                })
            }
            PrefKind::Button => {
                delegate.value_changed(&PrefValue::NoValue, item);
                EditOutcome::Activated
            }
            _ => EditOutcome::Ignored,
        }
    }

    /// Completes an open choice picker with the chosen index.
    ///
    /// # Panics
    ///
    /// Panics if no picker is open or `index` is out of bounds for the
    /// item's `actual_values`.
    pub fn complete_choice(
        &mut self,
        item: &mut PrefItem,
        index: usize,
        delegate: &dyn PrefDelegate,
    ) -> EditOutcome {
        assert_eq!(
            self.state,
            BindingState::AwaitingChoice,
            "no choice picker open for '{}'",
            item.key()
        );
        self.state = BindingState::AwaitingInput;
        self.select_choice(item, index, delegate)
    }

    /// Cancels an open choice picker. No commit, no revert.
    pub fn cancel_choice(&mut self, item: &PrefItem) {
        assert_eq!(
            self.state,
            BindingState::AwaitingChoice,
            "no choice picker open for '{}'",
            item.key()
        );
        self.state = BindingState::Bound;
    }

    fn select_choice(
        &mut self,
        item: &mut PrefItem,
        index: usize,
        delegate: &dyn PrefDelegate,
    ) -> EditOutcome {
        let candidate = {
            let values = item.actual_values().unwrap_or_else(|| {
                panic!("choice item '{}' has no actual_values", item.key())
            });
            assert!(
                index < values.len(),
                "no option at index {index} for '{}'",
                item.key()
            );
            values[index].clone()
        };
        // Record the index before committing: commit can trigger a
        // synchronous re-render that reads it.
        self.choice_index = index;
        self.run_pipeline(item, candidate, delegate)
    }

    fn run_pipeline(
        &mut self,
        item: &mut PrefItem,
        candidate: PrefValue,
        delegate: &dyn PrefDelegate,
    ) -> EditOutcome {
        self.state = BindingState::Validating;

        let validator = item.validator().cloned();
        if let Some(validator) = validator {
            if let ValidationOutcome::Failed(message) = validator.validate(&candidate) {
                self.revert(item);
                self.state = BindingState::Reverted;
                tracing::debug!(
                    target: targets::CONTROL,
                    key = item.key(),
                    candidate = %candidate,
                    reason = %message,
                    "edit rejected"
                );
                delegate.display_error(&message);
                self.state = BindingState::AwaitingInput;
                return EditOutcome::Rejected(message);
            }
        }

        item.commit_value(candidate.clone());
        self.display = Some(self.compute_display(item));
        self.state = BindingState::Committed;
        tracing::debug!(
            target: targets::CONTROL,
            key = item.key(),
            name = item.display_name(),
            value = %candidate,
            "edit committed"
        );
        // The value is already written; the delegate observes it in place.
        delegate.value_changed(&candidate, item);
        self.state = BindingState::AwaitingInput;
        EditOutcome::Committed(candidate)
    }

    /// Restores binding state tied to the last committed value. The stored
    /// display was never advanced past that value, so only the choice
    /// index needs recomputing.
    fn revert(&mut self, item: &PrefItem) {
        if self.kind == PrefKind::Choice {
            self.choice_index = item
                .index_of_actual_value(item.resolved())
                .unwrap_or(0);
        }
    }

    fn compute_display(&self, item: &PrefItem) -> ControlDisplay {
        let resolved = item.resolved();
        match self.kind {
            PrefKind::Toggle => ControlDisplay::Toggle {
                on: resolved.as_bool(),
            },
            PrefKind::Slider => {
                let bounds = item.actual_values();
                ControlDisplay::Slider {
                    value: resolved.as_float() as f32,
                    min: bounds.and_then(|v| v.first()).map(|v| v.as_float() as f32),
                    max: bounds.and_then(|v| v.last()).map(|v| v.as_float() as f32),
                }
            }
            PrefKind::Stepper => {
                let value = resolved.as_int();
                let bounds = item.actual_values();
                let label = item
                    .display_label_for(&PrefValue::Int(value))
                    .map(str::to_string)
                    .unwrap_or_else(|| value.to_string());
                ControlDisplay::Stepper {
                    value,
                    min: bounds.and_then(|v| v.first()).map(|v| v.as_int()),
                    max: bounds.and_then(|v| v.last()).map(|v| v.as_int()),
                    label,
                }
            }
            PrefKind::Choice => {
                let labels = item.display_values().unwrap_or_else(|| {
                    panic!("choice item '{}' has no display_values", item.key())
                });
                assert!(
                    self.choice_index < labels.len(),
                    "selection index {} out of bounds for '{}'",
                    self.choice_index,
                    item.key()
                );
                ControlDisplay::Choice {
                    label: labels[self.choice_index].clone(),
                }
            }
            PrefKind::Range => {
                let values = item.actual_values().unwrap_or_else(|| {
                    panic!("range item '{}' has no actual_values", item.key())
                });
                assert!(
                    !values.is_empty(),
                    "range item '{}' has an empty actual_values list",
                    item.key()
                );
                // A NoValue range with no default spans the full interval.
                let (lower, upper) = if resolved.is_no_value() {
                    (values[0].as_int(), values[values.len() - 1].as_int())
                } else {
                    resolved.as_int_range()
                };
                ControlDisplay::Range {
                    lower_label: range_endpoint_label(item, lower),
                    upper_label: range_endpoint_label(item, upper),
                }
            }
            PrefKind::Button => ControlDisplay::Button {
                title: item.display_name().to_string(),
            },
        }
    }
}

fn range_endpoint_label(item: &PrefItem, endpoint: i64) -> String {
    item.display_label_for(&PrefValue::Int(endpoint))
        .map(str::to_string)
        .unwrap_or_else(|| {
            panic!(
                "range item '{}' has no label aligned with {endpoint}",
                item.key()
            )
        })
}

/// Snaps a raw control value to the nearest entry in `values`.
///
/// Ties round toward the lower index, so the result is deterministic
/// across platforms.
fn snap_to_actual(values: &[PrefValue], raw: f64) -> i64 {
    assert!(!values.is_empty(), "cannot snap against an empty value list");
    let mut best = values[0].as_int();
    let mut best_distance = (raw - best as f64).abs();
    for value in &values[1..] {
        let candidate = value.as_int();
        let distance = (raw - candidate as f64).abs();
        if distance < best_distance {
            best = candidate;
            best_distance = distance;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validate::FnValidator;
    use parking_lot::Mutex;

    /// Records every delegate callback, capturing the item's value at the
    /// moment `value_changed` fires so commit ordering can be asserted.
    #[derive(Default)]
    struct RecordingDelegate {
        changes: Mutex<Vec<(PrefValue, PrefValue)>>, // (notified, item value at callback)
        errors: Mutex<Vec<String>>,
    }

    impl PrefDelegate for RecordingDelegate {
        fn value_changed(&self, value: &PrefValue, item: &PrefItem) {
            self.changes
                .lock()
                .push((value.clone(), item.value().clone()));
        }

        fn display_error(&self, message: &str) {
            self.errors.lock().push(message.to_string());
        }
    }

    fn toggle_item(value: PrefValue) -> PrefItem {
        PrefItem::new("t", "Toggle", PrefKind::Toggle, value).with_default(PrefValue::Bool(true))
    }

    #[test]
    fn test_toggle_bind_resolves_default() {
        let item = toggle_item(PrefValue::NoValue);
        let binding = CellBinding::for_item(&item);
        assert_eq!(binding.display(), &ControlDisplay::Toggle { on: true });
        assert_eq!(binding.state(), BindingState::Bound);
    }

    #[test]
    fn test_toggle_commit_and_ordering() {
        let mut item = toggle_item(PrefValue::NoValue);
        let mut binding = CellBinding::for_item(&item);
        let delegate = RecordingDelegate::default();

        let outcome = binding.handle_signal(&mut item, ControlSignal::Toggle(false), &delegate);

        assert_eq!(outcome, EditOutcome::Committed(PrefValue::Bool(false)));
        assert_eq!(item.value(), &PrefValue::Bool(false));
        // The item's value was already written when the callback fired.
        let changes = delegate.changes.lock();
        assert_eq!(
            *changes,
            vec![(PrefValue::Bool(false), PrefValue::Bool(false))]
        );
        assert_eq!(binding.display(), &ControlDisplay::Toggle { on: false });
        assert_eq!(binding.state(), BindingState::AwaitingInput);
    }

    #[test]
    fn test_rejection_reverts_and_reports_once() {
        let mut item = PrefItem::new("t", "Toggle", PrefKind::Toggle, PrefValue::Bool(true))
            .with_validator(FnValidator::new(|_| ValidationOutcome::failed("bad")));
        let mut binding = CellBinding::for_item(&item);
        let delegate = RecordingDelegate::default();

        let outcome = binding.handle_signal(&mut item, ControlSignal::Toggle(false), &delegate);

        assert_eq!(outcome, EditOutcome::Rejected("bad".into()));
        assert_eq!(item.value(), &PrefValue::Bool(true));
        assert!(delegate.changes.lock().is_empty());
        assert_eq!(*delegate.errors.lock(), vec!["bad".to_string()]);
        // Display still describes the committed value.
        assert_eq!(binding.display(), &ControlDisplay::Toggle { on: true });
    }

    #[test]
    fn test_commit_without_validator_is_unconditional() {
        let mut item = PrefItem::new("s", "Slider", PrefKind::Slider, PrefValue::Float(0.5));
        let mut binding = CellBinding::for_item(&item);
        let delegate = RecordingDelegate::default();

        let outcome = binding.handle_signal(&mut item, ControlSignal::Slider(0.25), &delegate);
        assert_eq!(outcome, EditOutcome::Committed(PrefValue::Float(0.25)));
    }

    #[test]
    fn test_stepper_clamps_to_bounds() {
        let mut item = PrefItem::new("i", "Int 1-6", PrefKind::Stepper, PrefValue::Int(3))
            .with_values(PrefValue::int_values(&[1, 6]));
        let mut binding = CellBinding::for_item(&item);
        let delegate = RecordingDelegate::default();

        match binding.display() {
            ControlDisplay::Stepper { value, min, max, label } => {
                assert_eq!(*value, 3);
                assert_eq!(*min, Some(1));
                assert_eq!(*max, Some(6));
                assert_eq!(label, "3");
            }
            other => panic!("unexpected display {other:?}"),
        }

        let outcome = binding.handle_signal(&mut item, ControlSignal::Stepper(10.0), &delegate);
        assert_eq!(outcome, EditOutcome::Committed(PrefValue::Int(6)));
        assert_eq!(item.value(), &PrefValue::Int(6));
    }

    #[test]
    fn test_stepper_label_uses_aligned_display_values() {
        let mut item = PrefItem::new("i", "Speed", PrefKind::Stepper, PrefValue::Int(1))
            .with_choices(
                vec!["slow".into(), "fast".into()],
                PrefValue::int_values(&[1, 2]),
            );
        let mut binding = CellBinding::for_item(&item);
        let delegate = RecordingDelegate::default();

        binding.handle_signal(&mut item, ControlSignal::Stepper(2.0), &delegate);
        match binding.display() {
            ControlDisplay::Stepper { label, .. } => assert_eq!(label, "fast"),
            other => panic!("unexpected display {other:?}"),
        }
    }

    fn range_item() -> PrefItem {
        PrefItem::new("r", "Range", PrefKind::Range, PrefValue::NoValue).with_choices(
            vec!["a".into(), "b".into(), "c".into(), "d".into(), "e".into()],
            PrefValue::int_values(&[1, 2, 3, 4, 5]),
        )
    }

    #[test]
    fn test_range_commit_snaps_and_labels() {
        let mut item = range_item();
        let mut binding = CellBinding::for_item(&item);
        let delegate = RecordingDelegate::default();

        let outcome =
            binding.handle_signal(&mut item, ControlSignal::Range(2.0, 4.0), &delegate);
        assert_eq!(outcome, EditOutcome::Committed(PrefValue::int_range(2, 4)));
        assert_eq!(item.value(), &PrefValue::int_range(2, 4));
        assert_eq!(binding.display().range_label(), Some("b - d".to_string()));
    }

    #[test]
    fn test_range_snap_rounds_to_nearest() {
        let mut item = range_item();
        let mut binding = CellBinding::for_item(&item);
        let delegate = RecordingDelegate::default();

        let outcome =
            binding.handle_signal(&mut item, ControlSignal::Range(1.9, 4.2), &delegate);
        assert_eq!(outcome, EditOutcome::Committed(PrefValue::int_range(2, 4)));
    }

    #[test]
    fn test_range_snap_tie_breaks_toward_lower_index() {
        // 2.5 is equidistant between 2 and 3: the lower index wins.
        let values = PrefValue::int_values(&[1, 2, 3, 4, 5]);
        assert_eq!(snap_to_actual(&values, 2.5), 2);
        assert_eq!(snap_to_actual(&values, 4.5), 4);
    }

    #[test]
    fn test_unbound_range_spans_full_interval() {
        let item = range_item();
        let binding = CellBinding::for_item(&item);
        assert_eq!(binding.display().range_label(), Some("a - e".to_string()));
    }

    fn choice_item() -> PrefItem {
        PrefItem::new("c", "Quality", PrefKind::Choice, PrefValue::Int(2)).with_choices(
            vec!["low".into(), "medium".into(), "high".into()],
            PrefValue::int_values(&[1, 2, 3]),
        )
    }

    #[test]
    fn test_choice_activation_and_completion() {
        let mut item = choice_item();
        let mut binding = CellBinding::for_item(&item);
        let delegate = RecordingDelegate::default();

        let outcome = binding.activate(&item, &delegate);
        let request = match outcome {
            EditOutcome::ChoicePending(request) => request,
            other => panic!("unexpected outcome {other:?}"),
        };
        assert_eq!(request.title, "Quality");
        assert_eq!(request.labels, vec!["low", "medium", "high"]);
        assert_eq!(request.initial_index, 1);
        assert_eq!(binding.state(), BindingState::AwaitingChoice);

        let outcome = binding.complete_choice(&mut item, 2, &delegate);
        assert_eq!(outcome, EditOutcome::Committed(PrefValue::Int(3)));
        assert_eq!(binding.choice_index(), 2);
        assert_eq!(
            binding.display(),
            &ControlDisplay::Choice { label: "high".into() }
        );

        // Re-opening starts at the committed position.
        let outcome = binding.activate(&item, &delegate);
        match outcome {
            EditOutcome::ChoicePending(request) => assert_eq!(request.initial_index, 2),
            other => panic!("unexpected outcome {other:?}"),
        }
    }

    #[test]
    fn test_selection_signal_commits_without_picker() {
        // Hosts with inline segmented controls send Selection directly.
        let mut item = choice_item();
        let mut binding = CellBinding::for_item(&item);
        let delegate = RecordingDelegate::default();

        let outcome = binding.handle_signal(&mut item, ControlSignal::Selection(0), &delegate);
        assert_eq!(outcome, EditOutcome::Committed(PrefValue::Int(1)));
        assert_eq!(binding.choice_index(), 0);
        assert_eq!(
            binding.display(),
            &ControlDisplay::Choice { label: "low".into() }
        );
    }

    #[test]
    fn test_choice_rejection_restores_index() {
        let mut item = PrefItem::new("c", "Quality", PrefKind::Choice, PrefValue::Int(2))
            .with_choices(
                vec!["low".into(), "medium".into(), "high".into()],
                PrefValue::int_values(&[1, 2, 3]),
            )
            .with_validator(FnValidator::new(|v: &PrefValue| {
                if v == &PrefValue::Int(3) {
                    ValidationOutcome::failed("high is locked")
                } else {
                    ValidationOutcome::Passed
                }
            }));
        let mut binding = CellBinding::for_item(&item);
        let delegate = RecordingDelegate::default();

        binding.activate(&item, &delegate);
        let outcome = binding.complete_choice(&mut item, 2, &delegate);
        assert_eq!(outcome, EditOutcome::Rejected("high is locked".into()));
        assert_eq!(item.value(), &PrefValue::Int(2));
        // The index snaps back to the committed selection.
        assert_eq!(binding.choice_index(), 1);
        assert_eq!(
            binding.display(),
            &ControlDisplay::Choice { label: "medium".into() }
        );
    }

    #[test]
    fn test_choice_cancel_is_noop() {
        let mut item = choice_item();
        let mut binding = CellBinding::for_item(&item);
        let delegate = RecordingDelegate::default();

        binding.activate(&item, &delegate);
        binding.cancel_choice(&item);
        assert_eq!(binding.state(), BindingState::Bound);
        assert_eq!(item.value(), &PrefValue::Int(2));
        assert!(delegate.changes.lock().is_empty());
        assert!(delegate.errors.lock().is_empty());
    }

    #[test]
    fn test_button_activation_fires_notification_only() {
        let mut item = PrefItem::new("b", "Reset", PrefKind::Button, PrefValue::NoValue);
        let mut binding = CellBinding::for_item(&item);
        let delegate = RecordingDelegate::default();

        assert_eq!(
            binding.display(),
            &ControlDisplay::Button { title: "Reset".into() }
        );
        let outcome = binding.activate(&item, &delegate);
        assert_eq!(outcome, EditOutcome::Activated);
        assert_eq!(item.value(), &PrefValue::NoValue);
        assert_eq!(
            *delegate.changes.lock(),
            vec![(PrefValue::NoValue, PrefValue::NoValue)]
        );

        // The same notification fires through the signal path.
        let outcome = binding.handle_signal(&mut item, ControlSignal::Activate, &delegate);
        assert_eq!(outcome, EditOutcome::Activated);
        assert_eq!(delegate.changes.lock().len(), 2);
    }

    #[test]
    fn test_activation_is_inert_for_continuous_kinds() {
        let item = toggle_item(PrefValue::Bool(true));
        let mut binding = CellBinding::for_item(&item);
        let delegate = RecordingDelegate::default();
        assert_eq!(binding.activate(&item, &delegate), EditOutcome::Ignored);
    }

    #[test]
    #[should_panic(expected = "before bind")]
    fn test_signal_on_unbound_cell_panics() {
        let mut item = toggle_item(PrefValue::Bool(true));
        let mut binding = CellBinding::new(PrefKind::Toggle);
        let delegate = RecordingDelegate::default();
        binding.handle_signal(&mut item, ControlSignal::Toggle(false), &delegate);
    }

    #[test]
    #[should_panic(expected = "does not match")]
    fn test_mismatched_signal_panics() {
        let mut item = toggle_item(PrefValue::Bool(true));
        let mut binding = CellBinding::for_item(&item);
        let delegate = RecordingDelegate::default();
        binding.handle_signal(&mut item, ControlSignal::Slider(0.5), &delegate);
    }

    #[test]
    #[should_panic(expected = "no option at index")]
    fn test_choice_completion_out_of_bounds_panics() {
        let mut item = choice_item();
        let mut binding = CellBinding::for_item(&item);
        let delegate = RecordingDelegate::default();
        binding.activate(&item, &delegate);
        binding.complete_choice(&mut item, 7, &delegate);
    }

    #[test]
    #[should_panic(expected = "has no display_values")]
    fn test_choice_without_choices_panics_at_bind() {
        let item = PrefItem::new("c", "Broken", PrefKind::Choice, PrefValue::Int(1));
        let _ = CellBinding::for_item(&item);
    }

    #[test]
    #[should_panic(expected = "has no display_values")]
    fn test_range_with_values_only_panics_at_bind() {
        let item = PrefItem::new("r", "Broken", PrefKind::Range, PrefValue::NoValue)
            .with_values(PrefValue::int_values(&[1, 2, 3]));
        let _ = CellBinding::for_item(&item);
    }

    #[test]
    #[should_panic(expected = "index-aligned")]
    fn test_desynced_choice_lists_panic_at_bind() {
        // with_values after with_choices can leave the lists out of step.
        let item = PrefItem::new("r", "Broken", PrefKind::Range, PrefValue::NoValue)
            .with_choices(
                vec!["a".into(), "b".into(), "c".into()],
                PrefValue::int_values(&[1, 2, 3]),
            )
            .with_values(PrefValue::int_values(&[1, 2]));
        let _ = CellBinding::for_item(&item);
    }
}
