//! Preference items and sections.
//!
//! A [`PrefItem`] is one configurable setting: identity, control kind,
//! current value, optional choice metadata, optional validator. Items are
//! grouped into ordered, titled [`PrefItemSection`]s which the host builds
//! wholesale and hands to the list controller.

use std::fmt;
use std::sync::Arc;

use crate::delegate::PrefDelegate;
use crate::validate::PrefValidator;
use crate::value::PrefValue;

/// The closed set of control kinds.
///
/// Each kind corresponds 1:1 with a native control and determines which
/// [`PrefValue`] variant the item carries: `Toggle` holds `Bool`, `Slider`
/// holds `Float`, `Stepper` and `Choice` hold `Int` (or `Text` for
/// string-valued choices), `Range` holds `IntRange`, and `Button` holds no
/// value at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrefKind {
    /// On/off switch bound to a `Bool` value.
    Toggle,
    /// Continuous slider bound to a `Float` value.
    Slider,
    /// Discrete stepper bound to an `Int` value.
    Stepper,
    /// Single-choice picker bound to one of `actual_values`.
    Choice,
    /// Two-thumb range control bound to an `IntRange` value.
    Range,
    /// Action trigger; holds no value.
    Button,
}

impl PrefKind {
    /// Returns `true` for kinds that require aligned
    /// `display_values`/`actual_values` lists.
    pub fn requires_choices(&self) -> bool {
        matches!(self, PrefKind::Choice | PrefKind::Range)
    }
}

impl fmt::Display for PrefKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PrefKind::Toggle => "toggle",
            PrefKind::Slider => "slider",
            PrefKind::Stepper => "stepper",
            PrefKind::Choice => "choice",
            PrefKind::Range => "range",
            PrefKind::Button => "button",
        };
        write!(f, "{name}")
    }
}

/// One configurable setting.
///
/// The item's `value` is the single authoritative current value;
/// [`PrefValue::NoValue`] means "no override" and is resolved against a
/// static default at read time. The value is mutated only by the commit
/// step of the edit pipeline, never by display code.
///
/// # Example
///
/// ```
/// use ridgeline_prefs::{PrefItem, PrefKind, PrefValue};
///
/// let item = PrefItem::new("audio.volume", "Volume", PrefKind::Stepper, PrefValue::NoValue)
///     .with_default(PrefValue::Int(5))
///     .with_values(PrefValue::int_values(&[0, 10]));
///
/// assert_eq!(item.resolved(), &PrefValue::Int(5));
/// ```
pub struct PrefItem {
    /// Stable key, unique within the host's preference namespace.
    /// Uniqueness is a caller invariant; the core does not enforce it.
    key: String,
    display_name: String,
    description: Option<String>,
    kind: PrefKind,
    value: PrefValue,
    /// Static default substituted for `NoValue` at read time. Never
    /// written back into `value`.
    default: PrefValue,
    display_values: Option<Vec<String>>,
    actual_values: Option<Vec<PrefValue>>,
    validator: Option<Arc<dyn PrefValidator>>,
}

impl PrefItem {
    /// Creates an item with the given identity, kind, and current value.
    pub fn new(
        key: impl Into<String>,
        display_name: impl Into<String>,
        kind: PrefKind,
        value: PrefValue,
    ) -> Self {
        Self {
            key: key.into(),
            display_name: display_name.into(),
            description: None,
            kind,
            value,
            default: PrefValue::NoValue,
            display_values: None,
            actual_values: None,
            validator: None,
        }
    }

    /// Sets the descriptive subtitle.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the static default substituted for a `NoValue` current value.
    pub fn with_default(mut self, default: PrefValue) -> Self {
        self.default = default;
        self
    }

    /// Sets index-aligned labels and underlying values for discrete-choice
    /// kinds.
    ///
    /// # Panics
    ///
    /// Panics if the two lists differ in length.
    pub fn with_choices(mut self, display_values: Vec<String>, actual_values: Vec<PrefValue>) -> Self {
        assert_eq!(
            display_values.len(),
            actual_values.len(),
            "PrefItem '{}': display_values and actual_values must be index-aligned",
            self.key
        );
        self.display_values = Some(display_values);
        self.actual_values = Some(actual_values);
        self
    }

    /// Sets the underlying value list without labels.
    ///
    /// For `Stepper` and `Slider` items the first and last entries define
    /// the control bounds.
    pub fn with_values(mut self, actual_values: Vec<PrefValue>) -> Self {
        self.actual_values = Some(actual_values);
        self
    }

    /// Attaches a validator run against every candidate before commit.
    pub fn with_validator(mut self, validator: impl PrefValidator + 'static) -> Self {
        self.validator = Some(Arc::new(validator));
        self
    }

    /// The item's stable key.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The human-readable name shown next to the control.
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// The optional descriptive subtitle.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// The control kind.
    pub fn kind(&self) -> PrefKind {
        self.kind
    }

    /// The authoritative current value.
    pub fn value(&self) -> &PrefValue {
        &self.value
    }

    /// The static default used by [`resolved`](Self::resolved).
    pub fn default_value(&self) -> &PrefValue {
        &self.default
    }

    /// The labels for discrete choices, if any.
    pub fn display_values(&self) -> Option<&[String]> {
        self.display_values.as_deref()
    }

    /// The underlying selectable values, if any.
    pub fn actual_values(&self) -> Option<&[PrefValue]> {
        self.actual_values.as_deref()
    }

    /// The attached validator, if any.
    pub fn validator(&self) -> Option<&Arc<dyn PrefValidator>> {
        self.validator.as_ref()
    }

    /// Returns the current value, or `default` if the current value is the
    /// `NoValue` sentinel.
    pub fn resolved_value<'a>(&'a self, default: &'a PrefValue) -> &'a PrefValue {
        if self.value.is_no_value() { default } else { &self.value }
    }

    /// Returns the current value resolved against the item's own static
    /// default.
    pub fn resolved(&self) -> &PrefValue {
        self.resolved_value(&self.default)
    }

    /// Returns the index of `candidate` in `actual_values`.
    ///
    /// Matching is by same-variant equality only; a candidate of a
    /// different variant than the stored values never matches. Returns
    /// `None` when the item has no value list or the candidate is absent.
    pub fn index_of_actual_value(&self, candidate: &PrefValue) -> Option<usize> {
        self.actual_values
            .as_deref()?
            .iter()
            .position(|v| v == candidate)
    }

    /// Returns the label aligned with `candidate`'s position in
    /// `actual_values`.
    pub fn display_label_for(&self, candidate: &PrefValue) -> Option<&str> {
        let index = self.index_of_actual_value(candidate)?;
        self.display_values.as_deref()?.get(index).map(String::as_str)
    }

    /// Overwrites the current value. This is the commit step of the edit
    /// pipeline; nothing else writes to `value`.
    pub(crate) fn commit_value(&mut self, value: PrefValue) {
        self.value = value;
    }
}

impl fmt::Debug for PrefItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrefItem")
            .field("key", &self.key)
            .field("display_name", &self.display_name)
            .field("kind", &self.kind)
            .field("value", &self.value)
            .field("default", &self.default)
            .field("has_validator", &self.validator.is_some())
            .finish()
    }
}

/// A titled, ordered group of preference items.
///
/// Order is display order. Sections are rebuilt wholesale by the host, not
/// incrementally patched by the core.
pub struct PrefItemSection {
    title: String,
    items: Vec<PrefItem>,
    /// Optional delegate override; falls back to the controller-wide
    /// delegate when absent.
    delegate: Option<Arc<dyn PrefDelegate>>,
}

impl PrefItemSection {
    /// Creates a section with the given title and items.
    pub fn new(title: impl Into<String>, items: Vec<PrefItem>) -> Self {
        Self {
            title: title.into(),
            items,
            delegate: None,
        }
    }

    /// Sets a section-scoped delegate that overrides the controller's.
    pub fn with_delegate(mut self, delegate: Arc<dyn PrefDelegate>) -> Self {
        self.delegate = Some(delegate);
        self
    }

    /// The section title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// The items in display order.
    pub fn items(&self) -> &[PrefItem] {
        &self.items
    }

    /// The number of items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if the section has no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The section-scoped delegate override, if any.
    pub fn delegate(&self) -> Option<&Arc<dyn PrefDelegate>> {
        self.delegate.as_ref()
    }

    pub(crate) fn items_mut(&mut self) -> &mut [PrefItem] {
        &mut self.items
    }
}

impl fmt::Debug for PrefItemSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrefItemSection")
            .field("title", &self.title)
            .field("items", &self.items)
            .field("has_delegate", &self.delegate.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn choice_item() -> PrefItem {
        PrefItem::new("k", "Choice", PrefKind::Choice, PrefValue::Int(2)).with_choices(
            vec!["one".into(), "two".into(), "three".into()],
            PrefValue::int_values(&[1, 2, 3]),
        )
    }

    #[test]
    fn test_resolved_value_substitutes_default() {
        let item = PrefItem::new("k", "Bool", PrefKind::Toggle, PrefValue::NoValue);
        let default = PrefValue::Bool(true);
        assert_eq!(item.resolved_value(&default), &PrefValue::Bool(true));
    }

    #[test]
    fn test_resolved_value_prefers_current() {
        let item = PrefItem::new("k", "Bool", PrefKind::Toggle, PrefValue::Bool(false));
        let default = PrefValue::Bool(true);
        assert_eq!(item.resolved_value(&default), &PrefValue::Bool(false));
        // Any default is ignored when a value is set.
        assert_eq!(item.resolved_value(&PrefValue::NoValue), &PrefValue::Bool(false));
    }

    #[test]
    fn test_resolved_uses_item_default() {
        let item = PrefItem::new("k", "Bool", PrefKind::Toggle, PrefValue::NoValue)
            .with_default(PrefValue::Bool(true));
        assert_eq!(item.resolved(), &PrefValue::Bool(true));
    }

    #[test]
    fn test_index_of_actual_value() {
        let item = choice_item();
        assert_eq!(item.index_of_actual_value(&PrefValue::Int(1)), Some(0));
        assert_eq!(item.index_of_actual_value(&PrefValue::Int(3)), Some(2));
        assert_eq!(item.index_of_actual_value(&PrefValue::Int(9)), None);
        // Cross-variant queries never match.
        assert_eq!(item.index_of_actual_value(&PrefValue::Text("1".into())), None);
    }

    #[test]
    fn test_display_label_alignment() {
        let item = choice_item();
        for (i, value) in item.actual_values().unwrap().iter().enumerate() {
            let label = item.display_label_for(value).unwrap();
            assert_eq!(label, item.display_values().unwrap()[i]);
        }
    }

    #[test]
    #[should_panic(expected = "index-aligned")]
    fn test_mismatched_choices_panic() {
        let _ = PrefItem::new("k", "Bad", PrefKind::Choice, PrefValue::Int(1))
            .with_choices(vec!["a".into()], PrefValue::int_values(&[1, 2]));
    }

    #[test]
    fn test_string_valued_choices() {
        let item = PrefItem::new("k", "Theme", PrefKind::Choice, PrefValue::Text("dark".into()))
            .with_choices(
                vec!["Light".into(), "Dark".into()],
                vec![PrefValue::Text("light".into()), PrefValue::Text("dark".into())],
            );
        assert_eq!(item.index_of_actual_value(&PrefValue::Text("dark".into())), Some(1));
        assert_eq!(item.display_label_for(&PrefValue::Text("dark".into())), Some("Dark"));
    }

    #[test]
    fn test_section_accessors() {
        let section = PrefItemSection::new("General", vec![choice_item()]);
        assert_eq!(section.title(), "General");
        assert_eq!(section.len(), 1);
        assert!(!section.is_empty());
        assert!(section.delegate().is_none());
    }
}
