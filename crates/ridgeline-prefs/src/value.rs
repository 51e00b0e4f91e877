//! The tagged-union value model for preferences.
//!
//! [`PrefValue`] is the single currency of the preferences core: every
//! control reads and writes one, every validator inspects one, and every
//! delegate notification carries one. The variant set is closed; adding a
//! new preference payload kind means adding a variant here and letting the
//! compiler point at every match that must learn about it.

use std::fmt;

/// A typed preference payload.
///
/// Exactly one variant is active. [`PrefValue::NoValue`] is a first-class
/// sentinel meaning "no override; defer to the default" and is distinct
/// from `Bool(false)` or `Int(0)`.
///
/// # Accessors
///
/// The `as_*` accessors panic on a variant mismatch. A mismatch means the
/// caller asked for the wrong payload kind for the item's declared control
/// kind, which is a construction bug in the host application, not a user
/// condition. The `try_as_*` accessors are the non-panicking form for code
/// that genuinely does not know the variant.
///
/// # Example
///
/// ```
/// use ridgeline_prefs::PrefValue;
///
/// let v = PrefValue::Int(3);
/// assert_eq!(v.as_int(), 3);
/// assert!(v.try_as_bool().is_none());
/// assert!(!v.is_no_value());
/// ```
#[derive(Debug, Clone, Default)]
pub enum PrefValue {
    /// A boolean payload (toggle controls).
    Bool(bool),
    /// An integer payload (stepper and choice controls).
    Int(i64),
    /// A floating-point payload (slider controls).
    Float(f64),
    /// A string payload (choice controls with string-valued options).
    Text(String),
    /// An inclusive integer interval (range controls).
    IntRange {
        /// Lower endpoint (inclusive).
        lower: i64,
        /// Upper endpoint (inclusive).
        upper: i64,
    },
    /// No override; defer to the default at read time.
    #[default]
    NoValue,
}

impl PrefValue {
    /// Creates an `IntRange` value, normalizing endpoint order.
    pub fn int_range(lower: i64, upper: i64) -> Self {
        Self::IntRange {
            lower: lower.min(upper),
            upper: lower.max(upper),
        }
    }

    /// Maps a slice of integers to `Int` values.
    ///
    /// Convenience for building `actual_values` lists.
    pub fn int_values(values: &[i64]) -> Vec<PrefValue> {
        values.iter().map(|&v| PrefValue::Int(v)).collect()
    }

    /// Returns `true` if this is the `NoValue` sentinel.
    pub fn is_no_value(&self) -> bool {
        matches!(self, PrefValue::NoValue)
    }

    /// Returns the name of the active variant, for diagnostics.
    pub fn variant_name(&self) -> &'static str {
        match self {
            PrefValue::Bool(_) => "Bool",
            PrefValue::Int(_) => "Int",
            PrefValue::Float(_) => "Float",
            PrefValue::Text(_) => "Text",
            PrefValue::IntRange { .. } => "IntRange",
            PrefValue::NoValue => "NoValue",
        }
    }

    /// Returns the boolean payload.
    ///
    /// # Panics
    ///
    /// Panics if the active variant is not `Bool`.
    pub fn as_bool(&self) -> bool {
        match self {
            PrefValue::Bool(v) => *v,
            other => panic!("PrefValue: expected Bool, found {}", other.variant_name()),
        }
    }

    /// Returns the integer payload.
    ///
    /// # Panics
    ///
    /// Panics if the active variant is not `Int`.
    pub fn as_int(&self) -> i64 {
        match self {
            PrefValue::Int(v) => *v,
            other => panic!("PrefValue: expected Int, found {}", other.variant_name()),
        }
    }

    /// Returns the floating-point payload.
    ///
    /// # Panics
    ///
    /// Panics if the active variant is not `Float`.
    pub fn as_float(&self) -> f64 {
        match self {
            PrefValue::Float(v) => *v,
            other => panic!("PrefValue: expected Float, found {}", other.variant_name()),
        }
    }

    /// Returns the string payload.
    ///
    /// # Panics
    ///
    /// Panics if the active variant is not `Text`.
    pub fn as_str(&self) -> &str {
        match self {
            PrefValue::Text(v) => v.as_str(),
            other => panic!("PrefValue: expected Text, found {}", other.variant_name()),
        }
    }

    /// Returns the `(lower, upper)` endpoints of the range payload.
    ///
    /// # Panics
    ///
    /// Panics if the active variant is not `IntRange`.
    pub fn as_int_range(&self) -> (i64, i64) {
        match self {
            PrefValue::IntRange { lower, upper } => (*lower, *upper),
            other => panic!("PrefValue: expected IntRange, found {}", other.variant_name()),
        }
    }

    /// Non-panicking form of [`as_bool`](Self::as_bool).
    pub fn try_as_bool(&self) -> Option<bool> {
        match self {
            PrefValue::Bool(v) => Some(*v),
            _ => None,
        }
    }

    /// Non-panicking form of [`as_int`](Self::as_int).
    pub fn try_as_int(&self) -> Option<i64> {
        match self {
            PrefValue::Int(v) => Some(*v),
            _ => None,
        }
    }

    /// Non-panicking form of [`as_float`](Self::as_float).
    pub fn try_as_float(&self) -> Option<f64> {
        match self {
            PrefValue::Float(v) => Some(*v),
            _ => None,
        }
    }

    /// Non-panicking form of [`as_str`](Self::as_str).
    pub fn try_as_str(&self) -> Option<&str> {
        match self {
            PrefValue::Text(v) => Some(v.as_str()),
            _ => None,
        }
    }

    /// Non-panicking form of [`as_int_range`](Self::as_int_range).
    pub fn try_as_int_range(&self) -> Option<(i64, i64)> {
        match self {
            PrefValue::IntRange { lower, upper } => Some((*lower, *upper)),
            _ => None,
        }
    }

    /// Maps the value to its persistence-neutral representation.
    ///
    /// `NoValue` maps to `None`, which hosts should treat as "remove the
    /// stored override". The core never touches platform preference
    /// storage itself.
    pub fn to_persistable(&self) -> Option<PersistValue> {
        match self {
            PrefValue::Bool(v) => Some(PersistValue::Bool(*v)),
            PrefValue::Int(v) => Some(PersistValue::Int(*v)),
            PrefValue::Float(v) => Some(PersistValue::Float(*v)),
            PrefValue::Text(v) => Some(PersistValue::Text(v.clone())),
            PrefValue::IntRange { lower, upper } => Some(PersistValue::IntPair(*lower, *upper)),
            PrefValue::NoValue => None,
        }
    }
}

// Equality is by variant and payload. Floats compare by bit pattern so the
// type can be used directly in assertions; the core never does arithmetic
// on stored floats, it only round-trips what controls report.
impl PartialEq for PrefValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (PrefValue::Bool(a), PrefValue::Bool(b)) => a == b,
            (PrefValue::Int(a), PrefValue::Int(b)) => a == b,
            (PrefValue::Float(a), PrefValue::Float(b)) => a.to_bits() == b.to_bits(),
            (PrefValue::Text(a), PrefValue::Text(b)) => a == b,
            (
                PrefValue::IntRange { lower: al, upper: au },
                PrefValue::IntRange { lower: bl, upper: bu },
            ) => al == bl && au == bu,
            (PrefValue::NoValue, PrefValue::NoValue) => true,
            _ => false,
        }
    }
}

impl Eq for PrefValue {}

impl fmt::Display for PrefValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PrefValue::Bool(v) => write!(f, "{v}"),
            PrefValue::Int(v) => write!(f, "{v}"),
            PrefValue::Float(v) => write!(f, "{v}"),
            PrefValue::Text(v) => write!(f, "{v}"),
            PrefValue::IntRange { lower, upper } => write!(f, "{lower} - {upper}"),
            PrefValue::NoValue => write!(f, "(no value)"),
        }
    }
}

impl From<bool> for PrefValue {
    fn from(v: bool) -> Self {
        PrefValue::Bool(v)
    }
}

impl From<i64> for PrefValue {
    fn from(v: i64) -> Self {
        PrefValue::Int(v)
    }
}

impl From<i32> for PrefValue {
    fn from(v: i32) -> Self {
        PrefValue::Int(v as i64)
    }
}

impl From<f64> for PrefValue {
    fn from(v: f64) -> Self {
        PrefValue::Float(v)
    }
}

impl From<f32> for PrefValue {
    fn from(v: f32) -> Self {
        PrefValue::Float(v as f64)
    }
}

impl From<&str> for PrefValue {
    fn from(v: &str) -> Self {
        PrefValue::Text(v.to_string())
    }
}

impl From<String> for PrefValue {
    fn from(v: String) -> Self {
        PrefValue::Text(v)
    }
}

impl From<(i64, i64)> for PrefValue {
    fn from((lower, upper): (i64, i64)) -> Self {
        PrefValue::int_range(lower, upper)
    }
}

/// A persistence-layer-neutral value.
///
/// This is what a host writes to whatever store it uses. An absent value
/// (`PrefValue::NoValue`) is represented by `to_persistable` returning
/// `None` rather than by a variant here.
#[derive(Debug, Clone, PartialEq)]
pub enum PersistValue {
    /// A boolean.
    Bool(bool),
    /// An integer.
    Int(i64),
    /// A floating-point number.
    Float(f64),
    /// A string.
    Text(String),
    /// A two-integer array `[lower, upper]`.
    IntPair(i64, i64),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessor_round_trip() {
        assert!(PrefValue::Bool(true).as_bool());
        assert_eq!(PrefValue::Int(-7).as_int(), -7);
        assert_eq!(PrefValue::Float(2.5).as_float(), 2.5);
        assert_eq!(PrefValue::Text("hi".into()).as_str(), "hi");
        assert_eq!(PrefValue::int_range(2, 4).as_int_range(), (2, 4));
    }

    #[test]
    fn test_no_value_is_distinct() {
        assert!(PrefValue::NoValue.is_no_value());
        assert!(!PrefValue::Bool(false).is_no_value());
        assert!(!PrefValue::Int(0).is_no_value());
        assert_eq!(PrefValue::NoValue, PrefValue::NoValue);
        assert_ne!(PrefValue::NoValue, PrefValue::Bool(false));
    }

    #[test]
    #[should_panic(expected = "expected Bool")]
    fn test_accessor_mismatch_panics() {
        PrefValue::Int(1).as_bool();
    }

    #[test]
    #[should_panic(expected = "expected IntRange")]
    fn test_range_accessor_mismatch_panics() {
        PrefValue::NoValue.as_int_range();
    }

    #[test]
    fn test_try_accessors() {
        assert_eq!(PrefValue::Int(5).try_as_int(), Some(5));
        assert_eq!(PrefValue::Int(5).try_as_bool(), None);
        assert_eq!(PrefValue::NoValue.try_as_float(), None);
    }

    #[test]
    fn test_int_range_normalizes_order() {
        assert_eq!(PrefValue::int_range(4, 2), PrefValue::int_range(2, 4));
    }

    #[test]
    fn test_to_persistable() {
        assert_eq!(
            PrefValue::Bool(true).to_persistable(),
            Some(PersistValue::Bool(true))
        );
        assert_eq!(
            PrefValue::int_range(1, 9).to_persistable(),
            Some(PersistValue::IntPair(1, 9))
        );
        assert_eq!(
            PrefValue::Text("x".into()).to_persistable(),
            Some(PersistValue::Text("x".into()))
        );
        assert_eq!(PrefValue::NoValue.to_persistable(), None);
    }

    #[test]
    fn test_int_values() {
        assert_eq!(
            PrefValue::int_values(&[1, 2]),
            vec![PrefValue::Int(1), PrefValue::Int(2)]
        );
    }

    #[test]
    fn test_from_impls() {
        assert_eq!(PrefValue::from(true), PrefValue::Bool(true));
        assert_eq!(PrefValue::from(3i64), PrefValue::Int(3));
        assert_eq!(PrefValue::from(1.5f64), PrefValue::Float(1.5));
        assert_eq!(PrefValue::from("a"), PrefValue::Text("a".into()));
        assert_eq!(PrefValue::from((5, 2)), PrefValue::int_range(2, 5));
    }
}
