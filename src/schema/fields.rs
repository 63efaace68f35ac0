use std::fmt;

/// How a raw field value is coerced before validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Truncating parse: `"5.9"` becomes `5`.
    Integer,
    /// Floating parse.
    Number,
}

/// The range a coerced value must fall in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Bound {
    /// `v > 0`
    Positive,
    /// `v >= min`
    AtLeast(f64),
    /// `0 <= v < 1`
    UnitInterval,
}

impl Bound {
    pub fn contains(self, value: f64) -> bool {
        match self {
            Self::Positive => value > 0.0,
            Self::AtLeast(min) => value >= min,
            Self::UnitInterval => (0.0..1.0).contains(&value),
        }
    }
}

impl fmt::Display for Bound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Positive => write!(f, "> 0"),
            Self::AtLeast(min) => write!(f, ">= {min}"),
            Self::UnitInterval => write!(f, "in [0, 1)"),
        }
    }
}

/// A single hyperparameter the operator has to provide.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldSpec {
    /// Key the raw value is collected under.
    pub key: &'static str,
    /// Name the value is sent under.
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub bound: Bound,
    /// Suggested prefill. Never substituted for a missing value.
    pub default: f64,
}

impl FieldSpec {
    pub const fn integer(
        key: &'static str,
        name: &'static str,
        label: &'static str,
        bound: Bound,
        default: f64,
    ) -> Self {
        Self {
            key,
            name,
            label,
            kind: FieldKind::Integer,
            bound,
            default,
        }
    }

    pub const fn number(
        key: &'static str,
        name: &'static str,
        label: &'static str,
        bound: Bound,
        default: f64,
    ) -> Self {
        Self {
            key,
            name,
            label,
            kind: FieldKind::Number,
            bound,
            default,
        }
    }
}
