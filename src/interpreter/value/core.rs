use crate::{
    error::{EvalError, EvalResult},
    interpreter::value::unit::Unit,
    util::num::round_for_display,
};

/// A number with an optional unit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quantity {
    /// The numeric value, expressed in `unit`.
    pub magnitude: f64,
    /// The unit, or `None` for a plain number.
    pub unit:      Option<&'static Unit>,
}

impl Quantity {
    /// A plain number without unit.
    #[must_use]
    pub const fn plain(magnitude: f64) -> Self {
        Self { magnitude,
               unit: None }
    }

    /// A number expressed in `unit`.
    #[must_use]
    pub const fn with_unit(magnitude: f64, unit: &'static Unit) -> Self {
        Self { magnitude,
               unit: Some(unit) }
    }

    /// Expresses this quantity in `target`, which must share its dimension.
    ///
    /// A plain number simply adopts the target unit.
    ///
    /// # Errors
    /// Returns [`EvalError::IncompatibleUnits`] if the dimensions differ.
    pub fn convert_to(self, target: &'static Unit) -> EvalResult<Self> {
        match self.unit {
            None => Ok(Self::with_unit(self.magnitude, target)),
            Some(unit) if unit.dimension == target.dimension => {
                Ok(Self::with_unit(target.from_base(unit.to_base(self.magnitude)), target))
            },
            Some(unit) => Err(EvalError::IncompatibleUnits { left:  unit.symbol.to_string(),
                                                             right: target.symbol.to_string(), }),
        }
    }
}

/// Represents a computed value.
///
/// This enum models every type a line of the document can evaluate to.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// A boolean value, produced by comparisons and boolean literals.
    Bool(bool),
    /// A number, possibly carrying a unit.
    Number(Quantity),
    /// A percentage such as `15%`, stored as `15.0`.
    Percentage(f64),
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Number(Quantity::plain(v))
    }
}

impl From<Quantity> for Value {
    fn from(q: Quantity) -> Self {
        Self::Number(q)
    }
}

impl Value {
    /// Returns the quantity, or an error if the value is not a number.
    ///
    /// Percentages are converted to plain fractions (`50%` becomes `0.5`).
    ///
    /// # Errors
    /// Returns [`EvalError::ExpectedNumber`] for booleans.
    pub fn as_quantity(&self) -> EvalResult<Quantity> {
        match self {
            Self::Number(q) => Ok(*q),
            Self::Percentage(p) => Ok(Quantity::plain(p / 100.0)),
            Self::Bool(_) => Err(EvalError::ExpectedNumber),
        }
    }

    /// Returns the boolean, or an error if the value is not a boolean.
    ///
    /// # Errors
    /// Returns [`EvalError::ExpectedBoolean`] for numbers and percentages.
    pub const fn as_bool(&self) -> EvalResult<bool> {
        match self {
            Self::Bool(b) => Ok(*b),
            _ => Err(EvalError::ExpectedBoolean),
        }
    }

    /// A short description of the value's kind, used in error messages.
    #[must_use]
    pub fn kind(&self) -> String {
        match self {
            Self::Bool(_) => "boolean".to_string(),
            Self::Number(q) => match q.unit {
                Some(unit) => unit.symbol.to_string(),
                None => "number".to_string(),
            },
            Self::Percentage(_) => "%".to_string(),
        }
    }
}

impl std::fmt::Display for Value {
    /// Formats the value with `.` as decimal separator.
    ///
    /// Numbers are rounded to ten decimals, so `0.1 + 0.2` displays as `0.3`.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Number(Quantity { magnitude, unit }) => match unit {
                Some(unit) => write!(f, "{} {}", round_for_display(*magnitude), unit.symbol),
                None => write!(f, "{}", round_for_display(*magnitude)),
            },
            Self::Percentage(p) => write!(f, "{}%", round_for_display(*p)),
        }
    }
}
