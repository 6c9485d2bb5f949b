use crate::{
    ast::RelationalOperator,
    error::{EvalError, EvalResult},
    interpreter::{
        evaluator::core::Evaluator,
        value::core::{Quantity, Value},
    },
    util::num::{ABS_TOLERANCE, REL_TOLERANCE, is_close},
};

impl Evaluator<'_> {
    /// Evaluates a comparison of the form `Value <Operator> Value`.
    ///
    /// Quantities are normalized to the base unit of their dimension before
    /// comparing, so `1 km == 1000 m` holds. A plain number compares with a
    /// quantity as if it were expressed in the quantity's unit. Equality is
    /// tolerant to rounding noise (`0.1 + 0.2 == 0.3` holds). Booleans only
    /// support `==` and `!=`.
    ///
    /// # Errors
    /// - [`EvalError::IncompatibleUnits`] when the dimensions differ.
    /// - [`EvalError::ExpectedNumber`] when ordering booleans or mixing a
    ///   boolean with a number.
    ///
    /// # Example
    /// ```
    /// use linecalc::{
    ///     ast::RelationalOperator,
    ///     interpreter::{evaluator::core::Evaluator, value::core::Value},
    /// };
    ///
    /// let result = Evaluator::eval_comparison(RelationalOperator::Less,
    ///                                         &Value::from(5.0),
    ///                                         &Value::from(10.0));
    ///
    /// assert_eq!(result, Ok(Value::Bool(true)));
    /// ```
    pub fn eval_comparison(op: RelationalOperator,
                           left: &Value,
                           right: &Value)
                           -> EvalResult<Value> {
        let outcome = match (left, right) {
            (Value::Bool(a), Value::Bool(b)) => match op {
                RelationalOperator::Equal => a == b,
                RelationalOperator::NotEqual => a != b,
                _ => return Err(EvalError::ExpectedNumber),
            },
            (Value::Bool(_), _) | (_, Value::Bool(_)) => return Err(EvalError::ExpectedNumber),
            (Value::Percentage(a), Value::Percentage(b)) => compare_numbers(op, *a, *b),
            _ => {
                let (a, b) = normalize(left.as_quantity()?, right.as_quantity()?)?;
                compare_numbers(op, a, b)
            },
        };

        Ok(Value::Bool(outcome))
    }
}

/// Brings both quantities to a common scale.
fn normalize(left: Quantity, right: Quantity) -> EvalResult<(f64, f64)> {
    match (left.unit, right.unit) {
        (Some(l), Some(r)) if l.dimension == r.dimension => {
            Ok((l.to_base(left.magnitude), r.to_base(right.magnitude)))
        },
        (Some(l), Some(r)) => Err(EvalError::IncompatibleUnits { left:  l.symbol.to_string(),
                                                                 right: r.symbol.to_string(), }),
        _ => Ok((left.magnitude, right.magnitude)),
    }
}

fn compare_numbers(op: RelationalOperator, left: f64, right: f64) -> bool {
    let equal = is_close(left, right, ABS_TOLERANCE, REL_TOLERANCE);

    match op {
        RelationalOperator::Equal => equal,
        RelationalOperator::NotEqual => !equal,
        RelationalOperator::Less => left < right && !equal,
        RelationalOperator::LessEqual => left < right || equal,
        RelationalOperator::Greater => left > right && !equal,
        RelationalOperator::GreaterEqual => left > right || equal,
    }
}
