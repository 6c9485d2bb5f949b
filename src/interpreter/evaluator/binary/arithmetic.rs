use crate::{
    ast::BinaryOperator,
    error::{EvalError, EvalResult},
    interpreter::{
        evaluator::core::Evaluator,
        value::core::{Quantity, Value},
    },
};

impl Evaluator<'_> {
    /// Evaluates an arithmetic operation of the form `Value <Operator> Value`.
    ///
    /// Units follow these rules:
    /// - `+` and `-` need operands of the same dimension; the result is
    ///   expressed in the left operand's unit, and a plain number adopts the
    ///   unit of the other side.
    /// - `*` accepts at most one operand with a unit.
    /// - `/` of two quantities of the same dimension gives a plain ratio.
    /// - `^` only works on plain numbers.
    ///
    /// Adding or subtracting a percentage to a number scales the number
    /// (`200 + 10%` is `220`). In every other position a percentage acts as
    /// a fraction (`50% * 8` is `4`).
    ///
    /// # Errors
    /// - [`EvalError::ExpectedNumber`] if either operand is a boolean.
    /// - [`EvalError::IncompatibleUnits`] when the units do not combine.
    /// - [`EvalError::DivisionByZero`] for a zero divisor.
    /// - [`EvalError::Overflow`] if the result is not finite.
    ///
    /// # Example
    /// ```
    /// use linecalc::{
    ///     ast::BinaryOperator,
    ///     interpreter::{
    ///         evaluator::core::Evaluator,
    ///         value::{
    ///             core::{Quantity, Value},
    ///             unit::Unit,
    ///         },
    ///     },
    /// };
    ///
    /// let km = Unit::lookup("km").unwrap();
    /// let m = Unit::lookup("m").unwrap();
    ///
    /// let left = Value::Number(Quantity::with_unit(1.0, km));
    /// let right = Value::Number(Quantity::with_unit(500.0, m));
    ///
    /// let sum = Evaluator::eval_binary(BinaryOperator::Add, &left, &right).unwrap();
    /// assert_eq!(sum, Value::Number(Quantity::with_unit(1.5, km)));
    /// ```
    pub fn eval_binary(op: BinaryOperator, left: &Value, right: &Value) -> EvalResult<Value> {
        if matches!(left, Value::Bool(_)) || matches!(right, Value::Bool(_)) {
            return Err(EvalError::ExpectedNumber);
        }

        let result = match (op, left, right) {
            (BinaryOperator::Add | BinaryOperator::Sub, Value::Number(q), Value::Percentage(p)) => {
                let ratio = if op == BinaryOperator::Add {
                    1.0 + p / 100.0
                } else {
                    1.0 - p / 100.0
                };
                Value::Number(Quantity { magnitude: q.magnitude * ratio,
                                         unit:      q.unit, })
            },
            (BinaryOperator::Add, Value::Percentage(a), Value::Percentage(b)) => {
                Value::Percentage(a + b)
            },
            (BinaryOperator::Sub, Value::Percentage(a), Value::Percentage(b)) => {
                Value::Percentage(a - b)
            },
            _ => {
                let left = left.as_quantity()?;
                let right = right.as_quantity()?;
                Value::Number(match op {
                                  BinaryOperator::Add | BinaryOperator::Sub => {
                                      add_or_subtract(op, left, right)?
                                  },
                                  BinaryOperator::Mul => multiply(left, right)?,
                                  BinaryOperator::Div => divide(left, right)?,
                                  BinaryOperator::Pow => power(left, right)?,
                              })
            },
        };

        check_finite(result)
    }
}

fn incompatible(left: &Quantity, right: &Quantity) -> EvalError {
    let describe = |q: &Quantity| {
        q.unit
         .map_or_else(|| "number".to_string(), |unit| unit.symbol.to_string())
    };

    EvalError::IncompatibleUnits { left:  describe(left),
                                   right: describe(right), }
}

fn add_or_subtract(op: BinaryOperator, left: Quantity, right: Quantity) -> EvalResult<Quantity> {
    let (unit, right_magnitude) = match (left.unit, right.unit) {
        (Some(l), Some(r)) if l.dimension == r.dimension => {
            (Some(l), l.from_base(r.to_base(right.magnitude)))
        },
        (Some(_), Some(_)) => return Err(incompatible(&left, &right)),
        (unit, None) | (None, unit) => (unit, right.magnitude),
    };

    let magnitude = if op == BinaryOperator::Add {
        left.magnitude + right_magnitude
    } else {
        left.magnitude - right_magnitude
    };

    Ok(Quantity { magnitude, unit })
}

fn multiply(left: Quantity, right: Quantity) -> EvalResult<Quantity> {
    if left.unit.is_some() && right.unit.is_some() {
        return Err(incompatible(&left, &right));
    }

    Ok(Quantity { magnitude: left.magnitude * right.magnitude,
                  unit:      left.unit.or(right.unit), })
}

fn divide(left: Quantity, right: Quantity) -> EvalResult<Quantity> {
    if right.magnitude == 0.0 {
        return Err(EvalError::DivisionByZero);
    }

    match (left.unit, right.unit) {
        (Some(l), Some(r)) if l.dimension == r.dimension => {
            Ok(Quantity::plain(l.to_base(left.magnitude) / r.to_base(right.magnitude)))
        },
        (Some(_) | None, Some(_)) => Err(incompatible(&left, &right)),
        (unit, None) => Ok(Quantity { magnitude: left.magnitude / right.magnitude,
                                      unit }),
    }
}

fn power(base: Quantity, exponent: Quantity) -> EvalResult<Quantity> {
    if base.unit.is_some() || exponent.unit.is_some() {
        return Err(incompatible(&base, &exponent));
    }

    Ok(Quantity::plain(base.magnitude.powf(exponent.magnitude)))
}

fn check_finite(value: Value) -> EvalResult<Value> {
    let finite = match &value {
        Value::Number(q) => q.magnitude.is_finite(),
        Value::Percentage(p) => p.is_finite(),
        Value::Bool(_) => true,
    };

    if finite { Ok(value) } else { Err(EvalError::Overflow) }
}
