use crate::{
    ast::UnaryOperator,
    error::{EvalError, EvalResult},
    interpreter::{
        evaluator::core::Evaluator,
        value::core::{Quantity, Value},
    },
};

impl Evaluator<'_> {
    /// Evaluates a unary operation.
    ///
    /// Negation keeps the unit of a quantity and works on percentages.
    /// Booleans are rejected.
    ///
    /// # Example
    /// ```
    /// use linecalc::{
    ///     ast::UnaryOperator,
    ///     interpreter::{evaluator::core::Evaluator, value::core::Value},
    /// };
    ///
    /// let result = Evaluator::eval_unary(UnaryOperator::Neg, &Value::Percentage(5.0));
    /// assert_eq!(result, Ok(Value::Percentage(-5.0)));
    /// ```
    pub fn eval_unary(op: UnaryOperator, value: &Value) -> EvalResult<Value> {
        match (op, value) {
            (_, Value::Bool(_)) => Err(EvalError::ExpectedNumber),
            (UnaryOperator::Plus, _) => Ok(value.clone()),
            (UnaryOperator::Neg, Value::Number(q)) => {
                Ok(Value::Number(Quantity { magnitude: -q.magnitude,
                                            unit:      q.unit, }))
            },
            (UnaryOperator::Neg, Value::Percentage(p)) => Ok(Value::Percentage(-p)),
        }
    }
}
