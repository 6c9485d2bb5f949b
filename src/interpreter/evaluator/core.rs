use crate::{
    ast::Expr,
    error::{EvalError, EvalResult},
    interpreter::{
        value::{
            core::{Quantity, Value},
            unit::Unit,
        },
        variables::VariableTable,
    },
};

/// Evaluates AST nodes against the variables of one document.
///
/// The evaluator never modifies the table; committing assignments is the job
/// of the grammar module that recognized them.
pub struct Evaluator<'v> {
    variables: &'v VariableTable,
}

impl<'v> Evaluator<'v> {
    /// Creates an evaluator reading from `variables`.
    #[must_use]
    pub const fn new(variables: &'v VariableTable) -> Self {
        Self { variables }
    }

    /// Evaluates an expression and returns the resulting value.
    ///
    /// Only the taken branch of a conditional is evaluated, so an error in
    /// the other branch does not surface.
    ///
    /// # Example
    /// ```
    /// use linecalc::{
    ///     ast::{BinaryOperator, Expr},
    ///     interpreter::{evaluator::core::Evaluator, value::core::Value, variables::VariableTable},
    /// };
    ///
    /// let mut variables = VariableTable::new();
    /// variables.set("x", Value::from(4.0));
    ///
    /// let expr = Expr::BinaryOp { left:  Box::new(Expr::Variable { name: "x".to_string() }),
    ///                             op:    BinaryOperator::Mul,
    ///                             right: Box::new(Expr::Number { value: 2.5 }), };
    ///
    /// assert_eq!(Evaluator::new(&variables).eval(&expr), Ok(Value::from(10.0)));
    /// ```
    pub fn eval(&self, expr: &Expr) -> EvalResult<Value> {
        match expr {
            Expr::Number { value } => {
                if value.is_finite() {
                    Ok(Value::from(*value))
                } else {
                    Err(EvalError::Overflow)
                }
            },
            Expr::Boolean { value } => Ok(Value::Bool(*value)),
            Expr::Percentage { expr } => Self::eval_percentage(&self.eval(expr)?),
            Expr::WithUnit { expr, unit } => Self::eval_with_unit(&self.eval(expr)?, unit),
            Expr::Conversion { expr, unit } => Self::eval_conversion(&self.eval(expr)?, unit),
            Expr::Variable { name } => {
                self.variables
                    .get(name)
                    .cloned()
                    .ok_or_else(|| EvalError::UndefinedVariable { name: name.clone() })
            },
            Expr::UnaryOp { op, expr } => Self::eval_unary(*op, &self.eval(expr)?),
            Expr::BinaryOp { left, op, right } => {
                let left = self.eval(left)?;
                let right = self.eval(right)?;
                Self::eval_binary(*op, &left, &right)
            },
            Expr::Relational { left, op, right } => {
                let left = self.eval(left)?;
                let right = self.eval(right)?;
                Self::eval_comparison(*op, &left, &right)
            },
            Expr::Assignment { value, .. } => self.eval(value),
            Expr::Conditional { condition,
                                then_branch,
                                else_branch, } => {
                let condition = self.eval(condition)?;
                if condition.as_bool()? {
                    self.eval(then_branch)
                } else {
                    else_branch.as_ref()
                               .map_or(Ok(condition), |branch| self.eval(branch))
                }
            },
        }
    }

    fn eval_percentage(value: &Value) -> EvalResult<Value> {
        match value {
            Value::Number(q) if q.unit.is_none() => Ok(Value::Percentage(q.magnitude)),
            Value::Bool(_) => Err(EvalError::ExpectedNumber),
            other => Err(EvalError::IncompatibleUnits { left:  other.kind(),
                                                        right: "%".to_string(), }),
        }
    }

    fn eval_with_unit(value: &Value, unit: &'static Unit) -> EvalResult<Value> {
        match value {
            Value::Number(q) if q.unit.is_none() => {
                Ok(Value::Number(Quantity::with_unit(q.magnitude, unit)))
            },
            Value::Bool(_) => Err(EvalError::ExpectedNumber),
            other => Err(EvalError::IncompatibleUnits { left:  other.kind(),
                                                        right: unit.symbol.to_string(), }),
        }
    }

    fn eval_conversion(value: &Value, unit: &'static Unit) -> EvalResult<Value> {
        match value {
            Value::Number(q) => Ok(Value::Number(q.convert_to(unit)?)),
            Value::Bool(_) => Err(EvalError::ExpectedNumber),
            Value::Percentage(_) => {
                Err(EvalError::IncompatibleUnits { left:  value.kind(),
                                                   right: unit.symbol.to_string(), })
            },
        }
    }
}
