/// Result type used by every evaluation routine.
pub type EvalResult<T> = Result<T, EvalError>;

#[derive(Debug, Clone, PartialEq, Eq)]
/// Represents all errors that can occur while evaluating a recognized
/// expression.
pub enum EvalError {
    /// Tried to use a variable that no earlier line assigned.
    UndefinedVariable {
        /// The name of the variable.
        name: String,
    },
    /// The operands carry units of different dimensions.
    IncompatibleUnits {
        /// Unit (or kind) of the left operand.
        left:  String,
        /// Unit (or kind) of the right operand.
        right: String,
    },
    /// Attempted division by zero.
    DivisionByZero,
    /// A numeric value was expected, but a boolean was found.
    ExpectedNumber,
    /// A boolean value was expected, such as for the condition of an `if`.
    ExpectedBoolean,
    /// The computation produced an infinite or undefined number.
    Overflow,
}

impl std::fmt::Display for EvalError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UndefinedVariable { name } => write!(f, "Undefined variable '{name}'."),
            Self::IncompatibleUnits { left, right } => {
                write!(f, "Incompatible units: '{left}' and '{right}'.")
            },
            Self::DivisionByZero => write!(f, "Division by zero."),
            Self::ExpectedNumber => write!(f, "Expected number."),
            Self::ExpectedBoolean => write!(f, "Expected boolean."),
            Self::Overflow => write!(f, "Number overflow while trying to compute result."),
        }
    }
}

impl std::error::Error for EvalError {}
