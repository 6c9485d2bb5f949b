/// Configuration errors.
///
/// Raised while building a registry or an interpreter: unknown cultures,
/// duplicate module names, dependencies on undeclared modules and dependency
/// cycles. A configuration error prevents the engine from being used at all.
pub mod config_error;
/// Evaluation errors.
///
/// Attached to a single line when a grammar recognized the text but the
/// operation itself is invalid, such as incompatible units, an undefined
/// variable or a division by zero. They never abort the rest of a document.
pub mod eval_error;

pub use config_error::ConfigError;
pub use eval_error::{EvalError, EvalResult};
