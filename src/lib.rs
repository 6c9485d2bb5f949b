//! # linecalc
//!
//! linecalc evaluates the calculations written inside free-form text
//! documents, one line at a time. Every line is scanned by a set of grammar
//! modules (assignments, conditionals, comparisons, arithmetic with units and
//! percentages) and yields a value, an error, or nothing at all.
//!
//! Numbers and keywords follow the conventions of a locale, so `1,5 km` is one
//! and a half kilometers under `fr-FR`.

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
    //missing_docs,
)]
#![allow(clippy::missing_errors_doc)]

use crate::{
    error::ConfigError,
    interpreter::document::{Evaluation, Interpreter},
};

/// Defines the structure of recognized expressions.
///
/// Grammar modules build an [`ast::Expr`] for whatever they recognize, and the
/// evaluator computes values from it.
pub mod ast;
/// Provides the error types of the crate.
///
/// # Responsibilities
/// - [`error::ConfigError`] for invalid locales and module configurations,
///   which prevent evaluation altogether.
/// - [`error::EvalError`] for expressions that were recognized but cannot be
///   computed. These are attached to a single line.
pub mod error;
/// Tokenizes, parses and evaluates documents.
///
/// This module ties together the lexer, the token cursor, the grammar module
/// registry, the evaluator and the variable table.
pub mod interpreter;
/// Numeric helpers and value formatting.
pub mod util;

/// Evaluates every line of `document` under `locale` with the built-in
/// grammars.
///
/// # Errors
/// Returns a [`ConfigError`] if `locale` is not supported.
///
/// # Examples
/// ```
/// use linecalc::{evaluate, interpreter::document::LineOutcome};
///
/// let evaluation = evaluate("en-US", "Groceries: 12.5 + 7.5\n5 km in m").unwrap();
///
/// let results: Vec<String> = evaluation.lines
///                                      .iter()
///                                      .filter_map(|line| match &line.outcome {
///                                          LineOutcome::Value { value, .. } => Some(value.to_string()),
///                                          _ => None,
///                                      })
///                                      .collect();
/// assert_eq!(results, ["20", "5000 m"]);
///
/// // Unknown locales are rejected before anything is evaluated.
/// assert!(evaluate("xx-XX", "1 + 1").is_err());
/// ```
pub fn evaluate(locale: &str, document: &str) -> Result<Evaluation, ConfigError> {
    Ok(Interpreter::new(locale)?.evaluate(document))
}
