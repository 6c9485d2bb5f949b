/// Core evaluation logic.
///
/// Contains the [`core::Evaluator`], which walks an AST node and resolves
/// variables against the document's variable table.
pub mod core;

/// Unary operator evaluation.
///
/// Handles negation and unary plus on numbers and percentages.
pub mod unary;

/// Binary operator evaluation.
///
/// Implements arithmetic with units and percentages, and the relational
/// comparisons used by the conditional grammar.
pub mod binary;
