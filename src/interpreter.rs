/// Cooperative cancellation of a document evaluation.
pub mod cancellation;
/// Locale conventions: decimal and group separators, keyword spellings.
///
/// The lexer consults the culture to classify `.`, `,` and grouping spaces,
/// and to recognize keywords such as `if` or `vrai`.
pub mod culture;
/// Navigation over the tokens of a document.
///
/// A [`cursor::TokenStream`] owns every tokenized line of a document, and a
/// [`cursor::LinkedToken`] points at one token in it. Cursors are plain index
/// pairs, so grammar modules can probe ahead and backtrack for free.
///
/// # Responsibilities
/// - Moves forward and backward across line boundaries.
/// - Memoizes the `next` link of every token.
/// - Offers the skip and jump helpers grammars build on.
pub mod cursor;
/// Line-by-line evaluation of whole documents.
///
/// The [`document::Interpreter`] ties the lexer, the registry and the
/// variable table together and produces one [`document::LineOutcome`] per
/// line.
pub mod document;
/// Computes values from recognized expressions.
///
/// The evaluator walks an [`crate::ast::Expr`], applies unit and percentage
/// rules, and reports failures such as incompatible units or division by
/// zero as [`crate::error::EvalError`] values.
pub mod evaluator;
/// The built-in grammar modules.
pub mod grammar;
/// Splits documents into lines and tokens.
///
/// Tokenization never fails: characters no rule recognizes become
/// `Unsupported` tokens. Separators and keywords are classified according to
/// the culture.
pub mod lexer;
/// Orders grammar modules from their before/after constraints.
pub mod orderer;
/// The registry of grammar modules and the dispatcher they parse through.
///
/// # Responsibilities
/// - Builds the module order once and refuses inconsistent configurations.
/// - Hands modules a [`registry::Dispatcher`] to parse sub-expressions.
/// - Bounds recursion and observes cancellation between attempts.
pub mod registry;
/// Runtime values: booleans, quantities with optional units, percentages.
pub mod value;
/// The variables assigned while evaluating a document.
pub mod variables;
