use crate::{
    ast::Expr,
    error::{ConfigError, EvalError},
    interpreter::{
        cancellation::{CancellationToken, Cancelled},
        culture::Culture,
        cursor::{LinkedToken, TokenStream},
        lexer::{TokenType, tokenize_culture},
        registry::{Dispatcher, ParseOutcome, Registry, Span},
        value::core::Value,
        variables::VariableTable,
    },
};

/// What one line of a document evaluated to.
#[derive(Debug, Clone, PartialEq)]
pub enum LineOutcome {
    /// No grammar recognized anything on the line.
    NoResult,
    /// An expression was recognized and evaluated.
    Value {
        /// Where the expression is in the document.
        span:  Span,
        /// Its value.
        value: Value,
    },
    /// An expression was recognized but could not be evaluated.
    Error {
        /// Where the expression is in the document.
        span:  Span,
        /// Why evaluation failed.
        error: EvalError,
    },
}

/// The outcome of one line, tagged with its 1-based line number.
#[derive(Debug, Clone, PartialEq)]
pub struct LineResult {
    /// 1-based line number.
    pub line_number: usize,
    /// What the line evaluated to.
    pub outcome:     LineOutcome,
}

/// The result of evaluating a whole document.
#[derive(Debug, Clone)]
pub struct Evaluation {
    /// One result per line evaluated. After a cancellation, only the lines
    /// finished before it are present.
    pub lines:     Vec<LineResult>,
    /// The variables committed by the document.
    pub variables: VariableTable,
    /// Whether evaluation stopped early because of a cancellation.
    pub cancelled: bool,
}

impl Evaluation {
    /// The outcome of line `line_number` (1-based), if it was evaluated.
    #[must_use]
    pub fn line(&self, line_number: usize) -> Option<&LineOutcome> {
        self.lines
            .iter()
            .find(|line| line.line_number == line_number)
            .map(|line| &line.outcome)
    }
}

/// Evaluates documents line by line under one culture.
///
/// Each line is scanned from its first non-whitespace token. At every
/// position the registry's modules are tried in order and the first match
/// produces the line's result. A bare word that names no variable is read as
/// prose, and the scan moves past it, so `Total: 5 + 3` evaluates `5 + 3`.
///
/// Variables assigned on a line become visible to the following lines once
/// the line is finished.
///
/// # Example
/// ```
/// use linecalc::interpreter::{document::{Interpreter, LineOutcome}, value::core::Value};
///
/// let interpreter = Interpreter::new("en-US").unwrap();
/// let evaluation = interpreter.evaluate("x = 5\nx + 1\n");
///
/// assert_eq!(evaluation.lines.len(), 3);
/// assert!(matches!(&evaluation.lines[1].outcome,
///                  LineOutcome::Value { value, .. } if *value == Value::from(6.0)));
/// assert_eq!(evaluation.lines[2].outcome, LineOutcome::NoResult);
/// ```
pub struct Interpreter {
    registry: Registry,
    culture:  &'static Culture,
}

impl Interpreter {
    /// Creates an interpreter for `locale` with the built-in grammars.
    ///
    /// # Errors
    /// Returns a [`ConfigError`] if the locale is unsupported.
    pub fn new(locale: &str) -> Result<Self, ConfigError> {
        Self::with_registry(locale, Registry::standard()?)
    }

    /// Creates an interpreter for `locale` with a custom registry.
    ///
    /// # Errors
    /// Returns [`ConfigError::UnsupportedCulture`] if the locale is unknown.
    pub fn with_registry(locale: &str, registry: Registry) -> Result<Self, ConfigError> {
        let culture = Culture::lookup(locale)?;
        Ok(Self { registry, culture })
    }

    /// The culture documents are evaluated under.
    #[must_use]
    pub const fn culture(&self) -> &'static Culture {
        self.culture
    }

    /// The grammar modules in use.
    #[must_use]
    pub const fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Evaluates every line of `document`.
    #[must_use]
    pub fn evaluate(&self, document: &str) -> Evaluation {
        self.evaluate_with_cancellation(document, &CancellationToken::new())
    }

    /// Evaluates `document`, stopping as soon as `cancellation` is raised.
    ///
    /// Assignments staged by the interrupted line are dropped; lines that
    /// finished before the cancellation keep their results.
    #[must_use]
    pub fn evaluate_with_cancellation(&self,
                                      document: &str,
                                      cancellation: &CancellationToken)
                                      -> Evaluation {
        let stream = TokenStream::new(tokenize_culture(self.culture, document));
        let dispatcher = self.registry.dispatcher(self.culture, cancellation);
        let mut variables = VariableTable::new();
        let mut lines = Vec::with_capacity(stream.lines().len());
        let mut covered_through = None;
        let mut cancelled = false;

        for (index, line) in stream.lines().iter().enumerate() {
            let line_number = line.line_number();

            if covered_through.is_some_and(|last| index <= last) {
                lines.push(LineResult { line_number,
                                        outcome: LineOutcome::NoResult });
                continue;
            }

            let attempt = cancellation.check()
                                      .and_then(|()| {
                                          evaluate_line(&dispatcher, &stream, index, &mut variables)
                                      });

            match attempt {
                Ok((outcome, last_line)) => {
                    let committed = variables.commit();
                    tracing::debug!(line = line_number, ?outcome, committed, "line evaluated");
                    if last_line > index {
                        covered_through = Some(last_line);
                    }
                    lines.push(LineResult { line_number, outcome });
                },
                Err(Cancelled) => {
                    variables.discard();
                    tracing::warn!(line = line_number, "evaluation cancelled");
                    cancelled = true;
                    break;
                },
            }
        }

        Evaluation { lines,
                     variables,
                     cancelled }
    }
}

/// Scans one line and returns its outcome with the index of the last line
/// the recognized expression reaches.
fn evaluate_line(dispatcher: &Dispatcher<'_>,
                 stream: &TokenStream,
                 index: usize,
                 variables: &mut VariableTable)
                 -> Result<(LineOutcome, usize), Cancelled> {
    let mut cursor = stream.line_start(index)
                           .and_then(|token| token.skip(TokenType::Whitespace))
                           .filter(|token| token.position().line == index);

    while let Some(token) = cursor {
        match dispatcher.dispatch_all(token, variables)? {
            Some(outcome) if !is_prose(&outcome) => {
                let last_line = outcome.last.position().line;
                return Ok((to_line_outcome(outcome), last_line));
            },
            Some(prose) => cursor = next_start(prose.last),
            None => cursor = next_start(token),
        }
    }

    Ok((LineOutcome::NoResult, index))
}

fn next_start(token: LinkedToken<'_>) -> Option<LinkedToken<'_>> {
    token.next_on_line(&[TokenType::Whitespace])
}

/// A lone word naming no variable is ordinary text, not a failed lookup.
fn is_prose(outcome: &ParseOutcome<'_>) -> bool {
    matches!(outcome.expr, Expr::Variable { .. })
    && matches!(outcome.value, Err(EvalError::UndefinedVariable { .. }))
}

fn to_line_outcome(outcome: ParseOutcome<'_>) -> LineOutcome {
    let span = outcome.span();

    match outcome.value {
        Ok(value) => LineOutcome::Value { span, value },
        Err(error) => LineOutcome::Error { span, error },
    }
}
