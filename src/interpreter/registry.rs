use std::cell::Cell;

use crate::{
    ast::Expr,
    error::{ConfigError, EvalResult},
    interpreter::{
        cancellation::{CancellationToken, Cancelled},
        culture::Culture,
        cursor::LinkedToken,
        grammar,
        orderer::{self, ModuleMetadata},
        value::core::Value,
        variables::VariableTable,
    },
};

/// Maximum depth of nested dispatches before a position is reported as
/// unmatched.
pub const MAX_DISPATCH_DEPTH: usize = 64;

/// Byte range of a recognized expression in the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    /// Offset of the first byte.
    pub start: usize,
    /// Offset one past the last byte.
    pub end:   usize,
}

/// What a grammar module recognized at a cursor position.
#[derive(Debug, Clone)]
pub struct ParseOutcome<'s> {
    /// The first token the module consumed.
    pub first: LinkedToken<'s>,
    /// The last token the module consumed.
    pub last:  LinkedToken<'s>,
    /// The recognized expression.
    pub expr:  Expr,
    /// The computed value, or why it could not be computed.
    pub value: EvalResult<Value>,
}

impl<'s> ParseOutcome<'s> {
    /// The cursor to resume parsing from, or `None` at the end of the
    /// document.
    #[must_use]
    pub fn resume(&self) -> Option<LinkedToken<'s>> {
        self.last.next()
    }

    /// The part of the document the expression covers.
    #[must_use]
    pub fn span(&self) -> Span {
        Span { start: self.first.document_start(),
               end:   self.last.document_end(), }
    }
}

/// Result of one parse attempt: `Ok(None)` means "no match here", which is a
/// normal outcome.
pub type ParseAttempt<'s> = Result<Option<ParseOutcome<'s>>, Cancelled>;

/// A pluggable grammar: one recognizable expression shape and its
/// evaluation.
///
/// A module either recognizes an expression starting exactly at `cursor` or
/// reports no match. Modules never mutate the token stream, so a module that
/// does not match leaves nothing behind for its siblings to undo. To parse a
/// sub-expression, a module goes back through `dispatcher` instead of calling
/// another module directly.
pub trait GrammarModule {
    /// Tries to recognize and evaluate an expression at `cursor`.
    ///
    /// # Errors
    /// Returns [`Cancelled`] when the dispatcher's token was cancelled during
    /// a nested dispatch.
    fn try_parse_and_interpret<'s>(&self,
                                   dispatcher: &Dispatcher<'_>,
                                   cursor: LinkedToken<'s>,
                                   variables: &mut VariableTable)
                                   -> ParseAttempt<'s>;
}

struct Entry {
    metadata: ModuleMetadata,
    module:   Box<dyn GrammarModule>,
}

/// The ordered set of grammar modules.
///
/// The order is computed once at construction from the modules' before/after
/// constraints. A registry that fails to order cannot be built.
pub struct Registry {
    entries: Vec<Entry>,
}

impl Registry {
    /// Builds a registry from modules and their ordering metadata.
    ///
    /// # Errors
    /// Returns a [`ConfigError`] for duplicate names, unknown dependencies or
    /// dependency cycles.
    pub fn new(modules: Vec<(ModuleMetadata, Box<dyn GrammarModule>)>) -> Result<Self, ConfigError> {
        let metadata: Vec<ModuleMetadata> = modules.iter().map(|(m, _)| m.clone()).collect();
        let order = orderer::order(&metadata)?;

        let mut slots: Vec<Option<Entry>> =
            modules.into_iter()
                   .map(|(metadata, module)| Some(Entry { metadata, module }))
                   .collect();
        let entries: Vec<Entry> = order.into_iter()
                                       .filter_map(|index| slots[index].take())
                                       .collect();

        tracing::debug!(order = ?entries.iter().map(|e| e.metadata.name.as_str()).collect::<Vec<_>>(),
                        "grammar modules ordered");

        Ok(Self { entries })
    }

    /// Builds the registry of built-in grammar modules.
    ///
    /// # Errors
    /// Returns a [`ConfigError`] if the built-in metadata is inconsistent.
    pub fn standard() -> Result<Self, ConfigError> {
        Self::new(grammar::standard_modules())
    }

    /// Module names in the order they are tried.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.metadata.name.as_str())
    }

    /// Metadata of the module called `name`.
    #[must_use]
    pub fn metadata(&self, name: &str) -> Option<&ModuleMetadata> {
        self.entries
            .iter()
            .map(|entry| &entry.metadata)
            .find(|metadata| metadata.name == name)
    }

    /// Creates the handle modules use to dispatch under `culture`.
    #[must_use]
    pub const fn dispatcher<'r>(&'r self,
                                culture: &'r Culture,
                                cancellation: &'r CancellationToken)
                                -> Dispatcher<'r> {
        Dispatcher { registry: self,
                     culture,
                     cancellation,
                     depth: Cell::new(0) }
    }
}

/// The capability grammar modules receive to parse sub-expressions.
///
/// It carries the registry, the culture of the document and the cancellation
/// token. It also counts the nesting of dispatches so that runaway recursion
/// ends as "no match".
pub struct Dispatcher<'r> {
    registry:     &'r Registry,
    culture:      &'r Culture,
    cancellation: &'r CancellationToken,
    depth:        Cell<usize>,
}

impl Dispatcher<'_> {
    /// Tries the modules named in `candidates`, in registry order, stopping at
    /// the first match.
    ///
    /// Names that are not registered are ignored, as are modules that do not
    /// apply to the culture.
    ///
    /// # Errors
    /// Returns [`Cancelled`] as soon as cancellation is observed; the token
    /// is checked before every module attempt.
    pub fn dispatch<'s>(&self,
                        candidates: &[&str],
                        cursor: LinkedToken<'s>,
                        variables: &mut VariableTable)
                        -> ParseAttempt<'s> {
        self.dispatch_filtered(Some(candidates), cursor, variables)
    }

    /// Tries every module in registry order, stopping at the first match.
    ///
    /// # Errors
    /// Returns [`Cancelled`] as soon as cancellation is observed.
    pub fn dispatch_all<'s>(&self,
                            cursor: LinkedToken<'s>,
                            variables: &mut VariableTable)
                            -> ParseAttempt<'s> {
        self.dispatch_filtered(None, cursor, variables)
    }

    fn dispatch_filtered<'s>(&self,
                             candidates: Option<&[&str]>,
                             cursor: LinkedToken<'s>,
                             variables: &mut VariableTable)
                             -> ParseAttempt<'s> {
        if self.depth.get() >= MAX_DISPATCH_DEPTH {
            tracing::debug!(depth = self.depth.get(), "dispatch depth exhausted");
            return Ok(None);
        }

        self.depth.set(self.depth.get() + 1);
        let attempt = self.try_modules(candidates, cursor, variables);
        self.depth.set(self.depth.get() - 1);
        attempt
    }

    fn try_modules<'s>(&self,
                       candidates: Option<&[&str]>,
                       cursor: LinkedToken<'s>,
                       variables: &mut VariableTable)
                       -> ParseAttempt<'s> {
        for entry in &self.registry.entries {
            let name = entry.metadata.name.as_str();
            if candidates.is_some_and(|names| !names.contains(&name))
               || !entry.metadata.applies_to(self.culture)
            {
                continue;
            }

            self.cancellation.check()?;

            if let Some(outcome) = entry.module.try_parse_and_interpret(self, cursor, variables)? {
                tracing::trace!(module = name, text = cursor.text(), "grammar module matched");
                return Ok(Some(outcome));
            }
        }

        Ok(None)
    }
}
