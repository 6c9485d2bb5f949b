use std::collections::HashMap;

use crate::interpreter::value::core::Value;

/// The symbol table of one document evaluation.
///
/// Names are case-sensitive. Assignments recognized while a line is being
/// evaluated are staged first: lookups already see them, but they only become
/// permanent when [`VariableTable::commit`] is called once the line has
/// finished. A cancelled line calls [`VariableTable::discard`] instead, so an
/// unfinished line never leaves partial state behind.
#[derive(Debug, Clone, Default)]
pub struct VariableTable {
    committed: HashMap<String, Value>,
    staged:    Vec<(String, Value)>,
}

impl VariableTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the latest value assigned to `name`, staged or committed.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.staged
            .iter()
            .rev()
            .find(|(staged, _)| staged == name)
            .map(|(_, value)| value)
            .or_else(|| self.committed.get(name))
    }

    /// Returns `true` if `name` has a value.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Stages an assignment for the line being evaluated.
    pub fn set(&mut self, name: impl Into<String>, value: Value) {
        self.staged.push((name.into(), value));
    }

    /// Makes every staged assignment permanent and returns how many there
    /// were.
    pub fn commit(&mut self) -> usize {
        let count = self.staged.len();
        self.committed.extend(self.staged.drain(..));
        count
    }

    /// Drops every staged assignment.
    pub fn discard(&mut self) {
        self.staged.clear();
    }

    /// Number of committed variables.
    #[must_use]
    pub fn len(&self) -> usize {
        self.committed.len()
    }

    /// Returns `true` if no variable has been committed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.committed.is_empty()
    }

    /// Iterates over the committed variables in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.committed.iter().map(|(name, value)| (name.as_str(), value))
    }
}
