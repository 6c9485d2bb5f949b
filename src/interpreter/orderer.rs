use std::collections::HashMap;

use crate::{error::ConfigError, interpreter::culture::Culture};

/// The ordering metadata a grammar module is registered with.
///
/// `before` lists modules this one must be tried ahead of, `after` lists
/// modules that must be tried ahead of this one. Both sides of a constraint
/// may declare it; declaring it twice is harmless.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ModuleMetadata {
    /// Unique module name.
    pub name:     String,
    /// Modules this one runs before.
    pub before:   Vec<String>,
    /// Modules this one runs after.
    pub after:    Vec<String>,
    /// Cultures the module applies to. Empty means every culture.
    pub cultures: Vec<String>,
}

impl ModuleMetadata {
    /// Metadata without any constraint.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(),
               ..Self::default() }
    }

    /// Adds modules this one must run before.
    #[must_use]
    pub fn before<I, S>(mut self, names: I) -> Self
        where I: IntoIterator<Item = S>,
              S: Into<String>
    {
        self.before.extend(names.into_iter().map(Into::into));
        self
    }

    /// Adds modules this one must run after.
    #[must_use]
    pub fn after<I, S>(mut self, names: I) -> Self
        where I: IntoIterator<Item = S>,
              S: Into<String>
    {
        self.after.extend(names.into_iter().map(Into::into));
        self
    }

    /// Restricts the module to the given cultures.
    #[must_use]
    pub fn cultures<I, S>(mut self, names: I) -> Self
        where I: IntoIterator<Item = S>,
              S: Into<String>
    {
        self.cultures.extend(names.into_iter().map(Into::into));
        self
    }

    /// Returns `true` if the module may run under `culture`.
    #[must_use]
    pub fn applies_to(&self, culture: &Culture) -> bool {
        self.cultures.is_empty()
        || self.cultures
               .iter()
               .any(|name| name.eq_ignore_ascii_case(culture.name))
    }
}

/// Orders modules so that every `before`/`after` constraint holds.
///
/// Returns the indices of `modules` in execution order. Modules that are not
/// constrained relative to each other keep their input order, so the same
/// input always produces the same output.
///
/// # Errors
/// - [`ConfigError::DuplicateModule`] if two modules share a name.
/// - [`ConfigError::UnknownDependency`] if a constraint names an undeclared
///   module.
/// - [`ConfigError::DependencyCycle`] if the constraints are cyclic.
///
/// # Example
/// ```
/// use linecalc::interpreter::orderer::{ModuleMetadata, order};
///
/// let modules = [ModuleMetadata::new("Arithmetic"),
///                ModuleMetadata::new("Relational").before(["Arithmetic"])];
///
/// assert_eq!(order(&modules).unwrap(), vec![1, 0]);
/// ```
pub fn order(modules: &[ModuleMetadata]) -> Result<Vec<usize>, ConfigError> {
    let graph = Graph::build(modules)?;
    let mut walk = Walk::new(&graph);

    for node in 0..graph.len() {
        walk.visit(node)?;
    }

    Ok(walk.emitted_order)
}

/// Checks the constraints for cycles without producing an order.
///
/// # Errors
/// Returns the same errors as [`order`].
pub fn check_cycles(modules: &[ModuleMetadata]) -> Result<(), ConfigError> {
    let graph = Graph::build(modules)?;
    let mut walk = Walk::new(&graph);

    (0..graph.len()).try_for_each(|node| walk.visit(node))
}

/// Must-precede graph: `predecessors[n]` holds every node that has to come
/// before `n`, in input order.
struct Graph<'m> {
    names:        Vec<&'m str>,
    predecessors: Vec<Vec<usize>>,
}

impl<'m> Graph<'m> {
    fn build(modules: &'m [ModuleMetadata]) -> Result<Self, ConfigError> {
        let mut index = HashMap::with_capacity(modules.len());
        for (i, module) in modules.iter().enumerate() {
            if index.insert(module.name.as_str(), i).is_some() {
                return Err(ConfigError::DuplicateModule { name: module.name.clone() });
            }
        }

        let resolve = |module: &ModuleMetadata, dependency: &String| {
            index.get(dependency.as_str())
                 .copied()
                 .ok_or_else(|| ConfigError::UnknownDependency { module:     module.name.clone(),
                                                                 dependency: dependency.clone(), })
        };

        let mut predecessors = vec![Vec::new(); modules.len()];
        for (i, module) in modules.iter().enumerate() {
            for dependency in &module.before {
                predecessors[resolve(module, dependency)?].push(i);
            }
            for dependency in &module.after {
                predecessors[i].push(resolve(module, dependency)?);
            }
        }

        for list in &mut predecessors {
            list.sort_unstable();
            list.dedup();
        }

        Ok(Self { names: modules.iter().map(|m| m.name.as_str()).collect(),
                  predecessors })
    }

    fn len(&self) -> usize {
        self.names.len()
    }
}

/// Depth-first state. `on_stack` detects back edges, `emitted` prevents
/// visiting a node twice.
struct Walk<'g, 'm> {
    graph:         &'g Graph<'m>,
    emitted:       Vec<bool>,
    on_stack:      Vec<bool>,
    stack:         Vec<usize>,
    emitted_order: Vec<usize>,
}

impl<'g, 'm> Walk<'g, 'm> {
    fn new(graph: &'g Graph<'m>) -> Self {
        Self { graph,
               emitted: vec![false; graph.len()],
               on_stack: vec![false; graph.len()],
               stack: Vec::new(),
               emitted_order: Vec::with_capacity(graph.len()) }
    }

    fn visit(&mut self, node: usize) -> Result<(), ConfigError> {
        if self.emitted[node] {
            return Ok(());
        }
        if self.on_stack[node] {
            return Err(self.cycle_error(node));
        }

        self.on_stack[node] = true;
        self.stack.push(node);

        let graph = self.graph;
        for &predecessor in &graph.predecessors[node] {
            self.visit(predecessor)?;
        }

        self.stack.pop();
        self.on_stack[node] = false;
        self.emitted[node] = true;
        self.emitted_order.push(node);
        Ok(())
    }

    fn cycle_error(&self, node: usize) -> ConfigError {
        let start = self.stack.iter().position(|&n| n == node).unwrap_or(0);
        let path = self.stack[start..].iter()
                                      .chain(std::iter::once(&node))
                                      .map(|&n| self.graph.names[n].to_string())
                                      .collect();

        ConfigError::DependencyCycle { module: self.graph.names[node].to_string(),
                                       path }
    }
}
