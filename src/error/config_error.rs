#[derive(Debug, Clone, PartialEq, Eq)]
/// Represents every error that can occur while configuring the engine.
pub enum ConfigError {
    /// The requested locale has no registered culture.
    UnsupportedCulture {
        /// The locale name that was requested.
        name: String,
    },
    /// Two grammar modules were declared with the same name.
    DuplicateModule {
        /// The duplicated module name.
        name: String,
    },
    /// A module declared an ordering constraint on a module that does not
    /// exist.
    UnknownDependency {
        /// The module declaring the constraint.
        module:     String,
        /// The undeclared module it refers to.
        dependency: String,
    },
    /// The before/after constraints form a cycle.
    DependencyCycle {
        /// The module at which the cycle was detected.
        module: String,
        /// The modules along the cycle, starting and ending with `module`.
        path:   Vec<String>,
    },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnsupportedCulture { name } => write!(f, "Unsupported culture '{name}'."),
            Self::DuplicateModule { name } => {
                write!(f, "Grammar module '{name}' is declared more than once.")
            },
            Self::UnknownDependency { module, dependency } => write!(f,
                                                                     "Grammar module '{module}' is ordered against undeclared module '{dependency}'."),
            Self::DependencyCycle { module, path } => write!(f,
                                                             "Grammar module '{module}' is part of a dependency cycle: {}.",
                                                             path.join(" -> ")),
        }
    }
}

impl std::error::Error for ConfigError {}
