use linecalc::{
    error::ConfigError,
    interpreter::orderer::{ModuleMetadata, check_cycles, order},
};

fn names(modules: &[ModuleMetadata]) -> Vec<&str> {
    order(modules).unwrap()
                  .into_iter()
                  .map(|i| modules[i].name.as_str())
                  .collect()
}

#[test]
fn unconstrained_modules_keep_input_order() {
    let modules = [ModuleMetadata::new("A"), ModuleMetadata::new("B"), ModuleMetadata::new("C")];
    assert_eq!(names(&modules), ["A", "B", "C"]);
}

#[test]
fn before_and_after_are_honored() {
    let modules = [ModuleMetadata::new("Arithmetic").before(["Variable"]),
                   ModuleMetadata::new("Variable"),
                   ModuleMetadata::new("Relational").before(["Arithmetic"]),
                   ModuleMetadata::new("Boolean").after(["Relational"]),
                   ModuleMetadata::new("IfThenElse").before(["Relational"]),
                   ModuleMetadata::new("Assignment").before(["IfThenElse", "Relational"])];

    assert_eq!(names(&modules),
               ["Assignment", "IfThenElse", "Relational", "Arithmetic", "Variable", "Boolean"]);
}

#[test]
fn constraints_declared_on_both_sides_are_merged() {
    let modules = [ModuleMetadata::new("B").after(["A"]), ModuleMetadata::new("A").before(["B"])];
    assert_eq!(names(&modules), ["A", "B"]);
}

#[test]
fn duplicate_names_are_rejected() {
    let modules = [ModuleMetadata::new("A"), ModuleMetadata::new("A")];
    assert_eq!(order(&modules),
               Err(ConfigError::DuplicateModule { name: "A".to_string() }));
}

#[test]
fn unknown_dependencies_are_rejected() {
    let modules = [ModuleMetadata::new("A").after(["Missing"])];
    assert_eq!(order(&modules),
               Err(ConfigError::UnknownDependency { module:     "A".to_string(),
                                                    dependency: "Missing".to_string(), }));
}

#[test]
fn cycles_are_rejected() {
    let modules = [ModuleMetadata::new("A").before(["B"]),
                   ModuleMetadata::new("B").before(["C"]),
                   ModuleMetadata::new("C").before(["A"])];

    let Err(ConfigError::DependencyCycle { path, .. }) = order(&modules) else {
        panic!("Expected a dependency cycle");
    };
    assert_eq!(path.first(), path.last());
    assert_eq!(path.len(), 4);
    assert!(check_cycles(&modules).is_err());
}

#[test]
fn self_dependency_is_a_cycle() {
    let modules = [ModuleMetadata::new("A").after(["A"])];
    assert!(matches!(order(&modules), Err(ConfigError::DependencyCycle { .. })));
}

#[test]
fn acyclic_constraints_pass_the_cycle_check() {
    let modules = [ModuleMetadata::new("A").before(["B"]), ModuleMetadata::new("B")];
    assert_eq!(check_cycles(&modules), Ok(()));
}
