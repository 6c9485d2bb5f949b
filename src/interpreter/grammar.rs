use crate::interpreter::{orderer::ModuleMetadata, registry::GrammarModule};

/// `name = expression`.
///
/// Stages the assigned value in the variable table when it evaluates
/// successfully.
pub mod assignment;
/// `if condition then expression else expression`, with localized keywords.
pub mod conditional;
/// Relational expressions: two numeric expressions or boolean literals joined
/// by `==`, `!=`, `<`, `<=`, `>` or `>=`.
pub mod relational;
/// Boolean literals.
pub mod boolean;
/// Numeric expressions: numbers, units, percentages, operators, parentheses
/// and unit conversions.
pub mod arithmetic;
/// Variable references.
pub mod variable;

/// Name of the assignment grammar.
pub const ASSIGNMENT: &str = "Assignment";
/// Name of the if/then/else grammar.
pub const IF_THEN_ELSE: &str = "IfThenElse";
/// Name of the relational grammar.
pub const RELATIONAL: &str = "Relational";
/// Name of the boolean literal grammar.
pub const BOOLEAN: &str = "Boolean";
/// Name of the arithmetic grammar.
pub const ARITHMETIC: &str = "Arithmetic";
/// Name of the variable reference grammar.
pub const VARIABLE: &str = "Variable";

/// Modules that can produce the value of a whole expression, as accepted on
/// the right of an assignment or in the branches of a conditional.
pub const EXPRESSION_MODULES: &[&str] = &[IF_THEN_ELSE, RELATIONAL, BOOLEAN];

/// The built-in grammar modules with their ordering metadata.
///
/// The list is not in execution order; the registry sorts it.
#[must_use]
pub fn standard_modules() -> Vec<(ModuleMetadata, Box<dyn GrammarModule>)> {
    vec![entry(ModuleMetadata::new(ARITHMETIC).before([VARIABLE]),
               arithmetic::ArithmeticModule),
         entry(ModuleMetadata::new(VARIABLE), variable::VariableModule),
         entry(ModuleMetadata::new(RELATIONAL).before([ARITHMETIC]),
               relational::RelationalModule),
         entry(ModuleMetadata::new(BOOLEAN).after([RELATIONAL]), boolean::BooleanModule),
         entry(ModuleMetadata::new(IF_THEN_ELSE).before([RELATIONAL]),
               conditional::IfThenElseModule),
         entry(ModuleMetadata::new(ASSIGNMENT).before([IF_THEN_ELSE, RELATIONAL]),
               assignment::AssignmentModule)]
}

fn entry(metadata: ModuleMetadata,
         module: impl GrammarModule + 'static)
         -> (ModuleMetadata, Box<dyn GrammarModule>) {
    (metadata, Box::new(module))
}
