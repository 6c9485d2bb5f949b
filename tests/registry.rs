use linecalc::{
    ast::Expr,
    error::ConfigError,
    interpreter::{
        cancellation::CancellationToken,
        culture::Culture,
        cursor::{LinkedToken, TokenStream},
        document::{Interpreter, LineOutcome},
        grammar::{ARITHMETIC, ASSIGNMENT, RELATIONAL, standard_modules},
        lexer::{TokenType, tokenize},
        orderer::ModuleMetadata,
        registry::{Dispatcher, GrammarModule, ParseAttempt, ParseOutcome, Registry},
        value::core::Value,
        variables::VariableTable,
    },
};

fn stream(document: &str) -> TokenStream {
    TokenStream::new(tokenize("en-US", document).unwrap())
}

fn en_us() -> &'static Culture {
    Culture::lookup("en-US").unwrap()
}

#[test]
fn standard_registry_order() {
    let registry = Registry::standard().unwrap();
    let names: Vec<&str> = registry.names().collect();

    assert_eq!(names,
               ["Assignment", "IfThenElse", "Relational", "Arithmetic", "Variable", "Boolean"]);
    assert!(registry.metadata(ARITHMETIC).is_some());
    assert!(registry.metadata("Dates").is_none());
}

#[test]
fn relational_recognizes_a_comparison() {
    let registry = Registry::standard().unwrap();
    let cancellation = CancellationToken::new();
    let dispatcher = registry.dispatcher(en_us(), &cancellation);
    let stream = stream("5 < 10");
    let mut variables = VariableTable::new();

    let outcome = dispatcher.dispatch(&[RELATIONAL], stream.first().unwrap(), &mut variables)
                            .unwrap()
                            .unwrap();

    assert_eq!(outcome.value, Ok(Value::Bool(true)));
    assert!(outcome.resume().is_none());
    assert_eq!(outcome.span().start, 0);
    assert_eq!(outcome.span().end, 6);
}

#[test]
fn relational_without_left_operand_does_not_match() {
    let registry = Registry::standard().unwrap();
    let cancellation = CancellationToken::new();
    let dispatcher = registry.dispatcher(en_us(), &cancellation);
    let stream = stream("< 10");
    let mut variables = VariableTable::new();
    let cursor = stream.first().unwrap();

    let attempt = dispatcher.dispatch(&[RELATIONAL], cursor, &mut variables).unwrap();

    assert!(attempt.is_none());
    assert_eq!(cursor.text(), "<");
    assert!(variables.is_empty());
}

#[test]
fn relational_leaves_a_dangling_operator_unconsumed() {
    let registry = Registry::standard().unwrap();
    let cancellation = CancellationToken::new();
    let dispatcher = registry.dispatcher(en_us(), &cancellation);
    let stream = stream("5 <");
    let mut variables = VariableTable::new();

    let outcome = dispatcher.dispatch(&[RELATIONAL], stream.first().unwrap(), &mut variables)
                            .unwrap()
                            .unwrap();

    assert_eq!(outcome.value, Ok(Value::from(5.0)));
    assert_eq!(outcome.resume().map(|t| t.token_type()), Some(TokenType::Whitespace));
}

#[test]
fn unknown_candidates_are_ignored() {
    let registry = Registry::standard().unwrap();
    let cancellation = CancellationToken::new();
    let dispatcher = registry.dispatcher(en_us(), &cancellation);
    let stream = stream("5");
    let mut variables = VariableTable::new();

    let attempt = dispatcher.dispatch(&["Dates"], stream.first().unwrap(), &mut variables)
                            .unwrap();
    assert!(attempt.is_none());
}

/// Matches the word `ping` and answers `1`.
struct Ping;

impl GrammarModule for Ping {
    fn try_parse_and_interpret<'s>(&self,
                                   _dispatcher: &Dispatcher<'_>,
                                   cursor: LinkedToken<'s>,
                                   _variables: &mut VariableTable)
                                   -> ParseAttempt<'s> {
        if !cursor.token().is_text(TokenType::Word, "ping") {
            return Ok(None);
        }

        Ok(Some(ParseOutcome { first: cursor,
                               last:  cursor,
                               expr:  Expr::Number { value: 1.0 },
                               value: Ok(Value::from(1.0)), }))
    }
}

/// Dispatches to itself forever.
struct Recursive;

impl GrammarModule for Recursive {
    fn try_parse_and_interpret<'s>(&self,
                                   dispatcher: &Dispatcher<'_>,
                                   cursor: LinkedToken<'s>,
                                   variables: &mut VariableTable)
                                   -> ParseAttempt<'s> {
        dispatcher.dispatch(&["Recursive"], cursor, variables)
    }
}

/// Raises the cancellation token as soon as it is tried.
struct Cancel(CancellationToken);

impl GrammarModule for Cancel {
    fn try_parse_and_interpret<'s>(&self,
                                   _dispatcher: &Dispatcher<'_>,
                                   _cursor: LinkedToken<'s>,
                                   _variables: &mut VariableTable)
                                   -> ParseAttempt<'s> {
        self.0.cancel();
        Ok(None)
    }
}

/// On `line`, lets the assignment grammar stage its value, then raises the
/// cancellation token before the line can finish.
struct CancelAfterAssignment {
    line:  usize,
    token: CancellationToken,
}

impl GrammarModule for CancelAfterAssignment {
    fn try_parse_and_interpret<'s>(&self,
                                   dispatcher: &Dispatcher<'_>,
                                   cursor: LinkedToken<'s>,
                                   variables: &mut VariableTable)
                                   -> ParseAttempt<'s> {
        if cursor.line().line_number() != self.line {
            return Ok(None);
        }

        dispatcher.dispatch(&[ASSIGNMENT], cursor, variables)?;
        self.token.cancel();
        Ok(None)
    }
}

fn boxed(module: impl GrammarModule + 'static) -> Box<dyn GrammarModule> {
    Box::new(module)
}

#[test]
fn custom_modules_join_the_standard_ones() {
    let mut modules = standard_modules();
    modules.push((ModuleMetadata::new("Ping").before(["Assignment"]), boxed(Ping)));

    let registry = Registry::new(modules).unwrap();
    assert_eq!(registry.names().next(), Some("Ping"));

    let interpreter = Interpreter::with_registry("en-US", registry).unwrap();
    let evaluation = interpreter.evaluate("ping\n2 + 2");

    assert_eq!(evaluation.line(1),
               Some(&LineOutcome::Value { span:  linecalc::interpreter::registry::Span { start: 0,
                                                                                        end:   4, },
                                          value: Value::from(1.0), }));
    assert!(matches!(evaluation.line(2),
                     Some(LineOutcome::Value { value, .. }) if *value == Value::from(4.0)));
}

#[test]
fn culture_restricted_modules_only_run_for_their_culture() {
    let build = || {
        Registry::new(vec![(ModuleMetadata::new("Ping").cultures(["fr-FR"]), boxed(Ping))]).unwrap()
    };

    let english = Interpreter::with_registry("en-US", build()).unwrap();
    assert_eq!(english.evaluate("ping").line(1), Some(&LineOutcome::NoResult));

    let french = Interpreter::with_registry("fr-FR", build()).unwrap();
    assert!(matches!(french.evaluate("ping").line(1), Some(LineOutcome::Value { .. })));
}

#[test]
fn invalid_configurations_cannot_build_a_registry() {
    let duplicate = vec![(ModuleMetadata::new("Ping"), boxed(Ping)),
                         (ModuleMetadata::new("Ping"), boxed(Ping))];
    assert!(matches!(Registry::new(duplicate), Err(ConfigError::DuplicateModule { .. })));

    let cyclic = vec![(ModuleMetadata::new("A").before(["B"]), boxed(Ping)),
                      (ModuleMetadata::new("B").before(["A"]), boxed(Ping))];
    assert!(matches!(Registry::new(cyclic), Err(ConfigError::DependencyCycle { .. })));

    let unknown = vec![(ModuleMetadata::new("A").after(["Z"]), boxed(Ping))];
    assert!(matches!(Registry::new(unknown), Err(ConfigError::UnknownDependency { .. })));
}

#[test]
fn runaway_recursion_ends_as_no_match() {
    let registry = Registry::new(vec![(ModuleMetadata::new("Recursive"), boxed(Recursive))]).unwrap();
    let cancellation = CancellationToken::new();
    let dispatcher = registry.dispatcher(en_us(), &cancellation);
    let stream = stream("anything");
    let mut variables = VariableTable::new();

    let attempt = dispatcher.dispatch_all(stream.first().unwrap(), &mut variables).unwrap();
    assert!(attempt.is_none());
}

#[test]
fn deep_parentheses_do_not_overflow() {
    let document = format!("{}1{}", "(".repeat(500), ")".repeat(500));
    let interpreter = Interpreter::new("en-US").unwrap();
    let evaluation = interpreter.evaluate(&document);

    // Only the innermost parentheses fit in the nesting limit.
    let Some(LineOutcome::Value { span, value }) = evaluation.line(1) else {
        panic!("Expected a value");
    };
    assert_eq!(*value, Value::from(1.0));
    assert!(span.start > 0);
}

#[test]
fn cancellation_on_the_first_line_keeps_nothing() {
    let token = CancellationToken::new();
    let registry = Registry::new(vec![(ModuleMetadata::new("Cancel"), boxed(Cancel(token.clone())))]).unwrap();
    let interpreter = Interpreter::with_registry("en-US", registry).unwrap();

    let evaluation = interpreter.evaluate_with_cancellation("x = 1\ny = 2", &token);

    assert!(evaluation.cancelled);
    assert!(evaluation.lines.is_empty());
    assert!(evaluation.variables.is_empty());
}

#[test]
fn cancellation_drops_assignments_of_the_unfinished_line() {
    let token = CancellationToken::new();
    let mut modules = standard_modules();
    modules.push((ModuleMetadata::new("CancelAfterAssignment").before([ASSIGNMENT]),
                  boxed(CancelAfterAssignment { line:  2,
                                                token: token.clone(), })));
    let interpreter = Interpreter::with_registry("en-US", Registry::new(modules).unwrap()).unwrap();

    let evaluation = interpreter.evaluate_with_cancellation("a = 1\nb = 2", &token);

    assert!(evaluation.cancelled);
    assert_eq!(evaluation.lines.len(), 1);
    assert_eq!(evaluation.variables.get("a"), Some(&Value::from(1.0)));
    assert!(!evaluation.variables.contains("b"));
    assert_eq!(evaluation.variables.len(), 1);
}

#[test]
fn cancelled_before_start_evaluates_nothing() {
    let token = CancellationToken::new();
    token.cancel();

    let interpreter = Interpreter::new("en-US").unwrap();
    let evaluation = interpreter.evaluate_with_cancellation("1 + 1\n2 + 2", &token);

    assert!(evaluation.cancelled);
    assert!(evaluation.lines.is_empty());
}
