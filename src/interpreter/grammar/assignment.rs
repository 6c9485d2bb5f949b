use crate::{
    ast::Expr,
    interpreter::{
        cursor::LinkedToken,
        grammar::EXPRESSION_MODULES,
        lexer::TokenType,
        registry::{Dispatcher, GrammarModule, ParseAttempt, ParseOutcome},
        variables::VariableTable,
    },
};

/// Recognizes `name = expression`.
///
/// The value of the expression is staged under `name` when it evaluates
/// successfully; the document interpreter commits it once the line is done.
/// A failed evaluation leaves any previous value of `name` in place.
///
/// # Example
/// ```
/// use linecalc::interpreter::{document::{Interpreter, LineOutcome}, value::core::Value};
///
/// let interpreter = Interpreter::new("en-US").unwrap();
/// let evaluation = interpreter.evaluate("rate = 4\nrate * 2");
///
/// assert!(matches!(&evaluation.lines[1].outcome,
///                  LineOutcome::Value { value, .. } if *value == Value::from(8.0)));
/// ```
pub struct AssignmentModule;

impl GrammarModule for AssignmentModule {
    fn try_parse_and_interpret<'s>(&self,
                                   dispatcher: &Dispatcher<'_>,
                                   cursor: LinkedToken<'s>,
                                   variables: &mut VariableTable)
                                   -> ParseAttempt<'s> {
        if !cursor.is(TokenType::Word) {
            return Ok(None);
        }

        let Some(operator) = cursor.next_on_line(&[TokenType::Whitespace])
                                   .filter(|token| token.is(TokenType::AssignmentOperator))
        else {
            return Ok(None);
        };
        let Some(value_start) = operator.next_on_line(&[TokenType::Whitespace]) else {
            return Ok(None);
        };
        let Some(assigned) = dispatcher.dispatch(EXPRESSION_MODULES, value_start, variables)? else {
            return Ok(None);
        };

        let name = cursor.text().to_string();
        if let Ok(value) = &assigned.value {
            variables.set(name.clone(), value.clone());
        }

        Ok(Some(ParseOutcome { first: cursor,
                               last:  assigned.last,
                               expr:  Expr::Assignment { name,
                                                         value: Box::new(assigned.expr) },
                               value: assigned.value, }))
    }
}
