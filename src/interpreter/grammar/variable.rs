use crate::{
    ast::Expr,
    interpreter::{
        cursor::LinkedToken,
        evaluator::core::Evaluator,
        lexer::TokenType,
        registry::{Dispatcher, GrammarModule, ParseAttempt, ParseOutcome},
        variables::VariableTable,
    },
};

/// Recognizes a single word as a reference to a variable.
///
/// Any word matches, defined or not: referencing a name no earlier line
/// assigned is an evaluation error, not a parse failure.
pub struct VariableModule;

impl GrammarModule for VariableModule {
    fn try_parse_and_interpret<'s>(&self,
                                   _dispatcher: &Dispatcher<'_>,
                                   cursor: LinkedToken<'s>,
                                   variables: &mut VariableTable)
                                   -> ParseAttempt<'s> {
        if !cursor.is(TokenType::Word) {
            return Ok(None);
        }

        let expr = Expr::Variable { name: cursor.text().to_string() };
        let value = Evaluator::new(variables).eval(&expr);

        Ok(Some(ParseOutcome { first: cursor,
                               last: cursor,
                               expr,
                               value }))
    }
}
