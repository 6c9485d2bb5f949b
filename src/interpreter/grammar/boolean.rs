use crate::{
    ast::Expr,
    interpreter::{
        cursor::LinkedToken,
        lexer::TokenType,
        registry::{Dispatcher, GrammarModule, ParseAttempt, ParseOutcome},
        value::core::Value,
        variables::VariableTable,
    },
};

/// Recognizes the culture's spellings of `true` and `false`.
pub struct BooleanModule;

impl GrammarModule for BooleanModule {
    fn try_parse_and_interpret<'s>(&self,
                                   _dispatcher: &Dispatcher<'_>,
                                   cursor: LinkedToken<'s>,
                                   _variables: &mut VariableTable)
                                   -> ParseAttempt<'s> {
        let value = match cursor.token_type() {
            TokenType::TrueIdentifier => true,
            TokenType::FalseIdentifier => false,
            _ => return Ok(None),
        };

        Ok(Some(ParseOutcome { first: cursor,
                               last:  cursor,
                               expr:  Expr::Boolean { value },
                               value: Ok(Value::Bool(value)), }))
    }
}
