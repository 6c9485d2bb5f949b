use crate::{
    ast::Expr,
    error::EvalResult,
    interpreter::{
        cursor::LinkedToken,
        grammar::{BOOLEAN, EXPRESSION_MODULES, RELATIONAL},
        lexer::TokenType,
        registry::{Dispatcher, GrammarModule, ParseAttempt, ParseOutcome},
        value::core::Value,
        variables::VariableTable,
    },
};

/// Recognizes `if condition then expression [else expression]`.
///
/// Keywords come from the culture, so `si 1 < 2 alors 3 sinon 4` is the same
/// expression under `fr-FR`. Unlike the numeric grammars, a conditional may
/// be spread over several lines:
///
/// ```text
/// if total > 100
/// then total * 10%
/// else 0
/// ```
///
/// The branches are parsed by dispatching to the expression grammars, so a
/// branch may itself be a conditional. Only the taken branch contributes its
/// value or error. A false condition without `else` evaluates to `false`.
pub struct IfThenElseModule;

impl GrammarModule for IfThenElseModule {
    fn try_parse_and_interpret<'s>(&self,
                                   dispatcher: &Dispatcher<'_>,
                                   cursor: LinkedToken<'s>,
                                   variables: &mut VariableTable)
                                   -> ParseAttempt<'s> {
        if !cursor.is(TokenType::IfIdentifier) {
            return Ok(None);
        }

        let Some(condition_start) = following(cursor) else {
            return Ok(None);
        };
        let Some(condition) = dispatcher.dispatch(&[RELATIONAL, BOOLEAN], condition_start, variables)?
        else {
            return Ok(None);
        };

        let Some(then_keyword) = following(condition.last)
                                     .filter(|token| token.is(TokenType::ThenIdentifier))
        else {
            return Ok(None);
        };
        let Some(then_start) = following(then_keyword) else {
            return Ok(None);
        };
        let Some(then_branch) = dispatcher.dispatch(EXPRESSION_MODULES, then_start, variables)? else {
            return Ok(None);
        };

        let mut else_branch = None;
        if let Some(else_keyword) = following(then_branch.last)
           && else_keyword.is(TokenType::ElseIdentifier)
           && let Some(else_start) = following(else_keyword)
        {
            else_branch = dispatcher.dispatch(EXPRESSION_MODULES, else_start, variables)?;
        }

        let value = choose(&condition.value, &then_branch.value, else_branch.as_ref());
        let last = else_branch.as_ref().map_or(then_branch.last, |branch| branch.last);

        Ok(Some(ParseOutcome { first: cursor,
                               last,
                               expr: Expr::Conditional { condition:   Box::new(condition.expr),
                                                         then_branch: Box::new(then_branch.expr),
                                                         else_branch:
                                                             else_branch.map(|b| Box::new(b.expr)), },
                               value }))
    }
}

/// The next token that is not whitespace, on this line or a later one.
fn following(token: LinkedToken<'_>) -> Option<LinkedToken<'_>> {
    token.next()?.skip(TokenType::Whitespace)
}

fn choose(condition: &EvalResult<Value>,
          then_value: &EvalResult<Value>,
          else_branch: Option<&ParseOutcome<'_>>)
          -> EvalResult<Value> {
    let condition = condition.clone()?;

    if condition.as_bool()? {
        then_value.clone()
    } else {
        else_branch.map_or(Ok(condition), |branch| branch.value.clone())
    }
}
