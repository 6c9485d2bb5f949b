use crate::{
    ast::{Expr, RelationalOperator},
    interpreter::{
        cursor::LinkedToken,
        evaluator::core::Evaluator,
        grammar::{ARITHMETIC, BOOLEAN},
        lexer::TokenType,
        registry::{Dispatcher, GrammarModule, ParseAttempt, ParseOutcome},
        variables::VariableTable,
    },
};

/// Grammars an operand may be written in.
const OPERANDS: &[&str] = &[ARITHMETIC, BOOLEAN];

/// Filler tokens allowed between the left operand and the operator, as in
/// `5 apples < 10`.
const FILLER: &[TokenType] = &[TokenType::Whitespace, TokenType::Word];

/// Recognizes `left <operator> right` where both sides are numeric
/// expressions or boolean literals.
///
/// Grammar: `relational := operand (word | whitespace)* operator operand`
///
/// Both operands are parsed by dispatching to the arithmetic and boolean
/// grammars, so this module stays unaware of how numbers, units or variables
/// are written. Booleans only support `==` and `!=`: `true == false` is
/// `false`.
///
/// The grammar is a superset of the numeric one:
/// - If the left operand parses but no relational operator follows, the left
///   expression alone is reported.
/// - If an operator follows but no right operand parses, the left expression
///   alone is reported and the operator is left unconsumed.
/// - If the left operand does not parse, there is no match.
///
/// The comparison is evaluated eagerly. Operands of incompatible dimensions
/// produce an evaluation error on a successful match.
pub struct RelationalModule;

impl GrammarModule for RelationalModule {
    fn try_parse_and_interpret<'s>(&self,
                                   dispatcher: &Dispatcher<'_>,
                                   cursor: LinkedToken<'s>,
                                   variables: &mut VariableTable)
                                   -> ParseAttempt<'s> {
        let Some(left) = dispatcher.dispatch(OPERANDS, cursor, variables)? else {
            return Ok(None);
        };

        let Some(operator_token) = left.last.next_on_line(FILLER) else {
            return Ok(Some(left));
        };
        let Some(op) = RelationalOperator::from_token_type(operator_token.token_type()) else {
            return Ok(Some(left));
        };

        let Some(right_start) = operator_token.next_on_line(&[TokenType::Whitespace]) else {
            return Ok(Some(left));
        };
        let Some(right) = dispatcher.dispatch(OPERANDS, right_start, variables)? else {
            return Ok(Some(left));
        };

        let value = match (&left.value, &right.value) {
            (Ok(l), Ok(r)) => Evaluator::eval_comparison(op, l, r),
            (Err(e), _) | (_, Err(e)) => Err(e.clone()),
        };

        Ok(Some(ParseOutcome { first: cursor,
                               last: right.last,
                               expr: Expr::Relational { left: Box::new(left.expr),
                                                        op,
                                                        right: Box::new(right.expr) },
                               value }))
    }
}
