use crate::{
    ast::{BinaryOperator, Expr, UnaryOperator},
    interpreter::{
        cancellation::Cancelled,
        cursor::LinkedToken,
        evaluator::core::Evaluator,
        grammar::VARIABLE,
        lexer::TokenType,
        registry::{Dispatcher, GrammarModule, ParseAttempt, ParseOutcome},
        value::unit::Unit,
        variables::VariableTable,
    },
};

/// Maximum nesting of parentheses and unary signs.
pub const MAX_NESTING: usize = 32;

const SPACE: &[TokenType] = &[TokenType::Whitespace];

/// A parsed sub-expression and the last token it consumed.
type Parsed<'s> = Option<(Expr, LinkedToken<'s>)>;
type Step<'s> = Result<Parsed<'s>, Cancelled>;

/// Recognizes numeric expressions on a single line.
///
/// Grammar:
/// ```text
/// expression     := additive (conversion unit)?
/// additive       := multiplicative (("+" | "-") multiplicative)*
/// multiplicative := power (("*" | "/") power)*
/// power          := unary ("^" power)?
/// unary          := ("-" | "+") unary | postfix
/// postfix        := primary unit? "%"?
/// primary        := number | "(" expression ")" | variable
/// number         := digits (group digits)* (decimal digits)? | decimal digits
/// ```
///
/// Numbers use the decimal and group separators of the culture; a group must
/// hold exactly three digits. Variables are parsed by dispatching to the
/// variable grammar. A trailing operator without operand is left unconsumed,
/// so `5 +` recognizes `5`.
pub struct ArithmeticModule;

impl GrammarModule for ArithmeticModule {
    fn try_parse_and_interpret<'s>(&self,
                                   dispatcher: &Dispatcher<'_>,
                                   cursor: LinkedToken<'s>,
                                   variables: &mut VariableTable)
                                   -> ParseAttempt<'s> {
        let parsed = Parser { dispatcher,
                              variables: &mut *variables,
                              depth: 0 }.parse_expression(cursor)?;

        Ok(parsed.map(|(expr, last)| {
                     let value = Evaluator::new(variables).eval(&expr);
                     ParseOutcome { first: cursor,
                                    last,
                                    expr,
                                    value }
                 }))
    }
}

struct Parser<'d, 'r, 'v> {
    dispatcher: &'d Dispatcher<'r>,
    variables:  &'v mut VariableTable,
    depth:      usize,
}

impl Parser<'_, '_, '_> {
    fn parse_expression<'s>(&mut self, start: LinkedToken<'s>) -> Step<'s> {
        let Some((expr, last)) = self.parse_additive(start)? else {
            return Ok(None);
        };

        if let Some(keyword) = last.next_on_line(SPACE)
           && keyword.is(TokenType::ConversionIdentifier)
           && let Some(unit_token) = keyword.next_on_line(SPACE)
           && let Some(unit) = unit_of(unit_token)
        {
            return Ok(Some((Expr::Conversion { expr: Box::new(expr),
                                               unit },
                            unit_token)));
        }

        Ok(Some((expr, last)))
    }

    fn parse_additive<'s>(&mut self, start: LinkedToken<'s>) -> Step<'s> {
        self.parse_left_associative(start,
                                    &[BinaryOperator::Add, BinaryOperator::Sub],
                                    Self::parse_multiplicative)
    }

    fn parse_multiplicative<'s>(&mut self, start: LinkedToken<'s>) -> Step<'s> {
        self.parse_left_associative(start,
                                    &[BinaryOperator::Mul, BinaryOperator::Div],
                                    Self::parse_power)
    }

    /// Parses `operand (operator operand)*` for one precedence level.
    fn parse_left_associative<'s>(&mut self,
                                  start: LinkedToken<'s>,
                                  operators: &[BinaryOperator],
                                  operand: fn(&mut Self, LinkedToken<'s>) -> Step<'s>)
                                  -> Step<'s> {
        let Some((mut left, mut last)) = operand(self, start)? else {
            return Ok(None);
        };

        while let Some((op, operand_start)) = operator_after(last, operators) {
            let Some((right, right_last)) = operand(self, operand_start)? else {
                break;
            };
            left = Expr::BinaryOp { left: Box::new(left),
                                    op,
                                    right: Box::new(right) };
            last = right_last;
        }

        Ok(Some((left, last)))
    }

    fn parse_power<'s>(&mut self, start: LinkedToken<'s>) -> Step<'s> {
        let Some((base, last)) = self.parse_unary(start)? else {
            return Ok(None);
        };

        if let Some((op, exponent_start)) = operator_after(last, &[BinaryOperator::Pow])
           && let Some((exponent, exponent_last)) = self.nested(|p| p.parse_power(exponent_start))?
        {
            return Ok(Some((Expr::BinaryOp { left: Box::new(base),
                                             op,
                                             right: Box::new(exponent) },
                            exponent_last)));
        }

        Ok(Some((base, last)))
    }

    fn parse_unary<'s>(&mut self, start: LinkedToken<'s>) -> Step<'s> {
        let op = match start.token_type() {
            TokenType::SubtractionOperator => UnaryOperator::Neg,
            TokenType::AdditionOperator => UnaryOperator::Plus,
            _ => return self.parse_postfix(start),
        };

        let Some(operand_start) = start.next_on_line(SPACE) else {
            return Ok(None);
        };

        Ok(self.nested(|p| p.parse_unary(operand_start))?
               .map(|(expr, last)| {
                   (Expr::UnaryOp { op,
                                    expr: Box::new(expr) },
                    last)
               }))
    }

    fn parse_postfix<'s>(&mut self, start: LinkedToken<'s>) -> Step<'s> {
        let Some((mut expr, mut last)) = self.parse_primary(start)? else {
            return Ok(None);
        };

        if let Some(unit_token) = last.next_on_line(SPACE)
           && let Some(unit) = unit_of(unit_token)
        {
            expr = Expr::WithUnit { expr: Box::new(expr),
                                    unit };
            last = unit_token;
        }

        if let Some(percent) = last.next_on_line(SPACE)
           && percent.is(TokenType::PercentSymbol)
        {
            expr = Expr::Percentage { expr: Box::new(expr) };
            last = percent;
        }

        Ok(Some((expr, last)))
    }

    fn parse_primary<'s>(&mut self, start: LinkedToken<'s>) -> Step<'s> {
        match start.token_type() {
            TokenType::Digit | TokenType::DecimalSeparator => Ok(parse_number(start)),
            TokenType::LeftParenthesis => {
                let Some(inner_start) = start.next_on_line(SPACE) else {
                    return Ok(None);
                };
                let Some((inner, inner_last)) =
                    self.nested(|p| p.parse_expression(inner_start))?
                else {
                    return Ok(None);
                };

                Ok(inner_last.next_on_line(SPACE)
                             .filter(|close| close.is(TokenType::RightParenthesis))
                             .map(|close| (inner, close)))
            },
            TokenType::Word => {
                Ok(self.dispatcher
                       .dispatch(&[VARIABLE], start, self.variables)?
                       .map(|outcome| (outcome.expr, outcome.last)))
            },
            _ => Ok(None),
        }
    }

    /// Runs `parse` one nesting level deeper, failing to match once
    /// [`MAX_NESTING`] is reached.
    fn nested<'s>(&mut self, parse: impl FnOnce(&mut Self) -> Step<'s>) -> Step<'s> {
        if self.depth >= MAX_NESTING {
            return Ok(None);
        }

        self.depth += 1;
        let step = parse(self);
        self.depth -= 1;
        step
    }
}

/// Finds one of `operators` after `last` on the same line, returning it with
/// the token where its right operand starts.
fn operator_after<'s>(last: LinkedToken<'s>,
                      operators: &[BinaryOperator])
                      -> Option<(BinaryOperator, LinkedToken<'s>)> {
    let token = last.next_on_line(SPACE)?;
    let op = BinaryOperator::from_token_type(token.token_type())?;

    if !operators.contains(&op) {
        return None;
    }

    Some((op, token.next_on_line(SPACE)?))
}

fn unit_of(token: LinkedToken<'_>) -> Option<&'static Unit> {
    if token.is(TokenType::Word) {
        Unit::lookup(token.text())
    } else {
        None
    }
}

/// Parses a number written with the culture's separators.
///
/// The pieces of a number must be adjacent: `1,234.5` is one number in
/// `en-US`, while `1, 234` is the number `1` followed by other tokens.
fn parse_number(start: LinkedToken<'_>) -> Parsed<'_> {
    let mut text = String::new();
    let mut last = None;

    if start.is(TokenType::Digit) {
        text.push_str(start.text());
        let mut current = start;

        while let Some(separator) = adjacent(current)
              && separator.is(TokenType::GroupSeparator)
              && let Some(group) = adjacent(separator)
              && group.is(TokenType::Digit)
              && group.text().len() == 3
        {
            text.push_str(group.text());
            current = group;
        }
        last = Some(current);
    }

    let decimal = match last {
        Some(current) => adjacent(current),
        None => Some(start),
    };

    if let Some(separator) = decimal
       && separator.is(TokenType::DecimalSeparator)
       && let Some(fraction) = adjacent(separator)
       && fraction.is(TokenType::Digit)
    {
        if text.is_empty() {
            text.push('0');
        }
        text.push('.');
        text.push_str(fraction.text());
        last = Some(fraction);
    }

    let last = last?;
    let value = text.parse::<f64>().ok()?;

    Some((Expr::Number { value }, last))
}

/// The token directly following `token` on the same line.
fn adjacent(token: LinkedToken<'_>) -> Option<LinkedToken<'_>> {
    token.next_on_line(&[])
}
