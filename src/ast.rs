use crate::interpreter::{lexer::TokenType, value::unit::Unit};

/// An abstract syntax tree (AST) node describing what a grammar module
/// recognized.
///
/// Grammar modules build these nodes while parsing and hand them to the
/// evaluator. Nodes produced by one module are embedded unchanged by the
/// modules that dispatched to it, so a relational expression holds the
/// arithmetic trees of both of its sides.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// A number literal, already parsed with the culture's separators.
    Number {
        /// The literal value.
        value: f64,
    },
    /// A boolean literal (`true`, `false` or their localized spellings).
    Boolean {
        /// The literal value.
        value: bool,
    },
    /// An expression followed by `%`.
    Percentage {
        /// The operand expression.
        expr: Box<Self>,
    },
    /// An expression followed by a unit, such as `5 km`.
    WithUnit {
        /// The operand expression.
        expr: Box<Self>,
        /// The unit attached to it.
        unit: &'static Unit,
    },
    /// A unit conversion, such as `5 km in m`.
    Conversion {
        /// The expression to convert.
        expr: Box<Self>,
        /// The target unit.
        unit: &'static Unit,
    },
    /// Reference to a variable by name.
    Variable {
        /// Name of the variable.
        name: String,
    },
    /// A unary operation (e.g. negation).
    UnaryOp {
        /// The unary operator to apply.
        op:   UnaryOperator,
        /// The operand expression.
        expr: Box<Self>,
    },
    /// An arithmetic operation.
    BinaryOp {
        /// Left operand.
        left:  Box<Self>,
        /// The operator.
        op:    BinaryOperator,
        /// Right operand.
        right: Box<Self>,
    },
    /// A comparison between two numeric expressions.
    Relational {
        /// Left operand.
        left:  Box<Self>,
        /// The operator.
        op:    RelationalOperator,
        /// Right operand.
        right: Box<Self>,
    },
    /// `name = value`.
    Assignment {
        /// The variable being assigned.
        name:  String,
        /// The assigned expression.
        value: Box<Self>,
    },
    /// `if condition then expr else expr`.
    Conditional {
        /// The condition; must evaluate to a boolean.
        condition:   Box<Self>,
        /// Evaluated when the condition holds.
        then_branch: Box<Self>,
        /// Evaluated when the condition does not hold.
        else_branch: Option<Box<Self>>,
    },
}

/// Operators taking a single operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOperator {
    /// `-x`
    Neg,
    /// `+x`
    Plus,
}

/// Arithmetic operators taking two operands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    /// `+`
    Add,
    /// `-`
    Sub,
    /// `*`
    Mul,
    /// `/`
    Div,
    /// `^`
    Pow,
}

impl BinaryOperator {
    /// Maps an operator token to its arithmetic operator.
    #[must_use]
    pub const fn from_token_type(token_type: TokenType) -> Option<Self> {
        match token_type {
            TokenType::AdditionOperator => Some(Self::Add),
            TokenType::SubtractionOperator => Some(Self::Sub),
            TokenType::MultiplicationOperator => Some(Self::Mul),
            TokenType::DivisionOperator => Some(Self::Div),
            TokenType::ExponentOperator => Some(Self::Pow),
            _ => None,
        }
    }
}

/// The six relational operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelationalOperator {
    /// `==`
    Equal,
    /// `!=`
    NotEqual,
    /// `<`
    Less,
    /// `<=`
    LessEqual,
    /// `>`
    Greater,
    /// `>=`
    GreaterEqual,
}

impl RelationalOperator {
    /// Maps a relational operator token to its operator.
    ///
    /// # Example
    /// ```
    /// use linecalc::{ast::RelationalOperator, interpreter::lexer::TokenType};
    ///
    /// assert_eq!(RelationalOperator::from_token_type(TokenType::LessThanOperator),
    ///            Some(RelationalOperator::Less));
    /// assert_eq!(RelationalOperator::from_token_type(TokenType::AdditionOperator), None);
    /// ```
    #[must_use]
    pub const fn from_token_type(token_type: TokenType) -> Option<Self> {
        match token_type {
            TokenType::EqualityOperator => Some(Self::Equal),
            TokenType::NoEqualityOperator => Some(Self::NotEqual),
            TokenType::LessThanOperator => Some(Self::Less),
            TokenType::LessThanOrEqualToOperator => Some(Self::LessEqual),
            TokenType::GreaterThanOperator => Some(Self::Greater),
            TokenType::GreaterThanOrEqualToOperator => Some(Self::GreaterEqual),
            _ => None,
        }
    }
}
