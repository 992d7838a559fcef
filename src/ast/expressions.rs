use std::fmt::Display;

use crate::{
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::{Token, TokenKind},
    Span,
};

use super::ast::DefinitionExpression;

// LITERALS

/// Integer Expression
/// Pushes a signed 32-bit literal.
#[derive(Debug, Clone, PartialEq)]
pub struct IntegerExpr {
    pub value: i32,
    pub span: Span,
}

/// Symbol Expression
/// A reference to a word, variable or loop index by name.
#[derive(Debug, Clone, PartialEq)]
pub struct SymbolExpr {
    pub name: String,
    pub span: Span,
}

// OPERATORS

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    Add,
    Subtract,
    Multiply,
    Divide,
    Less,
    Greater,
    LessEquals,
    GreaterEquals,
    Equals,
    NotEquals,
    And,
    Or,
}

impl BinaryOperator {
    /// Whether the result is a canonical boolean rather than a number.
    pub fn is_boolean(&self) -> bool {
        !matches!(
            self,
            BinaryOperator::Add
                | BinaryOperator::Subtract
                | BinaryOperator::Multiply
                | BinaryOperator::Divide
        )
    }
}

impl TryFrom<&Token> for BinaryOperator {
    type Error = Error;

    fn try_from(token: &Token) -> Result<Self, Self::Error> {
        Ok(match token.kind {
            TokenKind::Plus => BinaryOperator::Add,
            TokenKind::Dash => BinaryOperator::Subtract,
            TokenKind::Star => BinaryOperator::Multiply,
            TokenKind::Slash => BinaryOperator::Divide,
            TokenKind::Less => BinaryOperator::Less,
            TokenKind::Greater => BinaryOperator::Greater,
            TokenKind::LessEquals => BinaryOperator::LessEquals,
            TokenKind::GreaterEquals => BinaryOperator::GreaterEquals,
            TokenKind::Equals => BinaryOperator::Equals,
            TokenKind::NotEquals => BinaryOperator::NotEquals,
            TokenKind::And => BinaryOperator::And,
            TokenKind::Or => BinaryOperator::Or,
            _ => {
                return Err(Error::new(
                    ErrorImpl::UnsupportedOperator { operator: token.value.clone() },
                    token.span.start.clone(),
                ))
            }
        })
    }
}

impl Display for BinaryOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let symbol = match self {
            BinaryOperator::Add => "+",
            BinaryOperator::Subtract => "-",
            BinaryOperator::Multiply => "*",
            BinaryOperator::Divide => "/",
            BinaryOperator::Less => "<",
            BinaryOperator::Greater => ">",
            BinaryOperator::LessEquals => "<=",
            BinaryOperator::GreaterEquals => ">=",
            BinaryOperator::Equals => "=",
            BinaryOperator::NotEquals => "<>",
            BinaryOperator::And => "and",
            BinaryOperator::Or => "or",
        };
        write!(f, "{}", symbol)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOperator {
    Invert,
}

impl TryFrom<&Token> for UnaryOperator {
    type Error = Error;

    fn try_from(token: &Token) -> Result<Self, Self::Error> {
        match token.kind {
            TokenKind::Invert => Ok(UnaryOperator::Invert),
            _ => Err(Error::new(
                ErrorImpl::UnsupportedOperator { operator: token.value.clone() },
                token.span.start.clone(),
            )),
        }
    }
}

impl Display for UnaryOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UnaryOperator::Invert => write!(f, "invert"),
        }
    }
}

/// Binary Expression
/// Pops two operands, pushes one result.
#[derive(Debug, Clone, PartialEq)]
pub struct BinaryExpr {
    pub operator: BinaryOperator,
    pub span: Span,
}

/// Unary Expression
#[derive(Debug, Clone, PartialEq)]
pub struct UnaryExpr {
    pub operator: UnaryOperator,
    pub span: Span,
}

// DEFINITIONS

/// Word Definition
/// `: name body ;`, the body is inlined wherever `name` is referenced.
#[derive(Debug, Clone, PartialEq)]
pub struct WordDefinitionExpr {
    pub name: String,
    pub body: Vec<DefinitionExpression>,
    pub span: Span,
}

/// Variable Declaration
/// `variable name`, reserves one heap cell.
#[derive(Debug, Clone, PartialEq)]
pub struct VariableDeclExpr {
    pub name: String,
    pub span: Span,
}

/// Address Assign
/// `name !`, stores the value below the top of stack into the variable.
#[derive(Debug, Clone, PartialEq)]
pub struct AddressAssignExpr {
    pub name: String,
    pub span: Span,
}

/// Address Receive
/// `name @`, pushes the value stored in the variable.
#[derive(Debug, Clone, PartialEq)]
pub struct AddressReceiveExpr {
    pub name: String,
    pub span: Span,
}

/// Block Copy
/// `cmove`, copies `count` cells from a source address to a destination.
#[derive(Debug, Clone, PartialEq)]
pub struct BlockCopyExpr {
    pub span: Span,
}

// CONTROL FLOW

/// Conditional
/// `if then-body [else else-body] then`
#[derive(Debug, Clone, PartialEq)]
pub struct ConditionalExpr {
    pub then_body: Vec<DefinitionExpression>,
    pub else_body: Vec<DefinitionExpression>,
    pub span: Span,
}

/// Counted Loop
/// `do body loop`, runs from the index on top of stack up to the limit below it.
#[derive(Debug, Clone, PartialEq)]
pub struct CountedLoopExpr {
    pub body: Vec<DefinitionExpression>,
    pub span: Span,
}

/// Indefinite Loop
/// `begin body until`, repeats until the body leaves a true flag.
#[derive(Debug, Clone, PartialEq)]
pub struct IndefiniteLoopExpr {
    pub body: Vec<DefinitionExpression>,
    pub span: Span,
}
