use crate::Span;

use super::expressions::{
    AddressAssignExpr, AddressReceiveExpr, BinaryExpr, BlockCopyExpr, ConditionalExpr,
    CountedLoopExpr, IndefiniteLoopExpr, IntegerExpr, SymbolExpr, UnaryExpr, VariableDeclExpr,
    WordDefinitionExpr,
};

/// Root of a parsed source file, the top-level expressions in source order.
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub expressions: Vec<Expression>,
}

/// An expression allowed at the top level of a program.
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Integer(IntegerExpr),
    Symbol(SymbolExpr),
    Binary(BinaryExpr),
    Unary(UnaryExpr),
    WordDefinition(WordDefinitionExpr),
}

/// An expression allowed inside a word definition body.
///
/// Word definitions themselves are absent, so definitions cannot nest.
#[derive(Debug, Clone, PartialEq)]
pub enum DefinitionExpression {
    Integer(IntegerExpr),
    Symbol(SymbolExpr),
    Binary(BinaryExpr),
    Unary(UnaryExpr),
    Conditional(ConditionalExpr),
    CountedLoop(CountedLoopExpr),
    IndefiniteLoop(IndefiniteLoopExpr),
    VariableDecl(VariableDeclExpr),
    AddressAssign(AddressAssignExpr),
    AddressReceive(AddressReceiveExpr),
    BlockCopy(BlockCopyExpr),
}

impl Expression {
    pub fn get_span(&self) -> &Span {
        match self {
            Expression::Integer(expr) => &expr.span,
            Expression::Symbol(expr) => &expr.span,
            Expression::Binary(expr) => &expr.span,
            Expression::Unary(expr) => &expr.span,
            Expression::WordDefinition(expr) => &expr.span,
        }
    }
}

impl DefinitionExpression {
    pub fn get_span(&self) -> &Span {
        match self {
            DefinitionExpression::Integer(expr) => &expr.span,
            DefinitionExpression::Symbol(expr) => &expr.span,
            DefinitionExpression::Binary(expr) => &expr.span,
            DefinitionExpression::Unary(expr) => &expr.span,
            DefinitionExpression::Conditional(expr) => &expr.span,
            DefinitionExpression::CountedLoop(expr) => &expr.span,
            DefinitionExpression::IndefiniteLoop(expr) => &expr.span,
            DefinitionExpression::VariableDecl(expr) => &expr.span,
            DefinitionExpression::AddressAssign(expr) => &expr.span,
            DefinitionExpression::AddressReceive(expr) => &expr.span,
            DefinitionExpression::BlockCopy(expr) => &expr.span,
        }
    }
}
