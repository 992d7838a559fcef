use log::trace;

use crate::{
    ast::{
        ast::{DefinitionExpression, Expression},
        expressions::{
            AddressAssignExpr, AddressReceiveExpr, BinaryExpr, BinaryOperator, IntegerExpr,
            SymbolExpr, UnaryExpr, UnaryOperator, WordDefinitionExpr,
        },
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
    Span,
};

use super::parser::Parser;

/// Parses one top-level expression.
pub fn parse_expr(parser: &mut Parser) -> Result<Expression, Error> {
    let token_kind = parser.current_token_kind();
    let Some(handler) = parser.get_expr_lookup().get(&token_kind).copied() else {
        return Err(parser.unexpected("an expression"));
    };

    trace!("top-level expression at {}", parser.get_position().0);
    handler(parser)
}

/// Parses one definition-body expression.
///
/// `closers` are the tokens that may legally end the enclosing body, named
/// in the error when something else shows up instead.
pub fn parse_definition_expr(
    parser: &mut Parser,
    closers: &[TokenKind],
) -> Result<DefinitionExpression, Error> {
    let token_kind = parser.current_token_kind();
    let Some(handler) = parser.get_body_lookup().get(&token_kind).copied() else {
        return Err(parser.unexpected(describe_expected(closers)));
    };

    trace!("definition expression at {}", parser.get_position().0);
    handler(parser)
}

/// Parses one or more definition-body expressions, stopping before any of
/// `closers`. The closer itself is left for the caller to consume.
pub fn parse_body(
    parser: &mut Parser,
    closers: &[TokenKind],
) -> Result<Vec<DefinitionExpression>, Error> {
    if closers.contains(&parser.current_token_kind()) {
        return Err(parser.unexpected("an expression"));
    }

    let mut body = vec![parse_definition_expr(parser, closers)?];

    while !closers.contains(&parser.current_token_kind()) {
        body.push(parse_definition_expr(parser, closers)?);
    }

    Ok(body)
}

fn describe_expected(closers: &[TokenKind]) -> String {
    let names: Vec<&str> = closers.iter().map(|kind| kind.spelling()).collect();
    if names.is_empty() {
        String::from("an expression")
    } else {
        format!("an expression or {}", names.join(" or "))
    }
}

// ATOMS, shared by both grammars

pub fn parse_integer(parser: &mut Parser) -> Result<IntegerExpr, Error> {
    let token = parser.expect(TokenKind::Integer)?;

    match token.value.parse::<i32>() {
        Ok(value) => Ok(IntegerExpr { value, span: token.span }),
        Err(_) => Err(Error::new(
            ErrorImpl::NumberParseError { token: token.value },
            token.span.start,
        )),
    }
}

pub fn parse_symbol(parser: &mut Parser) -> Result<SymbolExpr, Error> {
    let token = parser.expect(TokenKind::Identifier)?;
    Ok(SymbolExpr { name: token.value, span: token.span })
}

pub fn parse_binary(parser: &mut Parser) -> Result<BinaryExpr, Error> {
    let token = parser.advance();
    let operator = BinaryOperator::try_from(&token)?;
    Ok(BinaryExpr { operator, span: token.span })
}

pub fn parse_unary(parser: &mut Parser) -> Result<UnaryExpr, Error> {
    let token = parser.advance();
    let operator = UnaryOperator::try_from(&token)?;
    Ok(UnaryExpr { operator, span: token.span })
}

// TOP-LEVEL HANDLERS

pub fn parse_integer_expr(parser: &mut Parser) -> Result<Expression, Error> {
    Ok(Expression::Integer(parse_integer(parser)?))
}

pub fn parse_symbol_expr(parser: &mut Parser) -> Result<Expression, Error> {
    Ok(Expression::Symbol(parse_symbol(parser)?))
}

pub fn parse_binary_expr(parser: &mut Parser) -> Result<Expression, Error> {
    Ok(Expression::Binary(parse_binary(parser)?))
}

pub fn parse_unary_expr(parser: &mut Parser) -> Result<Expression, Error> {
    Ok(Expression::Unary(parse_unary(parser)?))
}

/// `: name body... ;`
pub fn parse_word_definition_expr(parser: &mut Parser) -> Result<Expression, Error> {
    let start = parser.expect(TokenKind::Colon)?.span.start;

    if parser.current_token_kind() != TokenKind::Identifier {
        return Err(parser.unexpected("a word name after `:`"));
    }
    let name = parser.advance().value;

    let body = parse_body(parser, &[TokenKind::Semicolon])?;
    let end = parser.expect(TokenKind::Semicolon)?.span.end;

    trace!("defined word `{}` with {} expressions", name, body.len());

    Ok(Expression::WordDefinition(WordDefinitionExpr {
        name,
        body,
        span: Span { start, end },
    }))
}

// DEFINITION-BODY HANDLERS FOR ATOMS

pub fn parse_integer_body_expr(parser: &mut Parser) -> Result<DefinitionExpression, Error> {
    Ok(DefinitionExpression::Integer(parse_integer(parser)?))
}

/// A name, or `name @` / `name !` when followed by a memory operator.
pub fn parse_symbol_body_expr(parser: &mut Parser) -> Result<DefinitionExpression, Error> {
    let symbol = parse_symbol(parser)?;

    match parser.current_token_kind() {
        TokenKind::At => {
            let end = parser.advance().span.end;
            Ok(DefinitionExpression::AddressReceive(AddressReceiveExpr {
                name: symbol.name,
                span: Span { start: symbol.span.start, end },
            }))
        }
        TokenKind::Bang => {
            let end = parser.advance().span.end;
            Ok(DefinitionExpression::AddressAssign(AddressAssignExpr {
                name: symbol.name,
                span: Span { start: symbol.span.start, end },
            }))
        }
        _ => Ok(DefinitionExpression::Symbol(symbol)),
    }
}

pub fn parse_binary_body_expr(parser: &mut Parser) -> Result<DefinitionExpression, Error> {
    Ok(DefinitionExpression::Binary(parse_binary(parser)?))
}

pub fn parse_unary_body_expr(parser: &mut Parser) -> Result<DefinitionExpression, Error> {
    Ok(DefinitionExpression::Unary(parse_unary(parser)?))
}
