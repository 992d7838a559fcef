use crate::{
    ast::{
        ast::DefinitionExpression,
        expressions::{
            BlockCopyExpr, ConditionalExpr, CountedLoopExpr, IndefiniteLoopExpr, VariableDeclExpr,
        },
    },
    errors::errors::Error,
    lexer::tokens::TokenKind,
    Span,
};

use super::{expr::parse_body, parser::Parser};

/// `if then-body [else else-body] then`
pub fn parse_conditional_expr(parser: &mut Parser) -> Result<DefinitionExpression, Error> {
    let start = parser.expect(TokenKind::If)?.span.start;

    let then_body = parse_body(parser, &[TokenKind::Else, TokenKind::Then])?;

    let else_body = if parser.current_token_kind() == TokenKind::Else {
        parser.advance();
        parse_body(parser, &[TokenKind::Then])?
    } else {
        vec![]
    };

    let end = parser.expect(TokenKind::Then)?.span.end;

    Ok(DefinitionExpression::Conditional(ConditionalExpr {
        then_body,
        else_body,
        span: Span { start, end },
    }))
}

/// `do body loop`
pub fn parse_counted_loop_expr(parser: &mut Parser) -> Result<DefinitionExpression, Error> {
    let start = parser.expect(TokenKind::Do)?.span.start;
    let body = parse_body(parser, &[TokenKind::Loop])?;
    let end = parser.expect(TokenKind::Loop)?.span.end;

    Ok(DefinitionExpression::CountedLoop(CountedLoopExpr {
        body,
        span: Span { start, end },
    }))
}

/// `begin body until`
pub fn parse_indefinite_loop_expr(parser: &mut Parser) -> Result<DefinitionExpression, Error> {
    let start = parser.expect(TokenKind::Begin)?.span.start;
    let body = parse_body(parser, &[TokenKind::Until])?;
    let end = parser.expect(TokenKind::Until)?.span.end;

    Ok(DefinitionExpression::IndefiniteLoop(IndefiniteLoopExpr {
        body,
        span: Span { start, end },
    }))
}

/// `variable name`
pub fn parse_variable_decl_expr(parser: &mut Parser) -> Result<DefinitionExpression, Error> {
    let start = parser.expect(TokenKind::Variable)?.span.start;

    if parser.current_token_kind() != TokenKind::Identifier {
        return Err(parser.unexpected("a variable name after `variable`"));
    }
    let name = parser.advance();

    Ok(DefinitionExpression::VariableDecl(VariableDeclExpr {
        name: name.value,
        span: Span { start, end: name.span.end },
    }))
}

pub fn parse_block_copy_expr(parser: &mut Parser) -> Result<DefinitionExpression, Error> {
    let token = parser.expect(TokenKind::Cmove)?;
    Ok(DefinitionExpression::BlockCopy(BlockCopyExpr { span: token.span }))
}
