use std::collections::HashMap;

use crate::{
    ast::ast::{DefinitionExpression, Expression},
    errors::errors::Error,
    lexer::tokens::TokenKind,
};

use super::{body::*, expr::*, parser::Parser};

pub type ExprHandler = fn(&mut Parser) -> Result<Expression, Error>;
pub type BodyHandler = fn(&mut Parser) -> Result<DefinitionExpression, Error>;

const BINARY_OPERATORS: [TokenKind; 12] = [
    TokenKind::Plus,
    TokenKind::Dash,
    TokenKind::Star,
    TokenKind::Slash,
    TokenKind::Less,
    TokenKind::Greater,
    TokenKind::LessEquals,
    TokenKind::GreaterEquals,
    TokenKind::Equals,
    TokenKind::NotEquals,
    TokenKind::And,
    TokenKind::Or,
];

pub fn create_token_lookups(parser: &mut Parser) {
    // Top-level
    parser.expr(TokenKind::Integer, parse_integer_expr);
    parser.expr(TokenKind::Identifier, parse_symbol_expr);
    for kind in BINARY_OPERATORS {
        parser.expr(kind, parse_binary_expr);
    }
    parser.expr(TokenKind::Invert, parse_unary_expr);
    parser.expr(TokenKind::Colon, parse_word_definition_expr);

    // Definition bodies
    parser.body(TokenKind::Integer, parse_integer_body_expr);
    parser.body(TokenKind::Identifier, parse_symbol_body_expr);
    for kind in BINARY_OPERATORS {
        parser.body(kind, parse_binary_body_expr);
    }
    parser.body(TokenKind::Invert, parse_unary_body_expr);
    parser.body(TokenKind::If, parse_conditional_expr);
    parser.body(TokenKind::Do, parse_counted_loop_expr);
    parser.body(TokenKind::Begin, parse_indefinite_loop_expr);
    parser.body(TokenKind::Variable, parse_variable_decl_expr);
    parser.body(TokenKind::Cmove, parse_block_copy_expr);
}

// Lookup tables inside parser struct, so it's easier
pub type ExprLookup = HashMap<TokenKind, ExprHandler>;
pub type BodyLookup = HashMap<TokenKind, BodyHandler>;
