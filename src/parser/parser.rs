//! Parser implementation for building the Abstract Syntax Tree.
//!
//! The parser looks at one token at a time and dispatches on its kind
//! through a handler table. Which table is consulted decides the grammar:
//! top-level expressions or definition-body expressions.

use std::{collections::HashMap, rc::Rc};

use log::trace;

use crate::{
    ast::ast::Program,
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::{Token, TokenKind},
    Position,
};

use super::{
    expr::parse_expr,
    lookups::{create_token_lookups, BodyHandler, BodyLookup, ExprHandler, ExprLookup},
};

/// The main parser structure that maintains parsing state.
pub struct Parser {
    /// The list of tokens to parse, always ending in `EOF`
    tokens: Vec<Token>,
    /// Current position in the token stream
    pos: usize,
    /// The name of the source file being parsed
    file: Rc<String>,
    /// Handlers for top-level expressions
    expr_lookup: ExprLookup,
    /// Handlers for definition-body expressions
    body_lookup: BodyLookup,
}

impl Parser {
    /// Creates a new Parser instance over `tokens`.
    ///
    /// The lookup tables start empty; `parse` fills them.
    pub fn new(tokens: Vec<Token>, file: Rc<String>) -> Self {
        Parser {
            tokens,
            pos: 0,
            file,
            expr_lookup: HashMap::new(),
            body_lookup: HashMap::new(),
        }
    }

    /// Returns the current token without advancing.
    ///
    /// Past the end of the stream this keeps returning the final `EOF`.
    pub fn current_token(&self) -> &Token {
        let index = self.pos.min(self.tokens.len().saturating_sub(1));
        &self.tokens[index]
    }

    /// Returns the kind of the current token.
    pub fn current_token_kind(&self) -> TokenKind {
        self.current_token().kind
    }

    /// Advances to the next token and returns the previous token.
    pub fn advance(&mut self) -> Token {
        let token = self.current_token().clone();
        trace!("consumed {}", token);
        if self.pos < self.tokens.len() {
            self.pos += 1;
        }
        token
    }

    /// Builds an `UnexpectedToken` error for the current token.
    pub fn unexpected(&self, expected: impl Into<String>) -> Error {
        let token = self.current_token();
        Error::new(
            ErrorImpl::UnexpectedToken {
                token: token.value.clone(),
                expected: expected.into(),
            },
            token.span.start.clone(),
        )
    }

    /// Expects a token of the specified kind and consumes it.
    ///
    /// # Returns
    ///
    /// Returns Ok(Token) if the current token matches, otherwise an
    /// `UnexpectedToken` error naming the expected kind.
    pub fn expect(&mut self, expected_kind: TokenKind) -> Result<Token, Error> {
        if self.current_token_kind() != expected_kind {
            Err(self.unexpected(expected_kind.spelling()))
        } else {
            Ok(self.advance())
        }
    }

    /// Checks if there are more tokens to parse.
    pub fn has_tokens(&self) -> bool {
        self.pos < self.tokens.len() && self.current_token_kind() != TokenKind::EOF
    }

    pub fn get_expr_lookup(&self) -> &ExprLookup {
        &self.expr_lookup
    }

    pub fn get_body_lookup(&self) -> &BodyLookup {
        &self.body_lookup
    }

    /// Registers a top-level expression handler for a token.
    pub fn expr(&mut self, kind: TokenKind, expr_fn: ExprHandler) {
        self.expr_lookup.insert(kind, expr_fn);
    }

    /// Registers a definition-body expression handler for a token.
    pub fn body(&mut self, kind: TokenKind, body_fn: BodyHandler) {
        self.body_lookup.insert(kind, body_fn);
    }

    /// Returns the source position of the current token.
    pub fn get_position(&self) -> Position {
        self.tokens
            .get(self.pos)
            .map(|token| token.span.start.clone())
            .unwrap_or_else(|| Position(0, Rc::clone(&self.file)))
    }
}

/// Parses a stream of tokens into a `Program`.
///
/// This is the main entry point for parsing. It creates a parser instance,
/// initializes the lookup tables, and parses top-level expressions until
/// EOF. The first syntax error stops parsing.
pub fn parse(tokens: Vec<Token>, file: Rc<String>) -> Result<Program, Error> {
    let mut parser = Parser::new(tokens, file);
    create_token_lookups(&mut parser);

    let mut expressions = vec![];

    while parser.has_tokens() {
        expressions.push(parse_expr(&mut parser)?);
    }

    Ok(Program { expressions })
}
