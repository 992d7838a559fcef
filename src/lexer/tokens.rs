use lazy_static::lazy_static;
use std::{collections::HashMap, fmt::Display};

use crate::Span;

lazy_static! {
    pub static ref RESERVED_LOOKUP: HashMap<&'static str, TokenKind> = {
        let mut map = HashMap::new();
        map.insert("if", TokenKind::If);
        map.insert("then", TokenKind::Then);
        map.insert("else", TokenKind::Else);
        map.insert("and", TokenKind::And);
        map.insert("or", TokenKind::Or);
        map.insert("invert", TokenKind::Invert);
        map.insert("do", TokenKind::Do);
        map.insert("loop", TokenKind::Loop);
        map.insert("variable", TokenKind::Variable);
        map.insert("begin", TokenKind::Begin);
        map.insert("until", TokenKind::Until);
        map.insert("cmove", TokenKind::Cmove);
        map
    };
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenKind {
    EOF,
    Integer,
    Identifier,

    Plus,
    Dash,
    Star,
    Slash,

    Less,
    Greater,
    LessEquals,
    GreaterEquals,
    Equals,
    NotEquals, // <>

    Colon,
    Semicolon,
    At,   // @
    Bang, // !

    // Reserved
    If,
    Then,
    Else,
    And,
    Or,
    Invert,
    Do,
    Loop,
    Variable,
    Begin,
    Until,
    Cmove,
}

impl TokenKind {
    /// The source text a fixed token is spelled with, used in diagnostics.
    pub fn spelling(&self) -> &'static str {
        match self {
            TokenKind::EOF => "end of input",
            TokenKind::Integer => "integer",
            TokenKind::Identifier => "identifier",
            TokenKind::Plus => "`+`",
            TokenKind::Dash => "`-`",
            TokenKind::Star => "`*`",
            TokenKind::Slash => "`/`",
            TokenKind::Less => "`<`",
            TokenKind::Greater => "`>`",
            TokenKind::LessEquals => "`<=`",
            TokenKind::GreaterEquals => "`>=`",
            TokenKind::Equals => "`=`",
            TokenKind::NotEquals => "`<>`",
            TokenKind::Colon => "`:`",
            TokenKind::Semicolon => "`;`",
            TokenKind::At => "`@`",
            TokenKind::Bang => "`!`",
            TokenKind::If => "`if`",
            TokenKind::Then => "`then`",
            TokenKind::Else => "`else`",
            TokenKind::And => "`and`",
            TokenKind::Or => "`or`",
            TokenKind::Invert => "`invert`",
            TokenKind::Do => "`do`",
            TokenKind::Loop => "`loop`",
            TokenKind::Variable => "`variable`",
            TokenKind::Begin => "`begin`",
            TokenKind::Until => "`until`",
            TokenKind::Cmove => "`cmove`",
        }
    }
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[derive(Debug, Clone)]
pub struct Token {
    pub kind: TokenKind,
    pub value: String,
    pub span: Span,
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_one_of_many(&[TokenKind::Identifier, TokenKind::Integer]) {
            write!(f, "{} ({})", self.kind, self.value)
        } else {
            write!(f, "{}", self.kind)
        }
    }
}

impl Token {
    pub fn is_one_of_many(&self, tokens: &[TokenKind]) -> bool {
        tokens.contains(&self.kind)
    }
}
