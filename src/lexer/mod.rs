//! Lexical analysis module for the compiler.
//!
//! Converts source text into a stream of tokens for parsing:
//!
//! - Tokenization using anchored regex patterns tried in priority order
//! - Keyword recognition over whole identifiers
//! - Byte-offset positions on every token for error reporting
//! - `\` line comments, `( ... )` comments and whitespace are discarded

pub mod lexer;
pub mod tokens;
