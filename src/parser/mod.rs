//! Parser module for building an Abstract Syntax Tree (AST).
//!
//! Transforms a stream of tokens into a `Program` using one token of
//! lookahead. Two grammars are kept apart by two handler tables:
//!
//! - Top-level: literals, symbols, operators and word definitions
//! - Definition body: the same atoms plus conditionals, loops, variables,
//!   address receive/assign and block copy, but never a nested definition

pub mod body;
pub mod expr;
pub mod lookups;
pub mod parser;
