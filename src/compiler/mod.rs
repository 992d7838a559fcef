//! Code generation module for the compiler.
//!
//! Lowers a parsed `Program` into RISC-V assembly text for a machine whose
//! operand stack lives in memory. It handles:
//!
//! - Arithmetic, comparison and logical operators over the stack
//! - Word definitions, inlined at every reference
//! - Conditionals and both loop forms, with unique branch labels
//! - Variables on a heap addressed from a fixed base register

pub mod body;
pub mod compiler;
pub mod environment;
pub mod expr;
pub mod inline;
pub mod stdlib;
