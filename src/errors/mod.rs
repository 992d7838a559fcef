//! Error types and error handling for the compiler.
//!
//! Every phase stops at its first error. An `Error` pairs the specific
//! failure with the source position it was raised at, and sorts into one of
//! the lexical, syntax or semantic kinds.

pub mod errors;
