/// AST (Abstract Syntax Tree) module
/// Contains all definitions related to the AST structure
///
/// Submodules:
/// - ast: The program root and the two expression sum types
/// - expressions: The node structs and operator enums carried by them
pub mod ast;
pub mod expressions;
