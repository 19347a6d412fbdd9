/// AST (Abstract Syntax Tree) module
/// Contains all definitions related to the AST structure
///
/// Submodules:
/// - ast: Program, function and statement nodes
/// - expressions: The binary expression tree and its evaluator
pub mod ast;
pub mod expressions;
