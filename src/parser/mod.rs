//! Parser module for `fx` source.
//!
//! Two parsers share one lexer. The grammar parser walks programs by
//! recursive descent, recording syntax errors as diagnostics and recovering
//! in panic mode. Whenever a rule needs an expression it hands the lexer to
//! a Pratt parser, which dispatches on NUD (null denotation) and LED (left
//! denotation) handlers and compares binding powers for precedence.

pub mod context;
pub mod decl;
pub mod expr;
pub mod lookups;
pub mod parser;
pub mod stmt;

#[cfg(test)]
mod tests;
