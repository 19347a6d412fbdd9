//! Lexical analysis module.
//!
//! This module turns a character source into tokens on demand. It handles:
//!
//! - Single-character reads with one slot of pushback
//! - Recognition of reserved words, identifiers, literals, and operators
//! - One token of lookahead through `peek`/`lex`
//! - Comments and whitespace handling

pub mod lexer;
pub mod scanner;
pub mod tokens;
