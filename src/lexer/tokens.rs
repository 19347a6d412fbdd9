use lazy_static::lazy_static;
use std::{collections::HashMap, fmt::Display};

use crate::Position;

lazy_static! {
    pub static ref RESERVED_LOOKUP: HashMap<&'static str, TokenKind> = {
        let mut map = HashMap::new();
        map.insert("func", TokenKind::Func);
        map.insert("main", TokenKind::Main);
        map.insert("type", TokenKind::TypeDef);
        map.insert("record", TokenKind::Record);
        map.insert("if", TokenKind::If);
        map.insert("else", TokenKind::Else);
        map.insert("iter", TokenKind::Iter);
        map.insert("int", TokenKind::Int);
        map.insert("bool", TokenKind::Bool);
        map.insert("True", TokenKind::Boolean);
        map.insert("False", TokenKind::Boolean);
        map
    };
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenKind {
    EOF,
    Identifier,
    Integer,
    Float,
    Boolean,

    OpenBracket,
    CloseBracket,
    OpenCurly,
    CloseCurly,
    OpenParen,
    CloseParen,

    Assignment, // =
    Equals,     // ==
    Colon,      // :
    Define,     // :=
    Not,        // !

    Less,
    LessEquals,
    Greater,
    GreaterEquals,

    Pipe,
    Ampersand,

    Dot,
    Semicolon,
    Comma,

    Plus,
    Dash,
    Slash,
    Star,
    Power, // **
    Caret, // ^
    Percent,

    // Reserved
    Func,
    Main,
    TypeDef,
    Record,
    If,
    Else,
    Iter,
    Int,
    Bool,
}

impl TokenKind {
    pub fn is_type(&self) -> bool {
        matches!(self, TokenKind::Int | TokenKind::Bool)
    }
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Decoded payload of a literal token.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    None,
    Integer(i64),
    Float(f64),
    Boolean(bool),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub value: String,
    pub position: Position,
    pub literal: Literal,
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.kind {
            TokenKind::EOF => write!(f, "end of file"),
            _ => write!(f, "{}", self.value),
        }
    }
}

impl Token {
    fn is_one_of_many(&self, tokens: &[TokenKind]) -> bool {
        tokens.contains(&self.kind)
    }

    pub fn is_eof(&self) -> bool {
        self.kind == TokenKind::EOF
    }

    pub fn debug(&self) -> String {
        if self.is_one_of_many(&[
            TokenKind::Identifier,
            TokenKind::Integer,
            TokenKind::Float,
            TokenKind::Boolean,
        ]) {
            format!("{} ({}) line {}", self.kind, self.value, self.position.line())
        } else {
            format!("{} () line {}", self.kind, self.position.line())
        }
    }
}
