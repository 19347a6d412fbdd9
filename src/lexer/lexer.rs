use std::rc::Rc;

use lazy_static::lazy_static;
use log::trace;
use regex::Regex;

use crate::{
    errors::errors::{Error, ErrorImpl},
    Position, MK_TOKEN,
};

use super::{
    scanner::Scanner,
    tokens::{Literal, Token, TokenKind, RESERVED_LOOKUP},
};

lazy_static! {
    static ref HEX_PATTERN: Regex = Regex::new("^0x[0-9A-Fa-f]+$").unwrap();
    static ref INTEGER_PATTERN: Regex = Regex::new("^[0-9]+$").unwrap();
    static ref FLOAT_PATTERN: Regex = Regex::new("^[0-9]+\\.[0-9]*$").unwrap();
}

/// Turns a character source into tokens, one at a time.
///
/// At most one token is ever cached: `peek` fills the cache and returns a
/// copy of it, `lex` hands out the cached token or scans a fresh one.
pub struct Lexer<'a> {
    scanner: Scanner<'a>,
    file: Rc<String>,
    peeked: Option<Token>,
    accepted: String,
}

impl<'a> Lexer<'a> {
    pub fn new<I>(source: I, file: Option<String>) -> Lexer<'a>
    where
        I: Iterator<Item = char> + 'a,
    {
        let file_name = if let Some(file) = file {
            Rc::new(file)
        } else {
            Rc::new(String::from("shell"))
        };

        Lexer {
            scanner: Scanner::new(source),
            file: file_name,
            peeked: None,
            accepted: String::new(),
        }
    }

    pub fn from_source(source: &'a str, file: Option<String>) -> Lexer<'a> {
        Lexer::new(source.chars(), file)
    }

    pub fn file(&self) -> Rc<String> {
        Rc::clone(&self.file)
    }

    /// Returns the next token without consuming it.
    pub fn peek(&mut self) -> Result<Token, Error> {
        if let Some(token) = &self.peeked {
            return Ok(token.clone());
        }

        let token = self.scan()?;
        self.peeked = Some(token.clone());
        Ok(token)
    }

    pub fn peek_kind(&mut self) -> Result<TokenKind, Error> {
        Ok(self.peek()?.kind)
    }

    /// Consumes and returns the next token.
    pub fn lex(&mut self) -> Result<Token, Error> {
        let token = match self.peeked.take() {
            Some(token) => token,
            None => self.scan()?,
        };

        trace!("lex {}", token.debug());
        Ok(token)
    }

    fn get(&mut self) -> Option<char> {
        let c = self.scanner.get()?;
        self.accepted.push(c);
        Some(c)
    }

    fn unget(&mut self) {
        if self.scanner.unget().is_some() {
            self.accepted.pop();
        }
    }

    fn accept(&mut self) -> String {
        std::mem::take(&mut self.accepted)
    }

    fn position(&self, line: u32) -> Position {
        Position(line, Rc::clone(&self.file))
    }

    fn take_while(&mut self, predicate: fn(char) -> bool) {
        loop {
            match self.get() {
                Some(c) if predicate(c) => continue,
                _ => {
                    self.unget();
                    break;
                }
            }
        }
    }

    /// Resolves a possible two-character operator with one character of
    /// lookahead, pushing the lookahead back on a mismatch.
    fn follow(&mut self, next: char, matched: TokenKind, single: TokenKind) -> TokenKind {
        if self.get() == Some(next) {
            matched
        } else {
            self.unget();
            single
        }
    }

    fn scan(&mut self) -> Result<Token, Error> {
        loop {
            self.accepted.clear();

            let Some(c) = self.get() else {
                return Ok(MK_TOKEN!(
                    TokenKind::EOF,
                    String::new(),
                    self.position(self.scanner.line())
                ));
            };
            let line = self.scanner.line();

            match c {
                c if c.is_whitespace() => continue,
                '/' => {
                    if self.get() == Some('/') {
                        comment_handler(self);
                        continue;
                    }
                    self.unget();
                    return operator_handler(self, c, line);
                }
                '+' | '-' | '*' | '>' | '<' | '=' | ':' | '%' | '|' | '&' | '!' | '^' => {
                    return operator_handler(self, c, line)
                }
                '(' | ')' | ',' | ';' | '[' | ']' | '{' | '}' | '.' => {
                    return separator_handler(self, c, line)
                }
                c if c.is_ascii_digit() => return number_handler(self, c, line),
                c if c.is_alphabetic() || c == '_' => return symbol_handler(self, line),
                other => {
                    return Err(Error::new(
                        ErrorImpl::UnrecognisedToken {
                            token: other.to_string(),
                        },
                        self.position(line),
                    ))
                }
            }
        }
    }
}

fn comment_handler(lexer: &mut Lexer) {
    while let Some(c) = lexer.get() {
        if c == '\n' {
            break;
        }
    }
    lexer.accept();
}

fn operator_handler(lexer: &mut Lexer, first: char, line: u32) -> Result<Token, Error> {
    let kind = match first {
        '*' => lexer.follow('*', TokenKind::Power, TokenKind::Star),
        '>' => lexer.follow('=', TokenKind::GreaterEquals, TokenKind::Greater),
        '<' => lexer.follow('=', TokenKind::LessEquals, TokenKind::Less),
        '=' => lexer.follow('=', TokenKind::Equals, TokenKind::Assignment),
        ':' => lexer.follow('=', TokenKind::Define, TokenKind::Colon),
        '+' => TokenKind::Plus,
        '-' => TokenKind::Dash,
        '/' => TokenKind::Slash,
        '%' => TokenKind::Percent,
        '|' => TokenKind::Pipe,
        '&' => TokenKind::Ampersand,
        '!' => TokenKind::Not,
        '^' => TokenKind::Caret,
        _ => {
            return Err(Error::new(
                ErrorImpl::BadOperator {
                    operator: lexer.accept(),
                },
                lexer.position(line),
            ))
        }
    };

    Ok(MK_TOKEN!(kind, lexer.accept(), lexer.position(line)))
}

fn separator_handler(lexer: &mut Lexer, first: char, line: u32) -> Result<Token, Error> {
    let kind = match first {
        '(' => TokenKind::OpenParen,
        ')' => TokenKind::CloseParen,
        ',' => TokenKind::Comma,
        ';' => TokenKind::Semicolon,
        '[' => TokenKind::OpenBracket,
        ']' => TokenKind::CloseBracket,
        '{' => TokenKind::OpenCurly,
        '}' => TokenKind::CloseCurly,
        '.' => TokenKind::Dot,
        _ => {
            return Err(Error::new(
                ErrorImpl::BadSeparator {
                    separator: lexer.accept(),
                },
                lexer.position(line),
            ))
        }
    };

    Ok(MK_TOKEN!(kind, lexer.accept(), lexer.position(line)))
}

fn number_handler(lexer: &mut Lexer, first: char, line: u32) -> Result<Token, Error> {
    let mut hexadecimal = false;

    if first == '0' {
        if lexer.get() == Some('x') {
            hexadecimal = true;
        } else {
            lexer.unget();
        }
    }

    if hexadecimal {
        lexer.take_while(|c| c.is_ascii_hexdigit());
    } else {
        lexer.take_while(|c| c.is_ascii_digit());
        if lexer.get() == Some('.') {
            lexer.take_while(|c| c.is_ascii_digit());
        } else {
            lexer.unget();
        }
    }

    let value = lexer.accept();
    let position = lexer.position(line);
    let parse_error = || {
        Error::new(
            ErrorImpl::NumberParseError {
                token: value.clone(),
            },
            position.clone(),
        )
    };

    let (kind, literal) = if HEX_PATTERN.is_match(&value) {
        let parsed = i64::from_str_radix(&value[2..], 16).map_err(|_| parse_error())?;
        (TokenKind::Integer, Literal::Integer(parsed))
    } else if INTEGER_PATTERN.is_match(&value) {
        let parsed = value.parse::<i64>().map_err(|_| parse_error())?;
        (TokenKind::Integer, Literal::Integer(parsed))
    } else if FLOAT_PATTERN.is_match(&value) {
        let parsed = value.parse::<f64>().map_err(|_| parse_error())?;
        (TokenKind::Float, Literal::Float(parsed))
    } else {
        return Err(Error::new(ErrorImpl::MalformedNumber { token: value }, position));
    };

    Ok(MK_TOKEN!(kind, value, position, literal))
}

fn symbol_handler(lexer: &mut Lexer, line: u32) -> Result<Token, Error> {
    lexer.take_while(|c| c.is_alphanumeric() || c == '_');

    let value = lexer.accept();
    let position = lexer.position(line);

    if let Some(kind) = RESERVED_LOOKUP.get(value.as_str()) {
        let literal = if *kind == TokenKind::Boolean {
            Literal::Boolean(value == "True")
        } else {
            Literal::None
        };
        return Ok(MK_TOKEN!(*kind, value, position, literal));
    }

    Ok(MK_TOKEN!(TokenKind::Identifier, value, position))
}

/// Lexes a whole source string, including the trailing EOF token.
pub fn tokenize(source: &str, file: Option<String>) -> Result<Vec<Token>, Error> {
    let mut lexer = Lexer::from_source(source, file);
    let mut tokens = vec![];

    loop {
        let token = lexer.lex()?;
        let at_end = token.is_eof();
        tokens.push(token);

        if at_end {
            return Ok(tokens);
        }
    }
}
