//! Grammar parser for `fx` programs.
//!
//! The grammar rules live in `decl.rs` (functions and their signatures) and
//! `stmt.rs` (bodies and statements) as free functions over a [`Parser`].
//! This module holds the parser itself and the helpers every rule shares:
//! one-token lookahead, `expect`, diagnostic reporting and panic-mode
//! synchronization. Expressions are handed to the precedence parser in
//! `expr.rs`, which reads from the same lexer.
//!
//! A syntax error never unwinds out of a rule on its own. It is recorded as
//! a [`Diagnostic`] and the rule skips ahead to a synchronizing token. Only
//! lexical errors, the error threshold and end-of-input during recovery end
//! a session early.

use log::{debug, info};

use crate::{
    ast::{ast::Program, expressions::ExprNode},
    errors::errors::{Error, ErrorImpl},
    lexer::{
        lexer::Lexer,
        tokens::{Token, TokenKind},
    },
};

use super::{
    context::{Diagnostic, ParserContext},
    decl::parse_prog,
    expr::parse_expr,
    lookups::{BindingPower, Lookups},
};

pub struct Parser<'l, 'a> {
    ctx: ParserContext<'l, 'a>,
    lookups: Lookups,
}

impl<'l, 'a> Parser<'l, 'a> {
    pub fn new(lexer: &'l mut Lexer<'a>) -> Self {
        Parser {
            ctx: ParserContext::new(lexer),
            lookups: Lookups::new(),
        }
    }

    /// Parses a whole program.
    ///
    /// The diagnostics are returned even when the session is cut short; the
    /// outcome is `Err` for a lexical error, too many syntax errors, or
    /// end-of-input while recovering.
    pub fn parse_program(mut self) -> (Vec<Diagnostic>, Result<Program, Error>) {
        let file = self.ctx.lexer().file();
        info!("parsing {}", file);

        let outcome = parse_prog(&mut self);

        match &outcome {
            Ok(program) => info!(
                "parsed {}: {} function(s), {} diagnostic(s)",
                file,
                program.functions.len(),
                self.ctx.error_count()
            ),
            Err(error) => info!("parsing {} aborted: {}", file, error),
        }

        (self.ctx.into_diagnostics(), outcome)
    }

    pub fn peek(&mut self) -> Result<Token, Error> {
        self.ctx.lexer().peek()
    }

    pub fn peek_kind(&mut self) -> Result<TokenKind, Error> {
        self.ctx.lexer().peek_kind()
    }

    pub fn at(&mut self, kind: TokenKind) -> Result<bool, Error> {
        Ok(self.peek_kind()? == kind)
    }

    pub fn advance(&mut self) -> Result<Token, Error> {
        self.ctx.lexer().lex()
    }

    pub fn error_count(&self) -> usize {
        self.ctx.error_count()
    }

    /// Consumes the next token if it has the given kind. Otherwise reports
    /// it and returns `None`, leaving the stream untouched.
    pub fn expect(
        &mut self,
        kind: TokenKind,
        expected: &str,
        context: &str,
    ) -> Result<Option<Token>, Error> {
        if self.at(kind)? {
            return Ok(Some(self.advance()?));
        }

        self.report_found(expected, context)?;
        Ok(None)
    }

    /// Reports the next token as unexpected without consuming it.
    pub fn report_found(&mut self, expected: &str, context: &str) -> Result<(), Error> {
        let found = self.peek()?;
        self.ctx.report(expected, context, found)
    }

    /// Skips tokens up to (not including) the first one whose kind is in
    /// `markers`, and returns it.
    pub fn synchronize(&mut self, markers: &[TokenKind], context: &str) -> Result<Token, Error> {
        loop {
            let token = self.peek()?;

            if markers.contains(&token.kind) {
                debug!("synchronized on {} in {}", token.debug(), context);
                return Ok(token);
            }

            if token.is_eof() {
                let position = token.position.clone();
                return Err(Error::new(
                    ErrorImpl::UnexpectedEof {
                        context: context.to_string(),
                    },
                    position,
                ));
            }

            self.advance()?;
        }
    }

    /// Skips the rest of a broken statement, consuming its `;` if there is
    /// one before the enclosing `}`.
    pub fn recover_statement(&mut self, context: &str) -> Result<(), Error> {
        let marker = self.synchronize(&[TokenKind::Semicolon, TokenKind::CloseCurly], context)?;
        if marker.kind == TokenKind::Semicolon {
            self.advance()?;
        }

        Ok(())
    }

    /// Runs the expression parser on the shared lexer.
    ///
    /// Syntax errors from the expression become diagnostics and yield
    /// `None`; the caller decides how to resynchronize.
    pub fn parse_expression(&mut self, context: &str) -> Result<Option<ExprNode>, Error> {
        match parse_expr(self.ctx.lexer(), &self.lookups, BindingPower::DEFAULT) {
            Ok(Some(expr)) => Ok(Some(expr)),
            Ok(None) => {
                self.report_found("an expression", context)?;
                Ok(None)
            }
            Err(error) if error.is_fatal() => Err(error),
            Err(error) => {
                let found = match error.found() {
                    Some(found) => found.clone(),
                    None => self.peek()?,
                };
                self.ctx.report(&error.expected(), context, found)?;
                Ok(None)
            }
        }
    }
}

/// Parses the source text `source`, labelling positions with `file`.
pub fn parse(source: &str, file: Option<String>) -> (Vec<Diagnostic>, Result<Program, Error>) {
    let mut lexer = Lexer::from_source(source, file);
    Parser::new(&mut lexer).parse_program()
}
