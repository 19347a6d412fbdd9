use std::fmt::Display;

use log::warn;

use crate::{
    errors::errors::{Error, ErrorImpl},
    lexer::{lexer::Lexer, tokens::Token},
    Position,
};

/// Number of diagnostics after which a parse session is abandoned.
pub const MAX_ERRORS: usize = 5;

/// A recoverable syntax error recorded during a parse session.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    pub position: Position,
    pub expected: String,
    pub context: String,
    pub found: Token,
}

impl Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: Expected {} in {}, found {}",
            self.position, self.expected, self.context, self.found
        )
    }
}

/// State shared by every grammar rule of one parse session: the borrowed
/// lexer and the diagnostics recorded so far.
pub struct ParserContext<'l, 'a> {
    lexer: &'l mut Lexer<'a>,
    diagnostics: Vec<Diagnostic>,
    error_count: usize,
    threshold: usize,
}

impl<'l, 'a> ParserContext<'l, 'a> {
    pub fn new(lexer: &'l mut Lexer<'a>) -> Self {
        ParserContext {
            lexer,
            diagnostics: Vec::new(),
            error_count: 0,
            threshold: MAX_ERRORS,
        }
    }

    pub fn lexer(&mut self) -> &mut Lexer<'a> {
        self.lexer
    }

    /// Records a diagnostic. Fails with `TooManyErrors` once the threshold
    /// is reached; the diagnostic that hit it is kept.
    pub fn report(&mut self, expected: &str, context: &str, found: Token) -> Result<(), Error> {
        let diagnostic = Diagnostic {
            position: found.position.clone(),
            expected: expected.to_string(),
            context: context.to_string(),
            found,
        };
        warn!("{}", diagnostic);

        let position = diagnostic.position.clone();
        self.diagnostics.push(diagnostic);
        self.error_count += 1;

        if self.error_count >= self.threshold {
            return Err(Error::new(
                ErrorImpl::TooManyErrors {
                    count: self.error_count,
                },
                position,
            ));
        }

        Ok(())
    }

    pub fn error_count(&self) -> usize {
        self.error_count
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }
}
