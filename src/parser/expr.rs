//! Precedence-climbing expression parser.
//!
//! Every token kind that can appear in an expression has a null denotation
//! (prefix position), a left denotation (infix position) or both, looked up
//! in [`Lookups`]. The driving loop folds operators into the running left
//! operand for as long as they bind tighter than the caller's minimum.

use log::trace;

use crate::{
    ast::expressions::ExprNode,
    errors::errors::{Error, ErrorImpl},
    lexer::{
        lexer::Lexer,
        tokens::{Token, TokenKind},
    },
};

use super::lookups::{Associativity, BindingPower, Lookups};

/// Parses one expression from `lexer`, stopping before the first token that
/// does not bind tighter than `bp`.
///
/// Returns `Ok(None)` without consuming anything when the next token is
/// end-of-input or `)`.
pub fn parse_expr(
    lexer: &mut Lexer,
    lookups: &Lookups,
    bp: BindingPower,
) -> Result<Option<ExprNode>, Error> {
    let token = lexer.peek()?;
    if ends_expression(&token) {
        return Ok(None);
    }

    // Offending tokens stay in the stream for the caller's recovery.
    let Some(nud) = lookups.get_nud(token.kind) else {
        let position = token.position.clone();
        return Err(Error::new(ErrorImpl::NotAPrefixForm { found: token }, position));
    };
    let token = lexer.lex()?;

    trace!("nud {} (min {:?})", token.debug(), bp);
    let mut left = nud(lexer, lookups, token)?;

    loop {
        let next = lexer.peek()?;
        if ends_expression(&next) || lookups.binding_power(next.kind) <= bp {
            break;
        }

        let Some(led) = lookups.get_led(next.kind) else {
            let position = next.position.clone();
            return Err(Error::new(ErrorImpl::NotAnInfixForm { found: next }, position));
        };
        let operator = lexer.lex()?;

        trace!("led {} over {}", operator.debug(), left);
        left = led(lexer, lookups, left, operator)?;
    }

    Ok(Some(left))
}

fn ends_expression(token: &Token) -> bool {
    matches!(token.kind, TokenKind::EOF | TokenKind::CloseParen)
}

fn missing_operand(lexer: &mut Lexer, operator: Token) -> Result<Error, Error> {
    let found = lexer.peek()?;
    let position = found.position.clone();
    Ok(Error::new(
        ErrorImpl::MissingOperand { operator, found },
        position,
    ))
}

pub fn parse_primary_expr(
    _lexer: &mut Lexer,
    _lookups: &Lookups,
    token: Token,
) -> Result<ExprNode, Error> {
    Ok(ExprNode::leaf(token))
}

pub fn parse_prefix_expr(
    lexer: &mut Lexer,
    lookups: &Lookups,
    operator: Token,
) -> Result<ExprNode, Error> {
    let bp = lookups.binding_power(operator.kind);

    match parse_expr(lexer, lookups, bp)? {
        Some(operand) => Ok(ExprNode::unary(operator, operand)),
        None => Err(missing_operand(lexer, operator)?),
    }
}

pub fn parse_grouping_expr(
    lexer: &mut Lexer,
    lookups: &Lookups,
    _open: Token,
) -> Result<ExprNode, Error> {
    let inner = parse_expr(lexer, lookups, BindingPower::DEFAULT)?;

    let close = lexer.peek()?;
    if close.kind != TokenKind::CloseParen {
        let position = close.position.clone();
        return Err(Error::new(
            ErrorImpl::UnmatchedParenthesis { found: close },
            position,
        ));
    }
    lexer.lex()?;

    inner.ok_or_else(|| {
        let position = close.position.clone();
        Error::new(ErrorImpl::EmptyExpression { found: close }, position)
    })
}

pub fn parse_binary_expr(
    lexer: &mut Lexer,
    lookups: &Lookups,
    left: ExprNode,
    operator: Token,
) -> Result<ExprNode, Error> {
    let mut bp = lookups.binding_power(operator.kind);
    if lookups.associativity(operator.kind) == Associativity::Right {
        bp = bp.lowered();
    }

    match parse_expr(lexer, lookups, bp)? {
        Some(right) => Ok(ExprNode::binary(operator, left, right)),
        None => Err(missing_operand(lexer, operator)?),
    }
}

/// Standalone expression parser over a borrowed lexer.
pub struct ExprParser<'l, 'a> {
    lexer: &'l mut Lexer<'a>,
    lookups: Lookups,
}

impl<'l, 'a> ExprParser<'l, 'a> {
    pub fn new(lexer: &'l mut Lexer<'a>) -> Self {
        ExprParser {
            lexer,
            lookups: Lookups::new(),
        }
    }

    pub fn parse_expression(&mut self, bp: BindingPower) -> Result<Option<ExprNode>, Error> {
        parse_expr(self.lexer, &self.lookups, bp)
    }

    /// Parses `EXPR EOF`: a non-empty expression that uses up the input.
    pub fn parse(&mut self) -> Result<ExprNode, Error> {
        let expr = self.parse_expression(BindingPower::DEFAULT)?;
        let next = self.lexer.peek()?;

        let Some(expr) = expr else {
            let position = next.position.clone();
            return Err(Error::new(ErrorImpl::EmptyExpression { found: next }, position));
        };

        if !next.is_eof() {
            let position = next.position.clone();
            return Err(Error::new(ErrorImpl::TrailingInput { found: next }, position));
        }

        Ok(expr)
    }
}

/// Parses a complete expression held in a string.
pub fn parse_expression_source(source: &str, file: Option<String>) -> Result<ExprNode, Error> {
    let mut lexer = Lexer::from_source(source, file);
    ExprParser::new(&mut lexer).parse()
}
