use log::debug;

use crate::{
    ast::{
        ast::{Stmt, TypeName},
        expressions::ExprNode,
    },
    errors::errors::Error,
    lexer::tokens::{Token, TokenKind},
};

use super::parser::Parser;

const STATEMENT: &str = "statement";
const FUNCTION_BODY: &str = "function body";
const FUNC_CALL: &str = "function call";
const ASSIGNMENT: &str = "assignment";
const DECLARATION: &str = "declaration";
const ITER: &str = "iter definition";

/// `'{' Body '}'`. A missing `{` is reported and the body parsed anyway.
pub fn parse_block(parser: &mut Parser, context: &str) -> Result<Vec<Stmt>, Error> {
    parser.expect(TokenKind::OpenCurly, "'{'", context)?;
    let body = parse_body(parser, context)?;
    parser.expect(TokenKind::CloseCurly, "'}'", context)?;

    Ok(body)
}

/// `Body := Stmnt Body | ε`, ending in front of `}`.
pub fn parse_body(parser: &mut Parser, context: &str) -> Result<Vec<Stmt>, Error> {
    debug!("entering body of {}", context);
    let mut body = Vec::new();

    loop {
        match parser.peek_kind()? {
            TokenKind::CloseCurly => return Ok(body),
            TokenKind::EOF => {
                parser.report_found("'}'", context)?;
                parser.synchronize(&[TokenKind::CloseCurly], context)?;
            }
            _ => {
                if let Some(stmt) = parse_stmt(parser)? {
                    body.push(stmt);
                }
            }
        }
    }
}

/// Parses one statement. Statements that needed recovery yield `None`.
pub fn parse_stmt(parser: &mut Parser) -> Result<Option<Stmt>, Error> {
    debug!("entering statement");

    match parser.peek_kind()? {
        TokenKind::Identifier => {
            let name = parser.advance()?;
            match parser.peek_kind()? {
                TokenKind::OpenParen => {
                    parser.advance()?;
                    parse_rfuncall(parser, name)
                }
                TokenKind::Assignment => {
                    parser.advance()?;
                    parse_assignment(parser, name)
                }
                _ => {
                    parser.report_found("'(' or '='", STATEMENT)?;
                    parser.recover_statement(STATEMENT)?;
                    Ok(None)
                }
            }
        }
        TokenKind::Int | TokenKind::Bool => parse_declaration(parser),
        TokenKind::Iter => parse_iter(parser),
        _ => {
            parser.report_found("statement", FUNCTION_BODY)?;
            parser.recover_statement(STATEMENT)?;
            Ok(None)
        }
    }
}

/// `Rfuncall := Fargs ')' ';' | ')' ';'`, entered after `Id '('`.
fn parse_rfuncall(parser: &mut Parser, callee: Token) -> Result<Option<Stmt>, Error> {
    debug!("entering call to {}", callee.value);
    let errors = parser.error_count();

    let args = if parser.at(TokenKind::CloseParen)? {
        Vec::new()
    } else {
        parse_fargs(parser)?
    };

    // A broken argument that ran into `}` has been reported already.
    if parser.error_count() != errors && !parser.at(TokenKind::CloseParen)? {
        parser.recover_statement(FUNC_CALL)?;
        return Ok(None);
    }

    if parser.expect(TokenKind::CloseParen, "')'", FUNC_CALL)?.is_none() {
        parser.recover_statement(FUNC_CALL)?;
        return Ok(None);
    }
    parser.expect(TokenKind::Semicolon, "';'", FUNC_CALL)?;

    if parser.error_count() != errors {
        return Ok(None);
    }

    Ok(Some(Stmt::Call {
        callee: callee.value,
        args,
        position: callee.position,
    }))
}

/// `Fargs := Expr (',' Fargs)?`
fn parse_fargs(parser: &mut Parser) -> Result<Vec<ExprNode>, Error> {
    // A `;` is skipped so that `f(;);` realigns on its `)`.
    const SYNC: &[TokenKind] = &[TokenKind::Comma, TokenKind::CloseParen, TokenKind::CloseCurly];

    let mut args = Vec::new();

    loop {
        match parser.parse_expression(FUNC_CALL)? {
            Some(arg) => args.push(arg),
            None => {
                parser.synchronize(SYNC, FUNC_CALL)?;
            }
        }

        if !parser.at(TokenKind::Comma)? {
            return Ok(args);
        }
        parser.advance()?;
    }
}

/// `Id '=' Expr ';'`, entered after `Id '='`.
fn parse_assignment(parser: &mut Parser, target: Token) -> Result<Option<Stmt>, Error> {
    debug!("entering assignment to {}", target.value);
    let errors = parser.error_count();

    let Some(value) = parser.parse_expression(ASSIGNMENT)? else {
        parser.recover_statement(ASSIGNMENT)?;
        return Ok(None);
    };
    parser.expect(TokenKind::Semicolon, "';'", ASSIGNMENT)?;

    if parser.error_count() != errors {
        return Ok(None);
    }

    Ok(Some(Stmt::Assign {
        target: target.value,
        value,
        position: target.position,
    }))
}

/// `Type Id ';'`
fn parse_declaration(parser: &mut Parser) -> Result<Option<Stmt>, Error> {
    debug!("entering declaration");
    let errors = parser.error_count();

    let ty = match parser.advance()?.kind {
        TokenKind::Bool => TypeName::Bool,
        _ => TypeName::Int,
    };

    let Some(name) = parser.expect(TokenKind::Identifier, "Id", DECLARATION)? else {
        parser.recover_statement(DECLARATION)?;
        return Ok(None);
    };
    parser.expect(TokenKind::Semicolon, "';'", DECLARATION)?;

    if parser.error_count() != errors {
        return Ok(None);
    }

    Ok(Some(Stmt::Declare {
        ty,
        name: name.value,
        position: name.position,
    }))
}

/// Tokens that open each piece of an iter header, in order, followed by
/// the `}` that ends the enclosing body.
const HEADER_MARKERS: [TokenKind; 7] = [
    TokenKind::Identifier,
    TokenKind::Define,
    TokenKind::Semicolon,
    TokenKind::Comma,
    TokenKind::CloseParen,
    TokenKind::OpenCurly,
    TokenKind::CloseCurly,
];

/// `Iter := 'iter' '(' Id ':=' Expr ';' Expr ',' Expr ')' '{' Body '}'`
///
/// Each piece of the header resynchronizes on the markers of the pieces
/// after it. Once one piece is missing, the following ones are not reported
/// until the parser is back in step.
fn parse_iter(parser: &mut Parser) -> Result<Option<Stmt>, Error> {
    debug!("entering iter");
    let errors = parser.error_count();
    let keyword = parser.advance()?;
    let mut recovering = false;

    header_token(parser, TokenKind::OpenParen, "'('", &HEADER_MARKERS[0..], &mut recovering)?;
    let variable =
        header_token(parser, TokenKind::Identifier, "Id", &HEADER_MARKERS[1..], &mut recovering)?;
    let start =
        header_section(parser, TokenKind::Define, "':='", &HEADER_MARKERS[2..], &mut recovering)?;
    let end =
        header_section(parser, TokenKind::Semicolon, "';'", &HEADER_MARKERS[3..], &mut recovering)?;
    let step =
        header_section(parser, TokenKind::Comma, "','", &HEADER_MARKERS[4..], &mut recovering)?;
    header_token(parser, TokenKind::CloseParen, "')'", &HEADER_MARKERS[5..], &mut recovering)?;

    // The header was abandoned at the enclosing `}`.
    if recovering && !parser.at(TokenKind::OpenCurly)? {
        return Ok(None);
    }

    let body = parse_block(parser, ITER)?;

    if parser.error_count() != errors {
        return Ok(None);
    }

    Ok(match (variable, start, end, step) {
        (Some(variable), Some(start), Some(end), Some(step)) => Some(Stmt::Iter {
            variable: variable.value,
            start,
            end,
            step,
            body,
            position: keyword.position,
        }),
        _ => None,
    })
}

fn header_token(
    parser: &mut Parser,
    kind: TokenKind,
    expected: &str,
    markers: &[TokenKind],
    recovering: &mut bool,
) -> Result<Option<Token>, Error> {
    if parser.at(kind)? {
        *recovering = false;
        return Ok(Some(parser.advance()?));
    }

    if !*recovering {
        parser.report_found(expected, ITER)?;
    }
    parser.synchronize(markers, ITER)?;
    *recovering = true;

    Ok(None)
}

/// A leading token followed by an expression.
fn header_section(
    parser: &mut Parser,
    lead: TokenKind,
    expected: &str,
    markers: &[TokenKind],
    recovering: &mut bool,
) -> Result<Option<ExprNode>, Error> {
    if header_token(parser, lead, expected, markers, recovering)?.is_none() {
        return Ok(None);
    }

    match parser.parse_expression(ITER)? {
        Some(expr) => Ok(Some(expr)),
        None => {
            parser.synchronize(markers, ITER)?;
            *recovering = true;
            Ok(None)
        }
    }
}
