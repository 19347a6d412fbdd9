use log::debug;

use crate::{
    ast::ast::{FuncDecl, Param, Program, TypeName},
    errors::errors::Error,
    lexer::tokens::TokenKind,
    Position,
};

use super::{parser::Parser, stmt::parse_block};

const PROGRAM: &str = "program";
const FUNC_DECL: &str = "function declaration";
const FUNC_ARGS: &str = "function arguments";
const FUNC_BODY: &str = "function";

struct Signature {
    name: String,
    params: Vec<Param>,
    position: Position,
}

/// `Prog := Func Prog | ε`
pub fn parse_prog(parser: &mut Parser) -> Result<Program, Error> {
    debug!("entering program");
    let mut program = Program::default();

    loop {
        match parser.peek_kind()? {
            TokenKind::EOF => return Ok(program),
            TokenKind::Func => {
                if let Some(func) = parse_func(parser)? {
                    program.functions.push(func);
                }
            }
            _ => {
                parser.report_found("'func'", PROGRAM)?;
                parser.synchronize(&[TokenKind::Func], PROGRAM)?;
            }
        }
    }
}

/// `Func := Fsig '{' Body '}'`
///
/// A function whose signature needed recovery is dropped, although its body
/// is still parsed for diagnostics.
pub fn parse_func(parser: &mut Parser) -> Result<Option<FuncDecl>, Error> {
    debug!("entering function");
    let signature = parse_fsig(parser)?;
    let body = parse_block(parser, FUNC_BODY)?;

    Ok(signature.map(|signature| FuncDecl {
        name: signature.name,
        params: signature.params,
        body,
        position: signature.position,
    }))
}

/// `Fsig := 'func' (Id | 'main') '(' Finside`
fn parse_fsig(parser: &mut Parser) -> Result<Option<Signature>, Error> {
    debug!("entering function signature");
    let position = parser.peek()?.position;

    if parser.expect(TokenKind::Func, "'func'", FUNC_DECL)?.is_none() {
        parser.synchronize(&[TokenKind::OpenCurly], FUNC_DECL)?;
        return Ok(None);
    }

    let name = match parser.peek_kind()? {
        TokenKind::Identifier | TokenKind::Main => Some(parser.advance()?.value),
        _ => {
            parser.report_found("main or function id", FUNC_DECL)?;
            let marker =
                parser.synchronize(&[TokenKind::OpenParen, TokenKind::OpenCurly], FUNC_DECL)?;
            if marker.kind == TokenKind::OpenCurly {
                return Ok(None);
            }
            None
        }
    };

    if parser.expect(TokenKind::OpenParen, "'('", FUNC_DECL)?.is_none() {
        let marker =
            parser.synchronize(&[TokenKind::CloseParen, TokenKind::OpenCurly], FUNC_DECL)?;
        if marker.kind == TokenKind::CloseParen {
            parser.advance()?;
        }
        return Ok(None);
    }

    let params = parse_finside(parser)?;

    Ok(match (name, params) {
        (Some(name), Some(params)) => Some(Signature {
            name,
            params,
            position,
        }),
        _ => None,
    })
}

/// `Finside := ')' | Fdecargs ')'`
fn parse_finside(parser: &mut Parser) -> Result<Option<Vec<Param>>, Error> {
    debug!("entering function parameters");
    if parser.at(TokenKind::CloseParen)? {
        parser.advance()?;
        return Ok(Some(Vec::new()));
    }

    let params = parse_fdecargs(parser)?;

    // A broken parameter list that already skipped to `{` has been reported.
    if params.is_none() && !parser.at(TokenKind::CloseParen)? {
        return Ok(None);
    }

    if parser.expect(TokenKind::CloseParen, "')'", FUNC_DECL)?.is_none() {
        parser.synchronize(&[TokenKind::OpenCurly], FUNC_DECL)?;
        return Ok(None);
    }

    Ok(params)
}

/// `Fdecargs := Type Id (',' Type Id)*`
///
/// When several pieces of a pair are missing only the first one, in the
/// order `,` then type then `Id`, is reported.
fn parse_fdecargs(parser: &mut Parser) -> Result<Option<Vec<Param>>, Error> {
    const SYNC: &[TokenKind] = &[TokenKind::CloseParen, TokenKind::OpenCurly];

    debug!("entering parameter declarations");
    let mut params = Vec::new();
    let mut clean = true;

    loop {
        let ty = match parser.peek_kind()? {
            TokenKind::Int => TypeName::Int,
            TokenKind::Bool => TypeName::Bool,
            _ => {
                parser.report_found("type", FUNC_ARGS)?;
                parser.synchronize(SYNC, FUNC_ARGS)?;
                return Ok(None);
            }
        };
        parser.advance()?;

        let Some(name) = parser.expect(TokenKind::Identifier, "Id", FUNC_ARGS)? else {
            parser.synchronize(SYNC, FUNC_ARGS)?;
            return Ok(None);
        };
        params.push(Param {
            ty,
            name: name.value,
        });

        match parser.peek_kind()? {
            TokenKind::Comma => {
                parser.advance()?;
            }
            // Another pair without a separator.
            kind if kind.is_type() => {
                parser.report_found("','", FUNC_ARGS)?;
                clean = false;
            }
            // Both the separator and the type are missing; blame the separator.
            TokenKind::Identifier => {
                parser.report_found("','", FUNC_ARGS)?;
                parser.synchronize(SYNC, FUNC_ARGS)?;
                return Ok(None);
            }
            _ => return Ok(clean.then_some(params)),
        }
    }
}
