//! Unit tests for the parser module.
//!
//! This module contains tests for:
//! - Expression parsing and evaluation
//! - Malformed expressions
//! - Program parsing and the trees it builds
//! - Diagnostics and error recovery
//! - The error threshold

use super::{
    context::MAX_ERRORS,
    expr::{parse_expression_source, ExprParser},
    lookups::BindingPower,
    parser::parse,
};
use crate::{
    ast::{
        ast::{Stmt, TypeName},
        expressions::Environment,
    },
    errors::errors::{ErrorCategory, ErrorImpl},
    lexer::{lexer::Lexer, tokens::TokenKind},
};

fn eval(source: &str) -> f64 {
    parse_expression_source(source, Some("test.fx".to_string()))
        .unwrap()
        .eval()
        .unwrap()
}

#[test]
fn test_power_is_right_associative() {
    assert_eq!(eval("2^2^2"), 16.0);
    assert_eq!(eval("2^2^2^2"), 65536.0);
    assert_eq!(eval("2^3^2"), 512.0);
}

#[test]
fn test_precedence_and_left_associativity() {
    assert_eq!(eval("2*2+2"), 6.0);
    assert_eq!(eval("2+2*2"), 6.0);
    assert_eq!(eval("1 - 2 - 3"), -4.0);
    assert_eq!(eval("3*(4+5)"), 27.0);
}

#[test]
fn test_prefix_operators() {
    assert_eq!(eval("-(2)"), -2.0);
    assert_eq!(eval("--(2)"), 2.0);
    assert_eq!(eval("-2^2"), -4.0);
    assert_eq!(eval("2^-1"), 0.5);
    assert!((eval("3.0 *+5.2") - 15.6).abs() < 1e-9);
}

#[test]
fn test_float_and_hex_literals() {
    assert!((eval("1.5 * 2.") - 3.0).abs() < 1e-9);
    assert_eq!(eval("0x10 + 1"), 17.0);
}

#[test]
fn test_expression_tree_shape() {
    let expr = parse_expression_source("1 + 2 * 3", None).unwrap();
    assert_eq!(expr.to_string(), "(+ 1 (* 2 3))");
    assert_eq!(expr.kind(), TokenKind::Plus);

    let expr = parse_expression_source("(1 + 2) * 3", None).unwrap();
    assert_eq!(expr.to_string(), "(* (+ 1 2) 3)");

    let expr = parse_expression_source("-x", None).unwrap();
    assert!(expr.is_unary());
    assert_eq!(expr.to_string(), "(- x)");
}

#[test]
fn test_evaluate_with_environment() {
    let expr = parse_expression_source("x * 2 + y", None).unwrap();

    let mut env = Environment::new();
    env.insert("x".to_string(), 3.0);
    env.insert("y".to_string(), 0.5);
    assert_eq!(expr.eval_in(&env).unwrap(), 6.5);

    let error = expr.eval().unwrap_err();
    assert!(matches!(error.get_impl(), ErrorImpl::UnboundIdentifier { name } if name == "x"));
    assert_eq!(error.category(), ErrorCategory::Evaluation);
}

#[test]
fn test_boolean_is_not_numeric() {
    let expr = parse_expression_source("True + 1", None).unwrap();
    let error = expr.eval().unwrap_err();
    assert!(matches!(error.get_impl(), ErrorImpl::NotNumeric { .. }));
}

#[test]
fn test_malformed_expressions() {
    let cases = [
        "",
        "3.0 *",
        "* 3.0",
        "3.0 *4.7 5.2",
        "3.0 * 4.7+5.2)",
        "(",
        "()",
        "-",
        "3.0 **5.2",
        "1 (2)",
    ];

    for source in cases {
        let result = parse_expression_source(source, None);
        assert!(result.is_err(), "{:?} should not parse", source);
        assert_eq!(result.unwrap_err().category(), ErrorCategory::Syntax);
    }
}

#[test]
fn test_malformed_expression_kinds() {
    let kind = |source: &str| parse_expression_source(source, None).unwrap_err().get_error_name().to_string();

    assert_eq!(kind(""), "EmptyExpression");
    assert_eq!(kind("()"), "EmptyExpression");
    assert_eq!(kind("(1+2"), "UnmatchedParenthesis");
    assert_eq!(kind("("), "UnmatchedParenthesis");
    assert_eq!(kind("3.0 *"), "MissingOperand");
    assert_eq!(kind("-"), "MissingOperand");
    assert_eq!(kind("* 3.0"), "NotAPrefixForm");
    assert_eq!(kind("1 (2)"), "NotAnInfixForm");
    assert_eq!(kind("3.0 *4.7 5.2"), "TrailingInput");
    assert_eq!(kind("1 + 2)"), "TrailingInput");
}

#[test]
fn test_expression_stops_at_lower_binding_power() {
    let mut lexer = Lexer::from_source("1 * 2 + 3", None);
    let mut parser = ExprParser::new(&mut lexer);

    let expr = parser
        .parse_expression(BindingPower::ADDITIVE)
        .unwrap()
        .unwrap();
    assert_eq!(expr.to_string(), "(* 1 2)");
    assert_eq!(lexer.peek_kind().unwrap(), TokenKind::Plus);
}

#[test]
fn test_expression_at_end_of_input_is_absent() {
    let mut lexer = Lexer::from_source("  ", None);
    let mut parser = ExprParser::new(&mut lexer);

    assert!(parser.parse_expression(BindingPower::DEFAULT).unwrap().is_none());
}

#[test]
fn test_parse_empty_main() {
    let (diagnostics, result) = parse("func main(){}", Some("test.fx".to_string()));

    assert!(diagnostics.is_empty());
    let program = result.unwrap();
    assert_eq!(program.functions.len(), 1);
    assert!(program.functions[0].is_main());
    assert!(program.functions[0].body.is_empty());
}

#[test]
fn test_parse_empty_source() {
    let (diagnostics, result) = parse("// nothing here", None);

    assert!(diagnostics.is_empty());
    assert!(result.unwrap().functions.is_empty());
}

#[test]
fn test_parse_program() {
    let source = "\
func add(int a, bool b) {
    int c;
    c = a + 2 * a;
    print(c, 1);
    done();
}

func main() {
    iter (i := 0; 10, 1) {
        add(i, True);
    }
}
";
    let (diagnostics, result) = parse(source, Some("test.fx".to_string()));
    assert!(diagnostics.is_empty(), "{:?}", diagnostics);

    let program = result.unwrap();
    assert_eq!(program.functions.len(), 2);

    let add = program.find_function("add").unwrap();
    assert_eq!(add.params.len(), 2);
    assert_eq!(add.params[0].ty, TypeName::Int);
    assert_eq!(add.params[1].ty, TypeName::Bool);
    assert_eq!(add.params[1].name, "b");
    assert_eq!(add.body.len(), 4);

    match &add.body[1] {
        Stmt::Assign { target, value, .. } => {
            assert_eq!(target, "c");
            assert_eq!(value.to_string(), "(+ a (* 2 a))");
        }
        other => panic!("expected an assignment, got {:?}", other),
    }
    match &add.body[3] {
        Stmt::Call { callee, args, .. } => {
            assert_eq!(callee, "done");
            assert!(args.is_empty());
        }
        other => panic!("expected a call, got {:?}", other),
    }

    let main = program.find_function("main").unwrap();
    match &main.body[0] {
        Stmt::Iter {
            variable,
            start,
            end,
            body,
            position,
            ..
        } => {
            assert_eq!(variable, "i");
            assert_eq!(start.to_string(), "0");
            assert_eq!(end.to_string(), "10");
            assert_eq!(body.len(), 1);
            assert_eq!(position.line(), 9);
        }
        other => panic!("expected an iter, got {:?}", other),
    }
}

#[test]
fn test_recovery_continues_after_errors() {
    let source = "\
func main() {
    x = ;
    y = 2;
    f(1, 2;
}
";
    let (diagnostics, result) = parse(source, Some("test.fx".to_string()));

    assert_eq!(diagnostics.len(), 2);
    assert_eq!(
        diagnostics[0].to_string(),
        "test.fx:2: Expected an operand in assignment, found ;"
    );
    assert_eq!(diagnostics[1].expected, "')'");
    assert_eq!(diagnostics[1].context, "function call");
    assert_eq!(diagnostics[1].position.line(), 4);

    // Only the statement that parsed cleanly is kept.
    let program = result.unwrap();
    assert_eq!(program.functions[0].body.len(), 1);
}

#[test]
fn test_unmatched_parenthesis_in_statement() {
    let (diagnostics, result) = parse("func main() { x = (1+2; y = 1; }", None);

    assert!(result.is_ok());
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].expected, "')'");
    assert_eq!(diagnostics[0].found.kind, TokenKind::Semicolon);
}

#[test]
fn test_missing_semicolon() {
    let (diagnostics, result) = parse("func main() {\n x = 1\n y = 2;\n}", None);

    assert!(result.is_ok());
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].expected, "';'");
    assert_eq!(diagnostics[0].found.value, "y");
    assert_eq!(diagnostics[0].position.line(), 3);
}

#[test]
fn test_too_many_errors() {
    let source = "func main() {\n a = 1\n b = 2\n c = 3\n d = 4\n e = 5\n f = 6\n g = 7;\n}";
    let (diagnostics, result) = parse(source, None);

    assert_eq!(diagnostics.len(), MAX_ERRORS);
    let error = result.unwrap_err();
    assert!(matches!(error.get_impl(), ErrorImpl::TooManyErrors { count: 5 }));
    assert_eq!(error.category(), ErrorCategory::Fatal);
    assert_eq!(diagnostics[4].found.value, "f");
}

#[test]
fn test_junk_before_function() {
    let (diagnostics, result) = parse("x = 1;\nfunc main() {}", None);

    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].expected, "'func'");
    assert_eq!(diagnostics[0].context, "program");
    assert_eq!(result.unwrap().functions.len(), 1);
}

#[test]
fn test_missing_function_name() {
    let (diagnostics, result) = parse("func (int a) { x = 1; }", None);

    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].expected, "main or function id");
    assert!(result.unwrap().functions.is_empty());
}

#[test]
fn test_missing_separator_is_blamed_first() {
    let (diagnostics, _) = parse("func f(int a b) {}", None);
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].expected, "','");
    assert_eq!(diagnostics[0].context, "function arguments");

    let (diagnostics, result) = parse("func f(int a int b) {}", None);
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].expected, "','");
    assert!(result.unwrap().functions.is_empty());

    let (diagnostics, _) = parse("func f(int a, b) {}", None);
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].expected, "type");

    let (diagnostics, _) = parse("func f(int a, int) {}", None);
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].expected, "Id");
}

#[test]
fn test_bad_statement_start() {
    let (diagnostics, result) = parse("func main() { x 1; 2; y = 1; }", None);

    assert!(result.is_ok());
    assert_eq!(diagnostics.len(), 2);
    assert_eq!(diagnostics[0].expected, "'(' or '='");
    assert_eq!(diagnostics[1].expected, "statement");
    assert_eq!(result.unwrap().functions[0].body.len(), 1);
}

#[test]
fn test_iter_header_recovery() {
    let source = "func main() {\n iter (i 0; 10, 1) {\n  x = 1;\n }\n y = 2;\n}";
    let (diagnostics, result) = parse(source, None);

    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].expected, "':='");
    assert_eq!(diagnostics[0].context, "iter definition");

    let program = result.unwrap();
    assert_eq!(program.functions[0].body.len(), 1);
}

#[test]
fn test_end_of_input_in_body_is_fatal() {
    let (diagnostics, result) = parse("func main() {\n x = 1;\n", None);

    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].expected, "'}'");
    let error = result.unwrap_err();
    assert!(matches!(error.get_impl(), ErrorImpl::UnexpectedEof { .. }));
}

#[test]
fn test_lexical_error_aborts() {
    let (diagnostics, result) = parse("func main() { x = 1 # 2; }", None);

    assert!(diagnostics.is_empty());
    let error = result.unwrap_err();
    assert_eq!(error.category(), ErrorCategory::Lexical);
    assert!(error.is_fatal());
}

#[test]
fn test_broken_iter_header_stops_at_block_end() {
    let (diagnostics, result) = parse("func main() { iter } func g() { x = 1; }", None);

    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].expected, "'('");
    assert_eq!(diagnostics[0].found.kind, TokenKind::CloseCurly);

    let program = result.unwrap();
    assert!(program.find_function("main").unwrap().body.is_empty());
    assert_eq!(program.find_function("g").unwrap().body.len(), 1);
}

#[test]
fn test_iter_header_missing_define_stops_at_block_end() {
    let source = "func main() {\n iter (i 0 }\nfunc g() { y = 2; }";
    let (diagnostics, result) = parse(source, None);

    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].expected, "':='");
    assert_eq!(diagnostics[0].context, "iter definition");
    assert_eq!(result.unwrap().functions.len(), 2);
}

#[test]
fn test_empty_call_argument_reported_once() {
    let (diagnostics, result) = parse("func main() { f(;); y = 1; }", None);

    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].context, "function call");
    assert_eq!(diagnostics[0].found.kind, TokenKind::Semicolon);
    assert_eq!(result.unwrap().functions[0].body.len(), 1);
}

#[test]
fn test_broken_call_argument_at_block_end() {
    let (diagnostics, result) = parse("func main() { f(* }\nfunc g() {}", None);

    assert_eq!(diagnostics.len(), 1);
    assert_eq!(result.unwrap().functions.len(), 2);
}
