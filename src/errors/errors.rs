use std::fmt::Display;

use thiserror::Error;

use crate::{lexer::tokens::Token, Position};

#[derive(Debug, Clone)]
pub struct Error {
    internal_error: ErrorImpl,
    position: Position,
}

/// Broad classes of failure. Lexical and fatal errors end a parse session,
/// syntax errors are absorbed by the grammar parser's recovery.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Lexical,
    Syntax,
    Fatal,
    Evaluation,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, position: Position) -> Self {
        Error {
            internal_error: error_impl,
            position,
        }
    }

    pub fn get_position(&self) -> &Position {
        &self.position
    }

    pub fn get_impl(&self) -> &ErrorImpl {
        &self.internal_error
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => "UnrecognisedToken",
            ErrorImpl::BadOperator { .. } => "BadOperator",
            ErrorImpl::BadSeparator { .. } => "BadSeparator",
            ErrorImpl::MalformedNumber { .. } => "MalformedNumber",
            ErrorImpl::NumberParseError { .. } => "NumberParseError",
            ErrorImpl::NotAPrefixForm { .. } => "NotAPrefixForm",
            ErrorImpl::NotAnInfixForm { .. } => "NotAnInfixForm",
            ErrorImpl::MissingOperand { .. } => "MissingOperand",
            ErrorImpl::UnmatchedParenthesis { .. } => "UnmatchedParenthesis",
            ErrorImpl::EmptyExpression { .. } => "EmptyExpression",
            ErrorImpl::TrailingInput { .. } => "TrailingInput",
            ErrorImpl::TooManyErrors { .. } => "TooManyErrors",
            ErrorImpl::UnexpectedEof { .. } => "UnexpectedEof",
            ErrorImpl::UnboundIdentifier { .. } => "UnboundIdentifier",
            ErrorImpl::NotNumeric { .. } => "NotNumeric",
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. }
            | ErrorImpl::BadOperator { .. }
            | ErrorImpl::BadSeparator { .. }
            | ErrorImpl::MalformedNumber { .. }
            | ErrorImpl::NumberParseError { .. } => ErrorCategory::Lexical,
            ErrorImpl::NotAPrefixForm { .. }
            | ErrorImpl::NotAnInfixForm { .. }
            | ErrorImpl::MissingOperand { .. }
            | ErrorImpl::UnmatchedParenthesis { .. }
            | ErrorImpl::EmptyExpression { .. }
            | ErrorImpl::TrailingInput { .. } => ErrorCategory::Syntax,
            ErrorImpl::TooManyErrors { .. } | ErrorImpl::UnexpectedEof { .. } => {
                ErrorCategory::Fatal
            }
            ErrorImpl::UnboundIdentifier { .. } | ErrorImpl::NotNumeric { .. } => {
                ErrorCategory::Evaluation
            }
        }
    }

    /// True for errors that must unwind to the driver instead of being
    /// turned into a diagnostic.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self.category(),
            ErrorCategory::Lexical | ErrorCategory::Fatal
        )
    }

    /// What the parser wanted at the failure point, phrased for a diagnostic.
    pub fn expected(&self) -> String {
        match &self.internal_error {
            ErrorImpl::NotAPrefixForm { .. } => String::from("an operand"),
            ErrorImpl::NotAnInfixForm { .. } => String::from("an operator"),
            ErrorImpl::MissingOperand { operator, .. } => {
                format!("an operand after `{}`", operator.value)
            }
            ErrorImpl::UnmatchedParenthesis { .. } => String::from("')'"),
            ErrorImpl::EmptyExpression { .. } => String::from("an expression"),
            ErrorImpl::TrailingInput { .. } => String::from("end of input"),
            other => other.to_string(),
        }
    }

    /// The token the parser tripped over, when the error carries one.
    pub fn found(&self) -> Option<&Token> {
        match &self.internal_error {
            ErrorImpl::NotAPrefixForm { found }
            | ErrorImpl::NotAnInfixForm { found }
            | ErrorImpl::MissingOperand { found, .. }
            | ErrorImpl::UnmatchedParenthesis { found }
            | ErrorImpl::EmptyExpression { found }
            | ErrorImpl::TrailingInput { found } => Some(found),
            _ => None,
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => ErrorTip::None,
            ErrorImpl::BadOperator { operator } => {
                ErrorTip::Suggestion(format!("`{}` is not an operator", operator))
            }
            ErrorImpl::BadSeparator { separator } => {
                ErrorTip::Suggestion(format!("`{}` is not a separator", separator))
            }
            ErrorImpl::MalformedNumber { token } => ErrorTip::Suggestion(format!(
                "Malformed number: `{}`, hexadecimal literals need at least one digit after `0x`",
                token
            )),
            ErrorImpl::NumberParseError { token } => ErrorTip::Suggestion(format!(
                "Invalid number: `{}`, is it above the integer limit?",
                token
            )),
            ErrorImpl::NotAPrefixForm { found } => ErrorTip::Suggestion(format!(
                "`{}` cannot start an expression",
                found.value
            )),
            ErrorImpl::NotAnInfixForm { found } => ErrorTip::Suggestion(format!(
                "`{}` cannot follow an operand",
                found.value
            )),
            ErrorImpl::MissingOperand { operator, .. } => ErrorTip::Suggestion(format!(
                "Operator `{}` is missing its right operand",
                operator.value
            )),
            ErrorImpl::UnmatchedParenthesis { .. } => {
                ErrorTip::Suggestion(String::from("Unmatched parenthesis, did you miss a `)`?"))
            }
            ErrorImpl::EmptyExpression { .. } => {
                ErrorTip::Suggestion(String::from("Expected an expression"))
            }
            ErrorImpl::TrailingInput { found } => ErrorTip::Suggestion(format!(
                "Unexpected `{}` after the end of the expression",
                found.value
            )),
            ErrorImpl::TooManyErrors { count } => ErrorTip::Suggestion(format!(
                "Parsing stopped after {} syntax errors",
                count
            )),
            ErrorImpl::UnexpectedEof { context } => ErrorTip::Suggestion(format!(
                "Reached end of file while recovering {}",
                context
            )),
            ErrorImpl::UnboundIdentifier { name } => {
                ErrorTip::Suggestion(format!("Identifier `{}` has no value", name))
            }
            ErrorImpl::NotNumeric { token } => {
                ErrorTip::Suggestion(format!("`{}` is not a number", token))
            }
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.position, self.internal_error)
    }
}

impl std::error::Error for Error {}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

#[derive(Error, Debug, Clone)]
pub enum ErrorImpl {
    #[error("unrecognised token: {token:?}")]
    UnrecognisedToken { token: String },
    #[error("bad operator: {operator:?}")]
    BadOperator { operator: String },
    #[error("bad separator: {separator:?}")]
    BadSeparator { separator: String },
    #[error("malformed number: {token:?}")]
    MalformedNumber { token: String },
    #[error("error parsing number: {token:?}")]
    NumberParseError { token: String },
    #[error("{:?} is not a valid prefix form", .found.value)]
    NotAPrefixForm { found: Token },
    #[error("{:?} is not a valid infix form", .found.value)]
    NotAnInfixForm { found: Token },
    #[error("missing operand for {:?}", .operator.value)]
    MissingOperand { operator: Token, found: Token },
    #[error("unmatched parenthesis, found {:?}", .found.value)]
    UnmatchedParenthesis { found: Token },
    #[error("empty expression")]
    EmptyExpression { found: Token },
    #[error("unexpected {:?} after expression", .found.value)]
    TrailingInput { found: Token },
    #[error("too many syntax errors ({count})")]
    TooManyErrors { count: usize },
    #[error("unexpected end of input while recovering {context}")]
    UnexpectedEof { context: String },
    #[error("identifier {name:?} is not bound")]
    UnboundIdentifier { name: String },
    #[error("{token:?} is not numeric")]
    NotNumeric { token: String },
}
