use std::{collections::HashMap, fmt::Display};

use crate::{
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::{Literal, Token, TokenKind},
};

/// Values bound to identifiers during evaluation.
pub type Environment = HashMap<String, f64>;

/// Binary expression tree node.
///
/// Leaves (literals and identifiers) have no children, prefix operators
/// only a right child, and infix operators both children.
#[derive(Debug, Clone, PartialEq)]
pub struct ExprNode {
    pub token: Token,
    pub left: Option<Box<ExprNode>>,
    pub right: Option<Box<ExprNode>>,
}

impl ExprNode {
    pub fn leaf(token: Token) -> Self {
        ExprNode {
            token,
            left: None,
            right: None,
        }
    }

    pub fn unary(operator: Token, operand: ExprNode) -> Self {
        ExprNode {
            token: operator,
            left: None,
            right: Some(Box::new(operand)),
        }
    }

    pub fn binary(operator: Token, left: ExprNode, right: ExprNode) -> Self {
        ExprNode {
            token: operator,
            left: Some(Box::new(left)),
            right: Some(Box::new(right)),
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }

    pub fn is_unary(&self) -> bool {
        self.left.is_none() && self.right.is_some()
    }

    pub fn kind(&self) -> TokenKind {
        self.token.kind
    }

    /// Evaluates a tree that only contains numeric literals.
    pub fn eval(&self) -> Result<f64, Error> {
        self.eval_in(&Environment::new())
    }

    /// Evaluates the tree, resolving identifiers through `env`.
    ///
    /// The left subtree is always evaluated before the right one.
    pub fn eval_in(&self, env: &Environment) -> Result<f64, Error> {
        if self.is_leaf() {
            return self.eval_leaf(env);
        }

        let left = match &self.left {
            Some(left) => left.eval_in(env)?,
            None => 0.0,
        };
        let right = match &self.right {
            Some(right) => right.eval_in(env)?,
            None => 0.0,
        };

        match self.token.kind {
            TokenKind::Plus => Ok(left + right),
            TokenKind::Dash => Ok(left - right),
            TokenKind::Star => Ok(left * right),
            TokenKind::Caret => Ok(left.powf(right)),
            _ => Err(self.not_numeric()),
        }
    }

    fn eval_leaf(&self, env: &Environment) -> Result<f64, Error> {
        match (&self.token.kind, &self.token.literal) {
            (TokenKind::Integer, Literal::Integer(value)) => Ok(*value as f64),
            (TokenKind::Float, Literal::Float(value)) => Ok(*value),
            (TokenKind::Identifier, _) => env.get(&self.token.value).copied().ok_or_else(|| {
                Error::new(
                    ErrorImpl::UnboundIdentifier {
                        name: self.token.value.clone(),
                    },
                    self.token.position.clone(),
                )
            }),
            _ => Err(self.not_numeric()),
        }
    }

    fn not_numeric(&self) -> Error {
        Error::new(
            ErrorImpl::NotNumeric {
                token: self.token.value.clone(),
            },
            self.token.position.clone(),
        )
    }
}

impl Display for ExprNode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (&self.left, &self.right) {
            (None, None) => write!(f, "{}", self.token.value),
            (None, Some(right)) => write!(f, "({} {})", self.token.value, right),
            (Some(left), None) => write!(f, "({} {})", self.token.value, left),
            (Some(left), Some(right)) => {
                write!(f, "({} {} {})", self.token.value, left, right)
            }
        }
    }
}
