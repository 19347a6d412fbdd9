use crate::Position;

use super::expressions::ExprNode;

/// Declared type of a parameter or local.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeName {
    Int,
    Bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    pub ty: TypeName,
    pub name: String,
}

/// A `func` declaration. `main` is stored under its keyword spelling.
#[derive(Debug, Clone, PartialEq)]
pub struct FuncDecl {
    pub name: String,
    pub params: Vec<Param>,
    pub body: Vec<Stmt>,
    pub position: Position,
}

impl FuncDecl {
    pub fn is_main(&self) -> bool {
        self.name == "main"
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    Call {
        callee: String,
        args: Vec<ExprNode>,
        position: Position,
    },
    Assign {
        target: String,
        value: ExprNode,
        position: Position,
    },
    Declare {
        ty: TypeName,
        name: String,
        position: Position,
    },
    Iter {
        variable: String,
        start: ExprNode,
        end: ExprNode,
        step: ExprNode,
        body: Vec<Stmt>,
        position: Position,
    },
}

/// Everything recovered from a source file. Constructs that needed error
/// recovery are left out.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Program {
    pub functions: Vec<FuncDecl>,
}

impl Program {
    pub fn find_function(&self, name: &str) -> Option<&FuncDecl> {
        self.functions.iter().find(|func| func.name == name)
    }
}
