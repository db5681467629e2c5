//! Declarations and statements.

use serde::Serialize;

use crate::expr::Expr;
use crate::ty::{Field, Type};

/// A function parameter. Quint operators take their arguments by value, so
/// the resolver marks every parameter `mut`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Param {
    pub name: String,
    pub ty: Type,
    pub mutable: bool,
}

impl Param {
    pub fn new(name: impl Into<String>, ty: Type, mutable: bool) -> Self {
        Param {
            name: name.into(),
            ty,
            mutable,
        }
    }
}

/// A top-level item.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub enum Decl {
    /// `pub struct Name { ... }`, from a record `typedef`.
    Struct {
        name: String,
        fields: Vec<Field>,
        attributes: Vec<String>,
    },
    /// `pub fn name(...) -> Ret { ... }`, from a `puredef`.
    Function {
        name: String,
        params: Vec<Param>,
        return_type: Type,
        body: Vec<Stmt>,
        attributes: Vec<String>,
    },
    /// `pub const NAME: Ty = value;`, from a `pureval`.
    Const { name: String, ty: Type, value: Expr },
    /// A `val` binding. Only consumed by `let` resolution; the module
    /// pipeline never keeps one as a top-level item.
    Val { name: String, value: Expr },
    /// `pub type Name = Ty;`, from a non-record `typedef`.
    TypeAlias { name: String, ty: Type },
}

impl Decl {
    /// The declared name.
    pub fn name(&self) -> &str {
        match self {
            Decl::Struct { name, .. }
            | Decl::Function { name, .. }
            | Decl::Const { name, .. }
            | Decl::Val { name, .. }
            | Decl::TypeAlias { name, .. } => name,
        }
    }
}

/// A statement inside a function body.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub enum Stmt {
    /// `dest = value;`
    Assign { dest: Expr, value: Expr },
    /// `return value;`
    Return(Expr),
}
