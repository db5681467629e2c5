//! Expressions.

use serde::Serialize;

use crate::decl::Stmt;
use crate::ty::Type;

/// A literal value.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub enum Literal {
    UInt64(u64),
    String(String),
    Bool(bool),
}

/// One `name: value` entry of a struct construction.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FieldValue {
    pub name: String,
    pub value: Expr,
}

impl FieldValue {
    pub fn new(name: impl Into<String>, value: Expr) -> Self {
        FieldValue {
            name: name.into(),
            value,
        }
    }
}

/// An expression.
///
/// `Todo` stands for any IR construct the resolver could not translate. It
/// is emitted as `todo!()` so unsupported input is visible in the output
/// rather than silently wrong.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub enum Expr {
    Literal(Literal),
    Variable(String),
    FieldAccess {
        base: Box<Expr>,
        field: String,
    },
    /// `Name { field: value, ... }`. The name comes from the expected type,
    /// never from the IR node.
    StructCons {
        struct_name: String,
        fields: Vec<FieldValue>,
    },
    EnumCons {
        enum_name: String,
        variant: String,
        args: Vec<Expr>,
    },
    Tuple(Vec<Expr>),
    Borrow(Box<Expr>),
    FunctionCall {
        name: String,
        type_args: Vec<Type>,
        args: Vec<Expr>,
    },
    StaticMethodCall {
        ty: Type,
        method: String,
        type_args: Vec<Type>,
        args: Vec<Expr>,
    },
    MethodCall {
        receiver: Box<Expr>,
        method: String,
        type_args: Vec<Type>,
        args: Vec<Expr>,
    },
    IfElse {
        cond: Box<Expr>,
        then_branch: Box<Expr>,
        else_branch: Box<Expr>,
    },
    Not(Box<Expr>),
    Add(Box<Expr>, Box<Expr>),
    /// Binds `name` to `value` for the scope of `body`; an expression, not a
    /// statement.
    Let {
        name: String,
        value: Box<Expr>,
        body: Box<Expr>,
    },
    Block(Vec<Stmt>),
    Todo,
}

impl Expr {
    pub fn u64(value: u64) -> Expr {
        Expr::Literal(Literal::UInt64(value))
    }

    pub fn string(value: impl Into<String>) -> Expr {
        Expr::Literal(Literal::String(value.into()))
    }

    pub fn bool(value: bool) -> Expr {
        Expr::Literal(Literal::Bool(value))
    }

    pub fn var(name: impl Into<String>) -> Expr {
        Expr::Variable(name.into())
    }

    pub fn borrow(inner: Expr) -> Expr {
        Expr::Borrow(Box::new(inner))
    }

    pub fn not(inner: Expr) -> Expr {
        Expr::Not(Box::new(inner))
    }

    pub fn add(left: Expr, right: Expr) -> Expr {
        Expr::Add(Box::new(left), Box::new(right))
    }

    pub fn field(base: Expr, field: impl Into<String>) -> Expr {
        Expr::FieldAccess {
            base: Box::new(base),
            field: field.into(),
        }
    }

    pub fn if_else(cond: Expr, then_branch: Expr, else_branch: Expr) -> Expr {
        Expr::IfElse {
            cond: Box::new(cond),
            then_branch: Box::new(then_branch),
            else_branch: Box::new(else_branch),
        }
    }

    pub fn let_in(name: impl Into<String>, value: Expr, body: Expr) -> Expr {
        Expr::Let {
            name: name.into(),
            value: Box::new(value),
            body: Box::new(body),
        }
    }

    /// `receiver.method::<type_args>(args)`.
    pub fn method_call(
        receiver: Expr,
        method: impl Into<String>,
        type_args: Vec<Type>,
        args: Vec<Expr>,
    ) -> Expr {
        Expr::MethodCall {
            receiver: Box::new(receiver),
            method: method.into(),
            type_args,
            args,
        }
    }
}
