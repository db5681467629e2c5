//! Typed AST for the Mint transpiler.
//!
//! The AST is the meeting point of the two pipeline stages: the resolver
//! (`mint-resolve`) builds it from Quint JSON IR, the emitter (`mint-emit`)
//! renders it as Rust source. Every node category is a closed enum, so both
//! consumers match exhaustively and a new node shape cannot be forgotten in
//! either of them.
//!
//! ## Categories
//!
//! - [`Type`]: target-language types (`u64`, `String`, `HashMap<K, V>`, ...)
//! - [`Decl`]: top-level items (structs, functions, constants, aliases)
//! - [`Stmt`]: statements inside a function body
//! - [`Expr`]: expressions
//!
//! Nodes are built once and never mutated afterwards.

pub mod decl;
pub mod expr;
pub mod ty;

pub use decl::{Decl, Param, Stmt};
pub use expr::{Expr, FieldValue, Literal};
pub use ty::{Field, Type};

use serde::Serialize;

/// A `use` line at the top of the emitted file.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Import {
    pub path: String,
}

impl Import {
    pub fn new(path: impl Into<String>) -> Self {
        Import { path: path.into() }
    }
}

/// The root of the AST: imports followed by declarations in IR order.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Program {
    pub imports: Vec<Import>,
    pub decls: Vec<Decl>,
}

impl Program {
    pub fn new(imports: Vec<Import>, decls: Vec<Decl>) -> Self {
        Program { imports, decls }
    }
}
