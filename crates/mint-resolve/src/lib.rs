//! Resolution of Quint JSON IR into the Mint AST.
//!
//! ## Architecture
//!
//! - [`ty`]: type descriptors -> [`Type`](mint_ast::Type)
//! - [`decl`]: top-level declarations -> [`Decl`]
//! - [`expr`]: expressions -> [`Expr`](mint_ast::Expr), with an explicit
//!   expected type
//! - [`document`]: the document shape and the named-type index
//!
//! The three resolvers are mutually recursive. The expected type is always
//! an explicit argument, never ambient state; it is what names the struct in
//! a record construction, which the IR leaves anonymous.
//!
//! ## Pipeline
//!
//! ```text
//! Document -> modules (auxiliary ones skipped) -> declarations -> Program
//! ```

pub mod decl;
pub mod document;
pub mod error;
pub mod expr;
mod node;
pub mod ty;

use mint_ast::{Decl, Import, Program};

pub use document::{Document, NamedTypes};
pub use error::{ResolveError, ResolveWarning};
pub use ty::resolve_type;

/// Module name suffixes of auxiliary modules that are never transpiled.
const AUXILIARY_SUFFIXES: [&str; 2] = ["_stdlib", "_test"];

/// The `use` lines every emitted program starts with.
const IMPORTS: [&str; 3] = [
    "std::collections::HashMap",
    "std::collections::HashSet",
    "serde::{Deserialize, Serialize}",
];

/// Resolver state: the warnings recorded so far.
///
/// Everything else a resolver needs is passed explicitly, in particular the
/// expected type of an expression.
#[derive(Debug, Default)]
pub struct Resolver {
    warnings: Vec<ResolveWarning>,
}

impl Resolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// The recorded warnings, in the order they were raised.
    pub fn into_warnings(self) -> Vec<ResolveWarning> {
        self.warnings
    }

    fn warn(&mut self, warning: ResolveWarning) {
        self.warnings.push(warning);
    }
}

/// The outcome of resolving a whole document.
#[derive(Debug)]
pub struct Resolution {
    pub program: Program,
    pub named_types: NamedTypes,
    pub warnings: Vec<ResolveWarning>,
}

/// Resolve a decoded IR document into a [`Program`].
///
/// Declarations keep their IR order across modules. Modules named with an
/// auxiliary suffix (`_stdlib`, `_test`) are skipped.
///
/// # Errors
///
/// Returns the first fatal [`ResolveError`]; recoverable problems are
/// collected in [`Resolution::warnings`] instead.
pub fn resolve_document(doc: &Document) -> Result<Resolution, ResolveError> {
    let named_types = NamedTypes::index(&doc.types)?;
    let mut resolver = Resolver::new();
    let mut decls = Vec::new();

    for module in &doc.modules {
        if is_auxiliary_module(&module.name) {
            continue;
        }
        for decl in &module.declarations {
            match resolver.resolve_decl(decl)? {
                Some(Decl::Val { name, .. }) => {
                    resolver.warn(ResolveWarning::TopLevelVal { name });
                }
                Some(decl) => decls.push(decl),
                None => {}
            }
        }
    }

    Ok(Resolution {
        program: Program::new(fixed_imports(), decls),
        named_types,
        warnings: resolver.into_warnings(),
    })
}

/// Whether a module is an auxiliary library or test module.
pub fn is_auxiliary_module(name: &str) -> bool {
    AUXILIARY_SUFFIXES
        .iter()
        .any(|suffix| name.ends_with(suffix))
}

/// The fixed import list, independent of what the program uses.
pub fn fixed_imports() -> Vec<Import> {
    IMPORTS.iter().map(|path| Import::new(*path)).collect()
}

/// Attributes attached to every struct declaration.
pub fn struct_attributes() -> Vec<String> {
    vec!["derive(Debug, Clone, Default, Serialize, Deserialize)".to_string()]
}
