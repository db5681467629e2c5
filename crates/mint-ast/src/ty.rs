//! Target-language types.
//!
//! `Type` mirrors the small subset of Rust types the transpiler produces.
//! Its `Display` impl is the canonical single-line rendering: the emitter
//! prints types through it, and the resolver uses it to name the struct in a
//! record construction.

use std::fmt;

use serde::Serialize;

/// Name of the wildcard type, rendered as the Rust inference placeholder.
pub const WILDCARD: &str = "_";

/// A named, typed field of a record type or struct declaration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Field {
    pub name: String,
    pub ty: Type,
}

impl Field {
    pub fn new(name: impl Into<String>, ty: Type) -> Self {
        Field {
            name: name.into(),
            ty,
        }
    }
}

/// A Rust type as produced by the transpiler.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub enum Type {
    /// An anonymous record. Top-level records become `Decl::Struct`s instead.
    Struct(Vec<Field>),
    /// `String`.
    Str,
    /// `u64`.
    UInt64,
    /// `bool`.
    Bool,
    /// `(A, B, ...)`.
    Tuple(Vec<Type>),
    /// `[T]`.
    List(Box<Type>),
    /// `HashSet<T>`.
    Set(Box<Type>),
    /// `HashMap<K, V>`. Quint functions are modeled as maps from argument to result.
    Map(Box<Type>, Box<Type>),
    /// A reference to a declared type by name, or the wildcard `_`.
    Named(String),
    /// A borrow: `&T` or `&mut T`.
    Ref { inner: Box<Type>, mutable: bool },
}

impl Type {
    /// The wildcard type `_`, used when an element type is not known locally.
    pub fn wildcard() -> Type {
        Type::Named(WILDCARD.to_string())
    }

    pub fn named(name: impl Into<String>) -> Type {
        Type::Named(name.into())
    }

    pub fn list(element: Type) -> Type {
        Type::List(Box::new(element))
    }

    pub fn set(element: Type) -> Type {
        Type::Set(Box::new(element))
    }

    pub fn map(key: Type, value: Type) -> Type {
        Type::Map(Box::new(key), Box::new(value))
    }

    pub fn reference(inner: Type, mutable: bool) -> Type {
        Type::Ref {
            inner: Box::new(inner),
            mutable,
        }
    }

    /// `HashSet<_>`.
    pub fn wildcard_set() -> Type {
        Type::set(Type::wildcard())
    }

    /// `HashMap<_, _>`.
    pub fn wildcard_map() -> Type {
        Type::map(Type::wildcard(), Type::wildcard())
    }

    pub fn is_wildcard(&self) -> bool {
        matches!(self, Type::Named(name) if name == WILDCARD)
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Struct(fields) => {
                if fields.is_empty() {
                    return write!(f, "struct {{}}");
                }
                write!(f, "struct {{ ")?;
                for (i, field) in fields.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "pub {}: {}", field.name, field.ty)?;
                }
                write!(f, " }}")
            }
            Type::Str => write!(f, "String"),
            Type::UInt64 => write!(f, "u64"),
            Type::Bool => write!(f, "bool"),
            Type::Tuple(elems) => {
                write!(f, "(")?;
                for (i, elem) in elems.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", elem)?;
                }
                // A one-element tuple needs the trailing comma.
                if elems.len() == 1 {
                    write!(f, ",")?;
                }
                write!(f, ")")
            }
            Type::List(elem) => write!(f, "[{}]", elem),
            Type::Set(elem) => write!(f, "HashSet<{}>", elem),
            Type::Map(key, value) => write!(f, "HashMap<{}, {}>", key, value),
            Type::Named(name) => write!(f, "{}", name),
            Type::Ref { inner, mutable } => {
                if *mutable {
                    write!(f, "&mut {}", inner)
                } else {
                    write!(f, "&{}", inner)
                }
            }
        }
    }
}
