//! Resolution errors and warnings.
//!
//! Resolution has two tiers. A [`ResolveError`] aborts the whole run: the IR
//! is malformed or uses a type shape the resolver cannot represent, and no
//! partial output is safe to keep. A [`ResolveWarning`] is recorded and
//! resolution continues: the declaration is dropped or the expression is
//! replaced by `todo!()`.

use std::fmt;

/// A fatal resolution error.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ResolveError {
    /// A type descriptor with a `kind` the type resolver does not know.
    UnknownTypeKind { kind: String },
    /// A required field is absent.
    MissingField { field: String, context: String },
    /// A field is present but holds the wrong JSON shape.
    WrongFieldType {
        field: String,
        expected: &'static str,
        context: String,
    },
    /// A node that must be a JSON object is not one.
    ExpectedObject { context: String },
    /// A `puredef` whose parameter names and parameter types disagree in length.
    ParamCountMismatch {
        function: String,
        names: usize,
        types: usize,
    },
    /// An operator applied to the wrong number of arguments.
    ArityMismatch {
        opcode: String,
        expected: String,
        found: usize,
    },
    /// An `int` literal that is not a non-negative integer in `u64` range.
    InvalidInteger { value: String },
    /// A key of the `types` table that is not a decimal id.
    InvalidTypeId { id: String },
}

impl ResolveError {
    /// Stable error code used in JSON diagnostics.
    pub fn code(&self) -> &'static str {
        match self {
            ResolveError::UnknownTypeKind { .. } => "R0001",
            ResolveError::MissingField { .. } => "R0002",
            ResolveError::WrongFieldType { .. } => "R0003",
            ResolveError::ExpectedObject { .. } => "R0004",
            ResolveError::ParamCountMismatch { .. } => "R0005",
            ResolveError::ArityMismatch { .. } => "R0006",
            ResolveError::InvalidInteger { .. } => "R0007",
            ResolveError::InvalidTypeId { .. } => "R0008",
        }
    }
}

impl fmt::Display for ResolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolveError::UnknownTypeKind { kind } => {
                write!(f, "kind not supported for resolving types: `{}`", kind)
            }
            ResolveError::MissingField { field, context } => {
                write!(f, "missing field `{}` in {}", field, context)
            }
            ResolveError::WrongFieldType {
                field,
                expected,
                context,
            } => write!(f, "field `{}` in {} must be {}", field, context, expected),
            ResolveError::ExpectedObject { context } => {
                write!(f, "expected {} to be a JSON object", context)
            }
            ResolveError::ParamCountMismatch {
                function,
                names,
                types,
            } => write!(
                f,
                "function `{}` has {} parameter name(s) but {} parameter type(s)",
                function, names, types
            ),
            ResolveError::ArityMismatch {
                opcode,
                expected,
                found,
            } => write!(
                f,
                "operator `{}` expects {} argument(s), found {}",
                opcode, expected, found
            ),
            ResolveError::InvalidInteger { value } => {
                write!(f, "integer literal {} does not fit in u64", value)
            }
            ResolveError::InvalidTypeId { id } => {
                write!(f, "type table key `{}` is not a numeric id", id)
            }
        }
    }
}

impl std::error::Error for ResolveError {}

/// A recoverable resolution problem.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ResolveWarning {
    /// A `def` whose qualifier is not `pureval`, `puredef` or `val`.
    UnsupportedQualifier { name: String, qualifier: String },
    /// A declaration kind other than `typedef`, `import` or `def`.
    UnsupportedDeclKind { kind: String },
    /// An expression kind the resolver does not translate.
    UnsupportedExprKind { kind: String },
    /// An `app` opcode the resolver does not translate.
    UnsupportedOpcode { opcode: String },
    /// A `Rec` construction reached without an expected type to name it.
    RecordWithoutExpectedType,
    /// A `let` whose bound definition is not a `val`.
    UnsupportedLetBinding { name: String, qualifier: String },
    /// A `val` at module level; it is never emitted as a top-level item.
    TopLevelVal { name: String },
}

impl ResolveWarning {
    /// Stable warning code used in JSON diagnostics.
    pub fn code(&self) -> &'static str {
        match self {
            ResolveWarning::UnsupportedQualifier { .. } => "W0001",
            ResolveWarning::UnsupportedDeclKind { .. } => "W0002",
            ResolveWarning::UnsupportedExprKind { .. } => "W0003",
            ResolveWarning::UnsupportedOpcode { .. } => "W0004",
            ResolveWarning::RecordWithoutExpectedType => "W0005",
            ResolveWarning::UnsupportedLetBinding { .. } => "W0006",
            ResolveWarning::TopLevelVal { .. } => "W0007",
        }
    }
}

impl fmt::Display for ResolveWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolveWarning::UnsupportedQualifier { name, qualifier } => write!(
                f,
                "qualifier `{}` not supported, skipping definition `{}`",
                qualifier, name
            ),
            ResolveWarning::UnsupportedDeclKind { kind } => {
                write!(f, "declaration kind `{}` not supported, skipping", kind)
            }
            ResolveWarning::UnsupportedExprKind { kind } => {
                write!(f, "expression kind `{}` not supported, emitting todo!()", kind)
            }
            ResolveWarning::UnsupportedOpcode { opcode } => {
                write!(f, "operator `{}` not supported, emitting todo!()", opcode)
            }
            ResolveWarning::RecordWithoutExpectedType => write!(
                f,
                "record construction has no known type to name it, emitting todo!()"
            ),
            ResolveWarning::UnsupportedLetBinding { name, qualifier } => write!(
                f,
                "let binding `{}` has qualifier `{}` (only `val` is supported), emitting todo!()",
                name, qualifier
            ),
            ResolveWarning::TopLevelVal { name } => {
                write!(f, "top-level val `{}` is not emitted", name)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = ResolveError::UnknownTypeKind {
            kind: "bogus".into(),
        };
        assert_eq!(
            err.to_string(),
            "kind not supported for resolving types: `bogus`"
        );

        let err = ResolveError::ParamCountMismatch {
            function: "f".into(),
            names: 2,
            types: 1,
        };
        assert_eq!(
            err.to_string(),
            "function `f` has 2 parameter name(s) but 1 parameter type(s)"
        );

        let err = ResolveError::MissingField {
            field: "elem".into(),
            context: "`list` type".into(),
        };
        assert_eq!(err.to_string(), "missing field `elem` in `list` type");
    }

    #[test]
    fn warning_display() {
        assert_eq!(
            ResolveWarning::UnsupportedOpcode {
                opcode: "isub".into()
            }
            .to_string(),
            "operator `isub` not supported, emitting todo!()"
        );
        assert_eq!(
            ResolveWarning::UnsupportedQualifier {
                name: "step".into(),
                qualifier: "action".into()
            }
            .to_string(),
            "qualifier `action` not supported, skipping definition `step`"
        );
    }

    #[test]
    fn codes_are_distinct() {
        let errors = [
            ResolveError::UnknownTypeKind { kind: String::new() },
            ResolveError::MissingField {
                field: String::new(),
                context: String::new(),
            },
            ResolveError::WrongFieldType {
                field: String::new(),
                expected: "",
                context: String::new(),
            },
            ResolveError::ExpectedObject {
                context: String::new(),
            },
            ResolveError::ParamCountMismatch {
                function: String::new(),
                names: 0,
                types: 0,
            },
            ResolveError::ArityMismatch {
                opcode: String::new(),
                expected: String::new(),
                found: 0,
            },
            ResolveError::InvalidInteger {
                value: String::new(),
            },
            ResolveError::InvalidTypeId { id: String::new() },
        ];
        let mut codes: Vec<&str> = errors.iter().map(ResolveError::code).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), errors.len());
    }
}
