//! Expression resolution: IR expression + expected type -> `Expr`.
//!
//! The expected type flows downward only where Rust needs an annotation the
//! IR omits: record construction takes its struct name from it, and both
//! branches of a conditional inherit it. Operators with a fixed operand type
//! (`iadd`, `not`, ...) pass that type down instead.
//!
//! Unknown kinds and opcodes degrade to [`Expr::Todo`] with a warning;
//! malformed nodes are fatal.

use mint_ast::{Decl, Expr, FieldValue, Type};
use serde_json::Value;

use crate::error::{ResolveError, ResolveWarning};
use crate::node::{self, Node};
use crate::Resolver;

impl Resolver {
    /// Resolve one IR expression against an optional expected type.
    pub fn resolve_expr(
        &mut self,
        expr: &Value,
        expected: Option<&Type>,
    ) -> Result<Expr, ResolveError> {
        let node = node::object(expr, "expression")?;
        let kind = node::str_field(node, "kind", "expression")?;
        let context = format!("`{}` expression", kind);

        match kind {
            "str" => Ok(Expr::string(node::str_field(node, "value", &context)?)),
            "int" => Ok(Expr::u64(node::u64_field(node, "value", &context)?)),
            "bool" => Ok(Expr::bool(node::bool_field(node, "value", &context)?)),
            "name" => Ok(Expr::var(node::str_field(node, "name", &context)?)),
            "let" => self.resolve_let(node, expected, &context),
            "app" => self.resolve_app(node, expected),
            other => {
                self.warn(ResolveWarning::UnsupportedExprKind {
                    kind: other.to_string(),
                });
                Ok(Expr::Todo)
            }
        }
    }

    /// `let` binds the `val` in `opdef` over the continuation `expr`.
    fn resolve_let(
        &mut self,
        node: &Node,
        expected: Option<&Type>,
        context: &str,
    ) -> Result<Expr, ResolveError> {
        let opdef = node::object_field(node, "opdef", context)?;
        let qualifier = node::str_field(opdef, "qualifier", context)?;
        if qualifier != "val" {
            self.warn(ResolveWarning::UnsupportedLetBinding {
                name: node::str_field(opdef, "name", context)?.to_string(),
                qualifier: qualifier.to_string(),
            });
            return Ok(Expr::Todo);
        }

        match self.resolve_def(opdef)? {
            Some(Decl::Val { name, value }) => {
                let body = self.resolve_expr(node::field(node, "expr", context)?, expected)?;
                Ok(Expr::let_in(name, value, body))
            }
            // resolve_def only yields a Val for the `val` qualifier.
            _ => Ok(Expr::Todo),
        }
    }

    /// Operator application, dispatched on `opcode`.
    fn resolve_app(&mut self, node: &Node, expected: Option<&Type>) -> Result<Expr, ResolveError> {
        let opcode = node::str_field(node, "opcode", "`app` expression")?;
        let context = format!("`{}` application", opcode);
        let args = node::array_field(node, "args", &context)?;

        match opcode {
            "iadd" => {
                let [left, right] = exact_args::<2>(opcode, args)?;
                let left = self.resolve_expr(left, Some(&Type::UInt64))?;
                let right = self.resolve_expr(right, Some(&Type::UInt64))?;
                Ok(Expr::add(left, right))
            }
            "Rec" => self.resolve_record(args, expected, &context),
            "Tup" => {
                let elem_types = match expected {
                    Some(Type::Tuple(elems)) if elems.len() == args.len() => Some(elems),
                    _ => None,
                };
                let elems = args
                    .iter()
                    .enumerate()
                    .map(|(i, arg)| {
                        let expected = elem_types.map(|types| &types[i]);
                        self.resolve_expr(arg, expected)
                    })
                    .collect::<Result<Vec<_>, ResolveError>>()?;
                Ok(Expr::Tuple(elems))
            }
            "ite" => {
                let [cond, then_branch, else_branch] = exact_args::<3>(opcode, args)?;
                let cond = self.resolve_expr(cond, Some(&Type::Bool))?;
                let then_branch = self.resolve_expr(then_branch, expected)?;
                let else_branch = self.resolve_expr(else_branch, expected)?;
                Ok(Expr::if_else(cond, then_branch, else_branch))
            }
            "not" => {
                let [operand] = exact_args::<1>(opcode, args)?;
                Ok(Expr::not(self.resolve_expr(operand, Some(&Type::Bool))?))
            }
            "contains" => {
                let [set, elem] = exact_args::<2>(opcode, args)?;
                let set = self.resolve_expr(set, Some(&Type::wildcard_set()))?;
                let elem = self.resolve_expr(elem, None)?;
                Ok(Expr::method_call(
                    Expr::borrow(set),
                    "contains_key",
                    Vec::new(),
                    vec![Expr::borrow(elem)],
                ))
            }
            "keys" => {
                let [map] = exact_args::<1>(opcode, args)?;
                let map = self.resolve_expr(map, Some(&Type::wildcard_map()))?;
                let keys = Expr::method_call(map, "keys", Vec::new(), Vec::new());
                Ok(Expr::method_call(
                    keys,
                    "collect",
                    vec![Type::wildcard_set()],
                    Vec::new(),
                ))
            }
            "field" => {
                let [base, field] = exact_args::<2>(opcode, args)?;
                let base = self.resolve_expr(base, None)?;
                let field = node::object(field, &context)?;
                let name = node::str_field(field, "value", &context)?;
                Ok(Expr::field(base, name))
            }
            other => {
                self.warn(ResolveWarning::UnsupportedOpcode {
                    opcode: other.to_string(),
                });
                Ok(Expr::Todo)
            }
        }
    }

    /// `Rec` takes interleaved name/value arguments: `[n0, v0, n1, v1, ...]`.
    ///
    /// The struct name is the expected type's rendering. Field values are
    /// resolved without per-field expected types.
    fn resolve_record(
        &mut self,
        args: &[Value],
        expected: Option<&Type>,
        context: &str,
    ) -> Result<Expr, ResolveError> {
        if args.len() % 2 != 0 {
            return Err(ResolveError::ArityMismatch {
                opcode: "Rec".to_string(),
                expected: "an even number of".to_string(),
                found: args.len(),
            });
        }
        let Some(expected) = expected else {
            self.warn(ResolveWarning::RecordWithoutExpectedType);
            return Ok(Expr::Todo);
        };

        let fields = args
            .chunks_exact(2)
            .map(|pair| {
                let name = node::object(&pair[0], context)?;
                let name = node::str_field(name, "value", context)?;
                let value = self.resolve_expr(&pair[1], None)?;
                Ok(FieldValue::new(name, value))
            })
            .collect::<Result<Vec<_>, ResolveError>>()?;

        Ok(Expr::StructCons {
            struct_name: expected.to_string(),
            fields,
        })
    }
}

/// Check an operator's argument count and destructure its arguments.
fn exact_args<'a, const N: usize>(
    opcode: &str,
    args: &'a [Value],
) -> Result<[&'a Value; N], ResolveError> {
    if args.len() != N {
        return Err(ResolveError::ArityMismatch {
            opcode: opcode.to_string(),
            expected: N.to_string(),
            found: args.len(),
        });
    }
    Ok(std::array::from_fn(|i| &args[i]))
}
