//! Declaration resolution: IR top-level declaration -> `Decl`.
//!
//! Unlike type resolution this path is lenient: a `def` with a qualifier we
//! do not translate is dropped with a warning instead of aborting the run.

use mint_ast::{Decl, Param, Stmt, Type};
use serde_json::Value;

use crate::error::{ResolveError, ResolveWarning};
use crate::node::{self, Node};
use crate::ty::resolve_type;
use crate::{struct_attributes, Resolver};

impl Resolver {
    /// Resolve one entry of a module's `declarations`.
    ///
    /// Returns `None` for imports and for declarations that were skipped
    /// with a warning.
    pub fn resolve_decl(&mut self, decl: &Value) -> Result<Option<Decl>, ResolveError> {
        let node = node::object(decl, "declaration")?;
        match node::str_field(node, "kind", "declaration")? {
            "typedef" => resolve_typedef(node).map(Some),
            // The emitted program carries a fixed import list instead.
            "import" => Ok(None),
            "def" => self.resolve_def(node),
            other => {
                self.warn(ResolveWarning::UnsupportedDeclKind {
                    kind: other.to_string(),
                });
                Ok(None)
            }
        }
    }

    /// Resolve a `def` node by its qualifier.
    pub(crate) fn resolve_def(&mut self, def: &Node) -> Result<Option<Decl>, ResolveError> {
        let name = node::str_field(def, "name", "definition")?;
        let qualifier = node::str_field(def, "qualifier", "definition")?;
        let context = format!("`{}` definition `{}`", qualifier, name);

        match qualifier {
            "pureval" => {
                let ty = resolve_type(node::field(def, "typeAnnotation", &context)?)?;
                let value = self.resolve_expr(node::field(def, "expr", &context)?, Some(&ty))?;
                Ok(Some(Decl::Const {
                    name: name.to_string(),
                    ty,
                    value,
                }))
            }
            "puredef" => self.resolve_function(name, def, &context).map(Some),
            "val" => {
                let value = self.resolve_expr(node::field(def, "expr", &context)?, None)?;
                Ok(Some(Decl::Val {
                    name: name.to_string(),
                    value,
                }))
            }
            other => {
                self.warn(ResolveWarning::UnsupportedQualifier {
                    name: name.to_string(),
                    qualifier: other.to_string(),
                });
                Ok(None)
            }
        }
    }

    /// Resolve a `puredef` into a function.
    ///
    /// A definition without parameters has its return type as the whole
    /// annotation and its body directly in `expr`. With parameters, `expr`
    /// is a lambda: names come from `expr.params`, types from the
    /// annotation's `args`, and the body is the lambda's own `expr`.
    fn resolve_function(
        &mut self,
        name: &str,
        def: &Node,
        context: &str,
    ) -> Result<Decl, ResolveError> {
        let expr = node::object_field(def, "expr", context)?;
        let annotation = node::field(def, "typeAnnotation", context)?;

        let (params, return_type, body) = match expr.get("params") {
            None => (Vec::new(), resolve_type(annotation)?, node::field(def, "expr", context)?),
            Some(_) => {
                let annotation = node::object(annotation, context)?;
                let names = node::array_field(expr, "params", context)?
                    .iter()
                    .map(|param| {
                        let param = node::object(param, context)?;
                        node::str_field(param, "name", context)
                    })
                    .collect::<Result<Vec<_>, ResolveError>>()?;
                let types = node::array_field(annotation, "args", context)?
                    .iter()
                    .map(resolve_type)
                    .collect::<Result<Vec<_>, ResolveError>>()?;
                if names.len() != types.len() {
                    return Err(ResolveError::ParamCountMismatch {
                        function: name.to_string(),
                        names: names.len(),
                        types: types.len(),
                    });
                }
                let params: Vec<Param> = names
                    .into_iter()
                    .zip(types)
                    .map(|(name, ty)| Param::new(name, ty, true))
                    .collect();
                let return_type = resolve_type(node::field(annotation, "res", context)?)?;
                (params, return_type, node::field(expr, "expr", context)?)
            }
        };

        let body = self.resolve_expr(body, Some(&return_type))?;
        Ok(Decl::Function {
            name: name.to_string(),
            params,
            return_type,
            body: vec![Stmt::Return(body)],
            attributes: Vec::new(),
        })
    }
}

/// A record typedef becomes a struct; anything else a type alias.
fn resolve_typedef(node: &Node) -> Result<Decl, ResolveError> {
    let name = node::str_field(node, "name", "typedef")?;
    let context = format!("typedef `{}`", name);
    match resolve_type(node::field(node, "type", &context)?)? {
        Type::Struct(fields) => Ok(Decl::Struct {
            name: name.to_string(),
            fields,
            attributes: struct_attributes(),
        }),
        ty => Ok(Decl::TypeAlias {
            name: name.to_string(),
            ty,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mint_ast::{Expr, Field};
    use serde_json::json;

    fn resolve(v: Value) -> (Option<Decl>, Vec<ResolveWarning>) {
        let mut resolver = Resolver::new();
        let decl = resolver.resolve_decl(&v).expect("declaration should resolve");
        (decl, resolver.into_warnings())
    }

    fn int() -> Value {
        json!({ "kind": "int" })
    }

    #[test]
    fn typedef_record_becomes_struct() {
        let (decl, _) = resolve(json!({
            "kind": "typedef",
            "name": "Coin",
            "type": {
                "kind": "rec",
                "fields": {
                    "kind": "row",
                    "fields": [
                        { "fieldName": "denom", "fieldType": { "kind": "str" } },
                        { "fieldName": "amount", "fieldType": int() }
                    ],
                    "other": { "kind": "empty" }
                }
            }
        }));
        assert_eq!(
            decl,
            Some(Decl::Struct {
                name: "Coin".into(),
                fields: vec![Field::new("denom", Type::Str), Field::new("amount", Type::UInt64)],
                attributes: struct_attributes(),
            })
        );
    }

    #[test]
    fn typedef_other_becomes_alias() {
        let (decl, _) = resolve(json!({
            "kind": "typedef",
            "name": "Denom",
            "type": { "kind": "str" }
        }));
        assert_eq!(
            decl,
            Some(Decl::TypeAlias {
                name: "Denom".into(),
                ty: Type::Str
            })
        );
    }

    #[test]
    fn import_is_ignored_silently() {
        let (decl, warnings) = resolve(json!({ "kind": "import", "path": "basicSpells" }));
        assert_eq!(decl, None);
        assert!(warnings.is_empty());
    }

    #[test]
    fn pureval_becomes_const() {
        let (decl, _) = resolve(json!({
            "kind": "def",
            "qualifier": "pureval",
            "name": "x",
            "typeAnnotation": int(),
            "expr": { "kind": "int", "value": 5 }
        }));
        assert_eq!(
            decl,
            Some(Decl::Const {
                name: "x".into(),
                ty: Type::UInt64,
                value: Expr::u64(5)
            })
        );
    }

    #[test]
    fn pureval_threads_annotation_into_record() {
        let (decl, warnings) = resolve(json!({
            "kind": "def",
            "qualifier": "pureval",
            "name": "origin",
            "typeAnnotation": { "kind": "const", "name": "Point" },
            "expr": {
                "kind": "app",
                "opcode": "Rec",
                "args": [
                    { "kind": "str", "value": "x" },
                    { "kind": "int", "value": 0 }
                ]
            }
        }));
        assert!(warnings.is_empty());
        let Some(Decl::Const { value, .. }) = decl else {
            panic!("expected a const declaration");
        };
        assert!(matches!(value, Expr::StructCons { ref struct_name, .. } if struct_name == "Point"));
    }

    #[test]
    fn puredef_without_params() {
        let (decl, _) = resolve(json!({
            "kind": "def",
            "qualifier": "puredef",
            "name": "always",
            "typeAnnotation": { "kind": "bool" },
            "expr": { "kind": "bool", "value": true }
        }));
        assert_eq!(
            decl,
            Some(Decl::Function {
                name: "always".into(),
                params: vec![],
                return_type: Type::Bool,
                body: vec![Stmt::Return(Expr::bool(true))],
                attributes: vec![],
            })
        );
    }

    #[test]
    fn puredef_with_params_unwraps_lambda() {
        let (decl, _) = resolve(json!({
            "kind": "def",
            "qualifier": "puredef",
            "name": "add",
            "typeAnnotation": { "kind": "oper", "args": [int(), int()], "res": int() },
            "expr": {
                "kind": "lambda",
                "qualifier": "puredef",
                "params": [{ "id": 1, "name": "a" }, { "id": 2, "name": "b" }],
                "expr": {
                    "kind": "app",
                    "opcode": "iadd",
                    "args": [{ "kind": "name", "name": "a" }, { "kind": "name", "name": "b" }]
                }
            }
        }));
        assert_eq!(
            decl,
            Some(Decl::Function {
                name: "add".into(),
                params: vec![
                    Param::new("a", Type::UInt64, true),
                    Param::new("b", Type::UInt64, true),
                ],
                return_type: Type::UInt64,
                body: vec![Stmt::Return(Expr::add(Expr::var("a"), Expr::var("b")))],
                attributes: vec![],
            })
        );
    }

    #[test]
    fn puredef_param_count_mismatch_is_fatal() {
        let mut resolver = Resolver::new();
        let err = resolver
            .resolve_decl(&json!({
                "kind": "def",
                "qualifier": "puredef",
                "name": "f",
                "typeAnnotation": { "kind": "oper", "args": [int()], "res": int() },
                "expr": {
                    "kind": "lambda",
                    "params": [{ "name": "a" }, { "name": "b" }],
                    "expr": { "kind": "name", "name": "a" }
                }
            }))
            .unwrap_err();
        assert_eq!(
            err,
            ResolveError::ParamCountMismatch {
                function: "f".into(),
                names: 2,
                types: 1
            }
        );
    }

    #[test]
    fn val_resolves_without_expected_type() {
        let (decl, _) = resolve(json!({
            "kind": "def",
            "qualifier": "val",
            "name": "n",
            "expr": { "kind": "name", "name": "m" }
        }));
        assert_eq!(
            decl,
            Some(Decl::Val {
                name: "n".into(),
                value: Expr::var("m")
            })
        );
    }

    #[test]
    fn unknown_qualifier_is_skipped_with_warning() {
        let (decl, warnings) = resolve(json!({
            "kind": "def",
            "qualifier": "action",
            "name": "step",
            "expr": { "kind": "bool", "value": true }
        }));
        assert_eq!(decl, None);
        assert_eq!(
            warnings,
            vec![ResolveWarning::UnsupportedQualifier {
                name: "step".into(),
                qualifier: "action".into()
            }]
        );
    }

    #[test]
    fn unknown_decl_kind_is_skipped_with_warning() {
        let (decl, warnings) = resolve(json!({ "kind": "var", "name": "balances" }));
        assert_eq!(decl, None);
        assert_eq!(
            warnings,
            vec![ResolveWarning::UnsupportedDeclKind { kind: "var".into() }]
        );
    }

    #[test]
    fn typedef_with_unknown_type_kind_is_fatal() {
        let mut resolver = Resolver::new();
        let err = resolver
            .resolve_decl(&json!({
                "kind": "typedef",
                "name": "T",
                "type": { "kind": "bogus" }
            }))
            .unwrap_err();
        assert!(matches!(err, ResolveError::UnknownTypeKind { .. }));
    }
}
