//! Type resolution: IR type descriptor -> `Type`.
//!
//! Purely structural. The dispatch on `kind` is closed: a kind missing from
//! the table means the resolver must be extended, so it is a fatal error
//! rather than a degraded result.

use mint_ast::{Field, Type};
use serde_json::Value;

use crate::error::ResolveError;
use crate::node::{self, Node};

/// Resolve one IR type descriptor.
///
/// # Errors
///
/// Returns [`ResolveError::UnknownTypeKind`] for a kind outside the table,
/// and a field error if the descriptor is malformed.
pub fn resolve_type(descriptor: &Value) -> Result<Type, ResolveError> {
    let node = node::object(descriptor, "type descriptor")?;
    let kind = node::str_field(node, "kind", "type descriptor")?;
    let context = format!("`{}` type", kind);

    match kind {
        "rec" => {
            let fields = row_fields(node, &context)?
                .iter()
                .map(|field| {
                    let (name, ty) = row_field(field, &context)?;
                    Ok(Field::new(name, ty))
                })
                .collect::<Result<Vec<_>, ResolveError>>()?;
            Ok(Type::Struct(fields))
        }
        "str" => Ok(Type::Str),
        "const" => Ok(Type::named(node::str_field(node, "name", &context)?)),
        "list" => Ok(Type::list(resolve_type(node::field(node, "elem", &context)?)?)),
        "int" => Ok(Type::UInt64),
        "set" => Ok(Type::set(resolve_type(node::field(node, "elem", &context)?)?)),
        "fun" => {
            let arg = resolve_type(node::field(node, "arg", &context)?)?;
            let res = resolve_type(node::field(node, "res", &context)?)?;
            Ok(Type::map(arg, res))
        }
        "bool" => Ok(Type::Bool),
        "tup" => {
            let elems = row_fields(node, &context)?
                .iter()
                .map(|field| row_field(field, &context).map(|(_, ty)| ty))
                .collect::<Result<Vec<_>, ResolveError>>()?;
            Ok(Type::Tuple(elems))
        }
        other => Err(ResolveError::UnknownTypeKind {
            kind: other.to_string(),
        }),
    }
}

/// The entries of a row type: `fields.fields`.
fn row_fields<'a>(node: &'a Node, context: &str) -> Result<&'a [Value], ResolveError> {
    let row = node::object_field(node, "fields", context)?;
    node::array_field(row, "fields", context)
}

/// One `{ fieldName, fieldType }` entry of a row.
fn row_field<'a>(entry: &'a Value, context: &str) -> Result<(&'a str, Type), ResolveError> {
    let entry = node::object(entry, context)?;
    let name = node::str_field(entry, "fieldName", context)?;
    let ty = resolve_type(node::field(entry, "fieldType", context)?)?;
    Ok((name, ty))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn resolve(v: Value) -> Type {
        resolve_type(&v).expect("type should resolve")
    }

    fn row(fields: Vec<(&str, Value)>) -> Value {
        let fields: Vec<Value> = fields
            .into_iter()
            .map(|(name, ty)| json!({ "fieldName": name, "fieldType": ty }))
            .collect();
        json!({ "kind": "row", "fields": fields, "other": { "kind": "empty" } })
    }

    #[test]
    fn resolve_scalars() {
        assert_eq!(resolve(json!({ "kind": "str" })), Type::Str);
        assert_eq!(resolve(json!({ "kind": "int" })), Type::UInt64);
        assert_eq!(resolve(json!({ "kind": "bool" })), Type::Bool);
    }

    #[test]
    fn resolve_const_is_named_reference() {
        assert_eq!(
            resolve(json!({ "kind": "const", "name": "Addr", "id": 12 })),
            Type::named("Addr")
        );
    }

    #[test]
    fn resolve_collections() {
        assert_eq!(
            resolve(json!({ "kind": "list", "elem": { "kind": "int" } })),
            Type::list(Type::UInt64)
        );
        assert_eq!(
            resolve(json!({ "kind": "set", "elem": { "kind": "str" } })),
            Type::set(Type::Str)
        );
    }

    #[test]
    fn resolve_fun_as_map() {
        let ty = resolve(json!({
            "kind": "fun",
            "arg": { "kind": "const", "name": "Addr" },
            "res": { "kind": "int" }
        }));
        assert_eq!(ty, Type::map(Type::named("Addr"), Type::UInt64));
        assert_eq!(ty.to_string(), "HashMap<Addr, u64>");
    }

    #[test]
    fn resolve_record_preserves_field_order() {
        let ty = resolve(json!({
            "kind": "rec",
            "fields": row(vec![
                ("zeta", json!({ "kind": "int" })),
                ("alpha", json!({ "kind": "str" })),
                ("mid", json!({ "kind": "set", "elem": { "kind": "bool" } })),
            ])
        }));
        assert_eq!(
            ty,
            Type::Struct(vec![
                Field::new("zeta", Type::UInt64),
                Field::new("alpha", Type::Str),
                Field::new("mid", Type::set(Type::Bool)),
            ])
        );
    }

    #[test]
    fn resolve_tuple_elements_in_order() {
        let ty = resolve(json!({
            "kind": "tup",
            "fields": row(vec![
                ("0", json!({ "kind": "bool" })),
                ("1", json!({ "kind": "int" })),
            ])
        }));
        assert_eq!(ty, Type::Tuple(vec![Type::Bool, Type::UInt64]));
        assert_eq!(ty.to_string(), "(bool, u64)");
    }

    #[test]
    fn unknown_kind_is_fatal() {
        let err = resolve_type(&json!({ "kind": "bogus" })).unwrap_err();
        assert_eq!(
            err,
            ResolveError::UnknownTypeKind {
                kind: "bogus".into()
            }
        );
    }

    #[test]
    fn unknown_kind_nested_is_fatal() {
        let err = resolve_type(&json!({ "kind": "list", "elem": { "kind": "var", "name": "a" } }))
            .unwrap_err();
        assert!(matches!(err, ResolveError::UnknownTypeKind { kind } if kind == "var"));
    }

    #[test]
    fn missing_elem_is_fatal() {
        let err = resolve_type(&json!({ "kind": "set" })).unwrap_err();
        assert_eq!(
            err,
            ResolveError::MissingField {
                field: "elem".into(),
                context: "`set` type".into()
            }
        );
    }
}
