//! Checked access to stringly-keyed IR nodes.
//!
//! Every accessor turns an absent or ill-shaped field into a fatal
//! [`ResolveError`] naming the field and the node it was read from.

use serde_json::{Map, Value};

use crate::error::ResolveError;

pub(crate) type Node = Map<String, Value>;

pub(crate) fn object<'a>(value: &'a Value, context: &str) -> Result<&'a Node, ResolveError> {
    value.as_object().ok_or_else(|| ResolveError::ExpectedObject {
        context: context.to_string(),
    })
}

pub(crate) fn field<'a>(node: &'a Node, name: &str, context: &str) -> Result<&'a Value, ResolveError> {
    node.get(name).ok_or_else(|| ResolveError::MissingField {
        field: name.to_string(),
        context: context.to_string(),
    })
}

fn wrong_type(name: &str, expected: &'static str, context: &str) -> ResolveError {
    ResolveError::WrongFieldType {
        field: name.to_string(),
        expected,
        context: context.to_string(),
    }
}

pub(crate) fn str_field<'a>(node: &'a Node, name: &str, context: &str) -> Result<&'a str, ResolveError> {
    field(node, name, context)?
        .as_str()
        .ok_or_else(|| wrong_type(name, "a string", context))
}

pub(crate) fn bool_field(node: &Node, name: &str, context: &str) -> Result<bool, ResolveError> {
    field(node, name, context)?
        .as_bool()
        .ok_or_else(|| wrong_type(name, "a boolean", context))
}

pub(crate) fn array_field<'a>(
    node: &'a Node,
    name: &str,
    context: &str,
) -> Result<&'a [Value], ResolveError> {
    field(node, name, context)?
        .as_array()
        .map(Vec::as_slice)
        .ok_or_else(|| wrong_type(name, "an array", context))
}

pub(crate) fn object_field<'a>(
    node: &'a Node,
    name: &str,
    context: &str,
) -> Result<&'a Node, ResolveError> {
    field(node, name, context)?
        .as_object()
        .ok_or_else(|| wrong_type(name, "an object", context))
}

/// Read an `int` literal's value as `u64`.
///
/// JSON numbers may arrive as integers or as floats; an integral,
/// non-negative float below 2^64 converts exactly.
pub(crate) fn u64_field(node: &Node, name: &str, context: &str) -> Result<u64, ResolveError> {
    let value = field(node, name, context)?;
    if let Some(n) = value.as_u64() {
        return Ok(n);
    }
    match value.as_f64() {
        Some(f) if f.fract() == 0.0 && f >= 0.0 && f < 18_446_744_073_709_551_616.0 => Ok(f as u64),
        Some(_) => Err(ResolveError::InvalidInteger {
            value: value.to_string(),
        }),
        None => Err(wrong_type(name, "a number", context)),
    }
}
