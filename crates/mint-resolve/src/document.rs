//! The top-level IR document and the named-type index.
//!
//! Only the outer shape is deserialized into typed structs. Declarations
//! stay as raw JSON nodes and are read field by field by the resolvers.

use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::Value;

use crate::error::ResolveError;

/// A decoded IR document.
#[derive(Debug, Deserialize)]
pub struct Document {
    /// Type table keyed by decimal id. Absent in some exports.
    #[serde(default)]
    pub types: BTreeMap<String, TypeEntry>,
    pub modules: Vec<Module>,
}

/// One module of the document.
#[derive(Debug, Deserialize)]
pub struct Module {
    pub name: String,
    pub declarations: Vec<Value>,
}

/// An entry of the `types` table.
#[derive(Debug, Deserialize)]
pub struct TypeEntry {
    #[serde(rename = "type")]
    pub ty: TypeEntryType,
}

/// The part of a type-table entry that is indexed: its optional name.
#[derive(Debug, Deserialize)]
pub struct TypeEntryType {
    #[serde(default)]
    pub name: Option<String>,
}

impl Document {
    /// Decode a document from JSON text.
    pub fn from_str(source: &str) -> Result<Document, serde_json::Error> {
        serde_json::from_str(source)
    }

    /// Decode a document from an already parsed JSON value.
    pub fn from_value(value: Value) -> Result<Document, serde_json::Error> {
        serde_json::from_value(value)
    }
}

/// Names of the types in the document's type table, by numeric id.
///
/// Kept in a `BTreeMap` so iteration order never depends on hashing.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NamedTypes {
    names: BTreeMap<u64, String>,
}

impl NamedTypes {
    /// Index every named entry of the type table. Anonymous entries are
    /// skipped.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::InvalidTypeId`] if a key is not a decimal id.
    pub fn index(types: &BTreeMap<String, TypeEntry>) -> Result<NamedTypes, ResolveError> {
        let mut names = BTreeMap::new();
        for (key, entry) in types {
            let Some(name) = &entry.ty.name else {
                continue;
            };
            let id: u64 = key
                .parse()
                .map_err(|_| ResolveError::InvalidTypeId { id: key.clone() })?;
            names.insert(id, name.clone());
        }
        Ok(NamedTypes { names })
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Entries in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = (u64, &str)> {
        self.names.iter().map(|(id, name)| (*id, name.as_str()))
    }
}
