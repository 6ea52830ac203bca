//! Dynamic field values.
//!
//! A [`Record`] is one decoded structure as the engine sees it: ordered
//! `(name, value)` pairs in wire order. Typed bodies convert to and from
//! records; kinds registered purely as layouts stay records forever.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use super::Schema;
use crate::envelope::EmbeddedTransaction;
use crate::error::{CodecError, CodecResult};
use crate::primitives::{serialize_hex, Primitive};

/// The value of one field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Value {
    /// Any integer field, widened to `u64`.
    Int(u64),
    /// Fixed-width opaque bytes.
    Fixed(#[serde(serialize_with = "serialize_hex")] Vec<u8>),
    /// Variable-length buffer.
    Bytes(#[serde(serialize_with = "serialize_hex")] Vec<u8>),
    /// Array of sub-structures.
    Array(Vec<Record>),
    /// Embedded transactions of an aggregate.
    Embedded(Vec<EmbeddedTransaction>),
}

impl Value {
    /// Builds an array value from typed elements.
    pub fn array<T: Schema>(items: &[T]) -> Self {
        Self::Array(items.iter().map(Schema::to_record).collect())
    }

    pub fn as_int(&self) -> Option<u64> {
        match self {
            Self::Int(v) => Some(*v),
            _ => None,
        }
    }
}

fn missing(field: &'static str) -> CodecError {
    CodecError::SchemaMismatch {
        field,
        reason: "field is missing from the record",
    }
}

/// Ordered field values of one structure.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    fields: Vec<(&'static str, Value)>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, name: &'static str, value: impl Into<Value>) -> Self {
        self.insert(name, value);
        self
    }

    /// Inserts a field, replacing any previous value of the same name.
    pub fn insert(&mut self, name: &'static str, value: impl Into<Value>) {
        let value = value.into();
        match self.fields.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = value,
            None => self.fields.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.iter().find(|(n, _)| *n == name).map(|(_, v)| v)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Value> {
        self.fields.iter_mut().find(|(n, _)| *n == name).map(|(_, v)| v)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn remove(&mut self, name: &str) -> Option<Value> {
        let index = self.fields.iter().position(|(n, _)| *n == name)?;
        Some(self.fields.remove(index).1)
    }

    pub fn int(&self, name: &str) -> Option<u64> {
        self.get(name).and_then(Value::as_int)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &Value)> {
        self.fields.iter().map(|(n, v)| (*n, v))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Removes and converts a primitive field.
    pub fn take<T: Primitive>(&mut self, name: &'static str) -> CodecResult<T> {
        let value = self.remove(name).ok_or_else(|| missing(name))?;
        T::from_value(name, value)
    }

    /// Like [`Record::take`], but an absent field is `None`.
    pub fn take_optional<T: Primitive>(&mut self, name: &'static str) -> CodecResult<Option<T>> {
        self.remove(name).map(|v| T::from_value(name, v)).transpose()
    }

    pub fn take_int(&mut self, name: &'static str) -> CodecResult<u64> {
        match self.remove(name) {
            Some(Value::Int(v)) => Ok(v),
            Some(_) => Err(CodecError::SchemaMismatch {
                field: name,
                reason: "expected an integer",
            }),
            None => Err(missing(name)),
        }
    }

    pub fn take_bytes(&mut self, name: &'static str) -> CodecResult<Vec<u8>> {
        match self.remove(name) {
            Some(Value::Bytes(b)) => Ok(b),
            Some(_) => Err(CodecError::SchemaMismatch {
                field: name,
                reason: "expected a byte buffer",
            }),
            None => Err(missing(name)),
        }
    }

    pub fn take_array<T: Schema>(&mut self, name: &'static str) -> CodecResult<Vec<T>> {
        match self.remove(name) {
            Some(Value::Array(items)) => items.into_iter().map(T::from_record).collect(),
            Some(_) => Err(CodecError::SchemaMismatch {
                field: name,
                reason: "expected an array",
            }),
            None => Err(missing(name)),
        }
    }

    pub fn take_embedded(&mut self, name: &'static str) -> CodecResult<Vec<EmbeddedTransaction>> {
        match self.remove(name) {
            Some(Value::Embedded(txs)) => Ok(txs),
            Some(_) => Err(CodecError::SchemaMismatch {
                field: name,
                reason: "expected embedded transactions",
            }),
            None => Err(missing(name)),
        }
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (name, value) in &self.fields {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}
