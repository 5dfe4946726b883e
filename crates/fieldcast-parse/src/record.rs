//! # Records — Resolver Output
//!
//! A [`Record`] is the output of a compiled field specification resolver:
//! a mapping from canonical field names to resolved values. Field order
//! is irrelevant to record semantics, but entries keep their resolution
//! order so rendering is deterministic.
//!
//! Optional fields stay `Option`-wrapped in the record — presence and
//! absence are distinguishable from a field that resolved to `Nil`.

use fieldcast_core::{Symbol, Value};

use crate::parser::Parser;

/// One resolved field value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    /// A required field's value.
    Required(Value),
    /// An optional field: present with a value, or absent.
    Optional(Option<Value>),
}

impl FieldValue {
    /// The contained value, when there is one.
    ///
    /// `Required(v)` and `Optional(Some(v))` yield the value; an absent
    /// optional yields `None`.
    pub fn as_value(&self) -> Option<&Value> {
        match self {
            FieldValue::Required(v) | FieldValue::Optional(Some(v)) => Some(v),
            FieldValue::Optional(None) => None,
        }
    }

    /// Whether this is an absent optional.
    pub fn is_absent(&self) -> bool {
        matches!(self, FieldValue::Optional(None))
    }
}

/// A mapping from canonical field names to resolved values.
///
/// Names are unique: inserting an existing name replaces its value in
/// place. Created fresh per resolver invocation and owned by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Record {
    entries: Vec<(Symbol, FieldValue)>,
}

impl Record {
    /// An empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// A record with a single entry.
    pub fn single(name: impl Into<Symbol>, value: FieldValue) -> Self {
        let mut record = Record::new();
        record.insert(name, value);
        record
    }

    /// Insert or replace a field, preserving entry order.
    pub fn insert(&mut self, name: impl Into<Symbol>, value: FieldValue) {
        let name = name.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name, value)),
        }
    }

    /// Look up a field by name.
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.entries
            .iter()
            .find(|(n, _)| n.as_str() == name)
            .map(|(_, v)| v)
    }

    /// Look up a field's contained value by name.
    ///
    /// Absent optionals and missing fields both yield `None`; use
    /// [`Record::get`] to tell them apart.
    pub fn value(&self, name: &str) -> Option<&Value> {
        self.get(name).and_then(FieldValue::as_value)
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the record has no fields.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over entries in resolution order.
    pub fn iter(&self) -> impl Iterator<Item = &(Symbol, FieldValue)> {
        self.entries.iter()
    }

    /// Overlay `other` onto this record, right-biased: on a name
    /// collision `other`'s value wins.
    pub fn merge(mut self, other: Record) -> Record {
        for (name, value) in other.entries {
            self.insert(name, value);
        }
        self
    }

    /// Render as a symbol-keyed association.
    ///
    /// Present optionals render as their value; absent optionals are
    /// omitted entirely.
    pub fn to_value(&self) -> Value {
        Value::map(self.entries.iter().filter_map(|(name, field)| {
            field
                .as_value()
                .map(|v| (Value::Symbol(name.clone()), v.clone()))
        }))
    }
}

impl FromIterator<(Symbol, FieldValue)> for Record {
    fn from_iter<I: IntoIterator<Item = (Symbol, FieldValue)>>(iter: I) -> Self {
        let mut record = Record::new();
        for (name, value) in iter {
            record.insert(name, value);
        }
        record
    }
}

impl Parser<Record> {
    /// View a compiled record parser as a plain value parser.
    ///
    /// The record is rendered with [`Record::to_value`], which lets a
    /// compiled resolver serve as the parser of a `recurse` field inside
    /// an enclosing specification.
    pub fn into_value_parser(self) -> Parser<Value> {
        let label = self.label().to_owned();
        Parser::new(label, move |input| self.parse(input).map(|r| r.to_value()))
    }
}
