//! # Dynamic Value Model
//!
//! Defines `Value`, the loosely-typed data model that parsers accept at
//! trust boundaries, and `Symbol`, the lightweight identifier type used
//! for field names, association keys, and error reasons.
//!
//! ## Design
//!
//! - **Insertion order is preserved.** `Set` and `Map` are `Vec`-backed
//!   associations, never re-sorted. Fail-fast combinators report the
//!   *first* offending element/key in input order, so the collections
//!   must not reorder behind the caller's back.
//! - **Structural value equality everywhere.** Membership tests
//!   (`one_of`), set deduplication, and default-widening all compare by
//!   `==`. Floats are wrapped in `OrderedFloat` so `Value` is `Eq` and
//!   `Hash` without carving floats out of the model.
//! - **No coercion.** A `Value` is what the caller handed in; parsers
//!   decide what to accept.

use std::fmt::{self, Display, Formatter};

use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

/// A lightweight symbolic identifier.
///
/// Symbols name record fields, key associations, and tag error reasons.
/// They compare by content and render without quotes, distinguishing them
/// from `Value::String` in lookups and diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Symbol(String);

impl Symbol {
    /// Create a symbol from any string-like name.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The textual form of the symbol.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for Symbol {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Symbol {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for Symbol {
    fn from(name: String) -> Self {
        Self(name)
    }
}

/// The dynamic value model.
///
/// Inputs arriving at a boundary are represented as `Value` trees;
/// parsers turn them into validated, typed data. Collections preserve
/// the order in which entries were supplied.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Value {
    /// The null/nil value.
    Nil,
    /// A boolean.
    Bool(bool),
    /// A signed 64-bit integer.
    Int(i64),
    /// A double-precision float with total ordering.
    Float(OrderedFloat<f64>),
    /// A UTF-8 string.
    String(String),
    /// A symbolic identifier.
    Symbol(Symbol),
    /// An ordered sequence of values.
    List(Vec<Value>),
    /// An insertion-ordered set of distinct values.
    Set(Vec<Value>),
    /// An insertion-ordered association of keys to values.
    Map(Vec<(Value, Value)>),
}

impl Value {
    /// Construct a symbol value.
    pub fn symbol(name: impl Into<String>) -> Value {
        Value::Symbol(Symbol::new(name))
    }

    /// Construct a string value.
    pub fn string(s: impl Into<String>) -> Value {
        Value::String(s.into())
    }

    /// Construct an integer value.
    pub fn int(n: i64) -> Value {
        Value::Int(n)
    }

    /// Construct a float value.
    pub fn float(f: f64) -> Value {
        Value::Float(OrderedFloat(f))
    }

    /// Construct a list from an iterator of values.
    pub fn list(items: impl IntoIterator<Item = Value>) -> Value {
        Value::List(items.into_iter().collect())
    }

    /// Construct a set from an iterator of values.
    ///
    /// Duplicates (by value equality) are dropped; the first occurrence
    /// wins and its position is kept.
    pub fn set(items: impl IntoIterator<Item = Value>) -> Value {
        let mut members: Vec<Value> = Vec::new();
        for item in items {
            if !members.contains(&item) {
                members.push(item);
            }
        }
        Value::Set(members)
    }

    /// Construct an association from an iterator of key/value pairs.
    ///
    /// A later pair with an existing key replaces the earlier value in
    /// place, keeping the key's original position.
    pub fn map(entries: impl IntoIterator<Item = (Value, Value)>) -> Value {
        let mut assoc: Vec<(Value, Value)> = Vec::new();
        for (key, value) in entries {
            assoc_put(&mut assoc, key, value);
        }
        Value::Map(assoc)
    }

    /// The kind of this value, for diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Nil => "nil",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::String(_) => "string",
            Value::Symbol(_) => "symbol",
            Value::List(_) => "list",
            Value::Set(_) => "set",
            Value::Map(_) => "map",
        }
    }

    /// Whether this value is `Nil`.
    pub fn is_nil(&self) -> bool {
        matches!(self, Value::Nil)
    }

    /// Look up `key` in an association value.
    ///
    /// Returns `None` when the key is absent or `self` is not a `Map`.
    pub fn get(&self, key: &Value) -> Option<&Value> {
        match self {
            Value::Map(entries) => assoc_get(entries, key),
            _ => None,
        }
    }

    /// The integer payload, if this is an `Int`.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// The float payload, if this is a `Float`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(f.into_inner()),
            _ => None,
        }
    }

    /// The boolean payload, if this is a `Bool`.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// The string payload, if this is a `String`.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// The symbol payload, if this is a `Symbol`.
    pub fn as_symbol(&self) -> Option<&Symbol> {
        match self {
            Value::Symbol(s) => Some(s),
            _ => None,
        }
    }

    /// The elements, if this is a `List`.
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    /// The members, if this is a `Set`.
    pub fn as_set(&self) -> Option<&[Value]> {
        match self {
            Value::Set(members) => Some(members),
            _ => None,
        }
    }

    /// The entries, if this is a `Map`.
    pub fn as_entries(&self) -> Option<&[(Value, Value)]> {
        match self {
            Value::Map(entries) => Some(entries),
            _ => None,
        }
    }
}

/// Look up `key` in an association slice by value equality.
pub fn assoc_get<'a>(entries: &'a [(Value, Value)], key: &Value) -> Option<&'a Value> {
    entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
}

/// Insert or replace `key` in an association, preserving entry order.
///
/// Replacing keeps the key's original position; inserting appends.
pub fn assoc_put(entries: &mut Vec<(Value, Value)>, key: Value, value: Value) {
    match entries.iter_mut().find(|(k, _)| *k == key) {
        Some(entry) => entry.1 = value,
        None => entries.push((key, value)),
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::float(f)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_owned())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<Symbol> for Value {
    fn from(sym: Symbol) -> Self {
        Value::Symbol(sym)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::List(items)
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Value::Nil => f.write_str("nil"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(n) => write!(f, "{n}"),
            Value::Float(x) => write!(f, "{x}"),
            Value::String(s) => write!(f, "{s:?}"),
            Value::Symbol(sym) => write!(f, "{sym}"),
            Value::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            Value::Set(members) => {
                f.write_str("#{")?;
                for (i, member) in members.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{member}")?;
                }
                f.write_str("}")
            }
            Value::Map(entries) => {
                f.write_str("{")?;
                for (i, (k, v)) in entries.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{k} => {v}")?;
                }
                f.write_str("}")
            }
        }
    }
}
