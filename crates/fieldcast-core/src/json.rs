//! # JSON Interop — Boundary Ingest and Egress
//!
//! Boundary code usually receives JSON. This module converts between
//! [`Value`] and `serde_json::Value`, and routes serde's `Serialize` /
//! `Deserialize` for [`Value`] through those conversions.
//!
//! ## Mapping
//!
//! | JSON            | Value                        |
//! |-----------------|------------------------------|
//! | `null`          | `Nil`                        |
//! | `true`/`false`  | `Bool`                       |
//! | integral number | `Int` (i64 range)            |
//! | other number    | `Float`                      |
//! | string          | `String`                     |
//! | array           | `List`                       |
//! | object          | `Map` with `String` keys     |
//!
//! On the way out, symbols render as strings and sets as arrays. An
//! association with a key that is neither a string nor a symbol has no
//! JSON form and is rejected with `invalid_input`.

use serde::de::Deserializer;
use serde::ser::{Error as SerError, Serializer};
use serde::{Deserialize, Serialize};

use crate::error::{reason, Error};
use crate::value::Value;

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Nil,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Value::Int(i)
                } else {
                    // u64 beyond i64 range, or a true float.
                    Value::float(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => {
                Value::List(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(entries) => Value::map(
                entries
                    .into_iter()
                    .map(|(k, v)| (Value::String(k), Value::from(v))),
            ),
        }
    }
}

impl Value {
    /// Convert a `serde_json::Value` into a [`Value`].
    pub fn from_json(json: serde_json::Value) -> Value {
        Value::from(json)
    }

    /// Render this value as JSON.
    ///
    /// # Errors
    ///
    /// Returns `invalid_input` when the value has no JSON form: an
    /// association key that is neither a string nor a symbol, or a
    /// non-finite float.
    pub fn to_json(&self) -> Result<serde_json::Value, Error> {
        match self {
            Value::Nil => Ok(serde_json::Value::Null),
            Value::Bool(b) => Ok(serde_json::Value::Bool(*b)),
            Value::Int(n) => Ok(serde_json::Value::Number((*n).into())),
            Value::Float(f) => serde_json::Number::from_f64(f.into_inner())
                .map(serde_json::Value::Number)
                .ok_or_else(|| {
                    Error::domain(reason::INVALID_INPUT).with_detail("input", self.clone())
                }),
            Value::String(s) => Ok(serde_json::Value::String(s.clone())),
            Value::Symbol(sym) => Ok(serde_json::Value::String(sym.as_str().to_owned())),
            Value::List(items) | Value::Set(items) => Ok(serde_json::Value::Array(
                items
                    .iter()
                    .map(Value::to_json)
                    .collect::<Result<Vec<_>, _>>()?,
            )),
            Value::Map(entries) => {
                let mut object = serde_json::Map::with_capacity(entries.len());
                for (key, value) in entries {
                    let key = match key {
                        Value::String(s) => s.clone(),
                        Value::Symbol(sym) => sym.as_str().to_owned(),
                        other => {
                            return Err(Error::domain(reason::INVALID_INPUT)
                                .with_detail("key", other.clone()));
                        }
                    };
                    object.insert(key, value.to_json()?);
                }
                Ok(serde_json::Value::Object(object))
            }
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let json = self.to_json().map_err(S::Error::custom)?;
        json.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let json = serde_json::Value::deserialize(deserializer)?;
        Ok(Value::from(json))
    }
}
