//! # Primitive Type Guards
//!
//! Parsers for the scalar kinds of the value model. Each accepts its
//! kind unchanged and rejects anything else with a kind-specific reason
//! carrying the offending input.

use fieldcast_core::{reason, Error, Value};

use crate::parser::Parser;

fn guard(
    label: &'static str,
    why: &'static str,
    accepts: impl Fn(&Value) -> bool + Send + Sync + 'static,
) -> Parser {
    Parser::new(label, move |input| {
        if accepts(input) {
            Ok(input.clone())
        } else {
            Err(Error::domain(why).with_detail("input", input.clone()))
        }
    })
}

/// Accept integers; reject with `not_an_integer`.
pub fn integer() -> Parser {
    guard("integer", reason::NOT_AN_INTEGER, |v| {
        matches!(v, Value::Int(_))
    })
}

/// Accept floats; reject with `not_a_float`.
pub fn float() -> Parser {
    guard("float", reason::NOT_A_FLOAT, |v| matches!(v, Value::Float(_)))
}

/// Accept strings; reject with `not_a_string`.
pub fn string() -> Parser {
    guard("string", reason::NOT_A_STRING, |v| {
        matches!(v, Value::String(_))
    })
}

/// Accept booleans; reject with `not_a_boolean`.
pub fn boolean() -> Parser {
    guard("boolean", reason::NOT_A_BOOLEAN, |v| {
        matches!(v, Value::Bool(_))
    })
}

/// Accept symbols; reject with `not_a_symbol`.
pub fn symbol() -> Parser {
    guard("symbol", reason::NOT_A_SYMBOL, |v| {
        matches!(v, Value::Symbol(_))
    })
}
