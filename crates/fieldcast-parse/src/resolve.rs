//! # Field Specification Resolver
//!
//! Compiles a list of declarative [`FieldSpec`]s into one composed
//! parser over associative inputs. Compilation validates every spec
//! (the option rules live in [`crate::field`]); the compiled parser is
//! an immutable value meant to be built once and invoked many times.
//!
//! ## Resolution semantics
//!
//! - Input must be an association, or a homogeneous list of two-element
//!   key/value pairs (converted to an association); anything else is
//!   `invalid_input`.
//! - Fields are evaluated in specification order and the first field
//!   failure aborts the rest.
//! - Key lookup tries the source key as a symbol first, then falls back
//!   to its textual string form, so inputs keyed by either
//!   representation resolve transparently.
//! - A field failure wraps the parser's error as `failed_to_parse_field`
//!   with the inner error as its cause; a missing required key without a
//!   default is `field_not_found_in_input`.

use std::sync::Arc;

use fieldcast_core::{assoc_get, assoc_put, reason, Error, Symbol, Value};

use crate::field::{Field, FieldSpec};
use crate::parser::Parser;
use crate::record::{FieldValue, Record};

/// Normalize a resolver input to an association.
///
/// Accepts an association as-is, or a list of two-element key/value
/// pairs (duplicate keys collapse last-write-wins). Any other shape is
/// `invalid_input` carrying the raw input.
pub(crate) fn normalize(input: &Value) -> Result<Vec<(Value, Value)>, Error> {
    match input {
        Value::Map(entries) => Ok(entries.clone()),
        Value::List(items) => {
            let mut assoc: Vec<(Value, Value)> = Vec::with_capacity(items.len());
            for item in items {
                match item.as_list() {
                    Some([key, value]) => assoc_put(&mut assoc, key.clone(), value.clone()),
                    _ => return Err(invalid_input(input)),
                }
            }
            Ok(assoc)
        }
        _ => Err(invalid_input(input)),
    }
}

fn invalid_input(input: &Value) -> Error {
    Error::domain(reason::INVALID_INPUT).with_detail("input", input.clone())
}

/// Two-step key lookup: the source symbol verbatim, then its textual
/// string form.
pub(crate) fn lookup<'a>(assoc: &'a [(Value, Value)], source: &Symbol) -> Option<&'a Value> {
    assoc_get(assoc, &Value::Symbol(source.clone()))
        .or_else(|| assoc_get(assoc, &Value::String(source.as_str().to_owned())))
}

fn resolver_label(fields: &[Field]) -> String {
    let names: Vec<&str> = fields.iter().map(|f| f.name.as_str()).collect();
    format!("record({})", names.join(", "))
}

/// Compile field specifications into one composed record parser.
///
/// The first spec violating the option-combination rules aborts
/// compilation with `invalid_field_spec` echoing the offending spec.
pub fn compile(specs: Vec<FieldSpec>) -> Result<Parser<Record>, Error> {
    let mut fields = Vec::with_capacity(specs.len());
    for spec in specs {
        fields.push(Field::from_spec(spec)?);
    }
    let label = resolver_label(&fields);
    let fields = Arc::new(fields);

    Ok(Parser::new(label, move |input| {
        let assoc = normalize(input)?;
        let whole = Value::Map(assoc.clone());
        let mut record = Record::new();

        for field in fields.iter() {
            let located = if field.recurse {
                Some(&whole)
            } else {
                lookup(&assoc, &field.source)
            };
            match located {
                Some(value) => {
                    let parsed = field.parser.parse(value).map_err(|inner| {
                        let outer = Error::domain(reason::FAILED_TO_PARSE_FIELD)
                            .with_detail("field", Value::Symbol(field.name.clone()))
                            .with_detail("input", value.clone());
                        Error::wrap(inner, outer)
                    })?;
                    let resolved = if field.optional {
                        FieldValue::Optional(Some(parsed))
                    } else {
                        FieldValue::Required(parsed)
                    };
                    record.insert(field.name.clone(), resolved);
                }
                None if field.optional => {
                    record.insert(field.name.clone(), FieldValue::Optional(None));
                }
                None => match &field.default {
                    // The default is stored verbatim; the field's parser
                    // does not run over it.
                    Some(default) => {
                        record.insert(field.name.clone(), FieldValue::Required(default.clone()));
                    }
                    None => {
                        return Err(Error::domain(reason::FIELD_NOT_FOUND_IN_INPUT)
                            .with_detail("field", Value::Symbol(field.name.clone()))
                            .with_detail("input", whole.clone()));
                    }
                },
            }
        }
        Ok(record)
    }))
}

/// Compile a single spec into a one-field parser for the update engine.
///
/// `optional` and `recurse` semantics are stripped: the parser only ever
/// matches a present, non-recursive key. A `default` widens the
/// effective parser to also accept a value exactly equal to the default.
/// Success is a one-entry record.
pub fn compile_one(spec: FieldSpec) -> Result<Parser<Record>, Error> {
    let field = Field::for_update(spec)?;
    let label = format!("field({})", field.name);

    Ok(Parser::new(label, move |input| {
        let assoc = normalize(input)?;
        match lookup(&assoc, &field.source) {
            Some(value) => {
                let parsed = field.parser.parse(value).map_err(|inner| {
                    let outer = Error::domain(reason::FAILED_TO_PARSE_FIELD)
                        .with_detail("field", Value::Symbol(field.name.clone()))
                        .with_detail("input", value.clone());
                    Error::wrap(inner, outer)
                })?;
                Ok(Record::single(
                    field.name.clone(),
                    FieldValue::Required(parsed),
                ))
            }
            None => Err(Error::domain(reason::FIELD_NOT_FOUND_IN_INPUT)
                .with_detail("field", Value::Symbol(field.name.clone()))
                .with_detail("input", Value::Map(assoc))),
        }
    }))
}
