//! # Structured Errors — Tagged, Chainable Failure Values
//!
//! Every failure in Fieldcast is a value of the [`Error`] type: a symbolic
//! `reason`, a `details` payload, and an optional causal predecessor.
//! Errors are never thrown and never logged by the core; they are returned
//! to the caller, who decides whether to retry, log, or surface them.
//!
//! ## Causal chains
//!
//! Errors compose by *wrapping*: an outer error ("field `age` failed to
//! parse") carries the inner error ("not an integer") as its cause. The
//! chain is walkable two ways — through the explicit [`Error::caused_by`]
//! accessor, and through `std::error::Error::source()` so the type plugs
//! into the wider Rust error ecosystem.
//!
//! ## Reasons
//!
//! Reasons are open-ended symbols. The [`reason`] module names the
//! built-in taxonomy; callers supplying their own errors (for example via
//! `predicate_or`) may mint any reason they like.

use std::fmt::{self, Display, Formatter};

use thiserror::Error as ThisError;

use crate::value::{Symbol, Value};

/// Built-in error reasons.
///
/// All are "domain" errors: expected, recoverable misuse or
/// malformed-input conditions, never infrastructure faults.
pub mod reason {
    /// Input was expected to be a list.
    pub const NOT_A_LIST: &str = "not_a_list";
    /// Input was expected to be a set.
    pub const NOT_A_SET: &str = "not_a_set";
    /// Input was expected to be an association.
    pub const NOT_A_MAP: &str = "not_a_map";
    /// Input had no recognizable associative shape.
    pub const INVALID_INPUT: &str = "invalid_input";
    /// A nonempty list was required.
    pub const EMPTY_LIST: &str = "empty_list";
    /// A field specification violated the option-combination rules.
    pub const INVALID_FIELD_SPEC: &str = "invalid_field_spec";
    /// A required field's key was not present in the input.
    pub const FIELD_NOT_FOUND_IN_INPUT: &str = "field_not_found_in_input";
    /// A located field value was rejected by its parser.
    pub const FAILED_TO_PARSE_FIELD: &str = "failed_to_parse_field";
    /// A predicate parser rejected its input.
    pub const PREDICATE_NOT_SATISFIED: &str = "predicate_not_satisfied";
    /// No alternative in an alternation accepted the input.
    pub const NO_PARSER_APPLIES: &str = "no_parser_applies";
    /// An update parameter was recognized by no field.
    pub const INVALID_PARAMETER: &str = "invalid_parameter";
    /// An update was applied to a record of the wrong type.
    pub const STRUCT_TYPE_MISMATCH: &str = "struct_type_mismatch";
    /// Input was expected to be an integer.
    pub const NOT_AN_INTEGER: &str = "not_an_integer";
    /// Input was expected to be a float.
    pub const NOT_A_FLOAT: &str = "not_a_float";
    /// Input was expected to be a string.
    pub const NOT_A_STRING: &str = "not_a_string";
    /// Input was expected to be a boolean.
    pub const NOT_A_BOOLEAN: &str = "not_a_boolean";
    /// Input was expected to be a symbol.
    pub const NOT_A_SYMBOL: &str = "not_a_symbol";
}

/// The details payload of an [`Error`]: an insertion-ordered association
/// of symbolic keys to values.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Details(Vec<(Symbol, Value)>);

impl Details {
    /// An empty payload.
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a detail by key.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0
            .iter()
            .find(|(k, _)| k.as_str() == key)
            .map(|(_, v)| v)
    }

    /// Insert or replace a detail, preserving entry order.
    pub fn put(&mut self, key: impl Into<Symbol>, value: impl Into<Value>) {
        let key = key.into();
        let value = value.into();
        match self.0.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.0.push((key, value)),
        }
    }

    /// Iterate over the entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &(Symbol, Value)> {
        self.0.iter()
    }

    /// Whether the payload is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl FromIterator<(Symbol, Value)> for Details {
    fn from_iter<I: IntoIterator<Item = (Symbol, Value)>>(iter: I) -> Self {
        let mut details = Details::new();
        for (k, v) in iter {
            details.put(k, v);
        }
        details
    }
}

impl Display for Details {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return Ok(());
        }
        f.write_str(" {")?;
        for (i, (k, v)) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{k}: {v}")?;
        }
        f.write_str("}")
    }
}

/// A structured, chainable error value.
///
/// Construction goes through [`Error::domain`]; the fields are private so
/// an error cannot be mutated after the fact — every "modification"
/// ([`Error::with_detail`], [`Error::wrap`], [`Error::map_details`])
/// produces a new value.
#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
#[error("{reason}{details}")]
pub struct Error {
    reason: Symbol,
    details: Details,
    #[source]
    caused_by: Option<Box<Error>>,
}

impl Error {
    /// A domain error with the given reason and no details.
    pub fn domain(reason: impl Into<Symbol>) -> Self {
        Self {
            reason: reason.into(),
            details: Details::new(),
            caused_by: None,
        }
    }

    /// A domain error with reason and details.
    pub fn domain_with(reason: impl Into<Symbol>, details: Details) -> Self {
        Self {
            reason: reason.into(),
            details,
            caused_by: None,
        }
    }

    /// The symbolic reason.
    pub fn reason(&self) -> &Symbol {
        &self.reason
    }

    /// The details payload.
    pub fn details(&self) -> &Details {
        &self.details
    }

    /// Shorthand for `details().get(key)`.
    pub fn detail(&self, key: &str) -> Option<&Value> {
        self.details.get(key)
    }

    /// The causal predecessor, if any.
    pub fn caused_by(&self) -> Option<&Error> {
        self.caused_by.as_deref()
    }

    /// Walk the causal chain to the innermost error.
    pub fn root_cause(&self) -> &Error {
        let mut cursor = self;
        while let Some(inner) = cursor.caused_by() {
            cursor = inner;
        }
        cursor
    }

    /// A copy of this error with one detail added (or replaced).
    pub fn with_detail(mut self, key: impl Into<Symbol>, value: impl Into<Value>) -> Self {
        self.details.put(key, value);
        self
    }

    /// A copy of this error with the details transformed.
    pub fn map_details(mut self, f: impl FnOnce(Details) -> Details) -> Self {
        self.details = f(self.details);
        self
    }

    /// Wrap `inner` with `outer`: the result is `outer` annotated with
    /// `inner` as its causal predecessor.
    ///
    /// Any cause already present on `outer` is replaced.
    pub fn wrap(inner: Error, outer: Error) -> Error {
        Error {
            caused_by: Some(Box::new(inner)),
            ..outer
        }
    }
}
