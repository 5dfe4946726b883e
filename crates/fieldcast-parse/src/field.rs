//! # Field Specifications
//!
//! A [`FieldSpec`] declares how to locate, validate, and default one
//! named output field. It is a declaration, not yet validated: the
//! option-combination rules are enforced when a resolver is compiled,
//! never at resolution time.
//!
//! The validated form, `Field`, is private to the crate and can only be
//! produced by the compilation checks here, so a resolver never runs
//! over an illegal specification.
//!
//! ## Option legality
//!
//! `optional`, a present `default`, and `nullable` are pairwise mutually
//! exclusive: no two may be set on one spec. `recurse` combines with any
//! of them; it changes what "the field's value" means (the whole
//! enclosing input instead of one key's value).

use fieldcast_core::{reason, Error, Symbol, Value};

use crate::combinator::{alternation, equals, nil};
use crate::parser::Parser;

/// A declarative description of one field.
///
/// Built with [`FieldSpec::new`] plus setters; immutable once built and
/// reused across many resolver invocations.
#[derive(Debug, Clone)]
pub struct FieldSpec {
    name: Symbol,
    source: Symbol,
    parser: Parser,
    optional: bool,
    default: Option<Value>,
    nullable: bool,
    recurse: bool,
}

impl FieldSpec {
    /// Declare a field: canonical output key plus the parser applied to
    /// the located value. The input key defaults to `name`.
    pub fn new(name: impl Into<Symbol>, parser: Parser) -> Self {
        let name = name.into();
        Self {
            source: name.clone(),
            name,
            parser,
            optional: false,
            default: None,
            nullable: false,
            recurse: false,
        }
    }

    /// Read this field from a different input key.
    pub fn source(mut self, source: impl Into<Symbol>) -> Self {
        self.source = source.into();
        self
    }

    /// Mark the field optional: a missing key resolves to absent, and
    /// the output is `Option`-wrapped.
    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    /// Use `default` when the key is absent. The default is stored
    /// verbatim, without running the field's parser over it.
    pub fn default_value(mut self, default: impl Into<Value>) -> Self {
        self.default = Some(default.into());
        self
    }

    /// Accept `Nil` as a valid value, in addition to whatever the
    /// field's parser accepts. Does not imply `optional`.
    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    /// Feed the *entire* enclosing input to the field's parser instead
    /// of looking up a key.
    pub fn recurse(mut self) -> Self {
        self.recurse = true;
        self
    }

    /// The canonical output key.
    pub fn name(&self) -> &Symbol {
        &self.name
    }

    /// Render the declaration for diagnostics.
    pub fn describe(&self) -> Value {
        let mut entries = vec![
            (Value::symbol("name"), Value::Symbol(self.name.clone())),
            (Value::symbol("source"), Value::Symbol(self.source.clone())),
            (Value::symbol("parser"), Value::string(self.parser.label())),
            (Value::symbol("optional"), Value::Bool(self.optional)),
            (Value::symbol("nullable"), Value::Bool(self.nullable)),
            (Value::symbol("recurse"), Value::Bool(self.recurse)),
        ];
        if let Some(default) = &self.default {
            entries.push((Value::symbol("default"), default.clone()));
        }
        Value::map(entries)
    }

    /// Whether the pairwise exclusivity rule is violated.
    fn options_conflict(&self) -> bool {
        let set = [self.optional, self.default.is_some(), self.nullable];
        set.iter().filter(|flag| **flag).count() > 1
    }

    fn invalid(&self) -> Error {
        Error::domain(reason::INVALID_FIELD_SPEC).with_detail("spec", self.describe())
    }
}

/// The validated form of a [`FieldSpec`]: guaranteed legal, with the
/// `nullable` option already rewritten into the effective parser.
#[derive(Debug, Clone)]
pub(crate) struct Field {
    pub(crate) name: Symbol,
    pub(crate) source: Symbol,
    pub(crate) parser: Parser,
    pub(crate) optional: bool,
    pub(crate) default: Option<Value>,
    pub(crate) recurse: bool,
}

impl Field {
    /// Validate a spec for resolver compilation.
    ///
    /// When `nullable` is set the effective parser becomes
    /// `alternation([parser, nil])`.
    pub(crate) fn from_spec(spec: FieldSpec) -> Result<Field, Error> {
        if spec.options_conflict() {
            return Err(spec.invalid());
        }
        let parser = if spec.nullable {
            alternation(vec![spec.parser, nil()])
        } else {
            spec.parser
        };
        Ok(Field {
            name: spec.name,
            source: spec.source,
            parser,
            optional: spec.optional,
            default: spec.default,
            recurse: spec.recurse,
        })
    }

    /// Validate a spec for the single-field update engine.
    ///
    /// Strips `optional` and `recurse` semantics — the resulting field
    /// only ever matches a present, non-recursive key. A `default`
    /// widens the effective parser to also accept a value exactly equal
    /// to the default, so a default can be explicitly supplied back as
    /// an update value.
    pub(crate) fn for_update(spec: FieldSpec) -> Result<Field, Error> {
        if spec.options_conflict() {
            return Err(spec.invalid());
        }
        let mut parser = spec.parser;
        if let Some(default) = &spec.default {
            parser = alternation(vec![parser, equals(default.clone())]);
        }
        if spec.nullable {
            parser = alternation(vec![parser, nil()]);
        }
        Ok(Field {
            name: spec.name,
            source: spec.source,
            parser,
            optional: false,
            default: None,
            recurse: false,
        })
    }
}
