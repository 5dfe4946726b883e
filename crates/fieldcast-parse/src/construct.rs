//! # Typed Record Construction & Partial Updates
//!
//! Builds concrete typed records from field specifications, and builds
//! type-safe partial-update functions from the same specifications —
//! guaranteeing a field's acceptance rule is defined exactly once for
//! both full construction and partial mutation.
//!
//! ## Type descriptors
//!
//! Records are tagged with a [`TypeTag`], a registry-style type
//! descriptor. An update compiled for one tag refuses to touch a record
//! carrying another, failing with `struct_type_mismatch`.

use fieldcast_core::{reason, Error, Symbol, Value};

use crate::field::FieldSpec;
use crate::parser::Parser;
use crate::record::Record;
use crate::resolve::{compile, compile_one, normalize};

/// A registry-style type descriptor for typed records.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeTag(Symbol);

impl TypeTag {
    /// Declare a type descriptor.
    pub fn new(name: impl Into<Symbol>) -> Self {
        Self(name.into())
    }

    /// The type's name.
    pub fn name(&self) -> &Symbol {
        &self.0
    }
}

impl std::fmt::Display for TypeTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A record tagged with its type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypedRecord {
    tag: TypeTag,
    record: Record,
}

impl TypedRecord {
    /// The record's type descriptor.
    pub fn tag(&self) -> &TypeTag {
        &self.tag
    }

    /// The underlying record.
    pub fn record(&self) -> &Record {
        &self.record
    }

    /// Look up a field's contained value by name.
    pub fn value(&self, name: &str) -> Option<&Value> {
        self.record.value(name)
    }

    /// Render as an association: the type name under the `struct` key,
    /// then the record's fields.
    pub fn to_value(&self) -> Value {
        let mut entries = vec![(
            Value::symbol("struct"),
            Value::Symbol(self.tag.name().clone()),
        )];
        if let Some(fields) = self.record.to_value().as_entries() {
            entries.extend(fields.iter().cloned());
        }
        Value::map(entries)
    }
}

/// A compiled constructor: field specifications validated once, then
/// applied to many inputs.
#[derive(Debug, Clone)]
pub struct Constructor {
    tag: TypeTag,
    parser: Parser<Record>,
}

impl Constructor {
    /// Compile `specs` for records of type `tag`.
    ///
    /// # Errors
    ///
    /// `invalid_field_spec` for the first spec violating the
    /// option-combination rules.
    pub fn new(specs: Vec<FieldSpec>, tag: TypeTag) -> Result<Self, Error> {
        Ok(Self {
            tag,
            parser: compile(specs)?,
        })
    }

    /// Build a typed record from an associative input.
    ///
    /// Resolution errors propagate unchanged from the compiled resolver.
    pub fn build(&self, input: &Value) -> Result<TypedRecord, Error> {
        let record = self.parser.parse(input)?;
        Ok(TypedRecord {
            tag: self.tag.clone(),
            record,
        })
    }
}

/// Compile `specs` and build one typed record from `input`.
pub fn build_new(
    specs: Vec<FieldSpec>,
    tag: TypeTag,
    input: &Value,
) -> Result<TypedRecord, Error> {
    Constructor::new(specs, tag)?.build(input)
}

/// A compiled partial update, applied to existing typed records.
///
/// Produced by [`build_update`]; holds the validated per-key
/// contributions and the type it may be applied to.
#[derive(Debug, Clone)]
pub struct Updater {
    tag: TypeTag,
    changes: Record,
}

impl Updater {
    /// The fields this update will overlay.
    pub fn changes(&self) -> &Record {
        &self.changes
    }

    /// Apply the update to an existing record.
    ///
    /// Produces a new record equal to the original with the update's
    /// entries overlaid; fields not named in the update are untouched.
    ///
    /// # Errors
    ///
    /// `struct_type_mismatch` when the record's type differs from the
    /// one the update was compiled for.
    pub fn apply(&self, current: &TypedRecord) -> Result<TypedRecord, Error> {
        if current.tag != self.tag {
            return Err(Error::domain(reason::STRUCT_TYPE_MISMATCH)
                .with_detail("expecting", Value::Symbol(self.tag.name().clone()))
                .with_detail("got", current.to_value()));
        }
        Ok(TypedRecord {
            tag: current.tag.clone(),
            record: current.record.clone().merge(self.changes.clone()),
        })
    }
}

/// Build a partial-update function from field specifications.
///
/// Every spec is compiled into a single-field parser (`compile_one`
/// semantics: `optional`/`recurse` stripped, defaults widened). Each
/// `(key, value)` pair of `partial` is then probed against the per-field
/// parsers in specification order:
///
/// - no parser accepts the pair → `invalid_parameter` with the key and
///   value;
/// - otherwise the first-registered matching field contributes the pair
///   (the deterministic tie-break when widened domains overlap).
///
/// Contributions merge right-biased into the update. An empty `partial`
/// yields an updater that returns records unchanged.
pub fn build_update(
    specs: Vec<FieldSpec>,
    tag: TypeTag,
    partial: &Value,
) -> Result<Updater, Error> {
    let mut parsers = Vec::with_capacity(specs.len());
    for spec in specs {
        parsers.push(compile_one(spec)?);
    }

    let pairs = normalize(partial)?;
    let mut changes = Record::new();
    for (key, value) in &pairs {
        let probe = Value::Map(vec![(key.clone(), value.clone())]);
        let contribution = parsers.iter().find_map(|p| p.parse(&probe).ok());
        match contribution {
            Some(entry) => changes = changes.merge(entry),
            None => {
                return Err(Error::domain(reason::INVALID_PARAMETER)
                    .with_detail("key", key.clone())
                    .with_detail("value", value.clone()));
            }
        }
    }

    Ok(Updater { tag, changes })
}
