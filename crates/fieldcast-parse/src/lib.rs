//! # fieldcast-parse — Parse, Don't Validate
//!
//! The Fieldcast engine: validates and reshapes loosely-typed,
//! dynamically-structured input (associations, key/value sequences,
//! sets, lists) into well-defined records, producing either a validated
//! value or a structured, chainable error describing exactly what failed
//! and where.
//!
//! Every acceptance criterion is a composable [`Parser`] — a pure
//! function from an arbitrary value to a typed success or a descriptive
//! failure. The pieces, leaves first:
//!
//! - **Combinators** ([`combinator`]): `predicate`, `one_of`, `list`,
//!   `nonempty_list`, `set`, `map_of`, `maybe`, `alternation`.
//! - **Primitives** ([`primitive`]): scalar type guards.
//! - **Field resolver** ([`resolve`]): compiles declarative
//!   [`FieldSpec`]s into one composed parser over associative inputs,
//!   with optionality, defaults, nullability, key aliasing, and
//!   recursive sub-parsing.
//! - **Constructor/Updater** ([`construct`]): builds tagged records and
//!   type-safe partial updates from the same specifications.
//!
//! ## Crate Policy
//!
//! - All operations are synchronous pure functions; compiled parsers are
//!   immutable `Send + Sync` values, built once and invoked many times.
//! - Failures are [`fieldcast_core::Error`] values, fail-fast, never
//!   panics; the crate never logs.
//! - Depends only on `fieldcast-core` internally.

pub mod combinator;
pub mod construct;
pub mod field;
pub mod parser;
pub mod primitive;
pub mod record;
pub mod resolve;

// Re-export primary types for ergonomic imports.
pub use combinator::{
    alternation, equals, list, map_of, maybe, nil, nonempty_list, one_of, one_of_or,
    one_of_or_else, predicate, predicate_or, predicate_or_else, set,
};
pub use construct::{build_new, build_update, Constructor, TypeTag, TypedRecord, Updater};
pub use field::FieldSpec;
pub use parser::Parser;
pub use record::{FieldValue, Record};
pub use resolve::{compile, compile_one};
