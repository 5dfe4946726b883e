//! # fieldcast-core — Foundational Types for Fieldcast
//!
//! This crate is the leaf of the Fieldcast workspace. It defines the
//! dynamic data model and the structured error algebra that the parsing
//! engine in `fieldcast-parse` consumes; it depends on nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **Errors are values.** [`Error`] is a tagged record — symbolic
//!    reason, details payload, optional causal predecessor — never an
//!    exception or a panic. The chain is walkable through
//!    [`Error::caused_by`] and through `std::error::Error::source()`.
//!
//! 2. **Insertion order is preserved.** [`Value`] sets and associations
//!    are `Vec`-backed and never re-sorted, so "the first failing
//!    element/key" is well defined and deterministic.
//!
//! 3. **Structural value equality.** Membership, deduplication, and
//!    default-widening compare by `==`; floats carry total ordering so
//!    `Value` is `Eq` and `Hash`.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `fieldcast-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.
//! - The core never logs; failures are returned, not reported.

pub mod error;
pub mod json;
pub mod value;

// Re-export primary types for ergonomic imports.
pub use error::{reason, Details, Error};
pub use value::{assoc_get, assoc_put, Symbol, Value};
