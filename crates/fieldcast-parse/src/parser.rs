//! # The Parser Contract
//!
//! A parser is an immutable callable value: a pure function from an
//! arbitrary [`Value`] to either a typed success or a structured
//! [`Error`]. Composed parsers own their constituents by value; invoking
//! a parser mutates nothing, so compiled parsers are `Send + Sync` and
//! may be shared and called concurrently without synchronization.
//!
//! The expected lifecycle is build-once, call-many: construction is
//! amortized across repeated `parse` invocations.

use std::fmt;
use std::sync::Arc;

use fieldcast_core::{Error, Value};

/// An immutable parser from dynamic input to `T`.
///
/// The default target is [`Value`]: most combinators normalize input
/// rather than change its representation. The field specification
/// resolver produces `Parser<Record>`.
///
/// Each parser carries a diagnostic label, used by `alternation` and the
/// default `predicate` error to identify which parser was involved.
pub struct Parser<T = Value> {
    label: String,
    run: Arc<dyn Fn(&Value) -> Result<T, Error> + Send + Sync>,
}

impl<T> Clone for Parser<T> {
    fn clone(&self) -> Self {
        Self {
            label: self.label.clone(),
            run: Arc::clone(&self.run),
        }
    }
}

impl<T> fmt::Debug for Parser<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Parser").field("label", &self.label).finish()
    }
}

impl<T> Parser<T> {
    /// Build a parser from a label and a pure function.
    pub fn new(
        label: impl Into<String>,
        run: impl Fn(&Value) -> Result<T, Error> + Send + Sync + 'static,
    ) -> Self {
        Self {
            label: label.into(),
            run: Arc::new(run),
        }
    }

    /// Apply the parser to an input value.
    ///
    /// The input is read-only; outputs are freshly allocated.
    pub fn parse(&self, input: &Value) -> Result<T, Error> {
        (self.run)(input)
    }

    /// The diagnostic label.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// The same parser under a different diagnostic label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }
}

impl<T: 'static> Parser<T> {
    /// Transform the success value, keeping the failure channel intact.
    pub fn map<U>(self, f: impl Fn(T) -> U + Send + Sync + 'static) -> Parser<U> {
        let label = self.label.clone();
        Parser::new(label, move |input| self.parse(input).map(&f))
    }
}
