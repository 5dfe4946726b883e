//! # Generic Combinators
//!
//! Builders and derivers for [`Parser`] values: predicates, membership,
//! collections, alternation, and option lifting. Every combinator is
//! fail-fast — the first failure aborts remaining work and is returned
//! as-is or enriched with one extra layer of context.
//!
//! ## Failure enrichment
//!
//! Collection combinators do not re-wrap element failures; they return
//! the element parser's own error with one detail added identifying the
//! offending input (`failed_element`, `failed_key`, `failed_value`).

use fieldcast_core::{assoc_put, reason, Error, Value};

use crate::parser::Parser;

// ─── Predicates & membership ─────────────────────────────────────────

/// Accept the input iff `p(input)` is true.
///
/// On failure produces a `predicate_not_satisfied` error carrying the
/// predicate's label and the offending input.
pub fn predicate(
    label: impl Into<String>,
    p: impl Fn(&Value) -> bool + Send + Sync + 'static,
) -> Parser {
    let label = label.into();
    let detail_label = label.clone();
    predicate_or_else(label, p, move |input| {
        Error::domain(reason::PREDICATE_NOT_SATISFIED)
            .with_detail("predicate", Value::string(detail_label.clone()))
            .with_detail("input", input.clone())
    })
}

/// Accept the input iff `p(input)` is true; fail with the caller's
/// static error.
pub fn predicate_or(
    label: impl Into<String>,
    p: impl Fn(&Value) -> bool + Send + Sync + 'static,
    err: Error,
) -> Parser {
    predicate_or_else(label, p, move |_| err.clone())
}

/// Accept the input iff `p(input)` is true; fail with an error computed
/// from the failing input.
pub fn predicate_or_else(
    label: impl Into<String>,
    p: impl Fn(&Value) -> bool + Send + Sync + 'static,
    on_fail: impl Fn(&Value) -> Error + Send + Sync + 'static,
) -> Parser {
    Parser::new(label, move |input| {
        if p(input) {
            Ok(input.clone())
        } else {
            Err(on_fail(input))
        }
    })
}

/// Accept the input iff it is a member of `elements` (value equality).
pub fn one_of(elements: Vec<Value>) -> Parser {
    let members = elements.clone();
    one_of_or_else(elements, move |input| {
        Error::domain(reason::PREDICATE_NOT_SATISFIED)
            .with_detail("predicate", Value::string("one_of"))
            .with_detail("elements", Value::List(members.clone()))
            .with_detail("input", input.clone())
    })
}

/// Membership test with a caller-supplied static error.
pub fn one_of_or(elements: Vec<Value>, err: Error) -> Parser {
    one_of_or_else(elements, move |_| err.clone())
}

/// Membership test with an error computed from the failing input.
pub fn one_of_or_else(
    elements: Vec<Value>,
    on_fail: impl Fn(&Value) -> Error + Send + Sync + 'static,
) -> Parser {
    Parser::new("one_of", move |input| {
        if elements.contains(input) {
            Ok(input.clone())
        } else {
            Err(on_fail(input))
        }
    })
}

/// Accept exactly `expected` (value equality).
pub fn equals(expected: Value) -> Parser {
    let label = format!("equals({expected})");
    let target = expected.clone();
    predicate_or_else(
        label,
        move |input| *input == expected,
        move |input| {
            Error::domain(reason::PREDICATE_NOT_SATISFIED)
                .with_detail("predicate", Value::string("equals"))
                .with_detail("expected", target.clone())
                .with_detail("input", input.clone())
        },
    )
}

/// Accept exactly `Nil`.
pub fn nil() -> Parser {
    equals(Value::Nil).with_label("nil")
}

// ─── Collections ─────────────────────────────────────────────────────

/// Require a list and apply `p` to every element.
///
/// Fails fast on the first rejected element; that failure is enriched
/// with `failed_element` = the offending original element. Element order
/// is preserved. An empty list always succeeds with an empty output.
pub fn list(p: Parser) -> Parser {
    let label = format!("list({})", p.label());
    Parser::new(label, move |input| match input {
        Value::List(items) => {
            let mut out = Vec::with_capacity(items.len());
            for item in items {
                match p.parse(item) {
                    Ok(parsed) => out.push(parsed),
                    Err(err) => return Err(err.with_detail("failed_element", item.clone())),
                }
            }
            Ok(Value::List(out))
        }
        other => Err(Error::domain(reason::NOT_A_LIST).with_detail("input", other.clone())),
    })
}

/// As [`list`], but reject an empty input with `empty_list` before
/// delegating.
pub fn nonempty_list(p: Parser) -> Parser {
    let label = format!("nonempty_list({})", p.label());
    let elements = list(p);
    Parser::new(label, move |input| match input {
        Value::List(items) if items.is_empty() => {
            Err(Error::domain(reason::EMPTY_LIST).with_detail("input", input.clone()))
        }
        other => elements.parse(other),
    })
}

/// Require a set and apply `p` to every member.
///
/// Same fail-fast and `failed_element` policy as [`list`]; member order
/// is preserved, and parsed members that collide collapse to the first
/// occurrence.
pub fn set(p: Parser) -> Parser {
    let label = format!("set({})", p.label());
    Parser::new(label, move |input| match input {
        Value::Set(members) => {
            let mut out = Vec::with_capacity(members.len());
            for member in members {
                match p.parse(member) {
                    Ok(parsed) => {
                        if !out.contains(&parsed) {
                            out.push(parsed);
                        }
                    }
                    Err(err) => return Err(err.with_detail("failed_element", member.clone())),
                }
            }
            Ok(Value::Set(out))
        }
        other => Err(Error::domain(reason::NOT_A_SET).with_detail("input", other.clone())),
    })
}

/// Require an association and parse all keys, then all values.
///
/// Two fully separate passes: pass one runs `key_parser` over every key
/// in input order (fail-fast, failure enriched with `failed_key`),
/// producing a re-keyed intermediate association; pass two runs
/// `value_parser` over the intermediate's values (fail-fast, enriched
/// with `failed_value`). A key failure is therefore always reported
/// before any value failure.
pub fn map_of(key_parser: Parser, value_parser: Parser) -> Parser {
    let label = format!("map_of({}, {})", key_parser.label(), value_parser.label());
    Parser::new(label, move |input| match input {
        Value::Map(entries) => {
            let mut rekeyed: Vec<(Value, Value)> = Vec::with_capacity(entries.len());
            for (key, value) in entries {
                match key_parser.parse(key) {
                    Ok(parsed_key) => assoc_put(&mut rekeyed, parsed_key, value.clone()),
                    Err(err) => return Err(err.with_detail("failed_key", key.clone())),
                }
            }
            let mut out: Vec<(Value, Value)> = Vec::with_capacity(rekeyed.len());
            for (key, value) in rekeyed {
                match value_parser.parse(&value) {
                    Ok(parsed_value) => out.push((key, parsed_value)),
                    Err(err) => return Err(err.with_detail("failed_value", value)),
                }
            }
            Ok(Value::Map(out))
        }
        other => Err(Error::domain(reason::NOT_A_MAP).with_detail("input", other.clone())),
    })
}

// ─── Lifting & alternation ───────────────────────────────────────────

/// Lift `p` into an option context.
///
/// A present input runs through `p`, propagating `p`'s raw error
/// unwrapped; an absent input succeeds as absent without invoking `p`.
pub fn maybe(p: Parser) -> impl Fn(Option<&Value>) -> Result<Option<Value>, Error> {
    move |input| match input {
        Some(value) => p.parse(value).map(Some),
        None => Ok(None),
    }
}

/// Try each parser in order and return the first success.
///
/// If none succeed, fails with `no_parser_applies` carrying the original
/// input and the labels of every parser tried.
pub fn alternation(parsers: Vec<Parser>) -> Parser {
    let labels: Vec<String> = parsers.iter().map(|p| p.label().to_owned()).collect();
    let label = format!("alternation({})", labels.join(" | "));
    Parser::new(label, move |input| {
        for parser in &parsers {
            if let Ok(parsed) = parser.parse(input) {
                return Ok(parsed);
            }
        }
        Err(Error::domain(reason::NO_PARSER_APPLIES)
            .with_detail("input", input.clone())
            .with_detail(
                "parsers",
                Value::list(labels.iter().map(|l| Value::string(l.clone()))),
            ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitive::{integer, string};

    // ---- predicate family ----

    #[test]
    fn test_predicate_default_error() {
        let positive = predicate("positive", |v| matches!(v, Value::Int(n) if *n > 0));
        assert_eq!(positive.parse(&Value::int(3)), Ok(Value::int(3)));

        let err = positive.parse(&Value::int(-1)).unwrap_err();
        assert_eq!(err.reason().as_str(), "predicate_not_satisfied");
        assert_eq!(err.detail("predicate"), Some(&Value::string("positive")));
        assert_eq!(err.detail("input"), Some(&Value::int(-1)));
    }

    #[test]
    fn test_predicate_or_static_error() {
        let custom = Error::domain("custom_reason").with_detail("hint", Value::string("nope"));
        let p = predicate_or("never", |_| false, custom.clone());
        assert_eq!(p.parse(&Value::Nil).unwrap_err(), custom);
    }

    #[test]
    fn test_predicate_or_else_uses_failing_input() {
        let p = predicate_or_else(
            "never",
            |_| false,
            |input| Error::domain("seen").with_detail("got", input.clone()),
        );
        let err = p.parse(&Value::string("x")).unwrap_err();
        assert_eq!(err.detail("got"), Some(&Value::string("x")));
    }

    // ---- one_of ----

    #[test]
    fn test_one_of_membership() {
        let p = one_of(vec![Value::symbol("red"), Value::symbol("blue")]);
        assert_eq!(p.parse(&Value::symbol("red")), Ok(Value::symbol("red")));

        let err = p.parse(&Value::symbol("green")).unwrap_err();
        assert_eq!(err.reason().as_str(), "predicate_not_satisfied");
        assert_eq!(err.detail("input"), Some(&Value::symbol("green")));
        assert_eq!(
            err.detail("elements"),
            Some(&Value::list([Value::symbol("red"), Value::symbol("blue")]))
        );
    }

    #[test]
    fn test_one_of_uses_value_equality() {
        // A string is not the symbol of the same name.
        let p = one_of(vec![Value::symbol("red")]);
        assert!(p.parse(&Value::string("red")).is_err());
    }

    // ---- equals / nil ----

    #[test]
    fn test_equals_and_nil() {
        assert_eq!(equals(Value::int(21)).parse(&Value::int(21)), Ok(Value::int(21)));
        assert!(equals(Value::int(21)).parse(&Value::int(20)).is_err());
        assert_eq!(nil().parse(&Value::Nil), Ok(Value::Nil));
        assert!(nil().parse(&Value::int(0)).is_err());
    }

    // ---- list ----

    #[test]
    fn test_list_empty_always_succeeds() {
        let reject_all = predicate("never", |_| false);
        assert_eq!(list(reject_all).parse(&Value::list([])), Ok(Value::list([])));
    }

    #[test]
    fn test_list_fails_fast_on_first_bad_element() {
        let p = list(integer());
        let input = Value::list([Value::int(1), Value::string("x"), Value::symbol("y")]);
        let err = p.parse(&input).unwrap_err();
        assert_eq!(err.reason().as_str(), "not_an_integer");
        assert_eq!(err.detail("failed_element"), Some(&Value::string("x")));
    }

    #[test]
    fn test_list_preserves_order() {
        let p = list(integer());
        let input = Value::list([Value::int(3), Value::int(1), Value::int(2)]);
        assert_eq!(p.parse(&input), Ok(input.clone()));
    }

    #[test]
    fn test_list_rejects_non_list() {
        let err = list(integer()).parse(&Value::int(1)).unwrap_err();
        assert_eq!(err.reason().as_str(), "not_a_list");
        assert_eq!(err.detail("input"), Some(&Value::int(1)));
    }

    // ---- nonempty_list ----

    #[test]
    fn test_nonempty_list_rejects_empty() {
        let err = nonempty_list(integer()).parse(&Value::list([])).unwrap_err();
        assert_eq!(err.reason().as_str(), "empty_list");
    }

    #[test]
    fn test_nonempty_list_delegates() {
        let p = nonempty_list(integer());
        assert_eq!(
            p.parse(&Value::list([Value::int(1)])),
            Ok(Value::list([Value::int(1)]))
        );
        assert_eq!(
            p.parse(&Value::Nil).unwrap_err().reason().as_str(),
            "not_a_list"
        );
    }

    // ---- set ----

    #[test]
    fn test_set_empty_always_succeeds() {
        let reject_all = predicate("never", |_| false);
        assert_eq!(set(reject_all).parse(&Value::set([])), Ok(Value::set([])));
    }

    #[test]
    fn test_set_fails_fast_with_member() {
        let p = set(integer());
        let input = Value::set([Value::int(1), Value::string("x")]);
        let err = p.parse(&input).unwrap_err();
        assert_eq!(err.reason().as_str(), "not_an_integer");
        assert_eq!(err.detail("failed_element"), Some(&Value::string("x")));
    }

    #[test]
    fn test_set_rejects_list_shape() {
        let err = set(integer()).parse(&Value::list([])).unwrap_err();
        assert_eq!(err.reason().as_str(), "not_a_set");
    }

    // ---- map_of ----

    #[test]
    fn test_map_of_key_failure_wins_over_value_failure() {
        // Key 1 fails the string key parser; its value "v" would also
        // fail an integer value parser. The key failure must be reported.
        let p = map_of(string(), integer());
        let input = Value::map([(Value::int(1), Value::string("v"))]);
        let err = p.parse(&input).unwrap_err();
        assert_eq!(err.reason().as_str(), "not_a_string");
        assert_eq!(err.detail("failed_key"), Some(&Value::int(1)));
        assert_eq!(err.detail("failed_value"), None);
    }

    #[test]
    fn test_map_of_all_keys_checked_before_any_value() {
        // First entry's value is bad, second entry's key is bad: the key
        // failure is reported because keys are a separate earlier pass.
        let p = map_of(string(), integer());
        let input = Value::map([
            (Value::string("a"), Value::string("bad value")),
            (Value::int(2), Value::int(5)),
        ]);
        let err = p.parse(&input).unwrap_err();
        assert_eq!(err.detail("failed_key"), Some(&Value::int(2)));
    }

    #[test]
    fn test_map_of_value_failure_enriched() {
        let p = map_of(string(), integer());
        let input = Value::map([(Value::string("a"), Value::string("bad"))]);
        let err = p.parse(&input).unwrap_err();
        assert_eq!(err.reason().as_str(), "not_an_integer");
        assert_eq!(err.detail("failed_value"), Some(&Value::string("bad")));
    }

    #[test]
    fn test_map_of_success_rekeys() {
        // Key parser normalizes symbols to strings.
        let symbol_to_string = Parser::new("symbol_as_string", |input: &Value| match input {
            Value::Symbol(sym) => Ok(Value::string(sym.as_str())),
            other => Err(Error::domain(reason::NOT_A_SYMBOL).with_detail("input", other.clone())),
        });
        let p = map_of(symbol_to_string, integer());
        let input = Value::map([(Value::symbol("a"), Value::int(1))]);
        let out = p.parse(&input).unwrap();
        assert_eq!(out.get(&Value::string("a")), Some(&Value::int(1)));
    }

    #[test]
    fn test_map_of_rejects_non_map() {
        let err = map_of(string(), integer()).parse(&Value::list([])).unwrap_err();
        assert_eq!(err.reason().as_str(), "not_a_map");
    }

    // ---- maybe ----

    #[test]
    fn test_maybe_present_runs_parser() {
        let lifted = maybe(integer());
        assert_eq!(lifted(Some(&Value::int(3))), Ok(Some(Value::int(3))));

        // The parser's own error propagates unwrapped.
        let err = lifted(Some(&Value::string("x"))).unwrap_err();
        assert_eq!(err.reason().as_str(), "not_an_integer");
        assert!(err.caused_by().is_none());
    }

    #[test]
    fn test_maybe_absent_never_invokes_parser() {
        let explode = Parser::new("explode", |_: &Value| -> Result<Value, Error> {
            Err(Error::domain("should_not_run"))
        });
        let lifted = maybe(explode);
        assert_eq!(lifted(None), Ok(None));
    }

    // ---- alternation ----

    #[test]
    fn test_alternation_first_match_wins() {
        // Both accept integers; the first parser's output shape wins.
        let tagged = integer().map(|v| Value::list([Value::symbol("int"), v]));
        let p = alternation(vec![tagged, integer()]);
        assert_eq!(
            p.parse(&Value::int(1)),
            Ok(Value::list([Value::symbol("int"), Value::int(1)]))
        );
    }

    #[test]
    fn test_alternation_tries_in_order() {
        let p = alternation(vec![integer(), string()]);
        assert_eq!(p.parse(&Value::string("s")), Ok(Value::string("s")));
        assert_eq!(p.parse(&Value::int(2)), Ok(Value::int(2)));
    }

    #[test]
    fn test_alternation_no_parser_applies() {
        let p = alternation(vec![integer(), string()]);
        let err = p.parse(&Value::Nil).unwrap_err();
        assert_eq!(err.reason().as_str(), "no_parser_applies");
        assert_eq!(err.detail("input"), Some(&Value::Nil));
        assert_eq!(
            err.detail("parsers"),
            Some(&Value::list([
                Value::string("integer"),
                Value::string("string")
            ]))
        );
    }
}
