//! End-to-end tests for the parsing engine: field resolution, typed
//! construction, partial updates, and the error chains a caller at a
//! boundary actually inspects.

use fieldcast_core::{Error, Value};
use fieldcast_parse::{
    build_new, build_update, compile, list, map_of, predicate, FieldSpec, TypeTag,
};
use fieldcast_parse::primitive::{integer, string};

fn user_specs() -> Vec<FieldSpec> {
    vec![
        FieldSpec::new("name", string()),
        FieldSpec::new("age", integer()).default_value(21i64),
        FieldSpec::new("note", string()).optional(),
    ]
}

#[test]
fn builds_a_record_from_json_boundary_input() {
    let json: serde_json::Value = serde_json::json!({
        "name": "ada",
        "age": 36
    });
    let input = Value::from_json(json);

    let user = build_new(user_specs(), TypeTag::new("user"), &input).unwrap();
    assert_eq!(user.value("name"), Some(&Value::string("ada")));
    assert_eq!(user.value("age"), Some(&Value::int(36)));
    // JSON keys are strings; the resolver's string fallback found them.
    assert!(user.record().get("note").unwrap().is_absent());
}

#[test]
fn round_trip_empty_update_preserves_the_record() {
    let input = Value::map([(Value::symbol("name"), Value::string("ada"))]);
    let tag = TypeTag::new("user");
    let original = build_new(user_specs(), tag.clone(), &input).unwrap();

    let updater = build_update(user_specs(), tag, &Value::map([])).unwrap();
    assert_eq!(updater.apply(&original).unwrap(), original);
}

#[test]
fn update_validates_with_the_same_rules_as_construction() {
    let tag = TypeTag::new("user");
    let original = build_new(
        user_specs(),
        tag.clone(),
        &Value::map([(Value::symbol("name"), Value::string("ada"))]),
    )
    .unwrap();

    // A valid partial update goes through.
    let partial = Value::map([(Value::symbol("age"), Value::int(40))]);
    let updated = build_update(user_specs(), tag.clone(), &partial)
        .unwrap()
        .apply(&original)
        .unwrap();
    assert_eq!(updated.value("age"), Some(&Value::int(40)));
    assert_eq!(updated.value("name"), Some(&Value::string("ada")));

    // The same field rejects the same bad value it would reject at
    // construction time.
    let partial = Value::map([(Value::symbol("age"), Value::string("old"))]);
    let err = build_update(user_specs(), tag, &partial).unwrap_err();
    assert_eq!(err.reason().as_str(), "invalid_parameter");
    assert_eq!(err.detail("key"), Some(&Value::symbol("age")));
    assert_eq!(err.detail("value"), Some(&Value::string("old")));
}

#[test]
fn update_refuses_records_of_another_type() {
    let user = build_new(
        user_specs(),
        TypeTag::new("user"),
        &Value::map([(Value::symbol("name"), Value::string("ada"))]),
    )
    .unwrap();

    let updater = build_update(user_specs(), TypeTag::new("order"), &Value::map([])).unwrap();
    let err = updater.apply(&user).unwrap_err();
    assert_eq!(err.reason().as_str(), "struct_type_mismatch");
    assert_eq!(err.detail("expecting"), Some(&Value::symbol("order")));
    let got = err.detail("got").unwrap();
    assert_eq!(got.get(&Value::symbol("struct")), Some(&Value::symbol("user")));
}

#[test]
fn failed_field_chains_to_its_root_cause() {
    let parser = compile(vec![FieldSpec::new("age", integer()).default_value(21i64)]).unwrap();

    // Absent key: default applies.
    let record = parser.parse(&Value::map([])).unwrap();
    assert_eq!(record.value("age"), Some(&Value::int(21)));

    // Present but unparsable: failure, with the cause walkable both
    // through caused_by() and through std::error::Error::source().
    let input = Value::map([(Value::symbol("age"), Value::string("x"))]);
    let err = parser.parse(&input).unwrap_err();
    assert_eq!(err.reason().as_str(), "failed_to_parse_field");
    assert_eq!(err.caused_by().unwrap().reason().as_str(), "not_an_integer");
    assert_eq!(err.root_cause().reason().as_str(), "not_an_integer");

    let source = std::error::Error::source(&err).expect("source");
    assert!(source.to_string().starts_with("not_an_integer"));
}

#[test]
fn nullable_is_not_optional() {
    let specs = || vec![FieldSpec::new("field", integer()).nullable()];

    let parser = compile(specs()).unwrap();
    let record = parser
        .parse(&Value::map([(Value::symbol("field"), Value::Nil)]))
        .unwrap();
    assert_eq!(record.value("field"), Some(&Value::Nil));

    let err = compile(specs()).unwrap().parse(&Value::map([])).unwrap_err();
    assert_eq!(err.reason().as_str(), "field_not_found_in_input");
}

#[test]
fn recursive_spec_parses_the_enclosing_input() {
    let point = compile(vec![
        FieldSpec::new("x", integer()),
        FieldSpec::new("y", integer()),
    ])
    .unwrap()
    .into_value_parser();

    let parser = compile(vec![
        FieldSpec::new("point", point).recurse(),
        FieldSpec::new("value", integer()),
    ])
    .unwrap();

    let input = Value::map([
        (Value::symbol("x"), Value::int(1)),
        (Value::symbol("y"), Value::int(2)),
        (Value::symbol("value"), Value::int(3)),
    ]);
    let record = parser.parse(&input).unwrap();
    assert_eq!(
        record.to_value(),
        Value::map([
            (
                Value::symbol("point"),
                Value::map([
                    (Value::symbol("x"), Value::int(1)),
                    (Value::symbol("y"), Value::int(2)),
                ])
            ),
            (Value::symbol("value"), Value::int(3)),
        ])
    );
}

#[test]
fn list_reports_the_first_bad_element() {
    let p = list(integer());
    let input = Value::list([Value::int(1), Value::string("x"), Value::int(3)]);
    let err = p.parse(&input).unwrap_err();
    assert_eq!(err.reason().as_str(), "not_an_integer");
    assert_eq!(err.detail("failed_element"), Some(&Value::string("x")));
}

#[test]
fn map_key_errors_take_precedence() {
    let p = map_of(string(), string());
    let input = Value::map([(Value::int(1), Value::int(99))]);
    let err = p.parse(&input).unwrap_err();
    assert_eq!(err.detail("failed_key"), Some(&Value::int(1)));
    assert_eq!(err.detail("failed_value"), None);
}

#[test]
fn caller_supplied_errors_pass_through_untouched() {
    let custom = Error::domain("too_young").with_detail("minimum", Value::int(18));
    let adult = fieldcast_parse::predicate_or(
        "adult",
        |v| matches!(v, Value::Int(n) if *n >= 18),
        custom.clone(),
    );
    let parser = compile(vec![FieldSpec::new("age", adult)]).unwrap();
    let err = parser
        .parse(&Value::map([(Value::symbol("age"), Value::int(12))]))
        .unwrap_err();
    assert_eq!(err.reason().as_str(), "failed_to_parse_field");
    assert_eq!(err.caused_by(), Some(&custom));
}

#[test]
fn compiled_parsers_are_shareable_across_threads() {
    let parser = compile(vec![FieldSpec::new("n", integer())]).unwrap();
    let input = Value::map([(Value::symbol("n"), Value::int(7))]);

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let parser = parser.clone();
            let input = input.clone();
            std::thread::spawn(move || parser.parse(&input))
        })
        .collect();
    for handle in handles {
        let record = handle.join().unwrap().unwrap();
        assert_eq!(record.value("n"), Some(&Value::int(7)));
    }
}

#[test]
fn predicate_default_error_identifies_the_predicate() {
    let even = predicate("even", |v| matches!(v, Value::Int(n) if n % 2 == 0));
    let err = even.parse(&Value::int(3)).unwrap_err();
    assert_eq!(err.reason().as_str(), "predicate_not_satisfied");
    assert_eq!(err.detail("predicate"), Some(&Value::string("even")));
    assert_eq!(err.detail("input"), Some(&Value::int(3)));
}

mod properties {
    use super::*;
    use proptest::prelude::*;

    /// One of the three exclusive options, chosen by index.
    fn with_option(spec: FieldSpec, option: u8) -> FieldSpec {
        match option {
            0 => spec.optional(),
            1 => spec.default_value(0i64),
            _ => spec.nullable(),
        }
    }

    proptest! {
        /// Any spec with two distinct exclusive options fails to
        /// compile; any spec with at most one compiles.
        #[test]
        fn three_way_exclusivity(first in 0u8..3, second in 0u8..3) {
            let single = with_option(FieldSpec::new("f", integer()), first);
            prop_assert!(compile(vec![single]).is_ok());

            let spec = with_option(
                with_option(FieldSpec::new("f", integer()), first),
                second,
            );
            let result = compile(vec![spec]);
            if first == second {
                // Re-applying the same option is not a conflict.
                prop_assert!(result.is_ok());
            } else {
                let err = result.unwrap_err();
                prop_assert_eq!(err.reason().as_str(), "invalid_field_spec");
            }
        }

        /// Resolution is a pure function: the same compiled parser on
        /// the same input always produces the same outcome.
        #[test]
        fn resolution_is_deterministic(age in any::<i64>()) {
            let parser = compile(vec![FieldSpec::new("age", integer())]).unwrap();
            let input = Value::map([(Value::symbol("age"), Value::int(age))]);
            let a = parser.parse(&input);
            let b = parser.parse(&input);
            prop_assert_eq!(a, b);
        }

        /// build_new then an empty update always round-trips.
        #[test]
        fn empty_update_round_trips(name in "[a-z]{1,10}", age in any::<i64>()) {
            let tag = TypeTag::new("user");
            let input = Value::map([
                (Value::symbol("name"), Value::string(name)),
                (Value::symbol("age"), Value::int(age)),
            ]);
            let original = build_new(user_specs(), tag.clone(), &input).unwrap();
            let updater = build_update(user_specs(), tag, &Value::map([])).unwrap();
            prop_assert_eq!(updater.apply(&original).unwrap(), original);
        }
    }
}
