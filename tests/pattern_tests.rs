//! Black-box tests for pattern compilation and evaluation.

use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::json;
use std::sync::Arc;
use typeshape_rs::{PatternSyntaxError, TypeChecker, TypeRegistry, Value};

fn checker() -> TypeChecker {
    TypeChecker::with_registry(Arc::new(TypeRegistry::new()))
}

#[rstest]
// int[] : one or more integers
#[case("int[]", json!(1), false)]
#[case("int[]", json!([]), false)]
#[case("int[]", json!([1]), true)]
#[case("int[]", json!([1, "string"]), false)]
#[case("int[]", json!([1, 2, 3, 4, 5, 6, 7, 8, 9, 10]), true)]
// int[1] : exactly one
#[case("int[1]", json!(1), false)]
#[case("int[1]", json!([]), false)]
#[case("int[1]", json!([1]), true)]
#[case("int[1]", json!([1, 1]), false)]
// int[0..] : zero or more
#[case("int[0..]", json!(1), false)]
#[case("int[0..]", json!([]), true)]
#[case("int[0..]", json!([1]), true)]
#[case("int[0..]", json!([1, 1]), true)]
// int[0..2] : up to two
#[case("int[0..2]", json!(1), false)]
#[case("int[0..2]", json!([]), true)]
#[case("int[0..2]", json!([1]), true)]
#[case("int[0..2]", json!([1, 1]), true)]
#[case("int[0..2]", json!([1, 1, 1]), false)]
// int[..2] : one or two
#[case("int[..2]", json!(1), false)]
#[case("int[..2]", json!([]), false)]
#[case("int[..2]", json!([1]), true)]
#[case("int[..2]", json!([1, 1]), true)]
#[case("int[..2]", json!([1, 1, 1]), false)]
fn evaluates_cardinality_table(
    #[case] pattern: &str,
    #[case] value: serde_json::Value,
    #[case] expected: bool,
) {
    let checker = checker();
    let compiled = checker.compile(pattern).unwrap();
    assert_eq!(compiled.evaluate(&Value::from(value)), expected, "{pattern}");
}

#[test]
fn nested_alternative_of_sequence() {
    let checker = checker();
    let pattern = checker.compile("(string|(boolean,object))[]").unwrap();

    assert!(pattern.evaluate(&Value::from(json!(["a", "b"]))));
    assert!(!pattern.evaluate(&Value::from(json!([]))));
    assert!(!pattern.evaluate(&Value::from(json!([[true]]))));

    let pair = Value::Array(vec![Value::Bool(true), Value::object("Anything")]);
    assert!(pattern.evaluate(&Value::Array(vec![pair.clone()])));

    // mixed strings and pairs are fine; a bad pair is not
    let values = Value::Array(vec![Value::string("a"), pair]);
    assert!(pattern.evaluate(&values));
    let bad_pair = Value::Array(vec![Value::object("Anything"), Value::Bool(true)]);
    assert!(!pattern.evaluate(&Value::Array(vec![bad_pair])));
}

#[test]
fn sequence_requires_exact_arity() {
    let checker = checker();
    let pattern = checker.compile("boolean,object").unwrap();

    let ok = Value::Array(vec![Value::Bool(true), Value::object("Thing")]);
    assert!(pattern.evaluate(&ok));

    let short = Value::Array(vec![Value::Bool(true)]);
    let long = Value::Array(vec![
        Value::Bool(true),
        Value::object("Thing"),
        Value::Null,
    ]);
    assert!(!pattern.evaluate(&short));
    assert!(!pattern.evaluate(&long));
}

#[rstest]
#[case("int|string|null")]
#[case("null|string|int")]
#[case("string|null|int")]
fn alternative_is_commutative(#[case] pattern: &str) {
    let checker = checker();
    let compiled = checker.compile(pattern).unwrap();

    for (value, expected) in [
        (Value::Int(3), true),
        (Value::string("x"), true),
        (Value::Null, true),
        (Value::Bool(true), false),
        (Value::Float(1.0), false),
        (Value::from(json!([1])), false),
    ] {
        assert_eq!(compiled.evaluate(&value), expected, "{pattern} on {value:?}");
    }
}

#[test]
fn mixed_matches_anything() {
    let checker = checker();
    let pattern = checker.compile("mixed[]").unwrap();
    let motley = Value::from(json!([null, true, 1, 1.5, "x", [1], {"a": 1}]));
    assert!(pattern.evaluate(&motley));
}

#[test]
fn maps_are_containers_in_iteration_order() {
    let checker = checker();
    let pattern = checker.compile("int,string").unwrap();
    assert!(pattern.evaluate(&Value::from(json!({"a": 1, "b": "x"}))));
    assert!(!pattern.evaluate(&Value::from(json!({"a": "x", "b": 1}))));

    let pattern = checker.compile("int[2]").unwrap();
    assert!(pattern.evaluate(&Value::from(json!({"a": 1, "b": 2}))));
}

#[test]
fn compile_is_referentially_stable() {
    let checker = checker();
    let a = checker.compile("(int|float)[3..]").unwrap();
    let b = checker.compile("(int|float)[3..]").unwrap();
    assert!(Arc::ptr_eq(a.ast(), b.ast()));
    assert_eq!(a.source(), b.source());
}

#[rstest]
#[case("int[..]", 6, None)]
#[case("(int", 4, Some(")"))]
#[case("int[1", 5, Some("]"))]
#[case("", 0, Some("type name"))]
#[case("|int", 0, Some("type name"))]
#[case("int|", 4, Some("type name"))]
#[case("int)", 3, Some("end of pattern"))]
#[case("int]", 3, Some("end of pattern"))]
#[case("~", 1, Some("type name"))]
fn compile_errors_carry_offsets(
    #[case] pattern: &str,
    #[case] offset: usize,
    #[case] expected_token: Option<&str>,
) {
    let checker = checker();
    let err = checker.compile(pattern).unwrap_err();
    assert_eq!(err.offset(), offset, "{pattern}");
    assert_eq!(err.expected_token(), expected_token, "{pattern}");
}

#[test]
fn invalid_range_is_a_hard_error() {
    let checker = checker();
    match checker.compile("string[..]") {
        Err(PatternSyntaxError::InvalidRange { offset }) => assert_eq!(offset, 9),
        other => panic!("expected invalid range, got {other:?}"),
    }
}

#[test]
fn global_entry_points() {
    // distinct pattern strings so this test owns its cache entries
    let a = typeshape_rs::compile("(bool|int)[7]").unwrap();
    let b = typeshape_rs::compile("(bool|int)[7]").unwrap();
    assert!(Arc::ptr_eq(a.ast(), b.ast()));

    assert!(typeshape_rs::is("scalar", &Value::Int(1)).unwrap());
    assert!(!typeshape_rs::is("scalar", &Value::Null).unwrap());
}
