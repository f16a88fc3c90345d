//! Plain deep merge properties
//!
//! Each property is checked over a small corpus of documents.

mod fixtures;

use deepmerge::{merge_all, merge_deep, merge_deep_all, MergeError, MergeOptions, Value};
use fixtures::doc;
use serde_json::json;

fn corpus() -> Vec<serde_json::Value> {
    vec![
        json!({}),
        json!({"a": 1}),
        json!({"a": {"b": {"c": [1, 2, {"d": null}]}}, "e": "text"}),
        json!({"flags": [true, false], "nested": {"empty": {}, "n": 1.5}}),
        json!({"list": [], "obj": {"list": ["x"]}}),
    ]
}

// =============================================================================
// Pairwise form
// =============================================================================

#[test]
fn test_concrete_pairwise_scenario() {
    let result = merge_deep(
        &doc(json!({"a": 1, "b": {"x": 1}})),
        &doc(json!({"b": {"y": 2}, "c": 3})),
    )
    .unwrap();
    assert_eq!(
        result.to_json().unwrap(),
        json!({"a": 1, "b": {"x": 1, "y": 2}, "c": 3})
    );
}

#[test]
fn test_disjoint_keys_give_union() {
    let cases = [
        (json!({"a": 1}), json!({"b": 2})),
        (json!({"a": {"x": 1}}), json!({"b": [1, 2]})),
        (json!({}), json!({"only": {"nested": true}})),
    ];
    for (left, right) in cases {
        let (a, b) = (doc(left.clone()), doc(right.clone()));
        let result = merge_deep(&a, &b).unwrap().to_json().unwrap();

        let mut expected = left.as_object().unwrap().clone();
        expected.extend(right.as_object().unwrap().clone());
        assert_eq!(result, serde_json::Value::Object(expected));

        assert_eq!(a.to_json().unwrap(), left);
        assert_eq!(b.to_json().unwrap(), right);
    }
}

#[test]
fn test_shared_record_key_merges_recursively() {
    let a = doc(json!({"k": {"p": 1, "q": {"r": 1}}, "z": 0}));
    let b = doc(json!({"k": {"q": {"s": 2}, "t": 3}}));

    let whole = merge_deep(&a, &b).unwrap();
    let a_k = a.as_record().unwrap().get_named("k");
    let b_k = b.as_record().unwrap().get_named("k");
    let inner = merge_deep(&a_k, &b_k).unwrap();

    assert_eq!(whole.get_named("k"), Value::Object(inner));
}

#[test]
fn test_idempotence() {
    for json in corpus() {
        let a = doc(json.clone());
        let result = merge_deep(&a, &a).unwrap();
        assert_eq!(Value::Object(result), a, "merge_deep(A, A) != A for {}", json);
    }
}

#[test]
fn test_pairwise_arrays_are_replaced() {
    let result = merge_deep(&doc(json!({"tags": ["a"]})), &doc(json!({"tags": ["b"]}))).unwrap();
    assert_eq!(result.to_json().unwrap(), json!({"tags": ["b"]}));
}

// =============================================================================
// Variadic form
// =============================================================================

#[test]
fn test_concrete_variadic_scenario() {
    let result = merge_deep_all(&[doc(json!({"tags": ["a"]})), doc(json!({"tags": ["b", "a"]}))])
        .unwrap();
    assert_eq!(result.to_json().unwrap(), json!({"tags": ["a", "b", "a"]}));
}

#[test]
fn test_variadic_concatenation_preserves_order() {
    let cases = [
        (json!([1, 2]), json!([2, 1])),
        (json!([]), json!(["x"])),
        (json!([{"a": 1}]), json!([{"a": 1}, null])),
    ];
    for (left, right) in cases {
        let result = merge_deep_all(&[doc(json!({"k": left.clone()})), doc(json!({"k": right.clone()}))])
            .unwrap()
            .to_json()
            .unwrap();

        let mut expected = left.as_array().unwrap().clone();
        expected.extend(right.as_array().unwrap().clone());
        assert_eq!(result, json!({"k": expected}));
    }
}

#[test]
fn test_variadic_nested_arrays_concatenate() {
    let result = merge_deep_all(&[
        doc(json!({"obj": {"list": ["x"], "keep": 1}})),
        doc(json!({"obj": {"list": ["y"]}})),
        doc(json!({"obj": {"list": ["x"]}})),
    ])
    .unwrap();
    assert_eq!(
        result.to_json().unwrap(),
        json!({"obj": {"list": ["x", "y", "x"], "keep": 1}})
    );
}

#[test]
fn test_variadic_unique_arrays_opt_in() {
    let inputs = [doc(json!({"k": [1, 2, 2]})), doc(json!({"k": [3, 1]}))];
    let result = merge_all(&inputs, MergeOptions::default().with_unique_arrays(true)).unwrap();
    assert_eq!(result.to_json().unwrap(), json!({"k": [1, 2, 3]}));
}

#[test]
fn test_variadic_single_input_is_equal_copy() {
    for json in corpus() {
        let a = doc(json.clone());
        let result = merge_deep_all(&[a.clone()]).unwrap();
        assert_eq!(Value::Object(result.clone()), a);
        assert!(!result.ptr_eq(a.as_record().unwrap()));
    }
}

#[test]
fn test_variadic_inputs_never_mutated() {
    let inputs: Vec<Value> = corpus().into_iter().map(doc).collect();
    let snapshot: Vec<serde_json::Value> = inputs.iter().map(|v| v.to_json().unwrap()).collect();

    let result = merge_deep_all(&inputs).unwrap();
    result.set("added", 1);

    let after: Vec<serde_json::Value> = inputs.iter().map(|v| v.to_json().unwrap()).collect();
    assert_eq!(after, snapshot);
}

// =============================================================================
// Cycles
// =============================================================================

#[test]
fn test_cycles_fail_fast_in_both_forms() {
    let cyclic = doc(json!({"child": {}}));
    let child = cyclic.as_record().unwrap().get_named("child");
    child.as_record().unwrap().set("back", cyclic.clone());

    let err = merge_deep(&doc(json!({})), &cyclic).unwrap_err();
    assert_eq!(
        err,
        MergeError::CycleDetected {
            path: "child.back.child".to_string()
        }
    );

    let err = merge_deep_all(&[cyclic.clone(), cyclic]).unwrap_err();
    assert!(matches!(err, MergeError::CycleDetected { .. }));
}
