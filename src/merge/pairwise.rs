//! Two-argument deep merge.

use deepmerge_record::{Record, RecordRef, Value};
use log::{debug, trace};

use super::detach::detach;
use crate::guard::{Side, Walk};
use crate::MergeError;

/// Deep merge `source` over `target` into a new record.
///
/// Merge semantics:
/// - The output starts as a copy of `target`'s own enumerable properties
///   (named and symbol, getters resolved). A non-record `target` has no
///   properties beyond its indexed entries: an array gives its elements
///   and a string its characters under `"0"`, `"1"`, ...; any other value
///   gives an empty record.
/// - When both inputs are records, each own enumerable named key of
///   `source` is applied: a record under a key `target` has (own or
///   inherited) is merged recursively with `target[k]`, whatever that is,
///   and anything else (scalars, arrays, functions, null) overwrites.
/// - Arrays REPLACE; only [`merge_all`](super::merge_all) concatenates.
pub fn merge_deep(target: &Value, source: &Value) -> Result<RecordRef, MergeError> {
    merge_values(&mut Walk::new(), None, target, source)
}

fn merge_values(
    walk: &mut Walk,
    segment: Option<String>,
    target: &Value,
    source: &Value,
) -> Result<RecordRef, MergeError> {
    match (target, source) {
        (Value::Object(target), Value::Object(source)) => {
            walk.descend(segment, target, source, |walk| merge_records(walk, target, source))
        }
        (Value::Object(target), other) => {
            debug!("merge_deep: {} source is not a record, copying target", other.type_name());
            walk.enter(segment, &[(Side::Target, target)], |walk| copy_enumerable(walk, target))
        }
        (other, _) => {
            debug!("merge_deep: {} target is not a record, copying indexed entries", other.type_name());
            walk.enter(segment, &[], |walk| copy_indexed(walk, other))
        }
    }
}

/// Copy of the own enumerable properties as plain data properties.
fn copy_enumerable(walk: &mut Walk, target: &RecordRef) -> Result<RecordRef, MergeError> {
    let output = RecordRef::new(Record::new());
    for key in target.own_enumerable_keys() {
        let value = detach(walk, key.to_string(), target.get(&key))?;
        output.set(key, value);
    }
    Ok(output)
}

/// Record view of a non-record value: its indexed entries, if any.
fn copy_indexed(walk: &mut Walk, value: &Value) -> Result<RecordRef, MergeError> {
    let output = RecordRef::new(Record::new());
    match value {
        Value::Array(items) => {
            for (index, item) in items.iter().enumerate() {
                let item = detach(walk, format!("[{}]", index), item.clone())?;
                output.set(index.to_string(), item);
            }
        }
        Value::String(text) => {
            for (index, ch) in text.chars().enumerate() {
                output.set(index.to_string(), ch.to_string());
            }
        }
        _ => {}
    }
    Ok(output)
}

fn merge_records(
    walk: &mut Walk,
    target: &RecordRef,
    source: &RecordRef,
) -> Result<RecordRef, MergeError> {
    let output = copy_enumerable(walk, target)?;

    for key in source.own_enumerable_names() {
        let incoming = source.get(&key);
        let value = match &incoming {
            Value::Object(_) if target.has(&key) => {
                trace!("merge_deep: merging `{}` at {}", key, walk.path());
                let existing = target.get(&key);
                Value::Object(merge_values(walk, Some(key.to_string()), &existing, &incoming)?)
            }
            _ => detach(walk, key.to_string(), incoming.clone())?,
        };
        output.set(key, value);
    }

    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use deepmerge_record::{NativeFn, PropertyDescriptor, Symbol};
    use serde_json::json;

    fn merged(target: serde_json::Value, source: serde_json::Value) -> serde_json::Value {
        merge_deep(&Value::from(target), &Value::from(source))
            .unwrap()
            .to_json()
            .unwrap()
    }

    #[test]
    fn test_scalar_override() {
        assert_eq!(merged(json!({"timeout": 100}), json!({"timeout": 200})), json!({"timeout": 200}));
    }

    #[test]
    fn test_object_deep_merge() {
        let result = merged(
            json!({"a": 1, "b": {"x": 1}}),
            json!({"b": {"y": 2}, "c": 3}),
        );
        assert_eq!(result, json!({"a": 1, "b": {"x": 1, "y": 2}, "c": 3}));
    }

    #[test]
    fn test_array_replace() {
        let result = merged(json!({"tags": ["a", "b"]}), json!({"tags": ["c"]}));
        assert_eq!(result, json!({"tags": ["c"]}));
    }

    #[test]
    fn test_null_override() {
        assert_eq!(merged(json!({"value": {"x": 1}}), json!({"value": null})), json!({"value": null}));
    }

    #[test]
    fn test_record_over_scalar_recurses_into_empty_copy() {
        assert_eq!(merged(json!({"a": 5}), json!({"a": {"x": 1}})), json!({"a": {}}));
        assert_eq!(merged(json!({"a": null}), json!({"a": {"x": 1}})), json!({"a": {}}));
    }

    #[test]
    fn test_record_over_array_keeps_indexed_entries() {
        assert_eq!(
            merged(json!({"a": [1, {"b": 2}]}), json!({"a": {"x": 1}})),
            json!({"a": {"0": 1, "1": {"b": 2}}})
        );
    }

    #[test]
    fn test_record_under_new_key_is_copied() {
        assert_eq!(merged(json!({}), json!({"a": {"x": 1}})), json!({"a": {"x": 1}}));
    }

    #[test]
    fn test_non_record_inputs_pass_through() {
        let target = Value::from(json!({"a": 1}));
        let result = merge_deep(&target, &Value::from(3)).unwrap();
        assert_eq!(result.to_json().unwrap(), json!({"a": 1}));

        let result = merge_deep(&Value::from(3), &target).unwrap();
        assert!(result.is_empty());

        let result = merge_deep(&Value::from("ab"), &target).unwrap();
        assert_eq!(result.to_json().unwrap(), json!({"0": "a", "1": "b"}));

        let result = merge_deep(&Value::from(json!(["x", "y"])), &target).unwrap();
        assert_eq!(result.to_json().unwrap(), json!({"0": "x", "1": "y"}));
    }

    #[test]
    fn test_inputs_untouched_and_output_detached() {
        let target = Value::from(json!({"b": {"x": 1}, "keep": {"k": 1}}));
        let source = Value::from(json!({"b": {"y": 2}, "new": {"n": 1}}));

        let result = merge_deep(&target, &source).unwrap();
        assert_eq!(target.to_json().unwrap(), json!({"b": {"x": 1}, "keep": {"k": 1}}));
        assert_eq!(source.to_json().unwrap(), json!({"b": {"y": 2}, "new": {"n": 1}}));

        for key in ["b", "keep", "new"] {
            let child = result.get_named(key);
            child.as_record().unwrap().set("mutated", true);
        }
        assert_eq!(target.to_json().unwrap(), json!({"b": {"x": 1}, "keep": {"k": 1}}));
        assert_eq!(source.to_json().unwrap(), json!({"b": {"y": 2}, "new": {"n": 1}}));
    }

    #[test]
    fn test_target_symbols_copied_source_symbols_ignored() {
        let target_sym = Symbol::new("t");
        let source_sym = Symbol::new("s");
        let target = Record::new()
            .with(target_sym.clone(), PropertyDescriptor::data(1))
            .with("hidden", PropertyDescriptor::data(1).enumerable(false))
            .into_ref();
        let source = Record::new()
            .with(source_sym.clone(), PropertyDescriptor::data(2))
            .into_ref();

        let result = merge_deep(&target.into(), &source.into()).unwrap();
        assert_eq!(result.get(&target_sym.into()), Value::from(1));
        assert!(!result.has_own(&source_sym.into()));
        assert!(!result.has_own(&"hidden".into()));
    }

    #[test]
    fn test_getters_resolved_to_values() {
        let source = Record::new()
            .with(
                "computed",
                PropertyDescriptor::accessor(Some(NativeFn::constant("get", Value::from(9))), None),
            )
            .into_ref();
        let result = merge_deep(&Value::object(), &source.into()).unwrap();
        let desc = result.own_property(&"computed".into()).unwrap();
        assert_eq!(desc.value(), Some(&Value::from(9)));
    }

    #[test]
    fn test_inherited_target_key_is_merged() {
        let prototype = Record::new()
            .with("nested", PropertyDescriptor::data(Value::from(json!({"x": 1}))))
            .into_ref();
        let target = Record::with_prototype(prototype).into_ref();
        let source = Value::from(json!({"nested": {"y": 2}}));

        let result = merge_deep(&target.into(), &source).unwrap();
        assert_eq!(result.to_json().unwrap(), json!({"nested": {"x": 1, "y": 2}}));
    }

    #[test]
    fn test_cyclic_source_fails_fast() {
        let source = RecordRef::new(Record::new());
        source.set("loop", Value::Object(source.clone()));
        let err = merge_deep(&Value::object(), &source.into()).unwrap_err();
        assert!(matches!(err, MergeError::CycleDetected { .. }));
    }
}
