//! Bridge between records and `serde_json` documents.
//!
//! Conversion from JSON builds fresh records of plain, enumerable data
//! properties. Conversion to JSON follows the usual stringify rules:
//! - only own enumerable named properties are written, getters resolved
//! - `undefined`, functions and symbols are dropped inside records and
//!   written as `null` inside arrays
//! - non-finite numbers become `null`, integral numbers are written as integers

use serde_json::{Map, Number};

use crate::{PropertyDescriptor, Record, RecordError, RecordRef, Value};

/// Largest integer an `f64` represents exactly.
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => Value::Number(n.as_f64().unwrap_or(f64::NAN)),
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => {
                Value::Array(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(map) => {
                let mut record = Record::new();
                for (key, value) in map {
                    record.insert(key, PropertyDescriptor::data(Value::from(value)));
                }
                Value::Object(record.into_ref())
            }
        }
    }
}

impl Value {
    /// Serialize to a JSON document. Top-level values with no JSON form
    /// become `null`.
    pub fn to_json(&self) -> Result<serde_json::Value, RecordError> {
        let mut stack = Vec::new();
        Ok(to_json_inner(self, "<root>", &mut stack)?.unwrap_or(serde_json::Value::Null))
    }
}

impl RecordRef {
    pub fn to_json(&self) -> Result<serde_json::Value, RecordError> {
        Value::Object(self.clone()).to_json()
    }
}

fn number_to_json(n: f64) -> serde_json::Value {
    if n.is_finite() && n.fract() == 0.0 && n.abs() <= MAX_SAFE_INTEGER {
        serde_json::Value::Number(Number::from(n as i64))
    } else {
        Number::from_f64(n)
            .map(serde_json::Value::Number)
            .unwrap_or(serde_json::Value::Null)
    }
}

fn to_json_inner(
    value: &Value,
    key: &str,
    stack: &mut Vec<RecordRef>,
) -> Result<Option<serde_json::Value>, RecordError> {
    let json = match value {
        Value::Undefined | Value::Function(_) | Value::Symbol(_) => return Ok(None),
        Value::Null => serde_json::Value::Null,
        Value::Bool(b) => serde_json::Value::Bool(*b),
        Value::Number(n) => number_to_json(*n),
        Value::String(s) => serde_json::Value::String(s.clone()),
        Value::Array(items) => {
            let mut out = Vec::with_capacity(items.len());
            for (i, item) in items.iter().enumerate() {
                let json = to_json_inner(item, &format!("{}[{}]", key, i), stack)?;
                out.push(json.unwrap_or(serde_json::Value::Null));
            }
            serde_json::Value::Array(out)
        }
        Value::Object(record) => {
            if stack.iter().any(|seen| seen.ptr_eq(record)) {
                return Err(RecordError::Cycle {
                    key: key.to_string(),
                });
            }
            stack.push(record.clone());
            let mut map = Map::new();
            for name in record.own_enumerable_names() {
                let child = record.get(&name);
                let label = name.to_string();
                if let Some(json) = to_json_inner(&child, &label, stack)? {
                    map.insert(label, json);
                }
            }
            stack.pop();
            serde_json::Value::Object(map)
        }
    };
    Ok(Some(json))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{NativeFn, Symbol};
    use serde_json::json;

    #[test]
    fn test_round_trip_plain_document() {
        let doc = json!({"a": 1, "b": {"c": [1, 2.5, "x", null, true]}});
        let value = Value::from(doc.clone());
        assert!(value.is_deep_object());
        assert_eq!(value.to_json().unwrap(), doc);
    }

    #[test]
    fn test_skips_hidden_symbols_and_functions() {
        let record = Record::new()
            .with("shown", PropertyDescriptor::data(1))
            .with("hidden", PropertyDescriptor::data(2).enumerable(false))
            .with(Symbol::new("sym"), PropertyDescriptor::data(3))
            .with("func", PropertyDescriptor::data(NativeFn::constant("f", Value::Null)))
            .with("undef", PropertyDescriptor::data(Value::Undefined))
            .with(
                "computed",
                PropertyDescriptor::accessor(Some(NativeFn::constant("get", Value::from(4))), None),
            )
            .into_ref();
        assert_eq!(record.to_json().unwrap(), json!({"shown": 1, "computed": 4}));
    }

    #[test]
    fn test_arrays_write_null_for_missing_forms() {
        let value = Value::from(vec![Value::Undefined, Value::Number(f64::NAN), Value::from(1)]);
        assert_eq!(value.to_json().unwrap(), json!([null, null, 1]));
    }

    #[test]
    fn test_cycle_is_an_error() {
        let record = RecordRef::new(Record::new());
        record.set("me", Value::Object(record.clone()));
        let err = record.to_json().unwrap_err();
        assert_eq!(err, RecordError::Cycle { key: "me".to_string() });
    }

    #[test]
    fn test_shared_child_is_not_a_cycle() {
        let child = Value::from(json!({"x": 1}));
        let record = RecordRef::new(Record::new());
        record.set("left", child.clone());
        record.set("right", child);
        assert_eq!(
            record.to_json().unwrap(),
            json!({"left": {"x": 1}, "right": {"x": 1}})
        );
    }
}
