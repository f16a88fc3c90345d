//! Human-readable dumps of own property descriptors.

use std::fmt;

use deepmerge_record::{NativeFn, PropertyDescriptor, PropertyKey, RecordRef, Slot, Value};

/// One own property and its full descriptor.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyReport {
    pub key: PropertyKey,
    pub descriptor: PropertyDescriptor,
}

/// Every own property of `record`, enumerable or not: named keys first,
/// then symbol keys.
pub fn describe(record: &RecordRef) -> Vec<PropertyReport> {
    record
        .own_keys()
        .into_iter()
        .filter_map(|key| {
            record
                .own_property(&key)
                .map(|descriptor| PropertyReport { key, descriptor })
        })
        .collect()
}

/// One line per own property.
pub fn render(record: &RecordRef) -> String {
    describe(record)
        .iter()
        .map(|report| format!("{}\n", report))
        .collect()
}

fn render_value(value: &Value) -> String {
    match value {
        Value::String(s) => format!("'{}'", s.replace('\'', "\\'")),
        Value::Array(items) if items.is_empty() => "[]".to_string(),
        Value::Array(items) => {
            let inner: Vec<String> = items.iter().map(render_value).collect();
            format!("[ {} ]", inner.join(", "))
        }
        Value::Object(_) => "[Object]".to_string(),
        other => other.to_string(),
    }
}

fn render_accessor(accessor: &Option<NativeFn>) -> String {
    match accessor {
        Some(func) => format!("{:?}", func),
        None => "undefined".to_string(),
    }
}

impl fmt::Display for PropertyReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let desc = &self.descriptor;
        match &desc.slot {
            Slot::Data { value, writable } => write!(
                f,
                "{}: {{ value: {}, writable: {}, enumerable: {}, configurable: {} }}",
                self.key,
                render_value(value),
                writable,
                desc.enumerable,
                desc.configurable
            ),
            Slot::Accessor { get, set } => write!(
                f,
                "{}: {{ get: {}, set: {}, enumerable: {}, configurable: {} }}",
                self.key,
                render_accessor(get),
                render_accessor(set),
                desc.enumerable,
                desc.configurable
            ),
        }
    }
}
