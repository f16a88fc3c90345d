//! Detached copies of input values.

use deepmerge_record::{Record, RecordRef, Slot, Value};

use crate::guard::{Side, Walk};
use crate::MergeError;

/// Copy `value` so the result shares no record or array with the input.
///
/// Records keep every own property with its attributes; data values are
/// copied recursively, accessor pairs and the prototype link are shared.
pub(crate) fn detach(walk: &mut Walk, segment: String, value: Value) -> Result<Value, MergeError> {
    match value {
        Value::Array(items) => walk.enter(Some(segment), &[], |walk| {
            items
                .into_iter()
                .enumerate()
                .map(|(i, item)| detach(walk, format!("[{}]", i), item))
                .collect::<Result<Vec<_>, _>>()
                .map(Value::Array)
        }),
        Value::Object(record) => walk
            .enter(Some(segment), &[(Side::Copy, &record)], |walk| copy_record(walk, &record))
            .map(Value::Object),
        other => Ok(other),
    }
}

fn copy_record(walk: &mut Walk, record: &RecordRef) -> Result<RecordRef, MergeError> {
    let mut copy = match record.prototype() {
        Some(prototype) => Record::with_prototype(prototype),
        None => Record::new(),
    };
    for key in record.own_keys() {
        let Some(mut descriptor) = record.own_property(&key) else {
            continue;
        };
        if let Slot::Data { value, .. } = &descriptor.slot {
            let value = detach(walk, key.to_string(), value.clone())?;
            descriptor.set_value(value);
        }
        copy.insert(key, descriptor);
    }
    Ok(copy.into_ref())
}
