//! Demonstration records for `deepmerge demo`.
//!
//! Builds a derived record whose prototype carries its own properties, with
//! every combination of named/symbol, enumerable/non-enumerable and
//! value/accessor, plus a `shadow` property defined at both levels.

use deepmerge::{
    deep_assign, render, AssignOptions, MergeError, NativeFn, PropertyDescriptor, Record,
    RecordRef, Symbol, Value,
};

/// A property as created from a bare descriptor: not writable, not configurable.
fn fixed_value(value: impl Into<Value>) -> PropertyDescriptor {
    PropertyDescriptor::data(value)
        .writable(false)
        .configurable(false)
}

fn hidden_accessor(prefix: &str) -> PropertyDescriptor {
    PropertyDescriptor::accessor(
        Some(NativeFn::constant(format!("{}_get", prefix), Value::from(1))),
        Some(NativeFn::new(format!("{}_set", prefix), |_| Value::Undefined)),
    )
    .enumerable(false)
    .configurable(false)
}

/// Add one level of own properties to `record`, keys prefixed with `prefix`.
fn level(record: Record, prefix: &str, shadow: &str) -> Record {
    record
        .with(format!("{}_n_e_v", prefix), fixed_value(1))
        .with(format!("{}_n_ne_a", prefix), hidden_accessor(&format!("{}_n", prefix)))
        .with("shadow", fixed_value(shadow))
        .with(Symbol::new(format!("{}_u_e_v", prefix)), fixed_value(1))
        .with(
            Symbol::new(format!("{}_u_ne_a", prefix)),
            hidden_accessor(&format!("{}_u", prefix)),
        )
}

/// The derived record, linked to its prototype.
pub fn sample() -> RecordRef {
    let prototype = level(Record::new(), "proto", "shadowed by own 'shadow' property").into_ref();
    level(
        Record::with_prototype(prototype),
        "prop",
        "shadowing prototype 'shadow' property",
    )
    .into_ref()
}

/// Assign the sample into a fresh target with every option on and render
/// the target's own descriptors followed by its prototype's.
pub fn run() -> Result<String, MergeError> {
    let target = Record::with_prototype(RecordRef::new(Record::new())).into_ref();
    deep_assign(AssignOptions::all()).assign_into(&target, &[Value::Object(sample())])?;

    let summary = target
        .to_json()
        .map(|json| json.to_string())
        .unwrap_or_else(|e| e.to_string());
    let mut out = format!("Displaying descriptors for: {}\n", summary);
    out.push_str(&render(&target));
    if let Some(prototype) = target.prototype() {
        out.push_str("Prototype:\n");
        out.push_str(&render(&prototype));
    }
    Ok(out)
}
