//! Shared records for the integration tests.
//!
//! `layered()` builds a derived record linked to a base record. Both levels
//! hold a named and a symbol property in each of the enumerable-value and
//! hidden-accessor flavours, and both define `shadow`.

#![allow(dead_code)]

use deepmerge::{NativeFn, PropertyDescriptor, Record, RecordRef, Symbol, Value};

/// Build a value from a JSON literal.
pub fn doc(json: serde_json::Value) -> Value {
    Value::from(json)
}

/// One level of the layered sample.
pub struct Level {
    pub record: RecordRef,
    pub visible_symbol: Symbol,
    pub hidden_symbol: Symbol,
}

pub struct Layered {
    pub derived: Level,
    pub base: Level,
}

fn hidden_accessor(name: &str, value: i32) -> PropertyDescriptor {
    PropertyDescriptor::accessor(
        Some(NativeFn::constant(format!("{}_get", name), Value::from(value))),
        Some(NativeFn::new(format!("{}_set", name), |_| Value::Undefined)),
    )
    .enumerable(false)
}

fn level(record: Record, prefix: &str, shadow: &str) -> Level {
    let visible_symbol = Symbol::new(format!("{}_sym", prefix));
    let hidden_symbol = Symbol::new(format!("{}_hidden_sym", prefix));
    let record = record
        .with(format!("{}_value", prefix), PropertyDescriptor::data(1))
        .with(format!("{}_accessor", prefix), hidden_accessor(prefix, 2))
        .with("shadow", PropertyDescriptor::data(shadow))
        .with(visible_symbol.clone(), PropertyDescriptor::data(3))
        .with(hidden_symbol.clone(), hidden_accessor(&format!("{}_sym", prefix), 4))
        .into_ref();
    Level {
        record,
        visible_symbol,
        hidden_symbol,
    }
}

pub fn layered() -> Layered {
    let base = level(Record::new(), "base", "shadowed");
    let derived = level(
        Record::with_prototype(base.record.clone()),
        "derived",
        "shadowing",
    );
    Layered { derived, base }
}

/// An empty target with its own empty prototype.
pub fn target_with_prototype() -> RecordRef {
    Record::with_prototype(RecordRef::new(Record::new())).into_ref()
}
