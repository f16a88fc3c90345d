//! Variadic deep merge with array concatenation.

use deepmerge_record::{Record, RecordRef, Value};
use log::{debug, trace};

use super::detach::detach;
use crate::guard::{Side, Walk};
use crate::MergeError;

/// Options for [`merge_all`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeOptions {
    /// Drop later duplicates from concatenated arrays, keeping the first
    /// occurrence of each structurally equal element. Off by default.
    pub unique_arrays: bool,
}

impl MergeOptions {
    pub fn with_unique_arrays(mut self, unique: bool) -> Self {
        self.unique_arrays = unique;
        self
    }
}

/// Merge any number of records, left to right, into a new record.
///
/// Merge semantics, per own enumerable named key:
/// - Arrays on both sides: CONCATENATE (earlier elements first)
/// - Records on both sides: deep-merge (recursive)
/// - Anything else: override (later wins)
///
/// Inputs that are not records are skipped.
pub fn merge_all(objects: &[Value], options: MergeOptions) -> Result<RecordRef, MergeError> {
    let mut walk = Walk::new();
    objects
        .iter()
        .try_fold(RecordRef::new(Record::new()), |merged, object| match object {
            Value::Object(source) => walk.enter(None, &[(Side::Source, source)], |walk| {
                fold_record(walk, merged, source, options)
            }),
            other => {
                debug!("merge_all: skipping {} input", other.type_name());
                Ok(merged)
            }
        })
}

/// [`merge_all`] with default options.
pub fn merge_deep_all(objects: &[Value]) -> Result<RecordRef, MergeError> {
    merge_all(objects, MergeOptions::default())
}

/// One fold step: takes the accumulator, returns it with `source` applied.
fn fold_record(
    walk: &mut Walk,
    merged: RecordRef,
    source: &RecordRef,
    options: MergeOptions,
) -> Result<RecordRef, MergeError> {
    for key in source.own_enumerable_names() {
        let next = match (merged.get(&key), source.get(&key)) {
            (Value::Array(mut items), Value::Array(more)) => {
                let offset = items.len();
                for (i, item) in more.into_iter().enumerate() {
                    items.push(detach(walk, format!("{}[{}]", key, offset + i), item)?);
                }
                if options.unique_arrays {
                    items = first_occurrences(items);
                }
                Value::Array(items)
            }
            (Value::Object(existing), Value::Object(child)) => {
                trace!("merge_all: merging `{}` at {}", key, walk.path());
                let nested = walk.enter(Some(key.to_string()), &[(Side::Source, &child)], |walk| {
                    let base = fold_record(walk, RecordRef::new(Record::new()), &existing, options)?;
                    fold_record(walk, base, &child, options)
                })?;
                Value::Object(nested)
            }
            (_, incoming) => detach(walk, key.to_string(), incoming)?,
        };
        merged.set(key, next);
    }
    Ok(merged)
}

fn first_occurrences(items: Vec<Value>) -> Vec<Value> {
    let mut unique: Vec<Value> = Vec::with_capacity(items.len());
    for item in items {
        if !unique.contains(&item) {
            unique.push(item);
        }
    }
    unique
}
