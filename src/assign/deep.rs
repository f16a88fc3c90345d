//! In-place deep assign.

use deepmerge_record::{PropertyKey, RecordRef, Value};
use log::{debug, trace};

use super::AssignOptions;
use crate::guard::Walk;
use crate::MergeError;

/// Path segment used for the prototype hop.
const PROTOTYPE_SEGMENT: &str = "[[Prototype]]";

/// Bind `options` into a reusable assign operation.
pub fn deep_assign(options: AssignOptions) -> DeepAssign {
    DeepAssign::new(options)
}

/// A deep assign bound to a fixed set of options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeepAssign {
    options: AssignOptions,
}

impl DeepAssign {
    pub fn new(options: AssignOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> AssignOptions {
        self.options
    }

    /// Merge each source into `target` in place and return `target` itself.
    ///
    /// A source is skipped when it or the target is not a record. Nested
    /// records present on both sides are merged depth-first before the
    /// parent property is committed.
    ///
    /// Sources are applied one at a time and writes are not rolled back. On
    /// `CycleDetected` the target keeps everything written by the earlier
    /// sources and by the failing source up to the point of the cycle.
    pub fn assign(&self, target: &Value, sources: &[Value]) -> Result<Value, MergeError> {
        for source in sources {
            match (target, source) {
                (Value::Object(into), Value::Object(from)) => {
                    let mut walk = Walk::new();
                    walk.descend(None, into, from, |walk| {
                        assign_records(walk, into, from, self.options)
                    })?;
                }
                _ => debug!(
                    "deep_assign: skipping {} source for {} target",
                    source.type_name(),
                    target.type_name()
                ),
            }
        }
        Ok(target.clone())
    }

    /// [`DeepAssign::assign`] for a target already known to be a record.
    pub fn assign_into(
        &self,
        target: &RecordRef,
        sources: &[Value],
    ) -> Result<RecordRef, MergeError> {
        self.assign(&Value::Object(target.clone()), sources)?;
        Ok(target.clone())
    }
}

fn selected_keys(source: &RecordRef, options: AssignOptions) -> Vec<PropertyKey> {
    let mut keys = source.own_property_names();
    if options.symbols {
        keys.extend(source.own_property_symbols());
    }
    keys
}

fn assign_records(
    walk: &mut Walk,
    target: &RecordRef,
    source: &RecordRef,
    options: AssignOptions,
) -> Result<(), MergeError> {
    for key in selected_keys(source, options) {
        // A setter run earlier in this loop may have removed it.
        let Some(mut descriptor) = source.own_property(&key) else {
            continue;
        };
        if !(descriptor.enumerable || options.non_enum) {
            continue;
        }

        let incoming = source.get(&key);
        let value = match (&incoming, target.get(&key)) {
            (Value::Object(from), Value::Object(into)) => {
                trace!("deep_assign: descending into `{}` at {}", key, walk.path());
                walk.descend(Some(key.to_string()), &into, from, |walk| {
                    assign_records(walk, &into, from, options)
                })?;
                // Accessors keep their pair; the merge already happened in place.
                descriptor.set_value(Value::Object(into.clone()));
                Value::Object(into)
            }
            _ => incoming.clone(),
        };

        if options.descriptors {
            if !target.define(key.clone(), descriptor) {
                debug!("deep_assign: `{}` is not configurable on target, kept", key);
            }
        } else if !target.set(key.clone(), value) {
            debug!("deep_assign: write to `{}` rejected by target, kept", key);
        }
    }

    if options.proto {
        if let (Some(into), Some(from)) = (target.prototype(), source.prototype()) {
            walk.descend(Some(PROTOTYPE_SEGMENT.to_string()), &into, &from, |walk| {
                assign_records(walk, &into, &from, options.without_proto())
            })?;
        }
    }

    Ok(())
}
