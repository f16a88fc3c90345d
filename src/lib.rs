//! Deep merging of records
//!
//! Two variants share one record model ([`deepmerge_record`]):
//!
//! - [`merge_deep`] / [`merge_all`]: build a NEW record from their inputs.
//!   Nested records merge recursively, later scalars win, and the variadic
//!   form concatenates arrays. Inputs are never mutated.
//! - [`deep_assign`]: merge sources INTO a target in place, optionally
//!   copying non-enumerable properties, symbol-keyed properties, full
//!   descriptors and the prototype's own properties.
//!
//! Cyclic inputs fail with [`MergeError::CycleDetected`].

pub mod assign;
pub mod describe;
mod error;
mod guard;
pub mod merge;

pub use assign::{deep_assign, AssignOptions, DeepAssign};
pub use describe::{describe, render, PropertyReport};
pub use error::MergeError;
pub use merge::{merge_all, merge_deep, merge_deep_all, MergeOptions};

pub use deepmerge_record::{
    NativeFn, PropertyDescriptor, PropertyKey, Record, RecordError, RecordRef, Slot, Symbol,
    Value,
};
