//! Configurable deep assign
//!
//! Merges sources into a target record in place. Options decide whether
//! non-enumerable properties, symbol-keyed properties, full descriptors and
//! the prototype's own properties take part.

mod deep;
mod options;

pub use deep::{deep_assign, DeepAssign};
pub use options::{AssignOptions, OPTION_NAMES};
