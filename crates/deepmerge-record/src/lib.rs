//! Record model for deep merging.
//!
//! Records are insertion-ordered maps from [`PropertyKey`] (a name or a
//! [`Symbol`]) to a [`PropertyDescriptor`], with an optional prototype link
//! to another record. Descriptors carry an enumerable flag, a configurable
//! flag and either a stored value (with a writable flag) or an accessor pair.

mod error;
mod function;
mod json;
mod key;
mod property;
mod record;
mod value;

pub use error::RecordError;
pub use function::NativeFn;
pub use key::{PropertyKey, Symbol};
pub use property::{PropertyDescriptor, Slot};
pub use record::{Record, RecordRef};
pub use value::Value;
