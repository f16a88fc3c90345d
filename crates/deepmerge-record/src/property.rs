//! Property descriptors.

use crate::{NativeFn, Value};

/// What a property slot holds: a stored value or an accessor pair.
#[derive(Debug, Clone)]
pub enum Slot {
    Data { value: Value, writable: bool },
    Accessor {
        get: Option<NativeFn>,
        set: Option<NativeFn>,
    },
}

impl PartialEq for Slot {
    /// Data slots compare by value only; writability is an attribute, not content.
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Slot::Data { value: a, .. }, Slot::Data { value: b, .. }) => a == b,
            (
                Slot::Accessor { get: ga, set: sa },
                Slot::Accessor { get: gb, set: sb },
            ) => ga == gb && sa == sb,
            _ => false,
        }
    }
}

/// Full description of one own property.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyDescriptor {
    pub slot: Slot,
    pub enumerable: bool,
    pub configurable: bool,
}

impl PropertyDescriptor {
    /// Enumerable, writable, configurable data property.
    pub fn data(value: impl Into<Value>) -> Self {
        Self {
            slot: Slot::Data {
                value: value.into(),
                writable: true,
            },
            enumerable: true,
            configurable: true,
        }
    }

    /// Enumerable, configurable accessor property.
    pub fn accessor(get: Option<NativeFn>, set: Option<NativeFn>) -> Self {
        Self {
            slot: Slot::Accessor { get, set },
            enumerable: true,
            configurable: true,
        }
    }

    pub fn enumerable(mut self, enumerable: bool) -> Self {
        self.enumerable = enumerable;
        self
    }

    pub fn configurable(mut self, configurable: bool) -> Self {
        self.configurable = configurable;
        self
    }

    /// Has no effect on accessor properties.
    pub fn writable(mut self, writable: bool) -> Self {
        if let Slot::Data { writable: w, .. } = &mut self.slot {
            *w = writable;
        }
        self
    }

    pub fn is_accessor(&self) -> bool {
        matches!(self.slot, Slot::Accessor { .. })
    }

    /// The stored value, `None` for accessors.
    pub fn value(&self) -> Option<&Value> {
        match &self.slot {
            Slot::Data { value, .. } => Some(value),
            Slot::Accessor { .. } => None,
        }
    }

    /// `None` for accessors.
    pub fn is_writable(&self) -> Option<bool> {
        match &self.slot {
            Slot::Data { writable, .. } => Some(*writable),
            Slot::Accessor { .. } => None,
        }
    }

    /// Replace the stored value. Returns false for accessors, which keep their pair.
    pub fn set_value(&mut self, value: Value) -> bool {
        match &mut self.slot {
            Slot::Data { value: slot, .. } => {
                *slot = value;
                true
            }
            Slot::Accessor { .. } => false,
        }
    }
}
