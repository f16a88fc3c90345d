//! Records: insertion-ordered property maps with an optional prototype link.
//!
//! `Record` is the plain storage; `RecordRef` is the shared handle with
//! identity that every operation goes through. Lookups and writes follow
//! ordinary property semantics:
//! - own properties shadow those reachable through the prototype link
//! - accessors resolve through their getter/setter
//! - no `RefCell` borrow is held while a getter or setter runs

use std::cell::{Ref, RefCell};
use std::fmt;
use std::rc::Rc;

use indexmap::IndexMap;

use crate::{PropertyDescriptor, PropertyKey, Slot, Value};

/// Own properties plus the prototype link.
#[derive(Debug, Default)]
pub struct Record {
    properties: IndexMap<PropertyKey, PropertyDescriptor>,
    prototype: Option<RecordRef>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_prototype(prototype: RecordRef) -> Self {
        Self {
            properties: IndexMap::new(),
            prototype: Some(prototype),
        }
    }

    /// Insert or replace a property without any attribute checks.
    ///
    /// Replacing keeps the key's original position.
    pub fn insert(
        &mut self,
        key: impl Into<PropertyKey>,
        descriptor: PropertyDescriptor,
    ) -> Option<PropertyDescriptor> {
        self.properties.insert(key.into(), descriptor)
    }

    /// Builder form of [`Record::insert`].
    pub fn with(mut self, key: impl Into<PropertyKey>, descriptor: PropertyDescriptor) -> Self {
        self.insert(key, descriptor);
        self
    }

    pub fn prototype(&self) -> Option<&RecordRef> {
        self.prototype.as_ref()
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    pub fn into_ref(self) -> RecordRef {
        RecordRef::new(self)
    }
}

/// Shared, mutable handle to a [`Record`]. Clones alias the same record.
#[derive(Clone, Default)]
pub struct RecordRef(Rc<RefCell<Record>>);

impl RecordRef {
    pub fn new(record: Record) -> Self {
        Self(Rc::new(RefCell::new(record)))
    }

    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    /// Read access to the underlying storage.
    ///
    /// Do not hold the guard across calls that may run accessors.
    pub fn borrow(&self) -> Ref<'_, Record> {
        self.0.borrow()
    }

    pub fn prototype(&self) -> Option<RecordRef> {
        self.0.borrow().prototype.clone()
    }

    /// Link (or unlink) the prototype. Refuses links that would make the
    /// chain circular.
    pub fn set_prototype(&self, prototype: Option<RecordRef>) -> bool {
        let mut current = prototype.clone();
        while let Some(record) = current {
            if record.ptr_eq(self) {
                return false;
            }
            current = record.prototype();
        }
        self.0.borrow_mut().prototype = prototype;
        true
    }

    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }

    /// Named keys in insertion order followed by symbol keys in insertion order.
    pub fn own_keys(&self) -> Vec<PropertyKey> {
        let mut keys = self.own_property_names();
        keys.extend(self.own_property_symbols());
        keys
    }

    /// Every own named key, enumerable or not.
    pub fn own_property_names(&self) -> Vec<PropertyKey> {
        self.collect_keys(|key, _| !key.is_symbol())
    }

    /// Every own symbol key, enumerable or not.
    pub fn own_property_symbols(&self) -> Vec<PropertyKey> {
        self.collect_keys(|key, _| key.is_symbol())
    }

    /// Own enumerable named keys, the default enumeration view.
    pub fn own_enumerable_names(&self) -> Vec<PropertyKey> {
        self.collect_keys(|key, desc| !key.is_symbol() && desc.enumerable)
    }

    /// Own enumerable keys, named first, then symbols.
    pub fn own_enumerable_keys(&self) -> Vec<PropertyKey> {
        self.own_keys()
            .into_iter()
            .filter(|key| {
                self.own_property(key)
                    .map_or(false, |desc| desc.enumerable)
            })
            .collect()
    }

    fn collect_keys(
        &self,
        filter: impl Fn(&PropertyKey, &PropertyDescriptor) -> bool,
    ) -> Vec<PropertyKey> {
        self.0
            .borrow()
            .properties
            .iter()
            .filter(|(key, desc)| filter(key, desc))
            .map(|(key, _)| key.clone())
            .collect()
    }

    pub fn own_property(&self, key: &PropertyKey) -> Option<PropertyDescriptor> {
        self.0.borrow().properties.get(key).cloned()
    }

    pub fn has_own(&self, key: &PropertyKey) -> bool {
        self.0.borrow().properties.contains_key(key)
    }

    /// Own or inherited.
    pub fn has(&self, key: &PropertyKey) -> bool {
        self.find(key).is_some()
    }

    /// Find the first record on the chain that owns `key`.
    fn find(&self, key: &PropertyKey) -> Option<(RecordRef, PropertyDescriptor)> {
        let mut current = Some(self.clone());
        while let Some(record) = current {
            let (found, next) = {
                let inner = record.0.borrow();
                (inner.properties.get(key).cloned(), inner.prototype.clone())
            };
            if let Some(desc) = found {
                return Some((record, desc));
            }
            current = next;
        }
        None
    }

    /// Resolve `key` through the prototype chain, running getters.
    pub fn get(&self, key: &PropertyKey) -> Value {
        match self.find(key) {
            Some((_, desc)) => match desc.slot {
                Slot::Data { value, .. } => value,
                Slot::Accessor { get: Some(getter), .. } => getter.call(&[]),
                Slot::Accessor { get: None, .. } => Value::Undefined,
            },
            None => Value::Undefined,
        }
    }

    pub fn get_named(&self, name: &str) -> Value {
        self.get(&PropertyKey::from(name))
    }

    /// Ordinary property write. Returns false when the write is rejected
    /// (non-writable data property or getter-only accessor on the chain).
    pub fn set(&self, key: impl Into<PropertyKey>, value: impl Into<Value>) -> bool {
        let key = key.into();
        let value = value.into();
        match self.find(&key) {
            Some((owner, desc)) => match desc.slot {
                Slot::Accessor { set: Some(setter), .. } => {
                    setter.call(&[value]);
                    true
                }
                Slot::Accessor { set: None, .. } => false,
                Slot::Data { writable: false, .. } => false,
                Slot::Data { .. } if owner.ptr_eq(self) => {
                    let mut inner = self.0.borrow_mut();
                    if let Some(own) = inner.properties.get_mut(&key) {
                        own.set_value(value);
                    }
                    true
                }
                Slot::Data { .. } => {
                    self.0
                        .borrow_mut()
                        .insert(key, PropertyDescriptor::data(value));
                    true
                }
            },
            None => {
                self.0
                    .borrow_mut()
                    .insert(key, PropertyDescriptor::data(value));
                true
            }
        }
    }

    /// Install `descriptor` as the own property at `key`. Refused when the
    /// existing own property is non-configurable.
    pub fn define(&self, key: impl Into<PropertyKey>, descriptor: PropertyDescriptor) -> bool {
        let key = key.into();
        let mut inner = self.0.borrow_mut();
        if matches!(inner.properties.get(&key), Some(existing) if !existing.configurable) {
            return false;
        }
        inner.properties.insert(key, descriptor);
        true
    }

    /// Equal own enumerable properties, compared recursively. Prototypes are
    /// not compared. Assumes acyclic records.
    pub fn structurally_eq(&self, other: &Self) -> bool {
        if self.ptr_eq(other) {
            return true;
        }
        let ours = self.enumerable_slots();
        let theirs = other.enumerable_slots();
        ours.len() == theirs.len()
            && ours.iter().all(|(key, slot)| {
                theirs
                    .iter()
                    .find(|(k, _)| k == key)
                    .map_or(false, |(_, s)| s == slot)
            })
    }

    fn enumerable_slots(&self) -> Vec<(PropertyKey, Slot)> {
        self.0
            .borrow()
            .properties
            .iter()
            .filter(|(_, desc)| desc.enumerable)
            .map(|(key, desc)| (key.clone(), desc.slot.clone()))
            .collect()
    }
}

impl From<Record> for RecordRef {
    fn from(record: Record) -> Self {
        RecordRef::new(record)
    }
}

impl fmt::Debug for RecordRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Shallow on purpose: records may be cyclic.
        match self.0.try_borrow() {
            Ok(inner) => {
                write!(f, "Record")?;
                f.debug_list().entries(inner.properties.keys()).finish()
            }
            Err(_) => write!(f, "Record(<borrowed>)"),
        }
    }
}
