// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use super::PropertyKey;
use crate::{
    ecmascript::{
        builtins::builtin_function::BuiltinFunction,
        types::{PropertyDescriptor, Value},
    },
    heap::{AHashMap, HeapMarkAndSweep, WorkQueues},
};

/// A fully populated property as stored on an object.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum ObjectEntry {
    Data {
        value: Value,
        writable: bool,
        enumerable: bool,
        configurable: bool,
    },
    Accessor {
        get: Option<BuiltinFunction>,
        set: Option<BuiltinFunction>,
        enumerable: bool,
        configurable: bool,
    },
}

impl From<PropertyDescriptor> for ObjectEntry {
    /// Missing fields take their default attribute values.
    fn from(value: PropertyDescriptor) -> Self {
        let enumerable = value.enumerable.unwrap_or(false);
        let configurable = value.configurable.unwrap_or(false);
        if value.is_accessor_descriptor() {
            ObjectEntry::Accessor {
                get: value.get.flatten(),
                set: value.set.flatten(),
                enumerable,
                configurable,
            }
        } else {
            ObjectEntry::Data {
                value: value.value.unwrap_or(Value::Undefined),
                writable: value.writable.unwrap_or(false),
                enumerable,
                configurable,
            }
        }
    }
}

impl From<ObjectEntry> for PropertyDescriptor {
    fn from(value: ObjectEntry) -> Self {
        match value {
            ObjectEntry::Data {
                value,
                writable,
                enumerable,
                configurable,
            } => PropertyDescriptor {
                value: Some(value),
                writable: Some(writable),
                enumerable: Some(enumerable),
                configurable: Some(configurable),
                ..Default::default()
            },
            ObjectEntry::Accessor {
                get,
                set,
                enumerable,
                configurable,
            } => PropertyDescriptor {
                get: Some(get),
                set: Some(set),
                enumerable: Some(enumerable),
                configurable: Some(configurable),
                ..Default::default()
            },
        }
    }
}

impl HeapMarkAndSweep for ObjectEntry {
    fn mark_values(&self, queues: &mut WorkQueues) {
        match self {
            ObjectEntry::Data { value, .. } => value.mark_values(queues),
            ObjectEntry::Accessor { get, set, .. } => {
                get.mark_values(queues);
                set.mark_values(queues);
            }
        }
    }
}

/// Own property table of an ordinary object. Keys are kept in property
/// creation order.
#[derive(Debug, Clone, Default)]
pub(crate) struct PropertyStorage {
    keys: Vec<PropertyKey>,
    entries: AHashMap<PropertyKey, ObjectEntry>,
}

impl PropertyStorage {
    pub(crate) fn len(&self) -> usize {
        self.keys.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub(crate) fn keys(&self) -> &[PropertyKey] {
        &self.keys
    }

    pub(crate) fn get(&self, key: PropertyKey) -> Option<&ObjectEntry> {
        self.entries.get(&key)
    }

    /// Inserts or replaces the property. A replaced property keeps its
    /// position in the creation order.
    pub(crate) fn set(&mut self, key: PropertyKey, entry: ObjectEntry) {
        if self.entries.insert(key, entry).is_none() {
            self.keys.push(key);
        }
    }

    pub(crate) fn remove(&mut self, key: PropertyKey) -> Option<ObjectEntry> {
        let entry = self.entries.remove(&key)?;
        if let Some(position) = self.keys.iter().position(|k| *k == key) {
            self.keys.remove(position);
        }
        Some(entry)
    }
}

impl HeapMarkAndSweep for PropertyStorage {
    fn mark_values(&self, queues: &mut WorkQueues) {
        self.entries
            .values()
            .for_each(|entry| entry.mark_values(queues));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn data(value: i32) -> ObjectEntry {
        ObjectEntry::Data {
            value: value.into(),
            writable: true,
            enumerable: true,
            configurable: true,
        }
    }

    #[test]
    fn keeps_creation_order() {
        let mut storage = PropertyStorage::default();
        storage.set(PropertyKey::Integer(2), data(1));
        storage.set(PropertyKey::Integer(0), data(2));
        storage.set(PropertyKey::Integer(2), data(3));
        assert_eq!(
            storage.keys(),
            &[PropertyKey::Integer(2), PropertyKey::Integer(0)]
        );
        assert_eq!(storage.get(PropertyKey::Integer(2)), Some(&data(3)));

        assert_eq!(storage.remove(PropertyKey::Integer(2)), Some(data(3)));
        assert_eq!(storage.keys(), &[PropertyKey::Integer(0)]);
        assert_eq!(storage.len(), 1);
        assert!(storage.remove(PropertyKey::Integer(2)).is_none());
    }

    #[test]
    fn descriptor_defaults_when_converting() {
        let entry = ObjectEntry::from(PropertyDescriptor {
            value: Some(Value::Null),
            ..Default::default()
        });
        assert_eq!(
            entry,
            ObjectEntry::Data {
                value: Value::Null,
                writable: false,
                enumerable: false,
                configurable: false,
            }
        );
        let descriptor = PropertyDescriptor::from(entry);
        assert!(descriptor.is_fully_populated());
    }
}
