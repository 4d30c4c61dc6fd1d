// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::{
    ecmascript::{builtins::builtin_function::BuiltinFunction, types::Value},
    heap::{HeapMarkAndSweep, WorkQueues},
};

/// ### [6.2.6 The Property Descriptor Specification Type](https://tc39.es/ecma262/#sec-property-descriptor-specification-type)
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PropertyDescriptor {
    /// \[\[Value]]
    pub value: Option<Value>,

    /// \[\[Writable]]
    pub writable: Option<bool>,

    /// \[\[Get]]
    ///
    /// Note: double-Option because these fields can be set explicitly undefined
    /// to unset them.
    pub get: Option<Option<BuiltinFunction>>,

    /// \[\[Set]]
    ///
    /// Note: double-Option because these fields can be set explicitly undefined
    /// to unset them.
    pub set: Option<Option<BuiltinFunction>>,

    /// \[\[Enumerable]]
    pub enumerable: Option<bool>,

    /// \[\[Configurable]]
    pub configurable: Option<bool>,
}

impl PropertyDescriptor {
    /// Writable, enumerable and configurable data descriptor, the shape
    /// CreateDataProperty uses.
    pub fn new_data_descriptor(value: impl Into<Value>) -> Self {
        Self {
            value: Some(value.into()),
            writable: Some(true),
            get: None,
            set: None,
            enumerable: Some(true),
            configurable: Some(true),
        }
    }

    /// Writable, non-enumerable and configurable data descriptor.
    pub fn new_hidden_data_descriptor(value: impl Into<Value>) -> Self {
        Self {
            value: Some(value.into()),
            writable: Some(true),
            enumerable: Some(false),
            configurable: Some(true),
            ..Default::default()
        }
    }

    /// Enumerable and configurable accessor descriptor.
    pub fn new_accessor_descriptor(
        get: Option<BuiltinFunction>,
        set: Option<BuiltinFunction>,
    ) -> Self {
        Self {
            get: Some(get),
            set: Some(set),
            enumerable: Some(true),
            configurable: Some(true),
            ..Default::default()
        }
    }

    /// ### [6.2.6.1 IsAccessorDescriptor ( Desc )](https://tc39.es/ecma262/#sec-isaccessordescriptor)
    pub fn is_accessor_descriptor(&self) -> bool {
        // 1. If Desc is undefined, return false.
        match (self.get, self.set) {
            // 2. If Desc has a [[Get]] field, return true.
            (Some(_), _) => true,
            // 3. If Desc has a [[Set]] field, return true.
            (_, Some(_)) => true,
            // 4. Return false.
            _ => false,
        }
    }

    /// ### [6.2.6.2 IsDataDescriptor ( Desc )](https://tc39.es/ecma262/#sec-isdatadescriptor)
    pub fn is_data_descriptor(&self) -> bool {
        // 1. If Desc is undefined, return false.
        match (self.value, self.writable) {
            // 2. If Desc has a [[Value]] field, return true.
            (Some(_), _) => true,
            // 3. If Desc has a [[Writable]] field, return true.
            (_, Some(_)) => true,
            // 4. Return false.
            _ => false,
        }
    }

    /// ### [6.2.6.3 IsGenericDescriptor ( Desc )](https://tc39.es/ecma262/#sec-isgenericdescriptor)
    pub fn is_generic_descriptor(&self) -> bool {
        // 1. If Desc is undefined, return false.
        // 2. If IsAccessorDescriptor(Desc) is true, return false.
        // 3. If IsDataDescriptor(Desc) is true, return false.
        // 4. Return true.
        !self.is_accessor_descriptor() && !self.is_data_descriptor()
    }

    pub fn is_fully_populated(&self) -> bool {
        ((self.value.is_some() && self.writable.is_some())
            // A property descriptor can contain just get or set.
            || self.get.is_some()
            || self.set.is_some())
            && self.enumerable.is_some()
            && self.configurable.is_some()
    }

    pub fn has_fields(&self) -> bool {
        self.value.is_some()
            || self.writable.is_some()
            || self.get.is_some()
            || self.set.is_some()
            || self.enumerable.is_some()
            || self.configurable.is_some()
    }

    /// Returns a data descriptor holding `value` with the attributes of this
    /// descriptor. Missing attributes and accessor descriptors yield the
    /// attributes of a plain data property.
    pub(crate) fn with_data_value(&self, value: Value) -> Self {
        let (writable, enumerable, configurable) = if self.is_data_descriptor() {
            (
                self.writable.unwrap_or(true),
                self.enumerable.unwrap_or(true),
                self.configurable.unwrap_or(true),
            )
        } else {
            (true, true, true)
        };
        Self {
            value: Some(value),
            writable: Some(writable),
            enumerable: Some(enumerable),
            configurable: Some(configurable),
            ..Default::default()
        }
    }
}

impl HeapMarkAndSweep for PropertyDescriptor {
    fn mark_values(&self, queues: &mut WorkQueues) {
        let Self {
            value,
            writable: _,
            get,
            set,
            enumerable: _,
            configurable: _,
        } = self;
        value.mark_values(queues);
        if let Some(get) = get {
            get.mark_values(queues);
        }
        if let Some(set) = set {
            set.mark_values(queues);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn descriptor_classification() {
        let data = PropertyDescriptor::new_data_descriptor(1);
        assert!(data.is_data_descriptor());
        assert!(!data.is_accessor_descriptor());
        assert!(data.is_fully_populated());

        let accessor = PropertyDescriptor::new_accessor_descriptor(None, None);
        assert!(accessor.is_accessor_descriptor());
        assert!(!accessor.is_data_descriptor());
        assert!(accessor.is_fully_populated());

        let generic = PropertyDescriptor {
            enumerable: Some(false),
            ..Default::default()
        };
        assert!(generic.is_generic_descriptor());
        assert!(generic.has_fields());
        assert!(!PropertyDescriptor::default().has_fields());
    }

    #[test]
    fn with_data_value_keeps_attributes() {
        let frozen = PropertyDescriptor {
            value: Some(Value::Null),
            writable: Some(false),
            enumerable: Some(false),
            configurable: Some(false),
            ..Default::default()
        };
        let replaced = frozen.with_data_value(Value::Boolean(true));
        assert_eq!(replaced.value, Some(Value::Boolean(true)));
        assert_eq!(replaced.writable, Some(false));
        assert_eq!(replaced.enumerable, Some(false));
        assert_eq!(replaced.configurable, Some(false));
    }
}
