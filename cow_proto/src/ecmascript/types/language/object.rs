// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

mod data;
mod internal_methods;
mod internal_slots;
mod property_key;
mod property_storage;

use std::ops::{Index, IndexMut};

pub(crate) use data::ObjectHeapData;
pub use internal_methods::InternalMethods;
pub use internal_slots::InternalSlots;
pub use property_key::{DisplayablePropertyKey, PropertyKey};
pub(crate) use property_storage::{ObjectEntry, PropertyStorage};

use super::Value;
use crate::{
    ecmascript::{
        builtins::{builtin_function::BuiltinFunction, shadow::ShadowObject},
        execution::{Agent, JsResult, ProtoIntrinsics},
        types::PropertyDescriptor,
    },
    heap::{CreateHeapData, Heap, HeapMarkAndSweep, WorkQueues, indexes::ObjectIndex},
};

/// ### [10.1 Ordinary Object Internal Methods and Internal Slots](https://tc39.es/ecma262/#sec-ordinary-object-internal-methods-and-internal-slots)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct OrdinaryObject(pub(crate) ObjectIndex);

/// ### [6.1.7 The Object Type](https://tc39.es/ecma262/#sec-object-type)
///
/// Every variant picks its own internal methods: ordinary objects and
/// builtin functions use the ordinary behaviour, shadow objects intercept
/// reads and mutations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Object {
    Object(OrdinaryObject),
    BuiltinFunction(BuiltinFunction),
    ShadowObject(ShadowObject),
}

impl OrdinaryObject {
    pub(crate) const fn get_index(self) -> usize {
        self.0.into_index()
    }

    /// Creates an empty, extensible object inheriting from
    /// %Object.prototype%.
    pub fn create_empty_object(agent: &mut Agent) -> Self {
        let prototype = agent.current_realm().intrinsic(ProtoIntrinsics::Object);
        agent
            .heap
            .create(ObjectHeapData::new(Some(prototype), true))
    }

    /// Creates an empty, extensible object with the given prototype.
    pub fn create_object_with_prototype(agent: &mut Agent, prototype: Option<Object>) -> Self {
        agent.heap.create(ObjectHeapData::new(prototype, true))
    }

    /// Number of own properties.
    pub fn len(self, agent: &Agent) -> usize {
        agent[self].properties.len()
    }

    pub fn is_empty(self, agent: &Agent) -> bool {
        agent[self].properties.is_empty()
    }
}

impl Object {
    pub fn is_shadow_object(self) -> bool {
        matches!(self, Object::ShadowObject(_))
    }

    pub fn is_callable(self) -> bool {
        matches!(self, Object::BuiltinFunction(_))
    }
}

impl From<OrdinaryObject> for Object {
    fn from(value: OrdinaryObject) -> Self {
        Object::Object(value)
    }
}

impl From<OrdinaryObject> for Value {
    fn from(value: OrdinaryObject) -> Self {
        Value::Object(value)
    }
}

impl From<Object> for Value {
    fn from(value: Object) -> Self {
        match value {
            Object::Object(data) => Value::Object(data),
            Object::BuiltinFunction(data) => Value::BuiltinFunction(data),
            Object::ShadowObject(data) => Value::ShadowObject(data),
        }
    }
}

impl TryFrom<Value> for Object {
    type Error = ();

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(data) => Ok(Object::Object(data)),
            Value::BuiltinFunction(data) => Ok(Object::BuiltinFunction(data)),
            Value::ShadowObject(data) => Ok(Object::ShadowObject(data)),
            _ => Err(()),
        }
    }
}

impl TryFrom<Value> for OrdinaryObject {
    type Error = ();

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(data) => Ok(data),
            _ => Err(()),
        }
    }
}

impl InternalSlots for OrdinaryObject {
    const DEFAULT_PROTOTYPE: ProtoIntrinsics = ProtoIntrinsics::Object;

    #[inline(always)]
    fn get_backing_object(self, _: &Agent) -> Option<OrdinaryObject> {
        Some(self)
    }

    fn create_backing_object(self, _: &mut Agent) -> OrdinaryObject {
        unreachable!("Ordinary objects are their own backing object")
    }

    fn internal_extensible(self, agent: &Agent) -> bool {
        agent[self].extensible
    }

    fn internal_set_extensible(self, agent: &mut Agent, value: bool) {
        agent[self].extensible = value;
    }

    fn internal_prototype(self, agent: &Agent) -> Option<Object> {
        agent[self].prototype
    }

    fn internal_set_prototype(self, agent: &mut Agent, prototype: Option<Object>) {
        agent[self].prototype = prototype;
    }
}

impl InternalMethods for OrdinaryObject {}

impl InternalSlots for Object {
    const DEFAULT_PROTOTYPE: ProtoIntrinsics = ProtoIntrinsics::Object;

    fn get_backing_object(self, agent: &Agent) -> Option<OrdinaryObject> {
        match self {
            Object::Object(data) => data.get_backing_object(agent),
            Object::BuiltinFunction(data) => data.get_backing_object(agent),
            Object::ShadowObject(data) => data.get_backing_object(agent),
        }
    }

    fn create_backing_object(self, agent: &mut Agent) -> OrdinaryObject {
        match self {
            Object::Object(data) => data.create_backing_object(agent),
            Object::BuiltinFunction(data) => data.create_backing_object(agent),
            Object::ShadowObject(data) => data.create_backing_object(agent),
        }
    }

    fn internal_extensible(self, agent: &Agent) -> bool {
        match self {
            Object::Object(data) => data.internal_extensible(agent),
            Object::BuiltinFunction(data) => data.internal_extensible(agent),
            Object::ShadowObject(data) => data.internal_extensible(agent),
        }
    }

    fn internal_set_extensible(self, agent: &mut Agent, value: bool) {
        match self {
            Object::Object(data) => data.internal_set_extensible(agent, value),
            Object::BuiltinFunction(data) => data.internal_set_extensible(agent, value),
            Object::ShadowObject(data) => data.internal_set_extensible(agent, value),
        }
    }

    fn internal_prototype(self, agent: &Agent) -> Option<Object> {
        match self {
            Object::Object(data) => data.internal_prototype(agent),
            Object::BuiltinFunction(data) => data.internal_prototype(agent),
            Object::ShadowObject(data) => data.internal_prototype(agent),
        }
    }

    fn internal_set_prototype(self, agent: &mut Agent, prototype: Option<Object>) {
        match self {
            Object::Object(data) => data.internal_set_prototype(agent, prototype),
            Object::BuiltinFunction(data) => data.internal_set_prototype(agent, prototype),
            Object::ShadowObject(data) => data.internal_set_prototype(agent, prototype),
        }
    }
}

impl InternalMethods for Object {
    fn internal_get_prototype_of(self, agent: &mut Agent) -> JsResult<Option<Object>> {
        match self {
            Object::Object(data) => data.internal_get_prototype_of(agent),
            Object::BuiltinFunction(data) => data.internal_get_prototype_of(agent),
            Object::ShadowObject(data) => data.internal_get_prototype_of(agent),
        }
    }

    fn internal_set_prototype_of(
        self,
        agent: &mut Agent,
        prototype: Option<Object>,
    ) -> JsResult<bool> {
        match self {
            Object::Object(data) => data.internal_set_prototype_of(agent, prototype),
            Object::BuiltinFunction(data) => data.internal_set_prototype_of(agent, prototype),
            Object::ShadowObject(data) => data.internal_set_prototype_of(agent, prototype),
        }
    }

    fn internal_is_extensible(self, agent: &mut Agent) -> JsResult<bool> {
        match self {
            Object::Object(data) => data.internal_is_extensible(agent),
            Object::BuiltinFunction(data) => data.internal_is_extensible(agent),
            Object::ShadowObject(data) => data.internal_is_extensible(agent),
        }
    }

    fn internal_prevent_extensions(self, agent: &mut Agent) -> JsResult<bool> {
        match self {
            Object::Object(data) => data.internal_prevent_extensions(agent),
            Object::BuiltinFunction(data) => data.internal_prevent_extensions(agent),
            Object::ShadowObject(data) => data.internal_prevent_extensions(agent),
        }
    }

    fn internal_get_own_property(
        self,
        agent: &mut Agent,
        property_key: PropertyKey,
    ) -> JsResult<Option<PropertyDescriptor>> {
        match self {
            Object::Object(data) => data.internal_get_own_property(agent, property_key),
            Object::BuiltinFunction(data) => data.internal_get_own_property(agent, property_key),
            Object::ShadowObject(data) => data.internal_get_own_property(agent, property_key),
        }
    }

    fn internal_define_own_property(
        self,
        agent: &mut Agent,
        property_key: PropertyKey,
        property_descriptor: PropertyDescriptor,
    ) -> JsResult<bool> {
        match self {
            Object::Object(data) => {
                data.internal_define_own_property(agent, property_key, property_descriptor)
            }
            Object::BuiltinFunction(data) => {
                data.internal_define_own_property(agent, property_key, property_descriptor)
            }
            Object::ShadowObject(data) => {
                data.internal_define_own_property(agent, property_key, property_descriptor)
            }
        }
    }

    fn internal_has_property(self, agent: &mut Agent, property_key: PropertyKey) -> JsResult<bool> {
        match self {
            Object::Object(data) => data.internal_has_property(agent, property_key),
            Object::BuiltinFunction(data) => data.internal_has_property(agent, property_key),
            Object::ShadowObject(data) => data.internal_has_property(agent, property_key),
        }
    }

    fn internal_get(
        self,
        agent: &mut Agent,
        property_key: PropertyKey,
        receiver: Value,
    ) -> JsResult<Value> {
        match self {
            Object::Object(data) => data.internal_get(agent, property_key, receiver),
            Object::BuiltinFunction(data) => data.internal_get(agent, property_key, receiver),
            Object::ShadowObject(data) => data.internal_get(agent, property_key, receiver),
        }
    }

    fn internal_set(
        self,
        agent: &mut Agent,
        property_key: PropertyKey,
        value: Value,
        receiver: Value,
    ) -> JsResult<bool> {
        match self {
            Object::Object(data) => data.internal_set(agent, property_key, value, receiver),
            Object::BuiltinFunction(data) => {
                data.internal_set(agent, property_key, value, receiver)
            }
            Object::ShadowObject(data) => data.internal_set(agent, property_key, value, receiver),
        }
    }

    fn internal_delete(self, agent: &mut Agent, property_key: PropertyKey) -> JsResult<bool> {
        match self {
            Object::Object(data) => data.internal_delete(agent, property_key),
            Object::BuiltinFunction(data) => data.internal_delete(agent, property_key),
            Object::ShadowObject(data) => data.internal_delete(agent, property_key),
        }
    }

    fn internal_own_property_keys(self, agent: &mut Agent) -> JsResult<Vec<PropertyKey>> {
        match self {
            Object::Object(data) => data.internal_own_property_keys(agent),
            Object::BuiltinFunction(data) => data.internal_own_property_keys(agent),
            Object::ShadowObject(data) => data.internal_own_property_keys(agent),
        }
    }
}

impl Index<OrdinaryObject> for Agent {
    type Output = ObjectHeapData;

    fn index(&self, index: OrdinaryObject) -> &Self::Output {
        &self.heap.objects[index]
    }
}

impl IndexMut<OrdinaryObject> for Agent {
    fn index_mut(&mut self, index: OrdinaryObject) -> &mut Self::Output {
        &mut self.heap.objects[index]
    }
}

impl Index<OrdinaryObject> for Vec<Option<ObjectHeapData>> {
    type Output = ObjectHeapData;

    fn index(&self, index: OrdinaryObject) -> &Self::Output {
        self.get(index.get_index())
            .expect("Object out of bounds")
            .as_ref()
            .expect("Object slot empty")
    }
}

impl IndexMut<OrdinaryObject> for Vec<Option<ObjectHeapData>> {
    fn index_mut(&mut self, index: OrdinaryObject) -> &mut Self::Output {
        self.get_mut(index.get_index())
            .expect("Object out of bounds")
            .as_mut()
            .expect("Object slot empty")
    }
}

impl CreateHeapData<ObjectHeapData, OrdinaryObject> for Heap {
    fn create(&mut self, data: ObjectHeapData) -> OrdinaryObject {
        self.objects.push(Some(data));
        OrdinaryObject(ObjectIndex::last(&self.objects))
    }
}

impl HeapMarkAndSweep for OrdinaryObject {
    fn mark_values(&self, queues: &mut WorkQueues) {
        queues.objects.push(*self);
    }
}

impl HeapMarkAndSweep for Object {
    fn mark_values(&self, queues: &mut WorkQueues) {
        match self {
            Object::Object(data) => data.mark_values(queues),
            Object::BuiltinFunction(data) => data.mark_values(queues),
            Object::ShadowObject(data) => data.mark_values(queues),
        }
    }
}
