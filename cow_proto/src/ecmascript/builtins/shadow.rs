// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! ## Copy-on-write prototypes
//!
//! [`make_safe`] places a delegation wrapper between an instance and its
//! prototype. Reading an object-valued data property of a participating
//! prototype through the wrapper does not hand out the shared object:
//! it returns a [`ShadowObject`] over a lazily created shallow copy. The
//! copy is private to the instance, and reads through it shadow nested
//! objects in turn. Only when one of those copies is successfully mutated
//! is the chain of nodes committed onto the instance as an own property.
//! Until then the prototype graph stays untouched and shared.
//!
//! A committed node stays installed as a shadow object. Objects its copy
//! still shares with the original are shadowed on read like any other, and
//! their commits land in the committed copy.
//!
//! A shadow object is in one of three states:
//!
//! - `Delegation`: wraps the prototype of a guarded instance.
//! - `Pending`: a shadow node with its copy and bookkeeping.
//! - `Committed`: the node has been installed on its holder and forwards to
//!   its copy.

pub(crate) mod commit;
pub mod data;
pub mod marking;
pub(crate) mod registry;
pub mod resolver;

use std::ops::{Index, IndexMut};

use tracing::trace;

use self::{
    commit::commit,
    data::{ShadowObjectHeapData, create_shadow_node},
    marking::{is_participating, is_terminator},
    resolver::resolve_property_descriptor,
};
use crate::{
    ecmascript::{
        execution::{Agent, JsResult, ProtoIntrinsics},
        types::{
            InternalMethods, InternalSlots, Object, OrdinaryObject, PropertyDescriptor,
            PropertyKey, Value,
        },
    },
    heap::{CreateHeapData, Heap, HeapMarkAndSweep, WorkQueues, indexes::ShadowObjectIndex},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct ShadowObject(pub(crate) ShadowObjectIndex);

impl ShadowObject {
    pub(crate) const fn get_index(self) -> usize {
        self.0.into_index()
    }

    pub fn is_delegation(self, agent: &Agent) -> bool {
        matches!(agent[self], ShadowObjectHeapData::Delegation { .. })
    }

    pub fn is_pending(self, agent: &Agent) -> bool {
        matches!(agent[self], ShadowObjectHeapData::Pending(_))
    }

    pub fn is_committed(self, agent: &Agent) -> bool {
        matches!(agent[self], ShadowObjectHeapData::Committed { .. })
    }

    /// The object every operation on this shadow object is forwarded to:
    /// the wrapped prototype of a delegation wrapper, or a node's copy.
    pub fn forward_target(self, agent: &Agent) -> Object {
        match &agent[self] {
            ShadowObjectHeapData::Delegation { target, .. } => *target,
            ShadowObjectHeapData::Pending(record) => record.copy.into(),
            ShadowObjectHeapData::Committed { copy, .. } => (*copy).into(),
        }
    }

    /// The copy behind a pending node, if this is one.
    fn pending_copy(self, agent: &Agent) -> Option<OrdinaryObject> {
        match &agent[self] {
            ShadowObjectHeapData::Pending(record) => Some(record.copy),
            _ => None,
        }
    }

    /// The copy behind a pending or committed node.
    fn copy(self, agent: &Agent) -> Option<OrdinaryObject> {
        match &agent[self] {
            ShadowObjectHeapData::Delegation { .. } => None,
            ShadowObjectHeapData::Pending(record) => Some(record.copy),
            ShadowObjectHeapData::Committed { copy, .. } => Some(*copy),
        }
    }

    /// Reads through a node see the node's copy as the receiver.
    fn map_receiver(self, agent: &Agent, receiver: Value) -> Value {
        match &agent[self] {
            ShadowObjectHeapData::Pending(record) if receiver == Value::from(self) => {
                record.copy.into()
            }
            ShadowObjectHeapData::Committed { copy, .. } if receiver == Value::from(self) => {
                (*copy).into()
            }
            _ => receiver,
        }
    }

    /// Performs a mutation on the forward target. A successful mutation of a
    /// pending node commits it.
    fn mutate(
        self,
        agent: &mut Agent,
        mutation: impl FnOnce(&mut Agent, Object) -> JsResult<bool>,
    ) -> JsResult<bool> {
        let pending = self.is_pending(agent);
        let target = self.forward_target(agent);
        let result = mutation(agent, target)?;
        if result && pending {
            commit(agent, self)?;
        }
        Ok(result)
    }
}

impl From<ShadowObject> for Value {
    fn from(value: ShadowObject) -> Self {
        Value::ShadowObject(value)
    }
}

impl From<ShadowObject> for Object {
    fn from(value: ShadowObject) -> Self {
        Object::ShadowObject(value)
    }
}

impl TryFrom<Value> for ShadowObject {
    type Error = ();

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::ShadowObject(data) => Ok(data),
            _ => Err(()),
        }
    }
}

impl InternalSlots for ShadowObject {
    const DEFAULT_PROTOTYPE: ProtoIntrinsics = ProtoIntrinsics::Object;

    fn get_backing_object(self, agent: &Agent) -> Option<OrdinaryObject> {
        self.forward_target(agent).get_backing_object(agent)
    }

    fn create_backing_object(self, agent: &mut Agent) -> OrdinaryObject {
        self.forward_target(agent).get_or_create_backing_object(agent)
    }

    fn internal_extensible(self, agent: &Agent) -> bool {
        self.forward_target(agent).internal_extensible(agent)
    }

    fn internal_set_extensible(self, agent: &mut Agent, value: bool) {
        self.forward_target(agent)
            .internal_set_extensible(agent, value)
    }

    fn internal_prototype(self, agent: &Agent) -> Option<Object> {
        self.forward_target(agent).internal_prototype(agent)
    }

    fn internal_set_prototype(self, agent: &mut Agent, prototype: Option<Object>) {
        self.forward_target(agent)
            .internal_set_prototype(agent, prototype)
    }
}

impl InternalMethods for ShadowObject {
    fn internal_get_prototype_of(self, agent: &mut Agent) -> JsResult<Option<Object>> {
        self.forward_target(agent).internal_get_prototype_of(agent)
    }

    /// Relink. On a pending node the copy is relinked and the node committed.
    fn internal_set_prototype_of(
        self,
        agent: &mut Agent,
        prototype: Option<Object>,
    ) -> JsResult<bool> {
        self.mutate(agent, |agent, target| {
            target.internal_set_prototype_of(agent, prototype)
        })
    }

    fn internal_is_extensible(self, agent: &mut Agent) -> JsResult<bool> {
        self.forward_target(agent).internal_is_extensible(agent)
    }

    fn internal_prevent_extensions(self, agent: &mut Agent) -> JsResult<bool> {
        self.mutate(agent, |agent, target| target.internal_prevent_extensions(agent))
    }

    fn internal_get_own_property(
        self,
        agent: &mut Agent,
        property_key: PropertyKey,
    ) -> JsResult<Option<PropertyDescriptor>> {
        self.forward_target(agent)
            .internal_get_own_property(agent, property_key)
    }

    fn internal_define_own_property(
        self,
        agent: &mut Agent,
        property_key: PropertyKey,
        property_descriptor: PropertyDescriptor,
    ) -> JsResult<bool> {
        self.mutate(agent, |agent, target| {
            target.internal_define_own_property(agent, property_key, property_descriptor)
        })
    }

    fn internal_has_property(self, agent: &mut Agent, property_key: PropertyKey) -> JsResult<bool> {
        self.forward_target(agent)
            .internal_has_property(agent, property_key)
    }

    /// Reads an object-valued data property of a participating target as a
    /// shadow node instead of the shared object.
    fn internal_get(
        self,
        agent: &mut Agent,
        property_key: PropertyKey,
        receiver: Value,
    ) -> JsResult<Value> {
        let target = self.forward_target(agent);
        let copy = self.copy(agent);

        // 1. Perform the ordinary read on the target.
        let target_receiver = self.map_receiver(agent, receiver);
        let value = target.internal_get(agent, property_key, target_receiver)?;

        // 2. Accessor results and unresolvable properties pass through.
        let Some(descriptor) = resolve_property_descriptor(agent, target, property_key)? else {
            return Ok(value);
        };
        if descriptor.is_accessor_descriptor() {
            return Ok(value);
        }

        // 3. Only plain objects are shadowed.
        let Value::Object(original) = value else {
            return Ok(value);
        };

        // 4. Non-participating targets share their values, and an object is
        //    never shadowed through its own wrapper.
        if !is_participating(agent, target)
            || value == receiver
            || value == Value::from(self)
            || copy.is_some_and(|copy| value == Value::from(copy))
        {
            return Ok(value);
        }

        // 5. Terminators break the chain and are returned unwrapped.
        if is_terminator(agent, original.into()) {
            return Ok(value);
        }

        // 6. A committed copy owns whatever was stored into it after the
        //    commit. Only objects it still shares with the original are
        //    shadowed.
        let committed = match agent[self] {
            ShadowObjectHeapData::Committed {
                original: template,
                copy,
                ..
            } => Some((copy, template)),
            _ => None,
        };
        if let Some((copy, template)) = committed {
            if !is_shared_with(agent, copy, template, property_key, original)? {
                return Ok(value);
            }
        }

        // 7. Reuse the live node for this original, or create one.
        let (root, owner, path): (ShadowObject, Object, Box<[ShadowObject]>) =
            match &agent[self] {
                ShadowObjectHeapData::Delegation { owner, .. } => (self, *owner, Box::default()),
                ShadowObjectHeapData::Pending(record) => (
                    record.root,
                    record.owner,
                    record
                        .path
                        .iter()
                        .copied()
                        .chain(std::iter::once(self))
                        .collect(),
                ),
                ShadowObjectHeapData::Committed { owner, root, .. } => {
                    (*root, *owner, vec![self].into_boxed_slice())
                }
            };
        if let Some(node) = agent.heap.shadow_registry.get(root, original) {
            trace!(?node, ?original, "shadow registry hit");
            return Ok(node.into());
        }
        let node = create_shadow_node(
            agent,
            root,
            owner,
            path,
            original,
            property_key,
            descriptor,
        );
        Ok(node.into())
    }

    /// Writes through a delegation wrapper keep the original receiver, so
    /// they land on the instance. Writes to a pending node land on its copy
    /// and commit it.
    fn internal_set(
        self,
        agent: &mut Agent,
        property_key: PropertyKey,
        value: Value,
        receiver: Value,
    ) -> JsResult<bool> {
        let target = self.forward_target(agent);
        let copy = self.pending_copy(agent);
        let target_receiver = self.map_receiver(agent, receiver);
        let result = target.internal_set(agent, property_key, value, target_receiver)?;
        // Only a write that went to this node's copy commits it.
        if result && copy.is_some_and(|copy| target_receiver == Value::from(copy)) {
            commit(agent, self)?;
        }
        Ok(result)
    }

    fn internal_delete(self, agent: &mut Agent, property_key: PropertyKey) -> JsResult<bool> {
        self.mutate(agent, |agent, target| target.internal_delete(agent, property_key))
    }

    fn internal_own_property_keys(self, agent: &mut Agent) -> JsResult<Vec<PropertyKey>> {
        self.forward_target(agent).internal_own_property_keys(agent)
    }
}

/// Whether the object `value` found under `property_key` of a committed
/// `copy` is still the one `template` holds. A value found further up the
/// copy's prototype chain is shared as well.
fn is_shared_with(
    agent: &mut Agent,
    copy: OrdinaryObject,
    template: OrdinaryObject,
    property_key: PropertyKey,
    value: OrdinaryObject,
) -> JsResult<bool> {
    if copy
        .internal_get_own_property(agent, property_key)?
        .is_none()
    {
        return Ok(true);
    }
    let shared = template
        .internal_get_own_property(agent, property_key)?
        .and_then(|descriptor| descriptor.value);
    Ok(shared == Some(Value::Object(value)))
}

/// Guards `instance` by wrapping its delegation target.
///
/// The wrapper for a given (instance, prototype) pair is created once and
/// reused, so calling this again is a no-op. A prototype that is another
/// instance's wrapper is unwrapped first. Once guarded, relinking the
/// instance with \[\[SetPrototypeOf]] wraps the new prototype as well.
/// Instances without a prototype are returned unchanged.
pub fn make_safe(agent: &mut Agent, instance: Object) -> JsResult<Object> {
    let Some(prototype) = instance.internal_prototype(agent) else {
        return Ok(instance);
    };
    let delegation = match prototype {
        Object::ShadowObject(shadow) => match agent[shadow] {
            ShadowObjectHeapData::Delegation { target, owner } => Some((target, owner)),
            _ => None,
        },
        _ => None,
    };
    let target = match delegation {
        Some((_, owner)) if owner == instance => {
            // Already wrapped for this instance.
            set_guarded(agent, instance);
            return Ok(instance);
        }
        // Another instance's wrapper: delegate to what it wraps.
        Some((target, _)) => target,
        None => prototype,
    };
    let wrapper = match agent
        .heap
        .shadow_registry
        .get_delegation(instance, target)
    {
        Some(wrapper) => wrapper,
        None => {
            let wrapper: ShadowObject = agent.heap.create(ShadowObjectHeapData::Delegation {
                target,
                owner: instance,
            });
            agent
                .heap
                .shadow_registry
                .register_delegation(instance, target, wrapper);
            wrapper
        }
    };
    // Writing the slot directly: relinking would wrap again.
    instance.internal_set_prototype(agent, Some(wrapper.into()));
    set_guarded(agent, instance);
    trace!(?instance, ?target, ?wrapper, "guarded instance");
    Ok(instance)
}

fn set_guarded(agent: &mut Agent, instance: Object) {
    let backing_object = instance.get_or_create_backing_object(agent);
    agent[backing_object].guarded = true;
}

impl Index<ShadowObject> for Agent {
    type Output = ShadowObjectHeapData;

    fn index(&self, index: ShadowObject) -> &Self::Output {
        &self.heap.shadow_objects[index]
    }
}

impl IndexMut<ShadowObject> for Agent {
    fn index_mut(&mut self, index: ShadowObject) -> &mut Self::Output {
        &mut self.heap.shadow_objects[index]
    }
}

impl Index<ShadowObject> for Vec<Option<ShadowObjectHeapData>> {
    type Output = ShadowObjectHeapData;

    fn index(&self, index: ShadowObject) -> &Self::Output {
        self.get(index.get_index())
            .expect("ShadowObject out of bounds")
            .as_ref()
            .expect("ShadowObject slot empty")
    }
}

impl IndexMut<ShadowObject> for Vec<Option<ShadowObjectHeapData>> {
    fn index_mut(&mut self, index: ShadowObject) -> &mut Self::Output {
        self.get_mut(index.get_index())
            .expect("ShadowObject out of bounds")
            .as_mut()
            .expect("ShadowObject slot empty")
    }
}

impl CreateHeapData<ShadowObjectHeapData, ShadowObject> for Heap {
    fn create(&mut self, data: ShadowObjectHeapData) -> ShadowObject {
        self.shadow_objects.push(Some(data));
        ShadowObject(ShadowObjectIndex::last(&self.shadow_objects))
    }
}

impl HeapMarkAndSweep for ShadowObject {
    fn mark_values(&self, queues: &mut WorkQueues) {
        queues.shadow_objects.push(*self);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecmascript::{
        abstract_operations::operations_on_objects::{
            create_data_property_or_throw, get, has_own_property, set,
        },
        builtins::shadow::marking::{mark_participating, mark_terminator},
        execution::Options,
        types::PropertyKey,
    };

    struct Fixture {
        agent: Agent,
        prototype: OrdinaryObject,
        nested: OrdinaryObject,
        instance: Object,
        key: PropertyKey,
        leaf: PropertyKey,
    }

    /// `instance -> prototype { nested: { leaf: 1 } }`, guarded.
    fn fixture() -> Fixture {
        let mut agent = Agent::new(Options::default());
        let key = PropertyKey::from_str(&mut agent, "nested");
        let leaf = PropertyKey::from_str(&mut agent, "leaf");
        let prototype = OrdinaryObject::create_empty_object(&mut agent);
        let nested = OrdinaryObject::create_empty_object(&mut agent);
        create_data_property_or_throw(&mut agent, nested.into(), leaf, 1.into()).unwrap();
        create_data_property_or_throw(&mut agent, prototype.into(), key, nested.into()).unwrap();
        mark_participating(&mut agent, prototype.into());
        let instance =
            OrdinaryObject::create_object_with_prototype(&mut agent, Some(prototype.into()));
        let instance = make_safe(&mut agent, instance.into()).unwrap();
        Fixture {
            agent,
            prototype,
            nested,
            instance,
            key,
            leaf,
        }
    }

    #[test]
    fn make_safe_installs_one_wrapper() {
        let Fixture {
            mut agent,
            prototype,
            instance,
            ..
        } = fixture();
        let Some(Object::ShadowObject(wrapper)) = instance.internal_prototype(&agent) else {
            panic!("instance was not wrapped");
        };
        assert!(wrapper.is_delegation(&agent));
        assert_eq!(wrapper.forward_target(&agent), prototype.into());
        make_safe(&mut agent, instance).unwrap();
        assert_eq!(
            instance.internal_prototype(&agent),
            Some(Object::ShadowObject(wrapper))
        );
    }

    #[test]
    fn reads_are_shadowed_and_stable() {
        let Fixture {
            mut agent,
            nested,
            instance,
            key,
            ..
        } = fixture();
        let first = get(&mut agent, instance, key).unwrap();
        let Value::ShadowObject(node) = first else {
            panic!("expected a shadow node, got {first:?}");
        };
        assert!(node.is_pending(&agent));
        assert_ne!(node.forward_target(&agent), nested.into());
        assert_eq!(get(&mut agent, instance, key).unwrap(), first);
        assert_eq!(agent.pending_shadow_nodes(), 1);
        assert!(!has_own_property(&mut agent, instance, key).unwrap());
    }

    #[test]
    fn write_commits_copy_onto_instance() {
        let Fixture {
            mut agent,
            prototype,
            nested,
            instance,
            key,
            leaf,
        } = fixture();
        let Value::ShadowObject(node) = get(&mut agent, instance, key).unwrap() else {
            panic!("expected a shadow node");
        };
        set(&mut agent, node.into(), leaf, 2.into(), true).unwrap();
        assert!(node.is_committed(&agent));
        assert_eq!(agent.pending_shadow_nodes(), 0);

        // The committed node itself is installed, so its identity is stable.
        assert_eq!(get(&mut agent, instance, key).unwrap(), node.into());
        assert!(has_own_property(&mut agent, instance, key).unwrap());
        assert_ne!(node.forward_target(&agent), nested.into());
        assert_eq!(get(&mut agent, node.into(), leaf).unwrap(), 2.into());
        assert_eq!(get(&mut agent, nested.into(), leaf).unwrap(), 1.into());
        assert_eq!(
            get(&mut agent, prototype.into(), key).unwrap(),
            nested.into()
        );
    }

    #[test]
    fn committed_nodes_shadow_shared_children() {
        let Fixture {
            mut agent,
            nested,
            instance,
            key,
            leaf,
            ..
        } = fixture();
        let inner_key = PropertyKey::from_str(&mut agent, "inner");
        let inner = OrdinaryObject::create_empty_object(&mut agent);
        create_data_property_or_throw(&mut agent, inner.into(), leaf, 1.into()).unwrap();
        create_data_property_or_throw(&mut agent, nested.into(), inner_key, inner.into())
            .unwrap();

        let node = get(&mut agent, instance, key).unwrap();
        set(&mut agent, node.try_into().unwrap(), leaf, 2.into(), true).unwrap();
        let Value::ShadowObject(child) = get(&mut agent, node.try_into().unwrap(), inner_key)
            .unwrap()
        else {
            panic!("shared child was not shadowed");
        };
        assert!(child.is_pending(&agent));
        set(&mut agent, child.into(), leaf, 3.into(), true).unwrap();

        assert!(child.is_committed(&agent));
        assert_eq!(get(&mut agent, inner.into(), leaf).unwrap(), 1.into());
        assert_eq!(
            get(&mut agent, node.try_into().unwrap(), inner_key).unwrap(),
            child.into()
        );

        // Objects stored after the commit belong to the copy.
        let own = OrdinaryObject::create_empty_object(&mut agent);
        let own_key = PropertyKey::from_str(&mut agent, "own");
        set(&mut agent, node.try_into().unwrap(), own_key, own.into(), true).unwrap();
        assert_eq!(
            get(&mut agent, node.try_into().unwrap(), own_key).unwrap(),
            own.into()
        );
        assert_eq!(agent.pending_shadow_nodes(), 0);
    }

    #[test]
    fn terminators_are_not_shadowed() {
        let Fixture {
            mut agent,
            nested,
            instance,
            key,
            ..
        } = fixture();
        mark_terminator(&mut agent, nested.into());
        assert_eq!(get(&mut agent, instance, key).unwrap(), nested.into());
        assert_eq!(agent.pending_shadow_nodes(), 0);
    }

    #[test]
    fn plain_writes_land_on_instance() {
        let Fixture {
            mut agent,
            prototype,
            nested,
            instance,
            key,
            ..
        } = fixture();
        set(&mut agent, instance, key, 3.into(), true).unwrap();
        assert_eq!(get(&mut agent, instance, key).unwrap(), 3.into());
        assert_eq!(
            get(&mut agent, prototype.into(), key).unwrap(),
            nested.into()
        );
    }
}
