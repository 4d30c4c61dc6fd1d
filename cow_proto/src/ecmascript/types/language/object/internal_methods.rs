// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use super::{InternalSlots, Object, PropertyKey};
use crate::ecmascript::{
    builtins::{
        ordinary::{
            ordinary_define_own_property, ordinary_delete, ordinary_get,
            ordinary_get_own_property, ordinary_has_property, ordinary_own_property_keys,
            ordinary_set, ordinary_set_prototype_of,
        },
        shadow::make_safe,
    },
    execution::{Agent, JsResult},
    types::{PropertyDescriptor, Value},
};

/// ### [6.1.7.2 Object Internal Methods and Internal Slots](https://tc39.es/ecma262/#sec-object-internal-methods-and-internal-slots)
///
/// The default implementations are the ordinary object internal methods,
/// operating on the backing object. Exotic objects override the methods
/// they redefine.
pub trait InternalMethods
where
    Self: InternalSlots,
{
    /// ## \[\[GetPrototypeOf\]\]
    fn internal_get_prototype_of(self, agent: &mut Agent) -> JsResult<Option<Object>> {
        // 1. Return OrdinaryGetPrototypeOf(O).
        Ok(self.internal_prototype(agent))
    }

    /// ## \[\[SetPrototypeOf\]\]
    fn internal_set_prototype_of(
        self,
        agent: &mut Agent,
        prototype: Option<Object>,
    ) -> JsResult<bool> {
        // 1. Return OrdinarySetPrototypeOf(O, V).
        let result = ordinary_set_prototype_of(agent, self.into(), prototype);
        let guarded = self
            .get_backing_object(agent)
            .is_some_and(|backing_object| agent[backing_object].guarded);
        if result && guarded {
            // A guarded instance keeps delegating through a wrapper.
            make_safe(agent, self.into())?;
        }
        Ok(result)
    }

    /// ## \[\[IsExtensible\]\]
    fn internal_is_extensible(self, agent: &mut Agent) -> JsResult<bool> {
        // 1. Return OrdinaryIsExtensible(O).
        Ok(self.internal_extensible(agent))
    }

    /// ## \[\[PreventExtensions\]\]
    fn internal_prevent_extensions(self, agent: &mut Agent) -> JsResult<bool> {
        // 1. Return OrdinaryPreventExtensions(O).
        self.internal_set_extensible(agent, false);
        Ok(true)
    }

    /// ## \[\[GetOwnProperty\]\]
    fn internal_get_own_property(
        self,
        agent: &mut Agent,
        property_key: PropertyKey,
    ) -> JsResult<Option<PropertyDescriptor>> {
        // 1. Return OrdinaryGetOwnProperty(O, P).
        Ok(self
            .get_backing_object(agent)
            .and_then(|backing_object| {
                ordinary_get_own_property(agent, backing_object, property_key)
            }))
    }

    /// ## \[\[DefineOwnProperty\]\]
    fn internal_define_own_property(
        self,
        agent: &mut Agent,
        property_key: PropertyKey,
        property_descriptor: PropertyDescriptor,
    ) -> JsResult<bool> {
        // 1. Return ? OrdinaryDefineOwnProperty(O, P, Desc).
        let backing_object = self.get_or_create_backing_object(agent);
        Ok(ordinary_define_own_property(
            agent,
            backing_object,
            property_key,
            property_descriptor,
        ))
    }

    /// ## \[\[HasProperty\]\]
    fn internal_has_property(self, agent: &mut Agent, property_key: PropertyKey) -> JsResult<bool> {
        // 1. Return ? OrdinaryHasProperty(O, P).
        ordinary_has_property(agent, self.into(), property_key)
    }

    /// ## \[\[Get\]\]
    fn internal_get(
        self,
        agent: &mut Agent,
        property_key: PropertyKey,
        receiver: Value,
    ) -> JsResult<Value> {
        // 1. Return ? OrdinaryGet(O, P, Receiver).
        ordinary_get(agent, self.into(), property_key, receiver)
    }

    /// ## \[\[Set\]\]
    fn internal_set(
        self,
        agent: &mut Agent,
        property_key: PropertyKey,
        value: Value,
        receiver: Value,
    ) -> JsResult<bool> {
        // 1. Return ? OrdinarySet(O, P, V, Receiver).
        ordinary_set(agent, self.into(), property_key, value, receiver)
    }

    /// ## \[\[Delete\]\]
    fn internal_delete(self, agent: &mut Agent, property_key: PropertyKey) -> JsResult<bool> {
        // 1. Return ? OrdinaryDelete(O, P).
        Ok(match self.get_backing_object(agent) {
            Some(backing_object) => ordinary_delete(agent, backing_object, property_key),
            None => true,
        })
    }

    /// ## \[\[OwnPropertyKeys\]\]
    fn internal_own_property_keys(self, agent: &mut Agent) -> JsResult<Vec<PropertyKey>> {
        // 1. Return OrdinaryOwnPropertyKeys(O).
        Ok(match self.get_backing_object(agent) {
            Some(backing_object) => ordinary_own_property_keys(agent, backing_object),
            None => vec![],
        })
    }
}
