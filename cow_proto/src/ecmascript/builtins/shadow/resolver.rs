// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use super::data::ShadowObjectHeapData;
use crate::ecmascript::{
    execution::{Agent, JsResult},
    types::{InternalMethods, Object, PropertyDescriptor, PropertyKey},
};

/// Finds the first own definition of `property_key` along the delegation
/// chain starting at `object`.
///
/// Accessors are never invoked. Shadow objects are looked through to the
/// object they forward to, so resolving never creates shadow nodes.
pub fn resolve_property_descriptor(
    agent: &mut Agent,
    object: Object,
    property_key: PropertyKey,
) -> JsResult<Option<PropertyDescriptor>> {
    let mut current = Some(object);
    while let Some(object) = current {
        let object = look_through(agent, object);
        if let Some(descriptor) = object.internal_get_own_property(agent, property_key)? {
            return Ok(Some(descriptor));
        }
        current = object.internal_get_prototype_of(agent)?;
    }
    Ok(None)
}

/// Unwraps shadow objects down to the object holding the properties.
pub(crate) fn look_through(agent: &Agent, object: Object) -> Object {
    let mut object = object;
    while let Object::ShadowObject(shadow) = object {
        object = match &agent[shadow] {
            ShadowObjectHeapData::Delegation { target, .. } => *target,
            ShadowObjectHeapData::Pending(record) => record.copy.into(),
            ShadowObjectHeapData::Committed { copy, .. } => (*copy).into(),
        };
    }
    object
}
