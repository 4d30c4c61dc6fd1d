// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use super::builtin_function::{ArgumentsList, BuiltinFunction};
use crate::ecmascript::{
    abstract_operations::{
        operations_on_objects::{call_function, create_data_property, get},
        testing_and_comparison::same_value,
    },
    execution::{Agent, JsResult, ProtoIntrinsics},
    types::{
        InternalMethods, InternalSlots, Object, ObjectEntry, OrdinaryObject, PropertyDescriptor,
        PropertyKey, Value,
    },
};

/// ### [10.1.2.1 OrdinarySetPrototypeOf ( O, V )](https://tc39.es/ecma262/#sec-ordinarysetprototypeof)
pub(crate) fn ordinary_set_prototype_of(
    agent: &mut Agent,
    object: Object,
    prototype: Option<Object>,
) -> bool {
    // 1. Let current be O.[[Prototype]].
    let current = object.internal_prototype(agent);

    // 2. If SameValue(V, current) is true, return true.
    if prototype == current {
        return true;
    }

    // 3. Let extensible be O.[[Extensible]].
    let extensible = object.internal_extensible(agent);

    // 4. If extensible is false, return false.
    if !extensible {
        return false;
    }

    // 5. Let p be V.
    let mut p = prototype;
    // 6. Let done be false.
    // 7. Repeat, while done is false,
    // a. If p is null, then
    while let Some(p_inner) = p {
        // b. Else if SameValue(p, O) is true, then
        if p_inner == object {
            // i. Return false.
            return false;
        }
        // c. Else,
        // i. If p.[[GetPrototypeOf]] is not the ordinary object internal method defined in 10.1.1,
        //    set done to true.
        // NOTE: Shadow objects define their own [[GetPrototypeOf]].
        if p_inner.is_shadow_object() {
            break;
        }
        // ii. Else, set p to p.[[Prototype]].
        p = p_inner.internal_prototype(agent);
    }

    // 8. Set O.[[Prototype]] to V.
    object.internal_set_prototype(agent, prototype);

    // 9. Return true.
    true
}

/// ### [10.1.5.1 OrdinaryGetOwnProperty ( O, P )](https://tc39.es/ecma262/#sec-ordinarygetownproperty)
pub(crate) fn ordinary_get_own_property(
    agent: &Agent,
    object: OrdinaryObject,
    property_key: PropertyKey,
) -> Option<PropertyDescriptor> {
    // 1. If O does not have an own property with key P, return undefined.
    // 2. Let D be a newly created Property Descriptor with no fields.
    // 3. Let X be O's own property whose key is P.
    // 4. If X is a data property, then
    //    a. Set D.[[Value]] to the value of X's [[Value]] attribute.
    //    b. Set D.[[Writable]] to the value of X's [[Writable]] attribute.
    // 5. Else,
    //    a. Assert: X is an accessor property.
    //    b. Set D.[[Get]] to the value of X's [[Get]] attribute.
    //    c. Set D.[[Set]] to the value of X's [[Set]] attribute.
    // 6. Set D.[[Enumerable]] to the value of X's [[Enumerable]] attribute.
    // 7. Set D.[[Configurable]] to the value of X's [[Configurable]] attribute.
    // 8. Return D.
    agent[object]
        .properties
        .get(property_key)
        .map(|entry| PropertyDescriptor::from(*entry))
}

/// ### [10.1.6.1 OrdinaryDefineOwnProperty ( O, P, Desc )](https://tc39.es/ecma262/#sec-ordinarydefineownproperty)
pub(crate) fn ordinary_define_own_property(
    agent: &mut Agent,
    object: OrdinaryObject,
    property_key: PropertyKey,
    descriptor: PropertyDescriptor,
) -> bool {
    // 1. Let current be ? O.[[GetOwnProperty]](P).
    let current = ordinary_get_own_property(agent, object, property_key);

    // 2. Let extensible be ? IsExtensible(O).
    let extensible = object.internal_extensible(agent);

    // 3. Return ValidateAndApplyPropertyDescriptor(O, P, extensible, Desc, current).
    validate_and_apply_property_descriptor(
        agent,
        Some(object),
        property_key,
        extensible,
        descriptor,
        current,
    )
}

/// ### [10.1.6.3 ValidateAndApplyPropertyDescriptor ( O, P, extensible, Desc, current )](https://tc39.es/ecma262/#sec-validateandapplypropertydescriptor)
fn validate_and_apply_property_descriptor(
    agent: &mut Agent,
    o: Option<OrdinaryObject>,
    property_key: PropertyKey,
    extensible: bool,
    descriptor: PropertyDescriptor,
    current: Option<PropertyDescriptor>,
) -> bool {
    // 1. Assert: IsPropertyKey(P) is true.

    // 2. If current is undefined, then
    let Some(current) = current else {
        // a. If extensible is false, return false.
        if !extensible {
            return false;
        }

        // b. If O is undefined, return true.
        let Some(o) = o else {
            return true;
        };

        // c. If IsAccessorDescriptor(Desc) is true, then
        //    i. Create an own accessor property named P of object O whose [[Get]], [[Set]],
        //       [[Enumerable]], and [[Configurable]] attributes are set to the value of the
        //       corresponding field in Desc if Desc has that field, or to the attribute's default
        //       value otherwise.
        // d. Else,
        //    i. Create an own data property named P of object O whose [[Value]], [[Writable]],
        //       [[Enumerable]], and [[Configurable]] attributes are set to the value of the
        //       corresponding field in Desc if Desc has that field, or to the attribute's default
        //       value otherwise.
        agent[o]
            .properties
            .set(property_key, ObjectEntry::from(descriptor));

        // e. Return true.
        return true;
    };

    // 3. Assert: current is a fully populated Property Descriptor.
    debug_assert!(current.is_fully_populated());

    // 4. If Desc does not have any fields, return true.
    if !descriptor.has_fields() {
        return true;
    }

    // 5. If current.[[Configurable]] is false, then
    if current.configurable == Some(false) {
        // a. If Desc has a [[Configurable]] field and Desc.[[Configurable]] is true, return false.
        if descriptor.configurable == Some(true) {
            return false;
        }

        // b. If Desc has an [[Enumerable]] field and SameValue(Desc.[[Enumerable]], current.[[Enumerable]])
        //    is false, return false.
        if descriptor.enumerable.is_some() && descriptor.enumerable != current.enumerable {
            return false;
        }

        // c. If IsGenericDescriptor(Desc) is false and SameValue(IsAccessorDescriptor(Desc), IsAccessorDescriptor(current))
        //    is false, return false.
        if !descriptor.is_generic_descriptor()
            && descriptor.is_accessor_descriptor() != current.is_accessor_descriptor()
        {
            return false;
        }

        // d. If IsAccessorDescriptor(current) is true, then
        if current.is_accessor_descriptor() {
            // i. If Desc has a [[Get]] field and SameValue(Desc.[[Get]], current.[[Get]]) is false,
            //    return false.
            if descriptor.get.is_some() && descriptor.get != current.get {
                return false;
            }

            // ii. If Desc has a [[Set]] field and SameValue(Desc.[[Set]], current.[[Set]]) is
            //     false, return false.
            if descriptor.set.is_some() && descriptor.set != current.set {
                return false;
            }
        }
        // e. Else if current.[[Writable]] is false, then
        else if current.writable == Some(false) {
            // i. If Desc has a [[Writable]] field and Desc.[[Writable]] is true, return false.
            if descriptor.writable == Some(true) {
                return false;
            }

            // ii. If Desc has a [[Value]] field and SameValue(Desc.[[Value]], current.[[Value]])
            //     is false, return false.
            if let Some(desc_value) = descriptor.value {
                match current.value {
                    Some(cur_value) if same_value(desc_value, cur_value) => {}
                    _ => return false,
                }
            }
        }
    }

    // 6. If O is not undefined, then
    if let Some(o) = o {
        let entry = if current.is_data_descriptor() && descriptor.is_accessor_descriptor() {
            // a. If IsDataDescriptor(current) is true and IsAccessorDescriptor(Desc) is true, then
            //    i. If Desc has a [[Configurable]] field, let configurable be Desc.[[Configurable]];
            //       else let configurable be current.[[Configurable]].
            //    ii. If Desc has a [[Enumerable]] field, let enumerable be Desc.[[Enumerable]];
            //        else let enumerable be current.[[Enumerable]].
            //    iii. Replace the property named P of object O with an accessor property whose
            //         [[Configurable]] and [[Enumerable]] attributes are set to configurable and
            //         enumerable, respectively, and whose [[Get]] and [[Set]] attributes are set
            //         to the value of the corresponding field in Desc if Desc has that field, or
            //         to the attribute's default value otherwise.
            ObjectEntry::Accessor {
                get: descriptor.get.flatten(),
                set: descriptor.set.flatten(),
                enumerable: descriptor.enumerable.or(current.enumerable).unwrap_or(false),
                configurable: descriptor
                    .configurable
                    .or(current.configurable)
                    .unwrap_or(false),
            }
        } else if current.is_accessor_descriptor() && descriptor.is_data_descriptor() {
            // b. Else if IsAccessorDescriptor(current) is true and IsDataDescriptor(Desc) is true, then
            //    i. If Desc has a [[Configurable]] field, let configurable be Desc.[[Configurable]];
            //       else let configurable be current.[[Configurable]].
            //    ii. If Desc has a [[Enumerable]] field, let enumerable be Desc.[[Enumerable]];
            //        else let enumerable be current.[[Enumerable]].
            //    iii. Replace the property named P of object O with a data property whose
            //         [[Configurable]] and [[Enumerable]] attributes are set to configurable and
            //         enumerable, respectively, and whose [[Value]] and [[Writable]] attributes
            //         are set to the value of the corresponding field in Desc if Desc has that
            //         field, or to the attribute's default value otherwise.
            ObjectEntry::Data {
                value: descriptor.value.unwrap_or(Value::Undefined),
                writable: descriptor.writable.unwrap_or(false),
                enumerable: descriptor.enumerable.or(current.enumerable).unwrap_or(false),
                configurable: descriptor
                    .configurable
                    .or(current.configurable)
                    .unwrap_or(false),
            }
        } else {
            // c. Else,
            //    i. For each field of Desc, set the corresponding attribute of the property
            //       named P of object O to the value of the field.
            ObjectEntry::from(PropertyDescriptor {
                value: descriptor.value.or(current.value),
                writable: descriptor.writable.or(current.writable),
                get: descriptor.get.or(current.get),
                set: descriptor.set.or(current.set),
                enumerable: descriptor.enumerable.or(current.enumerable),
                configurable: descriptor.configurable.or(current.configurable),
            })
        };
        agent[o].properties.set(property_key, entry);
    }

    // 7. Return true.
    true
}

/// ### [10.1.7.1 OrdinaryHasProperty ( O, P )](https://tc39.es/ecma262/#sec-ordinaryhasproperty)
pub(crate) fn ordinary_has_property(
    agent: &mut Agent,
    object: Object,
    property_key: PropertyKey,
) -> JsResult<bool> {
    // 1. Let hasOwn be ? O.[[GetOwnProperty]](P).
    let has_own = object.internal_get_own_property(agent, property_key)?;

    // 2. If hasOwn is not undefined, return true.
    if has_own.is_some() {
        return Ok(true);
    }

    // 3. Let parent be ? O.[[GetPrototypeOf]]().
    let parent = object.internal_get_prototype_of(agent)?;

    // 4. If parent is not null, then
    if let Some(parent) = parent {
        // a. Return ? parent.[[HasProperty]](P).
        return parent.internal_has_property(agent, property_key);
    }

    // 5. Return false.
    Ok(false)
}

/// ### [10.1.8.1 OrdinaryGet ( O, P, Receiver )](https://tc39.es/ecma262/#sec-ordinaryget)
pub(crate) fn ordinary_get(
    agent: &mut Agent,
    object: Object,
    property_key: PropertyKey,
    receiver: Value,
) -> JsResult<Value> {
    // 1. Let desc be ? O.[[GetOwnProperty]](P).
    let Some(descriptor) = object.internal_get_own_property(agent, property_key)? else {
        // 2. If desc is undefined, then

        // a. Let parent be ? O.[[GetPrototypeOf]]().
        let Some(parent) = object.internal_get_prototype_of(agent)? else {
            // b. If parent is null, return undefined.
            return Ok(Value::Undefined);
        };

        // c. Return ? parent.[[Get]](P, Receiver).
        return parent.internal_get(agent, property_key, receiver);
    };

    // 3. If IsDataDescriptor(desc) is true, return desc.[[Value]].
    if let Some(value) = descriptor.value {
        debug_assert!(descriptor.is_data_descriptor());
        return Ok(value);
    }

    // 4. Assert: IsAccessorDescriptor(desc) is true.
    debug_assert!(descriptor.is_accessor_descriptor());

    // 5. Let getter be desc.[[Get]].
    // 6. If getter is undefined, return undefined.
    let Some(Some(getter)) = descriptor.get else {
        return Ok(Value::Undefined);
    };

    // 7. Return ? Call(getter, Receiver).
    call_function(agent, getter.into(), receiver, None)
}

/// ### [10.1.9.1 OrdinarySet ( O, P, V, Receiver )](https://tc39.es/ecma262/#sec-ordinaryset)
pub(crate) fn ordinary_set(
    agent: &mut Agent,
    object: Object,
    property_key: PropertyKey,
    value: Value,
    receiver: Value,
) -> JsResult<bool> {
    // 1. Let ownDesc be ? O.[[GetOwnProperty]](P).
    let own_descriptor = object.internal_get_own_property(agent, property_key)?;

    // 2. Return ? OrdinarySetWithOwnDescriptor(O, P, V, Receiver, ownDesc).
    ordinary_set_with_own_descriptor(agent, object, property_key, value, receiver, own_descriptor)
}

/// ### [10.1.9.2 OrdinarySetWithOwnDescriptor ( O, P, V, Receiver, ownDesc )](https://tc39.es/ecma262/#sec-ordinarysetwithowndescriptor)
fn ordinary_set_with_own_descriptor(
    agent: &mut Agent,
    object: Object,
    property_key: PropertyKey,
    value: Value,
    receiver: Value,
    own_descriptor: Option<PropertyDescriptor>,
) -> JsResult<bool> {
    let own_descriptor = if let Some(own_descriptor) = own_descriptor {
        own_descriptor
    } else {
        // 1. If ownDesc is undefined, then
        // a. Let parent be ? O.[[GetPrototypeOf]]().
        let parent = object.internal_get_prototype_of(agent)?;

        // b. If parent is not null, then
        if let Some(parent) = parent {
            // i. Return ? parent.[[Set]](P, V, Receiver).
            return parent.internal_set(agent, property_key, value, receiver);
        }
        // c. Else,
        // i. Set ownDesc to the PropertyDescriptor {
        //      [[Value]]: undefined, [[Writable]]: true, [[Enumerable]]: true, [[Configurable]]: true
        //    }.
        PropertyDescriptor::new_data_descriptor(Value::Undefined)
    };

    // 2. If IsDataDescriptor(ownDesc) is true, then
    if own_descriptor.is_data_descriptor() {
        // a. If ownDesc.[[Writable]] is false, return false.
        if own_descriptor.writable == Some(false) {
            return Ok(false);
        }

        // b. If Receiver is not an Object, return false.
        let Ok(receiver) = Object::try_from(receiver) else {
            return Ok(false);
        };

        // c. Let existingDescriptor be ? Receiver.[[GetOwnProperty]](P).
        let existing_descriptor = receiver.internal_get_own_property(agent, property_key)?;

        // d. If existingDescriptor is not undefined, then
        if let Some(existing_descriptor) = existing_descriptor {
            // i. If IsAccessorDescriptor(existingDescriptor) is true, return false.
            if existing_descriptor.is_accessor_descriptor() {
                return Ok(false);
            }

            // ii. If existingDescriptor.[[Writable]] is false, return false.
            if existing_descriptor.writable == Some(false) {
                return Ok(false);
            }

            // iii. Let valueDesc be the PropertyDescriptor { [[Value]]: V }.
            let value_descriptor = PropertyDescriptor {
                value: Some(value),
                ..Default::default()
            };

            // iv. Return ? Receiver.[[DefineOwnProperty]](P, valueDesc).
            return receiver.internal_define_own_property(agent, property_key, value_descriptor);
        }
        // e. Else,
        // i. Assert: Receiver does not currently have a property P.
        // ii. Return ? CreateDataProperty(Receiver, P, V).
        return create_data_property(agent, receiver, property_key, value);
    }

    // 3. Assert: IsAccessorDescriptor(ownDesc) is true.
    debug_assert!(own_descriptor.is_accessor_descriptor());

    // 4. Let setter be ownDesc.[[Set]].
    // 5. If setter is undefined, return false.
    let Some(Some(setter)) = own_descriptor.set else {
        return Ok(false);
    };

    // 6. Perform ? Call(setter, Receiver, « V »).
    call_function(
        agent,
        setter.into(),
        receiver,
        Some(ArgumentsList(&[value])),
    )?;

    // 7. Return true.
    Ok(true)
}

/// ### [10.1.10.1 OrdinaryDelete ( O, P )](https://tc39.es/ecma262/#sec-ordinarydelete)
pub(crate) fn ordinary_delete(
    agent: &mut Agent,
    object: OrdinaryObject,
    property_key: PropertyKey,
) -> bool {
    // 1. Let desc be ? O.[[GetOwnProperty]](P).
    let descriptor = ordinary_get_own_property(agent, object, property_key);

    // 2. If desc is undefined, return true.
    let Some(descriptor) = descriptor else {
        return true;
    };

    // 3. If desc.[[Configurable]] is true, then
    if let Some(true) = descriptor.configurable {
        // a. Remove the own property with name P from O.
        agent[object].properties.remove(property_key);

        // b. Return true.
        return true;
    }

    // 4. Return false.
    false
}

/// ### [10.1.11.1 OrdinaryOwnPropertyKeys ( O )](https://tc39.es/ecma262/#sec-ordinaryownpropertykeys)
pub(crate) fn ordinary_own_property_keys(
    agent: &Agent,
    object: OrdinaryObject,
) -> Vec<PropertyKey> {
    let keys = agent[object].properties.keys();
    // 1. Let keys be a new empty List.
    let mut integer_keys = vec![];
    let mut keys_vec = Vec::with_capacity(keys.len());

    // 3. For each own property key P of O such that P is a String and P is not an array index, in
    //    ascending chronological order of property creation, do
    for key in keys.iter() {
        match key {
            PropertyKey::Integer(integer_key) => integer_keys.push(*integer_key),
            // a. Append P to keys.
            PropertyKey::String(_) => keys_vec.push(*key),
        }
    }

    // 2. For each own property key P of O such that P is an array index,
    if !integer_keys.is_empty() {
        // in ascending numeric index order, do
        integer_keys.sort();
        // a. Append P to keys.
        keys_vec.splice(0..0, integer_keys.into_iter().map(PropertyKey::Integer));
    }

    // 5. Return keys.
    keys_vec
}

/// ### [10.1.12 OrdinaryObjectCreate ( proto \[ , additionalInternalSlotsList \] )](https://tc39.es/ecma262/#sec-ordinaryobjectcreate)
pub(crate) fn ordinary_object_create_with_prototype(
    agent: &mut Agent,
    prototype: Option<Object>,
) -> OrdinaryObject {
    // 1. Let internalSlotsList be « [[Prototype]], [[Extensible]] ».
    // 2. If additionalInternalSlotsList is present, set internalSlotsList to the
    //    list-concatenation of internalSlotsList and additionalInternalSlotsList.
    // 3. Let O be MakeBasicObject(internalSlotsList).
    // 4. Set O.[[Prototype]] to proto.
    // 5. Return O.
    OrdinaryObject::create_object_with_prototype(agent, prototype)
}

/// ### [10.1.13 OrdinaryCreateFromConstructor ( constructor, intrinsicDefaultProto \[ , internalSlotsList \] )](https://tc39.es/ecma262/#sec-ordinarycreatefromconstructor)
pub(crate) fn ordinary_create_from_constructor(
    agent: &mut Agent,
    constructor: BuiltinFunction,
    intrinsic_default_proto: ProtoIntrinsics,
) -> JsResult<OrdinaryObject> {
    // 1. Assert: intrinsicDefaultProto is this specification's name of an
    // intrinsic object. The corresponding object must be an intrinsic that is
    // intended to be used as the [[Prototype]] value of an object.

    // 2. Let proto be ? GetPrototypeFromConstructor(constructor, intrinsicDefaultProto).
    let proto = get_prototype_from_constructor(agent, constructor, intrinsic_default_proto)?;
    // 3. If internalSlotsList is present, let slotsList be internalSlotsList.
    // 4. Else, let slotsList be a new empty List.
    // 5. Return OrdinaryObjectCreate(proto, slotsList).
    Ok(ordinary_object_create_with_prototype(agent, Some(proto)))
}

/// ### [10.1.14 GetPrototypeFromConstructor ( constructor, intrinsicDefaultProto )](https://tc39.es/ecma262/#sec-getprototypefromconstructor)
pub(crate) fn get_prototype_from_constructor(
    agent: &mut Agent,
    constructor: BuiltinFunction,
    intrinsic_default_proto: ProtoIntrinsics,
) -> JsResult<Object> {
    // 1. Assert: intrinsicDefaultProto is this specification's name of an
    // intrinsic object. The corresponding object must be an intrinsic that is
    // intended to be used as the [[Prototype]] value of an object.
    // 2. Let proto be ? Get(constructor, "prototype").
    let key = PropertyKey::String(agent.heap.builtin_strings.prototype);
    let proto = get(agent, constructor.into(), key)?;
    match Object::try_from(proto) {
        // 3. If proto is not an Object, then
        // a. Let realm be ? GetFunctionRealm(constructor).
        // b. Set proto to realm's intrinsic object named intrinsicDefaultProto.
        Err(_) => Ok(agent.current_realm().intrinsic(intrinsic_default_proto)),
        // 4. Return proto.
        Ok(proto) => Ok(proto),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecmascript::execution::{Agent, Options};

    fn key(agent: &mut Agent, name: &str) -> PropertyKey {
        PropertyKey::from_str(agent, name)
    }

    #[test]
    fn own_property_keys_order() {
        let mut agent = Agent::new(Options::default());
        let object = OrdinaryObject::create_empty_object(&mut agent);
        let b = key(&mut agent, "b");
        let a = key(&mut agent, "a");
        for property_key in [b, PropertyKey::Integer(2), a, PropertyKey::Integer(0)] {
            assert!(ordinary_define_own_property(
                &mut agent,
                object,
                property_key,
                PropertyDescriptor::new_data_descriptor(Value::Null),
            ));
        }
        assert_eq!(
            ordinary_own_property_keys(&agent, object),
            vec![PropertyKey::Integer(0), PropertyKey::Integer(2), b, a]
        );
    }

    #[test]
    fn non_configurable_property_rejects_changes() {
        let mut agent = Agent::new(Options::default());
        let object = OrdinaryObject::create_empty_object(&mut agent);
        let frozen = key(&mut agent, "frozen");
        assert!(ordinary_define_own_property(
            &mut agent,
            object,
            frozen,
            PropertyDescriptor {
                value: Some(1.into()),
                writable: Some(false),
                enumerable: Some(true),
                configurable: Some(false),
                ..Default::default()
            },
        ));
        assert!(!ordinary_define_own_property(
            &mut agent,
            object,
            frozen,
            PropertyDescriptor::new_data_descriptor(2),
        ));
        // Redefining with the same value is allowed.
        assert!(ordinary_define_own_property(
            &mut agent,
            object,
            frozen,
            PropertyDescriptor {
                value: Some(1.into()),
                ..Default::default()
            },
        ));
        assert!(!ordinary_delete(&mut agent, object, frozen));
        assert_eq!(
            ordinary_get_own_property(&agent, object, frozen).and_then(|desc| desc.value),
            Some(Value::from(1))
        );
    }

    #[test]
    fn non_extensible_object_rejects_new_properties() {
        let mut agent = Agent::new(Options::default());
        let object = OrdinaryObject::create_empty_object(&mut agent);
        object.internal_set_extensible(&mut agent, false);
        let property_key = key(&mut agent, "x");
        assert!(!ordinary_define_own_property(
            &mut agent,
            object,
            property_key,
            PropertyDescriptor::new_data_descriptor(1),
        ));
    }

    #[test]
    fn set_prototype_of_rejects_cycles() {
        let mut agent = Agent::new(Options::default());
        let a = OrdinaryObject::create_empty_object(&mut agent);
        let b = OrdinaryObject::create_object_with_prototype(&mut agent, Some(a.into()));
        assert!(!ordinary_set_prototype_of(&mut agent, a.into(), Some(b.into())));
        assert!(ordinary_set_prototype_of(&mut agent, b.into(), None));
        assert_eq!(b.internal_prototype(&agent), None);
    }

    #[test]
    fn set_writes_to_receiver() {
        let mut agent = Agent::new(Options::default());
        let proto = OrdinaryObject::create_empty_object(&mut agent);
        let instance = OrdinaryObject::create_object_with_prototype(&mut agent, Some(proto.into()));
        let x = key(&mut agent, "x");
        assert!(ordinary_define_own_property(
            &mut agent,
            proto,
            x,
            PropertyDescriptor::new_data_descriptor(1),
        ));
        assert!(
            ordinary_set(&mut agent, instance.into(), x, 2.into(), instance.into()).unwrap()
        );
        assert_eq!(
            ordinary_get_own_property(&agent, proto, x).and_then(|desc| desc.value),
            Some(Value::from(1))
        );
        assert_eq!(
            ordinary_get(&mut agent, instance.into(), x, instance.into()).unwrap(),
            Value::from(2)
        );
    }
}
