// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! ## [7.3 Operations on Objects](https://tc39.es/ecma262/#sec-operations-on-objects)

use crate::ecmascript::{
    abstract_operations::testing_and_comparison::is_constructor,
    builtins::{
        builtin_function::{ArgumentsList, BuiltinFunction, builtin_call_or_construct},
        ordinary::ordinary_create_from_constructor,
        shadow::make_safe,
    },
    execution::{Agent, ExceptionType, JsResult, ProtoIntrinsics},
    types::{InternalMethods, Object, PropertyDescriptor, PropertyKey, Value},
};

/// ### [7.3.2 Get ( O, P )](https://tc39.es/ecma262/#sec-get-o-p)
///
/// The abstract operation Get takes arguments O (an Object) and P (a property
/// key) and returns either a normal completion containing an ECMAScript
/// language value or a throw completion. It is used to retrieve the value of a
/// specific property of an object.
pub fn get(agent: &mut Agent, o: Object, p: PropertyKey) -> JsResult<Value> {
    // 1. Return ? O.[[Get]](P, O).
    o.internal_get(agent, p, o.into())
}

/// ### [7.3.4 Set ( O, P, V, Throw )](https://tc39.es/ecma262/#sec-set-o-p-v-throw)
///
/// The abstract operation Set takes arguments O (an Object), P (a property
/// key), V (an ECMAScript language value), and Throw (a Boolean) and returns
/// either a normal completion containing UNUSED or a throw completion. It is
/// used to set the value of a specific property of an object. V is the new
/// value for the property.
pub fn set(agent: &mut Agent, o: Object, p: PropertyKey, v: Value, throw: bool) -> JsResult<()> {
    // 1. Let success be ? O.[[Set]](P, V, O).
    let success = o.internal_set(agent, p, v, o.into())?;
    // 2. If success is false and Throw is true, throw a TypeError exception.
    if !success && throw {
        return Err(agent.throw_exception(ExceptionType::TypeError, "Could not set property."));
    }
    // 3. Return UNUSED.
    Ok(())
}

/// ### [7.3.5 CreateDataProperty ( O, P, V )](https://tc39.es/ecma262/#sec-createdataproperty)
///
/// > NOTE: This abstract operation creates a property whose attributes are set
/// > to the same defaults used for properties created by the ECMAScript language
/// > assignment operator. Normally, the property will not already exist. If it
/// > does exist and is not configurable or if O is not extensible,
/// > \[\[DefineOwnProperty]] will return false.
pub fn create_data_property(
    agent: &mut Agent,
    object: Object,
    property_key: PropertyKey,
    value: Value,
) -> JsResult<bool> {
    // 1. Let newDesc be the PropertyDescriptor { [[Value]]: V, [[Writable]]: true, [[Enumerable]]: true, [[Configurable]]: true }.
    let new_desc = PropertyDescriptor::new_data_descriptor(value);
    // 2. Return ? O.[[DefineOwnProperty]](P, newDesc).
    object.internal_define_own_property(agent, property_key, new_desc)
}

/// ### [7.3.7 CreateDataPropertyOrThrow ( O, P, V )](https://tc39.es/ecma262/#sec-createdatapropertyorthrow)
pub fn create_data_property_or_throw(
    agent: &mut Agent,
    object: Object,
    property_key: PropertyKey,
    value: Value,
) -> JsResult<()> {
    // 1. Let success be ? CreateDataProperty(O, P, V).
    let success = create_data_property(agent, object, property_key, value)?;
    // 2. If success is false, throw a TypeError exception.
    if !success {
        Err(agent.throw_exception(ExceptionType::TypeError, "Could not create property"))
    } else {
        // 3. Return UNUSED.
        Ok(())
    }
}

/// ### [7.3.8 DefinePropertyOrThrow ( O, P, desc )](https://tc39.es/ecma262/#sec-definepropertyorthrow)
pub fn define_property_or_throw(
    agent: &mut Agent,
    object: impl InternalMethods,
    property_key: PropertyKey,
    desc: PropertyDescriptor,
) -> JsResult<()> {
    // 1. Let success be ? O.[[DefineOwnProperty]](P, desc).
    let success = object.internal_define_own_property(agent, property_key, desc)?;
    // 2. If success is false, throw a TypeError exception.
    if !success {
        Err(agent.throw_exception(
            ExceptionType::TypeError,
            "Failed to defined property on object",
        ))
    } else {
        // 3. Return UNUSED.
        Ok(())
    }
}

/// ### [7.3.9 DeletePropertyOrThrow ( O, P )](https://tc39.es/ecma262/#sec-deletepropertyorthrow)
pub fn delete_property_or_throw(agent: &mut Agent, o: Object, p: PropertyKey) -> JsResult<()> {
    // 1. Let success be ? O.[[Delete]](P).
    let success = o.internal_delete(agent, p)?;
    // 2. If success is false, throw a TypeError exception.
    if !success {
        Err(agent.throw_exception(ExceptionType::TypeError, "Failed to delete property"))
    } else {
        // 3. Return unused.
        Ok(())
    }
}

/// ### [7.3.12 HasProperty ( O, P )](https://tc39.es/ecma262/#sec-hasproperty)
pub fn has_property(agent: &mut Agent, o: Object, p: PropertyKey) -> JsResult<bool> {
    // 1. Return ? O.[[HasProperty]](P).
    o.internal_has_property(agent, p)
}

/// ### [7.3.13 HasOwnProperty ( O, P )](https://tc39.es/ecma262/#sec-hasownproperty)
pub fn has_own_property(agent: &mut Agent, o: Object, p: PropertyKey) -> JsResult<bool> {
    // 1. Let desc be ? O.[[GetOwnProperty]](P).
    let desc = o.internal_get_own_property(agent, p)?;
    // 2. If desc is undefined, return false.
    // 3. Return true.
    Ok(desc.is_some())
}

/// Object.getPrototypeOf without the ToObject step.
pub fn get_prototype_of(agent: &mut Agent, o: Object) -> JsResult<Option<Object>> {
    o.internal_get_prototype_of(agent)
}

/// Object.setPrototypeOf without the argument coercions: throws a TypeError
/// if \[\[SetPrototypeOf]] reports failure.
pub fn set_prototype_of(agent: &mut Agent, o: Object, proto: Option<Object>) -> JsResult<()> {
    let status = o.internal_set_prototype_of(agent, proto)?;
    if !status {
        return Err(agent.throw_exception(
            ExceptionType::TypeError,
            "Could not set prototype of object",
        ));
    }
    Ok(())
}

/// Object.preventExtensions without the argument coercions: throws a
/// TypeError if \[\[PreventExtensions]] reports failure.
pub fn prevent_extensions(agent: &mut Agent, o: Object) -> JsResult<()> {
    let status = o.internal_prevent_extensions(agent)?;
    if !status {
        return Err(agent.throw_exception(
            ExceptionType::TypeError,
            "Could not prevent extensions",
        ));
    }
    Ok(())
}

/// ### [7.3.14 Call ( F, V \[ , argumentsList \] )](https://tc39.es/ecma262/#sec-call)
///
/// The abstract operation Call takes arguments F (an ECMAScript language
/// value) and V (an ECMAScript language value) and optional argument
/// argumentsList (a List of ECMAScript language values) and returns either a
/// normal completion containing an ECMAScript language value or a throw
/// completion. It is used to call the \[\[Call]] internal method of a function
/// object. F is the function object, V is an ECMAScript language value that is
/// the this value of the \[\[Call]], and argumentsList is the value passed to
/// the corresponding argument of the internal method. If argumentsList is not
/// present, a new empty List is used as its value.
pub fn call_function(
    agent: &mut Agent,
    f: Value,
    v: Value,
    arguments_list: Option<ArgumentsList>,
) -> JsResult<Value> {
    // 1. If argumentsList is not present, set argumentsList to a new empty List.
    let arguments_list = arguments_list.unwrap_or_default();
    // 2. If IsCallable(F) is false, throw a TypeError exception.
    let Value::BuiltinFunction(f) = f else {
        return Err(agent.throw_exception(ExceptionType::TypeError, "Not a callable object"));
    };
    // 3. Return ? F.[[Call]](V, argumentsList).
    builtin_call_or_construct(agent, f, Some(v), arguments_list, None)
}

/// ### [7.3.15 Construct ( F \[ , argumentsList \[ , newTarget \] \] )](https://tc39.es/ecma262/#sec-construct)
///
/// The new instance is created from `F.prototype` before the constructor
/// behaviour runs with it as the this value. With
/// `Options::shadow_on_construct` set, the returned instance is passed
/// through [`make_safe`].
pub fn construct(
    agent: &mut Agent,
    f: BuiltinFunction,
    arguments_list: Option<ArgumentsList>,
) -> JsResult<Object> {
    // 1. If newTarget is not present, set newTarget to F.
    // 2. If argumentsList is not present, set argumentsList to a new empty List.
    let arguments_list = arguments_list.unwrap_or_default();
    if !is_constructor(agent, f.into()) {
        return Err(agent.throw_exception(ExceptionType::TypeError, "Not a constructor"));
    }
    // OrdinaryCreateFromConstructor(newTarget, "%Object.prototype%").
    let this_argument = ordinary_create_from_constructor(agent, f, ProtoIntrinsics::Object)?;
    // 3. Return ? F.[[Construct]](argumentsList, newTarget).
    let result = builtin_call_or_construct(
        agent,
        f,
        Some(this_argument.into()),
        arguments_list,
        Some(f.into()),
    )?;
    // A constructor returning an object replaces the created instance.
    let instance = Object::try_from(result).unwrap_or(this_argument.into());
    if agent.options.shadow_on_construct {
        make_safe(agent, instance)
    } else {
        Ok(instance)
    }
}
