// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::ops::{Deref, Index, IndexMut};

use super::{
    ordinary::{ordinary_define_own_property, ordinary_object_create_with_prototype},
    shadow::marking::mark_terminator,
};
use crate::{
    ecmascript::{
        abstract_operations::operations_on_objects::define_property_or_throw,
        execution::{Agent, ExceptionType, JsResult, ProtoIntrinsics},
        types::{
            InternalMethods, InternalSlots, Object, ObjectEntry, ObjectHeapData, OrdinaryObject,
            PropertyDescriptor, PropertyKey, String, Value,
        },
    },
    heap::{CreateHeapData, Heap, HeapMarkAndSweep, WorkQueues, indexes::BuiltinFunctionIndex},
};

#[derive(Debug, Clone, Copy, Default)]
pub struct ArgumentsList<'a>(pub(crate) &'a [Value]);

impl<'a> Deref for ArgumentsList<'a> {
    type Target = &'a [Value];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<'a> ArgumentsList<'a> {
    pub fn new(arguments: &'a [Value]) -> Self {
        Self(arguments)
    }

    #[inline]
    pub fn get(&self, index: usize) -> Value {
        *self.0.get(index).unwrap_or(&Value::Undefined)
    }
}

pub type RegularFn = fn(&mut Agent, Value, ArgumentsList<'_>) -> JsResult<Value>;
pub type ConstructorFn =
    fn(&mut Agent, Value, ArgumentsList<'_>, Option<Object>) -> JsResult<Value>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Behaviour {
    Regular(RegularFn),
    Constructor(ConstructorFn),
}

impl Behaviour {
    pub(crate) fn is_constructor(&self) -> bool {
        matches!(self, Behaviour::Constructor(_))
    }
}

#[derive(Debug, Default)]
pub struct BuiltinFunctionArgs {
    pub length: u32,
    pub name: &'static str,
    pub prototype: Option<Object>,
}

impl BuiltinFunctionArgs {
    pub fn new(length: u32, name: &'static str) -> Self {
        Self {
            length,
            name,
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone)]
pub struct BuiltinFunctionHeapData {
    pub(crate) behaviour: Behaviour,
    pub(crate) initial_name: String,
    pub(crate) length: u32,
    /// Set when the function's own properties are first touched or when it
    /// is created with a non-default prototype.
    pub(crate) object_index: Option<OrdinaryObject>,
}

/// ### [10.3 Built-in Function Objects](https://tc39.es/ecma262/#sec-built-in-function-objects)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BuiltinFunction(pub(crate) BuiltinFunctionIndex);

impl BuiltinFunction {
    pub(crate) const fn get_index(self) -> usize {
        self.0.into_index()
    }

    pub fn is_constructor(self, agent: &Agent) -> bool {
        // A builtin function has the [[Construct]] method if its behaviour is
        // a constructor behaviour.
        agent[self].behaviour.is_constructor()
    }

    pub fn name(self, agent: &Agent) -> &str {
        agent[self].initial_name.as_str(agent)
    }
}

impl From<BuiltinFunction> for Value {
    fn from(value: BuiltinFunction) -> Self {
        Value::BuiltinFunction(value)
    }
}

impl From<BuiltinFunction> for Object {
    fn from(value: BuiltinFunction) -> Self {
        Object::BuiltinFunction(value)
    }
}

impl TryFrom<Value> for BuiltinFunction {
    type Error = ();

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::BuiltinFunction(function) => Ok(function),
            _ => Err(()),
        }
    }
}

impl Index<BuiltinFunction> for Agent {
    type Output = BuiltinFunctionHeapData;

    fn index(&self, index: BuiltinFunction) -> &Self::Output {
        &self.heap.builtin_functions[index]
    }
}

impl IndexMut<BuiltinFunction> for Agent {
    fn index_mut(&mut self, index: BuiltinFunction) -> &mut Self::Output {
        &mut self.heap.builtin_functions[index]
    }
}

impl Index<BuiltinFunction> for Vec<Option<BuiltinFunctionHeapData>> {
    type Output = BuiltinFunctionHeapData;

    fn index(&self, index: BuiltinFunction) -> &Self::Output {
        self.get(index.get_index())
            .expect("BuiltinFunction out of bounds")
            .as_ref()
            .expect("BuiltinFunction slot empty")
    }
}

impl IndexMut<BuiltinFunction> for Vec<Option<BuiltinFunctionHeapData>> {
    fn index_mut(&mut self, index: BuiltinFunction) -> &mut Self::Output {
        self.get_mut(index.get_index())
            .expect("BuiltinFunction out of bounds")
            .as_mut()
            .expect("BuiltinFunction slot empty")
    }
}

impl CreateHeapData<BuiltinFunctionHeapData, BuiltinFunction> for Heap {
    fn create(&mut self, data: BuiltinFunctionHeapData) -> BuiltinFunction {
        self.builtin_functions.push(Some(data));
        BuiltinFunction(BuiltinFunctionIndex::last(&self.builtin_functions))
    }
}

/// Creates the backing object holding the function's "length" and "name"
/// properties.
fn function_create_backing_object(
    agent: &mut Agent,
    func: BuiltinFunction,
    prototype: Option<Object>,
) -> OrdinaryObject {
    let length_key = PropertyKey::String(agent.heap.builtin_strings.length);
    let name_key = PropertyKey::String(agent.heap.builtin_strings.name);
    let BuiltinFunctionHeapData {
        initial_name,
        length,
        ..
    } = agent[func];
    let mut data = ObjectHeapData::new(prototype, true);
    data.properties.set(
        length_key,
        ObjectEntry::Data {
            value: length.into(),
            writable: false,
            enumerable: false,
            configurable: true,
        },
    );
    data.properties.set(
        name_key,
        ObjectEntry::Data {
            value: initial_name.into(),
            writable: false,
            enumerable: false,
            configurable: true,
        },
    );
    let backing_object = agent.heap.create(data);
    agent[func].object_index = Some(backing_object);
    backing_object
}

impl InternalSlots for BuiltinFunction {
    const DEFAULT_PROTOTYPE: ProtoIntrinsics = ProtoIntrinsics::Function;

    #[inline(always)]
    fn get_backing_object(self, agent: &Agent) -> Option<OrdinaryObject> {
        agent[self].object_index
    }

    fn create_backing_object(self, agent: &mut Agent) -> OrdinaryObject {
        assert!(self.get_backing_object(agent).is_none());
        let prototype = self.internal_prototype(agent);
        function_create_backing_object(agent, self, prototype)
    }
}

impl InternalMethods for BuiltinFunction {
    fn internal_get_own_property(
        self,
        agent: &mut Agent,
        property_key: PropertyKey,
    ) -> JsResult<Option<PropertyDescriptor>> {
        let backing_object = self.get_or_create_backing_object(agent);
        backing_object.internal_get_own_property(agent, property_key)
    }

    /// Storing an object as a constructor's "prototype" turns that object
    /// into a shadowing terminator.
    fn internal_define_own_property(
        self,
        agent: &mut Agent,
        property_key: PropertyKey,
        property_descriptor: PropertyDescriptor,
    ) -> JsResult<bool> {
        let backing_object = self.get_or_create_backing_object(agent);
        let result =
            ordinary_define_own_property(agent, backing_object, property_key, property_descriptor);
        if result
            && self.is_constructor(agent)
            && property_key == PropertyKey::String(agent.heap.builtin_strings.prototype)
            && let Some(Ok(prototype)) = property_descriptor.value.map(Object::try_from)
        {
            mark_terminator(agent, prototype);
        }
        Ok(result)
    }

    fn internal_delete(self, agent: &mut Agent, property_key: PropertyKey) -> JsResult<bool> {
        let backing_object = self.get_or_create_backing_object(agent);
        backing_object.internal_delete(agent, property_key)
    }

    fn internal_own_property_keys(self, agent: &mut Agent) -> JsResult<Vec<PropertyKey>> {
        let backing_object = self.get_or_create_backing_object(agent);
        backing_object.internal_own_property_keys(agent)
    }
}

/// ### [10.3.3 BuiltinCallOrConstruct ( F, thisArgument, argumentsList, newTarget )](https://tc39.es/ecma262/#sec-builtincallorconstruct)
///
/// The abstract operation BuiltinCallOrConstruct takes arguments F (a built-in
/// function object), thisArgument (an ECMAScript language value or
/// uninitialized), argumentsList (a List of ECMAScript language values), and
/// newTarget (a constructor or undefined) and returns either a normal
/// completion containing an ECMAScript language value or a throw completion.
pub(crate) fn builtin_call_or_construct(
    agent: &mut Agent,
    f: BuiltinFunction,
    this_argument: Option<Value>,
    arguments_list: ArgumentsList,
    new_target: Option<Object>,
) -> JsResult<Value> {
    // 10. Let result be the Completion Record that is the result of evaluating
    //     F in a manner that conforms to the specification of F. If
    //     thisArgument is uninitialized, the this value is uninitialized;
    //     otherwise, thisArgument provides the this value. argumentsList
    //     provides the named parameters. newTarget provides the NewTarget
    //     value.
    let this_argument = this_argument.unwrap_or(Value::Undefined);
    match agent[f].behaviour {
        Behaviour::Regular(func) => {
            if new_target.is_some() {
                return Err(agent.throw_exception(ExceptionType::TypeError, "Not a constructor"));
            }
            func(agent, this_argument, arguments_list)
        }
        Behaviour::Constructor(func) => func(agent, this_argument, arguments_list, new_target),
    }
    // 12. Return ? result.
}

/// ### [10.3.4 CreateBuiltinFunction ( behaviour, length, name, additionalInternalSlotsList \[ , realm \[ , prototype \[ , prefix \] \] \] )](https://tc39.es/ecma262/#sec-createbuiltinfunction)
pub fn create_builtin_function(
    agent: &mut Agent,
    behaviour: Behaviour,
    args: BuiltinFunctionArgs,
) -> BuiltinFunction {
    // 11. If prefix is not present, then
    // a. Perform SetFunctionName(func, name).
    let initial_name = String::from_str(agent, args.name);

    // 5. Let func be a new built-in function object that, when called, performs the action
    //    described by behaviour using the provided arguments as the values of the corresponding
    //    parameters specified by behaviour.
    let func = agent.heap.create(BuiltinFunctionHeapData {
        behaviour,
        initial_name,
        length: args.length,
        object_index: None,
    });

    // 2. If prototype is not present, set prototype to realm.[[Intrinsics]].[[%Function.prototype%]].
    if let Some(prototype) = args.prototype {
        let function_prototype = agent
            .current_realm()
            .intrinsic(BuiltinFunction::DEFAULT_PROTOTYPE);
        if prototype != function_prototype {
            // 6. Set func.[[Prototype]] to prototype.
            // 7. Set func.[[Extensible]] to true.
            function_create_backing_object(agent, func, Some(prototype));
        }
    }

    // 13. Return func.
    func
}

/// ### [10.2.5 MakeConstructor ( F \[ , writablePrototype \[ , prototype \] \] )](https://tc39.es/ecma262/#sec-makeconstructor)
///
/// Installs the "prototype" property of a constructor. Without an explicit
/// prototype a fresh object inheriting from %Object.prototype% is created
/// and given a "constructor" back-link. The installed prototype becomes a
/// shadowing terminator.
pub fn make_constructor(
    agent: &mut Agent,
    f: BuiltinFunction,
    writable_prototype: Option<bool>,
    prototype: Option<Object>,
) -> JsResult<Object> {
    debug_assert!(f.is_constructor(agent));
    // 3. If writablePrototype is not present, set writablePrototype to true.
    let writable_prototype = writable_prototype.unwrap_or(true);
    // 4. If prototype is not present, then
    let prototype = match prototype {
        Some(prototype) => prototype,
        None => {
            // a. Set prototype to OrdinaryObjectCreate(%Object.prototype%).
            let object_prototype = agent.current_realm().intrinsic(ProtoIntrinsics::Object);
            let prototype: Object =
                ordinary_object_create_with_prototype(agent, Some(object_prototype)).into();
            // b. Perform ! DefinePropertyOrThrow(prototype, "constructor",
            //    PropertyDescriptor { [[Value]]: F, [[Writable]]: writablePrototype,
            //    [[Enumerable]]: false, [[Configurable]]: true }).
            let constructor_key = PropertyKey::String(agent.heap.builtin_strings.constructor);
            define_property_or_throw(
                agent,
                prototype,
                constructor_key,
                PropertyDescriptor {
                    value: Some(f.into()),
                    writable: Some(writable_prototype),
                    enumerable: Some(false),
                    configurable: Some(true),
                    ..Default::default()
                },
            )?;
            prototype
        }
    };
    // 5. Perform ! DefinePropertyOrThrow(F, "prototype", PropertyDescriptor {
    //    [[Value]]: prototype, [[Writable]]: writablePrototype,
    //    [[Enumerable]]: false, [[Configurable]]: false }).
    let prototype_key = PropertyKey::String(agent.heap.builtin_strings.prototype);
    define_property_or_throw(
        agent,
        f,
        prototype_key,
        PropertyDescriptor {
            value: Some(prototype.into()),
            writable: Some(writable_prototype),
            enumerable: Some(false),
            configurable: Some(false),
            ..Default::default()
        },
    )?;
    // 6. Return UNUSED.
    Ok(prototype)
}

impl HeapMarkAndSweep for BuiltinFunction {
    fn mark_values(&self, queues: &mut WorkQueues) {
        queues.builtin_functions.push(*self);
    }
}

impl HeapMarkAndSweep for BuiltinFunctionHeapData {
    fn mark_values(&self, queues: &mut WorkQueues) {
        let Self {
            behaviour: _,
            initial_name: _,
            length: _,
            object_index,
        } = self;
        object_index.mark_values(queues);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecmascript::{
        abstract_operations::operations_on_objects::{call_function, construct, get},
        builtins::shadow::marking::is_terminator,
        execution::Options,
    };

    fn add(_: &mut Agent, _: Value, arguments: ArgumentsList) -> JsResult<Value> {
        let a = arguments.get(0).as_number().unwrap_or(f64::NAN);
        let b = arguments.get(1).as_number().unwrap_or(f64::NAN);
        Ok((a + b).into())
    }

    fn point(
        agent: &mut Agent,
        this: Value,
        arguments: ArgumentsList,
        _: Option<Object>,
    ) -> JsResult<Value> {
        let this = Object::try_from(this)
            .map_err(|_| agent.throw_exception(ExceptionType::TypeError, "No this object"))?;
        let x = PropertyKey::from_str(agent, "x");
        this.internal_set(agent, x, arguments.get(0), this.into())?;
        Ok(Value::Undefined)
    }

    #[test]
    fn builtin_function_own_properties() {
        let mut agent = Agent::new(Options::default());
        let f = create_builtin_function(
            &mut agent,
            Behaviour::Regular(add),
            BuiltinFunctionArgs::new(2, "add"),
        );
        assert!(f.get_backing_object(&agent).is_none());
        let length = PropertyKey::from_str(&mut agent, "length");
        assert_eq!(get(&mut agent, f.into(), length).unwrap(), Value::from(2));
        assert_eq!(f.name(&agent), "add");
        assert_eq!(
            f.internal_prototype(&agent),
            Some(agent.current_realm().intrinsic(ProtoIntrinsics::Function))
        );
        let result = call_function(
            &mut agent,
            f.into(),
            Value::Undefined,
            Some(ArgumentsList::new(&[1.into(), 2.into()])),
        )
        .unwrap();
        assert_eq!(result, Value::from(3));
    }

    #[test]
    fn regular_functions_cannot_be_constructed() {
        let mut agent = Agent::new(Options::default());
        let f = create_builtin_function(
            &mut agent,
            Behaviour::Regular(add),
            BuiltinFunctionArgs::new(2, "add"),
        );
        let error = construct(&mut agent, f, None).unwrap_err();
        assert_eq!(error.kind(&agent), Some(ExceptionType::TypeError));
    }

    #[test]
    fn make_constructor_marks_prototype_as_terminator() {
        let mut agent = Agent::new(Options::default());
        let f = create_builtin_function(
            &mut agent,
            Behaviour::Constructor(point),
            BuiltinFunctionArgs::new(1, "Point"),
        );
        let prototype = make_constructor(&mut agent, f, None, None).unwrap();
        assert!(is_terminator(&agent, prototype));

        let instance = construct(&mut agent, f, Some(ArgumentsList::new(&[5.into()]))).unwrap();
        assert_eq!(instance.internal_prototype(&agent), Some(prototype));
        let x = PropertyKey::from_str(&mut agent, "x");
        assert_eq!(get(&mut agent, instance, x).unwrap(), Value::from(5));
    }
}
