// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! ## [7.2 Testing and Comparison Operations](https://tc39.es/ecma262/#sec-testing-and-comparison-operations)

use crate::ecmascript::{execution::Agent, types::Value};

/// ### [7.2.3 IsCallable ( argument )](https://tc39.es/ecma262/#sec-iscallable)
///
/// The abstract operation IsCallable takes argument argument (an ECMAScript
/// language value) and returns a Boolean. It determines if argument is a
/// callable function with a \[\[Call]] internal method.
pub fn is_callable(argument: Value) -> bool {
    // 1. If argument is not an Object, return false.
    // 2. If argument has a [[Call]] internal method, return true.
    // 3. Return false.
    matches!(argument, Value::BuiltinFunction(_))
}

/// ### [7.2.4 IsConstructor ( argument )](https://tc39.es/ecma262/#sec-isconstructor)
pub fn is_constructor(agent: &Agent, argument: Value) -> bool {
    // 1. If argument is not an Object, return false.
    // 2. If argument has a [[Construct]] internal method, return true.
    // 3. Return false.
    match argument {
        Value::BuiltinFunction(function) => function.is_constructor(agent),
        _ => false,
    }
}

/// ### [7.2.10 SameValue ( x, y )](https://tc39.es/ecma262/#sec-samevalue)
///
/// Handles compare by identity; numbers treat NaN as equal to itself and
/// distinguish +0 from -0.
pub fn same_value(x: Value, y: Value) -> bool {
    match (x, y) {
        // 2. If x is a Number, then
        //    a. Return Number::sameValue(x, y).
        (Value::Number(x), Value::Number(y)) => {
            if x.is_nan() && y.is_nan() {
                true
            } else {
                x == y && x.is_sign_negative() == y.is_sign_negative()
            }
        }
        // 3. Return SameValueNonNumber(x, y).
        _ => x == y,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_value_numbers() {
        assert!(same_value(f64::NAN.into(), f64::NAN.into()));
        assert!(!same_value(0.0.into(), (-0.0).into()));
        assert!(same_value(1.into(), 1.0.into()));
        assert!(!same_value(Value::Null, Value::Undefined));
    }

    #[test]
    fn only_functions_are_callable() {
        use crate::ecmascript::{
            builtins::{ArgumentsList, Behaviour, BuiltinFunctionArgs, create_builtin_function},
            execution::{JsResult, Options},
            types::OrdinaryObject,
        };

        fn noop(_: &mut Agent, _: Value, _: ArgumentsList) -> JsResult<Value> {
            Ok(Value::Undefined)
        }

        let mut agent = Agent::new(Options::default());
        let function = create_builtin_function(
            &mut agent,
            Behaviour::Regular(noop),
            BuiltinFunctionArgs::new(0, "noop"),
        );
        let object = OrdinaryObject::create_empty_object(&mut agent);
        assert!(is_callable(function.into()));
        assert!(!is_constructor(&agent, function.into()));
        assert!(!is_callable(object.into()));
        assert!(!is_constructor(&agent, Value::Null));
    }
}
