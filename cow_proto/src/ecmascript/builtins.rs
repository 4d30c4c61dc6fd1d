// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! ## [10 Ordinary and Exotic Objects Behaviours](https://tc39.es/ecma262/#sec-ordinary-and-exotic-objects-behaviours)
//!
//! This module contains the ordinary object algorithms, the builtin function
//! objects used as accessors and constructors, and the shadow objects that
//! implement copy-on-write prototypes.

pub mod builtin_function;
pub mod error;
pub mod ordinary;
pub mod shadow;

pub use builtin_function::{
    ArgumentsList, Behaviour, BuiltinFunction, BuiltinFunctionArgs, ConstructorFn, RegularFn,
    create_builtin_function, make_constructor,
};
pub use error::Error;
pub use shadow::{ShadowObject, make_safe};
