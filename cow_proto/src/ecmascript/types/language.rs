// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
mod object;
mod string;
mod value;

pub use object::{
    DisplayablePropertyKey, InternalMethods, InternalSlots, Object, OrdinaryObject, PropertyKey,
};
pub(crate) use object::{ObjectEntry, ObjectHeapData, PropertyStorage};
pub use string::String;
pub(crate) use string::StringHeapData;
pub use value::Value;
