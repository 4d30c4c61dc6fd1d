// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

mod heap_bits;
mod heap_gc;
pub mod indexes;

pub(crate) use heap_bits::{HeapBits, HeapMarkAndSweep, WorkQueues};
pub use heap_gc::GcStats;
pub(crate) use heap_gc::heap_gc;

use self::indexes::StringIndex;
use crate::ecmascript::{
    builtins::{
        builtin_function::BuiltinFunctionHeapData, error::ErrorHeapData,
        shadow::{data::ShadowObjectHeapData, registry::ShadowRegistry},
    },
    types::{ObjectHeapData, String, StringHeapData},
};

/// Hash map keyed by heap handles or string data.
pub(crate) type AHashMap<K, V> = hashbrown::HashMap<K, V, ahash::RandomState>;

pub trait CreateHeapData<T, F> {
    /// Creates a heap handle from the given data. The data is always pushed
    /// into a fresh slot at the end of the matching arena.
    fn create(&mut self, data: T) -> F;
}

/// Strings interned at heap creation that the object model itself needs.
#[derive(Debug, Clone, Copy)]
pub(crate) struct BuiltinStrings {
    pub(crate) constructor: String,
    pub(crate) length: String,
    pub(crate) name: String,
    pub(crate) prototype: String,
}

#[derive(Debug)]
pub struct Heap {
    pub(crate) builtin_functions: Vec<Option<BuiltinFunctionHeapData>>,
    pub(crate) errors: Vec<Option<ErrorHeapData>>,
    pub(crate) objects: Vec<Option<ObjectHeapData>>,
    pub(crate) shadow_objects: Vec<Option<ShadowObjectHeapData>>,
    /// Interned string data. Strings are never collected.
    pub(crate) strings: Vec<Option<StringHeapData>>,
    string_lookup: AHashMap<Box<str>, String>,
    pub(crate) shadow_registry: ShadowRegistry,
    pub(crate) builtin_strings: BuiltinStrings,
}

fn intern_string(
    strings: &mut Vec<Option<StringHeapData>>,
    string_lookup: &mut AHashMap<Box<str>, String>,
    data: &str,
) -> String {
    if let Some(string) = string_lookup.get(data) {
        return *string;
    }
    strings.push(Some(StringHeapData {
        data: data.into(),
    }));
    let string = String(StringIndex::last(strings));
    string_lookup.insert(data.into(), string);
    string
}

impl Heap {
    pub fn new() -> Self {
        let mut strings = Vec::with_capacity(64);
        let mut string_lookup = AHashMap::default();
        let builtin_strings = BuiltinStrings {
            constructor: intern_string(&mut strings, &mut string_lookup, "constructor"),
            length: intern_string(&mut strings, &mut string_lookup, "length"),
            name: intern_string(&mut strings, &mut string_lookup, "name"),
            prototype: intern_string(&mut strings, &mut string_lookup, "prototype"),
        };
        Self {
            builtin_functions: Vec::with_capacity(64),
            errors: Vec::with_capacity(16),
            objects: Vec::with_capacity(1024),
            shadow_objects: Vec::with_capacity(256),
            strings,
            string_lookup,
            shadow_registry: ShadowRegistry::default(),
            builtin_strings,
        }
    }

    /// Returns the interned string for `data`, allocating it on first use.
    pub(crate) fn intern_string(&mut self, data: &str) -> String {
        intern_string(&mut self.strings, &mut self.string_lookup, data)
    }
}

impl Default for Heap {
    fn default() -> Self {
        Self::new()
    }
}
