// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use super::Heap;
use crate::ecmascript::{
    builtins::{builtin_function::BuiltinFunction, error::Error, shadow::ShadowObject},
    types::{Object, OrdinaryObject, Value},
};

/// Mark bits of one collection, one per arena slot.
#[derive(Debug)]
pub(crate) struct HeapBits {
    pub(crate) builtin_functions: Box<[bool]>,
    pub(crate) errors: Box<[bool]>,
    pub(crate) objects: Box<[bool]>,
    pub(crate) shadow_objects: Box<[bool]>,
}

#[derive(Debug)]
pub(crate) struct WorkQueues {
    pub(crate) builtin_functions: Vec<BuiltinFunction>,
    pub(crate) errors: Vec<Error>,
    pub(crate) objects: Vec<OrdinaryObject>,
    pub(crate) shadow_objects: Vec<ShadowObject>,
}

impl HeapBits {
    pub(crate) fn new(heap: &Heap) -> Self {
        Self {
            builtin_functions: vec![false; heap.builtin_functions.len()].into_boxed_slice(),
            errors: vec![false; heap.errors.len()].into_boxed_slice(),
            objects: vec![false; heap.objects.len()].into_boxed_slice(),
            shadow_objects: vec![false; heap.shadow_objects.len()].into_boxed_slice(),
        }
    }

    pub(crate) fn is_object_marked(&self, object: OrdinaryObject) -> bool {
        self.objects
            .get(object.get_index())
            .copied()
            .unwrap_or(false)
    }

    pub(crate) fn is_shadow_marked(&self, shadow: ShadowObject) -> bool {
        self.shadow_objects
            .get(shadow.get_index())
            .copied()
            .unwrap_or(false)
    }

    pub(crate) fn is_marked(&self, object: Object) -> bool {
        match object {
            Object::Object(data) => self.is_object_marked(data),
            Object::BuiltinFunction(data) => self
                .builtin_functions
                .get(data.get_index())
                .copied()
                .unwrap_or(false),
            Object::ShadowObject(data) => self.is_shadow_marked(data),
        }
    }
}

impl WorkQueues {
    pub(crate) fn new(heap: &Heap) -> Self {
        Self {
            builtin_functions: Vec::with_capacity(heap.builtin_functions.len() / 4),
            errors: Vec::with_capacity(heap.errors.len() / 4),
            objects: Vec::with_capacity(heap.objects.len() / 4),
            shadow_objects: Vec::with_capacity(heap.shadow_objects.len() / 4),
        }
    }

    pub(crate) fn push_value(&mut self, value: Value) {
        match value {
            Value::Undefined
            | Value::Null
            | Value::Boolean(_)
            | Value::Number(_)
            // Strings are interned and never collected.
            | Value::String(_) => {}
            Value::Error(data) => self.errors.push(data),
            Value::Object(data) => self.objects.push(data),
            Value::BuiltinFunction(data) => self.builtin_functions.push(data),
            Value::ShadowObject(data) => self.shadow_objects.push(data),
        }
    }

    pub(crate) fn is_empty(&self) -> bool {
        let Self {
            builtin_functions,
            errors,
            objects,
            shadow_objects,
        } = self;
        builtin_functions.is_empty()
            && errors.is_empty()
            && objects.is_empty()
            && shadow_objects.is_empty()
    }
}

pub(crate) trait HeapMarkAndSweep {
    /// Pushes every heap handle held by `self` onto the work queues.
    fn mark_values(&self, queues: &mut WorkQueues);
}

impl<T> HeapMarkAndSweep for &T
where
    T: HeapMarkAndSweep,
{
    fn mark_values(&self, queues: &mut WorkQueues) {
        (*self).mark_values(queues);
    }
}

impl<T> HeapMarkAndSweep for Option<T>
where
    T: HeapMarkAndSweep,
{
    fn mark_values(&self, queues: &mut WorkQueues) {
        if let Some(content) = self {
            content.mark_values(queues);
        }
    }
}

impl<T> HeapMarkAndSweep for [T]
where
    T: HeapMarkAndSweep,
{
    fn mark_values(&self, queues: &mut WorkQueues) {
        self.iter().for_each(|entry| entry.mark_values(queues));
    }
}

impl HeapMarkAndSweep for Value {
    fn mark_values(&self, queues: &mut WorkQueues) {
        queues.push_value(*self);
    }
}

/// Empties every slot of `vec` whose mark bit is not set. Returns the number
/// of slots emptied.
pub(crate) fn sweep_heap_vector_values<T>(vec: &mut [Option<T>], bits: &[bool]) -> usize {
    assert_eq!(vec.len(), bits.len());
    let mut freed = 0;
    vec.iter_mut().zip(bits).for_each(|(slot, &marked)| {
        if !marked && slot.is_some() {
            *slot = None;
            freed += 1;
        }
    });
    freed
}
