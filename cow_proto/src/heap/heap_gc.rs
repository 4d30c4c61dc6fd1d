// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use tracing::debug;

use super::{
    Heap,
    heap_bits::{HeapBits, HeapMarkAndSweep, WorkQueues, sweep_heap_vector_values},
};
use crate::ecmascript::{
    builtins::{builtin_function::BuiltinFunction, error::Error, shadow::ShadowObject},
    execution::Agent,
    types::{OrdinaryObject, Value},
};

/// Number of slots emptied by one collection, per arena.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct GcStats {
    pub objects: usize,
    pub shadows: usize,
    pub functions: usize,
    pub errors: usize,
}

/// Marks from `roots` and the realm intrinsics, then sweeps every arena.
///
/// Slots are emptied in place and never reused, so surviving handles stay
/// valid. The shadow registry holds its entries weakly: it is not traced,
/// and entries naming a swept root, original or node are pruned afterwards.
pub(crate) fn heap_gc(agent: &mut Agent, roots: &[Value]) -> GcStats {
    let mut bits = HeapBits::new(&agent.heap);
    let mut queues = WorkQueues::new(&agent.heap);

    agent.current_realm().mark_values(&mut queues);
    roots.mark_values(&mut queues);

    let Heap {
        builtin_functions,
        errors,
        objects,
        shadow_objects,
        ..
    } = &agent.heap;

    while !queues.is_empty() {
        let mut object_marks: Box<[OrdinaryObject]> = queues.objects.drain(..).collect();
        object_marks.sort();
        object_marks.iter().for_each(|&idx| {
            let index = idx.get_index();
            if let Some(marked) = bits.objects.get_mut(index) {
                if *marked {
                    // Already marked, ignore
                    return;
                }
                *marked = true;
                objects.get(index).mark_values(&mut queues);
            }
        });
        let mut builtin_function_marks: Box<[BuiltinFunction]> =
            queues.builtin_functions.drain(..).collect();
        builtin_function_marks.sort();
        builtin_function_marks.iter().for_each(|&idx| {
            let index = idx.get_index();
            if let Some(marked) = bits.builtin_functions.get_mut(index) {
                if *marked {
                    // Already marked, ignore
                    return;
                }
                *marked = true;
                builtin_functions.get(index).mark_values(&mut queues);
            }
        });
        let mut shadow_object_marks: Box<[ShadowObject]> =
            queues.shadow_objects.drain(..).collect();
        shadow_object_marks.sort();
        shadow_object_marks.iter().for_each(|&idx| {
            let index = idx.get_index();
            if let Some(marked) = bits.shadow_objects.get_mut(index) {
                if *marked {
                    // Already marked, ignore
                    return;
                }
                *marked = true;
                shadow_objects.get(index).mark_values(&mut queues);
            }
        });
        let mut error_marks: Box<[Error]> = queues.errors.drain(..).collect();
        error_marks.sort();
        error_marks.iter().for_each(|&idx| {
            let index = idx.get_index();
            if let Some(marked) = bits.errors.get_mut(index) {
                if *marked {
                    // Already marked, ignore
                    return;
                }
                *marked = true;
                errors.get(index).mark_values(&mut queues);
            }
        });
    }

    let heap = &mut agent.heap;
    let stats = GcStats {
        objects: sweep_heap_vector_values(&mut heap.objects, &bits.objects),
        shadows: sweep_heap_vector_values(&mut heap.shadow_objects, &bits.shadow_objects),
        functions: sweep_heap_vector_values(&mut heap.builtin_functions, &bits.builtin_functions),
        errors: sweep_heap_vector_values(&mut heap.errors, &bits.errors),
    };
    let pruned = heap.shadow_registry.prune(&bits);
    debug!(
        objects = stats.objects,
        shadows = stats.shadows,
        functions = stats.functions,
        errors = stats.errors,
        registry_entries = pruned,
        "garbage collection finished"
    );
    stats
}
