// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use super::{Object, PropertyStorage};
use crate::{
    ecmascript::builtins::shadow::marking::ShadowMarks,
    heap::{HeapMarkAndSweep, WorkQueues},
};

#[derive(Debug, Clone)]
pub struct ObjectHeapData {
    /// \[\[Extensible]]
    pub(crate) extensible: bool,
    /// \[\[Prototype]]
    pub(crate) prototype: Option<Object>,
    pub(crate) marks: ShadowMarks,
    /// Set by `make_safe`. Relinking a guarded object wraps its new
    /// prototype again.
    pub(crate) guarded: bool,
    pub(crate) properties: PropertyStorage,
}

impl ObjectHeapData {
    pub(crate) fn new(prototype: Option<Object>, extensible: bool) -> Self {
        Self {
            extensible,
            prototype,
            marks: ShadowMarks::default(),
            guarded: false,
            properties: PropertyStorage::default(),
        }
    }
}

impl HeapMarkAndSweep for ObjectHeapData {
    fn mark_values(&self, queues: &mut WorkQueues) {
        let Self {
            extensible: _,
            prototype,
            marks: _,
            guarded: _,
            properties,
        } = self;
        prototype.mark_values(queues);
        properties.mark_values(queues);
    }
}
