// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::{
    ecmascript::{
        builtins::shadow::marking::ShadowMarks,
        types::{Object, ObjectHeapData, OrdinaryObject},
    },
    heap::{CreateHeapData, Heap, HeapMarkAndSweep, WorkQueues},
};

/// Enumeration of intrinsics intended to be used as the \[\[Prototype]] value
/// of an object. Used in GetPrototypeFromConstructor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProtoIntrinsics {
    Function,
    Object,
}

/// ### [9.3 Realms](https://tc39.es/ecma262/#sec-code-realms)
#[derive(Debug, Clone)]
pub struct Realm {
    /// %Object.prototype%
    object_prototype: OrdinaryObject,
    /// %Function.prototype%
    function_prototype: OrdinaryObject,
}

impl Realm {
    /// ### [9.3.2 CreateIntrinsics ( realmRec )](https://tc39.es/ecma262/#sec-createintrinsics)
    ///
    /// The intrinsic templates are shared by every object in the realm and
    /// never take part in shadowing.
    pub(crate) fn create(heap: &mut Heap) -> Self {
        let mut object_prototype_data = ObjectHeapData::new(None, true);
        object_prototype_data.marks = ShadowMarks::INTRINSIC;
        let object_prototype: OrdinaryObject = heap.create(object_prototype_data);

        let mut function_prototype_data = ObjectHeapData::new(Some(object_prototype.into()), true);
        function_prototype_data.marks = ShadowMarks::INTRINSIC;
        let function_prototype: OrdinaryObject = heap.create(function_prototype_data);

        Self {
            object_prototype,
            function_prototype,
        }
    }

    pub fn intrinsic(&self, intrinsic: ProtoIntrinsics) -> Object {
        match intrinsic {
            ProtoIntrinsics::Function => self.function_prototype.into(),
            ProtoIntrinsics::Object => self.object_prototype.into(),
        }
    }

    /// %Object.prototype%
    pub fn object_prototype(&self) -> OrdinaryObject {
        self.object_prototype
    }

    /// %Function.prototype%
    pub fn function_prototype(&self) -> OrdinaryObject {
        self.function_prototype
    }
}

impl HeapMarkAndSweep for Realm {
    fn mark_values(&self, queues: &mut WorkQueues) {
        let Self {
            object_prototype,
            function_prototype,
        } = self;
        object_prototype.mark_values(queues);
        function_prototype.mark_values(queues);
    }
}
