// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use tracing::trace;

use super::{ShadowObject, marking::ShadowMarks};
use crate::{
    ecmascript::{
        execution::Agent,
        types::{Object, ObjectHeapData, OrdinaryObject, PropertyDescriptor, PropertyKey},
    },
    heap::{CreateHeapData, HeapMarkAndSweep, WorkQueues},
};

#[derive(Debug, Clone)]
pub enum ShadowObjectHeapData {
    /// Wraps the delegation target of a guarded instance.
    Delegation {
        target: Object,
        /// The instance whose \[\[Prototype]] slot holds this wrapper.
        owner: Object,
    },
    /// A shallow copy staged for a pending write.
    Pending(ShadowNodeRecord),
    /// The handle has been installed on its holder and forwards every
    /// operation to the copy. Reads keep shadowing the objects the copy
    /// still shares with `original`.
    Committed {
        original: OrdinaryObject,
        copy: OrdinaryObject,
        owner: Object,
        root: ShadowObject,
    },
}

/// Bookkeeping of a pending shadow node.
#[derive(Debug, Clone)]
pub struct ShadowNodeRecord {
    /// The object that was copied.
    pub(crate) original: OrdinaryObject,
    /// Shallow copy of `original`. Mutations land here.
    pub(crate) copy: OrdinaryObject,
    /// The instance on whose behalf the copy exists.
    pub(crate) owner: Object,
    /// The delegation wrapper the traversal started from.
    pub(crate) root: ShadowObject,
    /// Ancestor nodes, top level first. Empty for a top-level node. Below a
    /// committed node the path starts at that node.
    pub(crate) path: Box<[ShadowObject]>,
    /// Key under which the node hangs off its parent, or off the owner for
    /// a top-level node.
    pub(crate) property_key: PropertyKey,
    /// The property's descriptor as resolved when the node was created. Its
    /// attributes are used if the commit has to create the property.
    pub(crate) descriptor: PropertyDescriptor,
}

impl ShadowNodeRecord {
    /// Distance from the first node on the path: 1 for a top-level node.
    pub(crate) fn depth(&self) -> usize {
        self.path.len() + 1
    }
}

/// Copies every own property of `original`, enumerable or not, into a fresh
/// ordinary object with the same prototype and extensibility.
pub(crate) fn shallow_copy(agent: &mut Agent, original: OrdinaryObject) -> OrdinaryObject {
    let ObjectHeapData {
        extensible,
        prototype,
        marks,
        guarded: _,
        properties,
    } = &agent[original];
    let mut data = ObjectHeapData::new(*prototype, *extensible);
    data.marks = ShadowMarks::for_copy_of(*marks);
    data.properties = properties.clone();
    agent.heap.create(data)
}

/// Creates and registers a pending node shadowing `original`.
pub(crate) fn create_shadow_node(
    agent: &mut Agent,
    root: ShadowObject,
    owner: Object,
    path: Box<[ShadowObject]>,
    original: OrdinaryObject,
    property_key: PropertyKey,
    descriptor: PropertyDescriptor,
) -> ShadowObject {
    let copy = shallow_copy(agent, original);
    let record = ShadowNodeRecord {
        original,
        copy,
        owner,
        root,
        path,
        property_key,
        descriptor,
    };
    let depth = record.depth();
    let node: ShadowObject = agent.heap.create(ShadowObjectHeapData::Pending(record));
    agent
        .heap
        .shadow_registry
        .register(root, original, node);
    trace!(
        ?node,
        ?original,
        key = %property_key.as_display(agent),
        depth,
        "created shadow node"
    );
    node
}

impl HeapMarkAndSweep for ShadowNodeRecord {
    fn mark_values(&self, queues: &mut WorkQueues) {
        let Self {
            original,
            copy,
            owner,
            root,
            path,
            property_key: _,
            descriptor,
        } = self;
        original.mark_values(queues);
        copy.mark_values(queues);
        owner.mark_values(queues);
        root.mark_values(queues);
        path.iter().for_each(|node| node.mark_values(queues));
        descriptor.mark_values(queues);
    }
}

impl HeapMarkAndSweep for ShadowObjectHeapData {
    fn mark_values(&self, queues: &mut WorkQueues) {
        match self {
            Self::Delegation { target, owner } => {
                target.mark_values(queues);
                owner.mark_values(queues);
            }
            Self::Pending(record) => record.mark_values(queues),
            Self::Committed {
                original,
                copy,
                owner,
                root,
            } => {
                original.mark_values(queues);
                copy.mark_values(queues);
                owner.mark_values(queues);
                root.mark_values(queues);
            }
        }
    }
}
