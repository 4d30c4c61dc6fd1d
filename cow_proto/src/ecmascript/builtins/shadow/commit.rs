// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use tracing::{debug, trace};

use super::{
    ShadowObject,
    data::{ShadowNodeRecord, ShadowObjectHeapData},
};
use crate::ecmascript::{
    abstract_operations::operations_on_objects::define_property_or_throw,
    execution::{Agent, JsResult},
    types::{InternalMethods, Object, PropertyDescriptor, Value},
};

/// Materializes a pending node after a successful mutation of its copy.
///
/// Walks from the node toward the owner: each node is detached and
/// installed into its parent's copy, until a committed parent or the owner
/// itself receives it. Nodes that are no longer pending are left alone.
///
/// If a node turns out to be detached from its holder, the walk stops there
/// and the ancestors above it stay pending and registered. They commit on
/// their own next successful mutation.
pub(crate) fn commit(agent: &mut Agent, node: ShadowObject) -> JsResult<()> {
    let path = match &agent[node] {
        ShadowObjectHeapData::Pending(record) => record.path.clone(),
        _ => return Ok(()),
    };
    // Nearest ancestor first.
    let mut ancestors = path.iter().rev().copied();
    let mut current = node;
    loop {
        let Some(record) = detach(agent, current) else {
            return Ok(());
        };
        let depth = record.depth();
        let Some(parent) = ancestors.next() else {
            // Top level: install the node on the owner.
            let installed = materialize(agent, record.owner, current, &record)?;
            debug!(
                owner = ?record.owner,
                key = %record.property_key.as_display(agent),
                installed,
                "committed shadow copy onto owner"
            );
            return Ok(());
        };
        let (holder, parent_pending) = match &agent[parent] {
            ShadowObjectHeapData::Pending(parent_record) => (parent_record.copy, true),
            ShadowObjectHeapData::Committed { copy, .. } => (*copy, false),
            ShadowObjectHeapData::Delegation { .. } => return Ok(()),
        };
        if !materialize(agent, holder.into(), current, &record)? {
            let pending_ancestors = record
                .path
                .iter()
                .filter(|ancestor| ancestor.is_pending(agent))
                .count();
            trace!(
                key = %record.property_key.as_display(agent),
                depth,
                pending_ancestors,
                "shadow node detached from its parent"
            );
            return Ok(());
        }
        trace!(
            key = %record.property_key.as_display(agent),
            depth,
            "materialized shadow copy into parent"
        );
        if !parent_pending {
            return Ok(());
        }
        current = parent;
    }
}

/// Turns a pending node into a committed handle and unregisters it.
/// Returns `None` if the node was not pending.
fn detach(agent: &mut Agent, node: ShadowObject) -> Option<ShadowNodeRecord> {
    let committed = match &agent[node] {
        ShadowObjectHeapData::Pending(record) => ShadowObjectHeapData::Committed {
            original: record.original,
            copy: record.copy,
            owner: record.owner,
            root: record.root,
        },
        _ => return None,
    };
    let ShadowObjectHeapData::Pending(record) = std::mem::replace(&mut agent[node], committed)
    else {
        return None;
    };
    agent
        .heap
        .shadow_registry
        .unregister(record.root, record.original);
    Some(record)
}

/// Stores the committed node under its key on `holder`.
///
/// The node is installed rather than its bare copy, so reads through it keep
/// shadowing the objects the copy still shares with the original.
///
/// The slot is taken over only while it still refers to the original
/// object or to the node itself. A missing property is created with the
/// attributes of the resolved descriptor. Any other value means the node
/// was detached in the meantime and nothing is written.
fn materialize(
    agent: &mut Agent,
    holder: Object,
    node: ShadowObject,
    record: &ShadowNodeRecord,
) -> JsResult<bool> {
    let installed = Value::ShadowObject(node);
    let descriptor = match holder.internal_get_own_property(agent, record.property_key)? {
        None => record.descriptor.with_data_value(installed),
        Some(current)
            if current.value == Some(Value::Object(record.original))
                || current.value == Some(Value::ShadowObject(node)) =>
        {
            PropertyDescriptor {
                value: Some(installed),
                ..Default::default()
            }
        }
        Some(_) => return Ok(false),
    };
    define_property_or_throw(agent, holder, record.property_key, descriptor)?;
    Ok(true)
}
