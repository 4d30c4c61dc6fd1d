// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use super::ShadowObject;
use crate::{
    ecmascript::types::{Object, OrdinaryObject},
    heap::{AHashMap, HeapBits},
};

/// Live shadow nodes and delegation wrappers, keyed by identity.
///
/// The registry holds its entries weakly: the garbage collector does not
/// trace it, and [`ShadowRegistry::prune`] drops entries naming collected
/// slots.
#[derive(Debug, Default)]
pub(crate) struct ShadowRegistry {
    /// (traversal root, original) -> pending node. At most one pending node
    /// exists per pair.
    nodes: AHashMap<(ShadowObject, OrdinaryObject), ShadowObject>,
    /// (instance, delegation target) -> delegation wrapper.
    delegations: AHashMap<(Object, Object), ShadowObject>,
}

impl ShadowRegistry {
    pub(crate) fn get(&self, root: ShadowObject, original: OrdinaryObject) -> Option<ShadowObject> {
        self.nodes.get(&(root, original)).copied()
    }

    pub(crate) fn register(
        &mut self,
        root: ShadowObject,
        original: OrdinaryObject,
        node: ShadowObject,
    ) {
        let previous = self.nodes.insert((root, original), node);
        debug_assert!(previous.is_none(), "a pending node was registered twice");
    }

    pub(crate) fn unregister(&mut self, root: ShadowObject, original: OrdinaryObject) {
        self.nodes.remove(&(root, original));
    }

    pub(crate) fn get_delegation(&self, owner: Object, target: Object) -> Option<ShadowObject> {
        self.delegations.get(&(owner, target)).copied()
    }

    pub(crate) fn register_delegation(
        &mut self,
        owner: Object,
        target: Object,
        wrapper: ShadowObject,
    ) {
        self.delegations.insert((owner, target), wrapper);
    }

    /// Number of pending nodes.
    pub(crate) fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Drops every entry naming a slot that was not marked. Returns the
    /// number of entries dropped.
    pub(crate) fn prune(&mut self, bits: &HeapBits) -> usize {
        let before = self.nodes.len() + self.delegations.len();
        self.nodes.retain(|&(root, original), node| {
            bits.is_shadow_marked(root)
                && bits.is_object_marked(original)
                && bits.is_shadow_marked(*node)
        });
        self.delegations.retain(|&(owner, target), wrapper| {
            bits.is_marked(owner) && bits.is_marked(target) && bits.is_shadow_marked(*wrapper)
        });
        before - (self.nodes.len() + self.delegations.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::heap::indexes::{ObjectIndex, ShadowObjectIndex};

    #[test]
    fn one_node_per_root_and_original() {
        let mut registry = ShadowRegistry::default();
        let root_a = ShadowObject(ShadowObjectIndex::from_index(0));
        let root_b = ShadowObject(ShadowObjectIndex::from_index(1));
        let node = ShadowObject(ShadowObjectIndex::from_index(2));
        let original = OrdinaryObject(ObjectIndex::from_index(0));
        registry.register(root_a, original, node);
        assert_eq!(registry.get(root_a, original), Some(node));
        assert_eq!(registry.get(root_b, original), None);
        registry.unregister(root_a, original);
        assert_eq!(registry.get(root_a, original), None);
        assert_eq!(registry.len(), 0);
    }
}
