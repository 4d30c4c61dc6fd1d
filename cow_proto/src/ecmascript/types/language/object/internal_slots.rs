// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use super::{Object, OrdinaryObject};
use crate::ecmascript::execution::{Agent, ProtoIntrinsics};

/// Internal slots shared by every object.
///
/// Objects that are not plain ordinary objects keep their ordinary object
/// business in a lazily created backing object. Until the backing object
/// exists, the object is extensible and its prototype is the intrinsic named
/// by `DEFAULT_PROTOTYPE`.
pub trait InternalSlots
where
    Self: Sized + Copy + Into<Object>,
{
    const DEFAULT_PROTOTYPE: ProtoIntrinsics;

    fn get_backing_object(self, agent: &Agent) -> Option<OrdinaryObject>;

    fn create_backing_object(self, agent: &mut Agent) -> OrdinaryObject;

    fn get_or_create_backing_object(self, agent: &mut Agent) -> OrdinaryObject {
        match self.get_backing_object(agent) {
            Some(backing_object) => backing_object,
            None => self.create_backing_object(agent),
        }
    }

    /// \[\[Extensible]]
    fn internal_extensible(self, agent: &Agent) -> bool {
        self.get_backing_object(agent)
            .map_or(true, |backing_object| backing_object.internal_extensible(agent))
    }

    fn internal_set_extensible(self, agent: &mut Agent, value: bool) {
        let backing_object = self.get_or_create_backing_object(agent);
        backing_object.internal_set_extensible(agent, value);
    }

    /// \[\[Prototype]]
    fn internal_prototype(self, agent: &Agent) -> Option<Object> {
        match self.get_backing_object(agent) {
            Some(backing_object) => backing_object.internal_prototype(agent),
            None => Some(agent.current_realm().intrinsic(Self::DEFAULT_PROTOTYPE)),
        }
    }

    fn internal_set_prototype(self, agent: &mut Agent, prototype: Option<Object>) {
        let backing_object = self.get_or_create_backing_object(agent);
        backing_object.internal_set_prototype(agent, prototype);
    }
}
