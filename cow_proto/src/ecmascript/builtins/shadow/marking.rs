// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Per-object shadowing marks.
//!
//! An object participates in shadowing only if it is opted in and not opted
//! out. Terminators are delegation roots, such as the objects stored as a
//! constructor's "prototype": reads never shadow them. No mark can be
//! cleared once set.

use super::resolver::look_through;
use crate::ecmascript::{
    execution::Agent,
    types::{InternalSlots, Object, OrdinaryObject},
};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ShadowMarks {
    pub(crate) opt_in: bool,
    pub(crate) opt_out: bool,
    pub(crate) terminator: bool,
}

impl ShadowMarks {
    /// Marks of the realm's intrinsic template objects.
    pub(crate) const INTRINSIC: Self = Self {
        opt_in: false,
        opt_out: true,
        terminator: true,
    };

    /// Marks of a shadow copy: the copy participates unless its original
    /// was opted out, and it is never a terminator.
    pub(crate) const fn for_copy_of(original: Self) -> Self {
        Self {
            opt_in: true,
            opt_out: original.opt_out,
            terminator: false,
        }
    }

    pub const fn classify(self) -> ShadowClass {
        if self.opt_out {
            ShadowClass::Excluded
        } else if self.opt_in {
            ShadowClass::Participating
        } else {
            ShadowClass::Unmarked
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShadowClass {
    Participating,
    /// Opted out. Wins over an opt-in.
    Excluded,
    Unmarked,
}

/// The ordinary object carrying the marks of `object`. Shadow objects
/// resolve to the object they forward to.
fn marks_holder(agent: &Agent, object: Object) -> Option<OrdinaryObject> {
    match look_through(agent, object) {
        Object::Object(data) => Some(data),
        Object::BuiltinFunction(data) => data.get_backing_object(agent),
        Object::ShadowObject(_) => None,
    }
}

fn marks_holder_mut(agent: &mut Agent, object: Object) -> OrdinaryObject {
    let object = look_through(agent, object);
    match marks_holder(agent, object) {
        Some(holder) => holder,
        // Functions keep their marks on a lazily created backing object.
        None => object.get_or_create_backing_object(agent),
    }
}

pub fn get_marks(agent: &Agent, object: Object) -> ShadowMarks {
    marks_holder(agent, object)
        .map(|holder| agent[holder].marks)
        .unwrap_or_default()
}

pub fn classify(agent: &Agent, object: Object) -> ShadowClass {
    get_marks(agent, object).classify()
}

pub fn is_participating(agent: &Agent, object: Object) -> bool {
    classify(agent, object) == ShadowClass::Participating
}

pub fn is_terminator(agent: &Agent, object: Object) -> bool {
    get_marks(agent, object).terminator
}

/// Opts `object` in to shadowing.
pub fn mark_participating(agent: &mut Agent, object: Object) {
    let holder = marks_holder_mut(agent, object);
    agent[holder].marks.opt_in = true;
}

/// Opts `object` out of shadowing, regardless of any opt-in.
pub fn mark_excluded(agent: &mut Agent, object: Object) {
    let holder = marks_holder_mut(agent, object);
    agent[holder].marks.opt_out = true;
}

pub fn mark_terminator(agent: &mut Agent, object: Object) {
    let holder = marks_holder_mut(agent, object);
    agent[holder].marks.terminator = true;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecmascript::execution::{Options, ProtoIntrinsics};

    #[test]
    fn opt_out_wins() {
        let mut agent = Agent::new(Options::default());
        let object: Object = OrdinaryObject::create_empty_object(&mut agent).into();
        assert_eq!(classify(&agent, object), ShadowClass::Unmarked);
        mark_participating(&mut agent, object);
        assert!(is_participating(&agent, object));
        mark_excluded(&mut agent, object);
        assert_eq!(classify(&agent, object), ShadowClass::Excluded);
        mark_participating(&mut agent, object);
        assert!(!is_participating(&agent, object));
    }

    #[test]
    fn intrinsics_are_excluded_terminators() {
        let agent = Agent::new(Options::default());
        for intrinsic in [ProtoIntrinsics::Object, ProtoIntrinsics::Function] {
            let object = agent.current_realm().intrinsic(intrinsic);
            assert_eq!(classify(&agent, object), ShadowClass::Excluded);
            assert!(is_terminator(&agent, object));
        }
    }

    #[test]
    fn copies_inherit_opt_out_only() {
        let marks = ShadowMarks {
            opt_in: false,
            opt_out: true,
            terminator: true,
        };
        assert_eq!(
            ShadowMarks::for_copy_of(marks),
            ShadowMarks {
                opt_in: true,
                opt_out: true,
                terminator: false,
            }
        );
        assert_eq!(
            ShadowMarks::for_copy_of(ShadowMarks::default()).classify(),
            ShadowClass::Participating
        );
    }
}
