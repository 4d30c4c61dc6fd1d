// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use cow_proto::ecmascript::{
    abstract_operations::operations_on_objects::{
        create_data_property_or_throw, get, has_own_property, set,
    },
    builtins::{make_safe, shadow::marking::mark_participating},
    execution::{Agent, Options},
    types::{Object, OrdinaryObject, PropertyKey, Value},
};
use proptest::prelude::*;

const MAX_DEPTH: usize = 4;
const MAX_INSTANCES: usize = 4;

struct Template {
    agent: Agent,
    /// Original object at each level, top level first.
    levels: Vec<Object>,
    instances: Vec<Object>,
    links: Vec<PropertyKey>,
    value: PropertyKey,
}

/// `prototype.l0.l1...` nested `depth` levels deep, every level holding
/// `v: 0`, and `instances` guarded instances of it.
fn template(depth: usize, instances: usize) -> Template {
    let mut agent = Agent::new(Options::default());
    let value = PropertyKey::from_str(&mut agent, "v");
    let links: Vec<PropertyKey> = (0..depth)
        .map(|level| PropertyKey::from_str(&mut agent, &format!("l{level}")))
        .collect();
    let prototype: Object = OrdinaryObject::create_empty_object(&mut agent).into();
    let mut levels = vec![];
    let mut parent = prototype;
    for &link in &links {
        let level: Object = OrdinaryObject::create_empty_object(&mut agent).into();
        create_data_property_or_throw(&mut agent, level, value, 0.into()).unwrap();
        create_data_property_or_throw(&mut agent, parent, link, level.into()).unwrap();
        levels.push(level);
        parent = level;
    }
    mark_participating(&mut agent, prototype);
    let instances = (0..instances)
        .map(|_| {
            let instance =
                OrdinaryObject::create_object_with_prototype(&mut agent, Some(prototype));
            make_safe(&mut agent, instance.into()).unwrap()
        })
        .collect();
    Template {
        agent,
        levels,
        instances,
        links,
        value,
    }
}

/// Reads down from `instance` to the object at `depth`.
fn walk(agent: &mut Agent, instance: Object, links: &[PropertyKey], depth: usize) -> Object {
    let mut current = instance;
    for &link in &links[..=depth] {
        current = Object::try_from(get(agent, current, link).unwrap()).unwrap();
    }
    current
}

proptest! {
    #[test]
    fn prop_writes_stay_with_their_instance(
        depth in 1..=MAX_DEPTH,
        instance_count in 1..=MAX_INSTANCES,
        writes in prop::collection::vec((0..MAX_INSTANCES, 0..MAX_DEPTH, -100i32..100), 0..24),
    ) {
        let Template { mut agent, levels, instances, links, value } =
            template(depth, instance_count);
        let mut expected = vec![vec![0i32; depth]; instance_count];

        for (instance, level, number) in writes {
            let instance = instance % instance_count;
            let level = level % depth;
            let target = walk(&mut agent, instances[instance], &links, level);
            set(&mut agent, target, value, number.into(), true).unwrap();
            expected[instance][level] = number;
        }

        for (instance, expected) in instances.iter().zip(&expected) {
            for (level, &number) in expected.iter().enumerate() {
                let target = walk(&mut agent, *instance, &links, level);
                prop_assert_eq!(get(&mut agent, target, value).unwrap(), Value::from(number));
            }
        }
        for level in levels {
            prop_assert_eq!(get(&mut agent, level, value).unwrap(), Value::from(0));
        }
        prop_assert!(agent.pending_shadow_nodes() <= depth * instance_count);
    }

    #[test]
    fn prop_reads_never_commit(
        depth in 1..=MAX_DEPTH,
        reads in prop::collection::vec((0..MAX_INSTANCES, 0..MAX_DEPTH), 0..24),
    ) {
        let Template { mut agent, instances, links, .. } = template(depth, MAX_INSTANCES);
        let mut first_seen = vec![vec![None; depth]; MAX_INSTANCES];
        for (instance, level) in reads {
            let level = level % depth;
            let node = walk(&mut agent, instances[instance], &links, level);
            prop_assert!(node.is_shadow_object());
            let seen = first_seen[instance][level].get_or_insert(node);
            prop_assert_eq!(*seen, node);
        }
        for instance in instances {
            for &link in &links {
                prop_assert!(!has_own_property(&mut agent, instance, link).unwrap());
            }
        }
    }
}

