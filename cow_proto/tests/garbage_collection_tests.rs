// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use cow_proto::ecmascript::{
    abstract_operations::operations_on_objects::{create_data_property_or_throw, get, set},
    builtins::{ShadowObject, make_safe, shadow::marking::mark_participating},
    execution::{Agent, Options},
    types::{Object, OrdinaryObject, PropertyKey, Value},
};

struct Setup {
    agent: Agent,
    prototype: Object,
    instance: Object,
    config: PropertyKey,
    size: PropertyKey,
}

fn setup() -> Setup {
    let mut agent = Agent::new(Options::default());
    let config = PropertyKey::from_str(&mut agent, "config");
    let size = PropertyKey::from_str(&mut agent, "size");
    let prototype: Object = OrdinaryObject::create_empty_object(&mut agent).into();
    let config_object: Object = OrdinaryObject::create_empty_object(&mut agent).into();
    create_data_property_or_throw(&mut agent, config_object, size, 1.into()).unwrap();
    create_data_property_or_throw(&mut agent, prototype, config, config_object.into()).unwrap();
    mark_participating(&mut agent, prototype);
    let instance = OrdinaryObject::create_object_with_prototype(&mut agent, Some(prototype));
    let instance = make_safe(&mut agent, instance.into()).unwrap();
    Setup {
        agent,
        prototype,
        instance,
        config,
        size,
    }
}

#[test]
fn unreachable_pending_nodes_are_collected() {
    let Setup {
        mut agent,
        instance,
        config,
        ..
    } = setup();
    let node = get(&mut agent, instance, config).unwrap();
    assert!(matches!(node, Value::ShadowObject(_)));
    assert_eq!(agent.pending_shadow_nodes(), 1);

    let stats = agent.gc(&[instance.into()]);
    assert_eq!(stats.shadows, 1);
    // The node's copy goes with it.
    assert_eq!(stats.objects, 1);
    assert_eq!(agent.pending_shadow_nodes(), 0);

    // A later read creates a fresh node.
    let again = get(&mut agent, instance, config).unwrap();
    assert!(matches!(again, Value::ShadowObject(_)));
    assert_ne!(again, node);
}

#[test]
fn rooted_pending_nodes_survive() {
    let Setup {
        mut agent,
        instance,
        config,
        size,
        ..
    } = setup();
    let node = get(&mut agent, instance, config).unwrap();
    let stats = agent.gc(&[instance.into(), node]);
    assert_eq!(stats.shadows, 0);
    assert_eq!(agent.pending_shadow_nodes(), 1);
    assert_eq!(get(&mut agent, instance, config).unwrap(), node);

    set(&mut agent, Object::try_from(node).unwrap(), size, 2.into(), true).unwrap();
    assert!(ShadowObject::try_from(node).unwrap().is_committed(&agent));
}

#[test]
fn collected_instances_release_their_wrappers() {
    let Setup {
        mut agent,
        prototype,
        instance,
        config,
        size,
    } = setup();
    let node = get(&mut agent, instance, config).unwrap();
    set(&mut agent, Object::try_from(node).unwrap(), size, 2.into(), true).unwrap();

    let stats = agent.gc(&[prototype.into()]);
    // The instance and its copy, the wrapper and the committed node.
    assert_eq!(stats.objects, 2);
    assert_eq!(stats.shadows, 2);
    let original = get(&mut agent, prototype, config).unwrap();
    assert_eq!(
        get(&mut agent, Object::try_from(original).unwrap(), size).unwrap(),
        1.into()
    );
}

#[test]
fn disabled_gc_keeps_everything() {
    let mut agent = Agent::new(Options {
        disable_gc: true,
        ..Default::default()
    });
    let object = OrdinaryObject::create_empty_object(&mut agent);
    let stats = agent.gc(&[]);
    assert_eq!(stats.objects, 0);
    assert_eq!(object.len(&agent), 0);
}
