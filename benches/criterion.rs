// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::hint::black_box;

use cow_proto::ecmascript::{
    abstract_operations::operations_on_objects::{create_data_property_or_throw, get, set},
    builtins::{make_safe, shadow::marking::mark_participating},
    execution::{Agent, Options},
    types::{Object, OrdinaryObject, PropertyKey},
};
use criterion::{BatchSize, Criterion, criterion_group, criterion_main};

const DEPTH: usize = 8;

struct Fixture {
    agent: Agent,
    instance: Object,
    links: Vec<PropertyKey>,
    value: PropertyKey,
}

/// A guarded instance of a participating prototype nested `DEPTH` levels deep.
fn fixture() -> Fixture {
    let mut agent = Agent::new(Options {
        disable_gc: true,
        ..Default::default()
    });
    let value = PropertyKey::from_str(&mut agent, "value");
    let links: Vec<PropertyKey> = (0..DEPTH)
        .map(|level| PropertyKey::from_str(&mut agent, &format!("level{level}")))
        .collect();
    let prototype: Object = OrdinaryObject::create_empty_object(&mut agent).into();
    let mut parent = prototype;
    for &link in &links {
        let level: Object = OrdinaryObject::create_empty_object(&mut agent).into();
        create_data_property_or_throw(&mut agent, level, value, 0.into()).unwrap();
        create_data_property_or_throw(&mut agent, parent, link, level.into()).unwrap();
        parent = level;
    }
    mark_participating(&mut agent, prototype);
    let instance = OrdinaryObject::create_object_with_prototype(&mut agent, Some(prototype));
    let instance = make_safe(&mut agent, instance.into()).unwrap();
    Fixture {
        agent,
        instance,
        links,
        value,
    }
}

fn walk(fixture: &mut Fixture) -> Object {
    let mut current = fixture.instance;
    for &link in &fixture.links {
        let next = get(&mut fixture.agent, current, link).unwrap();
        current = Object::try_from(next).unwrap();
    }
    current
}

fn bench_shadowing(c: &mut Criterion) {
    c.bench_function("shadowed read (first)", |b| {
        b.iter_batched(
            fixture,
            |mut fixture| black_box(walk(&mut fixture)),
            BatchSize::SmallInput,
        )
    });

    c.bench_function("shadowed read (registry hit)", |b| {
        let mut fixture = fixture();
        walk(&mut fixture);
        b.iter(|| black_box(walk(&mut fixture)))
    });

    c.bench_function("commit", |b| {
        b.iter_batched(
            || {
                let mut fixture = fixture();
                let leaf = walk(&mut fixture);
                (fixture, leaf)
            },
            |(mut fixture, leaf)| {
                set(&mut fixture.agent, leaf, fixture.value, 1.into(), true).unwrap();
                black_box(fixture)
            },
            BatchSize::SmallInput,
        )
    });
}

criterion_group!(benches, bench_shadowing);
criterion_main!(benches);
