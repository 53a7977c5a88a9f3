use crate::{ComponentError, ComponentMap, ComponentSet, Entity, EntityManager, Signature};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug, Default, Clone, PartialEq)]
struct Position {
    x: f32,
    y: f32,
}

#[derive(Debug, Default, Clone, PartialEq)]
struct Velocity {
    dx: f32,
    dy: f32,
}

#[derive(Debug, Default, Clone, Copy, Eq, PartialEq)]
struct Health(u32);

#[derive(Default, ComponentSet)]
struct Physics {
    positions: ComponentMap<Position>,
    velocities: ComponentMap<Velocity>,
}

#[derive(Default, ComponentSet)]
struct Game(
    ComponentMap<Position>,
    ComponentMap<Velocity>,
    ComponentMap<Health>,
);

fn sorted(entities: impl IntoIterator<Item = Entity>) -> Vec<Entity> {
    let mut entities: Vec<_> = entities.into_iter().collect();
    entities.sort();
    entities
}

#[test]
fn it_works() {
    let mut manager = EntityManager::<Physics>::new();

    let e1 = manager.create();
    manager.add::<Position>(e1);
    manager.add::<Velocity>(e1);
    let e2 = manager.create();
    manager.add::<Position>(e2);

    assert_eq!(sorted(manager.entities::<(Position, Velocity)>()), [e1]);
    assert_eq!(sorted(manager.entities::<Position>()), [e1, e2]);
    assert_eq!(
        manager.get::<Velocity>(e2),
        Err(ComponentError::NotFound {
            entity: e2,
            component: std::any::type_name::<Velocity>(),
        })
    );
}

#[test]
fn destroyed_entities_have_no_components() {
    let mut manager = EntityManager::<Game>::new();

    let e = manager.create();
    manager.add::<Position>(e).x = 1.0;
    manager.add::<Velocity>(e);
    manager.insert(e, Health(3));

    manager.destroy(e);

    assert!(!manager.is_alive(e));
    assert!(manager.get::<Position>(e).is_err());
    assert!(manager.get::<Velocity>(e).is_err());
    assert!(manager.get::<Health>(e).is_err());
    assert!(manager.signature(e).is_none());
    assert_eq!(manager.components::<Position>().count(), 0);
    assert!(manager.ids().is_dead(e));
}

#[test]
fn destroy_of_not_alive_entity_is_noop() {
    let mut manager = EntityManager::<Physics>::new();

    let a = manager.create();
    let b = manager.create();
    manager.add::<Position>(b);

    manager.destroy(a);
    manager.destroy(a);
    manager.destroy(Entity::new(100));
    manager.destroy(Entity::NULL);

    assert_eq!(manager.len(), 1);
    assert!(manager.is_alive(b));
    assert!(manager.get::<Position>(b).is_ok());
    assert_eq!(manager.ids().dead().collect::<Vec<_>>(), [a]);

    // The unknown id must not have become reusable.
    assert_eq!(manager.create(), a);
    assert_eq!(manager.create(), Entity::new(2));
}

#[test]
fn add_returns_existing_value() {
    let mut manager = EntityManager::<Game>::new();
    let e = manager.create();

    *manager.add::<Health>(e) = Health(42);
    let health = *manager.add::<Health>(e);

    assert_eq!(health, Health(42));
    assert_eq!(manager.get::<Health>(e), Ok(&Health(42)));
    assert_eq!(manager.components::<Health>().count(), 1);
    assert_eq!(manager.signature(e).map(Signature::count), Some(1));
}

#[test]
fn insert_overwrites_and_remove_detaches() {
    let mut manager = EntityManager::<Game>::new();
    let e = manager.create();

    assert_eq!(manager.insert(e, Health(1)), None);
    assert_eq!(manager.insert(e, Health(2)), Some(Health(1)));
    assert!(manager.has::<Health>(e));

    assert_eq!(manager.remove::<Health>(e), Some(Health(2)));
    assert_eq!(manager.remove::<Health>(e), None);
    assert!(!manager.has::<Health>(e));
    assert!(manager.get::<Health>(e).is_err());
    assert!(manager.signature(e).unwrap().is_empty());

    // Removing from an unknown entity leaves no trace.
    let unknown = Entity::new(77);
    assert_eq!(manager.remove::<Position>(unknown), None);
    assert!(manager.signature(unknown).is_none());
}

#[test]
fn get_mut_modifies_stored_value() {
    let mut manager = EntityManager::<Physics>::new();
    let e = manager.create();
    manager.add::<Velocity>(e);

    manager.get_mut::<Velocity>(e).unwrap().dx = 2.5;
    assert_eq!(manager.get::<Velocity>(e).unwrap().dx, 2.5);
    assert!(manager.get_mut::<Position>(e).is_err());
}

#[test]
fn has_does_not_create_signatures() {
    let mut manager = EntityManager::<Physics>::new();
    let e = manager.create();
    let stranger = Entity::new(5);

    assert!(!manager.has::<Position>(stranger));
    assert!(manager.has::<()>(stranger));
    assert!(manager.has::<()>(e));
    assert!(!manager.has::<(Position, Velocity)>(e));

    assert!(manager.signature(stranger).is_none());
    assert!(!manager.is_alive(stranger));
    assert_eq!(sorted(manager.entities::<()>()), [e]);

    manager.destroy(e);
    assert!(!manager.has::<Position>(e));
    assert!(manager.signature(e).is_none());
    assert!(manager.entities::<()>().is_empty());
}

#[test]
fn entities_without_filter_yields_alive_set() {
    let mut manager = EntityManager::<Game>::new();
    let all: Vec<_> = (0..10).map(|_| manager.create()).collect();

    for e in all.iter().step_by(3) {
        manager.destroy(*e);
    }

    let expected: Vec<_> = all
        .iter()
        .copied()
        .filter(|e| manager.is_alive(*e))
        .collect();

    let query = manager.entities::<()>();
    assert_eq!(sorted(query), expected);
    // Every traversal starts from scratch.
    assert_eq!(query.iter().count(), expected.len());
    assert_eq!(query.iter().count(), manager.len());
}

#[test]
fn entities_with_filter() {
    let mut manager = EntityManager::<Game>::new();
    let entities: Vec<_> = (0..6).map(|_| manager.create()).collect();

    for (i, e) in entities.iter().enumerate() {
        if i % 2 == 0 {
            manager.add::<Position>(*e);
        }
        if i % 3 == 0 {
            manager.add::<Health>(*e);
        }
    }

    assert_eq!(
        sorted(manager.entities::<Position>()),
        [entities[0], entities[2], entities[4]]
    );
    assert_eq!(
        sorted(manager.entities::<(Health, Position)>()),
        [entities[0]]
    );
    assert!(manager.entities::<Velocity>().is_empty());

    let query = manager.entities::<Health>();
    assert!(query.contains(entities[3]));
    assert!(!query.contains(entities[1]));
    assert_eq!(query.signature(), &Signature::of::<Health>());

    for e in &entities {
        manager.remove::<Position>(*e);
    }
    assert!(manager.entities::<Position>().is_empty());
    assert_eq!(manager.entities::<Health>().iter().count(), 2);
}

#[test]
fn recycled_entity_starts_empty() {
    let mut manager = EntityManager::<Game>::new();
    let entities: Vec<_> = (0..5).map(|_| manager.create()).collect();

    manager.add::<Position>(entities[3]).y = 4.0;
    manager.add::<Health>(entities[3]);
    manager.destroy(entities[3]);

    let recycled = manager.create();
    assert_eq!(recycled, entities[3]);
    assert_eq!(recycled.id(), 3);
    assert!(manager.signature(recycled).unwrap().is_empty());
    assert!(manager.get::<Position>(recycled).is_err());
    assert!(manager.get::<Health>(recycled).is_err());

    assert_eq!(manager.create(), Entity::new(5));
}

#[test]
fn smallest_dead_id_is_reused_first() {
    let mut manager = EntityManager::<Physics>::new();
    let entities: Vec<_> = (0..5).map(|_| manager.create()).collect();

    manager.destroy(entities[4]);
    manager.destroy(entities[1]);
    manager.destroy(entities[2]);

    assert_eq!(manager.create(), entities[1]);
    assert_eq!(manager.create(), entities[2]);
    assert_eq!(manager.create(), entities[4]);
}

#[test]
fn managers_do_not_share_ids() {
    let mut first = EntityManager::<Physics>::new();
    let mut second = EntityManager::<Physics>::default();

    first.create();
    first.create();

    assert_eq!(second.create(), Entity::new(0));
    assert_eq!(first.create(), Entity::new(2));
}

#[test]
fn bulk_component_access() {
    let mut manager = EntityManager::<Physics>::with_capacity(8);
    let entities: Vec<_> = (0..4).map(|_| manager.create()).collect();

    for (i, e) in entities.iter().enumerate() {
        manager.add::<Position>(*e).x = i as f32;
    }
    manager.add::<Velocity>(entities[0]);

    let mut xs: Vec<_> = manager.components::<Position>().map(|p| p.x).collect();
    xs.sort_by(f32::total_cmp);
    assert_eq!(xs, [0.0, 1.0, 2.0, 3.0]);

    for position in manager.components_mut::<Position>() {
        position.y = position.x * 2.0;
    }

    for (entity, position) in manager.component_entries::<Position>() {
        assert_eq!(position.x, entity.id() as f32);
        assert_eq!(position.y, position.x * 2.0);
    }

    assert_eq!(manager.components::<Velocity>().len(), 1);
}

#[test]
fn clear_retires_every_entity() {
    let mut manager = EntityManager::<Game>::new();
    let entities: Vec<_> = (0..3).map(|_| manager.create()).collect();
    manager.add::<Health>(entities[1]);

    manager.clear();

    assert!(manager.is_empty());
    assert_eq!(manager.components::<Health>().count(), 0);
    assert_eq!(manager.ids().dead().collect::<Vec<_>>(), entities);
    assert_eq!(manager.create(), entities[0]);
}

#[test]
fn error_names_entity_and_component() {
    let manager = EntityManager::<Game>::new();
    let err = manager.get::<Health>(Entity::new(9)).unwrap_err();
    let message = err.to_string();

    assert!(message.starts_with("entity #9 has no `"));
    assert!(message.contains("Health"));
}

#[test]
fn random_operations_keep_invariants() {
    let mut rng = StdRng::seed_from_u64(0x5ec5);
    let mut manager = EntityManager::<Game>::new();

    let mut alive = BTreeSet::<Entity>::new();
    let mut dead = BTreeSet::<Entity>::new();
    let mut health = BTreeMap::<Entity, u32>::new();
    let mut positioned = BTreeSet::<Entity>::new();

    for _ in 0..2000 {
        match rng.gen_range(0..5) {
            0 | 1 => {
                let e = manager.create();
                assert!(!alive.contains(&e));
                if let Some(smallest) = dead.iter().next().copied() {
                    assert_eq!(e, smallest);
                }
                dead.remove(&e);
                alive.insert(e);
            }
            2 => {
                let e = Entity::new(rng.gen_range(0..64));
                manager.destroy(e);
                if alive.remove(&e) {
                    dead.insert(e);
                }
                health.remove(&e);
                positioned.remove(&e);
            }
            3 => {
                if let Some(e) = alive.iter().nth(rng.gen_range(0..alive.len().max(1))).copied() {
                    let value: u32 = rng.gen();
                    manager.insert(e, Health(value));
                    health.insert(e, value);
                    if rng.gen_bool(0.5) {
                        manager.add::<Position>(e);
                        positioned.insert(e);
                    }
                }
            }
            _ => {
                if let Some(e) = alive.iter().nth(rng.gen_range(0..alive.len().max(1))).copied() {
                    manager.remove::<Health>(e);
                    health.remove(&e);
                }
            }
        }

        assert!(alive.is_disjoint(&dead));
        assert_eq!(manager.len(), alive.len());
    }

    assert_eq!(sorted(manager.entities::<()>()), alive.iter().copied().collect::<Vec<_>>());
    assert_eq!(manager.ids().dead().collect::<BTreeSet<_>>(), dead);
    assert_eq!(
        sorted(manager.entities::<Health>()),
        health.keys().copied().collect::<Vec<_>>()
    );
    assert_eq!(
        sorted(manager.entities::<(Position, Health)>()),
        health
            .keys()
            .filter(|e| positioned.contains(e))
            .copied()
            .collect::<Vec<_>>()
    );

    for e in &alive {
        let signature = manager.signature(*e).unwrap();
        assert_eq!(signature.get::<Health>(), manager.get::<Health>(*e).is_ok());
        assert_eq!(signature.get::<Position>(), manager.get::<Position>(*e).is_ok());
        assert!(!signature.get::<Velocity>());
    }
    for (e, value) in &health {
        assert_eq!(manager.get::<Health>(*e), Ok(&Health(*value)));
    }
    for e in &dead {
        assert!(!manager.is_alive(*e));
        assert!(manager.get::<Health>(*e).is_err());
    }
}
