use crate::entity::{Entity, EntityIndex};
use bitvec::vec::BitVec;

/// Alive and dead entity identifiers of a manager.
///
/// Every id below `issued()` has been created at least once. Set bits are alive,
/// clear bits are dead and will be handed out again, lowest first.
#[derive(Default)]
pub struct EntityIds {
    alive: BitVec,
}

type Order = bitvec::order::Lsb0;

const fn const_min(a: usize, b: usize) -> usize {
    [a, b][(a > b) as usize]
}

impl EntityIds {
    // `EntityIndex::MAX` is reserved for `Entity::NULL`.
    pub const MAX_ENTITIES: usize = const_min(
        EntityIndex::MAX as usize,
        bitvec::slice::BitSlice::<usize, Order>::MAX_BITS,
    );

    pub(crate) fn with_capacity(capacity: usize) -> Self {
        EntityIds {
            alive: BitVec::with_capacity(capacity),
        }
    }

    /// Reuses the smallest dead id or issues a new one.
    pub(crate) fn allocate(&mut self) -> Entity {
        let id = match self.alive.first_zero() {
            Some(id) => {
                self.alive.set(id, true);
                id
            }
            None => {
                assert!(
                    self.alive.len() < Self::MAX_ENTITIES,
                    "Out of ids. A maximum number of entities ({}) is reached.",
                    Self::MAX_ENTITIES
                );
                self.alive.push(true);
                self.alive.len() - 1
            }
        };
        Entity::new(id as EntityIndex)
    }

    /// Marks the entity as dead. Returns `true` if the entity was alive.
    pub(crate) fn free(&mut self, entity: Entity) -> bool {
        self.contains(entity) && self.alive.replace(entity.id() as usize, false)
    }

    /// `None` for ids that were never issued.
    fn state(&self, entity: Entity) -> Option<bool> {
        self.alive.get(entity.id() as usize).map(|bit| *bit)
    }

    /// Returns `true` if the entity is alive.
    pub fn contains(&self, entity: Entity) -> bool {
        self.state(entity) == Some(true)
    }

    /// Returns `true` if the entity was created and destroyed and is not reissued yet.
    pub fn is_dead(&self, entity: Entity) -> bool {
        self.state(entity) == Some(false)
    }

    /// Returns an iterator over all alive entities in ascending order.
    pub fn iter(&self) -> AliveIter<'_> {
        EntitiesIter(self.alive.iter_ones())
    }

    /// Returns an iterator over all dead entities in ascending order.
    pub fn dead(&self) -> DeadIter<'_> {
        EntitiesIter(self.alive.iter_zeros())
    }

    /// Returns the number of alive entities.
    pub fn count(&self) -> usize {
        self.alive.count_ones()
    }

    /// Returns the number of distinct ids issued so far.
    pub fn issued(&self) -> usize {
        self.alive.len()
    }
}

/// Maps bit positions of the alive set to entities.
#[derive(Clone)]
pub struct EntitiesIter<I>(I);

pub type AliveIter<'a> = EntitiesIter<bitvec::slice::IterOnes<'a, usize, Order>>;
pub type DeadIter<'a> = EntitiesIter<bitvec::slice::IterZeros<'a, usize, Order>>;

impl<I: Iterator<Item = usize>> Iterator for EntitiesIter<I> {
    type Item = Entity;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next().map(|id| Entity::new(id as EntityIndex))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

#[test]
fn test_smallest_dead_id_is_reused() {
    let mut ids = EntityIds::default();
    let e: Vec<_> = (0..5).map(|_| ids.allocate()).collect();
    assert_eq!(e.iter().map(|e| e.id()).collect::<Vec<_>>(), [0, 1, 2, 3, 4]);

    assert!(ids.free(e[3]));
    assert!(ids.free(e[1]));
    assert!(!ids.free(e[1]));
    assert!(ids.is_dead(e[1]));
    assert_eq!(ids.dead().collect::<Vec<_>>(), [e[1], e[3]]);

    assert_eq!(ids.allocate(), e[1]);
    assert_eq!(ids.allocate(), e[3]);
    assert_eq!(ids.allocate(), Entity::new(5));
    assert_eq!(ids.issued(), 6);
    assert_eq!(ids.count(), 6);
}

#[test]
fn test_unknown_ids_are_neither_alive_nor_dead() {
    let mut ids = EntityIds::default();
    let unknown = Entity::new(42);

    assert!(!ids.free(unknown));
    assert!(!ids.contains(unknown));
    assert!(!ids.is_dead(unknown));
    assert!(!ids.contains(Entity::NULL));
    assert_eq!(ids.allocate(), Entity::new(0));
}

#[test]
fn test_alive_and_dead_iterators_partition_issued_ids() {
    let mut ids = EntityIds::with_capacity(4);
    let e: Vec<_> = (0..4).map(|_| ids.allocate()).collect();
    ids.free(e[0]);
    ids.free(e[2]);

    let alive: Vec<_> = ids.iter().collect();
    let dead: Vec<_> = ids.dead().collect();
    assert_eq!(alive, [e[1], e[3]]);
    assert_eq!(dead, [e[0], e[2]]);
    assert_eq!(alive.len() + dead.len(), ids.issued());
    assert!(alive.iter().all(|e| ids.contains(*e) && !ids.is_dead(*e)));
    assert!(dead.iter().all(|e| ids.is_dead(*e) && !ids.contains(*e)));

    assert!(EntityIds::MAX_ENTITIES <= EntityIndex::MAX as usize);
    assert!(!ids.contains(Entity::new(EntityIndex::MAX)));
}
