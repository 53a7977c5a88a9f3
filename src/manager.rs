pub mod entities;

use crate::error::ComponentError;
use crate::query::Query;
use crate::registry::{ComponentQuery, ComponentSet, Member, Signature};
use crate::{Entity, HashMap};
use entities::EntityIds;
use std::collections::hash_map;

/// Owns the entities, their signatures and component values of the set `S`.
///
/// For every entity `e` and component `C`, the bit of `C` in the signature of `e`
/// is set if and only if the map of `C` has a value for `e`.
pub struct EntityManager<S: ComponentSet> {
    entities: EntityIds,
    signatures: HashMap<Entity, Signature<S>>,
    components: S,
}

impl<S: ComponentSet> EntityManager<S> {
    /// Creates an empty manager.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates an empty manager with space for at least `capacity` entities.
    pub fn with_capacity(capacity: usize) -> Self {
        log::debug!(
            "Creating entity manager for {} component types: {:?}",
            S::COUNT,
            S::NAMES
        );

        EntityManager {
            entities: EntityIds::with_capacity(capacity),
            signatures: HashMap::with_capacity_and_hasher(capacity, Default::default()),
            components: S::default(),
        }
    }

    /// Creates a new entity with no components and returns its identifier.
    /// The smallest dead identifier is reused if there is one.
    pub fn create(&mut self) -> Entity {
        let entity = self.entities.allocate();

        // A recycled id must not inherit values attached to it while it was dead.
        self.components.purge(entity);
        self.signatures.insert(entity, Signature::empty());

        log::trace!("Created entity {}", entity);
        entity
    }

    /// Removes all components of the entity and retires its identifier.
    /// Does nothing if the entity is not alive.
    pub fn destroy(&mut self, entity: Entity) {
        if !self.entities.free(entity) {
            return;
        }

        self.components.purge(entity);
        self.signatures.remove(&entity);

        log::trace!("Destroyed entity {}", entity);
    }

    /// Destroys every alive entity.
    pub fn clear(&mut self) {
        let alive: Vec<Entity> = self.entities.iter().collect();
        for entity in &alive {
            self.destroy(*entity);
        }
        log::trace!("Cleared {} entities", alive.len());
    }

    /// Returns `true` if the entity is alive.
    pub fn is_alive(&self, entity: Entity) -> bool {
        self.entities.contains(entity)
    }

    /// Returns the number of alive entities.
    pub fn len(&self) -> usize {
        self.entities.count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the alive and dead identifiers of the manager.
    pub fn ids(&self) -> &EntityIds {
        &self.entities
    }

    /// Returns the signature of the entity, `None` if the entity is not alive.
    pub fn signature(&self, entity: Entity) -> Option<&Signature<S>> {
        self.signatures.get(&entity)
    }

    /// Returns the component `C` of the entity, inserting `C::default()` if it is absent.
    /// An existing value is returned unchanged.
    ///
    /// The entity must be alive.
    pub fn add<C: Member<S> + Default>(&mut self, entity: Entity) -> &mut C {
        debug_assert!(self.is_alive(entity), "entity {} is not alive", entity);

        self.signatures
            .entry(entity)
            .or_insert_with(Signature::empty)
            .set::<C>(true);

        C::storage_mut(&mut self.components)
            .entry(entity)
            .or_default()
    }

    /// Sets the component `C` of the entity to `value`.
    /// Returns the previous value if there was one.
    ///
    /// The entity must be alive.
    pub fn insert<C: Member<S>>(&mut self, entity: Entity, value: C) -> Option<C> {
        debug_assert!(self.is_alive(entity), "entity {} is not alive", entity);

        self.signatures
            .entry(entity)
            .or_insert_with(Signature::empty)
            .set::<C>(true);

        C::storage_mut(&mut self.components).insert(entity, value)
    }

    /// Removes the component `C` from the entity and returns it.
    pub fn remove<C: Member<S>>(&mut self, entity: Entity) -> Option<C> {
        if let Some(signature) = self.signatures.get_mut(&entity) {
            signature.set::<C>(false);
        }
        C::storage_mut(&mut self.components).remove(&entity)
    }

    /// Returns a reference to the component `C` of the entity.
    pub fn get<C: Member<S>>(&self, entity: Entity) -> Result<&C, ComponentError> {
        C::storage(&self.components)
            .get(&entity)
            .ok_or_else(|| ComponentError::not_found::<C>(entity))
    }

    /// Returns a mutable reference to the component `C` of the entity.
    pub fn get_mut<C: Member<S>>(&mut self, entity: Entity) -> Result<&mut C, ComponentError> {
        C::storage_mut(&mut self.components)
            .get_mut(&entity)
            .ok_or_else(|| ComponentError::not_found::<C>(entity))
    }

    /// Returns an iterator over all values of the component `C` in arbitrary order.
    ///
    /// The iterator borrows the manager, so it can't be kept across a mutating call:
    ///
    /// ```compile_fail
    /// use bitset_ecs::{ComponentMap, ComponentSet, EntityManager};
    ///
    /// #[derive(Default)]
    /// struct Mass(f32);
    ///
    /// #[derive(Default, ComponentSet)]
    /// struct Body {
    ///     masses: ComponentMap<Mass>,
    /// }
    ///
    /// let mut manager = EntityManager::<Body>::new();
    /// let a = manager.create();
    /// manager.add::<Mass>(a);
    ///
    /// let masses = manager.components::<Mass>();
    /// let b = manager.create();
    /// manager.add::<Mass>(b);
    /// assert_eq!(masses.count(), 2);
    /// ```
    pub fn components<C: Member<S>>(&self) -> hash_map::Values<'_, Entity, C> {
        C::storage(&self.components).values()
    }

    /// Returns an iterator that allows modifying every value of the component `C`.
    pub fn components_mut<C: Member<S>>(&mut self) -> hash_map::ValuesMut<'_, Entity, C> {
        C::storage_mut(&mut self.components).values_mut()
    }

    /// Returns an iterator over entities with the component `C` paired with its value.
    pub fn component_entries<C: Member<S>>(&self) -> hash_map::Iter<'_, Entity, C> {
        C::storage(&self.components).iter()
    }

    /// Returns `true` if the entity has every component of `Q`.
    ///
    /// An entity without a signature is treated as having no components,
    /// so `has::<()>` is `true` for any entity.
    pub fn has<Q: ComponentQuery<S>>(&self, entity: Entity) -> bool {
        let query = Q::signature();
        self.signatures
            .get(&entity)
            .map_or(query.is_empty(), |signature| signature.contains(&query))
    }

    /// Returns a view over alive entities that have every component of `Q`.
    ///
    /// # Examples
    /// ```
    /// use bitset_ecs::{ComponentMap, ComponentSet, EntityManager};
    ///
    /// #[derive(Default)]
    /// struct Health(u32);
    /// #[derive(Default)]
    /// struct Poisoned;
    ///
    /// #[derive(Default, ComponentSet)]
    /// struct Status {
    ///     health: ComponentMap<Health>,
    ///     poisoned: ComponentMap<Poisoned>,
    /// }
    ///
    /// let mut manager = EntityManager::<Status>::new();
    /// let a = manager.create();
    /// manager.add::<Health>(a).0 = 10;
    /// manager.add::<Poisoned>(a);
    /// let b = manager.create();
    /// manager.add::<Health>(b).0 = 7;
    ///
    /// for entity in manager.entities::<(Health, Poisoned)>() {
    ///     manager.get::<Health>(entity).unwrap();
    /// }
    /// assert_eq!(manager.entities::<Health>().iter().count(), 2);
    /// assert_eq!(manager.entities::<()>().iter().count(), 2);
    /// ```
    pub fn entities<Q: ComponentQuery<S>>(&self) -> Query<'_, S> {
        Query::new(&self.entities, &self.signatures, Q::signature())
    }
}

impl<S: ComponentSet> Default for EntityManager<S> {
    fn default() -> Self {
        Self::new()
    }
}
