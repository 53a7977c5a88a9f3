use std::fmt;

/// The raw integer behind an [`Entity`].
pub type EntityIndex = u32;

/// An entity identifier.
///
/// Carries no data by itself, all components are stored by the
/// [`EntityManager`](crate::EntityManager) that issued it.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct Entity {
    id: EntityIndex,
}

impl Entity {
    pub const NULL: Self = Entity { id: EntityIndex::MAX };

    /// Constructs an entity identifier from its raw index.
    pub const fn new(id: EntityIndex) -> Entity {
        Entity { id }
    }

    /// Returns the raw index of the entity.
    pub const fn id(&self) -> EntityIndex {
        self.id
    }

    pub const fn is_null(&self) -> bool {
        self.id == EntityIndex::MAX
    }
}

impl Default for Entity {
    fn default() -> Self {
        Entity::NULL
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.id)
    }
}
