//! An entity manager over a fixed set of component types.
//!
//! An entity is an opaque numeric identifier. Components are plain values
//! attached to entities. The set of component types is declared once,
//! at compile time, with `#[derive(ComponentSet)]`; every type gets a bit in
//! a per-entity [`Signature`] which is used to select entities
//! having a given combination of components.
//!
//! # Examples
//!
//! ```
//! use bitset_ecs::{ComponentError, ComponentMap, ComponentSet, EntityManager};
//!
//! #[derive(Default, Debug, PartialEq)]
//! struct Position {
//!     x: f32,
//!     y: f32,
//! }
//!
//! #[derive(Default, Debug, PartialEq)]
//! struct Velocity {
//!     dx: f32,
//!     dy: f32,
//! }
//!
//! #[derive(Default, ComponentSet)]
//! struct Physics {
//!     positions: ComponentMap<Position>,
//!     velocities: ComponentMap<Velocity>,
//! }
//!
//! let mut manager = EntityManager::<Physics>::new();
//!
//! let rocket = manager.create();
//! manager.add::<Position>(rocket);
//! manager.add::<Velocity>(rocket).dy = 9.8;
//!
//! let rock = manager.create();
//! manager.add::<Position>(rock).x = 3.0;
//!
//! let moving: Vec<_> = manager.entities::<(Position, Velocity)>().iter().collect();
//! assert_eq!(moving, [rocket]);
//!
//! for entity in moving {
//!     let dy = manager.get::<Velocity>(entity)?.dy;
//!     manager.get_mut::<Position>(entity)?.y += dy;
//! }
//!
//! assert_eq!(manager.get::<Position>(rocket)?, &Position { x: 0.0, y: 9.8 });
//! assert!(manager.get::<Velocity>(rock).is_err());
//! # Ok::<(), ComponentError>(())
//! ```

extern crate self as bitset_ecs;

#[cfg(test)]
mod tests;

mod entity;
mod error;
pub mod manager;
pub mod query;
pub mod registry;

pub use entity::Entity;
pub use entity::EntityIndex;
pub use error::ComponentError;
pub use manager::EntityManager;
pub use query::Query;
pub use registry::Component;
pub use registry::ComponentQuery;
pub use registry::ComponentSet;
pub use registry::Member;
pub use registry::Signature;
pub use registry::MAX_COMPONENTS;

/// Derives [`ComponentSet`] for a struct of [`ComponentMap`] fields.
///
/// Field order defines the bit index of each component type.
/// Every component type also becomes a [`ComponentQuery`] of the set,
/// tuples of them are queries as well.
///
/// # Examples
/// ```
/// use bitset_ecs::{registry, ComponentMap, ComponentSet};
///
/// #[derive(Default)]
/// struct Name(String);
/// #[derive(Default)]
/// struct Age(u8);
///
/// #[derive(Default, ComponentSet)]
/// struct People(ComponentMap<Name>, ComponentMap<Age>);
///
/// assert_eq!(registry::index::<People, Name>(), 0);
/// assert_eq!(registry::index::<People, Age>(), 1);
/// assert_eq!(<People as ComponentSet>::COUNT, 2);
/// ```
pub use macros::ComponentSet;

pub(crate) type HashMap<K, V> = std::collections::HashMap<K, V, ahash::RandomState>;

/// Storage of a single component type, one value per entity.
pub type ComponentMap<C> = std::collections::HashMap<Entity, C, ahash::RandomState>;
