use crate::Entity;
use thiserror::Error;

/// Errors returned by component lookups.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ComponentError {
    /// The entity has no value of the requested component type.
    /// Covers components that were never added, removed ones and dead entities.
    #[error("entity {entity} has no `{component}` component")]
    NotFound {
        entity: Entity,
        component: &'static str,
    },
}

impl ComponentError {
    pub(crate) fn not_found<C>(entity: Entity) -> Self {
        ComponentError::NotFound {
            entity,
            component: std::any::type_name::<C>(),
        }
    }
}
