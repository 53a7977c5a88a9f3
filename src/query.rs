use crate::manager::entities::{AliveIter, EntityIds};
use crate::registry::{ComponentSet, Signature};
use crate::{Entity, HashMap};

/// A view over alive entities whose signature contains the query signature.
///
/// Nothing is evaluated until iteration. Each call to [`iter`](Self::iter)
/// starts a new traversal from the first alive entity.
pub struct Query<'a, S: ComponentSet> {
    entities: &'a EntityIds,
    signatures: &'a HashMap<Entity, Signature<S>>,
    query: Signature<S>,
}

impl<'a, S: ComponentSet> Query<'a, S> {
    pub(crate) fn new(
        entities: &'a EntityIds,
        signatures: &'a HashMap<Entity, Signature<S>>,
        query: Signature<S>,
    ) -> Self {
        Query {
            entities,
            signatures,
            query,
        }
    }

    /// Returns the signature every yielded entity contains.
    pub fn signature(&self) -> &Signature<S> {
        &self.query
    }

    /// Returns `true` if the entity is alive and matches the query.
    pub fn contains(&self, entity: Entity) -> bool {
        self.entities.contains(entity) && self.matches(entity)
    }

    /// Returns `true` if no alive entity matches the query.
    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }

    /// Returns an iterator over the matching entities in ascending order.
    pub fn iter(&self) -> QueryIter<'a, S> {
        QueryIter {
            entities_iter: self.entities.iter(),
            signatures: self.signatures,
            query: self.query,
        }
    }

    fn matches(&self, entity: Entity) -> bool {
        signature_matches(self.signatures, &self.query, entity)
    }
}

fn signature_matches<S: ComponentSet>(
    signatures: &HashMap<Entity, Signature<S>>,
    query: &Signature<S>,
    entity: Entity,
) -> bool {
    query.is_empty()
        || signatures
            .get(&entity)
            .map_or(false, |signature| signature.contains(query))
}

impl<S: ComponentSet> Clone for Query<'_, S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S: ComponentSet> Copy for Query<'_, S> {}

impl<'a, S: ComponentSet> IntoIterator for Query<'a, S> {
    type Item = Entity;
    type IntoIter = QueryIter<'a, S>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, S: ComponentSet> IntoIterator for &Query<'a, S> {
    type Item = Entity;
    type IntoIter = QueryIter<'a, S>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

pub struct QueryIter<'a, S: ComponentSet> {
    entities_iter: AliveIter<'a>,
    signatures: &'a HashMap<Entity, Signature<S>>,
    query: Signature<S>,
}

impl<S: ComponentSet> Clone for QueryIter<'_, S> {
    fn clone(&self) -> Self {
        QueryIter {
            entities_iter: self.entities_iter.clone(),
            signatures: self.signatures,
            query: self.query,
        }
    }
}

impl<S: ComponentSet> Iterator for QueryIter<'_, S> {
    type Item = Entity;

    fn next(&mut self) -> Option<Self::Item> {
        let signatures = self.signatures;
        let query = &self.query;
        self.entities_iter
            .find(|entity| signature_matches(signatures, query, *entity))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, self.entities_iter.size_hint().1)
    }
}
