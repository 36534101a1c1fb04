//! Insertion-ordered entity collections.
//!
//! Each `Store<T>` has exactly one owning plugin. Everyone else gets `Res<Store<T>>` and the
//! read-only half of the API; changes are requested by publishing events on the bus.
//! Iteration order is insertion order, which is also the collision sweep order.

use bevy::prelude::*;

use super::ids::EntityId;

pub trait Identified {
    fn id(&self) -> EntityId;
}

#[derive(Resource, Debug)]
pub struct Store<T: Send + Sync + 'static> {
    items: Vec<T>,
}

impl<T: Send + Sync + 'static> Default for Store<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T: Identified + Send + Sync + 'static> Store<T> {
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    pub fn get(&self, id: EntityId) -> Option<&T> {
        self.items.iter().find(|item| item.id() == id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    // Owner-only half.

    pub(crate) fn add(&mut self, item: T) -> EntityId {
        let id = item.id();
        self.items.push(item);
        id
    }

    pub(crate) fn get_mut(&mut self, id: EntityId) -> Option<&mut T> {
        self.items.iter_mut().find(|item| item.id() == id)
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.items.iter_mut()
    }

    /// Drops every item for which `keep` is false. Returns how many were removed.
    pub(crate) fn retain(&mut self, keep: impl FnMut(&T) -> bool) -> usize {
        let before = self.items.len();
        self.items.retain(keep);
        before - self.items.len()
    }
}
