//! Process-unique entity identifiers.
//!
//! Events refer to entities by `EntityId`, never by index into a store, so a handler that runs a
//! tick later can tell "this bullet is gone" apart from "this slot holds another bullet now".

use bevy::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EntityId(pub u64);

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Hands out identifiers for one simulation. Counting starts at 1 and never wraps back.
#[derive(Resource, Debug, Default)]
pub struct IdAllocator {
    last: u64,
}

impl IdAllocator {
    pub fn next_id(&mut self) -> EntityId {
        self.last += 1;
        EntityId(self.last)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_monotonic_and_unique() {
        let mut ids = IdAllocator::default();
        let a = ids.next_id();
        let b = ids.next_id();
        assert!(b > a);
        assert_ne!(a, b);
        assert_eq!(a, EntityId(1));
    }
}
