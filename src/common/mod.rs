//! Common, shared types.

pub mod bounds;
pub mod ids;
pub mod rng;
pub mod schedule;
pub mod state;
pub mod store;
pub mod tunables;

#[cfg(test)]
pub mod test_utils;
