// relay/src/results/mod.rs

//! The per-pipeline results store and its merge rules.

pub mod slot;
pub mod store;

pub use slot::{merge, Slot};
pub use store::ResultStore;
