/*
    core_store - Tracked records and their local persistence

    Handles:
    - Data models (airdrops, testnets, tools, videos, categories)
    - Per-kind entity stores with whole-state snapshots
    - Form validation for submitted drafts
    - List queries and dashboard aggregation
*/

pub mod model;
pub mod query;
pub mod store;

#[cfg(test)]
pub mod tests;

// Re-export commonly used types
pub use model::{EntityId, EntityKind, Timestamp, UserId};
pub use store::{StoreError, StoreResult};
