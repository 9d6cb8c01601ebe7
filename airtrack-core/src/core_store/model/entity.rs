/*
    entity.rs - Behaviour shared by every tracked record kind

    The generic entity store is written against these traits so the four
    stores share one implementation of add/update/delete/toggle.
*/

use super::category::Category;
use super::types::{EntityId, EntityKind, Timestamp, UserId};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// A record owned by a user and held in an entity store
pub trait Entity: Clone + Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Which store this record lives in
    const KIND: EntityKind;

    /// Caller-supplied fields for `add`
    type New;

    /// Partial update merged by `update`
    type Patch;

    /// Build a fresh record with default flags
    fn create(new: Self::New, id: EntityId, created_at: Timestamp) -> Self;

    /// Merge the `Some` fields of a patch into this record
    fn apply(&mut self, patch: Self::Patch);

    fn id(&self) -> &EntityId;
    fn user_id(&self) -> &UserId;
    fn title(&self) -> &str;
    fn description(&self) -> &str;
    fn category(&self) -> &str;
    fn pinned(&self) -> bool;
    fn set_pinned(&mut self, pinned: bool);
    fn created_at(&self) -> Timestamp;

    /// Categories a fresh store starts with
    fn default_categories() -> Vec<Category>;

    /// Completion flag, `None` for kinds that have none
    fn completed(&self) -> Option<bool> {
        None
    }
}

/// Records that carry a completed flag (airdrops and testnets)
pub trait Completable: Entity {
    fn set_completed(&mut self, completed: bool);

    fn is_completed(&self) -> bool {
        self.completed().unwrap_or(false)
    }
}
