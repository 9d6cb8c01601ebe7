/*
    entity_store.rs - Generic per-kind record store

    One implementation backs the airdrop, testnet, tool and video stores.
    State lives in memory; every mutation rewrites the whole snapshot under
    the kind's storage key so a restart rehydrates exactly what was last
    written. Lookup misses on update/delete/toggle are silent no-ops.
*/

use crate::core_store::model::{
    Airdrop, Category, Completable, Entity, EntityId, Testnet, Timestamp, Tool, UserId, Video,
};
use crate::core_store::store::errors::StoreResult;
use crate::core_store::store::kv::KeyValueStore;
use crate::core_store::store::snapshot::SnapshotAdapter;
use serde::de::{self, DeserializeOwned};
use serde::ser::SerializeStruct;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::sync::Arc;

/// Persisted layout of one store domain
///
/// The record list is stored under the kind's collection key (`airdrops`,
/// `testnets`, `tools`, `videos`); the remaining fields are shared.
#[derive(Debug, Clone, PartialEq)]
pub struct EntityState<T> {
    pub items: Vec<T>,
    pub categories: Vec<Category>,
    pub is_loading: bool,
    pub error: Option<String>,
}

impl<T: Entity> Serialize for EntityState<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("EntityState", 4)?;
        state.serialize_field(T::KIND.collection_key(), &self.items)?;
        state.serialize_field("categories", &self.categories)?;
        state.serialize_field("isLoading", &self.is_loading)?;
        state.serialize_field("error", &self.error)?;
        state.end()
    }
}

impl<'de, T: Entity> Deserialize<'de> for EntityState<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let mut fields = serde_json::Map::deserialize(deserializer)?;

        // Missing fields fall back to their defaults, unknown ones are ignored
        fn take<T: DeserializeOwned + Default, E: de::Error>(
            fields: &mut serde_json::Map<String, serde_json::Value>,
            key: &str,
        ) -> Result<T, E> {
            match fields.remove(key) {
                Some(value) => serde_json::from_value(value).map_err(E::custom),
                None => Ok(T::default()),
            }
        }

        Ok(EntityState {
            items: take::<_, D::Error>(&mut fields, T::KIND.collection_key())?,
            categories: take::<_, D::Error>(&mut fields, "categories")?,
            is_loading: take::<_, D::Error>(&mut fields, "isLoading")?,
            error: take::<_, D::Error>(&mut fields, "error")?,
        })
    }
}

impl<T: Entity> EntityState<T> {
    /// Empty list with the kind's seeded categories
    pub fn seeded() -> Self {
        EntityState {
            items: Vec::new(),
            categories: T::default_categories(),
            is_loading: false,
            error: None,
        }
    }
}

/// Store for one kind of record
pub struct EntityStore<T: Entity> {
    snapshots: SnapshotAdapter,
    state: EntityState<T>,
}

pub type AirdropStore = EntityStore<Airdrop>;
pub type TestnetStore = EntityStore<Testnet>;
pub type ToolStore = EntityStore<Tool>;
pub type VideoStore = EntityStore<Video>;

impl<T: Entity> EntityStore<T> {
    /// Rehydrate from the backend, or start with default categories
    pub fn open(kv: Arc<dyn KeyValueStore>) -> StoreResult<Self> {
        let snapshots = SnapshotAdapter::new(kv);
        let state = match snapshots.load::<EntityState<T>>(T::KIND.storage_key())? {
            Some(state) => {
                tracing::debug!(
                    kind = %T::KIND,
                    items = state.items.len(),
                    categories = state.categories.len(),
                    "store rehydrated"
                );
                state
            }
            None => {
                tracing::debug!(kind = %T::KIND, "no snapshot found, seeding categories");
                EntityState::seeded()
            }
        };

        Ok(EntityStore { snapshots, state })
    }

    /// Create a record with a fresh id and timestamp, prepended to the list
    pub fn add(&mut self, new: T::New) -> StoreResult<T> {
        let entity = T::create(new, EntityId::generate(), Timestamp::now());
        self.state.items.insert(0, entity.clone());
        self.persist()?;

        tracing::info!(kind = %T::KIND, id = %entity.id(), "{} added successfully", T::KIND.label());
        Ok(entity)
    }

    /// Merge a patch into the record with `id`; returns whether it exists
    pub fn update(&mut self, id: &EntityId, patch: T::Patch) -> StoreResult<bool> {
        let found = match self.find_mut(id) {
            Some(entity) => {
                entity.apply(patch);
                true
            }
            None => false,
        };
        self.persist()?;

        if found {
            tracing::info!(kind = %T::KIND, %id, "{} updated successfully", T::KIND.label());
        }
        Ok(found)
    }

    /// Remove the record with `id`; returns whether it existed
    pub fn delete(&mut self, id: &EntityId) -> StoreResult<bool> {
        let before = self.state.items.len();
        self.state.items.retain(|e| e.id() != id);
        let removed = self.state.items.len() != before;
        self.persist()?;

        if removed {
            tracing::info!(kind = %T::KIND, %id, "{} deleted successfully", T::KIND.label());
        }
        Ok(removed)
    }

    /// Flip the pinned flag; returns the new value when the record exists
    pub fn toggle_pinned(&mut self, id: &EntityId) -> StoreResult<Option<bool>> {
        let pinned = self.find_mut(id).map(|entity| {
            let pinned = !entity.pinned();
            entity.set_pinned(pinned);
            pinned
        });
        self.persist()?;

        if let Some(pinned) = pinned {
            let verb = if pinned { "pinned" } else { "unpinned" };
            tracing::info!(kind = %T::KIND, %id, "{} {}", T::KIND.label(), verb);
        }
        Ok(pinned)
    }

    /// Append a category; names are not checked for duplicates
    pub fn add_category(&mut self, name: impl Into<String>) -> StoreResult<Category> {
        let category = Category::new(name);
        self.state.categories.push(category.clone());
        self.persist()?;

        tracing::info!(kind = %T::KIND, name = %category.name, "Category added successfully");
        Ok(category)
    }

    /// Records owned by `user_id`, in store order
    pub fn get_for_user(&self, user_id: &UserId) -> Vec<T> {
        self.state
            .items
            .iter()
            .filter(|e| e.user_id() == user_id)
            .cloned()
            .collect()
    }

    /// Pinned records owned by `user_id`
    pub fn get_pinned(&self, user_id: &UserId) -> Vec<T> {
        self.state
            .items
            .iter()
            .filter(|e| e.user_id() == user_id && e.pinned())
            .cloned()
            .collect()
    }

    pub fn get(&self, id: &EntityId) -> Option<&T> {
        self.state.items.iter().find(|e| e.id() == id)
    }

    pub fn all(&self) -> &[T] {
        &self.state.items
    }

    pub fn categories(&self) -> &[Category] {
        &self.state.categories
    }

    /// Always false: mutations complete before returning
    pub fn is_loading(&self) -> bool {
        self.state.is_loading
    }

    /// Message of the last failed snapshot write, if any
    pub fn error(&self) -> Option<&str> {
        self.state.error.as_deref()
    }

    pub(crate) fn snapshots(&self) -> &SnapshotAdapter {
        &self.snapshots
    }

    fn find_mut(&mut self, id: &EntityId) -> Option<&mut T> {
        self.state.items.iter_mut().find(|e| e.id() == id)
    }

    fn persist(&mut self) -> StoreResult<()> {
        let key = T::KIND.storage_key();
        match self.snapshots.save(key, &self.state) {
            Ok(()) => {
                self.state.error = None;
                Ok(())
            }
            Err(e) => {
                tracing::error!(kind = %T::KIND, error = %e, "failed to persist store");
                self.state.error = Some(e.to_string());
                Err(e)
            }
        }
    }
}

impl<T: Completable> EntityStore<T> {
    /// Flip the completed flag; returns the new value when the record exists
    pub fn toggle_completed(&mut self, id: &EntityId) -> StoreResult<Option<bool>> {
        let completed = self.find_mut(id).map(|entity| {
            let completed = !entity.is_completed();
            entity.set_completed(completed);
            completed
        });
        self.persist()?;

        if let Some(completed) = completed {
            let state = if completed { "completed" } else { "incomplete" };
            tracing::info!(kind = %T::KIND, %id, "{} marked as {}", T::KIND.label(), state);
        }
        Ok(completed)
    }
}

impl EntityStore<Testnet> {
    /// Set a testnet's progress; the store does not clamp the value
    pub fn update_progress(&mut self, id: &EntityId, progress: u8) -> StoreResult<bool> {
        let found = match self.find_mut(id) {
            Some(testnet) => {
                testnet.progress = progress;
                true
            }
            None => false,
        };
        self.persist()?;

        if found {
            tracing::info!(%id, progress, "Progress updated");
        }
        Ok(found)
    }
}
