/*
    Store subsystem - Persistence layer
*/

pub mod daily_reset;
pub mod entity_store;
pub mod errors;
pub mod kv;
pub mod snapshot;
pub mod validator;

pub use daily_reset::{DailyReset, DAILY_RESET_KEY};
pub use entity_store::{
    AirdropStore, EntityState, EntityStore, TestnetStore, ToolStore, VideoStore,
};
pub use errors::*;
pub use kv::{FileKvStore, KeyValueStore, MemoryKvStore};
pub use snapshot::SnapshotAdapter;
pub use validator::{extract_youtube_id, AirdropInput, TestnetInput, ToolInput, VideoInput};
