use super::category::Category;
use super::entity::Entity;
use super::types::{EntityId, EntityKind, Timestamp, UserId};
use serde::{Deserialize, Serialize};

pub const DEFAULT_VIDEO_CATEGORIES: &[&str] = &["Tutorials", "Crypto News", "Airdrops", "Testnets"];

/// A saved video, addressed by its YouTube id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Video {
    pub id: EntityId,
    pub user_id: UserId,
    pub title: String,
    pub category: String,
    pub description: String,
    pub video_id: String,
    pub pinned: bool,
    pub created_at: Timestamp,
}

impl Video {
    /// Embed address for the external player
    pub fn embed_url(&self) -> String {
        format!("https://www.youtube.com/embed/{}", self.video_id)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewVideo {
    pub user_id: UserId,
    pub title: String,
    pub category: String,
    pub description: String,
    pub video_id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoPatch {
    pub title: Option<String>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub video_id: Option<String>,
    pub pinned: Option<bool>,
}

impl Entity for Video {
    const KIND: EntityKind = EntityKind::Video;
    type New = NewVideo;
    type Patch = VideoPatch;

    fn create(new: NewVideo, id: EntityId, created_at: Timestamp) -> Self {
        Video {
            id,
            user_id: new.user_id,
            title: new.title,
            category: new.category,
            description: new.description,
            video_id: new.video_id,
            pinned: false,
            created_at,
        }
    }

    fn apply(&mut self, patch: VideoPatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(category) = patch.category {
            self.category = category;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(video_id) = patch.video_id {
            self.video_id = video_id;
        }
        if let Some(pinned) = patch.pinned {
            self.pinned = pinned;
        }
    }

    fn id(&self) -> &EntityId {
        &self.id
    }

    fn user_id(&self) -> &UserId {
        &self.user_id
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn category(&self) -> &str {
        &self.category
    }

    fn pinned(&self) -> bool {
        self.pinned
    }

    fn set_pinned(&mut self, pinned: bool) {
        self.pinned = pinned;
    }

    fn created_at(&self) -> Timestamp {
        self.created_at
    }

    fn default_categories() -> Vec<Category> {
        Category::seed(DEFAULT_VIDEO_CATEGORIES)
    }
}
