use super::category::Category;
use super::entity::{Completable, Entity};
use super::link::Link;
use super::types::{EntityId, EntityKind, Timestamp, UserId};
use serde::{Deserialize, Serialize};

pub const DEFAULT_TESTNET_CATEGORIES: &[&str] = &[
    "Galxe Testnet",
    "Bridge Mining",
    "Mining Sessions",
    "Daily Testnet Tasks",
];

/// A testnet the user participates in
///
/// `progress` is a percentage by convention; only the form layer clamps it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Testnet {
    pub id: EntityId,
    pub user_id: UserId,
    pub title: String,
    pub category: String,
    pub description: String,
    #[serde(default)]
    pub links: Vec<Link>,
    #[serde(default)]
    pub progress: u8,
    #[serde(default)]
    pub rewards: String,
    pub completed: bool,
    pub pinned: bool,
    pub created_at: Timestamp,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTestnet {
    pub user_id: UserId,
    pub title: String,
    pub category: String,
    pub description: String,
    pub links: Vec<Link>,
    pub progress: u8,
    pub rewards: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestnetPatch {
    pub title: Option<String>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub links: Option<Vec<Link>>,
    pub progress: Option<u8>,
    pub rewards: Option<String>,
    pub completed: Option<bool>,
    pub pinned: Option<bool>,
}

impl Entity for Testnet {
    const KIND: EntityKind = EntityKind::Testnet;
    type New = NewTestnet;
    type Patch = TestnetPatch;

    fn create(new: NewTestnet, id: EntityId, created_at: Timestamp) -> Self {
        Testnet {
            id,
            user_id: new.user_id,
            title: new.title,
            category: new.category,
            description: new.description,
            links: new.links,
            progress: new.progress,
            rewards: new.rewards,
            completed: false,
            pinned: false,
            created_at,
        }
    }

    fn apply(&mut self, patch: TestnetPatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(category) = patch.category {
            self.category = category;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(links) = patch.links {
            self.links = links;
        }
        if let Some(progress) = patch.progress {
            self.progress = progress;
        }
        if let Some(rewards) = patch.rewards {
            self.rewards = rewards;
        }
        if let Some(completed) = patch.completed {
            self.completed = completed;
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
        Category::seed(DEFAULT_TESTNET_CATEGORIES)
    }

    fn completed(&self) -> Option<bool> {
        Some(self.completed)
    }
}

impl Completable for Testnet {
    fn set_completed(&mut self, completed: bool) {
        self.completed = completed;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_patch() {
        let mut testnet = Testnet::create(
            NewTestnet {
                progress: 10,
                ..Default::default()
            },
            EntityId::new("t1"),
            Timestamp::from_millis(1),
        );

        testnet.apply(TestnetPatch {
            progress: Some(75),
            ..Default::default()
        });

        assert_eq!(testnet.progress, 75);
        assert!(!testnet.completed);
    }
}
