use super::category::Category;
use super::entity::Entity;
use super::types::{EntityId, EntityKind, Timestamp, UserId};
use serde::{Deserialize, Serialize};

pub const DEFAULT_TOOL_CATEGORIES: &[&str] = &[
    "Wallet Connect",
    "Airdrop Claim Checker",
    "Gas Fee Calculator",
    "Testnet Token Faucets",
    "Crypto Wallet Extensions",
    "Swaps & Bridges",
];

/// A bookmarked external tool
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tool {
    pub id: EntityId,
    pub user_id: UserId,
    pub title: String,
    pub category: String,
    pub description: String,
    pub link: String,
    pub pinned: bool,
    pub created_at: Timestamp,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTool {
    pub user_id: UserId,
    pub title: String,
    pub category: String,
    pub description: String,
    pub link: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolPatch {
    pub title: Option<String>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub link: Option<String>,
    pub pinned: Option<bool>,
}

impl Entity for Tool {
    const KIND: EntityKind = EntityKind::Tool;
    type New = NewTool;
    type Patch = ToolPatch;

    fn create(new: NewTool, id: EntityId, created_at: Timestamp) -> Self {
        Tool {
            id,
            user_id: new.user_id,
            title: new.title,
            category: new.category,
            description: new.description,
            link: new.link,
            pinned: false,
            created_at,
        }
    }

    fn apply(&mut self, patch: ToolPatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(category) = patch.category {
            self.category = category;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(link) = patch.link {
            self.link = link;
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
        Category::seed(DEFAULT_TOOL_CATEGORIES)
    }
}
