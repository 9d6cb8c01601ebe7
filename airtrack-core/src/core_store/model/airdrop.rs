/*
    airdrop.rs - Airdrop record

    An airdrop campaign the user is farming: where it lives (links), what it
    costs (funding, time, work) and what it might pay (rewards).
*/

use super::category::Category;
use super::entity::{Completable, Entity};
use super::link::Link;
use super::types::{EntityId, EntityKind, Timestamp, UserId};
use serde::{Deserialize, Serialize};

pub const DEFAULT_AIRDROP_CATEGORIES: &[&str] = &[
    "Layer 1 & Testnet Mainnet",
    "Telegram Bot Airdrops",
    "Daily Check-in Airdrops",
    "Twitter Airdrops",
    "Social Airdrops",
    "AI Airdrops",
    "Wallet Airdrops",
    "Exchange Airdrops",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Airdrop {
    pub id: EntityId,
    pub user_id: UserId,
    pub title: String,
    pub category: String,
    pub description: String,
    #[serde(default)]
    pub links: Vec<Link>,
    #[serde(default)]
    pub funding_amount: String,
    #[serde(default)]
    pub rewards: String,
    #[serde(default)]
    pub time_commitment: String,
    #[serde(default)]
    pub work_required: String,
    pub completed: bool,
    pub pinned: bool,
    pub created_at: Timestamp,
}

/// Fields supplied when adding an airdrop
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAirdrop {
    pub user_id: UserId,
    pub title: String,
    pub category: String,
    pub description: String,
    pub links: Vec<Link>,
    pub funding_amount: String,
    pub rewards: String,
    pub time_commitment: String,
    pub work_required: String,
}

/// Partial airdrop update; `None` leaves a field untouched
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AirdropPatch {
    pub title: Option<String>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub links: Option<Vec<Link>>,
    pub funding_amount: Option<String>,
    pub rewards: Option<String>,
    pub time_commitment: Option<String>,
    pub work_required: Option<String>,
    pub completed: Option<bool>,
    pub pinned: Option<bool>,
}

impl Entity for Airdrop {
    const KIND: EntityKind = EntityKind::Airdrop;
    type New = NewAirdrop;
    type Patch = AirdropPatch;

    fn create(new: NewAirdrop, id: EntityId, created_at: Timestamp) -> Self {
        Airdrop {
            id,
            user_id: new.user_id,
            title: new.title,
            category: new.category,
            description: new.description,
            links: new.links,
            funding_amount: new.funding_amount,
            rewards: new.rewards,
            time_commitment: new.time_commitment,
            work_required: new.work_required,
            completed: false,
            pinned: false,
            created_at,
        }
    }

    fn apply(&mut self, patch: AirdropPatch) {
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
        if let Some(funding_amount) = patch.funding_amount {
            self.funding_amount = funding_amount;
        }
        if let Some(rewards) = patch.rewards {
            self.rewards = rewards;
        }
        if let Some(time_commitment) = patch.time_commitment {
            self.time_commitment = time_commitment;
        }
        if let Some(work_required) = patch.work_required {
            self.work_required = work_required;
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
        Category::seed(DEFAULT_AIRDROP_CATEGORIES)
    }

    fn completed(&self) -> Option<bool> {
        Some(self.completed)
    }
}

impl Completable for Airdrop {
    fn set_completed(&mut self, completed: bool) {
        self.completed = completed;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_sets_default_flags() {
        let new = NewAirdrop {
            user_id: UserId::new("u1"),
            title: "Layer0".to_string(),
            ..Default::default()
        };
        let airdrop = Airdrop::create(new, EntityId::new("a1"), Timestamp::from_millis(5));

        assert!(!airdrop.completed);
        assert!(!airdrop.pinned);
        assert_eq!(airdrop.created_at, Timestamp::from_millis(5));
    }

    #[test]
    fn test_patch_only_touches_some_fields() {
        let mut airdrop = Airdrop::create(
            NewAirdrop {
                title: "Old".to_string(),
                rewards: "TBA".to_string(),
                ..Default::default()
            },
            EntityId::new("a1"),
            Timestamp::from_millis(1),
        );

        airdrop.apply(AirdropPatch {
            title: Some("New".to_string()),
            completed: Some(true),
            ..Default::default()
        });

        assert_eq!(airdrop.title, "New");
        assert_eq!(airdrop.rewards, "TBA");
        assert!(airdrop.completed);
    }

    #[test]
    fn test_camel_case_layout() {
        let airdrop = Airdrop::create(
            NewAirdrop::default(),
            EntityId::new("a1"),
            Timestamp::from_millis(1),
        );
        let value = serde_json::to_value(&airdrop).unwrap();
        assert!(value.get("userId").is_some());
        assert!(value.get("fundingAmount").is_some());
        assert_eq!(value["createdAt"], 1);
    }
}
