/*
    validator.rs - Form drafts and their validation

    Drafts are what a user submits before anything reaches a store. A draft
    that validates converts into the store's `New*` or `*Patch` type; link
    rows missing either half are dropped during conversion.
*/

use crate::core_store::model::link::retain_complete;
use crate::core_store::model::{
    Airdrop, AirdropPatch, Link, NewAirdrop, NewTestnet, NewTool, NewVideo, Testnet,
    TestnetPatch, Tool, ToolPatch, UserId, Video, VideoPatch, MAX_LINKS,
};
use crate::core_store::store::errors::FieldErrors;
use regex::Regex;
use std::sync::LazyLock;

static VIDEO_ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9_-]{11}$").expect("valid regex"));

static VIDEO_URL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^.*(youtu.be/|v/|u/\w/|embed/|watch\?v=|&v=)([^#&?]*).*").expect("valid regex")
});

const YOUTUBE_ID_LEN: usize = 11;

/// Pull an 11-character YouTube id out of a bare id or a watch/embed URL
pub fn extract_youtube_id(input: &str) -> Option<String> {
    if input.is_empty() {
        return None;
    }
    if VIDEO_ID_RE.is_match(input) {
        return Some(input.to_string());
    }

    VIDEO_URL_RE
        .captures(input)
        .and_then(|caps| caps.get(2))
        .map(|m| m.as_str())
        .filter(|id| id.len() == YOUTUBE_ID_LEN)
        .map(str::to_string)
}

fn require(errors: &mut FieldErrors, field: &'static str, value: &str, message: &str) {
    if value.trim().is_empty() {
        errors.add(field, message);
    }
}

fn check_common(errors: &mut FieldErrors, title: &str, category: &str, description: &str) {
    require(errors, "title", title, "Title is required");
    require(errors, "category", category, "Category is required");
    require(errors, "description", description, "Description is required");
}

fn check_links(errors: &mut FieldErrors, links: &[Link]) {
    if links.iter().any(Link::is_half_filled) {
        errors.add("links", "All links must have both a name and URL");
    }
    if links.len() > MAX_LINKS {
        errors.add("links", format!("At most {} links are allowed", MAX_LINKS));
    }
}

/// Airdrop form
#[derive(Debug, Clone, Default)]
pub struct AirdropInput {
    pub title: String,
    pub category: String,
    pub description: String,
    pub links: Vec<Link>,
    pub funding_amount: String,
    pub rewards: String,
    pub time_commitment: String,
    pub work_required: String,
}

impl AirdropInput {
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        check_common(&mut errors, &self.title, &self.category, &self.description);
        check_links(&mut errors, &self.links);
        errors.into_result()
    }

    pub fn into_new(self, user_id: UserId) -> Result<NewAirdrop, FieldErrors> {
        self.validate()?;
        Ok(NewAirdrop {
            user_id,
            title: self.title,
            category: self.category,
            description: self.description,
            links: retain_complete(self.links),
            funding_amount: self.funding_amount,
            rewards: self.rewards,
            time_commitment: self.time_commitment,
            work_required: self.work_required,
        })
    }

    /// Full-form edit; flags are left alone
    pub fn into_patch(self) -> Result<AirdropPatch, FieldErrors> {
        self.validate()?;
        Ok(AirdropPatch {
            title: Some(self.title),
            category: Some(self.category),
            description: Some(self.description),
            links: Some(retain_complete(self.links)),
            funding_amount: Some(self.funding_amount),
            rewards: Some(self.rewards),
            time_commitment: Some(self.time_commitment),
            work_required: Some(self.work_required),
            completed: None,
            pinned: None,
        })
    }
}

/// Edit form prefilled from a stored airdrop
impl From<&Airdrop> for AirdropInput {
    fn from(airdrop: &Airdrop) -> Self {
        AirdropInput {
            title: airdrop.title.clone(),
            category: airdrop.category.clone(),
            description: airdrop.description.clone(),
            links: airdrop.links.clone(),
            funding_amount: airdrop.funding_amount.clone(),
            rewards: airdrop.rewards.clone(),
            time_commitment: airdrop.time_commitment.clone(),
            work_required: airdrop.work_required.clone(),
        }
    }
}

/// Testnet form
#[derive(Debug, Clone, Default)]
pub struct TestnetInput {
    pub title: String,
    pub category: String,
    pub description: String,
    pub links: Vec<Link>,
    pub progress: u8,
    pub rewards: String,
}

impl TestnetInput {
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        check_common(&mut errors, &self.title, &self.category, &self.description);
        check_links(&mut errors, &self.links);
        errors.into_result()
    }

    pub fn into_new(self, user_id: UserId) -> Result<NewTestnet, FieldErrors> {
        self.validate()?;
        Ok(NewTestnet {
            user_id,
            title: self.title,
            category: self.category,
            description: self.description,
            links: retain_complete(self.links),
            progress: clamp_progress(self.progress),
            rewards: self.rewards,
        })
    }

    pub fn into_patch(self) -> Result<TestnetPatch, FieldErrors> {
        self.validate()?;
        Ok(TestnetPatch {
            title: Some(self.title),
            category: Some(self.category),
            description: Some(self.description),
            links: Some(retain_complete(self.links)),
            progress: Some(clamp_progress(self.progress)),
            rewards: Some(self.rewards),
            completed: None,
            pinned: None,
        })
    }
}

impl From<&Testnet> for TestnetInput {
    fn from(testnet: &Testnet) -> Self {
        TestnetInput {
            title: testnet.title.clone(),
            category: testnet.category.clone(),
            description: testnet.description.clone(),
            links: testnet.links.clone(),
            progress: testnet.progress,
            rewards: testnet.rewards.clone(),
        }
    }
}

/// Progress slider range is 0..=100
pub fn clamp_progress(progress: u8) -> u8 {
    progress.min(100)
}

/// Tool form
#[derive(Debug, Clone, Default)]
pub struct ToolInput {
    pub title: String,
    pub category: String,
    pub description: String,
    pub link: String,
}

impl ToolInput {
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        check_common(&mut errors, &self.title, &self.category, &self.description);

        if self.link.trim().is_empty() {
            errors.add("link", "Link is required");
        } else if url::Url::parse(self.link.trim()).is_err() {
            errors.add("link", "Please enter a valid URL");
        }

        errors.into_result()
    }

    pub fn into_new(self, user_id: UserId) -> Result<NewTool, FieldErrors> {
        self.validate()?;
        Ok(NewTool {
            user_id,
            title: self.title,
            category: self.category,
            description: self.description,
            link: self.link.trim().to_string(),
        })
    }

    pub fn into_patch(self) -> Result<ToolPatch, FieldErrors> {
        self.validate()?;
        Ok(ToolPatch {
            title: Some(self.title),
            category: Some(self.category),
            description: Some(self.description),
            link: Some(self.link.trim().to_string()),
            pinned: None,
        })
    }
}

impl From<&Tool> for ToolInput {
    fn from(tool: &Tool) -> Self {
        ToolInput {
            title: tool.title.clone(),
            category: tool.category.clone(),
            description: tool.description.clone(),
            link: tool.link.clone(),
        }
    }
}

/// Video form; `video` accepts a bare id or any YouTube URL
#[derive(Debug, Clone, Default)]
pub struct VideoInput {
    pub title: String,
    pub category: String,
    pub description: String,
    pub video: String,
}

impl VideoInput {
    pub fn validate(&self) -> Result<(), FieldErrors> {
        self.checked().map(|_| ())
    }

    fn checked(&self) -> Result<String, FieldErrors> {
        let mut errors = FieldErrors::new();
        check_common(&mut errors, &self.title, &self.category, &self.description);

        let video_id = extract_youtube_id(&self.video);
        if video_id.is_none() {
            errors.add("videoId", "Valid YouTube video ID or URL is required");
        }

        errors.into_result()?;
        Ok(video_id.unwrap_or_default())
    }

    pub fn into_new(self, user_id: UserId) -> Result<NewVideo, FieldErrors> {
        let video_id = self.checked()?;
        Ok(NewVideo {
            user_id,
            title: self.title,
            category: self.category,
            description: self.description,
            video_id,
        })
    }

    pub fn into_patch(self) -> Result<VideoPatch, FieldErrors> {
        let video_id = self.checked()?;
        Ok(VideoPatch {
            title: Some(self.title),
            category: Some(self.category),
            description: Some(self.description),
            video_id: Some(video_id),
            pinned: None,
        })
    }
}

impl From<&Video> for VideoInput {
    fn from(video: &Video) -> Self {
        VideoInput {
            title: video.title.clone(),
            category: video.category.clone(),
            description: video.description.clone(),
            video: video.video_id.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn airdrop_input() -> AirdropInput {
        AirdropInput {
            title: "Layer0".to_string(),
            category: "Layer 1 & Testnet Mainnet".to_string(),
            description: "Bridge and vote".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_required_fields() {
        let errors = AirdropInput {
            title: "   ".to_string(),
            ..Default::default()
        }
        .validate()
        .unwrap_err();

        assert_eq!(errors.get("title"), Some("Title is required"));
        assert_eq!(errors.get("category"), Some("Category is required"));
        assert_eq!(errors.get("description"), Some("Description is required"));
    }

    #[test]
    fn test_half_filled_link_rejected() {
        let mut input = airdrop_input();
        input.links = vec![Link::new("site", "")];

        let errors = input.validate().unwrap_err();
        assert_eq!(errors.get("links"), Some("All links must have both a name and URL"));
    }

    #[test]
    fn test_too_many_links_rejected() {
        let mut input = airdrop_input();
        input.links = (0..=MAX_LINKS)
            .map(|i| Link::new(format!("l{i}"), "https://example.com"))
            .collect();
        assert!(input.validate().unwrap_err().contains("links"));
    }

    #[test]
    fn test_blank_links_dropped_on_submit() {
        let mut input = airdrop_input();
        input.links = vec![
            Link::new("site", "https://example.com"),
            Link::new("", "  "),
        ];

        let new = input.into_new(UserId::new("u1")).unwrap();
        assert_eq!(new.links.len(), 1);
        assert_eq!(new.links[0].name, "site");
        assert_eq!(new.user_id, UserId::new("u1"));
    }

    #[test]
    fn test_patch_leaves_flags_alone() {
        let patch = airdrop_input().into_patch().unwrap();
        assert_eq!(patch.title.as_deref(), Some("Layer0"));
        assert!(patch.completed.is_none());
        assert!(patch.pinned.is_none());
    }

    #[test]
    fn test_prefilled_draft_round_trips() {
        use crate::core_store::model::{Entity, EntityId, Timestamp};

        let stored = Airdrop::create(
            airdrop_input().into_new(UserId::new("u1")).unwrap(),
            EntityId::new("a1"),
            Timestamp::from_millis(1),
        );
        let draft = AirdropInput::from(&stored);
        assert_eq!(draft.title, "Layer0");
        assert!(draft.validate().is_ok());
    }

    #[test]
    fn test_testnet_progress_clamped() {
        let new = TestnetInput {
            title: "Galxe".to_string(),
            category: "Galxe Testnet".to_string(),
            description: "quests".to_string(),
            progress: 250,
            ..Default::default()
        }
        .into_new(UserId::new("u1"))
        .unwrap();
        assert_eq!(new.progress, 100);
    }

    #[test]
    fn test_tool_link_rules() {
        let mut input = ToolInput {
            title: "Revoke".to_string(),
            category: "Wallet Connect".to_string(),
            description: "approvals".to_string(),
            link: String::new(),
        };
        assert_eq!(input.validate().unwrap_err().get("link"), Some("Link is required"));

        input.link = "revoke cash".to_string();
        assert_eq!(
            input.validate().unwrap_err().get("link"),
            Some("Please enter a valid URL")
        );

        input.link = "https://revoke.cash".to_string();
        assert!(input.validate().is_ok());
    }

    #[test]
    fn test_extract_youtube_id() {
        assert_eq!(extract_youtube_id("dQw4w9WgXcQ").as_deref(), Some("dQw4w9WgXcQ"));
        assert_eq!(
            extract_youtube_id("https://www.youtube.com/watch?v=dQw4w9WgXcQ&t=42").as_deref(),
            Some("dQw4w9WgXcQ")
        );
        assert_eq!(
            extract_youtube_id("https://youtu.be/dQw4w9WgXcQ").as_deref(),
            Some("dQw4w9WgXcQ")
        );
        assert_eq!(
            extract_youtube_id("https://www.youtube.com/embed/dQw4w9WgXcQ").as_deref(),
            Some("dQw4w9WgXcQ")
        );
        assert_eq!(extract_youtube_id("https://youtu.be/short"), None);
        assert_eq!(extract_youtube_id(""), None);
    }

    #[test]
    fn test_video_input_stores_extracted_id() {
        let new = VideoInput {
            title: "Intro".to_string(),
            category: "Tutorials".to_string(),
            description: "basics".to_string(),
            video: "https://youtu.be/dQw4w9WgXcQ".to_string(),
        }
        .into_new(UserId::new("u1"))
        .unwrap();
        assert_eq!(new.video_id, "dQw4w9WgXcQ");

        let errors = VideoInput::default().validate().unwrap_err();
        assert_eq!(
            errors.get("videoId"),
            Some("Valid YouTube video ID or URL is required")
        );
    }
}
