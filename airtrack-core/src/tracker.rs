/*
    tracker.rs - Application state container

    Owns the auth manager and the four entity stores over one shared
    key-value backend. Everything except the session operations requires
    a logged-in user; record operations only see that user's records.
*/

use crate::config::Config;
use crate::core_identity::{AuthError, AuthManager, Registration, User};
use crate::core_store::model::{
    Airdrop, Category, Completable, Entity, EntityId, Testnet, Tool, UserId, Video,
};
use crate::core_store::query::{DashboardStats, ListQuery};
use crate::core_store::store::validator::clamp_progress;
use crate::core_store::store::{
    AirdropInput, AirdropStore, EntityStore, FieldErrors, FileKvStore, KeyValueStore, StoreError,
    TestnetInput, TestnetStore, ToolInput, ToolStore, VideoInput, VideoStore,
};
use chrono::NaiveDate;
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TrackerError {
    #[error("Not authenticated")]
    NotAuthenticated,

    #[error("Invalid form: {0}")]
    Validation(FieldErrors),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<FieldErrors> for TrackerError {
    fn from(errors: FieldErrors) -> Self {
        TrackerError::Validation(errors)
    }
}

pub type TrackerResult<T> = Result<T, TrackerError>;

/// Record kinds the tracker can route to a store
pub trait Tracked: Entity {
    /// Form submitted for add and edit
    type Draft;

    fn store(tracker: &Tracker) -> &EntityStore<Self>;
    fn store_mut(tracker: &mut Tracker) -> &mut EntityStore<Self>;
    fn draft_to_new(draft: Self::Draft, user_id: UserId) -> Result<Self::New, FieldErrors>;
    fn draft_to_patch(draft: Self::Draft) -> Result<Self::Patch, FieldErrors>;
}

macro_rules! impl_tracked {
    ($entity:ty, $draft:ty, $field:ident) => {
        impl Tracked for $entity {
            type Draft = $draft;

            fn store(tracker: &Tracker) -> &EntityStore<Self> {
                &tracker.$field
            }

            fn store_mut(tracker: &mut Tracker) -> &mut EntityStore<Self> {
                &mut tracker.$field
            }

            fn draft_to_new(draft: $draft, user_id: UserId) -> Result<Self::New, FieldErrors> {
                draft.into_new(user_id)
            }

            fn draft_to_patch(draft: $draft) -> Result<Self::Patch, FieldErrors> {
                draft.into_patch()
            }
        }
    };
}

impl_tracked!(Airdrop, AirdropInput, airdrops);
impl_tracked!(Testnet, TestnetInput, testnets);
impl_tracked!(Tool, ToolInput, tools);
impl_tracked!(Video, VideoInput, videos);

pub struct Tracker {
    config: Config,
    kv: Arc<dyn KeyValueStore>,
    auth: AuthManager,
    airdrops: AirdropStore,
    testnets: TestnetStore,
    tools: ToolStore,
    videos: VideoStore,
}

impl Tracker {
    /// File-backed tracker rooted at `config.store.data_dir`
    pub fn open(config: Config) -> TrackerResult<Self> {
        let kv = Self::file_backend(&config)?;
        Self::with_backend(config, kv)
    }

    /// File-backed tracker that leaves the daily check to an explicit
    /// `daily_check` call
    pub fn open_without_daily_check(config: Config) -> TrackerResult<Self> {
        let kv = Self::file_backend(&config)?;
        Self::build(config, kv, false)
    }

    /// Tracker over any backend; rehydrates every store and runs the daily check
    pub fn with_backend(config: Config, kv: Arc<dyn KeyValueStore>) -> TrackerResult<Self> {
        Self::build(config, kv, true)
    }

    fn file_backend(config: &Config) -> TrackerResult<Arc<dyn KeyValueStore>> {
        let kv = Arc::new(FileKvStore::new(&config.store.data_dir)?);
        tracing::debug!(data_dir = %config.store.data_dir.display(), "opening tracker");
        Ok(kv)
    }

    fn build(
        config: Config,
        kv: Arc<dyn KeyValueStore>,
        startup_check: bool,
    ) -> TrackerResult<Self> {
        let auth = AuthManager::open(config.auth.clone(), kv.clone())?;
        let airdrops = AirdropStore::open(kv.clone())?;
        let testnets = TestnetStore::open(kv.clone())?;
        let tools = ToolStore::open(kv.clone())?;
        let videos = VideoStore::open(kv.clone())?;

        if startup_check {
            airdrops.check_daily_reset(chrono::Local::now().date_naive())?;
        }

        Ok(Tracker {
            config,
            kv,
            auth,
            airdrops,
            testnets,
            tools,
            videos,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn backend(&self) -> &Arc<dyn KeyValueStore> {
        &self.kv
    }

    // Session

    pub async fn login(&mut self, email: &str, password: &str) -> TrackerResult<User> {
        Ok(self.auth.login(email, password).await?)
    }

    pub async fn register(&mut self, form: Registration) -> TrackerResult<User> {
        Ok(self.auth.register(form).await?)
    }

    pub fn logout(&mut self) -> TrackerResult<()> {
        Ok(self.auth.logout()?)
    }

    pub fn check_auth(&self) -> bool {
        self.auth.check_auth()
    }

    pub fn current_user(&self) -> Option<&User> {
        self.auth.current_user()
    }

    pub fn auth(&self) -> &AuthManager {
        &self.auth
    }

    fn require_user(&self) -> TrackerResult<UserId> {
        self.auth
            .current_user()
            .map(|user| user.id.clone())
            .ok_or(TrackerError::NotAuthenticated)
    }

    /// Whether `id` names a record owned by `user_id`
    fn owned<T: Tracked>(&self, user_id: &UserId, id: &EntityId) -> bool {
        T::store(self)
            .get(id)
            .map(|entity| entity.user_id() == user_id)
            .unwrap_or(false)
    }

    // Records

    /// Validate a draft and add it for the current user
    pub fn submit<T: Tracked>(&mut self, draft: T::Draft) -> TrackerResult<T> {
        let user_id = self.require_user()?;
        let new = T::draft_to_new(draft, user_id)?;
        Ok(T::store_mut(self).add(new)?)
    }

    /// Validate a draft and apply it to an owned record
    pub fn edit<T: Tracked>(&mut self, id: &EntityId, draft: T::Draft) -> TrackerResult<bool> {
        let user_id = self.require_user()?;
        let patch = T::draft_to_patch(draft)?;
        if !self.owned::<T>(&user_id, id) {
            return Ok(false);
        }
        Ok(T::store_mut(self).update(id, patch)?)
    }

    pub fn delete<T: Tracked>(&mut self, id: &EntityId) -> TrackerResult<bool> {
        let user_id = self.require_user()?;
        if !self.owned::<T>(&user_id, id) {
            return Ok(false);
        }
        Ok(T::store_mut(self).delete(id)?)
    }

    pub fn toggle_pinned<T: Tracked>(&mut self, id: &EntityId) -> TrackerResult<Option<bool>> {
        let user_id = self.require_user()?;
        if !self.owned::<T>(&user_id, id) {
            return Ok(None);
        }
        Ok(T::store_mut(self).toggle_pinned(id)?)
    }

    pub fn toggle_completed<T: Tracked + Completable>(
        &mut self,
        id: &EntityId,
    ) -> TrackerResult<Option<bool>> {
        let user_id = self.require_user()?;
        if !self.owned::<T>(&user_id, id) {
            return Ok(None);
        }
        Ok(T::store_mut(self).toggle_completed(id)?)
    }

    /// Set testnet progress, clamped to 100
    pub fn update_progress(&mut self, id: &EntityId, progress: u8) -> TrackerResult<bool> {
        let user_id = self.require_user()?;
        if !self.owned::<Testnet>(&user_id, id) {
            return Ok(false);
        }
        Ok(self.testnets.update_progress(id, clamp_progress(progress))?)
    }

    pub fn get<T: Tracked>(&self, id: &EntityId) -> TrackerResult<Option<T>> {
        let user_id = self.require_user()?;
        Ok(T::store(self)
            .get(id)
            .filter(|entity| entity.user_id() == &user_id)
            .cloned())
    }

    /// The current user's records, filtered and sorted
    pub fn list<T: Tracked>(&self, query: &ListQuery) -> TrackerResult<Vec<T>> {
        let user_id = self.require_user()?;
        Ok(query.apply(&T::store(self).get_for_user(&user_id)))
    }

    pub fn pinned<T: Tracked>(&self) -> TrackerResult<Vec<T>> {
        let user_id = self.require_user()?;
        Ok(T::store(self).get_pinned(&user_id))
    }

    pub fn categories<T: Tracked>(&self) -> TrackerResult<&[Category]> {
        self.require_user()?;
        Ok(T::store(self).categories())
    }

    pub fn add_category<T: Tracked>(&mut self, name: &str) -> TrackerResult<Category> {
        self.require_user()?;

        let name = name.trim();
        if name.is_empty() {
            let mut errors = FieldErrors::new();
            errors.add("newCategory", "Category name is required");
            return Err(errors.into());
        }
        Ok(T::store_mut(self).add_category(name)?)
    }

    // Dashboard

    pub fn dashboard(&self) -> TrackerResult<DashboardStats> {
        let user_id = self.require_user()?;
        Ok(DashboardStats::compute(
            &self.airdrops.get_for_user(&user_id),
            &self.testnets.get_for_user(&user_id),
        ))
    }

    /// Run the daily airdrop reset if it has not run on `today`
    pub fn daily_check(&self, today: NaiveDate) -> TrackerResult<bool> {
        Ok(self.airdrops.check_daily_reset(today)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core_store::model::Link;
    use crate::core_store::query::StatusFilter;
    use crate::core_store::store::MemoryKvStore;
    use std::time::Duration;

    fn config() -> Config {
        let mut config = Config::default();
        config.auth.simulated_latency = Duration::ZERO;
        config
    }

    fn registration(email: &str) -> Registration {
        Registration {
            username: "alice".to_string(),
            email: email.to_string(),
            password: "hunter22".to_string(),
            invite_code: config().auth.invite_code,
            telegram_username: "@alice".to_string(),
        }
    }

    fn layer0() -> AirdropInput {
        AirdropInput {
            title: "Layer0".to_string(),
            category: "Layer 1 & Testnet Mainnet".to_string(),
            description: "Bridge weekly".to_string(),
            links: vec![Link::new("site", "https://example.com"), Link::new("", "")],
            ..Default::default()
        }
    }

    async fn signed_in(kv: Arc<dyn KeyValueStore>, email: &str) -> Tracker {
        let mut tracker = Tracker::with_backend(config(), kv).unwrap();
        tracker.register(registration(email)).await.unwrap();
        tracker
    }

    #[test]
    fn test_gate_requires_session() {
        let mut tracker = Tracker::with_backend(config(), Arc::new(MemoryKvStore::new())).unwrap();

        assert!(matches!(
            tracker.submit::<Airdrop>(layer0()),
            Err(TrackerError::NotAuthenticated)
        ));
        assert!(matches!(tracker.dashboard(), Err(TrackerError::NotAuthenticated)));
        assert!(matches!(
            tracker.list::<Tool>(&ListQuery::new()),
            Err(TrackerError::NotAuthenticated)
        ));
        assert!(!tracker.check_auth());
    }

    #[tokio::test]
    async fn test_submit_filters_links() {
        let mut tracker = signed_in(Arc::new(MemoryKvStore::new()), "alice@example.com").await;

        let airdrop = tracker.submit::<Airdrop>(layer0()).unwrap();
        assert_eq!(airdrop.links.len(), 1);
        assert_eq!(&airdrop.user_id, &tracker.current_user().unwrap().id);
    }

    #[tokio::test]
    async fn test_invalid_draft_leaves_store_untouched() {
        let mut tracker = signed_in(Arc::new(MemoryKvStore::new()), "alice@example.com").await;

        let err = tracker
            .submit::<Tool>(ToolInput {
                title: "Revoke".to_string(),
                category: "Wallet Connect".to_string(),
                description: "approvals".to_string(),
                link: "not a url".to_string(),
            })
            .unwrap_err();
        assert!(matches!(err, TrackerError::Validation(_)));
        assert!(tracker.list::<Tool>(&ListQuery::new()).unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_other_users_records_are_invisible() {
        let kv: Arc<dyn KeyValueStore> = Arc::new(MemoryKvStore::new());

        let airdrop_id = {
            let mut alice = signed_in(kv.clone(), "alice@example.com").await;
            alice.submit::<Airdrop>(layer0()).unwrap().id
        };

        let mut bob = signed_in(kv, "bob@example.com").await;
        assert!(bob.list::<Airdrop>(&ListQuery::new()).unwrap().is_empty());
        assert!(bob.get::<Airdrop>(&airdrop_id).unwrap().is_none());
        assert!(!bob.delete::<Airdrop>(&airdrop_id).unwrap());
        assert_eq!(bob.toggle_completed::<Airdrop>(&airdrop_id).unwrap(), None);
    }

    #[tokio::test]
    async fn test_edit_and_progress() {
        let mut tracker = signed_in(Arc::new(MemoryKvStore::new()), "alice@example.com").await;

        let testnet = tracker
            .submit::<Testnet>(TestnetInput {
                title: "Galxe".to_string(),
                category: "Galxe Testnet".to_string(),
                description: "quests".to_string(),
                progress: 20,
                ..Default::default()
            })
            .unwrap();

        assert!(tracker.update_progress(&testnet.id, 200).unwrap());
        let stored = tracker.get::<Testnet>(&testnet.id).unwrap().unwrap();
        assert_eq!(stored.progress, 100);

        let edited = tracker
            .edit::<Testnet>(
                &testnet.id,
                TestnetInput {
                    title: "Galxe S2".to_string(),
                    category: "Galxe Testnet".to_string(),
                    description: "quests".to_string(),
                    progress: 50,
                    ..Default::default()
                },
            )
            .unwrap();
        assert!(edited);
        let stored = tracker.get::<Testnet>(&testnet.id).unwrap().unwrap();
        assert_eq!(stored.title, "Galxe S2");
        assert_eq!(stored.progress, 50);
    }

    #[tokio::test]
    async fn test_dashboard_and_status_list() {
        let mut tracker = signed_in(Arc::new(MemoryKvStore::new()), "alice@example.com").await;

        let done = tracker.submit::<Airdrop>(layer0()).unwrap();
        tracker.submit::<Airdrop>(layer0()).unwrap();
        tracker.toggle_completed::<Airdrop>(&done.id).unwrap();

        let stats = tracker.dashboard().unwrap();
        assert_eq!(stats.total_airdrops, 2);
        assert_eq!(stats.completed_airdrops, 1);
        assert_eq!(stats.daily_tasks, 1);
        assert_eq!(stats.progress_percentage, 50);

        let completed = tracker
            .list::<Airdrop>(&ListQuery::new().with_status(StatusFilter::Completed))
            .unwrap();
        assert_eq!(completed.len(), 1);
        assert_eq!(completed[0].id, done.id);
    }

    #[tokio::test]
    async fn test_add_category_rejects_blank() {
        let mut tracker = signed_in(Arc::new(MemoryKvStore::new()), "alice@example.com").await;

        assert!(matches!(
            tracker.add_category::<Video>("  "),
            Err(TrackerError::Validation(_))
        ));
        let added = tracker.add_category::<Video>(" Interviews ").unwrap();
        assert_eq!(added.name, "Interviews");
        assert_eq!(tracker.categories::<Video>().unwrap().len(), 5);
    }

    #[test]
    fn test_daily_check_runs_at_startup() {
        let tracker = Tracker::with_backend(config(), Arc::new(MemoryKvStore::new())).unwrap();
        let today = chrono::Local::now().date_naive();
        assert!(!tracker.daily_check(today).unwrap());
        assert!(tracker.daily_check(today.succ_opt().unwrap()).unwrap());
    }

    #[test]
    fn test_deferred_open_leaves_check_pending() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = config();
        config.store.data_dir = dir.path().to_path_buf();
        let today = chrono::Local::now().date_naive();

        let tracker = Tracker::open_without_daily_check(config.clone()).unwrap();
        assert!(tracker.daily_check(today).unwrap());
        assert!(!tracker.daily_check(today).unwrap());

        let reopened = Tracker::open(config).unwrap();
        assert!(!reopened.daily_check(today).unwrap());
    }
}
