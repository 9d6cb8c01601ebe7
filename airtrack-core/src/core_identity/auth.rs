//! Mock authentication
//!
//! Users and their passwords live in the same key-value backend as the
//! stores. This is not a security boundary: the invite code and the
//! administrator pair come from configuration and anyone with access to the
//! data directory can read every record.
//!
//! Persisted keys:
//! - `auth-storage`: the current session
//! - `users`: registered users
//! - `user-{id}-password`: Argon2 PHC string (older values may be plaintext)

use crate::config::AuthConfig;
use crate::core_identity::user::{AuthSession, User};
use crate::core_identity::validation::{validate_login, validate_registration, Registration};
use crate::core_store::model::UserId;
use crate::core_store::store::errors::{FieldErrors, StoreError};
use crate::core_store::store::kv::KeyValueStore;
use crate::core_store::store::snapshot::SnapshotAdapter;
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use std::sync::Arc;
use thiserror::Error;

pub const SESSION_KEY: &str = "auth-storage";
pub const USERS_KEY: &str = "users";

fn password_key(id: &UserId) -> String {
    format!("user-{}-password", id)
}

/// Authentication errors
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Invalid invite code")]
    InvalidInviteCode,

    #[error("Email already registered")]
    EmailTaken,

    #[error("User not found")]
    UserNotFound,

    #[error("Invalid password")]
    InvalidPassword,

    #[error("Invalid form: {0}")]
    Validation(FieldErrors),

    #[error("Password hashing failed: {0}")]
    Hashing(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

pub type AuthResult<T> = Result<T, AuthError>;

/// Hash a password into a PHC string
pub fn hash_password(password: &str) -> AuthResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AuthError::Hashing(e.to_string()))
}

/// Check a password against a stored value
///
/// Values that do not parse as PHC strings are legacy plaintext.
pub fn verify_password(stored: &str, password: &str) -> bool {
    match PasswordHash::new(stored) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(_) => stored == password,
    }
}

/// Session holder and credential checks
pub struct AuthManager {
    settings: AuthConfig,
    snapshots: SnapshotAdapter,
    session: AuthSession,
    is_auth_loading: bool,
    error: Option<String>,
}

impl AuthManager {
    /// Rehydrate the session from the backend
    pub fn open(settings: AuthConfig, kv: Arc<dyn KeyValueStore>) -> AuthResult<Self> {
        let snapshots = SnapshotAdapter::new(kv);
        let session: AuthSession = snapshots.load(SESSION_KEY)?.unwrap_or_default();

        if let Some(user) = session.active_user() {
            tracing::debug!(user_id = %user.id, "session restored");
        }

        Ok(AuthManager {
            settings,
            snapshots,
            session,
            is_auth_loading: false,
            error: None,
        })
    }

    /// Log in with email and password
    ///
    /// The configured administrator pair bypasses form validation so any
    /// accepted config can sign in.
    pub async fn login(&mut self, email: &str, password: &str) -> AuthResult<User> {
        if !self.is_admin_pair(email, password) {
            validate_login(email, password).map_err(AuthError::Validation)?;
        }

        self.begin().await;
        let result = self.authenticate(email, password);
        self.finish(result)
    }

    fn is_admin_pair(&self, email: &str, password: &str) -> bool {
        email == self.settings.admin_email && password == self.settings.admin_password
    }

    fn authenticate(&mut self, email: &str, password: &str) -> AuthResult<User> {
        if self.is_admin_pair(email, password) {
            let admin = User::admin(&self.settings.admin_email, &self.settings.admin_username);
            self.set_session(AuthSession::signed_in(admin.clone()))?;
            tracing::info!(user_id = %admin.id, "Welcome back, {}!", admin.username);
            return Ok(admin);
        }

        let users = self.users()?;
        let Some(user) = users.into_iter().find(|u| u.email == email) else {
            tracing::warn!(email, "User not found. Please register first.");
            return Err(AuthError::UserNotFound);
        };

        let stored: Option<String> = self.snapshots.load(&password_key(&user.id))?;
        let matches = stored
            .as_deref()
            .map(|stored| verify_password(stored, password))
            .unwrap_or(false);
        if !matches {
            tracing::warn!(user_id = %user.id, "Invalid password");
            return Err(AuthError::InvalidPassword);
        }

        self.set_session(AuthSession::signed_in(user.clone()))?;
        tracing::info!(user_id = %user.id, "Welcome back, {}!", user.username);
        Ok(user)
    }

    /// Register a new user and sign them in
    pub async fn register(&mut self, form: Registration) -> AuthResult<User> {
        validate_registration(&form).map_err(AuthError::Validation)?;

        self.begin().await;
        let result = self.create_user(form);
        self.finish(result)
    }

    fn create_user(&mut self, form: Registration) -> AuthResult<User> {
        if form.invite_code != self.settings.invite_code {
            tracing::warn!("Invalid invite code");
            return Err(AuthError::InvalidInviteCode);
        }

        let mut users = self.users()?;
        if users.iter().any(|u| u.email == form.email) {
            tracing::warn!(email = %form.email, "Email already registered");
            return Err(AuthError::EmailTaken);
        }

        let user = User {
            id: UserId::generate(),
            is_admin: form.email == self.settings.admin_email,
            email: form.email,
            username: form.username,
            telegram_username: Some(form.telegram_username),
        };

        // Password slot first: a user is only listed once it can log in
        let hashed = hash_password(&form.password)?;
        self.snapshots.save(&password_key(&user.id), &hashed)?;
        users.push(user.clone());
        self.snapshots.save(USERS_KEY, &users)?;

        self.set_session(AuthSession::signed_in(user.clone()))?;
        tracing::info!(user_id = %user.id, "Registration successful!");
        Ok(user)
    }

    /// Clear the session
    pub fn logout(&mut self) -> AuthResult<()> {
        self.set_session(AuthSession::default())?;
        tracing::info!("Logged out successfully");
        Ok(())
    }

    /// Whether a session is active
    pub fn check_auth(&self) -> bool {
        self.session.active_user().is_some()
    }

    pub fn current_user(&self) -> Option<&User> {
        self.session.active_user()
    }

    pub fn is_auth_loading(&self) -> bool {
        self.is_auth_loading
    }

    /// Message of the last failed login or registration
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Registered users, excluding the built-in administrator
    pub fn users(&self) -> AuthResult<Vec<User>> {
        Ok(self.snapshots.load(USERS_KEY)?.unwrap_or_default())
    }

    async fn begin(&mut self) {
        self.is_auth_loading = true;
        self.error = None;

        let latency = self.settings.simulated_latency;
        if !latency.is_zero() {
            tokio::time::sleep(latency).await;
        }
    }

    fn finish(&mut self, result: AuthResult<User>) -> AuthResult<User> {
        self.is_auth_loading = false;
        if let Err(e) = &result {
            self.error = Some(e.to_string());
        }
        result
    }

    fn set_session(&mut self, session: AuthSession) -> AuthResult<()> {
        self.snapshots.save(SESSION_KEY, &session)?;
        self.session = session;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core_store::store::errors::StoreResult;
    use crate::core_store::store::kv::MemoryKvStore;
    use std::time::Duration;

    fn settings() -> AuthConfig {
        AuthConfig {
            simulated_latency: Duration::ZERO,
            ..AuthConfig::default()
        }
    }

    fn registration(email: &str) -> Registration {
        Registration {
            username: "alice".to_string(),
            email: email.to_string(),
            password: "hunter22".to_string(),
            invite_code: settings().invite_code,
            telegram_username: "@alice".to_string(),
        }
    }

    fn manager(kv: &Arc<MemoryKvStore>) -> AuthManager {
        AuthManager::open(settings(), kv.clone()).unwrap()
    }

    #[test]
    fn test_hash_and_verify() {
        let hash = hash_password("hunter22").unwrap();
        assert!(hash.starts_with("$argon2"));
        assert!(verify_password(&hash, "hunter22"));
        assert!(!verify_password(&hash, "hunter23"));
    }

    #[test]
    fn test_legacy_plaintext_verifies() {
        assert!(verify_password("hunter22", "hunter22"));
        assert!(!verify_password("hunter22", "other"));
    }

    #[tokio::test]
    async fn test_register_then_login() {
        let kv = Arc::new(MemoryKvStore::new());
        let mut auth = manager(&kv);

        let user = auth.register(registration("alice@example.com")).await.unwrap();
        assert!(auth.check_auth());
        assert!(!user.is_admin);
        assert_eq!(user.telegram_username.as_deref(), Some("@alice"));

        auth.logout().unwrap();
        assert!(!auth.check_auth());
        assert!(auth.current_user().is_none());

        let logged_in = auth.login("alice@example.com", "hunter22").await.unwrap();
        assert_eq!(logged_in.id, user.id);
        assert_eq!(auth.current_user(), Some(&user));

        let stored: String = SnapshotAdapter::new(kv)
            .load(&password_key(&user.id))
            .unwrap()
            .unwrap();
        assert_ne!(stored, "hunter22");
    }

    #[tokio::test]
    async fn test_wrong_invite_creates_no_user() {
        let kv = Arc::new(MemoryKvStore::new());
        let mut auth = manager(&kv);

        let mut form = registration("alice@example.com");
        form.invite_code = "letmein".to_string();
        let err = auth.register(form).await.unwrap_err();

        assert!(matches!(err, AuthError::InvalidInviteCode));
        assert!(auth.users().unwrap().is_empty());
        assert!(!auth.check_auth());
        assert_eq!(auth.error(), Some("Invalid invite code"));
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected() {
        let kv = Arc::new(MemoryKvStore::new());
        let mut auth = manager(&kv);

        auth.register(registration("alice@example.com")).await.unwrap();
        let err = auth
            .register(registration("alice@example.com"))
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::EmailTaken));
        assert_eq!(auth.users().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_login_failures_keep_session() {
        let kv = Arc::new(MemoryKvStore::new());
        let mut auth = manager(&kv);
        let user = auth.register(registration("alice@example.com")).await.unwrap();

        let err = auth.login("nobody@example.com", "hunter22").await.unwrap_err();
        assert!(matches!(err, AuthError::UserNotFound));
        assert_eq!(auth.error(), Some("User not found"));

        let err = auth.login("alice@example.com", "wrong-pass").await.unwrap_err();
        assert!(matches!(err, AuthError::InvalidPassword));

        assert_eq!(auth.current_user().map(|u| &u.id), Some(&user.id));
        assert!(!auth.is_auth_loading());
    }

    #[tokio::test]
    async fn test_admin_login_with_empty_user_list() {
        let kv = Arc::new(MemoryKvStore::new());
        let mut auth = manager(&kv);
        let config = settings();

        let admin = auth
            .login(&config.admin_email, &config.admin_password)
            .await
            .unwrap();
        assert!(admin.is_admin);
        assert_eq!(admin.id.as_str(), "admin-1");
        assert_eq!(admin.username, config.admin_username);
        assert!(auth.users().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_admin_pair_skips_form_rules() {
        let kv = Arc::new(MemoryKvStore::new());
        let config = AuthConfig {
            admin_email: "admin@localhost".to_string(),
            admin_password: "admin".to_string(),
            ..settings()
        };
        let mut auth = AuthManager::open(config, kv.clone()).unwrap();

        let admin = auth.login("admin@localhost", "admin").await.unwrap();
        assert!(admin.is_admin);

        // Anyone else still goes through validation
        let err = auth.login("admin@localhost", "wrong").await.unwrap_err();
        assert!(matches!(err, AuthError::Validation(_)));
    }

    /// Fails every write to a per-user password slot
    struct PasswordSlotFails(MemoryKvStore);

    impl KeyValueStore for PasswordSlotFails {
        fn get(&self, key: &str) -> StoreResult<Option<String>> {
            self.0.get(key)
        }

        fn set(&self, key: &str, value: &str) -> StoreResult<()> {
            if key.ends_with("-password") {
                return Err(StoreError::Storage("disk full".to_string()));
            }
            self.0.set(key, value)
        }

        fn remove(&self, key: &str) -> StoreResult<()> {
            self.0.remove(key)
        }

        fn keys(&self) -> StoreResult<Vec<String>> {
            self.0.keys()
        }
    }

    #[tokio::test]
    async fn test_failed_password_write_lists_no_user() {
        let kv = Arc::new(PasswordSlotFails(MemoryKvStore::new()));
        let mut auth = AuthManager::open(settings(), kv).unwrap();

        let err = auth
            .register(registration("alice@example.com"))
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::Store(_)));
        assert!(auth.users().unwrap().is_empty());
        assert!(!auth.check_auth());
    }

    #[tokio::test]
    async fn test_admin_email_registers_as_admin() {
        let kv = Arc::new(MemoryKvStore::new());
        let mut auth = manager(&kv);

        let user = auth
            .register(registration(&settings().admin_email))
            .await
            .unwrap();
        assert!(user.is_admin);
        assert_ne!(user.id.as_str(), "admin-1");
    }

    #[tokio::test]
    async fn test_invalid_form_short_circuits() {
        let kv = Arc::new(MemoryKvStore::new());
        let mut auth = manager(&kv);

        let err = auth.login("not-an-email", "x").await.unwrap_err();
        match err {
            AuthError::Validation(fields) => {
                assert!(fields.contains("email"));
                assert!(fields.contains("password"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_session_rehydrates() {
        let kv = Arc::new(MemoryKvStore::new());
        let user = {
            let mut auth = manager(&kv);
            auth.register(registration("alice@example.com")).await.unwrap()
        };

        let auth = manager(&kv);
        assert!(auth.check_auth());
        assert_eq!(auth.current_user(), Some(&user));
    }

    #[tokio::test(start_paused = true)]
    async fn test_latency_is_awaited() {
        let kv = Arc::new(MemoryKvStore::new());
        let config = AuthConfig {
            simulated_latency: Duration::from_millis(800),
            ..AuthConfig::default()
        };
        let mut auth = AuthManager::open(config.clone(), kv).unwrap();

        let start = tokio::time::Instant::now();
        auth.login(&config.admin_email, &config.admin_password)
            .await
            .unwrap();
        assert!(start.elapsed() >= Duration::from_millis(800));
    }
}
