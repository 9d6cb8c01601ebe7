//! User records of the mock identity system

use crate::core_store::model::UserId;
use serde::{Deserialize, Serialize};

/// Id of the built-in administrator account
pub const ADMIN_USER_ID: &str = "admin-1";

/// A registered user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub email: String,
    pub username: String,
    #[serde(default)]
    pub is_admin: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub telegram_username: Option<String>,
}

impl User {
    /// The reserved administrator; never stored in the user list
    pub fn admin(email: impl Into<String>, username: impl Into<String>) -> Self {
        User {
            id: UserId::new(ADMIN_USER_ID),
            email: email.into(),
            username: username.into(),
            is_admin: true,
            telegram_username: None,
        }
    }
}

/// Persisted session: who is logged in
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthSession {
    #[serde(default)]
    pub user: Option<User>,
    #[serde(default)]
    pub is_authenticated: bool,
}

impl AuthSession {
    pub fn signed_in(user: User) -> Self {
        AuthSession {
            user: Some(user),
            is_authenticated: true,
        }
    }

    /// Authenticated with a user attached
    pub fn active_user(&self) -> Option<&User> {
        if self.is_authenticated {
            self.user.as_ref()
        } else {
            None
        }
    }
}
