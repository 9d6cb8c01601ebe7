//! Identity subsystem
//!
//! Mock accounts for a single local installation: invite-gated
//! registration, email/password login and a persisted session.

pub mod auth;
pub mod user;
pub mod validation;

pub use auth::{AuthError, AuthManager, AuthResult};
pub use user::{AuthSession, User, ADMIN_USER_ID};
pub use validation::{validate_login, validate_registration, Registration};
