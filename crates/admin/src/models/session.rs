//! Session-related types for admin authentication.
//!
//! Types stored in the session for authentication state and one-shot notices.

use food_store_core::models::User;
use food_store_core::{Role, UserId};
use serde::{Deserialize, Serialize};

/// Session-stored admin identity.
///
/// Minimal data stored in the session to identify the logged-in admin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentAdmin {
    /// Backend user ID.
    pub id: UserId,
    /// Login email.
    pub email: String,
    /// Display name.
    pub name: String,
    /// Role at login time.
    pub role: Role,
}

impl From<&User> for CurrentAdmin {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            name: user.name.clone(),
            role: user.role,
        }
    }
}

/// Session keys for admin data.
pub mod keys {
    /// Key for storing the current logged-in admin.
    pub const CURRENT_ADMIN: &str = "current_admin";

    /// Key for the pending flash notice.
    pub const FLASH: &str = "admin_flash";
}

/// Tone of a flash notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlashKind {
    Success,
    Error,
}

impl FlashKind {
    #[must_use]
    pub const fn css_class(&self) -> &'static str {
        match self {
            Self::Success => "alert--success",
            Self::Error => "alert--error",
        }
    }
}

/// A notice carried across one redirect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flash {
    pub kind: FlashKind,
    pub message: String,
}

impl Flash {
    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: FlashKind::Success,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: FlashKind::Error,
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_current_admin_from_user() {
        let user = User {
            id: UserId::new(1),
            name: "Ana Gómez".to_string(),
            first_name: "Ana".to_string(),
            last_name: "Gómez".to_string(),
            email: "ana@example.com".to_string(),
            phone: String::new(),
            role: Role::Admin,
        };

        let admin = CurrentAdmin::from(&user);
        assert_eq!(admin.id, UserId::new(1));
        assert_eq!(admin.name, "Ana Gómez");
        assert_eq!(admin.role, Role::Admin);
    }

    #[test]
    fn test_flash_css_class() {
        assert_eq!(Flash::success("ok").kind.css_class(), "alert--success");
        assert_eq!(Flash::error("no").kind.css_class(), "alert--error");
    }
}
