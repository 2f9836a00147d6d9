//! Shared page chrome: the navbar data and one-shot notices.

use axum::{
    extract::{FromRequestParts, Query},
    http::request::Parts,
};
use food_store_core::models::User;
use serde::Deserialize;
use tower_sessions::Session;

use crate::middleware::RequireAuth;
use crate::middleware::auth::AuthRejection;
use crate::models::{Flash, FlashKind, session_keys};
use crate::routes::cart::load_cart;
use crate::state::AppState;

/// `?success=` / `?error=` codes carried by redirects.
#[derive(Debug, Default, Deserialize)]
pub struct NoticeQuery {
    pub success: Option<String>,
    pub error: Option<String>,
}

impl NoticeQuery {
    /// The notice for the first recognised code.
    #[must_use]
    pub fn flash(&self) -> Option<Flash> {
        self.success
            .as_deref()
            .and_then(|code| Flash::from_code(FlashKind::Success, code))
            .or_else(|| {
                self.error
                    .as_deref()
                    .and_then(|code| Flash::from_code(FlashKind::Error, code))
            })
    }
}

/// Everything the store layout needs besides the page body.
///
/// Extracting a `Page` requires a logged-in user, so handlers that take one
/// are protected.
#[derive(Debug, Clone)]
pub struct Page {
    pub user: User,
    pub cart_count: u32,
    /// Admin console link, only for admins and only when configured.
    pub admin_url: Option<String>,
    pub flash: Option<Flash>,
}

impl FromRequestParts<AppState> for Page {
    type Rejection = AuthRejection;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let RequireAuth(user) = RequireAuth::from_request_parts(parts, state).await?;
        let session = parts
            .extensions
            .get::<Session>()
            .cloned()
            .ok_or(AuthRejection::Unauthorized)?;

        let cart_count = load_cart(&session).await.item_count();
        let flash = match take_flash(&session).await {
            Some(flash) => Some(flash),
            None => Query::<NoticeQuery>::try_from_uri(&parts.uri)
                .ok()
                .and_then(|Query(q)| q.flash()),
        };
        let admin_url = if user.is_admin() {
            state.config().admin_console_url.clone()
        } else {
            None
        };

        Ok(Self {
            user,
            cart_count,
            admin_url,
            flash,
        })
    }
}

/// Queue a notice for the next page render.
pub async fn set_flash(session: &Session, flash: Flash) {
    if let Err(e) = session.insert(session_keys::FLASH, flash).await {
        tracing::warn!("Failed to store flash notice: {e}");
    }
}

/// Take (and clear) the pending notice.
pub async fn take_flash(session: &Session) -> Option<Flash> {
    session
        .remove::<Flash>(session_keys::FLASH)
        .await
        .ok()
        .flatten()
}

/// A same-site path to return to after a form post.
///
/// Anything that is not a local absolute path falls back to `default`.
#[must_use]
pub fn safe_return_path(candidate: Option<&str>, default: &str) -> String {
    candidate
        .filter(|p| p.starts_with('/') && !p.starts_with("//") && !p.contains('\\'))
        .unwrap_or(default)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notice_query_prefers_success() {
        let query = NoticeQuery {
            success: Some("added".to_string()),
            error: Some("session".to_string()),
        };
        assert_eq!(query.flash().map(|f| f.kind), Some(FlashKind::Success));

        let query = NoticeQuery {
            success: Some("bogus".to_string()),
            error: Some("session".to_string()),
        };
        assert_eq!(query.flash().map(|f| f.kind), Some(FlashKind::Error));
    }

    #[test]
    fn test_safe_return_path() {
        assert_eq!(safe_return_path(Some("/products/3"), "/"), "/products/3");
        assert_eq!(safe_return_path(Some("//evil.example"), "/"), "/");
        assert_eq!(safe_return_path(Some("https://evil.example"), "/"), "/");
        assert_eq!(safe_return_path(Some("/\\evil.example"), "/"), "/");
        assert_eq!(safe_return_path(None, "/cart"), "/cart");
    }
}
