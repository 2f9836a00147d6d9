//! Unified error handling for admin.

use askama::Template;
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use food_store_backend::BackendError;
use thiserror::Error;

/// Shown when the backend is down.
pub const BACKEND_UNREACHABLE: &str =
    "Error al cargar los datos. Verifica que el servidor esté corriendo.";

/// Shown to a logged-in account without the admin role.
pub const ADMIN_ONLY: &str = "Acceso denegado. Solo administradores.";

/// Application-level error type for the admin panel.
#[derive(Debug, Error)]
pub enum AppError {
    /// REST backend call failed.
    #[error("Backend error: {0}")]
    Backend(#[from] BackendError),

    /// User lacks permission.
    #[error("Forbidden: {0}")]
    Forbidden(String),
}

/// Standalone error page.
#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorTemplate {
    pub status: u16,
    pub message: String,
}

impl AppError {
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Backend(BackendError::NotFound(_)) => StatusCode::NOT_FOUND,
            Self::Backend(err) if err.is_unreachable() => StatusCode::SERVICE_UNAVAILABLE,
            Self::Backend(_) => StatusCode::BAD_GATEWAY,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
        }
    }

    #[must_use]
    pub fn public_message(&self) -> String {
        match self {
            Self::Backend(BackendError::NotFound(_)) => "No encontrado".to_string(),
            Self::Backend(err) if err.is_unreachable() => BACKEND_UNREACHABLE.to_string(),
            Self::Backend(_) => "Error en el servidor de datos".to_string(),
            Self::Forbidden(msg) => msg.clone(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        if status.is_server_error() {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Admin request error"
            );
        }

        // Don't expose internal error details to clients
        let page = ErrorTemplate {
            status: status.as_u16(),
            message: self.public_message(),
        };
        let body = page.render().unwrap_or_else(|e| {
            tracing::error!("Template render error: {}", e);
            page.message.clone()
        });

        (status, Html(body)).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

/// Set the Sentry user context for the logged-in admin.
pub fn set_sentry_user(admin_id: i64, email: &str) {
    sentry::configure_scope(|scope| {
        scope.set_user(Some(sentry::User {
            id: Some(admin_id.to_string()),
            email: Some(email.to_string()),
            ..Default::default()
        }));
    });
}

/// Clear the Sentry user context.
pub fn clear_sentry_user() {
    sentry::configure_scope(|scope| {
        scope.set_user(None);
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_error_display() {
        let err = AppError::Backend(BackendError::NotFound("pedido/12".to_string()));
        assert_eq!(err.to_string(), "Backend error: not found: pedido/12");

        let err = AppError::Forbidden(ADMIN_ONLY.to_string());
        assert_eq!(err.to_string(), format!("Forbidden: {ADMIN_ONLY}"));
    }

    #[test]
    fn test_app_error_status_codes() {
        fn get_status(err: AppError) -> StatusCode {
            err.into_response().status()
        }

        assert_eq!(
            get_status(AppError::Backend(BackendError::NotFound("pedido/1".to_string()))),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            get_status(AppError::Forbidden(ADMIN_ONLY.to_string())),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            get_status(AppError::Backend(BackendError::Status {
                status: 500,
                message: "boom".to_string()
            })),
            StatusCode::BAD_GATEWAY
        );
    }

    #[test]
    fn test_forbidden_message_is_public() {
        let err = AppError::Forbidden(ADMIN_ONLY.to_string());
        assert_eq!(err.public_message(), ADMIN_ONLY);
    }
}
