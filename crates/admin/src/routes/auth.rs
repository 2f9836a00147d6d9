//! Admin login and logout.
//!
//! Same email lookup as the storefront, with one extra gate: accounts
//! without the `ADMIN` role are turned away at the door.

use askama::Template;
use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use food_store_core::Email;
use food_store_core::mappers::user_from_dto;
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use super::{render, take_flash};
use crate::error::{ADMIN_ONLY, BACKEND_UNREACHABLE, clear_sentry_user, set_sentry_user};
use crate::middleware::{OptionalAdminAuth, clear_current_admin, set_current_admin};
use crate::models::{CurrentAdmin, Flash};
use crate::state::AppState;

/// Login form data.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Login page template.
#[derive(Template)]
#[template(path = "login.html")]
pub struct LoginTemplate {
    pub error: Option<String>,
    pub notice: Option<Flash>,
    pub email: String,
}

/// Display the login page.
pub async fn login_page(OptionalAdminAuth(admin): OptionalAdminAuth, session: Session) -> Response {
    if admin.is_some_and(|a| a.role.is_admin()) {
        return Redirect::to("/").into_response();
    }

    render(&LoginTemplate {
        error: None,
        notice: take_flash(&session).await,
        email: String::new(),
    })
}

/// Handle login form submission.
#[instrument(skip(state, session, form), fields(email = %form.email))]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Response {
    let page = |error: &str| {
        render(&LoginTemplate {
            error: Some(error.to_string()),
            notice: None,
            email: form.email.clone(),
        })
    };

    if form.email.trim().is_empty() || form.password.is_empty() {
        return page("Por favor completa todos los campos obligatorios");
    }
    let Ok(email) = Email::parse(&form.email) else {
        return page("Credenciales inválidas");
    };

    let user = match state.backend().find_user_by_email(&email).await {
        Ok(Some(dto)) => user_from_dto(dto),
        Ok(None) => return page("Credenciales inválidas"),
        Err(e) if e.is_unreachable() => {
            tracing::warn!("Admin login failed: {e}");
            return page(BACKEND_UNREACHABLE);
        }
        Err(e) => {
            tracing::warn!("Admin login failed: {e}");
            return page("Error al iniciar sesión");
        }
    };

    if !user.is_admin() {
        tracing::warn!(user_id = %user.id, "Login rejected: not an admin");
        return page(ADMIN_ONLY);
    }

    let admin = CurrentAdmin::from(&user);
    if let Err(e) = set_current_admin(&session, &admin).await {
        tracing::error!("Failed to set session: {e}");
        return page("Error al iniciar sesión");
    }
    set_sentry_user(admin.id.as_i64(), &admin.email);
    tracing::info!(admin_id = %admin.id, "Admin logged in");

    Redirect::to("/").into_response()
}

/// Handle logout.
pub async fn logout(session: Session) -> Response {
    if let Err(e) = clear_current_admin(&session).await {
        tracing::warn!("Failed to clear admin session: {e}");
    }
    clear_sentry_user();
    Redirect::to("/login").into_response()
}
