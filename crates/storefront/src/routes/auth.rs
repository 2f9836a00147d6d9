//! Authentication route handlers.
//!
//! The backend has no login endpoint, so logging in means finding the user
//! whose email matches and keeping that record in the session. The password
//! field is collected but not verified.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Query, State},
    response::{IntoResponse, Redirect, Response},
};
use food_store_backend::BackendError;
use food_store_core::Email;
use food_store_core::mappers::{user_create_from_registration, user_from_dto};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::error::{BACKEND_UNREACHABLE, clear_sentry_user, set_sentry_user};
use crate::filters;
use crate::middleware::{OptionalAuth, clear_current_user, set_current_user};
use crate::models::Flash;
use crate::routes::page::NoticeQuery;
use crate::state::AppState;

/// Minimum password length accepted at registration.
pub const MIN_PASSWORD_LEN: usize = 6;

// =============================================================================
// Form Types
// =============================================================================

/// Login form data.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Registration form data.
#[derive(Debug, Deserialize)]
pub struct RegisterForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub password: String,
}

// =============================================================================
// Templates
// =============================================================================

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/login.html")]
pub struct LoginTemplate {
    pub error: Option<String>,
    pub notice: Option<Flash>,
    pub email: String,
}

/// Register page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/register.html")]
pub struct RegisterTemplate {
    pub error: Option<String>,
    pub name: String,
    pub email: String,
    pub phone: String,
}

impl RegisterTemplate {
    fn with_error(form: &RegisterForm, error: impl Into<String>) -> Self {
        Self {
            error: Some(error.into()),
            name: form.name.clone(),
            email: form.email.clone(),
            phone: form.phone.clone(),
        }
    }
}

/// Message for a failed backend call during login or registration.
fn backend_failure_message(err: &BackendError, fallback: &str) -> String {
    if err.is_unreachable() {
        BACKEND_UNREACHABLE.to_string()
    } else {
        fallback.to_string()
    }
}

// =============================================================================
// Login Routes
// =============================================================================

/// Display the login page.
pub async fn login_page(
    OptionalAuth(user): OptionalAuth,
    Query(query): Query<NoticeQuery>,
) -> Response {
    if user.is_some() {
        return Redirect::to("/").into_response();
    }

    LoginTemplate {
        error: None,
        notice: query.flash(),
        email: String::new(),
    }
    .into_response()
}

/// Handle login form submission.
#[instrument(skip(state, session, form), fields(email = %form.email))]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Response {
    let page = |error: &str| LoginTemplate {
        error: Some(error.to_string()),
        notice: None,
        email: form.email.clone(),
    };

    if form.email.trim().is_empty() || form.password.is_empty() {
        return page("Por favor completa todos los campos obligatorios").into_response();
    }

    let Ok(email) = Email::parse(&form.email) else {
        return page("Credenciales inválidas").into_response();
    };

    match state.backend().find_user_by_email(&email).await {
        Ok(Some(dto)) => {
            let user = user_from_dto(dto);
            if let Err(e) = set_current_user(&session, &user).await {
                tracing::error!("Failed to set session: {e}");
                return page("Error al iniciar sesión").into_response();
            }
            set_sentry_user(&user.id, Some(&user.email));
            tracing::info!(user_id = %user.id, "User logged in");
            Redirect::to("/").into_response()
        }
        Ok(None) => {
            tracing::info!("Login rejected: unknown email");
            page("Credenciales inválidas").into_response()
        }
        Err(e) => {
            tracing::warn!("Login failed: {e}");
            page(&backend_failure_message(
                &e,
                "Error al iniciar sesión. Verifica que el servidor esté corriendo.",
            ))
            .into_response()
        }
    }
}

/// Handle logout. The cart stays in the session.
pub async fn logout(session: Session) -> Response {
    if let Err(e) = clear_current_user(&session).await {
        tracing::warn!("Failed to clear session user: {e}");
    }
    clear_sentry_user();
    Redirect::to("/auth/login?success=logged_out").into_response()
}

// =============================================================================
// Registration Routes
// =============================================================================

/// Display the registration page.
pub async fn register_page(OptionalAuth(user): OptionalAuth) -> Response {
    if user.is_some() {
        return Redirect::to("/").into_response();
    }

    RegisterTemplate {
        error: None,
        name: String::new(),
        email: String::new(),
        phone: String::new(),
    }
    .into_response()
}

/// Check a registration form before any backend call.
///
/// # Errors
///
/// Returns the message to show next to the form.
pub fn validate_registration(form: &RegisterForm) -> Result<Email, &'static str> {
    if form.name.trim().is_empty() || form.email.trim().is_empty() || form.password.is_empty() {
        return Err("Por favor completa todos los campos obligatorios");
    }
    if form.password.chars().count() < MIN_PASSWORD_LEN {
        return Err("La contraseña debe tener al menos 6 caracteres");
    }
    Email::parse(&form.email).map_err(|_| "El email no es válido")
}

/// Handle registration form submission.
///
/// Creates the user, logs them in, and lands on the home page.
#[instrument(skip(state, session, form), fields(email = %form.email))]
pub async fn register(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<RegisterForm>,
) -> Response {
    let email = match validate_registration(&form) {
        Ok(email) => email,
        Err(msg) => return RegisterTemplate::with_error(&form, msg).into_response(),
    };

    match state.backend().find_user_by_email(&email).await {
        Ok(Some(_)) => {
            return RegisterTemplate::with_error(&form, "El email ya está registrado")
                .into_response();
        }
        Ok(None) => {}
        Err(e) => {
            tracing::warn!("Registration lookup failed: {e}");
            return RegisterTemplate::with_error(
                &form,
                backend_failure_message(
                    &e,
                    "Error al registrarse. Verifica que el servidor esté corriendo.",
                ),
            )
            .into_response();
        }
    }

    let body =
        user_create_from_registration(&form.name, email.as_str(), &form.phone, &form.password);

    match state.backend().create_user(&body).await {
        Ok(dto) => {
            let user = user_from_dto(dto);
            if let Err(e) = set_current_user(&session, &user).await {
                tracing::error!("Failed to set session after registration: {e}");
                return Redirect::to("/auth/login?error=session").into_response();
            }
            set_sentry_user(&user.id, Some(&user.email));
            tracing::info!(user_id = %user.id, "User registered");
            Redirect::to("/?success=welcome").into_response()
        }
        Err(e) => {
            tracing::warn!("Registration failed: {e}");
            RegisterTemplate::with_error(
                &form,
                backend_failure_message(
                    &e,
                    "Error al registrarse. El email podría estar ya en uso.",
                ),
            )
            .into_response()
        }
    }
}
