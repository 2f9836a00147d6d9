//! Profile page: contact details and the password form.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::Redirect,
};
use food_store_core::mappers::{split_full_name, user_from_dto, user_to_dto};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::error::Result;
use crate::filters;
use crate::middleware::auth::refresh_current_user;
use crate::models::Flash;
use crate::routes::auth::MIN_PASSWORD_LEN;
use crate::routes::page::{Page, set_flash};
use crate::state::AppState;

/// Profile form data.
#[derive(Debug, Deserialize)]
pub struct ProfileForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub phone: String,
}

/// Password form data.
#[derive(Deserialize)]
pub struct PasswordForm {
    #[serde(default)]
    pub current_password: String,
    #[serde(default)]
    pub new_password: String,
    #[serde(default)]
    pub confirm_password: String,
}

impl PasswordForm {
    /// Check the three fields.
    ///
    /// # Errors
    ///
    /// Returns the message to show when a field is missing, the new
    /// passwords differ, or the new password is too short.
    pub fn validate(&self) -> std::result::Result<(), &'static str> {
        if self.current_password.is_empty()
            || self.new_password.is_empty()
            || self.confirm_password.is_empty()
        {
            return Err("Todos los campos son obligatorios");
        }
        if self.new_password != self.confirm_password {
            return Err("Las contraseñas no coinciden");
        }
        if self.new_password.chars().count() < MIN_PASSWORD_LEN {
            return Err("La nueva contraseña debe tener al menos 6 caracteres");
        }
        Ok(())
    }
}

/// Profile page template.
#[derive(Template, WebTemplate)]
#[template(path = "account/profile.html")]
pub struct ProfileTemplate {
    pub page: Page,
    pub role_label: &'static str,
    pub role_class: &'static str,
}

/// Display the profile page.
pub async fn show(page: Page) -> ProfileTemplate {
    let is_admin = page.user.is_admin();
    ProfileTemplate {
        role_label: page.user.role.label(),
        role_class: if is_admin { "badge--success" } else { "badge--info" },
        page,
    }
}

/// Save name and phone to the backend and the session.
#[instrument(skip(state, session, page), fields(user_id = %page.user.id))]
pub async fn update(
    State(state): State<AppState>,
    session: Session,
    page: Page,
    Form(form): Form<ProfileForm>,
) -> Result<Redirect> {
    let name = form.name.trim();
    if name.is_empty() {
        set_flash(&session, Flash::error("El nombre es obligatorio")).await;
        return Ok(Redirect::to("/profile"));
    }

    let mut user = page.user;
    let (first_name, last_name) = split_full_name(name);
    user.first_name = first_name;
    user.last_name = last_name;
    user.name = name.to_string();
    user.phone = form.phone.trim().to_string();

    match state.backend().update_user(user.id, &user_to_dto(&user)).await {
        Ok(saved) => {
            refresh_current_user(&session, &user_from_dto(saved)).await?;
            Ok(Redirect::to("/profile?success=profile_updated"))
        }
        Err(e) => {
            tracing::warn!("Profile update failed: {e}");
            set_flash(&session, Flash::error("No se pudo actualizar el perfil")).await;
            Ok(Redirect::to("/profile"))
        }
    }
}

/// Validate the password form.
///
/// The backend has no password endpoint, so a valid form only produces a
/// notice saying the change is unavailable.
pub async fn change_password(
    session: Session,
    _page: Page,
    Form(form): Form<PasswordForm>,
) -> Redirect {
    let flash = match form.validate() {
        Ok(()) => Flash::info("El cambio de contraseña no está disponible en este servidor."),
        Err(msg) => Flash::error(msg),
    };
    set_flash(&session, flash).await;
    Redirect::to("/profile")
}
