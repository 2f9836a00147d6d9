//! Category management route handlers.

use askama::Template;
use axum::{
    Form,
    extract::{Path, State},
    response::{IntoResponse, Redirect, Response},
};
use food_store_core::CategoryId;
use food_store_core::dto::CategoryWrite;
use food_store_core::mappers::category_from_dto;
use food_store_core::models::Category;
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use super::{AdminUserView, render, set_flash, take_flash};
use crate::components::data_table::{DataTableConfig, categories_table_config};
use crate::error::{AppError, Result};
use crate::filters;
use crate::middleware::RequireAdminAuth;
use crate::models::Flash;
use crate::state::AppState;

/// Category form data.
#[derive(Debug, Default, Deserialize)]
pub struct CategoryForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
}

impl CategoryForm {
    /// Trim and check the form.
    ///
    /// # Errors
    ///
    /// Returns the message to show above the form.
    pub fn validate(&self) -> std::result::Result<CategoryWrite, &'static str> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err("El nombre es obligatorio");
        }
        Ok(CategoryWrite {
            name: name.to_string(),
            description: self.description.trim().to_string(),
        })
    }
}

/// Categories table template.
#[derive(Template)]
#[template(path = "categories/index.html")]
pub struct CategoriesIndexTemplate {
    pub admin_user: AdminUserView,
    pub current_path: String,
    pub flash: Option<Flash>,
    pub table: DataTableConfig,
    pub categories: Vec<Category>,
    pub load_error: Option<String>,
}

/// New/edit category form template.
#[derive(Template)]
#[template(path = "categories/form.html")]
pub struct CategoryFormTemplate {
    pub admin_user: AdminUserView,
    pub current_path: String,
    pub flash: Option<Flash>,
    pub title: &'static str,
    /// Form target: `/categories` or `/categories/{id}`.
    pub action: String,
    pub name: String,
    pub description: String,
    pub error: Option<String>,
}

impl CategoryFormTemplate {
    fn new(admin_user: AdminUserView, editing: Option<CategoryId>) -> Self {
        Self {
            admin_user,
            current_path: "/categories".to_string(),
            flash: None,
            title: if editing.is_some() {
                "Editar Categoría"
            } else {
                "Nueva Categoría"
            },
            action: editing.map_or_else(|| "/categories".to_string(), |id| format!("/categories/{id}")),
            name: String::new(),
            description: String::new(),
            error: None,
        }
    }
}

/// Categories table.
#[instrument(skip(admin, state, session))]
pub async fn index(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    session: Session,
) -> Response {
    let (categories, load_error) = match state.backend().list_categories().await {
        Ok(dtos) => (dtos.into_iter().map(category_from_dto).collect(), None),
        Err(e) => {
            tracing::error!("Failed to fetch categories: {e}");
            (Vec::new(), Some(AppError::from(e).public_message()))
        }
    };

    render(&CategoriesIndexTemplate {
        admin_user: AdminUserView::from(&admin),
        current_path: "/categories".to_string(),
        flash: take_flash(&session).await,
        table: categories_table_config(),
        categories,
        load_error,
    })
}

/// Empty form.
pub async fn new(RequireAdminAuth(admin): RequireAdminAuth) -> Response {
    render(&CategoryFormTemplate::new(AdminUserView::from(&admin), None))
}

/// Form pre-filled from the backend.
#[instrument(skip(admin, state))]
pub async fn edit(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<CategoryId>,
) -> Result<Response> {
    let category = category_from_dto(state.backend().get_category(id).await?);

    let mut page = CategoryFormTemplate::new(AdminUserView::from(&admin), Some(id));
    page.name = category.name;
    page.description = category.description;
    Ok(render(&page))
}

/// Create a category.
#[instrument(skip(admin, state, session, form))]
pub async fn create(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<CategoryForm>,
) -> Response {
    save(AdminUserView::from(&admin), &state, &session, None, form).await
}

/// Update a category.
#[instrument(skip(admin, state, session, form))]
pub async fn update(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<CategoryId>,
    Form(form): Form<CategoryForm>,
) -> Response {
    save(AdminUserView::from(&admin), &state, &session, Some(id), form).await
}

async fn save(
    admin_user: AdminUserView,
    state: &AppState,
    session: &Session,
    id: Option<CategoryId>,
    form: CategoryForm,
) -> Response {
    let redisplay = |error: &str| {
        let mut page = CategoryFormTemplate::new(admin_user.clone(), id);
        page.name.clone_from(&form.name);
        page.description.clone_from(&form.description);
        page.error = Some(error.to_string());
        render(&page)
    };

    let body = match form.validate() {
        Ok(body) => body,
        Err(msg) => return redisplay(msg),
    };

    let result = match id {
        Some(id) => state.backend().update_category(id, &body).await,
        None => state.backend().create_category(&body).await,
    };

    match result {
        Ok(saved) => {
            tracing::info!(category_id = %saved.id, "Category saved");
            let message = if id.is_some() {
                "Categoría actualizada"
            } else {
                "Categoría creada"
            };
            set_flash(session, Flash::success(message)).await;
            Redirect::to("/categories").into_response()
        }
        Err(e) => {
            tracing::error!("Failed to save category: {e}");
            redisplay("Error al guardar la categoría")
        }
    }
}

/// Delete a category.
#[instrument(skip(_admin, state, session))]
pub async fn delete(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<CategoryId>,
) -> Redirect {
    let flash = match state.backend().delete_category(id).await {
        Ok(()) => {
            tracing::info!(category_id = %id, "Category deleted");
            Flash::success("Categoría eliminada correctamente")
        }
        Err(e) => {
            tracing::error!("Failed to delete category {id}: {e}");
            Flash::error("Error al eliminar la categoría")
        }
    };
    set_flash(&session, flash).await;
    Redirect::to("/categories")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_requires_name() {
        let form = CategoryForm {
            name: "   ".to_string(),
            description: "Algo".to_string(),
        };
        assert_eq!(form.validate(), Err("El nombre es obligatorio"));
    }

    #[test]
    fn test_validate_trims_fields() {
        let form = CategoryForm {
            name: "  Bebidas ".to_string(),
            description: " Frías ".to_string(),
        };
        assert_eq!(
            form.validate(),
            Ok(CategoryWrite {
                name: "Bebidas".to_string(),
                description: "Frías".to_string(),
            })
        );
    }
}
