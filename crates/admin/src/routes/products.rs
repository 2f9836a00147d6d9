//! Product management route handlers.

use askama::Template;
use axum::{
    Form,
    extract::{Path, State},
    response::{IntoResponse, Redirect, Response},
};
use food_store_core::dto::ProductWrite;
use food_store_core::mappers::{category_from_dto, product_from_dto};
use food_store_core::models::{Category, Product};
use food_store_core::{CategoryId, Price, ProductId};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use super::{AdminUserView, render, set_flash, take_flash};
use crate::components::data_table::{DataTableConfig, products_table_config};
use crate::error::{AppError, Result};
use crate::filters;
use crate::middleware::RequireAdminAuth;
use crate::models::Flash;
use crate::state::AppState;

const MISSING_FIELDS: &str = "Faltan datos obligatorios.";

/// Product form data.
///
/// Numbers arrive as text so a bad value can be re-displayed as typed.
#[derive(Debug, Default, Deserialize)]
pub struct ProductForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub price: String,
    #[serde(default)]
    pub stock: String,
    #[serde(default)]
    pub category_id: String,
    #[serde(default)]
    pub image: String,
    /// Checkbox: present only when ticked.
    pub available: Option<String>,
}

impl ProductForm {
    /// Trim and check the form.
    ///
    /// Name, a parseable price, and a category are required; a blank stock
    /// means zero.
    ///
    /// # Errors
    ///
    /// Returns the message to show above the form.
    pub fn validate(&self) -> std::result::Result<ProductWrite, &'static str> {
        let name = self.name.trim();
        let price = Price::parse(&self.price).ok();
        let category = self
            .category_id
            .parse::<CategoryId>()
            .ok()
            .filter(|id| id.as_i64() > 0);

        let (Some(price), Some(category)) = (price, category) else {
            return Err(MISSING_FIELDS);
        };
        if name.is_empty() {
            return Err(MISSING_FIELDS);
        }

        let stock = match self.stock.trim() {
            "" => 0,
            raw => raw
                .parse::<u32>()
                .map_err(|_| "El stock debe ser un número entero mayor o igual a 0")?,
        };
        let description = self.description.trim();

        Ok(ProductWrite {
            name: name.to_string(),
            price,
            description: (!description.is_empty()).then(|| description.to_string()),
            stock,
            image: self.image.trim().to_string(),
            available: self.available.is_some(),
            id_categoria: category,
        })
    }

    fn from_product(product: &Product) -> Self {
        Self {
            name: product.name.clone(),
            description: product.description.clone().unwrap_or_default(),
            price: product.price.amount().to_string(),
            stock: product.stock.to_string(),
            category_id: product.category_id.to_string(),
            image: product.image.clone(),
            available: product.available.then(|| "on".to_string()),
        }
    }
}

/// One row of the products table.
#[derive(Debug, Clone)]
pub struct ProductRow {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub price: String,
    pub image: String,
    pub category: String,
    pub stock: u32,
    pub available_label: &'static str,
    pub available_class: &'static str,
}

impl From<&Product> for ProductRow {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id,
            name: product.name.clone(),
            description: product
                .description
                .clone()
                .unwrap_or_else(|| "-".to_string()),
            price: product.price.to_string(),
            image: product.image_or_placeholder(60),
            category: product
                .category_name
                .clone()
                .unwrap_or_else(|| "N/A".to_string()),
            stock: product.stock,
            available_label: if product.available {
                "Disponible"
            } else {
                "No disponible"
            },
            available_class: if product.available {
                "badge--success"
            } else {
                "badge--danger"
            },
        }
    }
}

/// An entry in the category select.
#[derive(Debug, Clone)]
pub struct CategoryOption {
    pub id: CategoryId,
    pub name: String,
    pub selected: bool,
}

fn category_options(categories: &[Category], selected: &str) -> Vec<CategoryOption> {
    categories
        .iter()
        .map(|c| CategoryOption {
            id: c.id,
            name: c.name.clone(),
            selected: c.id.to_string() == selected.trim(),
        })
        .collect()
}

/// Products table template.
#[derive(Template)]
#[template(path = "products/index.html")]
pub struct ProductsIndexTemplate {
    pub admin_user: AdminUserView,
    pub current_path: String,
    pub flash: Option<Flash>,
    pub table: DataTableConfig,
    pub products: Vec<ProductRow>,
    pub load_error: Option<String>,
}

/// New/edit product form template.
#[derive(Template)]
#[template(path = "products/form.html")]
pub struct ProductFormTemplate {
    pub admin_user: AdminUserView,
    pub current_path: String,
    pub flash: Option<Flash>,
    pub title: &'static str,
    pub action: String,
    pub form: ProductForm,
    pub categories: Vec<CategoryOption>,
    pub error: Option<String>,
}

impl ProductFormTemplate {
    fn new(
        admin_user: AdminUserView,
        editing: Option<ProductId>,
        form: ProductForm,
        categories: &[Category],
        error: Option<String>,
    ) -> Self {
        Self {
            admin_user,
            current_path: "/products".to_string(),
            flash: None,
            title: if editing.is_some() {
                "Editar Producto"
            } else {
                "Nuevo Producto"
            },
            action: editing.map_or_else(|| "/products".to_string(), |id| format!("/products/{id}")),
            categories: category_options(categories, &form.category_id),
            form,
            error,
        }
    }
}

async fn load_categories(state: &AppState) -> Result<Vec<Category>> {
    Ok(state
        .backend()
        .list_categories()
        .await?
        .into_iter()
        .map(category_from_dto)
        .collect())
}

/// Products table.
#[instrument(skip(admin, state, session))]
pub async fn index(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    session: Session,
) -> Response {
    let (products, load_error) = match state.backend().list_products().await {
        Ok(dtos) => (
            dtos.into_iter()
                .map(|dto| ProductRow::from(&product_from_dto(dto, None)))
                .collect(),
            None,
        ),
        Err(e) => {
            tracing::error!("Failed to fetch products: {e}");
            (Vec::new(), Some(AppError::from(e).public_message()))
        }
    };

    render(&ProductsIndexTemplate {
        admin_user: AdminUserView::from(&admin),
        current_path: "/products".to_string(),
        flash: take_flash(&session).await,
        table: products_table_config(),
        products,
        load_error,
    })
}

/// Empty form. New products start as available.
#[instrument(skip(admin, state))]
pub async fn new(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
) -> Result<Response> {
    let categories = load_categories(&state).await?;
    let form = ProductForm {
        available: Some("on".to_string()),
        ..ProductForm::default()
    };
    Ok(render(&ProductFormTemplate::new(
        AdminUserView::from(&admin),
        None,
        form,
        &categories,
        None,
    )))
}

/// Form pre-filled from the backend.
#[instrument(skip(admin, state))]
pub async fn edit(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
) -> Result<Response> {
    let (dto, categories) = tokio::try_join!(
        async { state.backend().get_product(id).await.map_err(AppError::from) },
        load_categories(&state),
    )?;
    let product = product_from_dto(dto, Some(id));

    Ok(render(&ProductFormTemplate::new(
        AdminUserView::from(&admin),
        Some(id),
        ProductForm::from_product(&product),
        &categories,
        None,
    )))
}

/// Create a product.
#[instrument(skip(admin, state, session, form))]
pub async fn create(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<ProductForm>,
) -> Response {
    save(AdminUserView::from(&admin), &state, &session, None, form).await
}

/// Update a product.
#[instrument(skip(admin, state, session, form))]
pub async fn update(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<ProductId>,
    Form(form): Form<ProductForm>,
) -> Response {
    save(AdminUserView::from(&admin), &state, &session, Some(id), form).await
}

async fn save(
    admin_user: AdminUserView,
    state: &AppState,
    session: &Session,
    id: Option<ProductId>,
    form: ProductForm,
) -> Response {
    let body = match form.validate() {
        Ok(body) => body,
        Err(msg) => return redisplay(admin_user, state, id, form, msg).await,
    };

    let result = match id {
        Some(id) => state.backend().update_product(id, &body).await,
        None => state.backend().create_product(&body).await,
    };

    match result {
        Ok(_) => {
            tracing::info!(product = %body.name, "Product saved");
            let message = if id.is_some() {
                "Producto actualizado correctamente"
            } else {
                "Producto creado correctamente"
            };
            set_flash(session, Flash::success(message)).await;
            Redirect::to("/products").into_response()
        }
        Err(e) => {
            tracing::error!("Failed to save product: {e}");
            redisplay(admin_user, state, id, form, "Error al guardar el producto").await
        }
    }
}

async fn redisplay(
    admin_user: AdminUserView,
    state: &AppState,
    id: Option<ProductId>,
    form: ProductForm,
    error: &str,
) -> Response {
    let categories = load_categories(state).await.unwrap_or_else(|e| {
        tracing::warn!("Failed to reload categories: {e}");
        Vec::new()
    });
    render(&ProductFormTemplate::new(
        admin_user,
        id,
        form,
        &categories,
        Some(error.to_string()),
    ))
}

/// Delete a product.
#[instrument(skip(_admin, state, session))]
pub async fn delete(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<ProductId>,
) -> Redirect {
    let flash = match state.backend().delete_product(id).await {
        Ok(()) => {
            tracing::info!(product_id = %id, "Product deleted");
            Flash::success("Producto eliminado correctamente")
        }
        Err(e) => {
            tracing::error!("Failed to delete product {id}: {e}");
            Flash::error("Error al eliminar el producto")
        }
    };
    set_flash(&session, flash).await;
    Redirect::to("/products")
}
