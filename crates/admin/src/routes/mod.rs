//! HTTP route handlers for admin.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                     - Liveness check
//! GET  /health/ready               - Readiness check (pings the backend)
//!
//! # Auth (email lookup, admins only)
//! GET  /login                      - Login page
//! POST /login                      - Login action
//! POST /logout                     - Logout
//!
//! # Dashboard
//! GET  /                           - Counters, revenue, inventory warnings
//!
//! # Categories
//! GET  /categories                 - Category table
//! GET  /categories/new             - New category form
//! POST /categories                 - Create category
//! GET  /categories/{id}/edit       - Edit category form
//! POST /categories/{id}            - Update category
//! POST /categories/{id}/delete     - Delete category
//!
//! # Products
//! GET  /products                   - Product table
//! GET  /products/new               - New product form
//! POST /products                   - Create product
//! GET  /products/{id}/edit         - Edit product form
//! POST /products/{id}              - Update product
//! POST /products/{id}/delete       - Delete product
//!
//! # Orders
//! GET  /orders?status=             - Order list, newest first
//! GET  /orders/{id}                - Order detail
//! POST /orders/{id}/status         - Change the backend state
//! ```

pub mod auth;
pub mod categories;
pub mod dashboard;
pub mod health;
pub mod orders;
pub mod products;

use askama::Template;
use axum::{
    Router,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
};
use tower_sessions::Session;

use crate::models::{CurrentAdmin, Flash, session_keys};
use crate::state::AppState;

/// Logged-in admin as the layout shows it.
#[derive(Debug, Clone)]
pub struct AdminUserView {
    pub name: String,
    pub email: String,
}

impl From<&CurrentAdmin> for AdminUserView {
    fn from(admin: &CurrentAdmin) -> Self {
        Self {
            name: admin.name.clone(),
            email: admin.email.clone(),
        }
    }
}

/// Render a template, falling back to a bare 500 on failure.
pub fn render<T: Template>(template: &T) -> Response {
    match template.render() {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            tracing::error!("Template render error: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
        }
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

fn category_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(categories::index).post(categories::create))
        .route("/new", get(categories::new))
        .route("/{id}", post(categories::update))
        .route("/{id}/edit", get(categories::edit))
        .route("/{id}/delete", post(categories::delete))
}

fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index).post(products::create))
        .route("/new", get(products::new))
        .route("/{id}", post(products::update))
        .route("/{id}/edit", get(products::edit))
        .route("/{id}/delete", post(products::delete))
}

fn order_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(orders::index))
        .route("/{id}", get(orders::show))
        .route("/{id}/status", post(orders::update_status))
}

/// Build the complete admin router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health))
        .route("/health/ready", get(health::readiness))
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/logout", post(auth::logout))
        .route("/", get(dashboard::index))
        .nest("/categories", category_routes())
        .nest("/products", product_routes())
        .nest("/orders", order_routes())
}
