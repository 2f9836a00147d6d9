//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                 - Liveness check
//! GET  /health/ready           - Readiness check (pings the backend)
//!
//! # Auth (rate limited)
//! GET  /auth/login             - Login page
//! POST /auth/login             - Login action
//! GET  /auth/register          - Register page
//! POST /auth/register          - Register action
//! POST /auth/logout            - Logout action
//!
//! # Store (requires login)
//! GET  /                       - Home: categories, search, filters, products
//! GET  /products/{id}          - Product detail
//!
//! # Cart (requires login)
//! GET  /cart                   - Cart page with checkout form
//! POST /cart/add               - Add to cart
//! POST /cart/adjust            - `-`/`+` quantity buttons
//! POST /cart/remove            - Remove a line
//! POST /cart/clear             - Empty the cart
//! GET  /cart/count             - Cart badge count (plain text)
//! POST /checkout               - Place the order
//!
//! # Account (requires login)
//! GET  /orders                 - Order history
//! GET  /orders/{id}            - Order detail
//! GET  /profile                - Profile page
//! POST /profile                - Update name and phone
//! POST /profile/password       - Password form
//! ```

pub mod auth;
pub mod cart;
pub mod health;
pub mod home;
pub mod orders;
pub mod page;
pub mod products;
pub mod profile;

use axum::{
    Router,
    routing::{get, post},
};

use crate::middleware::auth_rate_limiter;
use crate::state::AppState;

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/register", get(auth::register_page).post(auth::register))
        .route_layer(auth_rate_limiter())
        .route("/logout", post(auth::logout))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add", post(cart::add))
        .route("/adjust", post(cart::adjust))
        .route("/remove", post(cart::remove))
        .route("/clear", post(cart::clear))
        .route("/count", get(cart::count))
}

/// Create the order routes router.
pub fn order_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(orders::index))
        .route("/{id}", get(orders::show))
}

/// Create the profile routes router.
pub fn profile_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(profile::show).post(profile::update))
        .route("/password", post(profile::change_password))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health))
        .route("/health/ready", get(health::readiness))
        .route("/", get(home::home))
        .route("/products/{id}", get(products::show))
        .nest("/cart", cart_routes())
        .route("/checkout", post(cart::checkout))
        .nest("/orders", order_routes())
        .nest("/profile", profile_routes())
        .nest("/auth", auth_routes())
}
