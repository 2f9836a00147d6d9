//! Dashboard route handler.

use askama::Template;
use axum::{extract::State, response::Response};
use food_store_core::mappers::{category_from_dto, order_from_dto, product_from_dto};
use food_store_core::stats::DashboardStats;
use tower_sessions::Session;
use tracing::instrument;

use super::{AdminUserView, render, take_flash};
use crate::error::AppError;
use crate::filters;
use crate::middleware::RequireAdminAuth;
use crate::models::Flash;
use crate::state::AppState;

/// Dashboard template.
#[derive(Template)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    pub admin_user: AdminUserView,
    pub current_path: String,
    pub flash: Option<Flash>,
    /// `None` when the backend could not be read.
    pub stats: Option<DashboardStats>,
    pub load_error: Option<String>,
}

/// Dashboard page handler.
#[instrument(skip(admin, state, session))]
pub async fn index(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    session: Session,
) -> Response {
    let backend = state.backend();
    let snapshot = tokio::try_join!(
        backend.list_categories(),
        backend.list_products(),
        backend.list_orders(),
    );

    let (stats, load_error) = match snapshot {
        Ok((categories, products, orders)) => {
            let categories: Vec<_> = categories.into_iter().map(category_from_dto).collect();
            let products: Vec<_> = products
                .into_iter()
                .map(|dto| product_from_dto(dto, None))
                .collect();
            let orders: Vec<_> = orders.into_iter().map(order_from_dto).collect();
            (
                Some(DashboardStats::compute(&categories, &products, &orders)),
                None,
            )
        }
        Err(e) => {
            tracing::error!("Failed to load dashboard data: {e}");
            (None, Some(AppError::from(e).public_message()))
        }
    };

    render(&DashboardTemplate {
        admin_user: AdminUserView::from(&admin),
        current_path: "/".to_string(),
        flash: take_flash(&session).await,
        stats,
        load_error,
    })
}
