//! Orders list page handler.

use askama::Template;
use axum::{
    extract::{Query, State},
    response::Response,
};
use food_store_core::catalog::{OrderFilter, sort_newest_first};
use food_store_core::mappers::order_from_dto;
use food_store_core::models::Order;
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use super::types::OrderTableView;
use crate::components::data_table::{
    DataTableConfig, FilterOption, order_status_options, orders_table_config,
};
use crate::error::AppError;
use crate::filters;
use crate::middleware::RequireAdminAuth;
use crate::models::Flash;
use crate::routes::{AdminUserView, render, take_flash};
use crate::state::AppState;

/// `?status=` on the orders list.
#[derive(Debug, Default, Deserialize)]
pub struct OrdersQuery {
    pub status: Option<String>,
}

/// Orders list page template.
#[derive(Template)]
#[template(path = "orders/index.html")]
pub struct OrdersIndexTemplate {
    pub admin_user: AdminUserView,
    pub current_path: String,
    pub flash: Option<Flash>,
    pub table: DataTableConfig,
    pub status_options: Vec<FilterOption>,
    pub orders: Vec<OrderTableView>,
    /// Orders before filtering, for the "N de M" caption.
    pub total_count: usize,
    pub load_error: Option<String>,
}

/// Orders list, newest first, optionally narrowed by status.
#[instrument(skip(admin, state, session))]
pub async fn index(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<OrdersQuery>,
) -> Response {
    let filter = OrderFilter::parse(query.status.as_deref());

    let (orders, load_error) = match state.backend().list_orders().await {
        Ok(dtos) => {
            let mut orders: Vec<Order> = dtos.into_iter().map(order_from_dto).collect();
            sort_newest_first(&mut orders);
            (orders, None)
        }
        Err(e) => {
            tracing::error!("Failed to fetch orders: {e}");
            (Vec::new(), Some(AppError::from(e).public_message()))
        }
    };

    let shown = filter.apply(&orders);

    render(&OrdersIndexTemplate {
        admin_user: AdminUserView::from(&admin),
        current_path: "/orders".to_string(),
        flash: take_flash(&session).await,
        table: orders_table_config(),
        status_options: order_status_options(filter),
        orders: shown.iter().map(OrderTableView::from).collect(),
        total_count: orders.len(),
        load_error,
    })
}
