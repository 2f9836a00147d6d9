//! The customer's own orders.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Path, State};
use food_store_core::catalog::orders_for_user;
use food_store_core::mappers::order_from_dto;
use food_store_core::models::Order;
use food_store_core::types::{OrderId, UserId};
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::filters;
use crate::models::OrderView;
use crate::routes::page::Page;
use crate::state::AppState;

/// Order list template.
#[derive(Template, WebTemplate)]
#[template(path = "orders/index.html")]
pub struct OrdersTemplate {
    pub page: Page,
    pub orders: Vec<OrderView>,
}

/// Order detail template.
#[derive(Template, WebTemplate)]
#[template(path = "orders/show.html")]
pub struct OrderShowTemplate {
    pub page: Page,
    pub order: OrderView,
}

/// The order, if it belongs to `user`.
///
/// Someone else's order is reported as missing rather than forbidden so
/// order ids cannot be probed.
///
/// # Errors
///
/// Returns [`AppError::NotFound`] for a foreign order.
pub fn owned_by(order: Order, user: UserId) -> Result<Order> {
    if order.user_id == Some(user) {
        Ok(order)
    } else {
        Err(AppError::NotFound(format!("pedido {}", order.id)))
    }
}

/// List the user's orders, newest first.
#[instrument(skip_all, fields(user_id = %page.user.id))]
pub async fn index(State(state): State<AppState>, page: Page) -> Result<OrdersTemplate> {
    let orders: Vec<Order> = state
        .backend()
        .list_orders()
        .await?
        .into_iter()
        .map(order_from_dto)
        .collect();

    let mine = orders_for_user(&orders, page.user.id);

    Ok(OrdersTemplate {
        page,
        orders: mine.iter().map(OrderView::new).collect(),
    })
}

/// Show one of the user's orders.
#[instrument(skip(state, page), fields(user_id = %page.user.id))]
pub async fn show(
    State(state): State<AppState>,
    page: Page,
    Path(id): Path<i64>,
) -> Result<OrderShowTemplate> {
    let dto = state.backend().get_order(OrderId::new(id)).await?;
    let order = owned_by(order_from_dto(dto), page.user.id)?;

    Ok(OrderShowTemplate {
        page,
        order: OrderView::new(&order),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::NaiveDate;
    use food_store_core::types::{OrderState, OrderStatus, PaymentMethod, Price};

    use super::*;

    fn order(owner: Option<i64>) -> Order {
        Order {
            id: OrderId::new(1),
            user_id: owner.map(UserId::new),
            user_name: String::new(),
            user_email: String::new(),
            phone: String::new(),
            address: String::new(),
            payment_method: PaymentMethod::Cash,
            notes: String::new(),
            subtotal: Price::ZERO,
            shipping: Price::ZERO,
            total: Price::ZERO,
            status: OrderStatus::Pending,
            state: OrderState::Pendiente,
            created_at: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            items: Vec::new(),
        }
    }

    #[test]
    fn test_owned_by() {
        assert!(owned_by(order(Some(3)), UserId::new(3)).is_ok());
        assert!(matches!(
            owned_by(order(Some(4)), UserId::new(3)),
            Err(AppError::NotFound(_))
        ));
        assert!(owned_by(order(None), UserId::new(3)).is_err());
    }
}
