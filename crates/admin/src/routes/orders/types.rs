//! View types for order pages.

use food_store_core::models::{Order, OrderItem};
use food_store_core::{OrderState, OrderStatus};

/// Badge class for a simplified status.
#[must_use]
pub const fn status_badge_class(status: OrderStatus) -> &'static str {
    match status {
        OrderStatus::Pending => "badge--warning",
        OrderStatus::Processing => "badge--info",
        OrderStatus::Completed => "badge--success",
        OrderStatus::Cancelled => "badge--danger",
    }
}

/// One row of the orders table.
#[derive(Debug, Clone)]
pub struct OrderTableView {
    pub id: i64,
    pub customer: String,
    pub email: String,
    pub date: String,
    pub item_count: u32,
    pub total: String,
    pub status_label: &'static str,
    pub status_class: &'static str,
}

impl From<&Order> for OrderTableView {
    fn from(order: &Order) -> Self {
        Self {
            id: order.id.as_i64(),
            customer: order.user_name.clone(),
            email: order.user_email.clone(),
            date: order.created_at.format("%d/%m/%Y").to_string(),
            item_count: order.item_count(),
            total: order.total.to_string(),
            status_label: order.status.label(),
            status_class: status_badge_class(order.status),
        }
    }
}

#[derive(Debug, Clone)]
pub struct OrderLineView {
    pub name: String,
    pub quantity: u32,
    pub price: String,
    pub line_total: String,
}

impl From<&OrderItem> for OrderLineView {
    fn from(item: &OrderItem) -> Self {
        Self {
            name: item.name.clone(),
            quantity: item.quantity,
            price: item.price.to_string(),
            line_total: item.line_total().to_string(),
        }
    }
}

/// An entry in the state select.
#[derive(Debug, Clone)]
pub struct StateOption {
    pub value: &'static str,
    pub label: &'static str,
    pub selected: bool,
}

/// Every backend state, with `current` pre-selected.
#[must_use]
pub fn state_options(current: OrderState) -> Vec<StateOption> {
    OrderState::ALL
        .into_iter()
        .map(|state| StateOption {
            value: state.as_str(),
            label: state.label(),
            selected: state == current,
        })
        .collect()
}

/// Full order for the detail page.
#[derive(Debug, Clone)]
pub struct OrderDetailView {
    pub id: i64,
    pub date: String,
    pub customer: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub notes: String,
    pub payment: &'static str,
    pub status_label: &'static str,
    pub status_class: &'static str,
    pub state_label: &'static str,
    pub subtotal: String,
    pub shipping: String,
    pub total: String,
    pub lines: Vec<OrderLineView>,
    pub states: Vec<StateOption>,
}

impl From<&Order> for OrderDetailView {
    fn from(order: &Order) -> Self {
        Self {
            id: order.id.as_i64(),
            date: order.created_at.format("%d/%m/%Y").to_string(),
            customer: order.user_name.clone(),
            email: order.user_email.clone(),
            phone: order.phone.clone(),
            address: order.address.clone(),
            notes: order.notes.clone(),
            payment: order.payment_method.label(),
            status_label: order.status.label(),
            status_class: status_badge_class(order.status),
            state_label: order.state.label(),
            subtotal: order.subtotal.to_string(),
            shipping: order.shipping.to_string(),
            total: order.total.to_string(),
            lines: order.items.iter().map(OrderLineView::from).collect(),
            states: state_options(order.state),
        }
    }
}
