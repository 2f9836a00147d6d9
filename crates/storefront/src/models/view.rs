//! Display data for templates.
//!
//! Templates get plain strings and flags so that formatting decisions
//! (prices, badges, placeholders) live in Rust and are unit-testable.

use food_store_core::models::{Order, OrderItem, Product};
use food_store_core::types::OrderStatus;

/// How many order lines the order list shows before "+N más".
pub const ORDER_PREVIEW_LEN: usize = 3;

/// Badge modifier for a customer-facing order status.
#[must_use]
pub const fn status_badge_class(status: OrderStatus) -> &'static str {
    match status {
        OrderStatus::Pending => "badge--warning",
        OrderStatus::Processing => "badge--info",
        OrderStatus::Completed => "badge--success",
        OrderStatus::Cancelled => "badge--danger",
    }
}

/// A product card on the home page and the detail page header.
#[derive(Debug, Clone)]
pub struct ProductView {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub price: String,
    pub image: String,
    pub category: String,
    pub badge_label: String,
    pub badge_class: &'static str,
    pub purchasable: bool,
    pub stock: u32,
}

impl ProductView {
    /// Card image size in pixels.
    pub const CARD_IMAGE_SIZE: u32 = 300;

    #[must_use]
    pub fn new(product: &Product) -> Self {
        let availability = product.availability();
        Self {
            id: product.id.as_i64(),
            name: product.name.clone(),
            description: product.description.clone().unwrap_or_default(),
            price: product.price.to_string(),
            image: product.image_or_placeholder(Self::CARD_IMAGE_SIZE),
            category: product.category_name.clone().unwrap_or_default(),
            badge_label: availability.label(),
            badge_class: availability.css_class(),
            purchasable: product.is_purchasable(),
            stock: product.stock,
        }
    }

    /// Description under a home-page card.
    #[must_use]
    pub fn card_description(&self) -> &str {
        self.description_or("Sin descripción")
    }

    /// Description on the product page.
    #[must_use]
    pub fn detail_description(&self) -> &str {
        self.description_or("Sin descripción disponible.")
    }

    fn description_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        if self.description.trim().is_empty() {
            fallback
        } else {
            &self.description
        }
    }
}

/// One order line.
#[derive(Debug, Clone)]
pub struct OrderLineView {
    pub name: String,
    pub quantity: u32,
    pub price: String,
    pub line_total: String,
    pub image: String,
}

impl From<&OrderItem> for OrderLineView {
    fn from(item: &OrderItem) -> Self {
        Self {
            name: item.name.clone(),
            quantity: item.quantity,
            price: item.price.to_string(),
            line_total: item.line_total().to_string(),
            image: item.image.clone(),
        }
    }
}

/// An order as listed and shown in detail.
#[derive(Debug, Clone)]
pub struct OrderView {
    pub id: i64,
    pub date: String,
    pub status_label: &'static str,
    pub status_class: &'static str,
    pub status_help: &'static str,
    pub state_label: &'static str,
    pub state_value: &'static str,
    pub payment: &'static str,
    pub customer_name: String,
    pub customer_email: String,
    pub phone: String,
    pub address: String,
    pub notes: String,
    pub subtotal: String,
    pub shipping: String,
    pub total: String,
    pub item_count: u32,
    pub lines: Vec<OrderLineView>,
    /// The first [`ORDER_PREVIEW_LEN`] lines.
    pub preview: Vec<OrderLineView>,
    /// Lines left out of `preview`.
    pub more: usize,
}

impl OrderView {
    #[must_use]
    pub fn new(order: &Order) -> Self {
        let (preview, more) = order.preview(ORDER_PREVIEW_LEN);
        Self {
            id: order.id.as_i64(),
            date: order.created_at.format("%d/%m/%Y").to_string(),
            status_label: order.status.label(),
            status_class: status_badge_class(order.status),
            status_help: order.status.help_text(),
            state_label: order.state.label(),
            state_value: order.state.as_str(),
            payment: order.payment_method.label(),
            customer_name: order.user_name.clone(),
            customer_email: order.user_email.clone(),
            phone: order.phone.clone(),
            address: order.address.clone(),
            notes: order.notes.clone(),
            subtotal: order.subtotal.to_string(),
            shipping: order.shipping.to_string(),
            total: order.total.to_string(),
            item_count: order.item_count(),
            lines: order.items.iter().map(OrderLineView::from).collect(),
            preview: preview.iter().map(OrderLineView::from).collect(),
            more,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::NaiveDate;
    use food_store_core::types::{CategoryId, OrderId, OrderState, PaymentMethod, Price, ProductId};

    use super::*;

    fn product(stock: u32, available: bool) -> Product {
        Product {
            id: ProductId::new(4),
            name: "Empanada".to_string(),
            description: None,
            price: Price::from_major(350),
            stock,
            category_id: CategoryId::new(1),
            category_name: Some("Salados".to_string()),
            available,
            image: String::new(),
        }
    }

    #[test]
    fn test_product_view_badges() {
        let view = ProductView::new(&product(4, true));
        assert_eq!(view.badge_label, "Disponible (Stock: 4)");
        assert_eq!(view.price, "$350.00");
        assert!(view.purchasable);
        assert!(view.image.contains("placehold.co/300x300"));

        let view = ProductView::new(&product(0, true));
        assert_eq!(view.badge_label, "Sin stock");
        assert!(!view.purchasable);

        let view = ProductView::new(&product(9, false));
        assert_eq!(view.badge_label, "No disponible");
        assert_eq!(view.badge_class, "badge--danger");
    }

    #[test]
    fn test_product_view_description_fallbacks() {
        let view = ProductView::new(&product(4, true));
        assert_eq!(view.card_description(), "Sin descripción");
        assert_eq!(view.detail_description(), "Sin descripción disponible.");

        let mut described = product(4, true);
        described.description = Some("Carne cortada a cuchillo".to_string());
        let view = ProductView::new(&described);
        assert_eq!(view.detail_description(), "Carne cortada a cuchillo");
        assert_eq!(view.card_description(), "Carne cortada a cuchillo");
    }

    #[test]
    fn test_order_view_preview() {
        let items = (1..=5)
            .map(|i| OrderItem {
                product_id: Some(ProductId::new(i)),
                name: format!("P{i}"),
                price: Price::from_major(10),
                quantity: 2,
                image: String::new(),
            })
            .collect();
        let order = Order {
            id: OrderId::new(8),
            user_id: None,
            user_name: "Ana Gómez".to_string(),
            user_email: "ana@example.com".to_string(),
            phone: String::new(),
            address: String::new(),
            payment_method: PaymentMethod::Card,
            notes: String::new(),
            subtotal: Price::from_major(100),
            shipping: Price::ZERO,
            total: Price::from_major(100),
            status: OrderStatus::Processing,
            state: OrderState::EnPreparacion,
            created_at: NaiveDate::from_ymd_opt(2025, 3, 9).unwrap(),
            items,
        };

        let view = OrderView::new(&order);
        assert_eq!(view.date, "09/03/2025");
        assert_eq!(view.preview.len(), 3);
        assert_eq!(view.more, 2);
        assert_eq!(view.item_count, 10);
        assert_eq!(view.status_label, "En Preparación");
        assert_eq!(view.status_class, "badge--info");
        assert_eq!(view.payment, "Tarjeta");
    }
}
