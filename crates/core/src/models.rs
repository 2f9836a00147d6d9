//! View models rendered by the storefront and admin pages.
//!
//! Built from backend DTOs by [`crate::mappers`]. They are serializable so
//! they can be kept in the session (the logged-in user, cart snapshots).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::types::{
    CategoryId, OrderId, OrderState, OrderStatus, PaymentMethod, Price, ProductId, Role, UserId,
};

/// A logged-in or listed user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    /// `"<first> <last>"`, trimmed.
    pub name: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub role: Role,
}

impl User {
    #[must_use]
    pub const fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

/// A product category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    pub description: String,
    /// The backend has no such flag; always `true`.
    pub active: bool,
    /// The backend has no category images; always empty.
    pub image: String,
}

/// Whether a product can be bought right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Availability {
    Available { stock: u32 },
    Unavailable,
    OutOfStock,
}

impl Availability {
    /// Badge text (`"Disponible (Stock: 4)"`).
    #[must_use]
    pub fn label(&self) -> String {
        match self {
            Self::Available { stock } => format!("Disponible (Stock: {stock})"),
            Self::Unavailable => "No disponible".to_owned(),
            Self::OutOfStock => "Sin stock".to_owned(),
        }
    }

    /// CSS modifier for the badge.
    #[must_use]
    pub const fn css_class(&self) -> &'static str {
        match self {
            Self::Available { .. } => "badge--success",
            Self::Unavailable | Self::OutOfStock => "badge--danger",
        }
    }
}

/// A catalog product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: Option<String>,
    pub price: Price,
    pub stock: u32,
    pub category_id: CategoryId,
    pub category_name: Option<String>,
    /// The backend's `disponible` flag.
    pub available: bool,
    pub image: String,
}

impl Product {
    /// Available and in stock.
    #[must_use]
    pub const fn is_purchasable(&self) -> bool {
        self.available && self.stock > 0
    }

    #[must_use]
    pub const fn availability(&self) -> Availability {
        if !self.available {
            Availability::Unavailable
        } else if self.stock == 0 {
            Availability::OutOfStock
        } else {
            Availability::Available { stock: self.stock }
        }
    }

    /// The product image, or a sized placeholder when none is set.
    #[must_use]
    pub fn image_or_placeholder(&self, size: u32) -> String {
        if self.image.trim().is_empty() {
            format!("https://placehold.co/{size}x{size}?text=Sin+imagen")
        } else {
            self.image.clone()
        }
    }
}

/// One line of an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItem {
    pub product_id: Option<ProductId>,
    pub name: String,
    pub price: Price,
    pub quantity: u32,
    pub image: String,
}

impl OrderItem {
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.price.times(self.quantity)
    }
}

/// An order as listed to customers and admins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub user_id: Option<UserId>,
    pub user_name: String,
    pub user_email: String,
    pub phone: String,
    pub address: String,
    pub payment_method: PaymentMethod,
    pub notes: String,
    pub subtotal: Price,
    pub shipping: Price,
    pub total: Price,
    pub status: OrderStatus,
    /// The backend state behind [`Order::status`], for admin pages.
    pub state: OrderState,
    pub created_at: NaiveDate,
    pub items: Vec<OrderItem>,
}

impl Order {
    /// Total number of units across all lines.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.items.iter().map(|item| item.quantity).sum()
    }

    /// The first `n` lines and how many lines were left out.
    #[must_use]
    pub fn preview(&self, n: usize) -> (&[OrderItem], usize) {
        let shown = self.items.len().min(n);
        let (head, rest) = self.items.split_at(shown);
        (head, rest.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(available: bool, stock: u32) -> Product {
        Product {
            id: ProductId::new(1),
            name: "Pizza".into(),
            description: None,
            price: Price::from_major(1500),
            stock,
            category_id: CategoryId::new(1),
            category_name: None,
            available,
            image: String::new(),
        }
    }

    #[test]
    fn test_availability_states() {
        assert_eq!(product(true, 4).availability(), Availability::Available { stock: 4 });
        assert_eq!(product(false, 4).availability(), Availability::Unavailable);
        assert_eq!(product(true, 0).availability(), Availability::OutOfStock);
        assert_eq!(product(false, 0).availability(), Availability::Unavailable);
    }

    #[test]
    fn test_availability_labels() {
        assert_eq!(product(true, 4).availability().label(), "Disponible (Stock: 4)");
        assert_eq!(product(true, 0).availability().label(), "Sin stock");
    }

    #[test]
    fn test_purchasable() {
        assert!(product(true, 1).is_purchasable());
        assert!(!product(true, 0).is_purchasable());
        assert!(!product(false, 10).is_purchasable());
    }

    #[test]
    fn test_placeholder_image() {
        let mut p = product(true, 1);
        assert!(p.image_or_placeholder(300).contains("300x300"));
        p.image = "https://cdn.example.com/pizza.jpg".into();
        assert_eq!(p.image_or_placeholder(300), "https://cdn.example.com/pizza.jpg");
    }

    #[test]
    fn test_order_preview() {
        let item = |name: &str| OrderItem {
            product_id: None,
            name: name.into(),
            price: Price::from_major(100),
            quantity: 2,
            image: String::new(),
        };
        let order = Order {
            id: OrderId::new(1),
            user_id: None,
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
            created_at: NaiveDate::default(),
            items: vec![item("a"), item("b"), item("c"), item("d"), item("e")],
        };
        let (shown, more) = order.preview(3);
        assert_eq!(shown.len(), 3);
        assert_eq!(more, 2);
        assert_eq!(order.item_count(), 10);
    }
}
