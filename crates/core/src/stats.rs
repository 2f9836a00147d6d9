//! Aggregates shown on the admin dashboard.

use crate::models::{Category, Order, Product};
use crate::types::{OrderState, Price};

/// Products with fewer units than this (but at least one) count as low stock.
pub const LOW_STOCK_THRESHOLD: u32 = 10;

/// How many names each stock warning lists before "+N más".
pub const STOCK_PREVIEW_LEN: usize = 5;

/// A product named in a stock warning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StockEntry {
    pub name: String,
    pub stock: u32,
}

/// The first few entries of a stock warning and how many were left out.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StockList {
    pub total: usize,
    pub preview: Vec<StockEntry>,
    pub remaining: usize,
}

impl StockList {
    fn from_products<'a>(products: impl Iterator<Item = &'a Product>) -> Self {
        let all: Vec<StockEntry> = products
            .map(|p| StockEntry {
                name: p.name.clone(),
                stock: p.stock,
            })
            .collect();
        let total = all.len();
        let preview: Vec<StockEntry> = all.into_iter().take(STOCK_PREVIEW_LEN).collect();
        Self {
            total,
            remaining: total - preview.len(),
            preview,
        }
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.total == 0
    }
}

/// Dashboard numbers, computed from one snapshot of the catalog and orders.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DashboardStats {
    pub categories: usize,
    pub products: usize,
    pub orders: usize,
    pub available_products: usize,
    pub pending_orders: usize,
    pub processing_orders: usize,
    pub completed_orders: usize,
    /// Sum of totals over orders that are not cancelled.
    pub revenue: Price,
    pub low_stock: StockList,
    pub out_of_stock: StockList,
}

impl DashboardStats {
    #[must_use]
    pub fn compute(categories: &[Category], products: &[Product], orders: &[Order]) -> Self {
        let count_state =
            |states: &[OrderState]| orders.iter().filter(|o| states.contains(&o.state)).count();

        Self {
            categories: categories.len(),
            products: products.len(),
            orders: orders.len(),
            available_products: products.iter().filter(|p| p.available).count(),
            pending_orders: count_state(&[OrderState::Pendiente]),
            processing_orders: count_state(&[OrderState::Confirmado, OrderState::EnPreparacion]),
            completed_orders: count_state(&[OrderState::Terminado]),
            revenue: orders
                .iter()
                .filter(|o| o.state != OrderState::Cancelado)
                .map(|o| o.total)
                .sum(),
            low_stock: StockList::from_products(
                products
                    .iter()
                    .filter(|p| p.stock > 0 && p.stock < LOW_STOCK_THRESHOLD),
            ),
            out_of_stock: StockList::from_products(products.iter().filter(|p| p.stock == 0)),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::mappers::status_from_state;
    use crate::types::{CategoryId, OrderId, PaymentMethod, ProductId};

    fn product(id: i64, stock: u32, available: bool) -> Product {
        Product {
            id: ProductId::new(id),
            name: format!("P{id}"),
            description: None,
            price: Price::from_major(100),
            stock,
            category_id: CategoryId::new(1),
            category_name: None,
            available,
            image: String::new(),
        }
    }

    fn order(id: i64, state: OrderState, total: u32) -> Order {
        Order {
            id: OrderId::new(id),
            user_id: None,
            user_name: String::new(),
            user_email: String::new(),
            phone: String::new(),
            address: String::new(),
            payment_method: PaymentMethod::Cash,
            notes: String::new(),
            subtotal: Price::from_major(total),
            shipping: Price::ZERO,
            total: Price::from_major(total),
            status: status_from_state(state),
            state,
            created_at: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            items: Vec::new(),
        }
    }

    #[test]
    fn test_order_counters_and_revenue() {
        let orders = vec![
            order(1, OrderState::Pendiente, 100),
            order(2, OrderState::Confirmado, 200),
            order(3, OrderState::EnPreparacion, 300),
            order(4, OrderState::Enviado, 400),
            order(5, OrderState::Terminado, 500),
            order(6, OrderState::Cancelado, 1000),
        ];
        let stats = DashboardStats::compute(&[], &[], &orders);

        assert_eq!(stats.orders, 6);
        assert_eq!(stats.pending_orders, 1);
        assert_eq!(stats.processing_orders, 2);
        assert_eq!(stats.completed_orders, 1);
        assert_eq!(stats.revenue, Price::from_major(1500));
    }

    #[test]
    fn test_stock_lists() {
        let mut products: Vec<Product> = (1..=7).map(|i| product(i, 3, true)).collect();
        products.push(product(8, 0, true));
        products.push(product(9, 10, false));
        products.push(product(10, 0, false));

        let stats = DashboardStats::compute(&[], &products, &[]);

        assert_eq!(stats.products, 10);
        assert_eq!(stats.available_products, 8);
        assert_eq!(stats.low_stock.total, 7);
        assert_eq!(stats.low_stock.preview.len(), 5);
        assert_eq!(stats.low_stock.remaining, 2);
        assert_eq!(stats.out_of_stock.total, 2);
        assert_eq!(stats.out_of_stock.remaining, 0);
    }

    #[test]
    fn test_empty_snapshot() {
        let stats = DashboardStats::compute(&[], &[], &[]);
        assert_eq!(stats, DashboardStats::default());
        assert!(stats.low_stock.is_empty());
    }
}
