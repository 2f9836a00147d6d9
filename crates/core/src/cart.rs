//! Shopping cart kept in the customer's session.
//!
//! Lines hold a snapshot of the product as it was when added, so the cart
//! page renders without refetching the catalog. The running total is
//! recomputed after every mutation and again whenever a cart is
//! deserialized, so `total == Σ price × quantity` holds for every `Cart`
//! value that exists.

use serde::{Deserialize, Serialize};

use crate::models::Product;
use crate::types::{Price, ProductId};

/// Errors from cart mutations.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CartError {
    /// Quantity to add was zero.
    #[error("La cantidad debe ser al menos 1")]
    ZeroQuantity,
    /// The product is disabled or has no stock.
    #[error("{name} no está disponible")]
    NotPurchasable {
        /// Product name.
        name: String,
    },
    /// The requested quantity is larger than the stock.
    #[error("Stock máximo disponible: {available}")]
    ExceedsStock {
        /// Units in stock.
        available: u32,
    },
}

/// One cart line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    pub product: Product,
    pub quantity: u32,
}

impl CartItem {
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.product.price.times(self.quantity)
    }
}

/// Subtotal, shipping, and grand total for the cart page and checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CartSummary {
    pub subtotal: Price,
    pub shipping: Price,
    pub total: Price,
}

#[derive(Deserialize)]
struct StoredCart {
    #[serde(default)]
    items: Vec<CartItem>,
}

/// The session cart.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "StoredCart")]
pub struct Cart {
    items: Vec<CartItem>,
    total: Price,
}

impl From<StoredCart> for Cart {
    fn from(stored: StoredCart) -> Self {
        let mut cart = Self {
            items: stored.items,
            total: Price::ZERO,
        };
        cart.items.retain(|item| item.quantity > 0);
        cart.recalculate();
        cart
    }
}

impl Cart {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Σ price × quantity over all lines.
    #[must_use]
    pub const fn total(&self) -> Price {
        self.total
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn recalculate(&mut self) {
        self.total = self.items.iter().map(CartItem::line_total).sum();
    }

    fn position(&self, product_id: ProductId) -> Option<usize> {
        self.items.iter().position(|item| item.product.id == product_id)
    }

    /// Add `quantity` units of a product.
    ///
    /// An existing line is incremented (and its snapshot refreshed); otherwise
    /// a new line is appended.
    ///
    /// # Errors
    ///
    /// Fails without touching the cart when `quantity` is zero, the product
    /// is not purchasable, or the combined quantity would exceed the stock.
    pub fn add(&mut self, product: Product, quantity: u32) -> Result<(), CartError> {
        if quantity == 0 {
            return Err(CartError::ZeroQuantity);
        }
        if !product.is_purchasable() {
            return Err(CartError::NotPurchasable { name: product.name });
        }

        let in_cart = self.quantity_of(product.id);
        let wanted = in_cart.saturating_add(quantity);
        if wanted > product.stock {
            return Err(CartError::ExceedsStock {
                available: product.stock,
            });
        }

        match self.position(product.id) {
            Some(idx) => {
                if let Some(item) = self.items.get_mut(idx) {
                    item.quantity = wanted;
                    item.product = product;
                }
            }
            None => self.items.push(CartItem { product, quantity }),
        }

        self.recalculate();
        Ok(())
    }

    /// Set a line's quantity. Zero or less removes it; unknown ids are ignored.
    pub fn update_quantity(&mut self, product_id: ProductId, quantity: i64) {
        let Some(idx) = self.position(product_id) else {
            return;
        };

        match u32::try_from(quantity) {
            Ok(q) if q > 0 => {
                if let Some(item) = self.items.get_mut(idx) {
                    item.quantity = q;
                }
            }
            _ => {
                self.items.remove(idx);
            }
        }

        self.recalculate();
    }

    /// Step a line's quantity by `delta` (the `-`/`+` buttons).
    ///
    /// Dropping to zero removes the line. Returns the new quantity (0 when
    /// removed or when the product is not in the cart).
    ///
    /// # Errors
    ///
    /// [`CartError::ExceedsStock`] when the new quantity is above the stock
    /// of the line's product snapshot.
    pub fn adjust_quantity(&mut self, product_id: ProductId, delta: i64) -> Result<u32, CartError> {
        let Some(item) = self.items.iter().find(|item| item.product.id == product_id) else {
            return Ok(0);
        };

        let new_quantity = i64::from(item.quantity).saturating_add(delta);
        if new_quantity > i64::from(item.product.stock) {
            return Err(CartError::ExceedsStock {
                available: item.product.stock,
            });
        }

        self.update_quantity(product_id, new_quantity);
        Ok(self.quantity_of(product_id))
    }

    /// Remove a line. Unknown ids are ignored.
    pub fn remove(&mut self, product_id: ProductId) {
        self.items.retain(|item| item.product.id != product_id);
        self.recalculate();
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.total = Price::ZERO;
    }

    /// Total units across all lines (the navbar badge).
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.items.iter().map(|item| item.quantity).sum()
    }

    #[must_use]
    pub fn contains(&self, product_id: ProductId) -> bool {
        self.position(product_id).is_some()
    }

    #[must_use]
    pub fn quantity_of(&self, product_id: ProductId) -> u32 {
        self.items
            .iter()
            .find(|item| item.product.id == product_id)
            .map_or(0, |item| item.quantity)
    }

    /// Totals for display. Shipping is only charged on a non-empty cart.
    #[must_use]
    pub fn summary(&self, shipping_cost: Price) -> CartSummary {
        let shipping = if self.is_empty() {
            Price::ZERO
        } else {
            shipping_cost
        };
        CartSummary {
            subtotal: self.total,
            shipping,
            total: self.total + shipping,
        }
    }
}
