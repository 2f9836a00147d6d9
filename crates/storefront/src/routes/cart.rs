//! Cart and checkout route handlers.
//!
//! The cart lives in the session as a [`Cart`]. Every mutation is a plain
//! form post that redirects back, with the outcome carried as a flash
//! notice.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use food_store_core::cart::Cart;
use food_store_core::mappers::{order_create_from_cart, product_from_dto};
use food_store_core::types::{PaymentMethod, ProductId};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::error::{AppError, Result, add_breadcrumb};
use crate::filters;
use crate::middleware::auth::RequireAuth;
use crate::models::{Flash, session_keys};
use crate::routes::page::{Page, safe_return_path, set_flash};
use crate::state::AppState;

// =============================================================================
// Session Helpers
// =============================================================================

/// Load the cart from the session; a missing or unreadable cart is empty.
pub async fn load_cart(session: &Session) -> Cart {
    session
        .get::<Cart>(session_keys::CART)
        .await
        .ok()
        .flatten()
        .unwrap_or_default()
}

/// Store the cart in the session.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn save_cart(session: &Session, cart: &Cart) -> std::result::Result<(), AppError> {
    session.insert(session_keys::CART, cart).await?;
    Ok(())
}

// =============================================================================
// Views
// =============================================================================

/// Cart line display data for templates.
#[derive(Clone)]
pub struct CartLineView {
    pub product_id: i64,
    pub name: String,
    pub image: String,
    pub price: String,
    pub quantity: u32,
    pub line_total: String,
    pub at_stock_limit: bool,
}

/// Payment method option in the checkout form.
#[derive(Clone)]
pub struct PaymentOption {
    pub value: &'static str,
    pub label: &'static str,
}

// =============================================================================
// Form Types
// =============================================================================

/// Add to cart form data.
#[derive(Debug, Deserialize)]
pub struct AddToCartForm {
    pub product_id: i64,
    pub quantity: Option<u32>,
    pub return_to: Option<String>,
}

/// `-`/`+` button form data.
#[derive(Debug, Deserialize)]
pub struct AdjustCartForm {
    pub product_id: i64,
    pub delta: i64,
}

/// Remove from cart form data.
#[derive(Debug, Deserialize)]
pub struct RemoveFromCartForm {
    pub product_id: i64,
}

/// Checkout form data.
#[derive(Debug, Deserialize)]
pub struct CheckoutForm {
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub payment_method: String,
    #[serde(default)]
    pub notes: String,
}

impl CheckoutForm {
    /// The chosen payment method, once phone and address are filled in.
    ///
    /// # Errors
    ///
    /// Returns the message to show when a required field is missing.
    pub fn validate(&self) -> std::result::Result<PaymentMethod, &'static str> {
        const MISSING: &str = "Por favor completa todos los campos requeridos";
        if self.phone.trim().is_empty() || self.address.trim().is_empty() {
            return Err(MISSING);
        }
        self.payment_method.parse().map_err(|_| MISSING)
    }
}

// =============================================================================
// Templates
// =============================================================================

/// Cart page template.
#[derive(Template, WebTemplate)]
#[template(path = "cart/show.html")]
pub struct CartShowTemplate {
    pub page: Page,
    pub items: Vec<CartLineView>,
    pub subtotal: String,
    pub shipping: String,
    pub total: String,
    pub payment_methods: Vec<PaymentOption>,
    pub phone: String,
}

// =============================================================================
// Handlers
// =============================================================================

/// Display cart page.
#[instrument(skip_all)]
pub async fn show(State(state): State<AppState>, session: Session, page: Page) -> impl IntoResponse {
    let cart = load_cart(&session).await;
    let summary = cart.summary(state.config().shipping_cost);

    let items = cart
        .items()
        .iter()
        .map(|item| CartLineView {
            product_id: item.product.id.as_i64(),
            name: item.product.name.clone(),
            image: item.product.image_or_placeholder(100),
            price: item.product.price.to_string(),
            quantity: item.quantity,
            line_total: item.line_total().to_string(),
            at_stock_limit: item.quantity >= item.product.stock,
        })
        .collect();

    CartShowTemplate {
        phone: page.user.phone.clone(),
        page,
        items,
        subtotal: summary.subtotal.to_string(),
        shipping: summary.shipping.to_string(),
        total: summary.total.to_string(),
        payment_methods: PaymentMethod::ALL
            .iter()
            .map(|m| PaymentOption {
                value: m.as_str(),
                label: m.label(),
            })
            .collect(),
    }
}

/// Add a product to the cart.
///
/// The product is refetched so the stock check uses current numbers.
#[instrument(skip(state, session, _page))]
pub async fn add(
    State(state): State<AppState>,
    session: Session,
    _page: Page,
    Form(form): Form<AddToCartForm>,
) -> Result<Response> {
    let product_id = ProductId::new(form.product_id);
    let back = safe_return_path(
        form.return_to.as_deref(),
        &format!("/products/{product_id}"),
    );

    let dto = state.backend().get_product(product_id).await?;
    let product = product_from_dto(dto, Some(product_id));
    let name = product.name.clone();

    let mut cart = load_cart(&session).await;
    match cart.add(product, form.quantity.unwrap_or(1)) {
        Ok(()) => {
            save_cart(&session, &cart).await?;
            add_breadcrumb(
                "cart",
                "Added to cart",
                Some(&[("product_id", &product_id.to_string())]),
            );
            set_flash(&session, Flash::success(format!("{name} agregado al carrito"))).await;
        }
        Err(e) => set_flash(&session, Flash::error(e.to_string())).await,
    }

    Ok(Redirect::to(&back).into_response())
}

/// Step a line's quantity up or down.
pub async fn adjust(
    session: Session,
    _page: Page,
    Form(form): Form<AdjustCartForm>,
) -> Result<Redirect> {
    let mut cart = load_cart(&session).await;
    match cart.adjust_quantity(ProductId::new(form.product_id), form.delta) {
        Ok(_) => save_cart(&session, &cart).await?,
        Err(e) => set_flash(&session, Flash::error(e.to_string())).await,
    }
    Ok(Redirect::to("/cart"))
}

/// Remove a line.
pub async fn remove(
    session: Session,
    _page: Page,
    Form(form): Form<RemoveFromCartForm>,
) -> Result<Redirect> {
    let mut cart = load_cart(&session).await;
    cart.remove(ProductId::new(form.product_id));
    save_cart(&session, &cart).await?;
    Ok(Redirect::to("/cart"))
}

/// Empty the cart.
pub async fn clear(session: Session, _page: Page) -> Result<Redirect> {
    let mut cart = load_cart(&session).await;
    cart.clear();
    save_cart(&session, &cart).await?;
    Ok(Redirect::to("/cart"))
}

/// Cart badge count as plain text.
///
/// Takes no flash notice, so it can be polled without eating one.
pub async fn count(session: Session, _user: RequireAuth) -> String {
    load_cart(&session).await.item_count().to_string()
}

/// Place an order for the session cart.
///
/// Phone, address, and notes are checked here but the backend's order has
/// no fields for them. The cart is only cleared once the backend accepted
/// the order.
#[instrument(skip(state, session, page, form), fields(user_id = %page.user.id))]
pub async fn checkout(
    State(state): State<AppState>,
    session: Session,
    page: Page,
    Form(form): Form<CheckoutForm>,
) -> Result<Response> {
    let mut cart = load_cart(&session).await;
    if cart.is_empty() {
        set_flash(&session, Flash::error("Tu carrito está vacío")).await;
        return Ok(Redirect::to("/cart").into_response());
    }

    let method = match form.validate() {
        Ok(method) => method,
        Err(msg) => {
            set_flash(&session, Flash::error(msg)).await;
            return Ok(Redirect::to("/cart").into_response());
        }
    };

    let body = order_create_from_cart(&cart, method, page.user.id);
    match state.backend().create_order(&body).await {
        Ok(order) => {
            tracing::info!(order_id = %order.id, total = %order.total, "Order placed");
            cart.clear();
            save_cart(&session, &cart).await?;
            Ok(Redirect::to("/orders?success=order_placed").into_response())
        }
        Err(e) => {
            tracing::warn!("Checkout failed: {e}");
            set_flash(
                &session,
                Flash::error("Hubo un error al procesar tu pedido. Por favor intenta nuevamente."),
            )
            .await;
            Ok(Redirect::to("/cart").into_response())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(phone: &str, address: &str, method: &str) -> CheckoutForm {
        CheckoutForm {
            phone: phone.to_string(),
            address: address.to_string(),
            payment_method: method.to_string(),
            notes: String::new(),
        }
    }

    #[test]
    fn test_checkout_validation() {
        assert_eq!(
            form("261555", "San Martín 100", "card").validate(),
            Ok(PaymentMethod::Card)
        );
        assert!(form("", "San Martín 100", "card").validate().is_err());
        assert!(form("261555", "  ", "card").validate().is_err());
        assert!(form("261555", "San Martín 100", "").validate().is_err());
        assert!(form("261555", "San Martín 100", "bitcoin").validate().is_err());
    }
}
