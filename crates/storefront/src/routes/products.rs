//! Product detail page.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Path, State};
use food_store_core::mappers::product_from_dto;
use food_store_core::types::ProductId;
use tower_sessions::Session;
use tracing::instrument;

use crate::error::Result;
use crate::filters;
use crate::models::ProductView;
use crate::routes::cart::load_cart;
use crate::routes::page::Page;
use crate::state::AppState;

/// Product detail template.
#[derive(Template, WebTemplate)]
#[template(path = "products/show.html")]
pub struct ProductShowTemplate {
    pub page: Page,
    pub product: ProductView,
    /// Units already in the cart.
    pub in_cart: u32,
    /// Upper bound for the quantity input (stock minus what is in the cart).
    pub max_quantity: u32,
}

/// Display a product.
#[instrument(skip(state, session, page))]
pub async fn show(
    State(state): State<AppState>,
    session: Session,
    page: Page,
    Path(id): Path<i64>,
) -> Result<ProductShowTemplate> {
    let id = ProductId::new(id);
    let dto = state.backend().get_product(id).await?;
    let product = product_from_dto(dto, Some(id));

    let in_cart = load_cart(&session).await.quantity_of(product.id);
    let max_quantity = product.stock.saturating_sub(in_cart);

    Ok(ProductShowTemplate {
        page,
        product: ProductView::new(&product),
        in_cart,
        max_quantity,
    })
}
