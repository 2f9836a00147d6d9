//! Order detail and state change handlers.

use askama::Template;
use axum::{
    Form,
    extract::{Path, State},
    response::{Redirect, Response},
};
use food_store_core::mappers::order_from_dto;
use food_store_core::{OrderId, OrderState};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use super::types::OrderDetailView;
use crate::error::Result;
use crate::filters;
use crate::middleware::RequireAdminAuth;
use crate::models::Flash;
use crate::routes::{AdminUserView, render, set_flash, take_flash};
use crate::state::AppState;

/// Order detail page template.
#[derive(Template)]
#[template(path = "orders/show.html")]
pub struct OrderShowTemplate {
    pub admin_user: AdminUserView,
    pub current_path: String,
    pub flash: Option<Flash>,
    pub order: OrderDetailView,
}

/// State change form.
#[derive(Debug, Deserialize)]
pub struct StatusForm {
    pub state: String,
}

/// Order detail page.
#[instrument(skip(admin, state, session))]
pub async fn show(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<OrderId>,
) -> Result<Response> {
    let order = order_from_dto(state.backend().get_order(id).await?);

    Ok(render(&OrderShowTemplate {
        admin_user: AdminUserView::from(&admin),
        current_path: "/orders".to_string(),
        flash: take_flash(&session).await,
        order: OrderDetailView::from(&order),
    }))
}

/// Move an order to another backend state.
#[instrument(skip(_admin, state, session, form))]
pub async fn update_status(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<OrderId>,
    Form(form): Form<StatusForm>,
) -> Redirect {
    let flash = match form.state.parse::<OrderState>() {
        Ok(new_state) => match state.backend().update_order_state(id, new_state).await {
            Ok(_) => {
                tracing::info!(order_id = %id, state = %new_state, "Order state updated");
                Flash::success("Estado actualizado correctamente")
            }
            Err(e) => {
                tracing::error!("Failed to update order {id}: {e}");
                Flash::error("Error al actualizar el estado")
            }
        },
        Err(e) => {
            tracing::warn!("Rejected order state: {e}");
            Flash::error("Error al actualizar el estado")
        }
    };
    set_flash(&session, flash).await;
    Redirect::to(&format!("/orders/{id}"))
}
