//! Status enums for orders, payments, and roles.
//!
//! Each concept exists twice: the backend's wire enum (Spanish,
//! `SCREAMING_SNAKE_CASE`) and the view enum the pages work with. The
//! conversions live in [`crate::mappers`].

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

/// Error returned when a form or query value names no known variant.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown {kind}: {value}")]
pub struct UnknownVariant {
    /// Which enum was being parsed.
    pub kind: &'static str,
    /// The rejected input.
    pub value: String,
}

impl UnknownVariant {
    fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_owned(),
        }
    }
}

/// Order state as stored by the backend (`estado`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderState {
    #[default]
    Pendiente,
    Confirmado,
    EnPreparacion,
    Enviado,
    Entregado,
    Terminado,
    Cancelado,
}

impl OrderState {
    /// Every state, in lifecycle order.
    pub const ALL: [Self; 7] = [
        Self::Pendiente,
        Self::Confirmado,
        Self::EnPreparacion,
        Self::Enviado,
        Self::Entregado,
        Self::Terminado,
        Self::Cancelado,
    ];

    /// The wire value (`"EN_PREPARACION"`).
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pendiente => "PENDIENTE",
            Self::Confirmado => "CONFIRMADO",
            Self::EnPreparacion => "EN_PREPARACION",
            Self::Enviado => "ENVIADO",
            Self::Entregado => "ENTREGADO",
            Self::Terminado => "TERMINADO",
            Self::Cancelado => "CANCELADO",
        }
    }

    /// Human label for admin tables and selects.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Pendiente => "Pendiente",
            Self::Confirmado => "Confirmado",
            Self::EnPreparacion => "En preparación",
            Self::Enviado => "Enviado",
            Self::Entregado => "Entregado",
            Self::Terminado => "Terminado",
            Self::Cancelado => "Cancelado",
        }
    }
}

impl fmt::Display for OrderState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderState {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|state| state.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownVariant::new("order state", s))
    }
}

/// Order status as shown to customers.
///
/// Coarser than [`OrderState`]: several backend states collapse into
/// `Processing` and `Completed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    #[default]
    Pending,
    Processing,
    Completed,
    Cancelled,
}

impl OrderStatus {
    /// Every status, in display order.
    pub const ALL: [Self; 4] = [
        Self::Pending,
        Self::Processing,
        Self::Completed,
        Self::Cancelled,
    ];

    /// Query-string value (`"processing"`).
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Processing => "processing",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }

    /// Badge text on the customer's order pages.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Pending => "Pendiente",
            Self::Processing => "En Preparación",
            Self::Completed => "Entregado",
            Self::Cancelled => "Cancelado",
        }
    }

    /// Explanation shown under the status on the order detail page.
    #[must_use]
    pub const fn help_text(&self) -> &'static str {
        match self {
            Self::Pending => "Tu pedido fue recibido y está esperando confirmación.",
            Self::Processing => "Estamos preparando tu pedido.",
            Self::Completed => "Tu pedido fue entregado. ¡Gracias por tu compra!",
            Self::Cancelled => "Este pedido fue cancelado.",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for OrderStatus {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownVariant::new("order status", s))
    }
}

/// Payment form as stored by the backend (`formaPago`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentForm {
    Tarjeta,
    Transferencia,
    #[default]
    Efectivo,
}

impl PaymentForm {
    /// The wire value.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Tarjeta => "TARJETA",
            Self::Transferencia => "TRANSFERENCIA",
            Self::Efectivo => "EFECTIVO",
        }
    }
}

/// Payment method picked at checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    #[default]
    Cash,
    Card,
    Transfer,
}

impl PaymentMethod {
    /// Every method, in the order the checkout form lists them.
    pub const ALL: [Self; 3] = [Self::Cash, Self::Card, Self::Transfer];

    /// Form value (`"card"`).
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Cash => "cash",
            Self::Card => "card",
            Self::Transfer => "transfer",
        }
    }

    /// Human label.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Cash => "Efectivo",
            Self::Card => "Tarjeta",
            Self::Transfer => "Transferencia",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for PaymentMethod {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|method| method.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownVariant::new("payment method", s))
    }
}

/// User role as stored by the backend (`rol`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BackendRole {
    Admin,
    #[default]
    Usuario,
}

/// User role as the pages see it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    #[default]
    Client,
}

impl Role {
    /// Badge text on the profile page.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Admin => "Administrador",
            Self::Client => "Cliente",
        }
    }

    #[must_use]
    pub const fn is_admin(&self) -> bool {
        matches!(self, Self::Admin)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_order_state_wire_names() {
        for state in OrderState::ALL {
            let json = serde_json::to_string(&state).unwrap();
            assert_eq!(json, format!("\"{}\"", state.as_str()));
        }
        let parsed: OrderState = serde_json::from_str("\"EN_PREPARACION\"").unwrap();
        assert_eq!(parsed, OrderState::EnPreparacion);
    }

    #[test]
    fn test_order_state_from_form_value() {
        assert_eq!("terminado".parse::<OrderState>().unwrap(), OrderState::Terminado);
        assert!("SHIPPED".parse::<OrderState>().is_err());
    }

    #[test]
    fn test_order_status_query_values() {
        assert_eq!("processing".parse::<OrderStatus>().unwrap(), OrderStatus::Processing);
        let err = "all".parse::<OrderStatus>().unwrap_err();
        assert_eq!(err.to_string(), "unknown order status: all");
    }

    #[test]
    fn test_order_status_labels() {
        assert_eq!(OrderStatus::Processing.label(), "En Preparación");
        assert_eq!(OrderStatus::Completed.to_string(), "Entregado");
    }

    #[test]
    fn test_payment_wire_names() {
        assert_eq!(
            serde_json::to_string(&PaymentForm::Transferencia).unwrap(),
            "\"TRANSFERENCIA\""
        );
        assert_eq!("Card".parse::<PaymentMethod>().unwrap(), PaymentMethod::Card);
    }

    #[test]
    fn test_backend_role_wire_names() {
        let role: BackendRole = serde_json::from_str("\"ADMIN\"").unwrap();
        assert_eq!(role, BackendRole::Admin);
        assert_eq!(
            serde_json::to_string(&BackendRole::Usuario).unwrap(),
            "\"USUARIO\""
        );
    }
}
