//! Session-related types.
//!
//! The storefront keeps three things in the session: the logged-in user (a
//! [`food_store_core::models::User`]), the cart (a
//! [`food_store_core::cart::Cart`]), and a one-shot [`Flash`] notice shown
//! on the next rendered page.

use serde::{Deserialize, Serialize};

/// Session keys.
pub mod keys {
    /// Key for storing the current logged-in user.
    pub const CURRENT_USER: &str = "current_user";

    /// Key for storing the shopping cart.
    pub const CART: &str = "cart";

    /// Key for the pending flash notice.
    pub const FLASH: &str = "flash";
}

/// Tone of a flash notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlashKind {
    Success,
    Error,
    Info,
}

impl FlashKind {
    /// CSS modifier for the alert box.
    #[must_use]
    pub const fn css_class(&self) -> &'static str {
        match self {
            Self::Success => "alert--success",
            Self::Error => "alert--error",
            Self::Info => "alert--info",
        }
    }
}

/// A notice carried across one redirect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flash {
    pub kind: FlashKind,
    pub message: String,
}

impl Flash {
    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: FlashKind::Success,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: FlashKind::Error,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            kind: FlashKind::Info,
            message: message.into(),
        }
    }

    /// The notice for a `?success=` / `?error=` code used in redirects.
    ///
    /// Unknown codes yield `None` so hand-edited URLs render nothing.
    #[must_use]
    pub fn from_code(kind: FlashKind, code: &str) -> Option<Self> {
        let message = match (kind, code) {
            (FlashKind::Success, "welcome") => "¡Registro exitoso! Bienvenido a Food Store",
            (FlashKind::Success, "order_placed") => {
                "¡Pedido realizado con éxito! Recibirás una confirmación pronto."
            }
            (FlashKind::Success, "added") => "Producto agregado al carrito",
            (FlashKind::Success, "profile_updated") => "Perfil actualizado correctamente",
            (FlashKind::Success, "logged_out") => "Sesión cerrada",
            (FlashKind::Error, "session") => "Su sesión expiró, ingrese nuevamente",
            (FlashKind::Error, "not_found") => "No encontrado",
            _ => return None,
        };
        Some(Self {
            kind,
            message: message.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_codes() {
        let flash = Flash::from_code(FlashKind::Success, "order_placed");
        assert_eq!(
            flash,
            Some(Flash::success(
                "¡Pedido realizado con éxito! Recibirás una confirmación pronto."
            ))
        );
        assert!(Flash::from_code(FlashKind::Error, "session").is_some());
    }

    #[test]
    fn test_unknown_code_is_ignored() {
        assert!(Flash::from_code(FlashKind::Success, "<script>").is_none());
        assert!(Flash::from_code(FlashKind::Error, "welcome").is_none());
    }

    #[test]
    fn test_css_class() {
        assert_eq!(Flash::error("x").kind.css_class(), "alert--error");
        assert_eq!(Flash::info("x").kind.css_class(), "alert--info");
    }
}
