//! Food Store Backend - client for the external REST API.
//!
//! # Architecture
//!
//! - The backend is the source of truth - no local persistence
//! - Plain JSON over HTTP with `reqwest`; DTOs live in `food_store_core::dto`
//! - Category and product listings are cached in memory via `moka` and
//!   invalidated on every catalog write
//!
//! # Endpoints
//!
//! | Resource   | Path         | Operations                       |
//! |------------|--------------|----------------------------------|
//! | Users      | `/usuario`   | list, get, create, update        |
//! | Categories | `/categoria` | list, get, create, update, delete |
//! | Products   | `/producto`  | list, get, create, update, delete |
//! | Orders     | `/pedido`    | list, get, create, update        |
//!
//! There is no login endpoint: [`BackendClient::find_user_by_email`] scans
//! `/usuario` instead.
//!
//! # Example
//!
//! ```rust,ignore
//! use food_store_backend::{BackendClient, BackendConfig};
//!
//! let client = BackendClient::new(&BackendConfig::new("http://localhost:8080"))?;
//! let categories = client.list_categories().await?;
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

mod cache;
mod client;
mod config;
mod error;

pub use client::BackendClient;
pub use config::BackendConfig;
pub use error::BackendError;
