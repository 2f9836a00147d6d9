//! Food Store Core - Shared types library.
//!
//! This crate provides common types used across all Food Store components:
//! - `storefront` - Customer-facing shop (catalog, cart, checkout, orders)
//! - `admin` - Back-office console for categories, products, and orders
//! - `cli` - Command-line tools for seeding and user management
//!
//! # Architecture
//!
//! The core crate contains only types and pure logic - no I/O, no HTTP
//! clients. The REST backend speaks its own field names (`nombre`,
//! `descipcion`, `PENDIENTE`, ...); [`dto`] models those wire shapes exactly,
//! [`models`] holds what the pages render, and [`mappers`] converts between
//! the two.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, prices, emails, and status enums
//! - [`dto`] - Backend wire types
//! - [`models`] - View models
//! - [`mappers`] - DTO <-> view model conversions
//! - [`cart`] - Session cart with an always-consistent total
//! - [`catalog`] - Product and order filtering/sorting
//! - [`stats`] - Admin dashboard aggregates
//! - `session_store` - Expiring in-memory session store (feature `sessions`)

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod dto;
pub mod mappers;
pub mod models;
#[cfg(feature = "sessions")]
pub mod session_store;
pub mod stats;
pub mod types;

pub use types::*;
