//! Order management route handlers.
//!
//! Admins can list every order, open one, and move it to another backend
//! state. Orders are never created or deleted here.

mod detail;
mod list;
pub mod types;

pub use detail::{OrderShowTemplate, StatusForm, show, update_status};
pub use list::{OrdersIndexTemplate, OrdersQuery, index};
pub use types::{OrderDetailView, OrderLineView, OrderTableView, StateOption};
