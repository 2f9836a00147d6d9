//! Session-stored state and template display data.

pub mod session;
pub mod view;

pub use session::{Flash, FlashKind, keys as session_keys};
pub use view::{OrderLineView, OrderView, ProductView};
