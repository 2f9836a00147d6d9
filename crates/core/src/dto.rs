//! Wire types for the REST backend.
//!
//! These structs mirror the JSON the backend sends and accepts, field for
//! field. Rust-side names are English; `#[serde(rename)]` carries the
//! backend's names, including the `descipcion` misspelling on categories.
//! Nothing here is rendered directly: see [`crate::mappers`].

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

use crate::types::{
    BackendRole, CategoryId, OrderId, OrderState, PaymentForm, Price, ProductId, UserId,
};

/// Reads an explicit `null` the same as a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// `GET /usuario` element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserDto {
    pub id: UserId,
    #[serde(rename = "nombre", default, deserialize_with = "null_as_default")]
    pub first_name: String,
    #[serde(rename = "apellido", default, deserialize_with = "null_as_default")]
    pub last_name: String,
    #[serde(rename = "mail")]
    pub email: String,
    #[serde(rename = "celular", default, deserialize_with = "null_as_default")]
    pub phone: String,
    #[serde(rename = "rol", default, deserialize_with = "null_as_default")]
    pub role: BackendRole,
    /// Never sent by the backend; only set when echoing a user back on update.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

/// `POST /usuario` body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserCreate {
    #[serde(rename = "nombre")]
    pub first_name: String,
    #[serde(rename = "apellido")]
    pub last_name: String,
    #[serde(rename = "mail")]
    pub email: String,
    #[serde(rename = "celular")]
    pub phone: String,
    pub password: String,
}

/// Credentials body for a backend login endpoint.
///
/// The backend does not expose one yet; login matches `/usuario` by email.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    #[serde(rename = "mail")]
    pub email: String,
    pub password: String,
}

/// `GET /categoria` element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryDto {
    pub id: CategoryId,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "descipcion", alias = "descripcion", default)]
    pub description: Option<String>,
}

/// `POST /categoria` and `PUT /categoria/{id}` body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryWrite {
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "descipcion")]
    pub description: String,
}

/// `GET /producto` element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDto {
    #[serde(default)]
    pub id: Option<ProductId>,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "precio")]
    pub price: Price,
    #[serde(rename = "descripcion", default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub stock: u32,
    #[serde(rename = "imagen", default)]
    pub image: Option<String>,
    #[serde(rename = "disponible", default, deserialize_with = "null_as_default")]
    pub available: bool,
    #[serde(rename = "categoria", default)]
    pub category: Option<CategoryDto>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id_categoria: Option<CategoryId>,
}

/// `POST /producto` and `PUT /producto/{id}` body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductWrite {
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "precio")]
    pub price: Price,
    #[serde(rename = "descripcion", skip_serializing_if = "Option::is_none", default)]
    pub description: Option<String>,
    pub stock: u32,
    #[serde(rename = "imagen")]
    pub image: String,
    #[serde(rename = "disponible")]
    pub available: bool,
    pub id_categoria: CategoryId,
}

/// One line of an order as returned by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderLineDto {
    #[serde(rename = "cantidad")]
    pub quantity: u32,
    pub subtotal: Price,
    #[serde(rename = "productoDto")]
    pub product: ProductDto,
}

/// One line of an order being placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLineCreate {
    #[serde(rename = "cantidad")]
    pub quantity: u32,
    pub id_producto: ProductId,
}

/// `GET /pedido` element, also the `PUT /pedido/{id}` body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDto {
    pub id: OrderId,
    /// `LocalDate` on the backend: `YYYY-MM-DD`.
    #[serde(rename = "fecha")]
    pub date: NaiveDate,
    #[serde(rename = "estado")]
    pub state: OrderState,
    pub total: Price,
    #[serde(rename = "formaPago")]
    pub payment: PaymentForm,
    #[serde(rename = "detalles", default, deserialize_with = "null_as_default")]
    pub lines: Vec<OrderLineDto>,
    #[serde(rename = "usuarioDto", default, skip_serializing_if = "Option::is_none")]
    pub user: Option<UserDto>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id_usuario: Option<UserId>,
}

impl OrderDto {
    /// Owner of the order, from the embedded user or the bare id.
    #[must_use]
    pub fn owner_id(&self) -> Option<UserId> {
        self.user.as_ref().map(|u| u.id).or(self.id_usuario)
    }
}

/// `POST /pedido` body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderCreate {
    #[serde(rename = "estado")]
    pub state: OrderState,
    #[serde(rename = "formaPago")]
    pub payment: PaymentForm,
    pub detalle_pedido: Vec<OrderLineCreate>,
    pub id_usuario: UserId,
}
