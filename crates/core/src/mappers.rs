//! Conversions between backend DTOs and view models.
//!
//! The backend and the pages disagree on names (`descipcion`), enums
//! (`EN_PREPARACION` vs `processing`), and ids (products may arrive without
//! one). All of that reconciliation happens here and nowhere else.

use crate::cart::Cart;
use crate::dto::{
    CategoryDto, OrderCreate, OrderDto, OrderLineCreate, OrderLineDto, ProductDto, UserCreate,
    UserDto,
};
use crate::models::{Category, Order, OrderItem, Product, User};
use crate::types::{
    BackendRole, CategoryId, OrderState, OrderStatus, PaymentForm, PaymentMethod, Price,
    ProductId, Role, UserId,
};

/// Join first and last name the way the pages display it.
#[must_use]
pub fn full_name(first: &str, last: &str) -> String {
    format!("{} {}", first.trim(), last.trim()).trim().to_owned()
}

/// Split a single "full name" input into first name and the rest.
///
/// `"Ana María Gómez"` becomes `("Ana", "María Gómez")`; a single word has an
/// empty last name.
#[must_use]
pub fn split_full_name(full: &str) -> (String, String) {
    let full = full.trim();
    match full.split_once(char::is_whitespace) {
        Some((first, rest)) => (first.to_owned(), rest.trim().to_owned()),
        None => (full.to_owned(), String::new()),
    }
}

#[must_use]
pub const fn role_from_backend(role: BackendRole) -> Role {
    match role {
        BackendRole::Admin => Role::Admin,
        BackendRole::Usuario => Role::Client,
    }
}

#[must_use]
pub const fn role_to_backend(role: Role) -> BackendRole {
    match role {
        Role::Admin => BackendRole::Admin,
        Role::Client => BackendRole::Usuario,
    }
}

#[must_use]
pub fn user_from_dto(dto: UserDto) -> User {
    User {
        id: dto.id,
        name: full_name(&dto.first_name, &dto.last_name),
        first_name: dto.first_name,
        last_name: dto.last_name,
        email: dto.email,
        phone: dto.phone,
        role: role_from_backend(dto.role),
    }
}

/// The `PUT /usuario/{id}` body for a user whose name or phone changed.
#[must_use]
pub fn user_to_dto(user: &User) -> UserDto {
    UserDto {
        id: user.id,
        first_name: user.first_name.clone(),
        last_name: user.last_name.clone(),
        email: user.email.clone(),
        phone: user.phone.clone(),
        role: role_to_backend(user.role),
        password: None,
    }
}

/// The `POST /usuario` body for a registration form.
#[must_use]
pub fn user_create_from_registration(
    full: &str,
    email: &str,
    phone: &str,
    password: &str,
) -> UserCreate {
    let (first_name, last_name) = split_full_name(full);
    UserCreate {
        first_name,
        last_name,
        email: email.trim().to_owned(),
        phone: phone.trim().to_owned(),
        password: password.to_owned(),
    }
}

#[must_use]
pub fn category_from_dto(dto: CategoryDto) -> Category {
    Category {
        id: dto.id,
        name: dto.name,
        description: dto.description.unwrap_or_default(),
        active: true,
        image: String::new(),
    }
}

/// Map a product, reconciling its id.
///
/// The backend omits `id` on some nested payloads; `fallback_id` (usually the
/// id the product was requested by) is used then, and `0` as a last resort.
#[must_use]
pub fn product_from_dto(dto: ProductDto, fallback_id: Option<ProductId>) -> Product {
    let category_id = dto
        .category
        .as_ref()
        .map(|c| c.id)
        .or(dto.id_categoria)
        .unwrap_or(CategoryId::new(0));
    Product {
        id: dto.id.or(fallback_id).unwrap_or(ProductId::new(0)),
        name: dto.name,
        description: dto.description.filter(|d| !d.trim().is_empty()),
        price: dto.price,
        stock: dto.stock,
        category_id,
        category_name: dto.category.map(|c| c.name),
        available: dto.available,
        image: dto.image.unwrap_or_default(),
    }
}

/// Collapse a backend order state into the customer-facing status.
#[must_use]
pub const fn status_from_state(state: OrderState) -> OrderStatus {
    match state {
        OrderState::Pendiente => OrderStatus::Pending,
        OrderState::Confirmado | OrderState::EnPreparacion | OrderState::Enviado => {
            OrderStatus::Processing
        }
        OrderState::Entregado | OrderState::Terminado => OrderStatus::Completed,
        OrderState::Cancelado => OrderStatus::Cancelled,
    }
}

/// The backend state a customer-facing status is written back as.
#[must_use]
pub const fn state_from_status(status: OrderStatus) -> OrderState {
    match status {
        OrderStatus::Pending => OrderState::Pendiente,
        OrderStatus::Processing => OrderState::Confirmado,
        OrderStatus::Completed => OrderState::Terminado,
        OrderStatus::Cancelled => OrderState::Cancelado,
    }
}

#[must_use]
pub const fn payment_form_from_method(method: PaymentMethod) -> PaymentForm {
    match method {
        PaymentMethod::Cash => PaymentForm::Efectivo,
        PaymentMethod::Card => PaymentForm::Tarjeta,
        PaymentMethod::Transfer => PaymentForm::Transferencia,
    }
}

#[must_use]
pub const fn payment_method_from_form(form: PaymentForm) -> PaymentMethod {
    match form {
        PaymentForm::Efectivo => PaymentMethod::Cash,
        PaymentForm::Tarjeta => PaymentMethod::Card,
        PaymentForm::Transferencia => PaymentMethod::Transfer,
    }
}

fn order_item_from_line(line: OrderLineDto) -> OrderItem {
    OrderItem {
        product_id: line.product.id,
        price: line.product.price,
        name: line.product.name,
        quantity: line.quantity,
        image: line.product.image.unwrap_or_default(),
    }
}

/// Map an order.
///
/// The backend stores neither delivery details nor shipping, so `phone`,
/// `address` and `notes` are empty, `subtotal` equals `total`, and shipping
/// is zero.
#[must_use]
pub fn order_from_dto(dto: OrderDto) -> Order {
    let user_id = dto.owner_id();
    let (user_name, user_email) = dto
        .user
        .as_ref()
        .map(|u| (full_name(&u.first_name, &u.last_name), u.email.clone()))
        .unwrap_or_default();

    Order {
        id: dto.id,
        user_id,
        user_name,
        user_email,
        phone: String::new(),
        address: String::new(),
        payment_method: payment_method_from_form(dto.payment),
        notes: String::new(),
        subtotal: dto.total,
        shipping: Price::ZERO,
        total: dto.total,
        status: status_from_state(dto.state),
        state: dto.state,
        created_at: dto.date,
        items: dto.lines.into_iter().map(order_item_from_line).collect(),
    }
}

/// The `POST /pedido` body for checking out a cart.
#[must_use]
pub fn order_create_from_cart(cart: &Cart, method: PaymentMethod, user: UserId) -> OrderCreate {
    OrderCreate {
        state: OrderState::Pendiente,
        payment: payment_form_from_method(method),
        detalle_pedido: cart
            .items()
            .iter()
            .map(|item| OrderLineCreate {
                quantity: item.quantity,
                id_producto: item.product.id,
            })
            .collect(),
        id_usuario: user,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::types::OrderId;

    fn category_dto() -> CategoryDto {
        CategoryDto {
            id: CategoryId::new(2),
            name: "Bebidas".into(),
            description: None,
        }
    }

    fn product_dto(id: Option<i64>) -> ProductDto {
        ProductDto {
            id: id.map(ProductId::new),
            name: "Limonada".into(),
            price: Price::from_major(600),
            description: Some("  ".into()),
            stock: 8,
            image: Some("limonada.jpg".into()),
            available: true,
            category: Some(category_dto()),
            id_categoria: None,
        }
    }

    fn user_dto(role: BackendRole) -> UserDto {
        UserDto {
            id: UserId::new(5),
            first_name: "Ana".into(),
            last_name: "Gómez".into(),
            email: "ana@example.com".into(),
            phone: "2615550000".into(),
            role,
            password: None,
        }
    }

    #[test]
    fn test_user_mapping() {
        let user = user_from_dto(user_dto(BackendRole::Admin));
        assert_eq!(user.name, "Ana Gómez");
        assert_eq!(user.role, Role::Admin);

        let client = user_from_dto(user_dto(BackendRole::Usuario));
        assert_eq!(client.role, Role::Client);
    }

    #[test]
    fn test_user_round_trips_through_update_body() {
        let dto = user_dto(BackendRole::Usuario);
        assert_eq!(user_to_dto(&user_from_dto(dto.clone())), dto);
    }

    #[test]
    fn test_split_full_name() {
        assert_eq!(
            split_full_name(" Ana María  Gómez "),
            ("Ana".to_owned(), "María  Gómez".to_owned())
        );
        assert_eq!(split_full_name("Cher"), ("Cher".to_owned(), String::new()));
        assert_eq!(full_name("Cher", ""), "Cher");
    }

    #[test]
    fn test_registration_body() {
        let body = user_create_from_registration("Juan Pérez", " juan@example.com ", "", "secreto");
        assert_eq!(body.first_name, "Juan");
        assert_eq!(body.last_name, "Pérez");
        assert_eq!(body.email, "juan@example.com");
        assert_eq!(body.phone, "");
    }

    #[test]
    fn test_category_defaults() {
        let category = category_from_dto(category_dto());
        assert_eq!(category.description, "");
        assert!(category.active);
        assert!(category.image.is_empty());
    }

    #[test]
    fn test_product_id_reconciliation() {
        assert_eq!(product_from_dto(product_dto(Some(9)), None).id, ProductId::new(9));
        assert_eq!(
            product_from_dto(product_dto(None), Some(ProductId::new(4))).id,
            ProductId::new(4)
        );
        assert_eq!(product_from_dto(product_dto(None), None).id, ProductId::new(0));
    }

    #[test]
    fn test_product_fields() {
        let product = product_from_dto(product_dto(Some(1)), None);
        assert_eq!(product.category_id, CategoryId::new(2));
        assert_eq!(product.category_name.as_deref(), Some("Bebidas"));
        assert!(product.description.is_none());
        assert!(product.available);
    }

    #[test]
    fn test_product_category_from_bare_id() {
        let mut dto = product_dto(Some(1));
        dto.category = None;
        dto.id_categoria = Some(CategoryId::new(7));
        assert_eq!(product_from_dto(dto, None).category_id, CategoryId::new(7));
    }

    #[test]
    fn test_every_state_maps_to_a_status() {
        let expected = [
            OrderStatus::Pending,
            OrderStatus::Processing,
            OrderStatus::Processing,
            OrderStatus::Processing,
            OrderStatus::Completed,
            OrderStatus::Completed,
            OrderStatus::Cancelled,
        ];
        for (state, status) in OrderState::ALL.into_iter().zip(expected) {
            assert_eq!(status_from_state(state), status, "{state}");
        }
    }

    #[test]
    fn test_status_round_trip() {
        for status in OrderStatus::ALL {
            assert_eq!(status_from_state(state_from_status(status)), status);
        }
    }

    #[test]
    fn test_payment_round_trip() {
        for method in PaymentMethod::ALL {
            assert_eq!(payment_method_from_form(payment_form_from_method(method)), method);
        }
        assert_eq!(payment_form_from_method(PaymentMethod::Cash), PaymentForm::Efectivo);
    }

    #[test]
    fn test_order_mapping() {
        let dto = OrderDto {
            id: OrderId::new(12),
            date: NaiveDate::from_ymd_opt(2025, 1, 2).unwrap(),
            state: OrderState::Entregado,
            total: Price::from_major(1200),
            payment: PaymentForm::Transferencia,
            lines: vec![OrderLineDto {
                quantity: 2,
                subtotal: Price::from_major(1200),
                product: product_dto(Some(1)),
            }],
            user: Some(user_dto(BackendRole::Usuario)),
            id_usuario: None,
        };

        let order = order_from_dto(dto);
        assert_eq!(order.id.to_string(), "12");
        assert_eq!(order.status, OrderStatus::Completed);
        assert_eq!(order.payment_method, PaymentMethod::Transfer);
        assert_eq!(order.subtotal, order.total);
        assert!(order.shipping.is_zero());
        assert_eq!(order.user_id, Some(UserId::new(5)));
        assert_eq!(order.user_name, "Ana Gómez");
        assert_eq!(order.items[0].name, "Limonada");
        assert_eq!(order.items[0].quantity, 2);
    }
}
