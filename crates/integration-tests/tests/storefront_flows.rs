//! Customer flows through the storefront: login, browsing, cart, checkout,
//! and order history.

#![allow(clippy::unwrap_used)]

use food_store_integration_tests::{MockBackend, TestApp, fixtures, redirect_target};
use reqwest::StatusCode;
use serde_json::{Value, json};
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, ResponseTemplate};

fn customer() -> Value {
    fixtures::user(2, "Luis", "luis@example.com", "USUARIO")
}

async fn store_backend() -> MockBackend {
    let backend = MockBackend::start().await;
    backend
        .users(vec![
            fixtures::user(1, "Ana", "ana@example.com", "ADMIN"),
            customer(),
        ])
        .await;
    backend
        .categories(vec![fixtures::category(1, "Pizzas")])
        .await;
    backend
        .products(vec![
            fixtures::product(10, "Muzzarella", 1550.5, 5, 1),
            fixtures::product(11, "Fugazzeta", 1900.0, 0, 1),
        ])
        .await;
    backend
}

#[tokio::test]
async fn test_pages_require_login() {
    let backend = store_backend().await;
    let app = TestApp::storefront(&backend).await;

    for page in ["/", "/cart", "/orders", "/profile"] {
        let response = app.get(page).await;
        assert_eq!(redirect_target(&response), Some("/auth/login"), "{page}");
    }

    let health = app.get("/health").await;
    assert_eq!(health.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_login_rejects_unknown_email() {
    let backend = store_backend().await;
    let app = TestApp::storefront(&backend).await;

    let response = app
        .post_form(
            "/auth/login",
            &[("email", "nadie@example.com"), ("password", "secreto1")],
        )
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.text().await.unwrap().contains("Credenciales inválidas"));
}

#[tokio::test]
async fn test_home_lists_catalog() {
    let backend = store_backend().await;
    let app = TestApp::storefront(&backend).await;
    app.login_customer("luis@example.com").await;

    let html = app.page("/").await;
    assert!(html.contains("Muzzarella"));
    assert!(html.contains("Fugazzeta"));
    assert!(html.contains("Pizzas"));
    // Customers get no admin console link.
    assert!(!html.contains("127.0.0.1:3001"));

    let html = app.page("/?q=fuga").await;
    assert!(html.contains("Fugazzeta"));
    assert!(!html.contains("Muzzarella"));
}

#[tokio::test]
async fn test_admins_see_console_link() {
    let backend = store_backend().await;
    let app = TestApp::storefront(&backend).await;
    app.login_customer("ana@example.com").await;

    assert!(app.page("/").await.contains("127.0.0.1:3001"));
}

#[tokio::test]
async fn test_cart_and_checkout() {
    let backend = store_backend().await;
    Mock::given(method("POST"))
        .and(path("/pedido"))
        .and(body_partial_json(json!({
            "estado": "PENDIENTE",
            "formaPago": "TARJETA",
            "idUsuario": 2,
            "detallePedido": [{ "cantidad": 2, "idProducto": 10 }],
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(fixtures::order(
            50,
            &customer(),
            "PENDIENTE",
            "2025-03-09",
            &[(&fixtures::product(10, "Muzzarella", 1550.5, 5, 1), 2)],
        )))
        .expect(1)
        .mount(&backend.server)
        .await;

    let app = TestApp::storefront(&backend).await;
    app.login_customer("luis@example.com").await;

    let response = app
        .post_form(
            "/cart/add",
            &[("product_id", "10"), ("quantity", "2"), ("return_to", "/")],
        )
        .await;
    assert_eq!(redirect_target(&response), Some("/"));
    assert_eq!(app.page("/cart/count").await, "2");

    let cart = app.page("/cart").await;
    assert!(cart.contains("Muzzarella"));
    assert!(cart.contains("$3101.00"));
    assert!(cart.contains("$3601.00"));

    // Missing address keeps the cart.
    let response = app
        .post_form(
            "/checkout",
            &[("phone", "1122334455"), ("address", ""), ("payment_method", "card")],
        )
        .await;
    assert_eq!(redirect_target(&response), Some("/cart"));
    assert_eq!(app.page("/cart/count").await, "2");

    let response = app
        .post_form(
            "/checkout",
            &[
                ("phone", "1122334455"),
                ("address", "Av. Siempre Viva 742"),
                ("payment_method", "card"),
                ("notes", "Sin cebolla"),
            ],
        )
        .await;
    assert_eq!(
        redirect_target(&response),
        Some("/orders?success=order_placed")
    );
    assert_eq!(app.page("/cart/count").await, "0");
}

#[tokio::test]
async fn test_out_of_stock_product_is_not_added() {
    let backend = store_backend().await;
    let app = TestApp::storefront(&backend).await;
    app.login_customer("luis@example.com").await;

    app.post_form("/cart/add", &[("product_id", "11"), ("return_to", "/")])
        .await;

    assert_eq!(app.page("/cart/count").await, "0");
}

#[tokio::test]
async fn test_order_history_is_private() {
    let backend = store_backend().await;
    let pizza = fixtures::product(10, "Muzzarella", 1550.5, 5, 1);
    let admin = fixtures::user(1, "Ana", "ana@example.com", "ADMIN");
    backend
        .orders(vec![
            fixtures::order(7, &customer(), "EN_PREPARACION", "2025-03-09", &[(&pizza, 1)]),
            fixtures::order(8, &admin, "PENDIENTE", "2025-03-10", &[(&pizza, 3)]),
        ])
        .await;

    let app = TestApp::storefront(&backend).await;
    app.login_customer("luis@example.com").await;

    let history = app.page("/orders").await;
    assert!(history.contains("Pedido #7"));
    assert!(!history.contains("Pedido #8"));

    let detail = app.page("/orders/7").await;
    assert!(detail.contains("En Preparación"));

    let foreign = app.get("/orders/8").await;
    assert_eq!(foreign.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_backend_down_shows_error_panel() {
    let backend = MockBackend::start().await;
    backend.users(vec![customer()]).await;
    Mock::given(method("GET"))
        .and(path("/producto"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&backend.server)
        .await;
    backend.categories(vec![]).await;

    let app = TestApp::storefront(&backend).await;
    app.login_customer("luis@example.com").await;

    let response = app.get("/").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(
        response
            .text()
            .await
            .unwrap()
            .contains("Error al comunicarse con el servidor")
    );
}

#[tokio::test]
async fn test_registration_logs_the_customer_in() {
    let backend = store_backend().await;
    Mock::given(method("POST"))
        .and(path("/usuario"))
        .and(body_partial_json(json!({
            "nombre": "Marta",
            "apellido": "Ruiz",
            "mail": "marta@example.com",
            "celular": "2614440000",
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": 3,
            "nombre": "Marta",
            "apellido": "Ruiz",
            "mail": "marta@example.com",
            "celular": "2614440000",
            "rol": "USUARIO",
        })))
        .expect(1)
        .mount(&backend.server)
        .await;

    let app = TestApp::storefront(&backend).await;
    let response = app
        .post_form(
            "/auth/register",
            &[
                ("name", "Marta Ruiz"),
                ("email", "marta@example.com"),
                ("phone", "2614440000"),
                ("password", "secreto1"),
            ],
        )
        .await;
    assert_eq!(redirect_target(&response), Some("/?success=welcome"));

    let home = app.page("/?success=welcome").await;
    assert!(home.contains("¡Registro exitoso! Bienvenido a Food Store"));
    assert!(home.contains("Marta Ruiz"));
}

#[tokio::test]
async fn test_registration_rejects_taken_email() {
    let backend = store_backend().await;
    Mock::given(method("POST"))
        .and(path("/usuario"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&backend.server)
        .await;

    let app = TestApp::storefront(&backend).await;
    let response = app
        .post_form(
            "/auth/register",
            &[
                ("name", "Otro Luis"),
                ("email", "LUIS@example.com"),
                ("phone", ""),
                ("password", "secreto1"),
            ],
        )
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.text().await.unwrap().contains("El email ya está registrado"));
    assert_eq!(redirect_target(&app.get("/").await), Some("/auth/login"));
}

#[tokio::test]
async fn test_profile_update_saves_and_refreshes_session() {
    let backend = store_backend().await;
    Mock::given(method("PUT"))
        .and(path("/usuario/2"))
        .and(body_partial_json(json!({
            "id": 2,
            "nombre": "Luis",
            "apellido": "Pérez",
            "mail": "luis@example.com",
            "celular": "2615550000",
            "rol": "USUARIO",
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 2,
            "nombre": "Luis",
            "apellido": "Pérez",
            "mail": "luis@example.com",
            "celular": "2615550000",
            "rol": "USUARIO",
        })))
        .expect(1)
        .mount(&backend.server)
        .await;

    let app = TestApp::storefront(&backend).await;
    app.login_customer("luis@example.com").await;

    let response = app
        .post_form("/profile", &[("name", "Luis Pérez"), ("phone", "2615550000")])
        .await;
    assert_eq!(
        redirect_target(&response),
        Some("/profile?success=profile_updated")
    );

    let profile = app.page("/profile?success=profile_updated").await;
    assert!(profile.contains("Perfil actualizado correctamente"));
    assert!(profile.contains("value=\"Luis Pérez\""));
    assert!(profile.contains("value=\"2615550000\""));

    // Blank names never reach the backend.
    let response = app.post_form("/profile", &[("name", "  "), ("phone", "")]).await;
    assert_eq!(redirect_target(&response), Some("/profile"));
    assert!(app.page("/profile").await.contains("El nombre es obligatorio"));
}

#[tokio::test]
async fn test_password_form_is_validated() {
    let backend = store_backend().await;
    let app = TestApp::storefront(&backend).await;
    app.login_customer("luis@example.com").await;

    let response = app
        .post_form(
            "/profile/password",
            &[
                ("current_password", "secreto1"),
                ("new_password", "nuevo123"),
                ("confirm_password", "nuevo124"),
            ],
        )
        .await;
    assert_eq!(redirect_target(&response), Some("/profile"));
    assert!(app.page("/profile").await.contains("Las contraseñas no coinciden"));

    app.post_form(
        "/profile/password",
        &[
            ("current_password", "secreto1"),
            ("new_password", "nuevo123"),
            ("confirm_password", "nuevo123"),
        ],
    )
    .await;
    assert!(
        app.page("/profile")
            .await
            .contains("El cambio de contraseña no está disponible en este servidor.")
    );
}

#[tokio::test]
async fn test_failed_checkout_keeps_the_cart() {
    let backend = store_backend().await;
    Mock::given(method("POST"))
        .and(path("/pedido"))
        .respond_with(ResponseTemplate::new(500).set_body_string("stock insuficiente"))
        .expect(1)
        .mount(&backend.server)
        .await;

    let app = TestApp::storefront(&backend).await;
    app.login_customer("luis@example.com").await;
    app.post_form(
        "/cart/add",
        &[("product_id", "10"), ("quantity", "2"), ("return_to", "/")],
    )
    .await;

    let response = app
        .post_form(
            "/checkout",
            &[
                ("phone", "1122334455"),
                ("address", "Av. Siempre Viva 742"),
                ("payment_method", "cash"),
            ],
        )
        .await;
    assert_eq!(redirect_target(&response), Some("/cart"));

    let cart = app.page("/cart").await;
    assert!(cart.contains("Hubo un error al procesar tu pedido"));
    assert!(cart.contains("Muzzarella"));
    assert_eq!(app.page("/cart/count").await, "2");
}

#[tokio::test]
async fn test_logout_keeps_the_cart() {
    let backend = store_backend().await;
    let app = TestApp::storefront(&backend).await;
    app.login_customer("luis@example.com").await;
    app.post_form("/cart/add", &[("product_id", "10"), ("return_to", "/")])
        .await;

    let response = app.post_form("/auth/logout", &[]).await;
    assert_eq!(
        redirect_target(&response),
        Some("/auth/login?success=logged_out")
    );
    assert!(
        app.page("/auth/login?success=logged_out")
            .await
            .contains("Sesión cerrada")
    );
    assert_eq!(redirect_target(&app.get("/cart").await), Some("/auth/login"));

    app.login_customer("luis@example.com").await;
    assert_eq!(app.page("/cart/count").await, "1");
}

#[tokio::test]
async fn test_adjust_stops_at_stock() {
    let backend = store_backend().await;
    let app = TestApp::storefront(&backend).await;
    app.login_customer("luis@example.com").await;
    app.post_form(
        "/cart/add",
        &[("product_id", "10"), ("quantity", "5"), ("return_to", "/")],
    )
    .await;
    // Consume the "added" notice.
    app.page("/cart").await;

    let response = app
        .post_form("/cart/adjust", &[("product_id", "10"), ("delta", "1")])
        .await;
    assert_eq!(redirect_target(&response), Some("/cart"));
    assert!(app.page("/cart").await.contains("Stock máximo disponible: 5"));
    assert_eq!(app.page("/cart/count").await, "5");

    app.post_form("/cart/adjust", &[("product_id", "10"), ("delta", "-1")])
        .await;
    assert_eq!(app.page("/cart/count").await, "4");
}
