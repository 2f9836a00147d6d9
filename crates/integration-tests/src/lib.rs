//! Integration test harness for Food Store.
//!
//! Each test starts a [`wiremock`] server standing in for the REST backend,
//! spawns the real storefront or admin router on an ephemeral port, and
//! drives it with a cookie-keeping [`reqwest::Client`] that does not follow
//! redirects, so every `303` can be asserted.
//!
//! ```rust,ignore
//! let backend = MockBackend::start().await;
//! backend.users(vec![fixtures::user(1, "Ana", "ana@example.com", "ADMIN")]).await;
//! let admin = TestApp::admin(&backend).await;
//! admin.login_admin("ana@example.com").await;
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]
#![allow(clippy::missing_panics_doc)]

pub mod fixtures;

use std::net::{Ipv4Addr, SocketAddr};

use food_store_admin::config::AdminConfig;
use food_store_backend::BackendConfig;
use food_store_core::Price;
use food_store_storefront::config::StorefrontConfig;
use reqwest::{Client, Response, StatusCode, header::LOCATION};
use serde_json::Value;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Stand-in for the REST backend.
pub struct MockBackend {
    pub server: MockServer,
}

impl MockBackend {
    pub async fn start() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    /// Backend settings pointing at this mock, with caching off so every
    /// page load reaches the mock.
    #[must_use]
    pub fn config(&self) -> BackendConfig {
        BackendConfig::new(self.server.uri()).without_cache()
    }

    async fn list(&self, route: &str, body: Vec<Value>) {
        Mock::given(method("GET"))
            .and(path(route))
            .respond_with(ResponseTemplate::new(200).set_body_json(Value::Array(body)))
            .mount(&self.server)
            .await;
    }

    /// Serve `GET /usuario`.
    pub async fn users(&self, users: Vec<Value>) {
        self.list("/usuario", users).await;
    }

    /// Serve `GET /categoria`.
    pub async fn categories(&self, categories: Vec<Value>) {
        self.list("/categoria", categories).await;
    }

    /// Serve `GET /producto` and `GET /producto/{id}` for each product.
    pub async fn products(&self, products: Vec<Value>) {
        for product in &products {
            if let Some(id) = product.get("id").and_then(Value::as_i64) {
                Mock::given(method("GET"))
                    .and(path(format!("/producto/{id}")))
                    .respond_with(ResponseTemplate::new(200).set_body_json(product))
                    .mount(&self.server)
                    .await;
            }
        }
        self.list("/producto", products).await;
    }

    /// Serve `GET /pedido` and `GET /pedido/{id}` for each order.
    pub async fn orders(&self, orders: Vec<Value>) {
        for order in &orders {
            if let Some(id) = order.get("id").and_then(Value::as_i64) {
                Mock::given(method("GET"))
                    .and(path(format!("/pedido/{id}")))
                    .respond_with(ResponseTemplate::new(200).set_body_json(order))
                    .mount(&self.server)
                    .await;
            }
        }
        self.list("/pedido", orders).await;
    }
}

/// A running app and a client holding its session cookie.
pub struct TestApp {
    pub base_url: String,
    pub client: Client,
}

impl TestApp {
    /// Spawn the storefront against `backend`.
    pub async fn storefront(backend: &MockBackend) -> Self {
        let config = StorefrontConfig {
            host: Ipv4Addr::LOCALHOST.into(),
            port: 0,
            base_url: "http://127.0.0.1".to_string(),
            shipping_cost: Price::from_major(500),
            admin_console_url: Some("http://127.0.0.1:3001".to_string()),
            backend: backend.config(),
            sentry_dsn: None,
            sentry_environment: None,
        };
        let state = food_store_storefront::state::AppState::new(config)
            .expect("storefront state");
        Self::serve(food_store_storefront::app(state)).await
    }

    /// Spawn the admin console against `backend`.
    pub async fn admin(backend: &MockBackend) -> Self {
        let config = AdminConfig {
            host: Ipv4Addr::LOCALHOST.into(),
            port: 0,
            base_url: "http://127.0.0.1".to_string(),
            backend: backend.config(),
            sentry_dsn: None,
            sentry_environment: None,
            sentry_sample_rate: 1.0,
            sentry_traces_sample_rate: 0.0,
        };
        let state = food_store_admin::state::AppState::new(config).expect("admin state");
        Self::serve(food_store_admin::app(state)).await
    }

    async fn serve(app: axum::Router) -> Self {
        let listener = tokio::net::TcpListener::bind((Ipv4Addr::LOCALHOST, 0))
            .await
            .expect("bind ephemeral port");
        let addr = listener.local_addr().expect("local addr");

        tokio::spawn(async move {
            axum::serve(
                listener,
                app.into_make_service_with_connect_info::<SocketAddr>(),
            )
            .await
            .expect("test server");
        });

        let client = Client::builder()
            .cookie_store(true)
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .expect("http client");

        Self {
            base_url: format!("http://{addr}"),
            client,
        }
    }

    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    pub async fn get(&self, path: &str) -> Response {
        self.client
            .get(self.url(path))
            .send()
            .await
            .expect("GET request")
    }

    pub async fn post_form(&self, path: &str, form: &[(&str, &str)]) -> Response {
        self.client
            .post(self.url(path))
            .form(form)
            .send()
            .await
            .expect("POST request")
    }

    /// GET a page, assert `200`, and return its HTML.
    pub async fn page(&self, path: &str) -> String {
        let response = self.get(path).await;
        assert_eq!(response.status(), StatusCode::OK, "GET {path}");
        response.text().await.expect("response body")
    }

    /// Log a customer into the storefront.
    pub async fn login_customer(&self, email: &str) {
        let response = self
            .post_form("/auth/login", &[("email", email), ("password", "secreto1")])
            .await;
        assert_eq!(redirect_target(&response), Some("/"), "storefront login");
    }

    /// Log an administrator into the admin console.
    pub async fn login_admin(&self, email: &str) {
        let response = self
            .post_form("/login", &[("email", email), ("password", "secreto1")])
            .await;
        assert_eq!(redirect_target(&response), Some("/"), "admin login");
    }
}

/// The `Location` of a `303 See Other`, if the response is one.
#[must_use]
pub fn redirect_target(response: &Response) -> Option<&str> {
    if response.status() != StatusCode::SEE_OTHER {
        return None;
    }
    response.headers().get(LOCATION)?.to_str().ok()
}
