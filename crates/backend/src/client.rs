//! REST client implementation.

use std::sync::Arc;

use food_store_core::Email;
use food_store_core::dto::{
    CategoryDto, CategoryWrite, OrderCreate, OrderDto, ProductDto, ProductWrite, UserCreate,
    UserDto,
};
use food_store_core::types::{CategoryId, OrderId, OrderState, ProductId, UserId};
use reqwest::{Method, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};
use url::Url;

use crate::cache::{CacheKey, CacheValue, CatalogCache};
use crate::config::BackendConfig;
use crate::error::BackendError;

/// How much of an error body ends up in logs and error messages.
const ERROR_BODY_PREVIEW: usize = 200;

// =============================================================================
// BackendClient
// =============================================================================

/// Client for the Food Store REST backend.
///
/// Cheap to clone; clones share the HTTP connection pool and the catalog
/// cache.
#[derive(Clone)]
pub struct BackendClient {
    inner: Arc<BackendClientInner>,
}

struct BackendClientInner {
    client: reqwest::Client,
    base_url: String,
    cache: Option<CatalogCache>,
}

impl std::fmt::Debug for BackendClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BackendClient")
            .field("base_url", &self.inner.base_url)
            .field("cached", &self.inner.cache.is_some())
            .finish()
    }
}

impl BackendClient {
    /// Create a client.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError::InvalidUrl`] if the base URL is not an
    /// `http(s)` URL, or [`BackendError::Http`] if the HTTP client cannot be
    /// built.
    pub fn new(config: &BackendConfig) -> Result<Self, BackendError> {
        let base_url = normalize_base_url(&config.base_url)?;

        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;

        let cache = (!config.cache_ttl.is_zero())
            .then(|| CatalogCache::new(config.cache_ttl));

        Ok(Self {
            inner: Arc::new(BackendClientInner {
                client,
                base_url,
                cache,
            }),
        })
    }

    /// Base URL requests are sent to (no trailing slash).
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.inner.base_url, path.trim_start_matches('/'))
    }

    /// Send a request and return the raw body of a successful response.
    async fn send<B: Serialize + Sync>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<String, BackendError> {
        let mut request = self.inner.client.request(method.clone(), self.url(path));
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;

        if status == StatusCode::NOT_FOUND {
            return Err(BackendError::NotFound(path.trim_start_matches('/').to_string()));
        }

        if !status.is_success() {
            let message: String = text.chars().take(ERROR_BODY_PREVIEW).collect();
            tracing::error!(
                method = %method,
                path = %path,
                status = %status,
                body = %message,
                "Backend returned non-success status"
            );
            return Err(BackendError::Status {
                status: status.as_u16(),
                message,
            });
        }

        Ok(text)
    }

    async fn execute<B, T>(&self, method: Method, path: &str, body: Option<&B>) -> Result<T, BackendError>
    where
        B: Serialize + Sync,
        T: DeserializeOwned,
    {
        let text = self.send(method, path, body).await?;
        serde_json::from_str(&text).map_err(|e| {
            tracing::error!(
                error = %e,
                path = %path,
                body = %text.chars().take(ERROR_BODY_PREVIEW * 2).collect::<String>(),
                "Failed to parse backend response"
            );
            BackendError::Parse(e)
        })
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, BackendError> {
        self.execute::<(), T>(Method::GET, path, None).await
    }

    async fn delete(&self, path: &str) -> Result<(), BackendError> {
        self.send::<()>(Method::DELETE, path, None).await.map(|_| ())
    }

    async fn invalidate(&self, key: CacheKey) {
        if let Some(cache) = &self.inner.cache {
            cache.invalidate(key).await;
        }
    }

    // =========================================================================
    // Users
    // =========================================================================

    /// List every user.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response is malformed.
    #[instrument(skip(self))]
    pub async fn list_users(&self) -> Result<Vec<UserDto>, BackendError> {
        self.get("/usuario").await
    }

    /// Get a user by id.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError::NotFound`] for unknown ids.
    #[instrument(skip(self), fields(user_id = %id))]
    pub async fn get_user(&self, id: UserId) -> Result<UserDto, BackendError> {
        self.get(&format!("/usuario/{id}")).await
    }

    /// Find the user registered with an email address, if any.
    ///
    /// The backend has no login or search endpoint, so this fetches the
    /// full user list and matches case-insensitively.
    ///
    /// # Errors
    ///
    /// Returns an error if the user list cannot be fetched.
    #[instrument(skip(self), fields(email = %email))]
    pub async fn find_user_by_email(&self, email: &Email) -> Result<Option<UserDto>, BackendError> {
        let users = self.list_users().await?;
        Ok(users.into_iter().find(|u| email.matches(&u.email)))
    }

    /// Register a user.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError::Status`] if the backend rejects the user
    /// (for example a duplicate email).
    #[instrument(skip(self, user), fields(email = %user.email))]
    pub async fn create_user(&self, user: &UserCreate) -> Result<UserDto, BackendError> {
        self.execute(Method::POST, "/usuario", Some(user)).await
    }

    /// Replace a user's data.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the user does not exist.
    #[instrument(skip(self, user), fields(user_id = %id))]
    pub async fn update_user(&self, id: UserId, user: &UserDto) -> Result<UserDto, BackendError> {
        self.execute(Method::PUT, &format!("/usuario/{id}"), Some(user))
            .await
    }

    // =========================================================================
    // Categories
    // =========================================================================

    /// List every category (cached).
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response is malformed.
    #[instrument(skip(self))]
    pub async fn list_categories(&self) -> Result<Vec<CategoryDto>, BackendError> {
        if let Some(cache) = &self.inner.cache
            && let Some(CacheValue::Categories(categories)) = cache.get(CacheKey::Categories).await
        {
            debug!("Cache hit for categories");
            return Ok(categories.as_ref().clone());
        }

        let generation = self
            .inner
            .cache
            .as_ref()
            .map(|cache| cache.generation(CacheKey::Categories));

        let categories: Vec<CategoryDto> = self.get("/categoria").await?;

        if let (Some(cache), Some(generation)) = (&self.inner.cache, generation) {
            let stored = cache
                .insert_if_current(
                    CacheKey::Categories,
                    generation,
                    CacheValue::Categories(Arc::new(categories.clone())),
                )
                .await;
            if !stored {
                debug!("Skipped caching categories invalidated during fetch");
            }
        }

        Ok(categories)
    }

    /// Get a category by id.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError::NotFound`] for unknown ids.
    #[instrument(skip(self), fields(category_id = %id))]
    pub async fn get_category(&self, id: CategoryId) -> Result<CategoryDto, BackendError> {
        self.get(&format!("/categoria/{id}")).await
    }

    /// Create a category.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend rejects the category.
    #[instrument(skip(self, category), fields(name = %category.name))]
    pub async fn create_category(&self, category: &CategoryWrite) -> Result<CategoryDto, BackendError> {
        let created = self
            .execute(Method::POST, "/categoria", Some(category))
            .await?;
        self.invalidate(CacheKey::Categories).await;
        Ok(created)
    }

    /// Update a category.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the category does not exist.
    #[instrument(skip(self, category), fields(category_id = %id))]
    pub async fn update_category(
        &self,
        id: CategoryId,
        category: &CategoryWrite,
    ) -> Result<CategoryDto, BackendError> {
        let updated = self
            .execute(Method::PUT, &format!("/categoria/{id}"), Some(category))
            .await?;
        self.invalidate(CacheKey::Categories).await;
        // Products embed their category.
        self.invalidate(CacheKey::Products).await;
        Ok(updated)
    }

    /// Delete a category.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails (the backend may refuse while
    /// products still reference it).
    #[instrument(skip(self), fields(category_id = %id))]
    pub async fn delete_category(&self, id: CategoryId) -> Result<(), BackendError> {
        self.delete(&format!("/categoria/{id}")).await?;
        self.invalidate(CacheKey::Categories).await;
        self.invalidate(CacheKey::Products).await;
        Ok(())
    }

    // =========================================================================
    // Products
    // =========================================================================

    /// List every product (cached).
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response is malformed.
    #[instrument(skip(self))]
    pub async fn list_products(&self) -> Result<Vec<ProductDto>, BackendError> {
        if let Some(cache) = &self.inner.cache
            && let Some(CacheValue::Products(products)) = cache.get(CacheKey::Products).await
        {
            debug!("Cache hit for products");
            return Ok(products.as_ref().clone());
        }

        let generation = self
            .inner
            .cache
            .as_ref()
            .map(|cache| cache.generation(CacheKey::Products));

        let products: Vec<ProductDto> = self.get("/producto").await?;

        if let (Some(cache), Some(generation)) = (&self.inner.cache, generation) {
            let stored = cache
                .insert_if_current(
                    CacheKey::Products,
                    generation,
                    CacheValue::Products(Arc::new(products.clone())),
                )
                .await;
            if !stored {
                debug!("Skipped caching products invalidated during fetch");
            }
        }

        Ok(products)
    }

    /// Products belonging to one category.
    ///
    /// Filtered client-side from the (cached) full listing.
    ///
    /// # Errors
    ///
    /// Returns an error if the product list cannot be fetched.
    #[instrument(skip(self), fields(category_id = %category))]
    pub async fn list_products_by_category(
        &self,
        category: CategoryId,
    ) -> Result<Vec<ProductDto>, BackendError> {
        let products = self.list_products().await?;
        Ok(products
            .into_iter()
            .filter(|p| {
                p.category.as_ref().map(|c| c.id).or(p.id_categoria) == Some(category)
            })
            .collect())
    }

    /// Get a product by id.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError::NotFound`] for unknown ids.
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn get_product(&self, id: ProductId) -> Result<ProductDto, BackendError> {
        self.get(&format!("/producto/{id}")).await
    }

    /// Create a product.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend rejects the product.
    #[instrument(skip(self, product), fields(name = %product.name))]
    pub async fn create_product(&self, product: &ProductWrite) -> Result<ProductDto, BackendError> {
        let created = self
            .execute(Method::POST, "/producto", Some(product))
            .await?;
        self.invalidate(CacheKey::Products).await;
        Ok(created)
    }

    /// Update a product.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the product does not exist.
    #[instrument(skip(self, product), fields(product_id = %id))]
    pub async fn update_product(
        &self,
        id: ProductId,
        product: &ProductWrite,
    ) -> Result<ProductDto, BackendError> {
        let updated = self
            .execute(Method::PUT, &format!("/producto/{id}"), Some(product))
            .await?;
        self.invalidate(CacheKey::Products).await;
        Ok(updated)
    }

    /// Delete a product.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn delete_product(&self, id: ProductId) -> Result<(), BackendError> {
        self.delete(&format!("/producto/{id}")).await?;
        self.invalidate(CacheKey::Products).await;
        Ok(())
    }

    // =========================================================================
    // Orders
    // =========================================================================

    /// List every order.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response is malformed.
    #[instrument(skip(self))]
    pub async fn list_orders(&self) -> Result<Vec<OrderDto>, BackendError> {
        self.get("/pedido").await
    }

    /// Get an order by id.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError::NotFound`] for unknown ids.
    #[instrument(skip(self), fields(order_id = %id))]
    pub async fn get_order(&self, id: OrderId) -> Result<OrderDto, BackendError> {
        self.get(&format!("/pedido/{id}")).await
    }

    /// Place an order.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend rejects the order (for example
    /// insufficient stock).
    #[instrument(skip(self, order), fields(user_id = %order.id_usuario, lines = order.detalle_pedido.len()))]
    pub async fn create_order(&self, order: &OrderCreate) -> Result<OrderDto, BackendError> {
        let created = self.execute(Method::POST, "/pedido", Some(order)).await?;
        // Placing an order moves stock.
        self.invalidate(CacheKey::Products).await;
        Ok(created)
    }

    /// Replace an order.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the order does not exist.
    #[instrument(skip(self, order), fields(order_id = %id))]
    pub async fn update_order(&self, id: OrderId, order: &OrderDto) -> Result<OrderDto, BackendError> {
        self.execute(Method::PUT, &format!("/pedido/{id}"), Some(order))
            .await
    }

    /// Move an order to another state.
    ///
    /// Reads the current order and writes it back with the new `estado`.
    ///
    /// # Errors
    ///
    /// Returns an error if either request fails.
    #[instrument(skip(self), fields(order_id = %id, state = %state))]
    pub async fn update_order_state(
        &self,
        id: OrderId,
        state: OrderState,
    ) -> Result<OrderDto, BackendError> {
        let mut order = self.get_order(id).await?;
        order.state = state;
        let updated = self.update_order(id, &order).await?;
        if state == OrderState::Cancelado {
            // The backend may restock cancelled lines.
            self.invalidate(CacheKey::Products).await;
        }
        Ok(updated)
    }

    /// Cheap reachability probe used by readiness checks.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend does not answer `GET /categoria`
    /// successfully.
    #[instrument(skip(self))]
    pub async fn ping(&self) -> Result<(), BackendError> {
        self.send::<()>(Method::GET, "/categoria", None)
            .await
            .map(|_| ())
    }
}

fn normalize_base_url(raw: &str) -> Result<String, BackendError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(BackendError::InvalidUrl("URL is empty".to_string()));
    }

    let parsed = Url::parse(raw).map_err(|e| BackendError::InvalidUrl(format!("{raw}: {e}")))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(BackendError::InvalidUrl(format!(
            "{raw}: must start with http:// or https://"
        )));
    }

    Ok(raw.trim_end_matches('/').to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_base_url() {
        assert_eq!(
            normalize_base_url("http://localhost:8080/").ok().as_deref(),
            Some("http://localhost:8080")
        );
        assert_eq!(
            normalize_base_url(" https://api.example.com/api ").ok().as_deref(),
            Some("https://api.example.com/api")
        );
    }

    #[test]
    fn test_normalize_rejects_bad_urls() {
        assert!(matches!(
            normalize_base_url(""),
            Err(BackendError::InvalidUrl(msg)) if msg.contains("empty")
        ));
        assert!(matches!(
            normalize_base_url("localhost:8080"),
            Err(BackendError::InvalidUrl(_))
        ));
        assert!(matches!(
            normalize_base_url("ftp://example.com"),
            Err(BackendError::InvalidUrl(msg)) if msg.contains("http://")
        ));
    }

    #[test]
    fn test_paths_join_under_base() {
        let client = BackendClient::new(&BackendConfig::new("http://backend:8080/api/"))
            .map_err(|e| e.to_string());
        let Ok(client) = client else {
            panic!("client should build");
        };
        assert_eq!(client.url("/producto/3"), "http://backend:8080/api/producto/3");
        assert_eq!(client.url("pedido"), "http://backend:8080/api/pedido");
    }
}
