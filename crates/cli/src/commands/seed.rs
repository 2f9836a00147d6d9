//! Seed the backend catalog from a YAML file.
//!
//! ```yaml
//! categories:
//!   - name: Pizzas
//!     description: Pizzas a la piedra
//!     products:
//!       - name: Muzzarella
//!         price: 1550.50
//!         stock: 20
//!         image: https://example.com/muzza.jpg
//! ```
//!
//! Categories whose name already exists on the backend are reused, so a
//! file can be re-run after adding products to it.

use std::collections::HashSet;

use food_store_backend::BackendClient;
use food_store_core::dto::{CategoryWrite, ProductWrite};
use food_store_core::{CategoryId, Price};
use serde::Deserialize;
use tracing::{info, warn};

use super::CommandError;

/// Top level of a seed file.
#[derive(Debug, Deserialize)]
pub struct SeedFile {
    #[serde(default)]
    pub categories: Vec<SeedCategory>,
}

#[derive(Debug, Deserialize)]
pub struct SeedCategory {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub products: Vec<SeedProduct>,
}

#[derive(Debug, Deserialize)]
pub struct SeedProduct {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub price: Price,
    #[serde(default)]
    pub stock: u32,
    #[serde(default)]
    pub image: String,
    #[serde(default = "default_available")]
    pub available: bool,
}

const fn default_available() -> bool {
    true
}

impl SeedProduct {
    fn to_write(&self, category: CategoryId) -> ProductWrite {
        ProductWrite {
            name: self.name.trim().to_string(),
            price: self.price,
            description: self
                .description
                .as_deref()
                .map(str::trim)
                .filter(|d| !d.is_empty())
                .map(str::to_string),
            stock: self.stock,
            image: self.image.trim().to_string(),
            available: self.available,
            id_categoria: category,
        }
    }
}

/// What a seed run did.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SeedSummary {
    pub categories_created: usize,
    pub categories_reused: usize,
    pub products_created: usize,
}

/// Parse a seed file's contents.
///
/// # Errors
///
/// Returns [`CommandError::Yaml`] for malformed YAML and
/// [`CommandError::Invalid`] listing every rule the file breaks.
pub fn parse(content: &str) -> Result<SeedFile, CommandError> {
    let file: SeedFile = serde_yaml::from_str(content)?;
    let problems = validate(&file);
    if problems.is_empty() {
        Ok(file)
    } else {
        Err(CommandError::Invalid(problems))
    }
}

/// Every problem in the file, empty when it can be seeded.
#[must_use]
pub fn validate(file: &SeedFile) -> Vec<String> {
    let mut problems = Vec::new();
    let mut seen = HashSet::new();

    for (i, category) in file.categories.iter().enumerate() {
        let name = category.name.trim();
        if name.is_empty() {
            problems.push(format!("category #{} has no name", i + 1));
        } else if !seen.insert(name.to_lowercase()) {
            problems.push(format!("category '{name}' appears twice"));
        }

        for (j, product) in category.products.iter().enumerate() {
            if product.name.trim().is_empty() {
                problems.push(format!("product #{} in '{name}' has no name", j + 1));
            }
            if Price::new(product.price.amount()).is_err() {
                problems.push(format!("product '{}' has a negative price", product.name.trim()));
            }
        }
    }

    problems
}

/// Seed the backend from the file at `path`.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed, or if a backend
/// call fails. Categories and products created before the failure stay.
pub async fn run(client: &BackendClient, path: &str) -> Result<SeedSummary, CommandError> {
    info!(path, "Loading seed file");
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| CommandError::Io {
            path: path.to_string(),
            source,
        })?;
    let file = parse(&content)?;
    seed(client, &file).await
}

/// Create the file's categories and products on the backend.
///
/// # Errors
///
/// Returns the first backend error.
pub async fn seed(client: &BackendClient, file: &SeedFile) -> Result<SeedSummary, CommandError> {
    let existing = client.list_categories().await?;
    let mut summary = SeedSummary::default();

    for category in &file.categories {
        let name = category.name.trim();
        let found = existing
            .iter()
            .find(|c| c.name.trim().eq_ignore_ascii_case(name));

        let id = if let Some(found) = found {
            warn!(category = name, id = %found.id, "Category exists, reusing it");
            summary.categories_reused += 1;
            found.id
        } else {
            let created = client
                .create_category(&CategoryWrite {
                    name: name.to_string(),
                    description: category.description.trim().to_string(),
                })
                .await?;
            info!(category = name, id = %created.id, "Category created");
            summary.categories_created += 1;
            created.id
        };

        for product in &category.products {
            client.create_product(&product.to_write(id)).await?;
            summary.products_created += 1;
        }
        info!(category = name, products = category.products.len(), "Products created");
    }

    Ok(summary)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use food_store_backend::BackendConfig;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    const SAMPLE: &str = r"
categories:
  - name: Pizzas
    description: A la piedra
    products:
      - name: Muzzarella
        price: 1550.50
        stock: 20
      - name: Napolitana
        price: 1800
        available: false
  - name: Bebidas
    products:
      - name: Agua
        price: 500
        stock: 40
";

    #[test]
    fn test_parse_applies_defaults() {
        let file = parse(SAMPLE).unwrap();
        assert_eq!(file.categories.len(), 2);
        let pizzas = file.categories.first().unwrap();
        let napo = pizzas.products.get(1).unwrap();
        assert_eq!(napo.stock, 0);
        assert!(!napo.available);
        assert!(pizzas.products.first().unwrap().available);
    }

    #[test]
    fn test_parse_reports_every_problem() {
        let err = parse(
            r"
categories:
  - name: Pizzas
    products:
      - name: ''
        price: 10
  - name: pizzas
  - name: ' '
",
        )
        .unwrap_err();

        let CommandError::Invalid(problems) = err else {
            panic!("expected validation error, got {err}");
        };
        assert_eq!(problems.len(), 3);
    }

    #[test]
    fn test_parse_rejects_negative_price() {
        assert!(matches!(
            parse("categories: [{name: X, products: [{name: Y, price: -3}]}]"),
            Err(CommandError::Invalid(_))
        ));
    }

    #[tokio::test]
    async fn test_seed_reuses_existing_categories() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/categoria"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!([{ "id": 7, "nombre": "Bebidas", "descipcion": "" }])),
            )
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/categoria"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "id": 8, "nombre": "Pizzas", "descipcion": "A la piedra" })),
            )
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/producto"))
            .and(body_partial_json(json!({ "idCategoria": 7 })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": 1, "nombre": "Agua", "precio": 500.0, "stock": 40,
                "imagen": "", "disponible": true, "idCategoria": 7
            })))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/producto"))
            .and(body_partial_json(json!({ "idCategoria": 8 })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": 2, "nombre": "Muzzarella", "precio": 1550.5, "stock": 20,
                "imagen": "", "disponible": true, "idCategoria": 8
            })))
            .expect(2)
            .mount(&server)
            .await;

        let client = BackendClient::new(&BackendConfig::new(server.uri()).without_cache()).unwrap();
        let summary = seed(&client, &parse(SAMPLE).unwrap()).await.unwrap();

        assert_eq!(
            summary,
            SeedSummary {
                categories_created: 1,
                categories_reused: 1,
                products_created: 3,
            }
        );
    }
}
