//! Catalog
//!
//! Read-only client for the storefront catalog API. The cart engine only
//! consumes the shapes this returns; it never calls the network itself.
//! Shoppers see active products only.

use async_trait::async_trait;
use mockall::automock;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::debug;

use crate::products::{Category, Product, ProductId};

/// Errors from the catalog API.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The requested product does not exist.
    #[error("product not found")]
    NotFound,

    /// The API answered with an unexpected status.
    #[error("catalog request failed with status {0}")]
    Rejected(StatusCode),

    /// The request could not be sent or the response not decoded.
    #[error("catalog transport error")]
    Transport(#[from] reqwest::Error),
}

/// Read access to products and categories.
#[automock]
#[async_trait]
pub trait CatalogClient: Send + Sync {
    /// All active products.
    async fn list_products(&self) -> Result<Vec<Product>, CatalogError>;

    /// All categories with at least one active product.
    async fn list_categories(&self) -> Result<Vec<Category>, CatalogError>;

    /// A single product by id.
    async fn get_product(&self, product: ProductId) -> Result<Product, CatalogError>;

    /// Active products in one category.
    async fn list_by_category(&self, category: &str) -> Result<Vec<Product>, CatalogError>;

    /// Active products matching a free-text query.
    async fn search(&self, query: &str) -> Result<Vec<Product>, CatalogError>;
}

/// HTTP implementation of [`CatalogClient`] against the tenant-scoped JSON
/// API.
#[derive(Debug, Clone)]
pub struct HttpCatalogClient {
    http: reqwest::Client,
    base_url: String,
    tenant: String,
}

impl HttpCatalogClient {
    /// Create a client for the given API base URL and tenant slug.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError::Transport`] if the HTTP client cannot be
    /// constructed.
    pub fn new(base_url: impl Into<String>, tenant: impl Into<String>) -> Result<Self, CatalogError> {
        let http = reqwest::Client::builder().build()?;

        Ok(Self {
            http,
            base_url: base_url.into(),
            tenant: tenant.into(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!(
            "{}/{}/{path}",
            self.base_url.trim_end_matches('/'),
            self.tenant
        )
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, CatalogError> {
        debug!(path, "catalog request");

        let response = self.http.get(self.url(path)).query(query).send().await?;

        match response.status() {
            StatusCode::NOT_FOUND => Err(CatalogError::NotFound),
            status if status.is_success() => Ok(response.json().await?),
            status => Err(CatalogError::Rejected(status)),
        }
    }
}

#[async_trait]
impl CatalogClient for HttpCatalogClient {
    async fn list_products(&self) -> Result<Vec<Product>, CatalogError> {
        let products: Vec<Product> = self.get_json("products", &[]).await?;

        Ok(active_only(products))
    }

    async fn list_categories(&self) -> Result<Vec<Category>, CatalogError> {
        // The backend has no category table; categories are derived from
        // the active products, as the storefront always has.
        let products = self.list_products().await?;

        Ok(derive_categories(&products))
    }

    async fn get_product(&self, product: ProductId) -> Result<Product, CatalogError> {
        self.get_json(&format!("products/{product}"), &[]).await
    }

    async fn list_by_category(&self, category: &str) -> Result<Vec<Product>, CatalogError> {
        let products: Vec<Product> = self
            .get_json("products", &[("category", category)])
            .await?;

        Ok(active_only(products))
    }

    async fn search(&self, query: &str) -> Result<Vec<Product>, CatalogError> {
        let products: Vec<Product> = self.get_json("products", &[("search", query)]).await?;

        Ok(active_only(products))
    }
}

fn active_only(products: Vec<Product>) -> Vec<Product> {
    products.into_iter().filter(|p| p.active).collect()
}

/// Build display categories from the distinct category slugs of the given
/// products, preserving first-seen order.
#[must_use]
pub fn derive_categories(products: &[Product]) -> Vec<Category> {
    let mut categories: Vec<Category> = Vec::new();

    for product in products {
        if categories.iter().any(|c| c.id == product.category) {
            continue;
        }

        categories.push(Category {
            id: product.category.clone(),
            name: capitalize(&product.category),
            description: format!("Quality {} products", product.category),
            image: String::new(),
        });
    }

    categories
}

fn capitalize(slug: &str) -> String {
    let mut chars = slug.chars();

    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::products::QuantityUnit;

    use super::*;

    fn product(name: &str, category: &str, active: bool) -> Product {
        Product {
            id: ProductId::new(),
            name: name.to_owned(),
            description: String::new(),
            image: String::new(),
            category: category.to_owned(),
            price: 100,
            unit: QuantityUnit::Piece,
            variants: Vec::new(),
            active,
        }
    }

    #[test]
    fn derive_categories_keeps_first_seen_order_and_dedupes() {
        let products = [
            product("Groundnut Oil", "oils", true),
            product("Cardamom", "spices", true),
            product("Sesame Oil", "oils", true),
        ];

        let categories = derive_categories(&products);

        let ids: Vec<&str> = categories.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["oils", "spices"]);
        assert_eq!(categories.first().map(|c| c.name.as_str()), Some("Oils"));
    }

    #[test]
    fn active_only_drops_inactive_products() {
        let products = vec![
            product("Groundnut Oil", "oils", true),
            product("Old Stock", "oils", false),
        ];

        let active = active_only(products);

        assert_eq!(active.len(), 1);
        assert_eq!(active.first().map(|p| p.name.as_str()), Some("Groundnut Oil"));
    }

    #[test]
    fn url_joins_base_tenant_and_path() -> TestResult {
        let client = HttpCatalogClient::new("http://localhost:8081/api/", "shobha")?;

        assert_eq!(
            client.url("products"),
            "http://localhost:8081/api/shobha/products"
        );

        Ok(())
    }

    #[tokio::test]
    async fn mock_catalog_serves_canned_products() -> TestResult {
        let mut catalog = MockCatalogClient::new();
        catalog
            .expect_list_by_category()
            .withf(|category| category == "oils")
            .returning(|_| Ok(vec![]));

        let products = catalog.list_by_category("oils").await?;

        assert!(products.is_empty());

        Ok(())
    }
}
