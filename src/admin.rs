//! Admin
//!
//! Authenticated CRUD client for staff catalog management: session-cookie
//! login, product create/update/delete and per-product variant management,
//! all scoped by a tenant slug. Unrelated to cart correctness; the cart
//! only ever sees what the catalog read client returns afterwards.

use reqwest::{Response, StatusCode};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use thiserror::Error;
use tracing::debug;

use crate::products::{Product, ProductId, QuantityUnit, Variant, VariantId};

/// Errors from the admin API.
#[derive(Debug, Error)]
pub enum AdminError {
    /// No valid staff session; log in first.
    #[error("not authorized")]
    Unauthorized,

    /// The addressed product or variant does not exist.
    #[error("resource not found")]
    NotFound,

    /// The API rejected the request with an unexpected status.
    #[error("admin request failed with status {0}")]
    Rejected(StatusCode),

    /// The request could not be sent or the response not decoded.
    #[error("admin transport error")]
    Transport(#[from] reqwest::Error),
}

/// Fields for creating or replacing a product.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductDraft {
    /// Display name
    pub name: String,

    /// Longer description
    pub description: String,

    /// Image URL
    pub image: String,

    /// Category slug
    pub category: String,

    /// Base unit price in whole currency units
    pub price: u64,

    /// Unit the base price applies to
    pub unit: QuantityUnit,

    /// Whether the product is visible to shoppers
    pub active: bool,
}

/// Fields for creating or replacing a variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VariantDraft {
    /// Quantity value, e.g. the `500` in "500g"
    pub quantity: u32,

    /// Unit the quantity is measured in
    pub unit: QuantityUnit,

    /// Price charged when this variant is selected
    pub price: u64,
}

#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Debug, Deserialize)]
struct SessionResponse {
    authenticated: bool,
}

/// Tenant-scoped admin API client. Holds the session cookie between calls.
#[derive(Debug, Clone)]
pub struct AdminClient {
    http: reqwest::Client,
    base_url: String,
    tenant: String,
}

impl AdminClient {
    /// Create a client for the given API base URL and tenant slug.
    ///
    /// # Errors
    ///
    /// Returns an [`AdminError::Transport`] if the HTTP client cannot be
    /// constructed.
    pub fn new(base_url: impl Into<String>, tenant: impl Into<String>) -> Result<Self, AdminError> {
        let http = reqwest::Client::builder().cookie_store(true).build()?;

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

    /// Start a staff session. The session cookie is kept for later calls.
    ///
    /// # Errors
    ///
    /// Returns [`AdminError::Unauthorized`] for bad credentials.
    pub async fn login(&self, username: &str, password: &str) -> Result<(), AdminError> {
        debug!(username, "admin login");

        let response = self
            .http
            .post(self.url("admins/login"))
            .json(&LoginRequest { username, password })
            .send()
            .await?;

        check_status(&response)?;

        Ok(())
    }

    /// End the staff session.
    ///
    /// # Errors
    ///
    /// Returns an [`AdminError`] if the request fails.
    pub async fn logout(&self) -> Result<(), AdminError> {
        let response = self.http.post(self.url("admins/logout")).send().await?;

        check_status(&response)?;

        Ok(())
    }

    /// Whether the held session cookie is still valid.
    ///
    /// # Errors
    ///
    /// Returns an [`AdminError`] only for transport or unexpected-status
    /// failures; an expired session is `Ok(false)`.
    pub async fn session_check(&self) -> Result<bool, AdminError> {
        let response = self.http.get(self.url("admins/session")).send().await?;

        if response.status() == StatusCode::UNAUTHORIZED {
            return Ok(false);
        }

        check_status(&response)?;

        let session: SessionResponse = response.json().await?;

        Ok(session.authenticated)
    }

    /// All products, including inactive ones staff may want to re-enable.
    ///
    /// # Errors
    ///
    /// Returns an [`AdminError`] if the request fails.
    pub async fn list_products(&self) -> Result<Vec<Product>, AdminError> {
        self.get_json("products").await
    }

    /// Create a product.
    ///
    /// # Errors
    ///
    /// Returns an [`AdminError`] if the request fails.
    pub async fn create_product(&self, draft: &ProductDraft) -> Result<Product, AdminError> {
        let response = self
            .http
            .post(self.url("products"))
            .json(draft)
            .send()
            .await?;

        decode(response).await
    }

    /// Replace a product.
    ///
    /// # Errors
    ///
    /// Returns an [`AdminError`] if the request fails.
    pub async fn update_product(
        &self,
        product: ProductId,
        draft: &ProductDraft,
    ) -> Result<Product, AdminError> {
        let response = self
            .http
            .put(self.url(&format!("products/{product}")))
            .json(draft)
            .send()
            .await?;

        decode(response).await
    }

    /// Delete a product.
    ///
    /// # Errors
    ///
    /// Returns an [`AdminError`] if the request fails.
    pub async fn delete_product(&self, product: ProductId) -> Result<(), AdminError> {
        let response = self
            .http
            .delete(self.url(&format!("products/{product}")))
            .send()
            .await?;

        check_status(&response)?;

        Ok(())
    }

    /// The variants of one product.
    ///
    /// # Errors
    ///
    /// Returns an [`AdminError`] if the request fails.
    pub async fn list_variants(&self, product: ProductId) -> Result<Vec<Variant>, AdminError> {
        self.get_json(&format!("admin/products/{product}/variants"))
            .await
    }

    /// Add a variant to a product.
    ///
    /// # Errors
    ///
    /// Returns an [`AdminError`] if the request fails.
    pub async fn create_variant(
        &self,
        product: ProductId,
        draft: &VariantDraft,
    ) -> Result<Variant, AdminError> {
        let response = self
            .http
            .post(self.url(&format!("admin/products/{product}/variants")))
            .json(draft)
            .send()
            .await?;

        decode(response).await
    }

    /// Replace a variant.
    ///
    /// # Errors
    ///
    /// Returns an [`AdminError`] if the request fails.
    pub async fn update_variant(
        &self,
        variant: VariantId,
        draft: &VariantDraft,
    ) -> Result<Variant, AdminError> {
        let response = self
            .http
            .put(self.url(&format!("admin/variants/{variant}")))
            .json(draft)
            .send()
            .await?;

        decode(response).await
    }

    /// Delete a variant.
    ///
    /// # Errors
    ///
    /// Returns an [`AdminError`] if the request fails.
    pub async fn delete_variant(&self, variant: VariantId) -> Result<(), AdminError> {
        let response = self
            .http
            .delete(self.url(&format!("admin/variants/{variant}")))
            .send()
            .await?;

        check_status(&response)?;

        Ok(())
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, AdminError> {
        debug!(path, "admin request");

        let response = self.http.get(self.url(path)).send().await?;

        decode(response).await
    }
}

fn check_status(response: &Response) -> Result<(), AdminError> {
    match response.status() {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(AdminError::Unauthorized),
        StatusCode::NOT_FOUND => Err(AdminError::NotFound),
        status if status.is_success() => Ok(()),
        status => Err(AdminError::Rejected(status)),
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, AdminError> {
    check_status(&response)?;

    Ok(response.json().await?)
}
