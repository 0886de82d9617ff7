//! REST calls against the catalog backend.
//!
//! Admin routes always go out credentialed so the session cookie rides
//! along; the public product listing never does.

use std::sync::Arc;

use reqwest::Method;
use serde_json::json;

use super::request::{ApiResponse, RequestError, RequestHelper};
use super::transport::Transport;
use super::types::{ProductDraft, ProductId};

#[derive(Clone)]
pub struct CatalogApi {
    helper: RequestHelper,
    admin_base: String,
    public_base: String,
}

impl CatalogApi {
    #[must_use]
    pub fn new(transport: Arc<dyn Transport>, admin_base: &str, public_base: &str) -> Self {
        Self {
            helper: RequestHelper::new(transport),
            admin_base: admin_base.trim_end_matches('/').to_owned(),
            public_base: public_base.trim_end_matches('/').to_owned(),
        }
    }

    fn admin_url(&self, path: &str) -> String {
        format!("{}{path}", self.admin_base)
    }

    /// `{admin}/products/{id}` with the id escaped as a single path segment.
    fn product_url(&self, id: &ProductId) -> String {
        self.admin_url(&format!("/products/{}", urlencoding::encode(id.as_str())))
    }

    /// `POST {admin}/login`
    ///
    /// # Errors
    ///
    /// See [`RequestHelper::send`].
    pub async fn login(&self, username: &str, password: &str) -> Result<ApiResponse, RequestError> {
        let body = json!({ "username": username, "password": password });
        self.helper
            .send(Method::POST, &self.admin_url("/login"), Some(body), true)
            .await
    }

    /// `POST {admin}/logout`
    ///
    /// # Errors
    ///
    /// See [`RequestHelper::send`].
    pub async fn logout(&self) -> Result<ApiResponse, RequestError> {
        self.helper
            .send(Method::POST, &self.admin_url("/logout"), None, true)
            .await
    }

    /// `GET {public}/products`, uncredentialed.
    ///
    /// # Errors
    ///
    /// See [`RequestHelper::send`].
    pub async fn list_products(&self) -> Result<ApiResponse, RequestError> {
        let url = format!("{}/products", self.public_base);
        self.helper.send(Method::GET, &url, None, false).await
    }

    /// `POST {admin}/products`, or `PUT {admin}/products/{id}` when `id` is set.
    ///
    /// # Errors
    ///
    /// See [`RequestHelper::send`].
    pub async fn save_product(
        &self,
        id: Option<&ProductId>,
        draft: &ProductDraft,
    ) -> Result<ApiResponse, RequestError> {
        let body = json!({
            "name": draft.name,
            "price": draft.price,
            "image": draft.image,
            "description": draft.description,
        });
        let (method, url) = match id {
            Some(id) => (Method::PUT, self.product_url(id)),
            None => (Method::POST, self.admin_url("/products")),
        };
        self.helper.send(method, &url, Some(body), true).await
    }

    /// `DELETE {admin}/products/{id}`
    ///
    /// # Errors
    ///
    /// See [`RequestHelper::send`].
    pub async fn delete_product(&self, id: &ProductId) -> Result<ApiResponse, RequestError> {
        let url = self.product_url(id);
        self.helper.send(Method::DELETE, &url, None, true).await
    }
}

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;
