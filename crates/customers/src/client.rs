use reqwest::{Client, Response};

use crate::errors::ApiError;
use crate::model::{Customer, CustomerDraft};

/// Where the backend listens when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080/customers";

/// Asynchronous client for the customer service. Cloning is cheap; clones
/// share one connection pool.
#[derive(Debug, Clone)]
pub struct CustomerClient {
    http: Client,
    base_url: String,
}

impl CustomerClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, ApiError> {
        let http = Client::builder().build()?;
        Ok(Self {
            http,
            base_url: base_url.into(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn item_url(&self, id: i64) -> String {
        format!("{}/{}", self.base_url, id)
    }

    /// Fetches the whole collection. Every non-2xx status is an error.
    pub async fn list(&self) -> Result<Vec<Customer>, ApiError> {
        let response = self.http.get(&self.base_url).send().await?;
        if !response.status().is_success() {
            return Err(ApiError::Status(response.status()));
        }
        Ok(response.json().await?)
    }

    /// Stores a new record. The response body is not interpreted; callers
    /// re-fetch the collection to see the result.
    pub async fn create(&self, draft: &CustomerDraft) -> Result<(), ApiError> {
        let response = self.http.post(&self.base_url).json(draft).send().await?;
        Self::accept(response)
    }

    pub async fn update(&self, id: i64, draft: &CustomerDraft) -> Result<(), ApiError> {
        let response = self.http.put(self.item_url(id)).json(draft).send().await?;
        Self::accept(response)
    }

    pub async fn delete(&self, id: i64) -> Result<(), ApiError> {
        let response = self.http.delete(self.item_url(id)).send().await?;
        Self::accept(response)
    }

    fn accept(response: Response) -> Result<(), ApiError> {
        if response.status().is_success() {
            Ok(())
        } else {
            Err(ApiError::Status(response.status()))
        }
    }
}
