//! HTTP client for the hosted content delivery API.

use async_trait::async_trait;
use reqwest::Client;
use tracing::error;

use crate::contract::{BoxError, Credentials, EntryPage, EntrySource};

/// Default delivery API endpoint.
pub const DEFAULT_BASE_URL: &str = "https://cdn.contentful.com";

/// reqwest-backed [`EntrySource`] for the hosted delivery API.
pub struct DeliveryClient {
    http: Client,
    base_url: String,
}

impl DeliveryClient {
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Point the client at a non-default endpoint (preview API, proxies,
    /// test servers).
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }
}

impl Default for DeliveryClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EntrySource for DeliveryClient {
    async fn fetch_page(
        &self,
        credentials: &Credentials,
        params: &[(String, String)],
    ) -> Result<EntryPage, BoxError> {
        let url = format!("{}/spaces/{}/entries", self.base_url, credentials.space_id);
        let response = self
            .http
            .get(&url)
            .bearer_auth(&credentials.access_token)
            .query(params)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| String::from("<failed to decode response body>"));
            error!(%status, url = %url, "Delivery API returned error. Response body: {body}");
            return Err(format!("delivery API returned {status}: {body}").into());
        }

        let page = response.json::<EntryPage>().await?;
        Ok(page)
    }
}
