//! Main ArticClient

use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use url::Url;

use crate::error::FetchError;
use crate::model::ArtworkPage;
use crate::model::ArtworkRow;
use crate::model::RawArtwork;

/// The default artworks listing endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://api.artic.edu/api/v1/artworks";

/// Client for the artworks listing endpoint.
///
/// This client is cheap to clone (uses `Arc` internally) and can be shared
/// across tasks safely.
///
/// # Example
///
/// ```ignore
/// use artworks_lib::ArticClient;
///
/// let client = ArticClient::new();
/// let page = client.fetch_page(1, 10).await?;
/// println!("{} of {} records", page.len(), page.total_records());
/// ```
#[derive(Clone)]
pub struct ArticClient {
    inner: Arc<ArticClientInner>,
}

struct ArticClientInner {
    base_url: String,
    http_client: Client,
    timeout: Option<Duration>,
}

impl ArticClient {
    /// Creates a client against the default endpoint.
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Creates a new builder for constructing a client.
    pub fn builder() -> ArticClientBuilder {
        ArticClientBuilder::new()
    }

    /// Returns the endpoint URL this client targets.
    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    /// Fetches one page of artwork rows.
    ///
    /// `page` is 1-based; `limit` is the number of rows per page. Issues a
    /// single `GET <base>?page=<page>&limit=<limit>` with no retries. No
    /// timeout is enforced beyond the HTTP client's own unless one was set
    /// on the builder.
    pub async fn fetch_page(&self, page: u32, limit: u32) -> Result<ArtworkPage, FetchError> {
        let url = Url::parse_with_params(
            &self.inner.base_url,
            [("page", page.to_string()), ("limit", limit.to_string())],
        )
        .map_err(|_| FetchError::InvalidUrl(self.inner.base_url.clone()))?;

        log::debug!("GET {}", url);

        let mut request = self.inner.http_client.get(url);
        if let Some(timeout) = self.inner.timeout {
            request = request.timeout(timeout);
        }

        let response = request.send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FetchError::Http {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await?;
        let listing: ListingResponse =
            serde_json::from_str(&body).map_err(|e| FetchError::malformed(e.to_string()))?;

        Ok(listing.into_page())
    }
}

impl Default for ArticClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for constructing an [`ArticClient`].
///
/// Every field has a default, so `build` cannot fail; an unparseable
/// `base_url` surfaces as [`FetchError::InvalidUrl`] on the first fetch.
pub struct ArticClientBuilder {
    base_url: String,
    timeout: Option<Duration>,
    http_client: Option<Client>,
}

impl ArticClientBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_ENDPOINT.to_string(),
            timeout: None,
            http_client: None,
        }
    }

    /// Overrides the endpoint URL (used by tests against a local server).
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Sets a per-request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Provides a pre-configured `reqwest` client.
    pub fn http_client(mut self, client: Client) -> Self {
        self.http_client = Some(client);
        self
    }

    /// Builds the client.
    pub fn build(self) -> ArticClient {
        ArticClient {
            inner: Arc::new(ArticClientInner {
                base_url: self.base_url,
                http_client: self.http_client.unwrap_or_default(),
                timeout: self.timeout,
            }),
        }
    }
}

impl Default for ArticClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Wire envelope
// =============================================================================

/// Response envelope for the listing endpoint.
///
/// `data` and `pagination` are required; a body missing either is malformed.
#[derive(Debug, Deserialize)]
struct ListingResponse {
    data: Vec<RawArtwork>,
    pagination: Pagination,
}

#[derive(Debug, Deserialize)]
struct Pagination {
    total: Option<u64>,
}

impl ListingResponse {
    fn into_page(self) -> ArtworkPage {
        let rows = self.data.into_iter().map(ArtworkRow::from).collect();
        ArtworkPage::new(rows, self.pagination.total.unwrap_or(0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_maps_rows_and_total() {
        let listing: ListingResponse = serde_json::from_str(
            r#"{
                "data": [
                    {"id": 16568, "title": "Water Lilies", "place_of_origin": "France",
                     "artist_display": "Claude Monet", "inscriptions": null,
                     "date_start": 1906, "date_end": 1906}
                ],
                "pagination": {"total": 237}
            }"#,
        )
        .unwrap();

        let page = listing.into_page();
        assert_eq!(page.len(), 1);
        assert_eq!(page.total_records(), 237);
        assert_eq!(page.rows()[0].title, "Water Lilies");
        assert_eq!(page.rows()[0].inscriptions, "N/A");
    }

    #[test]
    fn test_missing_total_defaults_to_zero() {
        let listing: ListingResponse =
            serde_json::from_str(r#"{"data": [], "pagination": {}}"#).unwrap();

        assert_eq!(listing.into_page().total_records(), 0);
    }

    #[test]
    fn test_missing_data_or_pagination_is_rejected() {
        assert!(serde_json::from_str::<ListingResponse>(r#"{"pagination": {"total": 1}}"#).is_err());
        assert!(serde_json::from_str::<ListingResponse>(r#"{"data": []}"#).is_err());
    }

    #[test]
    fn test_unknown_fields_are_ignored() {
        let listing: ListingResponse = serde_json::from_str(
            r#"{
                "data": [{"id": 1, "title": "Untitled", "thumbnail": {"width": 100}}],
                "pagination": {"total": 1, "limit": 10, "offset": 0},
                "info": {"license_text": "..."}
            }"#,
        )
        .unwrap();

        assert_eq!(listing.into_page().rows()[0].title, "Untitled");
    }
}
