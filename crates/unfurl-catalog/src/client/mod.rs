//! HTTP client for the catalog's `GET /api/catalog/public/{slug}` endpoint.

mod origin;

use std::time::Duration;

use reqwest::Client;
use unfurl_core::{encode_slug, ProductPreview};

use crate::error::{CatalogError, FailedRequest, FetchFailure};

pub use origin::fallback_origin;

/// Longest upstream error body kept for diagnostics, in characters.
const MAX_ERROR_BODY_CHARS: usize = 500;

/// Fetches product previews with a single same-host fallback.
///
/// A request goes to the primary origin first. Only if that fails, and the
/// caller supplied a fallback origin, is one more request made. There are no
/// further retries: the caller is a crawler waiting on a synchronous
/// response. Each attempt has its own timeout and is dropped (cancelling the
/// in-flight request) when it expires.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    client: Client,
    primary_timeout: Duration,
    fallback_timeout: Duration,
}

impl CatalogClient {
    /// Creates a client sending `user_agent` on every request.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed (e.g., invalid TLS config).
    pub fn new(
        user_agent: &str,
        primary_timeout: Duration,
        fallback_timeout: Duration,
    ) -> Result<Self, CatalogError> {
        let client = Client::builder().user_agent(user_agent).build()?;
        Ok(Self {
            client,
            primary_timeout,
            fallback_timeout,
        })
    }

    /// Fetches `slug` from `origin`, then from `fallback_origin` if the first
    /// attempt fails.
    ///
    /// A successful fallback discards the primary failure entirely. A 2xx
    /// response whose product lacks a title is still `Ok`; validating the
    /// contents is the caller's decision.
    ///
    /// # Errors
    ///
    /// Returns [`FetchFailure`] carrying the primary failure and, when a
    /// fallback was attempted, its failure too.
    pub async fn fetch_product(
        &self,
        slug: &str,
        origin: &str,
        fallback_origin: Option<&str>,
    ) -> Result<ProductPreview, FetchFailure> {
        let primary_url = Self::product_url(origin, slug);
        tracing::debug!(slug, url = %primary_url, "fetching product from primary origin");

        let primary = match self.fetch_once(&primary_url, self.primary_timeout).await {
            Ok(product) => {
                tracing::info!(slug, url = %primary_url, "product loaded from primary origin");
                return Ok(ProductPreview {
                    slug: slug.to_owned(),
                    ..product
                });
            }
            Err(error) => {
                tracing::warn!(slug, url = %primary_url, error = %error, "primary catalog request failed");
                FailedRequest {
                    url: primary_url,
                    error,
                }
            }
        };

        let Some(fallback_origin) = fallback_origin else {
            return Err(FetchFailure {
                primary,
                fallback: None,
            });
        };

        let fallback_url = Self::product_url(fallback_origin, slug);
        tracing::info!(slug, url = %fallback_url, "trying fallback catalog origin");

        match self.fetch_once(&fallback_url, self.fallback_timeout).await {
            Ok(product) => {
                tracing::info!(slug, url = %fallback_url, "product loaded from fallback origin");
                Ok(ProductPreview {
                    slug: slug.to_owned(),
                    ..product
                })
            }
            Err(error) => {
                tracing::warn!(slug, url = %fallback_url, error = %error, "fallback catalog request failed");
                Err(FetchFailure {
                    primary,
                    fallback: Some(FailedRequest {
                        url: fallback_url,
                        error,
                    }),
                })
            }
        }
    }

    async fn fetch_once(
        &self,
        url: &str,
        timeout: Duration,
    ) -> Result<ProductPreview, CatalogError> {
        let response = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, "application/json")
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| Self::request_error(e, url, timeout))?;

        let status = response.status();
        if !status.is_success() {
            // A failed body read must not replace the status as the reason.
            let body = match response.text().await {
                Ok(text) => truncate_chars(text.trim(), MAX_ERROR_BODY_CHARS),
                Err(e) => {
                    tracing::debug!(url, error = %e, "could not read error response body");
                    String::new()
                }
            };
            return Err(CatalogError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_owned(),
                body,
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| Self::request_error(e, url, timeout))?;

        serde_json::from_str::<ProductPreview>(&body).map_err(|e| CatalogError::Deserialize {
            context: format!("product from {url}"),
            source: e,
        })
    }

    fn request_error(error: reqwest::Error, url: &str, timeout: Duration) -> CatalogError {
        if error.is_timeout() {
            CatalogError::Timeout {
                url: url.to_owned(),
                after_ms: timeout.as_millis(),
            }
        } else {
            CatalogError::Http(error)
        }
    }

    /// Builds `{origin}/api/catalog/public/{slug}`.
    #[must_use]
    pub fn product_url(origin: &str, slug: &str) -> String {
        format!(
            "{}/api/catalog/public/{}",
            origin.trim_end_matches('/'),
            encode_slug(slug)
        )
    }
}

fn truncate_chars(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((idx, _)) => format!("{}…", &text[..idx]),
        None => text.to_owned(),
    }
}

#[cfg(test)]
#[path = "../client_test.rs"]
mod tests;
