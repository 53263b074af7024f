use thiserror::Error;

/// Why a single catalog request failed.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("request to {url} timed out after {after_ms}ms")]
    Timeout { url: String, after_ms: u128 },

    #[error("unexpected HTTP status {status} from {url}{}", body_suffix(.body))]
    UnexpectedStatus {
        status: u16,
        url: String,
        body: String,
    },

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },
}

/// A failed request and the URL it targeted.
#[derive(Debug, Error)]
#[error("{url}: {error}")]
pub struct FailedRequest {
    pub url: String,
    #[source]
    pub error: CatalogError,
}

/// Both catalog attempts failed (or the primary failed and no fallback
/// applied). Kept whole for diagnostics.
#[derive(Debug, Error)]
#[error("primary request {primary}{}", fallback_suffix(.fallback))]
pub struct FetchFailure {
    #[source]
    pub primary: FailedRequest,
    pub fallback: Option<FailedRequest>,
}

fn body_suffix(body: &str) -> String {
    if body.is_empty() {
        String::new()
    } else {
        format!(": {body}")
    }
}

#[allow(clippy::ref_option)]
fn fallback_suffix(fallback: &Option<FailedRequest>) -> String {
    fallback
        .as_ref()
        .map(|f| format!("; fallback request {f}"))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_error(status: u16, url: &str, body: &str) -> CatalogError {
        CatalogError::UnexpectedStatus {
            status,
            url: url.to_owned(),
            body: body.to_owned(),
        }
    }

    #[test]
    fn unexpected_status_includes_body_when_present() {
        let err = status_error(404, "https://api.example.com/x", "Product not found");
        assert_eq!(
            err.to_string(),
            "unexpected HTTP status 404 from https://api.example.com/x: Product not found"
        );
        let bare = status_error(502, "https://api.example.com/x", "");
        assert_eq!(
            bare.to_string(),
            "unexpected HTTP status 502 from https://api.example.com/x"
        );
    }

    #[test]
    fn fetch_failure_lists_both_attempts() {
        let failure = FetchFailure {
            primary: FailedRequest {
                url: "https://api.example.com/p".to_owned(),
                error: CatalogError::Timeout {
                    url: "https://api.example.com/p".to_owned(),
                    after_ms: 10_000,
                },
            },
            fallback: Some(FailedRequest {
                url: "https://shop.example.com/p".to_owned(),
                error: status_error(404, "https://shop.example.com/p", ""),
            }),
        };
        let text = failure.to_string();
        assert!(text.starts_with("primary request https://api.example.com/p:"));
        assert!(text.contains("timed out after 10000ms"));
        assert!(text.contains("; fallback request https://shop.example.com/p:"));
    }

    #[test]
    fn fetch_failure_without_fallback_has_no_suffix() {
        let failure = FetchFailure {
            primary: FailedRequest {
                url: "u".to_owned(),
                error: status_error(500, "u", ""),
            },
            fallback: None,
        };
        assert!(!failure.to_string().contains("fallback"));
    }
}
