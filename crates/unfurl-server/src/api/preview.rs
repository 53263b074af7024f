//! `GET /p/{slug}`: fetch the product, pick a document for the outcome, and
//! answer with HTML in every case.

use std::panic::AssertUnwindSafe;

use axum::{
    extract::{rejection::PathRejection, Path, State},
    http::{
        header::{ACCESS_CONTROL_ALLOW_ORIGIN, CACHE_CONTROL, CONTENT_TYPE, HOST, ORIGIN, USER_AGENT},
        HeaderMap, HeaderName, HeaderValue, StatusCode,
    },
    response::{IntoResponse, Response},
};
use futures::FutureExt;
use unfurl_catalog::{fallback_origin, FetchFailure};
use unfurl_core::{resolve_backend_origin, AppConfig, BackendOrigin};
use unfurl_preview::{
    internal_error_document, is_crawler, malformed_product_document, missing_slug_document,
    not_found_document, product_url, render_product, resolve_image, FailedAttempt, ProductCard,
    SiteMeta,
};

use super::AppState;

const HTML_CONTENT_TYPE: &str = "text/html; charset=utf-8";
const CRAWLER_CACHE: &str = "public, max-age=3600, s-maxage=3600";
const NO_STORE: &str = "no-store";
const LOGGED_USER_AGENT_CHARS: usize = 200;

/// What the handler needs from the incoming request.
#[derive(Debug, Clone)]
pub(super) struct RequestContext {
    slug: Option<String>,
    host: Option<String>,
    user_agent: String,
    origin: Option<String>,
    is_crawler: bool,
}

impl RequestContext {
    pub(super) fn from_parts(slug: Option<String>, headers: &HeaderMap) -> Self {
        let header = |name: HeaderName| {
            headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_owned)
        };
        let user_agent = header(USER_AGENT).unwrap_or_default();
        Self {
            slug: slug.filter(|s| !s.trim().is_empty()),
            host: header(HOST),
            is_crawler: is_crawler(&user_agent),
            user_agent,
            origin: header(ORIGIN),
        }
    }

    /// Public base URL for canonical links and relative media.
    fn base_url(&self, config: &AppConfig) -> String {
        self.host.as_deref().map_or_else(
            || config.public_base_url.clone(),
            |host| format!("https://{host}"),
        )
    }
}

/// Terminal state of one preview request.
enum Outcome {
    MissingSlug,
    FetchFailed {
        slug: String,
        origin: BackendOrigin,
        failure: FetchFailure,
    },
    MalformedProduct {
        slug: String,
    },
    Rendered(String),
}

pub(super) async fn product_preview(
    State(state): State<AppState>,
    slug: Result<Path<String>, PathRejection>,
    headers: HeaderMap,
) -> Response {
    let slug = slug.ok().map(|Path(slug)| slug);
    respond(&state, RequestContext::from_parts(slug, &headers)).await
}

pub(super) async fn missing_slug(State(state): State<AppState>, headers: HeaderMap) -> Response {
    respond(&state, RequestContext::from_parts(None, &headers)).await
}

async fn respond(state: &AppState, ctx: RequestContext) -> Response {
    tracing::info!(
        slug = ctx.slug.as_deref().unwrap_or_default(),
        is_crawler = ctx.is_crawler,
        user_agent = %truncate_chars(&ctx.user_agent, LOGGED_USER_AGENT_CHARS),
        "preview requested"
    );

    let base_url = ctx.base_url(&state.config);
    let site = SiteMeta {
        site_name: &state.config.site_name,
        locale: &state.config.locale,
        lang: state.config.html_lang(),
    };

    let rendered = AssertUnwindSafe(async {
        let outcome = resolve(state, &ctx, &base_url, &site).await;
        finish(outcome, &ctx, &base_url, &site)
    })
    .catch_unwind()
    .await;

    let (status, body, cache_control) = rendered.unwrap_or_else(|panic| {
        tracing::error!(
            slug = ctx.slug.as_deref().unwrap_or_default(),
            panic = panic_message(panic.as_ref()),
            "preview rendering panicked"
        );
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            internal_error_document(&site, &base_url, ctx.slug.as_deref().unwrap_or_default()),
            NO_STORE,
        )
    });

    html_response(status, body, cache_control, ctx.origin.is_some())
}

async fn resolve(
    state: &AppState,
    ctx: &RequestContext,
    base_url: &str,
    site: &SiteMeta<'_>,
) -> Outcome {
    let Some(slug) = ctx.slug.as_deref() else {
        return Outcome::MissingSlug;
    };

    let origin = resolve_backend_origin(state.settings.as_ref(), ctx.host.as_deref());
    tracing::debug!(backend_origin = %origin.url, source = %origin.source, "backend origin resolved");
    let fallback = fallback_origin(&origin.url, ctx.host.as_deref());

    let product = match state
        .catalog
        .fetch_product(slug, &origin.url, fallback.as_deref())
        .await
    {
        Ok(product) => product,
        Err(failure) => {
            return Outcome::FetchFailed {
                slug: slug.to_owned(),
                origin,
                failure,
            };
        }
    };

    let Some(card) = ProductCard::from_product(&product) else {
        return Outcome::MalformedProduct {
            slug: slug.to_owned(),
        };
    };
    let image = resolve_image(product.image_url(), base_url);
    tracing::debug!(image_url = %image.url, source_kind = %image.source_kind, "preview image resolved");

    Outcome::Rendered(render_product(
        &card,
        &image,
        ctx.is_crawler,
        &product_url(base_url, slug),
        site,
    ))
}

fn finish(
    outcome: Outcome,
    ctx: &RequestContext,
    base_url: &str,
    site: &SiteMeta<'_>,
) -> (StatusCode, String, &'static str) {
    match outcome {
        Outcome::MissingSlug => (StatusCode::NOT_FOUND, missing_slug_document(), NO_STORE),
        Outcome::FetchFailed {
            slug,
            origin,
            failure,
        } => {
            tracing::warn!(slug = %slug, error = %failure, "product fetch failed");
            let tried: Vec<(&str, &str, String)> = std::iter::once(("Primary", &failure.primary))
                .chain(failure.fallback.as_ref().map(|f| ("Fallback", f)))
                .map(|(label, request)| (label, request.url.as_str(), request.error.to_string()))
                .collect();
            let attempts: Vec<FailedAttempt<'_>> = tried
                .iter()
                .map(|(label, url, error)| FailedAttempt {
                    label,
                    url,
                    error: error.as_str(),
                })
                .collect();
            (
                StatusCode::NOT_FOUND,
                not_found_document(site, base_url, &slug, &origin.url, &attempts),
                NO_STORE,
            )
        }
        Outcome::MalformedProduct { slug } => {
            tracing::warn!(slug = %slug, "product has no title");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                malformed_product_document(&slug),
                NO_STORE,
            )
        }
        Outcome::Rendered(html) => {
            let cache_control = if ctx.is_crawler { CRAWLER_CACHE } else { NO_STORE };
            (StatusCode::OK, html, cache_control)
        }
    }
}

fn html_response(
    status: StatusCode,
    body: String,
    cache_control: &'static str,
    cross_origin: bool,
) -> Response {
    let mut response = (
        status,
        [(CONTENT_TYPE, HTML_CONTENT_TYPE), (CACHE_CONTROL, cache_control)],
        body,
    )
        .into_response();
    if cross_origin {
        response
            .headers_mut()
            .insert(ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*"));
    }
    response
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> &str {
    payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("non-string panic payload")
}

fn truncate_chars(value: &str, max: usize) -> &str {
    match value.char_indices().nth(max) {
        Some((idx, _)) => &value[..idx],
        None => value,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(pairs: &[(&'static str, &str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (name, value) in pairs {
            map.insert(*name, HeaderValue::from_str(value).expect("header value"));
        }
        map
    }

    #[test]
    fn context_reads_host_agent_and_origin() {
        let ctx = RequestContext::from_parts(
            Some("serum".to_owned()),
            &headers(&[
                ("host", "shop.example.com"),
                ("user-agent", "facebookexternalhit/1.1"),
                ("origin", "https://other.example.com"),
            ]),
        );
        assert_eq!(ctx.slug.as_deref(), Some("serum"));
        assert_eq!(ctx.host.as_deref(), Some("shop.example.com"));
        assert!(ctx.is_crawler);
        assert!(ctx.origin.is_some());
    }

    #[test]
    fn blank_slug_is_missing() {
        let ctx = RequestContext::from_parts(Some("  ".to_owned()), &HeaderMap::new());
        assert!(ctx.slug.is_none());
    }

    #[test]
    fn missing_user_agent_is_not_a_crawler() {
        let ctx = RequestContext::from_parts(Some("x".to_owned()), &HeaderMap::new());
        assert_eq!(ctx.user_agent, "");
        assert!(!ctx.is_crawler);
    }

    #[test]
    fn truncate_chars_stops_at_char_boundary() {
        assert_eq!(truncate_chars("éàü", 2), "éà");
        assert_eq!(truncate_chars("bot", 200), "bot");
    }

    #[test]
    fn panic_message_reads_str_and_string_payloads() {
        let s: Box<dyn std::any::Any + Send> = Box::new("boom");
        assert_eq!(panic_message(s.as_ref()), "boom");
        let owned: Box<dyn std::any::Any + Send> = Box::new(String::from("bang"));
        assert_eq!(panic_message(owned.as_ref()), "bang");
    }
}
