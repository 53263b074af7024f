//! Documents for the non-success outcomes of a preview request.
//!
//! Crawlers do not retry and show nothing for a raw error payload, so the
//! not-found and internal-error documents still carry a generic Open Graph
//! card pointing at the site logo.

use crate::document::{product_url, SiteMeta};
use crate::markup::{escape_html, Head};
use crate::media::ResolvedImage;

const ERROR_STYLE: &str = r"    <style>
        body { font-family: Arial, sans-serif; padding: 40px 20px; background: #f5f5f5; margin: 0; color: #333; }
        .error-box { background: white; padding: 30px; border-radius: 8px; max-width: 600px; margin: 0 auto; box-shadow: 0 2px 4px rgba(0,0,0,0.1); }
        h1 { color: #d32f2f; margin-top: 0; }
        p { color: #666; line-height: 1.6; margin: 10px 0; }
        code { background: #f5f5f5; padding: 2px 6px; border-radius: 3px; font-family: monospace; word-break: break-all; }
    </style>
";

/// One failed upstream attempt, for the diagnostic body.
#[derive(Debug, Clone, Copy)]
pub struct FailedAttempt<'a> {
    pub label: &'a str,
    pub url: &'a str,
    pub error: &'a str,
}

/// Returned when the request path carries no slug.
#[must_use]
pub fn missing_slug_document() -> String {
    let mut head = Head::new("en", false);
    head.title("Error");
    head.finish(
        "    <h1>Product not found - No slug provided</h1>\n    <p><a href=\"/\">&larr; Back to home</a></p>\n",
    )
}

/// Returned when every upstream attempt failed. Lists what was tried.
#[must_use]
pub fn not_found_document(
    site: &SiteMeta<'_>,
    base_url: &str,
    slug: &str,
    backend_origin: &str,
    attempts: &[FailedAttempt<'_>],
) -> String {
    let mut head = Head::new(site.lang, true);
    generic_card(
        &mut head,
        site,
        base_url,
        slug,
        "Product Not Found",
        "The requested product could not be found",
    );
    head.name("robots", "noindex").raw(ERROR_STYLE);

    let mut body = String::with_capacity(1024);
    body.push_str("    <div class=\"error-box\">\n");
    body.push_str("        <h1>Product Not Found</h1>\n");
    body.push_str(&format!(
        "        <p><strong>Slug:</strong> {}</p>\n",
        escape_html(slug)
    ));
    body.push_str(&format!(
        "        <p><strong>Backend URL:</strong> <code>{}</code></p>\n",
        escape_html(backend_origin)
    ));
    for attempt in attempts {
        let label = escape_html(attempt.label);
        body.push_str(&format!(
            "        <p><strong>{label} URL tried:</strong> <code>{}</code></p>\n",
            escape_html(attempt.url)
        ));
        body.push_str(&format!(
            "        <p><strong>{label} error:</strong> {}</p>\n",
            escape_html(attempt.error)
        ));
    }
    body.push_str("        <p><a href=\"/\">&larr; Back to home</a></p>\n");
    body.push_str("    </div>\n");

    head.finish(&body)
}

/// Returned when the catalog answered but the product has no title.
#[must_use]
pub fn malformed_product_document(slug: &str) -> String {
    let mut head = Head::new("en", false);
    head.title("Invalid Product Data").raw(ERROR_STYLE);
    let body = format!(
        "    <div class=\"error-box\">\n        <h1>Invalid Product Data</h1>\n        <p>The product was found but has invalid data.</p>\n        <p><strong>Slug:</strong> {}</p>\n    </div>\n",
        escape_html(slug)
    );
    head.finish(&body)
}

/// Returned when rendering failed unexpectedly. References only the logo.
#[must_use]
pub fn internal_error_document(site: &SiteMeta<'_>, base_url: &str, slug: &str) -> String {
    let mut head = Head::new(site.lang, true);
    generic_card(&mut head, site, base_url, slug, "Product", "Product page");
    head.raw(ERROR_STYLE);
    head.finish(
        "    <div class=\"error-box\">\n        <h1>Error loading product</h1>\n        <p>Please try again later.</p>\n        <p><a href=\"/\">&larr; Back to home</a></p>\n    </div>\n",
    )
}

fn generic_card(
    head: &mut Head,
    site: &SiteMeta<'_>,
    base_url: &str,
    slug: &str,
    title: &str,
    description: &str,
) {
    let logo = ResolvedImage::fallback(base_url);
    head.title(title)
        .name("description", description)
        .property("og:type", "product")
        .property("og:title", title)
        .property("og:description", description)
        .property("og:image", &logo.url)
        .property("og:url", &product_url(base_url, slug))
        .property("og:site_name", site.site_name)
        .name("twitter:card", "summary")
        .name("twitter:title", title)
        .name("twitter:image", &logo.url);
}
