//! Pure rendering logic for product link previews: crawler detection, media
//! reference normalization, and HTML document synthesis.

pub mod crawler;
pub mod document;
pub mod failure;
mod markup;
pub mod media;

pub use crawler::is_crawler;
pub use document::{product_url, render_product, ProductCard, SiteMeta};
pub use failure::{
    internal_error_document, malformed_product_document, missing_slug_document,
    not_found_document, FailedAttempt,
};
pub use markup::escape_html;
pub use media::{resolve_image, ResolvedImage, SourceKind, FALLBACK_IMAGE_PATH};
