//! Open Graph / Twitter Card document for a resolved product.

use unfurl_core::{encode_slug, ProductPreview};

use crate::markup::{escape_html, Head};
use crate::media::ResolvedImage;

const PRODUCT_STYLE: &str = r"    <style>
        * { box-sizing: border-box; }
        body { font-family: Arial, sans-serif; padding: 20px; background: #f5f5f5; margin: 0; color: #333; }
        .product-preview { background: white; padding: 30px; border-radius: 8px; max-width: 600px; margin: 0 auto; box-shadow: 0 2px 4px rgba(0,0,0,0.1); }
        .product-image { width: 100%; max-width: 500px; height: auto; border-radius: 4px; display: block; margin: 20px auto; }
        h1 { margin-top: 0; font-size: 24px; }
        p { color: #666; line-height: 1.6; margin: 10px 0; }
        a { color: #007bff; text-decoration: none; font-weight: 500; }
    </style>
";

/// Site-wide values stamped into every document.
#[derive(Debug, Clone, Copy)]
pub struct SiteMeta<'a> {
    pub site_name: &'a str,
    /// `og:locale`, e.g. `fr_FR`.
    pub locale: &'a str,
    /// `<html lang>`, e.g. `fr`.
    pub lang: &'a str,
}

/// The display text of a product, after normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductCard<'a> {
    pub slug: &'a str,
    pub title: &'a str,
    /// Description (or title when absent) with ` - {price} {currency}`
    /// appended when both are known.
    pub description: String,
    pub price: Option<String>,
    pub currency: Option<&'a str>,
}

impl<'a> ProductCard<'a> {
    /// Builds the card, or `None` when the product has no usable title.
    #[must_use]
    pub fn from_product(product: &'a ProductPreview) -> Option<Self> {
        let title = product.title()?;
        let base = product.description().unwrap_or(title);
        let price = product.price().map(ToString::to_string);
        let currency = product.currency();

        let description = match (&price, currency) {
            (Some(price), Some(currency)) => format!("{base} - {price} {currency}"),
            _ => base.to_owned(),
        };

        Some(Self {
            slug: &product.slug,
            title,
            description,
            price,
            currency,
        })
    }

    fn price_line(&self) -> Option<String> {
        let price = self.price.as_deref()?;
        Some(match self.currency {
            Some(currency) => format!("{price} {currency}"),
            None => price.to_owned(),
        })
    }
}

/// Canonical public URL of a product page: `{base_url}/p/{slug}`.
#[must_use]
pub fn product_url(base_url: &str, slug: &str) -> String {
    format!("{}/p/{}", base_url.trim_end_matches('/'), encode_slug(slug))
}

/// Renders the full preview document.
///
/// Crawlers get meta tags and static body content only. Browsers also get
/// an inert JSON data block describing the page; nothing in the document
/// navigates away on its own.
#[must_use]
pub fn render_product(
    card: &ProductCard<'_>,
    image: &ResolvedImage,
    is_crawler: bool,
    product_url: &str,
    site: &SiteMeta<'_>,
) -> String {
    let (width, height) = image.dimensions();
    let (width, height) = (width.to_string(), height.to_string());

    let mut head = Head::new(site.lang, true);
    head.title(card.title)
        .name("description", &card.description)
        .link("canonical", product_url)
        .property("og:type", "product")
        .property("og:title", card.title)
        .property("og:description", &card.description)
        .property("og:image", &image.url)
        .property("og:image:url", &image.url)
        .property("og:image:secure_url", &image.url)
        .property("og:image:type", image.mime_type())
        .property("og:image:width", &width)
        .property("og:image:height", &height)
        .property("og:image:alt", card.title)
        .property("og:url", product_url)
        .property("og:site_name", site.site_name)
        .property("og:locale", site.locale);

    if let (Some(price), Some(currency)) = (card.price.as_deref(), card.currency) {
        head.property("product:price:amount", price)
            .property("product:price:currency", currency);
    }

    head.name("twitter:card", "summary_large_image")
        .name("twitter:title", card.title)
        .name("twitter:description", &card.description)
        .name("twitter:image", &image.url)
        .name("twitter:image:alt", card.title)
        .name("robots", "index, follow")
        .raw(PRODUCT_STYLE);

    if !is_crawler {
        head.raw(&preview_context_script(card.slug, product_url));
    }

    head.finish(&product_body(card, image, product_url))
}

fn product_body(card: &ProductCard<'_>, image: &ResolvedImage, product_url: &str) -> String {
    let title = escape_html(card.title);
    let mut body = String::with_capacity(1024);
    body.push_str("    <main class=\"product-preview\">\n");
    body.push_str(&format!("        <h1>{title}</h1>\n"));
    body.push_str(&format!(
        "        <p>{}</p>\n",
        escape_html(&card.description)
    ));
    body.push_str(&format!(
        "        <img src=\"{}\" alt=\"{title}\" class=\"product-image\">\n",
        escape_html(&image.url)
    ));
    if let Some(price) = card.price_line() {
        body.push_str(&format!(
            "        <p class=\"price\"><strong>Price:</strong> {}</p>\n",
            escape_html(&price)
        ));
    }
    body.push_str(&format!(
        "        <p><a href=\"{}\">View Product &rarr;</a></p>\n",
        escape_html(product_url)
    ));
    body.push_str("    </main>\n");
    body
}

/// Inert data block for client code; `<` is escaped so the payload cannot
/// close the script element.
fn preview_context_script(slug: &str, product_url: &str) -> String {
    let payload = serde_json::json!({
        "slug": slug,
        "canonical_url": product_url,
    })
    .to_string()
    .replace('<', "\\u003c");
    format!(
        "    <script type=\"application/json\" id=\"preview-context\">{payload}</script>\n"
    )
}
