use serde::{Deserialize, Serialize};

/// Product price as sent by the catalog, either a JSON number or a string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Price {
    Number(serde_json::Number),
    Text(String),
}

impl Price {
    #[must_use]
    pub fn is_blank(&self) -> bool {
        match self {
            Price::Number(_) => false,
            Price::Text(s) => s.trim().is_empty(),
        }
    }
}

impl std::fmt::Display for Price {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // Floats go through `f64` so a whole value like `30.0` prints as `30`.
            Price::Number(n) => match n.as_f64() {
                Some(value) if n.is_f64() => write!(f, "{value}"),
                _ => write!(f, "{n}"),
            },
            Price::Text(s) => f.write_str(s.trim()),
        }
    }
}

/// Product data returned by `GET /api/catalog/public/{slug}`.
///
/// Fetched fresh for every preview request and never mutated. `title` is
/// optional at the wire level; a missing title is reported as malformed data
/// by the caller rather than as a deserialization failure.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ProductPreview {
    /// Not part of the payload; filled in by the fetcher.
    #[serde(skip)]
    pub slug: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub price: Option<Price>,
    pub currency: Option<String>,
    pub image_url: Option<String>,
}

impl ProductPreview {
    /// Trimmed, non-empty title.
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        non_blank(self.title.as_deref())
    }

    /// Trimmed description, with empty and `"none"` (any case) treated as absent.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        non_blank(self.description.as_deref()).filter(|d| !d.eq_ignore_ascii_case("none"))
    }

    /// Price, unless blank.
    #[must_use]
    pub fn price(&self) -> Option<&Price> {
        self.price.as_ref().filter(|p| !p.is_blank())
    }

    #[must_use]
    pub fn currency(&self) -> Option<&str> {
        non_blank(self.currency.as_deref())
    }

    #[must_use]
    pub fn image_url(&self) -> Option<&str> {
        non_blank(self.image_url.as_deref())
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: serde_json::Value) -> ProductPreview {
        serde_json::from_value(json).expect("valid product payload")
    }

    #[test]
    fn deserializes_full_payload() {
        let product = parse(serde_json::json!({
            "title": "Sérum Éclat",
            "description": "Hydrate en profondeur",
            "price": 29.9,
            "currency": "EUR",
            "image_url": "/uploads/serum.jpg",
            "stock": 12
        }));
        assert_eq!(product.title(), Some("Sérum Éclat"));
        assert_eq!(product.price().map(ToString::to_string).as_deref(), Some("29.9"));
        assert_eq!(product.currency(), Some("EUR"));
        assert_eq!(product.image_url(), Some("/uploads/serum.jpg"));
        assert!(product.slug.is_empty());
    }

    #[test]
    fn missing_title_is_not_a_parse_error() {
        let product = parse(serde_json::json!({ "description": "orphan" }));
        assert_eq!(product.title(), None);
    }

    #[test]
    fn blank_title_counts_as_missing() {
        let product = parse(serde_json::json!({ "title": "   " }));
        assert_eq!(product.title(), None);
    }

    #[test]
    fn none_description_is_absent() {
        let product = parse(serde_json::json!({ "title": "T", "description": " None " }));
        assert_eq!(product.description(), None);
    }

    #[test]
    fn string_price_is_accepted() {
        let product = parse(serde_json::json!({ "title": "T", "price": "15,00" }));
        assert_eq!(product.price(), Some(&Price::Text("15,00".to_owned())));
    }

    #[test]
    fn whole_float_price_displays_without_fraction() {
        let whole = parse(serde_json::json!({ "title": "T", "price": 30.0 }));
        assert_eq!(whole.price().map(ToString::to_string).as_deref(), Some("30"));
        let integer = parse(serde_json::json!({ "title": "T", "price": 15 }));
        assert_eq!(integer.price().map(ToString::to_string).as_deref(), Some("15"));
        let fractional = parse(serde_json::json!({ "title": "T", "price": 12.5 }));
        assert_eq!(fractional.price().map(ToString::to_string).as_deref(), Some("12.5"));
    }

    #[test]
    fn blank_string_price_is_absent() {
        let product = parse(serde_json::json!({ "title": "T", "price": "" }));
        assert_eq!(product.price(), None);
    }

    #[test]
    fn null_fields_are_absent() {
        let product = parse(serde_json::json!({
            "title": "T", "price": null, "currency": null, "image_url": null
        }));
        assert_eq!(product.price(), None);
        assert_eq!(product.image_url(), None);
    }
}
