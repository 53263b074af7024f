use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};

/// Characters escaped when a slug is placed into a single URL path segment.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'\\')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Percent-encodes `slug` for use as one path segment.
///
/// Well-formed slugs (`lowercase-words-123`) pass through unchanged.
#[must_use]
pub fn encode_slug(slug: &str) -> String {
    utf8_percent_encode(slug, PATH_SEGMENT).to_string()
}
