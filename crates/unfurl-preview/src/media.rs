//! Media reference normalization.
//!
//! Product media references arrive in many shapes: direct image URLs, video
//! page URLs, root-relative paths, and bare filenames. Crawlers need a single
//! absolute image URL for `og:image`, so each shape is mapped to one.

use std::sync::LazyLock;

use regex::Regex;

/// Served by the frontend; used whenever no renderable image exists.
pub const FALLBACK_IMAGE_PATH: &str = "/logo512.png";

static YOUTUBE_VIDEO_ID: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i:youtube\.com/(?:watch\?v=|embed/|shorts/)|youtu\.be/)([^&?\s]+)")
        .expect("valid youtube regex")
});

/// How the image URL was derived from the raw reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    YouTube,
    Vimeo,
    Relative,
    Absolute,
    Bare,
    Fallback,
}

impl SourceKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            SourceKind::YouTube => "youtube",
            SourceKind::Vimeo => "vimeo",
            SourceKind::Relative => "relative",
            SourceKind::Absolute => "absolute",
            SourceKind::Bare => "bare",
            SourceKind::Fallback => "fallback",
        }
    }
}

impl std::fmt::Display for SourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An image URL an external fetcher can load.
///
/// `url` is always scheme-qualified and non-empty as long as the `base_url`
/// given to [`resolve_image`] is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedImage {
    pub url: String,
    pub source_kind: SourceKind,
}

impl ResolvedImage {
    /// The site logo under `base_url`.
    #[must_use]
    pub fn fallback(base_url: &str) -> Self {
        Self {
            url: fallback_url(base_url),
            source_kind: SourceKind::Fallback,
        }
    }

    /// MIME type guessed from the URL path extension; JPEG when unknown.
    #[must_use]
    pub fn mime_type(&self) -> &'static str {
        let path = self
            .url
            .split(['?', '#'])
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();
        let file = path.rsplit('/').next().unwrap_or_default();
        let ext = file.rsplit_once('.').map(|(_, ext)| ext).unwrap_or_default();
        match ext {
            "png" => "image/png",
            "gif" => "image/gif",
            "webp" => "image/webp",
            "svg" => "image/svg+xml",
            "avif" => "image/avif",
            _ => "image/jpeg",
        }
    }

    /// Declared `og:image` dimensions. YouTube `maxresdefault` thumbnails
    /// are 1280x720; everything else uses the 1.91:1 card size.
    #[must_use]
    pub fn dimensions(&self) -> (u32, u32) {
        match self.source_kind {
            SourceKind::YouTube => (1280, 720),
            _ => (1200, 630),
        }
    }
}

/// Maps a raw media reference to an absolute image URL.
///
/// Checks run in order and the first match wins: absent or blank, `YouTube`
/// link, Vimeo link, root-relative path, absolute `http(s)` URL, anything
/// else as a path under `base_url`. Video checks must run before the
/// absolute-URL check because video page URLs are themselves absolute.
#[must_use]
pub fn resolve_image(raw: Option<&str>, base_url: &str) -> ResolvedImage {
    let base_url = base_url.trim_end_matches('/');
    let Some(raw) = raw.map(str::trim).filter(|r| !r.is_empty()) else {
        return ResolvedImage::fallback(base_url);
    };

    let resolved = if let Some(video_id) = youtube_video_id(raw) {
        ResolvedImage {
            url: format!("https://img.youtube.com/vi/{video_id}/maxresdefault.jpg"),
            source_kind: SourceKind::YouTube,
        }
    } else if raw.to_ascii_lowercase().contains("vimeo.com") {
        // No unauthenticated thumbnail endpoint.
        ResolvedImage {
            url: fallback_url(base_url),
            source_kind: SourceKind::Vimeo,
        }
    } else if raw.starts_with('/') {
        ResolvedImage {
            url: format!("{base_url}{raw}"),
            source_kind: SourceKind::Relative,
        }
    } else if raw.starts_with("http://") || raw.starts_with("https://") {
        ResolvedImage {
            url: raw.to_owned(),
            source_kind: SourceKind::Absolute,
        }
    } else {
        ResolvedImage {
            url: format!("{base_url}/{raw}"),
            source_kind: SourceKind::Bare,
        }
    };

    tracing::debug!(
        raw,
        url = %resolved.url,
        source_kind = %resolved.source_kind,
        "resolved product image"
    );
    resolved
}

/// Extracts the video id from a `youtube.com/watch?v=`, `youtube.com/embed/`,
/// `youtube.com/shorts/` or `youtu.be/` reference.
#[must_use]
pub fn youtube_video_id(raw: &str) -> Option<&str> {
    YOUTUBE_VIDEO_ID
        .captures(raw)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

fn fallback_url(base_url: &str) -> String {
    format!("{}{FALLBACK_IMAGE_PATH}", base_url.trim_end_matches('/'))
}

#[cfg(test)]
#[path = "media_test.rs"]
mod tests;
