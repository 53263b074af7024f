//! User-agent classification for link-unfurling crawlers.

/// Lowercase substrings identifying preview fetchers: generic crawler tokens
/// followed by named agents whose user-agents lack them.
const CRAWLER_TOKENS: &[&str] = &[
    "bot",
    "crawler",
    "spider",
    "crawling",
    "facebookexternalhit",
    "facebookcatalog",
    "facebot",
    "meta-externalagent",
    "meta-externalfetcher",
    "whatsapp",
    "skypeuripreview",
    "slack-imgproxy",
    "pinterest",
    "embedly",
    "iframely",
    "vkshare",
    "quora link preview",
    "outbrain",
    "mastodon",
];

/// Returns `true` when `user_agent` belongs to a known link-preview crawler.
///
/// Matching is a case-insensitive substring search. An empty user-agent is
/// treated as a browser.
#[must_use]
pub fn is_crawler(user_agent: &str) -> bool {
    let ua = user_agent.trim().to_ascii_lowercase();
    if ua.is_empty() {
        return false;
    }
    CRAWLER_TOKENS.iter().any(|token| ua.contains(token))
}
