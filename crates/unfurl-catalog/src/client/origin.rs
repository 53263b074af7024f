//! Fallback origin selection.

/// Returns `https://{host}` when the request host may serve the catalog
/// endpoint independently of `primary_origin`.
///
/// `None` when there is no host, or when the host is the primary origin's own
/// authority (retrying the same server would only repeat the failure).
#[must_use]
pub fn fallback_origin(primary_origin: &str, host: Option<&str>) -> Option<String> {
    let host = host.map(str::trim).filter(|h| !h.is_empty())?;
    let same_host = match (authority(primary_origin), authority(&format!("https://{host}"))) {
        (Some(primary), Some(requested)) => primary == requested,
        _ => primary_origin.contains(host),
    };
    (!same_host).then(|| format!("https://{host}"))
}

/// Lowercased host and effective port of an absolute URL. A port equal to the
/// scheme default compares equal to no port at all.
fn authority(url: &str) -> Option<(String, Option<u16>)> {
    let parsed = reqwest::Url::parse(url).ok()?;
    let host = parsed.host_str()?.to_ascii_lowercase();
    Some((host, parsed.port_or_known_default()))
}
