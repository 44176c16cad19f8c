//! Page probing and hero-image extraction.
//!
//! Fetches a linked page with browser-like headers and selects a
//! representative image from its markup. Extraction is an ordered list of
//! explicit rules evaluated in priority order (Open Graph, Twitter card,
//! `link rel="image_src"`, then embedded `<img>` tags), with candidate
//! validation and tracker/pixel rejection kept as pure predicate
//! functions.

use crate::error::{AggregateError, Result};
use crate::types::PageMeta;
use scraper::{Html, Selector};
use url::Url;

/// URL substrings identifying analytics/advertising hosts whose images
/// must never be selected.
const TRACKER_PATTERNS: &[&str] = &[
    "fls-na.amazon",
    "amazon-adsystem",
    "doubleclick.net",
    "googletagmanager",
    "google-analytics",
    "stats.",
    "segment.io",
    "mixpanel",
    "adservice.",
];

/// URL text fragments typical of tracking pixels and spacer graphics.
const PIXEL_PATTERNS: &[&str] = &["1x1", "pixel", "spacer", "transparent"];

/// Meta-tag extraction rules in priority order: CSS selector plus the
/// attribute carrying the candidate URL.
const META_RULES: &[(&str, &str)] = &[
    (r#"meta[property="og:image"]"#, "content"),
    (r#"meta[name="og:image"]"#, "content"),
    (r#"meta[name="twitter:image"]"#, "content"),
    (r#"link[rel="image_src"]"#, "href"),
];

/// An embedded image candidate: resolved URL plus the explicit pixel
/// dimensions declared on the tag, used to filter out tracking pixels.
#[derive(Debug, Clone)]
pub struct ImageCandidate {
    /// Absolute candidate URL after resolution against the page origin.
    pub url: String,
    /// Explicit `width` attribute, when present and numeric.
    pub width: Option<u32>,
    /// Explicit `height` attribute, when present and numeric.
    pub height: Option<u32>,
}

/// Fetch a page and extract its title, description, and hero image.
///
/// Expects a probe-profile client (see [`crate::http::probe_client`]),
/// which carries the browser header block, a bounded timeout, and
/// redirect following.
///
/// # Errors
///
/// Returns [`AggregateError::Http`] on transport failure or a non-2xx
/// status. Callers in the backfill stage degrade this to an empty image.
pub async fn fetch_page_meta(client: &reqwest::Client, url: &str) -> Result<PageMeta> {
    let safe_url = ensure_scheme(url);

    let response = client
        .get(&safe_url)
        .send()
        .await
        .map_err(|e| AggregateError::Http(format!("page fetch failed: {e}")))?
        .error_for_status()
        .map_err(|e| AggregateError::Http(format!("page fetch status: {e}")))?;

    let html = response
        .text()
        .await
        .map_err(|e| AggregateError::Http(format!("page read failed: {e}")))?;

    tracing::trace!(url = %safe_url, bytes = html.len(), "page fetched");
    Ok(extract_page_meta(&html, &safe_url))
}

/// Extract title, description, and hero image from fetched markup.
pub fn extract_page_meta(html: &str, url: &str) -> PageMeta {
    let document = Html::parse_document(html);
    PageMeta {
        url: url.to_owned(),
        title: extract_title(&document),
        description: extract_description(&document),
        image: select_hero_image(&document, url),
    }
}

/// Select a hero image from raw markup.
///
/// Convenience wrapper over [`extract_page_meta`] returning only the
/// image; empty string when nothing qualifies.
pub fn extract_hero_image(html: &str, base_url: &str) -> String {
    let document = Html::parse_document(html);
    select_hero_image(&document, base_url)
}

fn extract_title(document: &Html) -> String {
    for selector_str in [
        r#"meta[property="og:title"]"#,
        r#"meta[name="og:title"]"#,
    ] {
        let Ok(selector) = Selector::parse(selector_str) else {
            continue;
        };
        if let Some(content) = document
            .select(&selector)
            .next()
            .and_then(|el| el.value().attr("content"))
        {
            let trimmed = content.trim();
            if !trimmed.is_empty() {
                return trimmed.to_owned();
            }
        }
    }

    let Ok(selector) = Selector::parse("title") else {
        return String::new();
    };
    document
        .select(&selector)
        .next()
        .map(|el| el.text().collect::<String>())
        .unwrap_or_default()
        .trim()
        .to_owned()
}

fn extract_description(document: &Html) -> String {
    for selector_str in [
        r#"meta[name="description"]"#,
        r#"meta[property="og:description"]"#,
        r#"meta[name="twitter:description"]"#,
    ] {
        let Ok(selector) = Selector::parse(selector_str) else {
            continue;
        };
        if let Some(content) = document
            .select(&selector)
            .next()
            .and_then(|el| el.value().attr("content"))
        {
            let trimmed = content.trim();
            if !trimmed.is_empty() {
                return trimmed.to_owned();
            }
        }
    }
    String::new()
}

/// Apply the image-selection rules against a parsed document.
///
/// 1. Meta rules in priority order; the first match per rule is resolved
///    and validated.
/// 2. Fallback: embedded `<img>` tags in document order, rejecting pixels
///    and tracker domains.
/// 3. Empty string when nothing qualifies.
fn select_hero_image(document: &Html, base_url: &str) -> String {
    for (selector_str, attr) in META_RULES {
        let Ok(selector) = Selector::parse(selector_str) else {
            continue;
        };
        if let Some(raw) = document
            .select(&selector)
            .next()
            .and_then(|el| el.value().attr(attr))
        {
            let resolved = absolutize(base_url, raw.trim());
            if is_valid_image_url(&resolved) && !is_tracker_url(&resolved) {
                return resolved;
            }
        }
    }

    let Ok(img_selector) = Selector::parse("img") else {
        return String::new();
    };
    for element in document.select(&img_selector) {
        // Primary src attribute, falling back to the lazy-load variant.
        let src = element
            .value()
            .attr("src")
            .or_else(|| element.value().attr("data-src"))
            .map(str::trim)
            .unwrap_or_default();
        if src.is_empty() {
            continue;
        }

        let candidate = ImageCandidate {
            url: absolutize(base_url, src),
            width: element.value().attr("width").and_then(|w| w.parse().ok()),
            height: element.value().attr("height").and_then(|h| h.parse().ok()),
        };

        if !is_valid_image_url(&candidate.url) {
            continue;
        }
        if looks_like_pixel(&candidate) {
            continue;
        }
        if is_tracker_url(&candidate.url) {
            continue;
        }
        return candidate.url;
    }

    String::new()
}

/// Prepend `https://` when a link arrives without a scheme.
pub fn ensure_scheme(url: &str) -> String {
    let trimmed = url.trim();
    let lower = trimmed.to_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") {
        trimmed.to_owned()
    } else {
        format!("https://{trimmed}")
    }
}

/// Resolve a candidate source attribute to an absolute URL.
///
/// Protocol-relative sources get `https:`, root-relative sources resolve
/// against the page origin, and other relative forms resolve against the
/// page URL itself. Unresolvable input is returned unchanged (it will
/// fail validation downstream).
pub fn absolutize(base: &str, src: &str) -> String {
    if src.is_empty() {
        return src.to_owned();
    }
    let lower = src.to_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") {
        return src.to_owned();
    }
    if let Some(rest) = src.strip_prefix("//") {
        return format!("https://{rest}");
    }
    let Ok(base_url) = Url::parse(base) else {
        return src.to_owned();
    };
    match base_url.join(src) {
        Ok(resolved) => resolved.to_string(),
        Err(_) => src.to_owned(),
    }
}

/// Returns `true` if the candidate parses as an absolute http(s) URL with
/// a dotted hostname whose final label is alphabetic.
pub fn is_valid_image_url(candidate: &str) -> bool {
    let Ok(parsed) = Url::parse(candidate) else {
        return false;
    };
    if parsed.scheme() != "http" && parsed.scheme() != "https" {
        return false;
    }
    let Some(host) = parsed.host_str() else {
        return false;
    };
    let Some(tld) = host.rsplit('.').next() else {
        return false;
    };
    host.contains('.') && tld.len() >= 2 && tld.chars().all(|c| c.is_ascii_alphabetic())
}

/// Returns `true` if the candidate looks like a tracking pixel or spacer.
///
/// Checks the URL text for known pixel patterns, explicit tag dimensions
/// of 2×2 or smaller, and `width`/`height` query parameters equal to 1.
pub fn looks_like_pixel(candidate: &ImageCandidate) -> bool {
    let lower = candidate.url.to_lowercase();
    if PIXEL_PATTERNS.iter().any(|p| lower.contains(p)) {
        return true;
    }
    if let (Some(w), Some(h)) = (candidate.width, candidate.height) {
        if (1..=2).contains(&w) && (1..=2).contains(&h) {
            return true;
        }
    }
    if let Ok(parsed) = Url::parse(&lower) {
        if parsed
            .query_pairs()
            .any(|(k, v)| (k == "width" || k == "height") && v == "1")
        {
            return true;
        }
    }
    false
}

/// Returns `true` if the URL matches a known tracker/analytics pattern.
pub fn is_tracker_url(candidate: &str) -> bool {
    let lower = candidate.to_lowercase();
    TRACKER_PATTERNS.iter().any(|p| lower.contains(p))
}
