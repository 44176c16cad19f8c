//! HTTP client profiles for provider APIs and page probes.
//!
//! Two [`reqwest::Client`] profiles share a timeout and User-Agent
//! rotation but differ in headers and policies: API calls advertise JSON
//! and follow no cookies, while page probes send a fixed browser-like
//! header block, keep cookies, and follow redirects. Both are bounded by
//! `config.timeout_seconds`.

use crate::config::AggregatorConfig;
use crate::error::AggregateError;
use rand::Rng;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE};
use std::time::Duration;

/// Desktop browser User-Agent strings rotated across client builds.
const DESKTOP_AGENTS: &[&str] = &[
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/132.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.6 Safari/605.1.15",
    "Mozilla/5.0 (X11; Linux x86_64; rv:134.0) Gecko/20100101 Firefox/134.0",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/132.0.0.0 Safari/537.36 Edg/132.0.0.0",
];

/// Client for provider API calls.
///
/// Advertises JSON, no cookie jar, no redirect chasing beyond reqwest's
/// default. Provider endpoints are plain HTTPS APIs and need none of the
/// probe profile's browser mimicry.
///
/// # Errors
///
/// Returns [`AggregateError::Http`] if the client cannot be constructed.
pub fn api_client(config: &AggregatorConfig) -> Result<reqwest::Client, AggregateError> {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

    base_builder(config)
        .default_headers(headers)
        .build()
        .map_err(|e| AggregateError::Http(format!("failed to build API client: {e}")))
}

/// Client for probing result pages during image backfill.
///
/// Carries the fixed browser header block, a cookie jar, and bounded
/// redirect following, since article links frequently bounce through
/// consent or shortener hops before the real page.
///
/// # Errors
///
/// Returns [`AggregateError::Http`] if the client cannot be constructed.
pub fn probe_client(config: &AggregatorConfig) -> Result<reqwest::Client, AggregateError> {
    base_builder(config)
        .default_headers(probe_headers())
        .cookie_store(true)
        .redirect(reqwest::redirect::Policy::limited(8))
        .build()
        .map_err(|e| AggregateError::Http(format!("failed to build probe client: {e}")))
}

fn base_builder(config: &AggregatorConfig) -> reqwest::ClientBuilder {
    let ua = match config.user_agent {
        Some(ref custom) => custom.clone(),
        None => pick_user_agent().to_owned(),
    };
    reqwest::Client::builder()
        .timeout(Duration::from_secs(config.timeout_seconds))
        .user_agent(ua)
}

/// The fixed header block sent with every page probe.
fn probe_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        ACCEPT,
        HeaderValue::from_static(
            "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
        ),
    );
    headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.9"));
    headers
}

/// Pick one User-Agent from the rotation.
pub fn pick_user_agent() -> &'static str {
    let idx = rand::thread_rng().gen_range(0..DESKTOP_AGENTS.len());
    DESKTOP_AGENTS[idx]
}
