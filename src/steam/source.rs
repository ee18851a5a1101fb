// src/steam/source.rs
// =============================================================================
// This module fetches raw page content over HTTP.
//
// Key pieces:
// - PageSource: a small trait that abstracts "give me the content at this
//   address". The detection engine only ever talks to this trait, which is
//   what lets our tests drive it with an in-memory fake instead of the
//   real network.
// - HttpPageSource: the real implementation, backed by a reqwest Client
//   with a request timeout.
// - URL derivation helpers: turning a steamid into its canonical profile
//   URL, and making sure a profile URL points at its /friends page.
//
// Rust concepts:
// - Traits: Interfaces that multiple types can implement
// - async-trait: Allows async fn inside trait definitions
// - Result<T, E>: For error handling
// =============================================================================

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use url::Url;

// Anything that can resolve an address to raw page content
//
// The Sync supertrait is required because the generated async methods
// capture &self across await points.
//
// Contract notes:
// - A transport failure (timeout, DNS, non-2xx status) is an Err.
// - A page that exists but contains none of the patterns we look for is
//   NOT an error: it comes back as ordinary content and the extractors
//   simply find nothing in it.
#[async_trait]
pub trait PageSource: Sync {
    /// Fetches the content at `url`, or fails with a transport error
    async fn fetch(&self, url: &str) -> Result<String>;
}

// The production PageSource: plain HTTP GET via reqwest
pub struct HttpPageSource {
    client: Client,
}

impl HttpPageSource {
    // Builds the source with a shared client
    //
    // The client owns the only timeout in the system: the detection engine
    // itself never imposes one, so a stalled request stalls the traversal
    // until this timeout fires.
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl PageSource for HttpPageSource {
    async fn fetch(&self, url: &str) -> Result<String> {
        // Validate early so a malformed address fails with a clear message
        // instead of a confusing transport error
        Url::parse(url).map_err(|e| anyhow!("Invalid URL '{}': {}", url, e))?;

        let response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            return Err(anyhow!(
                "Failed to fetch {}: HTTP {}",
                url,
                response.status()
            ));
        }

        let content = response.text().await?;
        Ok(content)
    }
}

// Builds the canonical profile URL for a steamid
//
// Example:
//   "76561197960435530" -> "https://steamcommunity.com/profiles/76561197960435530"
pub fn profile_url(steam_id: &str) -> String {
    format!("https://steamcommunity.com/profiles/{}", steam_id)
}

// Ensures a profile URL points at its friends page
//
// Steam serves the friend list on a '/friends' sub-page. Users paste plain
// profile URLs, so we append the suffix when it's missing.
//
// Examples:
//   "https://steamcommunity.com/id/gabe"         -> ".../id/gabe/friends"
//   "https://steamcommunity.com/id/gabe/"        -> ".../id/gabe/friends"
//   "https://steamcommunity.com/id/gabe/friends" -> unchanged
pub fn friends_page_url(url: &str) -> String {
    if url.contains("friends") {
        url.to_string()
    } else if url.ends_with('/') {
        format!("{}friends", url)
    } else {
        format!("{}/friends", url)
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why a trait for fetching?
//    - The engine's behavior depends on what each fetch returns
//    - With a trait, tests can script exact outcomes (content, failure)
//      without touching the network
//    - Only HttpPageSource knows about reqwest; everything else just
//      sees "address in, content out"
//
// 2. What does #[async_trait] do?
//    - Stable Rust (at this edition) can't put async fn in traits directly
//      when you need object-safe, Send futures
//    - The macro rewrites async fn into a method returning a boxed future
//    - Both the trait and every impl need the attribute
//
// 3. Why validate the URL before sending?
//    - reqwest would reject it anyway, but later and with a vaguer error
//    - Url::parse gives us a precise "Invalid URL" message up front
//
// 4. Why is the timeout on the client and not per request?
//    - Client::builder().timeout() applies to every request made through
//      the client, so there's one policy in one place
// -----------------------------------------------------------------------------
