//! Async HTTP retrieval of the content document.
//!
//! One GET per load, no retry, no explicit timeout. A cache-defeating
//! query parameter (current time, millisecond precision) is appended so
//! intermediate caches never serve a stale document.

use chrono::Utc;
use url::Url;

use crate::content::SiteContent;
use crate::error::{HydrateError, HydrateResult};

/// HTTP client for content documents.
#[derive(Clone)]
pub struct ContentClient {
    client: reqwest::Client,
}

impl ContentClient {
    /// Create a new client with a bounded redirect policy.
    pub fn new() -> Self {
        let client = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::limited(5))
            .user_agent(concat!("pagefill/", env!("CARGO_PKG_VERSION")))
            .build()
            .unwrap_or_default();

        Self { client }
    }

    /// Fetch and decode a content document from `url`.
    ///
    /// A non-success status and a malformed body are distinct errors, but
    /// callers treat them alike: keep the static page as shipped.
    pub async fn fetch_content(&self, url: &str) -> HydrateResult<SiteContent> {
        let url = cache_busted(url)?;
        tracing::debug!(%url, "fetching content document");

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(HydrateError::Status {
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        let content = SiteContent::from_json(&body)?;
        Ok(content)
    }
}

impl Default for ContentClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Append the current millisecond timestamp as a key-only query parameter.
fn cache_busted(url: &str) -> HydrateResult<Url> {
    let mut url = Url::parse(url)?;
    let stamp = Utc::now().timestamp_millis().to_string();
    url.query_pairs_mut().append_key_only(&stamp);
    Ok(url)
}
