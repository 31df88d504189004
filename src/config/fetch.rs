//! Single-attempt configuration fetch (wasm32 only).

use gloo_net::http::Request;

use super::ConfigStore;
use crate::error::{Result, ViewerError};
use crate::regions::RegionRegistry;

/// GET the configuration document as text. No retry, no timeout.
async fn fetch_text(url: &str) -> Result<String> {
    let resp = Request::get(url)
        .send()
        .await
        .map_err(|e| ViewerError::Fetch(e.to_string()))?;
    if !resp.ok() {
        return Err(ViewerError::HttpStatus {
            status: resp.status(),
            url: url.to_string(),
        });
    }
    resp.text()
        .await
        .map_err(|e| ViewerError::Fetch(e.to_string()))
}

impl ConfigStore {
    /// Fetch, parse and patch the configuration, falling back to placeholders.
    pub async fn load(url: &str, registry: RegionRegistry<'static>) -> ConfigStore {
        log::debug!("fetching configuration from {url}");
        Self::resolve(fetch_text(url).await, &registry)
    }
}
