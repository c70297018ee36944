//! Listing requests against the forum JSON API.
//!
//! A listing is one page of posts shaped as
//! `{ "data": { "children": [ { "data": { "title": .., "url": .. } } ] } }`.
//! The `random` listing instead answers with an array of listings (the post,
//! then its comments); the first one is used.

use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, instrument};

use crate::config::Config;
use crate::download::{DownloadError, Fetch};

/// One post from a listing. Fields other than these are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ListingItem {
    /// Post title, the source of the resolution heuristic.
    pub title: String,
    /// Link target; an image URL for image posts.
    pub url: String,
}

#[derive(Debug, Deserialize)]
struct Listing {
    data: ListingData,
}

#[derive(Debug, Deserialize)]
struct ListingData {
    children: Vec<ListingChild>,
}

#[derive(Debug, Deserialize)]
struct ListingChild {
    data: ListingItem,
}

/// Errors from fetching or decoding a listing. Both are fatal for a run.
#[derive(Debug, Error)]
pub enum ListingError {
    /// The request itself failed.
    #[error(transparent)]
    Request(#[from] DownloadError),

    /// The JSON document does not have the listing shape.
    #[error("unexpected listing format from {url}: {reason}")]
    Schema {
        /// Listing URL.
        url: String,
        /// What was missing or mistyped.
        reason: String,
    },
}

impl ListingError {
    /// Creates a schema error.
    pub fn schema(url: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Schema {
            url: url.into(),
            reason: reason.into(),
        }
    }
}

/// Builds `<base>/r/<subreddit>/<listing>.json[?params]` for `config`.
///
/// Extra parameters are joined with `&` verbatim, without re-encoding.
#[must_use]
pub fn listing_url(config: &Config) -> String {
    let base = config.base_url.trim_end_matches('/');
    let mut url = format!("{base}/r/{}/{}.json", config.subreddit, config.listing);
    if !config.params.is_empty() {
        url.push('?');
        url.push_str(&config.params.join("&"));
    }
    url
}

/// Extracts listing items from a decoded JSON document.
///
/// # Errors
///
/// Returns [`ListingError::Schema`] when the document lacks the listing shape.
pub fn parse_listing(url: &str, document: serde_json::Value) -> Result<Vec<ListingItem>, ListingError> {
    let listing = match document {
        serde_json::Value::Array(listings) => listings
            .into_iter()
            .next()
            .ok_or_else(|| ListingError::schema(url, "empty array of listings"))?,
        other => other,
    };

    let listing: Listing =
        serde_json::from_value(listing).map_err(|e| ListingError::schema(url, e.to_string()))?;

    Ok(listing
        .data
        .children
        .into_iter()
        .map(|child| child.data)
        .collect())
}

/// Fetches listings through a [`Fetch`] implementation.
pub struct ListingFetcher<'a> {
    fetcher: &'a dyn Fetch,
}

impl<'a> ListingFetcher<'a> {
    /// Creates a listing fetcher.
    pub fn new(fetcher: &'a dyn Fetch) -> Self {
        Self { fetcher }
    }

    /// Fetches the listing selected by `config`, in listing order.
    ///
    /// # Errors
    ///
    /// [`ListingError::Request`] when the request fails,
    /// [`ListingError::Schema`] when the body is not a listing.
    #[instrument(skip_all, fields(listing = %config.listing))]
    pub async fn fetch_listing(&self, config: &Config) -> Result<Vec<ListingItem>, ListingError> {
        let url = listing_url(config);
        debug!(url = %url, "requesting listing");
        let document = self.fetcher.fetch_json(&url).await?;
        let items = parse_listing(&url, document)?;
        debug!(items = items.len(), "listing decoded");
        Ok(items)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    use std::path::Path;
    use std::sync::Mutex;

    use async_trait::async_trait;
    use serde_json::json;

    use crate::config::ListingKind;

    struct CannedFetcher {
        response: Mutex<Option<Result<serde_json::Value, DownloadError>>>,
        requested: Mutex<Vec<String>>,
    }

    impl CannedFetcher {
        fn new(response: Result<serde_json::Value, DownloadError>) -> Self {
            Self {
                response: Mutex::new(Some(response)),
                requested: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl Fetch for CannedFetcher {
        async fn fetch_json(&self, url: &str) -> Result<serde_json::Value, DownloadError> {
            self.requested.lock().unwrap().push(url.to_string());
            self.response.lock().unwrap().take().unwrap()
        }

        async fn download(
            &self,
            url: &str,
            _destination: &Path,
            _on_progress: &mut (dyn FnMut(u64, Option<u64>) + Send),
        ) -> Result<u64, DownloadError> {
            Err(DownloadError::invalid_url(url))
        }
    }

    fn listing_json() -> serde_json::Value {
        json!({
            "kind": "Listing",
            "data": {
                "after": "t3_abc",
                "children": [
                    {"kind": "t3", "data": {"title": "Sunset over hills [1920x1080]", "url": "https://i.example.com/sunset.jpg", "score": 42}},
                    {"kind": "t3", "data": {"title": "Pretty flower", "url": "https://i.example.com/flower.png"}}
                ]
            }
        })
    }

    #[test]
    fn test_listing_url_defaults() {
        assert_eq!(
            listing_url(&Config::default()),
            "http://www.reddit.com/r/EarthPorn/top.json"
        );
    }

    #[test]
    fn test_listing_url_with_params_and_trailing_slash() {
        let config = Config {
            base_url: "https://forum.example/".to_string(),
            subreddit: "SkyPorn".to_string(),
            listing: ListingKind::New,
            params: vec!["limit=10".to_string(), "t=week".to_string()],
            ..Config::default()
        };
        assert_eq!(
            listing_url(&config),
            "https://forum.example/r/SkyPorn/new.json?limit=10&t=week"
        );
    }

    #[test]
    fn test_parse_listing_keeps_order_and_ignores_extra_fields() {
        let items = parse_listing("u", listing_json()).unwrap();
        assert_eq!(
            items,
            vec![
                ListingItem {
                    title: "Sunset over hills [1920x1080]".to_string(),
                    url: "https://i.example.com/sunset.jpg".to_string(),
                },
                ListingItem {
                    title: "Pretty flower".to_string(),
                    url: "https://i.example.com/flower.png".to_string(),
                },
            ]
        );
    }

    #[test]
    fn test_parse_listing_accepts_random_array_form() {
        let comments = json!({"kind": "Listing", "data": {"children": [{"kind": "t1", "data": {"body": "nice"}}]}});
        let items = parse_listing("u", json!([listing_json(), comments])).unwrap();
        assert_eq!(items.len(), 2);
    }

    #[test]
    fn test_parse_listing_empty_children() {
        let items = parse_listing("u", json!({"data": {"children": []}})).unwrap();
        assert!(items.is_empty());
    }

    #[test]
    fn test_parse_listing_schema_errors() {
        for document in [
            json!({"error": 404}),
            json!({"data": {}}),
            json!({"data": {"children": [{"data": {"title": "no url"}}]}}),
            json!([]),
            json!("listing"),
        ] {
            let result = parse_listing("https://forum.example/r/x/top.json", document.clone());
            match result {
                Err(ListingError::Schema { url, .. }) => {
                    assert_eq!(url, "https://forum.example/r/x/top.json");
                }
                other => panic!("Expected Schema error for {document}, got: {other:?}"),
            }
        }
    }

    #[tokio::test]
    async fn test_fetch_listing_requests_built_url() {
        let fetcher = CannedFetcher::new(Ok(listing_json()));
        let config = Config {
            listing: ListingKind::Hot,
            params: vec!["limit=2".to_string()],
            ..Config::default()
        };

        let items = ListingFetcher::new(&fetcher)
            .fetch_listing(&config)
            .await
            .unwrap();

        assert_eq!(items.len(), 2);
        assert_eq!(
            fetcher.requested.lock().unwrap().as_slice(),
            ["http://www.reddit.com/r/EarthPorn/hot.json?limit=2"]
        );
    }

    #[tokio::test]
    async fn test_fetch_listing_propagates_request_error() {
        let fetcher = CannedFetcher::new(Err(DownloadError::http_status("u", 404)));

        let result = ListingFetcher::new(&fetcher)
            .fetch_listing(&Config::default())
            .await;

        match result {
            Err(ListingError::Request(error)) => assert_eq!(error.status(), Some(404)),
            other => panic!("Expected Request error, got: {other:?}"),
        }
    }
}
