//! YouTube Data API v3 client implementation.
//!
//! Builds one [`Query`] per call, issues a single GET and hands the JSON body
//! back untouched.

use crate::config::Config;
use crate::youtube::error::Error;
use crate::youtube::models::{ApiError, Page};
use crate::youtube::pagination::Limit;
use crate::youtube::query::Query;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;
use tracing::instrument;

/// Default base URL for the YouTube Data API.
pub const DEFAULT_BASE_URL: &str = "https://www.googleapis.com/youtube/v3/";

/// Page size used by the comment thread endpoints (API maximum).
const COMMENT_THREADS_PAGE_SIZE: u32 = 100;
/// Page size used by the playlist items endpoint (API maximum).
const PLAYLIST_ITEMS_PAGE_SIZE: u32 = 50;

/// YouTube Data API v3 client.
///
/// Holds only the API key, the base URL and the HTTP client. Parameters and
/// parts are built fresh for each call, so one client can serve concurrent
/// calls through `&self`.
#[derive(Debug, Clone)]
pub struct YouTube {
    /// HTTP client for API requests
    client: Client,
    /// API key for authentication
    api_key: Option<String>,
    /// Base URL, always ending in `/`
    base_url: String,
}

impl YouTube {
    /// Create a client with no key set and the default HTTP client.
    ///
    /// # Returns
    /// * `Result<YouTube, Error>` - New client or error if the HTTP client cannot be built
    pub fn new() -> Result<Self, Error> {
        let client = Client::builder().build()?;
        Ok(Self::with_client(client))
    }

    /// Create a client around an existing `reqwest::Client`.
    pub fn with_client(client: Client) -> Self {
        Self {
            client,
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Create a client from configuration.
    ///
    /// # Arguments
    /// * `config` - Application configuration
    ///
    /// # Details
    /// An empty `api_key` leaves the key unset; calls then fail with
    /// [`Error::MissingKey`]. A timeout is only applied when configured.
    pub fn from_config(config: &Config) -> Result<Self, Error> {
        let mut builder = Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        let mut youtube = Self::with_client(builder.build()?);
        // An empty key stays unset and calls fail with MissingKey
        if !config.api_key.is_empty() {
            youtube.set_key(config.api_key.clone());
        }
        if let Some(base_url) = &config.base_url {
            youtube = youtube.with_base_url(base_url);
        }
        Ok(youtube)
    }

    /// Set the API key sent with every request.
    pub fn set_key(&mut self, key: impl Into<String>) {
        self.api_key = Some(key.into());
    }

    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.set_key(key);
        self
    }

    /// Point the client at another API root (a proxy or a mock server).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        if !base_url.ends_with('/') {
            base_url.push('/');
        }
        self.base_url = base_url;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Start a fresh query for one call.
    ///
    /// # Returns
    /// * `Result<Query, Error>` - Empty query carrying only `key`, or
    ///   [`Error::MissingKey`] when no non-empty key is set
    pub fn query(&self) -> Result<Query, Error> {
        let key = self
            .api_key
            .as_deref()
            .filter(|k| !k.is_empty())
            .ok_or(Error::MissingKey)?;

        let mut query = Query::new();
        query.add_param("key", key);
        Ok(query)
    }

    /// Full request URL for `path` with `query`.
    pub fn url(&self, query: &Query, path: &str) -> String {
        query.url(&self.base_url, path)
    }

    /// Perform one GET and decode the JSON body.
    ///
    /// # Arguments
    /// * `url` - Fully formed request URL
    ///
    /// # Returns
    /// * `Result<Value, Error>` - Parsed body on HTTP 200
    ///
    /// # Details
    /// Transport failures come back as [`Error::Transport`]. Any other status
    /// yields [`Error::Api`] carrying the body's `error` object untouched.
    /// No retries.
    pub async fn request(&self, url: &str) -> Result<Value, Error> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if status == StatusCode::OK {
            return Ok(serde_json::from_str(&body)?);
        }

        // Keep the remote `error` object verbatim when the body has one
        let remote = serde_json::from_str::<Value>(&body)
            .ok()
            .and_then(|mut json| json.get_mut("error").map(Value::take))
            .filter(Value::is_object)
            .and_then(|raw| ApiError::deserialize(&raw).ok().map(|error| (error, raw)));

        let (error, raw) = match remote {
            Some(remote) => remote,
            None => {
                // Proxies and load balancers answer with HTML or plain text;
                // build an error object from the status line instead
                let error = ApiError {
                    code: Some(status.as_u16()),
                    message: format!(
                        "{} {}",
                        status.canonical_reason().unwrap_or("Unexpected status"),
                        body.trim()
                    )
                    .trim_end()
                    .to_string(),
                    status: None,
                    errors: Vec::new(),
                };
                let raw = serde_json::to_value(&error)?;
                (error, raw)
            }
        };
        tracing::warn!(%status, message = %error.message, "YouTube API returned an error");
        Err(Error::Api { status, error, raw })
    }

    #[instrument(skip(self, query), fields(params = %query.redacted()))]
    async fn get(&self, path: &str, query: &Query) -> Result<Value, Error> {
        tracing::debug!("requesting");
        self.request(&self.url(query, path)).await
    }

    /// Fetch one page of a list endpoint.
    pub(crate) async fn page(&self, path: &str, query: &Query) -> Result<Page, Error> {
        let body = self.get(path, query).await?;
        Ok(Page::from_body(body)?)
    }

    /// Fetch a video by ID.
    ///
    /// # Arguments
    /// * `id` - YouTube video ID (or a comma-separated list of IDs)
    ///
    /// # Returns
    /// * `Result<Value, Error>` - The `videos.list` response body
    ///
    /// # Details
    /// Requests the `snippet`, `contentDetails`, `statistics` and `status` parts.
    pub async fn video_by_id(&self, id: &str) -> Result<Value, Error> {
        let mut query = self.query()?;
        query
            .add_part("snippet")
            .add_part("contentDetails")
            .add_part("statistics")
            .add_part("status");
        query.add_param("part", query.parts()).add_param("id", id);

        self.get("videos", &query).await
    }

    /// Look up a channel by its legacy username.
    ///
    /// The `contentDetails` part carries the channel ID and the uploads and
    /// likes playlist IDs.
    pub async fn channel_by_username(&self, username: &str) -> Result<Value, Error> {
        let mut query = self.query()?;
        query.add_part("contentDetails");
        query
            .add_param("part", query.parts())
            .add_param("forUsername", username);

        self.get("channels", &query).await
    }

    /// Look up a channel by ID.
    pub async fn channel_by_id(&self, id: &str) -> Result<Value, Error> {
        let mut query = self.query()?;
        query
            .add_part("snippet")
            .add_part("contentDetails")
            .add_part("statistics");
        query.add_param("part", query.parts()).add_param("id", id);

        self.get("channels", &query).await
    }

    /// Fetch a playlist by ID.
    pub async fn playlist_by_id(&self, id: &str) -> Result<Value, Error> {
        let mut query = self.query()?;
        query
            .add_part("snippet")
            .add_part("contentDetails")
            .add_part("status")
            .add_part("player")
            .add_part("id");
        query.add_param("part", query.parts()).add_param("id", id);

        self.get("playlists", &query).await
    }

    fn playlist_items_query(&self, playlist_id: &str) -> Result<Query, Error> {
        let mut query = self.query()?;
        query
            .add_part("contentDetails")
            .add_part("id")
            .add_part("snippet")
            .add_part("status");
        query
            .add_param("part", query.parts())
            .add_param("playlistId", playlist_id)
            .add_param("maxResults", PLAYLIST_ITEMS_PAGE_SIZE);
        Ok(query)
    }

    /// Fetch a single page of a playlist's items.
    pub async fn playlist_items_page(
        &self,
        playlist_id: &str,
        page_token: Option<&str>,
    ) -> Result<Page, Error> {
        let mut query = self.playlist_items_query(playlist_id)?;
        if let Some(token) = page_token {
            query.add_param("pageToken", token);
        }
        self.page("playlistItems", &query).await
    }

    /// Fetch all items of a playlist, following continuation tokens.
    ///
    /// # Arguments
    /// * `playlist_id` - Playlist ID
    /// * `page_token` - Continuation token to start from, or `None` for the first page
    /// * `limit` - [`Limit::Unbounded`] or [`Limit::AtMost`] a number of items
    ///
    /// # Returns
    /// * `Result<Vec<Value>, Error>` - Playlist items across all fetched pages
    pub async fn playlist_items_by_id(
        &self,
        playlist_id: &str,
        page_token: Option<&str>,
        limit: Limit,
    ) -> Result<Vec<Value>, Error> {
        let query = self.playlist_items_query(playlist_id)?;
        self.collect_pages("playlistItems", query, page_token, limit)
            .await
    }

    fn comment_threads_query(&self, filter: &str, value: &str) -> Result<Query, Error> {
        let mut query = self.query()?;
        query.add_part("snippet");
        query
            .add_param("part", query.parts())
            .add_param("maxResults", COMMENT_THREADS_PAGE_SIZE)
            .add_param(filter, value);
        Ok(query)
    }

    /// Fetch a single page of a video's comment threads.
    pub async fn comment_threads_page(
        &self,
        video_id: &str,
        page_token: Option<&str>,
    ) -> Result<Page, Error> {
        let mut query = self.comment_threads_query("videoId", video_id)?;
        if let Some(token) = page_token {
            query.add_param("pageToken", token);
        }
        self.page("commentThreads", &query).await
    }

    /// Fetch all comment threads of a video, following continuation tokens.
    ///
    /// # Arguments
    /// * `video_id` - YouTube video ID
    /// * `page_token` - Continuation token to start from, or `None` for the first page
    /// * `limit` - [`Limit::Unbounded`] or [`Limit::AtMost`] a number of threads
    ///
    /// # Returns
    /// * `Result<Vec<Value>, Error>` - Comment threads across all fetched pages
    ///
    /// # Details
    /// Pages are requested 100 threads at a time. An error on any page fails
    /// the whole call.
    pub async fn comment_threads_by_video_id(
        &self,
        video_id: &str,
        page_token: Option<&str>,
        limit: Limit,
    ) -> Result<Vec<Value>, Error> {
        let query = self.comment_threads_query("videoId", video_id)?;
        self.collect_pages("commentThreads", query, page_token, limit)
            .await
    }

    /// Fetch all comment threads related to a channel, including those on
    /// its videos.
    pub async fn comment_threads_by_channel_id(
        &self,
        channel_id: &str,
        page_token: Option<&str>,
        limit: Limit,
    ) -> Result<Vec<Value>, Error> {
        let query = self.comment_threads_query("allThreadsRelatedToChannelId", channel_id)?;
        self.collect_pages("commentThreads", query, page_token, limit)
            .await
    }

    /// Fetch a comment by ID.
    pub async fn comment_by_id(&self, id: &str) -> Result<Value, Error> {
        let mut query = self.query()?;
        query.add_part("snippet");
        query.add_param("part", query.parts()).add_param("id", id);

        self.get("comments", &query).await
    }

    /// Search videos, channels and playlists.
    ///
    /// # Arguments
    /// * `q` - Search query string
    /// * `max_results` - Maximum number of results to return
    ///
    /// # Returns
    /// * `Result<Value, Error>` - The `search.list` response body
    pub async fn search(&self, q: &str, max_results: u32) -> Result<Value, Error> {
        let mut query = self.query()?;
        query.add_part("snippet");
        query
            .add_param("part", query.parts())
            .add_param("q", q)
            .add_param("maxResults", max_results);

        self.get("search", &query).await
    }

    /// Videos related to `video_id`, ordered by relevance.
    pub async fn related(&self, video_id: &str, max_results: u32) -> Result<Value, Error> {
        let mut query = self.query()?;
        query.add_part("snippet");
        query
            .add_param("part", query.parts())
            .add_param("relatedToVideoId", video_id)
            .add_param("maxResults", max_results)
            .add_param("type", "video")
            .add_param("order", "relevance");

        self.get("search", &query).await
    }
}
