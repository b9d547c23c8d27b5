//! YouTube Data API client.
//!
//! Only two read-only calls are needed: a search for short videos and a
//! listing of a video's top-level comment threads. Both sit behind the
//! [`VideoApi`] trait so round generation can be driven by a fake in tests.

mod models;

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::debug;

pub use models::{Comment, VideoSummary};
use models::{CommentThread, CommentThreadsResponse, SearchItem, SearchResponse};

use crate::config::Config;
use crate::constants::SEARCH_MAX_RESULTS;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request to YouTube failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("YouTube returned HTTP {status}: {body}")]
    Status { status: u16, body: String },
    #[error("comments are disabled or forbidden for video {video_id}")]
    CommentsDisabled { video_id: String },
}

/// Read-only access to a short-video platform.
#[async_trait]
pub trait VideoApi: Send + Sync {
    /// Search short videos matching `query`, most viewed first.
    async fn search_shorts(&self, query: &str) -> Result<Vec<VideoSummary>, ApiError>;

    /// Fetch up to `max_results` usable top-level comments, most relevant first.
    ///
    /// Returns [`ApiError::CommentsDisabled`] when the platform refuses to list
    /// comments for the video, so callers can skip it.
    async fn top_comments(
        &self,
        video_id: &str,
        max_results: u32,
    ) -> Result<Vec<Comment>, ApiError>;
}

/// [`VideoApi`] backed by the YouTube Data API v3.
#[derive(Clone)]
pub struct YouTubeClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl YouTubeClient {
    /// Create a client for the API rooted at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(base_url: &str, api_key: &str, timeout: Duration) -> Result<Self, ApiError> {
        let client = Client::builder()
            .connect_timeout(timeout)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        })
    }

    /// Create a client from application configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn from_config(config: &Config) -> Result<Self, ApiError> {
        Self::new(
            &config.youtube_api_base_url,
            &config.youtube_api_key,
            config.http_timeout,
        )
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &[(&str, &str)],
    ) -> Result<T, ApiError> {
        let url = format!("{}/{endpoint}", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(params)
            .query(&[("key", self.api_key.as_str())])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.json().await?)
    }
}

#[async_trait]
impl VideoApi for YouTubeClient {
    async fn search_shorts(&self, query: &str) -> Result<Vec<VideoSummary>, ApiError> {
        let max_results = SEARCH_MAX_RESULTS.to_string();
        let response: SearchResponse = self
            .get_json(
                "search",
                &[
                    ("part", "snippet"),
                    ("q", query),
                    ("maxResults", max_results.as_str()),
                    ("type", "video"),
                    ("videoDuration", "short"),
                    ("order", "viewCount"),
                ],
            )
            .await?;

        let videos: Vec<VideoSummary> = response
            .items
            .into_iter()
            .filter_map(SearchItem::into_summary)
            .collect();

        debug!(query = %query, count = videos.len(), "Searched short videos");
        Ok(videos)
    }

    async fn top_comments(
        &self,
        video_id: &str,
        max_results: u32,
    ) -> Result<Vec<Comment>, ApiError> {
        let max_results = max_results.to_string();
        let result: Result<CommentThreadsResponse, ApiError> = self
            .get_json(
                "commentThreads",
                &[
                    ("part", "snippet"),
                    ("videoId", video_id),
                    ("order", "relevance"),
                    ("maxResults", max_results.as_str()),
                    ("textFormat", "plainText"),
                ],
            )
            .await;

        let response = match result {
            Ok(response) => response,
            Err(ApiError::Status { status, body }) if is_comments_disabled(status, &body) => {
                return Err(ApiError::CommentsDisabled {
                    video_id: video_id.to_string(),
                });
            }
            Err(e) => return Err(e),
        };

        let comments: Vec<Comment> = response
            .items
            .into_iter()
            .filter_map(CommentThread::into_comment)
            .collect();

        debug!(video_id = %video_id, count = comments.len(), "Fetched top comments");
        Ok(comments)
    }
}

fn is_comments_disabled(status: u16, body: &str) -> bool {
    status == StatusCode::FORBIDDEN.as_u16()
        || body.contains("commentsDisabled")
        || body.contains("disabledComments")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_comments_disabled() {
        assert!(is_comments_disabled(403, ""));
        assert!(is_comments_disabled(
            400,
            r#"{"error":{"errors":[{"reason":"commentsDisabled"}]}}"#
        ));
        assert!(is_comments_disabled(
            400,
            r#"{"error":{"message":"The video has disabledComments"}}"#
        ));
        assert!(!is_comments_disabled(404, "videoNotFound"));
        assert!(!is_comments_disabled(500, ""));
    }

    #[test]
    fn test_base_url_trailing_slash() {
        let client =
            YouTubeClient::new("http://localhost:1234/v3/", "key", Duration::from_secs(1)).unwrap();
        assert_eq!(client.base_url, "http://localhost:1234/v3");
    }
}
