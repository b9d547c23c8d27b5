//! Integration tests for the YouTube Data API client.

use std::time::Duration;

use comment_guesser::youtube::{ApiError, VideoApi, YouTubeClient};
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client(server: &MockServer) -> YouTubeClient {
    YouTubeClient::new(&server.uri(), "test-key", Duration::from_secs(5))
        .expect("Failed to create client")
}

#[tokio::test]
async fn test_search_sends_short_video_query() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("q", "ludwig"))
        .and(query_param("key", "test-key"))
        .and(query_param("type", "video"))
        .and(query_param("videoDuration", "short"))
        .and(query_param("order", "viewCount"))
        .and(query_param("maxResults", "50"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [
                {"id": {"kind": "youtube#video", "videoId": "abc"}, "snippet": {"title": "First"}},
                {"id": {"kind": "youtube#video", "videoId": "def"}, "snippet": {"title": "Second"}}
            ]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let videos = client(&mock_server)
        .search_shorts("ludwig")
        .await
        .expect("Search should succeed");

    assert_eq!(videos.len(), 2);
    assert_eq!(videos[0].video_id, "abc");
    assert_eq!(videos[1].title, "Second");
}

#[tokio::test]
async fn test_search_with_no_items() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"kind": "youtube#searchListResponse"})))
        .mount(&mock_server)
        .await;

    let videos = client(&mock_server).search_shorts("nothing").await.unwrap();
    assert!(videos.is_empty());
}

#[tokio::test]
async fn test_top_comments_filters_unusable() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/commentThreads"))
        .and(query_param("videoId", "abc"))
        .and(query_param("order", "relevance"))
        .and(query_param("maxResults", "20"))
        .and(query_param("textFormat", "plainText"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [
                {"snippet": {"topLevelComment": {"id": "c1", "snippet": {"textDisplay": "  this is the best  ", "likeCount": 420}}}},
                {"snippet": {"topLevelComment": {"id": "c2", "snippet": {"textDisplay": "lol", "likeCount": 9000}}}},
                {"snippet": {"topLevelComment": {"id": "c3", "snippet": {"textDisplay": "   ", "likeCount": 1}}}},
                {"snippet": {"topLevelComment": {"id": "c4", "snippet": {"textDisplay": "no likes field"}}}}
            ]
        })))
        .mount(&mock_server)
        .await;

    let comments = client(&mock_server).top_comments("abc", 20).await.unwrap();

    assert_eq!(comments.len(), 2);
    assert_eq!(comments[0].id, "c1");
    assert_eq!(comments[0].text, "this is the best");
    assert_eq!(comments[0].like_count, 420);
    assert_eq!(comments[1].id, "c4");
    assert_eq!(comments[1].like_count, 0);
}

#[tokio::test]
async fn test_forbidden_comments_are_skippable() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/commentThreads"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "error": {"code": 403, "errors": [{"reason": "commentsDisabled"}]}
        })))
        .mount(&mock_server)
        .await;

    let err = client(&mock_server)
        .top_comments("abc", 20)
        .await
        .unwrap_err();

    assert!(
        matches!(err, ApiError::CommentsDisabled { ref video_id } if video_id == "abc"),
        "unexpected error: {err}"
    );
}

#[tokio::test]
async fn test_server_error_is_not_skippable() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/commentThreads"))
        .respond_with(ResponseTemplate::new(500).set_body_string("backend error"))
        .mount(&mock_server)
        .await;

    let err = client(&mock_server)
        .top_comments("abc", 20)
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::Status { status: 500, ref body } if body == "backend error"));
}
