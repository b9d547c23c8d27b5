//! YouTube Data API payloads and the domain values extracted from them.

use serde::Deserialize;

use crate::constants::MIN_COMMENT_CHARS;

/// A short video returned by a search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoSummary {
    pub video_id: String,
    pub title: String,
}

/// A usable top-level comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub id: String,
    pub text: String,
    pub like_count: u64,
}

impl Comment {
    /// Build a comment from raw API fields, dropping ones too short or without an id.
    pub fn from_raw(id: Option<String>, text: &str, like_count: u64) -> Option<Self> {
        let id = id.filter(|id| !id.is_empty())?;
        let text = text.trim();
        if text.is_empty() || text.chars().count() < MIN_COMMENT_CHARS {
            return None;
        }
        Some(Self {
            id,
            text: text.to_string(),
            like_count,
        })
    }
}

/// `GET /search` response.
#[derive(Debug, Deserialize)]
pub(crate) struct SearchResponse {
    #[serde(default)]
    pub items: Vec<SearchItem>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SearchItem {
    pub id: SearchItemId,
    #[serde(default)]
    pub snippet: Option<SearchSnippet>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SearchItemId {
    #[serde(default)]
    pub video_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SearchSnippet {
    #[serde(default)]
    pub title: String,
}

impl SearchItem {
    pub fn into_summary(self) -> Option<VideoSummary> {
        let video_id = self.id.video_id.filter(|id| !id.is_empty())?;
        Some(VideoSummary {
            video_id,
            title: self.snippet.map(|s| s.title).unwrap_or_default(),
        })
    }
}

/// `GET /commentThreads` response.
#[derive(Debug, Deserialize)]
pub(crate) struct CommentThreadsResponse {
    #[serde(default)]
    pub items: Vec<CommentThread>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CommentThread {
    pub snippet: CommentThreadSnippet,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CommentThreadSnippet {
    pub top_level_comment: TopLevelComment,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TopLevelComment {
    #[serde(default)]
    pub id: Option<String>,
    pub snippet: TopLevelCommentSnippet,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct TopLevelCommentSnippet {
    #[serde(default)]
    pub text_display: String,
    #[serde(default)]
    pub like_count: u64,
}

impl CommentThread {
    pub fn into_comment(self) -> Option<Comment> {
        let top = self.snippet.top_level_comment;
        Comment::from_raw(top.id, &top.snippet.text_display, top.snippet.like_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_comment_filter() {
        assert!(Comment::from_raw(Some("c1".into()), "  lol  ", 3).is_none());
        assert!(Comment::from_raw(None, "a perfectly fine comment", 3).is_none());
        assert!(Comment::from_raw(Some(String::new()), "a perfectly fine comment", 3).is_none());

        let comment = Comment::from_raw(Some("c1".into()), "  first!!  ", 7).unwrap();
        assert_eq!(comment.text, "first!!");
        assert_eq!(comment.like_count, 7);
    }

    #[test]
    fn test_parse_comment_threads() {
        let json = r#"{
            "items": [
                {"snippet": {"topLevelComment": {"id": "a", "snippet": {"textDisplay": "this is great", "likeCount": 12}}}},
                {"snippet": {"topLevelComment": {"id": "b", "snippet": {"textDisplay": "ok"}}}},
                {"snippet": {"topLevelComment": {"snippet": {"textDisplay": "missing id here"}}}}
            ]
        }"#;
        let parsed: CommentThreadsResponse = serde_json::from_str(json).unwrap();
        let comments: Vec<Comment> = parsed
            .items
            .into_iter()
            .filter_map(CommentThread::into_comment)
            .collect();

        assert_eq!(comments.len(), 1);
        assert_eq!(comments[0].id, "a");
        assert_eq!(comments[0].like_count, 12);
    }

    #[test]
    fn test_parse_search_skips_non_videos() {
        let json = r#"{
            "items": [
                {"id": {"kind": "youtube#video", "videoId": "vid1"}, "snippet": {"title": "Short one"}},
                {"id": {"kind": "youtube#channel", "channelId": "chan"}, "snippet": {"title": "Channel"}}
            ]
        }"#;
        let parsed: SearchResponse = serde_json::from_str(json).unwrap();
        let videos: Vec<VideoSummary> = parsed
            .items
            .into_iter()
            .filter_map(SearchItem::into_summary)
            .collect();

        assert_eq!(
            videos,
            vec![VideoSummary {
                video_id: "vid1".into(),
                title: "Short one".into()
            }]
        );
    }
}
