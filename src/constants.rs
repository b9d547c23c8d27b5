//! Shared constants used across the application.

/// Default base URL for the YouTube Data API v3.
pub const YOUTUBE_API_BASE_URL: &str = "https://www.googleapis.com/youtube/v3";

/// Prefix turned into a playable link by appending a video id.
pub const VIDEO_LINK_PREFIX: &str = "https://www.youtube.com/watch?v=";

/// Maximum number of videos requested per search (API page limit).
pub const SEARCH_MAX_RESULTS: u32 = 50;

/// Comments requested when building a guess-the-top-comment round.
pub const GUESS_COMMENT_LIMIT: u32 = 20;

/// Comments requested when building a ranking round.
pub const RANKING_COMMENT_LIMIT: u32 = 50;

/// Minimum number of usable comments a video needs to form any round.
pub const MIN_ROUND_COMMENTS: usize = 5;

/// Comments shown in a ranking round.
pub const RANKING_ROUND_SIZE: usize = 5;

/// Ranking comments are sampled from this many of the most relevant ones.
pub const RANKING_SAMPLE_POOL: usize = 20;

/// Comments shorter than this (after trimming) are ignored.
pub const MIN_COMMENT_CHARS: usize = 5;

/// Points lost per step of positional deviation in a ranking submission.
pub const RANKING_DEVIATION_PENALTY: f64 = 8.33;

pub const DEFAULT_SEARCH_TERMS: &[&str] = &["ludwig", "jschlatt", "squeex", "sambucha"];

pub const DEFAULT_DAILY_THEMES: &[&str] = &[
    "cooking",
    "cats",
    "skateboarding",
    "magic tricks",
    "street food",
    "dogs",
    "speedrun",
    "pranks",
    "life hacks",
    "basketball",
];

pub const DEFAULT_CORS_ORIGINS: &[&str] = &[
    "http://localhost:5173",
    "http://localhost:5174",
    "http://localhost:5175",
    "http://localhost:3000",
];
