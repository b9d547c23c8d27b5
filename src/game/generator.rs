//! Round generation against the video platform.
//!
//! Each attempt picks a random short and fetches its comments. Candidates that
//! cannot form a round (no videos, comments disabled, too few comments) are
//! dropped and the next attempt starts immediately. Both round kinds are bounded
//! by an attempt cap.

use std::collections::HashSet;
use std::sync::Arc;

use rand::seq::SliceRandom;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::config::Config;
use crate::constants::{
    DEFAULT_SEARCH_TERMS, GUESS_COMMENT_LIMIT, MIN_ROUND_COMMENTS, RANKING_COMMENT_LIMIT,
    RANKING_ROUND_SIZE, RANKING_SAMPLE_POOL, VIDEO_LINK_PREFIX,
};
use crate::youtube::{ApiError, Comment, VideoApi, VideoSummary};

use super::{
    GameError, GameRoundView, GuessOption, GuessTopRound, RankingOption, RankingRound,
    RankingRoundView, Round, RoundStore,
};

/// Tunables for round generation.
#[derive(Debug, Clone)]
pub struct GeneratorSettings {
    pub search_terms: Vec<String>,
    pub guess_max_attempts: u32,
    pub ranking_max_attempts: u32,
}

impl GeneratorSettings {
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self {
            search_terms: config.search_terms.clone(),
            guess_max_attempts: config.guess_max_attempts,
            ranking_max_attempts: config.ranking_max_attempts,
        }
    }
}

pub struct RoundGenerator {
    api: Arc<dyn VideoApi>,
    settings: GeneratorSettings,
    store: Arc<RoundStore>,
}

impl RoundGenerator {
    #[must_use]
    pub fn new(api: Arc<dyn VideoApi>, settings: GeneratorSettings, store: Arc<RoundStore>) -> Self {
        Self {
            api,
            settings,
            store,
        }
    }

    /// Build and store a guess-the-top-comment round.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::UpstreamExhausted`] when every attempt was skipped,
    /// or [`GameError::Upstream`] when a search or comment fetch fails outright.
    pub async fn guess_top_round(&self) -> Result<GameRoundView, GameError> {
        for attempt in 1..=self.settings.guess_max_attempts {
            let term = self.random_search_term();
            let Some(video) = self.random_short(&term).await? else {
                debug!(attempt, term = %term, "No videos found");
                continue;
            };

            debug!(attempt, video_id = %video.video_id, title = %video.title, "Trying video for guess round");

            let comments = match self.api.top_comments(&video.video_id, GUESS_COMMENT_LIMIT).await {
                Ok(comments) => comments,
                Err(ApiError::CommentsDisabled { .. }) => {
                    debug!(video_id = %video.video_id, "Comments disabled, skipping");
                    continue;
                }
                Err(e) => return Err(e.into()),
            };

            let Some((correct, options)) = pick_guess_options(comments) else {
                debug!(video_id = %video.video_id, "Not enough comments, skipping");
                continue;
            };

            let round_id = new_round_id();
            let video_link = video_link(&video.video_id);
            let view = GameRoundView {
                round_id: round_id.clone(),
                video_link: video_link.clone(),
                options: options
                    .iter()
                    .map(|c| GuessOption {
                        comment_id: c.id.clone(),
                        text: c.text.clone(),
                    })
                    .collect(),
            };

            self.store.insert(
                round_id.clone(),
                Round::GuessTop(GuessTopRound {
                    video_id: video.video_id,
                    video_link,
                    title: video.title,
                    correct_comment_id: correct,
                    options,
                }),
            );

            info!(round_id = %round_id, attempt, "Created guess round");
            return Ok(view);
        }

        warn!(
            attempts = self.settings.guess_max_attempts,
            "Gave up generating guess round"
        );
        Err(GameError::UpstreamExhausted {
            attempts: self.settings.guess_max_attempts,
        })
    }

    /// Build and store a ranking round for `theme`.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::UpstreamExhausted`] when every attempt was skipped,
    /// or [`GameError::Upstream`] when a search fails outright.
    pub async fn ranking_round(&self, theme: &str) -> Result<RankingRoundView, GameError> {
        for attempt in 1..=self.settings.ranking_max_attempts {
            let video = match self.random_short(theme).await? {
                Some(video) => video,
                None => {
                    let fallback = self.random_search_term();
                    info!(theme = %theme, fallback = %fallback, "No videos for theme, falling back");
                    match self.random_short(&fallback).await? {
                        Some(video) => video,
                        None => continue,
                    }
                }
            };

            debug!(attempt, video_id = %video.video_id, theme = %theme, "Trying video for ranking round");

            let comments = match self
                .api
                .top_comments(&video.video_id, RANKING_COMMENT_LIMIT)
                .await
            {
                Ok(comments) => comments,
                Err(e) => {
                    warn!(video_id = %video.video_id, error = %e, "Failed to fetch comments");
                    continue;
                }
            };

            let unique = dedup_by_text(comments);
            if unique.len() < MIN_ROUND_COMMENTS {
                debug!(video_id = %video.video_id, unique = unique.len(), "Not enough unique comments");
                continue;
            }

            let selected = sample_ranking_comments(&unique);
            let mut shown = selected.clone();
            shown.shuffle(&mut rand::thread_rng());

            let round_id = new_round_id();
            let video_link = video_link(&video.video_id);
            let view = RankingRoundView {
                round_id: round_id.clone(),
                video_link: video_link.clone(),
                theme: theme.to_string(),
                comments: shown
                    .into_iter()
                    .map(|c| RankingOption {
                        id: c.id,
                        text: c.text,
                    })
                    .collect(),
            };

            self.store.insert(
                round_id.clone(),
                Round::Ranking(RankingRound {
                    video_id: video.video_id,
                    video_link,
                    theme: theme.to_string(),
                    comments: selected,
                }),
            );

            info!(round_id = %round_id, attempt, theme = %theme, "Created ranking round");
            return Ok(view);
        }

        warn!(
            attempts = self.settings.ranking_max_attempts,
            theme = %theme,
            "Gave up generating ranking round"
        );
        Err(GameError::UpstreamExhausted {
            attempts: self.settings.ranking_max_attempts,
        })
    }

    fn random_search_term(&self) -> String {
        self.settings
            .search_terms
            .choose(&mut rand::thread_rng())
            .cloned()
            .unwrap_or_else(|| DEFAULT_SEARCH_TERMS[0].to_string())
    }

    async fn random_short(&self, query: &str) -> Result<Option<VideoSummary>, ApiError> {
        let videos = self.api.search_shorts(query).await?;
        Ok(videos.choose(&mut rand::thread_rng()).cloned())
    }
}

fn new_round_id() -> String {
    Uuid::new_v4().to_string()
}

fn video_link(video_id: &str) -> String {
    format!("{VIDEO_LINK_PREFIX}{video_id}")
}

/// Pick the most liked comment and a random distractor, shuffled.
///
/// Returns the correct comment id and the two options, or `None` when there are
/// too few comments.
fn pick_guess_options(mut comments: Vec<Comment>) -> Option<(String, [Comment; 2])> {
    if comments.len() < MIN_ROUND_COMMENTS {
        return None;
    }

    // Stable, so ties keep relevance order.
    comments.sort_by(|a, b| b.like_count.cmp(&a.like_count));
    let top = comments.remove(0);

    let mut rng = rand::thread_rng();
    let distractor = comments.choose(&mut rng)?.clone();
    let correct = top.id.clone();

    let mut options = [top, distractor];
    options.shuffle(&mut rng);
    Some((correct, options))
}

/// Drop comments whose exact text was already seen, keeping the first.
fn dedup_by_text(comments: Vec<Comment>) -> Vec<Comment> {
    let mut seen = HashSet::new();
    comments
        .into_iter()
        .filter(|c| seen.insert(c.text.clone()))
        .collect()
}

/// Pick the round's comments at random from the most relevant unique ones.
fn sample_ranking_comments(unique: &[Comment]) -> Vec<Comment> {
    let pool = &unique[..unique.len().min(RANKING_SAMPLE_POOL)];
    pool.choose_multiple(&mut rand::thread_rng(), RANKING_ROUND_SIZE)
        .cloned()
        .collect()
}
