//! Round lifecycle: generation, storage and one-shot evaluation.
//!
//! A round is created by [`RoundGenerator`], parked in the [`RoundStore`]
//! until exactly one submission arrives, and removed when that submission is
//! evaluated (or when the store evicts it).

mod generator;
mod scoring;
mod store;

use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;
use tracing::info;

pub use generator::{GeneratorSettings, RoundGenerator};
pub use scoring::{evaluate_guess, evaluate_ranking, ranking_score};
pub use store::RoundStore;

use crate::config::Config;
use crate::theme::ThemeRotation;
use crate::youtube::{ApiError, Comment, VideoApi};

#[derive(Debug, Error)]
pub enum GameError {
    #[error("Round not found or has expired.")]
    RoundNotFound,
    #[error(transparent)]
    InvalidGuess(#[from] InvalidGuess),
    #[error("failed to find a usable video after {attempts} attempts")]
    UpstreamExhausted { attempts: u32 },
    #[error(transparent)]
    Upstream(#[from] ApiError),
}

/// Why a submission was rejected without consuming the round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InvalidGuess {
    #[error("This round is a ranking round, use submit-rank instead.")]
    RankingRound,
    #[error("This round is not a ranking round.")]
    NotRankingRound,
    #[error("Selected comment is not part of this round.")]
    NotPartOfRound,
}

/// Pick which of two comments has more likes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuessTopRound {
    pub video_id: String,
    pub video_link: String,
    pub title: String,
    pub correct_comment_id: String,
    /// Shown in this order.
    pub options: [Comment; 2],
}

/// Order five comments by like count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankingRound {
    pub video_id: String,
    pub video_link: String,
    pub theme: String,
    pub comments: Vec<Comment>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Round {
    GuessTop(GuessTopRound),
    Ranking(RankingRound),
}

// ========== Wire types ==========

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GuessOption {
    pub comment_id: String,
    pub text: String,
}

/// `GET /api/get-game-round` response.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameRoundView {
    pub round_id: String,
    pub video_link: String,
    pub options: Vec<GuessOption>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RevealedOption {
    pub comment_id: String,
    pub text: String,
    pub likes: u64,
    pub is_correct: bool,
}

/// `POST /api/submit-guess` response.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GuessResult {
    pub is_correct: bool,
    pub selected_option_id: String,
    /// Sorted by likes, highest first.
    pub options: Vec<RevealedOption>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RankingOption {
    pub id: String,
    pub text: String,
}

/// `GET /api/daily-challenge` response.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankingRoundView {
    pub round_id: String,
    pub video_link: String,
    pub theme: String,
    pub comments: Vec<RankingOption>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RankedComment {
    pub id: String,
    pub text: String,
    pub likes: u64,
}

/// `POST /api/submit-rank` response.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankingResult {
    pub score: u32,
    pub user_ranking: Vec<String>,
    pub correct_ranking: Vec<RankedComment>,
}

// ========== Service ==========

/// Entry point used by the HTTP layer.
pub struct Game {
    generator: RoundGenerator,
    store: Arc<RoundStore>,
    themes: ThemeRotation,
}

impl Game {
    #[must_use]
    pub fn new(
        api: Arc<dyn VideoApi>,
        settings: GeneratorSettings,
        store: Arc<RoundStore>,
        themes: ThemeRotation,
    ) -> Self {
        Self {
            generator: RoundGenerator::new(api, settings, Arc::clone(&store)),
            store,
            themes,
        }
    }

    #[must_use]
    pub fn from_config(config: &Config, api: Arc<dyn VideoApi>) -> Self {
        Self::new(
            api,
            GeneratorSettings::from_config(config),
            Arc::new(RoundStore::new(config.round_cache_capacity, config.round_ttl)),
            ThemeRotation::new(config.daily_themes.clone()),
        )
    }

    /// Create a new guess-the-top-comment round.
    ///
    /// # Errors
    ///
    /// Returns an error if no usable video was found or YouTube failed.
    pub async fn new_guess_round(&self) -> Result<GameRoundView, GameError> {
        self.generator.guess_top_round().await
    }

    /// Create a ranking round for today's theme.
    ///
    /// # Errors
    ///
    /// Returns an error if no usable video was found or YouTube failed.
    pub async fn daily_challenge(&self) -> Result<RankingRoundView, GameError> {
        let theme = self.themes.today();
        info!(theme = %theme, "Generating daily challenge");
        self.generator.ranking_round(theme).await
    }

    /// Evaluate a guess and consume the round.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::RoundNotFound`] or [`GameError::InvalidGuess`].
    pub fn submit_guess(&self, round_id: &str, comment_id: &str) -> Result<GuessResult, GameError> {
        let result = self
            .store
            .consume(round_id, |round| evaluate_guess(round, comment_id))?;
        info!(round_id = %round_id, is_correct = result.is_correct, "Guess evaluated");
        Ok(result)
    }

    /// Score a ranking and consume the round.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::RoundNotFound`] or [`GameError::InvalidGuess`].
    pub fn submit_ranking(
        &self,
        round_id: &str,
        user_ranking: Vec<String>,
    ) -> Result<RankingResult, GameError> {
        let result = self
            .store
            .consume(round_id, |round| evaluate_ranking(round, &user_ranking))?;
        info!(round_id = %round_id, score = result.score, "Ranking evaluated");
        Ok(result)
    }
}
