//! Evaluation of guesses and rankings against a stored round.

use crate::constants::RANKING_DEVIATION_PENALTY;
use crate::youtube::Comment;

use super::{
    GameError, GuessResult, InvalidGuess, RankedComment, RankingResult, RevealedOption, Round,
};

/// Check a guess against a guess-the-top-comment round.
///
/// # Errors
///
/// Returns [`InvalidGuess`] if the round is a ranking round or the comment is
/// not one of its two options.
pub fn evaluate_guess(round: &Round, comment_id: &str) -> Result<GuessResult, GameError> {
    let Round::GuessTop(round) = round else {
        return Err(InvalidGuess::RankingRound.into());
    };

    if !round.options.iter().any(|option| option.id == comment_id) {
        return Err(InvalidGuess::NotPartOfRound.into());
    }

    let mut options: Vec<RevealedOption> = round
        .options
        .iter()
        .map(|option| RevealedOption {
            comment_id: option.id.clone(),
            text: option.text.clone(),
            likes: option.like_count,
            is_correct: option.id == round.correct_comment_id,
        })
        .collect();
    options.sort_by(|a, b| b.likes.cmp(&a.likes));

    Ok(GuessResult {
        is_correct: comment_id == round.correct_comment_id,
        selected_option_id: comment_id.to_string(),
        options,
    })
}

/// Score a submitted ordering (most liked first) against a ranking round.
///
/// Ids that are not part of the round contribute no deviation.
///
/// # Errors
///
/// Returns [`InvalidGuess::NotRankingRound`] for guess rounds.
pub fn evaluate_ranking(round: &Round, user_ranking: &[String]) -> Result<RankingResult, GameError> {
    let Round::Ranking(round) = round else {
        return Err(InvalidGuess::NotRankingRound.into());
    };

    let correct = sorted_by_likes(&round.comments);

    let total_deviation: usize = user_ranking
        .iter()
        .enumerate()
        .filter_map(|(predicted, id)| {
            correct
                .iter()
                .position(|c| &c.id == id)
                .map(|actual| predicted.abs_diff(actual))
        })
        .sum();

    Ok(RankingResult {
        score: ranking_score(total_deviation),
        user_ranking: user_ranking.to_vec(),
        correct_ranking: correct
            .into_iter()
            .map(|c| RankedComment {
                id: c.id.clone(),
                text: c.text.clone(),
                likes: c.like_count,
            })
            .collect(),
    })
}

/// `max(0, 100 - deviation * 8.33)`, floored.
#[must_use]
pub fn ranking_score(total_deviation: usize) -> u32 {
    let score = RANKING_DEVIATION_PENALTY.mul_add(-(total_deviation as f64), 100.0);
    score.max(0.0).floor() as u32
}

/// Comments ordered by like count, highest first; ties keep relevance order.
fn sorted_by_likes(comments: &[Comment]) -> Vec<&Comment> {
    let mut sorted: Vec<&Comment> = comments.iter().collect();
    sorted.sort_by(|a, b| b.like_count.cmp(&a.like_count));
    sorted
}
