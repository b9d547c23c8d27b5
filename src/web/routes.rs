use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::Json;
use axum::Router;
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::AppState;
use crate::game::GameError;

/// Create the router with all routes.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(root))
        .route("/healthz", get(health))
        .route("/api/get-game-round", get(get_game_round))
        .route("/api/submit-guess", post(submit_guess))
        .route("/api/daily-challenge", get(daily_challenge))
        .route("/api/submit-rank", post(submit_rank))
}

/// JSON error body: `{"detail": "..."}`.
#[derive(Debug, Serialize)]
struct ErrorBody {
    detail: String,
}

fn error_response(status: StatusCode, detail: impl Into<String>) -> Response {
    (
        status,
        Json(ErrorBody {
            detail: detail.into(),
        }),
    )
        .into_response()
}

/// Malformed or incomplete request bodies, answered in the same JSON shape.
fn rejection_response(rejection: &JsonRejection) -> Response {
    error_response(rejection.status(), rejection.body_text())
}

/// Map a submission error to its HTTP status.
fn submission_error(err: &GameError) -> Response {
    match err {
        GameError::RoundNotFound => error_response(StatusCode::NOT_FOUND, err.to_string()),
        GameError::InvalidGuess(_) => error_response(StatusCode::BAD_REQUEST, err.to_string()),
        _ => {
            tracing::error!("Unexpected submission error: {err}");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
        }
    }
}

async fn root() -> Json<serde_json::Value> {
    Json(json!({ "Hello": "From the CommentGuesser API" }))
}

async fn health() -> &'static str {
    "OK"
}

async fn get_game_round(State(state): State<AppState>) -> Response {
    match state.game.new_guess_round().await {
        Ok(round) => Json(round).into_response(),
        Err(e) => {
            tracing::error!("Failed to generate game round: {e}");
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to generate game round.",
            )
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuessPayload {
    round_id: String,
    comment_id: String,
}

async fn submit_guess(
    State(state): State<AppState>,
    payload: Result<Json<GuessPayload>, JsonRejection>,
) -> Response {
    let Json(payload) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return rejection_response(&rejection),
    };

    match state.game.submit_guess(&payload.round_id, &payload.comment_id) {
        Ok(result) => Json(result).into_response(),
        Err(e) => submission_error(&e),
    }
}

async fn daily_challenge(State(state): State<AppState>) -> Response {
    match state.game.daily_challenge().await {
        Ok(round) => Json(round).into_response(),
        Err(e) => {
            tracing::error!("Error getting daily challenge: {e}");
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to generate daily challenge.",
            )
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankingPayload {
    round_id: String,
    /// Comment ids, most liked first.
    user_ranking: Vec<String>,
}

async fn submit_rank(
    State(state): State<AppState>,
    payload: Result<Json<RankingPayload>, JsonRejection>,
) -> Response {
    let Json(payload) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return rejection_response(&rejection),
    };

    match state
        .game
        .submit_ranking(&payload.round_id, payload.user_ranking)
    {
        Ok(result) => Json(result).into_response(),
        Err(e) => submission_error(&e),
    }
}
