// Marine Voting System - HTTP API
// JSON endpoints under /api; every response uses the success/data/message
// envelope so clients can tell a rejected vote from a transport failure

use axum::{
    extract::{ConnectInfo, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use tower_http::cors::CorsLayer;
use tracing::error;

use crate::aggregate::Aggregator;
use crate::catalog::Catalog;
use crate::error::VoteError;
use crate::ledger::{VoteLedger, VoteOutcome};
use crate::queries::QueryService;
use crate::store::Store;
use crate::voting::{VotingClock, VotingService};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    voting: VotingService,
    queries: QueryService,
}

impl AppState {
    /// Wire every component off one storage handle
    pub fn new(store: Store, timezone: Tz, leaderboard_limit: i64) -> Self {
        let catalog = Catalog::new(store.clone());
        let ledger = VoteLedger::new(store);
        let clock = VotingClock::new(timezone);
        let aggregator = Aggregator::new(catalog.clone(), ledger.clone());

        Self {
            voting: VotingService::new(catalog.clone(), ledger, clock),
            queries: QueryService::new(catalog, aggregator, clock, leaderboard_limit),
        }
    }
}

/// API Response wrapper
#[derive(Serialize)]
struct ApiResponse<T> {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
}

impl<T> ApiResponse<T> {
    fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
        }
    }

    fn fail(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            message: Some(message.into()),
        }
    }
}

#[derive(Deserialize)]
struct VoteRequest {
    #[serde(default)]
    animal_id: i64,
}

/// Vote acknowledgement: the animal voted for and its new total
#[derive(Serialize)]
struct VoteReceipt {
    animal_id: i64,
    votes: i64,
}

#[derive(Deserialize)]
struct LeaderboardParams {
    limit: Option<i64>,
}

fn error_response(err: VoteError) -> Response {
    let (status, message) = match &err {
        VoteError::NotFound(_) => (StatusCode::NOT_FOUND, err.to_string()),
        VoteError::Validation(_) => (StatusCode::BAD_REQUEST, err.to_string()),
        VoteError::Persistence(e) => {
            error!("storage failure: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal storage error".to_string(),
            )
        }
    };

    (status, Json(ApiResponse::<()>::fail(message))).into_response()
}

// ============================================================================
// API Handlers
// ============================================================================

/// GET /api/health - Health check
async fn health_check() -> impl IntoResponse {
    Json(ApiResponse::ok("OK"))
}

/// GET /api/animals - Every animal with its vote total
async fn get_animals(State(state): State<AppState>) -> impl IntoResponse {
    match state.queries.get_all_animals() {
        Ok(animals) => (StatusCode::OK, Json(ApiResponse::ok(animals))).into_response(),
        Err(e) => error_response(e),
    }
}

/// GET /api/animals/:id - One animal with votes and swim description
async fn get_animal(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> impl IntoResponse {
    match state.queries.get_animal(id) {
        Ok(detail) => (StatusCode::OK, Json(ApiResponse::ok(detail))).into_response(),
        Err(e) => error_response(e),
    }
}

/// POST /api/votes - Cast a vote; the voter identity is the client address
async fn cast_vote(
    State(state): State<AppState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    Json(req): Json<VoteRequest>,
) -> impl IntoResponse {
    let voter = addr.ip().to_string();

    match state.voting.vote(req.animal_id, &voter) {
        Ok(VoteOutcome::Accepted) => match state.queries.vote_count(req.animal_id) {
            Ok(votes) => (
                StatusCode::OK,
                Json(ApiResponse::ok(VoteReceipt {
                    animal_id: req.animal_id,
                    votes,
                })),
            )
                .into_response(),
            Err(e) => error_response(e),
        },
        Ok(VoteOutcome::AlreadyVoted) => (
            StatusCode::OK,
            Json(ApiResponse::<VoteReceipt>::fail(
                "You have already voted for this animal today",
            )),
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}

/// GET /api/leaderboard?limit=N - Ranked animals plus the grand total
async fn get_leaderboard(
    State(state): State<AppState>,
    Query(params): Query<LeaderboardParams>,
) -> impl IntoResponse {
    match state.queries.get_leaderboard(params.limit) {
        Ok(board) => (StatusCode::OK, Json(ApiResponse::ok(board))).into_response(),
        Err(e) => error_response(e),
    }
}

/// GET /api/stats - Aggregate snapshot
async fn get_stats(State(state): State<AppState>) -> impl IntoResponse {
    match state.queries.get_statistics() {
        Ok(stats) => (StatusCode::OK, Json(ApiResponse::ok(stats))).into_response(),
        Err(e) => error_response(e),
    }
}

// ============================================================================
// Router
// ============================================================================

pub fn router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/health", get(health_check))
        .route("/animals", get(get_animals))
        .route("/animals/:id", get(get_animal))
        .route("/votes", post(cast_vote))
        .route("/leaderboard", get(get_leaderboard))
        .route("/stats", get(get_stats))
        .with_state(state);

    Router::new()
        .nest("/api", api_routes)
        .layer(CorsLayer::permissive())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ok_envelope_shape() {
        let value = serde_json::to_value(ApiResponse::ok(42)).unwrap();

        assert_eq!(value["success"], true);
        assert_eq!(value["data"], 42);
        assert!(value.get("message").is_none());
    }

    #[test]
    fn test_fail_envelope_shape() {
        let value =
            serde_json::to_value(ApiResponse::<()>::fail("You have already voted for this animal today"))
                .unwrap();

        assert_eq!(value["success"], false);
        assert_eq!(value["message"], "You have already voted for this animal today");
        assert!(value.get("data").is_none());
    }

    #[test]
    fn test_vote_request_defaults_missing_id() {
        let req: VoteRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(req.animal_id, 0, "Missing id is rejected later as invalid");
    }
}
