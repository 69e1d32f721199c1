use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::{auth::AuthenticatedUser, AppState};

#[derive(Debug, Serialize, Deserialize)]
pub struct ScoreSummary {
    pub user_id: i64,
    pub current_score: u32,
    pub high_score: u32,
}

/// Current and best maze score for the calling user
pub async fn my_scores(
    user: AuthenticatedUser,
    State(state): State<Arc<AppState>>,
) -> Json<ScoreSummary> {
    let record = state.scores.get(user.user_id).unwrap_or_default();

    Json(ScoreSummary {
        user_id: user.user_id,
        current_score: record.current,
        high_score: record.high,
    })
}
