use std::sync::Arc;

use axum::Json;
use axum::extract::{Query, State};
use companion_core::personalization::{user_difficulty, user_recommendations, user_skill_level};
use companion_core::{AdaptiveDifficulty, SkillLevel};
use serde_json::{Value, json};

use super::UserQuery;
use crate::error::ApiError;
use crate::state::AppState;

/// GET /api/personalization/skill-level
pub async fn skill_level(
    State(state): State<Arc<AppState>>,
    Query(query): Query<UserQuery>,
) -> Result<Json<SkillLevel>, ApiError> {
    let skill = user_skill_level(state.progress.as_ref(), query.user_id())
        .await
        .map_err(state.fail("Failed to get skill level"))?;
    tracing::debug!(user_id = query.user_id(), level = ?skill.level, "Assessed skill level");
    Ok(Json(skill))
}

/// GET /api/personalization/difficulty
pub async fn difficulty(
    State(state): State<Arc<AppState>>,
    Query(query): Query<UserQuery>,
) -> Result<Json<AdaptiveDifficulty>, ApiError> {
    let difficulty = user_difficulty(state.progress.as_ref(), query.user_id())
        .await
        .map_err(state.fail("Failed to get difficulty"))?;
    Ok(Json(difficulty))
}

/// GET /api/personalization/recommendations
pub async fn recommendations(
    State(state): State<Arc<AppState>>,
    Query(query): Query<UserQuery>,
) -> Result<Json<Value>, ApiError> {
    let recommendations = user_recommendations(state.progress.as_ref(), query.user_id())
        .await
        .map_err(state.fail("Failed to get recommendations"))?;
    Ok(Json(json!({ "recommendations": recommendations })))
}
