use crate::AppState;
use crate::recommend::{TeamError, recommend};
use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
};
use shared::models::{TeamParams, TeamRecommendation};

pub async fn recommend_team(
    State(state): State<AppState>,
    Query(params): Query<TeamParams>,
) -> Result<Json<TeamRecommendation>, StatusCode> {
    let heroes = state.db.all_heroes().await.map_err(|e| {
        tracing::error!("Failed to load heroes for team: {:?}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    let team = recommend(&heroes, &params, &mut rand::thread_rng()).map_err(|e| {
        tracing::debug!("Rejected team request: {}", e);
        match e {
            TeamError::NoHeroes => StatusCode::NOT_FOUND,
            _ => StatusCode::BAD_REQUEST,
        }
    })?;
    Ok(Json(team))
}
