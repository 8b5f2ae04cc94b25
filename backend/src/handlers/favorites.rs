use crate::AppState;
use crate::dbs::DbError;
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use shared::models::{FavoriteAck, Hero, HeroId};

pub async fn list_favorites(
    State(state): State<AppState>,
    Path(client_id): Path<String>,
) -> Result<Json<Vec<Hero>>, StatusCode> {
    let heroes = state.db.list_favorites(&client_id).await.map_err(|e| {
        tracing::error!("Failed to list favorites: {:?}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;
    Ok(Json(heroes))
}

pub async fn add_favorite(
    State(state): State<AppState>,
    Path((client_id, hero_id)): Path<(String, HeroId)>,
) -> Result<Json<FavoriteAck>, StatusCode> {
    let status = state
        .db
        .add_favorite(&client_id, hero_id)
        .await
        .map_err(|e| {
            if matches!(e, DbError::NotFound(_)) {
                StatusCode::NOT_FOUND
            } else {
                tracing::error!("Failed to add favorite: {:?}", e);
                StatusCode::INTERNAL_SERVER_ERROR
            }
        })?;
    tracing::debug!("Favorite {} for {}: {:?}", hero_id, client_id, status);
    Ok(Json(FavoriteAck::new(status)))
}

pub async fn remove_favorite(
    State(state): State<AppState>,
    Path((client_id, hero_id)): Path<(String, HeroId)>,
) -> Result<Json<FavoriteAck>, StatusCode> {
    let status = state
        .db
        .remove_favorite(&client_id, hero_id)
        .await
        .map_err(|e| {
            tracing::error!("Failed to remove favorite: {:?}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        })?;
    Ok(Json(FavoriteAck::new(status)))
}
