use crate::AppState;
use crate::dbs::DbError;
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;
use shared::models::{Hero, HeroId};

pub const DEFAULT_PAGE_SIZE: usize = 50;
pub const MAX_PAGE_SIZE: usize = 200;

#[derive(Deserialize, Default)]
pub struct HeroListParams {
    pub search: Option<String>,
    pub limit: Option<usize>,
    pub offset: Option<usize>,
}

pub async fn list_heroes(
    State(state): State<AppState>,
    Query(params): Query<HeroListParams>,
) -> Result<Json<Vec<Hero>>, StatusCode> {
    let limit = params.limit.unwrap_or(DEFAULT_PAGE_SIZE);
    if !(1..=MAX_PAGE_SIZE).contains(&limit) {
        return Err(StatusCode::BAD_REQUEST);
    }
    let search = params.search.as_deref().filter(|s| !s.trim().is_empty());

    let heroes = state
        .db
        .list_heroes(search, limit, params.offset.unwrap_or(0))
        .await
        .map_err(|e| {
            tracing::error!("Failed to list heroes: {:?}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        })?;
    Ok(Json(heroes))
}

pub async fn get_hero(
    State(state): State<AppState>,
    Path(hero_id): Path<HeroId>,
) -> Result<Json<Hero>, StatusCode> {
    let hero = state.db.get_hero(hero_id).await.map_err(|e| {
        if matches!(e, DbError::NotFound(_)) {
            StatusCode::NOT_FOUND
        } else {
            tracing::error!("Failed to get hero: {:?}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        }
    })?;
    Ok(Json(hero))
}
