pub mod dbs;
mod handlers;
pub mod recommend;
pub mod seed;

use crate::dbs::{Database, DatabaseConfig, DbResult};
use crate::handlers::{
    add_favorite, get_hero, list_favorites, list_heroes, recommend_team, remove_favorite,
};
use axum::{
    Router,
    http::{HeaderValue, Method},
    routing::{get, post},
};
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

#[derive(Clone)]
pub struct AppState {
    pub db: Arc<dyn Database>,
}

#[derive(Clone, Debug)]
pub struct Settings {
    pub database: DatabaseConfig,
    /// Hero records to load when the store is empty
    pub seed_file: Option<PathBuf>,
    /// superheroapi.com token; heroes are fetched live when the store is empty
    pub superhero_api_token: Option<String>,
    /// Only this origin may call the API; any origin when unset
    pub frontend_origin: Option<String>,
}

pub async fn init(router: Router<AppState>, settings: Settings) -> DbResult<Router<()>> {
    let db = dbs::connect(&settings.database).await?;

    if let Some(path) = &settings.seed_file {
        let heroes = seed::load_seed_file(path).await?;
        let inserted = seed::seed_if_empty(db.as_ref(), heroes).await?;
        tracing::info!("Seeded {} heroes from {}", inserted, path.display());
    }

    if let Some(token) = &settings.superhero_api_token {
        let seeder = seed::RemoteSeeder::new(token.as_str())?;
        let inserted = seed::seed_from_remote(db.as_ref(), &seeder).await?;
        tracing::info!("Seeded {} heroes from the superhero API", inserted);
    }

    let state = AppState { db };
    Ok(routes(router)
        .layer(cors_layer(settings.frontend_origin.as_deref()))
        .with_state(state))
}

fn routes(router: Router<AppState>) -> Router<AppState> {
    router
        .route("/api/health", get(|| async { "OK" }))
        .route("/api/heroes", get(list_heroes))
        .route("/api/heroes/{hero_id}", get(get_hero))
        .route("/api/favorites/{client_id}", get(list_favorites))
        .route(
            "/api/favorites/{client_id}/{hero_id}",
            post(add_favorite).delete(remove_favorite),
        )
        .route("/api/teams/recommend", get(recommend_team))
}

fn cors_layer(origin: Option<&str>) -> CorsLayer {
    let Some(origin) = origin.filter(|o| *o != "*") else {
        return CorsLayer::permissive();
    };
    match origin.parse::<HeaderValue>() {
        Ok(value) => CorsLayer::new()
            .allow_origin(value)
            .allow_methods([Method::GET, Method::POST, Method::DELETE])
            .allow_headers(Any),
        Err(e) => {
            tracing::warn!("Invalid frontend origin {:?}: {}, allowing any", origin, e);
            CorsLayer::permissive()
        }
    }
}
