use async_trait::async_trait;
use shared::models::{FavoriteStatus, Hero, HeroId};
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;

pub mod local;
pub mod sqlite;

pub use local::LocalDatabase;
pub use sqlite::SqliteDatabase;

pub type DbResult<T> = Result<T, DbError>;

#[derive(Clone, Debug)]
pub enum DatabaseConfig {
    Local { path: PathBuf },
    Sqlite { url: String },
}

#[derive(Error, Debug)]
pub enum DbError {
    #[error("Database error: {0}")]
    Sqlx(#[from] sqlx::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Remote source error: {0}")]
    Remote(#[from] reqwest::Error),
    #[error("Entity not found: {0}")]
    NotFound(String),
    #[error("Internal error: {0}")]
    Internal(String),
}

#[async_trait]
pub trait Database: Send + Sync {
    /// Heroes ordered by id, optionally filtered by a name substring
    async fn list_heroes(
        &self,
        search: Option<&str>,
        limit: usize,
        offset: usize,
    ) -> DbResult<Vec<Hero>>;
    async fn get_hero(&self, hero_id: HeroId) -> DbResult<Hero>;
    async fn all_heroes(&self) -> DbResult<Vec<Hero>>;
    async fn hero_count(&self) -> DbResult<usize>;
    /// Inserts heroes whose id is not taken yet and returns how many were new
    async fn insert_heroes(&self, heroes: Vec<Hero>) -> DbResult<usize>;
    async fn list_favorites(&self, client_id: &str) -> DbResult<Vec<Hero>>;
    async fn add_favorite(&self, client_id: &str, hero_id: HeroId) -> DbResult<FavoriteStatus>;
    async fn remove_favorite(&self, client_id: &str, hero_id: HeroId)
    -> DbResult<FavoriteStatus>;
}

pub async fn connect(config: &DatabaseConfig) -> DbResult<Arc<dyn Database>> {
    let db: Arc<dyn Database> = match config {
        DatabaseConfig::Local { path } => {
            tracing::info!("Using local database at {}", path.display());
            Arc::new(LocalDatabase::load(path.clone())?)
        }
        DatabaseConfig::Sqlite { url } => {
            tracing::info!("Using SQLite database at {}", url);
            Arc::new(SqliteDatabase::new(url).await?)
        }
    };
    Ok(db)
}
