use crate::dbs::{Database, DbError, DbResult};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use shared::models::*;
use shared::search::name_matches;
use std::path::PathBuf;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

#[derive(Serialize, Deserialize, Default, Clone)]
struct LocalData {
    heroes: Vec<Hero>,
    favorites: Vec<FavoriteRecord>,
}

#[derive(Serialize, Deserialize, Clone, PartialEq)]
struct FavoriteRecord {
    client_id: String,
    hero_id: HeroId,
}

/// Whole database in one JSON file, rewritten on every change
pub struct LocalDatabase {
    path: PathBuf,
    data: RwLock<LocalData>,
}

impl LocalDatabase {
    pub fn load(path: PathBuf) -> DbResult<Self> {
        let data = match std::fs::read_to_string(&path) {
            Ok(content) => serde_json::from_str(&content)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => LocalData::default(),
            Err(e) => return Err(e.into()),
        };
        Ok(Self {
            path,
            data: RwLock::new(data),
        })
    }

    fn read(&self) -> DbResult<RwLockReadGuard<'_, LocalData>> {
        self.data
            .read()
            .map_err(|_| DbError::Internal("lock poisoned".to_string()))
    }

    fn write(&self) -> DbResult<RwLockWriteGuard<'_, LocalData>> {
        self.data
            .write()
            .map_err(|_| DbError::Internal("lock poisoned".to_string()))
    }

    fn save(&self, data: &LocalData) -> DbResult<()> {
        let content = serde_json::to_string_pretty(data)?;
        std::fs::write(&self.path, content)?;
        Ok(())
    }

    /// Writes `next` to disk and only then makes it the in-memory state
    fn commit(&self, current: &mut LocalData, next: LocalData) -> DbResult<()> {
        self.save(&next)?;
        *current = next;
        Ok(())
    }
}

#[async_trait]
impl Database for LocalDatabase {
    async fn list_heroes(
        &self,
        search: Option<&str>,
        limit: usize,
        offset: usize,
    ) -> DbResult<Vec<Hero>> {
        let db = self.read()?;
        Ok(db
            .heroes
            .iter()
            .filter(|h| search.is_none_or(|q| name_matches(&h.name, q)))
            .skip(offset)
            .take(limit)
            .cloned()
            .collect())
    }

    async fn get_hero(&self, hero_id: HeroId) -> DbResult<Hero> {
        let db = self.read()?;
        db.heroes
            .iter()
            .find(|h| h.id == hero_id)
            .cloned()
            .ok_or_else(|| DbError::NotFound(format!("hero {}", hero_id)))
    }

    async fn all_heroes(&self) -> DbResult<Vec<Hero>> {
        Ok(self.read()?.heroes.clone())
    }

    async fn hero_count(&self) -> DbResult<usize> {
        Ok(self.read()?.heroes.len())
    }

    async fn insert_heroes(&self, heroes: Vec<Hero>) -> DbResult<usize> {
        let mut db = self.write()?;
        let mut next = db.clone();
        let mut inserted = 0;
        for hero in heroes {
            if let Err(pos) = next.heroes.binary_search_by_key(&hero.id, |h| h.id) {
                next.heroes.insert(pos, hero);
                inserted += 1;
            }
        }
        if inserted > 0 {
            self.commit(&mut db, next)?;
        }
        Ok(inserted)
    }

    async fn list_favorites(&self, client_id: &str) -> DbResult<Vec<Hero>> {
        let db = self.read()?;
        Ok(db
            .favorites
            .iter()
            .filter(|f| f.client_id == client_id)
            .filter_map(|f| db.heroes.iter().find(|h| h.id == f.hero_id).cloned())
            .collect())
    }

    async fn add_favorite(&self, client_id: &str, hero_id: HeroId) -> DbResult<FavoriteStatus> {
        let mut db = self.write()?;
        if !db.heroes.iter().any(|h| h.id == hero_id) {
            return Err(DbError::NotFound(format!("hero {}", hero_id)));
        }
        let record = FavoriteRecord {
            client_id: client_id.to_string(),
            hero_id,
        };
        if db.favorites.contains(&record) {
            return Ok(FavoriteStatus::Exists);
        }
        let mut next = db.clone();
        next.favorites.push(record);
        self.commit(&mut db, next)?;
        Ok(FavoriteStatus::Added)
    }

    async fn remove_favorite(
        &self,
        client_id: &str,
        hero_id: HeroId,
    ) -> DbResult<FavoriteStatus> {
        let mut db = self.write()?;
        let mut next = db.clone();
        next.favorites
            .retain(|f| !(f.client_id == client_id && f.hero_id == hero_id));
        if next.favorites.len() == db.favorites.len() {
            return Ok(FavoriteStatus::Missing);
        }
        self.commit(&mut db, next)?;
        Ok(FavoriteStatus::Removed)
    }
}
