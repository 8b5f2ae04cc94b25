use crate::dbs::{Database, DbError, DbResult};
use async_trait::async_trait;
use shared::models::{FavoriteStatus, Hero, HeroId, PowerStat};
use sqlx::{
    Pool, Row, Sqlite,
    sqlite::{SqliteConnectOptions, SqlitePoolOptions, SqliteRow},
};
use std::str::FromStr;

const HERO_COLUMNS: &str = "id, name, full_name, publisher, alignment, gender, race, image_url, \
     intelligence, strength, speed, durability, power, combat";

#[derive(Clone)]
pub struct SqliteDatabase {
    pool: Pool<Sqlite>,
}

impl SqliteDatabase {
    pub async fn new(database_url: &str) -> DbResult<Self> {
        let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
        let pool = SqlitePoolOptions::new().connect_with(options).await?;

        let db = Self { pool };
        db.init().await?;
        Ok(db)
    }

    async fn init(&self) -> DbResult<()> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS heroes (
                id INTEGER PRIMARY KEY,
                name TEXT NOT NULL,
                full_name TEXT,
                publisher TEXT,
                alignment TEXT,
                gender TEXT,
                race TEXT,
                image_url TEXT,
                intelligence INTEGER,
                strength INTEGER,
                speed INTEGER,
                durability INTEGER,
                power INTEGER,
                combat INTEGER
            )",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            "CREATE TABLE IF NOT EXISTS favorites (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                client_id TEXT NOT NULL,
                hero_id INTEGER NOT NULL,
                UNIQUE(client_id, hero_id),
                FOREIGN KEY(hero_id) REFERENCES heroes(id)
            )",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS favorites_client ON favorites(client_id)")
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

fn hero_from_row(row: &SqliteRow) -> Hero {
    let mut hero = Hero::named(row.get("id"), row.get::<String, _>("name"));
    hero.full_name = row.get("full_name");
    hero.publisher = row.get("publisher");
    hero.alignment = row.get("alignment");
    hero.gender = row.get("gender");
    hero.race = row.get("race");
    hero.image_url = row.get("image_url");
    for stat in PowerStat::ALL {
        let value: Option<i64> = row.get(stat.as_str());
        hero.set_stat(stat, value.and_then(|v| u32::try_from(v).ok()));
    }
    hero
}

#[async_trait]
impl Database for SqliteDatabase {
    async fn list_heroes(
        &self,
        search: Option<&str>,
        limit: usize,
        offset: usize,
    ) -> DbResult<Vec<Hero>> {
        let sql = format!(
            "SELECT {} FROM heroes WHERE (?1 IS NULL OR name LIKE '%' || ?1 || '%') ORDER BY id LIMIT ?2 OFFSET ?3",
            HERO_COLUMNS
        );
        let rows = sqlx::query(&sql)
            .bind(search)
            .bind(limit as i64)
            .bind(offset as i64)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.iter().map(hero_from_row).collect())
    }

    async fn get_hero(&self, hero_id: HeroId) -> DbResult<Hero> {
        let sql = format!("SELECT {} FROM heroes WHERE id = ?", HERO_COLUMNS);
        let row = sqlx::query(&sql)
            .bind(hero_id)
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref()
            .map(hero_from_row)
            .ok_or_else(|| DbError::NotFound(format!("hero {}", hero_id)))
    }

    async fn all_heroes(&self) -> DbResult<Vec<Hero>> {
        let sql = format!("SELECT {} FROM heroes ORDER BY id", HERO_COLUMNS);
        let rows = sqlx::query(&sql).fetch_all(&self.pool).await?;
        Ok(rows.iter().map(hero_from_row).collect())
    }

    async fn hero_count(&self) -> DbResult<usize> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM heroes")
            .fetch_one(&self.pool)
            .await?;
        Ok(count as usize)
    }

    async fn insert_heroes(&self, heroes: Vec<Hero>) -> DbResult<usize> {
        let mut tx = self.pool.begin().await?;
        let mut inserted = 0;
        for hero in heroes {
            let result = sqlx::query(
                "INSERT OR IGNORE INTO heroes (id, name, full_name, publisher, alignment, gender, race, image_url, intelligence, strength, speed, durability, power, combat) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
            )
            .bind(hero.id)
            .bind(hero.name)
            .bind(hero.full_name)
            .bind(hero.publisher)
            .bind(hero.alignment)
            .bind(hero.gender)
            .bind(hero.race)
            .bind(hero.image_url)
            .bind(hero.intelligence.map(i64::from))
            .bind(hero.strength.map(i64::from))
            .bind(hero.speed.map(i64::from))
            .bind(hero.durability.map(i64::from))
            .bind(hero.power.map(i64::from))
            .bind(hero.combat.map(i64::from))
            .execute(&mut *tx)
            .await?;
            inserted += result.rows_affected() as usize;
        }
        tx.commit().await?;
        Ok(inserted)
    }

    async fn list_favorites(&self, client_id: &str) -> DbResult<Vec<Hero>> {
        let sql = format!(
            "SELECT {} FROM heroes JOIN favorites ON favorites.hero_id = heroes.id WHERE favorites.client_id = ? ORDER BY favorites.id",
            HERO_COLUMNS
                .split(", ")
                .map(|c| format!("heroes.{}", c))
                .collect::<Vec<_>>()
                .join(", ")
        );
        let rows = sqlx::query(&sql)
            .bind(client_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.iter().map(hero_from_row).collect())
    }

    async fn add_favorite(&self, client_id: &str, hero_id: HeroId) -> DbResult<FavoriteStatus> {
        self.get_hero(hero_id).await?;
        let result =
            sqlx::query("INSERT OR IGNORE INTO favorites (client_id, hero_id) VALUES (?, ?)")
                .bind(client_id)
                .bind(hero_id)
                .execute(&self.pool)
                .await?;
        Ok(if result.rows_affected() == 0 {
            FavoriteStatus::Exists
        } else {
            FavoriteStatus::Added
        })
    }

    async fn remove_favorite(
        &self,
        client_id: &str,
        hero_id: HeroId,
    ) -> DbResult<FavoriteStatus> {
        let result = sqlx::query("DELETE FROM favorites WHERE client_id = ? AND hero_id = ?")
            .bind(client_id)
            .bind(hero_id)
            .execute(&self.pool)
            .await?;
        Ok(if result.rows_affected() == 0 {
            FavoriteStatus::Missing
        } else {
            FavoriteStatus::Removed
        })
    }
}
