//! Loading heroes from superheroapi.com, either live or from a JSON dump.
//!
//! Each record looks like the API's per-hero response: the id is a string,
//! stats live under `powerstats` as strings and `"null"` marks an unknown value.

use crate::dbs::{Database, DbResult};
use serde::Deserialize;
use serde_json::Value;
use shared::models::{Hero, HeroId, PowerStat};
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

pub const SUPERHERO_API_URL: &str = "https://www.superheroapi.com/api";
/// Ids `1..=REMOTE_SEED_LIMIT` are fetched from the live API
pub const REMOTE_SEED_LIMIT: HeroId = 100;

#[derive(Deserialize)]
struct SeedRecord {
    #[serde(default)]
    response: Option<String>,
    #[serde(default)]
    id: Value,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    powerstats: HashMap<String, Value>,
    #[serde(default)]
    biography: Biography,
    #[serde(default)]
    appearance: Appearance,
    #[serde(default)]
    image: Image,
}

#[derive(Deserialize, Default)]
struct Biography {
    #[serde(rename = "full-name")]
    full_name: Option<String>,
    publisher: Option<String>,
    alignment: Option<String>,
}

#[derive(Deserialize, Default)]
struct Appearance {
    gender: Option<String>,
    race: Option<String>,
}

#[derive(Deserialize, Default)]
struct Image {
    url: Option<String>,
}

fn parse_int(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn parse_stat(value: Option<&Value>) -> Option<u32> {
    value
        .and_then(parse_int)
        .and_then(|v| u32::try_from(v).ok())
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty() && s != "null" && s != "-")
}

fn into_hero(record: SeedRecord, position: usize) -> Option<Hero> {
    if record.response.as_deref().is_some_and(|r| r != "success") {
        return None;
    }
    let id = parse_int(&record.id).unwrap_or(position as i64 + 1);
    let name = non_empty(record.name).unwrap_or_else(|| format!("Hero {}", id));

    let mut hero = Hero::named(id, name);
    hero.full_name = non_empty(record.biography.full_name);
    hero.publisher = non_empty(record.biography.publisher);
    hero.alignment = non_empty(record.biography.alignment);
    hero.gender = non_empty(record.appearance.gender);
    hero.race = non_empty(record.appearance.race);
    hero.image_url = non_empty(record.image.url);
    for stat in PowerStat::ALL {
        hero.set_stat(stat, parse_stat(record.powerstats.get(stat.as_str())));
    }
    Some(hero)
}

pub fn parse_seed(content: &str) -> DbResult<Vec<Hero>> {
    let records: Vec<SeedRecord> = serde_json::from_str(content)?;
    Ok(records
        .into_iter()
        .enumerate()
        .filter_map(|(position, record)| into_hero(record, position))
        .collect())
}

pub async fn load_seed_file(path: &Path) -> DbResult<Vec<Hero>> {
    let content = tokio::fs::read_to_string(path).await?;
    parse_seed(&content)
}

/// Inserts `heroes` only when the store holds none yet
pub async fn seed_if_empty(db: &dyn Database, heroes: Vec<Hero>) -> DbResult<usize> {
    if db.hero_count().await? > 0 {
        return Ok(0);
    }
    db.insert_heroes(heroes).await
}

/// Client for the live superhero API, one request per hero id
pub struct RemoteSeeder {
    client: reqwest::Client,
    base_url: String,
    token: String,
    limit: HeroId,
}

impl RemoteSeeder {
    pub fn new(token: impl Into<String>) -> DbResult<Self> {
        Ok(Self {
            client: reqwest::Client::builder()
                .timeout(Duration::from_secs(10))
                .build()?,
            base_url: SUPERHERO_API_URL.to_string(),
            token: token.into(),
            limit: REMOTE_SEED_LIMIT,
        })
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_limit(mut self, limit: HeroId) -> Self {
        self.limit = limit;
        self
    }

    fn hero_url(&self, hero_id: HeroId) -> String {
        format!("{}/{}/{}", self.base_url.trim_end_matches('/'), self.token, hero_id)
    }

    /// `None` when the API answers with a non-success `response`
    pub async fn fetch_hero(&self, hero_id: HeroId) -> DbResult<Option<Hero>> {
        let record: SeedRecord = self
            .client
            .get(self.hero_url(hero_id))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        let position = usize::try_from(hero_id - 1).unwrap_or(0);
        Ok(into_hero(record, position))
    }

    pub async fn fetch_all(&self) -> DbResult<Vec<Hero>> {
        let mut heroes = Vec::new();
        for hero_id in 1..=self.limit {
            match self.fetch_hero(hero_id).await? {
                Some(hero) => heroes.push(hero),
                None => tracing::debug!("Superhero API has no hero {}", hero_id),
            }
        }
        Ok(heroes)
    }
}

/// Fetches from the live API only when the store is empty
pub async fn seed_from_remote(db: &dyn Database, seeder: &RemoteSeeder) -> DbResult<usize> {
    if db.hero_count().await? > 0 {
        return Ok(0);
    }
    let heroes = seeder.fetch_all().await?;
    db.insert_heroes(heroes).await
}
