use crate::api::HeroApi;
use shared::models::Hero;

/// Upper bound on the number of heroes fetched for a session
pub const CATALOG_LIMIT: usize = 200;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct CatalogLoad {
    pub heroes: Vec<Hero>,
    /// The fetch failed and `heroes` is empty because of it
    pub degraded: bool,
}

pub async fn load_catalog<A: HeroApi>(api: &A) -> CatalogLoad {
    match api.list_heroes(CATALOG_LIMIT).await {
        Ok(mut heroes) => {
            heroes.truncate(CATALOG_LIMIT);
            tracing::debug!("Loaded {} heroes", heroes.len());
            CatalogLoad {
                heroes,
                degraded: false,
            }
        }
        Err(e) => {
            tracing::warn!("Failed to load hero catalog: {}", e);
            CatalogLoad {
                heroes: Vec::new(),
                degraded: true,
            }
        }
    }
}
