use crate::identity::ClientId;
use gloo_net::http::{Request, Response};
use serde::de::DeserializeOwned;
use shared::models::*;
use thiserror::Error;

const API_BASE: &str = "/api";

pub type ApiResult<T> = Result<T, ApiError>;

/// Failure of a call against the hero service. Every non-success status is
/// reported the same way, whatever the code.
#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(String),
    #[error("Request failed with status {0}")]
    Status(u16),
    #[error("Invalid response: {0}")]
    Decode(String),
}

impl From<gloo_net::Error> for ApiError {
    fn from(err: gloo_net::Error) -> Self {
        match err {
            gloo_net::Error::SerdeError(e) => ApiError::Decode(e.to_string()),
            other => ApiError::Network(other.to_string()),
        }
    }
}

/// The remote store as seen by the client
#[allow(async_fn_in_trait)]
pub trait HeroApi {
    async fn list_heroes(&self, limit: usize) -> ApiResult<Vec<Hero>>;
    async fn get_hero(&self, id: HeroId) -> ApiResult<Hero>;
    async fn list_favorites(&self, client: &ClientId) -> ApiResult<Vec<Hero>>;
    async fn add_favorite(&self, client: &ClientId, id: HeroId) -> ApiResult<FavoriteAck>;
    async fn remove_favorite(&self, client: &ClientId, id: HeroId) -> ApiResult<FavoriteAck>;
    async fn recommend_team(&self, query: &TeamQuery) -> ApiResult<TeamRecommendation>;
}

/// `HeroApi` over HTTP with `gloo-net`
#[derive(Clone, Debug, PartialEq)]
pub struct HttpApi {
    base: String,
}

impl Default for HttpApi {
    fn default() -> Self {
        Self::new(API_BASE)
    }
}

impl HttpApi {
    pub fn new(base: impl Into<String>) -> Self {
        Self { base: base.into() }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> ApiResult<T> {
    if !response.ok() {
        return Err(ApiError::Status(response.status()));
    }
    Ok(response.json().await?)
}

impl HeroApi for HttpApi {
    async fn list_heroes(&self, limit: usize) -> ApiResult<Vec<Hero>> {
        let response = Request::get(&self.url(&format!("/heroes?limit={}", limit)))
            .send()
            .await?;
        decode(response).await
    }

    async fn get_hero(&self, id: HeroId) -> ApiResult<Hero> {
        let response = Request::get(&self.url(&format!("/heroes/{}", id)))
            .send()
            .await?;
        decode(response).await
    }

    async fn list_favorites(&self, client: &ClientId) -> ApiResult<Vec<Hero>> {
        let response = Request::get(&self.url(&format!("/favorites/{}", client)))
            .send()
            .await?;
        decode(response).await
    }

    async fn add_favorite(&self, client: &ClientId, id: HeroId) -> ApiResult<FavoriteAck> {
        let response = Request::post(&self.url(&format!("/favorites/{}/{}", client, id)))
            .send()
            .await?;
        decode(response).await
    }

    async fn remove_favorite(&self, client: &ClientId, id: HeroId) -> ApiResult<FavoriteAck> {
        let response = Request::delete(&self.url(&format!("/favorites/{}/{}", client, id)))
            .send()
            .await?;
        decode(response).await
    }

    async fn recommend_team(&self, query: &TeamQuery) -> ApiResult<TeamRecommendation> {
        let response = Request::get(&self.url(&format!(
            "/teams/recommend?{}",
            query.query_string()
        )))
        .send()
        .await?;
        decode(response).await
    }
}
