pub mod favorites;
pub mod heroes;
pub mod teams;

pub use favorites::*;
pub use heroes::*;
pub use teams::*;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::AppState;
    use crate::dbs::{Database, LocalDatabase};
    use axum::{
        extract::{Path, Query, State},
        http::StatusCode,
    };
    use shared::models::{FavoriteStatus, Hero, TeamParams};
    use std::sync::Arc;

    async fn state(dir: &tempfile::TempDir) -> AppState {
        let db = LocalDatabase::load(dir.path().join("db.json")).unwrap();
        db.insert_heroes(vec![
            Hero::named(1, "Batman"),
            Hero::named(2, "Bane"),
            Hero::named(3, "Superman"),
        ])
        .await
        .unwrap();
        AppState { db: Arc::new(db) }
    }

    fn query(search: Option<&str>, limit: Option<usize>) -> Query<HeroListParams> {
        Query(HeroListParams {
            search: search.map(str::to_string),
            limit,
            offset: None,
        })
    }

    #[tokio::test]
    async fn list_heroes_searches_and_validates_limit() {
        let dir = tempfile::tempdir().unwrap();
        let state = state(&dir).await;

        let found = list_heroes(State(state.clone()), query(Some("ba"), None))
            .await
            .unwrap();
        assert_eq!(found.0.len(), 2);

        let all = list_heroes(State(state.clone()), query(Some("  "), None))
            .await
            .unwrap();
        assert_eq!(all.0.len(), 3);

        for limit in [0, MAX_PAGE_SIZE + 1] {
            let err = list_heroes(State(state.clone()), query(None, Some(limit)))
                .await
                .unwrap_err();
            assert_eq!(err, StatusCode::BAD_REQUEST);
        }
    }

    #[tokio::test]
    async fn unknown_hero_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let state = state(&dir).await;
        assert_eq!(get_hero(State(state.clone()), Path(3)).await.unwrap().0.name, "Superman");
        assert_eq!(
            get_hero(State(state.clone()), Path(42)).await.unwrap_err(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            add_favorite(State(state), Path(("c1".to_string(), 42)))
                .await
                .unwrap_err(),
            StatusCode::NOT_FOUND
        );
    }

    #[tokio::test]
    async fn favorites_acknowledge_every_outcome() {
        let dir = tempfile::tempdir().unwrap();
        let state = state(&dir).await;
        let path = || Path(("c1".to_string(), 2));

        let ack = add_favorite(State(state.clone()), path()).await.unwrap();
        assert_eq!(ack.0.status, FavoriteStatus::Added);
        let ack = add_favorite(State(state.clone()), path()).await.unwrap();
        assert_eq!(ack.0.status, FavoriteStatus::Exists);

        let listed = list_favorites(State(state.clone()), Path("c1".to_string()))
            .await
            .unwrap();
        assert_eq!(listed.0, vec![Hero::named(2, "Bane")]);

        let ack = remove_favorite(State(state.clone()), path()).await.unwrap();
        assert_eq!(ack.0.status, FavoriteStatus::Removed);
        let ack = remove_favorite(State(state), path()).await.unwrap();
        assert_eq!(ack.0.status, FavoriteStatus::Missing);
    }

    #[tokio::test]
    async fn team_errors_map_to_status_codes() {
        let dir = tempfile::tempdir().unwrap();
        let state = state(&dir).await;

        let team = recommend_team(State(state.clone()), Query(TeamParams::default()))
            .await
            .unwrap();
        assert_eq!(team.0.heroes.len(), 3);

        let bad = TeamParams {
            strategy: Some("power".to_string()),
            power: Some("luck".to_string()),
            size: None,
        };
        assert_eq!(
            recommend_team(State(state), Query(bad)).await.unwrap_err(),
            StatusCode::BAD_REQUEST
        );

        let empty_dir = tempfile::tempdir().unwrap();
        let empty = AppState {
            db: Arc::new(LocalDatabase::load(empty_dir.path().join("db.json")).unwrap()),
        };
        assert_eq!(
            recommend_team(State(empty), Query(TeamParams::default()))
                .await
                .unwrap_err(),
            StatusCode::NOT_FOUND
        );
    }
}
