use crate::api::{ApiError, ApiResult, HeroApi};
use crate::identity::ClientId;
use shared::models::{Hero, HeroId};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::atomic::{AtomicU64, Ordering};
use thiserror::Error;

static NEXT_OP: AtomicU64 = AtomicU64::new(1);

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LoadPhase {
    #[default]
    Unloaded,
    Loading,
    Ready,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToggleKind {
    Add,
    Remove,
}

/// A toggle applied locally and awaiting its remote confirmation
#[derive(Clone, Debug, PartialEq)]
pub struct PendingToggle {
    pub op_id: u64,
    pub client: ClientId,
    pub hero: Hero,
    pub kind: ToggleKind,
    /// Where the hero sat before a removal, for rollback
    restore_at: usize,
}

#[derive(Error, Clone, Debug, PartialEq)]
#[error("Could not {} {hero}: {source}", verb(.kind))]
pub struct ToggleError {
    pub hero: String,
    pub kind: ToggleKind,
    #[source]
    pub source: ApiError,
}

fn verb(kind: &ToggleKind) -> &'static str {
    match kind {
        ToggleKind::Add => "save",
        ToggleKind::Remove => "remove",
    }
}

/// The favorite set of one client identity, with optimistic toggles.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FavoritesStore {
    owner: ClientId,
    phase: LoadPhase,
    heroes: Vec<Hero>,
    pending: BTreeMap<HeroId, u64>,
    outbox: Vec<PendingToggle>,
    degraded: bool,
    last_error: Option<ToggleError>,
}

impl FavoritesStore {
    pub fn phase(&self) -> LoadPhase {
        self.phase
    }

    pub fn owner(&self) -> &ClientId {
        &self.owner
    }

    pub fn heroes(&self) -> &[Hero] {
        &self.heroes
    }

    pub fn len(&self) -> usize {
        self.heroes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heroes.is_empty()
    }

    pub fn contains(&self, id: HeroId) -> bool {
        self.heroes.iter().any(|h| h.id == id)
    }

    pub fn ids(&self) -> BTreeSet<HeroId> {
        self.heroes.iter().map(|h| h.id).collect()
    }

    pub fn is_pending(&self, id: HeroId) -> bool {
        self.pending.contains_key(&id)
    }

    /// Toggles applied locally whose remote call has not been issued yet
    pub fn outbox(&self) -> &[PendingToggle] {
        &self.outbox
    }

    /// The last load failed and the set may be missing entries
    pub fn is_degraded(&self) -> bool {
        self.degraded
    }

    pub fn last_error(&self) -> Option<&ToggleError> {
        self.last_error.as_ref()
    }

    pub fn dismiss_error(&mut self) {
        self.last_error = None;
    }

    /// Starts loading the set for `client`. Refuses an unset identity.
    pub fn begin_load(&mut self, client: &ClientId) -> bool {
        if !client.is_set() {
            return false;
        }
        *self = Self {
            owner: client.clone(),
            phase: LoadPhase::Loading,
            ..Self::default()
        };
        true
    }

    /// Installs the fetched set. A failed fetch leaves the set empty.
    pub fn finish_load(&mut self, client: &ClientId, result: ApiResult<Vec<Hero>>) {
        if *client != self.owner || self.phase != LoadPhase::Loading {
            tracing::debug!("Ignoring favorites for stale client {}", client);
            return;
        }
        match result {
            Ok(heroes) => {
                self.heroes = heroes;
                self.degraded = false;
            }
            Err(e) => {
                tracing::warn!("Failed to load favorites: {}", e);
                self.heroes.clear();
                self.degraded = true;
            }
        }
        self.phase = LoadPhase::Ready;
    }

    /// Applies a toggle locally and returns the remote operation to issue.
    ///
    /// Returns `None` while the set is not ready, without an identity, or when
    /// a toggle for the same hero is still in flight.
    pub fn begin_toggle(&mut self, hero: &Hero) -> Option<PendingToggle> {
        if self.phase != LoadPhase::Ready || !self.owner.is_set() {
            return None;
        }
        if self.is_pending(hero.id) {
            tracing::debug!("Toggle for hero {} already in flight", hero.id);
            return None;
        }

        let op_id = NEXT_OP.fetch_add(1, Ordering::Relaxed);
        let (kind, restore_at) = match self.heroes.iter().position(|h| h.id == hero.id) {
            Some(pos) => {
                self.heroes.remove(pos);
                (ToggleKind::Remove, pos)
            }
            None => {
                self.heroes.push(hero.clone());
                (ToggleKind::Add, self.heroes.len() - 1)
            }
        };

        let pending = PendingToggle {
            op_id,
            client: self.owner.clone(),
            hero: hero.clone(),
            kind,
            restore_at,
        };
        self.pending.insert(hero.id, op_id);
        self.outbox.push(pending.clone());
        Some(pending)
    }

    pub fn mark_sent(&mut self, op_id: u64) {
        self.outbox.retain(|p| p.op_id != op_id);
    }

    /// Records the remote outcome of a toggle, rolling back on failure.
    pub fn settle(
        &mut self,
        pending: &PendingToggle,
        outcome: ApiResult<()>,
    ) -> Result<(), ToggleError> {
        if self.pending.get(&pending.hero.id) != Some(&pending.op_id) {
            tracing::debug!("Ignoring settlement of unknown toggle {}", pending.op_id);
            return Ok(());
        }
        self.pending.remove(&pending.hero.id);
        self.mark_sent(pending.op_id);

        let Err(source) = outcome else {
            return Ok(());
        };

        match pending.kind {
            ToggleKind::Add => self.heroes.retain(|h| h.id != pending.hero.id),
            ToggleKind::Remove => {
                if !self.contains(pending.hero.id) {
                    let at = pending.restore_at.min(self.heroes.len());
                    self.heroes.insert(at, pending.hero.clone());
                }
            }
        }

        let err = ToggleError {
            hero: pending.hero.name.clone(),
            kind: pending.kind,
            source,
        };
        tracing::warn!("{}", err);
        self.last_error = Some(err.clone());
        Err(err)
    }
}

pub async fn load_favorites<A: HeroApi>(api: &A, client: &ClientId) -> ApiResult<Vec<Hero>> {
    api.list_favorites(client).await
}

/// Issues the remote half of a toggle that has already been applied locally.
pub async fn sync_toggle<A: HeroApi>(api: &A, pending: &PendingToggle) -> ApiResult<()> {
    let ack = match pending.kind {
        ToggleKind::Add => api.add_favorite(&pending.client, pending.hero.id).await?,
        ToggleKind::Remove => api.remove_favorite(&pending.client, pending.hero.id).await?,
    };
    tracing::debug!("Favorite {} -> {:?}", pending.hero.id, ack.status);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock::MockApi;
    use futures::executor::block_on;

    fn catalog() -> Vec<Hero> {
        vec![
            Hero::named(1, "Batman"),
            Hero::named(2, "Bane"),
            Hero::named(3, "Superman"),
        ]
    }

    fn client() -> ClientId {
        ClientId::new("client-a")
    }

    fn ready_store(api: &MockApi) -> FavoritesStore {
        let mut store = FavoritesStore::default();
        assert!(store.begin_load(&client()));
        let result = block_on(load_favorites(api, &client()));
        store.finish_load(&client(), result);
        store
    }

    fn toggle(store: &mut FavoritesStore, api: &MockApi, hero: &Hero) -> Result<(), ToggleError> {
        let pending = store.begin_toggle(hero).expect("toggle accepted");
        store.mark_sent(pending.op_id);
        let outcome = block_on(sync_toggle(api, &pending));
        store.settle(&pending, outcome)
    }

    #[test]
    fn load_walks_through_phases() {
        let api = MockApi::with_catalog(catalog());
        api.favorites
            .borrow_mut()
            .insert("client-a".to_string(), vec![3, 1]);

        let mut store = FavoritesStore::default();
        assert_eq!(store.phase(), LoadPhase::Unloaded);
        store.begin_load(&client());
        assert_eq!(store.phase(), LoadPhase::Loading);
        let result = block_on(load_favorites(&api, &client()));
        store.finish_load(&client(), result);
        assert_eq!(store.phase(), LoadPhase::Ready);
        assert_eq!(store.ids(), BTreeSet::from([1, 3]));
        assert_eq!(store.heroes()[0].name, "Superman");
    }

    #[test]
    fn failed_load_is_empty_and_degraded() {
        let api = MockApi::with_catalog(catalog());
        api.fail.set(true);
        let store = ready_store(&api);
        assert_eq!(store.phase(), LoadPhase::Ready);
        assert!(store.is_empty());
        assert!(store.is_degraded());
    }

    #[test]
    fn unset_identity_cannot_load_or_toggle() {
        let mut store = FavoritesStore::default();
        assert!(!store.begin_load(&ClientId::unset()));
        assert_eq!(store.phase(), LoadPhase::Unloaded);
        assert!(store.begin_toggle(&Hero::named(1, "Batman")).is_none());
    }

    #[test]
    fn toggle_before_ready_is_refused() {
        let mut store = FavoritesStore::default();
        store.begin_load(&client());
        assert!(store.begin_toggle(&Hero::named(1, "Batman")).is_none());
    }

    #[test]
    fn stale_client_results_are_ignored() {
        let mut store = FavoritesStore::default();
        store.begin_load(&client());
        store.finish_load(&ClientId::new("someone-else"), Ok(catalog()));
        assert_eq!(store.phase(), LoadPhase::Loading);
        assert!(store.is_empty());
    }

    #[test]
    fn toggle_twice_restores_membership() {
        let api = MockApi::with_catalog(catalog());
        let mut store = ready_store(&api);
        let batman = Hero::named(1, "Batman");

        toggle(&mut store, &api, &batman).unwrap();
        assert_eq!(store.ids(), BTreeSet::from([1]));
        assert_eq!(api.stored(&client()), vec![1]);

        toggle(&mut store, &api, &batman).unwrap();
        assert!(store.ids().is_empty());
        assert!(api.stored(&client()).is_empty());
        assert!(!store.is_pending(1));
    }

    #[test]
    fn mutation_is_visible_before_remote_call() {
        let api = MockApi::with_catalog(catalog());
        let mut store = ready_store(&api);
        let calls_before = api.calls.borrow().len();

        let pending = store.begin_toggle(&Hero::named(2, "Bane")).unwrap();
        assert!(store.contains(2));
        assert!(store.is_pending(2));
        assert_eq!(store.outbox(), std::slice::from_ref(&pending));
        assert_eq!(api.calls.borrow().len(), calls_before);

        store.mark_sent(pending.op_id);
        assert!(store.outbox().is_empty());
        let outcome = block_on(sync_toggle(&api, &pending));
        assert_eq!(
            api.calls.borrow().last().map(String::as_str),
            Some("POST /favorites/client-a/2")
        );
        store.settle(&pending, outcome).unwrap();
        assert!(store.contains(2));
        assert!(!store.is_pending(2));
    }

    #[test]
    fn duplicate_toggle_is_refused_while_pending() {
        let api = MockApi::with_catalog(catalog());
        let mut store = ready_store(&api);
        let hero = Hero::named(1, "Batman");

        let first = store.begin_toggle(&hero).unwrap();
        assert!(store.begin_toggle(&hero).is_none());
        assert_eq!(store.outbox().len(), 1);

        store.settle(&first, Ok(())).unwrap();
        assert!(store.begin_toggle(&hero).is_some());
    }

    #[test]
    fn failed_add_rolls_back() {
        let api = MockApi::with_catalog(catalog());
        let mut store = ready_store(&api);
        api.fail.set(true);

        let err = toggle(&mut store, &api, &Hero::named(3, "Superman")).unwrap_err();
        assert_eq!(err.kind, ToggleKind::Add);
        assert_eq!(err.source, ApiError::Status(503));
        assert!(!store.contains(3));
        assert_eq!(store.last_error(), Some(&err));
        assert_eq!(err.to_string(), "Could not save Superman: Request failed with status 503");

        store.dismiss_error();
        assert!(store.last_error().is_none());
    }

    #[test]
    fn failed_remove_restores_original_position() {
        let api = MockApi::with_catalog(catalog());
        api.favorites
            .borrow_mut()
            .insert("client-a".to_string(), vec![1, 2, 3]);
        let mut store = ready_store(&api);
        api.fail.set(true);

        toggle(&mut store, &api, &Hero::named(2, "Bane")).unwrap_err();
        let order: Vec<_> = store.heroes().iter().map(|h| h.id).collect();
        assert_eq!(order, vec![1, 2, 3]);
    }

    #[test]
    fn settlement_after_reload_is_ignored() {
        let api = MockApi::with_catalog(catalog());
        let mut store = ready_store(&api);
        let pending = store.begin_toggle(&Hero::named(1, "Batman")).unwrap();

        store.begin_load(&client());
        store.finish_load(&client(), Ok(vec![]));
        assert!(store.settle(&pending, Err(ApiError::Status(500))).is_ok());
        assert!(store.is_empty());
        assert!(store.last_error().is_none());
    }

    #[test]
    fn independent_heroes_toggle_concurrently() {
        let api = MockApi::with_catalog(catalog());
        let mut store = ready_store(&api);
        let a = store.begin_toggle(&Hero::named(1, "Batman")).unwrap();
        let b = store.begin_toggle(&Hero::named(2, "Bane")).unwrap();
        assert_ne!(a.op_id, b.op_id);

        // b settles first and fails, a succeeds afterwards
        store.settle(&b, Err(ApiError::Network("offline".into()))).unwrap_err();
        store.settle(&a, Ok(())).unwrap();
        assert_eq!(store.ids(), BTreeSet::from([1]));
    }
}
