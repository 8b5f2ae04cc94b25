use crate::api::ApiResult;
use crate::catalog::CatalogLoad;
use crate::favorites::{FavoritesStore, PendingToggle};
use crate::identity::ClientId;
use crate::team::TeamState;
use shared::models::*;
use std::rc::Rc;
use yew::prelude::*;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CatalogStatus {
    #[default]
    Loading,
    Loaded,
    Unavailable,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct State {
    pub client: ClientId,
    pub catalog: Vec<Hero>,
    pub catalog_status: CatalogStatus,
    pub favorites: FavoritesStore,
    pub team: TeamState,
    pub search: String,
    pub strategy: Strategy,
    pub power: Option<PowerStat>,
    pub modal_open: Option<ModalType>,
}

impl State {
    pub fn team_query(&self) -> TeamQuery {
        TeamQuery::new(self.strategy, self.power)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ModalType {
    HeroDetail(HeroId),
}

pub enum Action {
    SetClient(ClientId),
    SetCatalog(CatalogLoad),
    FavoritesLoading(ClientId),
    FavoritesLoaded {
        client: ClientId,
        result: ApiResult<Vec<Hero>>,
    },
    ToggleFavorite(Hero),
    ToggleSent(u64),
    ToggleSettled {
        pending: PendingToggle,
        outcome: ApiResult<()>,
    },
    DismissFavoriteError,
    SetSearch(String),
    SelectStrategy(Strategy),
    SelectPower(PowerStat),
    RequestTeam,
    TeamSent(u64),
    TeamSettled {
        seq: u64,
        result: ApiResult<TeamRecommendation>,
    },
    DismissTeamError,
    OpenModal(ModalType),
    CloseModal,
}

impl Reducible for State {
    type Action = Action;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();

        match action {
            Action::SetClient(client) => {
                next.client = client;
            }
            Action::SetCatalog(load) => {
                next.catalog = load.heroes;
                next.catalog_status = if load.degraded {
                    CatalogStatus::Unavailable
                } else {
                    CatalogStatus::Loaded
                };
            }
            Action::FavoritesLoading(client) => {
                next.favorites.begin_load(&client);
            }
            Action::FavoritesLoaded { client, result } => {
                next.favorites.finish_load(&client, result);
            }
            Action::ToggleFavorite(hero) => {
                // The outbox effect picks the pending op up and sends it
                if next.favorites.begin_toggle(&hero).is_none() {
                    return self;
                }
            }
            Action::ToggleSent(op_id) => {
                next.favorites.mark_sent(op_id);
            }
            Action::ToggleSettled { pending, outcome } => {
                let _ = next.favorites.settle(&pending, outcome);
            }
            Action::DismissFavoriteError => {
                next.favorites.dismiss_error();
            }
            Action::SetSearch(query) => {
                next.search = query;
            }
            Action::SelectStrategy(strategy) => {
                next.strategy = strategy;
            }
            Action::SelectPower(power) => {
                next.power = Some(power);
            }
            Action::RequestTeam => {
                let query = next.team_query();
                next.team.begin(query);
            }
            Action::TeamSent(seq) => {
                next.team.mark_sent(seq);
            }
            Action::TeamSettled { seq, result } => {
                if !next.team.settle(seq, result) {
                    return self;
                }
            }
            Action::DismissTeamError => {
                next.team.dismiss_error();
            }
            Action::OpenModal(modal_type) => {
                next.modal_open = Some(modal_type);
            }
            Action::CloseModal => {
                next.modal_open = None;
            }
        }

        next.into()
    }
}

pub type StoreContext = UseReducerHandle<State>;
