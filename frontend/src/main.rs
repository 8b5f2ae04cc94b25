mod api;
mod catalog;
mod components;
mod favorites;
mod identity;
mod store;
mod team;

use api::HttpApi;
use components::favorites_panel::FavoritesPanel;
use components::hero_modal::HeroModal;
use components::roster::Roster;
use components::team_panel::TeamPanel;
use shared::models::Strategy;
use store::{Action, ModalType, State, StoreContext};
use yew::prelude::*;

#[function_component(App)]
fn app() -> Html {
    let store = use_reducer(State::default);

    // Session start: identity first, then catalog and favorites independently
    {
        let store = store.clone();
        use_effect_with((), move |_| {
            let client = identity::resolve();
            store.dispatch(Action::SetClient(client.clone()));

            {
                let store = store.clone();
                yew::platform::spawn_local(async move {
                    let load = catalog::load_catalog(&HttpApi::default()).await;
                    store.dispatch(Action::SetCatalog(load));
                });
            }

            if client.is_set() {
                store.dispatch(Action::FavoritesLoading(client.clone()));
                yew::platform::spawn_local(async move {
                    let result = favorites::load_favorites(&HttpApi::default(), &client).await;
                    store.dispatch(Action::FavoritesLoaded { client, result });
                });
            }
            || {}
        });
    }

    // Send toggles that were applied locally
    {
        let store = store.clone();
        use_effect_with(store.favorites.outbox().to_vec(), move |outbox| {
            for pending in outbox.iter().cloned() {
                store.dispatch(Action::ToggleSent(pending.op_id));
                let store = store.clone();
                yew::platform::spawn_local(async move {
                    let outcome = favorites::sync_toggle(&HttpApi::default(), &pending).await;
                    store.dispatch(Action::ToggleSettled { pending, outcome });
                });
            }
            || {}
        });
    }

    // Send the latest team request
    {
        let store = store.clone();
        use_effect_with(store.team.outbox(), move |ticket| {
            if let Some(ticket) = *ticket {
                store.dispatch(Action::TeamSent(ticket.seq));
                let store = store.clone();
                yew::platform::spawn_local(async move {
                    let result = team::request_team(&HttpApi::default(), &ticket).await;
                    store.dispatch(Action::TeamSettled {
                        seq: ticket.seq,
                        result,
                    });
                });
            }
            || {}
        });
    }

    let on_generate = {
        let store = store.clone();
        Callback::from(move |_| store.dispatch(Action::RequestTeam))
    };

    html! {
        <ContextProvider<StoreContext> context={store.clone()}>
            <div class="page" id="top">
                <header class="hero">
                    <div>
                        <p class="eyebrow">{"Hero Atlas"}</p>
                        <h1>{"Build your dream squad."}</h1>
                        <p class="lead">
                            {"Browse iconic characters, save favorites, and generate team recommendations in seconds."}
                        </p>
                    </div>
                    <div class="hero-card">
                        <p class="label">{"Quick Stats"}</p>
                        <div class="stat-grid">
                            <div>
                                <span class="stat">{store.catalog.len().to_string()}</span>
                                <span class="stat-label">{"Heroes"}</span>
                            </div>
                            <div>
                                <span class="stat">{store.favorites.len().to_string()}</span>
                                <span class="stat-label">{"Favorites"}</span>
                            </div>
                            <div>
                                <span class="stat">{Strategy::ALL.len().to_string()}</span>
                                <span class="stat-label">{"Strategies"}</span>
                            </div>
                        </div>
                        <button class="primary" onclick={on_generate}>{"Generate a team"}</button>
                    </div>
                </header>

                <TeamPanel />
                <Roster />
                <FavoritesPanel />

                if let Some(ModalType::HeroDetail(hero_id)) = store.modal_open.clone() {
                    <HeroModal {hero_id} />
                }
            </div>
        </ContextProvider<StoreContext>>
    }
}

fn main() {
    yew::Renderer::<App>::new().render();
}
