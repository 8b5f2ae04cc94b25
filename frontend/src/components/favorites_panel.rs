use crate::components::hero_card::HeroCard;
use crate::favorites::LoadPhase;
use crate::store::{Action, ModalType, StoreContext};
use shared::models::{Hero, HeroId};
use yew::prelude::*;

#[function_component(FavoritesPanel)]
pub fn favorites_panel() -> Html {
    let store = use_context::<StoreContext>().expect("Store context not found");
    let favorites = &store.favorites;

    let on_toggle = {
        let store = store.clone();
        Callback::from(move |hero: Hero| store.dispatch(Action::ToggleFavorite(hero)))
    };

    let on_open = {
        let store = store.clone();
        Callback::from(move |id: HeroId| store.dispatch(Action::OpenModal(ModalType::HeroDetail(id))))
    };

    let on_dismiss = {
        let store = store.clone();
        Callback::from(move |_| store.dispatch(Action::DismissFavoriteError))
    };

    html! {
        <section class="panel">
            <div class="panel-header">
                <div>
                    <h2>{"Favorites"}</h2>
                    <p class="muted">{"Your personal hall of fame."}</p>
                </div>
                <a class="text-link" href="#top">{"Back to top"}</a>
            </div>

            if let Some(err) = favorites.last_error() {
                <div class="notice error">
                    <span>{err.to_string()}</span>
                    <button class="close-btn" onclick={on_dismiss}>{"×"}</button>
                </div>
            }
            if !store.client.is_set() {
                <p class="notice">{"Favorites need browser storage, which is unavailable."}</p>
            } else if favorites.is_degraded() {
                <p class="notice">{"Saved favorites could not be loaded."}</p>
            }

            <div class="grid">
                if favorites.phase() == LoadPhase::Loading {
                    <p class="muted">{"Loading favorites..."}</p>
                } else if favorites.is_empty() {
                    <p class="muted">{"No favorites yet. Tap a heart to save one."}</p>
                }
                { for favorites.heroes().iter().map(|hero| html! {
                    <HeroCard
                        key={hero.id}
                        hero={hero.clone()}
                        is_favorite={true}
                        pending={favorites.is_pending(hero.id)}
                        on_toggle={on_toggle.clone()}
                        on_open={Some(on_open.clone())}
                    />
                })}
            </div>
        </section>
    }
}
