use crate::components::hero_card::HeroCard;
use crate::store::{Action, CatalogStatus, ModalType, StoreContext};
use shared::models::{Hero, HeroId};
use shared::search::filter_heroes;
use yew::prelude::*;

#[function_component(Roster)]
pub fn roster() -> Html {
    let store = use_context::<StoreContext>().expect("Store context not found");

    let visible = {
        let catalog = store.catalog.clone();
        let query = store.search.clone();
        use_memo((catalog, query), |(catalog, query)| {
            filter_heroes(catalog, query)
        })
    };

    let on_search = {
        let store = store.clone();
        Callback::from(move |e: InputEvent| {
            let input: web_sys::HtmlInputElement = e.target_unchecked_into();
            store.dispatch(Action::SetSearch(input.value()));
        })
    };

    let on_toggle = {
        let store = store.clone();
        Callback::from(move |hero: Hero| store.dispatch(Action::ToggleFavorite(hero)))
    };

    let on_open = {
        let store = store.clone();
        Callback::from(move |id: HeroId| store.dispatch(Action::OpenModal(ModalType::HeroDetail(id))))
    };

    html! {
        <section class="panel">
            <div class="panel-header">
                <div>
                    <h2>{"All heroes"}</h2>
                    <p class="muted">{"Tap a card to see full details."}</p>
                </div>
                <label class="search">
                    {"Search"}
                    <input value={store.search.clone()} oninput={on_search} placeholder="Try Batman" />
                </label>
            </div>

            if store.catalog_status == CatalogStatus::Unavailable {
                <p class="notice">{"The hero service is unreachable right now."}</p>
            }

            <div class="grid">
                if store.catalog_status == CatalogStatus::Loading {
                    <p class="muted">{"Loading heroes..."}</p>
                } else if visible.is_empty() && !store.catalog.is_empty() {
                    <p class="muted">{format!("No hero matches \"{}\".", store.search.trim())}</p>
                }
                { for visible.iter().map(|hero| html! {
                    <HeroCard
                        key={hero.id}
                        hero={hero.clone()}
                        is_favorite={store.favorites.contains(hero.id)}
                        pending={store.favorites.is_pending(hero.id)}
                        on_toggle={on_toggle.clone()}
                        on_open={Some(on_open.clone())}
                    />
                })}
            </div>
        </section>
    }
}
