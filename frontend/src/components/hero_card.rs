use shared::models::{Hero, HeroId};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct HeroCardProps {
    pub hero: Hero,
    pub is_favorite: bool,
    #[prop_or_default]
    pub pending: bool,
    pub on_toggle: Callback<Hero>,
    /// Opens the detail view when set
    #[prop_or_default]
    pub on_open: Option<Callback<HeroId>>,
}

#[function_component(HeroCard)]
pub fn hero_card(props: &HeroCardProps) -> Html {
    let hero = &props.hero;

    let on_heart = {
        let on_toggle = props.on_toggle.clone();
        let hero = hero.clone();
        Callback::from(move |e: MouseEvent| {
            e.prevent_default();
            e.stop_propagation();
            on_toggle.emit(hero.clone());
        })
    };

    let on_click = props.on_open.clone().map(|on_open| {
        let id = hero.id;
        Callback::from(move |_: MouseEvent| on_open.emit(id))
    });

    let label = if props.is_favorite {
        "Remove favorite"
    } else {
        "Add favorite"
    };

    html! {
        <div class={classes!("card", props.on_open.is_some().then_some("clickable"))} onclick={on_click}>
            <div class="card-image">
                if let Some(url) = &hero.image_url {
                    <img src={url.clone()} alt={hero.name.clone()} loading="lazy" />
                } else {
                    <div class="image-fallback">{"No image"}</div>
                }
            </div>
            <div class="card-body">
                <div>
                    <h3>{&hero.name}</h3>
                    <p class="muted">
                        {format!(
                            "{} · {}",
                            hero.publisher.as_deref().unwrap_or("Unknown"),
                            hero.alignment.as_deref().unwrap_or("n/a")
                        )}
                    </p>
                </div>
                <button
                    class={classes!("heart", props.is_favorite.then_some("active"))}
                    onclick={on_heart}
                    disabled={props.pending}
                    aria-label={label}
                    title={label}
                >
                    { if props.is_favorite { "♥" } else { "♡" } }
                </button>
            </div>
        </div>
    }
}
