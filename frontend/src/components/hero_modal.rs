use crate::api::{HeroApi, HttpApi};
use crate::store::{Action, StoreContext};
use shared::models::{Hero, HeroId, PowerStat};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct HeroModalProps {
    pub hero_id: HeroId,
}

#[derive(Clone, PartialEq)]
enum Detail {
    Loading,
    Found(Hero),
    NotFound,
}

#[function_component(HeroModal)]
pub fn hero_modal(props: &HeroModalProps) -> Html {
    let store = use_context::<StoreContext>().expect("Store context not found");
    let detail = use_state(|| Detail::Loading);

    {
        let detail = detail.clone();
        use_effect_with(props.hero_id, move |id| {
            let id = *id;
            detail.set(Detail::Loading);
            yew::platform::spawn_local(async move {
                match HttpApi::default().get_hero(id).await {
                    Ok(hero) => detail.set(Detail::Found(hero)),
                    Err(e) => {
                        tracing::warn!("Failed to load hero {}: {}", id, e);
                        detail.set(Detail::NotFound);
                    }
                }
            });
            || {}
        });
    }

    let on_close = {
        let store = store.clone();
        Callback::from(move |_| store.dispatch(Action::CloseModal))
    };

    let body = match &*detail {
        Detail::Loading => html! { <p class="muted">{"Loading hero..."}</p> },
        Detail::NotFound => html! { <p class="muted">{"Hero not found."}</p> },
        Detail::Found(hero) => {
            let is_favorite = store.favorites.contains(hero.id);
            let on_toggle = {
                let store = store.clone();
                let hero = hero.clone();
                Callback::from(move |_: MouseEvent| {
                    store.dispatch(Action::ToggleFavorite(hero.clone()))
                })
            };
            html! {
                <div class="detail-card">
                    <div class="detail-image">
                        if let Some(url) = &hero.image_url {
                            <img src={url.clone()} alt={hero.name.clone()} />
                        } else {
                            <div class="image-fallback">{"No image"}</div>
                        }
                    </div>
                    <div class="detail-info">
                        <div class="detail-header">
                            <div>
                                <h1>{&hero.name}</h1>
                                <p class="muted">
                                    {format!(
                                        "{} · {}",
                                        hero.full_name.as_deref().unwrap_or("Unknown identity"),
                                        hero.publisher.as_deref().unwrap_or("n/a")
                                    )}
                                </p>
                            </div>
                            <button
                                class={classes!("heart", is_favorite.then_some("active"))}
                                onclick={on_toggle}
                                disabled={!store.client.is_set() || store.favorites.is_pending(hero.id)}
                            >
                                { if is_favorite { "♥" } else { "♡" } }
                            </button>
                        </div>
                        <div class="detail-meta">
                            { meta("Alignment", hero.alignment.as_deref()) }
                            { meta("Gender", hero.gender.as_deref()) }
                            { meta("Race", hero.race.as_deref()) }
                        </div>
                        <div class="stats">
                            { for PowerStat::ALL.into_iter().map(|stat| html! {
                                <div key={stat.as_str()} class="stat-row">
                                    <span>{stat.label()}</span>
                                    <span>{hero.stat(stat).map(|v| v.to_string()).unwrap_or_else(|| "n/a".to_string())}</span>
                                </div>
                            })}
                        </div>
                    </div>
                </div>
            }
        }
    };

    html! {
        <div class="modal-overlay" onclick={on_close.clone()}>
            <div class="modal-content" onclick={|e: MouseEvent| e.stop_propagation()}>
                <div class="modal-header">
                    <h2 class="modal-title">{"Hero details"}</h2>
                    <button class="close-btn" onclick={on_close}>{"×"}</button>
                </div>
                <div class="modal-body">
                    { body }
                </div>
            </div>
        </div>
    }
}

fn meta(label: &str, value: Option<&str>) -> Html {
    html! {
        <div>
            <span class="label">{label.to_string()}</span>
            <span>{value.unwrap_or("n/a").to_string()}</span>
        </div>
    }
}
