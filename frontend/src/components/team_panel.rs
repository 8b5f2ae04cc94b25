use crate::components::hero_card::HeroCard;
use crate::store::{Action, StoreContext};
use shared::models::{Hero, PowerStat, Strategy};
use yew::prelude::*;

#[function_component(TeamPanel)]
pub fn team_panel() -> Html {
    let store = use_context::<StoreContext>().expect("Store context not found");
    let team = &store.team;

    let on_strategy = {
        let store = store.clone();
        Callback::from(move |e: Event| {
            let select: web_sys::HtmlSelectElement = e.target_unchecked_into();
            if let Some(strategy) = Strategy::parse(&select.value()) {
                store.dispatch(Action::SelectStrategy(strategy));
            }
        })
    };

    let on_power = {
        let store = store.clone();
        Callback::from(move |e: Event| {
            let select: web_sys::HtmlSelectElement = e.target_unchecked_into();
            if let Some(power) = PowerStat::parse(&select.value()) {
                store.dispatch(Action::SelectPower(power));
            }
        })
    };

    let on_request = {
        let store = store.clone();
        Callback::from(move |_| store.dispatch(Action::RequestTeam))
    };

    let on_toggle = {
        let store = store.clone();
        Callback::from(move |hero: Hero| store.dispatch(Action::ToggleFavorite(hero)))
    };

    let on_dismiss = {
        let store = store.clone();
        Callback::from(move |_| store.dispatch(Action::DismissTeamError))
    };

    let selected_power = store.power.unwrap_or_default();
    let heroes = team.result().map(|r| r.heroes.as_slice()).unwrap_or_default();

    html! {
        <section class="panel">
            <div class="panel-header">
                <div>
                    <h2>{"Team recommendations"}</h2>
                    <p class="muted">{"Mix heroes, pick power leaders, or go random."}</p>
                </div>
                <div class="controls">
                    <label>
                        {"Strategy"}
                        <select onchange={on_strategy}>
                            { for Strategy::ALL.into_iter().map(|s| html! {
                                <option value={s.as_str()} selected={s == store.strategy}>{s.label()}</option>
                            })}
                        </select>
                    </label>
                    if store.strategy == Strategy::Power {
                        <label>
                            {"Power"}
                            <select onchange={on_power}>
                                { for PowerStat::ALL.into_iter().map(|p| html! {
                                    <option value={p.as_str()} selected={p == selected_power}>{p.as_str()}</option>
                                })}
                            </select>
                        </label>
                    }
                    <button class="primary" onclick={on_request}>
                        { if team.is_loading() { "Generating..." } else { "Get team" } }
                    </button>
                </div>
            </div>

            if let Some(err) = team.last_error() {
                <div class="notice error">
                    <span>{format!("Could not build a team: {}", err)}</span>
                    <button class="close-btn" onclick={on_dismiss}>{"×"}</button>
                </div>
            }

            <div class="team-grid">
                if heroes.is_empty() {
                    <p class="muted">{"No team yet. Click \"Get team\" to start."}</p>
                }
                { for heroes.iter().map(|hero| html! {
                    <HeroCard
                        key={hero.id}
                        hero={hero.clone()}
                        is_favorite={store.favorites.contains(hero.id)}
                        pending={store.favorites.is_pending(hero.id)}
                        on_toggle={on_toggle.clone()}
                    />
                })}
            </div>
            if let Some(reason) = team.result().and_then(|r| r.reason.as_ref()) {
                <p class="reason">{reason.clone()}</p>
            }
        </section>
    }
}
