pub mod favorites_panel;
pub mod hero_card;
pub mod hero_modal;
pub mod roster;
pub mod team_panel;
