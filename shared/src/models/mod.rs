pub mod favorite;
pub mod hero;
pub mod team;

pub use favorite::*;
pub use hero::*;
pub use team::*;
