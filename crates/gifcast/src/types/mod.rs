mod centis;
mod color;
mod game;

pub use centis::Centis;
pub use color::Color;
pub use game::{Game, Player, UserId};
