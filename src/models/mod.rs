pub mod game;
pub mod player;
pub mod scoreboard;
pub mod team;

// Re-export core models for easy access
pub use game::{Game, GameFilter, GameOrder, WinFilter};
pub use player::Player;
pub use team::Team;
