pub mod game;

pub use game::{Game, NewGame, Platform, RawChartGame, UnknownPlatform};
