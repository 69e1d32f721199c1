// Maze game engine modules

pub mod engine;
pub mod grid;
pub mod input;
pub mod render;
pub mod scorer;

pub use engine::{GameState, MazeEngine};
pub use grid::MazeSettings;
pub use input::Direction;
pub use scorer::{PlayerScores, ScoreBoard};
