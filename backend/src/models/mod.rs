pub mod maze;
pub mod score;

pub use maze::{Cell, Grid, Position};
pub use score::ScoreRecord;
