use rand::Rng;
use thiserror::Error;

use crate::models::{Cell, Grid, Position};

pub const DEFAULT_ROWS: usize = 15;
pub const DEFAULT_COLS: usize = 15;
pub const DEFAULT_WALL_PROBABILITY: f64 = 0.3;
/// Upper bound on either side of the maze
pub const MAX_DIMENSION: usize = 1024;

#[derive(Debug, Error, PartialEq)]
pub enum MazeError {
    #[error("maze must have at least one row and one column (got {rows}x{cols})")]
    EmptyGrid { rows: usize, cols: usize },
    /// The start and goal corners must be distinct cells
    #[error("maze needs at least two cells so start and goal differ (got {rows}x{cols})")]
    SingleCell { rows: usize, cols: usize },
    #[error("maze sides must not exceed {max} (got {rows}x{cols})", max = MAX_DIMENSION)]
    TooLarge { rows: usize, cols: usize },
    #[error("wall probability must be within 0.0..=1.0 (got {0})")]
    InvalidWallProbability(f64),
}

/// Dimensions and wall density for generated mazes
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MazeSettings {
    rows: usize,
    cols: usize,
    wall_probability: f64,
}

impl MazeSettings {
    pub fn new(rows: usize, cols: usize, wall_probability: f64) -> Result<Self, MazeError> {
        if rows == 0 || cols == 0 {
            return Err(MazeError::EmptyGrid { rows, cols });
        }
        if rows > MAX_DIMENSION || cols > MAX_DIMENSION {
            return Err(MazeError::TooLarge { rows, cols });
        }
        if rows * cols < 2 {
            return Err(MazeError::SingleCell { rows, cols });
        }
        if !(0.0..=1.0).contains(&wall_probability) {
            return Err(MazeError::InvalidWallProbability(wall_probability));
        }
        Ok(Self {
            rows,
            cols,
            wall_probability,
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn wall_probability(&self) -> f64 {
        self.wall_probability
    }
}

impl Default for MazeSettings {
    fn default() -> Self {
        Self {
            rows: DEFAULT_ROWS,
            cols: DEFAULT_COLS,
            wall_probability: DEFAULT_WALL_PROBABILITY,
        }
    }
}

pub struct GridGenerator;

impl GridGenerator {
    /// Generate a new maze grid.
    ///
    /// Every cell except the top-left start rolls independently for a wall.
    /// The bottom-right cell is then forced to `Goal`. No reachability check
    /// is made, so the goal may be walled off.
    pub fn generate(settings: &MazeSettings, rng: &mut impl Rng) -> Grid {
        let mut grid = Grid::filled(settings.rows, settings.cols, Cell::Open);

        for y in 0..settings.rows {
            for x in 0..settings.cols {
                let pos = Position { x, y };
                if pos == Position::ORIGIN {
                    continue;
                }
                if rng.random::<f64>() < settings.wall_probability {
                    grid.set(pos, Cell::Wall);
                }
            }
        }

        let goal = grid.goal();
        grid.set(goal, Cell::Goal);

        grid
    }
}
