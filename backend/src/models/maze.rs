use serde::{Deserialize, Serialize};

/// A single square of the maze
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Cell {
    Open,
    Wall,
    Goal,
}

/// Player coordinates. `x` is the column, `y` is the row.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Hash, Eq, PartialEq)]
pub struct Position {
    pub x: usize,
    pub y: usize,
}

impl Position {
    pub const ORIGIN: Position = Position { x: 0, y: 0 };
}

/// Rectangular cell matrix, indexed as `cells[y][x]`.
/// Only built through `filled`, so `rows`/`cols` always match `cells`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<Vec<Cell>>,
}

impl Grid {
    /// Create a grid with every cell set to `cell`
    pub fn filled(rows: usize, cols: usize, cell: Cell) -> Self {
        Self {
            rows,
            cols,
            cells: vec![vec![cell; cols]; rows],
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn cells(&self) -> &[Vec<Cell>] {
        &self.cells
    }

    /// Bottom-right corner
    pub fn goal(&self) -> Position {
        Position {
            x: self.cols - 1,
            y: self.rows - 1,
        }
    }

    /// Cell at an in-bounds position
    pub fn cell(&self, pos: Position) -> Cell {
        self.cells[pos.y][pos.x]
    }

    pub fn set(&mut self, pos: Position, cell: Cell) {
        self.cells[pos.y][pos.x] = cell;
    }

    /// Constrain each axis independently to the nearest in-range value
    pub fn clamp(&self, x: i64, y: i64) -> Position {
        Position {
            x: x.clamp(0, self.cols as i64 - 1) as usize,
            y: y.clamp(0, self.rows as i64 - 1) as usize,
        }
    }
}
