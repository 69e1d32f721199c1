use rand::Rng;
use serde::Serialize;

use crate::{
    game::{
        grid::{GridGenerator, MazeSettings},
        input::Direction,
        render::render,
        scorer::ScoreSink,
    },
    models::{Cell, Grid, Position},
};

/// Snapshot of one maze session
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameState {
    pub grid: Grid,
    pub player: Position,
    /// Set once the player stands on the goal. Only a new maze clears it.
    pub finished: bool,
}

impl GameState {
    /// Fresh session on `grid` with the player at the top-left corner
    pub fn start(grid: Grid) -> Self {
        Self {
            grid,
            player: Position::ORIGIN,
            finished: false,
        }
    }

    /// State after stepping by (dx, dy).
    ///
    /// The target is clamped to the grid first, then checked: a wall rejects
    /// the whole move, the goal finishes the session. Finished sessions
    /// ignore moves.
    pub fn moved(&self, dx: i32, dy: i32) -> GameState {
        let mut next = self.clone();
        next.step(dx, dy);
        next
    }

    fn step(&mut self, dx: i32, dy: i32) {
        if self.finished {
            return;
        }

        let target = self.grid.clamp(
            self.player.x as i64 + i64::from(dx),
            self.player.y as i64 + i64::from(dy),
        );

        match self.grid.cell(target) {
            Cell::Wall => {}
            Cell::Goal => {
                self.player = target;
                self.finished = true;
            }
            Cell::Open => self.player = target,
        }
    }

    /// Sum of the player's coordinates, available once finished.
    /// Saturates for grids built outside `MazeSettings` bounds.
    pub fn score(&self) -> Option<u32> {
        self.finished
            .then(|| u32::try_from(self.player.x + self.player.y).unwrap_or(u32::MAX))
    }
}

/// Owns a single maze session and reports its outcome to a score sink
pub struct MazeEngine<R, S> {
    settings: MazeSettings,
    rng: R,
    scores: S,
    state: GameState,
}

impl<R: Rng, S: ScoreSink> MazeEngine<R, S> {
    /// Create an engine and generate its first maze
    pub fn new(settings: MazeSettings, mut rng: R, mut scores: S) -> Self {
        let state = Self::fresh_state(&settings, &mut rng, &mut scores);
        Self {
            settings,
            rng,
            scores,
            state,
        }
    }

    /// Replace the current session with a newly generated maze
    pub fn generate(&mut self) -> &GameState {
        self.state = Self::fresh_state(&self.settings, &mut self.rng, &mut self.scores);
        &self.state
    }

    fn fresh_state(settings: &MazeSettings, rng: &mut R, scores: &mut S) -> GameState {
        let state = GameState::start(GridGenerator::generate(settings, rng));
        scores.reset();
        tracing::debug!(
            "Generated {}x{} maze:\n{}",
            settings.rows(),
            settings.cols(),
            render(&state)
        );
        state
    }

    /// Apply a unit step. Returns the score when this move reached the goal.
    pub fn move_player(&mut self, dx: i32, dy: i32) -> Option<u32> {
        let next = self.state.moved(dx, dy);
        let reached_goal = next.finished && !self.state.finished;
        self.state = next;

        if !reached_goal {
            return None;
        }
        let score = self.state.score()?;
        self.scores.report(score);
        Some(score)
    }

    pub fn apply(&mut self, direction: Direction) -> Option<u32> {
        let (dx, dy) = direction.delta();
        self.move_player(dx, dy)
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn scores(&self) -> &S {
        &self.scores
    }
}
