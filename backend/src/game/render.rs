use crate::{game::engine::GameState, models::Cell};

const WALL: char = '#';
const GOAL: char = 'G';
const OPEN: char = '.';
const PLAYER: char = '@';

/// Draw the maze as text, one line per row, with the player marker on top
pub fn render(state: &GameState) -> String {
    state
        .grid
        .cells()
        .iter()
        .enumerate()
        .map(|(y, row)| {
            row.iter()
                .enumerate()
                .map(|(x, cell)| {
                    if state.player.x == x && state.player.y == y {
                        PLAYER
                    } else {
                        match cell {
                            Cell::Wall => WALL,
                            Cell::Goal => GOAL,
                            Cell::Open => OPEN,
                        }
                    }
                })
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join("\n")
}
