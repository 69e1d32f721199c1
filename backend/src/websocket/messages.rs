use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    game::{Direction, GameState},
    models::{Cell, Position},
};

/// Messages sent from client to server
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    /// Throw away the current maze and generate a new one
    NewMaze,
    Move {
        direction: Direction,
    },
    /// Raw key name as reported by the browser, e.g. "ArrowUp"
    Key {
        key: String,
    },
}

/// Messages sent from server to client
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    MazeState {
        session_id: String,
        rows: usize,
        cols: usize,
        grid: Vec<Vec<Cell>>,
        player: Position,
        finished: bool,
    },
    GoalReached {
        score: u32,
        high_score: u32,
    },
    Error {
        message: String,
    },
}

impl ServerMessage {
    pub fn maze_state(session_id: Uuid, state: &GameState) -> Self {
        ServerMessage::MazeState {
            session_id: session_id.to_string(),
            rows: state.grid.rows(),
            cols: state.grid.cols(),
            grid: state.grid.cells().to_vec(),
            player: state.player,
            finished: state.finished,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_client_messages() {
        let msg: ClientMessage = serde_json::from_str(r#"{"type":"new_maze"}"#).unwrap();
        assert!(matches!(msg, ClientMessage::NewMaze));

        let msg: ClientMessage =
            serde_json::from_str(r#"{"type":"move","direction":"left"}"#).unwrap();
        assert!(matches!(
            msg,
            ClientMessage::Move {
                direction: Direction::Left
            }
        ));

        let msg: ClientMessage =
            serde_json::from_str(r#"{"type":"key","key":"ArrowDown"}"#).unwrap();
        assert!(matches!(msg, ClientMessage::Key { key } if key == "ArrowDown"));
    }

    #[test]
    fn test_unknown_direction_is_rejected() {
        let result = serde_json::from_str::<ClientMessage>(r#"{"type":"move","direction":"north"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_goal_reached_shape() {
        let value = serde_json::to_value(ServerMessage::GoalReached {
            score: 28,
            high_score: 30,
        })
        .unwrap();
        assert_eq!(
            value,
            json!({"type": "goal_reached", "score": 28, "high_score": 30})
        );
    }
}
