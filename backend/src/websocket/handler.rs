use crate::{
    auth::AuthenticatedUser,
    game::{Direction, MazeEngine, MazeSettings, PlayerScores, ScoreBoard},
    websocket::messages::{ClientMessage, ServerMessage},
    AppState,
};
use axum::{
    extract::{
        ws::{Message, WebSocket},
        State, WebSocketUpgrade,
    },
    response::IntoResponse,
};
use futures::{sink::SinkExt, stream::StreamExt};
use rand::rngs::StdRng;
use std::sync::Arc;
use tokio::sync::mpsc;
use uuid::Uuid;

/// One player's maze, owned by their WebSocket connection
pub struct MazeSession {
    pub session_id: Uuid,
    engine: MazeEngine<StdRng, PlayerScores>,
}

impl MazeSession {
    pub fn new(user_id: i64, settings: MazeSettings, rng: StdRng, board: ScoreBoard) -> Self {
        Self {
            session_id: Uuid::new_v4(),
            engine: MazeEngine::new(settings, rng, PlayerScores::new(user_id, board)),
        }
    }

    /// Start over on a freshly generated maze
    pub fn new_maze(&mut self) {
        self.session_id = Uuid::new_v4();
        self.engine.generate();
    }

    pub fn snapshot(&self) -> ServerMessage {
        ServerMessage::maze_state(self.session_id, self.engine.state())
    }
}

/// WebSocket upgrade handler with authentication
pub async fn handle_websocket(
    user: AuthenticatedUser,
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    tracing::info!(
        "WebSocket connection authenticated for user: {} ({})",
        user.username,
        user.user_id
    );
    ws.on_upgrade(move |socket| handle_socket(socket, state, user))
}

/// Handle individual WebSocket connection
async fn handle_socket(socket: WebSocket, state: Arc<AppState>, user: AuthenticatedUser) {
    let (mut sender, mut receiver) = socket.split();
    let (tx, mut rx) = mpsc::channel::<ServerMessage>(100);

    let mut session = MazeSession::new(
        user.user_id,
        state.config.game.settings,
        state.config.game.session_rng(),
        state.scores.clone(),
    );

    tracing::info!(
        "Maze session {} started for user: {} ({})",
        session.session_id,
        user.username,
        user.user_id
    );

    // Initial maze is drawn as soon as the client connects
    let _ = tx.send(session.snapshot()).await;

    // Spawn a task to send messages to the client
    let mut send_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            match serde_json::to_string(&msg) {
                Ok(json) => {
                    if sender.send(Message::Text(json.into())).await.is_err() {
                        break;
                    }
                }
                Err(e) => {
                    tracing::error!("Failed to serialize message: {}", e);
                }
            }
        }
    });

    // Handle incoming messages from the client
    let user_for_recv = user.clone();
    let mut recv_task = tokio::spawn(async move {
        while let Some(Ok(msg)) = receiver.next().await {
            match msg {
                Message::Text(text) => match serde_json::from_str::<ClientMessage>(&text) {
                    Ok(client_msg) => {
                        if let Err(e) =
                            handle_client_message(client_msg, &mut session, &tx, &user_for_recv)
                                .await
                        {
                            tracing::error!("Error handling message: {}", e);
                            let error_msg = ServerMessage::Error {
                                message: e.to_string(),
                            };
                            let _ = tx.send(error_msg).await;
                        }
                    }
                    Err(e) => {
                        tracing::warn!("Failed to parse message: {}", e);
                        let error_msg = ServerMessage::Error {
                            message: format!("Invalid message format: {}", e),
                        };
                        let _ = tx.send(error_msg).await;
                    }
                },
                Message::Close(_) => {
                    tracing::info!(
                        "Client disconnected: {} ({})",
                        user_for_recv.username,
                        user_for_recv.user_id
                    );
                    break;
                }
                _ => {}
            }
        }
    });

    // Wait for either task to finish
    tokio::select! {
        _ = (&mut send_task) => {
            recv_task.abort();
        }
        _ = (&mut recv_task) => {
            send_task.abort();
        }
    }

    tracing::info!(
        "WebSocket connection closed for user: {} ({})",
        user.username,
        user.user_id
    );
}

/// Handle individual client messages
async fn handle_client_message(
    msg: ClientMessage,
    session: &mut MazeSession,
    tx: &mpsc::Sender<ServerMessage>,
    user: &AuthenticatedUser,
) -> anyhow::Result<()> {
    match msg {
        ClientMessage::NewMaze => {
            session.new_maze();
            tracing::info!(
                "User {} ({}) started new maze session {}",
                user.username,
                user.user_id,
                session.session_id
            );
            tx.send(session.snapshot()).await?;
        }
        ClientMessage::Move { direction } => {
            apply_direction(direction, session, tx).await?;
        }
        ClientMessage::Key { key } => match Direction::from_key(&key) {
            Some(direction) => apply_direction(direction, session, tx).await?,
            None => {
                tracing::debug!(
                    "Ignoring key {:?} from user {} ({})",
                    key,
                    user.username,
                    user.user_id
                );
            }
        },
    }

    Ok(())
}

/// Move the player, push the new state, and announce a reached goal
async fn apply_direction(
    direction: Direction,
    session: &mut MazeSession,
    tx: &mpsc::Sender<ServerMessage>,
) -> anyhow::Result<()> {
    let finished = session.engine.apply(direction);
    tx.send(session.snapshot()).await?;

    if let Some(score) = finished {
        tx.send(ServerMessage::GoalReached {
            score,
            high_score: session.engine.scores().high_score(),
        })
        .await?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn test_user() -> AuthenticatedUser {
        AuthenticatedUser {
            user_id: 42,
            username: "tester".to_string(),
        }
    }

    fn open_session(rows: usize, cols: usize, board: ScoreBoard) -> MazeSession {
        let settings = MazeSettings::new(rows, cols, 0.0).unwrap();
        MazeSession::new(42, settings, StdRng::seed_from_u64(11), board)
    }

    fn send(session: &mut MazeSession, tx: &mpsc::Sender<ServerMessage>, msg: ClientMessage) {
        tokio_test::block_on(handle_client_message(msg, session, tx, &test_user())).unwrap();
    }

    #[test]
    fn test_move_pushes_state() {
        let mut session = open_session(3, 3, ScoreBoard::new());
        let (tx, mut rx) = mpsc::channel(16);

        send(
            &mut session,
            &tx,
            ClientMessage::Move {
                direction: Direction::Down,
            },
        );

        match rx.try_recv().unwrap() {
            ServerMessage::MazeState {
                player, finished, ..
            } => {
                assert_eq!((player.x, player.y), (0, 1));
                assert!(!finished);
            }
            other => panic!("Expected maze_state, got {:?}", other),
        }
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_reaching_goal_reports_score_and_high_score() {
        let board = ScoreBoard::new();
        let mut session = open_session(1, 3, board.clone());
        let (tx, mut rx) = mpsc::channel(16);

        for _ in 0..2 {
            send(
                &mut session,
                &tx,
                ClientMessage::Key {
                    key: "ArrowRight".to_string(),
                },
            );
        }

        // Two state pushes, then the goal announcement
        assert!(matches!(rx.try_recv().unwrap(), ServerMessage::MazeState { .. }));
        assert!(matches!(
            rx.try_recv().unwrap(),
            ServerMessage::MazeState { finished: true, .. }
        ));
        match rx.try_recv().unwrap() {
            ServerMessage::GoalReached { score, high_score } => {
                assert_eq!(score, 2);
                assert_eq!(high_score, 2);
            }
            other => panic!("Expected goal_reached, got {:?}", other),
        }
        assert_eq!(board.get(42).unwrap().current, 2);
    }

    #[test]
    fn test_unknown_key_is_ignored() {
        let mut session = open_session(3, 3, ScoreBoard::new());
        let (tx, mut rx) = mpsc::channel(16);

        send(
            &mut session,
            &tx,
            ClientMessage::Key {
                key: "Space".to_string(),
            },
        );

        assert!(rx.try_recv().is_err(), "Unmapped keys should not produce messages");
    }

    #[test]
    fn test_new_maze_replaces_session_and_resets_current_score() {
        let board = ScoreBoard::new();
        let mut session = open_session(1, 2, board.clone());
        let (tx, mut rx) = mpsc::channel(16);
        let first_id = session.session_id;

        send(
            &mut session,
            &tx,
            ClientMessage::Move {
                direction: Direction::Right,
            },
        );
        assert_eq!(board.get(42).unwrap().current, 1);

        send(&mut session, &tx, ClientMessage::NewMaze);
        assert_ne!(session.session_id, first_id);
        let record = board.get(42).unwrap();
        assert_eq!(record.current, 0);
        assert_eq!(record.high, 1);

        // maze_state + goal_reached from the move, then the new maze
        let mut last = None;
        while let Ok(msg) = rx.try_recv() {
            last = Some(msg);
        }
        match last {
            Some(ServerMessage::MazeState {
                session_id,
                player,
                finished,
                ..
            }) => {
                assert_eq!(session_id, session.session_id.to_string());
                assert_eq!((player.x, player.y), (0, 0));
                assert!(!finished);
            }
            other => panic!("Expected maze_state, got {:?}", other),
        }
    }
}
