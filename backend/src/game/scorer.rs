use dashmap::DashMap;
use std::sync::Arc;

use crate::models::ScoreRecord;

/// Receiver for score events emitted by the maze engine
pub trait ScoreSink {
    /// A new maze started; clear the current score
    fn reset(&mut self);

    /// The player reached the goal with this score
    fn report(&mut self, score: u32);
}

/// Discards every event
impl ScoreSink for () {
    fn reset(&mut self) {}

    fn report(&mut self, _score: u32) {}
}

/// In-memory score store keyed by user id.
/// Clones share the same underlying map.
#[derive(Debug, Clone, Default)]
pub struct ScoreBoard {
    records: Arc<DashMap<i64, ScoreRecord>>,
}

impl ScoreBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset_current(&self, user_id: i64) {
        self.records.entry(user_id).or_default().reset_current();
    }

    /// Store a finished session's score and return the updated record
    pub fn record(&self, user_id: i64, score: u32) -> ScoreRecord {
        let mut entry = self.records.entry(user_id).or_default();
        entry.record(score);
        entry.value().clone()
    }

    pub fn get(&self, user_id: i64) -> Option<ScoreRecord> {
        self.records.get(&user_id).map(|r| r.value().clone())
    }

    pub fn high_score(&self, user_id: i64) -> u32 {
        self.records.get(&user_id).map(|r| r.high).unwrap_or(0)
    }
}

/// Score sink bound to a single user on a shared board
#[derive(Debug, Clone)]
pub struct PlayerScores {
    user_id: i64,
    board: ScoreBoard,
}

impl PlayerScores {
    pub fn new(user_id: i64, board: ScoreBoard) -> Self {
        Self { user_id, board }
    }

    pub fn high_score(&self) -> u32 {
        self.board.high_score(self.user_id)
    }
}

impl ScoreSink for PlayerScores {
    fn reset(&mut self) {
        self.board.reset_current(self.user_id);
    }

    fn report(&mut self, score: u32) {
        let record = self.board.record(self.user_id, score);
        tracing::info!(
            "User {} finished a maze with score {} (high score {})",
            self.user_id,
            score,
            record.high
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_board_tracks_maximum_across_sessions() {
        let board = ScoreBoard::new();
        board.record(1, 10);
        board.reset_current(1);
        board.record(1, 28);
        board.reset_current(1);
        board.record(1, 3);

        let record = board.get(1).unwrap();
        assert_eq!(record.current, 3);
        assert_eq!(record.high, 28);
    }

    #[test]
    fn test_board_keeps_users_separate() {
        let board = ScoreBoard::new();
        board.record(1, 20);
        board.record(2, 5);

        assert_eq!(board.high_score(1), 20);
        assert_eq!(board.high_score(2), 5);
        assert_eq!(board.high_score(3), 0);
        assert!(board.get(3).is_none());
    }

    #[test]
    fn test_player_scores_forward_to_shared_board() {
        let board = ScoreBoard::new();
        let mut scores = PlayerScores::new(7, board.clone());

        scores.report(14);
        assert_eq!(board.get(7).unwrap().current, 14);

        scores.reset();
        let record = board.get(7).unwrap();
        assert_eq!(record.current, 0, "Reset should clear the current score");
        assert_eq!(record.high, 14, "Reset should keep the high score");
        assert_eq!(scores.high_score(), 14);
    }

    #[test]
    fn test_reset_creates_record_for_new_user() {
        let board = ScoreBoard::new();
        board.reset_current(9);
        let record = board.get(9).unwrap();
        assert_eq!(record.current, 0);
        assert_eq!(record.high, 0);
    }
}
