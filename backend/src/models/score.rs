use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Running score for one user across maze sessions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreRecord {
    /// Score of the latest session, zeroed whenever a new maze starts
    pub current: u32,
    /// Best score ever reported. Never lowered.
    pub high: u32,
    pub updated_at: DateTime<Utc>,
}

impl ScoreRecord {
    pub fn new() -> Self {
        Self {
            current: 0,
            high: 0,
            updated_at: Utc::now(),
        }
    }

    pub fn record(&mut self, score: u32) {
        self.current = score;
        if self.current > self.high {
            self.high = self.current;
        }
        self.updated_at = Utc::now();
    }

    pub fn reset_current(&mut self) {
        self.current = 0;
        self.updated_at = Utc::now();
    }
}

impl Default for ScoreRecord {
    fn default() -> Self {
        Self::new()
    }
}
