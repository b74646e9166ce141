//! Remote score service client
//!
//! Thin request/response wrapper around the leaderboard HTTP API. The
//! server keeps one row per device and only ever raises the stored best
//! (max-wins), which makes submissions safe to repeat.
//!
//! The session depends on the [`ScoreService`] trait, not this client,
//! so tests can swap in an in-memory implementation.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::REQUEST_TIMEOUT_SECS;

/// Leaderboard page size used when the caller has no preference
pub const DEFAULT_LEADERBOARD_LIMIT: usize = 10;

/// Errors from the score service boundary
///
/// All of these are non-fatal to the simulation: callers log, keep their
/// cached values, and retry on the next natural trigger.
#[derive(Debug, Error)]
pub enum ScoreServiceError {
    #[error("request failed: {0}")]
    Http(#[from] Box<ureq::Error>),
    #[error("malformed response: {0}")]
    Malformed(#[from] std::io::Error),
    #[error("service rejected request: {0}")]
    Api(String),
}

/// Body of `POST /submit-score`
#[derive(Debug, Clone, Serialize)]
pub struct ScoreSubmission {
    pub device_id: String,
    pub player_name: String,
    pub score: u32,
}

/// Response of `POST /submit-score`
///
/// The server omits fields depending on the branch taken (new record,
/// not a record, first score), so everything past `success` is optional.
#[derive(Debug, Clone, Deserialize)]
pub struct SubmitOutcome {
    pub success: bool,
    #[serde(default)]
    pub new_record: bool,
    #[serde(default)]
    pub score: Option<u32>,
    #[serde(default)]
    pub previous_best: Option<u32>,
    #[serde(default)]
    pub current_best: Option<u32>,
    #[serde(default)]
    pub submitted_score: Option<u32>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl SubmitOutcome {
    /// The server-side best after this submission, whichever field the
    /// server chose to report it in.
    pub fn best_after_submit(&self) -> Option<u32> {
        self.current_best.or(self.score)
    }
}

/// One row of `GET /leaderboard`
#[derive(Debug, Clone, Deserialize)]
pub struct LeaderboardEntry {
    pub player_name: String,
    pub best_score: u32,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Stored record of `GET /player-score/{device_id}`
#[derive(Debug, Clone, Deserialize)]
pub struct PlayerRecord {
    pub player_name: String,
    pub best_score: u32,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

#[derive(Debug, Deserialize)]
struct LeaderboardPage {
    success: bool,
    #[serde(default)]
    leaderboard: Vec<LeaderboardEntry>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PlayerEnvelope {
    success: bool,
    #[serde(default)]
    player: Option<PlayerRecord>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct HealthEnvelope {
    #[serde(default)]
    message: String,
}

/// The leaderboard API surface the session talks to
pub trait ScoreService: Send {
    /// `GET /` liveness probe; returns the service banner.
    fn health(&self) -> Result<String, ScoreServiceError>;

    /// `POST /submit-score`. Max-wins server side: submitting a score
    /// at or below the stored best reports `new_record = false` and
    /// never lowers the stored value.
    fn submit_score(&self, submission: &ScoreSubmission)
    -> Result<SubmitOutcome, ScoreServiceError>;

    /// `GET /leaderboard?limit=N`, sorted by best score descending.
    fn leaderboard(&self, limit: usize) -> Result<Vec<LeaderboardEntry>, ScoreServiceError>;

    /// `GET /player-score/{device_id}`; `None` for an unknown device.
    fn player_score(&self, device_id: &str) -> Result<Option<PlayerRecord>, ScoreServiceError>;
}

/// Blocking HTTP implementation of [`ScoreService`]
///
/// Runs on the score-sync worker thread, never on the simulation thread.
pub struct HttpScoreService {
    agent: ureq::Agent,
    base_url: String,
}

impl HttpScoreService {
    pub fn new(base_url: impl Into<String>) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build();
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { agent, base_url }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl ScoreService for HttpScoreService {
    fn health(&self) -> Result<String, ScoreServiceError> {
        let envelope: HealthEnvelope = self
            .agent
            .get(&self.url("/"))
            .call()
            .map_err(Box::new)?
            .into_json()?;
        Ok(envelope.message)
    }

    fn submit_score(
        &self,
        submission: &ScoreSubmission,
    ) -> Result<SubmitOutcome, ScoreServiceError> {
        let outcome: SubmitOutcome = self
            .agent
            .post(&self.url("/submit-score"))
            .send_json(submission)
            .map_err(Box::new)?
            .into_json()?;
        if !outcome.success {
            return Err(ScoreServiceError::Api(
                outcome.error.unwrap_or_else(|| "submission failed".into()),
            ));
        }
        Ok(outcome)
    }

    fn leaderboard(&self, limit: usize) -> Result<Vec<LeaderboardEntry>, ScoreServiceError> {
        let page: LeaderboardPage = self
            .agent
            .get(&self.url(&format!("/leaderboard?limit={limit}")))
            .call()
            .map_err(Box::new)?
            .into_json()?;
        if !page.success {
            return Err(ScoreServiceError::Api(
                page.error.unwrap_or_else(|| "leaderboard failed".into()),
            ));
        }
        Ok(page.leaderboard)
    }

    fn player_score(&self, device_id: &str) -> Result<Option<PlayerRecord>, ScoreServiceError> {
        let envelope: PlayerEnvelope = self
            .agent
            .get(&self.url(&format!("/player-score/{device_id}")))
            .call()
            .map_err(Box::new)?
            .into_json()?;
        if !envelope.success {
            return Err(ScoreServiceError::Api(
                envelope.error.unwrap_or_else(|| "player lookup failed".into()),
            ));
        }
        Ok(envelope.player)
    }
}


#[cfg(test)]
mod tests {
    use super::fake::MemoryScoreService;
    use super::*;

    #[test]
    fn test_parse_new_record_response() {
        let json = r#"{
            "success": true,
            "message": "New high score recorded!",
            "new_record": true,
            "score": 80,
            "previous_best": 50
        }"#;
        let outcome: SubmitOutcome = serde_json::from_str(json).unwrap();
        assert!(outcome.success);
        assert!(outcome.new_record);
        assert_eq!(outcome.best_after_submit(), Some(80));
        assert_eq!(outcome.previous_best, Some(50));
    }

    #[test]
    fn test_parse_not_a_record_response() {
        let json = r#"{
            "success": true,
            "message": "Score submitted, but not a new high score",
            "new_record": false,
            "current_best": 50,
            "submitted_score": 30
        }"#;
        let outcome: SubmitOutcome = serde_json::from_str(json).unwrap();
        assert!(!outcome.new_record);
        assert_eq!(outcome.best_after_submit(), Some(50));
    }

    #[test]
    fn test_parse_leaderboard_page() {
        let json = r#"{
            "success": true,
            "count": 2,
            "leaderboard": [
                {"player_name": "Ava", "best_score": 42, "created_at": "2025-06-01"},
                {"player_name": "Ben", "best_score": 17, "created_at": "2025-06-02"}
            ]
        }"#;
        let page: LeaderboardPage = serde_json::from_str(json).unwrap();
        assert!(page.success);
        assert_eq!(page.leaderboard.len(), 2);
        assert_eq!(page.leaderboard[0].player_name, "Ava");
        assert_eq!(page.leaderboard[0].best_score, 42);
    }

    #[test]
    fn test_parse_unknown_player_response() {
        let json = r#"{"success": true, "player": null, "message": "No score found"}"#;
        let envelope: PlayerEnvelope = serde_json::from_str(json).unwrap();
        assert!(envelope.success);
        assert!(envelope.player.is_none());
    }

    #[test]
    fn test_max_wins_submission_contract() {
        let service = MemoryScoreService::with_record("dev-1", "Ava", 50);

        // Lower score: rejected as a record, stored best untouched
        let low = service
            .submit_score(&ScoreSubmission {
                device_id: "dev-1".into(),
                player_name: "Ava".into(),
                score: 30,
            })
            .unwrap();
        assert!(!low.new_record);
        assert_eq!(low.current_best, Some(50));
        assert_eq!(service.best("dev-1"), Some(50));

        // Higher score: recorded
        let high = service
            .submit_score(&ScoreSubmission {
                device_id: "dev-1".into(),
                player_name: "Ava".into(),
                score: 80,
            })
            .unwrap();
        assert!(high.new_record);
        assert_eq!(high.best_after_submit(), Some(80));
        assert_eq!(service.best("dev-1"), Some(80));
    }

    #[test]
    fn test_leaderboard_sorted_descending() {
        let service = MemoryScoreService::default();
        for (id, name, score) in [("a", "Ava", 10), ("b", "Ben", 30), ("c", "Cyd", 20)] {
            service
                .submit_score(&ScoreSubmission {
                    device_id: id.into(),
                    player_name: name.into(),
                    score,
                })
                .unwrap();
        }
        let entries = service.leaderboard(10).unwrap();
        let scores: Vec<u32> = entries.iter().map(|e| e.best_score).collect();
        assert_eq!(scores, vec![30, 20, 10]);
    }
}
