//! Fire-and-forget bridge to the score service
//!
//! The simulation thread never performs network I/O. Requests go over a
//! channel to one detached worker thread that runs the blocking client;
//! resolved values come back over a second channel and are read on the
//! next frame. Dropping [`ScoreSync`] closes the request channel and the
//! worker winds down after finishing whatever is in flight — restarts
//! and shutdown never cancel a submission mid-request.

use crossbeam_channel::{Receiver, Sender, unbounded};

use crate::leaderboard::{ScoreService, ScoreSubmission, SubmitOutcome};

/// Work items for the worker thread
#[derive(Debug)]
enum SyncRequest {
    /// Fetch the stored best for a device
    RefreshBest { device_id: String },
    /// Push a finished run's score
    Submit(ScoreSubmission),
}

/// Resolved values surfaced back to the session
#[derive(Debug)]
pub enum SyncUpdate {
    /// Stored best for this device; `None` means no record yet
    RemoteBest(Option<u32>),
    /// A submission round-tripped
    Submitted(SubmitOutcome),
}

/// Handle owned by the session
pub struct ScoreSync {
    requests: Sender<SyncRequest>,
    updates: Receiver<SyncUpdate>,
}

impl ScoreSync {
    /// Start the worker thread around a service implementation.
    pub fn spawn(service: Box<dyn ScoreService>) -> Self {
        let (request_tx, request_rx) = unbounded();
        let (update_tx, update_rx) = unbounded();

        let spawned = std::thread::Builder::new()
            .name("score-sync".to_string())
            .spawn(move || worker(service, request_rx, update_tx));
        if let Err(err) = spawned {
            // Degraded but not fatal: requests will go nowhere, exactly
            // like a missing service
            log::error!("could not start score-sync worker: {err}");
        }

        Self {
            requests: request_tx,
            updates: update_rx,
        }
    }

    /// Ask for the stored best of this device.
    pub fn request_best_refresh(&self, device_id: &str) {
        let _ = self.requests.send(SyncRequest::RefreshBest {
            device_id: device_id.to_string(),
        });
    }

    /// Queue a score submission; the result arrives via [`ScoreSync::poll`].
    pub fn submit(&self, submission: ScoreSubmission) {
        let _ = self.requests.send(SyncRequest::Submit(submission));
    }

    /// Drain everything the worker resolved since the last poll.
    pub fn poll(&self) -> Vec<SyncUpdate> {
        self.updates.try_iter().collect()
    }
}

fn worker(
    service: Box<dyn ScoreService>,
    requests: Receiver<SyncRequest>,
    updates: Sender<SyncUpdate>,
) {
    // Runs until the session drops its request sender
    for request in requests.iter() {
        match request {
            SyncRequest::RefreshBest { device_id } => match service.player_score(&device_id) {
                Ok(record) => {
                    let best = record.map(|r| r.best_score);
                    log::debug!("remote best resolved: {best:?}");
                    let _ = updates.send(SyncUpdate::RemoteBest(best));
                }
                // Transient by assumption; the session keeps its cache
                Err(err) => log::warn!("best-score refresh failed: {err}"),
            },
            SyncRequest::Submit(submission) => {
                let score = submission.score;
                match service.submit_score(&submission) {
                    Ok(outcome) => {
                        if outcome.new_record {
                            log::info!("new remote record: {score}");
                        } else {
                            log::debug!("score {score} submitted, not a record");
                        }
                        let _ = updates.send(SyncUpdate::Submitted(outcome));
                    }
                    Err(err) => log::warn!("score submission failed: {err}"),
                }
            }
        }
    }
}
