//! action::poll
//!
//! Waits for a fork's import to reach a terminal state.
//!
//! # State Machine
//!
//! ```text
//!            show()
//!          +--------+
//!          v        |
//!      Polling -----+
//!        |   \
//!        |    +--> Exhausted   (still in progress, attempts used up)
//!        v
//!   Finished | Failed          (terminal import status)
//! ```
//!
//! A snapshot is classified after every fetch. A terminal status always
//! wins over exhaustion, so a `failed` status observed on the last allowed
//! attempt is reported as `Failed`, not `Exhausted`.
//!
//! `Exhausted` is not an error. The fork exists on the server and is most
//! likely just slow to import; the caller gets the last snapshot.

use tracing::{info, warn};

use super::ActionConfig;
use crate::forge::{ForgeError, Project, ProjectApi};

/// Position of the polling loop, carrying the latest snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollState {
    /// Import still in progress; another attempt is allowed.
    Polling { snapshot: Project, attempts: u32 },
    /// Import finished (or reported no import at all).
    Finished { snapshot: Project, attempts: u32 },
    /// Import failed on the server.
    Failed { snapshot: Project, attempts: u32 },
    /// Import still in progress after the last allowed attempt.
    Exhausted { snapshot: Project, attempts: u32 },
}

impl PollState {
    /// Classify a snapshot taken after `attempts` status fetches.
    pub fn classify(snapshot: Project, attempts: u32, max_attempts: u32) -> Self {
        if snapshot.import_in_progress() {
            if attempts >= max_attempts {
                PollState::Exhausted { snapshot, attempts }
            } else {
                PollState::Polling { snapshot, attempts }
            }
        } else if snapshot.import_failed() {
            PollState::Failed { snapshot, attempts }
        } else {
            PollState::Finished { snapshot, attempts }
        }
    }

    /// Number of status fetches made so far.
    pub fn attempts(&self) -> u32 {
        match self {
            PollState::Polling { attempts, .. }
            | PollState::Finished { attempts, .. }
            | PollState::Failed { attempts, .. }
            | PollState::Exhausted { attempts, .. } => *attempts,
        }
    }

    /// Consume the state, returning the latest snapshot.
    pub fn into_snapshot(self) -> Project {
        match self {
            PollState::Polling { snapshot, .. }
            | PollState::Finished { snapshot, .. }
            | PollState::Failed { snapshot, .. }
            | PollState::Exhausted { snapshot, .. } => snapshot,
        }
    }
}

/// Drives [`PollState`] against a provider.
pub struct ImportPoller<'a> {
    api: &'a dyn ProjectApi,
    config: &'a ActionConfig,
}

impl<'a> ImportPoller<'a> {
    pub fn new(api: &'a dyn ProjectApi, config: &'a ActionConfig) -> Self {
        Self { api, config }
    }

    /// Poll until the forked project's import is terminal or the attempt
    /// budget is used up.
    ///
    /// The status is re-fetched with `show(forked.id)` after sleeping the
    /// configured interval. A snapshot that is already terminal returns
    /// immediately without any fetch.
    ///
    /// # Errors
    ///
    /// Propagates any error from the status fetch unchanged.
    pub async fn run(&self, forked: Project) -> Result<PollState, ForgeError> {
        let id = forked.id;
        let max_attempts = self.config.max_polling_attempts;
        let interval = self.config.polling_interval;
        let mut state = PollState::classify(forked, 0, max_attempts);

        loop {
            match state {
                PollState::Polling { snapshot, attempts } => {
                    let status = snapshot
                        .import_status
                        .as_ref()
                        .map(|s| s.as_str())
                        .unwrap_or("unknown");
                    info!(
                        project_id = id,
                        status,
                        attempt = attempts + 1,
                        "Fork status: {}, waiting {}ms...",
                        status,
                        interval.as_millis()
                    );
                    tokio::time::sleep(interval).await;

                    let next = self.api.show(id).await?;
                    state = PollState::classify(next, attempts + 1, max_attempts);
                }
                PollState::Exhausted { .. } => {
                    warn!(
                        project_id = id,
                        attempts = max_attempts,
                        "Fork is still in progress after {} attempts ({}s)",
                        max_attempts,
                        self.config.total_wait().as_secs_f64()
                    );
                    return Ok(state);
                }
                terminal => return Ok(terminal),
            }
        }
    }
}
