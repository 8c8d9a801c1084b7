//! action
//!
//! The `gitlab:project:fork` action.
//!
//! # Lifecycle
//!
//! One invocation runs these phases in order:
//!
//! 1. Validate the input ([`ForkRequest::from_value`])
//! 2. Connect a client for the request's base URL and token
//! 3. Build fork parameters and call `fork`
//! 4. Poll `show` until the import is terminal or the budget is used up
//! 5. Return a [`ForkOutcome`] built from the last snapshot
//!
//! Provider errors raised in steps 2 to 4 are classified into
//! [`ActionError`]. A fork already created on the server is never deleted,
//! even when a later step fails.
//!
//! # Modules
//!
//! - `request`: Input parsing and fork parameter construction
//! - `poll`: Import polling state machine
//! - `errors`: Error taxonomy and classification
//! - `outcome`: Output of a successful fork
//! - [`schema`]: Input/output JSON Schemas
//!
//! # Example
//!
//! ```ignore
//! use gitlab_fork::action::{ActionConfig, ForkAction};
//! use serde_json::json;
//!
//! let action = ForkAction::new(ActionConfig::default());
//! let outcome = action
//!     .run(&json!({ "projectId": "group/project", "token": token }))
//!     .await?;
//! println!("forked to {}", outcome.project_url);
//! ```

mod errors;
mod outcome;
mod poll;
mod request;
pub mod schema;

pub use errors::ActionError;
pub use outcome::ForkOutcome;
pub use poll::{ImportPoller, PollState};
pub use request::ForkRequest;

use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;
use tracing::info;

use crate::forge::{ClientFactory, ForgeError, GitLabClientFactory};

/// Default delay between status checks, in milliseconds.
pub const DEFAULT_POLLING_INTERVAL_MS: u64 = 2000;

/// Default number of status checks before giving up on waiting.
pub const DEFAULT_MAX_POLLING_ATTEMPTS: u32 = 30;

/// Polling settings, fixed for the lifetime of a [`ForkAction`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionConfig {
    /// Delay between status checks
    pub polling_interval: Duration,
    /// Maximum number of status checks
    pub max_polling_attempts: u32,
}

impl Default for ActionConfig {
    fn default() -> Self {
        Self {
            polling_interval: Duration::from_millis(DEFAULT_POLLING_INTERVAL_MS),
            max_polling_attempts: DEFAULT_MAX_POLLING_ATTEMPTS,
        }
    }
}

impl ActionConfig {
    pub fn with_polling_interval_ms(mut self, ms: u64) -> Self {
        self.polling_interval = Duration::from_millis(ms);
        self
    }

    pub fn with_max_polling_attempts(mut self, attempts: u32) -> Self {
        self.max_polling_attempts = attempts;
        self
    }

    /// Longest time spent sleeping between status checks.
    pub fn total_wait(&self) -> Duration {
        self.polling_interval * self.max_polling_attempts
    }
}

/// Forks a project and waits for the fork to finish importing.
///
/// Invocations are independent; one action can serve many concurrent forks.
#[derive(Clone)]
pub struct ForkAction {
    config: ActionConfig,
    factory: Arc<dyn ClientFactory>,
}

impl std::fmt::Debug for ForkAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ForkAction")
            .field("id", &Self::ID)
            .field("config", &self.config)
            .finish()
    }
}

impl ForkAction {
    /// Stable action identifier.
    pub const ID: &'static str = "gitlab:project:fork";

    /// Human-readable action description.
    pub const DESCRIPTION: &'static str = "Forks a project on a GitLab instance";

    /// Create an action that talks to real GitLab servers.
    pub fn new(config: ActionConfig) -> Self {
        Self::with_factory(config, Arc::new(GitLabClientFactory))
    }

    /// Create an action with a custom client factory.
    pub fn with_factory(config: ActionConfig, factory: Arc<dyn ClientFactory>) -> Self {
        Self { config, factory }
    }

    /// Get the action identifier.
    pub fn id(&self) -> &'static str {
        Self::ID
    }

    /// Get the polling settings.
    pub fn config(&self) -> &ActionConfig {
        &self.config
    }

    /// Schema of the action input.
    pub fn input_schema(&self) -> Value {
        schema::input_schema()
    }

    /// Schema of the action output.
    pub fn output_schema(&self) -> Value {
        schema::output_schema()
    }

    /// Validate untyped input and run the fork.
    ///
    /// # Errors
    ///
    /// Returns `ActionError::InvalidInput` for invalid input, otherwise the
    /// errors of [`execute`](Self::execute).
    pub async fn run(&self, input: &Value) -> Result<ForkOutcome, ActionError> {
        let request = ForkRequest::from_value(input)?;
        self.execute(&request).await
    }

    /// Fork the project and wait for the import to complete.
    ///
    /// An import still in progress once the attempt budget is used up is
    /// not an error: a warning is logged and the last snapshot is returned.
    ///
    /// # Errors
    ///
    /// - `NoResponse` if the fork call returned no project
    /// - `ForkFailed` if the server reports the import as failed
    /// - `ProjectNotFound` / `AuthenticationFailed` / `Failed` for provider
    ///   errors, see [`ActionError::classify`]
    pub async fn execute(&self, request: &ForkRequest) -> Result<ForkOutcome, ActionError> {
        let classify = |e: ForgeError| ActionError::classify(e, &request.project);

        info!(
            project = %request.project,
            host = %request.base_url,
            "Forking GitLab project {} on {}",
            request.project,
            request.base_url
        );

        let api = self
            .factory
            .connect(&request.base_url, &request.token)
            .map_err(classify)?;

        let params = request.fork_parameters();
        info!(options = ?params, "Creating fork with options");

        let forked = api
            .fork(&request.project, &params)
            .await
            .map_err(classify)?
            .ok_or(ActionError::NoResponse)?;

        info!(
            project_id = forked.id,
            path = %forked.path_with_namespace,
            "Successfully forked project to {}",
            forked.path_with_namespace
        );

        let state = ImportPoller::new(&*api, &self.config)
            .run(forked)
            .await
            .map_err(classify)?;
        let attempts = state.attempts();

        let snapshot = match state {
            PollState::Failed { snapshot, .. } => {
                let reason = snapshot
                    .import_error
                    .filter(|e| !e.is_empty())
                    .unwrap_or_else(|| "Unknown error".to_string());
                return Err(ActionError::ForkFailed(reason));
            }
            other => other.into_snapshot(),
        };

        let status = snapshot
            .import_status
            .as_ref()
            .map(|s| s.as_str())
            .unwrap_or("finished");
        info!(
            project_id = snapshot.id,
            status,
            attempts,
            "Fork completed with status: {}",
            status
        );

        Ok(ForkOutcome::from(&snapshot))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = ActionConfig::default();
        assert_eq!(config.polling_interval, Duration::from_millis(2000));
        assert_eq!(config.max_polling_attempts, 30);
        assert_eq!(config.total_wait(), Duration::from_secs(60));
    }

    #[test]
    fn config_builders() {
        let config = ActionConfig::default()
            .with_polling_interval_ms(100)
            .with_max_polling_attempts(5);
        assert_eq!(config.polling_interval, Duration::from_millis(100));
        assert_eq!(config.max_polling_attempts, 5);
        assert_eq!(config.total_wait(), Duration::from_millis(500));
    }

    #[test]
    fn action_identity() {
        let action = ForkAction::new(ActionConfig::default());
        assert_eq!(action.id(), "gitlab:project:fork");
        assert_eq!(action.config(), &ActionConfig::default());
        assert!(format!("{:?}", action).contains("gitlab:project:fork"));
    }

    #[test]
    fn action_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ForkAction>();
    }
}
