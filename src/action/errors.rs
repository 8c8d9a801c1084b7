//! action::errors
//!
//! Error contract of the fork action.
//!
//! Every variant is user-facing: the caller can act on the message by
//! correcting input, fixing credentials, or investigating the server side.
//! Provider errors are never surfaced raw; [`ActionError::classify`] maps
//! them onto this taxonomy.

use thiserror::Error;

use crate::forge::{ForgeError, ProjectRef};

/// Errors returned by the fork action.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActionError {
    /// The action input failed validation.
    #[error("{0}")]
    InvalidInput(String),

    /// The fork call succeeded without returning a project.
    #[error("Failed to fork project - no response from GitLab API")]
    NoResponse,

    /// The server reported the fork's import as failed.
    #[error("Fork failed: {0}")]
    ForkFailed(String),

    /// The source (or forked) project could not be found.
    #[error(
        "GitLab project not found: {project}. Please verify the project ID/path and token permissions."
    )]
    ProjectNotFound {
        /// The project id or path from the request
        project: String,
    },

    /// The token was rejected or lacks permissions.
    #[error(
        "GitLab authentication failed. Please verify your token has the 'api' scope and necessary permissions."
    )]
    AuthenticationFailed,

    /// Any other failure, wrapping the original message.
    #[error("Failed to fork GitLab project: {0}")]
    Failed(String),
}

impl ActionError {
    /// Map a provider error onto the action's error taxonomy.
    ///
    /// The HTTP status decides when the error carries one. Errors without a
    /// status fall back to matching the message text for `404`/`not found`
    /// and `401`/`403`.
    ///
    /// # Example
    ///
    /// ```
    /// use gitlab_fork::action::ActionError;
    /// use gitlab_fork::forge::{ForgeError, ProjectRef};
    ///
    /// let err = ActionError::classify(
    ///     ForgeError::NotFound("404 Project Not Found".into()),
    ///     &ProjectRef::from("group/project"),
    /// );
    /// assert_eq!(
    ///     err,
    ///     ActionError::ProjectNotFound { project: "group/project".into() }
    /// );
    /// ```
    pub fn classify(error: ForgeError, project: &ProjectRef) -> Self {
        if matches!(error, ForgeError::AuthFailed(_)) {
            return ActionError::AuthenticationFailed;
        }

        match error.status() {
            Some(404) => ActionError::not_found(project),
            Some(401 | 403) => ActionError::AuthenticationFailed,
            Some(_) => ActionError::Failed(error.to_string()),
            None => ActionError::classify_message(error.to_string(), project),
        }
    }

    /// Fallback classification for errors that carry no status code.
    fn classify_message(message: String, project: &ProjectRef) -> Self {
        let lowered = message.to_lowercase();
        if lowered.contains("404") || lowered.contains("not found") {
            ActionError::not_found(project)
        } else if lowered.contains("401") || lowered.contains("403") {
            ActionError::AuthenticationFailed
        } else {
            ActionError::Failed(message)
        }
    }

    fn not_found(project: &ProjectRef) -> Self {
        ActionError::ProjectNotFound {
            project: project.to_string(),
        }
    }

    /// Stable machine-readable code for this error.
    pub fn code(&self) -> &'static str {
        match self {
            ActionError::InvalidInput(_) => "invalid_input",
            ActionError::NoResponse => "no_response",
            ActionError::ForkFailed(_) => "fork_failed",
            ActionError::ProjectNotFound { .. } => "project_not_found",
            ActionError::AuthenticationFailed => "authentication_failed",
            ActionError::Failed(_) => "failed",
        }
    }
}
