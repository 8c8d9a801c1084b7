//! forge::traits
//!
//! Provider capability used by the fork action.
//!
//! # Design
//!
//! The `ProjectApi` trait is async because both operations involve network
//! I/O. It exposes exactly the two calls the fork workflow needs:
//!
//! - `fork` creates a copy of a project and returns the new project snapshot
//! - `show` re-reads a project so the caller can follow its import status
//!
//! The request/response types mirror the GitLab REST v4 shapes so the real
//! client can serialize and deserialize them directly.
//!
//! # Example
//!
//! ```ignore
//! use gitlab_fork::forge::{ForkParameters, ProjectApi, ProjectRef};
//!
//! async fn fork_once(api: &dyn ProjectApi) -> Result<(), ForgeError> {
//!     let project = ProjectRef::from("group/project");
//!     if let Some(forked) = api.fork(&project, &ForkParameters::default()).await? {
//!         println!("forked to {}", forked.path_with_namespace);
//!     }
//!     Ok(())
//! }
//! ```

use std::convert::Infallible;
use std::str::FromStr;

use async_trait::async_trait;
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Number;
use thiserror::Error;

/// Errors from provider operations.
///
/// These map the failure modes of the GitLab REST API. Every variant can
/// report the HTTP status it came from, when one is known, so callers can
/// classify by status instead of by message text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ForgeError {
    /// Authentication failed (invalid token, expired, insufficient scope).
    #[error("authentication failed: {0}")]
    AuthFailed(String),

    /// The requested project was not found.
    #[error("not found: {0}")]
    NotFound(String),

    /// Rate limit exceeded.
    #[error("rate limited")]
    RateLimited,

    /// API returned an error.
    #[error("API error: {status} - {message}")]
    ApiError {
        /// HTTP status code
        status: u16,
        /// Error message from the API
        message: String,
    },

    /// Network or connection error.
    #[error("network error: {0}")]
    NetworkError(String),

    /// The configured base URL cannot be used to reach the API.
    #[error("invalid base URL: {0}")]
    InvalidBaseUrl(String),
}

impl ForgeError {
    /// HTTP status code associated with this error, if known.
    pub fn status(&self) -> Option<u16> {
        match self {
            ForgeError::NotFound(_) => Some(404),
            ForgeError::RateLimited => Some(429),
            ForgeError::ApiError { status, .. } => Some(*status),
            ForgeError::AuthFailed(_)
            | ForgeError::NetworkError(_)
            | ForgeError::InvalidBaseUrl(_) => None,
        }
    }
}

/// Identifier of a project: numeric id or full path (`group/project`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProjectRef {
    /// Numeric project id.
    Id(u64),
    /// Full path with namespace, e.g. `group/subgroup/project`.
    Path(String),
    /// A number that is not a valid id (negative or fractional), sent
    /// unchanged for the server to reject.
    Number(Number),
}

impl ProjectRef {
    /// Render as a single URL path segment.
    ///
    /// Paths are percent-encoded, so `group/project` becomes
    /// `group%2Fproject` as the GitLab API requires.
    pub fn url_segment(&self) -> String {
        match self {
            ProjectRef::Id(id) => id.to_string(),
            ProjectRef::Path(path) => urlencoding::encode(path).into_owned(),
            ProjectRef::Number(n) => n.to_string(),
        }
    }
}

impl std::fmt::Display for ProjectRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProjectRef::Id(id) => write!(f, "{}", id),
            ProjectRef::Path(path) => write!(f, "{}", path),
            ProjectRef::Number(n) => write!(f, "{}", n),
        }
    }
}

impl From<u64> for ProjectRef {
    fn from(id: u64) -> Self {
        ProjectRef::Id(id)
    }
}

impl From<&str> for ProjectRef {
    fn from(path: &str) -> Self {
        ProjectRef::Path(path.to_string())
    }
}

impl From<String> for ProjectRef {
    fn from(path: String) -> Self {
        ProjectRef::Path(path)
    }
}

/// Parses command-line style input: all digits is an id, anything else a path.
impl FromStr for ProjectRef {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(s.parse::<u64>()
            .map(ProjectRef::Id)
            .unwrap_or_else(|_| ProjectRef::Path(s.to_string())))
    }
}

/// Destination namespace of a fork.
///
/// The two variants are mutually exclusive representations of one
/// destination. Serialized inside [`ForkParameters`] they become either a
/// `namespace_id` or a `namespace_path` key, never both.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Namespace {
    /// Numeric namespace id.
    Id(u64),
    /// Namespace path, e.g. `team` or `group/subgroup`.
    Path(String),
    /// A number that is not a valid id, sent as `namespace_id` unchanged.
    Number(Number),
}

impl Serialize for Namespace {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        match self {
            Namespace::Id(id) => map.serialize_entry("namespace_id", id)?,
            Namespace::Number(n) => map.serialize_entry("namespace_id", n)?,
            Namespace::Path(path) => map.serialize_entry("namespace_path", path)?,
        }
        map.end()
    }
}

impl FromStr for Namespace {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(s.parse::<u64>()
            .map(Namespace::Id)
            .unwrap_or_else(|_| Namespace::Path(s.to_string())))
    }
}

/// Visibility level of a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    Private,
    Internal,
    Public,
}

impl Visibility {
    /// All visibility levels, in API order.
    pub const ALL: [Visibility; 3] = [
        Visibility::Private,
        Visibility::Internal,
        Visibility::Public,
    ];

    /// Parse an exact API value. Anything else yields `None`.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "private" => Some(Visibility::Private),
            "internal" => Some(Visibility::Internal),
            "public" => Some(Visibility::Public),
            _ => None,
        }
    }

    /// The API value of this visibility level.
    pub fn as_str(&self) -> &'static str {
        match self {
            Visibility::Private => "private",
            Visibility::Internal => "internal",
            Visibility::Public => "public",
        }
    }
}

impl std::fmt::Display for Visibility {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Body of a fork request.
///
/// Absent fields are omitted from the serialized JSON entirely.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ForkParameters {
    /// Target namespace (`namespace_id` or `namespace_path`)
    #[serde(flatten, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<Namespace>,
    /// Name of the forked project
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Path of the forked project
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// Description of the forked project
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Visibility of the forked project
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visibility: Option<Visibility>,
    /// Default branch of the forked project
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_branch: Option<String>,
}

impl ForkParameters {
    /// True when no option is set (the server picks every default).
    pub fn is_empty(&self) -> bool {
        *self == ForkParameters::default()
    }
}

/// Progress of a fork's underlying import.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ImportStatus {
    Scheduled,
    Started,
    Finished,
    Failed,
    /// The project was never imported.
    None,
    /// Any status this crate does not know about.
    Other(String),
}

impl ImportStatus {
    /// Whether the import is still running.
    ///
    /// Only `scheduled` and `started` are in progress; every other value,
    /// including unknown ones, is terminal.
    pub fn is_in_progress(&self) -> bool {
        matches!(self, ImportStatus::Scheduled | ImportStatus::Started)
    }

    /// The API value of this status.
    pub fn as_str(&self) -> &str {
        match self {
            ImportStatus::Scheduled => "scheduled",
            ImportStatus::Started => "started",
            ImportStatus::Finished => "finished",
            ImportStatus::Failed => "failed",
            ImportStatus::None => "none",
            ImportStatus::Other(s) => s,
        }
    }
}

impl From<String> for ImportStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "scheduled" => ImportStatus::Scheduled,
            "started" => ImportStatus::Started,
            "finished" => ImportStatus::Finished,
            "failed" => ImportStatus::Failed,
            "none" => ImportStatus::None,
            _ => ImportStatus::Other(s),
        }
    }
}

impl From<&str> for ImportStatus {
    fn from(s: &str) -> Self {
        ImportStatus::from(s.to_string())
    }
}

impl From<ImportStatus> for String {
    fn from(status: ImportStatus) -> Self {
        status.as_str().to_string()
    }
}

impl std::fmt::Display for ImportStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Project snapshot returned by the provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    /// Numeric project id
    pub id: u64,
    /// Full path, e.g. `user/forked-project`
    pub path_with_namespace: String,
    /// Web URL for viewing
    pub web_url: String,
    /// SSH clone URL
    pub ssh_url_to_repo: String,
    /// HTTP clone URL
    pub http_url_to_repo: String,
    /// Import progress (absent on instances that do not report it)
    #[serde(default)]
    pub import_status: Option<ImportStatus>,
    /// Import failure reason, when the import failed
    #[serde(default)]
    pub import_error: Option<String>,
}

impl Project {
    /// Whether this snapshot reports an import still in progress.
    pub fn import_in_progress(&self) -> bool {
        self.import_status
            .as_ref()
            .is_some_and(ImportStatus::is_in_progress)
    }

    /// Whether this snapshot reports a failed import.
    pub fn import_failed(&self) -> bool {
        self.import_status == Some(ImportStatus::Failed)
    }
}

/// Project operations on a GitLab-compatible server.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync` so independent forks can run on
/// separate tasks.
#[async_trait]
pub trait ProjectApi: Send + Sync {
    /// Get the provider name (e.g., "gitlab").
    fn name(&self) -> &'static str;

    /// Fork a project.
    ///
    /// # Returns
    ///
    /// The new project, or `None` when the server answered without a body.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the source project doesn't exist or is invisible
    /// - `AuthFailed` if the token is invalid or lacks the `api` scope
    /// - `ApiError` for any other non-success response
    async fn fork(
        &self,
        project: &ProjectRef,
        params: &ForkParameters,
    ) -> Result<Option<Project>, ForgeError>;

    /// Get a project by id.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the project doesn't exist
    async fn show(&self, id: u64) -> Result<Project, ForgeError>;
}
