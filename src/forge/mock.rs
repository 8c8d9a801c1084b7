//! forge::mock
//!
//! Mock GitLab implementation for deterministic testing.
//!
//! # Design
//!
//! `MockGitLab` scripts what the server answers: the result of the fork
//! call and a queue of `show` results. When the queue has one entry left,
//! that entry keeps repeating, which models an import stuck in progress.
//! Every call is recorded for verification.
//!
//! It also implements [`ClientFactory`], handing out clones of itself and
//! recording the `(base_url, token)` pairs it was connected with.
//!
//! # Example
//!
//! ```
//! use gitlab_fork::forge::mock::{sample_project, MockGitLab};
//! use gitlab_fork::forge::{ForkParameters, ImportStatus, ProjectApi, ProjectRef};
//!
//! # tokio_test::block_on(async {
//! let forge = MockGitLab::new()
//!     .fork_returns(sample_project(123, ImportStatus::Started))
//!     .show_returns(sample_project(123, ImportStatus::Finished));
//!
//! let forked = forge
//!     .fork(&ProjectRef::from("group/project"), &ForkParameters::default())
//!     .await
//!     .unwrap()
//!     .unwrap();
//! assert_eq!(forked.id, 123);
//!
//! let shown = forge.show(123).await.unwrap();
//! assert_eq!(shown.import_status, Some(ImportStatus::Finished));
//! assert_eq!(forge.show_count(), 1);
//! # });
//! ```

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use super::factory::ClientFactory;
use super::traits::{
    ForgeError, ForkParameters, ImportStatus, Project, ProjectApi, ProjectRef,
};

/// Mock GitLab server for testing.
///
/// Thread-safe via internal `Arc<Mutex<...>>` wrapping; clones share state.
#[derive(Debug, Clone, Default)]
pub struct MockGitLab {
    /// Internal state shared across clones.
    inner: Arc<Mutex<MockGitLabInner>>,
}

/// Internal mutable state.
#[derive(Debug, Default)]
struct MockGitLabInner {
    /// Scripted result of the fork call.
    fork_result: Option<Result<Option<Project>, ForgeError>>,
    /// Scripted results of show calls, consumed front to back.
    show_results: VecDeque<Result<Project, ForgeError>>,
    /// Recorded operations for verification.
    operations: Vec<MockOperation>,
    /// Recorded factory connections.
    connections: Vec<Connection>,
}

/// Recorded operation for test verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockOperation {
    Fork {
        project: ProjectRef,
        params: ForkParameters,
    },
    Show {
        id: u64,
    },
}

/// Arguments the factory was connected with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Connection {
    pub base_url: String,
    pub token: String,
}

impl MockGitLab {
    /// Create a mock with nothing scripted.
    pub fn new() -> Self {
        Self::default()
    }

    /// Script the fork call to return a project.
    pub fn fork_returns(self, project: Project) -> Self {
        self.lock().fork_result = Some(Ok(Some(project)));
        self
    }

    /// Script the fork call to succeed without a response body.
    pub fn fork_returns_nothing(self) -> Self {
        self.lock().fork_result = Some(Ok(None));
        self
    }

    /// Script the fork call to fail.
    ///
    /// # Example
    ///
    /// ```
    /// use gitlab_fork::forge::mock::MockGitLab;
    /// use gitlab_fork::forge::ForgeError;
    ///
    /// let forge = MockGitLab::new()
    ///     .fork_fails(ForgeError::NotFound("404 Project Not Found".into()));
    /// ```
    pub fn fork_fails(self, error: ForgeError) -> Self {
        self.lock().fork_result = Some(Err(error));
        self
    }

    /// Queue a project for the next show call.
    pub fn show_returns(self, project: Project) -> Self {
        self.lock().show_results.push_back(Ok(project));
        self
    }

    /// Queue a failure for the next show call.
    pub fn show_fails(self, error: ForgeError) -> Self {
        self.lock().show_results.push_back(Err(error));
        self
    }

    /// Get all recorded operations.
    pub fn operations(&self) -> Vec<MockOperation> {
        self.lock().operations.clone()
    }

    /// Number of show calls made so far.
    pub fn show_count(&self) -> usize {
        self.lock()
            .operations
            .iter()
            .filter(|op| matches!(op, MockOperation::Show { .. }))
            .count()
    }

    /// Parameters of every fork call made so far.
    pub fn fork_calls(&self) -> Vec<(ProjectRef, ForkParameters)> {
        self.lock()
            .operations
            .iter()
            .filter_map(|op| match op {
                MockOperation::Fork { project, params } => {
                    Some((project.clone(), params.clone()))
                }
                MockOperation::Show { .. } => None,
            })
            .collect()
    }

    /// Get all recorded factory connections.
    pub fn connections(&self) -> Vec<Connection> {
        self.lock().connections.clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MockGitLabInner> {
        self.inner.lock().unwrap()
    }
}

#[async_trait]
impl ProjectApi for MockGitLab {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn fork(
        &self,
        project: &ProjectRef,
        params: &ForkParameters,
    ) -> Result<Option<Project>, ForgeError> {
        let mut inner = self.lock();
        inner.operations.push(MockOperation::Fork {
            project: project.clone(),
            params: params.clone(),
        });

        inner
            .fork_result
            .clone()
            .unwrap_or_else(|| Err(ForgeError::NetworkError("no fork result scripted".into())))
    }

    async fn show(&self, id: u64) -> Result<Project, ForgeError> {
        let mut inner = self.lock();
        inner.operations.push(MockOperation::Show { id });

        let result = if inner.show_results.len() > 1 {
            inner.show_results.pop_front()
        } else {
            inner.show_results.front().cloned()
        };

        result.unwrap_or_else(|| Err(ForgeError::NotFound(format!("project {}", id))))
    }
}

impl ClientFactory for MockGitLab {
    fn connect(&self, base_url: &str, token: &str) -> Result<Box<dyn ProjectApi>, ForgeError> {
        self.lock().connections.push(Connection {
            base_url: base_url.to_string(),
            token: token.to_string(),
        });
        Ok(Box::new(self.clone()))
    }
}

/// Build a project snapshot with realistic URLs.
///
/// The project lives at `user/forked-project` on gitlab.com.
pub fn sample_project(id: u64, status: ImportStatus) -> Project {
    Project {
        id,
        path_with_namespace: "user/forked-project".to_string(),
        web_url: "https://gitlab.com/user/forked-project".to_string(),
        ssh_url_to_repo: "git@gitlab.com:user/forked-project.git".to_string(),
        http_url_to_repo: "https://gitlab.com/user/forked-project.git".to_string(),
        import_status: Some(status),
        import_error: None,
    }
}
